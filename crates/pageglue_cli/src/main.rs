//! Scripted engine probe.
//!
//! # Responsibility
//! - Drive `pageglue_core` through a deterministic interaction script over
//!   the in-memory page, independent of any real document host.
//! - Keep output stable for quick local sanity checks.

use pageglue_core::{
    CardBinding, ContactForm, ContactLinkBinding, ElementBox, FieldName, FormBinding, HeroBinding,
    ManualScheduler, MemoryPage, NavLinkBinding, PageDescriptor, PageEngine, PageEvent,
    PageSurface, SectionGeometry, BODY_ELEMENT,
};
use std::collections::BTreeMap;

fn demo_page() -> (MemoryPage, PageDescriptor) {
    let mut page = MemoryPage::new();
    for id in [
        "hero",
        "nav-home",
        "nav-listings",
        "nav-contact",
        "card-maple",
        "card-birch",
        "contact-form",
        "contact-submit",
        "input-name",
        "input-email",
        "input-phone",
        "input-message",
        "link-phone",
    ] {
        if let Err(err) = page.insert_element(id) {
            eprintln!("demo page setup failed: {err}");
            std::process::exit(1);
        }
    }
    if let Err(err) = page.set_text("contact-submit", "Send Message") {
        eprintln!("demo page setup failed: {err}");
        std::process::exit(1);
    }

    let mut fields = BTreeMap::new();
    fields.insert(FieldName::Name, "input-name".to_string());
    fields.insert(FieldName::Email, "input-email".to_string());
    fields.insert(FieldName::Phone, "input-phone".to_string());
    fields.insert(FieldName::Message, "input-message".to_string());

    let descriptor = PageDescriptor {
        viewport_height: 800.0,
        sections: vec![
            SectionGeometry::new("home", 0.0, 700.0),
            SectionGeometry::new("listings", 700.0, 900.0),
            SectionGeometry::new("contact", 1600.0, 600.0),
        ],
        nav_links: vec![
            NavLinkBinding {
                element_id: "nav-home".to_string(),
                target_section: "home".to_string(),
            },
            NavLinkBinding {
                element_id: "nav-listings".to_string(),
                target_section: "listings".to_string(),
            },
            NavLinkBinding {
                element_id: "nav-contact".to_string(),
                target_section: "contact".to_string(),
            },
        ],
        form: Some(FormBinding {
            form_id: "contact-form".to_string(),
            submit_button_id: "contact-submit".to_string(),
            fields,
        }),
        hero: Some(HeroBinding {
            element_id: "hero".to_string(),
            height: 700.0,
        }),
        cards: vec![
            CardBinding {
                element_id: "card-maple".to_string(),
                title: "12 Maple Drive".to_string(),
                bounds: ElementBox::new(800.0, 300.0),
            },
            CardBinding {
                element_id: "card-birch".to_string(),
                title: "48 Birch Lane".to_string(),
                bounds: ElementBox::new(1150.0, 300.0),
            },
        ],
        contact_links: vec![ContactLinkBinding {
            element_id: "link-phone".to_string(),
            href: "tel:+15551234567".to_string(),
        }],
        legacy_smooth_scroll: false,
    };

    (page, descriptor)
}

fn active_nav(engine: &PageEngine<MemoryPage, ManualScheduler>) -> String {
    for id in ["nav-home", "nav-listings", "nav-contact"] {
        if engine.surface().has_class(id, "active").unwrap_or(false) {
            return id.to_string();
        }
    }
    "none".to_string()
}

fn banner(engine: &PageEngine<MemoryPage, ManualScheduler>) -> String {
    engine
        .notifier()
        .current()
        .map(|notification| {
            format!(
                "[{}] {}",
                notification.severity.as_str(),
                notification.message
            )
        })
        .unwrap_or_else(|| "none".to_string())
}

fn run_script() -> Result<(), Box<dyn std::error::Error>> {
    let (page, descriptor) = demo_page();
    let mut engine = PageEngine::new(page, ManualScheduler::new(), descriptor);

    engine.handle_event(PageEvent::Ready)?;
    println!("ready: listeners={}", engine.registry().len());
    println!("active nav: {}", active_nav(&engine));

    engine.handle_event(PageEvent::Scroll { offset: 900.0 })?;
    println!("after scroll to 900: active nav={}", active_nav(&engine));
    println!(
        "card-maple revealed: {}",
        engine.animator().is_revealed("card-maple")
    );
    println!(
        "hero translate: {:?}",
        engine.surface().translate_y("hero")?
    );

    // Invalid submit: three failing fields, phone left empty.
    engine.surface_mut().set_value("input-email", "not-an-email")?;
    engine.surface_mut().set_value("input-message", "hi")?;
    engine.handle_event(PageEvent::SubmitRequested)?;
    println!("after invalid submit: phase={:?}", engine.submission_phase());
    for id in ["input-name", "input-email", "input-message"] {
        for node in engine.surface().annotations(id)? {
            println!("  {id}: {}", node.text);
        }
    }

    // Correct the fields and submit for real.
    let valid = ContactForm {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "555-123-4567".to_string(),
        message: "I would like to tour the Maple Drive listing.".to_string(),
    };
    engine.surface_mut().set_value("input-name", &valid.name)?;
    engine.surface_mut().set_value("input-email", &valid.email)?;
    engine.surface_mut().set_value("input-phone", &valid.phone)?;
    engine
        .surface_mut()
        .set_value("input-message", &valid.message)?;
    engine.handle_event(PageEvent::FieldInput {
        field: FieldName::Email,
    })?;
    engine.handle_event(PageEvent::SubmitRequested)?;
    println!("after valid submit: phase={:?}", engine.submission_phase());
    println!(
        "submit label: {}",
        engine.surface().text("contact-submit")?
    );

    engine.run_for(2000)?;
    println!("after round trip: phase={:?}", engine.submission_phase());
    println!("notification: {}", banner(&engine));
    println!(
        "submit label: {}",
        engine.surface().text("contact-submit")?
    );

    engine.handle_event(PageEvent::CardActivated {
        element_id: "card-maple".to_string(),
    })?;
    println!("after card click: {}", banner(&engine));

    engine.run_for(5000)?;
    println!("after expiry: {}", banner(&engine));
    println!(
        "body annotations: {}",
        engine.surface().annotations(BODY_ELEMENT)?.len()
    );
    Ok(())
}

fn main() {
    println!("pageglue_core version={}", pageglue_core::core_version());
    if let Err(err) = run_script() {
        eprintln!("script failed: {err}");
        std::process::exit(1);
    }
}
