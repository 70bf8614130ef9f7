use pageglue_core::{
    CardBinding, ContactLinkBinding, ElementBox, EventKind, FieldName, FormBinding, ListenerOwner,
    ManualScheduler, MemoryPage, NavLinkBinding, PageDescriptor, PageEngine, PageEvent,
    PageSurface, SectionGeometry,
};
use std::collections::BTreeMap;

fn full_descriptor() -> PageDescriptor {
    let mut fields = BTreeMap::new();
    fields.insert(FieldName::Name, "input-name".to_string());
    fields.insert(FieldName::Email, "input-email".to_string());
    fields.insert(FieldName::Phone, "input-phone".to_string());
    fields.insert(FieldName::Message, "input-message".to_string());

    PageDescriptor {
        viewport_height: 800.0,
        sections: vec![SectionGeometry::new("home", 0.0, 700.0)],
        nav_links: vec![NavLinkBinding {
            element_id: "nav-home".to_string(),
            target_section: "home".to_string(),
        }],
        form: Some(FormBinding {
            form_id: "contact-form".to_string(),
            submit_button_id: "contact-submit".to_string(),
            fields,
        }),
        hero: None,
        cards: vec![CardBinding {
            element_id: "card-maple".to_string(),
            title: "12 Maple Drive".to_string(),
            bounds: ElementBox::new(900.0, 300.0),
        }],
        contact_links: vec![ContactLinkBinding {
            element_id: "link-phone".to_string(),
            href: "tel:+15551234567".to_string(),
        }],
        legacy_smooth_scroll: false,
    }
}

fn ready_engine() -> PageEngine<MemoryPage, ManualScheduler> {
    let mut page = MemoryPage::new();
    for id in [
        "nav-home",
        "card-maple",
        "contact-form",
        "contact-submit",
        "input-name",
        "input-email",
        "input-phone",
        "input-message",
        "link-phone",
    ] {
        page.insert_element(id).unwrap();
    }
    page.set_text("contact-submit", "Send Message").unwrap();
    let mut engine = PageEngine::new(page, ManualScheduler::new(), full_descriptor());
    engine.handle_event(PageEvent::Ready).unwrap();
    engine
}

#[test]
fn ready_installs_the_expected_listener_map() {
    let engine = ready_engine();
    let registry = engine.registry();

    assert_eq!(
        registry.owner("window", EventKind::Scroll),
        Some(ListenerOwner::Navigation)
    );
    assert_eq!(
        registry.owner("nav-home", EventKind::Click),
        Some(ListenerOwner::Navigation)
    );
    assert_eq!(
        registry.owner("contact-form", EventKind::Submit),
        Some(ListenerOwner::ContactForm)
    );
    for input in ["input-name", "input-email", "input-phone", "input-message"] {
        assert_eq!(
            registry.owner(input, EventKind::Blur),
            Some(ListenerOwner::ContactForm)
        );
        assert_eq!(
            registry.owner(input, EventKind::Input),
            Some(ListenerOwner::ContactForm)
        );
    }
    assert_eq!(
        registry.owner("card-maple", EventKind::Click),
        Some(ListenerOwner::Engine)
    );
    assert_eq!(
        registry.owner("card-maple", EventKind::KeyPress),
        Some(ListenerOwner::Accessibility)
    );
    assert_eq!(
        registry.owner("card-maple", EventKind::Intersection),
        Some(ListenerOwner::ScrollEffects)
    );
    assert_eq!(
        registry.owner("link-phone", EventKind::Click),
        Some(ListenerOwner::Engine)
    );

    // window scroll + nav click + submit + 4x(blur+input) + 3 card + 1 link
    assert_eq!(registry.len(), 15);
}

#[test]
fn ready_makes_cards_keyboard_focusable() {
    let engine = ready_engine();
    assert_eq!(
        engine.surface().attr("card-maple", "tabindex").unwrap(),
        Some("0".to_string())
    );
}

#[test]
fn contact_link_clicks_are_tracked_without_side_effects() {
    let mut engine = ready_engine();
    engine
        .handle_event(PageEvent::ContactLinkClick {
            element_id: "link-phone".to_string(),
        })
        .unwrap();
    engine
        .handle_event(PageEvent::ContactLinkClick {
            element_id: "link-unknown".to_string(),
        })
        .unwrap();
    // Tracking is log-only; the page is untouched.
    assert!(engine.surface().annotations("body").unwrap().is_empty());
}

#[test]
fn initial_highlight_runs_at_ready() {
    let engine = ready_engine();
    assert!(engine.surface().has_class("nav-home", "active").unwrap());
}
