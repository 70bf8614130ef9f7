//! Static page wiring captured at initialization.
//!
//! # Responsibility
//! - Describe which page elements each behavior binds to, with the layout
//!   geometry read once at document-ready.
//!
//! # Invariants
//! - The descriptor is immutable after engine construction; geometry is not
//!   re-read on resize (matches the original page behavior).

use crate::model::form::FieldName;
use crate::model::geometry::{ElementBox, SectionGeometry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One navigation link and the section anchor it targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLinkBinding {
    /// Element id of the link itself.
    pub element_id: String,
    /// Target section anchor id, without the leading `#`.
    pub target_section: String,
}

/// Contact form element bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormBinding {
    /// Element id of the form container.
    pub form_id: String,
    /// Element id of the submit control.
    pub submit_button_id: String,
    /// Field name to input element id.
    pub fields: BTreeMap<FieldName, String>,
}

impl FormBinding {
    /// Returns the input element id bound to one field.
    pub fn field_element(&self, field: FieldName) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }
}

/// Hero element driven by the parallax effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroBinding {
    pub element_id: String,
    /// Rendered hero height; the parallax stops past this offset.
    pub height: f64,
}

/// One card that reacts to click/keyboard activation and reveal animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardBinding {
    pub element_id: String,
    /// Heading text used in the contact prompt.
    pub title: String,
    pub bounds: ElementBox,
}

/// Full page wiring handed to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Visible viewport height, used for intersection checks.
    pub viewport_height: f64,
    /// Sections in document order; selection order matters for highlighting.
    pub sections: Vec<SectionGeometry>,
    pub nav_links: Vec<NavLinkBinding>,
    pub form: Option<FormBinding>,
    pub hero: Option<HeroBinding>,
    pub cards: Vec<CardBinding>,
    /// Element ids of `tel:`/`mailto:` links, with their href targets.
    pub contact_links: Vec<ContactLinkBinding>,
    /// Drive nav clicks through the frame-stepped legacy animation instead
    /// of a single smooth scroll request.
    pub legacy_smooth_scroll: bool,
}

/// One phone or email link tracked for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLinkBinding {
    pub element_id: String,
    /// Full href, e.g. `tel:+15551234567` or `mailto:omar@example.com`.
    pub href: String,
}

impl PageDescriptor {
    /// Looks up a section's geometry by anchor id.
    pub fn section(&self, id: &str) -> Option<&SectionGeometry> {
        self.sections.iter().find(|section| section.id == id)
    }

    /// Looks up a card binding by element id.
    pub fn card(&self, element_id: &str) -> Option<&CardBinding> {
        self.cards.iter().find(|card| card.element_id == element_id)
    }
}
