//! Active-section highlighting and smooth-scroll targeting.
//!
//! # Responsibility
//! - Derive the active section purely from scroll offset and section
//!   geometry; never store it.
//! - Toggle the `active` class on the matching nav link.
//! - Compute scroll targets and the frame-stepped legacy scroll animation.
//!
//! # Invariants
//! - Sections are tested in document order; the last matching range wins.
//! - No matching section leaves no nav link active.

use crate::host::surface::{PageSurface, SurfaceResult};
use crate::model::geometry::SectionGeometry;
use crate::model::page::NavLinkBinding;

/// Class marking the active nav link.
pub const ACTIVE_CLASS: &str = "active";
/// A section owns the scroll range starting this many pixels above its top.
pub const SECTION_RANGE_ALLOWANCE_PX: f64 = 100.0;
/// Fixed navbar allowance subtracted from a nav click's scroll target.
pub const NAV_TARGET_OFFSET_PX: f64 = 80.0;
/// Duration of the legacy frame-stepped scroll animation.
pub const LEGACY_SCROLL_DURATION_MS: f64 = 500.0;

/// Selects the active section for a scroll offset.
///
/// A section matches when the offset falls in `[top - 100, top - 100 + height)`.
/// Ranges are tested in slice order and the last match wins; `None` when no
/// range contains the offset.
pub fn active_section_id(scroll_offset: f64, sections: &[SectionGeometry]) -> Option<&str> {
    let mut current = None;
    for section in sections {
        let range_top = section.top - SECTION_RANGE_ALLOWANCE_PX;
        if scroll_offset >= range_top && scroll_offset < range_top + section.height {
            current = Some(section.id.as_str());
        }
    }
    current
}

/// Scroll target for a nav click on a section, leaving room for the fixed
/// navbar.
pub fn scroll_target_top(section_top: f64) -> f64 {
    section_top - NAV_TARGET_OFFSET_PX
}

/// Eased position of the legacy scroll animation at `elapsed_ms`.
///
/// Returns the viewport offset to apply and whether the animation finished.
/// Easing is quadratic ease-out: `p * (2 - p)`.
pub fn legacy_scroll_position(
    start: f64,
    target: f64,
    elapsed_ms: f64,
    duration_ms: f64,
) -> (f64, bool) {
    let progress = (elapsed_ms / duration_ms).min(1.0);
    let ease = progress * (2.0 - progress);
    (start + (target - start) * ease, progress >= 1.0)
}

/// Applies active-link highlighting over the page surface.
#[derive(Debug, Clone, Default)]
pub struct NavigationHighlighter {
    links: Vec<NavLinkBinding>,
}

impl NavigationHighlighter {
    pub fn new(links: Vec<NavLinkBinding>) -> Self {
        Self { links }
    }

    /// Recomputes the active section and toggles the `active` class across
    /// all bound nav links.
    pub fn apply<S: PageSurface>(
        &self,
        surface: &mut S,
        scroll_offset: f64,
        sections: &[SectionGeometry],
    ) -> SurfaceResult<()> {
        let current = active_section_id(scroll_offset, sections).map(str::to_string);
        for link in &self.links {
            surface.remove_class(&link.element_id, ACTIVE_CLASS)?;
            if current.as_deref() == Some(link.target_section.as_str()) {
                surface.add_class(&link.element_id, ACTIVE_CLASS)?;
            }
        }
        Ok(())
    }
}
