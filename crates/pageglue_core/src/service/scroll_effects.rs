//! Reveal-on-scroll latch and hero parallax.
//!
//! # Responsibility
//! - Reveal observed elements once at least 10% of their area enters the
//!   viewport (with a 50px bottom margin exclusion).
//! - Offset the hero element by half the scroll offset while the offset is
//!   below the hero height.
//!
//! # Invariants
//! - Reveal is a one-way latch per element; it never reverts.
//! - Past the hero height no parallax write occurs, so the last applied
//!   offset freezes. Intentional; do not clamp or reset.

use crate::host::surface::{PageSurface, SurfaceResult};
use crate::model::geometry::{ElementBox, Viewport};
use crate::model::page::HeroBinding;
use log::debug;
use std::collections::{BTreeMap, BTreeSet};

/// Class applied to a revealed element.
pub const REVEAL_CLASS: &str = "animate-in";
/// Minimum visible area fraction that triggers a reveal.
pub const REVEAL_THRESHOLD: f64 = 0.1;
/// Bottom viewport margin excluded from intersection checks.
pub const REVEAL_BOTTOM_MARGIN_PX: f64 = 50.0;
/// Hero offset per scrolled pixel.
pub const PARALLAX_FACTOR: f64 = 0.5;

/// Fraction of an element's area inside the viewport, with the bottom
/// margin excluded. Zero for degenerate (non-positive height) elements.
pub fn visible_fraction(element: &ElementBox, viewport: &Viewport) -> f64 {
    if element.height <= 0.0 {
        return 0.0;
    }
    let view_top = viewport.scroll_offset;
    let view_bottom = viewport.scroll_offset + viewport.height - REVEAL_BOTTOM_MARGIN_PX;
    let overlap = element.bottom().min(view_bottom) - element.top.max(view_top);
    (overlap / element.height).clamp(0.0, 1.0)
}

/// Tracks observed elements and the hero parallax binding.
#[derive(Debug, Clone, Default)]
pub struct ScrollAnimator {
    observed: BTreeMap<String, ElementBox>,
    revealed: BTreeSet<String>,
    hero: Option<HeroBinding>,
}

impl ScrollAnimator {
    pub fn new(hero: Option<HeroBinding>) -> Self {
        Self {
            observed: BTreeMap::new(),
            revealed: BTreeSet::new(),
            hero,
        }
    }

    /// Registers one element for reveal observation.
    pub fn observe(&mut self, element_id: impl Into<String>, bounds: ElementBox) {
        self.observed.insert(element_id.into(), bounds);
    }

    pub fn is_observed(&self, element_id: &str) -> bool {
        self.observed.contains_key(element_id)
    }

    pub fn is_revealed(&self, element_id: &str) -> bool {
        self.revealed.contains(element_id)
    }

    /// Handles an intersection check for one observed element. Returns true
    /// when this call performed the reveal; false when the element is
    /// unknown, not visible enough, or already latched.
    pub fn on_intersection<S: PageSurface>(
        &mut self,
        surface: &mut S,
        element_id: &str,
        viewport: &Viewport,
    ) -> SurfaceResult<bool> {
        if self.revealed.contains(element_id) {
            return Ok(false);
        }
        let Some(bounds) = self.observed.get(element_id) else {
            return Ok(false);
        };
        if visible_fraction(bounds, viewport) < REVEAL_THRESHOLD {
            return Ok(false);
        }
        surface.add_class(element_id, REVEAL_CLASS)?;
        self.revealed.insert(element_id.to_string());
        debug!("event=element_revealed module=scroll_effects element={element_id}");
        Ok(true)
    }

    /// Applies the hero parallax for the current scroll offset.
    pub fn apply_parallax<S: PageSurface>(
        &self,
        surface: &mut S,
        scroll_offset: f64,
    ) -> SurfaceResult<()> {
        let Some(hero) = &self.hero else {
            return Ok(());
        };
        if scroll_offset < hero.height {
            surface.set_translate_y(&hero.element_id, scroll_offset * PARALLAX_FACTOR)?;
        }
        Ok(())
    }
}
