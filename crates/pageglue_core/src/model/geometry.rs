//! Page-coordinate geometry read from the layout engine.
//!
//! # Responsibility
//! - Carry the section/element offsets the behaviors derive state from.
//!
//! # Invariants
//! - All values are page coordinates (pixels from document top), not
//!   viewport coordinates.

use serde::{Deserialize, Serialize};

/// Layout geometry of one page section, keyed by its anchor id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionGeometry {
    /// Anchor id without the leading `#`.
    pub id: String,
    /// Offset of the section top from the document top, in pixels.
    pub top: f64,
    /// Rendered height in pixels.
    pub height: f64,
}

impl SectionGeometry {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Bounding box of one observed element, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Current scroll position and visible height of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset in pixels from the document top.
    pub scroll_offset: f64,
    /// Visible viewport height in pixels.
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_offset: f64, height: f64) -> Self {
        Self {
            scroll_offset,
            height,
        }
    }
}
