//! Page surface contract and in-memory implementation.
//!
//! # Responsibility
//! - Expose the minimal element operations the behaviors mutate: class
//!   lists, text, values, disabled flags, a vertical translate, attributes,
//!   appended annotation nodes, and the scroll position.
//! - Provide `MemoryPage`, a deterministic stand-in for a real document.
//!
//! # Invariants
//! - Operations on unknown element ids fail; they are never silently created.
//! - Annotation ids are unique within their parent element.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Well-known root element annotations attach to when they have no anchor
/// element (notifications, live regions).
pub const BODY_ELEMENT: &str = "body";

pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Errors for structural misuse of the page surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    UnknownElement(String),
    DuplicateElement(String),
    UnknownAnnotation { parent: String, annotation: String },
    DuplicateAnnotation { parent: String, annotation: String },
}

impl Display for SurfaceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownElement(id) => write!(f, "unknown element: `{id}`"),
            Self::DuplicateElement(id) => write!(f, "element already exists: `{id}`"),
            Self::UnknownAnnotation { parent, annotation } => {
                write!(f, "unknown annotation `{annotation}` under `{parent}`")
            }
            Self::DuplicateAnnotation { parent, annotation } => {
                write!(f, "annotation `{annotation}` already present under `{parent}`")
            }
        }
    }
}

impl Error for SurfaceError {}

/// A child node appended under an element: field errors, the notification
/// banner, screen-reader live regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationNode {
    /// Caller-assigned id, unique within the parent.
    pub id: String,
    /// Space-separated class list.
    pub class: String,
    pub text: String,
    /// Extra attributes (`aria-live`, `aria-atomic`, ...).
    pub attrs: BTreeMap<String, String>,
}

impl AnnotationNode {
    pub fn new(id: impl Into<String>, class: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class: class.into(),
            text: text.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Mutation/query contract over the hosting page.
///
/// Kept deliberately narrow: each method corresponds to one capability the
/// original behavior layer needed from the document.
pub trait PageSurface {
    fn contains(&self, id: &str) -> bool;
    fn add_class(&mut self, id: &str, class: &str) -> SurfaceResult<()>;
    fn remove_class(&mut self, id: &str, class: &str) -> SurfaceResult<()>;
    fn has_class(&self, id: &str, class: &str) -> SurfaceResult<bool>;
    fn set_text(&mut self, id: &str, text: &str) -> SurfaceResult<()>;
    fn text(&self, id: &str) -> SurfaceResult<String>;
    /// Form control value.
    fn set_value(&mut self, id: &str, value: &str) -> SurfaceResult<()>;
    fn value(&self, id: &str) -> SurfaceResult<String>;
    fn set_disabled(&mut self, id: &str, disabled: bool) -> SurfaceResult<()>;
    fn disabled(&self, id: &str) -> SurfaceResult<bool>;
    /// Inline `translateY` style, in pixels.
    fn set_translate_y(&mut self, id: &str, px: f64) -> SurfaceResult<()>;
    fn translate_y(&self, id: &str) -> SurfaceResult<Option<f64>>;
    fn set_attr(&mut self, id: &str, name: &str, value: &str) -> SurfaceResult<()>;
    fn attr(&self, id: &str, name: &str) -> SurfaceResult<Option<String>>;
    fn append_annotation(&mut self, parent: &str, node: AnnotationNode) -> SurfaceResult<()>;
    fn remove_annotation(&mut self, parent: &str, annotation: &str) -> SurfaceResult<()>;
    fn annotations(&self, parent: &str) -> SurfaceResult<Vec<AnnotationNode>>;
    /// Current vertical scroll offset of the viewport.
    fn scroll_offset(&self) -> f64;
    /// Scrolls the viewport to the given offset, clamped at zero.
    fn scroll_to(&mut self, offset: f64);
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ElementState {
    classes: BTreeSet<String>,
    text: String,
    value: String,
    disabled: bool,
    translate_y: Option<f64>,
    attrs: BTreeMap<String, String>,
    annotations: Vec<AnnotationNode>,
}

/// In-memory page surface backing the CLI probe and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPage {
    elements: BTreeMap<String, ElementState>,
    scroll_offset: f64,
}

impl MemoryPage {
    /// Creates an empty page containing only the body root.
    pub fn new() -> Self {
        let mut page = Self::default();
        page.elements.insert(BODY_ELEMENT.to_string(), ElementState::default());
        page
    }

    /// Registers one element id.
    pub fn insert_element(&mut self, id: impl Into<String>) -> SurfaceResult<()> {
        let id = id.into();
        if self.elements.contains_key(id.as_str()) {
            return Err(SurfaceError::DuplicateElement(id));
        }
        self.elements.insert(id, ElementState::default());
        Ok(())
    }

    /// Builder-style element registration for test/demo setup.
    pub fn with_element(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.elements.entry(id).or_default();
        self
    }

    /// Space-joined class list of one element, for assertions and display.
    pub fn class_list(&self, id: &str) -> SurfaceResult<String> {
        let element = self.element(id)?;
        Ok(element
            .classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn element(&self, id: &str) -> SurfaceResult<&ElementState> {
        self.elements
            .get(id)
            .ok_or_else(|| SurfaceError::UnknownElement(id.to_string()))
    }

    fn element_mut(&mut self, id: &str) -> SurfaceResult<&mut ElementState> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| SurfaceError::UnknownElement(id.to_string()))
    }
}

impl PageSurface for MemoryPage {
    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn add_class(&mut self, id: &str, class: &str) -> SurfaceResult<()> {
        self.element_mut(id)?.classes.insert(class.to_string());
        Ok(())
    }

    fn remove_class(&mut self, id: &str, class: &str) -> SurfaceResult<()> {
        self.element_mut(id)?.classes.remove(class);
        Ok(())
    }

    fn has_class(&self, id: &str, class: &str) -> SurfaceResult<bool> {
        Ok(self.element(id)?.classes.contains(class))
    }

    fn set_text(&mut self, id: &str, text: &str) -> SurfaceResult<()> {
        self.element_mut(id)?.text = text.to_string();
        Ok(())
    }

    fn text(&self, id: &str) -> SurfaceResult<String> {
        Ok(self.element(id)?.text.clone())
    }

    fn set_value(&mut self, id: &str, value: &str) -> SurfaceResult<()> {
        self.element_mut(id)?.value = value.to_string();
        Ok(())
    }

    fn value(&self, id: &str) -> SurfaceResult<String> {
        Ok(self.element(id)?.value.clone())
    }

    fn set_disabled(&mut self, id: &str, disabled: bool) -> SurfaceResult<()> {
        self.element_mut(id)?.disabled = disabled;
        Ok(())
    }

    fn disabled(&self, id: &str) -> SurfaceResult<bool> {
        Ok(self.element(id)?.disabled)
    }

    fn set_translate_y(&mut self, id: &str, px: f64) -> SurfaceResult<()> {
        self.element_mut(id)?.translate_y = Some(px);
        Ok(())
    }

    fn translate_y(&self, id: &str) -> SurfaceResult<Option<f64>> {
        Ok(self.element(id)?.translate_y)
    }

    fn set_attr(&mut self, id: &str, name: &str, value: &str) -> SurfaceResult<()> {
        self.element_mut(id)?
            .attrs
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attr(&self, id: &str, name: &str) -> SurfaceResult<Option<String>> {
        Ok(self.element(id)?.attrs.get(name).cloned())
    }

    fn append_annotation(&mut self, parent: &str, node: AnnotationNode) -> SurfaceResult<()> {
        let element = self.element_mut(parent)?;
        if element.annotations.iter().any(|existing| existing.id == node.id) {
            return Err(SurfaceError::DuplicateAnnotation {
                parent: parent.to_string(),
                annotation: node.id,
            });
        }
        element.annotations.push(node);
        Ok(())
    }

    fn remove_annotation(&mut self, parent: &str, annotation: &str) -> SurfaceResult<()> {
        let element = self.element_mut(parent)?;
        let before = element.annotations.len();
        element.annotations.retain(|node| node.id != annotation);
        if element.annotations.len() == before {
            return Err(SurfaceError::UnknownAnnotation {
                parent: parent.to_string(),
                annotation: annotation.to_string(),
            });
        }
        Ok(())
    }

    fn annotations(&self, parent: &str) -> SurfaceResult<Vec<AnnotationNode>> {
        Ok(self.element(parent)?.annotations.clone())
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn scroll_to(&mut self, offset: f64) {
        self.scroll_offset = offset.max(0.0);
    }
}
