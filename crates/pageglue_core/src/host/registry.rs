//! Explicit listener bookkeeping.
//!
//! # Responsibility
//! - Map (element id, event kind) to the behavior that installed the
//!   listener, replacing implicit per-node dispatch with an auditable
//!   registry.
//! - Make teardown explicit: a behavior can drop everything it installed.
//!
//! # Invariants
//! - At most one listener per (element, event kind) pair.
//! - Removal of an unregistered listener is an error, not a no-op.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Event categories the page behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Click,
    Submit,
    Blur,
    Input,
    Scroll,
    KeyPress,
    Intersection,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
            Self::Blur => "blur",
            Self::Input => "input",
            Self::Scroll => "scroll",
            Self::KeyPress => "keypress",
            Self::Intersection => "intersection",
        }
    }
}

/// Which behavior installed a listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerOwner {
    Navigation,
    ContactForm,
    ScrollEffects,
    Accessibility,
    Engine,
}

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    DuplicateListener { element: String, kind: EventKind },
    ListenerNotFound { element: String, kind: EventKind },
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateListener { element, kind } => write!(
                f,
                "listener already registered for `{element}` {}",
                kind.as_str()
            ),
            Self::ListenerNotFound { element, kind } => write!(
                f,
                "no listener registered for `{element}` {}",
                kind.as_str()
            ),
        }
    }
}

impl Error for RegistryError {}

/// In-process listener registry.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    entries: BTreeMap<(String, EventKind), ListenerOwner>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one listener.
    pub fn register(
        &mut self,
        element: impl Into<String>,
        kind: EventKind,
        owner: ListenerOwner,
    ) -> Result<(), RegistryError> {
        let element = element.into();
        let key = (element, kind);
        if self.entries.contains_key(&key) {
            return Err(RegistryError::DuplicateListener {
                element: key.0,
                kind,
            });
        }
        self.entries.insert(key, owner);
        Ok(())
    }

    /// Removes one listener.
    pub fn remove(&mut self, element: &str, kind: EventKind) -> Result<(), RegistryError> {
        if self.entries.remove(&(element.to_string(), kind)).is_none() {
            return Err(RegistryError::ListenerNotFound {
                element: element.to_string(),
                kind,
            });
        }
        Ok(())
    }

    /// Drops every listener installed by one behavior; returns how many were
    /// removed.
    pub fn remove_owned_by(&mut self, owner: ListenerOwner) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry_owner| *entry_owner != owner);
        before - self.entries.len()
    }

    pub fn is_registered(&self, element: &str, kind: EventKind) -> bool {
        self.entries.contains_key(&(element.to_string(), kind))
    }

    pub fn owner(&self, element: &str, kind: EventKind) -> Option<ListenerOwner> {
        self.entries.get(&(element.to_string(), kind)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
