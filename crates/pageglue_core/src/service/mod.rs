//! The four page behaviors, plus accessibility affordances.
//!
//! # Responsibility
//! - Navigation highlighting, form validation/submission, scroll effects,
//!   and notification presentation, each over the host boundary traits.
//!
//! # Invariants
//! - Behaviors never share mutable state; each touches only the elements it
//!   is bound to.

pub mod a11y;
pub mod form_rules;
pub mod navigation;
pub mod notifier;
pub mod scroll_effects;
pub mod submission;
