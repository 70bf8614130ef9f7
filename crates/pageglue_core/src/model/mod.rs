//! Transient UI data model for the page behavior engine.
//!
//! # Responsibility
//! - Define the small set of value types the behaviors exchange.
//! - Keep all state UI-local and short-lived; nothing here persists.
//!
//! # Invariants
//! - No model type holds a handle into the page surface.
//! - Derived state (the active section) is never stored, only recomputed.

pub mod form;
pub mod geometry;
pub mod notification;
pub mod page;
