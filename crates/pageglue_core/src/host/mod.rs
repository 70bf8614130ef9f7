//! Host-environment boundary.
//!
//! # Responsibility
//! - Define the narrow contracts the behaviors need from the page host:
//!   element mutation, one-shot timers, and explicit listener bookkeeping.
//! - Ship in-memory implementations used by the CLI probe and tests.
//!
//! # Invariants
//! - The core never reaches past these traits; no behavior assumes a real
//!   document tree or wall-clock timers.

pub mod registry;
pub mod scheduler;
pub mod surface;
