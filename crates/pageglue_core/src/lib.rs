//! Headless behavior engine for a brochure-site front end.
//! This crate is the single source of truth for the page's interaction
//! contracts: navigation highlighting, contact form validation and
//! simulated submission, transient notifications, and scroll effects.

pub mod engine;
pub mod host;
pub mod logging;
pub mod model;
pub mod service;

pub use engine::{EngineError, PageEngine, PageEvent, FRAME_INTERVAL_MS};
pub use host::registry::{EventKind, ListenerOwner, ListenerRegistry, RegistryError};
pub use host::scheduler::{FiredTimer, ManualScheduler, Scheduler, TimerId, TimerKind};
pub use host::surface::{
    AnnotationNode, MemoryPage, PageSurface, SurfaceError, SurfaceResult, BODY_ELEMENT,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::form::{ContactForm, FieldName, ValidationOutcome};
pub use model::geometry::{ElementBox, SectionGeometry, Viewport};
pub use model::notification::{Notification, NotificationId, Severity};
pub use model::page::{
    CardBinding, ContactLinkBinding, FormBinding, HeroBinding, NavLinkBinding, PageDescriptor,
};
pub use service::form_rules::{
    is_valid_email, is_valid_phone, validate_field, validate_form, ContactFormPanel,
};
pub use service::navigation::{active_section_id, NavigationHighlighter};
pub use service::notifier::NotificationPresenter;
pub use service::scroll_effects::{visible_fraction, ScrollAnimator};
pub use service::submission::{SubmissionFlow, SubmissionPhase};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
