//! Event wiring for the page behaviors.
//!
//! # Responsibility
//! - Own the four behaviors plus accessibility affordances, route discrete
//!   host events (scroll, click, blur, input, key, timer expiry) to them,
//!   and keep listener bookkeeping in the registry.
//!
//! # Invariants
//! - All logic runs on the host's event loop; nothing blocks. Timers come
//!   back as `PageEvent::Timer`.
//! - Events other than `Ready` are rejected until initialization ran.
//! - Behaviors never share mutable state; the engine sequences them.

use crate::host::registry::{EventKind, ListenerOwner, ListenerRegistry, RegistryError};
use crate::host::scheduler::{ManualScheduler, Scheduler, TimerId, TimerKind};
use crate::host::surface::{PageSurface, SurfaceError};
use crate::model::form::FieldName;
use crate::model::geometry::Viewport;
use crate::model::notification::Severity;
use crate::model::page::PageDescriptor;
use crate::service::a11y::{activates_card, ScreenReaderAnnouncer, CARD_TABINDEX};
use crate::service::form_rules::{validate_field, validate_form, ContactFormPanel};
use crate::service::navigation::{legacy_scroll_position, scroll_target_top, NavigationHighlighter, LEGACY_SCROLL_DURATION_MS};
use crate::service::notifier::NotificationPresenter;
use crate::service::scroll_effects::ScrollAnimator;
use crate::service::submission::{SubmissionFlow, SubmissionPhase, SUCCESS_MESSAGE};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Frame interval used by the legacy smooth-scroll fallback.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Discrete external events delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Document ready; installs listeners and runs the initial highlight.
    Ready,
    /// Viewport scrolled to `offset`.
    Scroll { offset: f64 },
    /// A nav link targeting a section anchor was clicked.
    NavLinkClick { target_section: String },
    /// The contact form was submitted.
    SubmitRequested,
    /// A form field lost focus.
    FieldBlur { field: FieldName },
    /// A form field received input.
    FieldInput { field: FieldName },
    /// The host's intersection observer reported a change for one element.
    Intersection { element_id: String },
    /// A card was clicked.
    CardActivated { element_id: String },
    /// A key was pressed on a focused card.
    KeyPress { element_id: String, key: String },
    /// A `tel:`/`mailto:` link was clicked.
    ContactLinkClick { element_id: String },
    /// The notification close control was clicked.
    NotificationClosed,
    /// A scheduled one-shot came due.
    Timer { id: TimerId },
}

/// Engine-level errors: structural misuse of the surface or registry, or a
/// submission transition attempted from the wrong phase.
#[derive(Debug)]
pub enum EngineError {
    NotReady,
    AlreadyInitialized,
    Surface(SurfaceError),
    Registry(RegistryError),
    Submission(crate::service::submission::SubmissionError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotReady => write!(f, "engine has not processed the ready event"),
            Self::AlreadyInitialized => write!(f, "engine already initialized"),
            Self::Surface(err) => write!(f, "{err}"),
            Self::Registry(err) => write!(f, "{err}"),
            Self::Submission(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            Self::Registry(err) => Some(err),
            Self::Submission(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurfaceError> for EngineError {
    fn from(value: SurfaceError) -> Self {
        Self::Surface(value)
    }
}

impl From<RegistryError> for EngineError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<crate::service::submission::SubmissionError> for EngineError {
    fn from(value: crate::service::submission::SubmissionError) -> Self {
        Self::Submission(value)
    }
}

#[derive(Debug, Clone)]
struct LegacyScroll {
    start: f64,
    target: f64,
    elapsed_ms: f64,
    frame_timer: TimerId,
}

/// The page behavior engine.
///
/// Owns the surface, the scheduler, and the behaviors; the host feeds it
/// `PageEvent`s and advances timers.
pub struct PageEngine<S: PageSurface, T: Scheduler> {
    surface: S,
    scheduler: T,
    descriptor: PageDescriptor,
    registry: ListenerRegistry,
    highlighter: NavigationHighlighter,
    panel: Option<ContactFormPanel>,
    submission: SubmissionFlow,
    notifier: NotificationPresenter,
    animator: ScrollAnimator,
    announcer: ScreenReaderAnnouncer,
    legacy_scroll: Option<LegacyScroll>,
    ready: bool,
}

impl<S: PageSurface, T: Scheduler> PageEngine<S, T> {
    pub fn new(surface: S, scheduler: T, descriptor: PageDescriptor) -> Self {
        let highlighter = NavigationHighlighter::new(descriptor.nav_links.clone());
        let panel = descriptor.form.clone().map(ContactFormPanel::new);
        let animator = ScrollAnimator::new(descriptor.hero.clone());
        Self {
            surface,
            scheduler,
            descriptor,
            registry: ListenerRegistry::new(),
            highlighter,
            panel,
            submission: SubmissionFlow::new(),
            notifier: NotificationPresenter::new(),
            animator,
            announcer: ScreenReaderAnnouncer::new(),
            legacy_scroll: None,
            ready: false,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.registry
    }

    pub fn submission_phase(&self) -> SubmissionPhase {
        self.submission.phase()
    }

    pub fn notifier(&self) -> &NotificationPresenter {
        &self.notifier
    }

    pub fn animator(&self) -> &ScrollAnimator {
        &self.animator
    }

    /// Routes one host event.
    pub fn handle_event(&mut self, event: PageEvent) -> Result<(), EngineError> {
        match event {
            PageEvent::Ready => self.on_ready(),
            _ if !self.ready => Err(EngineError::NotReady),
            PageEvent::Scroll { offset } => self.on_scroll(offset),
            PageEvent::NavLinkClick { target_section } => self.on_nav_click(&target_section),
            PageEvent::SubmitRequested => self.on_submit(),
            PageEvent::FieldBlur { field } => self.on_field_blur(field),
            PageEvent::FieldInput { field } => self.on_field_input(field),
            PageEvent::Intersection { element_id } => {
                let viewport = self.viewport();
                self.animator
                    .on_intersection(&mut self.surface, &element_id, &viewport)?;
                Ok(())
            }
            PageEvent::CardActivated { element_id } => self.on_card_activated(&element_id),
            PageEvent::KeyPress { element_id, key } => {
                if activates_card(&key) {
                    self.on_card_activated(&element_id)?;
                }
                Ok(())
            }
            PageEvent::ContactLinkClick { element_id } => {
                self.on_contact_link(&element_id);
                Ok(())
            }
            PageEvent::NotificationClosed => {
                self.notifier
                    .dismiss(&mut self.surface, &mut self.scheduler)?;
                Ok(())
            }
            PageEvent::Timer { id } => self.on_timer(id),
        }
    }

    fn on_ready(&mut self) -> Result<(), EngineError> {
        if self.ready {
            return Err(EngineError::AlreadyInitialized);
        }

        self.registry
            .register("window", EventKind::Scroll, ListenerOwner::Navigation)?;
        for link in &self.descriptor.nav_links {
            self.registry
                .register(link.element_id.clone(), EventKind::Click, ListenerOwner::Navigation)?;
        }
        if let Some(panel) = &self.panel {
            let binding = panel.binding();
            self.registry.register(
                binding.form_id.clone(),
                EventKind::Submit,
                ListenerOwner::ContactForm,
            )?;
            for element in binding.fields.values() {
                self.registry
                    .register(element.clone(), EventKind::Blur, ListenerOwner::ContactForm)?;
                self.registry
                    .register(element.clone(), EventKind::Input, ListenerOwner::ContactForm)?;
            }
        }
        for card in &self.descriptor.cards {
            self.registry
                .register(card.element_id.clone(), EventKind::Click, ListenerOwner::Engine)?;
            self.registry.register(
                card.element_id.clone(),
                EventKind::KeyPress,
                ListenerOwner::Accessibility,
            )?;
            self.registry.register(
                card.element_id.clone(),
                EventKind::Intersection,
                ListenerOwner::ScrollEffects,
            )?;
            self.surface
                .set_attr(&card.element_id, "tabindex", CARD_TABINDEX)?;
            self.animator.observe(card.element_id.clone(), card.bounds);
        }
        for link in &self.descriptor.contact_links {
            self.registry
                .register(link.element_id.clone(), EventKind::Click, ListenerOwner::Engine)?;
        }

        let offset = self.surface.scroll_offset();
        self.highlighter
            .apply(&mut self.surface, offset, &self.descriptor.sections)?;
        self.ready = true;
        info!(
            "event=page_ready module=engine status=ok sections={} listeners={}",
            self.descriptor.sections.len(),
            self.registry.len()
        );
        Ok(())
    }

    fn on_scroll(&mut self, offset: f64) -> Result<(), EngineError> {
        self.surface.scroll_to(offset);
        self.after_scroll()
    }

    /// Highlight, parallax, and reveal sweep for the current offset. The
    /// sweep stands in for the host's intersection observer firing on
    /// scroll.
    fn after_scroll(&mut self) -> Result<(), EngineError> {
        let offset = self.surface.scroll_offset();
        self.highlighter
            .apply(&mut self.surface, offset, &self.descriptor.sections)?;
        self.animator.apply_parallax(&mut self.surface, offset)?;

        let viewport = self.viewport();
        let observed: Vec<String> = self
            .descriptor
            .cards
            .iter()
            .map(|card| card.element_id.clone())
            .collect();
        for element_id in observed {
            self.animator
                .on_intersection(&mut self.surface, &element_id, &viewport)?;
        }
        Ok(())
    }

    fn on_nav_click(&mut self, target_section: &str) -> Result<(), EngineError> {
        let Some(section) = self.descriptor.section(target_section) else {
            debug!("event=nav_click_ignored module=engine target={target_section}");
            return Ok(());
        };
        let target = scroll_target_top(section.top);

        if self.descriptor.legacy_smooth_scroll {
            // Restarting the animation replaces any in-flight one.
            if let Some(previous) = self.legacy_scroll.take() {
                self.scheduler.cancel(previous.frame_timer);
            }
            let frame_timer = self
                .scheduler
                .schedule(FRAME_INTERVAL_MS, TimerKind::AnimationFrame);
            self.legacy_scroll = Some(LegacyScroll {
                start: self.surface.scroll_offset(),
                target,
                elapsed_ms: 0.0,
                frame_timer,
            });
            return Ok(());
        }

        self.surface.scroll_to(target);
        self.after_scroll()
    }

    fn on_submit(&mut self) -> Result<(), EngineError> {
        let Some(panel) = self.panel.clone() else {
            return Ok(());
        };
        if self.submission.phase() == SubmissionPhase::Submitting {
            debug!("event=submit_ignored module=engine reason=in_flight");
            return Ok(());
        }

        let form = panel.read_form(&self.surface)?;
        let outcome = validate_form(&form);
        if outcome.ok {
            panel.clear_all_errors(&mut self.surface)?;
            self.submission
                .begin(&mut self.surface, &mut self.scheduler, &panel)?;
        } else {
            warn!(
                "event=validation_failed module=engine fields={}",
                outcome
                    .errors
                    .keys()
                    .map(|field| field.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            );
            panel.apply_outcome(&mut self.surface, &outcome)?;
        }
        Ok(())
    }

    fn on_field_blur(&mut self, field: FieldName) -> Result<(), EngineError> {
        let Some(panel) = self.panel.clone() else {
            return Ok(());
        };
        let Some(element) = panel.field_element(field) else {
            return Ok(());
        };
        let value = self.surface.value(element)?;
        let error = validate_field(field, &value);
        panel.display_field_error(&mut self.surface, field, error)?;
        Ok(())
    }

    fn on_field_input(&mut self, field: FieldName) -> Result<(), EngineError> {
        let Some(panel) = self.panel.clone() else {
            return Ok(());
        };
        panel.clear_field_error(&mut self.surface, field)?;
        Ok(())
    }

    fn on_card_activated(&mut self, element_id: &str) -> Result<(), EngineError> {
        let Some(card) = self.descriptor.card(element_id) else {
            debug!("event=card_ignored module=engine element={element_id}");
            return Ok(());
        };
        let message = format!("Contact Omar for more details about {}", card.title);
        self.notifier
            .show(&mut self.surface, &mut self.scheduler, &message, Severity::Info)?;
        self.announcer
            .announce(&mut self.surface, &mut self.scheduler, &message)?;
        Ok(())
    }

    fn on_contact_link(&mut self, element_id: &str) {
        match self
            .descriptor
            .contact_links
            .iter()
            .find(|link| link.element_id == element_id)
        {
            Some(link) => info!(
                "event=contact_link_click module=engine href={}",
                link.href
            ),
            None => debug!("event=contact_link_ignored module=engine element={element_id}"),
        }
    }

    fn on_timer(&mut self, id: TimerId) -> Result<(), EngineError> {
        if self.submission.owns_timer(id) {
            // Submission only starts with a bound form; a missing panel here
            // means the timer is stale and gets dropped.
            if let Some(panel) = self.panel.clone() {
                self.submission.resolve_success(
                    &mut self.surface,
                    &mut self.scheduler,
                    &panel,
                    &mut self.notifier,
                )?;
                self.announcer
                    .announce(&mut self.surface, &mut self.scheduler, SUCCESS_MESSAGE)?;
            }
            return Ok(());
        }

        if let Some(mut animation) = self.legacy_scroll.take() {
            if animation.frame_timer == id {
                animation.elapsed_ms += FRAME_INTERVAL_MS as f64;
                let (position, done) = legacy_scroll_position(
                    animation.start,
                    animation.target,
                    animation.elapsed_ms,
                    LEGACY_SCROLL_DURATION_MS,
                );
                self.surface.scroll_to(position);
                self.after_scroll()?;
                if !done {
                    animation.frame_timer = self
                        .scheduler
                        .schedule(FRAME_INTERVAL_MS, TimerKind::AnimationFrame);
                    self.legacy_scroll = Some(animation);
                }
                return Ok(());
            }
            self.legacy_scroll = Some(animation);
        }

        if self
            .notifier
            .handle_timer(&mut self.surface, &mut self.scheduler, id)?
        {
            return Ok(());
        }
        if self.announcer.handle_timer(&mut self.surface, id)? {
            return Ok(());
        }
        debug!("event=timer_unclaimed module=engine id={id}");
        Ok(())
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.surface.scroll_offset(), self.descriptor.viewport_height)
    }
}

impl<S: PageSurface> PageEngine<S, ManualScheduler> {
    /// Advances virtual time and feeds every fired timer back through the
    /// engine, in due order.
    pub fn run_for(&mut self, ms: u64) -> Result<(), EngineError> {
        let fired = self.scheduler.advance(ms);
        for timer in fired {
            self.handle_event(PageEvent::Timer { id: timer.id })?;
        }
        Ok(())
    }

    /// Virtual time of the underlying scheduler.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::{EngineError, PageEngine, PageEvent};
    use crate::host::scheduler::ManualScheduler;
    use crate::host::surface::MemoryPage;
    use crate::model::page::PageDescriptor;

    fn empty_descriptor() -> PageDescriptor {
        PageDescriptor {
            viewport_height: 800.0,
            sections: Vec::new(),
            nav_links: Vec::new(),
            form: None,
            hero: None,
            cards: Vec::new(),
            contact_links: Vec::new(),
            legacy_smooth_scroll: false,
        }
    }

    #[test]
    fn events_before_ready_are_rejected() {
        let mut engine = PageEngine::new(
            MemoryPage::new(),
            ManualScheduler::new(),
            empty_descriptor(),
        );
        let err = engine
            .handle_event(PageEvent::Scroll { offset: 10.0 })
            .unwrap_err();
        assert!(matches!(err, EngineError::NotReady));
    }

    #[test]
    fn double_ready_is_rejected() {
        let mut engine = PageEngine::new(
            MemoryPage::new(),
            ManualScheduler::new(),
            empty_descriptor(),
        );
        engine.handle_event(PageEvent::Ready).unwrap();
        let err = engine.handle_event(PageEvent::Ready).unwrap_err();
        assert!(matches!(err, EngineError::AlreadyInitialized));
    }
}
