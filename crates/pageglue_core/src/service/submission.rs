//! Contact form submission state machine.
//!
//! # Responsibility
//! - Drive the `Idle -> Submitting -> (Success | Failure) -> Idle` machine
//!   around the simulated network round trip.
//! - Manage the submit control's label/disabled state and the form loading
//!   class.
//!
//! # Invariants
//! - Validation runs before any transition out of `Idle`; the flow itself
//!   assumes a valid form.
//! - The simulated round trip never fails, but the `Failure` transition
//!   mirrors `Success` so a real transport can replace the timer without
//!   changing the observable contract.
//! - A submit while `Submitting` is rejected; no second timer is scheduled.

use crate::host::scheduler::{Scheduler, TimerId, TimerKind};
use crate::host::surface::{PageSurface, SurfaceError, SurfaceResult};
use crate::model::notification::Severity;
use crate::service::form_rules::ContactFormPanel;
use crate::service::notifier::NotificationPresenter;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed simulated network round-trip delay.
pub const SUBMIT_ROUND_TRIP_MS: u64 = 2000;
/// Submit control label while the round trip is in flight.
pub const SENDING_LABEL: &str = "Sending...";
/// Loading class applied to the form container while submitting.
pub const FORM_LOADING_CLASS: &str = "form-loading";
/// Success banner text.
pub const SUCCESS_MESSAGE: &str =
    "Thank you! Your message has been sent. Omar will contact you within 24 hours.";
/// Failure banner text; only reachable through an explicit `resolve_failure`.
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again.";

/// Tagged submission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPhase {
    Idle,
    Submitting,
    Success,
    Failure,
}

impl SubmissionPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

/// Errors for transitions attempted from the wrong phase, plus surface
/// failures encountered while applying effects.
#[derive(Debug)]
pub enum SubmissionError {
    /// `begin` requires `Idle`.
    AlreadySubmitting,
    /// `resolve_*` requires `Submitting`.
    NotSubmitting(SubmissionPhase),
    Surface(SurfaceError),
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadySubmitting => write!(f, "submission already in flight"),
            Self::NotSubmitting(phase) => {
                write!(f, "cannot resolve submission from `{}`", phase.as_str())
            }
            Self::Surface(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SubmissionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Surface(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurfaceError> for SubmissionError {
    fn from(value: SurfaceError) -> Self {
        Self::Surface(value)
    }
}

/// Owns the submission phase and the control/loading effects around it.
#[derive(Debug, Clone, Default)]
pub struct SubmissionFlow {
    phase: SubmissionPhase,
    pending_timer: Option<TimerId>,
    original_label: Option<String>,
}

impl Default for SubmissionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Whether a fired timer is this flow's round trip.
    pub fn owns_timer(&self, timer: TimerId) -> bool {
        self.pending_timer == Some(timer)
    }

    /// Enters `Submitting` for an already-validated form and schedules the
    /// simulated round trip.
    pub fn begin<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
        panel: &ContactFormPanel,
    ) -> Result<TimerId, SubmissionError> {
        if self.phase != SubmissionPhase::Idle {
            return Err(SubmissionError::AlreadySubmitting);
        }

        let binding = panel.binding();
        self.original_label = Some(surface.text(&binding.submit_button_id)?);
        surface.set_text(&binding.submit_button_id, SENDING_LABEL)?;
        surface.set_disabled(&binding.submit_button_id, true)?;
        surface.add_class(&binding.form_id, FORM_LOADING_CLASS)?;

        let timer = scheduler.schedule(SUBMIT_ROUND_TRIP_MS, TimerKind::SubmissionRoundTrip);
        self.pending_timer = Some(timer);
        self.phase = SubmissionPhase::Submitting;
        info!("event=submission_started module=submission status=ok");
        Ok(timer)
    }

    /// Completes the round trip successfully: fields reset, control
    /// restored, success banner shown, phase back to `Idle`.
    pub fn resolve_success<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
        panel: &ContactFormPanel,
        notifier: &mut NotificationPresenter,
    ) -> Result<(), SubmissionError> {
        self.enter_terminal(SubmissionPhase::Success)?;
        panel.reset_fields(surface)?;
        panel.clear_all_errors(surface)?;
        self.restore_control(surface, panel)?;
        notifier.show(surface, scheduler, SUCCESS_MESSAGE, Severity::Success)?;
        self.settle();
        Ok(())
    }

    /// Fails the round trip: control restored, error banner shown, field
    /// values kept for the user to retry, phase back to `Idle`.
    pub fn resolve_failure<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
        panel: &ContactFormPanel,
        notifier: &mut NotificationPresenter,
        message: &str,
    ) -> Result<(), SubmissionError> {
        self.enter_terminal(SubmissionPhase::Failure)?;
        self.restore_control(surface, panel)?;
        notifier.show(surface, scheduler, message, Severity::Error)?;
        self.settle();
        Ok(())
    }

    fn enter_terminal(&mut self, terminal: SubmissionPhase) -> Result<(), SubmissionError> {
        if self.phase != SubmissionPhase::Submitting {
            return Err(SubmissionError::NotSubmitting(self.phase));
        }
        self.phase = terminal;
        debug!(
            "event=submission_resolved module=submission outcome={}",
            terminal.as_str()
        );
        Ok(())
    }

    fn restore_control<S: PageSurface>(
        &mut self,
        surface: &mut S,
        panel: &ContactFormPanel,
    ) -> SurfaceResult<()> {
        let binding = panel.binding();
        if let Some(label) = self.original_label.take() {
            surface.set_text(&binding.submit_button_id, &label)?;
        }
        surface.set_disabled(&binding.submit_button_id, false)?;
        surface.remove_class(&binding.form_id, FORM_LOADING_CLASS)?;
        Ok(())
    }

    fn settle(&mut self) {
        self.pending_timer = None;
        self.phase = SubmissionPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SubmissionError, SubmissionFlow, SubmissionPhase, FAILURE_MESSAGE, FORM_LOADING_CLASS,
        SENDING_LABEL, SUCCESS_MESSAGE,
    };
    use crate::host::scheduler::ManualScheduler;
    use crate::host::surface::{MemoryPage, PageSurface};
    use crate::model::form::FieldName;
    use crate::model::notification::Severity;
    use crate::model::page::FormBinding;
    use crate::service::form_rules::ContactFormPanel;
    use crate::service::notifier::NotificationPresenter;
    use std::collections::BTreeMap;

    fn fixture() -> (MemoryPage, ManualScheduler, ContactFormPanel) {
        let mut fields = BTreeMap::new();
        fields.insert(FieldName::Name, "input-name".to_string());
        fields.insert(FieldName::Email, "input-email".to_string());
        fields.insert(FieldName::Phone, "input-phone".to_string());
        fields.insert(FieldName::Message, "input-message".to_string());
        let panel = ContactFormPanel::new(FormBinding {
            form_id: "contact-form".to_string(),
            submit_button_id: "contact-submit".to_string(),
            fields,
        });
        let mut page = MemoryPage::new()
            .with_element("contact-form")
            .with_element("contact-submit")
            .with_element("input-name")
            .with_element("input-email")
            .with_element("input-phone")
            .with_element("input-message");
        page.set_text("contact-submit", "Send Message").unwrap();
        (page, ManualScheduler::new(), panel)
    }

    #[test]
    fn begin_applies_loading_state_and_schedules_round_trip() {
        let (mut page, mut scheduler, panel) = fixture();
        let mut flow = SubmissionFlow::new();

        let timer = flow.begin(&mut page, &mut scheduler, &panel).unwrap();
        assert_eq!(flow.phase(), SubmissionPhase::Submitting);
        assert!(flow.owns_timer(timer));
        assert_eq!(page.text("contact-submit").unwrap(), SENDING_LABEL);
        assert!(page.disabled("contact-submit").unwrap());
        assert!(page.has_class("contact-form", FORM_LOADING_CLASS).unwrap());
        assert_eq!(scheduler.pending_len(), 1);
    }

    #[test]
    fn begin_while_submitting_is_rejected_without_second_timer() {
        let (mut page, mut scheduler, panel) = fixture();
        let mut flow = SubmissionFlow::new();
        flow.begin(&mut page, &mut scheduler, &panel).unwrap();

        let err = flow.begin(&mut page, &mut scheduler, &panel).unwrap_err();
        assert!(matches!(err, SubmissionError::AlreadySubmitting));
        assert_eq!(scheduler.pending_len(), 1);
    }

    #[test]
    fn success_restores_control_resets_fields_and_notifies() {
        let (mut page, mut scheduler, panel) = fixture();
        let mut flow = SubmissionFlow::new();
        let mut notifier = NotificationPresenter::new();
        page.set_value("input-name", "Ada Lovelace").unwrap();

        flow.begin(&mut page, &mut scheduler, &panel).unwrap();
        flow.resolve_success(&mut page, &mut scheduler, &panel, &mut notifier)
            .unwrap();

        assert_eq!(flow.phase(), SubmissionPhase::Idle);
        assert_eq!(page.text("contact-submit").unwrap(), "Send Message");
        assert!(!page.disabled("contact-submit").unwrap());
        assert!(!page.has_class("contact-form", FORM_LOADING_CLASS).unwrap());
        assert_eq!(page.value("input-name").unwrap(), "");
        let banner = notifier.current().unwrap();
        assert_eq!(banner.message, SUCCESS_MESSAGE);
        assert_eq!(banner.severity, Severity::Success);
    }

    #[test]
    fn failure_mirrors_success_but_keeps_field_values() {
        let (mut page, mut scheduler, panel) = fixture();
        let mut flow = SubmissionFlow::new();
        let mut notifier = NotificationPresenter::new();
        page.set_value("input-name", "Ada Lovelace").unwrap();

        flow.begin(&mut page, &mut scheduler, &panel).unwrap();
        flow.resolve_failure(
            &mut page,
            &mut scheduler,
            &panel,
            &mut notifier,
            FAILURE_MESSAGE,
        )
        .unwrap();

        assert_eq!(flow.phase(), SubmissionPhase::Idle);
        assert_eq!(page.text("contact-submit").unwrap(), "Send Message");
        assert_eq!(page.value("input-name").unwrap(), "Ada Lovelace");
        let banner = notifier.current().unwrap();
        assert_eq!(banner.severity, Severity::Error);
    }

    #[test]
    fn resolving_from_idle_is_rejected() {
        let (mut page, mut scheduler, panel) = fixture();
        let mut flow = SubmissionFlow::new();
        let mut notifier = NotificationPresenter::new();

        let err = flow
            .resolve_success(&mut page, &mut scheduler, &panel, &mut notifier)
            .unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::NotSubmitting(SubmissionPhase::Idle)
        ));
    }
}
