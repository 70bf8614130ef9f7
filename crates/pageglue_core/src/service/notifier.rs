//! Single-slot notification presenter.
//!
//! # Responsibility
//! - Show one transient banner at a time and auto-dismiss it after a fixed
//!   delay unless the user closes it first.
//!
//! # Invariants
//! - At most one notification is visible; a new `show` discards the previous
//!   banner and cancels its expiry timer. No queueing.
//! - A stale expiry timer never dismisses a newer notification.

use crate::host::scheduler::{Scheduler, TimerId, TimerKind};
use crate::host::surface::{AnnotationNode, PageSurface, SurfaceResult, BODY_ELEMENT};
use crate::model::notification::{Notification, NotificationId, Severity};
use log::debug;

/// Auto-dismiss delay for an unattended banner.
pub const NOTIFICATION_TTL_MS: u64 = 5000;

#[derive(Debug, Clone)]
struct VisibleNotification {
    notification: Notification,
    expiry_timer: TimerId,
}

/// Presents banners under the body root of the page surface.
#[derive(Debug, Clone, Default)]
pub struct NotificationPresenter {
    visible: Option<VisibleNotification>,
}

impl NotificationPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a banner, discarding any still-visible one.
    pub fn show<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
        message: impl Into<String>,
        severity: Severity,
    ) -> SurfaceResult<NotificationId> {
        self.dismiss(surface, scheduler)?;

        let notification = Notification::new(message, severity);
        surface.append_annotation(
            BODY_ELEMENT,
            AnnotationNode::new(
                notification.id.to_string(),
                notification.severity.banner_class(),
                notification.message.clone(),
            ),
        )?;
        let expiry_timer = scheduler.schedule(NOTIFICATION_TTL_MS, TimerKind::NotificationExpiry);
        debug!(
            "event=notification_shown module=notifier severity={} id={}",
            severity.as_str(),
            notification.id
        );

        let id = notification.id;
        self.visible = Some(VisibleNotification {
            notification,
            expiry_timer,
        });
        Ok(id)
    }

    /// Removes the visible banner, if any; used by the close control and by
    /// `show` for the discard-previous rule.
    pub fn dismiss<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
    ) -> SurfaceResult<bool> {
        let Some(visible) = self.visible.take() else {
            return Ok(false);
        };
        scheduler.cancel(visible.expiry_timer);
        surface.remove_annotation(BODY_ELEMENT, &visible.notification.id.to_string())?;
        Ok(true)
    }

    /// Handles one fired timer; dismisses iff it is the visible banner's
    /// expiry. Returns whether the timer belonged to this presenter.
    pub fn handle_timer<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
        timer: TimerId,
    ) -> SurfaceResult<bool> {
        let matches = self
            .visible
            .as_ref()
            .is_some_and(|visible| visible.expiry_timer == timer);
        if matches {
            self.dismiss(surface, scheduler)?;
        }
        Ok(matches)
    }

    /// The currently visible notification, if any.
    pub fn current(&self) -> Option<&Notification> {
        self.visible.as_ref().map(|visible| &visible.notification)
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationPresenter, NOTIFICATION_TTL_MS};
    use crate::host::scheduler::{ManualScheduler, Scheduler};
    use crate::host::surface::{MemoryPage, PageSurface, BODY_ELEMENT};
    use crate::model::notification::Severity;

    #[test]
    fn second_show_replaces_first_banner() {
        let mut page = MemoryPage::new();
        let mut scheduler = ManualScheduler::new();
        let mut presenter = NotificationPresenter::new();

        presenter
            .show(&mut page, &mut scheduler, "first", Severity::Info)
            .unwrap();
        presenter
            .show(&mut page, &mut scheduler, "second", Severity::Success)
            .unwrap();

        let banners = page.annotations(BODY_ELEMENT).unwrap();
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].text, "second");
        assert_eq!(banners[0].class, "notification notification--success");
        // The first banner's expiry was cancelled with it.
        assert_eq!(scheduler.pending_len(), 1);
    }

    #[test]
    fn banner_auto_dismisses_after_ttl() {
        let mut page = MemoryPage::new();
        let mut scheduler = ManualScheduler::new();
        let mut presenter = NotificationPresenter::new();

        presenter
            .show(&mut page, &mut scheduler, "hello", Severity::Info)
            .unwrap();
        let fired = scheduler.advance(NOTIFICATION_TTL_MS);
        assert_eq!(fired.len(), 1);
        let owned = presenter
            .handle_timer(&mut page, &mut scheduler, fired[0].id)
            .unwrap();
        assert!(owned);
        assert!(page.annotations(BODY_ELEMENT).unwrap().is_empty());
        assert!(presenter.current().is_none());
    }

    #[test]
    fn stale_expiry_does_not_touch_newer_banner() {
        let mut page = MemoryPage::new();
        let mut scheduler = ManualScheduler::new();
        let mut presenter = NotificationPresenter::new();

        presenter
            .show(&mut page, &mut scheduler, "first", Severity::Info)
            .unwrap();
        scheduler.advance(1000);
        presenter
            .show(&mut page, &mut scheduler, "second", Severity::Error)
            .unwrap();

        // Simulate a timer id that no longer belongs to the visible banner.
        let stale = scheduler.schedule(0, crate::host::scheduler::TimerKind::NotificationExpiry);
        let owned = presenter
            .handle_timer(&mut page, &mut scheduler, stale)
            .unwrap();
        assert!(!owned);
        assert_eq!(presenter.current().unwrap().message, "second");
    }

    #[test]
    fn explicit_dismiss_cancels_the_expiry_timer() {
        let mut page = MemoryPage::new();
        let mut scheduler = ManualScheduler::new();
        let mut presenter = NotificationPresenter::new();

        presenter
            .show(&mut page, &mut scheduler, "closable", Severity::Info)
            .unwrap();
        assert!(presenter.dismiss(&mut page, &mut scheduler).unwrap());
        assert_eq!(scheduler.pending_len(), 0);
        assert!(!presenter.dismiss(&mut page, &mut scheduler).unwrap());
    }
}
