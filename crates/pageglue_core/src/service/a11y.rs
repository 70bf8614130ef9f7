//! Accessibility affordances: screen-reader announcements and card
//! keyboard activation.

use crate::host::scheduler::{Scheduler, TimerId, TimerKind};
use crate::host::surface::{AnnotationNode, PageSurface, SurfaceResult, BODY_ELEMENT};
use std::collections::BTreeMap;
use uuid::Uuid;

/// How long an announcement node stays in the document.
pub const ANNOUNCEMENT_TTL_MS: u64 = 1000;
/// Visually-hidden class for live regions.
pub const SR_ONLY_CLASS: &str = "sr-only";
/// Keyboard tab-stop value applied to activatable cards.
pub const CARD_TABINDEX: &str = "0";

/// Keys that activate a focused card like a click.
pub fn activates_card(key: &str) -> bool {
    key == "Enter" || key == " "
}

/// Appends short-lived polite live regions for screen readers.
#[derive(Debug, Clone, Default)]
pub struct ScreenReaderAnnouncer {
    pending: BTreeMap<TimerId, String>,
}

impl ScreenReaderAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces a message and schedules removal of the live region.
    pub fn announce<S: PageSurface, T: Scheduler>(
        &mut self,
        surface: &mut S,
        scheduler: &mut T,
        message: &str,
    ) -> SurfaceResult<()> {
        let annotation_id = format!("announcement-{}", Uuid::new_v4());
        surface.append_annotation(
            BODY_ELEMENT,
            AnnotationNode::new(annotation_id.clone(), SR_ONLY_CLASS, message)
                .with_attr("aria-live", "polite")
                .with_attr("aria-atomic", "true"),
        )?;
        let timer = scheduler.schedule(ANNOUNCEMENT_TTL_MS, TimerKind::AnnouncementCleanup);
        self.pending.insert(timer, annotation_id);
        Ok(())
    }

    /// Removes the live region owned by a fired cleanup timer. Returns
    /// whether the timer belonged to this announcer.
    pub fn handle_timer<S: PageSurface>(
        &mut self,
        surface: &mut S,
        timer: TimerId,
    ) -> SurfaceResult<bool> {
        let Some(annotation_id) = self.pending.remove(&timer) else {
            return Ok(false);
        };
        surface.remove_annotation(BODY_ELEMENT, &annotation_id)?;
        Ok(true)
    }

    /// Live regions still waiting for cleanup.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}
