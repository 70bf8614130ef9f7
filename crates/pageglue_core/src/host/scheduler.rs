//! One-shot timer contract and manual-clock implementation.
//!
//! # Responsibility
//! - Let behaviors schedule and cancel one-shot callbacks without owning a
//!   real clock; expiry re-enters the engine as an event.
//! - Provide `ManualScheduler`, a virtual-time implementation for the CLI
//!   probe and tests.
//!
//! # Invariants
//! - A timer fires at most once.
//! - Timers with equal due times fire in scheduling order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one scheduled timer.
pub type TimerId = Uuid;

/// What a timer was scheduled for. Carried back on expiry so the engine can
/// route it without consulting behavior internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    /// Simulated contact form network round trip.
    SubmissionRoundTrip,
    /// Notification banner auto-dismiss.
    NotificationExpiry,
    /// Screen-reader live region cleanup.
    AnnouncementCleanup,
    /// Legacy smooth-scroll animation frame.
    AnimationFrame,
}

/// One-shot timer scheduling contract.
pub trait Scheduler {
    /// Schedules a callback after `delay_ms`, returning its id.
    fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerId;
    /// Cancels a pending timer. Returns false when it already fired or was
    /// never scheduled.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// A timer that has come due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTimer {
    id: TimerId,
    kind: TimerKind,
    due_ms: u64,
    seq: u64,
}

/// Virtual-time scheduler; the host advances time explicitly and feeds fired
/// timers back into the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<PendingTimer>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers not yet fired or cancelled.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Advances virtual time, returning every timer that came due, ordered
    /// by due time then scheduling order.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<FiredTimer> {
        self.now_ms += delta_ms;
        let now = self.now_ms;

        let mut due: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|timer| {
            if timer.due_ms <= now {
                due.push(timer.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|timer| (timer.due_ms, timer.seq));
        due.into_iter()
            .map(|timer| FiredTimer {
                id: timer.id,
                kind: timer.kind,
            })
            .collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay_ms: u64, kind: TimerKind) -> TimerId {
        let id = Uuid::new_v4();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(PendingTimer {
            id,
            kind,
            due_ms: self.now_ms + delay_ms,
            seq,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }
}
