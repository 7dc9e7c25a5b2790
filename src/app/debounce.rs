//! Debounced change notifier for the live preview.
//!
//! Watches the [`SourceBuffer`] revision counter and emits a
//! [`PreviewSnapshot`] only after a quiet period with no further edits, so the
//! preview is not rebuilt on every keystroke. The notifier is poll-driven:
//! the UI loop calls [`DebouncedNotifier::poll`] once per frame with the
//! current time, which keeps the component free of timer threads and makes the
//! timing fully testable with injected `Instant`s.

use std::time::{Duration, Instant};

use crate::app::preview::PreviewSnapshot;
use crate::app::source_document::SourceBuffer;

/// Default quiet period before a snapshot is emitted.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Emits at most one snapshot per quiet period.
///
/// Guarantees:
/// - only the final value of an edit burst is emitted,
/// - emitted snapshots are monotonic in buffer revision,
/// - nothing fires once the notifier is dropped or [`cancel`]led.
///
/// [`cancel`]: DebouncedNotifier::cancel
#[derive(Debug)]
pub struct DebouncedNotifier {
    quiet_period: Duration,
    /// Buffer revision seen on the previous poll. `None` until the first
    /// poll, which only records the baseline and never schedules an emission.
    last_observed_revision: Option<u64>,
    /// Deadline of the pending emission, restarted on every observed change.
    pending_deadline: Option<Instant>,
    last_emitted_revision: Option<u64>,
}

impl Default for DebouncedNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl DebouncedNotifier {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            last_observed_revision: None,
            pending_deadline: None,
            last_emitted_revision: None,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Revision of the most recently emitted snapshot, if any.
    pub fn last_emitted_revision(&self) -> Option<u64> {
        self.last_emitted_revision
    }

    /// True while an emission is scheduled but has not fired yet.
    pub fn has_pending(&self) -> bool {
        self.pending_deadline.is_some()
    }

    /// Drop any pending emission without firing it.
    pub fn cancel(&mut self) {
        self.pending_deadline = None;
    }

    /// Observe the buffer at time `now`.
    ///
    /// Any revision change since the previous poll (re)starts the quiet-period
    /// timer; if the timer elapses with no further change, the buffer's value
    /// at elapse time is returned as a snapshot. At most one snapshot is
    /// produced per call.
    pub fn poll(&mut self, buffer: &SourceBuffer, now: Instant) -> Option<PreviewSnapshot> {
        let revision = buffer.revision();

        match self.last_observed_revision {
            None => {
                // First poll establishes the baseline only; rendering starts
                // after the first actual edit.
                self.last_observed_revision = Some(revision);
                return None;
            }
            Some(observed) if observed != revision => {
                self.last_observed_revision = Some(revision);
                self.pending_deadline = Some(now + self.quiet_period);
                return None;
            }
            Some(_) => {}
        }

        let deadline = self.pending_deadline?;
        if now < deadline {
            return None;
        }
        self.pending_deadline = None;
        self.last_emitted_revision = Some(revision);
        Some(PreviewSnapshot::take(buffer))
    }
}
