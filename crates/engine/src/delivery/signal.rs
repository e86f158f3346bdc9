// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Cross-thread wake signal between producers and the wait-set.
//!
//! The delivery core only ever calls [`WakeSignal::trigger`]; waiting is the
//! wait-set collaborator's job. The signal is a collapsing one-shot
//! broadcast, not a queue of wake events: any number of triggers between two
//! wakes produce a single wake, which is correct because the woken consumer
//! drains the buffer, not one message per wake.
//!
//! [`NotifySignal`] is the in-process implementation handed to both sides.
//! `trigger()` stores a flag with `Release` ordering before notifying, and
//! the wait side consumes it with an `Acquire` swap, so a consumer woken by
//! a trigger observes every buffer mutation that preceded it. A wake that
//! finds the flag unset (or the buffer empty) is spurious and benign; the
//! waiter simply re-arms.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Notify;

/// Trigger half of the wake signal, the only part the delivery core uses.
///
/// `trigger` must be safe under concurrent callers from any producer thread.
pub trait WakeSignal: Send + Sync {
    /// Signals that an endpoint may have pending work. Fire-and-forget.
    fn trigger(&self);
}

/// Collapsing one-shot broadcast signal.
#[derive(Debug, Default)]
pub struct NotifySignal {
    triggered: AtomicBool,
    notify: Notify,
}

impl NotifySignal {
    /// Creates an untriggered signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes a pending trigger, if any.
    ///
    /// Used by the polling wait-set: returns `true` at most once per wake
    /// cycle no matter how many triggers fired since the last call.
    pub fn take_triggered(&self) -> bool {
        self.triggered.swap(false, Ordering::AcqRel)
    }

    /// Non-consuming check, for wait-set readiness scans.
    #[must_use]
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }

    /// Waits until a trigger fires, consuming it.
    ///
    /// Returns immediately if a trigger is already pending. The listener is
    /// armed before the flag is re-checked, so a trigger racing with this
    /// call is never lost.
    pub async fn wait(&self) {
        loop {
            if self.take_triggered() {
                return;
            }
            let notified = self.notify.notified();
            tokio::pin!(notified);
            let _ = notified.as_mut().enable();
            if self.take_triggered() {
                return;
            }
            notified.await;
        }
    }
}

impl WakeSignal for NotifySignal {
    fn trigger(&self) {
        self.triggered.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }
}
