// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle activation gate shared between an endpoint and its manager.
//!
//! A deactivated endpoint keeps buffering deliveries (up to capacity) but
//! reports not-ready to the wait-set, so dispatch is paused rather than
//! messages lost. The gate also owns the "already warned" flag: the first
//! delivery after a deactivation logs a warning, later ones stay quiet until
//! the endpoint is activated again. Both bits live under the same mutex so
//! activation and warn-suppression can never disagree.

use parking_lot::Mutex;

#[derive(Debug)]
struct GateState {
    activated: bool,
    warned_inactive: bool,
}

/// Per-endpoint activation flag with one-shot warn suppression.
#[derive(Debug)]
pub struct ActivationGate {
    state: Mutex<GateState>,
}

impl ActivationGate {
    /// An activated gate. Plain subscriptions without lifecycle management
    /// use this and never touch it again.
    #[must_use]
    pub fn new() -> Self {
        Self::with_activation(true)
    }

    /// A gate in the given initial state.
    #[must_use]
    pub fn with_activation(activated: bool) -> Self {
        Self {
            state: Mutex::new(GateState {
                activated,
                warned_inactive: false,
            }),
        }
    }

    /// Allows the endpoint to be observed by the wait-set again and re-arms
    /// the inactive-delivery warning.
    pub fn activate(&self) {
        let mut state = self.state.lock();
        state.activated = true;
        state.warned_inactive = false;
    }

    /// Pauses dispatch: the endpoint buffers but reports not-ready.
    pub fn deactivate(&self) {
        self.state.lock().activated = false;
    }

    /// Current activation state.
    #[must_use]
    pub fn is_activated(&self) -> bool {
        self.state.lock().activated
    }

    /// Records a delivery that arrived while deactivated.
    ///
    /// Returns `true` exactly once per deactivation window; the caller logs
    /// on `true`.
    pub(crate) fn note_inactive_delivery(&self) -> bool {
        let mut state = self.state.lock();
        if state.activated || state.warned_inactive {
            return false;
        }
        state.warned_inactive = true;
        true
    }
}

impl Default for ActivationGate {
    fn default() -> Self {
        Self::new()
    }
}
