// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Subscription-side endpoint for intra-process delivery.
//!
//! One endpoint per subscription. Producers on any thread call
//! `deliver_shared` / `deliver_unique`; the executor thread that owns the
//! subscription's callback polls `is_ready` through the wait-set and drains
//! with `take_next`. The endpoint owns its buffer exclusively and only
//! borrows the wake signal — the signal belongs to the wait-set that waits
//! on it.
//!
//! The wake signal is triggered after *every* delivery, including ones the
//! overflow policy discarded: occupancy may still be positive and the
//! consumer must get the chance to re-check. Triggers collapse, so a burst
//! of deliveries before the consumer wakes costs one wake cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use inproc_config::{QueueProfile, TopicName};

use crate::delivery::buffer::{EnqueueOutcome, MessageBuffer};
use crate::delivery::envelope::{MessageEnvelope, OwnershipPreference};
use crate::delivery::factory;
use crate::delivery::gate::ActivationGate;
use crate::delivery::signal::WakeSignal;
use crate::error::Error;

/// Receives same-process deliveries for one subscription and signals the
/// wait-set.
pub struct SubscriptionEndpoint<T> {
    topic: TopicName,
    profile: QueueProfile,
    preference: OwnershipPreference,
    buffer: MessageBuffer<T>,
    gate: Arc<ActivationGate>,
    signal: Arc<dyn WakeSignal>,
    closed: AtomicBool,
}

impl<T> SubscriptionEndpoint<T> {
    /// Builds the endpoint and its buffer.
    ///
    /// The endpoint is ready as soon as construction succeeds. Fails only
    /// with [`Error::InvalidConfiguration`], which aborts this
    /// subscription's setup and nothing else.
    pub fn new(
        topic: TopicName,
        profile: QueueProfile,
        preference: OwnershipPreference,
        gate: Arc<ActivationGate>,
        signal: Arc<dyn WakeSignal>,
    ) -> Result<Self, Error> {
        let buffer = factory::create_buffer(preference, &profile)?;
        Ok(Self {
            topic,
            profile,
            preference,
            buffer,
            gate,
            signal,
            closed: AtomicBool::new(false),
        })
    }

    /// Delivers a shared payload.
    pub fn deliver_shared(&self, payload: Arc<T>) -> Result<EnqueueOutcome, Error> {
        self.deliver(MessageEnvelope::from_shared(payload))
    }

    /// Delivers an exclusively-owned payload.
    pub fn deliver_unique(&self, payload: Box<T>) -> Result<EnqueueOutcome, Error> {
        self.deliver(MessageEnvelope::from_unique(payload))
    }

    fn deliver(&self, envelope: MessageEnvelope<T>) -> Result<EnqueueOutcome, Error> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::EndpointClosed {
                topic: self.topic.clone(),
            });
        }

        if self.gate.note_inactive_delivery() {
            tracing::warn!(
                topic = %self.topic,
                "delivery while endpoint is deactivated; buffering until activation"
            );
        }

        let outcome = self.buffer.enqueue(envelope);
        match outcome {
            EnqueueOutcome::Stored => {}
            EnqueueOutcome::DroppedOldest => {
                tracing::debug!(topic = %self.topic, "overflow: evicted oldest message");
            }
            EnqueueOutcome::Rejected => {
                tracing::debug!(topic = %self.topic, "overflow: rejected incoming message");
            }
        }

        // Unconditional, even for Rejected: occupancy may still be positive
        // and the consumer must be given the chance to re-check.
        self.signal.trigger();
        Ok(outcome)
    }

    /// Readiness check for the wait-set.
    ///
    /// False while the lifecycle gate is deactivated, whatever the buffer
    /// holds; the backlog becomes visible again on activation.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.closed.load(Ordering::Acquire)
            && self.gate.is_activated()
            && self.buffer.has_pending()
    }

    /// Removes and returns the oldest pending message.
    ///
    /// [`Error::EmptyBuffer`] after a wake is a benign race with another
    /// drain pass — treat it as "nothing to do now".
    pub fn take_next(&self) -> Result<MessageEnvelope<T>, Error> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::EndpointClosed {
                topic: self.topic.clone(),
            });
        }
        self.buffer.take()
    }

    /// Which delivery entry point the publish path should prefer for this
    /// subscription.
    #[must_use]
    pub fn preferred_take_mode(&self) -> OwnershipPreference {
        self.preference
    }

    /// Topic this endpoint subscribes to.
    #[must_use]
    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    /// Queueing profile the buffer was built from.
    #[must_use]
    pub fn queue_profile(&self) -> &QueueProfile {
        &self.profile
    }

    /// Lifecycle gate shared with this endpoint's manager.
    #[must_use]
    pub fn gate(&self) -> &Arc<ActivationGate> {
        &self.gate
    }

    /// Number of currently buffered messages.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.buffer.occupancy()
    }

    /// Stops accepting deliveries and discards the backlog.
    ///
    /// The wake signal is triggered one last time so a waiting executor
    /// re-checks and observes the closed endpoint instead of blocking on it.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.buffer.clear();
        self.signal.trigger();
    }

    /// True once `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}
