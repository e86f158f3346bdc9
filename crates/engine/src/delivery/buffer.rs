// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Bounded FIFO buffer between same-process producers and one consumer.
//!
//! # Locking
//!
//! One `parking_lot::Mutex` guards the queue; `enqueue`, `take`, and
//! `has_pending` each take it once, so no caller can observe a torn state.
//! Lock hold time is O(1): envelopes are handle moves, promotion allocates
//! before the lock is taken, and an evicted payload is released only after
//! the guard is dropped.
//!
//! # Overflow
//!
//! The policy is fixed at construction and `enqueue` never blocks:
//!
//! - `DropOldest` evicts the head to make room — "keep the most recent N",
//!   the right shape for state-like topics where only the latest sample
//!   matters.
//! - `RejectNewest` refuses the incoming message — the retained prefix is
//!   what the subscriber asked to keep.
//!
//! Either way the loss is the declared retention policy in action, reported
//! through [`EnqueueOutcome`] and never as an error.
//!
//! # Consumers
//!
//! Exactly one consumer at a time is assumed per buffer. The buffer does not
//! arbitrate between concurrent consumers; `take` on an empty buffer returns
//! [`Error::EmptyBuffer`], which a consumer woken by a stale notification
//! treats as "nothing to do".

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::delivery::envelope::{MessageEnvelope, OwnershipMode};
use crate::error::Error;

/// Rule applied when the buffer is full at enqueue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Evict the oldest undelivered message, then insert the new one.
    DropOldest,
    /// Refuse the new message; retained messages are untouched.
    RejectNewest,
}

/// What `enqueue` did with the offered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Inserted; no message was lost.
    Stored,
    /// Inserted after evicting the oldest undelivered message.
    DroppedOldest,
    /// Refused under `RejectNewest`; the offered message was discarded.
    Rejected,
}

impl EnqueueOutcome {
    /// True unless the offered message itself was discarded.
    #[must_use]
    pub fn accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Resolved buffer configuration, produced by the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    /// Maximum number of retained messages. Must be greater than 0.
    pub capacity: usize,
    /// Rule applied when the buffer is full.
    pub overflow: OverflowPolicy,
    /// Ownership class the buffer stores.
    pub ownership: OwnershipMode,
}

impl BufferConfig {
    fn validate(&self) -> Result<(), Error> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfiguration {
                reason: "capacity must be a positive, non-zero value".to_owned(),
            });
        }
        Ok(())
    }
}

/// Fixed-capacity FIFO of ownership-tagged messages.
#[derive(Debug)]
pub struct MessageBuffer<T> {
    config: BufferConfig,
    queue: Mutex<VecDeque<MessageEnvelope<T>>>,
}

impl<T> MessageBuffer<T> {
    /// Builds a buffer from a resolved configuration.
    ///
    /// Fails with [`Error::InvalidConfiguration`] if the capacity is 0. The
    /// buffer is never resized afterwards.
    pub fn new(config: BufferConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            queue: Mutex::new(VecDeque::with_capacity(config.capacity)),
        })
    }

    /// Inserts a message at the tail, applying the overflow policy when full.
    ///
    /// A shared-only buffer promotes an exclusive envelope first (outside the
    /// lock — this is the one allocation the promotion contract allows).
    /// Never blocks; completes in bounded time under any policy.
    pub fn enqueue(&self, envelope: MessageEnvelope<T>) -> EnqueueOutcome {
        let envelope = match self.config.ownership {
            OwnershipMode::SharedOnly => envelope.promoted(),
            OwnershipMode::UniqueOnly | OwnershipMode::Either => envelope,
        };

        let evicted;
        let outcome;
        {
            let mut queue = self.queue.lock();
            if queue.len() < self.config.capacity {
                queue.push_back(envelope);
                evicted = None;
                outcome = EnqueueOutcome::Stored;
            } else {
                match self.config.overflow {
                    OverflowPolicy::DropOldest => {
                        evicted = queue.pop_front();
                        queue.push_back(envelope);
                        outcome = EnqueueOutcome::DroppedOldest;
                    }
                    OverflowPolicy::RejectNewest => {
                        evicted = Some(envelope);
                        outcome = EnqueueOutcome::Rejected;
                    }
                }
            }
        }
        // The lost payload (if any) is released here, after the guard.
        drop(evicted);
        outcome
    }

    /// Removes and returns the oldest undelivered message.
    pub fn take(&self) -> Result<MessageEnvelope<T>, Error> {
        self.queue.lock().pop_front().ok_or(Error::EmptyBuffer)
    }

    /// True if at least one message is pending.
    ///
    /// Safe to call from the wait-set while producers are enqueueing: the
    /// queue mutex orders this check after any enqueue that completed before
    /// its notification fired, so a consumer woken by that notification never
    /// sees `false` here.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.queue.lock().is_empty()
    }

    /// Number of currently pending messages.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.queue.lock().len()
    }

    /// Discards every pending message.
    pub fn clear(&self) {
        let drained: VecDeque<_> = std::mem::take(&mut *self.queue.lock());
        drop(drained);
    }

    /// Ownership class this buffer stores.
    #[must_use]
    pub fn ownership_mode(&self) -> OwnershipMode {
        self.config.ownership
    }

    /// Overflow rule fixed at construction.
    #[must_use]
    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.config.overflow
    }

    /// Maximum number of retained messages.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }
}
