// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Ownership-tagged message envelope.
//!
//! Every message moving through a delivery buffer is wrapped in a
//! [`MessageEnvelope`] that records how the payload is owned:
//!
//! - `Shared`: reference-counted and immutable. Many subscriptions may hold
//!   the same payload; it is freed when the last holder drops it.
//! - `Unique`: exclusively owned. Whoever takes it gets full ownership and
//!   may mutate it; the payload is never duplicated.
//!
//! The only conversion between the two is [`MessageEnvelope::promoted`], the
//! one-way promotion a shared-only buffer applies when a producer offered an
//! exclusive payload but the buffer must fan it out. Promotion happens at
//! most once per message, before any consumer has seen it, and allocates
//! exactly once. There is no demotion path: a shared payload can have other
//! holders, so handing out exclusive ownership of it would be a lie.

use std::sync::Arc;

/// Ownership classes a buffer accepts and returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipMode {
    /// The buffer stores only shared envelopes; exclusive payloads are
    /// promoted on enqueue.
    SharedOnly,
    /// The buffer is meant for exclusive hand-off to a single consumer.
    UniqueOnly,
    /// The buffer stores whatever the producer offered, unchanged.
    Either,
}

/// Which delivery entry point a subscription prefers.
///
/// Reported by the endpoint so the publish path can construct the cheaper
/// envelope kind up front instead of converting later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnershipPreference {
    /// The subscriber reads the payload; a shared reference is enough.
    #[default]
    PreferShared,
    /// The subscriber wants exclusive ownership of the payload.
    PreferUnique,
}

/// A message payload tagged with how it is owned.
#[derive(Debug)]
pub enum MessageEnvelope<T> {
    /// Reference-counted payload, readable by many holders.
    Shared(Arc<T>),
    /// Exclusively owned payload, moved to whichever consumer takes it.
    Unique(Box<T>),
}

impl<T> MessageEnvelope<T> {
    /// Wraps an already-shared payload.
    pub fn from_shared(payload: Arc<T>) -> Self {
        Self::Shared(payload)
    }

    /// Wraps an exclusively-owned payload.
    pub fn from_unique(payload: Box<T>) -> Self {
        Self::Unique(payload)
    }

    /// True if the payload is shared.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }

    /// True if the payload is exclusively owned.
    #[must_use]
    pub fn is_unique(&self) -> bool {
        matches!(self, Self::Unique(_))
    }

    /// Promotes an exclusive payload to a shared one.
    ///
    /// Idempotent: an already-shared envelope passes through untouched, same
    /// `Arc`, no new allocation. A unique payload is moved into a fresh
    /// reference count — the single allocation the promotion contract allows.
    #[must_use]
    pub fn promoted(self) -> Self {
        match self {
            Self::Unique(payload) => Self::Shared(Arc::from(payload)),
            shared => shared,
        }
    }

    /// Borrows the shared handle, if this envelope is shared.
    #[must_use]
    pub fn as_shared(&self) -> Option<&Arc<T>> {
        match self {
            Self::Shared(payload) => Some(payload),
            Self::Unique(_) => None,
        }
    }

    /// Read access to the payload regardless of variant.
    #[must_use]
    pub fn payload(&self) -> &T {
        match self {
            Self::Shared(payload) => payload,
            Self::Unique(payload) => payload,
        }
    }
}
