// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Maps queueing declarations to concrete buffer configurations.
//!
//! The mapping is total over legal inputs: every (preference, history)
//! combination with a positive depth resolves to a valid [`BufferConfig`].
//!
//! - `keep_last(depth)` → capacity `depth`, evicting the oldest message when
//!   full. With `strict_retention` set, the queue refuses new messages
//!   instead, preserving the oldest samples through a burst.
//! - `keep_all` → capacity [`KEEP_ALL_CAPACITY`]. "All" is still finite so
//!   that enqueue completes in bounded time; once the ceiling is hit the
//!   queue refuses new messages rather than silently shedding history.

use inproc_config::{HistoryPolicy, QueueProfile};

use crate::delivery::buffer::{BufferConfig, MessageBuffer, OverflowPolicy};
use crate::delivery::envelope::{OwnershipMode, OwnershipPreference};
use crate::error::Error;

/// Capacity bound standing in for "unbounded" under `keep_all`.
pub const KEEP_ALL_CAPACITY: usize = 4096;

/// Resolves a queueing profile and ownership preference to a buffer
/// configuration. Pure; does not validate the depth (construction does).
#[must_use]
pub fn resolve_config(
    preference: OwnershipPreference,
    profile: &QueueProfile,
) -> BufferConfig {
    let (capacity, overflow) = match profile.history {
        HistoryPolicy::KeepLast { depth } => {
            let overflow = if profile.strict_retention {
                OverflowPolicy::RejectNewest
            } else {
                OverflowPolicy::DropOldest
            };
            (depth, overflow)
        }
        HistoryPolicy::KeepAll => (KEEP_ALL_CAPACITY, OverflowPolicy::RejectNewest),
    };

    let ownership = match preference {
        OwnershipPreference::PreferShared => OwnershipMode::SharedOnly,
        OwnershipPreference::PreferUnique => OwnershipMode::UniqueOnly,
    };

    BufferConfig {
        capacity,
        overflow,
        ownership,
    }
}

/// Builds the buffer for one subscription.
///
/// Fails with [`Error::InvalidConfiguration`] only when the profile declares
/// a zero depth.
pub fn create_buffer<T>(
    preference: OwnershipPreference,
    profile: &QueueProfile,
) -> Result<MessageBuffer<T>, Error> {
    MessageBuffer::new(resolve_config(preference, profile))
}
