// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Queueing declarations consumed at buffer construction time.
//!
//! A [`QueueProfile`] states how many undelivered messages a subscription
//! retains and what happens when that bound is reached. The engine reads the
//! profile exactly once, when the subscription's buffer is built; the profile
//! is never consulted again at runtime.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// History retention declared by a subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPolicy {
    /// Retain at most `depth` undelivered messages.
    KeepLast {
        /// Maximum number of retained messages. Must be greater than 0.
        depth: usize,
    },
    /// Retain every undelivered message, up to the engine's safety ceiling.
    KeepAll,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self::KeepLast {
            depth: default_keep_last_depth(),
        }
    }
}

/// Queueing profile for one subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QueueProfile {
    /// History retention policy.
    #[serde(default)]
    pub history: HistoryPolicy,
    /// When true, a full `keep_last` queue refuses new messages instead of
    /// evicting the oldest one. Set by reliability-sensitive declarations
    /// where the oldest samples must survive a burst.
    #[serde(default)]
    pub strict_retention: bool,
}

impl Default for QueueProfile {
    fn default() -> Self {
        Self {
            history: HistoryPolicy::default(),
            strict_retention: false,
        }
    }
}

impl QueueProfile {
    /// A `keep_last` profile with the given depth and default retention.
    #[must_use]
    pub fn keep_last(depth: usize) -> Self {
        Self {
            history: HistoryPolicy::KeepLast { depth },
            strict_retention: false,
        }
    }

    /// A `keep_all` profile.
    #[must_use]
    pub fn keep_all() -> Self {
        Self {
            history: HistoryPolicy::KeepAll,
            strict_retention: false,
        }
    }

    /// Same profile with `strict_retention` set.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict_retention = true;
        self
    }

    /// Returns validation errors for this profile.
    #[must_use]
    pub fn validation_errors(&self, path_prefix: &str) -> Vec<String> {
        let mut errors = Vec::new();
        if let HistoryPolicy::KeepLast { depth: 0 } = self.history {
            errors.push(format!(
                "{path_prefix}.history.keep_last.depth must be greater than 0"
            ));
        }
        errors
    }
}

const fn default_keep_last_depth() -> usize {
    16
}
