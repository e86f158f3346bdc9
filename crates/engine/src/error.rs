// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Errors produced by delivery operations.

use inproc_config::TopicName;

/// Errors produced by buffer construction and runtime delivery operations.
///
/// Only `InvalidConfiguration` is fatal, and only to the endpoint being
/// constructed. The runtime variants are expected outcomes of concurrent
/// operation: an `EmptyBuffer` after a wake is a benign race and means
/// "nothing to do right now", never a fault.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Buffer construction was given an unusable configuration.
    #[error("invalid delivery buffer configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with the configuration.
        reason: String,
    },
    /// `take` was called with no pending message.
    #[error("take on an empty delivery buffer")]
    EmptyBuffer,
    /// The endpoint was closed; it accepts no further deliveries or takes.
    #[error("subscription endpoint for `{topic}` is closed")]
    EndpointClosed {
        /// Topic of the closed endpoint.
        topic: TopicName,
    },
}
