// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Read-only configuration model consumed by the inproc delivery engine.
//!
//! Two concerns live here, both consumed exactly once at endpoint
//! construction time:
//!
//! - [`TopicName`]: the validated identity a subscription registers under and
//!   a publisher addresses.
//! - [`QueueProfile`]: the queueing (history/retention) declaration from
//!   which the engine derives buffer capacity and overflow behavior.
//!
//! Everything is serde-deserializable so profiles can be declared in YAML
//! alongside the rest of a process's configuration. Validation follows the
//! accumulate-into-`Vec<String>` convention: `validation_errors(path_prefix)`
//! returns every problem found, prefixed with the configuration path, so a
//! loader can report all of them in one pass.

pub mod queue;
pub mod topic;

pub use queue::{HistoryPolicy, QueueProfile};
pub use topic::TopicName;
