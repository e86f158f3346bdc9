// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Delivery module: envelope, bounded buffer, factory, endpoint, and router.

mod buffer;
mod endpoint;
mod envelope;
mod factory;
mod gate;
mod router;
mod signal;


pub use buffer::{BufferConfig, EnqueueOutcome, MessageBuffer, OverflowPolicy};
pub use endpoint::SubscriptionEndpoint;
pub use envelope::{MessageEnvelope, OwnershipMode, OwnershipPreference};
pub use factory::{create_buffer, resolve_config, KEEP_ALL_CAPACITY};
pub use gate::ActivationGate;
pub use router::DeliveryRouter;
pub use signal::{NotifySignal, WakeSignal};
