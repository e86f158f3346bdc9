// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Intra-process message delivery engine.
//!
//! When a publisher and a subscription live in the same process, messages can
//! skip serialization and transport entirely: the publisher hands an
//! ownership-tagged payload straight into the subscription's bounded buffer,
//! and a wake signal tells the process's wait-set that the subscription has
//! work. This crate is that hand-off.
//!
//! The pieces, bottom up:
//!
//! - [`delivery::MessageEnvelope`]: a payload that is either exclusively
//!   owned (`Box<T>`, moved to the single consumer) or shared
//!   (`Arc<T>`, read by many subscriptions).
//! - [`delivery::MessageBuffer`]: a fixed-capacity FIFO with a per-instance
//!   overflow policy, guarded by one mutex.
//! - [`delivery::create_buffer`]: derives a buffer configuration from a
//!   [`inproc_config::QueueProfile`] and an ownership preference.
//! - [`delivery::SubscriptionEndpoint`]: owns one buffer, accepts deliveries
//!   from any producer thread, and triggers the wake signal after every one.
//! - [`delivery::DeliveryRouter`]: the publisher-side fan-out across every
//!   endpoint registered for a topic.
//!
//! The crate never waits: waiting (and deciding when callbacks run) belongs
//! to the executor that polls [`delivery::SubscriptionEndpoint::is_ready`].

pub mod delivery;
pub mod error;

pub use error::Error;
