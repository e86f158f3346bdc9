// Copyright The inproc Authors
// SPDX-License-Identifier: Apache-2.0

//! Publisher-side fan-out across the endpoints registered for a topic.
//!
//! The router is the hand-off point the publish path hits whenever a
//! publisher and at least one subscription share a process. Registration is
//! rare and guarded by locks; publishing is hot and reads a cached
//! `ArcSwap` snapshot of each topic's endpoint list, rebuilt only when the
//! membership changes.
//!
//! # Choosing the delivery entry point
//!
//! A shared publish clones the `Arc` once per endpoint — the payload itself
//! is never copied. An exclusive publish is moved without any copy when the
//! topic has exactly one open endpoint and that endpoint prefers exclusive
//! take; in every other fan-out shape the payload is promoted to shared
//! exactly once and each endpoint receives a reference.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use inproc_config::TopicName;
use parking_lot::{Mutex, RwLock};

use crate::delivery::endpoint::SubscriptionEndpoint;
use crate::delivery::envelope::OwnershipPreference;

struct MemberMap<T> {
    next_id: u64,
    endpoints: HashMap<u64, Arc<SubscriptionEndpoint<T>>>,
}

struct TopicEndpoints<T> {
    members: Mutex<MemberMap<T>>,
    // Cached endpoint snapshot rebuilt only when the membership changes.
    snapshot: ArcSwap<Vec<Arc<SubscriptionEndpoint<T>>>>,
}

impl<T> TopicEndpoints<T> {
    fn new() -> Self {
        Self {
            members: Mutex::new(MemberMap {
                next_id: 0,
                endpoints: HashMap::new(),
            }),
            snapshot: ArcSwap::from_pointee(Vec::new()),
        }
    }

    fn rebuild_snapshot(&self, members: &MemberMap<T>) {
        let snapshot = Arc::new(members.endpoints.values().cloned().collect::<Vec<_>>());
        self.snapshot.store(snapshot);
    }

    fn register(&self, endpoint: Arc<SubscriptionEndpoint<T>>) -> u64 {
        let mut members = self.members.lock();
        let id = members.next_id;
        members.next_id = members.next_id.wrapping_add(1);
        let previous = members.endpoints.insert(id, endpoint);
        debug_assert!(previous.is_none());
        self.rebuild_snapshot(&members);
        id
    }

    fn unregister(&self, registration_id: u64) -> Option<Arc<SubscriptionEndpoint<T>>> {
        let mut members = self.members.lock();
        let removed = members.endpoints.remove(&registration_id);
        self.rebuild_snapshot(&members);
        removed
    }

    fn is_empty(&self) -> bool {
        self.members.lock().endpoints.is_empty()
    }
}

/// Registry of subscription endpoints, keyed by topic.
///
/// Thread-safe and cheaply cloneable.
pub struct DeliveryRouter<T> {
    inner: Arc<RouterInner<T>>,
}

struct RouterInner<T> {
    topics: RwLock<HashMap<TopicName, Arc<TopicEndpoints<T>>>>,
}

impl<T> Clone for DeliveryRouter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> DeliveryRouter<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RouterInner {
                topics: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Registers an endpoint under its topic.
    ///
    /// Returns a registration id for [`unregister`](Self::unregister). The
    /// endpoint starts receiving fan-out from the next publish.
    pub fn register(&self, endpoint: Arc<SubscriptionEndpoint<T>>) -> u64 {
        let topic = endpoint.topic().clone();
        let entry = {
            let mut topics = self.inner.topics.write();
            Arc::clone(
                topics
                    .entry(topic)
                    .or_insert_with(|| Arc::new(TopicEndpoints::new())),
            )
        };
        entry.register(endpoint)
    }

    /// Removes a registration. Returns `true` if it was present.
    ///
    /// The endpoint itself is not closed; that remains its owner's call.
    pub fn unregister(&self, topic: &TopicName, registration_id: u64) -> bool {
        let entry = {
            let topics = self.inner.topics.read();
            topics.get(topic).cloned()
        };
        let Some(entry) = entry else {
            return false;
        };
        let removed = entry.unregister(registration_id).is_some();
        if removed && entry.is_empty() {
            let mut topics = self.inner.topics.write();
            // Re-check under the write lock; a racing register may have
            // repopulated the entry.
            if topics.get(topic).is_some_and(|e| e.is_empty()) {
                let _ = topics.remove(topic);
            }
        }
        removed
    }

    /// Delivers a shared payload to every open endpoint of the topic.
    ///
    /// Returns how many endpoints accepted the message (an endpoint whose
    /// overflow policy rejected it does not count). An unknown topic simply
    /// delivers to zero endpoints.
    pub fn publish_shared(&self, topic: &TopicName, payload: Arc<T>) -> usize {
        let Some(snapshot) = self.snapshot_for(topic) else {
            return 0;
        };
        let mut delivered = 0;
        for endpoint in snapshot.iter() {
            if let Ok(outcome) = endpoint.deliver_shared(Arc::clone(&payload)) {
                if outcome.accepted() {
                    delivered += 1;
                }
            }
        }
        delivered
    }

    /// Delivers an exclusively-owned payload to the topic's endpoints.
    ///
    /// Moved without copy when exactly one open endpoint is registered and
    /// it prefers exclusive take; otherwise promoted to shared exactly once
    /// and fanned out like [`publish_shared`](Self::publish_shared).
    pub fn publish_unique(&self, topic: &TopicName, payload: Box<T>) -> usize {
        let Some(snapshot) = self.snapshot_for(topic) else {
            return 0;
        };
        let open: Vec<_> = snapshot.iter().filter(|e| !e.is_closed()).collect();
        match open.as_slice() {
            [] => 0,
            [only] if only.preferred_take_mode() == OwnershipPreference::PreferUnique => {
                match only.deliver_unique(payload) {
                    Ok(outcome) if outcome.accepted() => 1,
                    _ => 0,
                }
            }
            _ => {
                let payload: Arc<T> = Arc::from(payload);
                let mut delivered = 0;
                for endpoint in open {
                    if let Ok(outcome) = endpoint.deliver_shared(Arc::clone(&payload)) {
                        if outcome.accepted() {
                            delivered += 1;
                        }
                    }
                }
                delivered
            }
        }
    }

    /// Number of endpoints currently registered for the topic.
    #[must_use]
    pub fn endpoint_count(&self, topic: &TopicName) -> usize {
        self.snapshot_for(topic).map_or(0, |s| s.len())
    }

    /// Snapshot of all topics with at least one registration.
    #[must_use]
    pub fn topics(&self) -> Vec<TopicName> {
        let topics = self.inner.topics.read();
        topics.keys().cloned().collect()
    }

    fn snapshot_for(&self, topic: &TopicName) -> Option<Arc<Vec<Arc<SubscriptionEndpoint<T>>>>> {
        let topics = self.inner.topics.read();
        topics.get(topic).map(|entry| entry.snapshot.load_full())
    }
}

impl<T> Default for DeliveryRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}
