//! Subscription management for one touring context.
//!
//! An itinerary holds four continuous queries, one per collection, all scoped
//! to the same touring context and all feeding one snapshot channel. They are
//! established and torn down as a unit: a context switch must drop every old
//! subscription before any new one is made, so a stale source can never
//! trigger a merge against another context's snapshots.

use crossbeam_channel::Sender;
use tracing::warn;

use tourdeck::{CollectionKind, Error, ScheduleStore, SnapshotUpdate, SubscriptionHandle};

pub struct TourSubscriptions {
    handles: Vec<SubscriptionHandle>,
}

impl TourSubscriptions {
    /// Subscribes to all four collections for `tour_id`. If any subscription
    /// fails, the ones already made are unwound before the error returns.
    pub fn establish(
        store: &mut dyn ScheduleStore,
        tour_id: &str,
        updates: Sender<SnapshotUpdate>,
    ) -> Result<Self, Error> {
        let mut handles = Vec::with_capacity(CollectionKind::ALL.len());

        for collection in CollectionKind::ALL {
            match store.subscribe(collection, tour_id, updates.clone()) {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    warn!(
                        "Itinerary: failed to subscribe to {}: {err}",
                        collection.as_str()
                    );
                    for handle in &handles {
                        store.unsubscribe(handle);
                    }
                    return Err(err);
                }
            }
        }

        Ok(Self { handles })
    }

    /// Unsubscribes everything. Safe to call more than once.
    pub fn teardown(&mut self, store: &mut dyn ScheduleStore) {
        for handle in self.handles.drain(..) {
            store.unsubscribe(&handle);
        }
    }

    pub fn is_active(&self) -> bool {
        !self.handles.is_empty()
    }
}
