//! Schedule store boundary.
//!
//! Touring data lives in a remote document store that is consumed through
//! continuous queries: a subscription delivers the *complete* current set of
//! matching records every time any matching record is created, changed, or
//! deleted. This module defines the record shape those queries deliver, the
//! subscription contract, and an in-process [`MemoryStore`] used by tests and
//! local development.

use crossbeam_channel::Sender;
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::error::Error;

/// The four record collections a touring context subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    ScheduleItems,
    Shows,
    Flights,
    Hotels,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::ScheduleItems,
        CollectionKind::Shows,
        CollectionKind::Flights,
        CollectionKind::Hotels,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::ScheduleItems => "schedule_items",
            CollectionKind::Shows => "shows",
            CollectionKind::Flights => "flights",
            CollectionKind::Hotels => "hotels",
        }
    }
}

/// A store-shaped record: a document id plus an untyped field map.
///
/// Typed decoding happens downstream, per record, so one malformed document
/// never poisons the rest of its snapshot.
#[derive(Debug, Clone)]
pub struct RawRecord {
    pub id: String,
    pub fields: Value,
}

impl RawRecord {
    pub fn new(id: impl Into<String>, fields: Value) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Gets a string field, or `None` if absent or not a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name)?.as_str()
    }

    /// Gets an integer field, or `None` if absent or not an integer.
    pub fn i64_field(&self, name: &str) -> Option<i64> {
        self.fields.get(name)?.as_i64()
    }

    /// Gets a field stored as Unix seconds and converts it to an instant.
    pub fn timestamp_field(&self, name: &str) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.i64_field(name)?, 0)
    }

    /// Gets a string-array field. Non-string elements are skipped.
    pub fn str_list_field(&self, name: &str) -> Vec<String> {
        let Some(values) = self.fields.get(name).and_then(Value::as_array) else {
            return Vec::new();
        };

        values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect()
    }
}

/// A full replacement snapshot for one collection.
#[derive(Debug, Clone)]
pub struct SnapshotUpdate {
    pub collection: CollectionKind,
    pub records: Vec<RawRecord>,
}

/// Handle returned by [`ScheduleStore::subscribe`], used to tear the
/// subscription down again.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    pub id: Uuid,
    pub collection: CollectionKind,
}

impl SubscriptionHandle {
    fn new(collection: CollectionKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            collection,
        }
    }
}

/// Continuous-query access to the touring store.
///
/// A subscription is scoped to one collection and one touring context. The
/// current matching set is delivered immediately on subscribe, then re-sent in
/// full whenever it changes. `unsubscribe` is idempotent; passing a handle
/// that is already gone is always safe.
pub trait ScheduleStore {
    fn subscribe(
        &mut self,
        collection: CollectionKind,
        tour_id: &str,
        updates: Sender<SnapshotUpdate>,
    ) -> Result<SubscriptionHandle, Error>;

    fn unsubscribe(&mut self, handle: &SubscriptionHandle);
}

struct Subscriber {
    handle: SubscriptionHandle,
    tour_id: String,
    sender: Sender<SnapshotUpdate>,
}

/// In-process [`ScheduleStore`] with the same snapshot semantics as the
/// remote store: every mutation re-emits the complete matching set to every
/// live subscriber of the touched collection.
#[derive(Default)]
pub struct MemoryStore {
    records: Vec<(CollectionKind, String, RawRecord)>,
    subscribers: Vec<Subscriber>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a record, then notifies subscribers.
    pub fn put(&mut self, collection: CollectionKind, tour_id: &str, record: RawRecord) {
        let existing = self.records.iter_mut().find(|(coll, tour, rec)| {
            *coll == collection && tour == tour_id && rec.id == record.id
        });

        match existing {
            Some((_, _, rec)) => *rec = record,
            None => self
                .records
                .push((collection, tour_id.to_owned(), record)),
        }

        self.notify(collection, tour_id);
    }

    /// Deletes a record by id. Missing records are a no-op.
    pub fn delete(&mut self, collection: CollectionKind, tour_id: &str, record_id: &str) {
        let before = self.records.len();
        self.records.retain(|(coll, tour, rec)| {
            !(*coll == collection && tour == tour_id && rec.id == record_id)
        });

        if self.records.len() != before {
            self.notify(collection, tour_id);
        }
    }

    fn snapshot_of(
        records: &[(CollectionKind, String, RawRecord)],
        collection: CollectionKind,
        tour_id: &str,
    ) -> Vec<RawRecord> {
        records
            .iter()
            .filter(|(coll, tour, _)| *coll == collection && tour == tour_id)
            .map(|(_, _, rec)| rec.clone())
            .collect()
    }

    fn notify(&mut self, collection: CollectionKind, tour_id: &str) {
        let mut dead: Vec<Uuid> = Vec::new();

        for sub in self
            .subscribers
            .iter()
            .filter(|sub| sub.handle.collection == collection && sub.tour_id == tour_id)
        {
            let records = Self::snapshot_of(&self.records, collection, &sub.tour_id);
            let update = SnapshotUpdate {
                collection,
                records,
            };
            if sub.sender.send(update).is_err() {
                dead.push(sub.handle.id);
            }
        }

        if !dead.is_empty() {
            warn!("Store: pruning {} dead subscriber(s)", dead.len());
            self.subscribers.retain(|sub| !dead.contains(&sub.handle.id));
        }
    }
}

impl ScheduleStore for MemoryStore {
    fn subscribe(
        &mut self,
        collection: CollectionKind,
        tour_id: &str,
        updates: Sender<SnapshotUpdate>,
    ) -> Result<SubscriptionHandle, Error> {
        let handle = SubscriptionHandle::new(collection);

        let initial = SnapshotUpdate {
            collection,
            records: Self::snapshot_of(&self.records, collection, tour_id),
        };
        if updates.send(initial).is_err() {
            return Err(Error::channel_closed());
        }

        self.subscribers.push(Subscriber {
            handle: handle.clone(),
            tour_id: tour_id.to_owned(),
            sender: updates,
        });

        Ok(handle)
    }

    fn unsubscribe(&mut self, handle: &SubscriptionHandle) {
        self.subscribers.retain(|sub| &sub.handle != handle);
    }
}
