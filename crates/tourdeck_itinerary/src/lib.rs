mod group;
mod item;
mod merge;
mod model;
mod selection;
mod subscription;
mod timezone;
mod visibility;

pub use group::{group, DayGroup};
pub use item::{DisplayItem, ItemKind, SourceKind, SourceRef, Visibility};
pub use merge::merge;
pub use model::{Flight, GenericItem, Hotel, Show};
pub use selection::{reconcile, Selection};
pub use subscription::TourSubscriptions;
pub use timezone::{resolve_timezone, DateKey, LocalizedTime, ResolvedZone, ZoneChoice};
pub use visibility::filter_visible;

use crossbeam_channel::{unbounded, Receiver, Sender};

use tourdeck::{CollectionKind, Result, ScheduleStore, SnapshotUpdate};

/// The itinerary screen's aggregation state for one touring context.
///
/// Holds the latest-known snapshot of each source collection, re-derives the
/// day groups whenever any snapshot is replaced, and reconciles the user's
/// selection against every new derivation. All derivation is synchronous;
/// the only external effect is subscribing and unsubscribing on the store.
pub struct Itinerary {
    viewer_id: String,
    tour_id: Option<String>,
    subscriptions: Option<TourSubscriptions>,
    updates_tx: Sender<SnapshotUpdate>,
    updates_rx: Receiver<SnapshotUpdate>,
    items: Vec<GenericItem>,
    shows: Vec<Show>,
    flights: Vec<Flight>,
    hotels: Vec<Hotel>,
    groups: Vec<DayGroup>,
    selection: Selection,
}

impl Itinerary {
    pub fn new(viewer_id: impl Into<String>) -> Self {
        let (updates_tx, updates_rx) = unbounded();
        Self {
            viewer_id: viewer_id.into(),
            tour_id: None,
            subscriptions: None,
            updates_tx,
            updates_rx,
            items: Vec::new(),
            shows: Vec::new(),
            flights: Vec::new(),
            hotels: Vec::new(),
            groups: Vec::new(),
            selection: Selection::default(),
        }
    }

    /// Switches to a touring context.
    ///
    /// All four existing subscriptions are torn down, and updates they
    /// already queued are discarded, before the new ones are established.
    /// Initial snapshots are processed before this returns.
    pub fn set_tour(&mut self, store: &mut dyn ScheduleStore, tour_id: &str) -> Result<()> {
        if let Some(mut subs) = self.subscriptions.take() {
            subs.teardown(store);
        }
        while self.updates_rx.try_recv().is_ok() {}

        self.items.clear();
        self.shows.clear();
        self.flights.clear();
        self.hotels.clear();
        self.groups.clear();
        self.selection = Selection::default();

        let subs = TourSubscriptions::establish(store, tour_id, self.updates_tx.clone())?;
        self.subscriptions = Some(subs);
        self.tour_id = Some(tour_id.to_owned());

        self.process_updates();
        Ok(())
    }

    /// Tears down the subscriptions, e.g. when the owning screen is
    /// dismissed. The last derived state stays readable.
    pub fn unsubscribe(&mut self, store: &mut dyn ScheduleStore) {
        if let Some(mut subs) = self.subscriptions.take() {
            subs.teardown(store);
        }
    }

    /// Drains queued snapshot updates and re-derives the day groups once if
    /// anything arrived. Returns whether a re-derivation happened.
    pub fn process_updates(&mut self) -> bool {
        let mut changed = false;
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply_snapshot(update);
            changed = true;
        }

        if changed {
            self.rebuild();
        }
        changed
    }

    fn apply_snapshot(&mut self, update: SnapshotUpdate) {
        match update.collection {
            CollectionKind::ScheduleItems => {
                self.items = update
                    .records
                    .iter()
                    .filter_map(GenericItem::from_record)
                    .collect();
            }
            CollectionKind::Shows => {
                self.shows = update.records.iter().filter_map(Show::from_record).collect();
            }
            CollectionKind::Flights => {
                self.flights = update
                    .records
                    .iter()
                    .filter_map(Flight::from_record)
                    .collect();
            }
            CollectionKind::Hotels => {
                self.hotels = update
                    .records
                    .iter()
                    .filter_map(Hotel::from_record)
                    .collect();
            }
        }
    }

    fn rebuild(&mut self) {
        let visible = filter_visible(&self.items, &self.viewer_id);
        let merged = merge(&visible, &self.shows, &self.flights, &self.hotels);
        self.groups = group(merged, &self.shows, &self.flights, &self.hotels);
        self.selection = reconcile(&self.groups, self.selection.clone());
    }

    pub fn day_groups(&self) -> &[DayGroup] {
        &self.groups
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_key(&self) -> Option<DateKey> {
        self.selection.selected_key
    }

    pub fn expanded_item_id(&self) -> Option<&str> {
        self.selection.expanded_item_id.as_deref()
    }

    pub fn tour_id(&self) -> Option<&str> {
        self.tour_id.as_deref()
    }

    /// The items of the selected day, or nothing when no day is selected.
    pub fn items_for_selected_date(&self) -> &[DisplayItem] {
        self.selection
            .selected_key
            .and_then(|key| self.groups.iter().find(|day| day.date_key == key))
            .map(|day| day.items.as_slice())
            .unwrap_or(&[])
    }

    /// Selects a day. Keys not present in the current groups are ignored.
    pub fn select_day(&mut self, key: DateKey) {
        if self.groups.iter().any(|day| day.date_key == key) {
            self.selection.selected_key = Some(key);
        }
    }

    /// Expands an item card, collapses it when it is already expanded.
    /// Unknown ids are ignored.
    pub fn toggle_expanded(&mut self, item_id: &str) {
        if self.expanded_item_id() == Some(item_id) {
            self.selection.expanded_item_id = None;
            return;
        }

        let exists = self
            .groups
            .iter()
            .any(|day| day.items.iter().any(|item| item.id == item_id));
        if exists {
            self.selection.expanded_item_id = Some(item_id.to_owned());
        }
    }
}
