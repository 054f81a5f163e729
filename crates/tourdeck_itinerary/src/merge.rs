use chrono::{DateTime, TimeZone, Utc};
use tracing::warn;

use tourdeck::lookup_airport;

use crate::item::{DisplayItem, ItemKind, SourceKind, SourceRef};
use crate::model::{Flight, GenericItem, Hotel, Show};

/// Combines the four current snapshots into one flat set of display items.
///
/// Generic items are expected to be visibility-filtered already. Hotels are
/// consumed for timezone anchoring only and contribute no rows here. No
/// cross-source de-duplication is attempted: a flight echoed as a schedule
/// item surfaces twice, once per source.
///
/// Output order is undefined; the grouper imposes ordering.
pub fn merge(
    items: &[GenericItem],
    shows: &[Show],
    flights: &[Flight],
    _hotels: &[Hotel],
) -> Vec<DisplayItem> {
    let mut merged = Vec::new();

    for item in items {
        merged.push(DisplayItem {
            id: format!("item-{}", item.id),
            kind: item.kind,
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            note: item.note.clone(),
            time_utc: item.time_utc,
            timezone: item.timezone,
            visibility: item.visibility,
            visible_to: item.visible_to.clone(),
            source: SourceRef::new(SourceKind::ScheduleItem, item.id.clone()),
        });
    }

    for show in shows {
        merged.extend(expand_show(show));
    }

    for flight in flights {
        merged.push(DisplayItem {
            id: format!("flight-{}", flight.id),
            kind: ItemKind::Flight,
            title: format!("Flight {}", flight.number),
            subtitle: Some(route_label(flight)),
            note: None,
            time_utc: flight.arrival,
            timezone: None,
            visibility: None,
            visible_to: Vec::new(),
            source: SourceRef::new(SourceKind::Flight, flight.id.clone()),
        });
    }

    merged
}

/// One derived row per populated timing field; absent fields produce no row.
fn expand_show(show: &Show) -> Vec<DisplayItem> {
    let segments: [(ItemKind, &str, Option<DateTime<Utc>>); 5] = [
        (ItemKind::LoadIn, "load-in", show.load_in),
        (ItemKind::Soundcheck, "soundcheck", show.soundcheck),
        (ItemKind::Doors, "doors", show.doors),
        (ItemKind::Headline, "headline", show.headline),
        (ItemKind::PackOut, "pack-out", show.pack_out),
    ];

    let mut rows = Vec::new();
    for (kind, segment, timing) in segments {
        let Some(timing) = timing else {
            continue;
        };
        let Some(time_utc) = rebase_on_show_date(show, timing) else {
            warn!(
                "Itinerary: show {} {segment} time does not exist on {} in {}",
                show.id, show.date, show.timezone
            );
            continue;
        };

        rows.push(DisplayItem {
            id: format!("show-{}-{segment}", show.id),
            kind,
            title: kind.display_label().to_owned(),
            subtitle: Some(format!("{}, {}", show.venue, show.city)),
            note: None,
            time_utc,
            timezone: Some(show.timezone),
            visibility: None,
            visible_to: Vec::new(),
            source: SourceRef::new(SourceKind::Show, show.id.clone()),
        });
    }

    rows
}

/// Timing fields carry a time of day, not an absolute instant: the stored
/// timestamp's wall-clock time in the show's zone is re-based onto the
/// show's calendar date in that same zone.
fn rebase_on_show_date(show: &Show, timing: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let time_of_day = timing.with_timezone(&show.timezone).time();
    show.timezone
        .from_local_datetime(&show.date.and_time(time_of_day))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

fn route_label(flight: &Flight) -> String {
    let origin = lookup_airport(&flight.origin)
        .map(|airport| airport.city)
        .unwrap_or(flight.origin.as_str());
    let destination = lookup_airport(&flight.destination)
        .map(|airport| airport.city)
        .unwrap_or(flight.destination.as_str());
    format!("{origin} to {destination}")
}
