use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::warn;

use tourdeck::RawRecord;

use crate::item::{ItemKind, Visibility};

/// A first-class schedule entry authored directly by the touring party.
#[derive(Debug, Clone, PartialEq)]
pub struct GenericItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub note: Option<String>,
    pub time_utc: DateTime<Utc>,
    pub timezone: Option<Tz>,
    pub visibility: Option<Visibility>,
    pub visible_to: Vec<String>,
}

impl GenericItem {
    /// Decodes a raw schedule-item record. Returns `None` when a required
    /// field is missing or malformed; the rest of the snapshot is unaffected.
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let title = record.str_field("title")?;
        let time_utc = parse_instant(record, "time")?;

        let kind = record
            .str_field("kind")
            .map(ItemKind::from_tag)
            .unwrap_or(ItemKind::Custom);

        let visibility = record.str_field("visibility").map(parse_visibility);

        Some(GenericItem {
            id: record.id.clone(),
            kind,
            title: title.to_owned(),
            subtitle: record.str_field("subtitle").map(str::to_owned),
            note: record.str_field("note").map(str::to_owned),
            time_utc,
            timezone: parse_optional_zone(record, "timezone"),
            visibility,
            visible_to: record.str_list_field("visible_to"),
        })
    }

    /// Whether this item passes the visibility filter for `viewer_id`.
    pub fn is_visible_to(&self, viewer_id: &str) -> bool {
        match self.visibility {
            None | Some(Visibility::Everyone) => true,
            Some(Visibility::Restricted) => {
                self.visible_to.iter().any(|id| id == viewer_id)
            }
        }
    }
}

/// A venue show. Expands into up to five derived itinerary rows and anchors
/// the timezone of its calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Show {
    pub id: String,
    pub venue: String,
    pub city: String,
    pub timezone: Tz,
    pub date: NaiveDate,
    pub load_in: Option<DateTime<Utc>>,
    pub soundcheck: Option<DateTime<Utc>>,
    pub doors: Option<DateTime<Utc>>,
    pub headline: Option<DateTime<Utc>>,
    pub pack_out: Option<DateTime<Utc>>,
}

impl Show {
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let venue = record.str_field("venue")?;
        let city = record.str_field("city")?;
        let timezone = parse_required_zone(record, "timezone")?;
        let date = parse_date(record, "date")?;

        Some(Show {
            id: record.id.clone(),
            venue: venue.to_owned(),
            city: city.to_owned(),
            timezone,
            date,
            load_in: record.timestamp_field("load_in"),
            soundcheck: record.timestamp_field("soundcheck"),
            doors: record.timestamp_field("doors"),
            headline: record.timestamp_field("headline"),
            pack_out: record.timestamp_field("pack_out"),
        })
    }
}

/// A flight leg. Surfaces as one itinerary row timed at arrival, and its
/// arrival doubles as a timezone anchor for the destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub id: String,
    pub number: String,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
}

impl Flight {
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let number = record.str_field("number")?;
        let origin = record.str_field("origin")?;
        let destination = record.str_field("destination")?;
        let departure = parse_instant(record, "departure")?;
        let arrival = parse_instant(record, "arrival")?;

        Some(Flight {
            id: record.id.clone(),
            number: number.to_owned(),
            origin: origin.to_ascii_uppercase(),
            destination: destination.to_ascii_uppercase(),
            departure,
            arrival,
        })
    }
}

/// A hotel stay. Hotels never surface as itinerary rows; the check-in
/// instant only feeds the timezone anchor set.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub city: String,
    pub timezone: Tz,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
}

impl Hotel {
    pub fn from_record(record: &RawRecord) -> Option<Self> {
        let name = record.str_field("name")?;
        let city = record.str_field("city")?;
        let timezone = parse_required_zone(record, "timezone")?;
        let check_in = parse_instant(record, "check_in")?;

        Some(Hotel {
            id: record.id.clone(),
            name: name.to_owned(),
            city: city.to_owned(),
            timezone,
            check_in,
            check_out: record.timestamp_field("check_out"),
        })
    }
}

/// Unknown visibility values fail closed: a value we cannot interpret is
/// treated as restricted rather than exposed to everyone.
fn parse_visibility(value: &str) -> Visibility {
    match value.to_ascii_lowercase().as_str() {
        "everyone" => Visibility::Everyone,
        "restricted" | "restricted-to-set" => Visibility::Restricted,
        other => {
            warn!("Itinerary: unknown visibility '{other}', treating as restricted");
            Visibility::Restricted
        }
    }
}

fn parse_instant(record: &RawRecord, field: &str) -> Option<DateTime<Utc>> {
    if record.fields.get(field).is_none() {
        return None;
    }

    match record.timestamp_field(field) {
        Some(instant) => Some(instant),
        None => {
            warn!(
                "Itinerary: record {} has malformed timestamp in '{field}'",
                record.id
            );
            None
        }
    }
}

fn parse_date(record: &RawRecord, field: &str) -> Option<NaiveDate> {
    let value = record.str_field(field)?;
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("Itinerary: record {} has bad date '{value}': {err}", record.id);
            None
        }
    }
}

fn parse_required_zone(record: &RawRecord, field: &str) -> Option<Tz> {
    let value = record.str_field(field)?;
    match value.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            warn!(
                "Itinerary: record {} has unknown timezone '{value}'",
                record.id
            );
            None
        }
    }
}

/// An invalid zone on an optional field drops the zone, not the record.
fn parse_optional_zone(record: &RawRecord, field: &str) -> Option<Tz> {
    let value = record.str_field(field)?;
    match value.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            warn!(
                "Itinerary: record {} has unknown timezone '{value}', ignoring",
                record.id
            );
            None
        }
    }
}
