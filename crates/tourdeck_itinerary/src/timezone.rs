//! Per-day timezone resolution.
//!
//! An itinerary day has no stored timezone. Which zone applies to a date is
//! inferred from other touring events, in a fixed fallback chain:
//!
//! 1. a show on that exact calendar date, using the show's zone;
//! 2. otherwise the most recent anchor on or before the date, where every
//!    show, flight arrival, and hotel check-in contributes one anchor;
//! 3. otherwise the process-local zone, labeled "Local Time".
//!
//! The chain's order is a contract: reordering it silently changes which
//! wall-clock times the itinerary displays.

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use tourdeck::lookup_airport;

use crate::model::{Flight, Hotel, Show};

/// A calendar date in some resolved zone, the grouping identity of a day.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DateKey {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn to_date(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// The zone a day is displayed in: a named IANA zone when inference found
/// one, or the process-local zone as the last resort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneChoice {
    Local,
    Named(Tz),
}

impl Default for ZoneChoice {
    fn default() -> Self {
        Self::Local
    }
}

#[derive(Debug, Clone)]
pub struct LocalizedTime {
    pub date: NaiveDate,
    pub date_text: String,
    pub time_text: String,
    pub abbreviation: String,
}

impl ZoneChoice {
    pub fn localize(&self, utc: DateTime<Utc>) -> LocalizedTime {
        match self {
            ZoneChoice::Local => {
                let dt = utc.with_timezone(&Local);
                LocalizedTime {
                    date: dt.date_naive(),
                    date_text: dt.format("%b %e, %Y").to_string(),
                    time_text: dt.format("%I:%M %p").to_string(),
                    abbreviation: dt.format("%Z").to_string(),
                }
            }
            ZoneChoice::Named(tz) => {
                let dt = utc.with_timezone(tz);
                LocalizedTime {
                    date: dt.date_naive(),
                    date_text: dt.format("%b %e, %Y").to_string(),
                    time_text: dt.format("%I:%M %p").to_string(),
                    abbreviation: dt.format("%Z").to_string(),
                }
            }
        }
    }

    /// The calendar date of `utc` when viewed in this zone.
    pub fn date_key(&self, utc: DateTime<Utc>) -> DateKey {
        let date = match self {
            ZoneChoice::Local => utc.with_timezone(&Local).date_naive(),
            ZoneChoice::Named(tz) => utc.with_timezone(tz).date_naive(),
        };
        DateKey::from_date(date)
    }
}

/// The outcome of resolving a date: the zone plus a human label such as
/// "Auckland Time" or "Local Time".
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedZone {
    pub choice: ZoneChoice,
    pub label: String,
}

/// An event used only to infer which zone applies to a date: a show day, a
/// flight arrival, or a hotel check-in. Never displayed, never persisted.
struct Anchor {
    instant: DateTime<Utc>,
    date: NaiveDate,
    timezone: Tz,
    label: String,
}

/// Resolves the display zone for one calendar date.
///
/// Total: always returns a usable zone, falling back to the process-local
/// zone when no anchor qualifies.
pub fn resolve_timezone(
    date: NaiveDate,
    shows: &[Show],
    flights: &[Flight],
    hotels: &[Hotel],
) -> ResolvedZone {
    if let Some(show) = shows.iter().find(|show| show.date == date) {
        return ResolvedZone {
            choice: ZoneChoice::Named(show.timezone),
            label: city_label(&show.city),
        };
    }

    let mut anchors = collect_anchors(shows, flights, hotels);
    anchors.retain(|anchor| anchor.date <= date);
    anchors.sort_by(|a, b| b.instant.cmp(&a.instant));

    if let Some(anchor) = anchors.into_iter().next() {
        return ResolvedZone {
            choice: ZoneChoice::Named(anchor.timezone),
            label: anchor.label,
        };
    }

    ResolvedZone {
        choice: ZoneChoice::Local,
        label: "Local Time".to_owned(),
    }
}

fn collect_anchors(shows: &[Show], flights: &[Flight], hotels: &[Hotel]) -> Vec<Anchor> {
    let mut anchors = Vec::with_capacity(shows.len() + flights.len() + hotels.len());

    for show in shows {
        let Some(instant) = day_start_instant(show.timezone, show.date) else {
            continue;
        };
        anchors.push(Anchor {
            instant,
            date: show.date,
            timezone: show.timezone,
            label: city_label(&show.city),
        });
    }

    for flight in flights {
        // Unknown destination codes contribute no anchor.
        let Some(airport) = lookup_airport(&flight.destination) else {
            continue;
        };
        anchors.push(Anchor {
            instant: flight.arrival,
            date: flight.arrival.with_timezone(&airport.timezone).date_naive(),
            timezone: airport.timezone,
            label: city_label(airport.city),
        });
    }

    for hotel in hotels {
        anchors.push(Anchor {
            instant: hotel.check_in,
            date: hotel.check_in.with_timezone(&hotel.timezone).date_naive(),
            timezone: hotel.timezone,
            label: city_label(&hotel.city),
        });
    }

    anchors
}

fn city_label(city: &str) -> String {
    format!("{city} Time")
}

/// The first valid instant of `date` in `tz`. Zones that spring forward at
/// midnight have no 00:00; fall back to 01:00 for those days.
fn day_start_instant(tz: Tz, date: NaiveDate) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .or_else(|| {
            date.and_hms_opt(1, 0, 0)
                .and_then(|naive| tz.from_local_datetime(&naive).earliest())
        })
        .map(|dt| dt.with_timezone(&Utc))
}
