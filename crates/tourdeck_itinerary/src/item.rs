use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::timezone::ResolvedZone;

/// The closed set of categories an itinerary row can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    LoadIn,
    Soundcheck,
    Doors,
    Headline,
    PackOut,
    Flight,
    Arrival,
    Hotel,
    Meeting,
    FreeTime,
    Catering,
    Custom,
    Travel,
    Content,
    Merch,
    Lounge,
}

impl ItemKind {
    /// Decodes a stored kind string. Unknown values fall back to `Custom`
    /// so an unrecognized category never drops the record.
    pub fn from_tag(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "load-in" | "load_in" => ItemKind::LoadIn,
            "soundcheck" => ItemKind::Soundcheck,
            "doors" => ItemKind::Doors,
            "headline" => ItemKind::Headline,
            "pack-out" | "pack_out" => ItemKind::PackOut,
            "flight" => ItemKind::Flight,
            "arrival" => ItemKind::Arrival,
            "hotel" => ItemKind::Hotel,
            "meeting" => ItemKind::Meeting,
            "free-time" | "free_time" => ItemKind::FreeTime,
            "catering" => ItemKind::Catering,
            "travel" => ItemKind::Travel,
            "content" => ItemKind::Content,
            "merch" => ItemKind::Merch,
            "lounge" => ItemKind::Lounge,
            _ => ItemKind::Custom,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::LoadIn => "load-in",
            ItemKind::Soundcheck => "soundcheck",
            ItemKind::Doors => "doors",
            ItemKind::Headline => "headline",
            ItemKind::PackOut => "pack-out",
            ItemKind::Flight => "flight",
            ItemKind::Arrival => "arrival",
            ItemKind::Hotel => "hotel",
            ItemKind::Meeting => "meeting",
            ItemKind::FreeTime => "free-time",
            ItemKind::Catering => "catering",
            ItemKind::Custom => "custom",
            ItemKind::Travel => "travel",
            ItemKind::Content => "content",
            ItemKind::Merch => "merch",
            ItemKind::Lounge => "lounge",
        }
    }

    pub fn display_label(&self) -> &'static str {
        match self {
            ItemKind::LoadIn => "Load In",
            ItemKind::Soundcheck => "Soundcheck",
            ItemKind::Doors => "Doors Open",
            ItemKind::Headline => "Headline Set",
            ItemKind::PackOut => "Pack Out",
            ItemKind::Flight => "Flight",
            ItemKind::Arrival => "Arrival",
            ItemKind::Hotel => "Hotel",
            ItemKind::Meeting => "Meeting",
            ItemKind::FreeTime => "Free Time",
            ItemKind::Catering => "Catering",
            ItemKind::Custom => "Custom",
            ItemKind::Travel => "Travel",
            ItemKind::Content => "Content",
            ItemKind::Merch => "Merch",
            ItemKind::Lounge => "Lounge",
        }
    }
}

/// Which collection a display item came from, for routing edits and deletes
/// back to the per-source handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    ScheduleItem,
    Show,
    Flight,
}

/// Back-reference to the record a display item was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRef {
    pub kind: SourceKind,
    pub id: String,
}

impl SourceRef {
    pub fn new(kind: SourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

/// Who may see a schedule item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Everyone,
    Restricted,
}

/// The canonical, source-agnostic unit the itinerary renders.
///
/// Display items are recreated wholesale on every snapshot update. Their ids
/// are derived deterministically from the source record so identity survives
/// a re-merge.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub note: Option<String>,
    pub time_utc: DateTime<Utc>,
    pub timezone: Option<Tz>,
    pub visibility: Option<Visibility>,
    pub visible_to: Vec<String>,
    pub source: SourceRef,
}

impl DisplayItem {
    /// Render-ready time string in the day's resolved zone, e.g. "07:00 PM".
    pub fn time_text(&self, zone: &ResolvedZone) -> String {
        zone.choice.localize(self.time_utc).time_text
    }

    /// Render-ready date string in the day's resolved zone.
    pub fn date_text(&self, zone: &ResolvedZone) -> String {
        zone.choice.localize(self.time_utc).date_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        let kinds = [
            ItemKind::LoadIn,
            ItemKind::Soundcheck,
            ItemKind::Doors,
            ItemKind::Headline,
            ItemKind::PackOut,
            ItemKind::Flight,
            ItemKind::Arrival,
            ItemKind::Hotel,
            ItemKind::Meeting,
            ItemKind::FreeTime,
            ItemKind::Catering,
            ItemKind::Custom,
            ItemKind::Travel,
            ItemKind::Content,
            ItemKind::Merch,
            ItemKind::Lounge,
        ];

        for kind in kinds {
            assert_eq!(ItemKind::from_tag(kind.as_str()), kind);
        }
    }

    #[test]
    fn test_unknown_kind_decodes_as_custom() {
        assert_eq!(ItemKind::from_tag("jam-session"), ItemKind::Custom);
        assert_eq!(ItemKind::from_tag(""), ItemKind::Custom);
    }

    #[test]
    fn test_kind_accepts_underscore_variants() {
        assert_eq!(ItemKind::from_tag("load_in"), ItemKind::LoadIn);
        assert_eq!(ItemKind::from_tag("FREE_TIME"), ItemKind::FreeTime);
    }
}
