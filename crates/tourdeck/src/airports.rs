//! Static airport directory.
//!
//! Maps IATA codes to the airport's city and IANA timezone. The table is
//! baked into the binary and loaded once; lookups never touch the network.
//! Unknown codes resolve to `None` and callers are expected to skip them.

use std::collections::HashMap;

use chrono_tz::Tz;
use once_cell::sync::Lazy;

/// One directory entry: the city an airport serves and its timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airport {
    pub iata: &'static str,
    pub city: &'static str,
    pub timezone: Tz,
}

#[rustfmt::skip]
const AIRPORTS: &[(&str, &str, Tz)] = &[
    // North America
    ("JFK", "New York", chrono_tz::America::New_York),
    ("LGA", "New York", chrono_tz::America::New_York),
    ("EWR", "Newark", chrono_tz::America::New_York),
    ("BOS", "Boston", chrono_tz::America::New_York),
    ("PHL", "Philadelphia", chrono_tz::America::New_York),
    ("IAD", "Washington", chrono_tz::America::New_York),
    ("DCA", "Washington", chrono_tz::America::New_York),
    ("ATL", "Atlanta", chrono_tz::America::New_York),
    ("MIA", "Miami", chrono_tz::America::New_York),
    ("ORD", "Chicago", chrono_tz::America::Chicago),
    ("MDW", "Chicago", chrono_tz::America::Chicago),
    ("BNA", "Nashville", chrono_tz::America::Chicago),
    ("AUS", "Austin", chrono_tz::America::Chicago),
    ("DFW", "Dallas", chrono_tz::America::Chicago),
    ("IAH", "Houston", chrono_tz::America::Chicago),
    ("MSP", "Minneapolis", chrono_tz::America::Chicago),
    ("STL", "St. Louis", chrono_tz::America::Chicago),
    ("MSY", "New Orleans", chrono_tz::America::Chicago),
    ("DEN", "Denver", chrono_tz::America::Denver),
    ("SLC", "Salt Lake City", chrono_tz::America::Denver),
    ("PHX", "Phoenix", chrono_tz::America::Phoenix),
    ("LAS", "Las Vegas", chrono_tz::America::Los_Angeles),
    ("LAX", "Los Angeles", chrono_tz::America::Los_Angeles),
    ("SFO", "San Francisco", chrono_tz::America::Los_Angeles),
    ("SAN", "San Diego", chrono_tz::America::Los_Angeles),
    ("SEA", "Seattle", chrono_tz::America::Los_Angeles),
    ("PDX", "Portland", chrono_tz::America::Los_Angeles),
    ("ANC", "Anchorage", chrono_tz::America::Anchorage),
    ("HNL", "Honolulu", chrono_tz::Pacific::Honolulu),
    ("DTW", "Detroit", chrono_tz::America::Detroit),
    ("YVR", "Vancouver", chrono_tz::America::Vancouver),
    ("YYZ", "Toronto", chrono_tz::America::Toronto),
    ("YUL", "Montreal", chrono_tz::America::Toronto),
    ("MEX", "Mexico City", chrono_tz::America::Mexico_City),
    // South America
    ("GRU", "Sao Paulo", chrono_tz::America::Sao_Paulo),
    ("GIG", "Rio de Janeiro", chrono_tz::America::Sao_Paulo),
    ("EZE", "Buenos Aires", chrono_tz::America::Argentina::Buenos_Aires),
    ("SCL", "Santiago", chrono_tz::America::Santiago),
    ("BOG", "Bogota", chrono_tz::America::Bogota),
    ("LIM", "Lima", chrono_tz::America::Lima),
    // Europe
    ("LHR", "London", chrono_tz::Europe::London),
    ("LGW", "London", chrono_tz::Europe::London),
    ("STN", "London", chrono_tz::Europe::London),
    ("MAN", "Manchester", chrono_tz::Europe::London),
    ("GLA", "Glasgow", chrono_tz::Europe::London),
    ("DUB", "Dublin", chrono_tz::Europe::Dublin),
    ("CDG", "Paris", chrono_tz::Europe::Paris),
    ("ORY", "Paris", chrono_tz::Europe::Paris),
    ("AMS", "Amsterdam", chrono_tz::Europe::Amsterdam),
    ("BRU", "Brussels", chrono_tz::Europe::Brussels),
    ("FRA", "Frankfurt", chrono_tz::Europe::Berlin),
    ("MUC", "Munich", chrono_tz::Europe::Berlin),
    ("BER", "Berlin", chrono_tz::Europe::Berlin),
    ("HAM", "Hamburg", chrono_tz::Europe::Berlin),
    ("CGN", "Cologne", chrono_tz::Europe::Berlin),
    ("ZRH", "Zurich", chrono_tz::Europe::Zurich),
    ("VIE", "Vienna", chrono_tz::Europe::Vienna),
    ("MAD", "Madrid", chrono_tz::Europe::Madrid),
    ("BCN", "Barcelona", chrono_tz::Europe::Madrid),
    ("LIS", "Lisbon", chrono_tz::Europe::Lisbon),
    ("FCO", "Rome", chrono_tz::Europe::Rome),
    ("MXP", "Milan", chrono_tz::Europe::Rome),
    ("CPH", "Copenhagen", chrono_tz::Europe::Copenhagen),
    ("ARN", "Stockholm", chrono_tz::Europe::Stockholm),
    ("OSL", "Oslo", chrono_tz::Europe::Oslo),
    ("HEL", "Helsinki", chrono_tz::Europe::Helsinki),
    ("WAW", "Warsaw", chrono_tz::Europe::Warsaw),
    ("PRG", "Prague", chrono_tz::Europe::Prague),
    ("BUD", "Budapest", chrono_tz::Europe::Budapest),
    ("ATH", "Athens", chrono_tz::Europe::Athens),
    ("IST", "Istanbul", chrono_tz::Europe::Istanbul),
    // Middle East / Asia
    ("DXB", "Dubai", chrono_tz::Asia::Dubai),
    ("DOH", "Doha", chrono_tz::Asia::Qatar),
    ("TLV", "Tel Aviv", chrono_tz::Asia::Jerusalem),
    ("DEL", "Delhi", chrono_tz::Asia::Kolkata),
    ("BOM", "Mumbai", chrono_tz::Asia::Kolkata),
    ("BKK", "Bangkok", chrono_tz::Asia::Bangkok),
    ("SIN", "Singapore", chrono_tz::Asia::Singapore),
    ("KUL", "Kuala Lumpur", chrono_tz::Asia::Kuala_Lumpur),
    ("HKG", "Hong Kong", chrono_tz::Asia::Hong_Kong),
    ("PEK", "Beijing", chrono_tz::Asia::Shanghai),
    ("PVG", "Shanghai", chrono_tz::Asia::Shanghai),
    ("TPE", "Taipei", chrono_tz::Asia::Taipei),
    ("ICN", "Seoul", chrono_tz::Asia::Seoul),
    ("NRT", "Tokyo", chrono_tz::Asia::Tokyo),
    ("HND", "Tokyo", chrono_tz::Asia::Tokyo),
    ("KIX", "Osaka", chrono_tz::Asia::Tokyo),
    // Oceania
    ("SYD", "Sydney", chrono_tz::Australia::Sydney),
    ("MEL", "Melbourne", chrono_tz::Australia::Melbourne),
    ("BNE", "Brisbane", chrono_tz::Australia::Brisbane),
    ("ADL", "Adelaide", chrono_tz::Australia::Adelaide),
    ("PER", "Perth", chrono_tz::Australia::Perth),
    ("AKL", "Auckland", chrono_tz::Pacific::Auckland),
    ("WLG", "Wellington", chrono_tz::Pacific::Auckland),
    ("CHC", "Christchurch", chrono_tz::Pacific::Auckland),
    // Africa
    ("JNB", "Johannesburg", chrono_tz::Africa::Johannesburg),
    ("CPT", "Cape Town", chrono_tz::Africa::Johannesburg),
];

static DIRECTORY: Lazy<HashMap<&'static str, Airport>> = Lazy::new(|| {
    AIRPORTS
        .iter()
        .map(|&(iata, city, timezone)| {
            (
                iata,
                Airport {
                    iata,
                    city,
                    timezone,
                },
            )
        })
        .collect()
});

/// Looks up an airport by IATA code. Case-insensitive; unknown codes
/// return `None`.
pub fn lookup_airport(iata: &str) -> Option<&'static Airport> {
    DIRECTORY.get(iata.to_ascii_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_airport() {
        let akl = lookup_airport("AKL").unwrap();
        assert_eq!(akl.city, "Auckland");
        assert_eq!(akl.timezone, chrono_tz::Pacific::Auckland);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(lookup_airport("lhr"), lookup_airport("LHR"));
        assert!(lookup_airport("lhr").is_some());
    }

    #[test]
    fn test_lookup_unknown_airport() {
        assert!(lookup_airport("ZZZ").is_none());
        assert!(lookup_airport("").is_none());
    }

    #[test]
    fn test_directory_has_no_duplicate_codes() {
        assert_eq!(DIRECTORY.len(), AIRPORTS.len());
    }
}
