//! Birthplace/deathplace grammar
//!
//! Locations are comma-separated, most-specific first, with optional
//! bracketed annotations: `"Leningrad, USSR [now St. Petersburg, Russia]"`,
//! `"Brooklyn, New York City, New York, USA"`. Whether a state/province
//! component is present is guessed from a fixed list of first-level
//! administrative names for the countries that regularly carry one, plus a
//! fallback heuristic for everything else.

/// Which component of a location to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationPart {
    /// The last segment
    Country,
    /// The second-to-last segment, when a state is detected
    State,
    /// The segment before the state (or before the country when no state)
    City,
}

/// US states
const US_STATES: &[&str] = &[
    "Alabama", "Alaska", "Arizona", "Arkansas", "California", "Colorado", "Connecticut",
    "Delaware", "Florida", "Georgia", "Hawaii", "Idaho", "Illinois", "Indiana", "Iowa", "Kansas",
    "Kentucky", "Louisiana", "Maine", "Maryland", "Massachusetts", "Michigan", "Minnesota",
    "Mississippi", "Missouri", "Montana", "Nebraska", "Nevada", "New Hampshire", "New Jersey",
    "New Mexico", "New York", "North Carolina", "North Dakota", "Ohio", "Oklahoma", "Oregon",
    "Pennsylvania", "Rhode Island", "South Carolina", "South Dakota", "Tennessee", "Texas",
    "Utah", "Vermont", "Virginia", "Washington", "West Virginia", "Wisconsin", "Wyoming",
];

/// Canadian provinces and territories
const CA_PROVINCES: &[&str] = &[
    "Alberta", "British Columbia", "Manitoba", "New Brunswick", "Newfoundland and Labrador",
    "Nova Scotia", "Ontario", "Prince Edward Island", "Quebec", "Saskatchewan",
    "Northwest Territories", "Nunavut", "Yukon",
];

/// UK constituent parts as they appear in the source
const UK_PARTS: &[&str] = &[
    "Scotland", "England", "Wales", "Northern Ireland", "Ireland", "Channel Islands",
    "Isle of Man", "South Wales", "North Wales",
];

/// Belgian regions and provinces, in the spellings the source uses
const BE_PROVINCES: &[&str] = &[
    "Flanders", "Wallonia", "Antwerp", "Brussels", "Brussel", "Bruxelles", "Oost-Vlaanderen",
    "West-Vlaanderen", "Limburg", "Brabant", "Liège", "Luxembourg", "Namur", "Hainaut",
];

/// Countries whose first-level names are fully enumerated above
const STATE_COUNTRIES: &[&str] = &["USA", "Canada", "UK", "Belgium"];

/// Strip a trailing ` [..]` or ` (..)` annotation from one segment
fn strip_annotation(segment: &str) -> &str {
    let bracket = segment.find(" [");
    let paren = segment.find(" (");
    match (bracket, paren) {
        (Some(b), Some(p)) => &segment[..b.min(p)],
        (Some(b), None) => &segment[..b],
        (None, Some(p)) => &segment[..p],
        (None, None) => segment,
    }
}

fn is_known_state(name: &str) -> bool {
    US_STATES.contains(&name)
        || CA_PROVINCES.contains(&name)
        || UK_PARTS.contains(&name)
        || BE_PROVINCES.contains(&name)
}

/// Extract one component of a free-text location.
///
/// Returns `None` when the requested component is not present (every
/// location has a country, but not every location has a state or city).
pub fn location_part(text: &str, part: LocationPart) -> Option<String> {
    let places: Vec<&str> = text.split(", ").map(strip_annotation).collect();
    let last = *places.last()?;

    if part == LocationPart::Country {
        return if last.is_empty() {
            None
        } else {
            Some(last.to_string())
        };
    }

    let mut has_state = places.len() >= 2 && is_known_state(places[places.len() - 2]);
    // three or more segments ending in an unlisted country implies a state
    // component even though we cannot name that country's subdivisions
    if places.len() >= 3 && !STATE_COUNTRIES.contains(&last) {
        has_state = true;
    }

    match part {
        LocationPart::Country => unreachable!("handled above"),
        LocationPart::State => {
            if has_state {
                Some(places[places.len() - 2].to_string())
            } else {
                None
            }
        }
        LocationPart::City => {
            let shift = usize::from(has_state);
            if places.len() >= 2 + shift {
                Some(places[places.len() - 2 - shift].to_string())
            } else {
                None
            }
        }
    }
}
