//! Entity-kind catalogs
//!
//! One [`EntityCatalog`] per entity kind: the statically declared sub-kind
//! table, the ordered attribute table, and the acceptance logic tying them
//! together. Sub-kinds and attribute selections are plain data toggled per
//! run; nothing here is global or reflective.

use filmfact_domain::{fact_line, Constraint, EntityKind, RawRecord, RecordId, Term};
use filmfact_parse::LocationPart;
use tracing::debug;

use crate::attribute::{AttributeDef, DatePart, Formatter};

/// The 28 title genres carried in the source vocabulary
pub const GENRES: &[&str] = &[
    "Short",
    "Drama",
    "Comedy",
    "Documentary",
    "Adult",
    "Romance",
    "Action",
    "Animation",
    "Thriller",
    "Family",
    "Crime",
    "Adventure",
    "Music",
    "Horror",
    "Fantasy",
    "Mystery",
    "Sci-Fi",
    "Western",
    "Musical",
    "Biography",
    "Sport",
    "War",
    "History",
    "Reality-TV",
    "Talk-Show",
    "News",
    "Game-Show",
    "Film-Noir",
];

/// The 50 most frequent production countries
pub const COUNTRIES: &[&str] = &[
    "USA",
    "UK",
    "France",
    "Germany",
    "Canada",
    "Japan",
    "Italy",
    "India",
    "Spain",
    "Mexico",
    "Australia",
    "Argentina",
    "West Germany",
    "Brazil",
    "Denmark",
    "Greece",
    "Netherlands",
    "Belgium",
    "Portugal",
    "Philippines",
    "Finland",
    "Soviet Union",
    "Hong Kong",
    "Sweden",
    "Yugoslavia",
    "Austria",
    "Turkey",
    "Hungary",
    "Poland",
    "South Korea",
    "Switzerland",
    "Czechoslovakia",
    "Russia",
    "Nigeria",
    "East Germany",
    "Israel",
    "Norway",
    "China",
    "Ireland",
    "Czech Republic",
    "Romania",
    "Egypt",
    "Taiwan",
    "Iran",
    "Bulgaria",
    "New Zealand",
    "Chile",
    "Cuba",
    "Indonesia",
    "Croatia",
];

/// The most frequent spoken languages
pub const LANGUAGES: &[&str] = &[
    "English",
    "Spanish",
    "German",
    "French",
    "Japanese",
    "Italian",
    "Portuguese",
    "Dutch",
    "Russian",
    "Hindi",
    "Greek",
    "Danish",
    "Filipino",
    "Tagalog",
    "Serbo-Croatian",
    "Finnish",
    "Turkish",
    "Mandarin",
    "Swedish",
    "Czech",
    "Cantonese",
    "Korean",
    "Polish",
    "Hungarian",
    "Arabic",
    "Malayalam",
    "None",
    "Telugu",
    "Hebrew",
    "Norwegian",
    "Tamil",
    "Romanian",
    "Persian",
    "Bengali",
    "Bulgarian",
    "Catalan",
    "Indonesian",
    "Georgian",
    "Albanian",
];

const MIN_YEAR: i64 = 1888;
const MAX_YEAR: i64 = 2050;
const MAX_AMOUNT: i64 = 9_999_999;

/// One statically declared sub-kind of an entity kind
#[derive(Debug, Clone)]
pub struct SubKindDef {
    /// Display name (`"TV Movie"`, `"Special effects company"`)
    pub name: &'static str,
    /// The raw value this sub-kind matches: the `kind` field value for
    /// works, the filmography field key for people and organizations
    pub discriminator: &'static str,
    /// Whether this sub-kind is selected for the run
    pub enabled: bool,
}

impl SubKindDef {
    fn new(name: &'static str, discriminator: &'static str, enabled: bool) -> Self {
        Self {
            name,
            discriminator,
            enabled,
        }
    }
}

/// The full declaration of one entity kind: sub-kinds plus attributes
#[derive(Debug, Clone)]
pub struct EntityCatalog {
    /// Which kind this catalog describes
    pub kind: EntityKind,
    /// Statically declared sub-kind table, in source order
    pub sub_kinds: Vec<SubKindDef>,
    /// Attribute table, in declaration order; order is significant for
    /// both output and constraint short-circuiting
    pub attributes: Vec<AttributeDef>,
}

fn value_set(vocabulary: &[&str]) -> Constraint {
    Constraint::ValueSet {
        vocabulary: vocabulary.iter().map(|v| v.to_string()).collect(),
        enabled: Default::default(),
    }
}

fn range(min: i64, max: i64) -> Constraint {
    Constraint::Range { min, max }
}

fn range_multiple(min: i64, max: i64) -> Constraint {
    Constraint::RangeMultiple { min, max }
}

impl EntityCatalog {
    /// The Work catalog, every sub-kind and attribute of a title
    pub fn work() -> Self {
        let sub_kinds = vec![
            SubKindDef::new("Movie", "movie", true),
            SubKindDef::new("Series", "tv series", false),
            SubKindDef::new("TV Movie", "tv movie", true),
            SubKindDef::new("Straight to video", "video movie", false),
            SubKindDef::new("Miniseries", "tv mini series", false),
            SubKindDef::new("Video Game", "video game", false),
            SubKindDef::new("Episode", "episode", false),
        ];
        let attributes = vec![
            AttributeDef::new("type", "kind", Formatter::Text),
            AttributeDef::new("title_name", "title", Formatter::Text),
            AttributeDef::new("year", "year", Formatter::Number)
                .constrained(range(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("series_years", "series years", Formatter::SeriesEndYear)
                .constrained(range(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("genre", "genres", Formatter::TextList)
                .constrained(value_set(GENRES)),
            AttributeDef::new("country", "countries", Formatter::TextList)
                .constrained(value_set(COUNTRIES)),
            AttributeDef::new("keywords", "keywords", Formatter::TextList),
            AttributeDef::new(
                "votes_distribution",
                "votes distribution",
                Formatter::VotesDistribution,
            ),
            AttributeDef::new("votes", "votes", Formatter::Number)
                .constrained(range(1, 1_000_000)),
            AttributeDef::new("rating", "rating", Formatter::Decimal)
                .constrained(range(1, 10)),
            AttributeDef::new("top_250_rank", "top 250 rank", Formatter::Number)
                .constrained(range(1, 250)),
            AttributeDef::new("bottom_10_rank", "bottom 10 rank", Formatter::Number)
                .constrained(range(1, 10)),
            AttributeDef::new(
                "alternate_version_amount",
                "alternate versions",
                Formatter::ListCount,
            )
            .constrained(range(0, 20)),
            AttributeDef::new("runtime", "runtimes", Formatter::Runtime)
                .constrained(range_multiple(0, 15_000)),
            AttributeDef::new("color_info", "color info", Formatter::ColorInfo)
                .constrained(value_set(&["Color", "Black and White"])),
            AttributeDef::new("camera_model", "tech info", Formatter::TechInfo { kind: "CAM" }),
            AttributeDef::new("film_length", "tech info", Formatter::TechInfo { kind: "MET" }),
            AttributeDef::new(
                "film_negative_format",
                "tech info",
                Formatter::TechInfo { kind: "OFM" },
            ),
            AttributeDef::new(
                "printed_film_format",
                "tech info",
                Formatter::TechInfo { kind: "PFM" },
            ),
            AttributeDef::new("aspect_ratio", "tech info", Formatter::TechInfo { kind: "RAT" }),
            AttributeDef::new(
                "cinematographic_process",
                "tech info",
                Formatter::TechInfo { kind: "PCS" },
            ),
            AttributeDef::new("laboratory", "tech info", Formatter::TechInfo { kind: "LAB" }),
            AttributeDef::new("language", "languages", Formatter::TextList)
                .constrained(value_set(LANGUAGES)),
            AttributeDef::new("certificate", "certificates", Formatter::Certificates),
            AttributeDef::new("sound_mix", "sound mix", Formatter::SoundMix),
            AttributeDef::new("release_date", "release dates", Formatter::ReleaseDates)
                .constrained(range_multiple(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("productiondays", "production dates", Formatter::RangeDays)
                .business()
                .constrained(range(0, 9_999)),
            AttributeDef::new("filmingdays", "filming dates", Formatter::RangeDays)
                .business()
                .constrained(range(0, 9_999)),
            AttributeDef::new("budget", "budget", Formatter::Money)
                .business()
                .constrained(range_multiple(0, MAX_AMOUNT)),
            AttributeDef::new("weekend_gross", "weekend gross", Formatter::WeekendGross)
                .business()
                .constrained(range_multiple(0, MAX_AMOUNT)),
            AttributeDef::new("opening_weekend", "opening weekend", Formatter::WeekendGross)
                .business()
                .constrained(range_multiple(0, MAX_AMOUNT)),
            AttributeDef::new("gross", "gross", Formatter::Gross)
                .business()
                .constrained(range_multiple(0, MAX_AMOUNT)),
            AttributeDef::new("rentals", "rentals", Formatter::Rentals)
                .business()
                .constrained(range_multiple(0, MAX_AMOUNT)),
            AttributeDef::new("admissions", "admissions", Formatter::Gross)
                .business()
                .constrained(range_multiple(0, MAX_AMOUNT)),
        ];
        Self {
            kind: EntityKind::Work,
            sub_kinds,
            attributes,
        }
    }

    /// The Person catalog
    pub fn person() -> Self {
        let sub_kinds = vec![
            SubKindDef::new("Actor", "actor", true),
            SubKindDef::new("Actress", "actress", true),
            SubKindDef::new("Producer", "producer", false),
            SubKindDef::new("Writer", "writer", true),
            SubKindDef::new("Director", "director", true),
            SubKindDef::new("Cinematographer", "cinematographer", false),
            SubKindDef::new("Composer", "composer", false),
            SubKindDef::new("Costume Designer", "costume designer", false),
            SubKindDef::new("Editor", "editor", false),
            SubKindDef::new("Miscellaneous Crew", "miscellaneous crew", false),
            SubKindDef::new("Production Designer", "production designer", false),
            SubKindDef::new("Guest", "guest", false),
        ];
        let attributes = vec![
            AttributeDef::new("person_name", "name", Formatter::Text),
            AttributeDef::new(
                "country_of_birth",
                "birth notes",
                Formatter::Location(LocationPart::Country),
            ),
            AttributeDef::new(
                "state_of_birth",
                "birth notes",
                Formatter::Location(LocationPart::State),
            ),
            AttributeDef::new(
                "city_of_birth",
                "birth notes",
                Formatter::Location(LocationPart::City),
            ),
            AttributeDef::new("birth_year", "birth date", Formatter::Date(DatePart::Year))
                .constrained(range(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("birth_month", "birth date", Formatter::Date(DatePart::Month)),
            AttributeDef::new("birth_day", "birth date", Formatter::Date(DatePart::Day))
                .constrained(range(1, 31)),
            AttributeDef::new(
                "country_of_death",
                "death notes",
                Formatter::Location(LocationPart::Country),
            ),
            AttributeDef::new(
                "state_of_death",
                "death notes",
                Formatter::Location(LocationPart::State),
            ),
            AttributeDef::new(
                "city_of_death",
                "death notes",
                Formatter::Location(LocationPart::City),
            ),
            AttributeDef::new("death_year", "death date", Formatter::Date(DatePart::Year))
                .constrained(range(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("death_month", "death date", Formatter::Date(DatePart::Month)),
            AttributeDef::new("death_day", "death date", Formatter::Date(DatePart::Day))
                .constrained(range(1, 31)),
            AttributeDef::new("birth_name", "birth name", Formatter::Text).unchecked(),
            AttributeDef::new("spouse", "spouse", Formatter::Spouses),
            AttributeDef::new("children", "spouse", Formatter::Children)
                .constrained(range(0, 99)),
            AttributeDef::new(
                "first_marriage_year",
                "spouse",
                Formatter::FirstMarriageYear,
            )
            .constrained(range(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("last_divorce_year", "spouse", Formatter::LastDivorceYear)
                .constrained(range(MIN_YEAR, MAX_YEAR)),
            AttributeDef::new("gender", "", Formatter::Gender),
            AttributeDef::new("height", "height", Formatter::Height),
        ];
        Self {
            kind: EntityKind::Person,
            sub_kinds,
            attributes,
        }
    }

    /// The Organization catalog
    pub fn organization() -> Self {
        let sub_kinds = vec![
            SubKindDef::new("Distributor", "distributors", true),
            SubKindDef::new("Production company", "production companies", true),
            SubKindDef::new("Special effects company", "special effects companies", true),
            SubKindDef::new("Miscellaneous company", "miscellaneous companies", true),
        ];
        let attributes = vec![
            AttributeDef::new("company_name", "name", Formatter::Text),
            AttributeDef::new("company_country", "country", Formatter::BracketStripped),
        ];
        Self {
            kind: EntityKind::Organization,
            sub_kinds,
            attributes,
        }
    }

    /// The Role catalog; every role record matches its single sub-kind
    pub fn role() -> Self {
        let sub_kinds = vec![SubKindDef::new("Character", "character", true)];
        let attributes = vec![AttributeDef::new("character_name", "name", Formatter::Text)];
        Self {
            kind: EntityKind::Role,
            sub_kinds,
            attributes,
        }
    }

    /// Discriminators of the currently enabled sub-kinds, in table order
    pub fn enabled_discriminators(&self) -> Vec<&'static str> {
        self.sub_kinds
            .iter()
            .filter(|sk| sk.enabled)
            .map(|sk| sk.discriminator)
            .collect()
    }

    /// Toggle a sub-kind by display name; `false` when no such sub-kind
    pub fn set_sub_kind(&mut self, name: &str, enabled: bool) -> bool {
        match self.sub_kinds.iter_mut().find(|sk| sk.name == name) {
            Some(sk) => {
                sk.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Look up an attribute by predicate name
    pub fn attribute_mut(&mut self, predicate: &str) -> Option<&mut AttributeDef> {
        self.attributes
            .iter_mut()
            .find(|attr| attr.predicate == predicate)
    }

    /// Does this record belong to one of the enabled sub-kinds?
    ///
    /// Works carry an explicit `kind` discriminator field; people and
    /// organizations match when any enabled sub-kind's filmography field is
    /// present and non-empty; roles always match.
    pub fn class_matches(&self, record: &RawRecord) -> bool {
        match self.kind {
            EntityKind::Work => match record.text("kind") {
                Some(kind) => self
                    .sub_kinds
                    .iter()
                    .any(|sk| sk.enabled && sk.discriminator == kind),
                None => false,
            },
            EntityKind::Person | EntityKind::Organization => {
                self.sub_kinds.iter().any(|sk| {
                    sk.enabled
                        && record
                            .list(sk.discriminator)
                            .is_some_and(|items| !items.is_empty())
                })
            }
            EntityKind::Role => true,
        }
    }

    /// Class check plus every enabled attribute's constraints, in order
    pub fn accept(&self, id: RecordId, record: &RawRecord) -> bool {
        if !self.class_matches(record) {
            return false;
        }
        let prefix = self.kind.key_prefix();
        self.attributes
            .iter()
            .filter(|attr| attr.enabled)
            .all(|attr| attr.check_constraints(prefix, id, record))
    }

    /// The identity block for an accepted record: root fact, the sub-kind
    /// fact for works, then every enabled attribute's lines in order
    pub fn entity_facts(&self, id: RecordId, record: &RawRecord) -> String {
        let prefix = self.kind.key_prefix();
        let mut out = fact_line(self.kind.fact_name(), &[Term::key(prefix, id)]);
        if self.kind == EntityKind::Work {
            if let Some(kind) = record.text("kind") {
                let predicate = kind.replace(' ', "_").to_lowercase();
                out.push_str(&fact_line(&predicate, &[Term::key(prefix, id)]));
            }
        }
        for attr in &self.attributes {
            if attr.enabled {
                match attr.fact_lines(prefix, id, record) {
                    Some(lines) if lines.is_empty() => {
                        debug!(
                            predicate = attr.predicate,
                            id = %id,
                            "field present but unparseable, attribute omitted"
                        );
                    }
                    Some(lines) => out.push_str(&lines),
                    None => {}
                }
            }
        }
        out
    }

    /// Minimum vote count the candidate query may pre-filter on.
    ///
    /// Only sound when both the availability and range gates on the votes
    /// attribute are enabled; anything less and pre-filtering would change
    /// which records get rejected versus never enumerated.
    pub fn min_votes_hint(&self) -> Option<i64> {
        let votes = self
            .attributes
            .iter()
            .find(|attr| attr.predicate == "votes" && attr.enabled)?;
        let mut all_enabled = true;
        let mut minimum = None;
        for slot in &votes.constraints {
            match &slot.constraint {
                Constraint::Availability { .. } => all_enabled &= slot.enabled,
                Constraint::Range { min, .. } => {
                    all_enabled &= slot.enabled;
                    minimum = Some(*min);
                }
                _ => {}
            }
        }
        if all_enabled {
            minimum
        } else {
            None
        }
    }
}
