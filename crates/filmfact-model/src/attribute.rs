//! Attribute definitions
//!
//! An attribute binds one output fact predicate to the raw record field it
//! reads, the formatter that turns that field into fact lines, and the
//! constraint slots gating acceptance. Formatters are a closed enum, one
//! variant per attribute family; the same variant is reused by every
//! predicate of that family (`gross` and `admissions` share [`Formatter::Gross`],
//! the seven tech-info predicates share [`Formatter::TechInfo`]).

use filmfact_domain::{
    fact_line, Constraint, ConstraintSlot, Extraction, RawRecord, RecordId, Term,
};
use filmfact_parse::{
    location_part, parse_country_tagged, parse_date, parse_date_range, parse_gross, parse_height,
    parse_money, parse_rental, parse_runtime, parse_spouse, parse_weekend_gross, LocationPart,
};

/// Which component of a partial date an attribute emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    /// The four-digit year
    Year,
    /// The lowercase month atom
    Month,
    /// The day of month
    Day,
}

/// How an attribute turns its raw field into fact lines
#[derive(Debug, Clone, PartialEq)]
pub enum Formatter {
    /// One quoted string argument (`title_name`, `person_name`)
    Text,
    /// One integer argument (`year`, `votes`)
    Number,
    /// One two-decimal float argument (`rating`)
    Decimal,
    /// One fact per list element, quoted (`genre`, `keywords`)
    TextList,
    /// The length of the list (`alternate_version_amount`)
    ListCount,
    /// The ten per-rank vote share characters, each quoted
    VotesDistribution,
    /// Last four characters of the series-years field, unless open-ended
    SeriesEndYear,
    /// Minutes plus optional country and note per list element
    Runtime,
    /// `color`/`blackandwhite` atom plus a note per list element
    ColorInfo,
    /// Tech-info rows filtered to one record kind (CAM, MET, RAT, ...)
    TechInfo {
        /// The tech-info kind tag this attribute keeps
        kind: &'static str,
    },
    /// Country and certificate per list element, note dropped
    Certificates,
    /// Sound system plus note per list element
    SoundMix,
    /// Country, partial date, and note per list element
    ReleaseDates,
    /// Summed day count over the business date ranges of a field
    RangeDays,
    /// Amount and currency per business list element
    Money,
    /// Amount, currency, country, full date, and screen count per element
    WeekendGross,
    /// Amount, currency, country, and partial date per element
    Gross,
    /// Amount, currency, and optional country per element
    Rentals,
    /// One component of a free-text location
    Location(LocationPart),
    /// One component of a free-text date
    Date(DatePart),
    /// In-database spouses
    Spouses,
    /// Child count per named spouse
    Children,
    /// Smallest marriage start year across all spouse records
    FirstMarriageYear,
    /// Largest marriage end year across all spouse records
    LastDivorceYear,
    /// `male`/`female` atom derived from filmography presence
    Gender,
    /// Height normalized to centimeters
    Height,
    /// The field with square brackets stripped (`company_country`)
    BracketStripped,
}

/// One output fact predicate bound to a record field
#[derive(Debug, Clone)]
pub struct AttributeDef {
    /// The fact predicate name
    pub predicate: &'static str,
    /// The raw record field this attribute reads
    pub field: &'static str,
    /// Whether the field lives inside the `business` sub-table
    pub business: bool,
    /// How the field becomes fact lines
    pub formatter: Formatter,
    /// Whether this attribute is selected for output
    pub enabled: bool,
    /// Acceptance gates, checked in order
    pub constraints: Vec<ConstraintSlot>,
}

impl AttributeDef {
    /// New attribute with the availability slot every attribute carries
    pub fn new(predicate: &'static str, field: &'static str, formatter: Formatter) -> Self {
        Self {
            predicate,
            field,
            business: false,
            formatter,
            enabled: true,
            constraints: vec![ConstraintSlot::new(Constraint::Availability {
                unique: false,
            })],
        }
    }

    /// Mark the field as living in the `business` sub-table
    pub fn business(mut self) -> Self {
        self.business = true;
        self
    }

    /// Deselect the attribute by default
    pub fn unchecked(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Add a disabled constraint slot
    pub fn constrained(mut self, constraint: Constraint) -> Self {
        self.constraints.push(ConstraintSlot::new(constraint));
        self
    }

    /// The raw field list, honoring the `business` indirection.
    /// `None` means the field is absent from the record.
    fn raw_list<'r>(&self, record: &'r RawRecord) -> Option<Vec<&'r str>> {
        if self.business {
            record.business_list(self.field)
        } else {
            record.list(self.field)
        }
    }

    fn raw_text<'r>(&self, record: &'r RawRecord) -> Option<&'r str> {
        if self.business {
            None
        } else {
            record.text(self.field)
        }
    }

    /// Generate this attribute's fact lines for one record.
    ///
    /// `None` means the source field is absent; `Some("")` means the field
    /// was there but nothing presentable came out of it. Both read as
    /// "unavailable" to the availability constraint; nothing is ever an
    /// error here.
    pub fn fact_lines(
        &self,
        prefix: &str,
        id: RecordId,
        record: &RawRecord,
    ) -> Option<String> {
        let key = || Term::key(prefix, id);
        match &self.formatter {
            Formatter::Text => {
                let text = self.raw_text(record)?;
                Some(fact_line(self.predicate, &[key(), Term::text(text)]))
            }
            Formatter::Number => {
                // single string or, for rank fields, a one-element list
                let value = self
                    .raw_text(record)
                    .or_else(|| self.raw_list(record)?.first().copied())?;
                Some(match value.parse::<i64>() {
                    Ok(n) => fact_line(self.predicate, &[key(), Term::Int(n)]),
                    Err(_) => String::new(),
                })
            }
            Formatter::Decimal => {
                let value = self.raw_text(record)?;
                Some(match value.parse::<f64>() {
                    Ok(x) => fact_line(self.predicate, &[key(), Term::Float(x)]),
                    Err(_) => String::new(),
                })
            }
            Formatter::TextList => {
                let items = self.raw_list(record)?;
                Some(
                    items
                        .iter()
                        .map(|item| fact_line(self.predicate, &[key(), Term::text(*item)]))
                        .collect(),
                )
            }
            Formatter::ListCount => {
                let items = self.raw_list(record)?;
                Some(fact_line(
                    self.predicate,
                    &[key(), Term::Int(items.len() as i64)],
                ))
            }
            Formatter::VotesDistribution => {
                let shares = self.raw_text(record)?;
                let mut terms = vec![key()];
                terms.extend(shares.chars().map(|c| Term::text(c.to_string())));
                Some(fact_line(self.predicate, &terms))
            }
            Formatter::SeriesEndYear => {
                let years = self.raw_text(record)?;
                let end = if years.len() >= 4 {
                    &years[years.len() - 4..]
                } else {
                    years
                };
                Some(if end == "????" {
                    String::new()
                } else {
                    fact_line(self.predicate, &[key(), Term::atom(end)])
                })
            }
            Formatter::Runtime => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    let (minutes, country, note) = parse_runtime(item);
                    out.push_str(&fact_line(
                        self.predicate,
                        &[key(), Term::atom(minutes), Term::text(country), Term::text(note)],
                    ));
                }
                Some(out)
            }
            Formatter::ColorInfo => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    let mut split = item.splitn(2, "::");
                    let color = if split.next().unwrap_or("").contains("Black") {
                        "blackandwhite"
                    } else {
                        "color"
                    };
                    let note = split.next().unwrap_or("");
                    out.push_str(&fact_line(
                        self.predicate,
                        &[key(), Term::atom(color), Term::text(note)],
                    ));
                }
                Some(out)
            }
            Formatter::TechInfo { kind } => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    if let Ok(tagged) = parse_country_tagged(item) {
                        if tagged.tag == *kind {
                            out.push_str(&fact_line(
                                self.predicate,
                                &[key(), Term::text(tagged.data), Term::text(tagged.note)],
                            ));
                        }
                    }
                }
                Some(out)
            }
            Formatter::Certificates => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    if let Ok(tagged) = parse_country_tagged(item) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[key(), Term::text(tagged.tag), Term::text(tagged.data)],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::SoundMix => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    let mut split = item.splitn(2, "::");
                    let sound = split.next().unwrap_or("");
                    let note = split.next().unwrap_or("");
                    out.push_str(&fact_line(
                        self.predicate,
                        &[key(), Term::text(sound), Term::text(note)],
                    ));
                }
                Some(out)
            }
            Formatter::ReleaseDates => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    if let Ok(tagged) = parse_country_tagged(item) {
                        let date = parse_date(&tagged.data);
                        out.push_str(&fact_line(
                            self.predicate,
                            &[
                                key(),
                                Term::text(tagged.tag),
                                opt_int(date.year.map(i64::from)),
                                opt_month(date.month),
                                opt_int(date.day.map(i64::from)),
                                Term::text(tagged.note),
                            ],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::RangeDays => {
                let days = self.total_range_days(record)?;
                Some(if days > 0 {
                    fact_line(self.predicate, &[key(), Term::Int(days)])
                } else {
                    String::new()
                })
            }
            Formatter::Money => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    if let Ok((amount, currency)) = parse_money(item) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[key(), Term::Int(amount), Term::text(currency)],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::WeekendGross => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    // rows without exactly four segments are skipped, not errors
                    if let Some(gross) = parse_weekend_gross(item) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[
                                key(),
                                Term::Int(gross.amount),
                                Term::text(gross.currency),
                                Term::text(gross.country),
                                Term::Int(i64::from(gross.day)),
                                Term::atom(gross.month.name()),
                                Term::Int(i64::from(gross.year)),
                                opt_int(gross.screens),
                            ],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::Gross => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    if let Ok(gross) = parse_gross(item) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[
                                key(),
                                Term::Int(gross.amount),
                                Term::text(gross.currency),
                                Term::text(gross.country),
                                opt_int(gross.date.day.map(i64::from)),
                                opt_month(gross.date.month),
                                opt_int(gross.date.year.map(i64::from)),
                            ],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::Rentals => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    if let Ok(rental) = parse_rental(item) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[
                                key(),
                                Term::Int(rental.amount),
                                Term::text(rental.currency),
                                Term::text(rental.country),
                            ],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::Location(part) => {
                let text = self.raw_text(record)?;
                Some(match location_part(text, *part) {
                    Some(place) => fact_line(self.predicate, &[key(), Term::text(place)]),
                    None => String::new(),
                })
            }
            Formatter::Date(part) => {
                let text = self.raw_text(record)?;
                let date = parse_date(text);
                let term = match part {
                    DatePart::Year => date.year.map(|y| Term::Int(i64::from(y))),
                    DatePart::Month => date.month.map(|m| Term::atom(m.name())),
                    DatePart::Day => date.day.map(|d| Term::Int(i64::from(d))),
                };
                Some(match term {
                    Some(term) => fact_line(self.predicate, &[key(), term]),
                    None => String::new(),
                })
            }
            Formatter::Spouses => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    let spouse = parse_spouse(item);
                    if let (Some(name), true) = (&spouse.name, spouse.in_database) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[key(), Term::text(name.clone()), Term::atom("true")],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::Children => {
                let items = self.raw_list(record)?;
                let mut out = String::new();
                for item in items {
                    let spouse = parse_spouse(item);
                    if let (Some(name), Some(count)) = (&spouse.name, spouse.child_count) {
                        out.push_str(&fact_line(
                            self.predicate,
                            &[key(), Term::text(name.clone()), Term::Int(i64::from(count))],
                        ));
                    }
                }
                Some(out)
            }
            Formatter::FirstMarriageYear => {
                let year = self.marriage_year(record, true)?;
                Some(match year {
                    Some(y) => fact_line(self.predicate, &[key(), Term::Int(i64::from(y))]),
                    None => String::new(),
                })
            }
            Formatter::LastDivorceYear => {
                let year = self.marriage_year(record, false)?;
                Some(match year {
                    Some(y) => fact_line(self.predicate, &[key(), Term::Int(i64::from(y))]),
                    None => String::new(),
                })
            }
            Formatter::Gender => {
                let gender = if has_filmography(record, "actor") {
                    "male"
                } else if has_filmography(record, "actress") {
                    "female"
                } else {
                    return Some(String::new());
                };
                Some(fact_line(self.predicate, &[key(), Term::atom(gender)]))
            }
            Formatter::Height => {
                let text = self.raw_text(record)?;
                Some(match parse_height(text) {
                    Ok(cm) => fact_line(self.predicate, &[key(), Term::Int(i64::from(cm))]),
                    Err(_) => String::new(),
                })
            }
            Formatter::BracketStripped => {
                let text = self.raw_text(record)?;
                let stripped = text.replace(['[', ']'], "");
                Some(fact_line(self.predicate, &[key(), Term::text(stripped)]))
            }
        }
    }

    /// Sum of the parsed day spans; `None` when the field is absent or any
    /// range fails to parse (one bad range poisons the total)
    fn total_range_days(&self, record: &RawRecord) -> Option<i64> {
        let items = self.raw_list(record)?;
        let mut total = 0;
        for item in items {
            total += parse_date_range(item).ok()?;
        }
        Some(total)
    }

    /// Earliest start year (`first`) or latest end year across spouse records
    fn marriage_year(&self, record: &RawRecord, first: bool) -> Option<Option<i32>> {
        let items = self.raw_list(record)?;
        let mut found: Option<i32> = None;
        for item in items {
            let spouse = parse_spouse(item);
            let candidate = if first {
                spouse.start_year
            } else {
                spouse.end_year
            };
            if let Some(year) = candidate {
                found = Some(match found {
                    Some(best) if first => best.min(year),
                    Some(best) => best.max(year),
                    None => year,
                });
            }
        }
        Some(found)
    }

    /// The typed single value a range constraint probes
    fn single_value(&self, record: &RawRecord) -> Extraction {
        let number = match &self.formatter {
            Formatter::Number => self
                .raw_text(record)
                .or_else(|| {
                    self.raw_list(record)
                        .and_then(|items| items.first().copied())
                })
                .and_then(|v| v.parse::<i64>().ok()),
            // a rating range is checked on the truncated value
            Formatter::Decimal => self
                .raw_text(record)
                .and_then(|v| v.parse::<f64>().ok())
                .map(|x| x as i64),
            Formatter::ListCount => self
                .raw_list(record)
                .map(|items| items.len() as i64),
            Formatter::SeriesEndYear => self.raw_text(record).and_then(|years| {
                if years.len() >= 4 {
                    years[years.len() - 4..].parse().ok()
                } else {
                    years.parse().ok()
                }
            }),
            Formatter::RangeDays => self.total_range_days(record).filter(|d| *d > 0),
            Formatter::Date(part) => {
                let date = self.raw_text(record).map(parse_date);
                date.and_then(|d| match part {
                    DatePart::Year => d.year.map(i64::from),
                    DatePart::Day => d.day.map(i64::from),
                    // months have no numeric reading here
                    DatePart::Month => None,
                })
            }
            Formatter::Children => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_spouse(item).child_count)
                    .map(i64::from)
                    .sum()
            }),
            Formatter::FirstMarriageYear => self
                .marriage_year(record, true)
                .flatten()
                .map(i64::from),
            Formatter::LastDivorceYear => self
                .marriage_year(record, false)
                .flatten()
                .map(i64::from),
            Formatter::Height => self
                .raw_text(record)
                .and_then(|text| parse_height(text).ok())
                .map(i64::from),
            _ => None,
        };
        match number {
            Some(n) => Extraction::Number(n),
            None => Extraction::Unavailable,
        }
    }

    /// The typed value list a range-multiple constraint probes
    fn multiple_values(&self, record: &RawRecord) -> Extraction {
        let numbers: Option<Vec<i64>> = match &self.formatter {
            Formatter::Runtime => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_runtime(item).0.parse().ok())
                    .collect()
            }),
            Formatter::ReleaseDates => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_country_tagged(item).ok())
                    .filter_map(|tagged| parse_date(&tagged.data).year)
                    .map(i64::from)
                    .collect()
            }),
            Formatter::Money => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_money(item).ok())
                    .map(|(amount, _)| amount)
                    .collect()
            }),
            Formatter::WeekendGross => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_weekend_gross(item))
                    .map(|gross| gross.amount)
                    .collect()
            }),
            Formatter::Gross => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_gross(item).ok())
                    .map(|gross| gross.amount)
                    .collect()
            }),
            Formatter::Rentals => self.raw_list(record).map(|items| {
                items
                    .iter()
                    .filter_map(|item| parse_rental(item).ok())
                    .map(|rental| rental.amount)
                    .collect()
            }),
            _ => None,
        };
        match numbers {
            Some(ns) => Extraction::Numbers(ns),
            None => Extraction::Unavailable,
        }
    }

    /// The raw vocabulary terms a value-set constraint probes
    fn terms(&self, record: &RawRecord) -> Extraction {
        match self.raw_list(record) {
            Some(items) => {
                Extraction::Terms(items.iter().map(|item| item.to_string()).collect())
            }
            None => Extraction::Unavailable,
        }
    }

    /// Build the extraction probe matching one constraint's shape
    fn probe(&self, prefix: &str, id: RecordId, record: &RawRecord, constraint: &Constraint) -> Extraction {
        match constraint {
            Constraint::Availability { .. } => match self.fact_lines(prefix, id, record) {
                Some(lines) if !lines.is_empty() => Extraction::Lines(lines.lines().count()),
                _ => Extraction::Unavailable,
            },
            Constraint::Range { .. } => self.single_value(record),
            Constraint::RangeMultiple { .. } => self.multiple_values(record),
            Constraint::ValueSet { .. } => self.terms(record),
        }
    }

    /// Evaluate every enabled constraint slot, in declaration order
    pub fn check_constraints(&self, prefix: &str, id: RecordId, record: &RawRecord) -> bool {
        for slot in &self.constraints {
            if !slot.enabled {
                continue;
            }
            let extraction = self.probe(prefix, id, record, &slot.constraint);
            if !slot.constraint.evaluate(&extraction) {
                return false;
            }
        }
        true
    }
}

fn opt_int(value: Option<i64>) -> Term {
    match value {
        Some(n) => Term::Int(n),
        None => Term::Unknown,
    }
}

fn opt_month(month: Option<filmfact_domain::Month>) -> Term {
    match month {
        Some(m) => Term::atom(m.name()),
        None => Term::Unknown,
    }
}

/// Whether the record carries a non-empty filmography under this key
fn has_filmography(record: &RawRecord, key: &str) -> bool {
    record.list(key).is_some_and(|items| !items.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmfact_domain::RawRecord;

    fn id() -> RecordId {
        RecordId::new(100296)
    }

    #[test]
    fn test_text_attribute() {
        let attr = AttributeDef::new("title_name", "title", Formatter::Text);
        let record = RawRecord::new().with("title", "Cape Fear");
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some("title_name(t100296, 'Cape Fear').\n")
        );
        assert_eq!(attr.fact_lines("t", id(), &RawRecord::new()), None);
    }

    #[test]
    fn test_number_attribute_from_list_head() {
        let attr = AttributeDef::new("top_250_rank", "top 250 rank", Formatter::Number);
        let record = RawRecord::new().with("top 250 rank", vec!["56".to_string()]);
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some("top_250_rank(t100296, 56).\n")
        );
    }

    #[test]
    fn test_decimal_two_places() {
        let attr = AttributeDef::new("rating", "rating", Formatter::Decimal);
        let record = RawRecord::new().with("rating", "7.3");
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some("rating(t100296, 7.30).\n")
        );
    }

    #[test]
    fn test_votes_distribution_single_fact() {
        let attr = AttributeDef::new(
            "votes_distribution",
            "votes distribution",
            Formatter::VotesDistribution,
        );
        let record = RawRecord::new().with("votes distribution", "0000111..*");
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some(
                "votes_distribution(t100296, '0', '0', '0', '0', '1', '1', '1', '.', '.', '*').\n"
            )
        );
    }

    #[test]
    fn test_series_end_year_open_ended() {
        let attr = AttributeDef::new("series_years", "series years", Formatter::SeriesEndYear);
        let running = RawRecord::new().with("series years", "2004-????");
        assert_eq!(attr.fact_lines("t", id(), &running).as_deref(), Some(""));
        let ended = RawRecord::new().with("series years", "1964-1967");
        assert_eq!(
            attr.fact_lines("t", id(), &ended).as_deref(),
            Some("series_years(t100296, 1967).\n")
        );
    }

    #[test]
    fn test_runtime_rows() {
        let attr = AttributeDef::new("runtime", "runtimes", Formatter::Runtime);
        let record = RawRecord::new().with(
            "runtimes",
            vec![
                "115".to_string(),
                "Spain:99::(DVD edition)".to_string(),
            ],
        );
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some(
                "runtime(t100296, 115, '', '').\n\
                 runtime(t100296, 99, 'Spain', '(DVD edition)').\n"
            )
        );
    }

    #[test]
    fn test_color_info() {
        let attr = AttributeDef::new("color_info", "color info", Formatter::ColorInfo);
        let record = RawRecord::new().with(
            "color info",
            vec![
                "Black and White".to_string(),
                "Color::(Eastmancolor)".to_string(),
            ],
        );
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some(
                "color_info(t100296, blackandwhite, '').\n\
                 color_info(t100296, color, '(Eastmancolor)').\n"
            )
        );
    }

    #[test]
    fn test_tech_info_filters_on_kind() {
        let attr = AttributeDef::new(
            "aspect_ratio",
            "tech info",
            Formatter::TechInfo { kind: "RAT" },
        );
        let record = RawRecord::new().with(
            "tech info",
            vec![
                "RAT:1.33 : 1::(16mm)".to_string(),
                "CAM:Panavision Genesis HD Camera".to_string(),
            ],
        );
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some("aspect_ratio(t100296, '1.33 : 1', '(16mm)').\n")
        );
    }

    #[test]
    fn test_release_dates_partial() {
        let attr = AttributeDef::new("release_date", "release dates", Formatter::ReleaseDates);
        let record = RawRecord::new().with(
            "release dates",
            vec![
                "Italy:4 February 1970::(Rome) (premiere)".to_string(),
                "France:September 2001".to_string(),
            ],
        );
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some(
                "release_date(t100296, 'Italy', 1970, february, 4, '(Rome) (premiere)').\n\
                 release_date(t100296, 'France', 2001, september, '', '').\n"
            )
        );
    }

    #[test]
    fn test_gross_without_date() {
        let attr = AttributeDef::new("gross", "gross", Formatter::Gross).business();
        let mut record = RawRecord::new();
        record.insert("gross", "x"); // top-level field must not be read
        let mut business = std::collections::BTreeMap::new();
        business.insert(
            "gross".to_string(),
            filmfact_domain::FieldValue::List(vec![
                "AUD 8,125,975 (Australia) (1992)".to_string(),
            ]),
        );
        record.insert("business", filmfact_domain::FieldValue::Table(business));
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some("gross(t100296, 8125975, 'AUD', 'Australia', '', '', 1992).\n")
        );
    }

    #[test]
    fn test_spouse_and_children() {
        let spouses = vec![
            "'Susan Isaacs (II)' (qv) (11 August 1968 - present)".to_string(),
            "'Jennifer Abram' (15 October 1997 - present); 2 children".to_string(),
        ];
        let record = RawRecord::new().with("spouse", spouses);

        let spouse = AttributeDef::new("spouse", "spouse", Formatter::Spouses);
        assert_eq!(
            spouse.fact_lines("p", id(), &record).as_deref(),
            Some("spouse(p100296, 'Susan Isaacs', true).\n")
        );

        let children = AttributeDef::new("children", "spouse", Formatter::Children);
        assert_eq!(
            children.fact_lines("p", id(), &record).as_deref(),
            Some("children(p100296, 'Jennifer Abram', 2).\n")
        );

        let first = AttributeDef::new(
            "first_marriage_year",
            "spouse",
            Formatter::FirstMarriageYear,
        );
        assert_eq!(
            first.fact_lines("p", id(), &record).as_deref(),
            Some("first_marriage_year(p100296, 1968).\n")
        );
    }

    #[test]
    fn test_gender_from_filmography() {
        let attr = AttributeDef::new("gender", "", Formatter::Gender);
        let actress = RawRecord::new().with("actress", vec!["101".to_string()]);
        assert_eq!(
            attr.fact_lines("p", id(), &actress).as_deref(),
            Some("gender(p100296, female).\n")
        );
        assert_eq!(
            attr.fact_lines("p", id(), &RawRecord::new()).as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_location_parts() {
        let record = RawRecord::new().with("birth notes", "Dearborn, Michigan, USA");
        let country = AttributeDef::new(
            "country_of_birth",
            "birth notes",
            Formatter::Location(LocationPart::Country),
        );
        let state = AttributeDef::new(
            "state_of_birth",
            "birth notes",
            Formatter::Location(LocationPart::State),
        );
        assert_eq!(
            country.fact_lines("p", id(), &record).as_deref(),
            Some("country_of_birth(p100296, 'USA').\n")
        );
        assert_eq!(
            state.fact_lines("p", id(), &record).as_deref(),
            Some("state_of_birth(p100296, 'Michigan').\n")
        );
    }

    #[test]
    fn test_company_country_brackets() {
        let attr = AttributeDef::new("company_country", "country", Formatter::BracketStripped);
        let record = RawRecord::new().with("country", "[us]");
        assert_eq!(
            attr.fact_lines("co", id(), &record).as_deref(),
            Some("company_country(co100296, 'us').\n")
        );
    }

    #[test]
    fn test_availability_constraint_checks_lines() {
        let mut attr = AttributeDef::new("year", "year", Formatter::Number);
        attr.constraints[0].enabled = true;
        assert!(attr.check_constraints("t", id(), &RawRecord::new().with("year", "1976")));
        assert!(!attr.check_constraints("t", id(), &RawRecord::new()));
        // present but unparseable: no lines generated, availability fails
        assert!(!attr.check_constraints("t", id(), &RawRecord::new().with("year", "????")));
    }

    #[test]
    fn test_range_constraint_short_circuit() {
        let mut attr = AttributeDef::new("year", "year", Formatter::Number)
            .constrained(Constraint::Range { min: 1888, max: 2050 });
        attr.constraints[1].enabled = true;
        assert!(attr.check_constraints("t", id(), &RawRecord::new().with("year", "1976")));
        assert!(!attr.check_constraints("t", id(), &RawRecord::new().with("year", "1500")));
        // absent field passes a range gate
        assert!(attr.check_constraints("t", id(), &RawRecord::new()));
    }

    #[test]
    fn test_range_days_poisoned_by_bad_range() {
        let attr = AttributeDef::new(
            "filmingdays",
            "filming dates",
            Formatter::RangeDays,
        )
        .business();
        let mut business = std::collections::BTreeMap::new();
        business.insert(
            "filming dates".to_string(),
            filmfact_domain::FieldValue::List(vec![
                "19 September 2010 - 10 January 2011".to_string(),
                "17 March 1897 -".to_string(),
            ]),
        );
        let mut record = RawRecord::new();
        record.insert("business", filmfact_domain::FieldValue::Table(business));
        assert_eq!(attr.fact_lines("t", id(), &record).as_deref(), Some(""));
    }

    #[test]
    fn test_quote_escaping_applied() {
        let attr = AttributeDef::new("keywords", "keywords", Formatter::TextList);
        let record = RawRecord::new().with("keywords", vec!["d'Artagnan".to_string()]);
        assert_eq!(
            attr.fact_lines("t", id(), &record).as_deref(),
            Some("keywords(t100296, 'd\\'Artagnan').\n")
        );
    }
}
