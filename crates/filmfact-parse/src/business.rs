//! Business record grammars: gross, weekend gross, rentals, admissions
//!
//! Business rows pack several parenthesized segments into one string:
//!
//! - `"$175,400,000 (Worldwide) (15 August 1999) (except USA)"` (gross)
//! - `"$1,011,566 (USA) (27 June 1999) (1,139 screens)"` (weekend gross)
//! - `"PTE 95,000 (Portugal)"` (rentals)
//! - `"937,365 (Netherlands) (1950)"` (admissions; same shape as gross)

use crate::date::{parse_date, DateParts};
use crate::money::parse_money;
use crate::ParseError;

/// A cumulative gross (or admissions) record
#[derive(Debug, Clone, PartialEq)]
pub struct GrossRecord {
    /// Whole-unit amount
    pub amount: i64,
    /// Currency prefix, possibly empty (admissions rows carry none)
    pub currency: String,
    /// Country or region segment
    pub country: String,
    /// As-of date; parts missing from the source stay unknown
    pub date: DateParts,
}

/// A weekend gross record: amount, country, date, and screen count
#[derive(Debug, Clone, PartialEq)]
pub struct WeekendGrossRecord {
    /// Whole-unit amount
    pub amount: i64,
    /// Currency prefix
    pub currency: String,
    /// Country segment
    pub country: String,
    /// Day of month
    pub day: u32,
    /// Month
    pub month: filmfact_domain::Month,
    /// Year
    pub year: i32,
    /// Number of screens, when the segment carried any digits
    pub screens: Option<i64>,
}

/// A rental income record
#[derive(Debug, Clone, PartialEq)]
pub struct RentalRecord {
    /// Whole-unit amount
    pub amount: i64,
    /// Currency prefix
    pub currency: String,
    /// Country segment, empty when the row carries none
    pub country: String,
}

fn strip_parens(segment: &str) -> &str {
    segment.trim_start_matches('(').trim_end_matches(')')
}

/// Parse a gross/admissions record.
///
/// The amount and country segments are required; the date segment is
/// optional and its missing parts are explicit unknowns, never defaults.
pub fn parse_gross(text: &str) -> Result<GrossRecord, ParseError> {
    let segments: Vec<&str> = text.split(" (").collect();
    if segments.len() < 2 {
        return Err(ParseError::MissingSegment(text.to_string()));
    }

    let (amount, currency) = parse_money(segments[0])?;
    let country = strip_parens(segments[1]).to_string();
    let date = segments
        .get(2)
        .map(|s| parse_date(strip_parens(s)))
        .unwrap_or_default();

    Ok(GrossRecord {
        amount,
        currency,
        country,
        date,
    })
}

/// Parse a weekend gross record.
///
/// Exactly four parenthesized segments are required (amount, country, date,
/// screens); anything else makes the whole record unparseable and it is
/// silently skipped — `None`, not an error.
pub fn parse_weekend_gross(text: &str) -> Option<WeekendGrossRecord> {
    let segments: Vec<&str> = text.split(" (").collect();
    if segments.len() != 4 {
        return None;
    }

    let (amount, currency) = parse_money(segments[0]).ok()?;
    let country = strip_parens(segments[1]).to_string();

    let date = parse_date(strip_parens(segments[2]));
    let (day, month, year) = match (date.day, date.month, date.year) {
        (Some(d), Some(m), Some(y)) => (d, m, y),
        _ => return None,
    };

    let screen_digits: String = segments[3].chars().filter(char::is_ascii_digit).collect();
    let screens = screen_digits.parse().ok();

    Some(WeekendGrossRecord {
        amount,
        currency,
        country,
        day,
        month,
        year,
        screens,
    })
}

/// Parse a rental record; the country segment is optional.
pub fn parse_rental(text: &str) -> Result<RentalRecord, ParseError> {
    let segments: Vec<&str> = text.split(" (").collect();
    let (amount, currency) = parse_money(segments[0])?;
    let country = segments
        .get(1)
        .map(|s| strip_parens(s).to_string())
        .unwrap_or_default();

    Ok(RentalRecord {
        amount,
        currency,
        country,
    })
}
