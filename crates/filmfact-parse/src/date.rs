//! Partial-date and date-range grammars
//!
//! Dates in the source are free text and frequently incomplete: `"1999"`,
//! `"June 1999"`, `"1 August 1999"`, `"3 October ????"`. A part is only
//! recognized when its grammar rule holds; anything else is simply absent.

use crate::ParseError;
use chrono::NaiveDate;
use filmfact_domain::Month;
use regex::Regex;
use std::sync::LazyLock;

static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})$").unwrap());
static DAY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})").unwrap());

/// The recognized parts of a free-text date
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateParts {
    /// Four-digit year, recognized iff the string ends in four digits
    pub year: Option<i32>,
    /// Month, recognized by case-insensitive name match
    pub month: Option<Month>,
    /// Day of month, recognized only when a month was found and the string
    /// begins with one or two digits
    pub day: Option<u32>,
}

impl DateParts {
    /// Whether nothing at all was recognized
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none()
    }
}

/// Parse a free-text date into its recognizable parts.
///
/// Unrecognizable parts are `None`, not an error: `"3 October ????"` yields
/// a month and a day but no year.
pub fn parse_date(text: &str) -> DateParts {
    let mut parts = DateParts::default();

    if let Some(caps) = YEAR_SUFFIX.captures(text) {
        parts.year = caps[1].parse().ok();
    }

    if let Some(month) = Month::find_in(text) {
        parts.month = Some(month);
        // only trust a leading number as the day when a month is present
        if let Some(caps) = DAY_PREFIX.captures(text) {
            parts.day = caps[1].parse().ok();
        }
    }

    parts
}

/// Parse a `"<date> - <date>"` range and return the absolute day difference.
///
/// Both sides must carry at least year and month; the day defaults to the
/// first of the month. Trailing parenthesized annotations on either side are
/// ignored (`"... - 10 January 2011 (EP Films)"`).
pub fn parse_date_range(text: &str) -> Result<i64, ParseError> {
    let sides: Vec<&str> = text.split(" - ").collect();
    if sides.len() != 2 {
        return Err(ParseError::NotADateRange(text.to_string()));
    }

    let first = to_calendar_date(sides[0])?;
    let second = to_calendar_date(sides[1])?;

    Ok((second - first).num_days().abs())
}

fn to_calendar_date(side: &str) -> Result<NaiveDate, ParseError> {
    // strip "(EP Films)"-style annotations
    let bare = side.split(" (").next().unwrap_or(side);
    let parts = parse_date(bare);

    let (year, month) = match (parts.year, parts.month) {
        (Some(y), Some(m)) => (y, m),
        _ => return Err(ParseError::IncompleteDate(side.to_string())),
    };

    NaiveDate::from_ymd_opt(year, month.number(), parts.day.unwrap_or(1))
        .ok_or_else(|| ParseError::IncompleteDate(side.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_only() {
        let d = parse_date("1999");
        assert_eq!(d.year, Some(1999));
        assert_eq!(d.month, None);
        assert_eq!(d.day, None);
    }

    #[test]
    fn test_month_and_year() {
        let d = parse_date("June 1999");
        assert_eq!(d.year, Some(1999));
        assert_eq!(d.month, Some(Month::June));
        assert_eq!(d.day, None);
    }

    #[test]
    fn test_full_date() {
        let d = parse_date("1 August 1999");
        assert_eq!(d.year, Some(1999));
        assert_eq!(d.month, Some(Month::August));
        assert_eq!(d.day, Some(1));
    }

    #[test]
    fn test_day_without_year() {
        let d = parse_date("13 May");
        assert_eq!(d.year, None);
        assert_eq!(d.month, Some(Month::May));
        assert_eq!(d.day, Some(13));
    }

    #[test]
    fn test_year_needs_four_trailing_digits() {
        assert_eq!(parse_date("18??").year, None);
        assert_eq!(parse_date("15 June 19??").year, None);
        assert_eq!(parse_date("3 October ????").year, None);
    }

    #[test]
    fn test_day_needs_a_month() {
        // a leading number with no month name is not a day
        let d = parse_date("1999");
        assert_eq!(d.day, None);
    }

    #[test]
    fn test_date_range_full_dates() {
        assert_eq!(
            parse_date_range("19 September 2010 - 10 January 2011").unwrap(),
            113
        );
    }

    #[test]
    fn test_date_range_with_annotation() {
        assert_eq!(
            parse_date_range("19 September 2010 - 10 January 2011 (EP Films)").unwrap(),
            113
        );
    }

    #[test]
    fn test_date_range_day_defaults_to_first() {
        assert_eq!(parse_date_range("September 2010 - January 2011").unwrap(), 122);
    }

    #[test]
    fn test_date_range_needs_months() {
        // year-only sides are not enough
        assert!(parse_date_range("1893 - 1893").is_err());
    }

    #[test]
    fn test_date_range_open_ended_fails() {
        assert!(parse_date_range("17 March 1897 -").is_err());
        assert!(parse_date_range("? - 21 May 1913").is_err());
    }

    #[test]
    fn test_date_range_same_day_is_zero() {
        assert_eq!(parse_date_range("1 May 2000 - 1 May 2000").unwrap(), 0);
    }

    #[test]
    fn test_date_range_is_absolute() {
        assert_eq!(parse_date_range("10 May 2000 - 1 May 2000").unwrap(), 9);
    }
}
