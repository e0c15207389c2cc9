//! Month vocabulary for the free-text date grammars

use std::fmt;

/// A calendar month, recognized case-insensitively from English month names
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// All months in calendar order
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Lowercase atom name used in fact output
    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
            Month::July => "july",
            Month::August => "august",
            Month::September => "september",
            Month::October => "october",
            Month::November => "november",
            Month::December => "december",
        }
    }

    /// Month number, 1-12
    pub fn number(&self) -> u32 {
        MONTHS.iter().position(|m| m == self).map_or(0, |i| i as u32) + 1
    }

    /// Find the first month name contained in free text, case-insensitively
    pub fn find_in(text: &str) -> Option<Month> {
        let lower = text.to_ascii_lowercase();
        // earliest match wins, not vocabulary order
        MONTHS
            .iter()
            .filter_map(|m| lower.find(m.name()).map(|pos| (pos, *m)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, m)| m)
    }

}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
