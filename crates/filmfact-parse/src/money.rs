//! Money amount grammar
//!
//! Amounts look like `"AUD 1,000"`, `"$1,000"`, `"£180"`, `"FFR 50,000"`.
//! The currency is whatever precedes the first digit; thousands separators
//! and decimal points are stripped, not interpreted — amounts are always
//! whole units.

use crate::ParseError;

/// Parse a money string into `(amount, currency)`.
///
/// Fails when the text contains no digits at all.
pub fn parse_money(text: &str) -> Result<(i64, String), ParseError> {
    let digit_start = text
        .char_indices()
        .find(|(_, c)| c.is_ascii_digit())
        .map(|(i, _)| i)
        .ok_or_else(|| ParseError::NoAmount(text.to_string()))?;

    let currency = text[..digit_start].trim().to_string();
    let digits: String = text[digit_start..]
        .chars()
        .filter(char::is_ascii_digit)
        .collect();

    let amount = digits
        .parse()
        .map_err(|_| ParseError::NoAmount(text.to_string()))?;

    Ok((amount, currency))
}
