//! Person height grammar
//!
//! Heights appear both metric (`"168 cm"`, `"193.5 cm"`) and imperial
//! (`"5' 2\""`, `"6'"`, `"5' 5 1/2\""`, `"5'1\""`). Output is always whole
//! centimeters.

use crate::ParseError;

const CM_PER_INCH: f64 = 2.54;

/// Parse a height string into centimeters.
///
/// Metric values with a `.5` suffix round up to the next centimeter.
/// Imperial values convert at 2.54 cm per inch, with an optional `1/2` third
/// token adding half an inch before rounding to the nearest centimeter.
pub fn parse_height(text: &str) -> Result<u32, ParseError> {
    if text.contains("cm") {
        parse_metric(text)
    } else {
        parse_imperial(text)
    }
}

fn parse_metric(text: &str) -> Result<u32, ParseError> {
    let trimmed = text.replace(" cm", "");
    if let Ok(cm) = trimmed.parse::<u32>() {
        return Ok(cm);
    }
    // "193.5" rounds up to the next whole centimeter
    if let Some(whole) = trimmed.strip_suffix(".5") {
        if let Ok(cm) = whole.parse::<u32>() {
            return Ok(cm + 1);
        }
    }
    Err(ParseError::BadHeight(text.to_string()))
}

fn parse_imperial(text: &str) -> Result<u32, ParseError> {
    // "5'1\"" carries no space; normalize to "5' 1\"" before splitting
    let normalized = if text.contains(' ') {
        text.to_string()
    } else {
        text.replace('\'', "' ")
    };
    let tokens: Vec<&str> = normalized.split(' ').collect();

    let feet: u32 = tokens
        .first()
        .and_then(|t| t.strip_suffix('\''))
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| ParseError::BadHeight(text.to_string()))?;

    let mut inches: u32 = 0;
    let mut half = 0.0;
    match tokens.len() {
        1 | 2 if tokens.get(1).is_none_or(|t| t.is_empty()) => {}
        2 => {
            let tok = tokens[1].strip_suffix('"').unwrap_or(tokens[1]);
            inches = tok
                .parse()
                .map_err(|_| ParseError::BadHeight(text.to_string()))?;
        }
        3 => {
            inches = tokens[1]
                .parse()
                .map_err(|_| ParseError::BadHeight(text.to_string()))?;
            // the third token is only ever a half inch in practice
            half = CM_PER_INCH / 2.0;
        }
        _ => return Err(ParseError::BadHeight(text.to_string())),
    }

    let total_inches = f64::from(inches + feet * 12);
    Ok((total_inches * CM_PER_INCH + half).round() as u32)
}
