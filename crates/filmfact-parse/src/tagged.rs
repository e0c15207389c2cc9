//! Country/kind-tagged field grammar
//!
//! Many fields pack a tag, data, and an optional note into one string:
//!
//! - `"RAT:1.33 : 1::(16mm)"` (tech info)
//! - `"UK:15::(re-rating) (2006) (uncut)"` (certificates)
//! - `"USA:27 March 1948::(re-release)"` (release dates)
//!
//! The tag ends at the first colon, and a `::` separator splits data from
//! the note. Some source rows conflate data and note with `" / ("` instead
//! of the separator; a recovery rule splits those on `" / "`.

use crate::ParseError;

/// A `tag:data::note` field, decomposed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedField {
    /// Everything before the first colon (a country or a tech-info kind)
    pub tag: String,
    /// The payload
    pub data: String,
    /// Optional parenthesized note, empty when absent
    pub note: String,
}

/// Parse a country/kind-tagged field.
///
/// Fails when the text has no colon at all.
pub fn parse_country_tagged(text: &str) -> Result<TaggedField, ParseError> {
    let (tag, rest) = text
        .split_once(':')
        .ok_or_else(|| ParseError::MissingTag(text.to_string()))?;

    let (mut data, mut note) = match rest.split_once("::") {
        Some((data, note)) => (data.to_string(), note.to_string()),
        None => (rest.to_string(), String::new()),
    };

    // recovery for rows where the note is glued on with " / (" instead of "::"
    if note.is_empty() && data.contains(" / (") {
        if let Some((d, n)) = data.split_once(" / ") {
            let (d, n) = (d.to_string(), n.to_string());
            data = d;
            note = n;
        }
    }

    Ok(TaggedField {
        tag: tag.to_string(),
        data,
        note,
    })
}

/// Parse a runtime field: `"[country:]minutes[::note]"`.
///
/// Unlike [`parse_country_tagged`], the country prefix is optional here
/// (`"99"`, `"Argentina:7"`, `"45::(149 episodes)"`).
pub fn parse_runtime(text: &str) -> (String, String, String) {
    let (body, note) = match text.split_once("::") {
        Some((body, note)) => (body, note.to_string()),
        None => (text, String::new()),
    };

    // country only when there is exactly one colon; the minutes are always
    // the last segment
    let segments: Vec<&str> = body.split(':').collect();
    let country = if segments.len() == 2 {
        segments[0].to_string()
    } else {
        String::new()
    };
    let minutes = segments.last().copied().unwrap_or(body).to_string();

    (minutes, country, note)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_and_data() {
        let f = parse_country_tagged("OFM:35 mm").unwrap();
        assert_eq!(f.tag, "OFM");
        assert_eq!(f.data, "35 mm");
        assert_eq!(f.note, "");
    }

    #[test]
    fn test_double_colon_note() {
        let f = parse_country_tagged("RAT:1.33 : 1::(16mm)").unwrap();
        assert_eq!(f.tag, "RAT");
        assert_eq!(f.data, "1.33 : 1");
        assert_eq!(f.note, "(16mm)");
    }

    #[test]
    fn test_certificate_style() {
        let f = parse_country_tagged("UK:15::(re-rating) (2006) (uncut)").unwrap();
        assert_eq!(f.tag, "UK");
        assert_eq!(f.data, "15");
        assert_eq!(f.note, "(re-rating) (2006) (uncut)");
    }

    #[test]
    fn test_release_date_style() {
        let f = parse_country_tagged("USA:27 March 1948::(re-release)").unwrap();
        assert_eq!(f.tag, "USA");
        assert_eq!(f.data, "27 March 1948");
        assert_eq!(f.note, "(re-release)");
    }

    #[test]
    fn test_slash_recovery() {
        let f = parse_country_tagged("RAT:1.78 : 1 / (high definition)").unwrap();
        assert_eq!(f.tag, "RAT");
        assert_eq!(f.data, "1.78 : 1");
        assert_eq!(f.note, "(high definition)");
    }

    #[test]
    fn test_no_colon_fails() {
        assert!(parse_country_tagged("just text").is_err());
    }

    #[test]
    fn test_runtime_variants() {
        assert_eq!(
            parse_runtime("45::(149 episodes)"),
            ("45".into(), "".into(), "(149 episodes)".into())
        );
        assert_eq!(
            parse_runtime("USA:19::(DVD version)"),
            ("19".into(), "USA".into(), "(DVD version)".into())
        );
        assert_eq!(parse_runtime("99"), ("99".into(), "".into(), "".into()));
        assert_eq!(
            parse_runtime("Argentina:7"),
            ("7".into(), "Argentina".into(), "".into())
        );
    }
}
