//! Marriage record grammar
//!
//! Spouse rows are the most irregular strings in the source:
//!
//! - `"'Jennifer Abram' (15 October 1997 - present); 2 children"`
//! - `"'Susan Isaacs (II)' (qv) (11 August 1968 - present)"`
//! - `"'Nicole Kidman' (qv) (24 December 1990 - 8 August 2001) (divorced); 2 (adopted) children"`
//! - `"Jim Simpson (I) (1 October 1984 - present); 1 child"`
//! - `"'?' (? - ?)"`
//!
//! The `(qv)` marker (and a roman-numeral disambiguation index on the name)
//! means the spouse has their own record in the database.

use crate::date::parse_date;
use regex::Regex;
use std::sync::LazyLock;

static CHILDREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ (\d{1,2}) ").unwrap());
static REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\((divorced|filed for divorce|annulled|separated|his death|her death)\)")
        .unwrap()
});
static YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((.+?) - (.+?)\)").unwrap());
static NAME_INDEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+?) \(([IVXLCDM]+)\)$").unwrap());

/// The recognized parts of one marriage record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpouseRecord {
    /// The spouse's name, disambiguation index stripped
    pub name: Option<String>,
    /// Whether the spouse has their own database record
    pub in_database: bool,
    /// Number of children from this marriage
    pub child_count: Option<u32>,
    /// How the marriage ended, when stated
    pub separation_reason: Option<String>,
    /// Marriage year
    pub start_year: Option<i32>,
    /// Separation year
    pub end_year: Option<i32>,
}

/// Parse a marriage record. Unrecognizable parts stay absent; this grammar
/// never fails outright.
pub fn parse_spouse(text: &str) -> SpouseRecord {
    let mut record = SpouseRecord::default();

    // a trailing "; N children" clause
    let parts: Vec<&str> = text.split(';').collect();
    if parts.len() == 2 {
        if let Some(caps) = CHILDREN.captures(parts[1]) {
            record.child_count = caps[1].parse().ok();
        }
    }
    let mut first = parts[0].to_string();

    // the in-database marker
    record.in_database = first.contains("(qv)");
    first = first.replace(" (qv)", "");

    if let Some(caps) = REASON.captures(&first) {
        record.separation_reason = Some(caps[1].to_lowercase());
    }

    if let Some((name, indexed)) = extract_name(&first) {
        record.name = Some(name);
        if indexed {
            // a disambiguation index implies a database entry of their own
            record.in_database = true;
        }
    }

    // the "(start - end)" clause; non-year junk on either side is ignored
    if let Some(caps) = YEAR_RANGE.captures(&first) {
        record.start_year = parse_date(&caps[1]).year;
        record.end_year = parse_date(&caps[2]).year;
    }

    record
}

/// Pull the name off the front of a marriage record.
///
/// The name ends at `' ` (closing quote) or at ` (` — unless the
/// parenthesis opens a roman-numeral disambiguation index, which belongs to
/// the name and is stripped separately. Returns the bare name and whether an
/// index was present.
fn extract_name(first: &str) -> Option<(String, bool)> {
    let body = first.strip_prefix('\'').unwrap_or(first);

    let mut end = None;
    for (i, _) in body.char_indices() {
        if i == 0 {
            continue; // the name is at least one character
        }
        let rest = &body[i..];
        if rest.starts_with("' ") || (rest.starts_with(" (") && !is_index_paren(&rest[2..])) {
            end = Some(i);
            break;
        }
    }

    let raw = body[..end?].to_string();
    match NAME_INDEX.captures(&raw) {
        Some(caps) => Some((caps[1].to_string(), true)),
        None => Some((raw, false)),
    }
}

/// Whether a parenthesized clause is a roman-numeral disambiguation index
/// like `(II)`
fn is_index_paren(after_paren: &str) -> bool {
    let Some(close) = after_paren.find(')') else {
        return false;
    };
    after_paren[..close]
        .chars()
        .all(|c| "IVXLCDMivxlcdm".contains(c))
}
