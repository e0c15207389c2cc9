//! Raw record model - the field maps fetched from the record source

use std::collections::BTreeMap;
use std::fmt;

/// Primary key of a record inside the source database.
///
/// Keys are assigned by the source; filmfact never generates them. The same
/// numeric key may exist for different entity kinds (a work and a person can
/// both be `42`), so a key is only meaningful together with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(u64);

impl RecordId {
    /// Wrap a raw database key
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw key value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One field value inside a raw record.
///
/// Source fields are free text: a single string, a list of strings, or a
/// nested table (the `business` sub-mapping used by budget/gross/rental
/// attributes).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A single string field (e.g. `title`, `birth date`)
    Text(String),
    /// A list-of-strings field (e.g. `genres`, `spouse`)
    List(Vec<String>),
    /// A nested field table (e.g. `business`)
    Table(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// View this value as a single string, if it is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View this value as a string list; a single string is a one-element list
    pub fn as_list(&self) -> Option<Vec<&str>> {
        match self {
            FieldValue::Text(s) => Some(vec![s.as_str()]),
            FieldValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            FieldValue::Table(_) => None,
        }
    }

    /// View this value as a nested table, if it is one
    pub fn as_table(&self) -> Option<&BTreeMap<String, FieldValue>> {
        match self {
            FieldValue::Table(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        FieldValue::List(value)
    }
}

/// A raw record: the field map for one database entity.
///
/// Absent fields are the normal case, not an error; attribute formatters
/// treat a missing field as "no output" and only the availability constraint
/// turns absence into a rejection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl RawRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field value, replacing any existing value under that key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a field
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Look up a single-string field
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }

    /// Look up a field as a string list (single strings become one-element lists)
    pub fn list(&self, key: &str) -> Option<Vec<&str>> {
        self.get(key).and_then(FieldValue::as_list)
    }

    /// Look up a key inside the `business` sub-table as a string list
    pub fn business_list(&self, key: &str) -> Option<Vec<&str>> {
        self.get("business")
            .and_then(FieldValue::as_table)
            .and_then(|table| table.get(key))
            .and_then(FieldValue::as_list)
    }

    /// Whether the record has a field under this key
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Iterate over all field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_and_list_access() {
        let record = RawRecord::new()
            .with("title", "Cape Fear")
            .with("genres", vec!["Crime".to_string(), "Drama".to_string()]);

        assert_eq!(record.text("title"), Some("Cape Fear"));
        assert_eq!(record.list("genres"), Some(vec!["Crime", "Drama"]));
        // a single string reads as a one-element list too
        assert_eq!(record.list("title"), Some(vec!["Cape Fear"]));
        assert_eq!(record.text("genres"), None);
        assert_eq!(record.text("missing"), None);
    }

    #[test]
    fn test_business_sub_table() {
        let mut business = BTreeMap::new();
        business.insert(
            "budget".to_string(),
            FieldValue::List(vec!["$1,000".to_string()]),
        );
        let mut record = RawRecord::new();
        record.insert("business", FieldValue::Table(business));

        assert_eq!(record.business_list("budget"), Some(vec!["$1,000"]));
        assert_eq!(record.business_list("gross"), None);
        // no business table at all
        assert_eq!(RawRecord::new().business_list("budget"), None);
    }

    #[test]
    fn test_record_id_display() {
        let id = RecordId::new(100296);
        assert_eq!(id.to_string(), "100296");
        assert_eq!(id.value(), 100296);
    }
}
