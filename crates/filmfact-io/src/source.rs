//! JSON snapshot record source
//!
//! Loads a whole database snapshot into memory at open time and serves
//! candidate batches from it. The snapshot is a single JSON object keyed by
//! kind name, each kind mapping numeric record IDs to field objects:
//!
//! ```json
//! {
//!   "work": {
//!     "1": { "kind": "movie", "title": "Taxi Driver", "year": "1976" }
//!   },
//!   "person": {
//!     "9": { "name": "Robert De Niro", "actor": ["1"] }
//!   }
//! }
//! ```
//!
//! String fields become text values, arrays become lists, nested objects
//! become tables. Numbers are accepted and stored as their decimal text.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use filmfact_domain::{CandidateRequest, EntityKind, FieldValue, RawRecord, RecordSource, RecordId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde_json::Value;
use tracing::debug;

use crate::IoError;

/// In-memory record source backed by a JSON snapshot file
pub struct JsonRecordSource {
    records: BTreeMap<EntityKind, BTreeMap<u64, RawRecord>>,
    rng: StdRng,
}

impl JsonRecordSource {
    /// Open and parse a snapshot file
    ///
    /// The whole snapshot is loaded eagerly; a malformed file fails here
    /// rather than mid-run.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use filmfact_io::JsonRecordSource;
    ///
    /// let source = JsonRecordSource::open("snapshot.json").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IoError> {
        let text = fs::read_to_string(path)?;
        let root: Value = serde_json::from_str(&text)?;
        let Value::Object(kinds) = root else {
            return Err(IoError::InvalidData(
                "snapshot root must be an object keyed by kind name".to_string(),
            ));
        };

        let mut records: BTreeMap<EntityKind, BTreeMap<u64, RawRecord>> = BTreeMap::new();
        for (kind_name, entries) in kinds {
            let kind = EntityKind::parse(&kind_name).ok_or_else(|| {
                IoError::InvalidData(format!("unknown kind '{}'", kind_name))
            })?;
            let Value::Object(entries) = entries else {
                return Err(IoError::InvalidData(format!(
                    "kind '{}' must map record IDs to objects",
                    kind_name
                )));
            };
            let bucket = records.entry(kind).or_default();
            for (id_text, fields) in entries {
                let id: u64 = id_text.parse().map_err(|_| {
                    IoError::InvalidData(format!("record ID '{}' is not numeric", id_text))
                })?;
                bucket.insert(id, parse_record(&kind_name, &id_text, fields)?);
            }
        }

        debug!(
            kinds = records.len(),
            total = records.values().map(|b| b.len()).sum::<usize>(),
            "loaded snapshot"
        );
        Ok(Self {
            records,
            rng: StdRng::from_entropy(),
        })
    }

    fn bucket(&self, kind: EntityKind) -> Option<&BTreeMap<u64, RawRecord>> {
        self.records.get(&kind)
    }
}

fn parse_record(kind_name: &str, id_text: &str, fields: Value) -> Result<RawRecord, IoError> {
    let Value::Object(fields) = fields else {
        return Err(IoError::InvalidData(format!(
            "record {}/{} must be an object",
            kind_name, id_text
        )));
    };
    let mut record = RawRecord::new();
    for (name, value) in fields {
        if let Some(converted) = convert_field(value) {
            record.insert(name, converted);
        }
    }
    Ok(record)
}

/// Convert a JSON value to a record field; `None` drops nulls and
/// unsupported shapes silently
fn convert_field(value: Value) -> Option<FieldValue> {
    match value {
        Value::String(s) => Some(FieldValue::Text(s)),
        Value::Number(n) => Some(FieldValue::Text(n.to_string())),
        Value::Array(items) => {
            let items = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect();
            Some(FieldValue::List(items))
        }
        Value::Object(map) => {
            let table = map
                .into_iter()
                .filter_map(|(k, v)| convert_field(v).map(|v| (k, v)))
                .collect();
            Some(FieldValue::Table(table))
        }
        Value::Bool(b) => Some(FieldValue::Text(b.to_string())),
        Value::Null => None,
    }
}

/// Class filter: a record qualifies when its `kind` field matches one of the
/// requested classes, or when it carries a non-empty list field named after
/// one of them (filmography-style discriminators)
fn matches_classes(record: &RawRecord, classes: &[String]) -> bool {
    if classes.is_empty() {
        return true;
    }
    if let Some(kind) = record.text("kind") {
        if classes.iter().any(|c| c == kind) {
            return true;
        }
    }
    classes
        .iter()
        .any(|c| record.list(c).map_or(false, |items| !items.is_empty()))
}

fn passes_min_votes(record: &RawRecord, min: i64) -> bool {
    record
        .list("votes")
        .and_then(|items| items.first().and_then(|v| v.trim().parse::<i64>().ok()))
        .map_or(false, |votes| votes > min)
}

impl RecordSource for JsonRecordSource {
    type Error = IoError;

    fn enumerate_candidates(
        &mut self,
        kind: EntityKind,
        request: &CandidateRequest,
    ) -> Result<Vec<RecordId>, Self::Error> {
        let Some(bucket) = self.bucket(kind) else {
            return Ok(Vec::new());
        };
        let mut matching: Vec<u64> = bucket
            .iter()
            .filter(|(_, record)| matches_classes(record, &request.classes))
            .filter(|(_, record)| {
                request.min_votes.map_or(true, |min| passes_min_votes(record, min))
            })
            .map(|(id, _)| *id)
            .collect();

        let batch: Vec<RecordId> = if request.random {
            matching.shuffle(&mut self.rng);
            matching.into_iter().take(request.limit).map(RecordId::new).collect()
        } else {
            matching
                .into_iter()
                .skip(request.offset)
                .take(request.limit)
                .map(RecordId::new)
                .collect()
        };
        debug!(kind = %kind, batch = batch.len(), offset = request.offset, "enumerated candidates");
        Ok(batch)
    }

    fn fetch(
        &mut self,
        kind: EntityKind,
        id: RecordId,
    ) -> Result<Option<RawRecord>, Self::Error> {
        Ok(self
            .bucket(kind)
            .and_then(|bucket| bucket.get(&id.value()))
            .cloned())
    }
}
