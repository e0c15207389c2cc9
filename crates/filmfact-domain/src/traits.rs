//! Trait definitions for the external collaborators
//!
//! These traits mark the boundary between the generation engine and its
//! infrastructure: the record source (database) and the fact sink (output
//! file). Implementations live in other crates (`filmfact-io`).

use crate::{EntityKind, RawRecord, RecordId};

/// A batch request for candidate record IDs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateRequest {
    /// Sub-kind discriminator values to filter on (empty = no filter)
    pub classes: Vec<String>,
    /// Offset into the enumeration for non-random paging
    pub offset: usize,
    /// Maximum number of IDs to return
    pub limit: usize,
    /// Return candidates in random order instead of enumeration order
    pub random: bool,
    /// Only return records with more than this many votes, when the source
    /// can filter cheaply (a query hint, not a guarantee)
    pub min_votes: Option<i64>,
}

/// Enumerates candidate IDs and fetches raw records by ID
///
/// Implemented by the infrastructure layer (`filmfact-io`). A source that
/// cannot produce more candidates returns an empty batch; the engine treats
/// that as exhaustion, never as an error worth aborting for.
pub trait RecordSource {
    /// Error type for source operations
    type Error;

    /// Enumerate candidate record IDs of the given kind
    fn enumerate_candidates(
        &mut self,
        kind: EntityKind,
        request: &CandidateRequest,
    ) -> Result<Vec<RecordId>, Self::Error>;

    /// Fetch one raw record; `None` when the ID does not exist
    fn fetch(&mut self, kind: EntityKind, id: RecordId)
        -> Result<Option<RawRecord>, Self::Error>;
}

/// Append-only text writer for generated facts
///
/// Opened once per run, truncated at run start. A write failure is fatal to
/// the run: fact ordering cannot be guaranteed after a partial write.
pub trait FactSink {
    /// Error type for sink operations
    type Error;

    /// Append fact text verbatim
    fn append(&mut self, lines: &str) -> Result<(), Self::Error>;
}
