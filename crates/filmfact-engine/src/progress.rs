//! Progress reporting hook

use filmfact_domain::{EntityKind, RecordId};

/// Observer notified as records are accepted and written.
///
/// Called after a record's facts have reached the sink, never before.
/// The unit type is the no-op observer.
pub trait ProgressObserver {
    /// One record was accepted; `total_accepted` spans all entity kinds
    fn record_accepted(&mut self, kind: EntityKind, id: RecordId, total_accepted: usize) {
        let _ = (kind, id, total_accepted);
    }
}

impl ProgressObserver for () {}
