//! Per-run generation state
//!
//! One [`KindState`] per entity kind, owned by the engine for the duration
//! of a single run and dropped with it. Nothing here outlives the run or is
//! shared between runs.

use std::collections::{HashMap, HashSet};

use filmfact_domain::{EntityKind, RecordId, ENTITY_KINDS};

/// Work-in-progress bookkeeping for one entity kind
#[derive(Debug, Default)]
pub struct KindState {
    /// IDs whose facts have been written
    pub accepted: HashSet<RecordId>,
    /// IDs that failed the class or attribute constraints
    pub rejected: HashSet<RecordId>,
    /// IDs queued for processing, popped newest-first
    pub pending: Vec<RecordId>,
    /// Link fact lines parked until their target ID is accepted
    pub pending_links: HashMap<RecordId, Vec<String>>,
}

impl KindState {
    /// Whether this ID has already been decided either way
    pub fn seen(&self, id: RecordId) -> bool {
        self.accepted.contains(&id) || self.rejected.contains(&id)
    }

    /// Drain the pending queue, deduplicated, skipping decided IDs.
    /// A person queued as both writer and cast member is processed once.
    pub fn drain_pending(&mut self) -> Vec<RecordId> {
        let mut unique = HashSet::new();
        let drained: Vec<RecordId> = self
            .pending
            .drain(..)
            .filter(|id| !self.accepted.contains(id) && !self.rejected.contains(id))
            .filter(|id| unique.insert(*id))
            .collect();
        drained
    }
}

/// All per-kind state for one run
#[derive(Debug)]
pub struct RunState {
    kinds: HashMap<EntityKind, KindState>,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    /// Fresh state with an empty entry per entity kind
    pub fn new() -> Self {
        let mut kinds = HashMap::new();
        for kind in ENTITY_KINDS {
            kinds.insert(kind, KindState::default());
        }
        Self { kinds }
    }

    /// The state for one kind
    pub fn kind(&self, kind: EntityKind) -> &KindState {
        &self.kinds[&kind]
    }

    /// Mutable state for one kind; every kind has an entry from `new`
    pub fn kind_mut(&mut self, kind: EntityKind) -> &mut KindState {
        self.kinds.entry(kind).or_default()
    }

    /// Total accepted records across all kinds
    pub fn total_accepted(&self) -> usize {
        self.kinds.values().map(|s| s.accepted.len()).sum()
    }
}

/// Outcome summary of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// (kind, accepted count, rejected count) per entity kind, in
    /// declaration order
    pub per_kind: Vec<(EntityKind, usize, usize)>,
    /// Whether the run was cut short by the stop flag
    pub cancelled: bool,
}

impl RunReport {
    pub(crate) fn from_state(state: &RunState, cancelled: bool) -> Self {
        let per_kind = ENTITY_KINDS
            .iter()
            .map(|kind| {
                let ks = state.kind(*kind);
                (*kind, ks.accepted.len(), ks.rejected.len())
            })
            .collect();
        Self {
            per_kind,
            cancelled,
        }
    }

    /// Accepted count for one kind
    pub fn accepted(&self, kind: EntityKind) -> usize {
        self.per_kind
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, a, _)| *a)
            .unwrap_or(0)
    }

    /// Rejected count for one kind
    pub fn rejected(&self, kind: EntityKind) -> usize {
        self.per_kind
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, _, r)| *r)
            .unwrap_or(0)
    }

    /// Accepted records across all kinds
    pub fn total_accepted(&self) -> usize {
        self.per_kind.iter().map(|(_, a, _)| *a).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_pending_dedup_and_skip() {
        let mut state = KindState::default();
        state.accepted.insert(RecordId::new(1));
        state.rejected.insert(RecordId::new(2));
        state.pending = vec![
            RecordId::new(1),
            RecordId::new(2),
            RecordId::new(3),
            RecordId::new(3),
            RecordId::new(4),
        ];
        assert_eq!(
            state.drain_pending(),
            vec![RecordId::new(3), RecordId::new(4)]
        );
        assert!(state.pending.is_empty());
    }

    #[test]
    fn test_report_counts() {
        let mut state = RunState::new();
        state.kind_mut(EntityKind::Work).accepted.insert(RecordId::new(1));
        state.kind_mut(EntityKind::Work).rejected.insert(RecordId::new(2));
        state
            .kind_mut(EntityKind::Person)
            .accepted
            .insert(RecordId::new(9));
        let report = RunReport::from_state(&state, false);
        assert_eq!(report.accepted(EntityKind::Work), 1);
        assert_eq!(report.rejected(EntityKind::Work), 1);
        assert_eq!(report.total_accepted(), 2);
        assert!(!report.cancelled);
    }
}
