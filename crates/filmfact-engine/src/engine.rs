//! Quota-driven graph traversal
//!
//! The engine pulls candidate IDs for the root entity kind until the quota
//! of accepted records is met or the source runs dry, then walks the enabled
//! link tables depth-first, validating and emitting every linked record it
//! discovered along the way. All run state is local to one `run` call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use filmfact_domain::{CandidateRequest, EntityKind, FactSink, RecordId, RecordSource};
use filmfact_model::Model;
use tracing::{debug, info, warn};

use crate::{EngineError, GenerationConfig, ProgressObserver, RunReport, RunState};

/// The generation engine for one configured model
///
/// # Examples
///
/// ```no_run
/// use filmfact_engine::{Engine, GenerationConfig};
/// use filmfact_io::{FileFactSink, JsonRecordSource};
/// use filmfact_model::Model;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = Engine::new(Model::standard(), GenerationConfig::default());
///
/// let mut source = JsonRecordSource::open("snapshot.json")?;
/// let mut sink = FileFactSink::create("facts.pl")?;
/// let report = engine.run(&mut source, &mut sink, &mut ())?;
/// println!("accepted {} records", report.total_accepted());
/// # Ok(())
/// # }
/// ```
pub struct Engine {
    model: Model,
    config: GenerationConfig,
    stop: Arc<AtomicBool>,
}

impl Engine {
    /// New engine over a configured model
    pub fn new(model: Model, config: GenerationConfig) -> Self {
        Self {
            model,
            config,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The configured model
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// The run configuration
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// A handle to the cooperative stop flag. Setting it lets the record
    /// in flight finish; nothing further is pulled and completed output
    /// stays valid.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    /// Execute one generation run.
    ///
    /// Source failures degrade to exhaustion and yield a partial (valid)
    /// result; sink failures abort with [`EngineError::Sink`].
    pub fn run<S, K, P>(
        &self,
        source: &mut S,
        sink: &mut K,
        progress: &mut P,
    ) -> Result<RunReport, EngineError>
    where
        S: RecordSource,
        K: FactSink,
        S::Error: std::fmt::Display,
        K::Error: std::fmt::Display,
        P: ProgressObserver,
    {
        self.config.validate()?;
        let root = self.config.root;
        let catalog = self.model.catalog(root);
        if catalog.enabled_discriminators().is_empty() {
            return Err(EngineError::NoSubKinds(root.name().to_string()));
        }

        info!(
            root = root.name(),
            quota = self.config.quota,
            random = self.config.random,
            "starting generation run"
        );

        let mut state = RunState::new();
        let mut offset = 0usize;
        let mut rounds = 0usize;
        let mut exhausted = false;

        while state.kind(root).accepted.len() < self.config.quota
            && !exhausted
            && !self.stopped()
        {
            let remaining = self.config.quota - state.kind(root).accepted.len();
            rounds += 1;
            if rounds > self.config.max_refill_rounds {
                warn!(rounds, "refill round cap reached, giving up on quota");
                break;
            }

            let request = CandidateRequest {
                classes: catalog
                    .enabled_discriminators()
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                offset,
                limit: remaining,
                random: self.config.random,
                min_votes: catalog.min_votes_hint(),
            };
            let batch = match source.enumerate_candidates(root, &request) {
                Ok(batch) => batch,
                Err(e) => {
                    warn!(error = %e, "candidate enumeration failed, treating as exhausted");
                    Vec::new()
                }
            };
            if !self.config.random {
                offset += remaining;
            }
            debug!(round = rounds, batch = batch.len(), offset, "candidate batch");

            {
                let ks = state.kind_mut(root);
                for id in batch {
                    if !ks.seen(id) {
                        ks.pending.push(id);
                    }
                }
            }
            if state.kind(root).pending.is_empty() {
                exhausted = true;
            }

            while let Some(id) = state.kind_mut(root).pending.pop() {
                if self.stopped() {
                    break;
                }
                if state.kind(root).seen(id) {
                    continue;
                }
                self.process_record(root, id, source, sink, &mut state, progress)?;
                if state.kind(root).accepted.len() >= self.config.quota {
                    break;
                }
            }
        }

        if exhausted {
            info!(
                accepted = state.kind(root).accepted.len(),
                quota = self.config.quota,
                "source exhausted before quota"
            );
        }

        if !self.stopped() {
            let mut visited = vec![root];
            self.process_linked(root, &mut visited, source, sink, &mut state, progress)?;
        }

        let report = RunReport::from_state(&state, self.stopped());
        info!(
            accepted = report.total_accepted(),
            cancelled = report.cancelled,
            "generation run finished"
        );
        Ok(report)
    }

    /// Validate one record and, on acceptance, write its facts and discover
    /// its outbound links. Returns whether the record was accepted.
    fn process_record<S, K, P>(
        &self,
        kind: EntityKind,
        id: RecordId,
        source: &mut S,
        sink: &mut K,
        state: &mut RunState,
        progress: &mut P,
    ) -> Result<bool, EngineError>
    where
        S: RecordSource,
        K: FactSink,
        S::Error: std::fmt::Display,
        K::Error: std::fmt::Display,
        P: ProgressObserver,
    {
        let record = match source.fetch(kind, id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(kind = kind.name(), %id, "record missing from source");
                self.reject(kind, id, state);
                return Ok(false);
            }
            Err(e) => {
                warn!(kind = kind.name(), %id, error = %e, "record fetch failed");
                self.reject(kind, id, state);
                return Ok(false);
            }
        };

        let catalog = self.model.catalog(kind);
        if !catalog.accept(id, &record) {
            debug!(kind = kind.name(), %id, "constraints rejected record");
            self.reject(kind, id, state);
            return Ok(false);
        }

        // inbound link facts parked for this ID go out just before its block
        let mut blob = String::new();
        if let Some(lines) = state.kind_mut(kind).pending_links.remove(&id) {
            for line in lines {
                blob.push_str(&line);
            }
        }
        blob.push('\n');
        blob.push_str(&catalog.entity_facts(id, &record));
        blob.push('\n');
        sink.append(&blob)
            .map_err(|e| EngineError::Sink(e.to_string()))?;
        state.kind_mut(kind).accepted.insert(id);

        for table in self.model.outbound_links(kind) {
            for link in table.kinds.iter().filter(|k| k.enabled) {
                for (i, target_id) in table.targets(&record, link.name).into_iter().enumerate() {
                    let line = table.link_fact(link.name, id, target_id, i + 1);
                    let target_state = state.kind_mut(table.target);
                    if target_state.accepted.contains(&target_id) {
                        // target already emitted, the fact can go straight out
                        sink.append(&line)
                            .map_err(|e| EngineError::Sink(e.to_string()))?;
                    } else if !target_state.rejected.contains(&target_id) {
                        target_state.pending.push(target_id);
                        target_state
                            .pending_links
                            .entry(target_id)
                            .or_default()
                            .push(line);
                    }
                    // links to rejected targets are dropped
                }
            }
        }

        progress.record_accepted(kind, id, state.total_accepted());
        Ok(true)
    }

    fn reject(&self, kind: EntityKind, id: RecordId, state: &mut RunState) {
        let ks = state.kind_mut(kind);
        ks.rejected.insert(id);
        // link facts waiting on this record will never be valid
        ks.pending_links.remove(&id);
    }

    /// Depth-first pass over the link graph: full enumeration of every
    /// pending linked ID, no quota. A kind already on the recursion path is
    /// not re-entered.
    fn process_linked<S, K, P>(
        &self,
        kind: EntityKind,
        visited: &mut Vec<EntityKind>,
        source: &mut S,
        sink: &mut K,
        state: &mut RunState,
        progress: &mut P,
    ) -> Result<(), EngineError>
    where
        S: RecordSource,
        K: FactSink,
        S::Error: std::fmt::Display,
        K::Error: std::fmt::Display,
        P: ProgressObserver,
    {
        for table in self.model.outbound_links(kind) {
            let target = table.target;
            if visited.contains(&target) {
                continue;
            }
            let ids = state.kind_mut(target).drain_pending();
            info!(kind = target.name(), count = ids.len(), "populating linked entities");
            for id in ids {
                if self.stopped() {
                    return Ok(());
                }
                self.process_record(target, id, source, sink, state, progress)?;
            }
            visited.push(target);
            self.process_linked(target, visited, source, sink, state, progress)?;
            visited.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filmfact_domain::{FieldValue, RawRecord};
    use std::collections::BTreeMap;
    use std::collections::HashMap;

    /// In-memory source with deterministic offset paging
    struct MemorySource {
        records: HashMap<EntityKind, Vec<(RecordId, RawRecord)>>,
    }

    impl MemorySource {
        fn new() -> Self {
            Self {
                records: HashMap::new(),
            }
        }

        fn add(&mut self, kind: EntityKind, id: u64, record: RawRecord) {
            self.records
                .entry(kind)
                .or_default()
                .push((RecordId::new(id), record));
        }
    }

    impl RecordSource for MemorySource {
        type Error = String;

        fn enumerate_candidates(
            &mut self,
            kind: EntityKind,
            request: &CandidateRequest,
        ) -> Result<Vec<RecordId>, Self::Error> {
            let all = self.records.get(&kind).map(Vec::as_slice).unwrap_or(&[]);
            Ok(all
                .iter()
                .map(|(id, _)| *id)
                .skip(request.offset)
                .take(request.limit)
                .collect())
        }

        fn fetch(
            &mut self,
            kind: EntityKind,
            id: RecordId,
        ) -> Result<Option<RawRecord>, Self::Error> {
            Ok(self
                .records
                .get(&kind)
                .and_then(|records| records.iter().find(|(rid, _)| *rid == id))
                .map(|(_, record)| record.clone()))
        }
    }

    /// Sink capturing everything in a string
    #[derive(Default)]
    struct StringSink {
        out: String,
    }

    impl FactSink for StringSink {
        type Error = String;

        fn append(&mut self, lines: &str) -> Result<(), Self::Error> {
            self.out.push_str(lines);
            Ok(())
        }
    }

    /// Sink that always fails
    struct BrokenSink;

    impl FactSink for BrokenSink {
        type Error = String;

        fn append(&mut self, _lines: &str) -> Result<(), Self::Error> {
            Err("disk full".to_string())
        }
    }

    fn movie(title: &str, year: &str, cast: &[u64]) -> RawRecord {
        let mut record = RawRecord::new()
            .with("kind", "movie")
            .with("title", title)
            .with("year", year);
        if !cast.is_empty() {
            record.insert(
                "cast",
                FieldValue::List(cast.iter().map(|id| id.to_string()).collect()),
            );
        }
        record
    }

    fn actor(name: &str) -> RawRecord {
        RawRecord::new()
            .with("name", name)
            .with("actor", vec!["1".to_string()])
    }

    fn engine_with_quota(quota: usize) -> Engine {
        let config = GenerationConfig {
            quota,
            ..Default::default()
        };
        Engine::new(Model::standard(), config)
    }

    #[test]
    fn test_quota_is_respected() {
        let mut source = MemorySource::new();
        for id in 1..=20 {
            source.add(EntityKind::Work, id, movie(&format!("Film {id}"), "1990", &[]));
        }
        let engine = engine_with_quota(5);
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Work), 5);
        assert_eq!(sink.out.matches("work(t").count(), 5);
    }

    #[test]
    fn test_exhaustion_is_partial_not_error() {
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("Only One", "1990", &[]));
        let engine = engine_with_quota(10);
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Work), 1);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_rejected_records_refill_until_quota() {
        let mut source = MemorySource::new();
        // the first two candidates are series, class-rejected by default
        source.add(EntityKind::Work, 1, RawRecord::new().with("kind", "tv series"));
        source.add(EntityKind::Work, 2, RawRecord::new().with("kind", "tv series"));
        source.add(EntityKind::Work, 3, movie("Third Time", "1990", &[]));
        let engine = engine_with_quota(1);
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Work), 1);
        assert_eq!(report.rejected(EntityKind::Work), 2);
        assert!(sink.out.contains("title_name(t3, 'Third Time').\n"));
    }

    #[test]
    fn test_refill_round_cap_terminates() {
        // a source that replays the same rejected candidate forever
        struct Replaying;
        impl RecordSource for Replaying {
            type Error = String;
            fn enumerate_candidates(
                &mut self,
                _kind: EntityKind,
                _request: &CandidateRequest,
            ) -> Result<Vec<RecordId>, Self::Error> {
                Ok(vec![RecordId::new(1)])
            }
            fn fetch(
                &mut self,
                _kind: EntityKind,
                _id: RecordId,
            ) -> Result<Option<RawRecord>, Self::Error> {
                Ok(None)
            }
        }
        let engine = engine_with_quota(5);
        let mut sink = StringSink::default();
        let report = engine.run(&mut Replaying, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Work), 0);
    }

    #[test]
    fn test_cast_link_emitted_with_person() {
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("Taxi Driver", "1976", &[9]));
        source.add(EntityKind::Person, 9, actor("Robert De Niro"));
        let mut model = Model::standard();
        model.enable_link(EntityKind::Work, EntityKind::Person, "cast");
        let engine = Engine::new(
            model,
            GenerationConfig {
                quota: 1,
                ..Default::default()
            },
        );
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Work), 1);
        assert_eq!(report.accepted(EntityKind::Person), 1);
        assert!(sink.out.contains("\nwork(t1).\nmovie(t1).\ntype(t1, 'movie').\n"));
        assert!(sink.out.contains("year(t1, 1976).\n"));
        // the parked cast fact precedes the person's own block
        assert!(sink
            .out
            .contains("cast(t1, p9, 1).\n\nperson(p9).\nperson_name(p9, 'Robert De Niro').\n"));
    }

    #[test]
    fn test_link_to_rejected_target_is_discarded() {
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("Taxi Driver", "1976", &[9]));
        // person 9 has no enabled filmography field, so the class check fails
        source.add(EntityKind::Person, 9, RawRecord::new().with("name", "Nobody"));
        let mut model = Model::standard();
        model.enable_link(EntityKind::Work, EntityKind::Person, "cast");
        let engine = Engine::new(
            model,
            GenerationConfig {
                quota: 1,
                ..Default::default()
            },
        );
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Person), 0);
        assert_eq!(report.rejected(EntityKind::Person), 1);
        assert!(!sink.out.contains("cast("));
    }

    #[test]
    fn test_shared_person_processed_once() {
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("First", "1990", &[9]));
        source.add(EntityKind::Work, 2, movie("Second", "1991", &[9]));
        source.add(EntityKind::Person, 9, actor("Busy Actor"));
        let mut model = Model::standard();
        model.enable_link(EntityKind::Work, EntityKind::Person, "cast");
        let engine = Engine::new(
            model,
            GenerationConfig {
                quota: 2,
                ..Default::default()
            },
        );
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Person), 1);
        assert_eq!(sink.out.matches("person(p9).").count(), 1);
        // both parked cast facts flush with the single person block
        assert!(sink.out.contains("cast(t1, p9, 1).\n"));
        assert!(sink.out.contains("cast(t2, p9, 1).\n"));
    }

    #[test]
    fn test_non_random_runs_are_idempotent() {
        fn build_source() -> MemorySource {
            let mut source = MemorySource::new();
            source.add(EntityKind::Work, 1, movie("First", "1990", &[9]));
            source.add(EntityKind::Work, 2, movie("Second", "1991", &[]));
            source.add(EntityKind::Person, 9, actor("Repeat Player"));
            source
        }
        fn run_once() -> String {
            let mut model = Model::standard();
            model.enable_link(EntityKind::Work, EntityKind::Person, "cast");
            let engine = Engine::new(
                model,
                GenerationConfig {
                    quota: 2,
                    ..Default::default()
                },
            );
            let mut sink = StringSink::default();
            engine.run(&mut build_source(), &mut sink, &mut ()).unwrap();
            sink.out
        }
        assert_eq!(run_once(), run_once());
    }

    #[test]
    fn test_preset_stop_flag_cancels() {
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("Never Written", "1990", &[]));
        let engine = engine_with_quota(1);
        engine.stop_flag().store(true, Ordering::Relaxed);
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert!(report.cancelled);
        assert_eq!(report.total_accepted(), 0);
        assert!(sink.out.is_empty());
    }

    #[test]
    fn test_sink_failure_is_fatal() {
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("Doomed", "1990", &[]));
        let engine = engine_with_quota(1);
        let result = engine.run(&mut source, &mut BrokenSink, &mut ());
        assert!(matches!(result, Err(EngineError::Sink(_))));
    }

    #[test]
    fn test_no_sub_kinds_is_an_error() {
        let mut model = Model::standard();
        for sk in &mut model.work.sub_kinds {
            sk.enabled = false;
        }
        let engine = Engine::new(model, GenerationConfig::default());
        let result = engine.run(&mut MemorySource::new(), &mut StringSink::default(), &mut ());
        assert!(matches!(result, Err(EngineError::NoSubKinds(_))));
    }

    #[test]
    fn test_progress_reports_after_write() {
        struct Seen(Vec<(EntityKind, u64, usize)>);
        impl ProgressObserver for Seen {
            fn record_accepted(&mut self, kind: EntityKind, id: RecordId, total: usize) {
                self.0.push((kind, id.value(), total));
            }
        }
        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, movie("One", "1990", &[]));
        source.add(EntityKind::Work, 2, movie("Two", "1991", &[]));
        let engine = engine_with_quota(2);
        let mut sink = StringSink::default();
        let mut progress = Seen(Vec::new());
        engine.run(&mut source, &mut sink, &mut progress).unwrap();
        let totals: Vec<usize> = progress.0.iter().map(|(_, _, t)| *t).collect();
        assert_eq!(totals, vec![1, 2]);
    }

    #[test]
    fn test_connections_traverse_work_links_without_recursion() {
        // a remake link parks a fact for another work; the cycle guard keeps
        // the engine from re-entering the work queue, so the fact only
        // appears if the target was accepted through the root quota
        let mut connections = BTreeMap::new();
        connections.insert(
            "remake of".to_string(),
            FieldValue::List(vec!["2".to_string()]),
        );
        let mut original = movie("Remade", "1990", &[]);
        original.insert("connections", FieldValue::Table(connections));

        let mut source = MemorySource::new();
        source.add(EntityKind::Work, 1, original);
        source.add(EntityKind::Work, 2, movie("The Remake", "2005", &[]));
        let mut model = Model::standard();
        model.enable_link(EntityKind::Work, EntityKind::Work, "remake of");
        let engine = Engine::new(
            model,
            GenerationConfig {
                quota: 2,
                ..Default::default()
            },
        );
        let mut sink = StringSink::default();
        let report = engine.run(&mut source, &mut sink, &mut ()).unwrap();
        assert_eq!(report.accepted(EntityKind::Work), 2);
        assert!(sink.out.contains("remake_of(t1, t2).\n"));
    }
}
