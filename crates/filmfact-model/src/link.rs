//! Link catalog
//!
//! Directed relationship declarations between entity kinds. Each
//! [`LinkTable`] covers one ordered (source, target) pair and enumerates the
//! named link kinds valid for it. Link facts reference both entities by
//! final key, so the engine parks the formatted line under the target ID
//! until the target itself is accepted.

use filmfact_domain::{EntityKind, RawRecord, RecordId, Term};

/// One named relationship within a [`LinkTable`]
#[derive(Debug, Clone)]
pub struct LinkKindDef {
    /// The relationship name as found in the record (`"remake of"`)
    pub name: &'static str,
    /// Whether this link kind is traversed
    pub enabled: bool,
}

/// All link kinds declared for one ordered (source, target) kind pair
#[derive(Debug, Clone)]
pub struct LinkTable {
    /// The owning side of the relationship
    pub source: EntityKind,
    /// The referenced side
    pub target: EntityKind,
    /// Sub-table the link fields are nested under, if any
    /// (work-to-work links live under `connections`)
    pub nested: Option<&'static str>,
    /// The declared link kinds, all disabled until selected for a run
    pub kinds: Vec<LinkKindDef>,
}

impl LinkTable {
    fn new(
        source: EntityKind,
        target: EntityKind,
        nested: Option<&'static str>,
        names: &[&'static str],
    ) -> Self {
        Self {
            source,
            target,
            nested,
            kinds: names
                .iter()
                .map(|name| LinkKindDef {
                    name,
                    enabled: false,
                })
                .collect(),
        }
    }

    /// Toggle a link kind by name; `false` when the table has no such kind
    pub fn set_kind(&mut self, name: &str, enabled: bool) -> bool {
        match self.kinds.iter_mut().find(|k| k.name == name) {
            Some(kind) => {
                kind.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Whether any link kind in this table is selected
    pub fn any_enabled(&self) -> bool {
        self.kinds.iter().any(|k| k.enabled)
    }

    /// Target record IDs for one link kind of one source record, in
    /// field order. An absent field is an empty list, not an error.
    pub fn targets(&self, record: &RawRecord, kind: &str) -> Vec<RecordId> {
        let items = match self.nested {
            Some(sub) => record
                .get(sub)
                .and_then(|value| value.as_table())
                .and_then(|table| table.get(kind))
                .and_then(|value| value.as_list()),
            None => record.list(kind),
        };
        items
            .unwrap_or_default()
            .iter()
            .filter_map(|item| item.parse::<u64>().ok())
            .map(RecordId::new)
            .collect()
    }

    /// The formatted link fact from source to target.
    ///
    /// `position` is the 1-based enumeration index; only cast links carry it
    /// as a third argument.
    pub fn link_fact(
        &self,
        kind: &str,
        source_id: RecordId,
        target_id: RecordId,
        position: usize,
    ) -> String {
        let predicate = kind.replace(' ', "_");
        let source = Term::key(self.source.key_prefix(), source_id);
        let target = Term::key(self.target.key_prefix(), target_id);
        if kind == "cast" {
            filmfact_domain::fact_line(&predicate, &[source, target, Term::Int(position as i64)])
        } else {
            filmfact_domain::fact_line(&predicate, &[source, target])
        }
    }
}

const WORK_WORK: &[&str] = &[
    "follows",
    "followed by",
    "remake of",
    "remade as",
    "references",
    "referenced in",
    "spoofs",
    "spoofed in",
    "features",
    "featured in",
    "spin off from",
    "spin off",
    "version of",
    "similar to",
    "edited into",
    "edited from",
    "alternate language version of",
];

const WORK_PERSON: &[&str] = &[
    "cast",
    "producer",
    "writer",
    "cinematographer",
    "composer",
    "costume designer",
    "director",
    "editor",
    "miscellaneous crew",
    "production designer",
    "guest",
];

const PERSON_WORK: &[&str] = &[
    "actor",
    "actress",
    "producer",
    "writer",
    "cinematographer",
    "composer",
    "costume designer",
    "director",
    "editor",
    "miscellaneous crew",
    "production designer",
    "guest",
];

const WORK_ORGANIZATION: &[&str] = &[
    "distributors",
    "production companies",
    "special effects companies",
    "miscellaneous companies",
];

const ROLE_WORK: &[&str] = &["filmography"];

/// Every directed link table the domain declares
pub fn link_tables() -> Vec<LinkTable> {
    vec![
        LinkTable::new(
            EntityKind::Work,
            EntityKind::Work,
            Some("connections"),
            WORK_WORK,
        ),
        LinkTable::new(EntityKind::Work, EntityKind::Person, None, WORK_PERSON),
        LinkTable::new(
            EntityKind::Work,
            EntityKind::Organization,
            None,
            WORK_ORGANIZATION,
        ),
        LinkTable::new(EntityKind::Person, EntityKind::Work, None, PERSON_WORK),
        LinkTable::new(
            EntityKind::Organization,
            EntityKind::Work,
            None,
            WORK_ORGANIZATION,
        ),
        LinkTable::new(EntityKind::Role, EntityKind::Work, None, ROLE_WORK),
    ]
}
