//! Top-level entity kind identity
//!
//! The four root categories of the film database. The full catalog (sub-kind
//! taxonomy, attribute sets, link tables) lives in `filmfact-model`; this
//! enum is the stable identity used at the trait boundary and in fact keys.

use std::fmt;

/// A top-level record category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// A creative work (movie, series, episode, ...)
    Work,
    /// A person (cast or crew)
    Person,
    /// A company involved in a work
    Organization,
    /// A fictional character
    Role,
}

/// All entity kinds
pub const ENTITY_KINDS: [EntityKind; 4] = [
    EntityKind::Work,
    EntityKind::Person,
    EntityKind::Organization,
    EntityKind::Role,
];

impl EntityKind {
    /// Key prefix used in fact identifiers (`t100296`, `p1003290`, ...)
    ///
    /// The prefixes are fixed for compatibility with downstream consumers of
    /// existing fact files.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            EntityKind::Work => "t",
            EntityKind::Person => "p",
            EntityKind::Organization => "co",
            EntityKind::Role => "ch",
        }
    }

    /// Lowercase predicate name of the root identity fact (`work(t1).`)
    pub fn fact_name(&self) -> &'static str {
        match self {
            EntityKind::Work => "work",
            EntityKind::Person => "person",
            EntityKind::Organization => "organization",
            EntityKind::Role => "role",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Work => "Work",
            EntityKind::Person => "Person",
            EntityKind::Organization => "Organization",
            EntityKind::Role => "Role",
        }
    }

    /// Parse a kind from its display or fact name, case-insensitively
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            "work" => Some(EntityKind::Work),
            "person" => Some(EntityKind::Person),
            "organization" => Some(EntityKind::Organization),
            "role" => Some(EntityKind::Role),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
