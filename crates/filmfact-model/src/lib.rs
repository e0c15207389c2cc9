//! Filmfact Domain Model
//!
//! The declarative half of the extractor: attribute tables, sub-kind
//! taxonomies, and link tables for the four entity kinds, plus the
//! constraint evaluation that decides acceptance. The engine crate walks
//! these declarations; nothing here performs I/O.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod attribute;
pub mod catalog;
pub mod link;

pub use attribute::{AttributeDef, DatePart, Formatter};
pub use catalog::{EntityCatalog, SubKindDef, COUNTRIES, GENRES, LANGUAGES};
pub use link::{link_tables, LinkKindDef, LinkTable};

use filmfact_domain::EntityKind;

/// The complete domain declaration for one run: all four entity catalogs
/// and every directed link table.
#[derive(Debug, Clone)]
pub struct Model {
    /// Work (title) catalog
    pub work: EntityCatalog,
    /// Person catalog
    pub person: EntityCatalog,
    /// Organization (company) catalog
    pub organization: EntityCatalog,
    /// Role (character) catalog
    pub role: EntityCatalog,
    /// Directed link tables
    pub links: Vec<LinkTable>,
}

impl Model {
    /// The standard model with default sub-kind selections and all links
    /// disabled
    pub fn standard() -> Self {
        Self {
            work: EntityCatalog::work(),
            person: EntityCatalog::person(),
            organization: EntityCatalog::organization(),
            role: EntityCatalog::role(),
            links: link_tables(),
        }
    }

    /// The catalog for one entity kind
    pub fn catalog(&self, kind: EntityKind) -> &EntityCatalog {
        match kind {
            EntityKind::Work => &self.work,
            EntityKind::Person => &self.person,
            EntityKind::Organization => &self.organization,
            EntityKind::Role => &self.role,
        }
    }

    /// Mutable access to one kind's catalog
    pub fn catalog_mut(&mut self, kind: EntityKind) -> &mut EntityCatalog {
        match kind {
            EntityKind::Work => &mut self.work,
            EntityKind::Person => &mut self.person,
            EntityKind::Organization => &mut self.organization,
            EntityKind::Role => &mut self.role,
        }
    }

    /// Link tables whose source is the given kind and which have at least
    /// one enabled link kind
    pub fn outbound_links(&self, kind: EntityKind) -> Vec<&LinkTable> {
        self.links
            .iter()
            .filter(|table| table.source == kind && table.any_enabled())
            .collect()
    }

    /// Enable a link kind between two entity kinds; `false` when the pair
    /// or the name is not declared
    pub fn enable_link(&mut self, source: EntityKind, target: EntityKind, name: &str) -> bool {
        match self
            .links
            .iter_mut()
            .find(|table| table.source == source && table.target == target)
        {
            Some(table) => table.set_kind(name, true),
            None => false,
        }
    }
}
