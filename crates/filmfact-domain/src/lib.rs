//! Filmfact Domain Layer
//!
//! This crate contains the core data model for filmfact. It has no heavy
//! external dependencies and defines the fundamental types and trait
//! interfaces that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Raw Record**: a field-name to value mapping fetched from the database
//! - **Fact**: one emitted Prolog line (`predicate(arg, ...).`)
//! - **Entity Kind**: a top-level record category (Work, Person, ...)
//! - **Constraint**: an acceptance gate over an attribute's extracted values
//!
//! ## Architecture
//!
//! Infrastructure implementations (record sources, fact sinks) live in other
//! crates behind the trait definitions in [`traits`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod constraint;
pub mod entity;
pub mod fact;
pub mod month;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use constraint::{Constraint, ConstraintSlot, Extraction};
pub use entity::{EntityKind, ENTITY_KINDS};
pub use fact::{esc, fact_line, Term};
pub use month::Month;
pub use record::{FieldValue, RawRecord, RecordId};
pub use traits::{CandidateRequest, FactSink, RecordSource};
