//! Filmfact Generation Engine
//!
//! Drives a configured [`filmfact_model::Model`] against a record source:
//! pulls root candidates until the accepted quota is met, validates each
//! record against its catalog, writes fact blocks to the sink, and walks
//! enabled links depth-first to pull in referenced entities.
//!
//! # Overview
//!
//! - **Quota loop**: batched candidate requests sized to the remaining
//!   quota, with a bounded number of refill rounds.
//! - **Link traversal**: full enumeration of every discovered linked ID,
//!   deduplicated, with a visited-kinds cycle guard.
//! - **Forward references**: a link fact is parked under its target ID and
//!   written only once the target itself is accepted.
//! - **Cancellation**: a shared [`std::sync::atomic::AtomicBool`] checked
//!   between records; output written so far stays valid.
//!
//! # Usage
//!
//! ```no_run
//! use filmfact_engine::{Engine, GenerationConfig};
//! use filmfact_io::{FileFactSink, JsonRecordSource};
//! use filmfact_model::Model;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut model = Model::standard();
//! model.enable_link(
//!     filmfact_domain::EntityKind::Work,
//!     filmfact_domain::EntityKind::Person,
//!     "cast",
//! );
//!
//! let config = GenerationConfig {
//!     quota: 100,
//!     ..Default::default()
//! };
//! let engine = Engine::new(model, config);
//!
//! let mut source = JsonRecordSource::open("snapshot.json")?;
//! let mut sink = FileFactSink::create("facts.pl")?;
//! let report = engine.run(&mut source, &mut sink, &mut ())?;
//! println!("accepted {} records", report.total_accepted());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod engine;
mod error;
mod manifest;
mod progress;
mod state;

pub use config::GenerationConfig;
pub use engine::Engine;
pub use error::EngineError;
pub use manifest::render_manifest;
pub use progress::ProgressObserver;
pub use state::{KindState, RunReport, RunState};
