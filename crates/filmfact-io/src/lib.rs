//! Filmfact infrastructure layer
//!
//! File-backed implementations of the `filmfact-domain` collaborator traits:
//!
//! - [`JsonRecordSource`] reads a JSON database snapshot and serves it as a
//!   [`RecordSource`](filmfact_domain::RecordSource)
//! - [`FileFactSink`] appends generated fact text to a file opened at run
//!   start
//!
//! # Examples
//!
//! ```no_run
//! use filmfact_io::{FileFactSink, JsonRecordSource};
//!
//! let source = JsonRecordSource::open("snapshot.json").unwrap();
//! let sink = FileFactSink::create("facts.pl").unwrap();
//! // Hand both to the generation engine
//! ```

#![warn(missing_docs)]

mod error;
mod sink;
mod source;

pub use error::IoError;
pub use sink::FileFactSink;
pub use source::JsonRecordSource;
