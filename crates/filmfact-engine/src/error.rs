//! Error types for generation runs

use thiserror::Error;

/// Errors that abort a generation run
///
/// Source failures are deliberately absent: a record source that stops
/// yielding candidates or records means exhaustion, and partial output is a
/// valid result. A sink that stops accepting writes is fatal because the
/// output file would be silently incomplete.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No sub-kind of the root entity kind is selected
    #[error("No sub-kinds selected for {0}")]
    NoSubKinds(String),

    /// The fact sink rejected a write
    #[error("Sink write failed: {0}")]
    Sink(String),
}
