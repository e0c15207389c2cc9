//! Error type for the field parsers

use thiserror::Error;

/// A field value did not match the expected grammar.
///
/// Callers treat this as "value unavailable" for the attribute in question;
/// it never aborts processing of a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A date needed more parts than the text provided
    #[error("incomplete date: {0}")]
    IncompleteDate(String),

    /// The text is not a recognized date range
    #[error("not a date range: {0}")]
    NotADateRange(String),

    /// The height notation was not recognized
    #[error("unrecognized height: {0}")]
    BadHeight(String),

    /// No digits found where an amount was expected
    #[error("no amount in: {0}")]
    NoAmount(String),

    /// A tagged field had no tag separator
    #[error("missing tag separator in: {0}")]
    MissingTag(String),

    /// A multi-part record was missing required segments
    #[error("missing segment in: {0}")]
    MissingSegment(String),
}
