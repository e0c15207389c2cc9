//! Filmfact Field Parsers
//!
//! Pure functions that turn one raw database string field into a typed value.
//! The source data is scraped free text with decades of inconsistency, so
//! every grammar here is tolerant: a parse failure means "value unavailable"
//! for the attribute, never a fatal error.
//!
//! Grammars covered:
//!
//! - partial dates (`"1 August 1999"`, `"June 1999"`, `"1999"`)
//! - date ranges (`"19 September 2010 - 10 January 2011"`)
//! - person heights (`"168 cm"`, `"5' 2\""`, `"6'"`)
//! - money amounts (`"AUD 1,000"`, `"$1,000"`)
//! - country-tagged fields (`"UK:15::(re-rating) (2006)"`)
//! - business gross/rental records, with and without dates and screen counts
//! - marriage records (`"'Jennifer Abram' (15 October 1997 - present); 2 children"`)
//! - birthplace strings (`"Brooklyn, New York City, New York, USA"`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod business;
pub mod date;
pub mod error;
pub mod height;
pub mod location;
pub mod money;
pub mod spouse;
pub mod tagged;

pub use business::{
    parse_gross, parse_rental, parse_weekend_gross, GrossRecord, RentalRecord, WeekendGrossRecord,
};
pub use date::{parse_date, parse_date_range, DateParts};
pub use error::ParseError;
pub use height::parse_height;
pub use location::{location_part, LocationPart};
pub use money::parse_money;
pub use spouse::{parse_spouse, SpouseRecord};
pub use tagged::{parse_country_tagged, parse_runtime, TaggedField};
