//! Tolerant parsing for vendor-authored aircraft.cfg files.
//!
//! aircraft.cfg is an INI-like format, but across thousands of third-party
//! packages there is no grammar to rely on: stray comments, unbalanced
//! quotes, and malformed headers are routine. These parsers are targeted
//! key/value extractors, deliberately not a general INI library, so that
//! malformed input degrades to missing fields instead of a parse failure.
//!
//! - [`parse_config_value`]: reduce one `key = value` fragment to its
//!   semantic value (whitespace, inline comments, surrounding quotes).
//! - [`parse_variants`] / [`parse_variants_str`]: scan a whole file into
//!   one [`AircraftVariant`] per `[FLTSIM.n]` section, each inheriting the
//!   `[GENERAL]` state in effect when it was finalized.

mod aircraft;
mod value;

pub use aircraft::{parse_variants, parse_variants_str, AircraftVariant};
pub use value::parse_config_value;
