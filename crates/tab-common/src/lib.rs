//! Shared utilities for tabulation crates.
//!
//! This crate provides the two-digit year and month helpers used by data
//! file naming schemes (`aa` and `aamm` codes) and the line-type vocabulary
//! of DEF tabulation definitions.

pub mod dates;
pub mod def;

// Re-export commonly used types at crate root for convenience
pub use dates::{DateError, Month, Year, YearWindow, parse_date_aa, parse_date_aamm};
pub use def::{DefLineType, UnknownDefLineType};
