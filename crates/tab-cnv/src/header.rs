//! CNV header line.
//!
//! The first line of a CNV file declares the number of categories, the
//! fixed width of the codes and, optionally, an `L` marker meaning that codes
//! are letters and must never be read as integers:
//!
//! ```text
//!       5 2 L
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CnvError, Result};

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9]+)\s+([0-9]+)(?:\s+(\S+))?\s*$").expect("Invalid CNV header regex")
});

/// Marker enabling letter codes.
const LETTER_CODES_MARKER: &str = "L";

/// Format parameters declared on the first line of a CNV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnvHeader {
    /// Declared number of categories. Informational only.
    pub category_count: usize,
    /// Declared fixed width of the codes. Informational only.
    pub code_length: usize,
    /// Whether codes are read as strings only.
    pub letter_codes: bool,
}

impl CnvHeader {
    /// Parse a header line.
    pub fn parse(line: &str) -> Result<Self> {
        let caps = HEADER_REGEX
            .captures(line)
            .ok_or_else(|| CnvError::invalid_header(line))?;

        let category_count = caps[1]
            .parse()
            .map_err(|_| CnvError::invalid_header(line))?;
        let code_length = caps[2]
            .parse()
            .map_err(|_| CnvError::invalid_header(line))?;
        let letter_codes = match caps.get(3).map(|m| m.as_str()) {
            None => false,
            Some(LETTER_CODES_MARKER) => true,
            Some(_) => return Err(CnvError::invalid_header(line)),
        };

        Ok(Self {
            category_count,
            code_length,
            letter_codes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_letter_header() {
        let header = CnvHeader::parse("  5 2 L").unwrap();
        assert_eq!(
            header,
            CnvHeader {
                category_count: 5,
                code_length: 2,
                letter_codes: true,
            }
        );
    }

    #[test]
    fn test_parse_numeric_header() {
        let header = CnvHeader::parse("     28  2").unwrap();
        assert_eq!(header.category_count, 28);
        assert_eq!(header.code_length, 2);
        assert!(!header.letter_codes);

        let header = CnvHeader::parse("3 1").unwrap();
        assert_eq!(header.category_count, 3);
        assert_eq!(header.code_length, 1);
    }

    #[test]
    fn test_parse_header_tolerates_trailing_whitespace() {
        let header = CnvHeader::parse("  5 2 L  \r").unwrap();
        assert!(header.letter_codes);
    }

    #[test]
    fn test_reject_missing_numbers() {
        assert!(matches!(
            CnvHeader::parse(""),
            Err(CnvError::InvalidHeader { .. })
        ));
        assert!(matches!(
            CnvHeader::parse("   5"),
            Err(CnvError::InvalidHeader { .. })
        ));
        assert!(matches!(
            CnvHeader::parse("; comment"),
            Err(CnvError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_reject_unknown_marker() {
        assert!(matches!(
            CnvHeader::parse("  5 2 X"),
            Err(CnvError::InvalidHeader { .. })
        ));
        assert!(matches!(
            CnvHeader::parse("  5 2 LL"),
            Err(CnvError::InvalidHeader { .. })
        ));
        assert!(matches!(
            CnvHeader::parse("  5 2 l"),
            Err(CnvError::InvalidHeader { .. })
        ));
    }
}
