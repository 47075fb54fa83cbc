//! Fixed-column category line decoding.
//!
//! # Layout
//!
//! Positions are 1-indexed characters. Latin-1 input keeps one byte per
//! character, so these match the byte columns of the source files.
//!
//! | Columns | Field          | Notes                                   |
//! |---------|----------------|-----------------------------------------|
//! | 1-3     | parent index   | blank for root categories               |
//! | 4-7     | category index | required unsigned integer               |
//! | 10-59   | name           | surrounding whitespace trimmed          |
//! | 61-     | code spec      | comma-separated, trailing blanks cut    |
//!
//! Lines that are blank or whose first non-blank character is `;` carry no
//! category and are skipped before any column is looked at.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::code::{Code, CodeRange, CodeToken, parse_code_token};
use crate::error::{CnvError, Result};

const PARENT_COLUMNS: Range<usize> = 0..3;
const INDEX_COLUMNS: Range<usize> = 3..7;
const NAME_COLUMNS: Range<usize> = 9..59;
const CODES_START: usize = 60;

/// Comment marker.
pub const COMMENT_PREFIX: char = ';';

/// One decoded category line, before continuation lines are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCategoryLine {
    /// 1-based line number in the source document.
    pub line_number: usize,
    /// Category index.
    pub idx: u32,
    /// Parent category index, `None` for roots.
    pub parent_idx: Option<u32>,
    /// Display name.
    pub name: String,
    /// Code specification as written (trailing whitespace removed).
    pub codes_spec: String,
    /// Literal codes in declaration order.
    pub codes: Vec<Code>,
    /// Ranges in declaration order.
    pub ranges: Vec<CodeRange>,
}

impl RawCategoryLine {
    /// Decode one non-header line.
    ///
    /// Returns `Ok(None)` for blank and comment lines.
    pub fn decode(line: &str, line_number: usize, letter_codes: bool) -> Result<Option<Self>> {
        if is_skippable(line) {
            return Ok(None);
        }

        let mut chars: Vec<char> = line.chars().collect();
        if chars.len() < CODES_START {
            chars.resize(CODES_START, ' ');
        }

        let parent_field = column(&chars, PARENT_COLUMNS);
        let parent_idx = match parent_field.trim() {
            "" => None,
            value => Some(
                value
                    .parse::<u32>()
                    .map_err(|_| CnvError::malformed_line(line_number, "parent index", value))?,
            ),
        };

        let index_field = column(&chars, INDEX_COLUMNS);
        let idx = index_field
            .trim()
            .parse::<u32>()
            .map_err(|_| CnvError::malformed_line(line_number, "category index", &index_field))?;

        let name = column(&chars, NAME_COLUMNS).trim().to_string();
        let codes_spec = chars[CODES_START..]
            .iter()
            .collect::<String>()
            .trim_end()
            .to_string();
        let (codes, ranges) = parse_code_spec(&codes_spec, letter_codes, line_number)?;

        Ok(Some(Self {
            line_number,
            idx,
            parent_idx,
            name,
            codes_spec,
            codes,
            ranges,
        }))
    }

    /// Returns true for root lines.
    pub fn is_root(&self) -> bool {
        self.parent_idx.is_none()
    }
}

/// Returns true if a line carries no category (blank or comment).
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX)
}

/// Split a code specification into literal codes and ranges.
///
/// An empty specification yields nothing; parent rows often leave the code
/// column blank.
pub fn parse_code_spec(
    spec: &str,
    letter_codes: bool,
    line: usize,
) -> Result<(Vec<Code>, Vec<CodeRange>)> {
    let mut codes = Vec::new();
    let mut ranges = Vec::new();
    if spec.is_empty() {
        return Ok((codes, ranges));
    }

    for token in spec.split(',') {
        match parse_code_token(token, letter_codes, line)? {
            CodeToken::Code(code) => codes.push(code),
            CodeToken::Range(range) => ranges.push(range),
        }
    }
    Ok((codes, ranges))
}

fn column(chars: &[char], range: Range<usize>) -> String {
    chars
        .get(range)
        .map(|slice| slice.iter().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_int_line() {
        let raw = RawCategoryLine::decode(
            "      3  Ignorado                                           0,3-9",
            4,
            false,
        )
        .unwrap()
        .expect("category line");
        assert_eq!(raw.line_number, 4);
        assert_eq!(raw.idx, 3);
        assert_eq!(raw.parent_idx, None);
        assert_eq!(raw.name, "Ignorado");
        assert_eq!(raw.codes_spec, "0,3-9");
        assert_eq!(raw.codes, vec![Code::Int(0)]);
        assert_eq!(raw.ranges, vec![CodeRange::int(3, 9)]);
    }

    #[test]
    fn test_decode_blank_code_and_range() {
        let line = "     28  00 Ignorado/exterior                                 ,00-99";
        let raw = RawCategoryLine::decode(line, 2, false)
            .unwrap()
            .expect("category line");
        assert_eq!(raw.idx, 28);
        assert_eq!(raw.parent_idx, None);
        assert_eq!(raw.name, "00 Ignorado/exterior");
        assert_eq!(raw.codes_spec, "  ,00-99");
        assert_eq!(raw.codes, vec![Code::from("  ")]);
        assert_eq!(raw.ranges, vec![CodeRange::int(0, 99)]);

        let raw = RawCategoryLine::decode(line, 2, true)
            .unwrap()
            .expect("category line");
        assert_eq!(raw.codes, vec![Code::from("  ")]);
        assert_eq!(raw.ranges, vec![CodeRange::str("00", "99")]);
    }

    #[test]
    fn test_decode_parent_column() {
        let raw = RawCategoryLine::decode(
            "  1   4  Sao Paulo capital                                  355030",
            9,
            false,
        )
        .unwrap()
        .expect("category line");
        assert_eq!(raw.parent_idx, Some(1));
        assert_eq!(raw.idx, 4);
        assert_eq!(raw.name, "Sao Paulo capital");
        assert_eq!(raw.codes, vec![Code::Int(355030)]);
        assert!(!raw.is_root());
    }

    #[test]
    fn test_decode_accented_name_keeps_columns() {
        let raw = RawCategoryLine::decode(
            "      1  11 Rondônia                                        11",
            2,
            false,
        )
        .unwrap()
        .expect("category line");
        assert_eq!(raw.name, "11 Rondônia");
        assert_eq!(raw.codes, vec![Code::Int(11)]);
    }

    #[test]
    fn test_decode_short_line_without_codes() {
        let raw = RawCategoryLine::decode("     10  Regiao Norte", 3, false)
            .unwrap()
            .expect("category line");
        assert_eq!(raw.idx, 10);
        assert_eq!(raw.name, "Regiao Norte");
        assert_eq!(raw.codes_spec, "");
        assert!(raw.codes.is_empty());
        assert!(raw.ranges.is_empty());
    }

    #[test]
    fn test_skip_blank_and_comment_lines() {
        assert_eq!(RawCategoryLine::decode("", 2, false).unwrap(), None);
        assert_eq!(RawCategoryLine::decode("     \t", 2, false).unwrap(), None);
        assert_eq!(
            RawCategoryLine::decode(" ; Regiões do Brasil", 2, false).unwrap(),
            None
        );
        assert_eq!(
            RawCategoryLine::decode(";  1  this is not parsed", 2, false).unwrap(),
            None
        );
    }

    #[test]
    fn test_malformed_index_is_an_error() {
        let err = RawCategoryLine::decode("     ab  Nome                                               1", 6, false)
            .unwrap_err();
        assert!(matches!(
            err,
            CnvError::MalformedCategoryLine {
                line: 6,
                field: "category index",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_parent_is_an_error() {
        let err = RawCategoryLine::decode(" x    1  Nome                                               1", 8, false)
            .unwrap_err();
        assert!(matches!(
            err,
            CnvError::MalformedCategoryLine {
                line: 8,
                field: "parent index",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_code_reports_line() {
        let err = RawCategoryLine::decode(
            "      1  Nome                                               1,,2",
            11,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CnvError::InvalidCode { line: 11, .. }));
    }

    #[test]
    fn test_parse_code_spec_splits_codes_and_ranges() {
        let (codes, ranges) = parse_code_spec("AM,PA,A0-A9", true, 1).unwrap();
        assert_eq!(codes, vec![Code::from("AM"), Code::from("PA")]);
        assert_eq!(ranges, vec![CodeRange::str("A0", "A9")]);

        let (codes, ranges) = parse_code_spec("", false, 1).unwrap();
        assert!(codes.is_empty());
        assert!(ranges.is_empty());
    }
}
