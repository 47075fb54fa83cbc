//! Code and range primitives.
//!
//! A CNV code specification is a comma-separated list of tokens. Each token
//! is either a literal code or an inclusive range of codes:
//!
//! | Token    | Integer mode             | Letter mode (`L` header)   |
//! |----------|--------------------------|----------------------------|
//! | `12`     | `Code::Int(12)`          | `Code::Str("12")`          |
//! | `0-9`    | `CodeRange::Int(0, 9)`   | `CodeRange::Str("0", "9")` |
//! | `SP`     | `Code::Str("SP")`        | `Code::Str("SP")`          |
//! | `A0-A9`  | `CodeRange::Str(..)`     | `CodeRange::Str(..)`       |
//!
//! Integer parsing is tried first and string parsing is the fallback, so a
//! single decoder serves numeric and alphabetic code systems.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{CnvError, Result};

static INT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid integer code regex"));

static INT_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-([0-9]+)$").expect("Invalid integer range regex"));

static STR_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^-,]+$").expect("Invalid string code regex"));

static STR_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^-,]+)-([^-,]+)$").expect("Invalid string range regex"));

/// A single classification value.
///
/// Integer and string codes never compare equal: `Code::Str("02")` is not
/// `Code::Int(2)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Code {
    /// Numeric code (integer mode only).
    Int(u64),
    /// Verbatim string code, whitespace included.
    Str(String),
}

impl Code {
    /// Returns the integer value for numeric codes.
    pub fn as_int(&self) -> Option<u64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Str(_) => None,
        }
    }

    /// Returns the string value for string codes.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(value) => Some(value.as_str()),
        }
    }
}

impl From<u64> for Code {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Code {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Code {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
        }
    }
}

/// A closed, inclusive range of codes.
///
/// Bounds are kept as written; a range whose start sorts after its end
/// contains nothing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CodeRange {
    /// Numeric range: `start <= x <= end`.
    Int { start: u64, end: u64 },
    /// Lexicographic range over strings whose length lies between the
    /// lengths of the two bounds.
    Str { start: String, end: String },
}

impl CodeRange {
    /// Create a numeric range.
    pub fn int(start: u64, end: u64) -> Self {
        Self::Int { start, end }
    }

    /// Create a string range.
    pub fn str(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::Str {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Check whether a code falls inside this range.
    ///
    /// A numeric code never matches a string range and vice versa. String
    /// candidates must also have a length between the bound lengths, so
    /// `"A100"` is not inside `"A01"-"A98"` even though it sorts between them.
    pub fn contains(&self, code: &Code) -> bool {
        match (self, code) {
            (Self::Int { start, end }, Code::Int(value)) => start <= value && value <= end,
            (Self::Str { start, end }, Code::Str(value)) => {
                let start_len = start.chars().count();
                let end_len = end.chars().count();
                let len = value.chars().count();
                start_len.min(end_len) <= len
                    && len <= start_len.max(end_len)
                    && start.as_str() <= value.as_str()
                    && value.as_str() <= end.as_str()
            }
            _ => false,
        }
    }
}

impl fmt::Display for CodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int { start, end } => write!(f, "{start}-{end}"),
            Self::Str { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// One parsed token of a code specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeToken {
    Code(Code),
    Range(CodeRange),
}

/// Parse a single code specification token.
///
/// `line` is only used for error reporting.
pub fn parse_code_token(token: &str, letter_codes: bool, line: usize) -> Result<CodeToken> {
    if !letter_codes {
        if INT_CODE_REGEX.is_match(token) {
            let value = parse_int(token, line)?;
            return Ok(CodeToken::Code(Code::Int(value)));
        }
        if let Some(caps) = INT_RANGE_REGEX.captures(token) {
            let start = parse_int(&caps[1], line)?;
            let end = parse_int(&caps[2], line)?;
            return Ok(CodeToken::Range(CodeRange::int(start, end)));
        }
    }

    if STR_CODE_REGEX.is_match(token) {
        return Ok(CodeToken::Code(Code::Str(token.to_string())));
    }
    if let Some(caps) = STR_RANGE_REGEX.captures(token) {
        return Ok(CodeToken::Range(CodeRange::str(&caps[1], &caps[2])));
    }

    let reason = if token.is_empty() {
        "empty token"
    } else {
        "not a code or range"
    };
    Err(CnvError::invalid_code(line, token, reason))
}

fn parse_int(digits: &str, line: usize) -> Result<u64> {
    digits
        .parse::<u64>()
        .map_err(|_| CnvError::invalid_code(line, digits, "integer code out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_int_range_contains() {
        let range = CodeRange::int(1, 7);
        assert!(!range.contains(&Code::Int(0)));
        assert!(range.contains(&Code::Int(1)));
        assert!(range.contains(&Code::Int(7)));
        assert!(!range.contains(&Code::Int(8)));
        assert!(!range.contains(&Code::from("3")));
    }

    #[test]
    fn test_str_range_contains() {
        let range = CodeRange::str("A01", "A98");
        assert!(!range.contains(&Code::from("A00")));
        assert!(range.contains(&Code::from("A01")));
        assert!(!range.contains(&Code::from("B01")));
        assert!(range.contains(&Code::from("A10")));
        assert!(range.contains(&Code::from("A98")));
        assert!(!range.contains(&Code::from("A99")));
        assert!(!range.contains(&Code::from("A100")));
        assert!(!range.contains(&Code::Int(1)));
    }

    #[test]
    fn test_str_range_mixed_lengths() {
        let range = CodeRange::str("9", "99");
        assert!(range.contains(&Code::from("9")));
        assert!(range.contains(&Code::from("95")));
        assert!(!range.contains(&Code::from("999")));
        assert!(!range.contains(&Code::from("")));
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let range = CodeRange::int(9, 3);
        assert!(!range.contains(&Code::Int(5)));
        assert!(!range.contains(&Code::Int(9)));
    }

    #[test]
    fn test_parse_code_token() {
        assert_eq!(
            parse_code_token("0", false, 1).unwrap(),
            CodeToken::Code(Code::Int(0))
        );
        assert_eq!(
            parse_code_token("A", false, 1).unwrap(),
            CodeToken::Code(Code::from("A"))
        );
        assert_eq!(
            parse_code_token("0-9", false, 1).unwrap(),
            CodeToken::Range(CodeRange::int(0, 9))
        );
        assert_eq!(
            parse_code_token("0-9", true, 1).unwrap(),
            CodeToken::Range(CodeRange::str("0", "9"))
        );
        assert_eq!(
            parse_code_token("A0-A9", false, 1).unwrap(),
            CodeToken::Range(CodeRange::str("A0", "A9"))
        );
        assert_eq!(
            parse_code_token("A0-A9", true, 1).unwrap(),
            CodeToken::Range(CodeRange::str("A0", "A9"))
        );
    }

    #[test]
    fn test_parse_code_token_keeps_leading_zeros_in_letter_mode() {
        assert_eq!(
            parse_code_token("02", true, 1).unwrap(),
            CodeToken::Code(Code::from("02"))
        );
        assert_eq!(
            parse_code_token("02", false, 1).unwrap(),
            CodeToken::Code(Code::Int(2))
        );
    }

    #[test]
    fn test_parse_code_token_preserves_whitespace() {
        assert_eq!(
            parse_code_token("  ", false, 1).unwrap(),
            CodeToken::Code(Code::from("  "))
        );
        assert_eq!(
            parse_code_token(" 1-5", false, 1).unwrap(),
            CodeToken::Range(CodeRange::str(" 1", "5"))
        );
    }

    #[test]
    fn test_parse_code_token_rejects_garbage() {
        let err = parse_code_token("A-B-C", false, 12).unwrap_err();
        assert!(matches!(
            err,
            CnvError::InvalidCode { line: 12, ref token, .. } if token == "A-B-C"
        ));

        let err = parse_code_token("", true, 3).unwrap_err();
        assert!(matches!(
            err,
            CnvError::InvalidCode {
                reason: "empty token",
                ..
            }
        ));

        let err = parse_code_token("99999999999999999999999", false, 5).unwrap_err();
        assert!(matches!(
            err,
            CnvError::InvalidCode {
                reason: "integer code out of range",
                ..
            }
        ));
    }

    #[test]
    fn test_code_serializes_untagged() {
        let json = serde_json::to_string(&vec![Code::Int(3), Code::from("SP")]).unwrap();
        assert_eq!(json, r#"[3,"SP"]"#);
        let range = serde_json::to_string(&CodeRange::int(1, 2)).unwrap();
        assert_eq!(range, r#"{"kind":"int","start":1,"end":2}"#);
    }

    proptest! {
        #[test]
        fn prop_int_range_matches_bounds(start in 0u64..1000, end in 0u64..1000, value in 0u64..1000) {
            let range = CodeRange::int(start, end);
            prop_assert_eq!(range.contains(&Code::Int(value)), start <= value && value <= end);
        }

        #[test]
        fn prop_str_range_respects_length_bounds(
            start in "[A-Z][0-9]{1,3}",
            end in "[A-Z][0-9]{1,3}",
            value in "[A-Z][0-9]{0,4}"
        ) {
            let range = CodeRange::str(start.clone(), end.clone());
            let min_len = start.len().min(end.len());
            let max_len = start.len().max(end.len());
            let expected = min_len <= value.len()
                && value.len() <= max_len
                && start <= value
                && value <= end;
            prop_assert_eq!(range.contains(&Code::from(value.as_str())), expected);
        }

        #[test]
        fn prop_digit_tokens_parse_as_integers(value in 0u64..1_000_000) {
            let token = value.to_string();
            prop_assert_eq!(
                parse_code_token(&token, false, 1).unwrap(),
                CodeToken::Code(Code::Int(value))
            );
            prop_assert_eq!(
                parse_code_token(&token, true, 1).unwrap(),
                CodeToken::Code(Code::Str(token.clone()))
            );
        }
    }
}
