//! Error types for CNV parsing and lookups.

use std::path::PathBuf;
use thiserror::Error;

use crate::code::Code;

/// Errors that can occur when reading a CNV file or querying its categories.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CnvError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The first line is not `<count> <length> [L]`.
    #[error("invalid CNV header: {line:?}")]
    InvalidHeader { line: String },

    /// A fixed-column field of a category line could not be parsed.
    #[error("line {line}: invalid {field} {value:?}")]
    MalformedCategoryLine {
        line: usize,
        field: &'static str,
        value: String,
    },

    /// A code specification token is neither a code nor a range.
    #[error("line {line}: invalid code {token:?}: {reason}")]
    InvalidCode {
        line: usize,
        token: String,
        reason: &'static str,
    },

    /// The parent chain of a category loops back onto itself.
    #[error("line {line}: category {idx} is its own ancestor")]
    CyclicHierarchy { idx: u32, line: usize },

    /// A category names a parent that is never declared.
    #[error("line {line}: category {idx} references undeclared parent {parent_idx}")]
    UnknownParent {
        idx: u32,
        parent_idx: u32,
        line: usize,
    },

    /// No category carries the requested index.
    #[error("category {idx} not found")]
    NotFound { idx: u32 },

    /// No category contains the requested code.
    #[error("no category contains code {code}")]
    CodeNotFound { code: Code },

    /// The file contents are not valid in the configured encoding.
    #[error("file is not valid {encoding}")]
    Decode { encoding: &'static str },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CNV operations.
pub type Result<T> = std::result::Result<T, CnvError>;

impl CnvError {
    /// Create an InvalidHeader error.
    pub fn invalid_header(line: impl Into<String>) -> Self {
        Self::InvalidHeader { line: line.into() }
    }

    /// Create a MalformedCategoryLine error.
    pub fn malformed_line(line: usize, field: &'static str, value: impl Into<String>) -> Self {
        Self::MalformedCategoryLine {
            line,
            field,
            value: value.into(),
        }
    }

    /// Create an InvalidCode error.
    pub fn invalid_code(line: usize, token: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidCode {
            line,
            token: token.into(),
            reason,
        }
    }

    /// Returns true for lookup misses, which callers are expected to handle.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::CodeNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CnvError::invalid_header("x y");
        insta::assert_snapshot!(err.to_string(), @r#"invalid CNV header: "x y""#);

        let err = CnvError::malformed_line(4, "category index", "  ab");
        insta::assert_snapshot!(err.to_string(), @r#"line 4: invalid category index "  ab""#);

        let err = CnvError::invalid_code(7, "A-B-C", "not a code or range");
        insta::assert_snapshot!(err.to_string(), @r#"line 7: invalid code "A-B-C": not a code or range"#);

        let err = CnvError::CodeNotFound {
            code: Code::from("ZZ"),
        };
        insta::assert_snapshot!(err.to_string(), @"no category contains code ZZ");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(CnvError::NotFound { idx: 3 }.is_not_found());
        assert!(!CnvError::invalid_header("").is_not_found());
    }
}
