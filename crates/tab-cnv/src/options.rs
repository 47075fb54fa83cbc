//! Reader options.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

use crate::error::{CnvError, Result};

/// Text encoding of CNV files.
///
/// CNV files are distributed as ISO-8859-1 and their columns are byte
/// columns, so Latin-1 is the default. It is decoded byte-for-byte rather
/// than through `encoding_rs`'s WHATWG label table, which maps
/// `iso-8859-1` to windows-1252.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CnvEncoding {
    /// ISO-8859-1 (default).
    #[default]
    Latin1,
    /// UTF-8, rejecting invalid sequences.
    Utf8,
    /// Any other single- or multi-byte encoding known to `encoding_rs`.
    Other(&'static Encoding),
}

impl CnvEncoding {
    /// Canonical encoding name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Utf8 => "UTF-8",
            Self::Other(encoding) => encoding.name(),
        }
    }

    /// Resolve an encoding label such as `latin1`, `utf-8` or `windows-1252`.
    pub fn for_label(label: &str) -> Option<Self> {
        let normalized = label.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "latin1" | "latin-1" | "l1" | "iso-8859-1" | "iso8859-1" | "iso_8859-1" => {
                Some(Self::Latin1)
            }
            "utf-8" | "utf8" => Some(Self::Utf8),
            _ => Encoding::for_label(normalized.as_bytes()).map(Self::Other),
        }
    }

    /// Decode raw file contents.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>> {
        match self {
            Self::Latin1 => Ok(encoding_rs::mem::decode_latin1(bytes)),
            Self::Utf8 => std::str::from_utf8(bytes)
                .map(Cow::Borrowed)
                .map_err(|_| CnvError::Decode {
                    encoding: self.name(),
                }),
            Self::Other(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(bytes);
                if had_errors {
                    Err(CnvError::Decode {
                        encoding: encoding.name(),
                    })
                } else {
                    Ok(text)
                }
            }
        }
    }
}

impl fmt::Display for CnvEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Options for reading CNV files.
#[derive(Debug, Clone)]
pub struct CnvReaderOptions {
    /// Encoding used when reading bytes (default: ISO-8859-1).
    pub encoding: CnvEncoding,
    /// Reject categories whose parent is never declared (default: true).
    ///
    /// When disabled such categories, and everything below them, are
    /// dropped with a warning. Parent cycles are always rejected.
    pub strict_hierarchy: bool,
}

impl Default for CnvReaderOptions {
    fn default() -> Self {
        Self {
            encoding: CnvEncoding::default(),
            strict_hierarchy: true,
        }
    }
}

impl CnvReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file encoding.
    #[must_use]
    pub fn with_encoding(mut self, encoding: CnvEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Drop categories with undeclared parents instead of failing.
    #[must_use]
    pub fn lenient_hierarchy(mut self) -> Self {
        self.strict_hierarchy = false;
        self
    }
}
