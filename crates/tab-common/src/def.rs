//! DEF line-type vocabulary.
//!
//! Every line of a DEF tabulation definition starts with a one-character
//! marker that says what the rest of the line declares. Only the markers are
//! modeled here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for characters that are not DEF line markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown DEF line type {value:?}")]
pub struct UnknownDefLineType {
    pub value: String,
}

/// Marker at the start of a DEF line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
#[non_exhaustive]
pub enum DefLineType {
    /// `;` title or comment.
    Comment,
    /// `H` HTML shown before the form and the result.
    HtmlBefore,
    /// `F` HTML shown after the form and the result.
    HtmlAfter,
    /// `A` data file name pattern.
    FilePattern,
    /// `S` selection variable.
    SelectionVariable,
    /// `L` row variable.
    LineVariable,
    /// `C` column variable.
    ColumnVariable,
    /// `D` row and panel variable.
    DoubleVariable,
    /// `T` row, column and panel variable.
    TripleVariable,
    /// `I` content variable for flows (increment or indicator).
    IncrementVariable,
    /// `E` content variable for stocks (balance).
    AccumulatorVariable,
    /// `%` result shown as a proportion.
    ProportionResult,
    /// `O` form and result formatting options.
    FormattingOptions,
    /// `X`, meaning unknown.
    UndocumentedX,
    /// `N`, meaning unknown.
    UndocumentedN,
    /// `R`, meaning unknown.
    UndocumentedR,
    /// `G`, meaning unknown.
    UndocumentedG,
}

impl DefLineType {
    pub const ALL: [DefLineType; 17] = [
        DefLineType::Comment,
        DefLineType::HtmlBefore,
        DefLineType::HtmlAfter,
        DefLineType::FilePattern,
        DefLineType::SelectionVariable,
        DefLineType::LineVariable,
        DefLineType::ColumnVariable,
        DefLineType::DoubleVariable,
        DefLineType::TripleVariable,
        DefLineType::IncrementVariable,
        DefLineType::AccumulatorVariable,
        DefLineType::ProportionResult,
        DefLineType::FormattingOptions,
        DefLineType::UndocumentedX,
        DefLineType::UndocumentedN,
        DefLineType::UndocumentedR,
        DefLineType::UndocumentedG,
    ];

    /// The marker character.
    pub fn as_char(&self) -> char {
        match self {
            DefLineType::Comment => ';',
            DefLineType::HtmlBefore => 'H',
            DefLineType::HtmlAfter => 'F',
            DefLineType::FilePattern => 'A',
            DefLineType::SelectionVariable => 'S',
            DefLineType::LineVariable => 'L',
            DefLineType::ColumnVariable => 'C',
            DefLineType::DoubleVariable => 'D',
            DefLineType::TripleVariable => 'T',
            DefLineType::IncrementVariable => 'I',
            DefLineType::AccumulatorVariable => 'E',
            DefLineType::ProportionResult => '%',
            DefLineType::FormattingOptions => 'O',
            DefLineType::UndocumentedX => 'X',
            DefLineType::UndocumentedN => 'N',
            DefLineType::UndocumentedR => 'R',
            DefLineType::UndocumentedG => 'G',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DefLineType::Comment => "title or comment",
            DefLineType::HtmlBefore => "HTML included before the form and the tabulation result",
            DefLineType::HtmlAfter => "HTML included after the form and the tabulation result",
            DefLineType::FilePattern => "data file name pattern",
            DefLineType::SelectionVariable => "selection variable definition",
            DefLineType::LineVariable => "row variable definition",
            DefLineType::ColumnVariable => "column variable definition",
            DefLineType::DoubleVariable => "double definition (row and panel variable)",
            DefLineType::TripleVariable => {
                "triple definition (row, column and panel variable)"
            }
            DefLineType::IncrementVariable => {
                "content variable for movement or flow (increment or indicator)"
            }
            DefLineType::AccumulatorVariable => "content variable for stock or balance",
            DefLineType::ProportionResult => "tabulation result as a proportion",
            DefLineType::FormattingOptions => "form and result formatting options",
            DefLineType::UndocumentedX
            | DefLineType::UndocumentedN
            | DefLineType::UndocumentedR
            | DefLineType::UndocumentedG => "undocumented",
        }
    }

    /// Whether the line declares a variable.
    pub fn is_variable(&self) -> bool {
        matches!(
            self,
            DefLineType::SelectionVariable
                | DefLineType::LineVariable
                | DefLineType::ColumnVariable
                | DefLineType::DoubleVariable
                | DefLineType::TripleVariable
                | DefLineType::IncrementVariable
                | DefLineType::AccumulatorVariable
        )
    }

    /// Marker of a DEF line, if its first character is one.
    pub fn of_line(line: &str) -> Option<Self> {
        line.chars().next().and_then(|c| Self::try_from(c).ok())
    }
}

impl TryFrom<char> for DefLineType {
    type Error = UnknownDefLineType;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|line_type| line_type.as_char() == c)
            .ok_or_else(|| UnknownDefLineType {
                value: c.to_string(),
            })
    }
}

impl From<DefLineType> for char {
    fn from(line_type: DefLineType) -> Self {
        line_type.as_char()
    }
}

impl fmt::Display for DefLineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for DefLineType {
    type Err = UnknownDefLineType;

    /// Parse a marker (case-insensitive, surrounding whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownDefLineType {
            value: s.to_string(),
        };
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c.to_ascii_uppercase()).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}
