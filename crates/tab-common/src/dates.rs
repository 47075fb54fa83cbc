//! Two-digit years and months.
//!
//! Data files are named after the period they cover using `aa` (year) or
//! `aamm` (year and month) codes. Two-digit years are mapped to a 100-year
//! window: with the default pivot of 39, `00..=39` means 2000-2039 and
//! `40..=99` means 1940-1999.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the date helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DateError {
    #[error("{what} {value} out of range {min}..={max}")]
    OutOfRange {
        what: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("invalid {format} date code {value:?}")]
    InvalidFormat { format: &'static str, value: String },
}

impl DateError {
    fn out_of_range(what: &'static str, value: impl Into<u32>, min: u32, max: u32) -> Self {
        Self::OutOfRange {
            what,
            value: value.into(),
            min,
            max,
        }
    }

    fn invalid_format(format: &'static str, value: &str) -> Self {
        Self::InvalidFormat {
            format,
            value: value.to_string(),
        }
    }
}

/// Result type for date helpers.
pub type Result<T> = std::result::Result<T, DateError>;

/// The 100-year window two-digit years are resolved in.
///
/// `pivot` is the last two-digit value that belongs to the 2000s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearWindow {
    pivot: u8,
}

impl Default for YearWindow {
    fn default() -> Self {
        Self {
            pivot: Self::DEFAULT_PIVOT,
        }
    }
}

impl YearWindow {
    pub const DEFAULT_PIVOT: u8 = 39;

    pub fn new(pivot: u8) -> Result<Self> {
        if pivot > 99 {
            return Err(DateError::out_of_range("year window pivot", pivot, 0, 99));
        }
        Ok(Self { pivot })
    }

    pub fn pivot(&self) -> u8 {
        self.pivot
    }

    /// First year of the window.
    pub fn min_year(&self) -> u16 {
        1900 + u16::from(self.pivot) + 1
    }

    /// Last year of the window.
    pub fn max_year(&self) -> u16 {
        2000 + u16::from(self.pivot)
    }

    pub fn contains(&self, year: u16) -> bool {
        (self.min_year()..=self.max_year()).contains(&year)
    }

    /// Validate a four-digit year against the window.
    pub fn year(&self, value: u16) -> Result<Year> {
        if !self.contains(value) {
            return Err(DateError::out_of_range(
                "year",
                value,
                u32::from(self.min_year()),
                u32::from(self.max_year()),
            ));
        }
        Ok(Year(value))
    }

    /// Resolve a two-digit year.
    pub fn from_two_digits(&self, value: u8) -> Result<Year> {
        match value {
            v if v <= self.pivot => Ok(Year(2000 + u16::from(v))),
            v if v <= 99 => Ok(Year(1900 + u16::from(v))),
            v => Err(DateError::out_of_range("two-digit year", v, 0, 99)),
        }
    }

    /// Parse an `aa` code (exactly two ASCII digits).
    pub fn parse_aa(&self, value: &str) -> Result<Year> {
        let digits = two_digit_number(value).ok_or_else(|| DateError::invalid_format("aa", value))?;
        self.from_two_digits(digits)
    }

    /// Parse an `aamm` code (exactly four ASCII digits).
    pub fn parse_aamm(&self, value: &str) -> Result<(Year, Month)> {
        let invalid = || DateError::invalid_format("aamm", value);
        if value.len() != 4 || !value.is_char_boundary(2) {
            return Err(invalid());
        }
        let (aa, mm) = value.split_at(2);
        let year = self.from_two_digits(two_digit_number(aa).ok_or_else(invalid)?)?;
        let month = Month::from_number(two_digit_number(mm).ok_or_else(invalid)?)?;
        Ok((year, month))
    }
}

fn two_digit_number(value: &str) -> Option<u8> {
    if value.len() != 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Parse an `aa` code with the default window.
pub fn parse_date_aa(value: &str) -> Result<Year> {
    YearWindow::default().parse_aa(value)
}

/// Parse an `aamm` code with the default window.
pub fn parse_date_aamm(value: &str) -> Result<(Year, Month)> {
    YearWindow::default().parse_aamm(value)
}

/// A four-digit year that fits a two-digit code.
///
/// Displays as four digits. Deserialization checks the default window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(u16);

impl Year {
    /// Validate a year against the default window.
    pub fn new(value: u16) -> Result<Self> {
        YearWindow::default().year(value)
    }

    /// Resolve a two-digit year with the default window.
    pub fn from_two_digits(value: u8) -> Result<Self> {
        YearWindow::default().from_two_digits(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn two_digits(&self) -> u8 {
        (self.0 % 100) as u8
    }

    pub fn two_digit_string(&self) -> String {
        format!("{:02}", self.two_digits())
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl PartialEq<u16> for Year {
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn from_number(number: u8) -> Result<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(usize::from(i)))
            .copied()
            .ok_or_else(|| DateError::out_of_range("month", number, 1, 12))
    }

    /// Month number, 1 to 12.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn two_digit_string(&self) -> String {
        format!("{:02}", self.number())
    }

    /// Portuguese abbreviation ("jan", "fev", ...).
    pub fn pt_short_name(&self) -> &'static str {
        match self {
            Month::January => "jan",
            Month::February => "fev",
            Month::March => "mar",
            Month::April => "abr",
            Month::May => "mai",
            Month::June => "jun",
            Month::July => "jul",
            Month::August => "ago",
            Month::September => "set",
            Month::October => "out",
            Month::November => "nov",
            Month::December => "dez",
        }
    }

    pub fn pt_full_name(&self) -> &'static str {
        match self {
            Month::January => "janeiro",
            Month::February => "fevereiro",
            Month::March => "março",
            Month::April => "abril",
            Month::May => "maio",
            Month::June => "junho",
            Month::July => "julho",
            Month::August => "agosto",
            Month::September => "setembro",
            Month::October => "outubro",
            Month::November => "novembro",
            Month::December => "dezembro",
        }
    }

    pub fn en_short_name(&self) -> &'static str {
        &self.en_full_name()[..3]
    }

    pub fn en_full_name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(number: u8) -> Result<Self> {
        Self::from_number(number)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.number()
    }
}

impl From<Month> for chrono::Month {
    fn from(month: Month) -> Self {
        match month {
            Month::January => chrono::Month::January,
            Month::February => chrono::Month::February,
            Month::March => chrono::Month::March,
            Month::April => chrono::Month::April,
            Month::May => chrono::Month::May,
            Month::June => chrono::Month::June,
            Month::July => chrono::Month::July,
            Month::August => chrono::Month::August,
            Month::September => chrono::Month::September,
            Month::October => chrono::Month::October,
            Month::November => chrono::Month::November,
            Month::December => chrono::Month::December,
        }
    }
}

impl From<chrono::Month> for Month {
    fn from(month: chrono::Month) -> Self {
        // number_from_month is always 1..=12
        Self::ALL[month.number_from_month() as usize - 1]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.en_full_name())
    }
}
