//! CNV code classification files.
//!
//! A CNV file maps raw data codes (municipality codes, state abbreviations,
//! age groups, ...) to named categories, possibly nested. This crate parses
//! such files into an immutable category tree and answers "which category
//! does this code belong to" questions.
//!
//! # Format
//!
//! ```text
//!      28  2
//!       1  11 Rondônia                                        11
//!      13  26 Pernambuco                                      26,20
//!      28  00 Ignorado/exterior                                 ,00-99
//! ```
//!
//! The first line declares the category count, the code width and an
//! optional `L` marker for letter codes. Every other line is either blank, a
//! `;` comment, or a fixed-column category line (see [`line`]). Lines that
//! repeat a category index continue the previous line's code list.
//!
//! # Example
//!
//! ```
//! use tab_cnv::{CategorySet, Code};
//!
//! let cnv = "\
//! 2 1
//!       1  Masculino                                          1
//!       2  Feminino                                           2,3-4";
//!
//! let set = CategorySet::from_cnv_str(cnv).unwrap();
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.lookup(&Code::Int(3)).unwrap().name(), "Feminino");
//! assert!(set.lookup(&Code::Int(9)).is_err());
//! ```
//!
//! Files are read as ISO-8859-1 unless configured otherwise:
//!
//! ```no_run
//! use std::path::Path;
//! use tab_cnv::read_cnv;
//!
//! let set = read_cnv(Path::new("uf.cnv")).unwrap();
//! println!("{} root categories", set.len());
//! ```

pub mod category;
pub mod code;
mod error;
pub mod header;
pub mod line;
mod options;
mod reader;
mod set;
pub mod tree;

// Re-export error types
pub use error::{CnvError, Result};

// Re-export core types
pub use category::Category;
pub use code::{Code, CodeRange, CodeToken, parse_code_token};
pub use header::CnvHeader;
pub use line::RawCategoryLine;
pub use options::{CnvEncoding, CnvReaderOptions};
pub use set::CategorySet;

// Re-export reader functionality
pub use reader::{CnvReader, read_cnv, read_cnv_with_options};
