//! CNV file reader.
//!
//! Reads whole CNV files, decodes them with the configured encoding and
//! hands the text to the parser.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{CnvError, Result};
use crate::options::CnvReaderOptions;
use crate::set::CategorySet;

/// CNV file reader.
pub struct CnvReader<R: Read> {
    reader: BufReader<R>,
    options: CnvReaderOptions,
}

impl<R: Read> CnvReader<R> {
    /// Create a new CNV reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            options: CnvReaderOptions::default(),
        }
    }

    /// Create a new CNV reader with options.
    pub fn with_options(reader: R, options: CnvReaderOptions) -> Self {
        Self {
            reader: BufReader::new(reader),
            options,
        }
    }

    /// Read the entire stream and parse it.
    pub fn read_categories(mut self) -> Result<CategorySet> {
        let mut data = Vec::new();
        self.reader.read_to_end(&mut data)?;
        let text = self.options.encoding.decode(&data)?;
        CategorySet::from_cnv_str_with_options(&text, &self.options)
    }
}

impl CnvReader<File> {
    /// Open a CNV file for reading.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_options(path, CnvReaderOptions::default())
    }

    /// Open a CNV file with options.
    pub fn open_with_options(path: &Path, options: CnvReaderOptions) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CnvError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CnvError::Io(e)
            }
        })?;
        Ok(Self::with_options(file, options))
    }
}

/// Read a CNV file from a path as ISO-8859-1.
pub fn read_cnv(path: &Path) -> Result<CategorySet> {
    read_cnv_with_options(path, CnvReaderOptions::default())
}

/// Read a CNV file with options.
pub fn read_cnv_with_options(path: &Path, options: CnvReaderOptions) -> Result<CategorySet> {
    tracing::debug!(path = %path.display(), encoding = %options.encoding, "Reading CNV file");
    CnvReader::open_with_options(path, options)?.read_categories()
}
