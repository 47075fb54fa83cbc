//! Parsed CNV documents.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use crate::category::Category;
use crate::code::Code;
use crate::error::{CnvError, Result};
use crate::header::CnvHeader;
use crate::line::RawCategoryLine;
use crate::options::CnvReaderOptions;
use crate::reader::read_cnv;
use crate::tree::build_categories;

/// The category forest of one CNV document.
///
/// Code lookups (`get_leaf`, `get_root`, `get_path`, `lookup`) search by data
/// value. Index lookups (`get`, `category`, `ancestors`) search by category
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySet {
    category_count: usize,
    code_length: usize,
    letter_codes: bool,
    categories: Vec<Category>,
    /// Category index -> child positions from the forest down to the node.
    #[serde(skip)]
    locations: BTreeMap<u32, Vec<usize>>,
}

impl CategorySet {
    /// Wrap an already built forest.
    ///
    /// When two nodes share an index the one visited last in pre-order
    /// (roots in order) wins the index lookup.
    pub fn new(header: CnvHeader, categories: Vec<Category>) -> Self {
        let locations = index_locations(&categories);
        Self {
            category_count: header.category_count,
            code_length: header.code_length,
            letter_codes: header.letter_codes,
            categories,
            locations,
        }
    }

    /// Parse the contents of a CNV file.
    pub fn from_cnv_str(contents: &str) -> Result<Self> {
        Self::from_cnv_str_with_options(contents, &CnvReaderOptions::default())
    }

    /// Parse the contents of a CNV file with options.
    ///
    /// The encoding option is irrelevant here since the text is already
    /// decoded.
    pub fn from_cnv_str_with_options(contents: &str, options: &CnvReaderOptions) -> Result<Self> {
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);
        let mut lines = contents.lines();

        let header = CnvHeader::parse(lines.next().unwrap_or_default())?;

        let mut raw_lines = Vec::new();
        for (offset, line) in lines.enumerate() {
            let line_number = offset + 2;
            match RawCategoryLine::decode(line, line_number, header.letter_codes)? {
                Some(raw) => raw_lines.push(raw),
                None => tracing::trace!(line = line_number, "Skipping blank or comment line"),
            }
        }

        let categories = build_categories(raw_lines, options)?;
        let set = Self::new(header, categories);

        if set.locations.len() != header.category_count {
            tracing::warn!(
                declared = header.category_count,
                parsed = set.locations.len(),
                "CNV header category count does not match parsed categories"
            );
        }
        tracing::debug!(
            roots = set.len(),
            categories = set.locations.len(),
            letter_codes = set.letter_codes,
            "Parsed CNV document"
        );
        Ok(set)
    }

    /// Read a CNV file as ISO-8859-1.
    pub fn from_cnv_path(path: impl AsRef<Path>) -> Result<Self> {
        read_cnv(path.as_ref())
    }

    /// Number of root categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Category count declared in the header.
    pub fn category_count(&self) -> usize {
        self.category_count
    }

    /// Code width declared in the header.
    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Whether codes were parsed as strings only.
    pub fn letter_codes(&self) -> bool {
        self.letter_codes
    }

    /// Root categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Root categories as an iterator.
    pub fn roots(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    /// Every category, pre-order, roots in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().flat_map(Category::iter)
    }

    /// Root category containing the code.
    pub fn get_root(&self, item: &Code) -> Option<&Category> {
        self.categories.iter().find(|category| category.contains(item))
    }

    /// Most specific category containing the code.
    pub fn get_leaf(&self, item: &Code) -> Option<&Category> {
        self.get_root(item)?.get_leaf(item)
    }

    /// Chain from the root down to the most specific category containing
    /// the code.
    pub fn get_path(&self, item: &Code) -> Option<Vec<&Category>> {
        self.get_root(item)?.get_path(item)
    }

    /// Most specific category containing the code, or `CodeNotFound`.
    pub fn lookup(&self, item: &Code) -> Result<&Category> {
        self.get_leaf(item)
            .ok_or_else(|| CnvError::CodeNotFound { code: item.clone() })
    }

    /// Category with the given index.
    pub fn get(&self, idx: u32) -> Option<&Category> {
        let location = self.locations.get(&idx)?;
        self.resolve(location).last().copied()
    }

    /// Category with the given index, or `NotFound`.
    pub fn category(&self, idx: u32) -> Result<&Category> {
        self.get(idx).ok_or(CnvError::NotFound { idx })
    }

    /// Chain from the root down to the category with the given index.
    pub fn ancestors(&self, idx: u32) -> Result<Vec<&Category>> {
        self.locations
            .get(&idx)
            .map(|location| self.resolve(location))
            .ok_or(CnvError::NotFound { idx })
    }

    /// Every category keyed by index.
    pub fn flat_categories(&self) -> BTreeMap<u32, &Category> {
        self.locations
            .iter()
            .filter_map(|(&idx, location)| {
                self.resolve(location)
                    .last()
                    .copied()
                    .map(|category| (idx, category))
            })
            .collect()
    }

    fn resolve(&self, location: &[usize]) -> Vec<&Category> {
        let mut chain = Vec::with_capacity(location.len());
        let mut siblings = self.categories.as_slice();
        for &position in location {
            let Some(category) = siblings.get(position) else {
                break;
            };
            chain.push(category);
            siblings = category.children();
        }
        chain
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.roots()
    }
}

fn index_locations(categories: &[Category]) -> BTreeMap<u32, Vec<usize>> {
    let mut locations = BTreeMap::new();
    let mut stack: Vec<(&Category, Vec<usize>)> = categories
        .iter()
        .enumerate()
        .rev()
        .map(|(position, category)| (category, vec![position]))
        .collect();

    while let Some((category, location)) = stack.pop() {
        for (position, child) in category.children().iter().enumerate().rev() {
            let mut child_location = location.clone();
            child_location.push(position);
            stack.push((child, child_location));
        }
        locations.insert(category.idx(), location);
    }
    locations
}
