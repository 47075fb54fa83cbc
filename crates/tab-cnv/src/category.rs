//! Category tree nodes.
//!
//! A [`Category`] owns its children outright. The parent is only recorded by
//! index, so the tree has no back-pointers and can be shared freely once
//! built.
//!
//! Parent rows in CNV files often carry an empty or placeholder code column
//! while the real codes sit on their children. Containment is therefore
//! tested against the *transitive* code set (own codes plus every
//! descendant's), which is computed once when the node is created.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::code::{Code, CodeRange};

/// A named node of the classification tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    idx: u32,
    name: String,
    codes: Vec<Code>,
    ranges: Vec<CodeRange>,
    parent_idx: Option<u32>,
    children: Vec<Category>,
    #[serde(skip)]
    all_codes: BTreeSet<Code>,
    #[serde(skip)]
    all_ranges: BTreeSet<CodeRange>,
}

impl Category {
    /// Create a category and compute its transitive code set.
    pub fn new(
        idx: u32,
        name: impl Into<String>,
        codes: Vec<Code>,
        ranges: Vec<CodeRange>,
        parent_idx: Option<u32>,
        children: Vec<Category>,
    ) -> Self {
        let mut all_codes: BTreeSet<Code> = codes.iter().cloned().collect();
        let mut all_ranges: BTreeSet<CodeRange> = ranges.iter().cloned().collect();
        for child in &children {
            all_codes.extend(child.all_codes.iter().cloned());
            all_ranges.extend(child.all_ranges.iter().cloned());
        }

        Self {
            idx,
            name: name.into(),
            codes,
            ranges,
            parent_idx,
            children,
            all_codes,
            all_ranges,
        }
    }

    /// Category index.
    pub fn idx(&self) -> u32 {
        self.idx
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Codes declared on this category's own lines.
    pub fn codes(&self) -> &[Code] {
        &self.codes
    }

    /// Ranges declared on this category's own lines.
    pub fn ranges(&self) -> &[CodeRange] {
        &self.ranges
    }

    /// Index of the parent category, if any.
    pub fn parent_idx(&self) -> Option<u32> {
        self.parent_idx
    }

    /// Direct children in declaration order.
    pub fn children(&self) -> &[Category] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Own codes plus every descendant's.
    pub fn all_codes(&self) -> &BTreeSet<Code> {
        &self.all_codes
    }

    /// Own ranges plus every descendant's.
    pub fn all_ranges(&self) -> &BTreeSet<CodeRange> {
        &self.all_ranges
    }

    /// Check whether this category or any descendant contains the code.
    pub fn contains(&self, item: &Code) -> bool {
        self.all_codes.contains(item) || self.all_ranges.iter().any(|range| range.contains(item))
    }

    /// Check only the codes and ranges declared on this category itself.
    pub fn own_contains(&self, item: &Code) -> bool {
        self.codes.contains(item) || self.ranges.iter().any(|range| range.contains(item))
    }

    /// Top-most category of this subtree containing the code.
    ///
    /// Within a subtree that is the subtree root itself whenever anything
    /// below it matches.
    pub fn get_root(&self, item: &Code) -> Option<&Category> {
        self.contains(item).then_some(self)
    }

    /// Most specific category containing the code.
    ///
    /// Children are searched first, in declaration order; a category's own
    /// codes only catch what none of its children claim.
    pub fn get_leaf(&self, item: &Code) -> Option<&Category> {
        self.get_path(item).and_then(|path| path.last().copied())
    }

    /// Chain from this category down to the most specific match.
    pub fn get_path(&self, item: &Code) -> Option<Vec<&Category>> {
        if !self.contains(item) {
            return None;
        }

        let mut path = vec![self];
        let mut current = self;
        while let Some(child) = current.children.iter().find(|child| child.contains(item)) {
            path.push(child);
            current = child;
        }
        Some(path)
    }

    /// Pre-order iterator over this category and all descendants.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.idx, self.name)
    }
}

impl<'a> IntoIterator for &'a Category {
    type Item = &'a Category;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order traversal of a category subtree.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a Category>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Category;

    fn next(&mut self) -> Option<Self::Item> {
        let category = self.stack.pop()?;
        self.stack.extend(category.children.iter().rev());
        Some(category)
    }
}
