//! Category tree assembly.
//!
//! Categories reference their parent by index only, so the tree is built in
//! two passes:
//!
//! 1. Merge continuation lines (same index) and index the merged records.
//! 2. Materialize each root depth-first, looking children up by parent
//!    index. Built nodes are never patched afterwards.
//!
//! Records that cannot be reached from a root either hang below an
//! undeclared parent or sit on a parent cycle. Cycles are always an error;
//! undeclared parents are an error unless
//! [`CnvReaderOptions::strict_hierarchy`] is disabled.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::category::Category;
use crate::error::{CnvError, Result};
use crate::line::RawCategoryLine;
use crate::options::CnvReaderOptions;

/// Merge lines sharing a category index.
///
/// Codes and ranges are concatenated in line order. The first line keeps
/// its name, parent and line number. Output follows first appearance.
pub fn merge_continuation_lines(lines: Vec<RawCategoryLine>) -> Vec<RawCategoryLine> {
    let mut order = Vec::new();
    let mut merged: HashMap<u32, RawCategoryLine> = HashMap::new();

    for line in lines {
        match merged.entry(line.idx) {
            Entry::Occupied(mut entry) => {
                let first = entry.get_mut();
                if !line.codes_spec.is_empty() {
                    if !first.codes_spec.is_empty() {
                        first.codes_spec.push(',');
                    }
                    first.codes_spec.push_str(&line.codes_spec);
                }
                first.codes.extend(line.codes);
                first.ranges.extend(line.ranges);
            }
            Entry::Vacant(entry) => {
                order.push(line.idx);
                entry.insert(line);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|idx| merged.remove(&idx))
        .collect()
}

/// Build the category forest from decoded lines.
///
/// Roots and siblings keep declaration order.
pub fn build_categories(
    lines: Vec<RawCategoryLine>,
    options: &CnvReaderOptions,
) -> Result<Vec<Category>> {
    let records = merge_continuation_lines(lines);

    let mut roots = Vec::new();
    let mut children_of: HashMap<u32, Vec<u32>> = HashMap::new();
    for record in &records {
        match record.parent_idx {
            None => roots.push(record.idx),
            Some(parent_idx) => children_of.entry(parent_idx).or_default().push(record.idx),
        }
    }

    let reachable = reachable_from(&roots, &children_of);
    if reachable.len() < records.len() {
        check_unreachable(&records, &reachable, options)?;
    }

    let mut by_idx: HashMap<u32, RawCategoryLine> = records
        .into_iter()
        .filter(|record| reachable.contains(&record.idx))
        .map(|record| (record.idx, record))
        .collect();

    let categories: Vec<Category> = roots
        .iter()
        .filter_map(|&idx| materialize(idx, &mut by_idx, &children_of))
        .collect();

    tracing::debug!(
        roots = categories.len(),
        categories = reachable.len(),
        "Built CNV category tree"
    );
    Ok(categories)
}

fn reachable_from(roots: &[u32], children_of: &HashMap<u32, Vec<u32>>) -> HashSet<u32> {
    let mut reachable = HashSet::new();
    let mut pending: Vec<u32> = roots.to_vec();
    while let Some(idx) = pending.pop() {
        if reachable.insert(idx)
            && let Some(children) = children_of.get(&idx)
        {
            pending.extend(children.iter().copied());
        }
    }
    reachable
}

/// Walk the parent chain of every unreachable record to tell cycles from
/// undeclared parents.
fn check_unreachable(
    records: &[RawCategoryLine],
    reachable: &HashSet<u32>,
    options: &CnvReaderOptions,
) -> Result<()> {
    let by_idx: HashMap<u32, &RawCategoryLine> =
        records.iter().map(|record| (record.idx, record)).collect();

    for record in records.iter().filter(|r| !reachable.contains(&r.idx)) {
        let mut seen = HashSet::new();
        let mut current = record;
        while let Some(parent_idx) = current.parent_idx {
            if !seen.insert(current.idx) {
                return Err(CnvError::CyclicHierarchy {
                    idx: current.idx,
                    line: current.line_number,
                });
            }
            match by_idx.get(&parent_idx) {
                Some(parent) => current = parent,
                None if options.strict_hierarchy => {
                    return Err(CnvError::UnknownParent {
                        idx: current.idx,
                        parent_idx,
                        line: current.line_number,
                    });
                }
                None => {
                    tracing::warn!(
                        idx = record.idx,
                        parent_idx,
                        line = record.line_number,
                        "Dropping category below undeclared parent"
                    );
                    break;
                }
            }
        }
    }
    Ok(())
}

fn materialize(
    idx: u32,
    by_idx: &mut HashMap<u32, RawCategoryLine>,
    children_of: &HashMap<u32, Vec<u32>>,
) -> Option<Category> {
    let record = by_idx.remove(&idx)?;
    let children = children_of
        .get(&idx)
        .map(|ids| {
            ids.iter()
                .filter_map(|&child| materialize(child, by_idx, children_of))
                .collect()
        })
        .unwrap_or_default();

    Some(Category::new(
        record.idx,
        record.name,
        record.codes,
        record.ranges,
        record.parent_idx,
        children,
    ))
}
