//! # Outline Navigation
//!
//! Read-only queries over a parsed region tree, for editor-style "go to
//! next/previous region" commands and outline views. Lines are 0-based.
//!
//! Regions own their children and carry no parent pointers, so lookups that
//! need ancestry walk down from the top level and return index paths.

use std::collections::HashSet;

use crate::parsing::regions::Region;

/// A region in depth-first order with its place in the tree.
#[derive(Debug, Clone, Copy)]
pub struct FlatRegion<'a> {
    pub region: &'a Region,
    /// Position in the depth-first listing.
    pub flat_index: usize,
    /// 0 for top-level regions.
    pub depth: usize,
    /// Position among the region's siblings.
    pub sibling_index: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Flattened<'a> {
    pub regions: Vec<FlatRegion<'a>>,
    /// Ids of every region that has at least one child.
    pub parent_ids: HashSet<&'a str>,
}

/// Flattens a region tree depth-first, parents before their children.
pub fn flatten_regions(regions: &[Region]) -> Flattened<'_> {
    fn walk<'a>(regions: &'a [Region], depth: usize, out: &mut Flattened<'a>) {
        for (sibling_index, region) in regions.iter().enumerate() {
            out.regions.push(FlatRegion {
                region,
                flat_index: out.regions.len(),
                depth,
                sibling_index,
            });
            if !region.children.is_empty() {
                out.parent_ids.insert(region.id.as_str());
            }
            walk(&region.children, depth + 1, out);
        }
    }

    let mut out = Flattened::default();
    walk(regions, 0, &mut out);
    out
}

/// Index path to the innermost region containing `line`; empty if none does.
fn active_path(regions: &[Region], line: usize) -> Vec<usize> {
    let mut path = vec![];
    let mut level = regions;
    while let Some(i) = level.iter().position(|r| r.contains_line(line)) {
        path.push(i);
        level = &level[i].children;
    }
    path
}

/// The regions at the level below `parent_path` (top level for an empty path).
fn level_at<'a>(regions: &'a [Region], parent_path: &[usize]) -> &'a [Region] {
    parent_path
        .iter()
        .fold(regions, |level, &i| level[i].children.as_slice())
}

/// The innermost region whose line range contains `line`.
pub fn active_region(regions: &[Region], line: usize) -> Option<&Region> {
    let path = active_path(regions, line);
    let (&last, parents) = path.split_last()?;
    level_at(regions, parents).get(last)
}

/// The region to jump to from `line`, wrapping to the first region.
///
/// Inside a region, that is the first child starting after `line`, then the
/// next sibling, climbing up a level each time a last child is reached.
/// Outside any region, it is the next top-level region.
pub fn next_region(regions: &[Region], line: usize) -> Option<&Region> {
    let path = active_path(regions, line);
    let Some((&last, parents)) = path.split_last() else {
        return regions
            .iter()
            .find(|r| r.start.line > line)
            .or_else(|| regions.first());
    };

    let active = &level_at(regions, parents)[last];
    if let Some(child) = active.children.iter().find(|c| c.start.line > line) {
        return Some(child);
    }

    for depth in (0..path.len()).rev() {
        if let Some(sibling) = level_at(regions, &path[..depth]).get(path[depth] + 1) {
            return Some(sibling);
        }
    }
    regions.first()
}

/// The last region (depth-first) starting before `line`, wrapping to the last region.
pub fn previous_region(regions: &[Region], line: usize) -> Option<&Region> {
    let flat = flatten_regions(regions).regions;
    flat.iter()
        .rev()
        .find(|f| f.region.start.line < line)
        .or_else(|| flat.last())
        .map(|f| f.region)
}

/// The line to jump to from `line` along the innermost enclosing region.
///
/// On the start marker that is the end marker and vice versa; anywhere else
/// inside the region it is the end marker.
pub fn matching_boundary(regions: &[Region], line: usize) -> Option<usize> {
    let region = active_region(regions, line)?;
    Some(if line == region.end.line {
        region.start.line
    } else {
        region.end.line
    })
}

/// The first top-level region starting after `line`. Does not wrap.
pub fn next_top_level_region(regions: &[Region], line: usize) -> Option<&Region> {
    regions.iter().find(|r| r.start.line > line)
}

/// The region with `id` preceded by its ancestors, top-level first.
pub fn region_path<'a>(regions: &'a [Region], id: &str) -> Option<Vec<&'a Region>> {
    for region in regions {
        if region.id == id {
            return Some(vec![region]);
        }
        if let Some(mut path) = region_path(&region.children, id) {
            path.insert(0, region);
            return Some(path);
        }
    }
    None
}

/// Ancestors of the region with `id`, top-level first. Empty if the region is
/// top-level or unknown.
pub fn region_parents<'a>(regions: &'a [Region], id: &str) -> Vec<&'a Region> {
    let mut path = region_path(regions, id).unwrap_or_default();
    path.pop();
    path
}
