//! Top-down longest flow path (algorithms 3, 4 and 5)
//!
//! Breadth-first traversal outward from the outlet cells. Upstream
//! neighbors are exactly one step farther from an outlet, so a FIFO
//! frontier visits cells in ascending path length and every cell is
//! reached only after its downstream neighbor.
//!
//! All three variants accept the whole outlet list at once. Outlet cells
//! are pinned at length 0: a wave from a downstream outlet stops at an
//! upstream outlet, so each outlet keeps its own sub-catchment. An outlet
//! owning no cell beyond its own (or a duplicate of an earlier outlet)
//! resolves to itself.

use crate::maybe_rayon::*;
use flowpath_core::{CellLocation, FlowGrid};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Outlet seeding shared by the three variants.
///
/// `frontier` holds one `(cell, outlet index)` entry per distinct outlet
/// cell; duplicates seed once, first list index wins.
struct Seeds {
    pinned: Vec<bool>,
    frontier: Vec<(CellLocation, u32)>,
}

fn seed(grid: &FlowGrid, outlets: &[CellLocation]) -> Seeds {
    let mut pinned = vec![false; grid.len()];
    let mut frontier = Vec::with_capacity(outlets.len());

    for (origin, &outlet) in outlets.iter().enumerate() {
        let idx = grid.linear_index(outlet);
        if !pinned[idx] {
            pinned[idx] = true;
            frontier.push((outlet, origin as u32));
        }
    }

    Seeds { pinned, frontier }
}

/// Top-down maximum-length variant (sequential).
///
/// The frontier retains every competing partial path: each entry is a
/// `(cell, length, origin)` record and enqueueing is unconditional, the
/// per-cell best is only overwritten by strictly longer records. The
/// reference implementation for correctness; it re-walks shared
/// sub-paths that the single-update variant skips.
pub fn top_down_max(grid: &FlowGrid, outlets: &[CellLocation]) -> Vec<CellLocation> {
    let seeds = seed(grid, outlets);
    let mut best_len = vec![0u32; grid.len()];
    let mut source = outlets.to_vec();
    let mut max_len = vec![0u32; outlets.len()];

    let mut queue: VecDeque<(CellLocation, u32, u32)> = seeds
        .frontier
        .iter()
        .map(|&(cell, origin)| (cell, 0, origin))
        .collect();

    while let Some((cell, len, origin)) = queue.pop_front() {
        for up in grid.upstream_neighbors(cell) {
            let idx = grid.linear_index(up);
            if seeds.pinned[idx] {
                continue;
            }
            let candidate = len + 1;
            if candidate > best_len[idx] {
                best_len[idx] = candidate;
            }
            if candidate > max_len[origin as usize] {
                max_len[origin as usize] = candidate;
                source[origin as usize] = up;
            }
            queue.push_back((up, candidate, origin));
        }
    }

    source
}

/// Top-down single-update variant (sequential).
///
/// Each cell keeps a single best length; upstream neighbors are
/// re-enqueued only on strict improvement. The running per-outlet
/// maximum makes a final sweep unnecessary. Ties go to the record
/// reached first in traversal order, i.e. the upstream-enumeration
/// tie-break of the sequential family.
pub fn top_down_single(grid: &FlowGrid, outlets: &[CellLocation]) -> Vec<CellLocation> {
    let seeds = seed(grid, outlets);
    let mut best_len = vec![0u32; grid.len()];
    let mut source = outlets.to_vec();
    let mut max_len = vec![0u32; outlets.len()];

    let mut queue: VecDeque<(CellLocation, u32, u32)> = seeds
        .frontier
        .iter()
        .map(|&(cell, origin)| (cell, 0, origin))
        .collect();

    while let Some((cell, len, origin)) = queue.pop_front() {
        for up in grid.upstream_neighbors(cell) {
            let idx = grid.linear_index(up);
            if seeds.pinned[idx] {
                continue;
            }
            let candidate = len + 1;
            if candidate > best_len[idx] {
                best_len[idx] = candidate;
                if candidate > max_len[origin as usize] {
                    max_len[origin as usize] = candidate;
                    source[origin as usize] = up;
                }
                queue.push_back((up, candidate, origin));
            }
        }
    }

    source
}

/// Top-down single-update variant (level-parallel).
///
/// Bulk-synchronous: the level-L frontier is processed in parallel,
/// producing the level-L+1 frontier; the `collect` joining each level is
/// the barrier between them. Per-cell records are atomics packing
/// `(length << 32) | origin`; `Relaxed` suffices because every read
/// happens on the far side of a join.
///
/// Unlike the sequential variants this extracts results by a final scan
/// in ascending linear index, so ties among equally long paths resolve to
/// the lexicographically smallest source coordinate. Two runs on the same
/// input always agree, but the picked source may differ from the
/// sequential one when several longest paths exist.
pub fn top_down_single_parallel(grid: &FlowGrid, outlets: &[CellLocation]) -> Vec<CellLocation> {
    let seeds = seed(grid, outlets);
    let pinned = &seeds.pinned;
    let records: Vec<AtomicU64> = (0..grid.len()).map(|_| AtomicU64::new(0)).collect();

    let mut frontier = seeds.frontier.clone();
    let mut level = 0u32;

    while !frontier.is_empty() {
        level += 1;
        let len = level;
        frontier = frontier
            .into_par_iter()
            .flat_map(|(cell, origin)| {
                let mut next = Vec::new();
                for up in grid.upstream_neighbors(cell) {
                    let idx = grid.linear_index(up);
                    if pinned[idx] {
                        continue;
                    }
                    let record = ((len as u64) << 32) | origin as u64;
                    records[idx].fetch_max(record, Ordering::Relaxed);
                    next.push((up, origin));
                }
                next
            })
            .collect();
    }

    // Length 0 marks untouched cells; the only legitimate length-0
    // records are the pinned outlet cells, which are the defaults anyway.
    let mut source = outlets.to_vec();
    let mut max_len = vec![0u32; outlets.len()];
    for (idx, record) in records.iter().enumerate() {
        let record = record.load(Ordering::Relaxed);
        let len = (record >> 32) as u32;
        if len == 0 {
            continue;
        }
        let origin = (record & u64::from(u32::MAX)) as usize;
        if len > max_len[origin] {
            max_len[origin] = len;
            source[origin] = grid.cell_at(idx);
        }
    }

    source
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_all(grid: &FlowGrid, outlets: &[CellLocation]) -> [Vec<CellLocation>; 3] {
        [
            top_down_max(grid, outlets),
            top_down_single(grid, outlets),
            top_down_single_parallel(grid, outlets),
        ]
    }

    #[test]
    fn test_straight_line() {
        let grid = FlowGrid::from_codes(vec![1, 1, 1, 1, 0], 1, 5).unwrap();
        let outlet = CellLocation::new(0, 4);

        for sources in run_all(&grid, &[outlet]) {
            assert_eq!(sources, vec![CellLocation::new(0, 0)]);
        }
    }

    #[test]
    fn test_junction_sequential_tie_break() {
        let grid = FlowGrid::from_codes(
            vec![
                0, 4, 0, //
                1, 4, 16, //
                0, 0, 0,
            ],
            3,
            3,
        )
        .unwrap();
        let outlet = CellLocation::new(2, 1);

        // Sequential variants take the first branch in enumeration order:
        // the E-draining west neighbor of (1,1).
        assert_eq!(top_down_max(&grid, &[outlet]), vec![CellLocation::new(1, 0)]);
        assert_eq!(top_down_single(&grid, &[outlet]), vec![CellLocation::new(1, 0)]);

        // The parallel variant resolves the three-way length-2 tie to the
        // lexicographically smallest source coordinate.
        assert_eq!(
            top_down_single_parallel(&grid, &[outlet]),
            vec![CellLocation::new(0, 1)]
        );
    }

    #[test]
    fn test_outlet_without_upstream() {
        let grid = FlowGrid::from_codes(vec![0, 16, 0, 0], 2, 2).unwrap();
        let outlet = CellLocation::new(1, 1);

        for sources in run_all(&grid, &[outlet]) {
            assert_eq!(sources, vec![outlet]);
        }
    }

    #[test]
    fn test_two_outlets_nested_catchments() {
        // Row of cells where the left half drains east into outlet (0,2)
        // and the right half drains west into outlet (0,3), which itself
        // drains into (0,2). Pinning truncates the downstream outlet's
        // catchment at the upstream outlet.
        let grid = FlowGrid::from_codes(vec![1, 1, 0, 16, 16, 16], 1, 6).unwrap();
        let outlets = [CellLocation::new(0, 2), CellLocation::new(0, 3)];

        for sources in run_all(&grid, &outlets) {
            assert_eq!(
                sources,
                vec![CellLocation::new(0, 0), CellLocation::new(0, 5)]
            );
        }
    }

    #[test]
    fn test_duplicate_outlets() {
        let grid = FlowGrid::from_codes(vec![1, 1, 1, 0], 1, 4).unwrap();
        let outlet = CellLocation::new(0, 3);

        for sources in run_all(&grid, &[outlet, outlet]) {
            // The first listing wins the catchment; the duplicate falls
            // back to itself.
            assert_eq!(sources, vec![CellLocation::new(0, 0), outlet]);
        }
    }

    #[test]
    fn test_multi_matches_single_on_disjoint_catchments() {
        // Two independent basins on one grid
        let grid = FlowGrid::from_codes(
            vec![
                4, 4, 0, 8, //
                4, 4, 0, 4, //
                0, 0, 0, 0,
            ],
            3,
            4,
        )
        .unwrap();
        let outlets = [CellLocation::new(2, 0), CellLocation::new(2, 3)];

        let multi = top_down_single(&grid, &outlets);
        for (i, &outlet) in outlets.iter().enumerate() {
            let single = top_down_single(&grid, &[outlet]);
            assert_eq!(single[0], multi[i], "outlet {} differs", i);
        }
    }
}
