//! Recursive longest flow path (algorithms 1 and 2)
//!
//! Depth-first upstream traversal from a single outlet. Each call returns
//! the longest upstream length below a cell together with the cell ending
//! that path; a cell with no upstream neighbors is its own source at
//! length 0. Ties between equally long branches go to the branch found
//! first in the fixed upstream-enumeration order.

use crate::maybe_rayon::*;
use flowpath_core::{CellLocation, FlowGrid};

/// Longest flow path by sequential depth-first recursion.
pub fn recursive_seq(grid: &FlowGrid, outlet: CellLocation) -> CellLocation {
    longest_upstream(grid, outlet).1
}

/// Longest flow path by task-parallel recursion.
///
/// `task_limit` bounds task creation: branching cells fork their subtrees
/// into rayon's work-stealing pool while the budget lasts, decrementing it
/// per forked level; below the budget the traversal runs inline. The
/// reduction preserves enumeration order, so the result is identical to
/// [`recursive_seq`] for every `task_limit`.
pub fn recursive_task(grid: &FlowGrid, outlet: CellLocation, task_limit: u32) -> CellLocation {
    longest_upstream_forked(grid, outlet, task_limit).1
}

fn longest_upstream(grid: &FlowGrid, cell: CellLocation) -> (u32, CellLocation) {
    let mut best = (0, cell);
    for up in grid.upstream_neighbors(cell) {
        let (len, source) = longest_upstream(grid, up);
        if len + 1 > best.0 {
            best = (len + 1, source);
        }
    }
    best
}

fn longest_upstream_forked(grid: &FlowGrid, cell: CellLocation, budget: u32) -> (u32, CellLocation) {
    if budget == 0 {
        return longest_upstream(grid, cell);
    }

    // Single-child chains are followed inline; a task per chain link has
    // no parallelism to offer.
    let mut chain = 0u32;
    let mut head = cell;
    loop {
        let ups: Vec<CellLocation> = grid.upstream_neighbors(head).collect();
        match ups.len() {
            0 => return (chain, head),
            1 => {
                chain += 1;
                head = ups[0];
            }
            _ => {
                let results: Vec<(u32, CellLocation)> = ups
                    .into_par_iter()
                    .map(|up| longest_upstream_forked(grid, up, budget - 1))
                    .collect();

                // First strict maximum in enumeration order, matching the
                // sequential tie-break.
                let mut iter = results.into_iter();
                let mut best = iter.next().unwrap_or((0, head));
                for (len, source) in iter {
                    if len > best.0 {
                        best = (len, source);
                    }
                }
                return (chain + 1 + best.0, best.1);
            }
        }
    }
}
