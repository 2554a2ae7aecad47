//! Double-drop longest flow path (algorithms 6 and 7)
//!
//! Two phases over the whole grid. Phase 1 counts, for every cell, the
//! neighbors draining into it. Phase 2 drops the zero-indegree cells
//! (the true sources), each carrying a `(length, source)` record one
//! step downstream: the receiving cell keeps the longer record, its
//! indegree falls by one, and at zero it is dropped in turn. Every cell
//! is processed exactly once, so the whole pass is O(N) with no
//! re-enqueueing; the record left at the outlet cell is the answer.
//!
//! Ties between equally long records go to the lexicographically
//! smaller source coordinate, in both variants, so the sequential and
//! parallel results always agree.

use crate::maybe_rayon::*;
use flowpath_core::{CellLocation, FlowGrid};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};

/// Double drop, sequential.
pub fn double_drop_seq(grid: &FlowGrid, outlet: CellLocation) -> CellLocation {
    let n = grid.len();

    // Phase 1: indegree per cell, a single gather pass over the grid
    let mut indegree: Vec<u8> = (0..n)
        .map(|idx| grid.indegree(grid.cell_at(idx)) as u8)
        .collect();

    // Phase 2: drop cells in topological order. Every cell starts as its
    // own source at length 0.
    let mut best_len = vec![0u32; n];
    let mut best_src: Vec<u32> = (0..n as u32).collect();

    let mut stack: Vec<usize> = (0..n).filter(|&idx| indegree[idx] == 0).collect();

    while let Some(idx) = stack.pop() {
        if let Some(down) = grid.downstream(grid.cell_at(idx)) {
            let di = grid.linear_index(down);
            let len = best_len[idx] + 1;
            let src = best_src[idx];

            if len > best_len[di] || (len == best_len[di] && src < best_src[di]) {
                best_len[di] = len;
                best_src[di] = src;
            }

            indegree[di] -= 1;
            if indegree[di] == 0 {
                stack.push(di);
            }
        }
    }

    grid.cell_at(best_src[grid.linear_index(outlet)] as usize)
}

/// Double drop, parallel.
///
/// Phase 1 is row-parallel with atomic adds on the counters. Phase 2
/// processes the frontier in waves: workers update the downstream record
/// with a single `fetch_max` and promote cells whose `fetch_sub` drained
/// the counter into the next wave. The `collect` joining each wave
/// orders a cell's drop after every update to it, so `Relaxed` suffices.
pub fn double_drop_parallel(grid: &FlowGrid, outlet: CellLocation) -> CellLocation {
    let (rows, cols) = grid.shape();
    let n = grid.len();

    let indegree: Vec<AtomicU8> = (0..n).map(|_| AtomicU8::new(0)).collect();
    (0..rows).into_par_iter().for_each(|row| {
        for col in 0..cols {
            if let Some(down) = grid.downstream(CellLocation::new(row, col)) {
                indegree[grid.linear_index(down)].fetch_add(1, Ordering::Relaxed);
            }
        }
    });

    let best: Vec<AtomicU64> = (0..n)
        .map(|idx| AtomicU64::new(pack(0, idx as u32)))
        .collect();

    let mut wave: Vec<usize> = (0..n)
        .filter(|&idx| indegree[idx].load(Ordering::Relaxed) == 0)
        .collect();

    while !wave.is_empty() {
        wave = wave
            .into_par_iter()
            .filter_map(|idx| {
                let down = grid.downstream(grid.cell_at(idx))?;
                let di = grid.linear_index(down);

                let (len, src) = unpack(best[idx].load(Ordering::Relaxed));
                best[di].fetch_max(pack(len + 1, src), Ordering::Relaxed);

                (indegree[di].fetch_sub(1, Ordering::Relaxed) == 1).then_some(di)
            })
            .collect();
    }

    let (_, src) = unpack(best[grid.linear_index(outlet)].load(Ordering::Relaxed));
    grid.cell_at(src as usize)
}

/// Pack a record so that `fetch_max` realizes "greater length wins,
/// ties to the smaller source index": the source occupies the low word
/// complemented.
fn pack(len: u32, src: u32) -> u64 {
    ((len as u64) << 32) | u64::from(u32::MAX - src)
}

fn unpack(record: u64) -> (u32, u32) {
    (
        (record >> 32) as u32,
        u32::MAX - (record & u64::from(u32::MAX)) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_orders_by_length_then_source() {
        assert!(pack(2, 7) > pack(1, 0));
        // Equal length: the smaller source index must compare greater
        assert!(pack(2, 3) > pack(2, 5));
        assert_eq!(unpack(pack(17, 42)), (17, 42));
    }

    #[test]
    fn test_straight_line() {
        let grid = FlowGrid::from_codes(vec![1, 1, 1, 1, 0], 1, 5).unwrap();
        let outlet = CellLocation::new(0, 4);

        assert_eq!(double_drop_seq(&grid, outlet), CellLocation::new(0, 0));
        assert_eq!(double_drop_parallel(&grid, outlet), CellLocation::new(0, 0));
    }

    #[test]
    fn test_no_upstream_returns_outlet() {
        let grid = FlowGrid::from_codes(vec![0, 0, 0, 0], 2, 2).unwrap();
        let outlet = CellLocation::new(1, 1);

        assert_eq!(double_drop_seq(&grid, outlet), outlet);
        assert_eq!(double_drop_parallel(&grid, outlet), outlet);
    }

    #[test]
    fn test_junction_lex_tie_break() {
        // Three branches of length 2 end at (1,0), (0,1) and (1,2); both
        // variants resolve the tie to the lex smallest source (0,1).
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

        assert_eq!(double_drop_seq(&grid, outlet), CellLocation::new(0, 1));
        assert_eq!(double_drop_parallel(&grid, outlet), CellLocation::new(0, 1));
    }

    #[test]
    fn test_variants_agree_on_converging_grid() {
        // All eight neighbors drain into the center
        let grid = FlowGrid::from_codes(
            vec![
                2, 4, 8, //
                1, 0, 16, //
                128, 64, 32,
            ],
            3,
            3,
        )
        .unwrap();
        let outlet = CellLocation::new(1, 1);

        let seq = double_drop_seq(&grid, outlet);
        let par = double_drop_parallel(&grid, outlet);
        assert_eq!(seq, par);
        // Length-1 tie among all eight: lex smallest is (0,0)
        assert_eq!(seq, CellLocation::new(0, 0));
    }
}
