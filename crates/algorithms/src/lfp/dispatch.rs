//! Algorithm selection and invocation
//!
//! The seven algorithm kinds are a tagged enum; the dispatcher owns the
//! mode rule (multi-outlet iff the algorithm supports it and the
//! parameter is nonzero), validates inputs and times the algorithm call
//! only, excluding all I/O.

use crate::lfp::double_drop::{double_drop_parallel, double_drop_seq};
use crate::lfp::recursive::{recursive_seq, recursive_task};
use crate::lfp::top_down::{top_down_max, top_down_single, top_down_single_parallel};
use flowpath_core::{CellLocation, Error, FlowGrid, Result};
use std::time::{Duration, Instant};

/// The seven longest flow path algorithm kinds, indexed 1-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LfpAlgorithm {
    RecursiveSeq,
    RecursiveTask,
    TopDownMaxSeq,
    TopDownSingleSeq,
    TopDownSinglePar,
    DoubleDropSeq,
    DoubleDropPar,
}

impl LfpAlgorithm {
    /// All kinds in index order.
    pub const ALL: [LfpAlgorithm; 7] = [
        LfpAlgorithm::RecursiveSeq,
        LfpAlgorithm::RecursiveTask,
        LfpAlgorithm::TopDownMaxSeq,
        LfpAlgorithm::TopDownSingleSeq,
        LfpAlgorithm::TopDownSinglePar,
        LfpAlgorithm::DoubleDropSeq,
        LfpAlgorithm::DoubleDropPar,
    ];

    /// Resolve a 1-based algorithm index.
    pub fn from_index(index: i64) -> Result<Self> {
        match index {
            1 => Ok(LfpAlgorithm::RecursiveSeq),
            2 => Ok(LfpAlgorithm::RecursiveTask),
            3 => Ok(LfpAlgorithm::TopDownMaxSeq),
            4 => Ok(LfpAlgorithm::TopDownSingleSeq),
            5 => Ok(LfpAlgorithm::TopDownSinglePar),
            6 => Ok(LfpAlgorithm::DoubleDropSeq),
            7 => Ok(LfpAlgorithm::DoubleDropPar),
            _ => Err(Error::InvalidAlgorithmIndex(index)),
        }
    }

    /// The 1-based index of this kind.
    pub fn index(self) -> u8 {
        match self {
            LfpAlgorithm::RecursiveSeq => 1,
            LfpAlgorithm::RecursiveTask => 2,
            LfpAlgorithm::TopDownMaxSeq => 3,
            LfpAlgorithm::TopDownSingleSeq => 4,
            LfpAlgorithm::TopDownSinglePar => 5,
            LfpAlgorithm::DoubleDropSeq => 6,
            LfpAlgorithm::DoubleDropPar => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LfpAlgorithm::RecursiveSeq => "recursive (sequential)",
            LfpAlgorithm::RecursiveTask => "recursive (task-based parallel)",
            LfpAlgorithm::TopDownMaxSeq => "top-down: maximum length (sequential)",
            LfpAlgorithm::TopDownSingleSeq => "top-down: single update (sequential)",
            LfpAlgorithm::TopDownSinglePar => "top-down: single update (parallel)",
            LfpAlgorithm::DoubleDropSeq => "double drop (sequential)",
            LfpAlgorithm::DoubleDropPar => "double drop (parallel)",
        }
    }

    /// Whether this kind can resolve a whole outlet list in one run.
    pub fn supports_multiple(self) -> bool {
        matches!(
            self,
            LfpAlgorithm::TopDownMaxSeq
                | LfpAlgorithm::TopDownSingleSeq
                | LfpAlgorithm::TopDownSinglePar
        )
    }

    /// Find the source cell for a single outlet.
    ///
    /// `parameter` is the task-creation limit for
    /// [`LfpAlgorithm::RecursiveTask`] and ignored by every other kind.
    pub fn execute(
        self,
        grid: &FlowGrid,
        outlet: CellLocation,
        parameter: i64,
    ) -> Result<CellLocation> {
        if !grid.contains(outlet) {
            let (row, col) = outlet.one_based();
            return Err(Error::OutletOutOfBounds {
                row: row as i64,
                col: col as i64,
                rows: grid.rows(),
                cols: grid.cols(),
            });
        }
        if parameter < 0 {
            return Err(Error::InvalidParameter {
                value: parameter,
                reason: "algorithm parameter must be non-negative",
            });
        }

        let source = match self {
            LfpAlgorithm::RecursiveSeq => recursive_seq(grid, outlet),
            LfpAlgorithm::RecursiveTask => {
                let task_limit = u32::try_from(parameter).unwrap_or(u32::MAX);
                recursive_task(grid, outlet, task_limit)
            }
            LfpAlgorithm::TopDownMaxSeq => single_of(top_down_max(grid, &[outlet]), outlet),
            LfpAlgorithm::TopDownSingleSeq => single_of(top_down_single(grid, &[outlet]), outlet),
            LfpAlgorithm::TopDownSinglePar => {
                single_of(top_down_single_parallel(grid, &[outlet]), outlet)
            }
            LfpAlgorithm::DoubleDropSeq => double_drop_seq(grid, outlet),
            LfpAlgorithm::DoubleDropPar => double_drop_parallel(grid, outlet),
        };

        Ok(source)
    }

    /// Find one source cell per outlet in outlet order.
    ///
    /// Only the top-down family implements this; other kinds report
    /// [`Error::UnsupportedMultiOutlet`].
    pub fn execute_multiple(
        self,
        grid: &FlowGrid,
        outlets: &[CellLocation],
    ) -> Result<Vec<CellLocation>> {
        for &outlet in outlets {
            if !grid.contains(outlet) {
                let (row, col) = outlet.one_based();
                return Err(Error::OutletOutOfBounds {
                    row: row as i64,
                    col: col as i64,
                    rows: grid.rows(),
                    cols: grid.cols(),
                });
            }
        }

        match self {
            LfpAlgorithm::TopDownMaxSeq => Ok(top_down_max(grid, outlets)),
            LfpAlgorithm::TopDownSingleSeq => Ok(top_down_single(grid, outlets)),
            LfpAlgorithm::TopDownSinglePar => Ok(top_down_single_parallel(grid, outlets)),
            other => Err(Error::UnsupportedMultiOutlet(other.label())),
        }
    }
}

fn single_of(mut sources: Vec<CellLocation>, outlet: CellLocation) -> CellLocation {
    sources.pop().unwrap_or(outlet)
}

/// Outcome of a dispatched run.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    /// One source per outlet (multi-outlet mode) or a single source.
    pub sources: Vec<CellLocation>,
    /// Wall-clock time of the algorithm call, excluding I/O.
    pub elapsed: Duration,
    /// Whether multi-outlet mode was used.
    pub multiple: bool,
}

/// Select and run an algorithm on raw one-based outlet coordinates.
///
/// Multi-outlet mode is chosen iff `index` names a top-down algorithm
/// and `parameter` is nonzero; parameter 0 silently falls back to
/// single-outlet mode. In single-outlet mode only the first outlet is
/// used and an empty outlet list is an error.
pub fn dispatch(
    grid: &FlowGrid,
    outlets: &[(i64, i64)],
    index: i64,
    parameter: i64,
) -> Result<DispatchReport> {
    let algorithm = LfpAlgorithm::from_index(index)?;
    if parameter < 0 {
        return Err(Error::InvalidParameter {
            value: parameter,
            reason: "algorithm parameter must be non-negative",
        });
    }

    if parameter != 0 && algorithm.supports_multiple() {
        let cells = outlets
            .iter()
            .map(|&(row, col)| CellLocation::from_one_based(row, col, grid.shape()))
            .collect::<Result<Vec<_>>>()?;

        let start = Instant::now();
        let sources = algorithm.execute_multiple(grid, &cells)?;
        let elapsed = start.elapsed();

        Ok(DispatchReport {
            sources,
            elapsed,
            multiple: true,
        })
    } else {
        let &(row, col) = outlets.first().ok_or(Error::EmptyOutletSet)?;
        let outlet = CellLocation::from_one_based(row, col, grid.shape())?;

        let start = Instant::now();
        let source = algorithm.execute(grid, outlet, parameter)?;
        let elapsed = start.elapsed();

        Ok(DispatchReport {
            sources: vec![source],
            elapsed,
            multiple: false,
        })
    }
}
