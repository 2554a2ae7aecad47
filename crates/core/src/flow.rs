//! Flow direction matrix and cell coordinates
//!
//! `FlowGrid` wraps a `Raster<u8>` of D8 direction codes and answers the
//! two questions every longest-flow-path algorithm asks: where does a
//! cell drain to, and which neighbors drain into it.

use crate::error::{Error, Result};
use crate::raster::{d8, Raster};

/// A grid cell identified by zero-based (row, col).
///
/// The external interface (outlet files, result CSVs) is one-based;
/// conversion happens at that boundary only. `Ord` is lexicographic on
/// (row, col), which is the deterministic tie-break order of the
/// parallel algorithm variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellLocation {
    pub row: usize,
    pub col: usize,
}

impl CellLocation {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Build from one-based coordinates, checking them against the grid shape.
    pub fn from_one_based(row: i64, col: i64, shape: (usize, usize)) -> Result<Self> {
        let (rows, cols) = shape;
        if row < 1 || col < 1 || row as u64 > rows as u64 || col as u64 > cols as u64 {
            return Err(Error::OutletOutOfBounds {
                row,
                col,
                rows,
                cols,
            });
        }
        Ok(Self {
            row: (row - 1) as usize,
            col: (col - 1) as usize,
        })
    }

    /// One-based (row, col) for the external interface.
    pub fn one_based(&self) -> (usize, usize) {
        (self.row + 1, self.col + 1)
    }
}

/// D8 flow direction matrix.
///
/// Immutable during algorithm execution; the flow graph it encodes is
/// assumed to be a forest of in-trees (no cycles).
#[derive(Debug, Clone)]
pub struct FlowGrid {
    raster: Raster<u8>,
}

impl FlowGrid {
    pub fn new(mut raster: Raster<u8>) -> Self {
        if raster.nodata().is_none() {
            raster.set_nodata(Some(d8::NODATA));
        }
        Self { raster }
    }

    /// Build a grid from row-major direction codes. Test and demo helper.
    pub fn from_codes(codes: Vec<u8>, rows: usize, cols: usize) -> Result<Self> {
        Ok(Self::new(Raster::from_vec(codes, rows, cols)?))
    }

    pub fn rows(&self) -> usize {
        self.raster.rows()
    }

    pub fn cols(&self) -> usize {
        self.raster.cols()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.raster.shape()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.raster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raster.is_empty()
    }

    pub fn raster(&self) -> &Raster<u8> {
        &self.raster
    }

    /// Whether a zero-based cell lies on the grid.
    pub fn contains(&self, cell: CellLocation) -> bool {
        cell.row < self.rows() && cell.col < self.cols()
    }

    /// Linear row-major index of a cell. Linear order equals the
    /// lexicographic (row, col) order used for tie-breaking.
    pub fn linear_index(&self, cell: CellLocation) -> usize {
        cell.row * self.cols() + cell.col
    }

    /// Cell at a linear row-major index.
    pub fn cell_at(&self, index: usize) -> CellLocation {
        CellLocation::new(index / self.cols(), index % self.cols())
    }

    /// Direction code at (row, col); out-of-range reads yield the nodata
    /// sentinel, which never drains.
    pub fn code_at(&self, row: isize, col: isize) -> u8 {
        if row < 0 || col < 0 || row as usize >= self.rows() || col as usize >= self.cols() {
            return d8::NODATA;
        }
        unsafe { self.raster.get_unchecked(row as usize, col as usize) }
    }

    /// The one neighbor this cell drains into, or `None` for sinks,
    /// nodata cells and flows leaving the grid.
    pub fn downstream(&self, cell: CellLocation) -> Option<CellLocation> {
        let code = self.code_at(cell.row as isize, cell.col as isize);
        let (dr, dc) = d8::delta(code)?;
        let nr = cell.row as isize + dr;
        let nc = cell.col as isize + dc;
        if nr < 0 || nc < 0 || nr as usize >= self.rows() || nc as usize >= self.cols() {
            return None;
        }
        Some(CellLocation::new(nr as usize, nc as usize))
    }

    /// The neighbors whose direction code points into `cell`, in the
    /// fixed code order E, SE, S, SW, W, NW, N, NE.
    ///
    /// For each code the candidate sits at the inverse offset: the
    /// neighbor draining east into `cell` is its west neighbor. Nodata
    /// cells hold no code and therefore never qualify.
    pub fn upstream_neighbors(&self, cell: CellLocation) -> impl Iterator<Item = CellLocation> + '_ {
        d8::CODES
            .iter()
            .zip(d8::OFFSETS.iter())
            .filter_map(move |(&code, &(dr, dc))| {
                let nr = cell.row as isize - dr;
                let nc = cell.col as isize - dc;
                if self.code_at(nr, nc) == code {
                    Some(CellLocation::new(nr as usize, nc as usize))
                } else {
                    None
                }
            })
    }

    /// Number of neighbors draining into `cell`.
    pub fn indegree(&self, cell: CellLocation) -> usize {
        self.upstream_neighbors(cell).count()
    }
}
