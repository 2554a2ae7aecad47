//! I/O adapters: direction rasters, outlet files, result CSVs
//!
//! These are the external boundary of the system; everything behind them
//! works on in-memory grids and zero-based coordinates.

mod csv;
mod outlets;
mod raster;

pub use csv::write_sources;
pub use outlets::{parse_outlets, read_outlets};
pub use raster::read_direction_raster;
