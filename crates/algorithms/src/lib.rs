//! # Flowpath Algorithms
//!
//! Longest flow path (LFP) algorithms over D8 flow direction grids.
//!
//! Given a flow direction matrix and an outlet cell, every algorithm
//! returns the *source*: the upstream cell terminating the longest chain
//! of cells draining into that outlet. Seven variants trade traversal
//! order, work per cell and concurrency strategy:
//!
//! 1. recursive (sequential)
//! 2. recursive (task-based parallel)
//! 3. top-down: maximum length (sequential)
//! 4. top-down: single update (sequential)
//! 5. top-down: single update (parallel)
//! 6. double drop (sequential)
//! 7. double drop (parallel)
//!
//! The top-down family (3-5) additionally supports resolving all outlets
//! of a list in one traversal.

pub mod lfp;
mod maybe_rayon;

pub use lfp::{dispatch, DispatchReport, LfpAlgorithm};
