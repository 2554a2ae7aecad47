//! Longest flow path algorithm family
//!
//! All algorithms share one input model (an immutable [`FlowGrid`] plus
//! outlet cells) and return one source cell per outlet. They differ in
//! traversal order and concurrency strategy; see the module docs of
//! [`recursive`], [`top_down`] and [`double_drop`].

pub(crate) mod dispatch;
pub(crate) mod double_drop;
pub(crate) mod recursive;
pub(crate) mod top_down;

pub use dispatch::{dispatch, DispatchReport, LfpAlgorithm};
pub use double_drop::{double_drop_parallel, double_drop_seq};
pub use recursive::{recursive_seq, recursive_task};
pub use top_down::{top_down_max, top_down_single, top_down_single_parallel};
