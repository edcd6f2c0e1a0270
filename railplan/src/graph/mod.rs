//! Station-pair planning graph.
//!
//! The graph is a value: a mapping from (board, alight) station pairs to the
//! train rides serving them, built once per journey date and immutable after
//! that. Construction fans out catalog fetches; everything downstream of the
//! merge is pure CPU work.

mod builder;
mod model;

pub use builder::{BuildConfig, BuildError, BuildOutcome, BuildStats, GraphBuilder};
pub use model::{LegEdge, StationPairGraph};
