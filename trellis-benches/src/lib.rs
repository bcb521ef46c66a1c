//! Benchmark support crate for trellis.
//!
//! Provides seeded synthetic point clouds, parameter types and a sequential
//! graph builder used by the Criterion benchmarks for neighbour-set
//! maintenance and candidate-list probing.

pub mod error;
pub mod graph;
pub mod params;
pub mod source;
