//! Benchmark parameter types.
//!
//! Each struct doubles as a Criterion `BenchmarkId` parameter through its
//! `Display` impl.

use std::fmt;

/// Parameters for a neighbour-set benchmark run.
#[derive(Clone, Debug)]
pub struct NeighbourSetBenchParams {
    /// Number of candidate edges offered to the set.
    pub candidate_count: usize,
    /// Degree cap of the set under test.
    pub max_connections: usize,
}

impl fmt::Display for NeighbourSetBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},M={}", self.candidate_count, self.max_connections)
    }
}

/// Parameters for a candidate-list or probe benchmark run.
#[derive(Clone, Debug)]
pub struct ProbeBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Capacity of the candidate list.
    pub beam_width: usize,
}

impl fmt::Display for ProbeBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},ef={}", self.point_count, self.beam_width)
    }
}
