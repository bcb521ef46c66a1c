//! Parameter handling for neighbour sets and search probes.

use crate::{error::TrellisError, seen::SparseSeenSet};

/// Configuration shared by the neighbour sets of a graph and the probes that
/// feed them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphParams {
    max_connections: usize,
    beam_width: usize,
    seen_dense_limit: usize,
}

impl GraphParams {
    /// Creates a parameter set with an explicit degree cap and probe width.
    ///
    /// # Errors
    /// Returns [`TrellisError::InvalidCapacity`] when `max_connections` is
    /// zero and [`TrellisError::InvalidParameters`] when `beam_width` is
    /// smaller than `max_connections`.
    ///
    /// # Examples
    /// ```
    /// use trellis_core::GraphParams;
    /// let params = GraphParams::new(16, 64).expect("parameters must be valid");
    /// assert_eq!(params.max_connections(), 16);
    /// assert_eq!(params.beam_width(), 64);
    /// ```
    pub fn new(max_connections: usize, beam_width: usize) -> Result<Self, TrellisError> {
        if max_connections == 0 {
            return Err(TrellisError::zero_capacity("max_connections"));
        }
        if beam_width < max_connections {
            return Err(TrellisError::InvalidParameters {
                reason: format!(
                    "beam_width ({beam_width}) must be >= max_connections ({max_connections})"
                ),
            });
        }
        Ok(Self {
            max_connections,
            beam_width,
            seen_dense_limit: SparseSeenSet::DEFAULT_DENSE_LIMIT,
        })
    }

    /// Overrides how many low node identifiers the probe's seen-set tracks
    /// in its dense bitset.
    #[must_use]
    pub fn with_seen_dense_limit(mut self, limit: usize) -> Self {
        self.seen_dense_limit = limit;
        self
    }

    /// Returns the target maximum degree of every neighbour set.
    #[must_use]
    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    /// Returns the candidate-list capacity used by search probes.
    #[must_use]
    pub fn beam_width(&self) -> usize {
        self.beam_width
    }

    /// Returns the dense window of the probe's seen-set.
    #[must_use]
    pub fn seen_dense_limit(&self) -> usize {
        self.seen_dense_limit
    }
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            max_connections: 16,
            beam_width: 64,
            seen_dense_limit: SparseSeenSet::DEFAULT_DENSE_LIMIT,
        }
    }
}
