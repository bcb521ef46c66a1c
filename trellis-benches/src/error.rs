//! Benchmark setup error type.
//!
//! Setup functions propagate failures with `?` and the bench entry points
//! turn them into a single panic message.

use crate::source::SyntheticError;
use trellis_core::TrellisError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic data generation failed.
    #[error("synthetic source generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A graph parameter, node or probe was rejected.
    #[error("graph operation failed: {0}")]
    Graph(#[from] TrellisError),
}
