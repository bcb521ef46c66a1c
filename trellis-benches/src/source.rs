//! Seeded synthetic point clouds scored by negated squared Euclidean
//! distance.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use trellis_core::{NodeId, ScoreBetween};

/// Errors that may occur while generating a point cloud.
#[derive(Debug, thiserror::Error)]
pub enum SyntheticError {
    /// The requested point count was zero.
    #[error("point count must be greater than zero")]
    ZeroPoints,
    /// The requested dimension count was zero.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,
    /// The point count does not fit the node identifier type.
    #[error("point count {point_count} exceeds the node identifier range")]
    TooManyPoints {
        /// Number of points requested.
        point_count: usize,
    },
    /// `point_count * dimensions` overflowed.
    #[error("point count times dimensions overflows usize")]
    Overflow,
}

/// Uniform random vector configuration.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of points to generate.
    pub point_count: usize,
    /// Dimensionality of each vector.
    pub dimensions: usize,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// Row-major cloud of vectors in the unit hypercube.
#[derive(Clone, Debug)]
pub struct SyntheticPoints {
    data: Vec<f32>,
    point_count: usize,
    dimensions: usize,
}

impl SyntheticPoints {
    /// Generates uniform random vectors in `[0.0, 1.0)`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration is invalid.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.point_count == 0 {
            return Err(SyntheticError::ZeroPoints);
        }
        if config.dimensions == 0 {
            return Err(SyntheticError::ZeroDimensions);
        }
        if NodeId::try_from(config.point_count).is_err() {
            return Err(SyntheticError::TooManyPoints {
                point_count: config.point_count,
            });
        }
        let total = config
            .point_count
            .checked_mul(config.dimensions)
            .ok_or(SyntheticError::Overflow)?;

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let data = (0..total)
            .map(|_| rng.gen_range(0.0_f32..1.0_f32))
            .collect();
        Ok(Self {
            data,
            point_count: config.point_count,
            dimensions: config.dimensions,
        })
    }

    /// Number of points in the cloud.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.point_count }

    /// Returns whether the cloud is empty; never true for generated clouds.
    #[must_use]
    #[rustfmt::skip]
    pub const fn is_empty(&self) -> bool { self.point_count == 0 }

    /// Dimensionality of every point.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimensions(&self) -> usize { self.dimensions }

    /// Iterates every node identifier in the cloud.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        let count = NodeId::try_from(self.point_count).unwrap_or(NodeId::MAX);
        0..count
    }

    fn row(&self, node: NodeId) -> Option<&[f32]> {
        let start = usize::try_from(node).ok()?.checked_mul(self.dimensions)?;
        let end = start.checked_add(self.dimensions)?;
        self.data.get(start..end)
    }
}

impl ScoreBetween for SyntheticPoints {
    /// Negated squared Euclidean distance; unknown nodes score
    /// `f32::NEG_INFINITY`.
    #[expect(
        clippy::float_arithmetic,
        reason = "Euclidean distance requires floating-point arithmetic"
    )]
    fn score_between(&self, left: NodeId, right: NodeId) -> f32 {
        let (Some(lhs), Some(rhs)) = (self.row(left), self.row(right)) else {
            return f32::NEG_INFINITY;
        };
        -lhs.iter().zip(rhs).fold(0.0_f32, |acc, (a, b)| {
            let diff = a - b;
            acc + diff * diff
        })
    }
}
