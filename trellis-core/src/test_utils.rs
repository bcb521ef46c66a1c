//! Shared test utilities for `trellis-core`.

use proptest::test_runner::Config as ProptestConfig;
use trellis_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{ScoreBetween, encoding::NodeId};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `TRELLIS_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Points on a line scored by negated distance, so nearer means higher.
///
/// Node `i` sits at `positions[i]`; the owning node of a set under test is
/// usually placed at the origin and scored with [`LineSpace::score_to`].
#[derive(Clone, Debug)]
pub(crate) struct LineSpace {
    positions: Arc<[f32]>,
    calls: Arc<AtomicUsize>,
}

impl LineSpace {
    #[must_use]
    pub(crate) fn new(positions: Vec<f32>) -> Self {
        Self {
            positions: positions.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Position of `node` on the line.
    #[must_use]
    pub(crate) fn position(&self, node: NodeId) -> f32 {
        usize::try_from(node)
            .ok()
            .and_then(|index| self.positions.get(index))
            .copied()
            .unwrap_or(f32::INFINITY)
    }

    /// Score between `node` and an arbitrary point on the line.
    #[must_use]
    pub(crate) fn score_to(&self, node: NodeId, point: f32) -> f32 {
        -(self.position(node) - point).abs()
    }

    /// Number of node identifiers covered by the space.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    /// Number of pairwise scores computed so far.
    #[must_use]
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl ScoreBetween for LineSpace {
    fn score_between(&self, left: NodeId, right: NodeId) -> f32 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.score_to(left, self.position(right))
    }
}
