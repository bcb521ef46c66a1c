//! Similarity callback consulted while pruning neighbour sets.

use crate::encoding::NodeId;

/// Similarity between two arbitrary graph nodes; higher means closer.
///
/// Implementations must be pure functions of the two identifiers and must
/// use the same metric that ranked the candidates being inserted. They are
/// invoked from many threads at once, so any state they read must be
/// immutable. Closures of the form `Fn(NodeId, NodeId) -> f32` implement the
/// trait automatically.
///
/// # Examples
/// ```
/// use trellis_core::ScoreBetween;
///
/// let positions = [0.0_f32, 1.0, 4.0];
/// let score = |a: u32, b: u32| -(positions[a as usize] - positions[b as usize]).abs();
/// assert_eq!(score.score_between(0, 2), -4.0);
/// ```
pub trait ScoreBetween: Sync {
    /// Returns the similarity between `left` and `right`.
    fn score_between(&self, left: NodeId, right: NodeId) -> f32;
}

impl<F> ScoreBetween for F
where
    F: Fn(NodeId, NodeId) -> f32 + Sync,
{
    fn score_between(&self, left: NodeId, right: NodeId) -> f32 {
        self(left, right)
    }
}
