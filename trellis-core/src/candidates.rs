//! Candidate arrays consumed by search probes and neighbour selection.
//!
//! [`BoundedCandidateList`] is the fixed-capacity, best-first work list of a
//! single probe. [`ScoredNeighbours`] is the growable ascending list handed to
//! [`crate::ConcurrentNeighbourSet::insert_diverse`]. Both expose their
//! contents through [`NeighbourArray`], whose `scores_descending` flag lets
//! consumers walk either convention from best to worst.

use crate::{encoding::NodeId, error::TrellisError, params::GraphParams, seen::SparseSeenSet};

/// Read-only view over parallel `(node, score)` arrays sorted by score.
pub trait NeighbourArray {
    /// Number of live entries.
    fn len(&self) -> usize;

    /// Returns whether the array holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live node identifiers, index-aligned with [`Self::scores`].
    fn nodes(&self) -> &[NodeId];

    /// Live scores, sorted in the direction reported by
    /// [`Self::scores_descending`].
    fn scores(&self) -> &[f32];

    /// `true` when index zero holds the best score.
    fn scores_descending(&self) -> bool;

    /// Iterates the entries from the best score to the worst.
    fn best_first(&self) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        let len = self.len().min(self.nodes().len()).min(self.scores().len());
        let descending = self.scores_descending();
        (0..len)
            .map(move |offset| if descending { offset } else { len - 1 - offset })
            .filter_map(move |index| Some((*self.nodes().get(index)?, *self.scores().get(index)?)))
    }
}

/// Fixed-capacity list of candidates sorted by descending score, with a
/// visited flag per slot and a cursor driving best-first expansion.
///
/// Every node ever pushed is remembered until [`Self::clear`], so callers can
/// skip scoring nodes that were already offered. A push that lands ahead of
/// the cursor rewinds it, so [`Self::next_unvisited`] always yields the best
/// unvisited candidate even after expansion has moved past that rank.
///
/// The list is owned by one probe and is not shared between threads.
///
/// # Examples
/// ```
/// use trellis_core::{BoundedCandidateList, NeighbourArray};
///
/// let mut list = BoundedCandidateList::new(3)?;
/// list.push(10, 5.0);
/// list.push(11, 4.0);
/// list.push(12, 3.0);
/// list.push(13, 2.0);
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.nodes_copy(), vec![10, 11, 12]);
/// assert!(list.already_pushed(13));
/// assert_eq!(list.next_unvisited(), Some(0));
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
#[derive(Clone, Debug)]
pub struct BoundedCandidateList {
    nodes: Box<[NodeId]>,
    scores: Box<[f32]>,
    visited: Box<[bool]>,
    size: usize,
    cursor: usize,
    seen: SparseSeenSet,
}

impl BoundedCandidateList {
    /// Creates an empty list holding at most `capacity` candidates.
    ///
    /// # Errors
    /// Returns [`TrellisError::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, TrellisError> {
        if capacity == 0 {
            return Err(TrellisError::zero_capacity("capacity"));
        }
        Ok(Self::with_seen(capacity, SparseSeenSet::new()))
    }

    /// Creates a list sized to the probe width of `params`.
    #[must_use]
    pub fn from_params(params: &GraphParams) -> Self {
        Self::with_seen(
            params.beam_width(),
            SparseSeenSet::with_dense_limit(params.seen_dense_limit()),
        )
    }

    fn with_seen(capacity: usize, seen: SparseSeenSet) -> Self {
        Self {
            nodes: vec![0; capacity].into_boxed_slice(),
            scores: vec![0.0; capacity].into_boxed_slice(),
            visited: vec![false; capacity].into_boxed_slice(),
            size: 0,
            cursor: 0,
            seen,
        }
    }

    /// Maximum number of candidates retained.
    #[must_use]
    #[rustfmt::skip]
    pub fn capacity(&self) -> usize { self.nodes.len() }

    /// Returns whether `node` has been pushed since the last clear, whether
    /// or not it was kept.
    #[must_use]
    pub fn already_pushed(&self, node: NodeId) -> bool {
        self.seen.contains(node)
    }

    /// Offers a candidate to the list.
    ///
    /// The node is always recorded as pushed. When the list is full and
    /// `score` is not strictly better than the current worst entry the
    /// candidate is discarded. Otherwise it is inserted ahead of any entries
    /// with an equal or lower score, the worst entry falls off a full list,
    /// and the cursor rewinds if the new entry lands before it.
    pub fn push(&mut self, node: NodeId, score: f32) {
        self.seen.add(node);
        let capacity = self.capacity();
        if self.size == capacity && self.worst_score().is_some_and(|worst| score <= worst) {
            return;
        }

        let index = self.scores[..self.size].partition_point(|&existing| existing > score);
        let end = if self.size < capacity {
            self.size
        } else {
            self.size - 1
        };
        if index < end {
            self.nodes.copy_within(index..end, index + 1);
            self.scores.copy_within(index..end, index + 1);
            self.visited.copy_within(index..end, index + 1);
        }

        self.nodes[index] = node;
        self.scores[index] = score;
        self.visited[index] = false;
        if self.size < capacity {
            self.size += 1;
        }
        if index < self.cursor {
            self.cursor = index;
        }
    }

    /// Marks the best unvisited candidate as visited and returns its index,
    /// or `None` once every live candidate has been visited.
    pub fn next_unvisited(&mut self) -> Option<usize> {
        while self.cursor < self.size {
            let index = self.cursor;
            self.cursor += 1;
            if let Some(visited) = self.visited.get_mut(index)
                && !*visited
            {
                *visited = true;
                return Some(index);
            }
        }
        None
    }

    /// Returns the candidate stored at `index`, if live.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<(NodeId, f32)> {
        if index >= self.size {
            return None;
        }
        Some((*self.nodes.get(index)?, *self.scores.get(index)?))
    }

    /// Copies out the live node identifiers, best first.
    #[must_use]
    pub fn nodes_copy(&self) -> Vec<NodeId> {
        NeighbourArray::nodes(self).to_vec()
    }

    /// Copies out the live scores, best first.
    #[must_use]
    pub fn scores_copy(&self) -> Vec<f32> {
        NeighbourArray::scores(self).to_vec()
    }

    /// Empties the list and forgets every pushed node so it can serve the
    /// next probe.
    pub fn clear(&mut self) {
        self.size = 0;
        self.cursor = 0;
        self.seen.clear();
    }

    /// Converts the live candidates into an ascending [`ScoredNeighbours`].
    #[must_use]
    pub fn to_ascending(&self) -> ScoredNeighbours {
        let nodes = NeighbourArray::nodes(self).iter().rev().copied();
        let scores = NeighbourArray::scores(self).iter().rev().copied();
        nodes.zip(scores).collect()
    }

    fn worst_score(&self) -> Option<f32> {
        self.size
            .checked_sub(1)
            .and_then(|last| self.scores.get(last))
            .copied()
    }
}

impl NeighbourArray for BoundedCandidateList {
    #[rustfmt::skip]
    fn len(&self) -> usize { self.size }

    fn nodes(&self) -> &[NodeId] {
        self.nodes.get(..self.size).unwrap_or_default()
    }

    fn scores(&self) -> &[f32] {
        self.scores.get(..self.size).unwrap_or_default()
    }

    #[rustfmt::skip]
    fn scores_descending(&self) -> bool { true }
}

/// Growable list of candidates kept in ascending score order (worst first).
///
/// This is the input convention of
/// [`crate::ConcurrentNeighbourSet::insert_diverse`], which consumes it from
/// the back.
///
/// # Examples
/// ```
/// use trellis_core::{NeighbourArray, ScoredNeighbours};
///
/// let mut candidates = ScoredNeighbours::new();
/// candidates.push(1, 0.9);
/// candidates.push(2, 0.1);
/// candidates.push(3, 0.5);
/// assert_eq!(candidates.nodes(), &[2, 3, 1]);
/// assert!(!candidates.scores_descending());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoredNeighbours {
    nodes: Vec<NodeId>,
    scores: Vec<f32>,
}

impl ScoredNeighbours {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            scores: Vec::with_capacity(capacity),
        }
    }

    /// Inserts a candidate, keeping scores ascending. Equal scores keep their
    /// insertion order.
    pub fn push(&mut self, node: NodeId, score: f32) {
        let index = self.scores.partition_point(|&existing| existing <= score);
        self.nodes.insert(index, node);
        self.scores.insert(index, score);
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.scores.clear();
    }

    /// Iterates `(node, score)` pairs worst first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        self.nodes.iter().copied().zip(self.scores.iter().copied())
    }
}

impl NeighbourArray for ScoredNeighbours {
    #[rustfmt::skip]
    fn len(&self) -> usize { self.nodes.len() }

    #[rustfmt::skip]
    fn nodes(&self) -> &[NodeId] { &self.nodes }

    #[rustfmt::skip]
    fn scores(&self) -> &[f32] { &self.scores }

    #[rustfmt::skip]
    fn scores_descending(&self) -> bool { false }
}

impl FromIterator<(NodeId, f32)> for ScoredNeighbours {
    fn from_iter<I: IntoIterator<Item = (NodeId, f32)>>(iter: I) -> Self {
        let mut neighbours = Self::new();
        for (node, score) in iter {
            neighbours.push(node, score);
        }
        neighbours
    }
}
