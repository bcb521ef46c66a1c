//! Single-layer graph store mapping node identifiers to neighbour sets.
//!
//! Lookups take a brief shard lock inside the map and hand out an `Arc` to the
//! node's [`ConcurrentNeighbourSet`]; all edge mutation then happens on the set
//! itself without holding any map lock.

use std::sync::Arc;

use dashmap::{DashMap, mapref::entry::Entry};
use tracing::debug;

use crate::{
    candidates::NeighbourArray,
    encoding::NodeId,
    error::TrellisError,
    neighbours::ConcurrentNeighbourSet,
    params::GraphParams,
    score::ScoreBetween,
};

/// Concurrent map from node identifier to its neighbour set.
///
/// # Examples
/// ```
/// use trellis_core::{GraphParams, NeighbourGraph, ScoredNeighbours};
///
/// let graph = NeighbourGraph::new(GraphParams::new(2, 4)?);
/// graph.add_node(0)?;
/// graph.add_node(1)?;
/// let score = |a: u32, b: u32| -(a as f32 - b as f32).abs();
/// let candidates: ScoredNeighbours = [(0, score(1, 0))].into_iter().collect();
/// graph.connect(1, &candidates, &score)?;
/// assert!(graph.neighbours(0).is_some_and(|set| set.contains(1)));
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
#[derive(Debug)]
pub struct NeighbourGraph {
    nodes: DashMap<NodeId, Arc<ConcurrentNeighbourSet>>,
    params: GraphParams,
}

impl NeighbourGraph {
    /// Creates an empty graph whose neighbour sets follow `params`.
    #[must_use]
    pub fn new(params: GraphParams) -> Self {
        Self {
            nodes: DashMap::new(),
            params,
        }
    }

    /// Returns the parameters shared by every neighbour set.
    #[must_use]
    #[rustfmt::skip]
    pub fn params(&self) -> &GraphParams { &self.params }

    /// Registers `node` with an empty neighbour set and returns that set.
    ///
    /// # Errors
    /// Returns [`TrellisError::DuplicateNode`] if `node` was already added.
    pub fn add_node(&self, node: NodeId) -> Result<Arc<ConcurrentNeighbourSet>, TrellisError> {
        match self.nodes.entry(node) {
            Entry::Occupied(_) => Err(TrellisError::DuplicateNode { node }),
            Entry::Vacant(slot) => {
                let set = Arc::new(ConcurrentNeighbourSet::from_params(&self.params));
                slot.insert(Arc::clone(&set));
                Ok(set)
            }
        }
    }

    /// Returns the neighbour set of `node`, if it has been added.
    #[must_use]
    pub fn neighbours(&self, node: NodeId) -> Option<Arc<ConcurrentNeighbourSet>> {
        self.nodes.get(&node).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns whether `node` has been added.
    #[must_use]
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Number of nodes added so far.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.nodes.len() }

    /// Returns whether no nodes have been added.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Returns every added node identifier in ascending order.
    #[must_use]
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<_> = self.nodes.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Chooses diverse outgoing edges for `node` from `candidates`, then adds
    /// a back-link from every kept neighbour to `node`.
    ///
    /// Back-links go through [`ConcurrentNeighbourSet::insert`], so a
    /// neighbour that is already full evicts its least diverse edge. Other
    /// threads may connect different nodes at the same time.
    ///
    /// # Errors
    /// Returns [`TrellisError::UnknownNode`] if `node` or any candidate has not
    /// been added, and [`TrellisError::InvalidParameters`] if `node` is
    /// offered as its own candidate. No edges change when an error is
    /// returned.
    pub fn connect<A, S>(&self, node: NodeId, candidates: &A, score_between: &S) -> Result<(), TrellisError>
    where
        A: NeighbourArray,
        S: ScoreBetween + ?Sized,
    {
        let Some(set) = self.neighbours(node) else {
            debug!(node, "connect called for a node that was never added");
            return Err(TrellisError::UnknownNode { node });
        };
        if let Some(&missing) = candidates
            .nodes()
            .iter()
            .find(|&&candidate| !self.contains_node(candidate))
        {
            debug!(node, candidate = missing, "candidate was never added to the graph");
            return Err(TrellisError::UnknownNode { node: missing });
        }
        if candidates.nodes().contains(&node) {
            return Err(TrellisError::InvalidParameters {
                reason: format!("node {node} offered as its own neighbour"),
            });
        }

        set.insert_diverse(candidates, score_between);
        for (neighbour, score) in set.edges() {
            if let Some(back) = self.neighbours(neighbour) {
                back.insert(node, score, score_between);
            }
        }
        Ok(())
    }
}
