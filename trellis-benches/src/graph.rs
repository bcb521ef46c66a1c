//! Sequential graph construction for probe benchmarks.

use trellis_core::{
    BoundedCandidateList, GraphParams, NeighbourGraph, NodeId, ScoreBetween, ScoredNeighbours,
    search_layer,
};

use crate::{error::BenchSetupError, source::SyntheticPoints};

/// Node every build and probe starts from.
pub const ENTRY: NodeId = 0;

/// Builds a single-layer graph over `points`, inserting nodes in identifier
/// order and probing from [`ENTRY`] for each one.
///
/// # Errors
/// Returns [`BenchSetupError::Graph`] if a node or probe is rejected.
pub fn build_graph(
    points: &SyntheticPoints,
    params: GraphParams,
) -> Result<NeighbourGraph, BenchSetupError> {
    let graph = NeighbourGraph::new(params);
    let mut list = BoundedCandidateList::from_params(&params);
    graph.add_node(ENTRY)?;
    for node in points.ids().skip(1) {
        graph.add_node(node)?;
        search_layer(
            &graph,
            ENTRY,
            |other| points.score_between(node, other),
            &mut list,
        )?;
        graph.connect(node, &list.to_ascending(), points)?;
    }
    Ok(graph)
}

/// Scores every node in `candidates` against `owner` and returns them worst
/// first, the order expected by
/// [`trellis_core::ConcurrentNeighbourSet::insert_diverse`].
#[must_use]
pub fn ascending_candidates(
    points: &SyntheticPoints,
    owner: NodeId,
    candidates: impl IntoIterator<Item = NodeId>,
) -> ScoredNeighbours {
    candidates
        .into_iter()
        .filter(|&candidate| candidate != owner)
        .map(|candidate| (candidate, points.score_between(owner, candidate)))
        .collect()
}
