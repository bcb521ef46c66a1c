//! Best-first probe over a single graph layer.
//!
//! The probe keeps its frontier and its result in one
//! [`BoundedCandidateList`]: the list's cursor tracks the best slot not yet
//! expanded, and the list's seen set stops any node being scored twice.

use tracing::{debug, instrument, trace};

use crate::{
    candidates::{BoundedCandidateList, NeighbourArray},
    encoding::NodeId,
    error::TrellisError,
    graph::NeighbourGraph,
};

/// Fills `list` with the best nodes reachable from `entry`, ranked by
/// `query_score`.
///
/// The list is cleared first. Expansion stops once every retained slot has
/// been visited; neighbours whose score is not finite are skipped.
///
/// # Errors
/// Returns [`TrellisError::UnknownNode`] if `entry` has not been added to
/// `graph`, and [`TrellisError::InvalidParameters`] if the entry's own score
/// is not finite.
///
/// # Examples
/// ```
/// use trellis_core::{BoundedCandidateList, GraphParams, NeighbourGraph, search_layer};
///
/// let graph = NeighbourGraph::new(GraphParams::new(2, 4)?);
/// for node in 0..3 {
///     graph.add_node(node)?;
/// }
/// let unrelated = |_: u32, _: u32| 0.0_f32;
/// graph.neighbours(0).expect("added").insert(1, -1.0, &unrelated);
/// graph.neighbours(1).expect("added").insert(2, -1.0, &unrelated);
///
/// let mut list = BoundedCandidateList::new(2)?;
/// search_layer(&graph, 0, |node| node as f32, &mut list)?;
/// assert_eq!(list.nodes_copy(), vec![2, 1]);
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
#[instrument(level = "trace", skip_all, fields(entry = entry, capacity = list.capacity()))]
pub fn search_layer<Q>(
    graph: &NeighbourGraph,
    entry: NodeId,
    query_score: Q,
    list: &mut BoundedCandidateList,
) -> Result<(), TrellisError>
where
    Q: Fn(NodeId) -> f32,
{
    if !graph.contains_node(entry) {
        debug!(entry, "search entry point was never added to the graph");
        return Err(TrellisError::UnknownNode { node: entry });
    }
    let entry_score = query_score(entry);
    if !entry_score.is_finite() {
        return Err(TrellisError::InvalidParameters {
            reason: format!("entry {entry} scored {entry_score}"),
        });
    }

    list.clear();
    list.push(entry, entry_score);
    let mut expanded = 0_usize;
    while let Some(index) = list.next_unvisited() {
        let Some((node, _)) = list.get(index) else {
            break;
        };
        expanded += 1;
        let Some(neighbours) = graph.neighbours(node) else {
            continue;
        };
        for neighbour in neighbours.nodes() {
            if list.already_pushed(neighbour) {
                continue;
            }
            let score = query_score(neighbour);
            if score.is_finite() {
                list.push(neighbour, score);
            } else {
                trace!(node = neighbour, "skipping neighbour with non-finite score");
            }
        }
    }
    trace!(expanded, retained = list.len(), "probe finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        GraphParams, TrellisErrorCode, candidates::ScoredNeighbours, score::ScoreBetween,
        test_utils::LineSpace,
    };

    /// Chain 0 - 1 - 2 - 3 - 4 with unit spacing, every node linked to its
    /// immediate neighbours in both directions.
    #[fixture]
    fn chain() -> (NeighbourGraph, LineSpace) {
        let space = LineSpace::new(vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        let graph = NeighbourGraph::new(GraphParams::new(2, 4).expect("params must be valid"));
        for node in 0..5 {
            graph.add_node(node).expect("node must be new");
        }
        for node in 0..5_u32 {
            let set = graph.neighbours(node).expect("node exists");
            for other in [node.wrapping_sub(1), node + 1] {
                if other < 5 {
                    set.insert(other, space.score_between(node, other), &space);
                }
            }
        }
        (graph, space)
    }

    #[rstest]
    fn walks_the_chain_towards_the_query(chain: (NeighbourGraph, LineSpace)) {
        let (graph, space) = chain;
        let mut list = BoundedCandidateList::new(2).expect("capacity must be valid");

        search_layer(&graph, 0, |node| space.score_to(node, 3.9), &mut list)
            .expect("probe must succeed");

        assert_eq!(list.nodes_copy(), vec![4, 3]);
        assert!(list.next_unvisited().is_none());
    }

    #[rstest]
    fn scores_every_reached_node_once(chain: (NeighbourGraph, LineSpace)) {
        let (graph, space) = chain;
        let mut list = BoundedCandidateList::new(5).expect("capacity must be valid");
        let scored = std::cell::Cell::new(0_usize);

        search_layer(
            &graph,
            2,
            |node| {
                scored.set(scored.get() + 1);
                space.score_to(node, 2.0)
            },
            &mut list,
        )
        .expect("probe must succeed");

        assert_eq!(scored.get(), 5);
        assert_eq!(list.len(), 5);
        assert_eq!(list.get(0), Some((2, 0.0)));
    }

    #[rstest]
    fn clears_previous_results(chain: (NeighbourGraph, LineSpace)) {
        let (graph, space) = chain;
        let mut list = BoundedCandidateList::new(1).expect("capacity must be valid");
        list.push(99, 10.0);

        search_layer(&graph, 4, |node| space.score_to(node, 0.0), &mut list)
            .expect("probe must succeed");

        assert_eq!(list.nodes_copy(), vec![0]);
    }

    #[rstest]
    fn skips_non_finite_neighbour_scores(chain: (NeighbourGraph, LineSpace)) {
        let (graph, space) = chain;
        let mut list = BoundedCandidateList::new(5).expect("capacity must be valid");

        search_layer(
            &graph,
            0,
            |node| if node == 2 { f32::NAN } else { space.score_to(node, 0.0) },
            &mut list,
        )
        .expect("probe must succeed");

        assert_eq!(list.nodes_copy(), vec![0, 1]);
    }

    #[rstest]
    fn rejects_unknown_or_unscorable_entries(chain: (NeighbourGraph, LineSpace)) {
        let (graph, _) = chain;
        let mut list = BoundedCandidateList::new(2).expect("capacity must be valid");

        let err = search_layer(&graph, 7, |_| 0.0, &mut list).expect_err("entry 7 is unknown");
        assert_eq!(err, TrellisError::UnknownNode { node: 7 });

        let err = search_layer(&graph, 0, |_| f32::INFINITY, &mut list)
            .expect_err("infinite entry score must fail");
        assert_eq!(err.code(), TrellisErrorCode::InvalidParameters);
    }

    #[test]
    fn probe_results_feed_connect() {
        let space = LineSpace::new(vec![0.0, 1.0, 2.0, 5.0, 1.5]);
        let graph = NeighbourGraph::new(GraphParams::new(2, 4).expect("params must be valid"));
        for node in 0..4 {
            graph.add_node(node).expect("node must be new");
        }
        let links: ScoredNeighbours = [(1, space.score_between(0, 1))].into_iter().collect();
        graph.connect(0, &links, &space).expect("connect must succeed");
        let links: ScoredNeighbours = [(2, space.score_between(3, 2))].into_iter().collect();
        graph.connect(3, &links, &space).expect("connect must succeed");
        let links: ScoredNeighbours = [(1, space.score_between(2, 1))].into_iter().collect();
        graph.connect(2, &links, &space).expect("connect must succeed");

        graph.add_node(4).expect("node must be new");
        let mut list = BoundedCandidateList::new(4).expect("capacity must be valid");
        search_layer(&graph, 0, |node| space.score_between(4, node), &mut list)
            .expect("probe must succeed");
        let candidates = list.to_ascending();
        assert_eq!(candidates.len(), 4);

        graph.connect(4, &candidates, &space).expect("connect must succeed");
        let mut kept: Vec<_> = graph.neighbours(4).expect("node exists").nodes().collect();
        kept.sort_unstable();
        assert_eq!(kept, vec![1, 2]);
    }
}
