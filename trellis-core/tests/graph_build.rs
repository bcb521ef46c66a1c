#![expect(clippy::expect_used, reason = "tests require contextual panics")]
//! Builds whole graphs from many threads and checks the structure and the
//! quality of the resulting probes.

mod common;

use common::PointCloud;
use rayon::prelude::*;
use rstest::{fixture, rstest};
use trellis_core::{
    BoundedCandidateList, GraphParams, NeighbourArray, NeighbourGraph, NodeId, search_layer,
};

const ENTRY: NodeId = 0;

#[fixture]
fn cloud() -> PointCloud {
    PointCloud::random(600, 0x5eed)
}

fn build(cloud: &PointCloud, params: GraphParams) -> NeighbourGraph {
    let graph = NeighbourGraph::new(params);
    for id in cloud.ids() {
        graph.add_node(id).expect("ids are unique");
    }
    let score = |left, right| cloud.score(left, right);

    let others: Vec<NodeId> = cloud.ids().filter(|&id| id != ENTRY).collect();
    others.par_iter().for_each_init(
        || BoundedCandidateList::from_params(graph.params()),
        |list, &node| {
            search_layer(&graph, ENTRY, |other| cloud.score(node, other), list)
                .expect("entry is always present");
            graph
                .connect(node, &list.to_ascending(), &score)
                .expect("candidates are known nodes");
        },
    );
    graph
}

#[rstest]
#[case::narrow(GraphParams::new(4, 16).expect("params must be valid"))]
#[case::default(GraphParams::default())]
fn parallel_build_respects_degree_caps(cloud: PointCloud, #[case] params: GraphParams) {
    let graph = build(&cloud, params);

    assert_eq!(graph.len(), cloud.len());
    for node in graph.node_ids() {
        let set = graph.neighbours(node).expect("node was added");
        let edges: Vec<_> = set.edges().collect();
        assert!(edges.len() <= params.max_connections(), "node {node} over cap");
        assert_eq!(set.len(), edges.len(), "node {node} size counter drifted");
        assert!(
            edges.windows(2).all(|pair| pair[0].1 >= pair[1].1),
            "node {node} edges out of order: {edges:?}",
        );
        assert!(edges.iter().all(|&(neighbour, _)| neighbour != node));
    }
}

#[rstest]
fn parallel_build_supports_accurate_probes(cloud: PointCloud) {
    const K: usize = 5;
    let graph = build(&cloud, GraphParams::new(8, 32).expect("params must be valid"));
    let mut list = BoundedCandidateList::new(32).expect("capacity must be valid");

    let queries: Vec<NodeId> = cloud.ids().step_by(20).collect();
    let mut hits = 0_usize;
    for &query in &queries {
        search_layer(&graph, ENTRY, |other| cloud.score(query, other), &mut list)
            .expect("entry is always present");
        let found = &list.nodes()[..K.min(list.len())];
        hits += cloud
            .exact_best(query, K)
            .iter()
            .filter(|id| found.contains(id))
            .count();
    }

    let recall = hits as f64 / (queries.len() * K) as f64;
    assert!(recall >= 0.7, "recall@{K} was {recall:.3}");
}
