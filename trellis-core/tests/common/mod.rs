//! Shared fixtures for the `trellis-core` integration tests.

use rand::{Rng, SeedableRng, rngs::SmallRng};
use trellis_core::NodeId;

/// Seeded cloud of points in the unit square.
#[derive(Clone, Debug)]
pub struct PointCloud {
    points: Vec<[f32; 2]>,
}

impl PointCloud {
    pub fn random(len: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let points = (0..len)
            .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.points.len()).map(|index| NodeId::try_from(index).expect("ids fit in u32"))
    }

    /// Negated squared distance between two stored points.
    pub fn score(&self, left: NodeId, right: NodeId) -> f32 {
        let [ax, ay] = self.point(left);
        let [bx, by] = self.point(right);
        -((ax - bx).powi(2) + (ay - by).powi(2))
    }

    /// The `k` best-scoring ids for `query`, found by brute force.
    pub fn exact_best(&self, query: NodeId, k: usize) -> Vec<NodeId> {
        let mut ranked: Vec<_> = self.ids().map(|id| (id, self.score(query, id))).collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().take(k).map(|(id, _)| id).collect()
    }

    fn point(&self, node: NodeId) -> [f32; 2] {
        let index = usize::try_from(node).expect("ids fit in usize");
        self.points[index]
    }
}
