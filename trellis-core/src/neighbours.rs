//! Concurrent, degree-capped neighbour set owned by one graph node.
//!
//! Edges live in a lock-free skip list keyed by [`EdgeKey`], so the set can be
//! walked best-to-worst or worst-to-best while other threads insert and
//! remove. The degree cap is maintained loosely: a set may briefly hold
//! `max_connections + t` edges, where `t` is the number of threads inside
//! [`ConcurrentNeighbourSet::insert`] at that moment, and returns to the cap
//! as soon as those calls finish. Every insertion that tips the counter over
//! the cap evicts exactly one edge, preferring one made redundant by a closer
//! neighbour over the plain worst edge.
//!
//! Iteration is weakly consistent. It never fails under concurrent mutation
//! and only yields edges that were present at some point during the walk,
//! but it may miss edges removed mid-walk or include edges added mid-walk.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crossbeam_skiplist::SkipMap;
use tracing::{instrument, trace};

use crate::{
    candidates::NeighbourArray,
    encoding::{EdgeKey, NodeId},
    error::TrellisError,
    params::GraphParams,
    score::ScoreBetween,
};

/// Adjacency list of one graph node, safe to mutate from many threads.
///
/// # Examples
/// ```
/// use trellis_core::ConcurrentNeighbourSet;
///
/// let set = ConcurrentNeighbourSet::new(2)?;
/// let unrelated = |_: u32, _: u32| 0.0_f32;
/// set.insert(1, 0.9, &unrelated);
/// set.insert(2, 0.8, &unrelated);
/// set.insert(3, 0.95, &unrelated);
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.nodes().collect::<Vec<_>>(), vec![3, 1]);
/// # Ok::<(), trellis_core::TrellisError>(())
/// ```
#[derive(Debug)]
pub struct ConcurrentNeighbourSet {
    /// Edge keys mapped to the token of the insertion that created them.
    edges: SkipMap<EdgeKey, u64>,
    max_connections: usize,
    size: AtomicUsize,
    tokens: AtomicU64,
}

#[derive(Clone, Copy, Debug)]
enum Eviction {
    Redundant,
    Fallback,
}

impl ConcurrentNeighbourSet {
    /// Creates an empty set capped at `max_connections` edges.
    ///
    /// # Errors
    /// Returns [`TrellisError::InvalidCapacity`] when `max_connections` is
    /// zero.
    pub fn new(max_connections: usize) -> Result<Self, TrellisError> {
        if max_connections == 0 {
            return Err(TrellisError::zero_capacity("max_connections"));
        }
        Ok(Self::with_cap(max_connections))
    }

    /// Creates an empty set capped at [`GraphParams::max_connections`].
    #[must_use]
    pub fn from_params(params: &GraphParams) -> Self {
        Self::with_cap(params.max_connections())
    }

    fn with_cap(max_connections: usize) -> Self {
        Self {
            edges: SkipMap::new(),
            max_connections,
            size: AtomicUsize::new(0),
            tokens: AtomicU64::new(0),
        }
    }

    /// Target maximum degree of the set.
    #[must_use]
    #[rustfmt::skip]
    pub fn max_connections(&self) -> usize { self.max_connections }

    /// Approximate number of edges; may briefly exceed
    /// [`Self::max_connections`] while insertions are in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size.load(Ordering::Acquire)
    }

    /// Returns whether the set currently reports no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates neighbour identifiers from the best score to the worst.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.iter().map(|entry| entry.key().node())
    }

    /// Iterates `(node, score)` edges from the best score to the worst.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, f32)> + '_ {
        self.edges.iter().map(|entry| entry.key().decode())
    }

    /// Returns whether any edge currently points at `node`.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes().any(|neighbour| neighbour == node)
    }

    /// Adds the edge `(node, score)` and, if that pushes the set over its
    /// cap, evicts the least diverse edge (which need not be the new one).
    ///
    /// Re-inserting an edge that is already present is a no-op.
    pub fn insert<S>(&self, node: NodeId, score: f32, score_between: &S)
    where
        S: ScoreBetween + ?Sized,
    {
        let key = EdgeKey::new(node, score);
        let token = self.tokens.fetch_add(1, Ordering::Relaxed);
        if *self.edges.get_or_insert(key, token).value() != token {
            return;
        }
        if self.size.fetch_add(1, Ordering::AcqRel) >= self.max_connections {
            self.remove_least_diverse(score_between);
            self.size.fetch_sub(1, Ordering::AcqRel);
        }
    }

    /// Offers `candidates` from best to worst, inserting each one that is
    /// diverse with respect to the live edges until the set is full.
    ///
    /// Rejected candidates are not retried. Insertion goes through
    /// [`Self::insert`] because back-links from other threads may land at the
    /// same time, and diversity is judged against whatever the set holds at
    /// the moment each candidate is considered.
    #[instrument(
        level = "trace",
        skip_all,
        fields(candidates = candidates.len(), max_connections = self.max_connections),
    )]
    pub fn insert_diverse<A, S>(&self, candidates: &A, score_between: &S)
    where
        A: NeighbourArray,
        S: ScoreBetween + ?Sized,
    {
        // Diversity is enforced for every candidate, not only once the set
        // overflows.
        for (node, score) in candidates.best_first() {
            if self.len() >= self.max_connections {
                break;
            }
            if self.is_diverse(node, score, score_between) {
                self.insert(node, score, score_between);
            } else {
                record_diversity_rejection();
            }
        }
    }

    /// Returns `true` when no current neighbour is closer to `node` than
    /// `score`, the candidate's similarity to the owning node.
    pub fn is_diverse<S>(&self, node: NodeId, score: f32, score_between: &S) -> bool
    where
        S: ScoreBetween + ?Sized,
    {
        self.nodes()
            .all(|existing| score_between.score_between(existing, node) <= score)
    }

    /// Removes one edge. Scans from the worst edge upwards for an edge that
    /// is at least as close to some better-ranked neighbour as it is to the
    /// owning node; if none exists the worst edge goes.
    fn remove_least_diverse<S>(&self, score_between: &S)
    where
        S: ScoreBetween + ?Sized,
    {
        for worse in self.edges.iter().rev() {
            let key = *worse.key();
            let (worse_node, worse_score) = key.decode();
            let redundant = self.edges.range(..key).rev().any(|better| {
                score_between.score_between(worse_node, better.key().node()) >= worse_score
            });
            if !redundant {
                continue;
            }
            if worse.remove() {
                trace!(node = worse_node, score = worse_score, "evicted redundant neighbour");
                record_eviction(Eviction::Redundant);
                return;
            }
            trace!(node = worse_node, "redundant neighbour already evicted; continuing scan");
            record_eviction_race();
        }

        if let Some(worst) = self.edges.pop_back() {
            let (node, score) = worst.key().decode();
            trace!(node, score, "no redundant neighbour; evicted worst edge");
            record_eviction(Eviction::Fallback);
        }
    }
}

#[cfg(feature = "metrics")]
fn record_eviction(kind: Eviction) {
    match kind {
        Eviction::Redundant => metrics::counter!("neighbour_set_evictions_diverse").increment(1),
        Eviction::Fallback => metrics::counter!("neighbour_set_evictions_fallback").increment(1),
    }
}

#[cfg(not(feature = "metrics"))]
fn record_eviction(_kind: Eviction) {}

#[cfg(feature = "metrics")]
fn record_eviction_race() {
    metrics::counter!("neighbour_set_eviction_races").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_eviction_race() {}

#[cfg(feature = "metrics")]
fn record_diversity_rejection() {
    metrics::counter!("neighbour_set_diversity_rejections").increment(1);
}

#[cfg(not(feature = "metrics"))]
fn record_diversity_rejection() {}
