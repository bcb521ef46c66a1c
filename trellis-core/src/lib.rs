//! Trellis core library.
//!
//! Concurrent neighbour-list maintenance for a single-layer navigable
//! small-world graph. Each graph node owns a [`ConcurrentNeighbourSet`]
//! whose degree is loosely capped and whose edges stay diverse under
//! concurrent back-link insertion. Search probes feed candidates into those
//! sets through a [`BoundedCandidateList`].
//!
//! # Metrics
//!
//! When the `metrics` feature is enabled the neighbour sets emit:
//!
//! - `neighbour_set_evictions_diverse` (counter)
//! - `neighbour_set_evictions_fallback` (counter)
//! - `neighbour_set_eviction_races` (counter)
//! - `neighbour_set_diversity_rejections` (counter)
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidates;
mod encoding;
mod error;
mod graph;
mod neighbours;
mod params;
mod score;
mod search;
mod seen;

pub use crate::{
    candidates::{BoundedCandidateList, NeighbourArray, ScoredNeighbours},
    encoding::{EdgeKey, NodeId},
    error::{Result, TrellisError, TrellisErrorCode},
    graph::NeighbourGraph,
    neighbours::ConcurrentNeighbourSet,
    params::GraphParams,
    score::ScoreBetween,
    search::search_layer,
    seen::SparseSeenSet,
};

#[cfg(test)]
pub(crate) mod test_utils;
