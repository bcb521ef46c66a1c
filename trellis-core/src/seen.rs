//! Sparse membership set for node identifiers offered to a search probe.
//!
//! Identifiers below the dense limit live in a bitset; everything else falls
//! through to a hash set. The words touched in the bitset are tracked so
//! [`SparseSeenSet::clear`] costs time proportional to use rather than to the
//! size of the identifier space.

use std::collections::HashSet;

use crate::encoding::NodeId;

const WORD_BITS: usize = u64::BITS as usize;

/// Set of node identifiers with O(1) amortised `add`, `contains` and `clear`.
///
/// # Examples
/// ```
/// use trellis_core::SparseSeenSet;
///
/// let mut seen = SparseSeenSet::new();
/// assert!(seen.add(3));
/// assert!(!seen.add(3));
/// assert!(seen.contains(3));
/// seen.clear();
/// assert!(!seen.contains(3));
/// ```
#[derive(Clone, Debug)]
pub struct SparseSeenSet {
    dense: Vec<u64>,
    touched: Vec<usize>,
    sparse: HashSet<NodeId>,
    len: usize,
}

impl SparseSeenSet {
    /// Default number of identifiers tracked by the dense bitset.
    pub const DEFAULT_DENSE_LIMIT: usize = 4096;

    /// Creates an empty set using [`Self::DEFAULT_DENSE_LIMIT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_dense_limit(Self::DEFAULT_DENSE_LIMIT)
    }

    /// Creates an empty set whose bitset covers identifiers below
    /// `dense_limit`, rounded up to a whole word. A limit of zero sends
    /// every identifier to the hash set.
    #[must_use]
    pub fn with_dense_limit(dense_limit: usize) -> Self {
        Self {
            dense: vec![0; dense_limit.div_ceil(WORD_BITS)],
            touched: Vec::new(),
            sparse: HashSet::new(),
            len: 0,
        }
    }

    /// Records `node`, returning `true` when it was not already present.
    pub fn add(&mut self, node: NodeId) -> bool {
        let inserted = match self.dense_slot(node) {
            Some((word, mask)) => match self.dense.get_mut(word) {
                Some(bits) => {
                    let previous = *bits;
                    if previous == 0 {
                        self.touched.push(word);
                    }
                    *bits |= mask;
                    previous & mask == 0
                }
                None => self.sparse.insert(node),
            },
            None => self.sparse.insert(node),
        };
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Returns whether `node` has been recorded since the last clear.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        match self.dense_slot(node) {
            Some((word, mask)) => self.dense.get(word).is_some_and(|bits| bits & mask != 0),
            None => self.sparse.contains(&node),
        }
    }

    /// Forgets every recorded identifier, keeping allocated storage.
    pub fn clear(&mut self) {
        for word in self.touched.drain(..) {
            if let Some(bits) = self.dense.get_mut(word) {
                *bits = 0;
            }
        }
        self.sparse.clear();
        self.len = 0;
    }

    /// Number of distinct identifiers recorded since the last clear.
    #[must_use]
    #[rustfmt::skip]
    pub fn len(&self) -> usize { self.len }

    /// Returns whether no identifiers have been recorded.
    #[must_use]
    #[rustfmt::skip]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    fn dense_slot(&self, node: NodeId) -> Option<(usize, u64)> {
        let index = usize::try_from(node).ok()?;
        let word = index / WORD_BITS;
        (word < self.dense.len()).then(|| (word, 1_u64 << (index % WORD_BITS)))
    }
}

impl Default for SparseSeenSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0)]
    #[case(64)]
    #[case(4096)]
    fn tracks_membership_across_both_tiers(#[case] dense_limit: usize) {
        let mut seen = SparseSeenSet::with_dense_limit(dense_limit);
        let ids = [0, 1, 63, 64, 4095, 4096, 1_000_000, NodeId::MAX];
        for id in ids {
            assert!(seen.add(id), "first add of {id} must report insertion");
        }
        for id in ids {
            assert!(seen.contains(id));
            assert!(!seen.add(id), "second add of {id} must be a no-op");
        }
        assert_eq!(seen.len(), ids.len());
        assert!(!seen.contains(2));
        assert!(!seen.contains(5_000));
    }

    #[test]
    fn clear_resets_dense_and_sparse_members() {
        let mut seen = SparseSeenSet::with_dense_limit(128);
        seen.add(5);
        seen.add(127);
        seen.add(9_999);
        seen.clear();

        assert!(seen.is_empty());
        assert!(!seen.contains(5));
        assert!(!seen.contains(127));
        assert!(!seen.contains(9_999));
        assert!(seen.add(5), "cleared ids must be insertable again");
    }
}
