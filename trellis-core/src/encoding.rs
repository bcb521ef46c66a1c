//! Packed `(node, score)` keys used to order neighbour-set edges.
//!
//! The upper 32 bits hold an order-preserving integer image of the score and
//! the lower 32 bits hold the bitwise complement of the node identifier. Raw
//! integer comparison therefore orders by score first and breaks ties by
//! descending node id, so two distinct edges never compare equal. NaN scores
//! are unsupported.

use std::cmp::Ordering;

/// Identifier of a graph node. Assigned by the caller and treated as opaque.
pub type NodeId = u32;

/// Edge from the owning node to [`EdgeKey::node`] with similarity
/// [`EdgeKey::score`], packed into a single totally ordered integer.
///
/// `Ord` places the best edge first: higher scores sort before lower ones,
/// and among equal scores higher node ids sort before lower ones.
///
/// # Examples
/// ```
/// use trellis_core::EdgeKey;
///
/// let near = EdgeKey::new(4, 0.9);
/// let far = EdgeKey::new(7, 0.1);
/// assert!(near < far);
/// assert_eq!(near.node(), 4);
/// assert_eq!(near.score(), 0.9);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct EdgeKey(i64);

impl EdgeKey {
    /// Packs `node` and `score` into a key.
    #[must_use]
    pub const fn new(node: NodeId, score: f32) -> Self {
        let high = (sortable_bits(score) as i64) << 32;
        let low = (!node) as i64;
        Self(high | low)
    }

    /// Rebuilds a key from its raw packed representation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn from_raw(raw: i64) -> Self { Self(raw) }

    /// Returns the raw packed representation.
    #[must_use]
    #[rustfmt::skip]
    pub const fn raw(self) -> i64 { self.0 }

    /// Returns the neighbour this edge points at.
    #[must_use]
    pub const fn node(self) -> NodeId {
        // Truncation keeps the low word, which holds the complemented id.
        !(self.0 as u32)
    }

    /// Returns the similarity between the owning node and [`Self::node`].
    #[must_use]
    pub const fn score(self) -> f32 {
        let sortable = (self.0 >> 32) as i32;
        f32::from_bits(sortable_bits_of(sortable).cast_unsigned())
    }

    /// Returns the decoded `(node, score)` pair.
    #[must_use]
    pub const fn decode(self) -> (NodeId, f32) {
        (self.node(), self.score())
    }
}

impl Ord for EdgeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

impl PartialOrd for EdgeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Maps the bit pattern of a float onto an `i32` whose signed ordering
/// matches float ordering. The mapping is an involution, so it also decodes.
const fn sortable_bits_of(bits: i32) -> i32 {
    bits ^ ((bits >> 31) & 0x7fff_ffff)
}

const fn sortable_bits(score: f32) -> i32 {
    sortable_bits_of(score.to_bits().cast_signed())
}
