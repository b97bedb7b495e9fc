//! Symbolic total order on vertices.
//!
//! Scalars alone only give a preorder: distinct vertices may carry equal
//! values. Pairing every scalar with a unique integer offset and comparing
//! `(scalar, offset)` lexicographically yields a strict total order, the
//! symbolic perturbation that the classifier, the sweep front, and the
//! perturbation sort all share through [`symbolic_cmp`].

use crate::data::field::{Offset, ScalarLike};
use crate::topology::VertexId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Direction of a sweep: ascending pops the symbolically least vertex
/// first, descending the greatest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// Ascending lexicographic comparison of two `(scalar, offset)` pairs.
#[inline]
pub fn symbolic_cmp<S: ScalarLike>(sa: S, oa: Offset, sb: S, ob: Offset) -> Ordering {
    sa.total_cmp(sb).then_with(|| oa.cmp(&ob))
}

/// View of a scalar field and its offset field as a strict total order on
/// vertex ids.
///
/// Borrowed immutably; passes rebuild it after every rewrite. Given
/// pairwise-distinct offsets the order is irreflexive, antisymmetric,
/// transitive, and total.
#[derive(Clone, Copy, Debug)]
pub struct SymbolicOrder<'a, S: ScalarLike> {
    scalars: &'a [S],
    offsets: &'a [Offset],
}

impl<'a, S: ScalarLike> SymbolicOrder<'a, S> {
    /// Wrap a scalar field and its offsets. Both slices must cover the
    /// same vertex range.
    pub fn new(scalars: &'a [S], offsets: &'a [Offset]) -> Self {
        debug_assert_eq!(scalars.len(), offsets.len());
        Self { scalars, offsets }
    }

    /// Number of vertices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    /// Whether the order covers no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Ascending comparison of two vertices.
    #[inline]
    pub fn cmp(&self, a: VertexId, b: VertexId) -> Ordering {
        symbolic_cmp(self.scalars[a], self.offsets[a], self.scalars[b], self.offsets[b])
    }

    /// Whether `a` strictly precedes `b`.
    #[inline]
    pub fn precedes(&self, a: VertexId, b: VertexId) -> bool {
        self.cmp(a, b) == Ordering::Less
    }

    /// Whether `a` strictly succeeds `b`.
    #[inline]
    pub fn succeeds(&self, a: VertexId, b: VertexId) -> bool {
        self.cmp(a, b) == Ordering::Greater
    }

    /// Comparison along a sweep direction: descending reverses the order,
    /// so the "front" of a sweep is always `Ordering::Less`.
    #[inline]
    pub fn cmp_along(&self, direction: Direction, a: VertexId, b: VertexId) -> Ordering {
        match direction {
            Direction::Ascending => self.cmp(a, b),
            Direction::Descending => self.cmp(a, b).reverse(),
        }
    }
}
