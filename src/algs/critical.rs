//! Critical-point classification under the symbolic order.
//!
//! A vertex is a minimum iff it strictly precedes every neighbor, a
//! maximum iff it strictly succeeds every neighbor, regular otherwise.
//! Classification is per-vertex and embarrassingly parallel; the batch
//! variants run the sweep in parallel under the `rayon` feature and then
//! collect the result lists in a sequential index walk, so `minima` and
//! `maxima` are ordered by vertex id independent of scheduling.

use crate::algs::order::SymbolicOrder;
use crate::data::field::ScalarLike;
use crate::topology::{VertexId, VertexNeighbors};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Classification of one vertex relative to its neighborhood.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Criticality {
    Minimum,
    Maximum,
    Regular,
}

/// Minima and maxima of a field, each list ordered by vertex id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriticalPoints {
    pub minima: Vec<VertexId>,
    pub maxima: Vec<VertexId>,
}

impl CriticalPoints {
    /// Total number of critical vertices.
    pub fn count(&self) -> usize {
        self.minima.len() + self.maxima.len()
    }
}

/// Classify a single vertex.
///
/// Short-circuits as soon as both extremum hypotheses are falsified. A
/// vertex with no neighbors is `Regular`: it would vacuously pass both
/// tests, but an isolated vertex cannot be simplified.
pub fn classify<S, T>(order: &SymbolicOrder<'_, S>, topology: &T, v: VertexId) -> Criticality
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
{
    let degree = topology.neighbor_count(v);
    if degree == 0 {
        return Criticality::Regular;
    }
    let mut is_minimum = true;
    let mut is_maximum = true;
    for k in 0..degree {
        let u = topology.neighbor(v, k);
        if order.precedes(u, v) {
            is_minimum = false;
        }
        if order.succeeds(u, v) {
            is_maximum = false;
        }
        if !is_minimum && !is_maximum {
            return Criticality::Regular;
        }
    }
    if is_minimum {
        Criticality::Minimum
    } else if is_maximum {
        Criticality::Maximum
    } else {
        Criticality::Regular
    }
}

/// Classify every vertex of the mesh.
pub fn classify_all<S, T>(order: &SymbolicOrder<'_, S>, topology: &T) -> CriticalPoints
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
{
    let types = classify_buffer(order, topology, |_| true);
    collect(&types)
}

/// Classify only the vertices selected by `mask[v] ^ invert`; the rest
/// are treated as `Regular`.
///
/// This is the single channel through which user constraints reach the
/// engine: with `invert == false` the mask is a whitelist of candidate
/// extrema, with `invert == true` a blacklist.
pub fn classify_masked<S, T>(
    order: &SymbolicOrder<'_, S>,
    topology: &T,
    mask: &[bool],
    invert: bool,
) -> CriticalPoints
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
{
    debug_assert_eq!(mask.len(), order.len());
    let types = classify_buffer(order, topology, |v| mask[v] ^ invert);
    collect(&types)
}

fn classify_buffer<S, T, F>(
    order: &SymbolicOrder<'_, S>,
    topology: &T,
    selected: F,
) -> Vec<Criticality>
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
    F: Fn(VertexId) -> bool + Send + Sync,
{
    let n = order.len();
    let classify_one = |v: VertexId| {
        if selected(v) {
            classify(order, topology, v)
        } else {
            Criticality::Regular
        }
    };

    #[cfg(feature = "rayon")]
    {
        (0..n).into_par_iter().map(classify_one).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        (0..n).map(classify_one).collect()
    }
}

/// Sequential collection walk; keeps the output lists in vertex-id order
/// regardless of how the classification buffer was filled.
fn collect(types: &[Criticality]) -> CriticalPoints {
    let mut points = CriticalPoints::default();
    for (v, &t) in types.iter().enumerate() {
        match t {
            Criticality::Minimum => points.minima.push(v),
            Criticality::Maximum => points.maxima.push(v),
            Criticality::Regular => {}
        }
    }
    points
}
