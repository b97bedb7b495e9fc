//! # scalar-sweep
//!
//! scalar-sweep is a Rust library for constrained topological simplification of scalar fields on simplicial meshes. Given a per-vertex scalar field and a list of critical points to keep (or to remove), it minimally edits the field so that every local minimum and maximum outside that list disappears, emitting the rewritten scalars together with a fresh offset field whose induced total order realizes the target critical-point set.
//!
//! ## Features
//! - Symbolic perturbation: `(scalar, offset)` lexicographic order makes every comparison a strict total order, so flat regions simplify deterministically
//! - Critical-point classification with whitelist/blacklist constraint masks
//! - Two directional region-grow passes per iteration, rewriting scalars monotonically along sweep orderings anchored at the authorized extrema
//! - Optional epsilon perturbation to strict floating-point monotonicity
//! - Data-parallel classification behind the `rayon` feature (on by default), with deterministic, vertex-id-ordered results
//! - A narrow [`topology::VertexNeighbors`] trait so any mesh library can plug in; a CSR [`topology::AdjacencyList`] ships for standalone use
//!
//! ## Usage
//! Add `scalar-sweep` as a dependency in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! scalar-sweep = "0.1"
//! # default features = ["rayon"]
//! ```
//!
//! ```rust
//! use scalar_sweep::prelude::*;
//!
//! # fn main() -> Result<(), ScalarSweepError> {
//! // A 5-vertex chain with one spurious interior peak.
//! let topology = AdjacencyList::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)])?;
//! let scalars = [1.0f64, 3.0, 4.0, 1.0, 5.0];
//! let offsets: Vec<i64> = (0..5).collect();
//! let mut out_scalars = [0.0; 5];
//! let mut out_offsets = [0i64; 5];
//!
//! // Keep the endpoints; the dip at vertex 3 is flattened away.
//! let report = simplify_scalar_field(
//!     &topology,
//!     &scalars,
//!     &offsets,
//!     &[0, 4],
//!     &mut out_scalars,
//!     &mut out_offsets,
//!     &SimplifyOptions::default(),
//! )?;
//! assert_eq!((report.minima, report.maxima), (1, 1));
//! # Ok(())
//! # }
//! ```
//!
//! ## Determinism
//! Given identical inputs and worker count, outputs are bitwise identical
//! across runs: the parallel classification writes to a pre-sized buffer
//! and result lists are collected in a sequential index walk.

// Re-export our major subsystems:
pub mod algs;
pub mod data;
pub mod sweep_error;
pub mod topology;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::critical::{
        classify, classify_all, classify_masked, CriticalPoints, Criticality,
    };
    pub use crate::algs::grow::region_grow;
    pub use crate::algs::order::{symbolic_cmp, Direction, SymbolicOrder};
    pub use crate::algs::perturb::perturb;
    pub use crate::algs::simplify::{
        simplify_scalar_field, ConstraintMode, SimplifyOptions, SimplifyReport,
    };
    pub use crate::algs::sweep::SweepFront;
    pub use crate::data::field::{Offset, ScalarLike};
    pub use crate::sweep_error::ScalarSweepError;
    pub use crate::topology::{AdjacencyList, VertexId, VertexNeighbors};
}
