//! `ScalarSweepError`: unified error type for scalar-sweep public APIs.
//!
//! Every failure mode of the engine surfaces as one variant of this enum;
//! nothing is recovered locally inside the passes.

use crate::algs::order::Direction;
use thiserror::Error;

/// Unified error type for scalar-sweep operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScalarSweepError {
    /// A region-grow pass drained its front before reaching every vertex:
    /// the mesh has components with no authorized seed in them.
    #[error("sweep front exhausted after {visited} of {total} vertices; mesh is disconnected from the seed set")]
    Disconnected { visited: usize, total: usize },
    /// The constraint list authorizes no extremum for one sweep direction,
    /// so that pass has nothing to seed with.
    #[error("no authorized extrema to seed the {0:?} sweep")]
    NoAuthorizedExtrema(Direction),
    /// The perturbation pass was invoked on a scalar type that defines no
    /// perturbation epsilon.
    #[error("scalar type does not define a perturbation epsilon")]
    UnsupportedScalarType,
    /// An input or output buffer does not match the mesh vertex count.
    #[error("{field} length mismatch: expected {expected}, got {actual}")]
    FieldLengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// The iteration cap was reached with spurious extrema still present.
    /// The output buffers hold the partially simplified field.
    #[error("simplification did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },
    /// An adjacency builder was handed a vertex outside `[0, vertex_count)`.
    #[error("vertex {vertex} out of range for mesh with {vertex_count} vertices")]
    InvalidVertex { vertex: usize, vertex_count: usize },
}
