//! Data module: per-vertex field values and symbolic-perturbation offsets.

pub mod field;

pub use field::{Offset, ScalarLike};
