//! Algorithm module: the simplification passes and their building blocks.
//!
//! Dependency order, leaves first: [`order`] (symbolic total order),
//! [`critical`] (extremum classification), [`sweep`] (directional front),
//! [`grow`] (region-grow pass), [`perturb`] (epsilon lifting),
//! [`simplify`] (the convergence-loop driver).

pub mod critical;
pub mod grow;
pub mod order;
pub(crate) mod parallel;
pub mod perturb;
pub mod simplify;
pub mod sweep;

pub use critical::{classify, classify_all, classify_masked, CriticalPoints, Criticality};
pub use order::{symbolic_cmp, Direction, SymbolicOrder};
pub use simplify::{
    simplify_scalar_field, ConstraintMode, SimplifyOptions, SimplifyReport,
};
pub use sweep::SweepFront;
