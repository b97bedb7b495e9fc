//! Simplification driver: preprocessing, authorization, and the
//! alternating-pass convergence loop.
//!
//! One iteration runs an ascending region-grow seeded by the authorized
//! minima, then a descending one seeded by the authorized maxima. Each
//! pass removes or preserves spurious extrema in its direction and never
//! creates new ones there, so iterating drives the field toward a state
//! whose only extrema are authorized. Floating-point equality plateaus
//! can take several iterations to drain; the iteration cap bounds that.

use crate::algs::critical::{classify_all, classify_masked, CriticalPoints};
use crate::algs::grow::region_grow;
use crate::algs::order::{Direction, SymbolicOrder};
use crate::algs::parallel::run_with_pool;
use crate::algs::perturb::perturb;
use crate::data::field::{Offset, ScalarLike};
use crate::sweep_error::ScalarSweepError;
use crate::topology::{VertexId, VertexNeighbors};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// How the identifier list selects the extrema to keep.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintMode {
    /// Identifiers are the extrema to preserve; everything else goes.
    Whitelist,
    /// Identifiers are the extrema to remove; everything else stays.
    Blacklist,
}

/// Run configuration for [`simplify_scalar_field`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyOptions {
    /// Interpretation of the identifier list.
    pub mode: ConstraintMode,
    /// Lift scalars to strict monotonicity after each iteration.
    pub add_perturbation: bool,
    /// Safety cap on driver iterations; defaults to the vertex count.
    pub max_iterations: Option<usize>,
    /// Worker count for the classification sweeps; `None` uses the
    /// ambient rayon pool (or runs sequentially without the feature).
    pub num_threads: Option<usize>,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self {
            mode: ConstraintMode::Whitelist,
            add_perturbation: false,
            max_iterations: None,
            num_threads: None,
        }
    }
}

/// Summary of a convergent run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyReport {
    /// Iterations executed, including the one that converged.
    pub iterations: usize,
    /// Minima remaining in the output field.
    pub minima: usize,
    /// Maxima remaining in the output field.
    pub maxima: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
}

/// Minimally edit a scalar field so that only authorized extrema survive.
///
/// Copies `input_scalars` (NaN replaced by zero) and `input_offsets` into
/// the output buffers, then rewrites those in place until every remaining
/// minimum and maximum is authorized by `identifiers` under
/// `options.mode`. On success the output offsets are a permutation of
/// `[1, N]` and the output scalars contain no NaN.
///
/// Out-of-range identifiers are logged and skipped. All other failures
/// abort with a [`ScalarSweepError`]; on
/// [`ScalarSweepError::DidNotConverge`] the output buffers hold the
/// partially simplified field.
pub fn simplify_scalar_field<S, T>(
    topology: &T,
    input_scalars: &[S],
    input_offsets: &[Offset],
    identifiers: &[VertexId],
    output_scalars: &mut [S],
    output_offsets: &mut [Offset],
    options: &SimplifyOptions,
) -> Result<SimplifyReport, ScalarSweepError>
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
{
    let n = topology.vertex_count();
    check_length("input scalars", n, input_scalars.len())?;
    check_length("input offsets", n, input_offsets.len())?;
    check_length("output scalars", n, output_scalars.len())?;
    check_length("output offsets", n, output_offsets.len())?;

    run_with_pool(options.num_threads, || {
        execute(
            topology,
            input_scalars,
            input_offsets,
            identifiers,
            output_scalars,
            output_offsets,
            options,
        )
    })
}

fn execute<S, T>(
    topology: &T,
    input_scalars: &[S],
    input_offsets: &[Offset],
    identifiers: &[VertexId],
    output_scalars: &mut [S],
    output_offsets: &mut [Offset],
    options: &SimplifyOptions,
) -> Result<SimplifyReport, ScalarSweepError>
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
{
    let start = Instant::now();
    let n = topology.vertex_count();
    if n == 0 {
        return Ok(SimplifyReport {
            iterations: 0,
            minima: 0,
            maxima: 0,
            elapsed: start.elapsed(),
        });
    }

    preprocess(input_scalars, output_scalars);
    output_offsets.copy_from_slice(input_offsets);

    let mut seed_mask = vec![false; n];
    for &id in identifiers {
        if id < n {
            seed_mask[id] = true;
        } else {
            log::warn!("constraint identifier {id} out of range for {n} vertices; skipping");
        }
    }

    let invert = options.mode == ConstraintMode::Blacklist;
    let authorized = {
        let order = SymbolicOrder::new(output_scalars, output_offsets);
        classify_masked(&order, topology, &seed_mask, invert)
    };
    if authorized.minima.is_empty() {
        return Err(ScalarSweepError::NoAuthorizedExtrema(Direction::Ascending));
    }
    if authorized.maxima.is_empty() {
        return Err(ScalarSweepError::NoAuthorizedExtrema(Direction::Descending));
    }

    let mut authorized_mask = vec![false; n];
    for &v in authorized.minima.iter().chain(&authorized.maxima) {
        authorized_mask[v] = true;
    }

    log::debug!(
        "maintaining {} constraints ({} minima, {} maxima)",
        identifiers.len(),
        authorized.minima.len(),
        authorized.maxima.len()
    );

    let cap = options.max_iterations.unwrap_or(n);
    for iteration in 0..cap {
        region_grow(
            Direction::Ascending,
            &authorized.minima,
            output_scalars,
            output_offsets,
            topology,
        )?;
        debug_validate_offset_permutation(output_offsets);

        region_grow(
            Direction::Descending,
            &authorized.maxima,
            output_scalars,
            output_offsets,
            topology,
        )?;
        debug_validate_offset_permutation(output_offsets);

        let current = {
            let order = SymbolicOrder::new(output_scalars, output_offsets);
            classify_all(&order, topology)
        };
        let converged = is_fixed_point(&current, &authorized, &authorized_mask);

        log::debug!(
            "iteration {iteration}: {} minima, {} maxima",
            current.minima.len(),
            current.maxima.len()
        );

        // The perturbation preserves the symbolic order, so running it
        // after the convergence test (final iteration included) cannot
        // change the classification it was based on.
        if options.add_perturbation {
            perturb(output_scalars, output_offsets)?;
        }

        if converged {
            let elapsed = start.elapsed();
            log::info!(
                "scalar field simplified in {elapsed:?} ({} iteration(s))",
                iteration + 1
            );
            return Ok(SimplifyReport {
                iterations: iteration + 1,
                minima: current.minima.len(),
                maxima: current.maxima.len(),
                elapsed,
            });
        }
    }

    Err(ScalarSweepError::DidNotConverge { iterations: cap })
}

/// Copy the input field, scrubbing NaN to zero.
fn preprocess<S: ScalarLike>(input: &[S], output: &mut [S]) {
    let scrub = |(out, &inp): (&mut S, &S)| {
        *out = if inp.is_nan() { S::zero() } else { inp };
    };

    #[cfg(feature = "rayon")]
    output.par_iter_mut().zip(input.par_iter()).for_each(scrub);
    #[cfg(not(feature = "rayon"))]
    output.iter_mut().zip(input.iter()).for_each(scrub);
}

fn is_fixed_point(
    current: &CriticalPoints,
    authorized: &CriticalPoints,
    authorized_mask: &[bool],
) -> bool {
    current.minima.len() <= authorized.minima.len()
        && current.maxima.len() <= authorized.maxima.len()
        && current
            .minima
            .iter()
            .chain(&current.maxima)
            .all(|&v| authorized_mask[v])
}

fn check_length(
    field: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), ScalarSweepError> {
    if expected == actual {
        Ok(())
    } else {
        Err(ScalarSweepError::FieldLengthMismatch {
            field,
            expected,
            actual,
        })
    }
}

#[cfg(any(debug_assertions, feature = "check-invariants"))]
fn debug_validate_offset_permutation(offsets: &[Offset]) {
    let n = offsets.len();
    let mut seen = vec![false; n];
    for &o in offsets {
        assert!(
            o >= 1 && o <= n as Offset,
            "offset {o} outside [1, {n}] after pass"
        );
        let slot = (o - 1) as usize;
        assert!(!seen[slot], "duplicate offset {o} after pass");
        seen[slot] = true;
    }
}

#[cfg(not(any(debug_assertions, feature = "check-invariants")))]
fn debug_validate_offset_permutation(_offsets: &[Offset]) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::AdjacencyList;

    fn path(n: usize) -> AdjacencyList {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        AdjacencyList::from_edges(n, &edges).unwrap()
    }

    fn run(
        topo: &AdjacencyList,
        scalars: &[f64],
        identifiers: &[usize],
        options: &SimplifyOptions,
    ) -> Result<(Vec<f64>, Vec<Offset>, SimplifyReport), ScalarSweepError> {
        let n = topo.vertex_count();
        let offsets: Vec<Offset> = (0..n as Offset).collect();
        let mut out_scalars = vec![0.0; n];
        let mut out_offsets = vec![0; n];
        let report = simplify_scalar_field(
            topo,
            scalars,
            &offsets,
            identifiers,
            &mut out_scalars,
            &mut out_offsets,
            options,
        )?;
        Ok((out_scalars, out_offsets, report))
    }

    #[test]
    fn default_options_are_whitelist_without_perturbation() {
        let options = SimplifyOptions::default();
        assert_eq!(options.mode, ConstraintMode::Whitelist);
        assert!(!options.add_perturbation);
        assert_eq!(options.max_iterations, None);
        assert_eq!(options.num_threads, None);
    }

    #[test]
    fn length_mismatch_is_rejected_before_mutation() {
        let topo = path(3);
        let scalars = [0.0f64, 1.0];
        let offsets = [0i64, 1, 2];
        let mut out_s = vec![0.0; 3];
        let mut out_o = vec![0; 3];
        let err = simplify_scalar_field(
            &topo,
            &scalars,
            &offsets,
            &[],
            &mut out_s,
            &mut out_o,
            &SimplifyOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ScalarSweepError::FieldLengthMismatch {
                field: "input scalars",
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn chain_with_endpoint_extrema_converges_in_one_iteration() {
        let topo = path(5);
        let scalars = [1.0, 3.0, 4.0, 1.0, 5.0];
        let (out_s, out_o, report) =
            run(&topo, &scalars, &[0, 4], &SimplifyOptions::default()).unwrap();
        assert_eq!(out_s, [1.0, 3.0, 4.0, 4.0, 5.0]);
        assert_eq!(out_o, [1, 2, 3, 4, 5]);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.minima, 1);
        assert_eq!(report.maxima, 1);
    }

    #[test]
    fn whitelist_without_minima_reports_the_ascending_sweep() {
        let topo = path(5);
        // Both requested vertices classify as maxima.
        let scalars = [3.0, 1.0, 4.0, 1.0, 5.0];
        let err = run(&topo, &scalars, &[0, 4], &SimplifyOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ScalarSweepError::NoAuthorizedExtrema(Direction::Ascending)
        );
    }

    #[test]
    fn out_of_range_identifiers_are_skipped() {
        let topo = path(5);
        let scalars = [1.0, 3.0, 4.0, 1.0, 5.0];
        let (_, _, report) =
            run(&topo, &scalars, &[0, 4, 99], &SimplifyOptions::default()).unwrap();
        assert_eq!(report.minima, 1);
        assert_eq!(report.maxima, 1);
    }

    #[test]
    fn empty_mesh_is_a_trivial_success() {
        let topo = AdjacencyList::from_edges(0, &[]).unwrap();
        let report = simplify_scalar_field::<f64, _>(
            &topo,
            &[],
            &[],
            &[],
            &mut [],
            &mut [],
            &SimplifyOptions::default(),
        )
        .unwrap();
        assert_eq!(report.iterations, 0);
    }

    #[test]
    fn options_json_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let options = SimplifyOptions {
            mode: ConstraintMode::Blacklist,
            add_perturbation: true,
            max_iterations: Some(7),
            num_threads: Some(2),
        };
        let s = serde_json::to_string(&options)?;
        let back: SimplifyOptions = serde_json::from_str(&s)?;
        assert_eq!(back, options);
        Ok(())
    }

    #[test]
    fn iteration_cap_of_zero_reports_non_convergence() {
        let topo = path(5);
        let scalars = [1.0, 3.0, 4.0, 1.0, 5.0];
        let options = SimplifyOptions {
            max_iterations: Some(0),
            ..Default::default()
        };
        let err = run(&topo, &scalars, &[0, 4], &options).unwrap_err();
        assert_eq!(err, ScalarSweepError::DidNotConverge { iterations: 0 });
    }
}
