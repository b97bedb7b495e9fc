//! Numerical perturbation to strict floating-point monotonicity.
//!
//! Repeated clamping in the region-grow passes leaves plateaus of exactly
//! equal scalars whose order only exists symbolically, in the offsets.
//! Downstream consumers that read scalars alone need that order realized
//! numerically: this pass lifts every value to at least `epsilon` above
//! its symbolic predecessor. Offsets are untouched.

use crate::algs::order::symbolic_cmp;
use crate::data::field::{Offset, ScalarLike};
use crate::sweep_error::ScalarSweepError;
use crate::topology::VertexId;
use std::cmp::Ordering;

/// Lift `scalars` in place so they strictly increase along the symbolic
/// order induced by `(scalars, offsets)`.
///
/// Fails with [`ScalarSweepError::UnsupportedScalarType`] when the scalar
/// type defines no perturbation epsilon.
pub fn perturb<S: ScalarLike>(
    scalars: &mut [S],
    offsets: &[Offset],
) -> Result<(), ScalarSweepError> {
    let epsilon = S::perturbation_epsilon().ok_or(ScalarSweepError::UnsupportedScalarType)?;

    let mut ranked: Vec<(S, Offset, VertexId)> = scalars
        .iter()
        .zip(offsets)
        .enumerate()
        .map(|(v, (&s, &o))| (s, o, v))
        .collect();
    ranked.sort_unstable_by(|a, b| symbolic_cmp(a.0, a.1, b.0, b.1));

    for i in 1..ranked.len() {
        if ranked[i].0.total_cmp(ranked[i - 1].0) != Ordering::Greater {
            ranked[i].0 = ranked[i - 1].0 + epsilon;
        }
    }

    for (s, _, v) in ranked {
        scalars[v] = s;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::order::SymbolicOrder;

    #[test]
    fn flat_field_becomes_strictly_increasing() {
        let mut scalars = [0.0f64; 4];
        let offsets = [3i64, 1, 4, 2];
        perturb(&mut scalars, &offsets).unwrap();
        // Rank order by offset: v1, v3, v0, v2.
        let eps = f64::perturbation_epsilon().unwrap();
        assert_eq!(scalars[1], 0.0);
        assert_eq!(scalars[3], eps);
        assert_eq!(scalars[0], 2.0 * eps);
        assert_eq!(scalars[2], 3.0 * eps);
    }

    #[test]
    fn already_strict_values_are_untouched() {
        let mut scalars = [1.0f64, 2.0, 3.0];
        let offsets = [0i64, 1, 2];
        perturb(&mut scalars, &offsets).unwrap();
        assert_eq!(scalars, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn symbolic_order_is_preserved() {
        let mut scalars = [5.0f64, 5.0, 2.0, 5.0];
        let offsets = [9i64, 4, 0, 6];
        let before: Vec<_> = {
            let ord = SymbolicOrder::new(&scalars, &offsets);
            let mut ids: Vec<usize> = (0..4).collect();
            ids.sort_by(|&a, &b| ord.cmp(a, b));
            ids
        };
        perturb(&mut scalars, &offsets).unwrap();
        let after: Vec<_> = {
            let ord = SymbolicOrder::new(&scalars, &offsets);
            let mut ids: Vec<usize> = (0..4).collect();
            ids.sort_by(|&a, &b| ord.cmp(a, b));
            ids
        };
        assert_eq!(before, after);
        // Values are now pairwise distinct.
        for a in 0..4 {
            for b in (a + 1)..4 {
                assert!(scalars[a] != scalars[b]);
            }
        }
    }

    #[test]
    fn f32_uses_its_own_epsilon() {
        let mut scalars = [1.0f32, 1.0];
        let offsets = [1i64, 0];
        perturb(&mut scalars, &offsets).unwrap();
        assert_eq!(scalars[0], 1.0 + 1e-5);
        assert_eq!(scalars[1], 1.0);
    }
}
