//! One directional region-grow pass.
//!
//! Floods the mesh from the authorized extrema of one direction, popping
//! the sweep front in symbolic order and recording the pop order as the
//! adjustment sequence. The rewrite then walks that sequence, clamping
//! scalars into weak monotonicity and issuing fresh offsets, so the
//! sequence order becomes the new symbolic order. Seeds are popped before
//! anything they could be compared against, which is what keeps every
//! authorized extremum critical.

use crate::algs::order::Direction;
use crate::algs::sweep::SweepFront;
use crate::data::field::{Offset, ScalarLike};
use crate::sweep_error::ScalarSweepError;
use crate::topology::{VertexId, VertexNeighbors};
use std::cmp::Ordering;

/// Flood from `seeds` and rewrite `scalars`/`offsets` along the resulting
/// adjustment sequence, which is returned for inspection.
///
/// Ascending passes leave scalars non-decreasing along the sequence and
/// assign offsets `1..=N`; descending passes mirror both. Fails with
/// [`ScalarSweepError::Disconnected`] when the front drains before every
/// vertex was dequeued: seeds missing from a component, or no seeds at
/// all.
pub fn region_grow<S, T>(
    direction: Direction,
    seeds: &[VertexId],
    scalars: &mut [S],
    offsets: &mut [Offset],
    topology: &T,
) -> Result<Vec<VertexId>, ScalarSweepError>
where
    S: ScalarLike,
    T: VertexNeighbors + ?Sized,
{
    let n = topology.vertex_count();
    let mut front = SweepFront::with_capacity(direction, seeds.len());
    let mut visited = vec![false; n];
    let mut sequence = Vec::with_capacity(n);

    for &s in seeds {
        front.insert(scalars[s], offsets[s], s);
        visited[s] = true;
    }

    while let Some((_, _, v)) = front.pop() {
        for k in 0..topology.neighbor_count(v) {
            let u = topology.neighbor(v, k);
            if !visited[u] {
                front.insert(scalars[u], offsets[u], u);
                visited[u] = true;
            }
        }
        sequence.push(v);
    }

    if sequence.len() != n {
        return Err(ScalarSweepError::Disconnected {
            visited: sequence.len(),
            total: n,
        });
    }

    log::trace!(
        "{direction:?} pass dequeued {n} vertices from {} seeds",
        seeds.len()
    );

    let mut offset: Offset = match direction {
        Direction::Ascending => 0,
        Direction::Descending => n as Offset + 1,
    };
    for k in 0..n {
        let v = sequence[k];
        if k > 0 {
            let prev = scalars[sequence[k - 1]];
            let cmp = scalars[v].total_cmp(prev);
            let breaks_monotonicity = match direction {
                Direction::Ascending => cmp != Ordering::Greater,
                Direction::Descending => cmp != Ordering::Less,
            };
            if breaks_monotonicity {
                scalars[v] = prev;
            }
        }
        match direction {
            Direction::Ascending => offset += 1,
            Direction::Descending => offset -= 1,
        }
        offsets[v] = offset;
    }

    Ok(sequence)
}
