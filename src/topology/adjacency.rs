//! Vertex-neighbor queries over a simplicial mesh.
//!
//! Determinism:
//! - `AdjacencyList` rows are sorted ascending and deduplicated, so
//!   neighbor enumeration order is a function of the mesh alone, not of
//!   construction order.

use crate::sweep_error::ScalarSweepError;
use crate::topology::VertexId;

/// Read-only vertex-neighbor query interface consumed by the engine.
///
/// The relation is expected to be symmetric in practice, but the engine
/// only relies on connectivity: every vertex must be reachable from the
/// seed set by repeated neighbor hops. Implementations must be `Sync`
/// because the classifier shares them across worker threads.
pub trait VertexNeighbors: Sync {
    /// Number of vertices in the mesh.
    fn vertex_count(&self) -> usize;

    /// Number of neighbors of `v`.
    fn neighbor_count(&self, v: VertexId) -> usize;

    /// The `k`-th neighbor of `v`, `k < neighbor_count(v)`.
    fn neighbor(&self, v: VertexId, k: usize) -> VertexId;

    /// Iterate the neighbors of `v` in index order.
    fn neighbors(&self, v: VertexId) -> NeighborIter<'_, Self> {
        NeighborIter {
            topology: self,
            vertex: v,
            next: 0,
            count: self.neighbor_count(v),
        }
    }
}

/// Iterator over the neighbors of one vertex.
pub struct NeighborIter<'a, T: VertexNeighbors + ?Sized> {
    topology: &'a T,
    vertex: VertexId,
    next: usize,
    count: usize,
}

impl<T: VertexNeighbors + ?Sized> Iterator for NeighborIter<'_, T> {
    type Item = VertexId;

    fn next(&mut self) -> Option<VertexId> {
        if self.next >= self.count {
            return None;
        }
        let u = self.topology.neighbor(self.vertex, self.next);
        self.next += 1;
        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

/// CSR-style symmetric adjacency over densely numbered vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyList {
    /// CSR offsets into `adjncy` for each vertex.
    xadj: Vec<usize>,
    /// CSR neighbor list, sorted and deduplicated per row.
    adjncy: Vec<VertexId>,
}

impl AdjacencyList {
    /// Build from an undirected edge list. Self-loops are dropped,
    /// duplicates collapse, and each edge appears in both rows.
    pub fn from_edges(
        vertex_count: usize,
        edges: &[(VertexId, VertexId)],
    ) -> Result<Self, ScalarSweepError> {
        let mut rows: Vec<Vec<VertexId>> = vec![Vec::new(); vertex_count];
        for &(a, b) in edges {
            check_vertex(a, vertex_count)?;
            check_vertex(b, vertex_count)?;
            if a == b {
                continue;
            }
            rows[a].push(b);
            rows[b].push(a);
        }
        Ok(Self::from_rows(rows))
    }

    /// Build from a triangle list: every triangle contributes its three
    /// edges.
    pub fn from_triangles(
        vertex_count: usize,
        triangles: &[[VertexId; 3]],
    ) -> Result<Self, ScalarSweepError> {
        Self::from_cells(vertex_count, triangles)
    }

    /// Build from arbitrary simplicial cells: every pair of vertices in a
    /// cell becomes an edge (the 1-skeleton of each simplex).
    pub fn from_cells<C: AsRef<[VertexId]>>(
        vertex_count: usize,
        cells: &[C],
    ) -> Result<Self, ScalarSweepError> {
        let mut rows: Vec<Vec<VertexId>> = vec![Vec::new(); vertex_count];
        for cell in cells {
            let cell = cell.as_ref();
            for &v in cell {
                check_vertex(v, vertex_count)?;
            }
            for (i, &a) in cell.iter().enumerate() {
                for &b in &cell[(i + 1)..] {
                    if a == b {
                        continue;
                    }
                    rows[a].push(b);
                    rows[b].push(a);
                }
            }
        }
        Ok(Self::from_rows(rows))
    }

    fn from_rows(mut rows: Vec<Vec<VertexId>>) -> Self {
        let mut total = 0usize;
        for row in &mut rows {
            row.sort_unstable();
            row.dedup();
            total += row.len();
        }
        let mut xadj = Vec::with_capacity(rows.len() + 1);
        let mut adjncy = Vec::with_capacity(total);
        xadj.push(0);
        for row in &rows {
            adjncy.extend(row.iter().copied());
            xadj.push(adjncy.len());
        }
        Self { xadj, adjncy }
    }

    /// Neighbor row of vertex `v` as a slice.
    #[inline]
    pub fn row(&self, v: VertexId) -> &[VertexId] {
        &self.adjncy[self.xadj[v]..self.xadj[v + 1]]
    }

    /// Total number of stored directed adjacencies.
    pub fn arc_count(&self) -> usize {
        self.adjncy.len()
    }
}

impl VertexNeighbors for AdjacencyList {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.xadj.len() - 1
    }

    #[inline]
    fn neighbor_count(&self, v: VertexId) -> usize {
        self.xadj[v + 1] - self.xadj[v]
    }

    #[inline]
    fn neighbor(&self, v: VertexId, k: usize) -> VertexId {
        self.adjncy[self.xadj[v] + k]
    }
}

#[inline]
fn check_vertex(v: VertexId, vertex_count: usize) -> Result<(), ScalarSweepError> {
    if v < vertex_count {
        Ok(())
    } else {
        Err(ScalarSweepError::InvalidVertex { vertex: v, vertex_count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(n: usize) -> AdjacencyList {
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        AdjacencyList::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn path_graph_rows() {
        let g = path(4);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.row(0), &[1]);
        assert_eq!(g.row(1), &[0, 2]);
        assert_eq!(g.row(3), &[2]);
        assert_eq!(g.arc_count(), 6);
    }

    #[test]
    fn duplicate_edges_and_self_loops_collapse() {
        let g = AdjacencyList::from_edges(3, &[(0, 1), (1, 0), (0, 1), (2, 2)]).unwrap();
        assert_eq!(g.row(0), &[1]);
        assert_eq!(g.row(1), &[0]);
        assert!(g.row(2).is_empty());
    }

    #[test]
    fn triangles_yield_pairwise_edges() {
        let g = AdjacencyList::from_triangles(4, &[[0, 1, 2], [1, 2, 3]]).unwrap();
        assert_eq!(g.row(1), &[0, 2, 3]);
        assert_eq!(g.row(2), &[0, 1, 3]);
        assert_eq!(g.row(0), &[1, 2]);
    }

    #[test]
    fn tetrahedron_cell_is_a_clique() {
        let g = AdjacencyList::from_cells(4, &[[0usize, 1, 2, 3]]).unwrap();
        for v in 0..4 {
            assert_eq!(g.neighbor_count(v), 3);
        }
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let err = AdjacencyList::from_edges(2, &[(0, 5)]).unwrap_err();
        assert_eq!(
            err,
            ScalarSweepError::InvalidVertex { vertex: 5, vertex_count: 2 }
        );
    }

    #[test]
    fn neighbor_iterator_matches_row() {
        let g = path(5);
        let via_iter: Vec<_> = g.neighbors(2).collect();
        assert_eq!(via_iter, g.row(2));
        assert_eq!(g.neighbors(2).size_hint(), (2, Some(2)));
    }

    #[test]
    fn isolated_vertex_has_no_neighbors() {
        let g = AdjacencyList::from_edges(3, &[(0, 1)]).unwrap();
        assert_eq!(g.neighbor_count(2), 0);
        assert!(g.neighbors(2).next().is_none());
    }
}
