use crate::error::GraphError;

/// An undirected graph in compressed-sparse-row form.
///
/// Built once from a stream of unordered edge pairs and immutable thereafter.
/// Every edge `{u, v}` is stored twice: once in `u`'s adjacency block and
/// once in `v`'s. Self-loops and parallel edges are preserved exactly as
/// given — the fine graph never dedupes (see DESIGN.md: parallel edges are
/// treated as higher-weight connections by every downstream component).
#[derive(Debug, Clone)]
pub struct Graph {
    row_offsets: Vec<u32>,
    adj: Vec<u32>,
}

impl Graph {
    /// Builds a CSR graph from a stream of `(u, v)` pairs.
    ///
    /// Vertex count is `max(u, v) + 1` over the whole stream; vertices never
    /// mentioned as an edge endpoint but below that bound are included as
    /// isolated (degree-zero) vertices. Returns [`GraphError::EmptyGraph`]
    /// if the stream is empty.
    pub fn from_edges<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let pairs: Vec<(u32, u32)> = edges.into_iter().collect();
        if pairs.is_empty() {
            return Err(GraphError::EmptyGraph);
        }
        let n = pairs
            .iter()
            .map(|&(u, v)| u.max(v))
            .max()
            .map(|m| m as usize + 1)
            .unwrap_or(0);

        let mut degree = vec![0u32; n];
        for &(u, v) in &pairs {
            degree[u as usize] += 1;
            degree[v as usize] += 1;
        }

        let mut row_offsets = Vec::with_capacity(n + 1);
        row_offsets.push(0u32);
        let mut acc = 0u32;
        for &d in &degree {
            acc += d;
            row_offsets.push(acc);
        }

        let mut cursor = row_offsets.clone();
        let mut adj = vec![0u32; acc as usize];
        for &(u, v) in &pairs {
            // A self-loop (u == v) still contributes two incidences to u's
            // own block, matching the degree count above and keeping the
            // block's symmetry invariant intact.
            adj[cursor[u as usize] as usize] = v;
            cursor[u as usize] += 1;
            adj[cursor[v as usize] as usize] = u;
            cursor[v as usize] += 1;
        }

        Ok(Graph { row_offsets, adj })
    }

    /// Number of vertices.
    pub fn n(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    /// Number of directed incidences, `2 * |E|` (self-loops count once here
    /// per occurrence, matching the CSR invariant in spec.md §3).
    pub fn m(&self) -> usize {
        self.adj.len()
    }

    /// Neighbors of vertex `u`, in the order they were inserted.
    pub fn neighbors(&self, u: usize) -> &[u32] {
        let start = self.row_offsets[u] as usize;
        let end = self.row_offsets[u + 1] as usize;
        &self.adj[start..end]
    }

    /// Degree (incidence count) of vertex `u`.
    pub fn degree(&self, u: usize) -> usize {
        self.neighbors(u).len()
    }

    pub fn row_offsets(&self) -> &[u32] {
        &self.row_offsets
    }

    pub fn adj(&self) -> &[u32] {
        &self.adj
    }
}

/// A coarse graph produced by [`speclayout_coarsen`](../speclayout_coarsen/index.html):
/// the same CSR layout as [`Graph`], plus a parallel edge-weight array.
///
/// After contraction, parallel edges collapse into a single coarse edge
/// whose weight counts how many fine edges merged into it (spec.md §3,
/// "Coarse Graph").
#[derive(Debug, Clone)]
pub struct CoarseGraph {
    row_offsets: Vec<u32>,
    adj: Vec<u32>,
    eweights: Vec<f64>,
}

impl CoarseGraph {
    /// Assembles a coarse graph from already-compacted CSR arrays.
    ///
    /// Callers (the coarsener) are responsible for having merged parallel
    /// edges and computed `eweights` before calling this; this constructor
    /// only asserts the arrays are shape-consistent.
    pub fn from_parts(row_offsets: Vec<u32>, adj: Vec<u32>, eweights: Vec<f64>) -> Self {
        debug_assert_eq!(adj.len(), eweights.len());
        debug_assert_eq!(row_offsets.last().copied().unwrap_or(0) as usize, adj.len());
        CoarseGraph {
            row_offsets,
            adj,
            eweights,
        }
    }

    pub fn n(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    pub fn m(&self) -> usize {
        self.adj.len()
    }

    pub fn neighbors(&self, u: usize) -> &[u32] {
        let start = self.row_offsets[u] as usize;
        let end = self.row_offsets[u + 1] as usize;
        &self.adj[start..end]
    }

    /// Edge weights parallel to `neighbors(u)`.
    pub fn weights(&self, u: usize) -> &[f64] {
        let start = self.row_offsets[u] as usize;
        let end = self.row_offsets[u + 1] as usize;
        &self.eweights[start..end]
    }

    pub fn row_offsets(&self) -> &[u32] {
        &self.row_offsets
    }

    pub fn adj(&self) -> &[u32] {
        &self.adj
    }

    pub fn eweights(&self) -> &[f64] {
        &self.eweights
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_p4_csr_symmetry() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3)]).unwrap();
        assert_eq!(g.n(), 4);
        assert_eq!(g.m(), 6);
        assert!(g.neighbors(1).contains(&0));
        assert!(g.neighbors(1).contains(&2));
        assert!(g.neighbors(0).contains(&1));
    }

    #[test]
    fn csr_symmetry_holds_for_every_vertex() {
        let g = Graph::from_edges([(0, 1), (0, 2), (1, 2), (2, 3), (3, 4)]).unwrap();
        for u in 0..g.n() {
            for &v in g.neighbors(u) {
                let count_uv = g.neighbors(u).iter().filter(|&&x| x == v).count();
                let count_vu = g.neighbors(v as usize).iter().filter(|&&x| x == u as u32).count();
                assert_eq!(count_uv, count_vu);
            }
        }
    }

    #[test]
    fn isolated_trailing_vertex_is_included() {
        // vertex 5 never appears, but vertex 4 does, so n = 5.
        let g = Graph::from_edges([(0, 1), (1, 4)]).unwrap();
        assert_eq!(g.n(), 5);
        assert!(g.neighbors(2).is_empty());
        assert!(g.neighbors(3).is_empty());
    }

    #[test]
    fn parallel_edges_are_preserved() {
        let g = Graph::from_edges([(0, 1), (0, 1)]).unwrap();
        assert_eq!(g.neighbors(0).len(), 2);
        assert_eq!(g.neighbors(1).len(), 2);
    }

    #[test]
    fn empty_stream_is_an_error() {
        let err = Graph::from_edges(std::iter::empty()).unwrap_err();
        matches!(err, GraphError::EmptyGraph);
    }
}
