use crate::sparse::SparseRowMatrix;
use ndarray::Array1;
use speclayout_graph::{CoarseGraph, Graph};

/// Builds the lazy-random-walk transition matrix `M = ½(I + D⁻¹A)` for a
/// fine CSR graph, along with its degree vector.
///
/// `M[i,i] = ½`, `M[i,v] = 1/(2·deg(i))` for each adjacency entry (including
/// repeated entries from parallel edges, and self-loop entries which land
/// back on the diagonal and accumulate there — see
/// [`SparseRowMatrix::from_triplets`]).
pub fn build_transition_fine(graph: &Graph) -> (SparseRowMatrix, Array1<f64>) {
    let n = graph.n();
    let mut degrees = Array1::<f64>::zeros(n);
    let mut triplets = Vec::with_capacity(graph.m() + n);
    for i in 0..n {
        let deg = graph.degree(i) as f64;
        degrees[i] = deg;
        triplets.push((i as u32, i as u32, 0.5));
        let nzv = 1.0 / (2.0 * deg);
        for &v in graph.neighbors(i) {
            triplets.push((i as u32, v, nzv));
        }
    }
    (SparseRowMatrix::from_triplets(n, triplets), degrees)
}

/// Builds `M` for a coarse graph: off-diagonal entries are
/// `w(i,v)/(2·deg(i))`; a coarse self-loop's weight is folded additively
/// into the `½` diagonal entry instead of becoming a separate off-diagonal
/// term (spec.md §3/§4.D).
pub fn build_transition_coarse(coarse: &CoarseGraph) -> (SparseRowMatrix, Array1<f64>) {
    let n = coarse.n();
    let mut degrees = Array1::<f64>::zeros(n);
    for i in 0..n {
        degrees[i] = coarse.weights(i).iter().sum();
    }
    let mut triplets = Vec::with_capacity(coarse.m() + n);
    for i in 0..n {
        let inv_2deg = 1.0 / (2.0 * degrees[i]);
        let mut diag = 0.0;
        for (&v, &w) in coarse.neighbors(i).iter().zip(coarse.weights(i).iter()) {
            if v as usize == i {
                diag += w * inv_2deg;
            } else {
                triplets.push((i as u32, v, w * inv_2deg));
            }
        }
        triplets.push((i as u32, i as u32, diag + 0.5));
    }
    (SparseRowMatrix::from_triplets(n, triplets), degrees)
}

/// Builds the graph Laplacian `L = D - A` directly as a sparse matrix
/// (used only by HDE's small dense projection step).
pub fn build_laplacian(graph: &Graph, degrees: &Array1<f64>) -> SparseRowMatrix {
    let n = graph.n();
    let mut triplets = Vec::with_capacity(graph.m() + n);
    for i in 0..n {
        triplets.push((i as u32, i as u32, degrees[i]));
        for &v in graph.neighbors(i) {
            triplets.push((i as u32, v, -1.0));
        }
    }
    SparseRowMatrix::from_triplets(n, triplets)
}
