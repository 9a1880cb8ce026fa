//! High-dimensional embedding initializer (component E): builds pivot-based
//! distance vectors via repeated BFS, D-orthogonalizes them, and projects the
//! graph Laplacian onto the resulting basis to seed the second and third
//! spectral coordinates.
//!
//! A direct port of `HDE` in the reference engine, with the eigensolve itself
//! swapped from Eigen's `SelfAdjointEigenSolver` for `nalgebra`'s
//! [`SymmetricEigen`] — the small dense symmetric eigenproblem here (at most
//! `PIVOT_COUNT × PIVOT_COUNT`) is exactly the shape that solver targets.

mod error;

use nalgebra::DMatrix;
use ndarray::Array1;
use speclayout_graph::{bfs, Graph};
use speclayout_transition::build_laplacian;

pub use error::HdeError;

/// Number of BFS pivot rounds (`maxM` in the reference engine).
pub const PIVOT_COUNT: usize = 50;

/// A D-orthogonalized pivot vector's norm must clear this threshold or it is
/// discarded as degenerate.
pub const DISCARD_THRESHOLD: f64 = 0.001;

fn normalize(v: &mut Array1<f64>) -> f64 {
    let norm = v.dot(v).sqrt();
    if norm > 0.0 {
        *v /= norm;
    }
    norm
}

/// Picks the next BFS pivot: the vertex with the largest min-distance to all
/// pivots chosen so far. Ties resolve to the lowest index, matching a
/// first-strictly-greater scan over vertices in order.
fn farthest_vertex(min_dist: &[i64]) -> usize {
    let mut best = 0;
    let mut best_val = min_dist[0];
    for (i, &d) in min_dist.iter().enumerate().skip(1) {
        if d > best_val {
            best_val = d;
            best = i;
        }
    }
    best
}

/// Runs HDE initialization on `graph`, returning `(second, third)` seed
/// vectors for Koren's power iteration or direct Tutte smoothing.
///
/// Requires `graph` to be connected; on a disconnected graph the BFS pivots
/// only explore one component and the projection is meaningless (spec.md's
/// Open Questions leave this undefined — we inherit the reference engine's
/// behavior of proceeding anyway rather than erroring).
///
/// Returns [`HdeError::TooFewColumns`] if fewer than two pivot columns
/// survive D-orthogonalization — the "all HDE columns collapsed below the
/// 0.001 threshold" numeric failure spec.md §7 calls out, generalized to
/// "not enough survived to span a 2D subspace" since a single surviving
/// column is just as unable to seed both `second` and `third`.
pub fn hde_initialize(
    graph: &Graph,
    degrees: &Array1<f64>,
) -> Result<(Array1<f64>, Array1<f64>), HdeError> {
    let n = graph.n();
    log::debug!("hde: building {PIVOT_COUNT} BFS pivot vectors");

    let init_vec = Array1::<f64>::from_elem(n, 1.0 / (n as f64).sqrt());
    let mut raw_pivots = Vec::with_capacity(PIVOT_COUNT);
    let mut min_dist = vec![i64::MAX; n];
    let mut start_idx = 0usize;
    for _ in 0..PIVOT_COUNT {
        let dist = bfs(graph, start_idx);
        for (i, &d) in dist.iter().enumerate() {
            if d < min_dist[i] {
                min_dist[i] = d;
            }
        }
        start_idx = farthest_vertex(&min_dist);
        let mut col = Array1::from_iter(dist.into_iter().map(|d| d as f64));
        normalize(&mut col);
        raw_pivots.push(col);
    }

    let mut basis: Vec<Array1<f64>> = vec![init_vec];
    let mut accepted: Vec<Array1<f64>> = Vec::with_capacity(PIVOT_COUNT);
    for raw in raw_pivots {
        let mut v = raw;
        for b in &basis {
            let bd = b * degrees;
            let numerator = v.dot(&bd);
            let denominator = bd.dot(b);
            v = &v - &(b * (numerator / denominator));
        }
        let norm = normalize(&mut v);
        if norm < DISCARD_THRESHOLD {
            log::debug!("hde: discarding degenerate pivot vector, norm {norm}");
            continue;
        }
        basis.push(v.clone());
        accepted.push(v);
    }

    let k = accepted.len();
    log::debug!("hde: {k} pivot vectors survived orthogonalization");
    if k < 2 {
        return Err(HdeError::TooFewColumns {
            survived: k,
            attempted: PIVOT_COUNT,
        });
    }

    let laplacian = build_laplacian(graph, degrees);
    let lx: Vec<Array1<f64>> = accepted.iter().map(|col| laplacian.spmv(col)).collect();

    let mut xtlx = DMatrix::<f64>::zeros(k, k);
    for i in 0..k {
        for j in 0..k {
            xtlx[(i, j)] = accepted[i].dot(&lx[j]);
        }
    }

    let eigen = nalgebra::linalg::SymmetricEigen::new(xtlx);
    let mut order: Vec<usize> = (0..k).collect();
    order.sort_by(|&a, &b| eigen.eigenvalues[a].partial_cmp(&eigen.eigenvalues[b]).unwrap());
    let lowest_two = &order[..2];

    let mut out = [Array1::<f64>::zeros(n), Array1::<f64>::zeros(n)];
    for (slot, &col) in lowest_two.iter().enumerate() {
        let mut v = Array1::<f64>::zeros(n);
        for i in 0..k {
            let weight = eigen.eigenvectors[(i, col)];
            v = &v + &(&accepted[i] * weight);
        }
        out[slot] = v;
    }
    let [second, third] = out;
    Ok((second, third))
}
