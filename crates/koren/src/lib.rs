//! Koren's power iteration (component F): extracts the second and third
//! eigenvectors of the lazy transition matrix `M` under degree-weighted
//! ("D-orthogonal") deflation against eigenvectors already found.
//!
//! A direct port of `powerIterationKoren` in the reference engine, which
//! computes both eigenvectors in one pass — the second's deflation carries
//! straight into the third's — so this crate keeps that shape rather than
//! splitting into two public entry points that would each re-derive
//! `first_vec ⊙ degrees`.

use ndarray::Array1;
use speclayout_transition::SparseRowMatrix;

/// Safety-net iteration cap (spec.md §4.F: "Implementations may add a cap
/// as fatal-error safety"). Hitting it is a warning, not an error — the
/// current best vector is accepted.
pub const DEFAULT_ITERATION_CAP: usize = 1_000_000;

/// Outcome of running Koren's iteration for both eigenvectors.
pub struct KorenResult {
    pub second: Array1<f64>,
    pub third: Array1<f64>,
    pub second_iterations: usize,
    pub third_iterations: usize,
    /// Set if either eigenvector hit the iteration cap before converging.
    pub hit_iteration_cap: bool,
}

fn normalize(v: &mut Array1<f64>) {
    let norm = v.dot(v).sqrt();
    if norm > 0.0 {
        *v /= norm;
    }
}

fn residual_norm(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    let diff = a - b;
    diff.dot(&diff).sqrt()
}

/// Runs one deflated power-iteration eigenvector extraction.
///
/// `basis` holds the already-converged eigenvectors to D-orthogonalize
/// against (in order); `basis_d` holds each one's elementwise product with
/// the degree vector, and `denom` its `⟨basis_i, D·basis_i⟩`.
fn iterate(
    m: &SparseRowMatrix,
    mut u_hat: Array1<f64>,
    eps: f64,
    basis: &[(&Array1<f64>, Array1<f64>, f64)],
    iteration_cap: usize,
) -> (Array1<f64>, usize, bool) {
    let mut iterations = 0usize;
    loop {
        let mut u = u_hat.clone();
        for (basis_vec, basis_d, denom) in basis {
            let num = u.dot(basis_d);
            u = &u - &(*basis_vec * (num / denom));
        }
        let mut next = m.spmv(&u);
        normalize(&mut next);
        iterations += 1;
        let residual = residual_norm(&u, &next);
        u_hat = next;
        if residual < eps || iterations >= iteration_cap {
            let hit_cap = iterations >= iteration_cap && residual >= eps;
            return (u_hat, iterations, hit_cap);
        }
    }
}

/// Computes the second and third eigenvectors of `m` given degree-weighted
/// inner products, seeded from `second_seed`/`third_seed` (nonzero starting
/// vectors — see spec.md §4.H for seed-selection precedence).
///
/// `eps` is the second eigenvector's convergence tolerance; the third uses
/// `2 * eps` per spec.md §4.F.
pub fn koren_power_iteration(
    m: &SparseRowMatrix,
    degrees: &Array1<f64>,
    eps: f64,
    first: &Array1<f64>,
    second_seed: Array1<f64>,
    third_seed: Array1<f64>,
) -> KorenResult {
    koren_power_iteration_capped(
        m,
        degrees,
        eps,
        first,
        second_seed,
        third_seed,
        DEFAULT_ITERATION_CAP,
    )
}

/// Same as [`koren_power_iteration`] but with an explicit iteration cap
/// (exposed mainly for fast-converging tests).
pub fn koren_power_iteration_capped(
    m: &SparseRowMatrix,
    degrees: &Array1<f64>,
    eps: f64,
    first: &Array1<f64>,
    second_seed: Array1<f64>,
    third_seed: Array1<f64>,
    iteration_cap: usize,
) -> KorenResult {
    log::debug!("koren: second eigenvector, eps = {eps}");
    let first_d = first * degrees;
    let denom1 = first.dot(&first_d);
    let (second, second_iterations, cap1) =
        iterate(m, second_seed, eps, &[(first, first_d.clone(), denom1)], iteration_cap);
    if cap1 {
        log::warn!(
            "koren: second eigenvector hit the {iteration_cap}-iteration cap before converging"
        );
    }
    log::debug!("koren: second eigenvector converged in {second_iterations} iteration(s)");

    let eps3 = 2.0 * eps;
    log::debug!("koren: third eigenvector, eps = {eps3}");
    let second_d = &second * degrees;
    let denom2 = second.dot(&second_d);
    let (third, third_iterations, cap2) = iterate(
        m,
        third_seed,
        eps3,
        &[
            (first, first_d, denom1),
            (&second, second_d, denom2),
        ],
        iteration_cap,
    );
    if cap2 {
        log::warn!(
            "koren: third eigenvector hit the {iteration_cap}-iteration cap before converging"
        );
    }
    log::debug!("koren: third eigenvector converged in {third_iterations} iteration(s)");

    KorenResult {
        second,
        third,
        second_iterations,
        third_iterations,
        hit_iteration_cap: cap1 || cap2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use speclayout_graph::Graph;
    use speclayout_transition::build_transition_fine;

    fn first_vector(n: usize) -> Array1<f64> {
        Array1::from_elem(n, 1.0 / (n as f64).sqrt())
    }

    #[test]
    fn path_p4_second_eigenvector_is_monotone() {
        let g = Graph::from_edges([(0, 1), (1, 2), (2, 3)]).unwrap();
        let (m, degrees) = build_transition_fine(&g);
        let n = g.n();
        let first = first_vector(n);
        let seed2 = Array1::from_vec(vec![1.0, 0.5, -0.5, -1.0]);
        let seed3 = Array1::from_vec(vec![1.0, -1.0, -1.0, 1.0]);
        let result = koren_power_iteration(&m, &degrees, 1e-8, &first, seed2, seed3);
        let v = result.second;
        let monotone_inc = v[0] < v[1] && v[1] < v[2] && v[2] < v[3];
        let monotone_dec = v[0] > v[1] && v[1] > v[2] && v[2] > v[3];
        assert!(monotone_inc || monotone_dec, "{v:?} is not monotone");
    }

    #[test]
    fn d_orthogonality_holds_after_convergence() {
        let g = Graph::from_edges([
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 5),
            (5, 0),
            (1, 4),
        ])
        .unwrap();
        let (m, degrees) = build_transition_fine(&g);
        let n = g.n();
        let first = first_vector(n);
        let seed2 = Array1::from_vec(vec![1.0, 0.3, -0.2, 0.8, -0.7, 0.1]);
        let seed3 = Array1::from_vec(vec![0.2, -0.9, 0.6, 0.1, -0.3, 0.8]);
        let result = koren_power_iteration(&m, &degrees, 1e-5, &first, seed2, seed3);
        let first_d = &first * &degrees;
        let second_d = &result.second * &degrees;
        assert!(first.dot(&first_d.clone()) != 0.0);
        assert!(first.dot(&second_d).abs() < 1e-3);
        assert!((result.second.dot(&(&result.third * &degrees))).abs() < 1e-3);
    }
}
