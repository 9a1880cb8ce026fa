//! Tutte smoothing (component G): repeatedly applies the zero-diagonal
//! doubled transition matrix to the coordinate vectors. A direct port of
//! `RefineTutte` in the reference engine.

use ndarray::Array1;
use speclayout_transition::SparseRowMatrix;

/// Default number of smoothing rounds.
pub const DEFAULT_ROUNDS: usize = 500;

/// Applies `S` rounds of `v ← (2M - diag(2M)) · v` to `second` and `third`
/// in place. No normalization between or after rounds — the renderer
/// normalizes by bounding box downstream, so absolute scale doesn't matter
/// here (spec.md §4.G).
pub fn tutte_smooth(m: &SparseRowMatrix, second: &mut Array1<f64>, third: &mut Array1<f64>, rounds: usize) {
    log::debug!("tutte: {rounds} smoothing round(s)");
    let m2 = m.doubled_zero_diagonal();
    for _ in 0..rounds {
        *second = m2.spmv(second);
        *third = m2.spmv(third);
    }
}
