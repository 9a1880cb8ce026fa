use ndarray::Array1;

/// A minimal sparse row-major matrix: the one primitive every solver in this
/// workspace needs (sparse matrix-vector product) and nothing else.
///
/// Built once via [`from_triplets`] and immutable thereafter, the same way
/// the reference engine assembles `Eigen::SparseMatrix<double, RowMajor>`
/// from a triplet list and never mutates it again.
#[derive(Debug, Clone)]
pub struct SparseRowMatrix {
    row_offsets: Vec<u32>,
    col_indices: Vec<u32>,
    values: Vec<f64>,
}

impl SparseRowMatrix {
    /// Builds a matrix from `(row, col, value)` triplets, summing
    /// duplicate `(row, col)` entries — matching Eigen's
    /// `setFromTriplets`, which is how the reference engine folds a
    /// self-loop's contribution into the diagonal triplet on top of the
    /// explicit `0.5`/`w(i,i)` term.
    pub fn from_triplets(n: usize, mut triplets: Vec<(u32, u32, f64)>) -> Self {
        triplets.sort_unstable_by_key(|&(r, c, _)| (r, c));
        let mut row_offsets = vec![0u32; n + 1];
        let mut col_indices = Vec::new();
        let mut values = Vec::new();
        let mut idx = 0;
        while idx < triplets.len() {
            let (r, c, _) = triplets[idx];
            let mut sum = 0.0;
            let mut j = idx;
            while j < triplets.len() && triplets[j].0 == r && triplets[j].1 == c {
                sum += triplets[j].2;
                j += 1;
            }
            col_indices.push(c);
            values.push(sum);
            row_offsets[r as usize + 1] += 1;
            idx = j;
        }
        for i in 0..n {
            row_offsets[i + 1] += row_offsets[i];
        }
        SparseRowMatrix {
            row_offsets,
            col_indices,
            values,
        }
    }

    pub fn n(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    /// Column indices and values for row `i`, in ascending column order.
    pub fn row(&self, i: usize) -> (&[u32], &[f64]) {
        let start = self.row_offsets[i] as usize;
        let end = self.row_offsets[i + 1] as usize;
        (&self.col_indices[start..end], &self.values[start..end])
    }

    pub fn row_sum(&self, i: usize) -> f64 {
        self.row(i).1.iter().sum()
    }

    /// Sparse matrix-vector product `A * x`.
    pub fn spmv(&self, x: &Array1<f64>) -> Array1<f64> {
        let n = self.n();
        let mut out = Array1::<f64>::zeros(n);
        for i in 0..n {
            let (cols, vals) = self.row(i);
            let mut acc = 0.0;
            for (&c, &v) in cols.iter().zip(vals.iter()) {
                acc += v * x[c as usize];
            }
            out[i] = acc;
        }
        out
    }

    /// Builds `2 * self` with the diagonal zeroed — the Tutte smoother's
    /// iteration matrix.
    pub fn doubled_zero_diagonal(&self) -> SparseRowMatrix {
        let n = self.n();
        let mut triplets = Vec::with_capacity(self.values.len());
        for i in 0..n {
            let (cols, vals) = self.row(i);
            for (&c, &v) in cols.iter().zip(vals.iter()) {
                if c as usize != i {
                    triplets.push((i as u32, c, 2.0 * v));
                }
            }
        }
        SparseRowMatrix::from_triplets(n, triplets)
    }
}
