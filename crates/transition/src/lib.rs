//! Sparse transition-matrix (`M = ½(I + D⁻¹A)`) and Laplacian (`L = D - A`)
//! construction (component D), plus the hand-rolled sparse row-major matrix
//! type they and every downstream solver share.

mod builder;
mod sparse;

pub use builder::{build_laplacian, build_transition_coarse, build_transition_fine};
pub use sparse::SparseRowMatrix;
