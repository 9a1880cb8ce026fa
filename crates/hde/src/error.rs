use thiserror::Error;

/// Errors raised while running HDE initialization.
///
/// Kept local to this crate (rather than depending on the workspace's
/// unified `SpectralError`) the same way `speclayout-graph` keeps its own
/// `GraphError` — the orchestration crate above converts this with `?` via
/// a `From` impl.
#[derive(Debug, Error)]
pub enum HdeError {
    #[error(
        "HDE numeric failure: only {survived} of {attempted} pivot column(s) survived \
         D-orthogonalization (need at least 2 to project onto a 2D subspace)"
    )]
    TooFewColumns { survived: usize, attempted: usize },
}
