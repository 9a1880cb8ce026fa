use thiserror::Error;

/// Unified error type for the orchestrated pipeline, returned all the way
/// out to the CLI binary.
#[derive(Debug, Error)]
pub enum SpectralError {
    #[error("input error: {0}")]
    Input(String),
    #[error("numeric error: {0}")]
    Numeric(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<speclayout_graph::GraphError> for SpectralError {
    fn from(e: speclayout_graph::GraphError) -> Self {
        SpectralError::Input(e.to_string())
    }
}

impl From<speclayout_hde::HdeError> for SpectralError {
    fn from(e: speclayout_hde::HdeError) -> Self {
        SpectralError::Numeric(e.to_string())
    }
}
