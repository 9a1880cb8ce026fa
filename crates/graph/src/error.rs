use thiserror::Error;

/// Errors raised while constructing or validating a [`crate::Graph`].
///
/// Kept local to this crate (rather than depending on the workspace's
/// unified `SpectralError`) so `speclayout-graph` has no dependency on the
/// orchestration crates above it. Vertex-id parsing/validation (malformed
/// or negative ids in the input file) happens a layer up, in the CLI's
/// edge-list reader, before a single `(u32, u32)` pair ever reaches this
/// crate — so the only failure this type needs to express is an empty
/// input.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("empty graph: no vertices")]
    EmptyGraph,
}
