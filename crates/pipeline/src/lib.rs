//! Orchestration layer (component H) tying together coarsening, HDE,
//! Koren's power iteration, and Tutte smoothing into one 2D spectral
//! embedding pass.

mod config;
mod error;
mod orchestrator;

pub use config::{CoarsenMode, HdeMode, PipelineConfig, RefineMode, DEFAULT_SEED};
pub use error::SpectralError;
pub use orchestrator::{run, Embedding};
