use crate::error::SpectralError;

/// Coarsening mode (spec.md §4.H): whether to build a coarse graph at all,
/// and if so, whether its solution seeds the fine level or is the final
/// answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoarsenMode {
    None,
    Lift,
    Stop,
}

impl TryFrom<u8> for CoarsenMode {
    type Error = SpectralError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CoarsenMode::None),
            1 => Ok(CoarsenMode::Lift),
            2 => Ok(CoarsenMode::Stop),
            other => Err(SpectralError::Input(format!(
                "coarsen mode must be 0, 1, or 2, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HdeMode {
    Off,
    On,
}

impl TryFrom<u8> for HdeMode {
    type Error = SpectralError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(HdeMode::Off),
            1 => Ok(HdeMode::On),
            other => Err(SpectralError::Input(format!(
                "hde flag must be 0 or 1, got {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefineMode {
    None,
    Koren,
    Tutte,
    TutteThenKoren,
}

impl TryFrom<u8> for RefineMode {
    type Error = SpectralError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(RefineMode::None),
            1 => Ok(RefineMode::Koren),
            2 => Ok(RefineMode::Tutte),
            3 => Ok(RefineMode::TutteThenKoren),
            other => Err(SpectralError::Input(format!(
                "refine mode must be 0, 1, 2, or 3, got {other}"
            ))),
        }
    }
}

/// A fixed, documented default seed — reproducible, not secret (spec.md §5).
pub const DEFAULT_SEED: u64 = 42;

/// Parameters threaded through the orchestrator in place of the reference
/// engine's hardcoded constants (spec.md §4.H, component K of SPEC_FULL.md).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub coarsen: CoarsenMode,
    pub hde: HdeMode,
    pub refine: RefineMode,
    pub coarsen_target: usize,
    pub coarsen_round_cap: usize,
    pub fine_eps: f64,
    pub coarse_eps: f64,
    pub tutte_rounds: usize,
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            coarsen: CoarsenMode::None,
            hde: HdeMode::Off,
            refine: RefineMode::None,
            coarsen_target: speclayout_coarsen::DEFAULT_TARGET,
            coarsen_round_cap: speclayout_coarsen::DEFAULT_ROUND_CAP,
            fine_eps: 1e-5,
            coarse_eps: 1e-9,
            tutte_rounds: speclayout_tutte::DEFAULT_ROUNDS,
            seed: DEFAULT_SEED,
        }
    }
}
