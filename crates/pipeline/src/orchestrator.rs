//! Pipeline orchestrator (component H): wires coarsening, HDE, Koren, and
//! Tutte together following the seed-selection precedence of the reference
//! engine's `main`.

use crate::config::{CoarsenMode, HdeMode, PipelineConfig, RefineMode};
use crate::error::SpectralError;
use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use speclayout_graph::Graph;
use speclayout_transition::{build_transition_coarse, build_transition_fine};

/// The final 2D coordinates: `second`/`third` are parallel length-`n` arrays
/// (or length-`n_coarse` when `coarsen = Stop`).
pub struct Embedding {
    pub second: Array1<f64>,
    pub third: Array1<f64>,
}

impl Embedding {
    pub fn len(&self) -> usize {
        self.second.len()
    }

    pub fn is_empty(&self) -> bool {
        self.second.is_empty()
    }
}

fn first_vector(n: usize) -> Array1<f64> {
    Array1::from_elem(n, 1.0 / (n as f64).sqrt())
}

/// Draws a random vector the way `Eigen::VectorXd::Random` does (uniform in
/// `[-1, 1]`), then flips its sign so component 0 is non-negative, then
/// normalizes — exactly the three-step recipe `main` repeats for every
/// random seed vector (spec.md's Design Notes, "Sign of initial random
/// vectors").
fn random_seed_vector(rng: &mut StdRng, n: usize) -> Array1<f64> {
    let mut v = Array1::from_shape_fn(n, |_| rng.gen_range(-1.0..=1.0));
    if v[0] < 0.0 {
        v.mapv_inplace(|x| -x);
    }
    let norm = v.dot(&v).sqrt();
    if norm > 0.0 {
        v /= norm;
    }
    v
}

fn normalize(v: &mut Array1<f64>) {
    let norm = v.dot(v).sqrt();
    if norm > 0.0 {
        *v /= norm;
    }
}

/// Runs the full pipeline on `graph` per `config`, producing the second and
/// third eigenvector coordinates.
pub fn run(graph: &Graph, config: &PipelineConfig) -> Result<Embedding, SpectralError> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let lifted_seed = if config.coarsen != CoarsenMode::None {
        let coarsening =
            speclayout_coarsen::coarsen(graph, config.coarsen_target, config.coarsen_round_cap);
        let n_coarse = coarsening.coarse.n();
        log::info!("coarsening: {} fine vertices -> {n_coarse} coarse", graph.n());

        let (m_coarse, degrees_coarse) = build_transition_coarse(&coarsening.coarse);
        let first_coarse = first_vector(n_coarse);
        let second_seed = random_seed_vector(&mut rng, n_coarse);
        let third_seed = random_seed_vector(&mut rng, n_coarse);

        let result = speclayout_koren::koren_power_iteration(
            &m_coarse,
            &degrees_coarse,
            config.coarse_eps,
            &first_coarse,
            second_seed,
            third_seed,
        );
        log::info!(
            "coarse koren: second in {} iteration(s), third in {} iteration(s)",
            result.second_iterations,
            result.third_iterations
        );

        if config.coarsen == CoarsenMode::Stop {
            return Ok(Embedding {
                second: result.second,
                third: result.third,
            });
        }

        Some((result.second, result.third, coarsening.coarse_id))
    } else {
        None
    };

    let n = graph.n();
    let (m, degrees) = build_transition_fine(graph);
    let first_vec = first_vector(n);

    let (mut second, mut third) = match (&lifted_seed, config.hde) {
        (Some((second_coarse, third_coarse, coarse_id)), _) => {
            let mut second = Array1::<f64>::zeros(n);
            let mut third = Array1::<f64>::zeros(n);
            for i in 0..n {
                let c = coarse_id[i] as usize;
                second[i] = second_coarse[c];
                third[i] = third_coarse[c];
            }
            normalize(&mut second);
            normalize(&mut third);
            (second, third)
        }
        (None, HdeMode::On) => {
            log::info!("running HDE initialization");
            speclayout_hde::hde_initialize(graph, &degrees)?
        }
        (None, HdeMode::Off) => {
            let second = random_seed_vector(&mut rng, n);
            let third = random_seed_vector(&mut rng, n);
            (second, third)
        }
    };

    match config.refine {
        RefineMode::None => {
            normalize(&mut second);
            normalize(&mut third);
        }
        RefineMode::Koren => {
            let result = speclayout_koren::koren_power_iteration(
                &m,
                &degrees,
                config.fine_eps,
                &first_vec,
                second,
                third,
            );
            second = result.second;
            third = result.third;
        }
        RefineMode::Tutte => {
            speclayout_tutte::tutte_smooth(&m, &mut second, &mut third, config.tutte_rounds);
        }
        RefineMode::TutteThenKoren => {
            speclayout_tutte::tutte_smooth(&m, &mut second, &mut third, config.tutte_rounds);
            let result = speclayout_koren::koren_power_iteration(
                &m,
                &degrees,
                config.fine_eps,
                &first_vec,
                second,
                third,
            );
            second = result.second;
            third = result.third;
        }
    }

    Ok(Embedding { second, third })
}
