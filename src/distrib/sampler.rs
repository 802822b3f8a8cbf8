//! Rejection samplers that populate the raw phase space.
//!
//! * uniform  - points inside the unit 3-ball, positions and momenta drawn
//!   by two independent loops
//! * gaussian - each row its own truncated normal, `sample² < max_rms_factor`
//!
//! Loops run until every column has an accepted sample. With `max_attempts`
//! set, a loop that draws that many candidates without finishing fails with
//! [`DistribError::SamplingExhausted`].

use tracing::debug;

use crate::core::{
    config::DistribType, error::DistribError, phase_space::PhaseSpace6D, rng::SampleRng,
};

static POSITION_ROWS: [usize; 3] = [0, 2, 4];
static MOMENTUM_ROWS: [usize; 3] = [1, 3, 5];
static SINGLE_ROWS: [[usize; 1]; 6] = [[0], [1], [2], [3], [4], [5]];

/// Draw bookkeeping for one rejection loop.
struct Budget {
    rows: &'static [usize],
    wanted: usize,
    cap: Option<u64>,
    attempts: u64,
}

impl Budget {
    fn new(rows: &'static [usize], wanted: usize, cap: Option<u64>) -> Self {
        Self {
            rows,
            wanted,
            cap,
            attempts: 0,
        }
    }

    /// Count one more draw, failing once the cap is spent.
    #[inline]
    fn draw(&mut self, accepted: usize) -> Result<(), DistribError> {
        if self.cap.is_some_and(|cap| self.attempts >= cap) {
            return Err(DistribError::SamplingExhausted {
                rows: self.rows,
                accepted,
                wanted: self.wanted,
                attempts: self.attempts,
            });
        }
        self.attempts += 1;
        Ok(())
    }
}

/// Dispatch on the distribution kind.
pub fn populate(
    store: &mut PhaseSpace6D,
    kind: DistribType,
    rng: &mut SampleRng,
    max_rms_factor: f64,
    max_attempts: Option<u64>,
) -> Result<(), DistribError> {
    store.validate_shape()?;
    debug!(%kind, particles = store.num_particles(), "sampling raw phase space");
    match kind {
        DistribType::Uniform => fill_uniform(store, rng, max_attempts),
        DistribType::Gaussian => fill_gaussian(store, rng, max_rms_factor, max_attempts),
        DistribType::Waterbag | DistribType::Kv => Err(DistribError::NotImplemented(kind)),
    }
}

/// Uniform inside the unit ball, positions (rows 0, 2, 4) and momenta
/// (rows 1, 3, 5) drawn independently.
pub fn fill_uniform(
    store: &mut PhaseSpace6D,
    rng: &mut SampleRng,
    max_attempts: Option<u64>,
) -> Result<(), DistribError> {
    store.validate_shape()?;
    fill_unit_ball(store, rng, &POSITION_ROWS, max_attempts)?;
    fill_unit_ball(store, rng, &MOMENTUM_ROWS, max_attempts)
}

fn fill_unit_ball(
    store: &mut PhaseSpace6D,
    rng: &mut SampleRng,
    rows: &'static [usize; 3],
    max_attempts: Option<u64>,
) -> Result<(), DistribError> {
    let n = store.num_particles();
    let array = store.array_mut();
    let mut budget = Budget::new(rows, n, max_attempts);
    let mut accepted = 0;
    while accepted < n {
        budget.draw(accepted)?;
        let p = [
            rng.uniform_symmetric(),
            rng.uniform_symmetric(),
            rng.uniform_symmetric(),
        ];
        if p.iter().map(|c| c * c).sum::<f64>() < 1.0 {
            for (&row, c) in rows.iter().zip(p) {
                array[(row, accepted)] = c;
            }
            accepted += 1;
        }
    }
    debug!(?rows, attempts = budget.attempts, "unit ball filled");
    Ok(())
}

/// Per-row truncated normal. Each row has its own rejection loop.
pub fn fill_gaussian(
    store: &mut PhaseSpace6D,
    rng: &mut SampleRng,
    max_rms_factor: f64,
    max_attempts: Option<u64>,
) -> Result<(), DistribError> {
    store.validate_shape()?;
    let n = store.num_particles();
    let array = store.array_mut();
    for rows in &SINGLE_ROWS {
        let row = rows[0];
        let mut budget = Budget::new(rows, n, max_attempts);
        let mut accepted = 0;
        while accepted < n {
            budget.draw(accepted)?;
            let s = rng.randn();
            if s * s < max_rms_factor {
                array[(row, accepted)] = s;
                accepted += 1;
            }
        }
        debug!(row, attempts = budget.attempts, "row filled");
    }
    Ok(())
}
