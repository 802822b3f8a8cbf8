//! Public-facing crate root – re-exports + one-shot helper.
//!
//! Builds a 6D particle distribution (x, px, y, py, z, pz) whose second
//! moments match per-plane Courant-Snyder parameters.

pub mod core;
pub mod distrib;

pub use crate::core::{
    config::{DistribConfig, DistribConfigBuilder, DistribType},
    constants::{DEFAULT_MAX_RMS_FACTOR, MIN_PARTICLES_FOR_CLEANING},
    error::{ConfigError, DistribError},
    phase_space::{Array6D, PhaseSpace6D},
    plane::Plane,
    twiss::{Twiss2D, Twiss6D},
};

pub use distrib::{Distrib6D, twiss_map::PlaneMap};

/// Generate, clean and Twiss-match a distribution in one call and hand the
/// resulting phase space to the caller.
pub fn make_twiss_distrib(
    num_particles: usize,
    twiss: &Twiss6D,
    mean_momentum: f64,
    config: DistribConfig,
) -> Result<PhaseSpace6D, DistribError> {
    let mut generator = Distrib6D::with_config(num_particles, config)?;
    generator.make_twiss_distrib(twiss, mean_momentum)?;
    Ok(generator.into_phase_space())
}
