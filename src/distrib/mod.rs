//! The generation pipeline: sample → canonicalize → match Twiss.
//!
//! [`Distrib6D`] owns the phase space for the whole run and hands it out by
//! reference for inspection. Call pattern:
//! ```rust
//! use twiss_distrib::{DistribConfig, Distrib6D, Twiss2D, Twiss6D};
//!
//! let cfg = DistribConfig::builder().seed(1).build()?;
//! let mut generator = Distrib6D::with_config(1_000, cfg)?;
//! let t = Twiss2D::new(-0.5, 4.0, 1.0e-6)?;
//! generator.make_twiss_distrib(&Twiss6D::new(t, t, t), 1.0)?;
//! let derived = generator.calc_twiss_params()?;
//! assert!((derived.x.beta() - 4.0).abs() < 1e-6);
//! # Ok::<(), twiss_distrib::DistribError>(())
//! ```

pub mod moments;
pub mod normalize;
pub mod sampler;
pub mod twiss_map;

use nalgebra::{Matrix6, Vector6};
use tracing::debug;

use crate::core::{
    config::{DistribConfig, DistribType, check_max_rms_factor},
    error::{ConfigError, DistribError},
    phase_space::PhaseSpace6D,
    rng::SampleRng,
    twiss::Twiss6D,
};

/// Stateful generator: configuration, random stream and the store.
#[derive(Debug, Clone)]
pub struct Distrib6D {
    phase_space: PhaseSpace6D,
    kind: DistribType,
    max_rms_factor: f64,
    max_attempts: Option<u64>,
    rng: SampleRng,
}

impl Distrib6D {
    /// Gaussian, `max_rms_factor = 5`, seeded from the OS.
    pub fn new(num_particles: usize) -> Result<Self, DistribError> {
        Self::with_config(num_particles, DistribConfig::default())
    }

    pub fn with_config(
        num_particles: usize,
        config: DistribConfig,
    ) -> Result<Self, DistribError> {
        config.validate()?;
        let phase_space = PhaseSpace6D::new(num_particles)?;
        phase_space.validate_shape()?;
        Ok(Self {
            phase_space,
            kind: config.kind,
            max_rms_factor: config.max_rms_factor,
            max_attempts: config.max_attempts,
            rng: SampleRng::from_seed_opt(config.seed),
        })
    }

    // --- Accessors ---

    #[inline]
    #[must_use]
    pub fn phase_space(&self) -> &PhaseSpace6D {
        &self.phase_space
    }

    #[inline]
    pub fn phase_space_mut(&mut self) -> &mut PhaseSpace6D {
        &mut self.phase_space
    }

    #[must_use]
    pub fn into_phase_space(self) -> PhaseSpace6D {
        self.phase_space
    }

    #[inline]
    #[must_use]
    pub fn distrib_type(&self) -> DistribType {
        self.kind
    }

    /// Select the distribution by name. Waterbag and KV are accepted here and
    /// rejected when sampling.
    pub fn set_distrib_type(&mut self, name: &str) -> Result<(), ConfigError> {
        self.kind = name.parse()?;
        Ok(())
    }

    #[inline]
    pub fn set_kind(&mut self, kind: DistribType) {
        self.kind = kind;
    }

    #[inline]
    #[must_use]
    pub fn max_rms_factor(&self) -> f64 {
        self.max_rms_factor
    }

    pub fn set_max_rms_factor(&mut self, v: f64) -> Result<(), ConfigError> {
        self.max_rms_factor = check_max_rms_factor(v)?;
        Ok(())
    }

    // --- Pipeline ---

    /// Fill the store from the selected source distribution.
    pub fn init_phase_space(&mut self) -> Result<(), DistribError> {
        sampler::populate(
            &mut self.phase_space,
            self.kind,
            &mut self.rng,
            self.max_rms_factor,
            self.max_attempts,
        )
    }

    /// Zero mean, no correlations, unit RMS.
    pub fn clean_phase_space(&mut self) -> Result<(), DistribError> {
        normalize::canonicalize(&mut self.phase_space)
    }

    pub fn round_phase_space(&mut self) -> Result<(), DistribError> {
        self.init_phase_space()?;
        self.clean_phase_space()
    }

    /// Generate a fresh canonical cloud and match it to `twiss`.
    pub fn make_twiss_distrib(
        &mut self,
        twiss: &Twiss6D,
        mean_momentum: f64,
    ) -> Result<(), DistribError> {
        debug!(kind = %self.kind, "making twiss-matched distribution");
        self.round_phase_space()?;
        self.match_twiss(twiss, mean_momentum)
    }

    /// Match the current store, assumed canonical, to `twiss`.
    pub fn match_twiss(
        &mut self,
        twiss: &Twiss6D,
        mean_momentum: f64,
    ) -> Result<(), DistribError> {
        twiss_map::match_twiss(&mut self.phase_space, twiss, mean_momentum)
    }

    pub fn offset_component(&mut self, offset: f64, index: usize) -> Result<(), ConfigError> {
        self.phase_space.offset_row(index, offset)
    }

    pub fn multiply_component(&mut self, factor: f64, index: usize) -> Result<(), ConfigError> {
        self.phase_space.scale_row(index, factor)
    }

    // --- Moments ---

    #[must_use]
    pub fn calc_averages(&self) -> Vector6<f64> {
        moments::averages(&self.phase_space)
    }

    #[must_use]
    pub fn calc_rms_values(&self) -> Vector6<f64> {
        moments::rms_values(&self.phase_space)
    }

    #[must_use]
    pub fn calc_covariance(&self) -> Matrix6<f64> {
        moments::covariance(&self.phase_space)
    }

    pub fn calc_twiss_params(&self) -> Result<Twiss6D, DistribError> {
        moments::twiss_parameters(&self.phase_space)
    }
}
