//! Value types and services the pipeline is built on.

pub mod config;
pub mod constants;
pub mod error;
pub mod phase_space;
pub mod plane;
pub mod rng;
pub mod stats;
pub mod twiss;

// re-export frequently-used items for convenience
pub use config::{DistribConfig, DistribConfigBuilder, DistribType};
pub use constants::{
    DEFAULT_MAX_RMS_FACTOR, MIN_PARTICLES_FOR_CLEANING, NUM_COORDS, NUM_PLANES, PZ_ROW,
};
pub use error::{ConfigError, DistribError};
pub use phase_space::{Array6D, PhaseSpace6D};
pub use plane::Plane;
pub use rng::SampleRng;
pub use twiss::{Twiss2D, Twiss6D};
