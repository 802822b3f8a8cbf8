//! Centralised error types used across the crate.

use thiserror::Error;

use crate::core::{config::DistribType, plane::Plane};

/// Precise configuration faults. The caller has to fix the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("distrib_type = {0} -- not supported")]
    UnsupportedDistribution(String),
    #[error("max_rms_factor = {0}; must be > 0")]
    InvalidMaxRmsFactor(f64),
    #[error("max_attempts must be > 0 when set")]
    ZeroAttemptCap,
    #[error("coordinate index {0} is out of range 0..=5")]
    RowOutOfRange(usize),
    #[error("phase space must hold at least one particle")]
    EmptyPhaseSpace,
    #[error("twiss {field} = {value}; must be > 0")]
    InvalidTwiss { field: &'static str, value: f64 },
}

/// Top-level error type bubbled up by public APIs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistribError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("distrib_type = {0} is not yet implemented")]
    NotImplemented(DistribType),
    #[error("emit_sq = {emit_sq} must be > 0 for plane {plane}")]
    InvalidEmittance { plane: Plane, emit_sq: f64 },
    #[error("covariance matrix is not positive definite; cannot remove correlations")]
    DegenerateCovariance,
    #[error("row {row} has rms {rms}; cannot normalize")]
    ZeroRms { row: usize, rms: f64 },
    #[error("need at least {min} particles to clean the distribution, got {got}")]
    TooFewParticles { min: usize, got: usize },
    #[error("phase space has {got} columns, expected {expected}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("non-finite {what} while mapping plane {plane}")]
    Computation { plane: Plane, what: &'static str },
    #[error(
        "rejection sampling of rows {rows:?} gave up after {attempts} attempts \
         ({accepted} of {wanted} accepted)"
    )]
    SamplingExhausted {
        rows: &'static [usize],
        accepted: usize,
        wanted: usize,
        attempts: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_and_unimplemented_are_distinct() {
        let unsupported = DistribError::from(ConfigError::UnsupportedDistribution("bogus".into()));
        let unimplemented = DistribError::NotImplemented(DistribType::Kv);
        assert_ne!(unsupported, unimplemented);
        assert_eq!(unsupported.to_string(), "distrib_type = bogus -- not supported");
        assert_eq!(unimplemented.to_string(), "distrib_type = kv is not yet implemented");
    }

    #[test]
    fn invalid_emittance_names_the_plane() {
        let e = DistribError::InvalidEmittance {
            plane: Plane::Z,
            emit_sq: -1.0,
        };
        assert_eq!(e.to_string(), "emit_sq = -1 must be > 0 for plane z (index 2)");
    }
}
