//! Read-only moment reducers over the current store contents.

use nalgebra::{Matrix6, Vector6};
use tracing::trace;

use crate::core::{
    error::DistribError,
    phase_space::PhaseSpace6D,
    plane::Plane,
    stats,
    twiss::{Twiss2D, Twiss6D},
};

#[must_use]
pub fn averages(store: &PhaseSpace6D) -> Vector6<f64> {
    stats::mean(store)
}

#[must_use]
pub fn rms_values(store: &PhaseSpace6D) -> Vector6<f64> {
    stats::rms(store)
}

#[must_use]
pub fn covariance(store: &PhaseSpace6D) -> Matrix6<f64> {
    stats::covariance(store)
}

/// RMS Twiss parameters of one plane from its 2×2 block of `sigma`.
pub fn plane_twiss(sigma: &Matrix6<f64>, plane: Plane) -> Result<Twiss2D, DistribError> {
    let (i, k) = plane.rows();
    let emit_sq = sigma[(i, i)] * sigma[(k, k)] - sigma[(i, k)] * sigma[(k, i)];
    // also catches NaN
    if !(emit_sq > 0.0) {
        return Err(DistribError::InvalidEmittance { plane, emit_sq });
    }
    let emittance = emit_sq.sqrt();
    let beta = sigma[(i, i)] / emittance;
    let alpha = -sigma[(i, k)] / emittance;
    trace!(%plane, alpha, beta, emittance, "derived twiss");
    Ok(Twiss2D::new_unchecked(alpha, beta, emittance))
}

/// RMS Twiss parameters of all three planes.
pub fn twiss_parameters(store: &PhaseSpace6D) -> Result<Twiss6D, DistribError> {
    let sigma = covariance(store);
    Ok(Twiss6D::new(
        plane_twiss(&sigma, Plane::X)?,
        plane_twiss(&sigma, Plane::Y)?,
        plane_twiss(&sigma, Plane::Z)?,
    ))
}
