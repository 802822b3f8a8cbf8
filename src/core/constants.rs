//! A collection of constants.

/// Rows of the phase-space array: (x, px, y, py, z, pz)
pub const NUM_COORDS: usize = 6;
/// Conjugate coordinate pairs (x, px), (y, py), (z, pz)
pub const NUM_PLANES: usize = 3;

/// Longitudinal momentum row, the one shifted and scaled by the mean momentum
pub const PZ_ROW: usize = 5;

/// Gaussian samples are accepted while `sample² < max_rms_factor`.
pub const DEFAULT_MAX_RMS_FACTOR: f64 = 5.0;

/// A 6×6 covariance needs at least 7 samples to have full rank after the mean
/// has been removed.
pub const MIN_PARTICLES_FOR_CLEANING: usize = NUM_COORDS + 1;
