//! Row statistics over the 6D store: means, RMS, covariance and the
//! in-place cleaning operations built on them.
//!
//! All moments use population normalisation (divide by N).

use nalgebra::{Matrix6, Vector6};

use crate::core::{
    error::DistribError,
    phase_space::{Array6D, PhaseSpace6D},
};

#[inline]
#[allow(clippy::cast_precision_loss)]
fn count(array: &Array6D) -> f64 {
    array.ncols() as f64
}

fn row_means(array: &Array6D) -> Vector6<f64> {
    let n = count(array);
    Vector6::from_fn(|i, _| array.row(i).sum() / n)
}

fn centre_rows(array: &mut Array6D, mu: &Vector6<f64>) {
    for (i, m) in mu.iter().enumerate() {
        for v in array.row_mut(i).iter_mut() {
            *v -= m;
        }
    }
}

/// Per-row mean.
#[must_use]
pub fn mean(store: &PhaseSpace6D) -> Vector6<f64> {
    row_means(store.array())
}

/// Per-row RMS deviation from the row mean.
#[must_use]
pub fn rms(store: &PhaseSpace6D) -> Vector6<f64> {
    let array = store.array();
    let n = count(array);
    let mu = row_means(array);
    Vector6::from_fn(|i, _| {
        let ss: f64 = array.row(i).iter().map(|v| (v - mu[i]).powi(2)).sum();
        (ss / n).sqrt()
    })
}

/// Full 6×6 second-moment matrix about the mean.
#[must_use]
pub fn covariance(store: &PhaseSpace6D) -> Matrix6<f64> {
    let mu = row_means(store.array());
    let mut centred = store.array().clone();
    centre_rows(&mut centred, &mu);
    let sigma: Matrix6<f64> = &centred * centred.transpose() / count(&centred);
    // exact symmetry regardless of summation order
    (sigma + sigma.transpose()) * 0.5
}

pub fn subtract_mean(store: &mut PhaseSpace6D) {
    let mu = mean(store);
    centre_rows(store.array_mut(), &mu);
}

/// Whiten the cloud: with `C = L·Lᵀ` the Cholesky factor of the covariance,
/// replace the data by `L⁻¹·data`, leaving an identity covariance.
pub fn remove_correlations(store: &mut PhaseSpace6D) -> Result<(), DistribError> {
    let chol = covariance(store)
        .cholesky()
        .ok_or(DistribError::DegenerateCovariance)?;
    if chol.l().solve_lower_triangular_mut(store.array_mut()) {
        Ok(())
    } else {
        Err(DistribError::DegenerateCovariance)
    }
}

/// Scale every row to unit RMS. Nothing is touched if any row has zero spread.
pub fn normalize_rms(store: &mut PhaseSpace6D) -> Result<(), DistribError> {
    let r = rms(store);
    if let Some((row, &bad)) = r
        .iter()
        .enumerate()
        .find(|(_, v)| !(**v > 0.0 && v.is_finite()))
    {
        return Err(DistribError::ZeroRms { row, rms: bad });
    }
    let array = store.array_mut();
    for (i, s) in r.iter().enumerate() {
        for v in array.row_mut(i).iter_mut() {
            *v /= s;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{constants::NUM_COORDS, rng::SampleRng};

    fn store_from_rows(rows: [[f64; 4]; 6]) -> PhaseSpace6D {
        let array = Array6D::from_fn(4, |i, j| rows[i][j]);
        PhaseSpace6D::from_array(array).unwrap()
    }

    fn random_store(n: usize, seed: u64) -> PhaseSpace6D {
        let mut rng = SampleRng::seed(seed);
        let mut ps = PhaseSpace6D::new(n).unwrap();
        for v in ps.array_mut().iter_mut() {
            *v = rng.randn();
        }
        // correlate a few coordinates and shift the means
        let a = ps.array_mut();
        for j in 0..n {
            a[(1, j)] += 0.8 * a[(0, j)] + 3.0;
            a[(5, j)] = 0.5 * a[(5, j)] - 0.3 * a[(2, j)] - 1.0;
        }
        ps
    }

    #[test]
    fn mean_and_rms_of_known_rows() {
        let ps = store_from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [-1.0, 1.0, -1.0, 1.0],
            [0.0; 4],
            [5.0; 4],
            [2.0, 2.0, 4.0, 4.0],
            [0.0, 0.0, 0.0, 8.0],
        ]);
        let mu = mean(&ps);
        let r = rms(&ps);
        assert!((mu[0] - 2.5).abs() < 1e-15);
        assert!(mu[1].abs() < 1e-15);
        assert!((mu[3] - 5.0).abs() < 1e-15);
        assert!((r[0] - 1.25_f64.sqrt()).abs() < 1e-15);
        assert!((r[1] - 1.0).abs() < 1e-15);
        assert_eq!(r[3], 0.0);
        assert!((r[4] - 1.0).abs() < 1e-15);
    }

    #[test]
    fn covariance_is_symmetric_with_rms_on_diagonal() {
        let ps = random_store(500, 3);
        let sigma = covariance(&ps);
        let r = rms(&ps);
        assert_eq!(sigma, sigma.transpose());
        for i in 0..NUM_COORDS {
            assert!((sigma[(i, i)] - r[i] * r[i]).abs() < 1e-12);
        }
        assert!(sigma[(0, 1)] > 0.5);
    }

    #[test]
    fn whitening_gives_identity_covariance() {
        let mut ps = random_store(2_000, 11);
        subtract_mean(&mut ps);
        remove_correlations(&mut ps).unwrap();
        let sigma = covariance(&ps);
        let identity = Matrix6::<f64>::identity();
        assert!((sigma - identity).abs().max() < 1e-10);
    }

    #[test]
    fn degenerate_cloud_cannot_be_whitened() {
        let mut ps = PhaseSpace6D::new(50).unwrap();
        ps.array_mut().fill(1.0);
        assert_eq!(
            remove_correlations(&mut ps),
            Err(DistribError::DegenerateCovariance)
        );
    }

    #[test]
    fn normalize_rms_rejects_flat_row_without_touching_data() {
        let mut ps = random_store(100, 5);
        ps.array_mut().row_mut(3).fill(2.0);
        let before = ps.clone();
        assert_eq!(
            normalize_rms(&mut ps),
            Err(DistribError::ZeroRms { row: 3, rms: 0.0 })
        );
        assert_eq!(ps, before);
    }

    #[test]
    fn normalize_rms_gives_unit_rms() {
        let mut ps = random_store(300, 9);
        normalize_rms(&mut ps).unwrap();
        for v in rms(&ps).iter() {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }
}
