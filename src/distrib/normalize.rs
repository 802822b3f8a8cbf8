//! Turn a raw cloud into the canonical one: zero mean, no correlations,
//! unit RMS in every coordinate.

use tracing::debug;

use crate::core::{
    constants::MIN_PARTICLES_FOR_CLEANING, error::DistribError, phase_space::PhaseSpace6D,
    stats,
};

/// Order matters: the whitening step can leave a small residual mean, so the
/// mean is removed again before the final RMS scaling.
///
/// The steps run on a copy that replaces the store only when all of them
/// succeed; on error the store is left as it was.
pub fn canonicalize(store: &mut PhaseSpace6D) -> Result<(), DistribError> {
    store.validate_shape()?;
    let n = store.num_particles();
    if n < MIN_PARTICLES_FOR_CLEANING {
        return Err(DistribError::TooFewParticles {
            min: MIN_PARTICLES_FOR_CLEANING,
            got: n,
        });
    }
    debug!(particles = n, "cleaning phase space");
    let mut work = store.clone();
    stats::subtract_mean(&mut work);
    stats::remove_correlations(&mut work)?;
    stats::subtract_mean(&mut work);
    stats::normalize_rms(&mut work)?;
    *store = work;
    Ok(())
}

#[cfg(test)]
mod tests {
    use nalgebra::Matrix6;

    use super::*;
    use crate::{
        core::{config::DistribType, rng::SampleRng},
        distrib::sampler,
    };

    fn raw_cloud(kind: DistribType, n: usize, seed: u64) -> PhaseSpace6D {
        let mut ps = PhaseSpace6D::new(n).unwrap();
        sampler::populate(&mut ps, kind, &mut SampleRng::seed(seed), 5.0, None).unwrap();
        // skew it so there is something to clean
        ps.offset_row(0, 4.0).unwrap();
        ps.scale_row(3, 10.0).unwrap();
        let a = ps.array_mut();
        for j in 0..n {
            a[(4, j)] += 0.7 * a[(1, j)];
        }
        ps
    }

    #[test]
    fn canonical_cloud_is_centred_white_and_unit() {
        for kind in [DistribType::Gaussian, DistribType::Uniform] {
            let mut ps = raw_cloud(kind, 5_000, 21);
            canonicalize(&mut ps).unwrap();
            assert!(stats::mean(&ps).amax() < 1e-12);
            for r in stats::rms(&ps).iter() {
                assert!((r - 1.0).abs() < 1e-12);
            }
            let off = stats::covariance(&ps) - Matrix6::identity();
            assert!(off.amax() < 1e-10);
        }
    }

    #[test]
    fn second_pass_changes_nothing_measurable() {
        let mut ps = raw_cloud(DistribType::Gaussian, 2_000, 5);
        canonicalize(&mut ps).unwrap();
        let (mean1, rms1) = (stats::mean(&ps), stats::rms(&ps));
        canonicalize(&mut ps).unwrap();
        let (mean2, rms2) = (stats::mean(&ps), stats::rms(&ps));
        assert!((mean2 - mean1).amax() < 1e-10);
        assert!((rms2 - rms1).amax() < 1e-10);
    }

    #[test]
    fn too_few_particles_is_an_error() {
        let mut ps = raw_cloud(DistribType::Gaussian, 6, 1);
        assert_eq!(
            canonicalize(&mut ps),
            Err(DistribError::TooFewParticles { min: 7, got: 6 })
        );
    }

    #[test]
    fn identical_particles_are_degenerate() {
        let mut ps = PhaseSpace6D::new(20).unwrap();
        ps.array_mut().fill(0.25);
        assert_eq!(canonicalize(&mut ps), Err(DistribError::DegenerateCovariance));
    }

    #[test]
    fn failed_cleaning_leaves_store_untouched() {
        // shifted mean plus one flat row: the mean step would change the
        // data, then whitening fails
        let mut ps = raw_cloud(DistribType::Gaussian, 200, 13);
        ps.array_mut().row_mut(2).fill(3.0);
        let before = ps.clone();
        assert_eq!(canonicalize(&mut ps), Err(DistribError::DegenerateCovariance));
        assert_eq!(ps, before);
    }
}
