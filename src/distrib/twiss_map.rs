//! Reshape the canonical cloud onto the target Twiss ellipse, plane by plane.
//!
//! For a plane with Courant-Snyder matrix `[[β, -α], [-α, γ]]` the cloud is
//! scaled along the ellipse's principal axes (`fac`, `f_inv`), rotated by
//! `φ` and multiplied by `√ε`, which turns an identity covariance into
//! `ε·[[β, -α], [-α, γ]]`.

use tracing::{debug, trace};

use crate::core::{
    constants::PZ_ROW,
    error::DistribError,
    phase_space::PhaseSpace6D,
    plane::Plane,
    twiss::{Twiss2D, Twiss6D},
};

/// Closed-form 2×2 transform for one plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneMap {
    pub fac: f64,
    pub f_inv: f64,
    pub sin_phi: f64,
    pub cos_phi: f64,
    pub amplitude: f64,
}

impl PlaneMap {
    /// Derive the coefficients. `beta` and `emittance` are not re-validated;
    /// a descriptor that makes any coefficient non-finite (e.g. `beta == 0`)
    /// is reported as [`DistribError::Computation`].
    #[allow(clippy::float_cmp)]
    pub fn from_twiss(plane: Plane, twiss: &Twiss2D) -> Result<Self, DistribError> {
        let alpha = twiss.alpha();
        let beta = twiss.beta();
        let gamma = twiss.gamma();

        let g_minus_b = gamma - beta;
        let root = (g_minus_b * g_minus_b + 4.0 * alpha * alpha).sqrt();

        // principal-axis order: fac is the smaller factor when gamma >= beta
        let (fac, f_inv) = if g_minus_b >= 0.0 {
            (
                (0.5 * (gamma + beta - root)).sqrt(),
                (0.5 * (gamma + beta + root)).sqrt(),
            )
        } else {
            (
                (0.5 * (gamma + beta + root)).sqrt(),
                (0.5 * (gamma + beta - root)).sqrt(),
            )
        };

        let (mut sin_phi, cos_phi) = if alpha == 0.0 {
            (0.0, 1.0)
        } else {
            (
                (0.5 * (1.0 - g_minus_b.abs() / root)).sqrt(),
                (0.5 * (1.0 + g_minus_b.abs() / root)).sqrt(),
            )
        };
        if alpha * g_minus_b < 0.0 {
            sin_phi = -sin_phi;
        }

        let map = Self {
            fac,
            f_inv,
            sin_phi,
            cos_phi,
            amplitude: twiss.emittance().sqrt(),
        };
        map.check_finite(plane)?;
        trace!(%plane, ?map, gamma, g_minus_b, root, "plane map");
        Ok(map)
    }

    fn check_finite(&self, plane: Plane) -> Result<(), DistribError> {
        let coeffs = [
            ("fac", self.fac),
            ("f_inv", self.f_inv),
            ("sin_phi", self.sin_phi),
            ("cos_phi", self.cos_phi),
            ("amplitude", self.amplitude),
        ];
        match coeffs.into_iter().find(|(_, v)| !v.is_finite()) {
            Some((what, _)) => Err(DistribError::Computation { plane, what }),
            None => Ok(()),
        }
    }

    /// Map one canonical `(u, v)` pair.
    #[inline]
    #[must_use]
    pub fn apply(&self, u: f64, v: f64) -> (f64, f64) {
        (
            self.amplitude * (self.fac * self.cos_phi * u - self.f_inv * self.sin_phi * v),
            self.amplitude * (self.fac * self.sin_phi * u + self.f_inv * self.cos_phi * v),
        )
    }
}

/// Reshape all three planes from a snapshot of the canonical cloud, then
/// apply the mean momentum to row 5.
///
/// Every plane map is computed before the store is touched, so a bad
/// descriptor leaves the cloud as it was.
pub fn match_twiss(
    store: &mut PhaseSpace6D,
    twiss: &Twiss6D,
    mean_momentum: f64,
) -> Result<(), DistribError> {
    store.validate_shape()?;
    let maps = [
        PlaneMap::from_twiss(Plane::X, &twiss.x)?,
        PlaneMap::from_twiss(Plane::Y, &twiss.y)?,
        PlaneMap::from_twiss(Plane::Z, &twiss.z)?,
    ];
    debug!(
        particles = store.num_particles(),
        mean_momentum, "matching phase space to twiss parameters"
    );

    // rows are overwritten while the untouched values are still needed
    let canonical = store.array().clone();
    let out = store.array_mut();
    for (plane, map) in Plane::ALL.into_iter().zip(&maps) {
        let (iu, iv) = plane.rows();
        for (j, col) in canonical.column_iter().enumerate() {
            let (u, v) = map.apply(col[iu], col[iv]);
            out[(iu, j)] = u;
            out[(iv, j)] = v;
        }
    }

    apply_mean_momentum(store, mean_momentum)
}

/// `pz ← pz·p + p`: scale first, then offset, both by the mean momentum.
pub fn apply_mean_momentum(
    store: &mut PhaseSpace6D,
    mean_momentum: f64,
) -> Result<(), DistribError> {
    store.scale_row(PZ_ROW, mean_momentum)?;
    store.offset_row(PZ_ROW, mean_momentum)?;
    Ok(())
}
