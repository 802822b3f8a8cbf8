//! Courant-Snyder (Twiss) descriptors for one plane and for all three.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::core::{error::ConfigError, plane::Plane};

/// (alpha, beta, emittance) of one 2D phase-space ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Twiss2D {
    alpha: f64,
    beta: f64,
    emittance: f64,
}

impl Twiss2D {
    /// Validated descriptor: `beta > 0`, `emittance > 0`.
    pub fn new(alpha: f64, beta: f64, emittance: f64) -> Result<Self, ConfigError> {
        let t = Self::new_unchecked(alpha, beta, emittance);
        t.validate()?;
        Ok(t)
    }

    /// No checks. Consumers computing with a malformed descriptor get a
    /// computation error instead.
    #[must_use]
    pub const fn new_unchecked(alpha: f64, beta: f64, emittance: f64) -> Self {
        Self {
            alpha,
            beta,
            emittance,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails too
        if !(self.beta > 0.0) {
            return Err(ConfigError::InvalidTwiss {
                field: "beta",
                value: self.beta,
            });
        }
        if !(self.emittance > 0.0) {
            return Err(ConfigError::InvalidTwiss {
                field: "emittance",
                value: self.emittance,
            });
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> f64 {
        self.alpha
    }
    #[inline]
    #[must_use]
    pub const fn beta(&self) -> f64 {
        self.beta
    }
    #[inline]
    #[must_use]
    pub const fn emittance(&self) -> f64 {
        self.emittance
    }

    /// `(1 + alpha²) / beta`
    #[inline]
    #[must_use]
    pub fn gamma(&self) -> f64 {
        (1.0 + self.alpha * self.alpha) / self.beta
    }
}

/// One descriptor per plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Twiss6D {
    pub x: Twiss2D,
    pub y: Twiss2D,
    pub z: Twiss2D,
}

impl Twiss6D {
    #[must_use]
    pub const fn new(x: Twiss2D, y: Twiss2D, z: Twiss2D) -> Self {
        Self { x, y, z }
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, plane: Plane) -> &Twiss2D {
        match plane {
            Plane::X => &self.x,
            Plane::Y => &self.y,
            Plane::Z => &self.z,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plane, &Twiss2D)> {
        Plane::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}

impl Index<Plane> for Twiss6D {
    type Output = Twiss2D;

    fn index(&self, plane: Plane) -> &Twiss2D {
        self.get(plane)
    }
}
