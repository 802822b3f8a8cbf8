//! 6×N phase-space store. Row = coordinate, column = particle.

use nalgebra::Matrix6xX;

use crate::core::{
    constants::NUM_COORDS,
    error::{ConfigError, DistribError},
};

/// Rows (x, px, y, py, z, pz); one column per particle.
pub type Array6D = Matrix6xX<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpace6D {
    num_particles: usize,
    array: Array6D,
}

impl PhaseSpace6D {
    /// Zero-filled store for `num_particles` particles.
    pub fn new(num_particles: usize) -> Result<Self, ConfigError> {
        if num_particles == 0 {
            return Err(ConfigError::EmptyPhaseSpace);
        }
        Ok(Self {
            num_particles,
            array: Array6D::zeros(num_particles),
        })
    }

    /// Adopt an existing array; the particle count is fixed to its column count.
    pub fn from_array(array: Array6D) -> Result<Self, ConfigError> {
        if array.ncols() == 0 {
            return Err(ConfigError::EmptyPhaseSpace);
        }
        Ok(Self {
            num_particles: array.ncols(),
            array,
        })
    }

    #[inline]
    #[must_use]
    pub fn num_particles(&self) -> usize {
        self.num_particles
    }

    #[inline]
    #[must_use]
    pub fn array(&self) -> &Array6D {
        &self.array
    }

    /// Replacing the whole matrix through this handle can break the particle
    /// count; [`validate_shape`](Self::validate_shape) catches that.
    #[inline]
    pub fn array_mut(&mut self) -> &mut Array6D {
        &mut self.array
    }

    #[must_use]
    pub fn into_array(self) -> Array6D {
        self.array
    }

    pub fn validate_shape(&self) -> Result<(), DistribError> {
        if self.array.ncols() == self.num_particles {
            Ok(())
        } else {
            Err(DistribError::ShapeMismatch {
                expected: self.num_particles,
                got: self.array.ncols(),
            })
        }
    }

    /// Add `offset` to every entry of coordinate row `index`.
    pub fn offset_row(&mut self, index: usize, offset: f64) -> Result<(), ConfigError> {
        check_row(index)?;
        for v in self.array.row_mut(index).iter_mut() {
            *v += offset;
        }
        Ok(())
    }

    /// Multiply every entry of coordinate row `index` by `factor`.
    pub fn scale_row(&mut self, index: usize, factor: f64) -> Result<(), ConfigError> {
        check_row(index)?;
        for v in self.array.row_mut(index).iter_mut() {
            *v *= factor;
        }
        Ok(())
    }
}

#[inline]
fn check_row(index: usize) -> Result<(), ConfigError> {
    if index < NUM_COORDS {
        Ok(())
    } else {
        Err(ConfigError::RowOutOfRange(index))
    }
}
