//! Plane keys: which conjugate coordinate pair we are looking at.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three 2D phase-space planes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plane {
    X,
    Y,
    Z,
}

impl Plane {
    /// All planes in row order.
    pub const ALL: [Plane; 3] = [Plane::X, Plane::Y, Plane::Z];

    /// Plane number `k` in `0..3`.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Rows `(2k, 2k + 1)` holding the position and momentum of this plane.
    #[inline]
    #[must_use]
    pub const fn rows(self) -> (usize, usize) {
        let k = self.index();
        (2 * k, 2 * k + 1)
    }

    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (index {})", self.name(), self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_coordinate_pairs() {
        assert_eq!(Plane::X.rows(), (0, 1));
        assert_eq!(Plane::Y.rows(), (2, 3));
        assert_eq!(Plane::Z.rows(), (4, 5));
    }

    #[test]
    fn display_names_plane_and_index() {
        assert_eq!(Plane::Y.to_string(), "y (index 1)");
    }
}
