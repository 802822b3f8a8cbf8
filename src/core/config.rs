//! Run-time configuration object + fluent builder.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::core::{constants::DEFAULT_MAX_RMS_FACTOR, error::ConfigError};

/// Source distribution used to populate the raw phase space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistribType {
    /// Uniform inside the unit 3-ball, positions and momenta drawn separately.
    Uniform,
    /// Per-coordinate truncated normal.
    #[default]
    Gaussian,
    /// Declared, not implemented.
    Waterbag,
    /// Kapchinskij-Vladimirskij. Declared, not implemented.
    Kv,
}

impl DistribType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uniform => "uniform",
            Self::Gaussian => "gaussian",
            Self::Waterbag => "waterbag",
            Self::Kv => "kv",
        }
    }
}

impl fmt::Display for DistribType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistribType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "gaussian" => Ok(Self::Gaussian),
            "waterbag" => Ok(Self::Waterbag),
            "kv" => Ok(Self::Kv),
            _ => Err(ConfigError::UnsupportedDistribution(s.to_owned())),
        }
    }
}

/// Reject anything that is not strictly positive, NaN included.
pub(crate) fn check_max_rms_factor(v: f64) -> Result<f64, ConfigError> {
    if v > 0.0 {
        Ok(v)
    } else {
        Err(ConfigError::InvalidMaxRmsFactor(v))
    }
}

/// Immutable generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistribConfig {
    pub kind: DistribType,
    pub max_rms_factor: f64,
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Cap on draws per rejection loop; `None` loops until enough samples are accepted.
    pub max_attempts: Option<u64>,
}

impl Default for DistribConfig {
    fn default() -> Self {
        Self {
            kind: DistribType::default(),
            max_rms_factor: DEFAULT_MAX_RMS_FACTOR,
            seed: None,
            max_attempts: None,
        }
    }
}

impl DistribConfig {
    #[inline]
    #[must_use]
    pub fn builder() -> DistribConfigBuilder {
        DistribConfigBuilder::new()
    }

    /// Re-check the invariants, e.g. after deserializing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_max_rms_factor(self.max_rms_factor)?;
        if self.max_attempts == Some(0) {
            return Err(ConfigError::ZeroAttemptCap);
        }
        Ok(())
    }
}

/// Fluent builder; validation happens once in `build`.
#[derive(Debug, Default)]
pub struct DistribConfigBuilder {
    kind: Option<DistribType>,
    max_rms_factor: Option<f64>,
    seed: Option<u64>,
    max_attempts: Option<u64>,
}

impl DistribConfigBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn kind(mut self, k: DistribType) -> Self {
        self.kind = Some(k);
        self
    }
    #[inline]
    #[must_use]
    pub fn max_rms_factor(mut self, v: f64) -> Self {
        self.max_rms_factor = Some(v);
        self
    }
    #[inline]
    #[must_use]
    pub fn seed(mut self, s: u64) -> Self {
        self.seed = Some(s);
        self
    }
    #[inline]
    #[must_use]
    pub fn max_attempts(mut self, n: u64) -> Self {
        self.max_attempts = Some(n);
        self
    }

    pub fn build(self) -> Result<DistribConfig, ConfigError> {
        let cfg = DistribConfig {
            kind: self.kind.unwrap_or_default(),
            max_rms_factor: self.max_rms_factor.unwrap_or(DEFAULT_MAX_RMS_FACTOR),
            seed: self.seed,
            max_attempts: self.max_attempts,
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Ergonomic `?` on a builder chain.
impl From<DistribConfigBuilder> for Result<DistribConfig, ConfigError> {
    fn from(b: DistribConfigBuilder) -> Self {
        b.build()
    }
}
