//! Configuration types for snow crystal growth parameters.

use serde::{Deserialize, Serialize};

/// Smallest lattice that keeps the seeded center cell inside the grid.
pub const MIN_SIZE: usize = 3;

fn default_max_iterations() -> u64 {
    100_000
}

fn default_progress_interval() -> u64 {
    1000
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrystalConfig {
    /// Lattice side length in cells. Must be odd and at least 3.
    pub size: usize,
    /// Physical growth parameters.
    #[serde(default)]
    pub growth: GrowthParams,
    /// Loop control and random source settings.
    #[serde(default)]
    pub run: RunConfig,
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            size: 201,
            growth: GrowthParams::default(),
            run: RunConfig::default(),
        }
    }
}

impl CrystalConfig {
    /// Create a default configuration for the given lattice size.
    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Total number of cells in one buffer.
    #[inline]
    pub fn grid_size(&self) -> usize {
        self.size * self.size
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_size(self.size)?;
        self.growth.validate()?;
        if self.run.max_iterations == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        Ok(())
    }
}

/// Gravner-Griffeath model parameters.
///
/// Typical ranges follow the mesoscopic lattice map paper; `gamma` is
/// "very small" and `sigma` is "tiny" there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthParams {
    /// Initial and ambient vapor density (0.3-0.9).
    pub rho: f32,
    /// Fraction of boundary vapor that freezes straight into crystal (0.001-0.02).
    pub kappa: f32,
    /// Boundary mass needed to attach with 1 or 2 attached neighbors (1.05-3.0).
    pub beta: f32,
    /// Boundary mass needed to attach with 3 attached neighbors (0.02-0.1).
    pub alpha: f32,
    /// Neighborhood diffusive mass ceiling for 3-neighbor attachment (0.01-0.04).
    pub theta: f32,
    /// Boundary mass melting fraction (0.04-0.09).
    pub mu: f32,
    /// Crystal mass melting fraction at boundary cells.
    pub gamma: f32,
    /// Diffusive mass noise amplitude. Zero disables noise.
    pub sigma: f32,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            rho: 0.42,
            kappa: 0.01,
            beta: 1.9,
            alpha: 0.08,
            theta: 0.025,
            mu: 0.06,
            gamma: 0.006,
            sigma: 0.0,
        }
    }
}

impl GrowthParams {
    /// Check every parameter is finite and non-negative, and that the
    /// fractions lie in their unit ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let all = [
            ("rho", self.rho),
            ("kappa", self.kappa),
            ("beta", self.beta),
            ("alpha", self.alpha),
            ("theta", self.theta),
            ("mu", self.mu),
            ("gamma", self.gamma),
            ("sigma", self.sigma),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }
        for (name, value) in [("kappa", self.kappa), ("mu", self.mu), ("gamma", self.gamma)] {
            if value > 1.0 {
                return Err(ConfigError::FractionOutOfRange { name, value });
            }
        }
        // A full negative swing would zero the vapor outright.
        if self.sigma >= 1.0 {
            return Err(ConfigError::FractionOutOfRange {
                name: "sigma",
                value: self.sigma,
            });
        }
        Ok(())
    }

    /// Whether the noise pass runs at all.
    ///
    /// Noise is tied to melting: it only perturbs vapor when crystal
    /// melting is active, and it is a no-op for a zero amplitude.
    #[inline]
    pub fn noise_enabled(&self) -> bool {
        self.gamma > 0.0 && self.sigma > 0.0
    }
}

/// Iteration loop settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Hard cap on iterations before the run is abandoned as non-converged.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    /// Log a progress record every N iterations (0 = never).
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Random seed for the noise pass (None = seed from entropy).
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            progress_interval: default_progress_interval(),
            random_seed: None,
        }
    }
}

/// Check a lattice side length.
pub fn validate_size(size: usize) -> Result<(), ConfigError> {
    if size % 2 == 0 {
        return Err(ConfigError::EvenSize(size));
    }
    if size < MIN_SIZE {
        return Err(ConfigError::SizeTooSmall(size));
    }
    Ok(())
}

/// Parse and validate a lattice side length from a command-line argument.
pub fn parse_size(arg: &str) -> Result<usize, ConfigError> {
    let size: usize = arg
        .trim()
        .parse()
        .map_err(|_| ConfigError::NonNumericSize(arg.to_string()))?;
    validate_size(size)?;
    Ok(size)
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Lattice size must be odd, got {0}")]
    EvenSize(usize),
    #[error("Lattice size must be at least 3, got {0}")]
    SizeTooSmall(usize),
    #[error("Lattice size must be a positive odd integer, got {0:?}")]
    NonNumericSize(String),
    #[error("Parameter {name} must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("Parameter {name} is out of its fractional range, got {value}")]
    FractionOutOfRange { name: &'static str, value: f32 },
    #[error("Iteration cap must be non-zero")]
    ZeroIterationCap,
}
