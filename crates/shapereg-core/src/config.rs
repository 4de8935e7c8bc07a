//! Regularization thresholds and solver limits
//!
//! The classification heuristics are driven by empirical constants: the
//! line residual bound, the circle coefficient-of-variation bound, and the
//! hull vertex count separating rectangles from polygons. They are exposed
//! here as overridable settings rather than literals, together with the
//! sampling densities and the iteration caps of the two iterative solvers.
//!
//! Configuration files may be JSON or TOML. Missing keys take defaults.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Residual sum of squares below which a curve is a straight line.
/// Expressed in the input's native coordinate units.
pub const DEFAULT_LINE_RESIDUAL_THRESHOLD: f64 = 1e-4;

/// Radius coefficient of variation below which a curve is a circle.
pub const DEFAULT_CIRCLE_CV_THRESHOLD: f64 = 0.1;

/// Hull vertex count of the rectangle case. Larger hulls are polygons.
pub const DEFAULT_RECTANGLE_HULL_VERTICES: usize = 4;

/// Smoothing factor of the fallback spline.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.5;

/// Point count of regenerated circles and resampled splines.
pub const DEFAULT_SAMPLE_COUNT: usize = 100;

/// Tunable settings for the classifier and its solvers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegularizationConfig {
    /// Line test residual bound
    pub line_residual_threshold: f64,
    /// Circle test coefficient-of-variation bound
    pub circle_cv_threshold: f64,
    /// Hull size accepted as a rectangle
    pub rectangle_hull_vertices: usize,
    /// Points emitted for a regularized circle
    pub circle_samples: usize,
    /// Iteration cap of the circle refinement
    pub circle_max_iterations: usize,
    /// Relative step size at which the circle refinement stops
    pub circle_tolerance: f64,
    /// Target squared residual of the fallback spline
    pub smoothing_factor: f64,
    /// Points the fallback spline is resampled to
    pub smoothing_samples: usize,
    /// Iteration cap of the spline penalty search
    pub smoothing_max_iterations: usize,
}

impl Default for RegularizationConfig {
    fn default() -> Self {
        Self {
            line_residual_threshold: DEFAULT_LINE_RESIDUAL_THRESHOLD,
            circle_cv_threshold: DEFAULT_CIRCLE_CV_THRESHOLD,
            rectangle_hull_vertices: DEFAULT_RECTANGLE_HULL_VERTICES,
            circle_samples: DEFAULT_SAMPLE_COUNT,
            circle_max_iterations: 100,
            circle_tolerance: 1e-12,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            smoothing_samples: DEFAULT_SAMPLE_COUNT,
            smoothing_max_iterations: 100,
        }
    }
}

impl RegularizationConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match extension(path) {
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            Some("toml") => {
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?
            }
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        config.validate()?;
        tracing::debug!("Loaded regularization config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            other => {
                return Err(
                    ConfigError::UnsupportedFormat(other.unwrap_or_default().to_string()).into(),
                )
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        positive("line_residual_threshold", self.line_residual_threshold)?;
        positive("circle_cv_threshold", self.circle_cv_threshold)?;
        positive("smoothing_factor", self.smoothing_factor)?;
        positive("circle_tolerance", self.circle_tolerance)?;

        if self.rectangle_hull_vertices < 3 {
            return Err(ConfigError::InvalidValue {
                key: "rectangle_hull_vertices",
                reason: format!("must be >= 3, got {}", self.rectangle_hull_vertices),
            });
        }

        at_least("circle_samples", self.circle_samples, 2)?;
        at_least("smoothing_samples", self.smoothing_samples, 2)?;
        at_least("circle_max_iterations", self.circle_max_iterations, 1)?;
        at_least("smoothing_max_iterations", self.smoothing_max_iterations, 1)?;

        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

fn positive(key: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("must be a positive number, got {}", value),
        })
    }
}

fn at_least(key: &'static str, value: usize, min: usize) -> std::result::Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            reason: format!("must be >= {}, got {}", min, value),
        })
    }
}
