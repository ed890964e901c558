//! Geometry and orbit tuning
//!
//! Loaded from JSON alongside the host's own settings file. Every field has a
//! default, so a partial (or empty) document is valid.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GeomError, Result};

/// Root-finder limits for Kepler's equation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Hard iteration cap (bounds worst-case cost per body per tick)
    pub max_iterations: u32,
    /// Absolute residual below which the solve is accepted
    pub tolerance: f32,
    /// Eccentricity at which the initial guess switches from M to π
    pub high_eccentricity: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: MAX_ITERATIONS,
            tolerance: ERROR_TOLERANCE,
            high_eccentricity: HIGH_ECCENTRICITY,
        }
    }
}

/// Crate settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomSettings {
    // === Orbits ===
    /// Kepler solver limits
    pub solver: SolverSettings,
    /// Host clock conversion (simulated seconds per day)
    pub seconds_per_day: f32,
}

impl Default for GeomSettings {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            seconds_per_day: SECONDS_PER_DAY,
        }
    }
}

impl GeomSettings {
    /// Parse and validate settings from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: GeomSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings: Self = read_json(path)?;
        settings.validate()?;
        log::info!("Loaded geometry settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values that would make the solver or clock meaningless
    pub fn validate(&self) -> Result<()> {
        if self.solver.max_iterations == 0 {
            return Err(GeomError::InvalidSetting(
                "solver.max_iterations must be at least 1".into(),
            ));
        }
        if !(self.solver.tolerance > 0.0) {
            return Err(GeomError::InvalidSetting(format!(
                "solver.tolerance must be positive, got {}",
                self.solver.tolerance
            )));
        }
        if !(self.seconds_per_day > 0.0) {
            return Err(GeomError::InvalidSetting(format!(
                "seconds_per_day must be positive, got {}",
                self.seconds_per_day
            )));
        }
        Ok(())
    }
}

/// Read and deserialize a JSON document, tagging I/O failures with the path
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path).map_err(|source| GeomError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}
