//! Simulation configuration - world size, run length and initial placement.
//!
//! Loaded from JSON; every field has a default so a partial file is fine.

use std::path::Path;

use haulage_logic::WorldSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::DEFAULT_FARM_RATE;

/// Number of ticks the fixed driver runs
pub const DEFAULT_TICKS: u32 = 100;

/// Settings for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world_size: WorldSize,
    pub ticks: u32,
    /// Accepted for interface symmetry; all rates are per tick
    pub dt: f32,
    pub farms: u32,
    pub farm_rate: u32,
    pub settlements: u32,
    /// Settlements that also get a farm on their own tile, on top of `farms`
    pub home_farms: u32,
    pub min_population: u32,
    pub max_population: u32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_size: WorldSize::Typical,
            ticks: DEFAULT_TICKS,
            dt: 1.0,
            farms: 40,
            farm_rate: DEFAULT_FARM_RATE,
            settlements: 60,
            home_farms: 20,
            min_population: 5,
            max_population: 25,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Return self if valid, otherwise every problem found.
    pub fn validated(self) -> Result<Self, LoadError> {
        let errors = validate_config(&self);
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(LoadError::Invalid(errors))
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tick count must be positive")]
    ZeroTicks,
    #[error("timestep must be positive, got {0}")]
    NonPositiveTimestep(f32),
    #[error("min_population {min} exceeds max_population {max}")]
    PopulationRange { min: u32, max: u32 },
    #[error("{0} entities requested but the board has {1} tiles")]
    TooManyEntities(u64, u64),
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &SimConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.ticks == 0 {
        errors.push(ConfigError::ZeroTicks);
    }
    if config.dt.is_nan() || config.dt <= 0.0 {
        errors.push(ConfigError::NonPositiveTimestep(config.dt));
    }
    if config.min_population > config.max_population {
        errors.push(ConfigError::PopulationRange {
            min: config.min_population,
            max: config.max_population,
        });
    }

    let side = config.world_size.side() as u64;
    let tiles = side * side;
    let placed = config.farms as u64 + config.settlements as u64;
    if placed > tiles {
        errors.push(ConfigError::TooManyEntities(placed, tiles));
    }

    errors
}

/// Failure to obtain a usable configuration.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{}", format_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn format_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimConfig::default();
        assert!(validate_config(&config).is_empty());
        assert_eq!(config.ticks, 100);
        assert_eq!(config.dt, 1.0);
        assert_eq!(config.world_size, WorldSize::Typical);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json(r#"{ "world_size": "small", "farms": 3 }"#).unwrap();
        assert_eq!(config.world_size, WorldSize::Small);
        assert_eq!(config.farms, 3);
        assert_eq!(config.ticks, DEFAULT_TICKS);
        assert_eq!(config.farm_rate, DEFAULT_FARM_RATE);
        assert_eq!(config.home_farms, 20);
    }

    #[test]
    fn test_all_errors_reported() {
        let config = SimConfig {
            ticks: 0,
            dt: -1.0,
            min_population: 10,
            max_population: 2,
            world_size: WorldSize::Small,
            farms: 1000,
            settlements: 100,
            ..Default::default()
        };
        let errors = validate_config(&config);
        assert_eq!(
            errors,
            vec![
                ConfigError::ZeroTicks,
                ConfigError::NonPositiveTimestep(-1.0),
                ConfigError::PopulationRange { min: 10, max: 2 },
                ConfigError::TooManyEntities(1100, 1024),
            ]
        );
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            SimConfig::from_json(r#"{ "ticks": "many" }"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            SimConfig::from_json(r#"{ "ticks": 0 }"#),
            Err(LoadError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            SimConfig::load("/nonexistent/haulage.json"),
            Err(LoadError::Io(_))
        ));
    }
}
