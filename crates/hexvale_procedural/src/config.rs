//! # Generation Config
//!
//! Board size, scales and placement tuning, loadable from TOML.
//!
//! ```toml
//! seed = "harbor"
//! board_radius = 40
//! max_height = 20
//!
//! [mountains]
//! count = 4
//!
//! [settlements]
//! min_count = 2
//! max_count = 5
//! ```
//!
//! Every key is optional; missing keys take the defaults below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GenResult, TerrainError};

/// Tallest board a config may ask for.
pub const MAX_HEIGHT_LIMIT: u32 = 4096;

/// Mountain stamping parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountainConfig {
    /// Mountains to stamp.
    pub count: u32,
    /// Center draws allowed per requested mountain.
    pub attempts_per_mountain: u32,
}

impl Default for MountainConfig {
    fn default() -> Self {
        Self {
            count: 3,
            attempts_per_mountain: 5,
        }
    }
}

/// Settlement placement parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    /// Lower bound of the target count.
    pub min_count: u32,
    /// Upper bound of the target count (inclusive).
    pub max_count: u32,
    /// Candidate draws before giving up.
    pub max_attempts: u32,
    /// Minimum spacing between settlements, as a fraction of the board radius.
    pub spacing_fraction: f64,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            min_count: 3,
            max_count: 6,
            max_attempts: 500,
            spacing_fraction: 0.2,
        }
    }
}

/// Full input tuple for one board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Seed phrase; every random stream and noise field derives from it.
    pub seed: String,
    /// Hexagon radius in tiles.
    pub board_radius: u32,
    /// World-space radius of one hex tile.
    pub tile_radius: f64,
    /// World-space height of one layer.
    pub height_scale: f64,
    /// Highest layer.
    pub max_height: u32,
    /// Base frequency of the terrain noise.
    pub noise_scale: f64,
    /// Mountain stamping.
    pub mountains: MountainConfig,
    /// Settlement placement.
    pub settlements: SettlementConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: "default".to_owned(),
            board_radius: 40,
            tile_radius: 0.85,
            height_scale: 0.5,
            max_height: 20,
            noise_scale: 0.08,
            mountains: MountainConfig::default(),
            settlements: SettlementConfig::default(),
        }
    }
}

impl TerrainConfig {
    /// Default config with a different seed.
    #[must_use]
    pub fn with_seed(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            ..Self::default()
        }
    }

    /// Parses a config from TOML text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ParseConfig`] for malformed TOML and
    /// [`TerrainError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(text: &str) -> GenResult<Self> {
        let config: Self = toml::from_str(text).map_err(|err| TerrainError::ParseConfig {
            path: "<inline>".to_owned(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config from a TOML file and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ReadConfig`] if the file cannot be read,
    /// otherwise as [`TerrainConfig::from_toml_str`].
    pub fn from_file(path: &Path) -> GenResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| TerrainError::ReadConfig {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|err| TerrainError::ParseConfig {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] if a value cannot be represented.
    pub fn to_toml_string(&self) -> GenResult<String> {
        toml::to_string(self).map_err(|err| TerrainError::InvalidConfig(err.to_string()))
    }

    /// Checks every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidConfig`] naming the first bad value.
    pub fn validate(&self) -> GenResult<()> {
        if self.board_radius == 0 {
            return Err(invalid("board_radius must be at least 1"));
        }
        if self.board_radius > 4096 {
            return Err(invalid("board_radius must be at most 4096"));
        }
        if self.max_height == 0 {
            return Err(invalid("max_height must be at least 1"));
        }
        if self.max_height > MAX_HEIGHT_LIMIT {
            return Err(TerrainError::InvalidConfig(format!(
                "max_height must be at most {MAX_HEIGHT_LIMIT}, got {}",
                self.max_height
            )));
        }
        for (name, value) in [
            ("tile_radius", self.tile_radius),
            ("height_scale", self.height_scale),
            ("noise_scale", self.noise_scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TerrainError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        let s = &self.settlements;
        if s.min_count > s.max_count {
            return Err(TerrainError::InvalidConfig(format!(
                "settlements.min_count ({}) exceeds max_count ({})",
                s.min_count, s.max_count
            )));
        }
        if !(0.0..=1.0).contains(&s.spacing_fraction) {
            return Err(invalid("settlements.spacing_fraction must be within [0, 1]"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> TerrainError {
    TerrainError::InvalidConfig(message.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TerrainConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = TerrainConfig::from_toml_str(
            r#"
            seed = "harbor"
            board_radius = 12

            [settlements]
            max_count = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, "harbor");
        assert_eq!(config.board_radius, 12);
        assert_eq!(config.max_height, 20);
        assert_eq!(config.settlements.max_count, 4);
        assert_eq!(config.settlements.min_count, 3);
        assert_eq!(config.mountains, MountainConfig::default());
    }

    #[test]
    fn test_rejects_zero_radius() {
        let err = TerrainConfig::from_toml_str("board_radius = 0").unwrap_err();
        assert!(matches!(err, TerrainError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_inverted_settlement_band() {
        let mut config = TerrainConfig::default();
        config.settlements.min_count = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_huge_max_height() {
        let config = TerrainConfig {
            max_height: u32::MAX,
            ..TerrainConfig::default()
        };
        assert!(matches!(config.validate(), Err(TerrainError::InvalidConfig(_))));

        let config = TerrainConfig {
            max_height: MAX_HEIGHT_LIMIT,
            ..TerrainConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_scale() {
        let mut config = TerrainConfig::default();
        config.noise_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let err = TerrainConfig::from_toml_str("board_radius = [").unwrap_err();
        assert!(matches!(err, TerrainError::ParseConfig { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = TerrainConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, TerrainError::ReadConfig { .. }));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = TerrainConfig::with_seed("loop");
        let text = config.to_toml_string().unwrap();
        assert_eq!(TerrainConfig::from_toml_str(&text).unwrap(), config);
    }
}
