use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;

/// Largest board side accepted; keeps `x + width * y` and every coordinate
/// within `i32`
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Time between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Points awarded per item eaten
    pub points_per_item: u32,
    /// Ring the terminal bell when an item is eaten
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 16,
            grid_height: 16,
            tick_interval_ms: 250,
            points_per_item: 10,
            sound: true,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(8, 8)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject settings that cannot host a game: the starting snake needs two
    /// cells side by side and the item needs a third.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.grid_width < 2 {
            return Err(GameError::InvalidConfig(format!(
                "grid width must be at least 2, got {}",
                self.grid_width
            )));
        }
        if self.grid_height == 0 {
            return Err(GameError::InvalidConfig(
                "grid height must be positive".to_string(),
            ));
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(GameError::InvalidConfig(format!(
                "a {}x{} board exceeds the {} cell side limit",
                self.grid_width, self.grid_height, MAX_GRID_SIDE
            )));
        }
        let cells = self.grid_width.checked_mul(self.grid_height);
        if !matches!(cells, Some(cells) if cells >= 3) {
            return Err(GameError::InvalidConfig(format!(
                "a {}x{} board has no room for an item",
                self.grid_width, self.grid_height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(GameError::InvalidConfig(
                "tick interval must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Read a JSON config file without validating it, so callers can layer
    /// overrides on top first. Missing fields take defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        serde_json::from_str(&json).context("Failed to deserialize config")
    }

    /// Read and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 16);
        assert_eq!(config.grid_height, 16);
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.points_per_item, 10);
    }

    #[test]
    fn test_validate_rejects_unplayable_boards() {
        assert!(GameConfig::new(1, 10).validate().is_err());
        assert!(GameConfig::new(10, 0).validate().is_err());
        assert!(GameConfig::new(2, 1).validate().is_err());
        assert!(GameConfig::new(3, 1).validate().is_ok());

        let config = GameConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_boards() {
        // product would overflow usize
        let huge = GameConfig::new(usize::MAX / 2 + 1, 2);
        assert!(matches!(huge.validate(), Err(GameError::InvalidConfig(_))));

        // would truncate to a 4-wide board as i32
        let wraps = GameConfig::new((1usize << 32) + 4, 1);
        assert!(matches!(wraps.validate(), Err(GameError::InvalidConfig(_))));

        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());
        assert!(GameConfig::new(MAX_GRID_SIDE + 1, 4).validate().is_err());
        assert!(GameConfig::new(4, MAX_GRID_SIDE + 1).validate().is_err());
    }

    #[test]
    fn test_from_file_skips_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 1 }"#).unwrap();

        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.grid_width, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 20, "points_per_item": 100 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 16);
        assert_eq!(config.points_per_item, 100);
        assert!(config.sound);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 1 }"#).unwrap();
        assert!(GameConfig::load(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(GameConfig::load(&path).is_err());

        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
