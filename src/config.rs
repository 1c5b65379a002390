//! Game configuration
//!
//! Loaded once at startup from a RON file and passed by reference to the
//! level loader, simulation and renderer. Every field has a default, so a
//! config file only needs the values it changes.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::game::{PhysicsSettingsError, PlayerSettings};

/// Largest accepted tile size (pixels)
pub const MAX_TILE_SIZE: u32 = 1024;

/// Error type for config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write config {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
    #[error("invalid physics settings: {0}")]
    Physics(#[from] PhysicsSettingsError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// FPS limit setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FpsLimit {
    Fps30,
    #[default]
    Fps60,
    /// As fast as possible
    Unlocked,
}

impl FpsLimit {
    /// Target frame time in seconds (None = unlocked)
    pub fn frame_time(&self) -> Option<f64> {
        match self {
            FpsLimit::Fps30 => Some(1.0 / 30.0),
            FpsLimit::Fps60 => Some(1.0 / 60.0),
            FpsLimit::Unlocked => None,
        }
    }
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "tilehop".to_string(),
            width: 600,
            height: 400,
            resizable: true,
        }
    }
}

/// Sprite atlas settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// PNG file holding tile and player sprites
    pub path: PathBuf,
    /// Scale applied to the image on load (atlas cells become tile_size)
    pub scale: f32,
    /// Tile code -> atlas cell (column, row)
    pub tiles: BTreeMap<i32, (u32, u32)>,
    /// Atlas cell of the player sprite
    pub player: (u32, u32),
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/atlas.png"),
            scale: 2.0,
            tiles: BTreeMap::from([(1, (0, 0)), (2, (1, 0)), (3, (2, 0))]),
            player: (3, 0),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    /// Pixel size of one tile, shared by grid math, collision and drawing
    pub tile_size: u32,
    /// CSV tile grid
    pub level: PathBuf,
    /// Abort startup when the level cannot be loaded (default: empty level)
    pub strict_level_load: bool,
    pub fps_limit: FpsLimit,
    /// Longest frame time handed to the simulation (seconds)
    pub max_frame_dt: f32,
    /// Clear color (RGB)
    pub background: (u8, u8, u8),
    pub atlas: AtlasConfig,
    pub player: PlayerSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            tile_size: 32,
            level: PathBuf::from("assets/levels/level1.csv"),
            strict_level_load: false,
            fps_limit: FpsLimit::default(),
            max_frame_dt: 0.1,
            background: (173, 216, 230), // light blue
            atlas: AtlasConfig::default(),
            player: PlayerSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron_string(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_size == 0 || self.tile_size > MAX_TILE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "tile_size must be between 1 and {} (got {})",
                MAX_TILE_SIZE, self.tile_size
            )));
        }
        if self.player.width == 0 || self.player.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "player size must be non-zero (got {}x{})",
                self.player.width, self.player.height
            )));
        }
        if !self.max_frame_dt.is_finite() || self.max_frame_dt <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "max_frame_dt must be positive (got {})",
                self.max_frame_dt
            )));
        }
        if !self.atlas.scale.is_finite() || self.atlas.scale <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "atlas scale must be positive (got {})",
                self.atlas.scale
            )));
        }
        let (sx, sy) = self.player.spawn;
        if !sx.is_finite() || !sy.is_finite() {
            return Err(ConfigError::Invalid("player spawn must be finite".to_string()));
        }
        self.player.physics.validate()?;
        Ok(())
    }
}

/// Load the config file. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<GameConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let config = GameConfig::from_ron_str(&text)?;
            log::info!("Loaded config {}", path.display());
            Ok(config)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Config {} not found, using defaults", path.display());
            Ok(GameConfig::default())
        }
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Write the config as pretty RON, creating parent directories
pub fn write_config(path: &Path, config: &GameConfig) -> Result<(), ConfigError> {
    let text = config.to_ron_string()?;
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)?;
    log::info!("Wrote config {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::physics::{FrictionDecay, PhysicsSettings};
    use tempfile::TempDir;

    #[test]
    fn test_empty_config_is_default() {
        let config = GameConfig::from_ron_str("()").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = GameConfig::from_ron_str(
            "(tile_size: 16, player: (run_speed: 200.0, physics: (gravity: 3000.0)))",
        )
        .unwrap();

        assert_eq!(config.tile_size, 16);
        assert_eq!(config.player.run_speed, 200.0);
        assert_eq!(config.player.physics.gravity, 3000.0);
        assert_eq!(config.player.physics.friction_divisor, 1.2);
        assert_eq!(config.player.jump_speed, PlayerSettings::default().jump_speed);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_round_trip() {
        let mut config = GameConfig::default();
        config.fps_limit = FpsLimit::Unlocked;
        config.player.physics.friction_decay = FrictionDecay::Scaled { reference_dt: 0.02 };
        config.atlas.tiles.insert(9, (4, 2));

        let text = config.to_ron_string().unwrap();
        assert_eq!(GameConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_friction() {
        let err = GameConfig::from_ron_str("(player: (physics: (friction_divisor: 0.0)))")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Physics(PhysicsSettingsError::FrictionDivisor(_))));
    }

    #[test]
    fn test_rejects_zero_tile_size() {
        let err = GameConfig::from_ron_str("(tile_size: 0)").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_ron() {
        let err = GameConfig::from_ron_str("(tile_size: \"big\")").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("config.ron")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ron");
        std::fs::write(&path, "(level: \"levels/other.csv\", strict_level_load: true)").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.level, PathBuf::from("levels/other.csv"));
        assert!(config.strict_level_load);
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.ron");
        let mut config = GameConfig::default();
        config.tile_size = 16;

        write_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let err = write_config(&blocker.join("config.ron"), &GameConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
    }

    #[test]
    fn test_shipped_config_parses() {
        let config = GameConfig::from_ron_str(include_str!("../assets/config.ron")).unwrap();
        assert_eq!(config.tile_size, 32);
        assert_eq!(config.player.physics, PhysicsSettings::default());
    }

    #[test]
    fn test_frame_time() {
        assert_eq!(FpsLimit::Fps60.frame_time(), Some(1.0 / 60.0));
        assert_eq!(FpsLimit::Unlocked.frame_time(), None);
    }
}
