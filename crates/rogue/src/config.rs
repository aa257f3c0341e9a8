//! # Engine Configuration
//!
//! One TOML document read at startup. Every field has a default, so an empty
//! file is a valid config:
//!
//! ```toml
//! width = 1024
//! height = 768
//! render_scale = 1
//! atlas = "assets/atlas.toml"
//! seed = 42                    # omit for a time-derived seed
//! update_rate = 60
//! update_multiplicity = 1
//! max_frames = 600             # omit to run until quit
//!
//! [clear_color]
//! r = 0
//! g = 0
//! b = 0
//! a = 255
//!
//! [world]
//! width = 256
//! height = 256
//!
//! [dungeon]
//! room_count = 30
//! room_clipping = "unchecked"
//! ```

use std::path::{Path, PathBuf};

use rogue_core::{GridDims, SchedulerConfig, MAX_HEIGHT, MAX_WIDTH};
use rogue_procedural::DungeonConfig;
use rogue_rendering::Rgba;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// Size of the tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: MAX_WIDTH,
            height: MAX_HEIGHT,
        }
    }
}

impl WorldConfig {
    /// Validated grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Grid`] if either side is zero.
    pub fn dims(&self) -> ConfigResult<GridDims> {
        Ok(GridDims::new(self.width, self.height)?)
    }
}

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Window width in pixels.
    pub width: u32,
    /// Window height in pixels.
    pub height: u32,
    /// Integer pixel scale.
    pub render_scale: u32,
    /// Atlas descriptor path.
    pub atlas: PathBuf,
    /// Background colour.
    pub clear_color: Rgba,
    /// Dungeon seed. `None` means derive one from the clock at startup.
    pub seed: Option<u64>,
    /// Simulation ticks per second.
    pub update_rate: u32,
    /// Ticks per scheduler batch.
    pub update_multiplicity: u32,
    /// Quit after this many frames.
    pub max_frames: Option<u64>,
    /// Grid size.
    pub world: WorldConfig,
    /// Generator knobs.
    pub dungeon: DungeonConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            render_scale: 1,
            atlas: PathBuf::from("assets/atlas.toml"),
            clear_color: Rgba::BLACK,
            seed: None,
            update_rate: 60,
            update_multiplicity: 1,
            max_frames: None,
            world: WorldConfig::default(),
            dungeon: DungeonConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Reads, parses and validates a config file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file is unreadable, otherwise as
    /// [`EngineConfig::parse`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses and validates an in-memory document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML, any other variant from
    /// [`EngineConfig::validate`].
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, origin: &Path) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot start with.
    ///
    /// Runs before any resource is acquired.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "width/height",
                reason: "window must be at least 1x1",
            });
        }
        if self.render_scale == 0 {
            return Err(ConfigError::Invalid {
                field: "render_scale",
                reason: "must be at least 1",
            });
        }
        if self.max_frames == Some(0) {
            return Err(ConfigError::Invalid {
                field: "max_frames",
                reason: "must be at least 1 when set",
            });
        }
        self.scheduler()?;
        self.world.dims()?;
        self.dungeon.validate()?;
        Ok(())
    }

    /// Validated scheduler settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Timing`] for an unsupported rate or multiplicity.
    pub fn scheduler(&self) -> ConfigResult<SchedulerConfig> {
        Ok(SchedulerConfig::new(
            self.update_rate,
            self.update_multiplicity,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rogue_core::TimingError;
    use rogue_procedural::RoomClipping;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_full_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            width = 640
            height = 480
            render_scale = 2
            atlas = "tiles/atlas.toml"
            seed = 7
            update_rate = 30
            update_multiplicity = 2
            max_frames = 10

            [clear_color]
            r = 10
            g = 20
            b = 30
            a = 255

            [world]
            width = 64
            height = 32

            [dungeon]
            room_count = 5
            room_clipping = "clipped"
            "#,
        )
        .unwrap();

        assert_eq!(config.render_scale, 2);
        assert_eq!(config.atlas, PathBuf::from("tiles/atlas.toml"));
        assert_eq!(config.clear_color, Rgba::new(10, 20, 30, 255));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_frames, Some(10));
        assert_eq!(config.world.dims().unwrap(), GridDims::new(64, 32).unwrap());
        assert_eq!(config.dungeon.room_count, 5);
        assert_eq!(config.dungeon.room_clipping, RoomClipping::Clipped);
        // Untouched generator knobs keep their defaults.
        assert_eq!(config.dungeon.sprite_range, 140);
        assert_eq!(config.scheduler().unwrap().multiplicity(), 2);
    }

    #[test]
    fn test_zero_values_rejected() {
        for doc in [
            "width = 0",
            "render_scale = 0",
            "max_frames = 0",
            "update_rate = 0",
            "update_multiplicity = 0",
            "[world]\nwidth = 0",
            "[dungeon]\nsprite_range = 0",
        ] {
            assert!(EngineConfig::from_toml_str(doc).is_err(), "accepted `{doc}`");
        }
    }

    #[test]
    fn test_error_variants() {
        assert!(matches!(
            EngineConfig::from_toml_str("render_scale = 0"),
            Err(ConfigError::Invalid { field: "render_scale", .. })
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("update_rate = 0"),
            Err(ConfigError::Timing(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[world]\nheight = 0"),
            Err(ConfigError::Grid(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("[dungeon]\nanchor_range = 0"),
            Err(ConfigError::Dungeon(_))
        ));
    }

    #[test]
    fn test_oversized_multiplicity_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("update_multiplicity = 8"),
            Err(ConfigError::Timing(TimingError::MultiplicityTooLarge(8)))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("update_multiplicity = 12"),
            Err(ConfigError::Timing(TimingError::MultiplicityTooLarge(12)))
        ));
        assert!(EngineConfig::from_toml_str("update_multiplicity = 7").is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("fullscreen = true"),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::load(Path::new("/no/such/engine.toml")),
            Err(ConfigError::Io { .. })
        ));
    }
}
