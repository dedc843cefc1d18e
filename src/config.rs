//! Game configuration
//!
//! Compiled-in defaults from [`crate::consts`], optionally overridden by a
//! JSON file. Every field is optional in the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;

/// Environment variable naming a config file when none is passed on the command line
pub const CONFIG_ENV_VAR: &str = "HAND_PONG_CONFIG";

/// Arena, paddle and ball tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation ticks per second
    pub fps: u32,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub reset_speed: f32,
    pub max_speed: f32,
    pub speed_increment: f32,
    /// Bounce angle (radians) for a hit on the very edge of a paddle
    pub max_bounce_angle: f32,
    /// Apply the left paddle's speed cap to the right paddle too.
    /// Off by default: the right paddle treats `max_speed` as a floor.
    pub cap_right_paddle_speed: bool,

    // === Session ===
    pub default_player_name: String,
    /// Where the best score is persisted
    pub score_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fps: FPS,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_margin: PADDLE_MARGIN,

            ball_radius: BALL_RADIUS,
            reset_speed: BALL_RESET_SPEED,
            max_speed: BALL_MAX_SPEED,
            speed_increment: PADDLE_BOOST,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
            cap_right_paddle_speed: false,

            default_player_name: DEFAULT_PLAYER_NAME.to_string(),
            score_file: PathBuf::from(SCORE_FILE),
        }
    }
}

impl GameConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let display = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|e| GameError::io(&display, e))?;
        let config: Self = serde_json::from_str(&text).map_err(|e| GameError::json(&display, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, falling back to defaults on any failure
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default config");
            return Self::default();
        };
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("reset_speed", self.reset_speed),
            ("max_speed", self.max_speed),
            ("speed_increment", self.speed_increment),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(GameError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.fps == 0 {
            return Err(GameError::InvalidConfig("fps must be positive".into()));
        }
        if self.paddle_height >= self.arena_height {
            return Err(GameError::InvalidConfig(
                "paddle_height must be smaller than arena_height".into(),
            ));
        }
        if self.paddle_margin < 0.0
            || 2.0 * (self.paddle_margin + self.paddle_width) >= self.arena_width
        {
            return Err(GameError::InvalidConfig(
                "paddles do not fit side by side in the arena".into(),
            ));
        }
        if !(0.0..std::f32::consts::FRAC_PI_2).contains(&self.max_bounce_angle) {
            return Err(GameError::InvalidConfig(
                "max_bounce_angle must be in [0, pi/2)".into(),
            ));
        }
        Ok(())
    }

    /// X coordinate of the left paddle's left edge
    pub fn left_paddle_x(&self) -> f32 {
        self.paddle_margin
    }

    /// X coordinate of the right paddle's left edge
    pub fn right_paddle_x(&self) -> f32 {
        self.arena_width - self.paddle_margin - self.paddle_width
    }

    /// Lowest valid paddle top
    pub fn max_paddle_y(&self) -> f32 {
        self.arena_height - self.paddle_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.left_paddle_x(), 50.0);
        assert_eq!(config.right_paddle_x(), 1210.0);
        assert_eq!(config.max_paddle_y(), 600.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"max_speed": 55.0, "cap_right_paddle_speed": true}"#)
            .expect("write config");

        let config = GameConfig::load(&path).expect("load");
        assert_eq!(config.max_speed, 55.0);
        assert!(config.cap_right_paddle_speed);
        assert_eq!(config.arena_width, ARENA_WIDTH);
        assert_eq!(config.default_player_name, "Player");
    }

    #[test]
    fn test_rejects_paddle_taller_than_arena() {
        let config = GameConfig {
            paddle_height: 800.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_zero_fps() {
        let config = GameConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write config");

        assert!(matches!(GameConfig::load(&path), Err(GameError::Json { .. })));
        assert_eq!(GameConfig::load_or_default(Some(path.as_path())), GameConfig::default());
        assert_eq!(GameConfig::load_or_default(None), GameConfig::default());
    }
}
