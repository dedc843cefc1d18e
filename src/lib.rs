//! Hand Pong - single-player two-paddle pong driven by hand tracking
//!
//! Core modules:
//! - `sim`: Deterministic simulation (input mapping, physics, game state)
//! - `highscores`: Best-score record and its persistence
//! - `config`: Tunable arena/paddle/ball parameters
//! - `platform`: Input source boundary (scripted frames, background worker)
//! - `app`: Fixed-rate run loop tying the pieces together

pub mod app;
pub mod config;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use error::GameError;
pub use highscores::{JsonFileStore, MemoryStore, ScoreRecord, ScoreStore};

/// Game configuration defaults
pub mod consts {
    /// Simulation ticks per second; ball velocity is displacement per tick
    pub const FPS: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 20.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    /// Gap between the arena edge and the outer face of each paddle
    pub const PADDLE_MARGIN: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 20.0;
    /// Per-axis speed after a reset
    pub const BALL_RESET_SPEED: f32 = 35.0;
    pub const BALL_MAX_SPEED: f32 = 40.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.2;
    /// Steepest bounce off a paddle edge (60 degrees)
    pub const MAX_BOUNCE_ANGLE: f32 = std::f32::consts::FRAC_PI_3;

    /// Name used when the player submits an empty name
    pub const DEFAULT_PLAYER_NAME: &str = "Player";
    /// Holder of the best score before anyone has played
    pub const DEFAULT_RECORD_NAME: &str = "No one";
    pub const SCORE_FILE: &str = "top_score.json";
}
