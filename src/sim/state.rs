//! Game state and core simulation types
//!
//! A single owned [`GameState`] holds everything the simulation mutates.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::Side;
use crate::config::GameConfig;
use crate::highscores::ScoreRecord;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the player to type a name
    NameEntry,
    /// Active gameplay
    Playing,
    /// Simulation frozen, paddles ignore input
    Paused,
    /// Rally ended; waiting for restart
    GameOver,
}

/// Axis-aligned rectangle, top-left origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict overlap; rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// A player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Left edge (fixed)
    pub x: f32,
    /// Top edge, always within `[0, arena_height - height]`
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle for `side`, vertically centered in the arena
    pub fn new(side: Side, config: &GameConfig) -> Self {
        let x = match side {
            Side::Left => config.left_paddle_x(),
            Side::Right => config.right_paddle_x(),
        };
        Self {
            side,
            x,
            y: config.arena_height / 2.0 - config.paddle_height / 2.0,
            width: config.paddle_width,
            height: config.paddle_height,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move the paddle top, keeping it inside the arena
    pub fn set_top(&mut self, y: f32, arena_height: f32) {
        self.y = y.clamp(0.0, (arena_height - self.height).max(0.0));
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Bounding box used for paddle collisions
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// Recenter with a diagonal velocity; each axis direction is a coin flip
    pub fn reset<R: Rng>(&mut self, center: Vec2, speed: f32, rng: &mut R) {
        let sx = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.pos = center;
        self.vel = Vec2::new(speed * sx, speed * sy);
    }
}

/// Something that happened during a tick, for audio/recording layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom wall
    WallHit,
    /// Ball was returned by a paddle
    PaddleHit { side: Side },
    /// Score went up by one
    ScorePoint,
    /// Ball left the arena
    GameOver,
    /// The session beat the stored best score
    NewTopScore { record: ScoreRecord },
    RecordingToggled,
    ScreenshotRequested,
    QuitRequested,
}

/// Read-only per-tick view for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub score: u32,
    pub top_score: ScoreRecord,
    /// Set when the last game over replaced the top score
    pub new_top_score: bool,
    pub player_name: String,
    /// Text typed so far during name entry
    pub name_buffer: String,
    pub left_paddle: Rect,
    pub right_paddle: Rect,
    pub ball_pos: Vec2,
    pub ball_radius: f32,
    pub time_ticks: u64,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub mode: GameMode,
    /// Paddle returns this rally
    pub score: u32,
    pub player_name: String,
    pub name_buffer: String,
    /// Best score known to the session (mirrors the store)
    pub top_score: ScoreRecord,
    pub new_top_score: bool,
    pub left: Paddle,
    pub right: Paddle,
    pub ball: Ball,
    /// Ticks simulated while playing
    pub time_ticks: u64,
    /// Cleared by a quit command
    pub running: bool,
    rng: Pcg32,
}

impl GameState {
    /// Create a session waiting for name entry, ball served from the center
    pub fn new(config: GameConfig, top_score: ScoreRecord, seed: u64) -> Self {
        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        let ball = Ball::new(Vec2::ZERO, Vec2::ZERO, config.ball_radius);
        let mut state = Self {
            player_name: config.default_player_name.clone(),
            config,
            mode: GameMode::NameEntry,
            score: 0,
            name_buffer: String::new(),
            top_score,
            new_top_score: false,
            left,
            right,
            ball,
            time_ticks: 0,
            running: true,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_ball();
        state
    }

    pub fn arena_center(&self) -> Vec2 {
        Vec2::new(self.config.arena_width / 2.0, self.config.arena_height / 2.0)
    }

    /// Start a fresh rally from the arena center
    pub fn reset_ball(&mut self) {
        let center = self.arena_center();
        self.ball
            .reset(center, self.config.reset_speed, &mut self.rng);
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            score: self.score,
            top_score: self.top_score.clone(),
            new_top_score: self.new_top_score,
            player_name: self.player_name.clone(),
            name_buffer: self.name_buffer.clone(),
            left_paddle: self.left.rect(),
            right_paddle: self.right.rect(),
            ball_pos: self.ball.pos,
            ball_radius: self.ball.radius,
            time_ticks: self.time_ticks,
        }
    }
}
