//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or capture dependencies

pub mod input;
pub mod physics;
pub mod state;
pub mod tick;

pub use input::{PaddleSample, Side, latest_targets, map_sample_to_paddle_top};
pub use physics::{advance, paddle_return_speed, reflection_angle};
pub use state::{Ball, GameEvent, GameMode, GameState, Paddle, Rect, Snapshot};
pub use tick::{Command, TickInput, TickOutput, tick};
