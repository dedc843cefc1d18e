//! Paddle input mapping
//!
//! Hand tracking reports a normalized vertical position per hand. This module
//! turns those samples into paddle-top coordinates.

use serde::{Deserialize, Serialize};

/// Which paddle (and which hand) a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// One tracked hand position for a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleSample {
    pub side: Side,
    /// 0.0 = top of the camera frame, 1.0 = bottom
    pub normalized_y: f32,
}

impl PaddleSample {
    pub fn new(side: Side, normalized_y: f32) -> Self {
        Self { side, normalized_y }
    }
}

/// Map a normalized position to a paddle top, centering the paddle on it.
///
/// Always returns a value in `[0, arena_height - paddle_height]`; tracking
/// noise outside `[0, 1]` is clamped and NaN maps to the top.
pub fn map_sample_to_paddle_top(normalized_y: f32, paddle_height: f32, arena_height: f32) -> f32 {
    let max_top = (arena_height - paddle_height).max(0.0);
    let top = normalized_y * arena_height - paddle_height / 2.0;
    if top.is_nan() {
        return 0.0;
    }
    top.clamp(0.0, max_top)
}

/// Latest target per side for this tick (last sample wins, missing side holds)
pub fn latest_targets(
    samples: &[PaddleSample],
    paddle_height: f32,
    arena_height: f32,
) -> (Option<f32>, Option<f32>) {
    let mut left = None;
    let mut right = None;
    for sample in samples {
        let top = map_sample_to_paddle_top(sample.normalized_y, paddle_height, arena_height);
        match sample.side {
            Side::Left => left = Some(top),
            Side::Right => right = Some(top),
        }
    }
    (left, right)
}
