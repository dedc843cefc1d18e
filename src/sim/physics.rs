//! Ball movement, wall and paddle collisions
//!
//! Velocities are displacements per tick at the configured fixed rate, so
//! `advance` takes no timestep. Paddles are read-only here.

use super::input::Side;
use super::state::{Ball, GameEvent, Paddle};
use crate::config::GameConfig;

/// Bounce angle for a ball hitting `paddle` at height `ball_y`.
///
/// Center hit is 0, the top edge gives `+max_angle` (upward), the bottom edge
/// `-max_angle`. Hits beyond the edges (the ball box still overlapping)
/// extrapolate past the cone.
pub fn reflection_angle(paddle: &Paddle, ball_y: f32, max_angle: f32) -> f32 {
    let half = paddle.height / 2.0;
    let relative = paddle.center_y() - ball_y;
    relative / half * max_angle
}

/// New horizontal speed after a paddle return
pub fn paddle_return_speed(side: Side, vx: f32, config: &GameConfig) -> f32 {
    let boosted = vx.abs() * config.speed_increment;
    match side {
        Side::Left => boosted.min(config.max_speed),
        Side::Right if config.cap_right_paddle_speed => boosted.min(config.max_speed),
        // The right paddle never returns slower than max_speed
        Side::Right => boosted.max(config.max_speed),
    }
}

/// Reflect the ball off `paddle` and push it clear of the paddle face
fn bounce_off_paddle(ball: &mut Ball, paddle: &Paddle, config: &GameConfig) {
    let angle = reflection_angle(paddle, ball.pos.y, config.max_bounce_angle);
    let speed = paddle_return_speed(paddle.side, ball.vel.x, config);
    match paddle.side {
        Side::Left => {
            ball.vel.x = speed;
            ball.pos.x = paddle.x + paddle.width + ball.radius;
        }
        Side::Right => {
            ball.vel.x = -speed;
            ball.pos.x = paddle.x - ball.radius;
        }
    }
    ball.vel.y = -speed * angle.tan();
}

/// Advance the ball one tick and report what it hit
pub fn advance(ball: &mut Ball, left: &Paddle, right: &Paddle, config: &GameConfig) -> Vec<GameEvent> {
    let mut events = Vec::new();

    ball.pos += ball.vel;

    // Walls: flip only, no position correction
    if ball.pos.y - ball.radius <= 0.0 || ball.pos.y + ball.radius >= config.arena_height {
        ball.vel.y = -ball.vel.y;
        events.push(GameEvent::WallHit);
    }

    // At most one paddle per tick, left first
    let bounds = ball.bounds();
    let hit = if bounds.overlaps(&left.rect()) {
        Some(left)
    } else if bounds.overlaps(&right.rect()) {
        Some(right)
    } else {
        None
    };
    if let Some(paddle) = hit {
        bounce_off_paddle(ball, paddle, config);
        events.push(GameEvent::PaddleHit { side: paddle.side });
        events.push(GameEvent::ScorePoint);
    }

    if ball.pos.x < 0.0 || ball.pos.x > config.arena_width {
        events.push(GameEvent::GameOver);
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_3;

    fn setup() -> (GameConfig, Paddle, Paddle) {
        let config = GameConfig::default();
        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        (config, left, right)
    }

    fn ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball::new(Vec2::new(x, y), Vec2::new(vx, vy), 20.0)
    }

    #[test]
    fn test_free_flight() {
        let (config, left, right) = setup();
        let mut b = ball(640.0, 360.0, 35.0, -35.0);
        let events = advance(&mut b, &left, &right, &config);
        assert!(events.is_empty());
        assert_eq!(b.pos, Vec2::new(675.0, 325.0));
        assert_eq!(b.vel, Vec2::new(35.0, -35.0));
    }

    #[test]
    fn test_top_wall_flips_vy_only() {
        let (config, left, right) = setup();
        let mut b = ball(640.0, 40.0, 35.0, -35.0);
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(events, vec![GameEvent::WallHit]);
        assert_eq!(b.vel, Vec2::new(35.0, 35.0));
        // Not pushed back inside
        assert_eq!(b.pos.y, 5.0);
    }

    #[test]
    fn test_bottom_wall() {
        let (config, left, right) = setup();
        let mut b = ball(640.0, 680.0, -35.0, 35.0);
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(events, vec![GameEvent::WallHit]);
        assert_eq!(b.vel, Vec2::new(-35.0, -35.0));
    }

    #[test]
    fn test_left_center_hit() {
        let (config, left, right) = setup();
        // Lands at x=85, y=360: overlaps the paddle at its center
        let mut b = ball(120.0, 360.0, -35.0, 0.0);
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(
            events,
            vec![GameEvent::PaddleHit { side: Side::Left }, GameEvent::ScorePoint]
        );
        assert_eq!(b.vel.x, 40.0);
        assert_eq!(b.vel.y, 0.0);
        assert_eq!(b.pos.x, 90.0);
    }

    #[test]
    fn test_left_hit_below_cap_keeps_boost() {
        let (config, left, right) = setup();
        let mut b = ball(110.0, 360.0, -25.0, 0.0);
        advance(&mut b, &left, &right, &config);
        assert!((b.vel.x - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_left_top_edge_hit_deflects_up() {
        let (config, left, right) = setup();
        assert!((reflection_angle(&left, left.y, config.max_bounce_angle) - FRAC_PI_3).abs() < 1e-6);
        assert!(
            (reflection_angle(&left, left.y + left.height, config.max_bounce_angle) + FRAC_PI_3)
                .abs()
                < 1e-6
        );

        let mut b = ball(120.0, 300.0, -35.0, 0.0);
        advance(&mut b, &left, &right, &config);
        let expected_vy = -40.0 * FRAC_PI_3.tan();
        assert!((b.vel.y - expected_vy).abs() < 1e-3);
        assert!(b.vel.y < 0.0);
    }

    #[test]
    fn test_right_hit_floors_speed() {
        let (config, left, right) = setup();
        // Slow ball still comes back at max_speed
        let mut b = ball(1175.0, 360.0, 20.0, 0.0);
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(
            events,
            vec![GameEvent::PaddleHit { side: Side::Right }, GameEvent::ScorePoint]
        );
        assert_eq!(b.vel.x, -40.0);
        assert_eq!(b.pos.x, 1190.0);

        // Fast ball keeps accelerating past it
        let mut b = ball(1155.0, 360.0, 40.0, 0.0);
        advance(&mut b, &left, &right, &config);
        assert!((b.vel.x + 48.0).abs() < 1e-4);
    }

    #[test]
    fn test_right_cap_option() {
        let (mut config, left, right) = setup();
        config.cap_right_paddle_speed = true;
        let mut b = ball(1155.0, 360.0, 40.0, 0.0);
        advance(&mut b, &left, &right, &config);
        assert_eq!(b.vel.x, -40.0);
    }

    #[test]
    fn test_left_wins_when_both_overlap() {
        let mut config = GameConfig::default();
        config.arena_width = 140.0;
        config.paddle_margin = 30.0;
        let left = Paddle::new(Side::Left, &config);
        let right = Paddle::new(Side::Right, &config);
        // Box [45, 105] spans both paddles ([30, 50] and [90, 110])
        let mut b = ball(75.0, 360.0, 0.0, 0.0);
        b.radius = 30.0;
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(events[0], GameEvent::PaddleHit { side: Side::Left });
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_exit_left_is_game_over() {
        let (config, mut left, right) = setup();
        left.y = 0.0;
        let mut b = ball(30.0, 360.0, -35.0, 0.0);
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert_eq!(b.pos.x, -5.0);
    }

    #[test]
    fn test_exit_right_is_game_over() {
        let (config, left, mut right) = setup();
        right.y = 600.0;
        let mut b = ball(1270.0, 200.0, 35.0, 0.0);
        let events = advance(&mut b, &left, &right, &config);
        assert_eq!(events, vec![GameEvent::GameOver]);
    }

    #[test]
    fn test_touching_paddle_edge_is_not_a_hit() {
        let (config, left, right) = setup();
        // Ball box left edge lands exactly on the paddle's right edge (70)
        let mut b = ball(125.0, 360.0, -35.0, 0.0);
        let events = advance(&mut b, &left, &right, &config);
        assert!(events.is_empty());
        assert_eq!(b.pos.x, 90.0);
        assert_eq!(b.vel.x, -35.0);
    }
}
