//! Collision detection and response
//!
//! Everything is axis-aligned: the ball is tested through its bounding box
//! against paddles, obstacles and power-ups. Responses only ever flip the
//! velocity component that points into a surface, so a ball that is still
//! overlapping after a bounce is not reflected back in.

use glam::Vec2;

use super::state::{Ball, Paddle, Rect, Side};
use crate::consts::*;

/// Outcome of a paddle hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    pub vel: Vec2,
    pub spin: f32,
    /// Hit offset from paddle center, -1 (top edge) to 1 (bottom edge)
    pub offset: f32,
}

/// True if the ball is travelling toward the given paddle
#[inline]
pub fn approaching(ball: &Ball, side: Side) -> bool {
    ball.vel.x * side.outward() < 0.0
}

/// Ball bounding box overlaps `rect`
#[inline]
pub fn ball_overlaps(ball: &Ball, rect: &Rect) -> bool {
    ball.bounds().intersects(rect)
}

/// Compute the outgoing velocity and spin for a ball striking `paddle`.
///
/// The bounce angle is proportional to where the ball meets the paddle
/// (up to ±75° at the edges), the speed is preserved, and the horizontal
/// component always points back into the field.
pub fn paddle_bounce(ball: &Ball, paddle: &Paddle, side: Side) -> Bounce {
    let half = paddle.height / 2.0;
    let offset = if half > 0.0 {
        ((ball.pos.y - paddle.center_y()) / half).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let angle = offset * MAX_BOUNCE_ANGLE_DEG.to_radians();
    let speed = ball.vel.length();

    let mut vx = speed * angle.cos() * side.outward();
    if vx * side.outward() < 0.0 {
        vx = -vx;
    }

    Bounce {
        vel: Vec2::new(vx, speed * angle.sin()),
        spin: offset * MAX_SPIN * side.outward(),
        offset,
    }
}

/// Reflect off the top or bottom wall. Returns true if a bounce happened.
pub fn wall_bounce(ball: &mut Ball) -> bool {
    if ball.pos.y - ball.radius <= 0.0 && ball.vel.y < 0.0 {
        ball.vel.y = -ball.vel.y;
        true
    } else if ball.pos.y + ball.radius >= FIELD_HEIGHT && ball.vel.y > 0.0 {
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Reflect horizontally off an obstacle. Returns true if a bounce happened.
pub fn obstacle_bounce(ball: &mut Ball, rect: &Rect) -> bool {
    if !ball_overlaps(ball, rect) {
        return false;
    }
    let toward = rect.center().x - ball.pos.x;
    if toward * ball.vel.x > 0.0 {
        ball.vel.x = -ball.vel.x;
        true
    } else {
        false
    }
}
