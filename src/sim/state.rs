//! Entity and snapshot types
//!
//! Everything the simulation owns for one game lives here, plus the
//! `GameState` snapshot that replay and network transfer copy by value.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::settings::Rgb;

/// Which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Horizontal sign pointing from this paddle into the field
    pub fn outward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Overlap test; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A player paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Fixed horizontal position (left edge)
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Vertical speed (px/s)
    pub speed: f32,
}

impl Paddle {
    /// Paddle at its side's home position, vertically centered
    pub fn new(side: Side) -> Self {
        let x = match side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => FIELD_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH,
        };
        Self {
            x,
            y: (FIELD_HEIGHT - PADDLE_HEIGHT) / 2.0,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Move vertically, staying inside the playfield
    pub fn move_by(&mut self, dy: f32) {
        self.set_y(self.y + dy);
    }

    /// Place the paddle center at `y` (pointer control)
    pub fn set_center_y(&mut self, y: f32) {
        self.set_y(y - self.height / 2.0);
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y.clamp(0.0, (FIELD_HEIGHT - self.height).max(0.0));
    }

    /// Change height by `delta`, kept within [PADDLE_MIN_HEIGHT, FIELD_HEIGHT]
    pub fn resize(&mut self, delta: f32) {
        self.height = (self.height + delta).clamp(PADDLE_MIN_HEIGHT, FIELD_HEIGHT);
        self.set_y(self.y);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Scalar speed used for serves and power-up relaunches
    pub speed: f32,
    /// Vertical bias applied to velocity each tick
    pub spin: f32,
}

impl Ball {
    /// Ball at field center with a random launch direction
    pub fn new<R: Rng + ?Sized>(speed: f32, rng: &mut R) -> Self {
        let mut ball = Self {
            pos: field_center(),
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            speed,
            spin: 0.0,
        };
        ball.relaunch(rng);
        ball
    }

    /// Advance one tick. Spin and friction decay per tick, not per second.
    pub fn integrate(&mut self, dt: f32) {
        self.vel.y += self.spin * dt;
        self.pos += self.vel * dt;
        self.spin *= SPIN_DECAY;
        self.speed *= SPEED_FRICTION;
    }

    /// Bounding box used for all overlap tests
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// New direction within ±45° of horizontal, toward a random side
    pub fn relaunch<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let max = MAX_SERVE_ANGLE_DEG.to_radians();
        let angle = rng.random_range(-max..=max);
        let dir = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.vel = Vec2::new(dir * self.speed * angle.cos(), self.speed * angle.sin());
    }

    /// Back to center after a point, a little faster than before
    pub fn serve<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = field_center();
        self.speed *= SERVE_SPEED_BONUS;
        self.relaunch(rng);
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Last hitter's paddle grows
    Enlarge,
    /// The other paddle shrinks
    Shrink,
    SpeedUp,
    SlowDown,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Enlarge,
        PowerUpKind::Shrink,
        PowerUpKind::SpeedUp,
        PowerUpKind::SlowDown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Enlarge => "enlarge",
            PowerUpKind::Shrink => "shrink",
            PowerUpKind::SpeedUp => "speed",
            PowerUpKind::SlowDown => "slow",
        }
    }

    /// Fixed draw color, independent of theme
    pub fn color(&self) -> Rgb {
        match self {
            PowerUpKind::Enlarge => Rgb(0, 255, 0),
            PowerUpKind::Shrink => Rgb(255, 0, 0),
            PowerUpKind::SpeedUp => Rgb(0, 0, 255),
            PowerUpKind::SlowDown => Rgb(255, 255, 0),
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub rect: Rect,
    pub active: bool,
}

/// A static block in the middle of the field (Survival mode)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

/// Simulation state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Active,
    Paused,
    /// Tournament decided; absorbing until a new simulation is built
    Terminal { winner: Side },
}

/// Minimal state needed to reconstruct a frame. Unit of replay and network transfer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub score_left: u32,
    pub score_right: u32,
}

impl GameState {
    /// Number of numeric fields on the wire
    pub const FIELD_COUNT: usize = 8;

    /// Flatten in wire order
    pub fn to_fields(&self) -> [f32; Self::FIELD_COUNT] {
        [
            self.ball_pos.x,
            self.ball_pos.y,
            self.ball_vel.x,
            self.ball_vel.y,
            self.left_paddle_y,
            self.right_paddle_y,
            self.score_left as f32,
            self.score_right as f32,
        ]
    }

    /// Inverse of `to_fields`; scores round to the nearest non-negative integer
    pub fn from_fields(f: [f32; Self::FIELD_COUNT]) -> Self {
        Self {
            ball_pos: Vec2::new(f[0], f[1]),
            ball_vel: Vec2::new(f[2], f[3]),
            left_paddle_y: f[4],
            right_paddle_y: f[5],
            score_left: f[6].round().max(0.0) as u32,
            score_right: f[7].round().max(0.0) as u32,
        }
    }
}

#[inline]
pub fn field_center() -> Vec2 {
    Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_paddle_clamped_to_field() {
        let mut paddle = Paddle::new(Side::Left);
        paddle.move_by(-10_000.0);
        assert_eq!(paddle.y, 0.0);
        paddle.move_by(10_000.0);
        assert_eq!(paddle.y, FIELD_HEIGHT - paddle.height);
    }

    #[test]
    fn test_resize_limits() {
        let mut paddle = Paddle::new(Side::Right);
        for _ in 0..100 {
            paddle.resize(PADDLE_HEIGHT_STEP);
        }
        assert_eq!(paddle.height, FIELD_HEIGHT);
        assert_eq!(paddle.y, 0.0);

        for _ in 0..100 {
            paddle.resize(-PADDLE_HEIGHT_STEP);
        }
        assert_eq!(paddle.height, PADDLE_MIN_HEIGHT);
    }

    #[test]
    fn test_relaunch_within_serve_cone() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::new(BALL_START_SPEED, &mut rng);
        for _ in 0..200 {
            ball.relaunch(&mut rng);
            let angle = (ball.vel.y / ball.vel.x.abs()).atan();
            assert!(angle.abs() <= MAX_SERVE_ANGLE_DEG.to_radians() + 1e-4);
            assert!((ball.vel.length() - ball.speed).abs() < 1e-2);
        }
    }

    #[test]
    fn test_rect_edge_contact_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 5.0, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn test_snapshot_fields_order() {
        let state = GameState {
            ball_pos: Vec2::new(1.0, 2.0),
            ball_vel: Vec2::new(3.0, 4.0),
            left_paddle_y: 5.0,
            right_paddle_y: 6.0,
            score_left: 7,
            score_right: 8,
        };
        assert_eq!(state.to_fields(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(GameState::from_fields(state.to_fields()), state);
    }
}
