//! Drawable frame handed to an external renderer
//!
//! The core never draws. Each frame the driver builds a `RenderFrame` from
//! the simulation (or a replay snapshot) and passes it to a `RenderSink`.

use glam::Vec2;

use crate::sim::particles::ParticleSprite;
use crate::sim::state::{GameState, PowerUpKind, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct BallSprite {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpSprite {
    pub kind: PowerUpKind,
    pub rect: Rect,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub left_paddle: Rect,
    pub right_paddle: Rect,
    pub ball: BallSprite,
    /// Active power-ups only
    pub powerups: Vec<PowerUpSprite>,
    pub obstacles: Vec<Rect>,
    pub particles: Vec<ParticleSprite>,
    pub score_left: u32,
    pub score_right: u32,
    /// Elapsed play time in seconds, for modes that show a timer
    pub timer: Option<f32>,
    pub paused: bool,
    /// Tournament decided
    pub finished: bool,
}

impl RenderFrame {
    /// Overlay a recorded snapshot (replay display); the live game is untouched
    pub fn show_snapshot(&mut self, state: &GameState) {
        self.ball.pos = state.ball_pos;
        self.left_paddle.y = state.left_paddle_y;
        self.right_paddle.y = state.right_paddle_y;
        self.score_left = state.score_left;
        self.score_right = state.score_right;
    }
}

/// Consumes frames
pub trait RenderSink {
    fn present(&mut self, frame: &RenderFrame);
}

/// Logs the score line whenever it changes (headless runs)
#[derive(Debug, Default)]
pub struct LogRender {
    last_score: Option<(u32, u32)>,
}

impl RenderSink for LogRender {
    fn present(&mut self, frame: &RenderFrame) {
        let score = (frame.score_left, frame.score_right);
        if self.last_score != Some(score) {
            log::info!("score {}   :   {}", score.0, score.1);
            self.last_score = Some(score);
        }
    }
}
