//! Paddle Duel - two-paddle arcade game core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, collisions, power-ups, scoring)
//! - `replay`: Snapshot recorder and paced playback
//! - `net`: Host/client state exchange over TCP
//! - `settings`: Theme, mode and control configuration
//! - `rankings`: Best score per game mode
//! - `game`: Frame driver tying the simulation to input, audio and network

pub mod audio;
pub mod game;
pub mod input;
pub mod net;
pub mod rankings;
pub mod render;
pub mod replay;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use rankings::Rankings;
pub use settings::{Difficulty, GameMode, PlayMode, Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; decay constants are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_MARGIN: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 300.0;
    /// Height change applied by Enlarge/Shrink
    pub const PADDLE_HEIGHT_STEP: f32 = 20.0;
    /// Shrink never takes a paddle below this
    pub const PADDLE_MIN_HEIGHT: f32 = 20.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_SPEED: f32 = 300.0;
    /// Spin decay applied once per tick
    pub const SPIN_DECAY: f32 = 0.98;
    /// Speed friction applied once per tick
    pub const SPEED_FRICTION: f32 = 0.999;
    /// Speed bonus applied on every serve after a point
    pub const SERVE_SPEED_BONUS: f32 = 1.05;
    /// Spin imparted by an edge hit (scaled by hit offset)
    pub const MAX_SPIN: f32 = 50.0;
    /// Maximum bounce angle off a paddle (degrees)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 75.0;
    /// Maximum serve angle from horizontal (degrees)
    pub const MAX_SERVE_ANGLE_DEG: f32 = 45.0;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 20.0;
    pub const POWERUP_INTERVAL_SECS: f32 = 10.0;
    pub const SPEED_UP_FACTOR: f32 = 1.2;
    pub const SLOW_DOWN_FACTOR: f32 = 0.8;

    /// Obstacles (Survival mode)
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_HEIGHT: f32 = 100.0;
    pub const OBSTACLE_INTERVAL_SECS: f32 = 15.0;

    /// Adaptive AI
    pub const AI_BASE_DEAD_ZONE: f32 = 10.0;
    pub const AI_BASE_SPEED: f32 = 300.0;
    pub const AI_SPEED_PER_POINT: f32 = 50.0;

    /// Particle bursts
    pub const MAX_PARTICLES: usize = 500;
    pub const PADDLE_HIT_PARTICLES: usize = 20;
    pub const WALL_HIT_PARTICLES: usize = 15;
    pub const OBSTACLE_HIT_PARTICLES: usize = 10;
    pub const PICKUP_PARTICLES: usize = 15;

    /// Default first-to score in Tournament mode
    pub const DEFAULT_TOURNAMENT_TARGET: u32 = 5;

    /// Replay pacing (milliseconds per recorded snapshot)
    pub const REPLAY_INTERVAL_MS: u64 = 50;

    /// Network cadence and receive timeout (milliseconds)
    pub const NET_CYCLE_MS: u64 = 16;
    pub const NET_RECV_TIMEOUT_MS: u64 = 100;
    /// Host waits this long for a peer before giving up
    pub const NET_ACCEPT_TIMEOUT_MS: u64 = 30_000;
    /// Receive buffer size for one network message
    pub const NET_BUFFER_SIZE: usize = 1024;
    /// Client-side smoothing factor per received snapshot
    pub const NET_SMOOTHING: f32 = 0.1;
    pub const DEFAULT_PORT: u16 = 12345;
}

/// Unit vector at `angle` radians from the +x axis
#[inline]
pub fn direction(angle: f32) -> glam::Vec2 {
    glam::Vec2::new(angle.cos(), angle.sin())
}
