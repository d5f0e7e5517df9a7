//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio or network dependencies

pub mod collision;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Bounce, paddle_bounce};
pub use particles::{ParticlePool, ParticleSprite};
pub use state::{
    Ball, GamePhase, GameState, Obstacle, Paddle, PowerUp, PowerUpKind, Rect, Side, field_center,
};
pub use tick::{GameEvent, SimConfig, Simulation, Stats};
