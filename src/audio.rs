//! Audio cue events
//!
//! The core only names what happened. Playing (or synthesising) the sound
//! is up to whatever implements `AudioSink`.

use serde::{Deserialize, Serialize};

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top/bottom wall or an obstacle
    WallHit,
    /// Point scored
    Score,
    /// Power-up collected
    Pickup,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::PaddleHit => "paddle_hit",
            Cue::WallHit => "wall_hit",
            Cue::Score => "score",
            Cue::Pickup => "pickup",
        }
    }

    /// Suggested beep pitch in Hz for sinks that synthesise tones
    pub fn tone_hz(&self) -> f32 {
        match self {
            Cue::PaddleHit | Cue::Pickup => 440.0,
            Cue::WallHit => 330.0,
            Cue::Score => 550.0,
        }
    }
}

/// Receives cues as the simulation emits them
pub trait AudioSink {
    fn play(&mut self, cue: Cue);

    /// Master volume (0.0 - 1.0)
    fn set_volume(&mut self, _volume: f32) {}
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Logs each cue at debug level (headless runs)
#[derive(Debug, Default)]
pub struct LogAudio {
    volume: f32,
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: Cue) {
        log::debug!("cue {} ({} Hz, vol {:.1})", cue.name(), cue.tone_hz(), self.volume);
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}
