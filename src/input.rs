//! Paddle intents and per-tick input
//!
//! The simulation never reads devices. Keyboard state, pointer position or a
//! network command is turned into an `Intent` per paddle by the caller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Controls;

/// Movement intent for one paddle for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Intent {
    #[default]
    None,
    Up,
    Down,
    /// Pointer control: paddle center follows this y
    Pointer { x: f32, y: f32 },
}

impl Intent {
    /// Build from two held-key states; up wins when both are held
    pub fn from_keys(up: bool, down: bool) -> Self {
        if up {
            Intent::Up
        } else if down {
            Intent::Down
        } else {
            Intent::None
        }
    }
}

/// Device state sampled by the front end for one frame
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    /// Names of the keys currently held, in the form `Controls` uses
    pub held: Vec<String>,
    /// Pointer position in field coordinates, if the pointer is over the field
    pub pointer: Option<Vec2>,
}

impl RawInput {
    pub fn is_held(&self, key: &str) -> bool {
        self.held.iter().any(|k| k.eq_ignore_ascii_case(key))
    }

    /// Resolve into `(left, right)` intents under the configured bindings.
    /// In pointer mode a known pointer drives both paddles; keys are used
    /// otherwise.
    pub fn intents(&self, controls: &Controls, pointer_mode: bool) -> (Intent, Intent) {
        if pointer_mode {
            if let Some(p) = self.pointer {
                let pointer = Intent::Pointer { x: p.x, y: p.y };
                return (pointer, pointer);
            }
        }
        (
            Intent::from_keys(self.is_held(&controls.left_up), self.is_held(&controls.left_down)),
            Intent::from_keys(
                self.is_held(&controls.right_up),
                self.is_held(&controls.right_down),
            ),
        )
    }
}

/// Inputs for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Left paddle (always local)
    pub left: Intent,
    /// Right paddle when both players share the keyboard
    pub right: Intent,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - AI drives the left paddle too
    pub idle_mode: bool,
}

/// Command token exchanged over the network, one per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Command {
    Up,
    Down,
    #[default]
    None,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Up => "UP",
            Command::Down => "DOWN",
            Command::None => "NONE",
        }
    }

    /// Network commands carry no pointer position; it is reduced to a direction
    /// relative to `paddle_center`.
    pub fn from_intent(intent: Intent, paddle_center: f32) -> Self {
        match intent {
            Intent::Up => Command::Up,
            Intent::Down => Command::Down,
            Intent::None => Command::None,
            Intent::Pointer { y, .. } if y < paddle_center => Command::Up,
            Intent::Pointer { y, .. } if y > paddle_center => Command::Down,
            Intent::Pointer { .. } => Command::None,
        }
    }
}

impl From<Command> for Intent {
    fn from(cmd: Command) -> Self {
        match cmd {
            Command::Up => Intent::Up,
            Command::Down => Intent::Down,
            Command::None => Intent::None,
        }
    }
}
