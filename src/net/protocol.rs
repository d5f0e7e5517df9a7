//! Wire format
//!
//! Host -> client: one snapshot as eight comma-separated decimal numbers
//! (ball x, ball y, ball vx, ball vy, left paddle y, right paddle y, left
//! score, right score). Client -> host: one of `UP`, `DOWN`, `NONE`.
//! Messages carry no delimiter; each read is treated as one message.

use std::fmt::Write as _;

use thiserror::Error;

use crate::input::Command;
use crate::sim::GameState;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("expected {expected} fields, got {got}")]
    FieldCount { expected: usize, got: usize },
    #[error("field {index} is not a number: {text:?}")]
    NotANumber { index: usize, text: String },
    #[error("unknown command: {0:?}")]
    UnknownCommand(String),
}

/// Render a snapshot as wire text
pub fn encode_state(state: &GameState) -> String {
    let mut out = String::with_capacity(64);
    for (i, v) in state.to_fields().iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{v}");
    }
    out
}

/// Parse raw wire fields. Anything but exactly eight finite numbers is rejected.
pub fn decode_fields(text: &str) -> Result<[f32; GameState::FIELD_COUNT], DecodeError> {
    let parts: Vec<&str> = text.trim().split(',').collect();
    if parts.len() != GameState::FIELD_COUNT {
        return Err(DecodeError::FieldCount {
            expected: GameState::FIELD_COUNT,
            got: parts.len(),
        });
    }
    let mut fields = [0.0; GameState::FIELD_COUNT];
    for (index, part) in parts.iter().enumerate() {
        let part = part.trim();
        fields[index] = part
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DecodeError::NotANumber {
                index,
                text: part.to_string(),
            })?;
    }
    Ok(fields)
}

pub fn decode_state(text: &str) -> Result<GameState, DecodeError> {
    decode_fields(text).map(GameState::from_fields)
}

/// Render a command token as wire text
pub fn encode_command(command: Command) -> &'static str {
    command.as_str()
}

/// Parse a command read. Several commands may arrive coalesced in one read;
/// the last one wins.
pub fn decode_command(text: &str) -> Result<Command, DecodeError> {
    let mut best: Option<(usize, Command)> = None;
    for command in [Command::Up, Command::Down, Command::None] {
        if let Some(pos) = text.rfind(command.as_str()) {
            if best.is_none_or(|(at, _)| pos > at) {
                best = Some((pos, command));
            }
        }
    }
    best.map(|(_, command)| command)
        .ok_or_else(|| DecodeError::UnknownCommand(text.trim().to_string()))
}
