//! Replay recording and playback
//!
//! The recorder keeps its own copies of per-tick snapshots; it never
//! references live entities. Playback is paced at a fixed interval that is
//! unrelated to the tick rate, so a replay does not run at original speed.

use std::thread;
use std::time::Duration;

use crate::consts::REPLAY_INTERVAL_MS;
use crate::sim::GameState;

/// Append-only snapshot log
#[derive(Debug, Clone)]
pub struct ReplayRecorder {
    records: Vec<GameState>,
    recording: bool,
}

impl Default for ReplayRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplayRecorder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            recording: true,
        }
    }

    /// Append `state` if recording is enabled
    pub fn record(&mut self, state: GameState) {
        if self.recording {
            self.records.push(state);
        }
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn set_recording(&mut self, recording: bool) {
        self.recording = recording;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn snapshots(&self) -> &[GameState] {
        &self.records
    }

    /// Blocking playback: hand each snapshot to `show`, in order, one per
    /// `interval`. The log is left intact.
    pub fn play_with<F: FnMut(&GameState)>(&self, interval: Duration, mut show: F) {
        for state in &self.records {
            show(state);
            thread::sleep(interval);
        }
    }

    /// Blocking playback at the standard 50 ms pacing
    pub fn play<F: FnMut(&GameState)>(&self, show: F) {
        self.play_with(Duration::from_millis(REPLAY_INTERVAL_MS), show);
    }

    /// Non-blocking playback for use inside a frame loop
    pub fn cursor(&self) -> ReplayCursor {
        ReplayCursor::new(Duration::from_millis(REPLAY_INTERVAL_MS))
    }
}

/// Frame-loop playback position. Holds no reference to the log, so the
/// recorder can be read between frames.
#[derive(Debug, Clone)]
pub struct ReplayCursor {
    index: usize,
    elapsed: f32,
    interval: f32,
    started: bool,
}

impl ReplayCursor {
    pub fn new(interval: Duration) -> Self {
        Self {
            index: 0,
            elapsed: 0.0,
            interval: interval.as_secs_f32(),
            started: false,
        }
    }

    /// Advance by `dt` seconds. Returns the snapshot to show when a new one
    /// is due, `None` otherwise.
    pub fn advance<'a>(&mut self, log: &'a ReplayRecorder, dt: f32) -> Option<&'a GameState> {
        if !self.started {
            self.started = true;
            return log.records.first();
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed -= self.interval;
        if self.index + 1 >= log.records.len() {
            self.index = log.records.len();
            return None;
        }
        self.index += 1;
        log.records.get(self.index)
    }

    pub fn is_finished(&self, log: &ReplayRecorder) -> bool {
        self.started && self.index + 1 >= log.records.len().max(1)
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.elapsed = 0.0;
        self.started = false;
    }
}
