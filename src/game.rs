//! Frame driver
//!
//! Owns one `Simulation` and steps it at the fixed rate from variable frame
//! deltas. In online play it also owns the network link and moves data
//! between the link and the simulation once per frame; the simulation itself
//! never sees the socket.

use crate::audio::AudioSink;
use crate::consts::*;
use crate::input::{Command, Intent, RawInput, TickInput};
use crate::net::{NetSession, Role};
use crate::rankings::{RankingError, RankingSink};
use crate::render::RenderSink;
use crate::replay::ReplayCursor;
use crate::settings::{PlayMode, Settings};
use crate::sim::{GameEvent, Side, SimConfig, Simulation, Stats};

pub struct Game {
    settings: Settings,
    sim: Simulation,
    accumulator: f32,
    input: TickInput,
    link: Option<NetSession>,
    /// Last command from the peer; held until the next one arrives
    remote: Intent,
    replay: Option<ReplayCursor>,
    volume: f32,
    /// Non-cue events from the most recent `update`
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        Self::with_stats(settings, Stats::default())
    }

    pub fn with_stats(settings: Settings, stats: Stats) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "New {} game ({:?}), seed {}",
            settings.mode.as_str(),
            settings.players,
            seed
        );
        Self {
            sim: Simulation::with_stats(SimConfig::from(&settings), seed, stats),
            volume: settings.volume,
            settings,
            accumulator: 0.0,
            input: TickInput::default(),
            link: None,
            remote: Intent::None,
            replay: None,
            events: Vec::new(),
        }
    }

    /// Drive an online game over an established session
    pub fn with_link(mut settings: Settings, link: NetSession) -> Self {
        settings.players = match link.role() {
            Role::Host => PlayMode::OnlineHost,
            Role::Client => PlayMode::OnlineClient,
        };
        let mut game = Self::new(settings);
        game.link = Some(link);
        game
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn sim_mut(&mut self) -> &mut Simulation {
        &mut self.sim
    }

    pub fn stats(&self) -> Stats {
        self.sim.stats()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Events other than audio cues raised during the last `update`
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_online(&self) -> bool {
        self.link.is_some()
    }

    /// Online and the peer is still exchanging messages
    pub fn is_connected(&self) -> bool {
        self.link.as_ref().is_some_and(|link| link.is_running())
    }

    /// Held movement intent for one paddle
    pub fn set_intent(&mut self, side: Side, intent: Intent) {
        match side {
            Side::Left => self.input.left = intent,
            Side::Right => self.input.right = intent,
        }
    }

    /// Map sampled device state to both paddles using the configured
    /// bindings and pointer mode
    pub fn apply_raw_input(&mut self, raw: &RawInput) {
        let (left, right) = raw.intents(&self.settings.controls, self.settings.pointer_mode);
        self.input.left = left;
        self.input.right = right;
    }

    /// Demo mode: AI drives the left paddle as well
    pub fn set_idle(&mut self, idle: bool) {
        self.input.idle_mode = idle;
    }

    /// Toggle pause on the next tick
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Step volume by `delta`, clamped to 0..=1, and forward it to the sink
    pub fn adjust_volume(&mut self, delta: f32, audio: &mut dyn AudioSink) {
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        self.settings.volume = self.volume;
        audio.set_volume(self.volume);
    }

    /// Switch to replay display. Recording stops while replaying.
    ///
    /// Refused while online, since the link has to keep exchanging live
    /// state every frame. Returns whether replay started.
    pub fn start_replay(&mut self) -> bool {
        if self.is_online() {
            log::warn!("Replay is not available during an online game");
            return false;
        }
        self.sim.recorder_mut().set_recording(false);
        self.replay = Some(self.sim.recorder().cursor());
        log::info!("Replaying {} snapshots", self.sim.recorder().len());
        true
    }

    pub fn stop_replay(&mut self) {
        if self.replay.take().is_some() {
            self.sim.recorder_mut().set_recording(true);
        }
    }

    pub fn is_replaying(&self) -> bool {
        self.replay.is_some()
    }

    /// Advance by a frame delta, running as many fixed ticks as fit.
    /// Returns the number of ticks run.
    pub fn update(
        &mut self,
        dt: f32,
        audio: &mut dyn AudioSink,
        render: &mut dyn RenderSink,
    ) -> u32 {
        self.events.clear();

        if let Some(cursor) = self.replay.as_mut() {
            let log = self.sim.recorder();
            let shown = cursor.advance(log, dt).copied();
            let finished = cursor.is_finished(log);
            let mut frame = self.sim.frame();
            if let Some(state) = shown {
                frame.show_snapshot(&state);
                render.present(&frame);
            }
            if finished {
                self.stop_replay();
            }
            return 0;
        }

        self.receive();

        let dt = dt.min(0.1);
        self.accumulator += dt;

        let remote = (self.sim.config().players == PlayMode::OnlineHost).then_some(self.remote);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.sim.tick(SIM_DT, &self.input, remote);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // One-shot inputs
            self.input.pause = false;
        }

        self.transmit();

        for event in self.sim.drain_events() {
            match event {
                GameEvent::Cue(cue) => audio.play(cue),
                other => self.events.push(other),
            }
        }

        render.present(&self.sim.frame());
        substeps
    }

    /// Pull the newest peer data into the simulation
    fn receive(&mut self) {
        let Some(link) = &self.link else {
            return;
        };
        match link.role() {
            Role::Host => {
                if let Some(command) = link.latest_command() {
                    self.remote = command.into();
                }
            }
            Role::Client => {
                if let Some(state) = link.latest_state() {
                    self.sim.apply_snapshot(&state);
                }
            }
        }
    }

    /// Hand the link what it should send next
    fn transmit(&mut self) {
        let Some(link) = &self.link else {
            return;
        };
        match link.role() {
            Role::Host => link.publish_state(self.sim.snapshot()),
            Role::Client => {
                let center = self.sim.paddle(Side::Right).center_y();
                link.send_command(Command::from_intent(self.input.right, center));
            }
        }
    }

    /// Close the network link, if any
    pub fn disconnect(&mut self) {
        if let Some(mut link) = self.link.take() {
            link.stop();
        }
    }

    /// End the current game: count it and report the left score for the mode
    pub fn finish<R: RankingSink + ?Sized>(&mut self, rankings: &mut R) -> Result<(), RankingError> {
        self.sim.stats_mut().games += 1;
        let (left, right) = self.sim.scores();
        log::info!("Game over: {} {}:{}", self.settings.mode.as_str(), left, right);
        rankings.report(self.settings.mode.as_str(), left)
    }

    /// Fresh game with the same settings; lifetime stats carry over
    pub fn restart(&mut self) {
        let seed = self.settings.seed.unwrap_or_else(rand::random);
        self.sim = Simulation::with_stats(SimConfig::from(&self.settings), seed, self.sim.stats());
        self.accumulator = 0.0;
        self.input = TickInput {
            idle_mode: self.input.idle_mode,
            ..Default::default()
        };
        self.remote = Intent::None;
        self.replay = None;
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.disconnect();
    }
}
