//! Fixed timestep simulation tick
//!
//! `Simulation` exclusively owns the live paddles, ball, power-ups and
//! obstacles for one game. Everything else (replay, network, renderer) gets
//! copies through `snapshot`/`frame` or asks for changes through
//! `apply_snapshot`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{approaching, ball_overlaps, obstacle_bounce, paddle_bounce, wall_bounce};
use super::particles::ParticlePool;
use super::state::{Ball, GamePhase, GameState, Obstacle, Paddle, PowerUp, PowerUpKind, Rect, Side};
use crate::audio::Cue;
use crate::consts::*;
use crate::input::{Intent, TickInput};
use crate::render::{BallSprite, PowerUpSprite, RenderFrame};
use crate::replay::ReplayRecorder;
use crate::settings::{Difficulty, GameMode, PlayMode, Settings};

/// Rules for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub mode: GameMode,
    pub players: PlayMode,
    pub difficulty: Difficulty,
    pub tournament_target: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Classic,
            players: PlayMode::Single,
            difficulty: Difficulty::Medium,
            tournament_target: DEFAULT_TOURNAMENT_TARGET,
        }
    }
}

impl From<&Settings> for SimConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            mode: settings.mode,
            players: settings.players,
            difficulty: settings.difficulty,
            tournament_target: settings.tournament_target,
        }
    }
}

/// Points scored across games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub games: u32,
    pub left_points: u32,
    pub right_points: u32,
}

/// Something the outside world may want to react to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Cue(Cue),
    Scored { side: Side },
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    ObstacleSpawned,
    TournamentWon { winner: Side },
}

/// The authoritative game
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    phase: GamePhase,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    powerups: Vec<PowerUp>,
    obstacles: Vec<Obstacle>,
    last_hitter: Option<Side>,
    score_left: u32,
    score_right: u32,
    stats: Stats,
    powerup_timer: f32,
    obstacle_timer: f32,
    /// Elapsed play time (timed modes only)
    game_timer: f32,
    time_ticks: u64,
    particles: ParticlePool,
    recorder: ReplayRecorder,
    events: Vec<GameEvent>,
    rng: Pcg32,
}

impl Simulation {
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_stats(config, seed, Stats::default())
    }

    /// Fresh game that keeps counting into existing lifetime stats
    pub fn with_stats(config: SimConfig, seed: u64, stats: Stats) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let ball = Ball::new(BALL_START_SPEED, &mut rng);
        Self {
            config,
            phase: GamePhase::Active,
            left: Paddle::new(Side::Left),
            right: Paddle::new(Side::Right),
            ball,
            powerups: Vec::new(),
            obstacles: Vec::new(),
            last_hitter: None,
            score_left: 0,
            score_right: 0,
            stats,
            powerup_timer: 0.0,
            obstacle_timer: 0.0,
            game_timer: 0.0,
            time_ticks: 0,
            particles: ParticlePool::default(),
            recorder: ReplayRecorder::new(),
            events: Vec::new(),
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn scores(&self) -> (u32, u32) {
        (self.score_left, self.score_right)
    }

    pub fn last_hitter(&self) -> Option<Side> {
        self.last_hitter
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn stats_mut(&mut self) -> &mut Stats {
        &mut self.stats
    }

    pub fn elapsed(&self) -> f32 {
        self.game_timer
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn recorder(&self) -> &ReplayRecorder {
        &self.recorder
    }

    pub fn recorder_mut(&mut self) -> &mut ReplayRecorder {
        &mut self.recorder
    }

    /// Take the events emitted since the last call
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Active <-> Paused. Terminal ignores it.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Active => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Active,
            terminal @ GamePhase::Terminal { .. } => terminal,
        };
    }

    /// Place the ball directly (serve setups, scenarios)
    pub fn place_ball(&mut self, pos: Vec2, vel: Vec2) {
        self.ball.pos = pos;
        self.ball.vel = vel;
        self.ball.spin = 0.0;
    }

    pub fn set_last_hitter(&mut self, side: Option<Side>) {
        self.last_hitter = side;
    }

    pub fn set_scores(&mut self, left: u32, right: u32) {
        self.score_left = left;
        self.score_right = right;
    }

    pub fn insert_powerup(&mut self, kind: PowerUpKind, rect: Rect) {
        self.powerups.push(PowerUp {
            kind,
            rect,
            active: true,
        });
    }

    pub fn insert_obstacle(&mut self, rect: Rect) {
        self.obstacles.push(Obstacle { rect });
    }

    /// Copy of the minimal replay/network state
    pub fn snapshot(&self) -> GameState {
        GameState {
            ball_pos: self.ball.pos,
            ball_vel: self.ball.vel,
            left_paddle_y: self.left.y,
            right_paddle_y: self.right.y,
            score_left: self.score_left,
            score_right: self.score_right,
        }
    }

    /// Overwrite ball, paddle positions and scores from a snapshot
    /// (network client mirroring, replay display)
    pub fn apply_snapshot(&mut self, state: &GameState) {
        self.ball.pos = state.ball_pos;
        self.ball.vel = state.ball_vel;
        self.left.set_y(state.left_paddle_y);
        self.right.set_y(state.right_paddle_y);
        self.score_left = state.score_left;
        self.score_right = state.score_right;
    }

    /// Advance the game by one fixed timestep.
    ///
    /// `remote` is the peer's paddle intent on an online host; it is ignored
    /// in other play modes. Particles keep animating while paused or finished.
    pub fn tick(&mut self, dt: f32, input: &TickInput, remote: Option<Intent>) {
        if input.pause {
            self.toggle_pause();
        }

        if self.phase == GamePhase::Active {
            self.step(dt, input, remote);
        }

        self.particles.update(dt);
    }

    fn step(&mut self, dt: f32, input: &TickInput, remote: Option<Intent>) {
        self.time_ticks += 1;

        // Clients only mirror what the host sends, but still end the
        // tournament once the mirrored score reaches the target
        if self.config.players == PlayMode::OnlineClient {
            self.check_tournament_end();
            self.recorder.record(self.snapshot());
            return;
        }

        self.update_timers(dt);

        // Paddles
        if input.idle_mode {
            self.drive_ai(Side::Left, dt);
        } else {
            self.apply_intent(Side::Left, input.left, dt);
        }
        match self.config.players {
            PlayMode::Single => self.drive_ai(Side::Right, dt),
            PlayMode::LocalVersus => self.apply_intent(Side::Right, input.right, dt),
            PlayMode::OnlineHost => {
                self.apply_intent(Side::Right, remote.unwrap_or_default(), dt)
            }
            PlayMode::OnlineClient => {}
        }

        // Ball
        self.ball.integrate(dt);
        if wall_bounce(&mut self.ball) {
            self.burst(WALL_HIT_PARTICLES);
            self.events.push(GameEvent::Cue(Cue::WallHit));
        }

        for side in [Side::Left, Side::Right] {
            let paddle = self.paddle(side);
            if approaching(&self.ball, side) && ball_overlaps(&self.ball, &paddle.rect()) {
                let bounce = paddle_bounce(&self.ball, paddle, side);
                self.ball.vel = bounce.vel;
                self.ball.spin = bounce.spin;
                self.last_hitter = Some(side);
                self.burst(PADDLE_HIT_PARTICLES);
                self.events.push(GameEvent::Cue(Cue::PaddleHit));
            }
        }

        for i in 0..self.obstacles.len() {
            let rect = self.obstacles[i].rect;
            if obstacle_bounce(&mut self.ball, &rect) {
                self.burst(OBSTACLE_HIT_PARTICLES);
                self.events.push(GameEvent::Cue(Cue::WallHit));
            }
        }

        self.collect_powerups();
        self.check_score();
        self.check_tournament_end();

        self.recorder.record(self.snapshot());
    }

    fn check_tournament_end(&mut self) {
        if self.config.mode != GameMode::Tournament {
            return;
        }
        let target = self.config.tournament_target;
        let winner = if self.score_left >= target {
            Side::Left
        } else if self.score_right >= target {
            Side::Right
        } else {
            return;
        };
        log::info!(
            "Tournament won by {} ({}:{})",
            winner.as_str(),
            self.score_left,
            self.score_right
        );
        self.phase = GamePhase::Terminal { winner };
        self.events.push(GameEvent::TournamentWon { winner });
    }

    fn update_timers(&mut self, dt: f32) {
        if self.config.mode.timed() {
            self.game_timer += dt;
        }

        self.powerup_timer += dt;
        if self.powerup_timer > POWERUP_INTERVAL_SECS {
            self.spawn_powerup();
            self.powerup_timer = 0.0;
        }

        if self.config.mode.spawns_obstacles() {
            self.obstacle_timer += dt;
            if self.obstacle_timer > OBSTACLE_INTERVAL_SECS {
                self.spawn_obstacle();
                self.obstacle_timer = 0.0;
            }
        }
    }

    fn apply_intent(&mut self, side: Side, intent: Intent, dt: f32) {
        let paddle = self.paddle_mut(side);
        match intent {
            Intent::None => {}
            Intent::Up => paddle.move_by(-paddle.speed * dt),
            Intent::Down => paddle.move_by(paddle.speed * dt),
            // The right paddle only follows a pointer on its own half
            Intent::Pointer { x, y } => {
                if side == Side::Left || x > FIELD_WIDTH / 2.0 {
                    paddle.set_center_y(y);
                }
            }
        }
    }

    /// Adaptive tracker: the further behind it falls, the tighter its dead
    /// zone and the faster it moves.
    fn drive_ai(&mut self, side: Side, dt: f32) {
        let (own, other) = match side {
            Side::Right => (self.score_right, self.score_left),
            Side::Left => (self.score_left, self.score_right),
        };
        let deficit = other as f32 - own as f32;
        let dead_zone = (AI_BASE_DEAD_ZONE - deficit).max(0.0);
        let speed = AI_BASE_SPEED + AI_SPEED_PER_POINT * deficit.abs();

        let ball_y = self.ball.pos.y;
        let paddle = self.paddle_mut(side);
        let center = paddle.center_y();
        if ball_y < center - dead_zone {
            paddle.move_by(-speed * dt);
        } else if ball_y > center + dead_zone {
            paddle.move_by(speed * dt);
        }
    }

    fn collect_powerups(&mut self) {
        for i in 0..self.powerups.len() {
            if !self.powerups[i].active || !ball_overlaps(&self.ball, &self.powerups[i].rect) {
                continue;
            }
            let kind = self.powerups[i].kind;
            self.apply_powerup(kind);
            self.powerups[i].active = false;
            self.burst(PICKUP_PARTICLES);
            self.events.push(GameEvent::Cue(Cue::Pickup));
            self.events.push(GameEvent::PowerUpCollected { kind });
        }
        self.powerups.retain(|p| p.active);
    }

    fn apply_powerup(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Enlarge => {
                if let Some(side) = self.last_hitter {
                    self.paddle_mut(side).resize(PADDLE_HEIGHT_STEP);
                }
            }
            PowerUpKind::Shrink => {
                if let Some(side) = self.last_hitter {
                    self.paddle_mut(side.opposite()).resize(-PADDLE_HEIGHT_STEP);
                }
            }
            PowerUpKind::SpeedUp => {
                self.ball.speed *= SPEED_UP_FACTOR;
                self.ball.relaunch(&mut self.rng);
            }
            PowerUpKind::SlowDown => {
                self.ball.speed *= SLOW_DOWN_FACTOR;
                self.ball.relaunch(&mut self.rng);
            }
        }
    }

    fn check_score(&mut self) {
        let scorer = if self.ball.pos.x - self.ball.radius < 0.0 {
            Side::Right
        } else if self.ball.pos.x + self.ball.radius > FIELD_WIDTH {
            Side::Left
        } else {
            return;
        };

        match scorer {
            Side::Left => {
                self.score_left += 1;
                self.stats.left_points += 1;
            }
            Side::Right => {
                self.score_right += 1;
                self.stats.right_points += 1;
            }
        }
        self.events.push(GameEvent::Cue(Cue::Score));
        self.events.push(GameEvent::Scored { side: scorer });
        self.ball.serve(&mut self.rng);
    }

    fn spawn_powerup(&mut self) {
        let kind = PowerUpKind::ALL[self.rng.random_range(0..PowerUpKind::ALL.len())];
        let x = self.rng.random_range(FIELD_WIDTH / 4.0..=FIELD_WIDTH * 3.0 / 4.0);
        let y = self.rng.random_range(FIELD_HEIGHT / 4.0..=FIELD_HEIGHT * 3.0 / 4.0);
        log::debug!("Power-up {} at ({:.0}, {:.0})", kind.as_str(), x, y);
        self.insert_powerup(kind, Rect::new(x, y, POWERUP_SIZE, POWERUP_SIZE));
        self.events.push(GameEvent::PowerUpSpawned { kind });
    }

    fn spawn_obstacle(&mut self) {
        let x = FIELD_WIDTH / 2.0 - OBSTACLE_WIDTH / 2.0;
        let y = self
            .rng
            .random_range(FIELD_HEIGHT / 4.0..=FIELD_HEIGHT * 3.0 / 4.0 - OBSTACLE_HEIGHT);
        log::debug!("Obstacle at y={:.0}", y);
        self.insert_obstacle(Rect::new(x, y, OBSTACLE_WIDTH, OBSTACLE_HEIGHT));
        self.events.push(GameEvent::ObstacleSpawned);
    }

    fn burst(&mut self, count: usize) {
        self.particles.spawn(self.ball.pos, count, &mut self.rng);
    }

    /// Drawable view of the current state
    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            left_paddle: self.left.rect(),
            right_paddle: self.right.rect(),
            ball: BallSprite {
                pos: self.ball.pos,
                radius: self.ball.radius,
            },
            powerups: self
                .powerups
                .iter()
                .filter(|p| p.active)
                .map(|p| PowerUpSprite {
                    kind: p.kind,
                    rect: p.rect,
                })
                .collect(),
            obstacles: self.obstacles.iter().map(|o| o.rect).collect(),
            particles: self.particles.sprites().collect(),
            score_left: self.score_left,
            score_right: self.score_right,
            timer: self.config.mode.timed().then_some(self.game_timer),
            paused: self.phase == GamePhase::Paused,
            finished: matches!(self.phase, GamePhase::Terminal { .. }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn versus() -> SimConfig {
        SimConfig {
            players: PlayMode::LocalVersus,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_pause() {
        let mut sim = Simulation::new(versus(), 12345);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        sim.tick(SIM_DT, &pause, None);
        assert_eq!(sim.phase(), GamePhase::Paused);

        let frozen = sim.snapshot();
        for _ in 0..10 {
            sim.tick(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(sim.snapshot(), frozen);
        assert_eq!(sim.recorder().len(), 0);

        sim.tick(SIM_DT, &pause, None);
        assert_eq!(sim.phase(), GamePhase::Active);
        assert_ne!(sim.snapshot().ball_pos, frozen.ball_pos);
    }

    #[test]
    fn test_particles_animate_while_paused() {
        let mut sim = Simulation::new(versus(), 5);
        sim.burst(10);
        sim.toggle_pause();
        let before = sim.particles().live_count();
        assert_eq!(before, 10);
        for _ in 0..70 {
            sim.tick(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(sim.particles().live_count(), 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = Simulation::new(SimConfig::default(), 99999);
        let mut b = Simulation::new(SimConfig::default(), 99999);
        let input = TickInput {
            left: Intent::Down,
            ..Default::default()
        };
        for _ in 0..2000 {
            a.tick(SIM_DT, &input, None);
            b.tick(SIM_DT, &input, None);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.powerups().len(), b.powerups().len());
    }

    #[test]
    fn test_ai_tracks_ball() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        sim.place_ball(Vec2::new(400.0, 50.0), Vec2::new(-100.0, 0.0));
        let start = sim.paddle(Side::Right).y;
        sim.tick(SIM_DT, &TickInput::default(), None);
        let moved = start - sim.paddle(Side::Right).y;
        assert!((moved - AI_BASE_SPEED * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_ai_dead_zone_and_speed_adapt() {
        let mut sim = Simulation::new(SimConfig::default(), 1);
        // Ball 5px below paddle center: inside the base dead zone
        let center = sim.paddle(Side::Right).center_y();
        sim.place_ball(Vec2::new(400.0, center + 5.0), Vec2::new(-100.0, 0.0));
        sim.tick(SIM_DT, &TickInput::default(), None);
        assert_eq!(sim.paddle(Side::Right).center_y(), center);

        // Two points down: dead zone 8, speed 400
        let mut sim = Simulation::new(SimConfig::default(), 1);
        sim.set_scores(2, 0);
        sim.place_ball(Vec2::new(400.0, center + 9.0), Vec2::new(-100.0, 0.0));
        sim.tick(SIM_DT, &TickInput::default(), None);
        let moved = sim.paddle(Side::Right).center_y() - center;
        assert!((moved - 400.0 * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_online_host_uses_remote_intent() {
        let config = SimConfig {
            players: PlayMode::OnlineHost,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, 3);
        let start = sim.paddle(Side::Right).y;
        sim.tick(SIM_DT, &TickInput::default(), Some(Intent::Up));
        assert!(sim.paddle(Side::Right).y < start);
        let y = sim.paddle(Side::Right).y;
        sim.tick(SIM_DT, &TickInput::default(), None);
        assert_eq!(sim.paddle(Side::Right).y, y);
    }

    #[test]
    fn test_client_does_not_simulate() {
        let config = SimConfig {
            players: PlayMode::OnlineClient,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, 3);
        let before = sim.snapshot();
        sim.tick(SIM_DT, &TickInput::default(), None);
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.recorder().len(), 1);
    }

    #[test]
    fn test_client_ends_tournament_from_mirrored_score() {
        let config = SimConfig {
            mode: GameMode::Tournament,
            players: PlayMode::OnlineClient,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, 3);
        sim.tick(SIM_DT, &TickInput::default(), None);
        assert_eq!(sim.phase(), GamePhase::Active);

        let mut state = sim.snapshot();
        state.score_right = DEFAULT_TOURNAMENT_TARGET;
        sim.apply_snapshot(&state);
        sim.tick(SIM_DT, &TickInput::default(), None);
        assert_eq!(sim.phase(), GamePhase::Terminal { winner: Side::Right });
        assert!(sim.frame().finished);
        assert!(
            sim.drain_events()
                .any(|e| e == GameEvent::TournamentWon { winner: Side::Right })
        );
    }

    #[test]
    fn test_pointer_right_half_only() {
        let mut sim = Simulation::new(versus(), 3);
        let input = TickInput {
            right: Intent::Pointer { x: 100.0, y: 50.0 },
            ..Default::default()
        };
        let start = sim.paddle(Side::Right).y;
        sim.tick(SIM_DT, &input, None);
        assert_eq!(sim.paddle(Side::Right).y, start);

        let input = TickInput {
            right: Intent::Pointer { x: 700.0, y: 50.0 },
            ..Default::default()
        };
        sim.tick(SIM_DT, &input, None);
        assert_eq!(sim.paddle(Side::Right).y, 0.0);
    }

    #[test]
    fn test_powerup_spawns_every_ten_seconds() {
        let mut sim = Simulation::new(versus(), 8);
        // Keep the ball out of play so nothing scores or gets collected
        for _ in 0..601 {
            sim.place_ball(Vec2::new(400.0, 30.0), Vec2::ZERO);
            sim.tick(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(sim.powerups().len(), 1);
        let spawned = sim
            .drain_events()
            .filter(|e| matches!(e, GameEvent::PowerUpSpawned { .. }))
            .count();
        assert_eq!(spawned, 1);
        assert!(sim.obstacles().is_empty());
    }

    #[test]
    fn test_survival_spawns_obstacles() {
        let config = SimConfig {
            mode: GameMode::Survival,
            ..versus()
        };
        let mut sim = Simulation::new(config, 8);
        for _ in 0..(16 * 60) {
            sim.place_ball(Vec2::new(100.0, 30.0), Vec2::ZERO);
            sim.tick(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(sim.obstacles().len(), 1);
        let rect = sim.obstacles()[0].rect;
        assert_eq!(rect.x, FIELD_WIDTH / 2.0 - OBSTACLE_WIDTH / 2.0);
        assert!(rect.y >= FIELD_HEIGHT / 4.0 && rect.bottom() <= FIELD_HEIGHT * 3.0 / 4.0);
    }

    #[test]
    fn test_timer_only_in_timed_modes() {
        let mut classic = Simulation::new(versus(), 1);
        let mut timed = Simulation::new(
            SimConfig {
                mode: GameMode::TimeAttack,
                ..versus()
            },
            1,
        );
        for _ in 0..60 {
            classic.tick(SIM_DT, &TickInput::default(), None);
            timed.tick(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(classic.elapsed(), 0.0);
        assert!((timed.elapsed() - 1.0).abs() < 1e-3);
        assert!(classic.frame().timer.is_none());
        assert!(timed.frame().timer.is_some());
    }

    #[test]
    fn test_timers_stand_still_while_paused() {
        let config = SimConfig {
            mode: GameMode::TimeAttack,
            ..versus()
        };
        let mut sim = Simulation::new(config, 6);
        sim.toggle_pause();
        for _ in 0..700 {
            sim.tick(SIM_DT, &TickInput::default(), None);
        }
        assert_eq!(sim.elapsed(), 0.0);
        assert!(sim.powerups().is_empty());
        assert_eq!(sim.time_ticks(), 0);

        // The interval counts from resume, not from the start of the pause
        sim.toggle_pause();
        for _ in 0..590 {
            sim.place_ball(Vec2::new(400.0, 30.0), Vec2::ZERO);
            sim.tick(SIM_DT, &TickInput::default(), None);
        }
        assert!(sim.powerups().is_empty());
        assert!((sim.elapsed() - 590.0 * SIM_DT).abs() < 1e-2);
    }

    #[test]
    fn test_enlarge_and_shrink_follow_last_hitter() {
        let mut sim = Simulation::new(versus(), 2);
        sim.set_last_hitter(Some(Side::Left));
        sim.apply_powerup(PowerUpKind::Enlarge);
        assert_eq!(sim.paddle(Side::Left).height, PADDLE_HEIGHT + PADDLE_HEIGHT_STEP);
        sim.apply_powerup(PowerUpKind::Shrink);
        assert_eq!(sim.paddle(Side::Right).height, PADDLE_HEIGHT - PADDLE_HEIGHT_STEP);
        assert_eq!(sim.paddle(Side::Left).height, PADDLE_HEIGHT + PADDLE_HEIGHT_STEP);

        // Nobody has touched the ball yet: no paddle changes
        let mut sim = Simulation::new(versus(), 2);
        sim.apply_powerup(PowerUpKind::Enlarge);
        sim.apply_powerup(PowerUpKind::Shrink);
        assert_eq!(sim.paddle(Side::Left).height, PADDLE_HEIGHT);
        assert_eq!(sim.paddle(Side::Right).height, PADDLE_HEIGHT);
    }
}
