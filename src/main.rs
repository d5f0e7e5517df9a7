//! Paddle Duel headless runner
//!
//! Runs the game core at 60 Hz without a window: audio cues and score changes
//! go to the log. Useful for demos, soak tests and LAN sessions.

use std::error::Error;
use std::path::PathBuf;
use std::process;
use std::thread::sleep;
use std::time::{Duration, Instant};

use clap::Parser;

use paddle_duel::audio::LogAudio;
use paddle_duel::consts::SIM_DT;
use paddle_duel::net::NetSession;
use paddle_duel::render::LogRender;
use paddle_duel::sim::GameEvent;
use paddle_duel::{Game, PlayMode, Rankings, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the settings file (JSON)
    #[arg(short, long, default_value = "settings.json")]
    settings: PathBuf,

    /// Path to the rankings file
    #[arg(short, long, default_value = "rankings.txt")]
    rankings: PathBuf,

    /// Stop after this many ticks (0 runs until the game ends)
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Host an online game on the configured port
    #[arg(long, conflicts_with = "connect")]
    host: bool,

    /// Join an online game at HOST[:PORT]
    #[arg(long, value_name = "HOST[:PORT]")]
    connect: Option<String>,

    /// AI drives both paddles
    #[arg(long)]
    demo: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        log::error!("{}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut settings = Settings::load(&args.settings)?;
    let mut rankings = Rankings::load(args.rankings.clone())?;

    if args.demo {
        settings.players = PlayMode::Single;
    }

    let mut game = if args.host {
        let link = NetSession::host(settings.network.port)?;
        Game::with_link(settings, link)
    } else if let Some(target) = &args.connect {
        let (host, port) = match target.rsplit_once(':') {
            Some((host, port)) => (host.to_string(), port.parse()?),
            None => (target.clone(), settings.network.port),
        };
        let link = NetSession::connect(&host, port)?;
        Game::with_link(settings, link)
    } else {
        Game::new(settings)
    };
    game.set_idle(args.demo);

    let mut audio = LogAudio::default();
    let mut render = LogRender::default();
    let frame = Duration::from_secs_f32(SIM_DT);
    let mut last = Instant::now();
    let mut ticks = 0u64;

    loop {
        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        ticks += u64::from(game.update(dt, &mut audio, &mut render));

        if let Some(GameEvent::TournamentWon { winner }) = game
            .events()
            .iter()
            .find(|e| matches!(e, GameEvent::TournamentWon { .. }))
        {
            log::info!("{} side wins the tournament", winner.as_str());
            break;
        }
        if args.ticks > 0 && ticks >= args.ticks {
            break;
        }
        if game.is_online() && !game.is_connected() {
            log::warn!("Lost connection to peer");
            break;
        }

        sleep(frame.saturating_sub(now.elapsed()));
    }

    game.disconnect();
    game.finish(&mut rankings)?;
    if let Some(path) = rankings.path() {
        log::info!("Rankings kept in {}", path.display());
    }

    let stats = game.stats();
    log::info!(
        "{} ticks, games {}, left points {}, right points {}",
        ticks,
        stats.games,
        stats.left_points,
        stats.right_points
    );
    for (label, best) in rankings.iter() {
        log::info!("best {}: {}", label, best);
    }
    Ok(())
}
