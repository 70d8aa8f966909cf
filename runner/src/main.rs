use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::Game;
use runner::{
    prepare, Autopilot, Environment, FastForward, RealTime, Session, Startup, StartupOptions,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "flappo")]
#[command(about = "Headless Flappy Bird rounds flown by an autopilot")]
struct Cli {
    /// Playfield width in pixels (falls back to the settings file, then 1200)
    #[arg(long)]
    width: Option<u32>,
    /// Playfield height in pixels (falls back to the settings file, then 800)
    #[arg(long)]
    height: Option<u32>,
    #[arg(long, default_value_t = 12345)]
    seed: u64,
    #[arg(long, default_value_t = 1)]
    rounds: u32,
    #[arg(long, default_value = "Data/settings.json")]
    settings: PathBuf,
    #[arg(long, default_value = "Data/scr.txt")]
    score_file: PathBuf,
    /// Directory holding the Images/ folder; checked before anything starts
    #[arg(long)]
    assets: Option<PathBuf>,
    #[arg(long, default_value_t = 120_000)]
    max_round_ms: u64,
    /// Pace rounds against the wall clock instead of simulating as fast as possible
    #[arg(long)]
    realtime: bool,
    /// Let the bird fall without steering it
    #[arg(long)]
    no_pilot: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let Startup {
        config, mut best, ..
    } = prepare(&StartupOptions {
        width: cli.width,
        height: cli.height,
        settings: cli.settings.clone(),
        score_file: cli.score_file.clone(),
        assets: cli.assets.clone(),
    })?;
    let (width, height) = (config.width, config.height);

    info!(
        "flappo v{}: {}x{} playfield, seed {}, best score {}",
        env!("CARGO_PKG_VERSION"),
        width,
        height,
        cli.seed,
        best.value()
    );

    let env: Box<dyn Environment> = if cli.realtime {
        Box::new(RealTime::new())
    } else {
        Box::new(FastForward::new())
    };
    let game = Game::headless(config, cli.seed).with_best(best.value());
    let mut session = Session::new(env, game);
    if !cli.no_pilot {
        session = session.with_pilot(Autopilot::new());
    }

    for _ in 0..cli.rounds {
        let outcome = session.play_round(cli.max_round_ms);
        if best.record(outcome.score()) {
            best.save()
                .with_context(|| format!("saving best score to {}", best.path().display()))?;
            info!("new best score {}", best.value());
        }
    }

    info!(
        "played {} rounds, best score {}",
        session.rounds_played,
        best.value()
    );
    Ok(())
}
