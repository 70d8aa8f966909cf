use std::path::PathBuf;

use anyhow::{Context, Result};
use game_core::Config;
use profile::{AssetManifest, BestScore, Settings};

use crate::session::resolve_playfield;

/// Where the profile lives and what the command line overrides
#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub settings: PathBuf,
    pub score_file: PathBuf,
    pub assets: Option<PathBuf>,
}

/// Everything needed before the first round
#[derive(Debug)]
pub struct Startup {
    pub settings: Settings,
    pub config: Config,
    pub best: BestScore,
}

/// Check assets, then load settings and the best score, creating either if missing
pub fn prepare(options: &StartupOptions) -> Result<Startup> {
    if let Some(root) = &options.assets {
        AssetManifest::standard(root).verify()?;
    }

    let settings = Settings::load_or_create(&options.settings)?;
    let (width, height) = resolve_playfield(options.width, options.height, settings.window_size());
    let config = Config::for_playfield(width, height)
        .with_context(|| format!("invalid playfield {width}x{height}"))?
        .with_background_animation(settings.background_animation);

    let best = BestScore::open(&options.score_file)?;
    Ok(Startup {
        settings,
        config,
        best,
    })
}
