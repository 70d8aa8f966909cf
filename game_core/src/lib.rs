pub mod components;
pub mod config;
pub mod game;
pub mod geometry;
pub mod params;
pub mod resources;
pub mod scene;
pub mod scheduler;
pub mod systems;

pub use components::*;
pub use config::*;
pub use game::*;
pub use geometry::*;
pub use params::*;
pub use resources::*;
pub use scene::*;
pub use scheduler::*;
pub use systems::*;

/// Build a headless game for a `width` x `height` playfield
pub fn headless_game(width: u32, height: u32, seed: u64) -> Result<Game, ConfigError> {
    let config = Config::for_playfield(width, height)?;
    Ok(Game::headless(config, seed))
}
