//! Player profile persisted between runs: window settings, key bindings,
//! the best score and the image assets the game expects to find.

pub mod assets;
pub mod error;
pub mod score;
pub mod settings;

pub use assets::*;
pub use error::*;
pub use score::*;
pub use settings::*;
