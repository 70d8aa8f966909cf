pub mod pilot;
pub mod session;
pub mod startup;

pub use pilot::*;
pub use session::*;
pub use startup::*;
