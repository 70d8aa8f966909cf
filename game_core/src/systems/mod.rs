pub mod bird;
pub mod scroll;
pub mod tubes;

pub use bird::*;
pub use scroll::*;
pub use tubes::*;
