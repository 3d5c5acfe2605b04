pub mod error;
pub mod types;

pub use error::MinemapError;
pub use types::{Result, TilePos};
