pub mod cache;
pub mod chunk;
pub mod coords;
pub mod level;

pub use cache::{ChunkCache, SlabCache};
pub use chunk::{Chunk, ChunkError};
pub use level::{Level, LevelError};
