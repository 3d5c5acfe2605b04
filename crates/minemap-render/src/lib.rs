pub mod colors;
pub mod flat;
pub mod renderer;

pub use colors::ColorMap;
pub use flat::FlatRenderer;
pub use renderer::{render_tile, RenderError, TileRenderer};
