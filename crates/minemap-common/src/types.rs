pub type Result<T> = std::result::Result<T, crate::error::MinemapError>;

/// A tile position on the rendered map, in tile units (one tile spans
/// 16 x 16 chunks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePos {
    pub x: i32,
    pub z: i32,
}
