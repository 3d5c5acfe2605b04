use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use minemap_nbt::{Document, NbtError, Tag};

use crate::coords::{self, CoordsError};

/// The length of a chunk along the X axis, in blocks.
pub const CHUNK_SIZE_X: u32 = 16;
/// The length of a chunk along the Z axis, in blocks.
pub const CHUNK_SIZE_Z: u32 = 16;
/// The area of a chunk along the XZ plane, in blocks.
pub const CHUNK_SIZE_AREA: u32 = 256;

#[derive(Debug)]
pub enum ChunkError {
    /// The chunk file could not be opened.
    Input(io::Error),
    /// Decoding the document failed, or a required tag was missing.
    Tag(String),
    /// The root tag was not a compound named `Level`.
    TagFormat(String),
    /// The filename did not yield chunk coordinates.
    Coords(String),
    /// The coordinates in the level data disagree with the filename.
    Consistency(String),
    /// A data array was missing, mistyped, or implied a conflicting height.
    Height(String),
}

impl fmt::Display for ChunkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkError::Input(err) => write!(f, "cannot open chunk file: {}", err),
            ChunkError::Tag(msg) => write!(f, "tag error: {}", msg),
            ChunkError::TagFormat(msg) => write!(f, "tag format error: {}", msg),
            ChunkError::Coords(msg) => write!(f, "coordinate error: {}", msg),
            ChunkError::Consistency(msg) => write!(f, "consistency error: {}", msg),
            ChunkError::Height(msg) => write!(f, "height error: {}", msg),
        }
    }
}

impl Error for ChunkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ChunkError::Input(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NbtError> for ChunkError {
    fn from(err: NbtError) -> Self {
        ChunkError::Tag(err.to_string())
    }
}

impl From<CoordsError> for ChunkError {
    fn from(err: CoordsError) -> Self {
        ChunkError::Coords(err.to_string())
    }
}

/// One 16x16 column grid of blocks, projected out of a decoded chunk
/// document. Heights vary per chunk and are always derived from the data
/// arrays, never assumed.
#[derive(Debug)]
pub struct Chunk {
    coord_x: i32,
    coord_z: i32,
    height: u32,
    blocks: Vec<u8>,
    block_data: Vec<u8>,
    skylight: Vec<u8>,
    blocklight: Vec<u8>,
    heightmap: Option<Vec<u8>>,
}

/// Destination slots for the level data arrays, walked as a fixed table so
/// each array is pulled out of the compound exactly once.
enum Slot {
    SkyLight,
    Data,
    BlockLight,
    Blocks,
}

impl Slot {
    /// 4-bit arrays pack two blocks per byte; 8-bit arrays one.
    fn is_nibble(&self) -> bool {
        !matches!(self, Slot::Blocks)
    }
}

const LEVEL_ARRAYS: [(&str, Slot); 4] = [
    ("SkyLight", Slot::SkyLight),
    ("Data", Slot::Data),
    ("BlockLight", Slot::BlockLight),
    ("Blocks", Slot::Blocks),
];

impl Chunk {
    /// Reads, validates, and slices one chunk document. The expected
    /// coordinates come from the filename; `xPos`/`zPos` in the level data
    /// must match them exactly, so a renamed or corrupted file is rejected
    /// instead of rendering at the wrong location.
    pub fn project(path: &Path) -> Result<Chunk, ChunkError> {
        let mut file = File::open(path).map_err(ChunkError::Input)?;
        let doc = Document::read_gzip(&mut file)?;

        let mut root_name = doc.name;
        let mut root = doc.root;

        // An anonymous root is only a wrapper; the chunk data is its
        // "Level" child.
        if root_name.is_empty() {
            match root {
                Tag::Compound(mut map) => match map.remove("Level") {
                    Some(level) => {
                        root_name = "Level".to_string();
                        root = level;
                    }
                    None => {
                        return Err(ChunkError::Tag(
                            "anonymous root has no Level child".to_string(),
                        ))
                    }
                },
                _ => return Err(ChunkError::Tag("root is not a compound".to_string())),
            }
        }

        let mut level = match (root_name.as_str(), root) {
            ("Level", Tag::Compound(map)) => map,
            (name, _) => {
                return Err(ChunkError::TagFormat(format!(
                    "root tag {:?} is not a Level compound",
                    name
                )))
            }
        };

        let (coord_x, coord_z) = coords::coords_from_filename(path)?;

        let declared_x = level.get("xPos").and_then(Tag::as_i32);
        if declared_x != Some(coord_x) {
            return Err(ChunkError::Consistency(format!(
                "xPos {:?} does not match filename coordinate {}",
                declared_x, coord_x
            )));
        }

        let declared_z = level.get("zPos").and_then(Tag::as_i32);
        if declared_z != Some(coord_z) {
            return Err(ChunkError::Consistency(format!(
                "zPos {:?} does not match filename coordinate {}",
                declared_z, coord_z
            )));
        }

        // Derive the height from every data array and require agreement, so
        // later offset arithmetic can trust it.
        let mut height: Option<u32> = None;
        let mut skylight = None;
        let mut block_data = None;
        let mut blocklight = None;
        let mut blocks = None;

        for (key, slot) in LEVEL_ARRAYS {
            let bytes = match level.remove(key) {
                Some(Tag::ByteArray(bytes)) => bytes,
                _ => {
                    return Err(ChunkError::Height(format!(
                        "{} is missing or not a byte array",
                        key
                    )))
                }
            };

            let derived = if slot.is_nibble() {
                bytes.len() as u32 / CHUNK_SIZE_AREA * 2
            } else {
                bytes.len() as u32 / CHUNK_SIZE_AREA
            };

            match height {
                None => height = Some(derived),
                Some(seen) if seen != derived => {
                    return Err(ChunkError::Height(format!(
                        "{} implies height {}, other arrays imply {}",
                        key, derived, seen
                    )));
                }
                Some(_) => {}
            }

            match slot {
                Slot::SkyLight => skylight = Some(bytes),
                Slot::Data => block_data = Some(bytes),
                Slot::BlockLight => blocklight = Some(bytes),
                Slot::Blocks => blocks = Some(bytes),
            }
        }

        let (Some(height), Some(skylight), Some(block_data), Some(blocklight), Some(blocks)) =
            (height, skylight, block_data, blocklight, blocks)
        else {
            return Err(ChunkError::Height("level data arrays incomplete".to_string()));
        };

        // The height map is optional; consumers treat its absence as "no
        // surface information" rather than an error.
        let heightmap = match level.remove("HeightMap") {
            Some(Tag::ByteArray(bytes)) => Some(bytes),
            _ => None,
        };

        Ok(Chunk {
            coord_x,
            coord_z,
            height,
            blocks,
            block_data,
            skylight,
            blocklight,
            heightmap,
        })
    }

    pub fn coord_x(&self) -> i32 {
        self.coord_x
    }

    pub fn coord_z(&self) -> i32 {
        self.coord_z
    }

    /// How tall this chunk is, in blocks.
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn key(&self) -> u64 {
        chunk_key(self.coord_x, self.coord_z)
    }

    /// Block type at chunk-local coordinates.
    pub fn block(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        let offset = offset_8bit(self.height, x, y, z, self.blocks.len() as u32)?;
        Some(self.blocks[offset as usize])
    }

    pub fn block_data(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        self.nibble(&self.block_data, x, y, z)
    }

    pub fn skylight(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        self.nibble(&self.skylight, x, y, z)
    }

    pub fn blocklight(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        self.nibble(&self.blocklight, x, y, z)
    }

    /// The topmost occupied row for a column, if a height map was present.
    pub fn surface_height(&self, x: u32, z: u32) -> Option<u8> {
        let map = self.heightmap.as_deref()?;
        map.get((z * CHUNK_SIZE_X + x) as usize).copied()
    }

    fn nibble(&self, bytes: &[u8], x: u32, y: u32, z: u32) -> Option<u8> {
        let offset = offset_4bit(self.height, x, y, z, bytes.len() as u32)?;
        let byte = bytes[offset as usize];
        // Two vertically adjacent blocks share a byte: even rows sit in the
        // low nibble, odd rows in the high nibble.
        Some(if y % 2 == 0 {
            byte & 0x0F
        } else {
            (byte >> 4) & 0x0F
        })
    }
}

/// 64-bit cache key: x in the high half, z in the low half.
pub fn chunk_key(coord_x: i32, coord_z: i32) -> u64 {
    ((coord_x as u64) << 32) | (coord_z as u32 as u64)
}

/// Offset of a block in an 8-bit-per-block array, in row-major (z, x, y)
/// order with y varying fastest. Passing y = 0 yields the start of a column,
/// which callers can iterate over manually.
pub fn offset_8bit(height: u32, x: u32, y: u32, z: u32, max_offset: u32) -> Option<u32> {
    let offset = z * height + x * height * CHUNK_SIZE_X + y;
    if offset >= max_offset {
        None
    } else {
        Some(offset)
    }
}

/// Offset of a block's byte in a 4-bit-per-block array. Callers must still
/// pick the nibble by the parity of y.
pub fn offset_4bit(height: u32, x: u32, y: u32, z: u32, max_offset: u32) -> Option<u32> {
    let offset = (z * height + x * height * CHUNK_SIZE_X + y) / 2;
    if offset >= max_offset {
        None
    } else {
        Some(offset)
    }
}
