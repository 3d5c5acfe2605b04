use std::error::Error;
use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use minemap_nbt::{Document, NbtError, Tag};

use crate::chunk::{Chunk, ChunkError};
use crate::coords;

#[derive(Debug)]
pub enum LevelError {
    Input(io::Error),
    Tag(String),
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::Input(err) => write!(f, "cannot open level data: {}", err),
            LevelError::Tag(msg) => write!(f, "level tag error: {}", msg),
        }
    }
}

impl Error for LevelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LevelError::Input(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NbtError> for LevelError {
    fn from(err: NbtError) -> Self {
        LevelError::Tag(err.to_string())
    }
}

/// A world directory: its decoded `level.dat` metadata plus the chunk files
/// beneath it.
#[derive(Debug)]
pub struct Level {
    input_path: PathBuf,
    data: Tag,
}

/// Coordinate extents of a world, derived by scanning its directories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LevelDimensions {
    pub smallest_x: i32,
    pub smallest_z: i32,
    pub largest_x: i32,
    pub largest_z: i32,
    pub chunk_count: u64,
}

impl Level {
    pub fn load(path: impl Into<PathBuf>) -> Result<Level, LevelError> {
        let input_path = path.into();
        let mut file = File::open(input_path.join("level.dat")).map_err(LevelError::Input)?;
        let doc = Document::read_gzip(&mut file)?;

        // An anonymous root wraps the real metadata in a "Data" child.
        let mut data = doc.root;
        if doc.name.is_empty() {
            data = match data {
                Tag::Compound(mut map) => match map.remove("Data") {
                    Some(inner) => inner,
                    None => {
                        return Err(LevelError::Tag(
                            "anonymous root has no Data child".to_string(),
                        ))
                    }
                },
                _ => return Err(LevelError::Tag("root is not a compound".to_string())),
            };
        }

        Ok(Level { input_path, data })
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// The level metadata tag from `level.dat`.
    pub fn data(&self) -> &Tag {
        &self.data
    }

    /// Chunk files live two directories deep, each directory named by the
    /// unsigned remainder of the matching coordinate.
    pub fn chunk_path(&self, coord_x: i32, coord_z: i32) -> PathBuf {
        let dir_x = coords::base10_to_base36((coord_x as u32 % 64) as i64);
        let dir_z = coords::base10_to_base36((coord_z as u32 % 64) as i64);
        let file = format!(
            "c.{}.{}.dat",
            coords::base10_to_base36(coord_x as i64),
            coords::base10_to_base36(coord_z as i64)
        );
        self.input_path.join(dir_x).join(dir_z).join(file)
    }

    /// Projects the chunk at the given coordinates. Whether a failed load
    /// means "skip" or "abort" is the caller's decision.
    pub fn chunk_at(&self, coord_x: i32, coord_z: i32) -> Result<Chunk, ChunkError> {
        Chunk::project(&self.chunk_path(coord_x, coord_z))
    }

    /// Walks the world directories and derives the coordinate extents and
    /// chunk count. Unreadable entries are skipped, as are dotfiles.
    pub fn dimensions(&self) -> io::Result<LevelDimensions> {
        let mut dims = LevelDimensions::default();

        for x_entry in fs::read_dir(&self.input_path)?.flatten() {
            if hidden(&x_entry) || !is_dir(&x_entry) {
                continue;
            }
            for z_entry in fs::read_dir(x_entry.path())?.flatten() {
                if hidden(&z_entry) || !is_dir(&z_entry) {
                    continue;
                }
                for chunk_entry in fs::read_dir(z_entry.path())?.flatten() {
                    if hidden(&chunk_entry) || !is_file(&chunk_entry) {
                        continue;
                    }
                    if let Ok((x, z)) = coords::coords_from_filename(&chunk_entry.path()) {
                        dims.chunk_count += 1;
                        dims.smallest_x = dims.smallest_x.min(x);
                        dims.smallest_z = dims.smallest_z.min(z);
                        dims.largest_x = dims.largest_x.max(x);
                        dims.largest_z = dims.largest_z.max(z);
                    }
                }
            }
        }

        Ok(dims)
    }
}

fn hidden(entry: &fs::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn is_dir(entry: &fs::DirEntry) -> bool {
    entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
}

fn is_file(entry: &fs::DirEntry) -> bool {
    entry.file_type().map(|t| t.is_file()).unwrap_or(false)
}
