use minemap_common::TilePos;
use minemap_world::cache::{ChunkCache, SlabCache};
use minemap_world::chunk::{Chunk, CHUNK_SIZE_X, CHUNK_SIZE_Z};
use minemap_world::level::Level;

use crate::colors::{Color, ColorMap};
use crate::renderer::{blend_color, calc_gamma, TileRenderer, TILE_SIZE};

/// Pixel dimensions of a flat tile: 16 chunks of 16 blocks each way.
pub const IMAGE_WIDTH: u32 = TILE_SIZE * CHUNK_SIZE_X;
pub const IMAGE_HEIGHT: u32 = TILE_SIZE * CHUNK_SIZE_Z;

/// Only one row of chunks is alive at a time, keyed by chunk X.
const CACHE_SIZE: usize = 16;

/// How much sky and block lighting contribute to the blended gamma.
const SKY_PERCENT: f32 = 1.0;
const BLOCK_PERCENT: f32 = 0.5;

/// Top-down tile renderer: each pixel is one block column, shaded from the
/// first fully opaque block upward through whatever translucent blocks sit
/// above it.
pub struct FlatRenderer<'a> {
    level: &'a Level,
    map: &'a ColorMap,
    cache: SlabCache,
    tile: TilePos,
}

impl<'a> FlatRenderer<'a> {
    pub fn new(level: &'a Level, map: &'a ColorMap) -> FlatRenderer<'a> {
        FlatRenderer {
            level,
            map,
            cache: SlabCache::new(CACHE_SIZE),
            tile: TilePos { x: 0, z: 0 },
        }
    }

    /// Fetches a chunk through the cache. A chunk that fails to load is
    /// cached as absent so the tile row renders blank instead of retrying
    /// the file fifteen more times.
    fn chunk_for(&mut self, chunk_x: u32, chunk_z: u32) -> Option<&Chunk> {
        let key = chunk_x as i64;
        if self.cache.get(key).is_none() {
            let absolute_x = self.tile.x * TILE_SIZE as i32 + chunk_x as i32;
            let absolute_z = self.tile.z * TILE_SIZE as i32 + chunk_z as i32;
            let loaded = self.level.chunk_at(absolute_x, absolute_z).ok();
            self.cache.set(key, loaded);
        }
        self.cache.get(key).and_then(|slot| slot)
    }
}

impl TileRenderer for FlatRenderer<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (IMAGE_WIDTH, IMAGE_HEIGHT)
    }

    fn set_tile(&mut self, tile: TilePos) {
        self.tile = tile;
        self.cache.empty();
    }

    fn draw_row(&mut self, row_number: u32, buffer: &mut [u8]) {
        let local_z = row_number % CHUNK_SIZE_Z;

        // Every 16 rows a fresh row of chunks starts; clobber the cache to
        // bound memory.
        if local_z == 0 {
            self.cache.empty();
        }

        let map = self.map;
        for chunk_x in 0..TILE_SIZE {
            let base = (chunk_x * CHUNK_SIZE_X * 4) as usize;
            let span = &mut buffer[base..base + CHUNK_SIZE_X as usize * 4];

            match self.chunk_for(chunk_x, row_number / CHUNK_SIZE_Z) {
                Some(chunk) => {
                    for (local_x, pixel) in span.chunks_exact_mut(4).enumerate() {
                        let color = shade_column(chunk, map, local_x as u32, local_z);
                        pixel.copy_from_slice(&color);
                    }
                }
                None => span.fill(0),
            }
        }
    }
}

/// Shades one block column: drill down from the surface to the first fully
/// opaque block, then blend translucent blocks back up.
fn shade_column(chunk: &Chunk, map: &ColorMap, x: u32, z: u32) -> Color {
    let air = map.get(0).unwrap_or([0, 0, 0, 0]);

    // A chunk without a height map has no surface information; render the
    // column as air.
    let Some(surface) = chunk.surface_height(x, z) else {
        return air;
    };
    let surface = surface as u32;

    let mut base = air;
    let mut y = surface;
    while y > 0 {
        let block = chunk.block(x, y, z).unwrap_or(0);
        if let Some(color) = map.get(block as u16) {
            base = color;
            if color[3] == 255 {
                break;
            }
        }
        y -= 1;
    }

    let mut pixel = base;
    let gamma = calc_gamma(chunk, x as i32, y as i32 + 1, z as i32, SKY_PERCENT, BLOCK_PERCENT);
    blend_color(&mut pixel, None, gamma);

    // Everything above the opaque block tints the pixel.
    for above in (y + 1)..=surface {
        let block = chunk.block(x, above, z).unwrap_or(0);
        let Some(color) = map.get(block as u16) else {
            continue;
        };
        if color[3] > 0 {
            let gamma = calc_gamma(
                chunk,
                x as i32,
                above as i32 + 1,
                z as i32,
                SKY_PERCENT,
                BLOCK_PERCENT,
            );
            blend_color(&mut pixel, Some(&color), gamma);
        }
    }

    pixel
}
