use std::error::Error;
use std::fmt;
use std::path::Path;

use image::{ImageFormat, RgbaImage};
use minemap_common::TilePos;
use minemap_world::chunk::Chunk;

use crate::colors::Color;

/// How many chunks comprise a tile in both the X and Z directions.
pub const TILE_SIZE: u32 = 16;

#[derive(Debug)]
pub enum RenderError {
    /// The renderer reported a zero-sized tile.
    Dimensions,
    Image(image::ImageError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Dimensions => write!(f, "tile dimensions are empty"),
            RenderError::Image(err) => write!(f, "image error: {}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RenderError::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> Self {
        RenderError::Image(err)
    }
}

/// Row-by-row tile drawing, implemented once per projection style.
pub trait TileRenderer {
    /// Pixel dimensions of a finished tile.
    fn dimensions(&self) -> (u32, u32);

    /// Selects which tile subsequent rows are drawn from.
    fn set_tile(&mut self, tile: TilePos);

    /// Writes one row of RGBA pixels into `buffer`, which holds
    /// `4 * width` bytes.
    fn draw_row(&mut self, row_number: u32, buffer: &mut [u8]);
}

/// Draws a whole tile and writes it out as a PNG, whatever the output
/// path's extension says.
pub fn render_tile<R: TileRenderer>(
    renderer: &mut R,
    tile: TilePos,
    output_path: &Path,
) -> Result<(), RenderError> {
    let (width, height) = renderer.dimensions();
    if width == 0 || height == 0 {
        return Err(RenderError::Dimensions);
    }

    renderer.set_tile(tile);

    let stride = width as usize * 4;
    let mut data = vec![0u8; stride * height as usize];
    for row_number in 0..height {
        let start = row_number as usize * stride;
        renderer.draw_row(row_number, &mut data[start..start + stride]);
    }

    let image = RgbaImage::from_raw(width, height, data).ok_or(RenderError::Dimensions)?;
    image.save_with_format(output_path, ImageFormat::Png)?;
    Ok(())
}

/// Blends `overlay` into `pixel`, darkening by `gamma`; with no overlay the
/// pixel is composited against black using its own alpha. The result is
/// always fully opaque.
pub fn blend_color(pixel: &mut Color, overlay: Option<&Color>, gamma: f32) {
    match overlay {
        Some(overlay) => {
            let alpha = overlay[3] as f32 / 255.0;
            for i in 0..3 {
                pixel[i] =
                    ((1.0 - alpha) * pixel[i] as f32 + alpha * overlay[i] as f32 * gamma) as u8;
            }
        }
        None => {
            let alpha = pixel[3] as f32 / 255.0;
            for i in 0..3 {
                pixel[i] = (pixel[i] as f32 * alpha * gamma) as u8;
            }
        }
    }
    pixel[3] = 255;
}

/// Per-block lighting factor from the chunk's sky and block light arrays,
/// between 0.0 (dark) and 1.0 (fully lit). Out-of-range coordinates or
/// weights fall back to full brightness.
pub fn calc_gamma(
    chunk: &Chunk,
    coord_x: i32,
    coord_y: i32,
    coord_z: i32,
    sky_percent: f32,
    block_percent: f32,
) -> f32 {
    if coord_x < 0 || coord_x > 15 || coord_z < 0 || coord_z > 15 {
        return 1.0;
    }
    if coord_y < 0 || coord_y as u32 >= chunk.height() {
        return 1.0;
    }
    if !(0.0..=1.0).contains(&sky_percent) || !(0.0..=1.0).contains(&block_percent) {
        return 1.0;
    }

    let (x, y, z) = (coord_x as u32, coord_y as u32, coord_z as u32);
    let sky = chunk.skylight(x, y, z).unwrap_or(15) as f32;
    let block = chunk.blocklight(x, y, z).unwrap_or(0) as f32;

    let sky = sky_percent * sky / 15.0;
    let block = block_percent * block / 15.0;

    let gamma = sky.max(block);
    0.75 * gamma + 0.25 * (y as f32 / chunk.height() as f32)
}
