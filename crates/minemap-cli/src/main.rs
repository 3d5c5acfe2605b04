use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use minemap_common::{MinemapError, TilePos};
use minemap_logger::{log, LogSeverity};
use minemap_render::{render_tile, ColorMap, FlatRenderer};
use minemap_world::Level;

/// Renders top-down map tiles from a voxel world directory.
#[derive(Parser)]
#[command(name = "minemap", version, about)]
struct Cli {
    /// Path to the world directory
    input_path: PathBuf,

    /// X coordinate of the tile to render
    #[arg(default_value_t = 0)]
    tile_x: i32,

    /// Z coordinate of the tile to render
    #[arg(default_value_t = 0)]
    tile_z: i32,

    /// Where to write the rendered PNG
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(path) => {
            log(
                format!("Tile written to {}", path.display()),
                LogSeverity::Info,
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log(format!("{}", err), LogSeverity::Fatal);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> minemap_common::Result<PathBuf> {
    let tile = TilePos {
        x: cli.tile_x,
        z: cli.tile_z,
    };
    let output = match cli.output {
        Some(path) => path,
        None => default_output_path(tile),
    };

    log(
        format!("Loading level at {}", cli.input_path.display()),
        LogSeverity::Info,
    );
    let level =
        Level::load(cli.input_path).map_err(|err| MinemapError::WorldError(err.to_string()))?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    log(
        format!("Rendering tile ({}, {})", tile.x, tile.z),
        LogSeverity::Info,
    );
    let mut renderer = FlatRenderer::new(&level, ColorMap::hardcoded());
    render_tile(&mut renderer, tile, &output)
        .map_err(|err| MinemapError::RenderError(err.to_string()))?;

    Ok(output)
}

fn default_output_path(tile: TilePos) -> PathBuf {
    PathBuf::from(format!(
        "images/minemap_{}_{}_{}.png",
        minemap_logger::time::filename_timestamp(),
        tile.x,
        tile.z
    ))
}
