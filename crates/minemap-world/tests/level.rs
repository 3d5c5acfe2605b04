mod common;

use assert_matches::assert_matches;
use common::*;
use minemap_world::chunk::ChunkError;
use minemap_world::level::{Level, LevelError};
use std::path::PathBuf;

fn write_level_dat(world: &PathBuf, seed_name: &str) {
    let data = compound_tag("", &[compound_tag("Data", &[string_tag("LevelName", seed_name)])]);
    write_gzip(&world.join("level.dat"), &data);
}

#[test]
fn test_load_unwraps_anonymous_root() {
    let world = scratch_dir("level-load");
    write_level_dat(&world, "testworld");

    let level = Level::load(&world).unwrap();
    let data = level.data().as_compound().unwrap();
    assert_eq!(
        data.get("LevelName").and_then(|t| t.as_string()),
        Some("testworld")
    );
}

#[test]
fn test_load_keeps_named_root() {
    let world = scratch_dir("level-named");
    let data = compound_tag("Data", &[string_tag("LevelName", "named")]);
    write_gzip(&world.join("level.dat"), &data);

    let level = Level::load(&world).unwrap();
    assert_eq!(
        level
            .data()
            .as_compound()
            .unwrap()
            .get("LevelName")
            .and_then(|t| t.as_string()),
        Some("named")
    );
}

#[test]
fn test_load_without_level_dat() {
    let world = scratch_dir("level-missing");
    assert_matches!(Level::load(&world), Err(LevelError::Input(_)));
}

#[test]
fn test_load_rejects_anonymous_root_without_data() {
    let world = scratch_dir("level-nodata");
    let data = compound_tag("", &[string_tag("LevelName", "x")]);
    write_gzip(&world.join("level.dat"), &data);

    assert_matches!(Level::load(&world), Err(LevelError::Tag(_)));
}

#[test]
fn test_chunk_path_layout() {
    let world = scratch_dir("level-paths");
    write_level_dat(&world, "paths");
    let level = Level::load(&world).unwrap();

    assert_eq!(level.chunk_path(0, 0), world.join("0/0/c.0.0.dat"));
    assert_eq!(level.chunk_path(63, 1), world.join("1r/1/c.1r.1.dat"));
    // Directory components use the unsigned remainder of the coordinate.
    assert_eq!(level.chunk_path(-1, 0), world.join("1r/0/c.-1.0.dat"));
}

#[test]
fn test_chunk_at_round_trip() {
    let world = scratch_dir("level-chunk");
    write_level_dat(&world, "chunks");
    let level = Level::load(&world).unwrap();

    write_gzip(&level.chunk_path(-1, 2), &level_compound(-1, 2, 8, 3));

    let chunk = level.chunk_at(-1, 2).unwrap();
    assert_eq!(chunk.coord_x(), -1);
    assert_eq!(chunk.coord_z(), 2);
    assert_eq!(chunk.height(), 8);
    assert_eq!(chunk.block(0, 0, 0), Some(3));

    assert_matches!(level.chunk_at(5, 5), Err(ChunkError::Input(_)));
}

#[test]
fn test_dimensions_scans_chunk_files() {
    let world = scratch_dir("level-dims");
    write_level_dat(&world, "dims");
    let level = Level::load(&world).unwrap();

    write_gzip(&level.chunk_path(0, 0), &level_compound(0, 0, 4, 0));
    write_gzip(&level.chunk_path(2, 3), &level_compound(2, 3, 4, 0));
    write_gzip(&level.chunk_path(-1, -2), &level_compound(-1, -2, 4, 0));

    let dims = level.dimensions().unwrap();
    assert_eq!(dims.chunk_count, 3);
    assert_eq!(dims.smallest_x, -1);
    assert_eq!(dims.smallest_z, -2);
    assert_eq!(dims.largest_x, 2);
    assert_eq!(dims.largest_z, 3);
}
