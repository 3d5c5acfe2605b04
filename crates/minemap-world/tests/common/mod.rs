use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};

static SCRATCH_COUNTER: AtomicU32 = AtomicU32::new(0);

/// A unique directory under the system temp dir for one test.
pub fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "minemap-world-{}-{}-{}",
        label,
        std::process::id(),
        SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn named_tag(type_id: u8, name: &str, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![type_id];
    out.extend_from_slice(&(name.len() as i16).to_be_bytes());
    out.extend_from_slice(name.as_bytes());
    out.extend_from_slice(payload);
    out
}

pub fn int_tag(name: &str, value: i32) -> Vec<u8> {
    named_tag(3, name, &value.to_be_bytes())
}

pub fn string_tag(name: &str, value: &str) -> Vec<u8> {
    let mut payload = (value.len() as i16).to_be_bytes().to_vec();
    payload.extend_from_slice(value.as_bytes());
    named_tag(8, name, &payload)
}

pub fn byte_array_tag(name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut payload = (bytes.len() as i32).to_be_bytes().to_vec();
    payload.extend_from_slice(bytes);
    named_tag(7, name, &payload)
}

pub fn compound_tag(name: &str, children: &[Vec<u8>]) -> Vec<u8> {
    let mut payload = Vec::new();
    for child in children {
        payload.extend_from_slice(child);
    }
    payload.push(0);
    named_tag(10, name, &payload)
}

/// A well-formed `Level` compound for a chunk of the given height.
pub fn level_compound(x: i32, z: i32, height: usize, block_fill: u8) -> Vec<u8> {
    let area = 256;
    compound_tag(
        "Level",
        &[
            int_tag("xPos", x),
            int_tag("zPos", z),
            byte_array_tag("Blocks", &vec![block_fill; area * height]),
            byte_array_tag("Data", &vec![0; area * height / 2]),
            byte_array_tag("SkyLight", &vec![0xFF; area * height / 2]),
            byte_array_tag("BlockLight", &vec![0; area * height / 2]),
            byte_array_tag("HeightMap", &vec![(height - 1) as u8; area]),
        ],
    )
}

pub fn write_gzip(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap();
}
