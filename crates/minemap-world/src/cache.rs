use crate::chunk::Chunk;

/// Bounded chunk storage for renderers. A slot distinguishes "never filled"
/// (`None`) from "filled with a chunk that failed to load" (`Some(None)`),
/// so negative lookups are cached and not retried within a tile.
pub trait ChunkCache {
    fn get(&self, key: i64) -> Option<Option<&Chunk>>;
    fn set(&mut self, key: i64, chunk: Option<Chunk>);
    fn empty(&mut self);
}

/// A fixed-capacity cache addressed directly by small non-negative keys.
/// Keys outside the slab are ignored on `set` and miss on `get`.
pub struct SlabCache {
    slots: Vec<Option<Option<Chunk>>>,
}

impl SlabCache {
    pub fn new(size: usize) -> SlabCache {
        let mut slots = Vec::with_capacity(size);
        slots.resize_with(size, || None);
        SlabCache { slots }
    }

    pub fn size(&self) -> usize {
        self.slots.len()
    }
}

impl ChunkCache for SlabCache {
    fn get(&self, key: i64) -> Option<Option<&Chunk>> {
        let slot = usize::try_from(key).ok()?;
        match self.slots.get(slot) {
            Some(Some(value)) => Some(value.as_ref()),
            _ => None,
        }
    }

    fn set(&mut self, key: i64, chunk: Option<Chunk>) {
        if let Ok(slot) = usize::try_from(key) {
            if let Some(entry) = self.slots.get_mut(slot) {
                *entry = Some(chunk);
            }
        }
    }

    fn empty(&mut self) {
        for entry in &mut self.slots {
            *entry = None;
        }
    }
}
