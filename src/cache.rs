use core::cell::Cell;
use core::fmt::Display;

use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};
use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachedGlyph {
    pub letter: u32,
    pub glyph_id: u32,
}

impl Display for CachedGlyph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "U+{:04X} -> glyph {}", self.letter, self.glyph_id)
    }
}

/// Remembers the last letter looked up in a format-text font.
///
/// Text is mostly runs of the same few letters, so a single slot catches
/// repeated lookups. The slot is filled lazily on first use and lives in a
/// `static` next to the font tables.
pub struct GlyphCache {
    slot: Mutex<CriticalSectionRawMutex, Cell<Option<CachedGlyph>>>,
}

impl GlyphCache {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(None)),
        }
    }

    pub fn get(&self, letter: u32) -> Option<u32> {
        let hit = self
            .slot
            .lock(|slot| slot.get())
            .filter(|cached| cached.letter == letter)
            .map(|cached| cached.glyph_id);

        if hit.is_some() {
            trace!("glyph cache hit for U+{:04X}", letter);
        }

        hit
    }

    pub fn store(&self, letter: u32, glyph_id: u32) {
        let entry = CachedGlyph { letter, glyph_id };
        trace!("glyph cache fill: {}", entry);
        self.slot.lock(|slot| slot.set(Some(entry)));
    }

    pub fn last(&self) -> Option<CachedGlyph> {
        self.slot.lock(|slot| slot.get())
    }

    pub fn clear(&self) {
        self.slot.lock(|slot| slot.set(None));
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_until_stored() {
        let cache = GlyphCache::new();
        assert_eq!(cache.get(0xF0C2), None);
        assert_eq!(cache.last(), None);
    }

    #[test]
    fn keeps_only_the_last_letter() {
        let cache = GlyphCache::new();
        cache.store(0x41, 3);
        assert_eq!(cache.get(0x41), Some(3));

        cache.store(0x42, 4);
        assert_eq!(cache.get(0x41), None);
        assert_eq!(cache.get(0x42), Some(4));
        assert_eq!(
            cache.last(),
            Some(CachedGlyph {
                letter: 0x42,
                glyph_id: 4
            })
        );

        cache.clear();
        assert_eq!(cache.get(0x42), None);
    }

    #[test]
    fn caches_misses_too() {
        let cache = GlyphCache::new();
        cache.store(0x20, 0);
        assert_eq!(cache.get(0x20), Some(0));
    }

    #[test]
    fn usable_from_a_static() {
        static CACHE: GlyphCache = GlyphCache::new();
        CACHE.store(7, 1);
        assert_eq!(CACHE.get(7), Some(1));
    }
}
