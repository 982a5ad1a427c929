//! The "format-text" bitmap font layout: a shared packed bitmap, one
//! descriptor per glyph, code-point maps and optional kerning.
//!
//! Glyph id 0 is reserved for "no glyph" in every table.

use core::ops::Range;

use embedded_graphics::prelude::Size;
use log::warn;

use crate::bitmap::{Bpp, GlyphBitmap};
#[cfg(feature = "lvgl-v8")]
use crate::cache::GlyphCache;
use crate::font::{FontError, GlyphMetrics, GlyphSource};

/// Stored metrics of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphDsc {
    /// Byte offset of the glyph's pixels in the shared bitmap.
    pub bitmap_index: u32,
    /// Advance width in 1/16 px.
    pub adv_w: u32,
    pub box_w: u8,
    pub box_h: u8,
    pub ofs_x: i8,
    pub ofs_y: i8,
}

impl GlyphDsc {
    pub const RESERVED: GlyphDsc = GlyphDsc {
        bitmap_index: 0,
        adv_w: 0,
        box_w: 0,
        box_h: 0,
        ofs_x: 0,
        ofs_y: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmapType {
    /// Consecutive code points map to consecutive glyph ids.
    Format0Tiny,
    /// Consecutive code points, per-code-point `u8` glyph id offsets.
    Format0Full,
    /// Listed code points map to consecutive glyph ids.
    SparseTiny,
    /// Listed code points, per-entry `u16` glyph id offsets.
    SparseFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphIdOfs {
    None,
    U8(&'static [u8]),
    U16(&'static [u16]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cmap {
    pub range_start: u32,
    /// Number of code points covered, starting at `range_start`.
    pub range_length: u16,
    pub glyph_id_start: u16,
    /// Sorted code points relative to `range_start` (sparse formats).
    pub unicode_list: &'static [u16],
    pub glyph_id_ofs_list: GlyphIdOfs,
    pub list_length: u16,
    pub kind: CmapType,
}

impl Cmap {
    /// Glyph id for `letter` if it falls in this map.
    pub fn glyph_id(&self, letter: u32) -> Option<u32> {
        let rcp = letter.checked_sub(self.range_start)?;
        if rcp >= u32::from(self.range_length) {
            return None;
        }

        let start = u32::from(self.glyph_id_start);
        match (self.kind, self.glyph_id_ofs_list) {
            (CmapType::Format0Tiny, _) => Some(start + rcp),
            (CmapType::Format0Full, GlyphIdOfs::U8(ofs)) => {
                ofs.get(rcp as usize).map(|&o| start + u32::from(o))
            }
            (CmapType::SparseTiny, _) => self.sparse_index(rcp).map(|i| start + i as u32),
            (CmapType::SparseFull, GlyphIdOfs::U16(ofs)) => {
                let index = self.sparse_index(rcp)?;
                ofs.get(index).map(|&o| start + u32::from(o))
            }
            _ => None,
        }
    }

    fn sparse_list(&self) -> &'static [u16] {
        let list = self.unicode_list;
        &list[..usize::from(self.list_length).min(list.len())]
    }

    fn sparse_index(&self, rcp: u32) -> Option<usize> {
        let rcp = u16::try_from(rcp).ok()?;
        self.sparse_list().binary_search(&rcp).ok()
    }

    /// Largest glyph id this map can produce.
    fn max_glyph_id(&self) -> Option<u32> {
        let start = u32::from(self.glyph_id_start);
        let last = match (self.kind, self.glyph_id_ofs_list) {
            (CmapType::Format0Tiny, _) => u32::from(self.range_length).checked_sub(1)?,
            (CmapType::Format0Full, GlyphIdOfs::U8(ofs)) => u32::from(*ofs.iter().max()?),
            (CmapType::SparseTiny, _) => u32::from(self.list_length).checked_sub(1)?,
            (CmapType::SparseFull, GlyphIdOfs::U16(ofs)) => u32::from(*ofs.iter().max()?),
            _ => return None,
        };
        Some(start + last)
    }

    fn validate(&self, index: usize, glyphs: usize) -> Result<(), FontError> {
        let mismatch = FontError::CmapListMismatch { cmap: index };
        let list_length = usize::from(self.list_length);
        let sorted = self.unicode_list.windows(2).all(|w| w[0] < w[1]);

        let spans = match (self.kind, self.glyph_id_ofs_list) {
            (CmapType::Format0Tiny, GlyphIdOfs::None) if self.unicode_list.is_empty() => {
                usize::from(self.range_length)
            }
            (CmapType::Format0Full, GlyphIdOfs::U8(ofs))
                if self.unicode_list.is_empty() && ofs.len() == usize::from(self.range_length) =>
            {
                usize::from(self.range_length)
            }
            (CmapType::SparseTiny, GlyphIdOfs::None)
                if sorted && self.unicode_list.len() == list_length =>
            {
                list_length
            }
            (CmapType::SparseFull, GlyphIdOfs::U16(ofs))
                if sorted && self.unicode_list.len() == list_length && ofs.len() == list_length =>
            {
                list_length
            }
            _ => return Err(mismatch),
        };

        if spans > glyphs.saturating_sub(1) {
            return Err(FontError::CmapRangeTooLong {
                cmap: index,
                range_length: self.range_length,
                glyphs,
            });
        }

        if self
            .sparse_list()
            .last()
            .is_some_and(|&last| u32::from(last) >= u32::from(self.range_length))
        {
            return Err(mismatch);
        }

        match self.max_glyph_id() {
            Some(glyph_id) if glyph_id as usize >= glyphs => Err(FontError::CmapGlyphOutOfRange {
                cmap: index,
                glyph_id,
            }),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernPair {
    pub left: u16,
    pub right: u16,
    /// Adjustment in 1/16 px before `kern_scale` is applied.
    pub value: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernClasses {
    /// Class of each glyph id on the left side, 0 for "no class".
    pub left_class_mapping: &'static [u8],
    pub right_class_mapping: &'static [u8],
    /// `left_class_cnt` rows of `right_class_cnt` values.
    pub class_pair_values: &'static [i8],
    pub left_class_cnt: u8,
    pub right_class_cnt: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kerning {
    None,
    /// Sorted by `(left, right)`.
    Pairs(&'static [KernPair]),
    Classes(KernClasses),
}

impl Kerning {
    pub fn value(&self, left: u32, right: u32) -> i8 {
        match self {
            Kerning::None => 0,
            Kerning::Pairs(pairs) => {
                let (Ok(left), Ok(right)) = (u16::try_from(left), u16::try_from(right)) else {
                    return 0;
                };
                pairs
                    .binary_search_by_key(&(left, right), |p| (p.left, p.right))
                    .map(|i| pairs[i].value)
                    .unwrap_or(0)
            }
            Kerning::Classes(classes) => {
                let class_of = |map: &[u8], id: u32| map.get(id as usize).copied().unwrap_or(0);
                let left_class = class_of(classes.left_class_mapping, left);
                let right_class = class_of(classes.right_class_mapping, right);
                if left_class == 0
                    || right_class == 0
                    || left_class > classes.left_class_cnt
                    || right_class > classes.right_class_cnt
                {
                    return 0;
                }

                let index = usize::from(left_class - 1) * usize::from(classes.right_class_cnt)
                    + usize::from(right_class - 1);
                classes.class_pair_values.get(index).copied().unwrap_or(0)
            }
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Kerning::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFormat {
    /// Uncompressed, glyph pixels packed back to back.
    Plain,
}

/// Everything a format-text font stores.
pub struct FontDsc {
    pub glyph_bitmap: &'static [u8],
    pub glyph_dsc: &'static [GlyphDsc],
    pub cmaps: &'static [Cmap],
    pub kern: Kerning,
    /// 12.4 fixed point, 16 is 1.0.
    pub kern_scale: u16,
    pub bpp: Bpp,
    pub bitmap_format: BitmapFormat,
    #[cfg(feature = "lvgl-v8")]
    pub cache: GlyphCache,
}

impl FontDsc {
    pub fn glyph(&self, glyph_id: u32) -> Result<&GlyphDsc, FontError> {
        self.glyph_dsc
            .get(glyph_id as usize)
            .ok_or(FontError::InvalidGlyphId(glyph_id))
    }

    /// Byte range of the glyph's pixels in [`FontDsc::glyph_bitmap`].
    pub fn bitmap_range(&self, glyph_id: u32) -> Result<Range<usize>, FontError> {
        let gdsc = self.glyph(glyph_id)?;
        let start = gdsc.bitmap_index as usize;
        let end = start
            .checked_add(self.bpp.packed_len(u32::from(gdsc.box_w), u32::from(gdsc.box_h)))
            .unwrap_or(usize::MAX);
        if end > self.glyph_bitmap.len() {
            warn!(
                "bitmap of glyph {} ends at {}, past the {} byte buffer",
                glyph_id,
                end,
                self.glyph_bitmap.len()
            );
            return Err(FontError::BitmapOutOfBounds {
                glyph_id,
                end,
                len: self.glyph_bitmap.len(),
            });
        }

        Ok(start..end)
    }

    /// Checks the table invariants: reserved glyph 0, code-point maps that
    /// stay inside the glyph array, and a bitmap buffer sized exactly for
    /// the glyphs.
    pub fn validate(&self) -> Result<(), FontError> {
        let reserved = self.glyph(0)?;
        if *reserved != GlyphDsc::RESERVED {
            return Err(FontError::ReservedGlyphNotEmpty);
        }

        let glyphs = self.glyph_dsc.len();
        for (index, cmap) in self.cmaps.iter().enumerate() {
            cmap.validate(index, glyphs)?;
        }

        let mut expected = 0;
        for glyph_id in 0..glyphs as u32 {
            expected += self.bitmap_range(glyph_id)?.len();
        }
        if expected != self.glyph_bitmap.len() {
            return Err(FontError::BitmapSizeMismatch {
                expected,
                actual: self.glyph_bitmap.len(),
            });
        }

        Ok(())
    }

    fn lookup(&self, letter: u32) -> u32 {
        #[cfg(feature = "lvgl-v8")]
        if let Some(glyph_id) = self.cache.get(letter) {
            return glyph_id;
        }

        let glyph_id = self
            .cmaps
            .iter()
            .find_map(|cmap| cmap.glyph_id(letter))
            .unwrap_or(0);

        #[cfg(feature = "lvgl-v8")]
        self.cache.store(letter, glyph_id);

        glyph_id
    }

    /// Kerning between two letters in 1/16 px, already scaled.
    fn kern_adjust(&self, glyph_id: u32, next: Option<char>) -> i32 {
        let Some(next) = next else {
            return 0;
        };
        if self.kern.is_none() {
            return 0;
        }

        match self.lookup(next as u32) {
            0 => 0,
            next_id => {
                let value = i32::from(self.kern.value(glyph_id, next_id));
                (value * i32::from(self.kern_scale)) >> 4
            }
        }
    }
}

impl GlyphSource for FontDsc {
    fn glyph_id(&self, letter: char) -> u32 {
        self.lookup(letter as u32)
    }

    fn glyph_dsc(&self, letter: char, next: Option<char>) -> Option<GlyphMetrics> {
        // A tab is drawn as two spaces.
        let is_tab = letter == '\t';
        let letter = if is_tab { ' ' } else { letter };
        let scale: u16 = if is_tab { 2 } else { 1 };

        let glyph_id = self.lookup(letter as u32);
        if glyph_id == 0 {
            return None;
        }
        let gdsc = self.glyph(glyph_id).ok()?;

        let adv_w = i64::from(gdsc.adv_w) * i64::from(scale)
            + i64::from(self.kern_adjust(glyph_id, next));
        let adv_w = ((adv_w + 8) >> 4).clamp(0, i64::from(u16::MAX)) as u16;

        Some(GlyphMetrics {
            glyph_id,
            adv_w,
            box_w: u16::from(gdsc.box_w) * scale,
            box_h: u16::from(gdsc.box_h),
            ofs_x: i16::from(gdsc.ofs_x),
            ofs_y: i16::from(gdsc.ofs_y),
            bpp: self.bpp,
            is_placeholder: false,
        })
    }

    fn glyph_bitmap(&self, glyph_id: u32) -> Result<GlyphBitmap<'_>, FontError> {
        let gdsc = self.glyph(glyph_id)?;
        let range = self.bitmap_range(glyph_id)?;
        let size = Size::new(u32::from(gdsc.box_w), u32::from(gdsc.box_h));

        match self.bitmap_format {
            BitmapFormat::Plain => Ok(GlyphBitmap::new(
                &self.glyph_bitmap[range],
                size,
                self.bpp,
            )),
        }
    }
}
