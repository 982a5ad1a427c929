use core::fmt::Display;

use log::debug;

use crate::bitmap::{Bpp, GlyphBitmap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    /// The glyph id has no descriptor.
    InvalidGlyphId(u32),
    /// A glyph's packed pixels run past the end of the bitmap buffer.
    BitmapOutOfBounds { glyph_id: u32, end: usize, len: usize },
    /// Glyph 0 must stay the all-zero "missing glyph" entry.
    ReservedGlyphNotEmpty,
    CmapRangeTooLong { cmap: usize, range_length: u16, glyphs: usize },
    CmapListMismatch { cmap: usize },
    CmapGlyphOutOfRange { cmap: usize, glyph_id: u32 },
    BitmapSizeMismatch { expected: usize, actual: usize },
}

impl Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FontError::InvalidGlyphId(id) => write!(f, "no descriptor for glyph {}", id),
            FontError::BitmapOutOfBounds { glyph_id, end, len } => write!(
                f,
                "bitmap of glyph {} ends at byte {}, buffer has {}",
                glyph_id, end, len
            ),
            FontError::ReservedGlyphNotEmpty => write!(f, "glyph 0 is reserved and must be empty"),
            FontError::CmapRangeTooLong {
                cmap,
                range_length,
                glyphs,
            } => write!(
                f,
                "cmap {} spans {} code points but the font has {} glyphs",
                cmap, range_length, glyphs
            ),
            FontError::CmapListMismatch { cmap } => {
                write!(f, "cmap {} lists do not match its format", cmap)
            }
            FontError::CmapGlyphOutOfRange { cmap, glyph_id } => {
                write!(f, "cmap {} maps to missing glyph {}", cmap, glyph_id)
            }
            FontError::BitmapSizeMismatch { expected, actual } => write!(
                f,
                "glyphs need {} bitmap bytes, buffer has {}",
                expected, actual
            ),
        }
    }
}

/// Subpixel rendering mode the bitmaps were produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Subpx {
    #[default]
    None,
    Hor,
    Ver,
    Both,
}

/// Metrics of one glyph, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub glyph_id: u32,
    pub adv_w: u16,
    pub box_w: u16,
    pub box_h: u16,
    pub ofs_x: i16,
    pub ofs_y: i16,
    pub bpp: Bpp,
    pub is_placeholder: bool,
}

/// Decoder for one font data format.
///
/// A font's data is only ever read through these calls, so the same
/// [`Font`] handle works for any table layout that implements them.
pub trait GlyphSource {
    /// Glyph id of `letter`, 0 when the font has no glyph for it.
    fn glyph_id(&self, letter: char) -> u32;

    /// Metrics for `letter`; `next` is the following letter, for kerning.
    fn glyph_dsc(&self, letter: char, next: Option<char>) -> Option<GlyphMetrics>;

    fn glyph_bitmap(&self, glyph_id: u32) -> Result<GlyphBitmap<'_>, FontError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Underline {
    /// Distance from the baseline, negative below it.
    pub position: i8,
    pub thickness: i8,
}

/// Fallback fonts consulted after the primary one.
pub const MAX_FALLBACK_DEPTH: usize = 8;

/// A font as handed to the GUI: line metrics, the glyph decoder and an
/// optional fallback consulted for letters this font lacks.
pub struct Font {
    pub glyphs: &'static (dyn GlyphSource + Sync),
    /// The maximum line height required by the font.
    pub line_height: i16,
    /// Baseline measured from the bottom of the line.
    pub base_line: i16,
    #[cfg(not(feature = "lvgl-v6-0"))]
    pub subpx: Subpx,
    #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
    pub underline_position: i8,
    #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
    pub underline_thickness: i8,
    pub fallback: Option<&'static Font>,
}

/// Glyph metrics together with the font in the fallback chain that has it.
#[derive(Clone, Copy)]
pub struct ResolvedGlyph<'a> {
    pub font: Option<&'a Font>,
    pub metrics: GlyphMetrics,
}

impl<'a> ResolvedGlyph<'a> {
    /// Pixels of the glyph. Placeholders have no bitmap.
    pub fn bitmap(&self) -> Result<Option<GlyphBitmap<'a>>, FontError> {
        match self.font {
            Some(font) => font.glyphs.glyph_bitmap(self.metrics.glyph_id).map(Some),
            None => Ok(None),
        }
    }
}

impl Font {
    /// Glyph id of `letter` in this font alone, 0 when missing.
    pub fn glyph_id(&self, letter: char) -> u32 {
        self.glyphs.glyph_id(letter)
    }

    /// First font in the fallback chain that has `letter`, with its glyph id.
    pub fn resolve(&self, letter: char) -> Option<(&Font, u32)> {
        self.chain().find_map(|font| match font.glyph_id(letter) {
            0 => None,
            id => Some((font, id)),
        })
    }

    pub fn glyph_dsc(&self, letter: char, next: Option<char>) -> ResolvedGlyph<'_> {
        for (depth, font) in self.chain().enumerate() {
            if let Some(metrics) = font.glyphs.glyph_dsc(letter, next) {
                if depth > 0 {
                    debug!("U+{:04X} resolved by fallback #{}", letter as u32, depth);
                }
                return ResolvedGlyph {
                    font: Some(font),
                    metrics,
                };
            }
        }

        debug!("no glyph for U+{:04X}, using placeholder", letter as u32);
        ResolvedGlyph {
            font: None,
            metrics: self.placeholder(letter),
        }
    }

    /// Advance width of `letter` in pixels, kerned against `next`.
    pub fn letter_width(&self, letter: char, next: Option<char>) -> u16 {
        self.glyph_dsc(letter, next).metrics.adv_w
    }

    pub fn line_height(&self) -> i16 {
        self.line_height
    }

    pub fn base_line(&self) -> i16 {
        self.base_line
    }

    #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
    pub fn underline(&self) -> Option<Underline> {
        Some(Underline {
            position: self.underline_position,
            thickness: self.underline_thickness,
        })
    }

    #[cfg(not(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9")))]
    pub fn underline(&self) -> Option<Underline> {
        None
    }

    #[cfg(not(feature = "lvgl-v6-0"))]
    pub fn subpx(&self) -> Subpx {
        self.subpx
    }

    #[cfg(feature = "lvgl-v6-0")]
    pub fn subpx(&self) -> Subpx {
        Subpx::None
    }

    /// This font and its fallbacks, at most [`MAX_FALLBACK_DEPTH`] deep so
    /// fonts that fall back to each other cannot loop forever.
    fn chain(&self) -> impl Iterator<Item = &Font> {
        core::iter::successors(Some(self), |font| font.fallback.map(|f| f as &Font))
            .take(MAX_FALLBACK_DEPTH + 1)
    }

    /// Box drawn for letters no font in the chain has. Control and
    /// zero-width letters get an empty one.
    fn placeholder(&self, letter: char) -> GlyphMetrics {
        let printable = letter >= ' ' && letter != '\u{F8FF}' && letter != '\u{200C}';
        let line_height = self.line_height.max(0) as u16;
        let (box_w, adv_w) = if printable {
            let box_w = line_height / 2;
            (box_w, box_w + 2)
        } else {
            (0, 0)
        };

        GlyphMetrics {
            glyph_id: 0,
            adv_w,
            box_w,
            box_h: line_height,
            ofs_x: 0,
            ofs_y: 0,
            bpp: Bpp::One,
            is_placeholder: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::Size;

    static DOT: [u8; 1] = [0xC0];

    /// Knows exactly one letter, drawn as a single opaque 2 bpp pixel.
    struct OneLetter(char);

    impl GlyphSource for OneLetter {
        fn glyph_id(&self, letter: char) -> u32 {
            if letter == self.0 {
                1
            } else {
                0
            }
        }

        fn glyph_dsc(&self, letter: char, _next: Option<char>) -> Option<GlyphMetrics> {
            (letter == self.0).then_some(GlyphMetrics {
                glyph_id: 1,
                adv_w: 5,
                box_w: 1,
                box_h: 1,
                ofs_x: 0,
                ofs_y: 0,
                bpp: Bpp::Two,
                is_placeholder: false,
            })
        }

        fn glyph_bitmap(&self, glyph_id: u32) -> Result<GlyphBitmap<'_>, FontError> {
            match glyph_id {
                0 => Ok(GlyphBitmap::empty(Bpp::Two)),
                1 => Ok(GlyphBitmap::new(&DOT, Size::new(1, 1), Bpp::Two)),
                id => Err(FontError::InvalidGlyphId(id)),
            }
        }
    }

    static LETTER_A: OneLetter = OneLetter('a');
    static LETTER_B: OneLetter = OneLetter('b');

    static FALLBACK: Font = Font {
        glyphs: &LETTER_B,
        line_height: 10,
        base_line: 2,
        #[cfg(not(feature = "lvgl-v6-0"))]
        subpx: Subpx::None,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_position: -1,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_thickness: 1,
        fallback: None,
    };

    static PRIMARY: Font = Font {
        glyphs: &LETTER_A,
        line_height: 12,
        base_line: 3,
        #[cfg(not(feature = "lvgl-v6-0"))]
        subpx: Subpx::None,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_position: -2,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_thickness: 1,
        fallback: Some(&FALLBACK),
    };

    #[test]
    fn resolves_through_the_fallback_chain() {
        let (font, id) = PRIMARY.resolve('a').unwrap();
        assert!(core::ptr::eq(font, &PRIMARY));
        assert_eq!(id, 1);

        let (font, id) = PRIMARY.resolve('b').unwrap();
        assert!(core::ptr::eq(font, &FALLBACK));
        assert_eq!(id, 1);

        assert!(PRIMARY.resolve('c').is_none());
        assert_eq!(PRIMARY.glyph_id('b'), 0);
    }

    #[test]
    fn fallback_glyph_carries_its_font() {
        let glyph = PRIMARY.glyph_dsc('b', None);
        assert!(core::ptr::eq(glyph.font.unwrap(), &FALLBACK));
        assert!(!glyph.metrics.is_placeholder);

        let bitmap = glyph.bitmap().unwrap().unwrap();
        assert_eq!(bitmap.level(0, 0), 3);
    }

    static PING: Font = Font {
        glyphs: &LETTER_A,
        line_height: 10,
        base_line: 2,
        #[cfg(not(feature = "lvgl-v6-0"))]
        subpx: Subpx::None,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_position: -1,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_thickness: 1,
        fallback: Some(&PONG),
    };

    static PONG: Font = Font {
        glyphs: &LETTER_B,
        line_height: 10,
        base_line: 2,
        #[cfg(not(feature = "lvgl-v6-0"))]
        subpx: Subpx::None,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_position: -1,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_thickness: 1,
        fallback: Some(&PING),
    };

    #[test]
    fn cyclic_fallbacks_stop_at_the_depth_limit() {
        assert_eq!(PING.chain().count(), MAX_FALLBACK_DEPTH + 1);
        assert!(PING.resolve('c').is_none());

        let glyph = PING.glyph_dsc('c', None);
        assert!(glyph.font.is_none());
        assert!(glyph.metrics.is_placeholder);

        let (font, _) = PING.resolve('b').unwrap();
        assert!(core::ptr::eq(font, &PONG));
    }

    #[test]
    fn missing_printable_letter_gets_placeholder_box() {
        let glyph = PRIMARY.glyph_dsc('z', None);
        assert!(glyph.font.is_none());
        assert_eq!(
            glyph.metrics,
            GlyphMetrics {
                glyph_id: 0,
                adv_w: 8,
                box_w: 6,
                box_h: 12,
                ofs_x: 0,
                ofs_y: 0,
                bpp: Bpp::One,
                is_placeholder: true,
            }
        );
        assert_eq!(glyph.bitmap().unwrap(), None);
    }

    #[test]
    fn control_and_zero_width_letters_take_no_space() {
        for letter in ['\n', '\u{200C}', '\u{F8FF}'] {
            let metrics = PRIMARY.glyph_dsc(letter, None).metrics;
            assert!(metrics.is_placeholder);
            assert_eq!(metrics.adv_w, 0);
            assert_eq!(metrics.box_w, 0);
        }
    }

    #[test]
    fn letter_width_uses_resolved_metrics() {
        assert_eq!(PRIMARY.letter_width('a', None), 5);
        assert_eq!(PRIMARY.letter_width('b', Some('a')), 5);
    }

    #[test]
    fn underline_follows_layout() {
        if crate::version::TARGET.has_underline() {
            assert_eq!(
                PRIMARY.underline(),
                Some(Underline {
                    position: -2,
                    thickness: 1
                })
            );
        } else {
            assert_eq!(PRIMARY.underline(), None);
        }
        assert_eq!(PRIMARY.subpx(), Subpx::None);
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(
            FontError::InvalidGlyphId(9).to_string(),
            "no descriptor for glyph 9"
        );
        assert_eq!(
            FontError::BitmapSizeMismatch {
                expected: 165,
                actual: 164
            }
            .to_string(),
            "glyphs need 165 bitmap bytes, buffer has 164"
        );
    }
}
