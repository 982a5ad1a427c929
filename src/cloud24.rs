// GENERATED CODE from an lv_font_conv export (cloud24, 24 px, 2 bpp)
//
// Glyphs: U+F0C2 (cloud).
// Only the tables and the final CLOUD24 handle are emitted; the decoding
// lives in `fmt_txt`.
//
pub use unformatted::{CLOUD24, FONT_DSC, GLYPH_BITMAP, GLYPH_DSC};
#[rustfmt::skip]
mod unformatted {
    use crate::bitmap::Bpp;
    #[cfg(feature = "lvgl-v8")]
    use crate::cache::GlyphCache;
    use crate::fmt_txt::{BitmapFormat, Cmap, CmapType, FontDsc, GlyphDsc, GlyphIdOfs, Kerning};
    #[cfg(not(feature = "lvgl-v6-0"))]
    use crate::font::Subpx;
    use crate::font::Font;

    /// Store the image of the glyphs
    pub static GLYPH_BITMAP: [u8; 165] = [
        /* U+F0C2 "" */
        0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0, 0x0,
        0x0, 0x7, 0xff, 0xd0, 0x0, 0x0, 0x0, 0x0,
        0x2, 0xff, 0xff, 0x80, 0x0, 0x0, 0x0, 0x0,
        0xff, 0xff, 0xff, 0x0, 0x0, 0x0, 0x0, 0x1f,
        0xff, 0xff, 0xfb, 0xfe, 0x0, 0x0, 0x3, 0xff,
        0xff, 0xff, 0xff, 0xf8, 0x0, 0x0, 0x7f, 0xff,
        0xff, 0xff, 0xff, 0xc0, 0x0, 0x7, 0xff, 0xff,
        0xff, 0xff, 0xfd, 0x0, 0x0, 0xbf, 0xff, 0xff,
        0xff, 0xff, 0xd0, 0x0, 0x7f, 0xff, 0xff, 0xff,
        0xff, 0xfd, 0x0, 0x1f, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xf8, 0x3, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xf4, 0xbf, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xcf, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfb,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0x3f,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xd1, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xf8, 0x3, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xfe, 0x0, 0x6, 0xaa,
        0xaa, 0xaa, 0xaa, 0xaa, 0x0
    ];

    pub static GLYPH_DSC: [GlyphDsc; 2] = [
        GlyphDsc::RESERVED /* id = 0 reserved */,
        GlyphDsc { bitmap_index: 0, adv_w: 480, box_w: 30, box_h: 22, ofs_x: 0, ofs_y: -2 }
    ];

    const _: () = assert!(Bpp::Two.packed_len(30, 22) == 165);

    /// Collect the unicode lists and glyph_id offsets
    static CMAPS: [Cmap; 1] = [
        Cmap {
            range_start: 61634, range_length: 1, glyph_id_start: 1,
            unicode_list: &[], glyph_id_ofs_list: GlyphIdOfs::None, list_length: 0, kind: CmapType::Format0Tiny
        }
    ];

    pub static FONT_DSC: FontDsc = FontDsc {
        glyph_bitmap: &GLYPH_BITMAP,
        glyph_dsc: &GLYPH_DSC,
        cmaps: &CMAPS,
        kern: Kerning::None,
        kern_scale: 0,
        bpp: Bpp::Two,
        bitmap_format: BitmapFormat::Plain,
        #[cfg(feature = "lvgl-v8")]
        cache: GlyphCache::new(),
    };

    /// 24 px cloud icon, U+F0C2.
    pub static CLOUD24: Font = Font {
        glyphs: &FONT_DSC,
        line_height: 22,
        base_line: 2,
        #[cfg(not(feature = "lvgl-v6-0"))]
        subpx: Subpx::None,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_position: -9,
        #[cfg(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))]
        underline_thickness: 1,
        fallback: None,
    };
}
