//! Toolkit layout selected at build time.
//!
//! The font structs grow fields between toolkit releases. Each `lvgl-*`
//! feature picks one struct shape; the fields themselves are gated with
//! `#[cfg(feature = ...)]` where they are declared.

use core::fmt::Display;

#[cfg(not(any(
    feature = "lvgl-v6-0",
    feature = "lvgl-v7",
    feature = "lvgl-v7-4",
    feature = "lvgl-v8",
    feature = "lvgl-v9"
)))]
compile_error!("select one toolkit layout: lvgl-v6-0, lvgl-v7, lvgl-v7-4, lvgl-v8 or lvgl-v9");

#[cfg(any(
    all(feature = "lvgl-v6-0", any(feature = "lvgl-v7", feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9")),
    all(feature = "lvgl-v7", any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9")),
    all(feature = "lvgl-v7-4", any(feature = "lvgl-v8", feature = "lvgl-v9")),
    all(feature = "lvgl-v8", feature = "lvgl-v9"),
))]
compile_error!("toolkit layout features are mutually exclusive; disable default features to pick another");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LvglVersion {
    /// 6.0: no subpixel mode, no underline metrics.
    V6_0,
    /// 6.1 up to 7.3.
    V7,
    /// 7.4 and later 7.x.
    V7_4,
    V8,
    V9,
}

impl LvglVersion {
    pub const fn has_subpx(self) -> bool {
        !matches!(self, LvglVersion::V6_0)
    }

    pub const fn has_underline(self) -> bool {
        matches!(self, LvglVersion::V7_4 | LvglVersion::V8 | LvglVersion::V9)
    }

    /// Only 8.x keeps a last-letter cache in the format-text descriptor.
    pub const fn has_glyph_cache(self) -> bool {
        matches!(self, LvglVersion::V8)
    }
}

impl Display for LvglVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LvglVersion::V6_0 => write!(f, "6.0"),
            LvglVersion::V7 => write!(f, "7.x (< 7.4)"),
            LvglVersion::V7_4 => write!(f, "7.4+"),
            LvglVersion::V8 => write!(f, "8.x"),
            LvglVersion::V9 => write!(f, "9.x"),
        }
    }
}

#[cfg(feature = "lvgl-v6-0")]
pub const TARGET: LvglVersion = LvglVersion::V6_0;
#[cfg(feature = "lvgl-v7")]
pub const TARGET: LvglVersion = LvglVersion::V7;
#[cfg(feature = "lvgl-v7-4")]
pub const TARGET: LvglVersion = LvglVersion::V7_4;
#[cfg(feature = "lvgl-v8")]
pub const TARGET: LvglVersion = LvglVersion::V8;
#[cfg(feature = "lvgl-v9")]
pub const TARGET: LvglVersion = LvglVersion::V9;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_matches_enabled_features() {
        assert_eq!(TARGET.has_subpx(), cfg!(not(feature = "lvgl-v6-0")));
        assert_eq!(
            TARGET.has_underline(),
            cfg!(any(feature = "lvgl-v7-4", feature = "lvgl-v8", feature = "lvgl-v9"))
        );
        assert_eq!(TARGET.has_glyph_cache(), cfg!(feature = "lvgl-v8"));
    }

    #[test]
    fn capability_table() {
        assert!(!LvglVersion::V6_0.has_subpx());
        assert!(!LvglVersion::V6_0.has_underline());
        assert!(LvglVersion::V7.has_subpx());
        assert!(!LvglVersion::V7.has_underline());
        assert!(LvglVersion::V7_4.has_underline());
        assert!(!LvglVersion::V7_4.has_glyph_cache());
        assert!(LvglVersion::V8.has_glyph_cache());
        assert!(!LvglVersion::V9.has_glyph_cache());
        assert!(LvglVersion::V9.has_underline());
    }
}
