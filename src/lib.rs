//! The `cloud24` icon font in the LVGL "format-text" bitmap layout.
//!
//! [`CLOUD24`] is a plain `static`: glyph bitmaps, glyph descriptors and the
//! code-point map are compiled into flash, and the only mutable state is the
//! last-letter cache that 8.x layouts keep inside the descriptor.
//!
//! ```
//! use cloud_icon_font::CLOUD24;
//!
//! assert_eq!(CLOUD24.glyph_id('\u{F0C2}'), 1);
//! assert_eq!(CLOUD24.letter_width('\u{F0C2}', None), 30);
//! ```
//!
//! The struct shape follows the toolkit version picked with one of the
//! `lvgl-*` features (`lvgl-v8` by default); see [`version`].

#![cfg_attr(not(test), no_std)]

pub mod bitmap;
#[cfg(feature = "lvgl-v8")]
pub mod cache;
#[cfg(feature = "cloud24")]
pub mod cloud24;
pub mod fmt_txt;
pub mod font;
pub mod version;

pub use bitmap::{Bpp, GlyphBitmap};
#[cfg(feature = "cloud24")]
pub use cloud24::CLOUD24;
pub use font::{
    Font, FontError, GlyphMetrics, GlyphSource, ResolvedGlyph, Subpx, Underline, MAX_FALLBACK_DEPTH,
};
