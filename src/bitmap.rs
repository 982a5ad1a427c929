use embedded_graphics::{
    image::ImageDrawable,
    pixelcolor::Gray8,
    prelude::*,
    primitives::Rectangle,
};

/// Bits per pixel of the packed glyph bitmaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bpp {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Eight = 8,
}

const OPA_1BPP: [u8; 2] = [0, 255];
const OPA_2BPP: [u8; 4] = [0, 85, 170, 255];
const OPA_3BPP: [u8; 8] = [0, 36, 73, 109, 146, 182, 219, 255];
const OPA_4BPP: [u8; 16] = [
    0, 17, 34, 51, 68, 85, 102, 119, 136, 153, 170, 187, 204, 221, 238, 255,
];

impl Bpp {
    pub const fn bits(self) -> u32 {
        self as u32
    }

    pub const fn max_level(self) -> u8 {
        ((1u16 << self.bits()) - 1) as u8
    }

    /// Opacity (0..=255) of a pixel level.
    pub fn opacity(self, level: u8) -> u8 {
        let level = level & self.max_level();
        match self {
            Bpp::One => OPA_1BPP[level as usize],
            Bpp::Two => OPA_2BPP[level as usize],
            Bpp::Three => OPA_3BPP[level as usize],
            Bpp::Four => OPA_4BPP[level as usize],
            Bpp::Eight => level,
        }
    }

    /// Bytes needed for a `width` x `height` glyph. Pixels are packed
    /// back to back; rows are not padded to a byte boundary.
    pub const fn packed_len(self, width: u32, height: u32) -> usize {
        ((width * height * self.bits()) as usize).div_ceil(8)
    }
}

/// Packed pixels of one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphBitmap<'a> {
    data: &'a [u8],
    size: Size,
    bpp: Bpp,
}

impl<'a> GlyphBitmap<'a> {
    /// `data` must hold at least `bpp.packed_len(size.width, size.height)` bytes;
    /// missing bytes read as transparent.
    pub const fn new(data: &'a [u8], size: Size, bpp: Bpp) -> Self {
        Self { data, size, bpp }
    }

    pub const fn empty(bpp: Bpp) -> Self {
        Self {
            data: &[],
            size: Size::zero(),
            bpp,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn bpp(&self) -> Bpp {
        self.bpp
    }

    pub fn is_empty(&self) -> bool {
        self.size.width == 0 || self.size.height == 0
    }

    /// Raw level of the pixel at (`x`, `y`), `0..=bpp.max_level()`.
    /// Outside the glyph box the pixel is transparent.
    pub fn level(&self, x: u32, y: u32) -> u8 {
        if x >= self.size.width || y >= self.size.height {
            return 0;
        }

        let bits = self.bpp.bits() as usize;
        let bit = (y as usize * self.size.width as usize + x as usize) * bits;
        let byte = bit / 8;
        let shift = bit % 8;

        let hi = self.data.get(byte).copied().unwrap_or(0) as u16;
        let lo = self.data.get(byte + 1).copied().unwrap_or(0) as u16;
        let word = (hi << 8) | lo;

        ((word >> (16 - shift - bits)) as u8) & self.bpp.max_level()
    }

    pub fn opacity(&self, x: u32, y: u32) -> u8 {
        self.bpp.opacity(self.level(x, y))
    }

    /// Levels in row-major order.
    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        let width = self.size.width;
        (0..self.size.height).flat_map(move |y| (0..width).map(move |x| self.level(x, y)))
    }

    fn gray(&self, point: Point) -> Gray8 {
        if point.x < 0 || point.y < 0 {
            return Gray8::BLACK;
        }
        Gray8::new(self.opacity(point.x as u32, point.y as u32))
    }
}

impl OriginDimensions for GlyphBitmap<'_> {
    fn size(&self) -> Size {
        self.size
    }
}

/// Hands the glyph's opacity map to a draw target, one `Gray8` per pixel.
impl ImageDrawable for GlyphBitmap<'_> {
    type Color = Gray8;

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = self.bounding_box();
        target.fill_contiguous(&area, area.points().map(|p| self.gray(p)))
    }

    fn draw_sub_image<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }

        target.fill_contiguous(
            &Rectangle::new(Point::zero(), area.size),
            area.points().map(|p| self.gray(p)),
        )
    }
}
