//! Color representation for shapes
//!
//! [`Color`] is a resolved RGBA value. [`ColorIndex`] is the validated
//! meaning of a layer color index and [`ColorTable`] maps indices to RGBA.

use crate::error::{Result, ShapeError};
use crate::io::archive::{Archive, Persist};
use once_cell::sync::Lazy;
use std::fmt;

/// Resolved RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Color of a freshly constructed shape: opaque white
pub const CR_DEFAULT: Color = Color::rgb(255, 255, 255);

impl Color {
    /// Create a color from RGBA components
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Create an opaque color from `0xRRGGBB`
    pub const fn from_true_color(value: u32) -> Self {
        Color::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    /// Packed `r<<24 | g<<16 | b<<8 | a`
    pub const fn to_packed(&self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Inverse of [`Color::to_packed`]
    pub const fn from_packed(value: u32) -> Self {
        Color::new(
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

impl Default for Color {
    fn default() -> Self {
        CR_DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color({:02x},{:02x},{:02x})", self.r, self.g, self.b)
    }
}

impl Persist for Color {
    fn persist(&mut self, ar: &mut dyn Archive) -> Result<()> {
        let mut packed = self.to_packed();
        ar.uint(&mut packed)?;
        *self = Color::from_packed(packed);
        Ok(())
    }
}

/// Meaning of a layer color index
///
/// - 0: by block
/// - 256: by layer
/// - negative: the shape's layer is off; the magnitude is the palette index
/// - 1-255: direct palette index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorIndex {
    /// Inherit from the containing block (index 0)
    ByBlock,
    /// Inherit from the layer (index 256)
    ByLayer,
    /// Layer is turned off; raw negative value kept
    LayerOff(i32),
    /// Palette index 1-255
    Index(u8),
}

impl ColorIndex {
    pub const BY_BLOCK: i32 = 0;
    pub const BY_LAYER: i32 = 256;

    /// Raw integer form
    pub fn value(&self) -> i32 {
        match self {
            ColorIndex::ByBlock => Self::BY_BLOCK,
            ColorIndex::ByLayer => Self::BY_LAYER,
            ColorIndex::LayerOff(v) => *v,
            ColorIndex::Index(i) => *i as i32,
        }
    }

    /// True when the index says the layer is off
    pub fn is_layer_off(&self) -> bool {
        matches!(self, ColorIndex::LayerOff(_))
    }

    /// Palette color for direct and layer-off indices
    pub fn palette_color(&self) -> Option<Color> {
        match self {
            ColorIndex::Index(i) => Some(ColorTable::rgba(*i)),
            ColorIndex::LayerOff(v) => {
                let magnitude = v.unsigned_abs().min(255) as u8;
                Some(ColorTable::rgba(magnitude))
            }
            ColorIndex::ByBlock | ColorIndex::ByLayer => None,
        }
    }
}

impl Default for ColorIndex {
    fn default() -> Self {
        ColorIndex::ByLayer
    }
}

impl TryFrom<i32> for ColorIndex {
    type Error = ShapeError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(ColorIndex::ByBlock),
            256 => Ok(ColorIndex::ByLayer),
            v if v < 0 => Ok(ColorIndex::LayerOff(v)),
            1..=255 => Ok(ColorIndex::Index(value as u8)),
            _ => Err(ShapeError::InvalidColorIndex(value)),
        }
    }
}

impl From<ColorIndex> for i32 {
    fn from(index: ColorIndex) -> Self {
        index.value()
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorIndex::ByBlock => write!(f, "ByBlock"),
            ColorIndex::ByLayer => write!(f, "ByLayer"),
            ColorIndex::LayerOff(v) => write!(f, "LayerOff({})", v),
            ColorIndex::Index(i) => write!(f, "Index({})", i),
        }
    }
}

/// The AutoCAD Color Index palette
pub struct ColorTable;

static ACI_PALETTE: Lazy<[Color; 256]> = Lazy::new(build_palette);

impl ColorTable {
    /// RGBA value of a palette index. Index 0 has no color of its own and
    /// maps to black.
    pub fn rgba(index: u8) -> Color {
        ACI_PALETTE[index as usize]
    }

    /// Resolve a validated color index; `None` for by-block and by-layer
    pub fn resolve(index: ColorIndex) -> Option<Color> {
        index.palette_color()
    }
}

fn build_palette() -> [Color; 256] {
    let mut palette = [Color::BLACK; 256];

    let fixed = [
        Color::rgb(255, 0, 0),
        Color::rgb(255, 255, 0),
        Color::rgb(0, 255, 0),
        Color::rgb(0, 255, 255),
        Color::rgb(0, 0, 255),
        Color::rgb(255, 0, 255),
        Color::rgb(255, 255, 255),
        Color::rgb(128, 128, 128),
        Color::rgb(192, 192, 192),
    ];
    palette[1..10].copy_from_slice(&fixed);

    // 10..=249: 24 hues of 10 shades each
    const BRIGHTNESS: [f64; 10] = [1.0, 1.0, 0.8, 0.8, 0.6, 0.6, 0.5, 0.5, 0.3, 0.3];
    for i in 10..250usize {
        let hue = ((i - 10) / 10) as f64 * 15.0;
        let shade = (i - 10) % 10;
        let saturation = if shade % 2 == 1 { 0.5 } else { 1.0 };
        palette[i] = hsv_to_rgb(hue, saturation, BRIGHTNESS[shade]);
    }

    for (k, gray) in [51u8, 91, 132, 173, 214, 255].iter().enumerate() {
        palette[250 + k] = Color::rgb(*gray, *gray, *gray);
    }

    palette
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Color {
    let c = value * saturation;
    let h = hue / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::rgb(to_byte(r), to_byte(g), to_byte(b))
}
