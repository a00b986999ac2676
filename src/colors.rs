use crate::algebra::{Matrix3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == u8::MAX
    }

    /// Sum of the colour channels, 0..=765.
    pub fn brightness(&self) -> u16 {
        self.r as u16 + self.g as u16 + self.b as u16
    }

    pub fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

impl From<Rgb> for Rgba {
    fn from(val: Rgb) -> Self {
        Rgba {
            r: val.r,
            g: val.g,
            b: val.b,
            a: 255,
        }
    }
}

impl From<Rgba> for Rgb {
    fn from(val: Rgba) -> Self {
        Rgb {
            r: val.r,
            g: val.g,
            b: val.b,
        }
    }
}

impl From<&Rgba> for Vec3 {
    fn from(val: &Rgba) -> Self {
        Vec3([val.r as f64, val.g as f64, val.b as f64])
    }
}

/// Integer luma/chroma triple. Components are truncated toward zero when
/// derived from RGB and stay within 0..=255 for any 8-bit input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YCbCr {
    pub y: i32,
    pub cb: i32,
    pub cr: i32,
}

impl YCbCr {
    pub fn new(y: i32, cb: i32, cr: i32) -> Self {
        Self { y, cb, cr }
    }

    /// Zeroes the low `luma_bits` of luma and the low `chroma_bits` of both chroma components.
    pub fn truncate_low_bits(self, luma_bits: u32, chroma_bits: u32) -> Self {
        Self {
            y: (self.y >> luma_bits) << luma_bits,
            cb: (self.cb >> chroma_bits) << chroma_bits,
            cr: (self.cr >> chroma_bits) << chroma_bits,
        }
    }
}

impl From<&YCbCr> for Vec3 {
    fn from(val: &YCbCr) -> Self {
        Vec3([val.y as f64, val.cb as f64, val.cr as f64])
    }
}

const RGB_TO_YCBCR_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [0.299, -0.169, 0.5],
    [0.587, -0.331, -0.419],
    [0.114, 0.5, -0.081],
);
const YCBCR_CHROMA_OFFSET: Vec3 = Vec3::new(0., 128., 128.);

const YCBCR_TO_RGB_CONVERSION_TABLE: Matrix3 = Matrix3::new(
    [1., 1., 1.],
    [0., -0.344, 1.772],
    [1.402, -0.714, 0.],
);

impl From<&Rgba> for YCbCr {
    fn from(rgba: &Rgba) -> Self {
        let rgb_vec: Vec3 = rgba.into();
        let Vec3([y, cb, cr]) = YCBCR_CHROMA_OFFSET + rgb_vec * &RGB_TO_YCBCR_CONVERSION_TABLE;

        YCbCr::new(y as i32, cb as i32, cr as i32)
    }
}

impl YCbCr {
    /// Converts back to RGB, truncating each channel toward zero before
    /// clamping it to 0..=255, and attaches the given alpha.
    pub fn to_rgba(&self, alpha: u8) -> Rgba {
        let vec: Vec3 = self.into();
        let Vec3([r, g, b]) = (vec - YCBCR_CHROMA_OFFSET) * &YCBCR_TO_RGB_CONVERSION_TABLE;

        Rgba::new(to_channel(r), to_channel(g), to_channel(b), alpha)
    }
}

fn to_channel(value: f64) -> u8 {
    (value as i32).clamp(0, u8::MAX as i32) as u8
}
