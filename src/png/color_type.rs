use crate::{
    colors::{Rgba, YCbCr},
    error::{Result, TafError},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale,
    Truecolor,
    IndexedColor,
    GreyscaleAlpha,
    TrueColorAlpha,
}

impl ColorType {
    pub fn samples_per_pixel(&self) -> usize {
        match self {
            ColorType::Greyscale | ColorType::IndexedColor => 1,
            ColorType::GreyscaleAlpha => 2,
            ColorType::Truecolor => 3,
            ColorType::TrueColorAlpha => 4,
        }
    }

    pub fn create_scanlines(&self, rows: impl Iterator<Item = impl AsRef<[Rgba]>>) -> Result<Vec<Vec<u8>>> {
        rows.map(|row| {
            let row = row.as_ref();
            let mut scanline: Vec<u8> = Vec::with_capacity(row.len() * self.samples_per_pixel());

            for pixel in row {
                match self {
                    ColorType::IndexedColor => {
                        return Err(TafError::Png(
                            "indexed colour output is not supported".to_string(),
                        ))
                    }
                    ColorType::Greyscale => scanline.push(luma(pixel)),
                    ColorType::GreyscaleAlpha => {
                        scanline.push(luma(pixel));
                        scanline.push(pixel.a);
                    }
                    ColorType::Truecolor => {
                        scanline.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
                    }
                    ColorType::TrueColorAlpha => scanline.extend_from_slice(&pixel.to_bytes()),
                }
            }

            Ok(scanline)
        })
        .collect()
    }

    pub fn scanline_to_pixels(&self, scanline: &[u8]) -> Result<Vec<Rgba>> {
        let pixels = scanline.chunks_exact(self.samples_per_pixel());

        match self {
            ColorType::IndexedColor => Err(TafError::Png(
                "indexed colour images are not supported".to_string(),
            )),
            ColorType::Greyscale => Ok(pixels.map(|s| Rgba::new(s[0], s[0], s[0], 255)).collect()),
            ColorType::GreyscaleAlpha => {
                Ok(pixels.map(|s| Rgba::new(s[0], s[0], s[0], s[1])).collect())
            }
            ColorType::Truecolor => Ok(pixels.map(|s| Rgba::new(s[0], s[1], s[2], 255)).collect()),
            ColorType::TrueColorAlpha => {
                Ok(pixels.map(|s| Rgba::new(s[0], s[1], s[2], s[3])).collect())
            }
        }
    }
}

fn luma(pixel: &Rgba) -> u8 {
    YCbCr::from(pixel).y.clamp(0, 255) as u8
}

impl TryFrom<u8> for ColorType {
    type Error = TafError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleAlpha),
            6 => Ok(Self::TrueColorAlpha),
            _ => Err(TafError::Png(format!("Unrecognized color type {value}"))),
        }
    }
}

impl From<ColorType> for u8 {
    fn from(value: ColorType) -> Self {
        match value {
            ColorType::Greyscale => 0,
            ColorType::Truecolor => 2,
            ColorType::IndexedColor => 3,
            ColorType::GreyscaleAlpha => 4,
            ColorType::TrueColorAlpha => 6,
        }
    }
}
