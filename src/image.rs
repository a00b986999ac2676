use crate::{
    colors::{Rgb, Rgba},
    error::FormatError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bytes needed for `width × height` samples of `bytes_per_pixel` each,
    /// or `None` when that does not fit in a `usize`.
    pub fn byte_length(&self, bytes_per_pixel: usize) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(bytes_per_pixel)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A decoded RGBA pixel buffer, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub resolution: Resolution,
    pixels: Vec<Rgba>,
}

impl Image {
    pub fn new(resolution: Resolution, pixels: Vec<Rgba>) -> Result<Self, FormatError> {
        if pixels.len() != resolution.pixel_count() {
            return Err(FormatError::DimensionMismatch {
                width: resolution.width,
                height: resolution.height,
                pixels: pixels.len(),
            });
        }

        Ok(Self { resolution, pixels })
    }

    pub fn filled(resolution: Resolution, color: Rgba) -> Self {
        Self {
            resolution,
            pixels: vec![color; resolution.pixel_count()],
        }
    }

    pub fn from_raw_rgba(resolution: Resolution, bytes: &[u8]) -> Result<Self, FormatError> {
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| Rgba::new(px[0], px[1], px[2], px[3]))
            .collect();

        Self::new(resolution, pixels)
    }

    pub fn from_rgb(resolution: Resolution, pixels: Vec<Rgb>) -> Result<Self, FormatError> {
        Self::new(resolution, pixels.into_iter().map(Rgba::from).collect())
    }

    pub fn width(&self) -> u32 {
        self.resolution.width
    }

    pub fn height(&self) -> u32 {
        self.resolution.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgba> {
        self.pixels
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.resolution.width || y >= self.resolution.height {
            return None;
        }

        self.pixels
            .get(y as usize * self.resolution.width as usize + x as usize)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Rgba]> {
        self.pixels.chunks(self.resolution.width.max(1) as usize)
    }

    pub fn to_raw_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|px| px.to_bytes()).collect()
    }
}
