//! Per-pixel lossy quantization.
//!
//! Each pixel is moved into luma/chroma space, the low bits of each component
//! are zeroed and the result is converted back to RGB. Dark pixels lose more
//! bits than bright ones and chroma always loses more than luma.

use rayon::prelude::*;

use crate::{
    colors::{Rgba, YCbCr},
    error::{Result, TafError},
};

pub const MAX_QUALITY: u8 = 100;
pub const DEFAULT_QUALITY: u8 = 95;
/// At or above this quality pixels are passed through untouched.
pub const LOSSLESS_QUALITY: u8 = 90;
pub const BRIGHTNESS_THRESHOLD: u16 = 400;

const MAX_BITS_TO_REMOVE: u32 = 7;
const BRIGHT_REGION_FACTOR: u32 = 5;
const DARK_REGION_FACTOR: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Result<Self> {
        if value > MAX_QUALITY {
            return Err(TafError::InvalidQuality(value));
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_lossless(&self) -> bool {
        self.0 >= LOSSLESS_QUALITY
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(DEFAULT_QUALITY)
    }
}

impl TryFrom<u8> for Quality {
    type Error = TafError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

pub fn bits_to_remove(brightness: u16, quality: Quality) -> u32 {
    let factor = if brightness > BRIGHTNESS_THRESHOLD {
        BRIGHT_REGION_FACTOR
    } else {
        DARK_REGION_FACTOR
    };

    ((MAX_QUALITY - quality.value()) as u32 * factor / 100).min(MAX_BITS_TO_REMOVE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationBits {
    pub luma: u32,
    pub chroma: u32,
}

impl QuantizationBits {
    pub fn from_bits_to_remove(bits_to_remove: u32) -> Self {
        Self {
            luma: bits_to_remove.saturating_sub(2),
            chroma: (bits_to_remove + 1).min(MAX_BITS_TO_REMOVE),
        }
    }

    /// Largest amount a component can drop when its low bits are zeroed.
    pub fn max_luma_error(&self) -> i32 {
        (1 << self.luma) - 1
    }
}

/// Returns `None` when the pixel is passed through unchanged.
pub fn quantization_bits(pixel: &Rgba, quality: Quality) -> Option<QuantizationBits> {
    if quality.is_lossless() {
        return None;
    }

    match bits_to_remove(pixel.brightness(), quality) {
        0 => None,
        bits => Some(QuantizationBits::from_bits_to_remove(bits)),
    }
}

pub fn quantize_ycbcr(ycbcr: YCbCr, bits: QuantizationBits) -> YCbCr {
    ycbcr.truncate_low_bits(bits.luma, bits.chroma)
}

pub fn quantize_pixel(pixel: Rgba, quality: Quality) -> Rgba {
    match quantization_bits(&pixel, quality) {
        Some(bits) => quantize_ycbcr(YCbCr::from(&pixel), bits).to_rgba(pixel.a),
        None => pixel,
    }
}

/// Quantizes a row-major buffer. The output order always matches the input
/// order, whether or not the work is spread over the rayon pool.
pub fn quantize_pixels(pixels: &[Rgba], quality: Quality, parallel: bool) -> Vec<Rgba> {
    if quality.is_lossless() {
        return pixels.to_vec();
    }

    if parallel {
        pixels
            .par_iter()
            .map(|px| quantize_pixel(*px, quality))
            .collect()
    } else {
        pixels.iter().map(|px| quantize_pixel(*px, quality)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    #[test]
    fn quality_above_hundred_is_rejected() {
        assert!(matches!(Quality::new(101), Err(TafError::InvalidQuality(101))));
        assert_eq!(Quality::default().value(), 95);
    }

    #[test]
    fn dark_regions_lose_more_bits() {
        assert_eq!(bits_to_remove(765, q(0)), 5);
        assert_eq!(bits_to_remove(400, q(0)), 7);
        assert_eq!(bits_to_remove(401, q(50)), 2);
        assert_eq!(bits_to_remove(0, q(50)), 3);
        assert_eq!(bits_to_remove(0, q(100)), 0);
    }

    #[test]
    fn luma_keeps_more_precision_than_chroma() {
        assert_eq!(
            QuantizationBits::from_bits_to_remove(1),
            QuantizationBits { luma: 0, chroma: 2 }
        );
        assert_eq!(
            QuantizationBits::from_bits_to_remove(7),
            QuantizationBits { luma: 5, chroma: 7 }
        );
    }

    #[test]
    fn high_quality_is_identity() {
        let pixel = Rgba::new(13, 200, 77, 128);

        for quality in 90..=100 {
            assert_eq!(quantize_pixel(pixel, q(quality)), pixel);
        }
    }

    #[test]
    fn alpha_is_never_touched() {
        for quality in 0..=100 {
            assert_eq!(quantize_pixel(Rgba::new(90, 10, 200, 42), q(quality)).a, 42);
        }
    }

    #[test]
    fn dark_pixel_at_zero_quality() {
        // bits_to_remove = 7 -> luma 5 bits, chroma 7 bits.
        // y = 15.98 -> 0, cb = 124.62 -> 0, cr = 138 -> 128.
        let pixel = quantize_pixel(Rgba::new(30, 10, 10, 255), q(0));

        assert_eq!(pixel, Rgba::new(0, 44, 0, 255));
    }

    #[test]
    fn quality_sweep_stays_ordered_and_deterministic() {
        let pixels: Vec<Rgba> = (0..=255u8)
            .map(|i| Rgba::new(i, i.wrapping_mul(7), 255 - i, i))
            .collect();

        for quality in (0..=100).step_by(10) {
            let sequential = quantize_pixels(&pixels, q(quality), false);
            let parallel = quantize_pixels(&pixels, q(quality), true);

            assert_eq!(sequential, parallel);
        }
    }
}
