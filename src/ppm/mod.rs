//! Binary (P6) PPM reader and writer.

use crate::{
    colors::Rgb,
    error::{Result, TafError},
    image::{Image, Resolution},
};

const PPM_SIGNATURE: &[u8] = b"P6";
const PPM_COMMENT_START_BYTE: u8 = b'#';
const MAX_SUPPORTED_COLOR_VALUE: u32 = 255;

macro_rules! ppm_read_bytes {
    ($read_value:expr, $msg:expr) => {
        match $read_value {
            Some(value) => value,
            None => {
                return Err(TafError::Ppm(format!(
                    "PPM stream ended unexpectedly: {}",
                    $msg
                )));
            }
        }
    };
}

pub fn is_ppm_by_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(PPM_SIGNATURE)
}

/// Splits the text header of a PPM file into whitespace separated symbols,
/// skipping `#` comments.
struct HeaderReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> HeaderReader<'a> {
    fn read_symbol(&mut self) -> Option<&'a [u8]> {
        loop {
            while self.bytes.get(self.offset)?.is_ascii_whitespace() {
                self.offset += 1;
            }

            if self.bytes[self.offset] == PPM_COMMENT_START_BYTE {
                while *self.bytes.get(self.offset)? != b'\n' {
                    self.offset += 1;
                }
                continue;
            }

            let start = self.offset;
            while self
                .bytes
                .get(self.offset)
                .is_some_and(|byte| !byte.is_ascii_whitespace())
            {
                self.offset += 1;
            }

            return Some(&self.bytes[start..self.offset]);
        }
    }

    fn read_ascii_integer(&mut self, field_name: &str) -> Result<u32> {
        let bytes = ppm_read_bytes!(self.read_symbol(), format!("expected {field_name}"));

        std::str::from_utf8(bytes)
            .map_err(|_e| TafError::Ppm(format!("{field_name} is not valid utf8")))?
            .parse::<u32>()
            .map_err(|_e| TafError::Ppm(format!("{field_name} is not a valid unsigned integer")))
    }
}

pub fn decode_ppm(bytes: &[u8]) -> Result<Image> {
    let mut reader = HeaderReader { bytes, offset: 0 };
    let signature = ppm_read_bytes!(reader.read_symbol(), "expected magic number");

    if signature != PPM_SIGNATURE {
        return Err(TafError::Ppm(
            "File does not look like a binary PPM file (magic number missing)".to_string(),
        ));
    }

    let width = reader.read_ascii_integer("width")?;
    let height = reader.read_ascii_integer("height")?;
    let max_color_value = reader.read_ascii_integer("maxval")?;

    if max_color_value == 0 || max_color_value > MAX_SUPPORTED_COLOR_VALUE {
        return Err(TafError::Ppm(format!(
            "Unsupported Maxval {max_color_value}, expected a value between 1 and {MAX_SUPPORTED_COLOR_VALUE}"
        )));
    }

    // Exactly one whitespace byte separates the header from the raster.
    let raster_start = reader.offset + 1;
    let resolution = Resolution::new(width, height);
    let expected_pixel_bytes_size = resolution.byte_length(3).ok_or_else(|| {
        TafError::Ppm(format!("{width}x{height} image is too large to hold in memory"))
    })?;
    let raster_end = raster_start.saturating_add(expected_pixel_bytes_size);
    let pixel_bytes = ppm_read_bytes!(
        bytes.get(raster_start..raster_end),
        format!(
            "Expected {} pixel value bytes for {}x{} file, only found {}",
            expected_pixel_bytes_size,
            width,
            height,
            bytes.len().saturating_sub(raster_start)
        )
    );

    let pixels = pixel_bytes
        .chunks_exact(3)
        .map(|rgb| {
            Rgb::new(
                scale(rgb[0], max_color_value),
                scale(rgb[1], max_color_value),
                scale(rgb[2], max_color_value),
            )
        })
        .collect();

    Ok(Image::from_rgb(resolution, pixels)?)
}

fn scale(value: u8, max_color_value: u32) -> u8 {
    if max_color_value == MAX_SUPPORTED_COLOR_VALUE {
        return value;
    }

    (value as u32 * 255 / max_color_value).min(255) as u8
}

/// Alpha is discarded; PPM has no transparency.
pub fn encode_ppm(image: &Image) -> Vec<u8> {
    let header = format!(
        "P6\n{} {}\n{}\n",
        image.width(),
        image.height(),
        MAX_SUPPORTED_COLOR_VALUE
    );
    let mut bytes = Vec::with_capacity(header.len() + image.pixels().len() * 3);
    bytes.extend_from_slice(header.as_bytes());

    for pixel in image.pixels() {
        bytes.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
    }

    bytes
}
