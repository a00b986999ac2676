//! Minimal 8-bit, non-interlaced PNG reader and writer used to move frames
//! in and out of the container codecs.

use chunks::{iend::Iend, ihdr::Ihdr, Chunk};
pub use color_type::ColorType;
pub use config::{CompressionLevel, PartialPngConfig, PngConfig};
use consts::{IDAT_CHUNK_MAX_SIZE, IDAT_CHUNK_TYPE, IEND_CHUNK_TYPE, PNG_SIGNATURE};
use crc::CrcCalculator;
use deflate::{compress_scanlines, uncompress_scanlines};
use filter::{filter_scanlines, remove_scanlines_filter};
use tracing::{debug, trace};

use crate::{
    binary::byte_reader::ByteReader,
    error::{Result, TafError},
    image::Image,
};

mod chunks;
mod color_type;
mod config;
mod consts;
mod crc;
mod deflate;
mod filter;

#[macro_export]
macro_rules! png_assert {
    ($assert_value:expr, $msg:expr) => {
        if !$assert_value {
            return Err($crate::error::TafError::Png(format!(
                "png parse error: {}",
                $msg
            )));
        }
    };
}

pub fn is_png_by_signature(bytes: &[u8]) -> bool {
    bytes.starts_with(PNG_SIGNATURE)
}

pub fn decode_png(bytes: &[u8]) -> Result<Image> {
    png_assert!(
        is_png_by_signature(bytes),
        "File does not appear to be a png file (signature missing)"
    );

    let mut reader = ByteReader::new(&bytes[PNG_SIGNATURE.len()..]);
    let mut crc = CrcCalculator::new();
    let ihdr = Ihdr::from_chunk(Chunk::read(&mut reader, &mut crc)?)?;
    ihdr.check_compatibility()?;
    let mut compressed_data: Vec<u8> = Vec::new();

    loop {
        let chunk = Chunk::read(&mut reader, &mut crc)?;

        match chunk.chunk_type {
            IDAT_CHUNK_TYPE => compressed_data.extend_from_slice(chunk.chunk_data),
            IEND_CHUNK_TYPE => break,
            other if other.first().is_some_and(u8::is_ascii_lowercase) => {
                trace!(chunk = %String::from_utf8_lossy(other), "skipping ancillary chunk");
            }
            other => {
                return Err(TafError::Png(format!(
                    "Unrecognized critical chunk type: {}",
                    String::from_utf8_lossy(other)
                )))
            }
        }
    }

    let filtered_scanlines = uncompress_scanlines(
        &compressed_data,
        ihdr.height as usize,
        ihdr.scanline_length(),
    )?;
    let scanlines = remove_scanlines_filter(&filtered_scanlines, ihdr.bytes_per_pixel())?;
    let mut pixels = Vec::new();
    for scanline in &scanlines {
        pixels.extend(ihdr.color_type.scanline_to_pixels(scanline)?);
    }

    debug!(width = ihdr.width, height = ihdr.height, color_type = ?ihdr.color_type, "decoded png");

    Ok(Image::new(ihdr.resolution(), pixels)?)
}

pub fn encode_png(image: &Image, partial_config: PartialPngConfig) -> Result<Vec<u8>> {
    let config = PngConfig::create_from_partial(partial_config, image);
    let mut crc = CrcCalculator::new();
    let ihdr = Ihdr::new(image.resolution, config.color_type);

    let scanlines = config.color_type.create_scanlines(image.rows())?;
    let filtered_scanlines = filter_scanlines(&scanlines, ihdr.bytes_per_pixel());
    let compressed_data = compress_scanlines(&filtered_scanlines, config.compression_level)?;

    let mut encoded_png: Vec<u8> = Vec::with_capacity(compressed_data.len() + 64);
    encoded_png.extend_from_slice(PNG_SIGNATURE);
    encoded_png.extend_from_slice(&ihdr.to_bytes(&mut crc));

    compressed_data
        .chunks(IDAT_CHUNK_MAX_SIZE)
        .for_each(|chunk_data| {
            let chunk = Chunk::new(IDAT_CHUNK_TYPE, chunk_data, &mut crc);

            encoded_png.extend_from_slice(&chunk.to_bytes());
        });

    encoded_png.extend_from_slice(&Iend::to_bytes(&mut crc));

    debug!(
        width = image.width(),
        height = image.height(),
        color_type = ?config.color_type,
        bytes = encoded_png.len(),
        "encoded png"
    );

    Ok(encoded_png)
}
