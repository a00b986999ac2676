use std::io::{Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};

use crate::error::{Result, TafError};

use super::config::CompressionLevel;

pub fn compress_scanlines(scanlines: &[Vec<u8>], level: CompressionLevel) -> Result<Vec<u8>> {
    let mut e = ZlibEncoder::new(Vec::new(), Compression::new(level.to_zlib_level()));

    for scanline in scanlines {
        e.write_all(scanline)
            .map_err(|err| TafError::Png(format!("deflate writing failed: {err}")))?;
    }

    e.finish()
        .map_err(|err| TafError::Png(format!("deflate finishing failed: {err}")))
}

pub fn uncompress_scanlines(
    compressed_data: &[u8],
    height: usize,
    scanline_length: usize,
) -> Result<Vec<Vec<u8>>> {
    let expected_length = scanline_length
        .checked_add(1)
        .and_then(|length| length.checked_mul(height))
        .ok_or_else(|| {
            TafError::Png(format!(
                "{height} scanlines of {scanline_length} bytes do not fit in memory"
            ))
        })?;
    // Grows with the inflated stream, never beyond what the header declares.
    let mut inflated = Vec::new();
    ZlibDecoder::new(compressed_data)
        .take(expected_length as u64)
        .read_to_end(&mut inflated)
        .map_err(|err| TafError::Png(format!("inflate failed: {err}")))?;

    if inflated.len() < expected_length {
        return Err(TafError::Png(format!(
            "image data holds {} bytes, expected {}",
            inflated.len(),
            expected_length
        )));
    }

    Ok(inflated
        .chunks_exact(scanline_length + 1)
        .take(height)
        .map(|scanline| scanline.to_vec())
        .collect())
}
