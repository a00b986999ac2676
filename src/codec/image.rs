use tracing::{debug, warn};

use crate::{
    binary::byte_reader::ByteReader,
    colors::Rgba,
    config::EncoderConfig,
    container::{ImageHeader, BYTES_PER_PIXEL, IMAGE_HEADER_LENGTH},
    error::{FormatError, Result},
    image::{Image, Resolution},
    quantization::quantize_pixels,
};

pub fn encode_image(img: &Image, config: &EncoderConfig) -> Result<Vec<u8>> {
    check_area(img.resolution)?;
    let header = ImageHeader::new(img.resolution)?;
    let pixels = quantize_pixels(img.pixels(), config.quality, config.parallel);

    let mut encoded_image: Vec<u8> =
        Vec::with_capacity(IMAGE_HEADER_LENGTH + header.payload_length as usize);
    encoded_image.extend_from_slice(&header.to_bytes());
    for pixel in &pixels {
        encoded_image.extend_from_slice(&pixel.to_bytes());
    }

    debug!(
        width = img.width(),
        height = img.height(),
        quality = config.quality.value(),
        bytes = encoded_image.len(),
        "encoded image"
    );

    Ok(encoded_image)
}

pub fn decode_image(bytes: &[u8]) -> Result<Image> {
    Ok(read_image(&mut ByteReader::new(bytes))?)
}

pub(crate) fn read_image(reader: &mut ByteReader) -> std::result::Result<Image, FormatError> {
    let header = ImageHeader::read(reader)?;
    check_area(header.resolution)?;
    let payload = reader.read_bytes(header.payload_length as usize, "image payload")?;

    let too_large = || FormatError::ImageTooLarge {
        width: header.resolution.width,
        height: header.resolution.height,
    };
    let pixel_count = header
        .resolution
        .byte_length(BYTES_PER_PIXEL)
        .ok_or_else(too_large)?
        / BYTES_PER_PIXEL;
    let stored_samples = payload.len() / BYTES_PER_PIXEL;
    let mut pixels: Vec<Rgba> = payload
        .chunks_exact(BYTES_PER_PIXEL)
        .take(pixel_count)
        .map(|sample| Rgba::new(sample[0], sample[1], sample[2], sample[3]))
        .collect();

    if stored_samples < pixel_count {
        warn!(
            stored_samples,
            pixel_count, "image payload is short, padding with transparent pixels"
        );
        pixels
            .try_reserve_exact(pixel_count - pixels.len())
            .map_err(|_| too_large())?;
        pixels.resize(pixel_count, Rgba::TRANSPARENT);
    } else if stored_samples > pixel_count {
        warn!(
            dropped = stored_samples - pixel_count,
            "image payload holds more samples than the image has pixels"
        );
    }

    debug!(
        width = header.resolution.width,
        height = header.resolution.height,
        payload_length = header.payload_length,
        "decoded image"
    );

    Image::new(header.resolution, pixels)
}

fn check_area(resolution: Resolution) -> std::result::Result<(), FormatError> {
    if resolution.is_empty() {
        return Err(FormatError::ZeroArea {
            width: resolution.width,
            height: resolution.height,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::TafError, quantization::Quality};

    fn lossless() -> EncoderConfig {
        EncoderConfig::with_quality(Quality::new(100).unwrap())
    }

    fn sample_image() -> Image {
        Image::new(
            Resolution::new(2, 2),
            vec![
                Rgba::new(255, 0, 0, 255),
                Rgba::new(0, 255, 0, 255),
                Rgba::new(0, 0, 255, 255),
                Rgba::new(255, 255, 255, 0),
            ],
        )
        .unwrap()
    }

    fn raw_container(width: u32, height: u32, payload: &[u8]) -> Vec<u8> {
        let mut bytes = b"TAFI".to_vec();
        for field in [1, width, height, payload.len() as u32] {
            bytes.extend_from_slice(&field.to_le_bytes());
        }
        bytes.extend_from_slice(payload);

        bytes
    }

    #[test]
    fn two_by_two_lossless_layout() {
        let encoded = encode_image(&sample_image(), &lossless()).unwrap();

        assert_eq!(encoded.len(), 36);
        assert_eq!(&encoded[..4], b"TAFI");
        assert_eq!(encoded[16..20], 16u32.to_le_bytes());
        assert_eq!(
            encoded[20..],
            [255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255, 255, 255, 255, 0]
        );
        assert_eq!(decode_image(&encoded).unwrap(), sample_image());
    }

    #[test]
    fn zero_area_is_rejected_both_ways() {
        let empty = Image::new(Resolution::new(0, 5), vec![]).unwrap();

        assert!(matches!(
            encode_image(&empty, &lossless()),
            Err(TafError::Format(FormatError::ZeroArea { width: 0, height: 5 }))
        ));
        assert!(matches!(
            decode_image(&raw_container(3, 0, &[])),
            Err(TafError::Format(FormatError::ZeroArea { .. }))
        ));
    }

    #[test]
    fn bad_magic_fails() {
        let mut encoded = encode_image(&sample_image(), &lossless()).unwrap();
        encoded[..4].copy_from_slice(b"TAF!");

        assert!(matches!(
            decode_image(&encoded),
            Err(TafError::Format(FormatError::BadMagic { .. }))
        ));
    }

    #[test]
    fn missing_payload_bytes_fail() {
        let encoded = encode_image(&sample_image(), &lossless()).unwrap();

        assert!(matches!(
            decode_image(&encoded[..30]),
            Err(TafError::Format(FormatError::Truncated { what: "image payload", .. }))
        ));
        assert!(matches!(
            decode_image(&encoded[..12]),
            Err(TafError::Format(FormatError::Truncated { .. }))
        ));
    }

    #[test]
    fn short_sample_stream_is_padded() {
        // One full sample plus a dangling partial one.
        let decoded = decode_image(&raw_container(2, 1, &[1, 2, 3, 4, 9, 9])).unwrap();

        assert_eq!(
            decoded.pixels(),
            [Rgba::new(1, 2, 3, 4), Rgba::TRANSPARENT]
        );
    }

    #[test]
    fn oversized_header_is_an_error() {
        for (width, height) in [(u32::MAX, u32::MAX), (1 << 31, 1 << 30)] {
            assert!(matches!(
                decode_image(&raw_container(width, height, &[])),
                Err(TafError::Format(FormatError::ImageTooLarge { .. }))
            ));
        }
    }

    #[test]
    fn excess_samples_are_dropped() {
        let decoded = decode_image(&raw_container(1, 1, &[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();

        assert_eq!(decoded.pixels(), [Rgba::new(1, 2, 3, 4)]);
    }

    #[test]
    fn lossy_encode_keeps_header_invariant() {
        let config = EncoderConfig::with_quality(Quality::new(0).unwrap());
        let encoded = encode_image(&sample_image(), &config).unwrap();
        let header = ImageHeader::parse(&encoded).unwrap();

        assert_eq!(header.payload_length, 16);
        assert_eq!(decode_image(&encoded).unwrap().resolution, Resolution::new(2, 2));
    }
}
