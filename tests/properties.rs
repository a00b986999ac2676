use proptest::prelude::*;
use taf::{
    colors::YCbCr,
    quantization::{quantization_bits, quantize_ycbcr, Quality},
    EncoderConfig, FormatError, Image, ImageHeader, Resolution, Rgba, TafError,
};

fn rgba() -> impl Strategy<Value = Rgba> {
    any::<[u8; 4]>().prop_map(Rgba::from_bytes)
}

fn image(max_side: u32) -> impl Strategy<Value = Image> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(width, height)| {
        prop::collection::vec(rgba(), (width * height) as usize)
            .prop_map(move |pixels| Image::new(Resolution::new(width, height), pixels).unwrap())
    })
}

/// Either small enough to pad cheaply, degenerate, or too large to address.
fn dimensions() -> impl Strategy<Value = (u32, u32)> {
    prop_oneof![
        (0u32..64, 0u32..64),
        (Just(0u32), any::<u32>()),
        ((1u32 << 31)..=u32::MAX, (1u32 << 31)..=u32::MAX),
    ]
}

fn little_endian(magic: &[u8; 4], fields: &[u32]) -> Vec<u8> {
    let mut bytes = magic.to_vec();
    for field in fields {
        bytes.extend_from_slice(&field.to_le_bytes());
    }

    bytes
}

fn image_container() -> impl Strategy<Value = Vec<u8>> {
    (
        any::<u32>(),
        dimensions(),
        prop_oneof![0u32..96, any::<u32>()],
        prop::collection::vec(any::<u8>(), 0..64),
    )
        .prop_map(|(version, (width, height), payload_length, tail)| {
            let mut bytes = little_endian(b"TAFI", &[version, width, height, payload_length]);
            bytes.extend_from_slice(&tail);
            bytes
        })
}

fn video_container() -> impl Strategy<Value = Vec<u8>> {
    (
        any::<u32>(),
        any::<u32>(),
        prop_oneof![0u32..4, Just(u32::MAX), any::<u32>()],
        prop::collection::vec(image_container(), 0..3),
        prop::collection::vec(any::<u8>(), 0..16),
    )
        .prop_map(|(version, frame_rate_bits, frame_count, frames, tail)| {
            let mut bytes = little_endian(b"TAFV", &[version, frame_rate_bits, frame_count]);
            for frame in frames {
                bytes.extend_from_slice(&(frame.len() as u32).to_le_bytes());
                bytes.extend_from_slice(&frame);
            }
            bytes.extend_from_slice(&tail);
            bytes
        })
}

fn config(quality: u8) -> EncoderConfig {
    EncoderConfig::with_quality(Quality::new(quality).unwrap())
}

proptest! {
    #[test]
    fn high_quality_round_trip_is_bit_exact(img in image(12), quality in 90u8..=100) {
        let encoded = taf::encode_image(&img, &config(quality)).unwrap();

        prop_assert_eq!(taf::decode_image(&encoded).unwrap(), img);
    }

    #[test]
    fn dimensions_and_payload_length_survive_any_quality(img in image(12), quality in 0u8..=100) {
        let encoded = taf::encode_image(&img, &config(quality)).unwrap();
        let header = ImageHeader::parse(&encoded).unwrap();
        let decoded = taf::decode_image(&encoded).unwrap();

        prop_assert_eq!(header.payload_length as usize, 4 * img.pixels().len());
        prop_assert_eq!(encoded.len(), 20 + 4 * img.pixels().len());
        prop_assert_eq!(decoded.resolution, img.resolution);
    }

    #[test]
    fn luma_error_is_bounded_by_removed_bits(px in rgba(), quality in 0u8..=100) {
        let quality = Quality::new(quality).unwrap();
        if let Some(bits) = quantization_bits(&px, quality) {
            let original = YCbCr::from(&px);
            let quantized = quantize_ycbcr(original, bits);

            prop_assert!(quantized.y <= original.y);
            prop_assert!(original.y - quantized.y <= bits.max_luma_error());
        }
    }

    #[test]
    fn alpha_passes_through(img in image(8), quality in 0u8..=100) {
        let encoded = taf::encode_image(&img, &config(quality)).unwrap();
        let decoded = taf::decode_image(&encoded).unwrap();

        for (after, before) in decoded.pixels().iter().zip(img.pixels()) {
            prop_assert_eq!(after.a, before.a);
        }
    }

    #[test]
    fn encoding_is_deterministic(img in image(10), quality in 0u8..=100) {
        let once = taf::decode_image(&taf::encode_image(&img, &config(quality)).unwrap()).unwrap();
        let first = taf::encode_image(&once, &config(quality)).unwrap();
        let second = taf::encode_image(&once, &config(quality)).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn parallel_and_sequential_encodings_agree(img in image(16), quality in 0u8..=89) {
        let quality = Quality::new(quality).unwrap();
        let parallel = taf::encode_image(&img, &EncoderConfig::new(quality, true)).unwrap();
        let sequential = taf::encode_image(&img, &EncoderConfig::new(quality, false)).unwrap();

        prop_assert_eq!(parallel, sequential);
    }

    #[test]
    fn foreign_magic_never_decodes(img in image(4), magic in any::<[u8; 4]>()) {
        prop_assume!(&magic != b"TAFI");
        let mut encoded = taf::encode_image(&img, &config(100)).unwrap();
        encoded[..4].copy_from_slice(&magic);

        let is_bad_magic = matches!(
            taf::decode_image(&encoded),
            Err(TafError::Format(FormatError::BadMagic { .. }))
        );
        prop_assert!(is_bad_magic);
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = taf::decode_image(&bytes);
        let _ = taf::decode_video(&bytes);
    }

    #[test]
    fn image_headers_with_arbitrary_fields_never_panic(bytes in image_container()) {
        let _ = taf::decode_image(&bytes);
    }

    #[test]
    fn video_headers_with_arbitrary_fields_never_panic(bytes in video_container()) {
        let _ = taf::decode_video(&bytes);
        if let Ok(reader) = taf::VideoReader::new(&bytes) {
            let _ = reader.count();
        }
    }
}
