use taf::{
    demuxers::{ImageSequenceDemuxer, RawImageDemuxer},
    format::{read_image, write_image, FileFormat},
    muxers::ImageSequenceMuxer,
    quantization::{quantize_pixel, Quality},
    ContainerKind, EncoderConfig, FormatError, FrameSink, Image, ImageHeader, Resolution, Rgba,
    TafError, VideoHeader,
};

fn config(quality: u8) -> EncoderConfig {
    EncoderConfig::with_quality(Quality::new(quality).unwrap())
}

fn checkerboard(width: u32, height: u32) -> Image {
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if (x + y) % 2 == 0 {
                    Rgba::new(240, 230, 220, 255)
                } else {
                    Rgba::new(20, (x * 9) as u8, (y * 13) as u8, 200)
                }
            })
        })
        .collect();

    Image::new(Resolution::new(width, height), pixels).unwrap()
}

#[test]
fn two_by_two_image_is_36_bytes_and_lossless() {
    let image = Image::new(
        Resolution::new(2, 2),
        vec![
            Rgba::new(255, 0, 0, 255),
            Rgba::new(0, 255, 0, 255),
            Rgba::new(0, 0, 255, 255),
            Rgba::new(255, 255, 255, 0),
        ],
    )
    .unwrap();

    let encoded = taf::encode_image(&image, &config(100)).unwrap();

    assert_eq!(encoded.len(), 36);
    assert_eq!(ContainerKind::detect(&encoded), Some(ContainerKind::Image));
    assert_eq!(taf::decode_image(&encoded).unwrap(), image);
}

#[test]
fn thirty_fps_video_keeps_rate_and_order() {
    let frames: Vec<Image> = [Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8), Rgba::new(9, 10, 11, 12)]
        .into_iter()
        .map(|px| Image::filled(Resolution::new(1, 1), px))
        .collect();

    let encoded = taf::encode_video(&frames, 30.0, &config(100)).unwrap();
    let video = taf::decode_video(&encoded).unwrap();

    assert!((video.frame_rate - 30.0).abs() < f32::EPSILON);
    assert_eq!(video.frames, frames);
    assert_eq!(VideoHeader::parse(&encoded).unwrap().frame_count, 3);
}

#[test]
fn lossy_image_decodes_to_quantized_pixels() {
    let image = checkerboard(9, 4);
    let quality = Quality::new(30).unwrap();
    let decoded = taf::decode_image(&taf::encode_image(&image, &config(30)).unwrap()).unwrap();

    let expected: Vec<Rgba> = image.pixels().iter().map(|px| quantize_pixel(*px, quality)).collect();
    assert_eq!(decoded.pixels(), expected.as_slice());
    assert_ne!(decoded, image);
}

#[test]
fn lossy_video_frames_match_lossy_images() {
    let frames = vec![checkerboard(4, 4), checkerboard(3, 5)];
    let video = taf::decode_video(&taf::encode_video(&frames, 12.5, &config(10)).unwrap()).unwrap();

    for (frame, original) in video.frames.iter().zip(&frames) {
        let single = taf::decode_image(&taf::encode_image(original, &config(10)).unwrap()).unwrap();
        assert_eq!(frame, &single);
    }
}

#[test]
fn stream_encoding_matches_slice_encoding() {
    let frames = vec![checkerboard(2, 2), checkerboard(5, 1)];
    let mut source = RawImageDemuxer::from_frames(frames.clone(), 24.0);

    assert_eq!(
        taf::encode_stream(&mut source, &config(50)).unwrap(),
        taf::encode_video(&frames, 24.0, &config(50)).unwrap()
    );
}

#[test]
fn image_header_is_readable_without_decoding() {
    let encoded = taf::encode_image(&checkerboard(7, 3), &config(95)).unwrap();
    let header = ImageHeader::parse(&encoded).unwrap();

    assert_eq!(header.version, 1);
    assert_eq!(header.resolution, Resolution::new(7, 3));
    assert_eq!(header.payload_length, 7 * 3 * 4);
}

#[test]
fn image_bytes_are_not_a_video() {
    let encoded = taf::encode_image(&checkerboard(2, 2), &config(100)).unwrap();

    assert!(matches!(
        taf::decode_video(&encoded),
        Err(TafError::Format(FormatError::BadMagic { .. }))
    ));
}

#[test]
fn frames_survive_a_png_sequence_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let frames = vec![checkerboard(3, 3), checkerboard(4, 2), checkerboard(1, 6)];
    let encoded = taf::encode_video(&frames, 30.0, &config(100)).unwrap();

    let mut muxer = ImageSequenceMuxer::new(dir.path(), "frame", FileFormat::Png).unwrap();
    for frame in taf::decode_video(&encoded).unwrap().frames {
        muxer.write_frame(&frame).unwrap();
    }
    assert_eq!(muxer.frames_written(), 3);
    assert!(muxer.frame_path(1).ends_with("frame_00001.png"));
    muxer.finish().unwrap();

    let mut demuxer = ImageSequenceDemuxer::from_directory(dir.path(), 30.0).unwrap();
    let reencoded = taf::encode_stream(&mut demuxer, &config(100)).unwrap();
    assert_eq!(reencoded, encoded);
}

#[test]
fn ppm_files_lose_only_alpha() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame.ppm");
    let image = checkerboard(5, 5);

    write_image(&path, &image).unwrap();
    let restored = read_image(&path).unwrap();

    for (restored, original) in restored.pixels().iter().zip(image.pixels()) {
        assert_eq!(*restored, Rgba { a: 255, ..*original });
    }
}

#[test]
fn missing_frame_file_is_a_resource_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut demuxer = ImageSequenceDemuxer::new(vec![dir.path().join("nope.png")], 30.0);

    assert!(matches!(
        taf::encode_stream(&mut demuxer, &config(90)),
        Err(TafError::Resource { .. })
    ));
}
