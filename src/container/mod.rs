//! Byte layout shared by the image and video containers.
//!
//! Image (`TAFI`), little-endian:
//!
//! ```text
//! 0   magic "TAFI"
//! 4   u32 version
//! 8   u32 width
//! 12  u32 height
//! 16  u32 payload length
//! 20  payload: RGBA samples, 4 bytes per pixel, row-major
//! ```
//!
//! Video (`TAFV`):
//!
//! ```text
//! 0   magic "TAFV"
//! 4   u32 version
//! 8   f32 frame rate
//! 12  u32 frame count
//! 16  frame count x (u32 frame length, one complete image container)
//! ```

use byteorder::{ByteOrder, LittleEndian};
use tracing::warn;

use crate::{
    binary::byte_reader::ByteReader,
    error::FormatError,
    image::Resolution,
};

pub mod chunk;

pub const IMAGE_MAGIC: [u8; 4] = *b"TAFI";
pub const VIDEO_MAGIC: [u8; 4] = *b"TAFV";
pub const IMAGE_VERSION: u32 = 1;
pub const VIDEO_VERSION: u32 = 1;

pub const IMAGE_HEADER_LENGTH: usize = 20;
pub const VIDEO_HEADER_LENGTH: usize = 16;
pub const FRAME_LENGTH_PREFIX: usize = 4;
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Image,
    Video,
}

impl ContainerKind {
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match bytes.get(..4)? {
            magic if magic == IMAGE_MAGIC => Some(Self::Image),
            magic if magic == VIDEO_MAGIC => Some(Self::Video),
            _ => None,
        }
    }
}

fn check_magic(reader: &mut ByteReader, expected: [u8; 4]) -> Result<(), FormatError> {
    let available = reader.number_of_bytes_left().min(4);
    let found = reader.read_bytes(available, "magic")?;

    if found != expected {
        return Err(FormatError::BadMagic {
            expected,
            found: found.to_vec(),
        });
    }

    Ok(())
}

fn check_version(version: u32, supported: u32, container: &str) {
    if version != supported {
        warn!(
            version,
            "{} container has an unknown version, reading it as v{}",
            container,
            supported
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub version: u32,
    pub resolution: Resolution,
    pub payload_length: u32,
}

impl ImageHeader {
    pub fn new(resolution: Resolution) -> Result<Self, FormatError> {
        let payload_length = resolution
            .byte_length(BYTES_PER_PIXEL)
            .ok_or(FormatError::ImageTooLarge {
                width: resolution.width,
                height: resolution.height,
            })?;

        Ok(Self {
            version: IMAGE_VERSION,
            resolution,
            payload_length: u32::try_from(payload_length)
                .map_err(|_| FormatError::FrameTooLarge(payload_length))?,
        })
    }

    pub fn to_bytes(&self) -> [u8; IMAGE_HEADER_LENGTH] {
        let mut bytes = [0; IMAGE_HEADER_LENGTH];
        bytes[0..4].copy_from_slice(&IMAGE_MAGIC);
        LittleEndian::write_u32(&mut bytes[4..8], self.version);
        LittleEndian::write_u32(&mut bytes[8..12], self.resolution.width);
        LittleEndian::write_u32(&mut bytes[12..16], self.resolution.height);
        LittleEndian::write_u32(&mut bytes[16..20], self.payload_length);

        bytes
    }

    /// Reads the header, leaving `reader` positioned at the first sample.
    pub fn read(reader: &mut ByteReader) -> Result<Self, FormatError> {
        check_magic(reader, IMAGE_MAGIC)?;
        let version = reader.read_u32_le("image version")?;
        let width = reader.read_u32_le("image width")?;
        let height = reader.read_u32_le("image height")?;
        let payload_length = reader.read_u32_le("image payload length")?;
        check_version(version, IMAGE_VERSION, "image");

        Ok(Self {
            version,
            resolution: Resolution::new(width, height),
            payload_length,
        })
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::read(&mut ByteReader::new(bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoHeader {
    pub version: u32,
    pub frame_rate: f32,
    pub frame_count: u32,
}

impl VideoHeader {
    pub fn new(frame_rate: f32, frame_count: u32) -> Self {
        Self {
            version: VIDEO_VERSION,
            frame_rate,
            frame_count,
        }
    }

    pub fn to_bytes(&self) -> [u8; VIDEO_HEADER_LENGTH] {
        let mut bytes = [0; VIDEO_HEADER_LENGTH];
        bytes[0..4].copy_from_slice(&VIDEO_MAGIC);
        LittleEndian::write_u32(&mut bytes[4..8], self.version);
        LittleEndian::write_f32(&mut bytes[8..12], self.frame_rate);
        LittleEndian::write_u32(&mut bytes[12..16], self.frame_count);

        bytes
    }

    pub fn read(reader: &mut ByteReader) -> Result<Self, FormatError> {
        check_magic(reader, VIDEO_MAGIC)?;
        let version = reader.read_u32_le("video version")?;
        let frame_rate = reader.read_f32_le("video frame rate")?;
        let frame_count = reader.read_u32_le("video frame count")?;
        check_version(version, VIDEO_VERSION, "video");

        Ok(Self {
            version,
            frame_rate,
            frame_count,
        })
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        Self::read(&mut ByteReader::new(bytes))
    }
}
