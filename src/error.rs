use std::path::PathBuf;

use thiserror::Error;

use crate::image::Image;

#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("bad magic: expected {expected:?}, found {found:?}")]
    BadMagic { expected: [u8; 4], found: Vec<u8> },

    #[error("truncated {what} at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("degenerate image {width}x{height}")]
    ZeroArea { width: u32, height: u32 },

    #[error("no frames")]
    NoFrames,

    #[error("{width}x{height} image does not match {pixels} pixels")]
    DimensionMismatch {
        width: u32,
        height: u32,
        pixels: usize,
    },

    #[error("{width}x{height} image is too large to hold in memory")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("unknown chunk type {0}")]
    UnknownChunkType(u8),

    #[error("{0} bytes do not fit in a u32 length field")]
    FrameTooLarge(usize),
}

#[derive(Debug, Error)]
pub enum TafError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("{}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("quality must be within 0..=100, got {0}")]
    InvalidQuality(u8),

    #[error("png: {0}")]
    Png(String),

    #[error("ppm: {0}")]
    Ppm(String),

    /// The video stream ended early. `decoded` holds the frames read before the cut.
    #[error("video truncated after {} frames: {source}", decoded.len())]
    TruncatedVideo {
        decoded: Vec<Image>,
        #[source]
        source: FormatError,
    },
}

impl TafError {
    pub fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Resource {
            path: path.into(),
            source,
        }
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_) | Self::TruncatedVideo { .. })
    }
}

pub type Result<T> = std::result::Result<T, TafError>;
