//! Codec for the Anything File containers: `TAFI` still images and `TAFV`
//! videos holding lossy-quantized RGBA samples.

pub mod algebra;
pub mod binary;
pub mod codec;
pub mod colors;
pub mod config;
pub mod container;
pub mod demuxers;
pub mod error;
pub mod format;
pub mod image;
pub mod muxers;
pub mod png;
pub mod ppm;
pub mod quantization;
pub mod stream;

pub use codec::{
    decode_image, decode_video, encode_image, encode_stream, encode_video, Video, VideoReader,
};
pub use colors::Rgba;
pub use config::{EncoderConfig, PartialEncoderConfig};
pub use container::{ContainerKind, ImageHeader, VideoHeader};
pub use error::{FormatError, Result, TafError};
pub use image::{Image, Resolution};
pub use quantization::Quality;
pub use stream::{FrameSink, FrameSource};
