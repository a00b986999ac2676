pub mod image;
pub mod video;

pub use image::{decode_image, encode_image};
pub use video::{decode_video, encode_stream, encode_video, Video, VideoReader};
