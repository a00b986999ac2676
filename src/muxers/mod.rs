pub mod image_sequence_muxer;

pub use image_sequence_muxer::ImageSequenceMuxer;
