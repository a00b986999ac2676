pub mod image_sequence_demuxer;
pub mod raw_image_demuxer;

pub use image_sequence_demuxer::ImageSequenceDemuxer;
pub use raw_image_demuxer::RawImageDemuxer;
