use byteorder::{ByteOrder, LittleEndian};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::{
    binary::byte_reader::ByteReader,
    config::EncoderConfig,
    container::{VideoHeader, FRAME_LENGTH_PREFIX, IMAGE_HEADER_LENGTH, VIDEO_HEADER_LENGTH},
    error::{FormatError, Result, TafError},
    image::Image,
    stream::FrameSource,
};

use super::image::{encode_image, read_image};

#[derive(Debug, Clone, PartialEq)]
pub struct Video {
    pub frame_rate: f32,
    pub frames: Vec<Image>,
}

/// Frames are encoded independently (in parallel when configured) and
/// written in source order, each behind a u32 length prefix.
pub fn encode_video(frames: &[Image], frame_rate: f32, config: &EncoderConfig) -> Result<Vec<u8>> {
    let frame_count =
        u32::try_from(frames.len()).map_err(|_| FormatError::FrameTooLarge(frames.len()))?;
    if frames.is_empty() {
        warn!("encoding a video without frames, it will not decode");
    }

    let encoded_frames: Vec<Vec<u8>> = if config.parallel {
        frames
            .par_iter()
            .map(|frame| encode_image(frame, config))
            .collect::<Result<_>>()?
    } else {
        frames
            .iter()
            .map(|frame| encode_image(frame, config))
            .collect::<Result<_>>()?
    };

    let total_length = VIDEO_HEADER_LENGTH
        + encoded_frames
            .iter()
            .map(|frame| FRAME_LENGTH_PREFIX + frame.len())
            .sum::<usize>();
    let mut encoded_video = Vec::with_capacity(total_length);
    encoded_video.extend_from_slice(&VideoHeader::new(frame_rate, frame_count).to_bytes());

    for (index, frame) in encoded_frames.iter().enumerate() {
        let mut frame_length = [0; FRAME_LENGTH_PREFIX];
        LittleEndian::write_u32(
            &mut frame_length,
            u32::try_from(frame.len()).map_err(|_| FormatError::FrameTooLarge(frame.len()))?,
        );
        encoded_video.extend_from_slice(&frame_length);
        encoded_video.extend_from_slice(frame);
        trace!(frame = index + 1, frame_count, bytes = frame.len(), "wrote frame");
    }

    debug!(
        frame_count,
        frame_rate,
        bytes = encoded_video.len(),
        "encoded video"
    );

    Ok(encoded_video)
}

/// Drains a frame source and encodes it. The source's declared count is only
/// advisory, the header records the frames actually produced.
pub fn encode_stream(source: &mut impl FrameSource, config: &EncoderConfig) -> Result<Vec<u8>> {
    let declared = source.frame_count();
    let mut frames = Vec::with_capacity(declared);
    while let Some(frame) = source.next_frame() {
        frames.push(frame?);
    }

    if frames.len() != declared {
        warn!(
            declared,
            produced = frames.len(),
            "frame source produced a different number of frames than it declared"
        );
    }

    encode_video(&frames, source.frame_rate(), config)
}

/// Decodes every frame. A container without frames is rejected, as is one
/// with a malformed frame. When the stream is cut short after at least one
/// frame, the frames read before the cut are returned inside
/// [`TafError::TruncatedVideo`].
pub fn decode_video(bytes: &[u8]) -> Result<Video> {
    let mut reader = VideoReader::new(bytes)?;
    if reader.header().frame_count == 0 {
        return Err(FormatError::NoFrames.into());
    }

    // The header count is untrusted, every frame takes at least a length
    // prefix and an image header.
    let room = bytes.len().saturating_sub(VIDEO_HEADER_LENGTH)
        / (FRAME_LENGTH_PREFIX + IMAGE_HEADER_LENGTH);
    let mut frames = Vec::with_capacity(room.min(reader.header().frame_count as usize));
    for frame in &mut reader {
        match frame {
            Ok(frame) => frames.push(frame),
            Err(source @ FormatError::Truncated { .. }) if !frames.is_empty() => {
                return Err(TafError::TruncatedVideo {
                    decoded: frames,
                    source,
                })
            }
            Err(source) => return Err(source.into()),
        }
    }

    Ok(Video {
        frame_rate: reader.header().frame_rate,
        frames,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReaderState {
    StreamingFrames,
    Done,
    Failed,
}

/// Streams frames out of a video container in stored order.
///
/// The header is validated up front. After the last frame, or after the
/// first error, the iterator yields nothing more.
pub struct VideoReader<'a> {
    reader: ByteReader<'a>,
    header: VideoHeader,
    frames_read: u32,
    state: ReaderState,
}

impl<'a> VideoReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);
        let header = VideoHeader::read(&mut reader)?;
        debug!(
            frame_rate = header.frame_rate,
            frame_count = header.frame_count,
            "read video header"
        );

        Ok(Self {
            reader,
            header,
            frames_read: 0,
            state: if header.frame_count == 0 {
                ReaderState::Done
            } else {
                ReaderState::StreamingFrames
            },
        })
    }

    pub fn header(&self) -> &VideoHeader {
        &self.header
    }

    pub fn frame_rate(&self) -> f32 {
        self.header.frame_rate
    }

    pub fn frames_read(&self) -> u32 {
        self.frames_read
    }

    pub fn has_failed(&self) -> bool {
        self.state == ReaderState::Failed
    }

    fn read_frame(&mut self) -> std::result::Result<Image, FormatError> {
        let frame_length = self.reader.read_u32_le("frame length")? as usize;
        let frame_bytes = self.reader.read_bytes(frame_length, "frame body")?;

        read_image(&mut ByteReader::new(frame_bytes))
    }
}

impl Iterator for VideoReader<'_> {
    type Item = std::result::Result<Image, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != ReaderState::StreamingFrames {
            return None;
        }

        let frame = self.read_frame();
        match &frame {
            Ok(_) => {
                self.frames_read += 1;
                trace!(frame = self.frames_read, frame_count = self.header.frame_count, "read frame");
                if self.frames_read == self.header.frame_count {
                    self.state = ReaderState::Done;
                }
            }
            Err(err) => {
                warn!(frame = self.frames_read + 1, %err, "failed reading frame");
                self.state = ReaderState::Failed;
            }
        }

        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.state {
            ReaderState::StreamingFrames => {
                (0, Some((self.header.frame_count - self.frames_read) as usize))
            }
            _ => (0, Some(0)),
        }
    }
}
