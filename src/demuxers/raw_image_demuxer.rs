use std::collections::VecDeque;

use crate::{error::Result, image::Image, stream::FrameSource};

/// Serves frames that are already decoded in memory.
pub struct RawImageDemuxer {
    frames: VecDeque<Image>,
    frame_rate: f32,
    frame_count: usize,
}

impl RawImageDemuxer {
    pub fn new(image: Image) -> Self {
        Self::from_frames(vec![image], 0.0)
    }

    pub fn from_frames(frames: Vec<Image>, frame_rate: f32) -> Self {
        Self {
            frame_count: frames.len(),
            frames: frames.into(),
            frame_rate,
        }
    }
}

impl FrameSource for RawImageDemuxer {
    fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn next_frame(&mut self) -> Option<Result<Image>> {
        self.frames.pop_front().map(Ok)
    }
}
