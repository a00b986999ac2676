use std::{
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::{Result, TafError},
    format::{read_image, FileFormat},
    image::Image,
    stream::FrameSource,
};

/// Reads one PNG or PPM file per frame, in the order given.
pub struct ImageSequenceDemuxer {
    paths: VecDeque<PathBuf>,
    frame_rate: f32,
    frame_count: usize,
}

impl ImageSequenceDemuxer {
    pub fn new(paths: Vec<PathBuf>, frame_rate: f32) -> Self {
        Self {
            frame_count: paths.len(),
            paths: paths.into(),
            frame_rate,
        }
    }

    /// Every supported image in `directory`, sorted by file name.
    pub fn from_directory(directory: &Path, frame_rate: f32) -> Result<Self> {
        let entries =
            fs::read_dir(directory).map_err(|err| TafError::resource(directory, err))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|err| TafError::resource(directory, err))?.path();
            if FileFormat::from_extension(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();
        debug!(directory = %directory.display(), frames = paths.len(), "collected frame files");

        Ok(Self::new(paths, frame_rate))
    }
}

impl FrameSource for ImageSequenceDemuxer {
    fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn next_frame(&mut self) -> Option<Result<Image>> {
        let path = self.paths.pop_front()?;

        Some(read_image(&path))
    }
}
