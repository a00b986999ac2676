use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{
    error::{Result, TafError},
    format::FileFormat,
    image::Image,
    stream::FrameSink,
};

/// Writes each frame to `<directory>/<prefix>_<n>.<ext>`, numbering from 1.
pub struct ImageSequenceMuxer {
    directory: PathBuf,
    prefix: String,
    format: FileFormat,
    frames_written: usize,
}

impl ImageSequenceMuxer {
    pub fn new(directory: &Path, prefix: &str, format: FileFormat) -> Result<Self> {
        fs::create_dir_all(directory).map_err(|err| TafError::resource(directory, err))?;

        Ok(Self {
            directory: directory.to_path_buf(),
            prefix: prefix.to_string(),
            format,
            frames_written: 0,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn frame_path(&self, frame_number: usize) -> PathBuf {
        self.directory.join(format!(
            "{}_{:05}.{}",
            self.prefix,
            frame_number,
            self.format.extension()
        ))
    }
}

impl FrameSink for ImageSequenceMuxer {
    fn write_frame(&mut self, image: &Image) -> Result<()> {
        let path = self.frame_path(self.frames_written + 1);
        let bytes = self.format.encode(image)?;
        fs::write(&path, bytes).map_err(|err| TafError::resource(&path, err))?;
        self.frames_written += 1;
        debug!(path = %path.display(), "wrote frame");

        Ok(())
    }

    fn finish(self) -> Result<()> {
        info!(
            frames = self.frames_written,
            directory = %self.directory.display(),
            "finished writing frames"
        );

        Ok(())
    }
}
