use crate::{error::Result, image::Image};

/// A finite sequence of decoded frames whose length is known before the
/// first frame is pulled.
pub trait FrameSource {
    fn frame_rate(&self) -> f32;
    fn frame_count(&self) -> usize;
    fn next_frame(&mut self) -> Option<Result<Image>>;
}

/// Receives decoded frames in order and writes them out in some standard format.
pub trait FrameSink {
    fn write_frame(&mut self, image: &Image) -> Result<()>;

    fn finish(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}
