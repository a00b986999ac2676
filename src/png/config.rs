use crate::image::Image;

use super::ColorType;

#[derive(Clone, Copy, Debug, Default)]
pub enum CompressionLevel {
    None,
    #[default]
    Best,
    Fast,
}

impl CompressionLevel {
    pub fn to_zlib_level(&self) -> u32 {
        match self {
            CompressionLevel::None => 0,
            CompressionLevel::Best => 9,
            CompressionLevel::Fast => 1,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PngConfig {
    pub compression_level: CompressionLevel,
    pub color_type: ColorType,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PartialPngConfig {
    compression_level: Option<CompressionLevel>,
    color_type: Option<ColorType>,
}

impl PartialPngConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compression_level(mut self, compression_level: CompressionLevel) -> Self {
        self.compression_level = Some(compression_level);
        self
    }

    pub fn color_type(mut self, color_type: ColorType) -> Self {
        self.color_type = Some(color_type);
        self
    }
}

impl PngConfig {
    /// Fills in unset fields by looking at the image: alpha is only stored
    /// when some pixel is not fully opaque.
    pub fn create_from_partial(partial_config: PartialPngConfig, image: &Image) -> Self {
        let color_type = partial_config.color_type.unwrap_or_else(|| {
            if image.pixels().iter().all(|px| px.is_opaque()) {
                ColorType::Truecolor
            } else {
                ColorType::TrueColorAlpha
            }
        });

        Self {
            compression_level: partial_config.compression_level.unwrap_or_default(),
            color_type,
        }
    }
}
