use crate::{error::Result, quantization::Quality};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub quality: Quality,
    /// Spread pixel quantization and frame encoding over the rayon pool.
    pub parallel: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            parallel: true,
        }
    }
}

impl EncoderConfig {
    pub fn new(quality: Quality, parallel: bool) -> Self {
        Self { quality, parallel }
    }

    pub fn with_quality(quality: Quality) -> Self {
        Self {
            quality,
            ..Default::default()
        }
    }
}

#[derive(Debug, Default)]
pub struct PartialEncoderConfig {
    quality: Option<u8>,
    parallel: Option<bool>,
}

impl PartialEncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    pub fn build(self) -> Result<EncoderConfig> {
        let defaults = EncoderConfig::default();
        let quality = match self.quality {
            Some(value) => Quality::new(value)?,
            None => defaults.quality,
        };

        Ok(EncoderConfig {
            quality,
            parallel: self.parallel.unwrap_or(defaults.parallel),
        })
    }
}
