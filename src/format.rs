use std::{fs, path::Path};

use crate::{
    error::{Result, TafError},
    image::Image,
    png::{decode_png, encode_png, is_png_by_signature, PartialPngConfig},
    ppm::{decode_ppm, encode_ppm, is_ppm_by_signature},
};

/// Standard raster formats frames can be read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Png,
    Ppm,
}

pub const SUPPORTED_FORMATS: [FileFormat; 2] = [FileFormat::Png, FileFormat::Ppm];

impl FileFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Png => "png",
            FileFormat::Ppm => "ppm",
        }
    }

    pub fn is_format_by_signature(&self, file: &[u8]) -> bool {
        match self {
            FileFormat::Png => is_png_by_signature(file),
            FileFormat::Ppm => is_ppm_by_signature(file),
        }
    }

    pub fn is_format_by_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.extension()))
    }

    pub fn from_signature(file: &[u8]) -> Option<Self> {
        SUPPORTED_FORMATS
            .into_iter()
            .find(|format| format.is_format_by_signature(file))
    }

    pub fn from_extension(path: &Path) -> Option<Self> {
        SUPPORTED_FORMATS
            .into_iter()
            .find(|format| format.is_format_by_extension(path))
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Image> {
        match self {
            FileFormat::Png => decode_png(bytes),
            FileFormat::Ppm => decode_ppm(bytes),
        }
    }

    pub fn encode(&self, image: &Image) -> Result<Vec<u8>> {
        match self {
            FileFormat::Png => encode_png(image, PartialPngConfig::new()),
            FileFormat::Ppm => Ok(encode_ppm(image)),
        }
    }
}

pub fn read_image(path: &Path) -> Result<Image> {
    let bytes = fs::read(path).map_err(|err| TafError::resource(path, err))?;
    let format = FileFormat::from_signature(&bytes)
        .or_else(|| FileFormat::from_extension(path))
        .ok_or_else(|| {
            TafError::resource(
                path,
                std::io::Error::new(std::io::ErrorKind::InvalidData, "unrecognized image format"),
            )
        })?;

    format.decode(&bytes)
}

/// Picks the format from the path's extension, defaulting to PNG.
pub fn write_image(path: &Path, image: &Image) -> Result<()> {
    let format = FileFormat::from_extension(path).unwrap_or(FileFormat::Png);
    let bytes = format.encode(image)?;

    fs::write(path, bytes).map_err(|err| TafError::resource(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_by_signature_before_extension() {
        assert_eq!(FileFormat::from_signature(b"P6 1 1 255\n"), Some(FileFormat::Ppm));
        assert_eq!(
            FileFormat::from_signature(&[0x89, b'P', b'N', b'G', 13, 10, 26, 10]),
            Some(FileFormat::Png)
        );
        assert_eq!(FileFormat::from_signature(b"TAFI"), None);
        assert_eq!(
            FileFormat::from_extension(Path::new("frames/out.PNG")),
            Some(FileFormat::Png)
        );
        assert_eq!(FileFormat::from_extension(Path::new("out.tafi")), None);
    }
}
