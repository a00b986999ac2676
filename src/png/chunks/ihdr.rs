use crate::{
    error::{Result, TafError},
    image::Resolution,
    png::{
        color_type::ColorType,
        consts::{IHDR_CHUNK_TYPE, IHDR_DATA_LENGTH, SUPPORTED_BIT_DEPTH},
        crc::CrcCalculator,
    },
    png_assert,
};

use super::Chunk;

const DEFLATE_COMPRESSION_METHOD: u8 = 0;
const ADAPTIVE_FILTER_METHOD: u8 = 0;
const NO_INTERLACE: u8 = 0;

#[derive(Debug)]
pub struct Ihdr {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    compression_method: u8,
    filter_method: u8,
    interlace_method: u8,
}

impl Ihdr {
    pub fn new(resolution: Resolution, color_type: ColorType) -> Self {
        Self {
            width: resolution.width,
            height: resolution.height,
            bit_depth: SUPPORTED_BIT_DEPTH,
            color_type,
            compression_method: DEFLATE_COMPRESSION_METHOD,
            filter_method: ADAPTIVE_FILTER_METHOD,
            interlace_method: NO_INTERLACE,
        }
    }

    pub fn to_bytes(&self, crc_calculator: &mut CrcCalculator) -> Vec<u8> {
        let mut data = Vec::with_capacity(IHDR_DATA_LENGTH);
        data.extend_from_slice(&self.width.to_be_bytes());
        data.extend_from_slice(&self.height.to_be_bytes());
        data.push(self.bit_depth);
        data.push(self.color_type.into());
        data.push(self.compression_method);
        data.push(self.filter_method);
        data.push(self.interlace_method);

        Chunk::new(IHDR_CHUNK_TYPE, &data, crc_calculator).to_bytes()
    }

    pub fn from_chunk(chunk: Chunk) -> Result<Self> {
        png_assert!(
            chunk.chunk_type == IHDR_CHUNK_TYPE,
            format!("Expected IHDR chunk, found {:?}", chunk.chunk_type)
        );
        png_assert!(
            chunk.chunk_data.len() == IHDR_DATA_LENGTH,
            format!(
                "Invalid IHDR chunk size, expected {}, received {}",
                IHDR_DATA_LENGTH,
                chunk.chunk_data.len()
            )
        );

        let data = chunk.chunk_data;
        Ok(Self {
            width: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            height: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            bit_depth: data[8],
            color_type: ColorType::try_from(data[9])?,
            compression_method: data[10],
            filter_method: data[11],
            interlace_method: data[12],
        })
    }

    pub fn check_compatibility(&self) -> Result<()> {
        png_assert!(
            self.compression_method == DEFLATE_COMPRESSION_METHOD,
            "Unsupported compression method"
        );
        png_assert!(
            self.filter_method == ADAPTIVE_FILTER_METHOD,
            "Only adaptive filtering is supported"
        );
        png_assert!(
            self.interlace_method == NO_INTERLACE,
            "Interlaced images are not supported"
        );
        png_assert!(
            self.bit_depth == SUPPORTED_BIT_DEPTH,
            format!("Unsupported bit depth {}", self.bit_depth)
        );
        png_assert!(
            self.color_type != ColorType::IndexedColor,
            "Indexed colour images are not supported"
        );

        Ok(())
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.color_type.samples_per_pixel()
    }

    pub fn scanline_length(&self) -> usize {
        (self.width as usize).saturating_mul(self.bytes_per_pixel())
    }
}
