use crate::{
    binary::byte_reader::ByteReader,
    error::{Result, TafError},
};

use super::{consts::CHUNK_METADATA_LENGTH, crc::CrcCalculator};

pub mod iend;
pub mod ihdr;

#[derive(Debug)]
pub struct Chunk<'a> {
    pub chunk_type: &'a [u8],
    pub chunk_data: &'a [u8],
    crc: u32,
}

impl<'a> Chunk<'a> {
    pub fn new(
        chunk_type: &'a [u8],
        chunk_data: &'a [u8],
        crc_calculator: &mut CrcCalculator,
    ) -> Chunk<'a> {
        let crc = crc_calculator.chunk_crc(chunk_type, chunk_data);

        Self {
            chunk_type,
            chunk_data,
            crc,
        }
    }

    pub fn read(reader: &mut ByteReader<'a>, crc_calculator: &mut CrcCalculator) -> Result<Chunk<'a>> {
        let length = reader.read_u32_be("png chunk length")? as usize;
        let chunk_type = reader.read_bytes(4, "png chunk type")?;
        let chunk_data = reader.read_bytes(length, "png chunk data")?;
        let crc = reader.read_u32_be("png chunk crc")?;

        let expected = crc_calculator.chunk_crc(chunk_type, chunk_data);
        if crc != expected {
            return Err(TafError::Png(format!(
                "crc mismatch in {} chunk: stored {crc:08x}, computed {expected:08x}",
                String::from_utf8_lossy(chunk_type)
            )));
        }

        Ok(Chunk {
            chunk_type,
            chunk_data,
            crc,
        })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let length = self.chunk_data.len();
        let mut result = Vec::with_capacity(CHUNK_METADATA_LENGTH + length);

        result.extend_from_slice(&(length as u32).to_be_bytes());
        result.extend_from_slice(self.chunk_type);
        result.extend_from_slice(self.chunk_data);
        result.extend_from_slice(&self.crc.to_be_bytes());

        result
    }
}
