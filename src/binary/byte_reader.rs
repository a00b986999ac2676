use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::error::FormatError;

/// Bounds-checked cursor over a byte slice. Container fields are
/// little-endian; the big-endian reads serve the PNG adapter.
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pub offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.number_of_bytes_left() == 0
    }

    pub fn number_of_bytes_left(&self) -> usize {
        self.bytes.len().saturating_sub(self.offset)
    }

    pub fn read_bytes(&mut self, size: usize, what: &'static str) -> Result<&'a [u8], FormatError> {
        if size > self.number_of_bytes_left() {
            return Err(FormatError::Truncated {
                what,
                offset: self.offset,
                needed: size,
                available: self.number_of_bytes_left(),
            });
        }

        let result = &self.bytes[self.offset..self.offset + size];
        self.offset += size;

        Ok(result)
    }

    pub fn read_byte(&mut self, what: &'static str) -> Result<u8, FormatError> {
        Ok(self.read_bytes(1, what)?[0])
    }

    pub fn read_magic(&mut self, what: &'static str) -> Result<[u8; 4], FormatError> {
        let bytes = self.read_bytes(4, what)?;

        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn read_u32_le(&mut self, what: &'static str) -> Result<u32, FormatError> {
        Ok(LittleEndian::read_u32(self.read_bytes(4, what)?))
    }

    pub fn read_u32_be(&mut self, what: &'static str) -> Result<u32, FormatError> {
        Ok(BigEndian::read_u32(self.read_bytes(4, what)?))
    }

    pub fn read_f32_le(&mut self, what: &'static str) -> Result<f32, FormatError> {
        Ok(LittleEndian::read_f32(self.read_bytes(4, what)?))
    }
}
