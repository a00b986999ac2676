//! Generic tagged chunk header reserved for future container kinds.
//!
//! Nothing in the image or video paths reads or writes these yet. The flag
//! bits are carried verbatim and have no effect on the payload.

use byteorder::{ByteOrder, LittleEndian};

use crate::{binary::byte_reader::ByteReader, error::FormatError};

pub const CHUNK_HEADER_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    Text,
    Raw,
    Image,
    Video,
    AnimatedImage,
    Project,
    Audio,
}

impl TryFrom<u8> for ChunkType {
    type Error = FormatError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Text),
            2 => Ok(Self::Raw),
            3 => Ok(Self::Image),
            4 => Ok(Self::Video),
            5 => Ok(Self::AnimatedImage),
            6 => Ok(Self::Project),
            7 => Ok(Self::Audio),
            _ => Err(FormatError::UnknownChunkType(value)),
        }
    }
}

impl From<ChunkType> for u8 {
    fn from(value: ChunkType) -> Self {
        match value {
            ChunkType::Text => 1,
            ChunkType::Raw => 2,
            ChunkType::Image => 3,
            ChunkType::Video => 4,
            ChunkType::AnimatedImage => 5,
            ChunkType::Project => 6,
            ChunkType::Audio => 7,
        }
    }
}

/// Reserved flag bits. Stored and returned as-is, never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChunkFlags(pub u8);

impl ChunkFlags {
    pub const COMPRESSED: u8 = 0b001;
    pub const HIDDEN: u8 = 0b010;
    pub const ENCRYPTED: u8 = 0b100;

    pub fn contains(&self, flag: u8) -> bool {
        self.0 & flag == flag
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub chunk_type: ChunkType,
    pub flags: ChunkFlags,
    pub length: u32,
}

impl ChunkHeader {
    pub fn new(chunk_type: ChunkType, length: u32) -> Self {
        Self {
            chunk_type,
            flags: ChunkFlags::default(),
            length,
        }
    }

    pub fn to_bytes(&self) -> [u8; CHUNK_HEADER_LENGTH] {
        let mut bytes = [0; CHUNK_HEADER_LENGTH];
        bytes[0] = self.chunk_type.into();
        bytes[1] = self.flags.0;
        LittleEndian::write_u32(&mut bytes[2..6], self.length);

        bytes
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        let mut reader = ByteReader::new(bytes);
        let chunk_type = reader.read_byte("chunk type")?;
        let flags = ChunkFlags(reader.read_byte("chunk flags")?);
        let length = reader.read_u32_le("chunk length")?;

        Ok(Self {
            chunk_type: ChunkType::try_from(chunk_type)?,
            flags,
            length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_uses_type_flags_length_layout() {
        let header = ChunkHeader {
            chunk_type: ChunkType::Video,
            flags: ChunkFlags(ChunkFlags::COMPRESSED | ChunkFlags::ENCRYPTED),
            length: 0x0102_0304,
        };
        let bytes = header.to_bytes();

        assert_eq!(bytes, [4, 0b101, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(ChunkHeader::parse(&bytes), Ok(header));
        assert!(header.flags.contains(ChunkFlags::ENCRYPTED));
        assert!(!header.flags.contains(ChunkFlags::HIDDEN));
    }

    #[test]
    fn unknown_type_is_reported() {
        assert_eq!(
            ChunkHeader::parse(&[9, 0, 0, 0, 0, 0]),
            Err(FormatError::UnknownChunkType(9))
        );
        assert!(ChunkHeader::parse(&[3, 0, 0]).is_err());
    }
}
