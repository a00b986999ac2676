pub const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const CHUNK_METADATA_LENGTH: usize = 12;

pub const IHDR_CHUNK_TYPE: &[u8] = b"IHDR";
pub const IHDR_DATA_LENGTH: usize = 13;

pub const IDAT_CHUNK_TYPE: &[u8] = b"IDAT";
pub const IDAT_CHUNK_MAX_SIZE: usize = 1 << 20;

pub const IEND_CHUNK_TYPE: &[u8] = b"IEND";

pub const SUPPORTED_BIT_DEPTH: u8 = 8;
