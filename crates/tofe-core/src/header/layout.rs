pub const MAGIC: &[u8; 5] = b"TOFE\0";

pub const MAGIC_RANGE: std::ops::Range<usize> = 0..5;
pub const VERSION_OFFSET: usize = 5;
pub const ATOM_COUNT_OFFSET: usize = 6;
pub const CRC_OFFSET: usize = 7;
pub const DATA_LEN_RANGE: std::ops::Range<usize> = 8..12;
pub const DATA_OFFSET: usize = 12;

pub const HEADER_SIZE: usize = DATA_OFFSET;
