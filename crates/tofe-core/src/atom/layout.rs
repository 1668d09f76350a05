pub const TYPE_OFFSET: usize = 0;
pub const LEN_OFFSET: usize = 1;
pub const ATOM_HEADER_SIZE: usize = 2;

/// Reserved type codes marking an invalid/terminator atom.
pub const TYPE_INVALID_ZERO: u8 = 0x00;
pub const TYPE_INVALID_ONES: u8 = 0xFF;
