//! TOFE EEPROM header decoding.
//!
//! The image starts with a fixed 12-byte header (magic, format version,
//! atom count, crc8, data length) followed by the packed atom data.
//! Byte offsets live in `layout`, decoding in `parser`. The checksum is
//! never validated here: the header exposes the stored byte and the
//! input range so an external collaborator can validate with whatever
//! CRC it implements.

pub mod error;
pub mod layout;
pub mod parser;

pub use error::HeaderError;
pub use parser::{Header, decode_header};
