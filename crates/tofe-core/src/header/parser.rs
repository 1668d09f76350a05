use super::error::HeaderError;
use super::layout;
use crate::atom::AtomCursor;
use crate::region::ByteRegion;

/// Decoded TOFE header plus a view of its data region.
///
/// `atom_count` is advisory metadata: traversal trusts the declared data
/// length, not the count (a corrupt count must not widen reads).
#[derive(Debug, Clone, Copy)]
pub struct Header<'a> {
    pub version: u8,
    pub atom_count: u8,
    pub crc8: u8,
    data: ByteRegion<'a>,
    image: &'a [u8],
}

impl<'a> Header<'a> {
    /// The data region holding the packed atoms.
    pub fn data(&self) -> ByteRegion<'a> {
        self.data
    }

    /// Declared data length in bytes.
    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    /// Enumerate the atoms in the data region: a lazy, finite,
    /// restartable walk (each call starts a fresh cursor at offset 0).
    pub fn atoms(&self) -> AtomCursor<'a> {
        AtomCursor::new(self.data)
    }

    /// The byte ranges covered by the checksum: every image byte except
    /// the stored crc byte itself. The CRC algorithm is the caller's
    /// collaborator concern; this only fixes the input.
    pub fn crc_input(&self) -> (&'a [u8], &'a [u8]) {
        (
            &self.image[..layout::CRC_OFFSET],
            &self.image[layout::CRC_OFFSET + 1..],
        )
    }
}

/// Decode the fixed header and bind the declared data region.
///
/// Trailing bytes past the declared data length are ignored: EEPROM
/// dumps are usually full-device reads and the TOFE area rarely fills
/// the part.
pub fn decode_header(bytes: &[u8]) -> Result<Header<'_>, HeaderError> {
    if bytes.len() < layout::HEADER_SIZE {
        return Err(HeaderError::TooShort {
            needed: layout::HEADER_SIZE,
            actual: bytes.len(),
        });
    }

    let magic = &bytes[layout::MAGIC_RANGE];
    if magic != layout::MAGIC {
        let mut actual = [0u8; 5];
        actual.copy_from_slice(magic);
        return Err(HeaderError::BadMagic {
            expected: *layout::MAGIC,
            actual,
        });
    }

    let version = bytes[layout::VERSION_OFFSET];
    let atom_count = bytes[layout::ATOM_COUNT_OFFSET];
    let crc8 = bytes[layout::CRC_OFFSET];

    let len_bytes = &bytes[layout::DATA_LEN_RANGE];
    let data_len =
        u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]) as usize;

    let data_end = layout::HEADER_SIZE
        .checked_add(data_len)
        .ok_or(HeaderError::TruncatedData {
            declared: data_len,
            actual: bytes.len() - layout::HEADER_SIZE,
        })?;
    if bytes.len() < data_end {
        return Err(HeaderError::TruncatedData {
            declared: data_len,
            actual: bytes.len() - layout::HEADER_SIZE,
        });
    }

    Ok(Header {
        version,
        atom_count,
        crc8,
        data: ByteRegion::new(&bytes[layout::DATA_OFFSET..data_end]),
        image: &bytes[..data_end],
    })
}
