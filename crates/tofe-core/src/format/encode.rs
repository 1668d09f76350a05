//! Write-side counterparts of the format decoders, plus an image
//! builder assembling a full header-and-atoms EEPROM image.
//!
//! The builder fills in the atom count and data length; the crc byte
//! comes from a caller-supplied checksum function, since the CRC
//! algorithm is owned by an external collaborator.

use thiserror::Error;

use super::license::LicenseCode;
use crate::header::layout as header_layout;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("atom payload of {len} bytes exceeds the 255-byte length field")]
    PayloadTooLong { len: usize },
    #[error("image already holds 255 atoms")]
    TooManyAtoms,
    #[error("size_offset value {value:#x} does not fit a {bits}-bit field")]
    ValueTooLarge { value: u32, bits: u8 },
}

/// Field width of a size_offset pair. Payload length is twice this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldWidth {
    U8,
    U16,
    U32,
}

impl FieldWidth {
    fn bytes(self) -> usize {
        match self {
            FieldWidth::U8 => 1,
            FieldWidth::U16 => 2,
            FieldWidth::U32 => 4,
        }
    }
}

/// Encode an integer into its minimal 1-4 little-endian bytes.
pub fn encode_expand_int(value: u32) -> Vec<u8> {
    let bytes = value.to_le_bytes();
    let used = match value {
        0..=0xFF => 1,
        0x100..=0xFFFF => 2,
        0x1_0000..=0xFF_FFFF => 3,
        _ => 4,
    };
    bytes[..used].to_vec()
}

pub fn encode_license(code: LicenseCode) -> Vec<u8> {
    vec![code.0]
}

pub fn encode_relative_url(referenced: u8, path: &str) -> Vec<u8> {
    let mut payload = Vec::with_capacity(1 + path.len());
    payload.push(referenced);
    payload.extend_from_slice(path.as_bytes());
    payload
}

/// Encode a (size, offset) pair at the given field width, size first.
pub fn encode_size_offset(
    size: u32,
    offset: u32,
    width: FieldWidth,
) -> Result<Vec<u8>, EncodeError> {
    let bytes = width.bytes();
    let bits = (bytes * 8) as u8;
    for value in [size, offset] {
        if bytes < 4 && value >= 1u32 << bits {
            return Err(EncodeError::ValueTooLarge { value, bits });
        }
    }
    let mut payload = Vec::with_capacity(bytes * 2);
    payload.extend_from_slice(&size.to_le_bytes()[..bytes]);
    payload.extend_from_slice(&offset.to_le_bytes()[..bytes]);
    Ok(payload)
}

/// Assembles a TOFE image: fixed header followed by packed atoms.
#[derive(Debug, Default)]
pub struct ImageBuilder {
    version: u8,
    atoms: Vec<u8>,
    count: u8,
}

impl ImageBuilder {
    pub fn new(version: u8) -> Self {
        Self {
            version,
            atoms: Vec::new(),
            count: 0,
        }
    }

    /// Append one atom. Text atoms pass `text.as_bytes()` directly.
    pub fn push_atom(&mut self, type_code: u8, payload: &[u8]) -> Result<&mut Self, EncodeError> {
        if payload.len() > u8::MAX as usize {
            return Err(EncodeError::PayloadTooLong { len: payload.len() });
        }
        if self.count == u8::MAX {
            return Err(EncodeError::TooManyAtoms);
        }
        self.atoms.push(type_code);
        self.atoms.push(payload.len() as u8);
        self.atoms.extend_from_slice(payload);
        self.count += 1;
        Ok(self)
    }

    /// Produce the image, obtaining the crc byte from `checksum`, which
    /// receives the two byte ranges the checksum covers (everything
    /// before and after the crc byte).
    pub fn finish(self, checksum: impl FnOnce(&[u8], &[u8]) -> u8) -> Vec<u8> {
        let mut image = Vec::with_capacity(header_layout::HEADER_SIZE + self.atoms.len());
        image.extend_from_slice(header_layout::MAGIC);
        image.push(self.version);
        image.push(self.count);
        image.push(0); // crc placeholder
        image.extend_from_slice(&(self.atoms.len() as u32).to_le_bytes());
        image.extend_from_slice(&self.atoms);

        let crc = checksum(
            &image[..header_layout::CRC_OFFSET],
            &image[header_layout::CRC_OFFSET + 1..],
        );
        image[header_layout::CRC_OFFSET] = crc;
        image
    }
}
