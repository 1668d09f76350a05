//! Bounds-checked access to the header's data payload.
//!
//! Every read performed by the atom cursor, the format decoders, and the
//! renderer goes through [`ByteRegion`]. This is the single chokepoint
//! that keeps traversal of corruption-exposed EEPROM bytes inside the
//! declared data region.

use thiserror::Error;

/// Errors returned by [`ByteRegion`] accessors.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("read out of bounds: offset {offset} + {len} exceeds region of {region_len} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        region_len: usize,
    },
}

/// Read-only view over a contiguous byte buffer of declared length.
///
/// A `ByteRegion` never owns its bytes; it is a view tied to the caller's
/// buffer and is invalidated with it. Cloning is cheap (copies the
/// reference, not the bytes).
#[derive(Debug, Clone, Copy)]
pub struct ByteRegion<'a> {
    bytes: &'a [u8],
}

impl<'a> ByteRegion<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Declared length of the region in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Result<&'a [u8], RegionError> {
        let end = offset.checked_add(len).ok_or(RegionError::OutOfBounds {
            offset,
            len,
            region_len: self.bytes.len(),
        })?;
        self.bytes.get(offset..end).ok_or(RegionError::OutOfBounds {
            offset,
            len,
            region_len: self.bytes.len(),
        })
    }

    pub fn byte_at(&self, offset: usize) -> Result<u8, RegionError> {
        self.bytes
            .get(offset)
            .copied()
            .ok_or(RegionError::OutOfBounds {
                offset,
                len: 1,
                region_len: self.bytes.len(),
            })
    }
}
