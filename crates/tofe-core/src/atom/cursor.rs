use super::error::AtomError;
use super::layout;
use crate::region::ByteRegion;

/// One TLV record, viewed in place over the data region.
#[derive(Debug, Clone, Copy)]
pub struct Atom<'a> {
    /// Position in traversal order, starting at 0.
    pub index: u8,
    /// Raw atom type byte (family in the high nibble).
    pub type_code: u8,
    /// Exactly `length` payload bytes as declared by the atom header.
    pub payload: &'a [u8],
}

/// Forward-only walk over the atoms in a region.
///
/// Yields `Ok(Atom)` per record; a record whose declared length would
/// overrun the region yields one `Err(CorruptLength)` and the cursor is
/// exhausted afterwards. Restart by constructing a new cursor.
#[derive(Debug, Clone)]
pub struct AtomCursor<'a> {
    region: ByteRegion<'a>,
    offset: usize,
    index: u8,
    poisoned: bool,
}

impl<'a> AtomCursor<'a> {
    pub fn new(region: ByteRegion<'a>) -> Self {
        Self {
            region,
            offset: 0,
            index: 0,
            poisoned: false,
        }
    }
}

impl<'a> Iterator for AtomCursor<'a> {
    type Item = Result<Atom<'a>, AtomError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }
        // A trailing fragment shorter than an atom header ends the walk.
        if self.offset + layout::ATOM_HEADER_SIZE > self.region.len() {
            return None;
        }

        let type_code = match self.region.byte_at(self.offset + layout::TYPE_OFFSET) {
            Ok(byte) => byte,
            Err(err) => {
                self.poisoned = true;
                return Some(Err(err.into()));
            }
        };
        let declared = match self.region.byte_at(self.offset + layout::LEN_OFFSET) {
            Ok(byte) => byte,
            Err(err) => {
                self.poisoned = true;
                return Some(Err(err.into()));
            }
        };

        let payload_offset = self.offset + layout::ATOM_HEADER_SIZE;
        let payload = match self.region.slice(payload_offset, declared as usize) {
            Ok(payload) => payload,
            Err(_) => {
                self.poisoned = true;
                return Some(Err(AtomError::CorruptLength {
                    index: self.index,
                    offset: self.offset,
                    declared,
                    remaining: self.region.len() - payload_offset,
                }));
            }
        };

        let atom = Atom {
            index: self.index,
            type_code,
            payload,
        };
        self.offset = payload_offset + declared as usize;
        self.index = self.index.wrapping_add(1);
        Some(Ok(atom))
    }
}

/// Fetch the atom at `index` by re-walking the region from offset 0.
///
/// O(index): there is no random access into sequential TLV. Callers
/// that need more than a couple of lookups should iterate an
/// [`AtomCursor`] instead.
pub fn atom_at(region: ByteRegion<'_>, index: u8) -> Result<Atom<'_>, AtomError> {
    let mut count = 0u8;
    for item in AtomCursor::new(region) {
        let atom = item?;
        if atom.index == index {
            return Ok(atom);
        }
        count = count.saturating_add(1);
    }
    Err(AtomError::IndexOutOfRange { index, count })
}
