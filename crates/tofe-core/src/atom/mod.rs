//! Atom traversal over the header's data region.
//!
//! Atoms are packed TLV records: a type byte, a length byte, then
//! exactly `length` payload bytes. Sequential TLV cannot be indexed
//! without walking, so [`atom_at`] is O(index); callers needing many
//! atoms should iterate an [`AtomCursor`] once instead.
//!
//! A declared length that would overrun the region poisons everything
//! after it (subsequent offsets cannot be trusted), so the cursor fuses
//! after yielding `CorruptLength`.

pub mod cursor;
pub mod error;
pub mod layout;

pub use cursor::{Atom, AtomCursor, atom_at};
pub use error::AtomError;
