use thiserror::Error;

use crate::region::RegionError;

#[derive(Debug, Error)]
pub enum AtomError {
    #[error("atom {index} declares {declared} payload bytes, only {remaining} remain at offset {offset}")]
    CorruptLength {
        index: u8,
        offset: usize,
        declared: u8,
        remaining: usize,
    },
    #[error("atom index {index} out of range: region holds {count} atoms")]
    IndexOutOfRange { index: u8, count: u8 },
    #[error(transparent)]
    Region(#[from] RegionError),
}
