use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expand_int payload of {len} bytes exceeds the 4-byte maximum")]
    ValueTooWide { len: usize },
    #[error("{family} payload must be {expected} bytes, got {len}")]
    InvalidWidth {
        family: &'static str,
        expected: &'static str,
        len: usize,
    },
    #[error("relative URL references atom {index}, which is missing or not a URL atom")]
    BadReference { index: u8 },
}
