use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("image too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("bad magic: expected {expected:02x?}, got {actual:02x?}")]
    BadMagic { expected: [u8; 5], actual: [u8; 5] },
    #[error("truncated data region: header declares {declared} bytes, image holds {actual}")]
    TruncatedData { declared: usize, actual: usize },
}
