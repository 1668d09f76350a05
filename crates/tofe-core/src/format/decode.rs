use super::error::FormatError;
use super::license::LicenseCode;
use super::{FormatFamily, format_of};
use crate::atom::Atom;

/// Typed value decoded from an atom payload.
///
/// A transient view: text is owned, but `Blob` borrows the payload and
/// is invalidated with the underlying buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue<'a> {
    /// Verbatim payload text (stored length is authoritative; no
    /// terminator is assumed or required).
    Text(String),
    /// URL text, stored without the scheme prefix.
    Url(String),
    /// Back-reference to a URL atom plus a path suffix.
    RelativeUrl { referenced: u8, path: String },
    /// 1-4 little-endian payload bytes widened to 32 bits.
    Integer(u32),
    License(LicenseCode),
    /// Equal-width unsigned pair, size stored first.
    SizeOffset { size: u32, offset: u32 },
    /// Raw payload, no interpretation.
    Blob(&'a [u8]),
    /// Reserved type code (0x00/0xFF) or the 0xF0 family.
    Invalid,
    /// Family nibble outside the closed set; payload uninterpreted.
    Unknown,
}

/// Decode an atom's payload according to its format family.
///
/// Total over all type bytes: reserved and unrecognized families decode
/// to the `Invalid`/`Unknown` placeholders rather than failing, so a
/// foreign atom never aborts a traversal that reports per-atom results.
pub fn decode<'a>(atom: &Atom<'a>) -> Result<DecodedValue<'a>, FormatError> {
    match format_of(atom.type_code) {
        FormatFamily::Text => Ok(DecodedValue::Text(payload_text(atom.payload))),
        FormatFamily::Url => Ok(DecodedValue::Url(payload_text(atom.payload))),
        FormatFamily::RelativeUrl => decode_relative_url(atom.payload),
        FormatFamily::ExpandInt => decode_expand_int(atom.payload),
        FormatFamily::License => decode_license(atom.payload),
        FormatFamily::SizeOffset => decode_size_offset(atom.payload),
        FormatFamily::BinaryBlob => Ok(DecodedValue::Blob(atom.payload)),
        FormatFamily::Invalid => Ok(DecodedValue::Invalid),
        FormatFamily::Unknown => Ok(DecodedValue::Unknown),
    }
}

fn payload_text(payload: &[u8]) -> String {
    String::from_utf8_lossy(payload).into_owned()
}

fn decode_relative_url(payload: &[u8]) -> Result<DecodedValue<'_>, FormatError> {
    let (&referenced, path) = payload
        .split_first()
        .ok_or(FormatError::InvalidWidth {
            family: "relative_url",
            expected: "at least 1",
            len: payload.len(),
        })?;
    Ok(DecodedValue::RelativeUrl {
        referenced,
        path: payload_text(path),
    })
}

fn decode_expand_int(payload: &[u8]) -> Result<DecodedValue<'_>, FormatError> {
    if payload.is_empty() {
        return Err(FormatError::InvalidWidth {
            family: "expand_int",
            expected: "1 to 4",
            len: 0,
        });
    }
    if payload.len() > 4 {
        return Err(FormatError::ValueTooWide { len: payload.len() });
    }
    let mut value = 0u32;
    for (i, &byte) in payload.iter().enumerate() {
        value |= u32::from(byte) << (i * 8);
    }
    Ok(DecodedValue::Integer(value))
}

fn decode_license(payload: &[u8]) -> Result<DecodedValue<'_>, FormatError> {
    match payload {
        [code] => Ok(DecodedValue::License(LicenseCode(*code))),
        _ => Err(FormatError::InvalidWidth {
            family: "license",
            expected: "exactly 1",
            len: payload.len(),
        }),
    }
}

fn decode_size_offset(payload: &[u8]) -> Result<DecodedValue<'_>, FormatError> {
    let half = payload.len() / 2;
    let (size, offset) = match payload.len() {
        2 | 4 | 8 => (le_value(&payload[..half]), le_value(&payload[half..])),
        len => {
            return Err(FormatError::InvalidWidth {
                family: "size_offset",
                expected: "2, 4 or 8",
                len,
            });
        }
    };
    Ok(DecodedValue::SizeOffset { size, offset })
}

// Caller guarantees at most 4 bytes (half of the widest size_offset).
fn le_value(bytes: &[u8]) -> u32 {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().enumerate() {
        value |= u32::from(byte) << (i * 8);
    }
    value
}
