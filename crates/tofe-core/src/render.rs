//! Canonical display rendering of decoded atoms.
//!
//! Rendering is pure: given the same atom and region it always produces
//! the same text, and it only ever reads the region (safe to call
//! repeatedly and from multiple threads over a shared buffer).
//!
//! Output formats are frozen for compatibility with existing tooling,
//! including the trailing space a version-less license leaves behind
//! and the unbalanced parenthesis in the size_offset form.

use crate::atom::{Atom, atom_at};
use crate::format::decode::{DecodedValue, decode};
use crate::format::error::FormatError;
use crate::format::{FormatFamily, format_of};
use crate::region::ByteRegion;

/// URL atoms store host+path only; the scheme is implied.
pub const URL_SCHEME: &str = "https://";

/// Render an atom to its canonical display text.
///
/// The region is needed for relative-URL atoms, whose text embeds a
/// back-reference to another atom resolved through a fresh cursor walk.
/// Reserved and unrecognized formats render as placeholders rather than
/// failing; only per-atom decode problems (bad widths, bad references)
/// surface as errors.
pub fn render(atom: &Atom<'_>, region: ByteRegion<'_>) -> Result<String, FormatError> {
    match decode(atom)? {
        DecodedValue::Text(text) => Ok(text),
        DecodedValue::Url(url) => Ok(format!("{URL_SCHEME}{url}")),
        DecodedValue::RelativeUrl { referenced, path } => {
            let base = resolve_url(region, referenced)?;
            Ok(format!("{URL_SCHEME}{base}/{path}"))
        }
        DecodedValue::Integer(value) => Ok(value.to_string()),
        DecodedValue::License(code) => Ok(format!("{} {}", code.name(), code.version_name())),
        DecodedValue::SizeOffset { size, offset } => {
            // u32 fields cannot overflow a u64 sum.
            let end = u64::from(size) + u64::from(offset);
            Ok(format!("({size:x}->{end:x} ({offset}b)"))
        }
        DecodedValue::Blob(bytes) => Ok(hex_dump(bytes)),
        DecodedValue::Invalid => Ok("??? (Invalid)".to_string()),
        DecodedValue::Unknown => Ok("??? (Unknown format)".to_string()),
    }
}

/// Look up the URL atom a relative URL references.
fn resolve_url(region: ByteRegion<'_>, index: u8) -> Result<String, FormatError> {
    let target = atom_at(region, index).map_err(|_| FormatError::BadReference { index })?;
    if format_of(target.type_code) != FormatFamily::Url {
        return Err(FormatError::BadReference { index });
    }
    match decode(&target)? {
        DecodedValue::Url(url) => Ok(url),
        _ => Err(FormatError::BadReference { index }),
    }
}

fn hex_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::atom::{Atom, AtomCursor};
    use crate::format::error::FormatError;
    use crate::region::ByteRegion;

    fn atom(type_code: u8, payload: &[u8]) -> Atom<'_> {
        Atom {
            index: 0,
            type_code,
            payload,
        }
    }

    fn pack(atoms: &[(u8, &[u8])]) -> Vec<u8> {
        let mut data = Vec::new();
        for (type_code, payload) in atoms {
            data.push(*type_code);
            data.push(payload.len() as u8);
            data.extend_from_slice(payload);
        }
        data
    }

    #[test]
    fn render_string_and_url() {
        let region = ByteRegion::new(&[]);
        assert_eq!(render(&atom(0x01, b"v2.0"), region).unwrap(), "v2.0");
        assert_eq!(
            render(&atom(0x11, b"example.com"), region).unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn render_relative_url_resolves_reference() {
        let data = pack(&[(0x11, b"example.com"), (0x21, b"\x00pcb/r2")]);
        let region = ByteRegion::new(&data);
        let relative = crate::atom::atom_at(region, 1).unwrap();
        assert_eq!(
            render(&relative, region).unwrap(),
            "https://example.com/pcb/r2"
        );
    }

    #[test]
    fn render_relative_url_bad_index() {
        let data = pack(&[(0x11, b"example.com"), (0x21, b"\x07docs")]);
        let region = ByteRegion::new(&data);
        let relative = crate::atom::atom_at(region, 1).unwrap();
        let err = render(&relative, region).unwrap_err();
        assert!(matches!(err, FormatError::BadReference { index: 7 }));

        // The failure is local: the region still enumerates cleanly.
        assert_eq!(AtomCursor::new(region).filter(|a| a.is_ok()).count(), 2);
    }

    #[test]
    fn render_relative_url_non_url_target() {
        let data = pack(&[(0x01, b"not a url"), (0x21, b"\x00docs")]);
        let region = ByteRegion::new(&data);
        let relative = crate::atom::atom_at(region, 1).unwrap();
        let err = render(&relative, region).unwrap_err();
        assert!(matches!(err, FormatError::BadReference { index: 0 }));
    }

    #[test]
    fn render_expand_int_decimal() {
        let region = ByteRegion::new(&[]);
        assert_eq!(
            render(&atom(0x31, &[0x2C, 0x01]), region).unwrap(),
            "300"
        );
    }

    #[test]
    fn render_license_keeps_trailing_space() {
        let region = ByteRegion::new(&[]);
        assert_eq!(render(&atom(0x41, &[0x09]), region).unwrap(), "MIT ");
        assert_eq!(
            render(&atom(0x42, &[0x21]), region).unwrap(),
            "GPL 2.0"
        );
        assert_eq!(
            render(&atom(0x41, &[0x00]), region).unwrap(),
            "Invalid Invalid"
        );
        assert_eq!(
            render(&atom(0x41, &[0xFF]), region).unwrap(),
            "Proprietary "
        );
    }

    #[test]
    fn render_size_offset_hex_form() {
        let region = ByteRegion::new(&[]);
        assert_eq!(
            render(&atom(0x51, &[0x10, 0x00, 0x08, 0x00]), region).unwrap(),
            "(10->18 (8b)"
        );
    }

    #[test]
    fn render_blob_hex_dump() {
        let region = ByteRegion::new(&[]);
        assert_eq!(
            render(&atom(0x61, &[0xDE, 0xAD, 0xBE, 0xEF]), region).unwrap(),
            "de ad be ef"
        );
        assert_eq!(render(&atom(0x61, &[]), region).unwrap(), "");
    }

    #[test]
    fn render_reserved_and_unknown_placeholders() {
        let region = ByteRegion::new(&[]);
        assert_eq!(render(&atom(0x00, b""), region).unwrap(), "??? (Invalid)");
        assert_eq!(render(&atom(0xFF, b""), region).unwrap(), "??? (Invalid)");
        assert_eq!(
            render(&atom(0x71, b"xx"), region).unwrap(),
            "??? (Unknown format)"
        );
    }
}
