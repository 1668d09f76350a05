//! TOFE EEPROM atom decoding core.
//!
//! TOFE boards carry a small self-describing metadata blob in EEPROM: a
//! fixed header followed by packed TLV records ("atoms") recording
//! product identity, PCB/firmware provenance, licensing, and EEPROM
//! layout. This crate decodes that blob: header parsing, bounds-checked
//! atom traversal, per-format payload decoding, and canonical display
//! rendering, plus the write side (`ImageBuilder`) used by programming
//! tools and tests.
//!
//! The core is synchronous, performs no I/O, and holds no state beyond
//! the caller's buffer; every produced `Atom` is a view into it.
//! Traversal never reads past the header's declared data length, and a
//! single corrupt or unrecognized atom degrades locally instead of
//! aborting its siblings (see the per-module error types).
//!
//! The header checksum is deliberately not validated here: the CRC
//! algorithm belongs to an external collaborator, which hands a
//! verdict to [`build_report`].
//!
//! # Examples
//! ```
//! use tofe_core::{ImageBuilder, decode_header, render};
//!
//! let mut builder = ImageBuilder::new(1);
//! builder.push_atom(0x13, b"example.com")?;
//! builder.push_atom(0x01, b"v2.0")?;
//! let image = builder.finish(|_, _| 0);
//!
//! let header = decode_header(&image)?;
//! for atom in header.atoms() {
//!     let atom = atom?;
//!     println!("{}", render(&atom, header.data())?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub mod atom;
pub mod format;
pub mod header;
pub mod region;
pub mod render;

pub use atom::{Atom, AtomCursor, AtomError, atom_at};
pub use format::encode::{
    EncodeError, FieldWidth, ImageBuilder, encode_expand_int, encode_license,
    encode_relative_url, encode_size_offset,
};
pub use format::{
    AtomType, DecodedValue, FormatError, FormatFamily, LicenseCode, decode, format_of, label_of,
};
pub use header::{Header, HeaderError, decode_header};
pub use region::{ByteRegion, RegionError};
pub use render::render;

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;

/// Decoded-board report with one entry per traversed atom.
///
/// Per-atom decode failures land in their entry; only a traversal-level
/// failure (a corrupt length poisoning subsequent offsets) terminates
/// the list early, recorded in `truncated`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardReport {
    /// Report schema version (not the TOFE format version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// Decoded header fields.
    pub header: HeaderInfo,
    /// Atom entries in traversal order.
    pub atoms: Vec<AtomEntry>,
    /// Traversal error that cut enumeration short, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncated: Option<String>,
}

/// Tool metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: String,
}

/// Header fields as stored, plus the collaborator's checksum verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderInfo {
    /// TOFE format version byte.
    pub format_version: u8,
    /// Stored atom count. Advisory: traversal trusts `data_len`, and a
    /// mismatch with the number of entries is visible, not fatal.
    pub atom_count: u8,
    /// Declared data region length in bytes.
    pub data_len: u32,
    /// Stored crc byte.
    pub crc8: u8,
    /// Checksum verdict from the external collaborator, when one ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crc_valid: Option<bool>,
}

/// One traversed atom: classification plus rendering or a local error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtomEntry {
    /// Position in traversal order.
    pub index: u8,
    /// Raw type byte.
    pub type_code: u8,
    /// Format family name (e.g. "url", "license").
    pub format: String,
    /// Display label from the fixed type table.
    pub label: String,
    /// Canonical rendering, when decoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Per-atom decode/render failure, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC3339 timestamp, for the firmware-programmed-on atom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub programmed_at: Option<String>,
}

/// Decode every atom of `header` into a [`BoardReport`].
///
/// `crc_valid` is the external checksum collaborator's verdict over
/// [`Header::crc_input`]; pass `None` when no checksum was run.
///
/// # Examples
/// ```
/// use tofe_core::{ImageBuilder, build_report, decode_header};
///
/// let mut builder = ImageBuilder::new(1);
/// builder.push_atom(0x41, &[0x09])?; // PCB License: MIT
/// let image = builder.finish(|_, _| 0);
///
/// let report = build_report(&decode_header(&image)?, None);
/// assert_eq!(report.atoms[0].label, "PCB License");
/// assert_eq!(report.atoms[0].text.as_deref(), Some("MIT "));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn build_report(header: &Header<'_>, crc_valid: Option<bool>) -> BoardReport {
    let region = header.data();
    let mut atoms = Vec::new();
    let mut truncated = None;

    for item in header.atoms() {
        let atom = match item {
            Ok(atom) => atom,
            Err(err) => {
                truncated = Some(err.to_string());
                break;
            }
        };

        let mut entry = AtomEntry {
            index: atom.index,
            type_code: atom.type_code,
            format: format_of(atom.type_code).name().to_string(),
            label: label_of(atom.type_code).to_string(),
            text: None,
            error: None,
            programmed_at: None,
        };
        match render(&atom, region) {
            Ok(text) => entry.text = Some(text),
            Err(err) => entry.error = Some(err.to_string()),
        }
        if AtomType::from_code(atom.type_code) == Some(AtomType::FirmwareProgrammedOn) {
            entry.programmed_at = programmed_at(&atom);
        }
        atoms.push(entry);
    }

    BoardReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "tofe".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        header: HeaderInfo {
            format_version: header.version,
            atom_count: header.atom_count,
            data_len: header.data_len() as u32,
            crc8: header.crc8,
            crc_valid,
        },
        atoms,
        truncated,
    }
}

/// Interpret a programmed-on atom as a unix timestamp, when it is one.
fn programmed_at(atom: &Atom<'_>) -> Option<String> {
    match decode(atom) {
        Ok(DecodedValue::Integer(value)) => OffsetDateTime::from_unix_timestamp(i64::from(value))
            .ok()
            .and_then(|ts| ts.format(&Rfc3339).ok()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageBuilder, build_report, decode_header, encode_expand_int};

    #[test]
    fn report_entries_follow_traversal_order() {
        let mut builder = ImageBuilder::new(1);
        builder.push_atom(0x13, b"example.com").unwrap();
        builder.push_atom(0x01, b"v2.0").unwrap();
        let image = builder.finish(|_, _| 0x11);

        let header = decode_header(&image).unwrap();
        let report = build_report(&header, Some(true));
        assert_eq!(report.atoms.len(), 2);
        assert_eq!(report.atoms[0].label, "Product");
        assert_eq!(report.atoms[0].text.as_deref(), Some("https://example.com"));
        assert_eq!(report.atoms[1].index, 1);
        assert_eq!(report.header.crc_valid, Some(true));
        assert!(report.truncated.is_none());
    }

    #[test]
    fn per_atom_error_keeps_siblings() {
        let mut builder = ImageBuilder::new(1);
        builder.push_atom(0x21, b"\x09missing").unwrap(); // dangling reference
        builder.push_atom(0x02, b"0042").unwrap();
        let image = builder.finish(|_, _| 0);

        let report = build_report(&decode_header(&image).unwrap(), None);
        assert_eq!(report.atoms.len(), 2);
        assert!(report.atoms[0].error.as_deref().unwrap().contains("atom 9"));
        assert_eq!(report.atoms[1].text.as_deref(), Some("0042"));
    }

    #[test]
    fn corrupt_length_truncates_report() {
        let mut builder = ImageBuilder::new(1);
        builder.push_atom(0x01, b"ok").unwrap();
        let mut image = builder.finish(|_, _| 0);
        // Append a record claiming 250 bytes into a 10-byte tail and
        // widen data_len accordingly.
        image.extend_from_slice(&[0x02, 250]);
        image.extend_from_slice(&[0u8; 8]);
        let data_len = (image.len() - 12) as u32;
        image[8..12].copy_from_slice(&data_len.to_le_bytes());

        let report = build_report(&decode_header(&image).unwrap(), None);
        assert_eq!(report.atoms.len(), 1);
        let truncated = report.truncated.unwrap();
        assert!(truncated.contains("250"));
    }

    #[test]
    fn programmed_on_entry_carries_rfc3339() {
        let mut builder = ImageBuilder::new(1);
        builder
            .push_atom(0x33, &encode_expand_int(1_456_000_000))
            .unwrap();
        let image = builder.finish(|_, _| 0);

        let report = build_report(&decode_header(&image).unwrap(), None);
        let entry = &report.atoms[0];
        assert_eq!(entry.label, "Firmware Programmed on");
        assert_eq!(entry.text.as_deref(), Some("1456000000"));
        assert_eq!(
            entry.programmed_at.as_deref(),
            Some("2016-02-20T20:26:40Z")
        );
    }

    #[test]
    fn report_json_omits_absent_fields() {
        let image = ImageBuilder::new(1).finish(|_, _| 0);
        let report = build_report(&decode_header(&image).unwrap(), None);
        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("truncated").is_none());
        assert!(value["header"].get("crc_valid").is_none());
    }
}
