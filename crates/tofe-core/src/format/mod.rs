//! Atom type registry and per-format payload codecs.
//!
//! An atom's type byte selects a format family in its high nibble; the
//! full byte selects a semantic label from a closed, versioned
//! vocabulary. Both mappings are total: codes outside the tables
//! degrade to `Unknown` values so one unrecognized atom (say, written
//! by a newer format revision) never blocks reading its siblings.

pub mod decode;
pub mod encode;
pub mod error;
pub mod license;

pub use decode::{DecodedValue, decode};
pub use error::FormatError;
pub use license::LicenseCode;

use crate::atom::layout;

/// Decoding strategy selected by an atom type's high nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Text,
    Url,
    RelativeUrl,
    ExpandInt,
    License,
    SizeOffset,
    BinaryBlob,
    /// Reserved type codes (0x00, 0xFF) and the 0xF0 family.
    Invalid,
    /// Structurally valid family nibble outside the closed set.
    Unknown,
}

impl FormatFamily {
    /// Stable lowercase name, used in reports.
    pub fn name(self) -> &'static str {
        match self {
            FormatFamily::Text => "string",
            FormatFamily::Url => "url",
            FormatFamily::RelativeUrl => "relative_url",
            FormatFamily::ExpandInt => "expand_int",
            FormatFamily::License => "license",
            FormatFamily::SizeOffset => "size_offset",
            FormatFamily::BinaryBlob => "binary_blob",
            FormatFamily::Invalid => "invalid",
            FormatFamily::Unknown => "unknown",
        }
    }
}

/// Map an atom type byte to its format family.
pub fn format_of(type_code: u8) -> FormatFamily {
    if type_code == layout::TYPE_INVALID_ZERO || type_code == layout::TYPE_INVALID_ONES {
        return FormatFamily::Invalid;
    }
    match type_code & 0xF0 {
        0x00 => FormatFamily::Text,
        0x10 => FormatFamily::Url,
        0x20 => FormatFamily::RelativeUrl,
        0x30 => FormatFamily::ExpandInt,
        0x40 => FormatFamily::License,
        0x50 => FormatFamily::SizeOffset,
        0x60 => FormatFamily::BinaryBlob,
        0xF0 => FormatFamily::Invalid,
        _ => FormatFamily::Unknown,
    }
}

/// The closed atom-type vocabulary of the TOFE board ecosystem.
///
/// Not runtime-extensible: new types mean a new format version, decoded
/// by a newer release. Discriminants are the wire type bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AtomType {
    // Product identification
    ProductVersion = 0x01,
    ProductSerial = 0x02,
    ProductPart = 0x03,
    DesignerId = 0x11,
    ManufacturerId = 0x12,
    ProductId = 0x13,
    // Auxiliary
    AuxUrl = 0x14,
    // PCB provenance
    PcbRevision = 0x04,
    PcbRepo = 0x21,
    PcbLicense = 0x41,
    PcbProdBatch = 0x31,
    PcbPopBatch = 0x32,
    // Firmware provenance
    FirmwareDesc = 0x06,
    FirmwareRevision = 0x07,
    FirmwareRepo = 0x22,
    FirmwareLicense = 0x42,
    FirmwareProgrammedOn = 0x33,
    // EEPROM layout
    EepromSize = 0x51,
    EepromVendorArea = 0x52,
    EepromTofeArea = 0x53,
    EepromUserArea = 0x54,
    EepromGuid = 0x55,
    EepromHole = 0x56,
    EepromPart = 0x08,
    // Informational
    InfoSampleCode = 0x23,
    InfoDocs = 0x24,
}

impl AtomType {
    /// Look a wire type byte up in the closed table.
    pub fn from_code(type_code: u8) -> Option<AtomType> {
        use AtomType::*;
        Some(match type_code {
            0x01 => ProductVersion,
            0x02 => ProductSerial,
            0x03 => ProductPart,
            0x04 => PcbRevision,
            0x06 => FirmwareDesc,
            0x07 => FirmwareRevision,
            0x08 => EepromPart,
            0x11 => DesignerId,
            0x12 => ManufacturerId,
            0x13 => ProductId,
            0x14 => AuxUrl,
            0x21 => PcbRepo,
            0x22 => FirmwareRepo,
            0x23 => InfoSampleCode,
            0x24 => InfoDocs,
            0x31 => PcbProdBatch,
            0x32 => PcbPopBatch,
            0x33 => FirmwareProgrammedOn,
            0x41 => PcbLicense,
            0x42 => FirmwareLicense,
            0x51 => EepromSize,
            0x52 => EepromVendorArea,
            0x53 => EepromTofeArea,
            0x54 => EepromUserArea,
            0x55 => EepromGuid,
            0x56 => EepromHole,
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        use AtomType::*;
        match self {
            ProductVersion => "Version",
            ProductSerial => "Serial",
            ProductPart => "Part #",
            DesignerId => "Designer",
            ManufacturerId => "Manufacturer",
            ProductId => "Product",
            AuxUrl => "Auxiliary URL",
            PcbRevision => "PCB Revision",
            PcbRepo => "PCB Repository",
            PcbLicense => "PCB License",
            PcbProdBatch => "PCB Production Batch",
            PcbPopBatch => "PCB Population Batch",
            FirmwareDesc => "Firmware",
            FirmwareRevision => "Firmware Revision",
            FirmwareRepo => "Firmware Repository",
            FirmwareLicense => "Firmware License",
            FirmwareProgrammedOn => "Firmware Programmed on",
            EepromSize => "EEPROM Size",
            EepromVendorArea => "EEPROM Vendor Area",
            EepromTofeArea => "EEPROM TOFE Area",
            EepromUserArea => "EEPROM USER Area",
            EepromGuid => "EEPROM GUID",
            EepromHole => "EEPROM Hole",
            EepromPart => "EEPROM Part #",
            InfoSampleCode => "Sample Code",
            InfoDocs => "Documentation",
        }
    }
}

/// Display label for a wire type byte.
///
/// Unknown and reserved codes get placeholder labels, never an error:
/// labelling is a display concern and must not abort traversal.
pub fn label_of(type_code: u8) -> &'static str {
    if type_code == layout::TYPE_INVALID_ZERO || type_code == layout::TYPE_INVALID_ONES {
        return "Invalid";
    }
    match AtomType::from_code(type_code) {
        Some(atom_type) => atom_type.label(),
        None => "Unknown type",
    }
}
