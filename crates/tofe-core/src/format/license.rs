//! The fixed license vocabulary used by license-format atoms.
//!
//! A license code packs a family id and a version id into one byte:
//! `family << 3 | version`. The table is a closed, versioned vocabulary
//! of this board ecosystem; lookups are total. Licensing metadata in an
//! EEPROM is advisory, so an unknown code maps to "Unknown" rather
//! than failing the decode.

/// Packed license byte: family in the high five bits, version in the
/// low three. `0x00` and `0xFF` are the Invalid/Proprietary sentinels,
/// family-less and version-less.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LicenseCode(pub u8);

pub const INVALID: LicenseCode = LicenseCode(0x00);
pub const PROPRIETARY: LicenseCode = LicenseCode(0xFF);

const fn pack(family: u8, version: u8) -> u8 {
    family << 3 | version
}

impl LicenseCode {
    pub const fn new(family: u8, version: u8) -> Self {
        LicenseCode(pack(family, version))
    }

    /// License family name, e.g. `"GPL"`.
    pub fn name(self) -> &'static str {
        match self.0 {
            0x00 => "Invalid",
            0xFF => "Proprietary",
            code => match code >> 3 {
                1 => "MIT",
                2 => "BSD",
                3 => "Apache",
                4 => "GPL",
                5 => "LGPL",
                6 => "CC0",
                7 => "CC BY",
                8 => "CC BY-SA",
                9 => "TAPR",
                10 => "CERN",
                _ => "Unknown",
            },
        }
    }

    /// License version string. BSD variants are named, not numbered;
    /// MIT and Proprietary carry no version at all (empty string).
    pub fn version_name(self) -> &'static str {
        const fn v(family: u8, version: u8) -> u8 {
            pack(family, version)
        }
        match self.0 {
            0x00 => "Invalid",
            0xFF => "",
            code if code == v(1, 1) => "",
            code if code == v(2, 1) => "Simple",
            code if code == v(2, 2) => "New",
            code if code == v(2, 3) => "ISC",
            code if code == v(3, 1) => "2.0",
            code if code == v(4, 1) => "2.0",
            code if code == v(4, 2) => "3.0",
            code if code == v(5, 1) => "2.1",
            code if code == v(5, 2) => "3.0",
            code if code == v(6, 1) => "1.0",
            code if code == v(7, 1) => "1.0",
            code if code == v(7, 2) => "2.0",
            code if code == v(7, 3) => "2.5",
            code if code == v(7, 4) => "3.0",
            code if code == v(7, 5) => "4.0",
            code if code == v(8, 1) => "1.0",
            code if code == v(8, 2) => "2.0",
            code if code == v(8, 3) => "2.5",
            code if code == v(8, 4) => "3.0",
            code if code == v(8, 5) => "4.0",
            code if code == v(9, 1) => "1.0",
            code if code == v(10, 1) => "1.1",
            code if code == v(10, 2) => "1.2",
            _ => "Unknown",
        }
    }
}
