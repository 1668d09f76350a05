//! Checksum collaborator for TOFE images.
//!
//! CRC-8 with polynomial 0x07, zero init, no reflection, zero xorout
//! (the plain "crc-8" the original provisioning scripts used). The
//! decoding core fixes only the input range (every image byte except
//! the stored crc byte); the algorithm lives here, outside the core.

pub fn crc8(before: &[u8], after: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in before.iter().chain(after) {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x07
            } else {
                crc << 1
            };
        }
    }
    crc
}
