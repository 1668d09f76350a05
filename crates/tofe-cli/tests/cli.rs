use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

use tofe_core::{ImageBuilder, LicenseCode, encode_license, encode_relative_url};

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tofe"))
}

// Same CRC-8 (poly 0x07) the binary validates with.
fn crc8(before: &[u8], after: &[u8]) -> u8 {
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

fn sample_image() -> Vec<u8> {
    let mut builder = ImageBuilder::new(1);
    builder.push_atom(0x13, b"example.com/boards/demo").unwrap();
    builder.push_atom(0x01, b"v2.0").unwrap();
    builder
        .push_atom(0x21, &encode_relative_url(0, "pcb"))
        .unwrap();
    builder
        .push_atom(0x41, &encode_license(LicenseCode::new(1, 1)))
        .unwrap();
    builder.finish(crc8)
}

fn write_dump(dir: &TempDir, bytes: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join("dump.bin");
    std::fs::write(&path, bytes).expect("write dump");
    path
}

#[test]
fn help_covers_decode_and_print() {
    cmd()
        .arg("eeprom")
        .arg("decode")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("eeprom")
        .arg("print")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.bin");

    cmd()
        .arg("eeprom")
        .arg("decode")
        .arg(missing)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json_report() {
    let temp = TempDir::new().expect("tempdir");
    let dump = write_dump(&temp, &sample_image());

    let assert = cmd()
        .arg("eeprom")
        .arg("decode")
        .arg(dump)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["header"]["crc_valid"], Value::Bool(true));
    assert_eq!(value["atoms"][0]["label"], "Product");
    assert_eq!(value["atoms"][1]["text"], "v2.0");
    assert_eq!(
        value["atoms"][2]["text"],
        "https://example.com/boards/demo/pcb"
    );
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let dump = write_dump(&temp, &sample_image());
    let report = temp.path().join("report.json");

    cmd()
        .arg("eeprom")
        .arg("decode")
        .arg(dump)
        .arg("-o")
        .arg(&report)
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let contents = std::fs::read_to_string(&report).expect("report file");
    let _: Value = serde_json::from_str(&contents).expect("valid json");
}

#[test]
fn non_tofe_input_fails() {
    let temp = TempDir::new().expect("tempdir");
    let dump = write_dump(&temp, b"definitely not an eeprom dump");

    cmd()
        .arg("eeprom")
        .arg("decode")
        .arg(dump)
        .arg("--stdout")
        .assert()
        .failure()
        .stderr(contains("not a TOFE image"));
}

#[test]
fn strict_fails_on_checksum_mismatch() {
    let temp = TempDir::new().expect("tempdir");
    let mut image = sample_image();
    image[7] ^= 0xFF; // corrupt the stored crc byte
    let dump = write_dump(&temp, &image);

    cmd()
        .arg("eeprom")
        .arg("decode")
        .arg(&dump)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("checksum mismatch"));

    // Without --strict the same dump still decodes.
    let assert = cmd()
        .arg("eeprom")
        .arg("decode")
        .arg(&dump)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["header"]["crc_valid"], Value::Bool(false));
}

#[test]
fn print_renders_one_line_per_atom() {
    let temp = TempDir::new().expect("tempdir");
    let dump = write_dump(&temp, &sample_image());

    cmd()
        .arg("eeprom")
        .arg("print")
        .arg(dump)
        .assert()
        .success()
        .stdout(
            contains("Product: https://example.com/boards/demo")
                .and(contains("Version: v2.0"))
                .and(contains("PCB License: MIT ")),
        );
}
