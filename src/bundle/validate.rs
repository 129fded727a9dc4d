//! Re-read and check BundleConfig records, alone or inside archives

use super::constants::BUNDLE_CONFIG_ENTRY;
use super::record::{RecordError, RecordReport, decode_record};
use super::writer::read_entry;
use crate::exceptions::{ReleaseError, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

const RULE_WIDTH: usize = 40;

/// Outcome of checking one record
#[derive(Debug, Clone)]
pub struct Validation {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
    pub outcome: std::result::Result<RecordReport, RecordError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Human-readable block for this record
    pub fn print(&self) {
        println!("🔍 Validating {}", self.path.display());
        println!("📊 File size: {} bytes", self.bytes.len());
        println!("📊 Hex data: {}", hex::encode(&self.bytes));
        match &self.outcome {
            Ok(report) => {
                println!(
                    "📊 First field: number={}, wire_type={}",
                    report.field_number, report.wire_type
                );
                println!("📊 Version string: '{}'", report.version);
                for field in &report.extra_fields {
                    match field.length {
                        Some(len) => println!(
                            "📊 Additional field: number={}, wire_type={}, length={len}",
                            field.number, field.wire_type
                        ),
                        None => println!(
                            "📊 Additional field: number={}, wire_type={}",
                            field.number, field.wire_type
                        ),
                    }
                }
                println!("✅ Record structure is valid");
            }
            Err(err) => println!("❌ {err}"),
        }
    }
}

/// Totals of a batch validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub passed: usize,
    pub failed: usize,
    pub missing: usize,
}

impl ValidationSummary {
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.missing == 0
    }
}

fn is_raw_record(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("pb"))
}

/// Record bytes from a raw `.pb` file or the `BundleConfig.pb` entry of an archive
pub fn read_record(path: &Path) -> Result<Vec<u8>> {
    if is_raw_record(path) {
        debug!("Reading raw record {}", path.display());
        return Ok(fs::read(path)?);
    }
    read_entry(path, BUNDLE_CONFIG_ENTRY)?.ok_or_else(|| {
        ReleaseError::Validation(format!(
            "{BUNDLE_CONFIG_ENTRY} not found in {}",
            path.display()
        ))
    })
}

/// Read and check the record at `path`
///
/// I/O and archive failures are errors; a malformed record is a failed
/// [`Validation`].
pub fn validate_path(path: &Path) -> Result<Validation> {
    let bytes = read_record(path)?;
    let outcome = decode_record(&bytes);
    if let Err(err) = &outcome {
        warn!("Record in {} is malformed: {err}", path.display());
    }
    Ok(Validation {
        path: path.to_path_buf(),
        bytes,
        outcome,
    })
}

/// Check every path, printing one block per file
pub fn validate_many(paths: &[PathBuf]) -> ValidationSummary {
    let mut summary = ValidationSummary::default();
    println!("Validating BundleConfig.pb in {} file(s)...", paths.len());
    println!("{}", "=".repeat(RULE_WIDTH + 20));

    for path in paths {
        if !path.exists() {
            println!("❌ File not found: {}", path.display());
            summary.missing += 1;
        } else {
            match validate_path(path) {
                Ok(validation) => {
                    validation.print();
                    if validation.is_valid() {
                        summary.passed += 1;
                    } else {
                        summary.failed += 1;
                    }
                }
                Err(err) => {
                    println!("❌ Validation error in {}: {err}", path.display());
                    summary.failed += 1;
                }
            }
        }
        println!("{}", "-".repeat(RULE_WIDTH));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::record::ConfigVariant;
    use crate::bundle::writer::BundleWriter;
    use tempfile::TempDir;

    fn archive_with(dir: &Path, name: &str, record: Option<&[u8]>) -> PathBuf {
        let path = dir.join(name);
        let mut writer = BundleWriter::create(&path).unwrap();
        if let Some(bytes) = record {
            writer.add_bytes("BundleConfig.pb", bytes).unwrap();
        }
        writer.add_bytes("base/dex/classes.dex", b"dex\n035\0").unwrap();
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_validate_archive_and_raw() {
        let temp = TempDir::new().unwrap();
        let proper = ConfigVariant::Proper.encode("1.15.4").unwrap();
        let aab = archive_with(temp.path(), "proper.aab", Some(&proper));

        let validation = validate_path(&aab).unwrap();
        assert!(validation.is_valid());
        assert_eq!(validation.bytes, proper);

        let raw = temp.path().join("BundleConfig.pb");
        fs::write(&raw, [0x08, 0x01]).unwrap();
        let validation = validate_path(&raw).unwrap();
        assert_eq!(
            validation.outcome,
            Err(RecordError::UnexpectedWireType {
                field_number: 1,
                wire_type: 0
            })
        );
    }

    #[test]
    fn test_archive_without_record() {
        let temp = TempDir::new().unwrap();
        let aab = archive_with(temp.path(), "bare.aab", None);
        assert!(matches!(
            validate_path(&aab),
            Err(ReleaseError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_many_counts() {
        let temp = TempDir::new().unwrap();
        let good = archive_with(
            temp.path(),
            "good.aab",
            Some(&ConfigVariant::UltraMinimal.encode("1.15.4").unwrap()),
        );
        let bad = archive_with(temp.path(), "bad.aab", Some(&[0x0a]));
        let missing = temp.path().join("missing.aab");

        let summary = validate_many(&[good, bad, missing]);
        assert_eq!(
            summary,
            ValidationSummary {
                passed: 1,
                failed: 1,
                missing: 1
            }
        );
        assert!(!summary.all_passed());
    }
}
