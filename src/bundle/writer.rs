//! Zip container output for bundles

use super::constants::{BUNDLE_CONFIG_ENTRY, LISTING_PREVIEW};
use crate::exceptions::Result;
use crate::utils::{format_size, sha256_prefixed};
use log::{debug, info, trace};
use serde::Serialize;
use std::fmt;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// What was written by [`BundleWriter::finish`]
#[derive(Debug, Clone, Serialize)]
pub struct BundleSummary {
    pub path: PathBuf,
    pub size: u64,
    pub entries: Vec<String>,
    pub checksum: String,
    /// Hex of the embedded BundleConfig.pb, if one was written
    pub config_hex: Option<String>,
}

impl BundleSummary {
    /// Print the human-readable summary to stdout
    pub fn print(&self) {
        println!("✅ Created {}", self.path.display());
        println!("📦 Size: {}", format_size(self.size));
        println!("🔐 Checksum: {}", self.checksum);
        if let Some(hex) = &self.config_hex {
            println!("🧾 BundleConfig.pb: {hex}");
        }
        println!("📁 {} entries:", self.entries.len());
        for entry in self.entries.iter().take(LISTING_PREVIEW) {
            println!("   {entry}");
        }
        if self.entries.len() > LISTING_PREVIEW {
            println!("   ... and {} more", self.entries.len() - LISTING_PREVIEW);
        }
    }
}

/// Deflate-compressed zip writer that tracks its entries
pub struct BundleWriter {
    zip: ZipWriter<File>,
    path: PathBuf,
    options: SimpleFileOptions,
    entries: Vec<String>,
    config: Option<Vec<u8>>,
}

impl fmt::Debug for BundleWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BundleWriter")
            .field("path", &self.path)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl BundleWriter {
    /// Create (or replace) the archive at `path`, creating parent directories
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        if path.exists() {
            debug!("Replacing existing archive {}", path.display());
            fs::remove_file(path)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            zip: ZipWriter::new(file),
            path: path.to_path_buf(),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            entries: Vec::new(),
            config: None,
        })
    }

    /// Add an entry from memory
    pub fn add_bytes(&mut self, name: &str, data: &[u8]) -> Result<()> {
        trace!("Adding {name} ({} bytes)", data.len());
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(data)?;
        if name == BUNDLE_CONFIG_ENTRY {
            self.config = Some(data.to_vec());
        }
        self.entries.push(name.to_string());
        Ok(())
    }

    /// Add an entry from a file on disk
    pub fn add_file(&mut self, name: &str, source: &Path) -> Result<()> {
        let data = fs::read(source)?;
        self.add_bytes(name, &data)
    }

    /// Write the central directory and summarize the archive
    pub fn finish(self) -> Result<BundleSummary> {
        let file = self.zip.finish()?;
        drop(file);

        let data = fs::read(&self.path)?;
        let summary = BundleSummary {
            size: data.len() as u64,
            checksum: sha256_prefixed(&data),
            path: self.path,
            entries: self.entries,
            config_hex: self.config.as_deref().map(hex::encode),
        };
        info!(
            "📦 Wrote {} ({} entries, {} bytes)",
            summary.path.display(),
            summary.entries.len(),
            summary.size
        );
        Ok(summary)
    }
}

/// Read one entry of an archive; `None` when the archive has no such entry
pub fn read_entry(archive: &Path, name: &str) -> Result<Option<Vec<u8>>> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    let mut entry = match zip.by_name(name) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(Some(data))
}

/// Entry names of an archive in stored order
pub fn list_entries(archive: &Path) -> Result<Vec<String>> {
    let mut zip = ZipArchive::new(File::open(archive)?)?;
    let mut names = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        names.push(zip.by_index(i)?.name().to_string());
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("app.aab");

        let mut writer = BundleWriter::create(&path).unwrap();
        writer.add_bytes("BundleConfig.pb", &[0x0a, 0x01, b'1']).unwrap();
        writer.add_bytes("base/dex/classes.dex", b"dex\n035\0").unwrap();
        let summary = writer.finish().unwrap();

        assert_eq!(summary.entries, vec!["BundleConfig.pb", "base/dex/classes.dex"]);
        assert_eq!(summary.config_hex.as_deref(), Some("0a0131"));
        assert!(summary.checksum.starts_with("sha256:"));
        assert_eq!(summary.size, fs::metadata(&path).unwrap().len());

        assert_eq!(
            list_entries(&path).unwrap(),
            vec!["BundleConfig.pb", "base/dex/classes.dex"]
        );
        assert_eq!(
            read_entry(&path, "BundleConfig.pb").unwrap(),
            Some(vec![0x0a, 0x01, b'1'])
        );
        assert_eq!(read_entry(&path, "missing").unwrap(), None);
    }

    #[test]
    fn test_create_replaces_existing_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("app.aab");
        fs::write(&path, b"stale").unwrap();

        let mut writer = BundleWriter::create(&path).unwrap();
        writer.add_bytes("a.txt", b"a").unwrap();
        let summary = writer.finish().unwrap();

        assert_eq!(summary.config_hex, None);
        assert_eq!(list_entries(&path).unwrap(), vec!["a.txt"]);
    }
}
