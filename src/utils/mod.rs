//! Utility functions for releasekit

use sha2::{Digest, Sha256};
use std::env;
use std::path::Path;

/// Check if an environment variable is set to a truthy value
/// Accepts: "1", "true", "on", "yes", "t" (case insensitive)
pub fn is_env_true(key: &str) -> bool {
    match env::var(key) {
        Ok(val) => {
            let val_lower = val.to_lowercase();
            matches!(val_lower.as_str(), "1" | "true" | "on" | "yes" | "t")
        }
        Err(_) => false,
    }
}

/// Prefixed SHA-256 checksum ("sha256:<hex>")
pub fn sha256_prefixed(data: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(data)))
}

/// Human-readable size, e.g. "12,345 bytes (12.1 KB)"
pub fn format_size(bytes: u64) -> String {
    let digits = bytes.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{grouped} bytes ({:.1} KB)", bytes as f64 / 1024.0)
}

/// Relative path of `path` under `root` using `/` separators
pub fn archive_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 bytes (0.0 KB)");
        assert_eq!(format_size(999), "999 bytes (1.0 KB)");
        assert_eq!(format_size(12345), "12,345 bytes (12.1 KB)");
        assert_eq!(format_size(1234567), "1,234,567 bytes (1205.6 KB)");
    }

    #[test]
    fn test_archive_path() {
        let root = PathBuf::from("/tmp/complete-aab");
        let file = root.join("base").join("res").join("values").join("strings.xml");
        assert_eq!(
            archive_path(&root, &file).as_deref(),
            Some("base/res/values/strings.xml")
        );
        assert_eq!(archive_path(&root, &root), None);
        assert_eq!(archive_path(&root, Path::new("/elsewhere/file")), None);
    }

    #[test]
    fn test_sha256_prefixed() {
        assert_eq!(
            sha256_prefixed(b""),
            "sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
