//! Build an archive from a bundle source tree

use super::constants::BUNDLE_CONFIG_ENTRY;
use super::writer::{BundleSummary, BundleWriter};
use crate::exceptions::{ReleaseError, Result};
use crate::utils::archive_path;
use glob::Pattern;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// How the root `BundleConfig.pb` is handled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigEntry {
    /// Archive whatever the source tree holds
    #[default]
    Keep,
    /// Leave it out of the archive
    Omit,
    /// Archive these bytes instead, added even when the tree has none
    Replace(Vec<u8>),
}

#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Glob patterns matched against file names
    pub exclude: Vec<String>,
    pub config: ConfigEntry,
}

/// Every file below `root` as (entry path, file path), sorted by entry path
pub fn collect_files(root: &Path) -> Result<Vec<(String, PathBuf)>> {
    fn walk(root: &Path, dir: &Path, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                walk(root, &path, out)?;
            } else if file_type.is_symlink() && path.is_dir() {
                debug!("Skipping directory symlink {}", path.display());
            } else if let Some(name) = archive_path(root, &path) {
                out.push((name, path));
            }
        }
        Ok(())
    }

    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// `path` with its parent resolved, so it compares equal to walked paths
fn resolved(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        })
        .map(|dir| dir.join(name))
        .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(ReleaseError::from))
        .collect()
}

fn is_excluded(entry: &str, patterns: &[Pattern]) -> bool {
    let file_name = entry.rsplit('/').next().unwrap_or(entry);
    patterns.iter().any(|p| p.matches(file_name))
}

/// Zip `source_dir` into `output`
///
/// The source tree is only read; a replacement record never touches the
/// `BundleConfig.pb` on disk.
pub fn assemble(source_dir: &Path, output: &Path, options: &AssembleOptions) -> Result<BundleSummary> {
    if !source_dir.is_dir() {
        return Err(ReleaseError::Generic(format!(
            "bundle source directory not found: {}",
            source_dir.display()
        )));
    }
    info!(
        "🔨 Assembling {} from {}",
        output.display(),
        source_dir.display()
    );

    let patterns = compile_patterns(&options.exclude)?;
    let files = collect_files(source_dir)?;
    let output_path = resolved(output);
    let mut writer = BundleWriter::create(output)?;
    let mut replaced = false;

    for (name, path) in files {
        if resolved(&path) == output_path {
            debug!("Skipping {name}, it is the output archive");
            continue;
        }
        if is_excluded(&name, &patterns) {
            debug!("Excluding {name}");
            continue;
        }
        if name == BUNDLE_CONFIG_ENTRY {
            match &options.config {
                ConfigEntry::Keep => {}
                ConfigEntry::Omit => {
                    debug!("Omitting {name}");
                    continue;
                }
                ConfigEntry::Replace(bytes) => {
                    debug!("Substituting {name} ({} bytes)", bytes.len());
                    writer.add_bytes(&name, bytes)?;
                    replaced = true;
                    continue;
                }
            }
        }
        writer.add_file(&name, &path)?;
    }

    if let ConfigEntry::Replace(bytes) = &options.config {
        if !replaced {
            debug!("Source tree has no {BUNDLE_CONFIG_ENTRY}, adding replacement");
            writer.add_bytes(BUNDLE_CONFIG_ENTRY, bytes)?;
        }
    }

    writer.finish()
}
