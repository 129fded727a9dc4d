//! Bundle source tree layout and in-memory entry lists

use super::constants::{
    ANDROID_MANIFEST_ENTRY, APP_ASSET_ENTRY, APP_METADATA_ENTRY, BUNDLE_CONFIG_ENTRY,
    COLORS_ENTRY, DEX_ENTRY, JAR_MANIFEST_ENTRY, LAUNCHER_ICON_FILE, NATIVE_ABIS,
    ROUND_ICON_FILE, STRINGS_ENTRY, STYLES_ENTRY, mipmap_entry, native_lib_entry,
    placeholder_dex, round_mipmap_entry,
};
use super::record::ConfigVariant;
use super::templates;
use crate::config::ReleaseConfig;
use crate::exceptions::Result;
use crate::icons::constants::ANDROID_DENSITIES;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Files written by [`scaffold`]
#[derive(Debug, Clone, Default)]
pub struct ScaffoldReport {
    pub written: Vec<String>,
    /// Densities whose launcher icon was not found
    pub missing_icons: Vec<String>,
}

/// Launcher icons present under an Android `res` directory, as (entry, file)
pub fn icon_entries(res_dir: &Path) -> (Vec<(String, PathBuf)>, Vec<String>) {
    let mut found = Vec::new();
    let mut missing = Vec::new();
    for (density, _) in ANDROID_DENSITIES {
        let path = res_dir
            .join(format!("mipmap-{density}"))
            .join(LAUNCHER_ICON_FILE);
        if path.is_file() {
            found.push((mipmap_entry(density), path));
        } else {
            debug!("No launcher icon at {}", path.display());
            missing.push(density.to_string());
        }
    }
    (found, missing)
}

/// Round launcher icons under `res_dir`, falling back to the square icon of the same density
pub fn round_icon_entries(res_dir: &Path) -> Vec<(String, PathBuf)> {
    let mut found = Vec::new();
    for (density, _) in ANDROID_DENSITIES {
        let dir = res_dir.join(format!("mipmap-{density}"));
        let round = dir.join(ROUND_ICON_FILE);
        let square = dir.join(LAUNCHER_ICON_FILE);
        if round.is_file() {
            found.push((round_mipmap_entry(density), round));
        } else if square.is_file() {
            debug!("No round icon for {density}, reusing {}", square.display());
            found.push((round_mipmap_entry(density), square));
        }
    }
    found
}

fn write_entry(dir: &Path, name: &str, data: &[u8]) -> Result<()> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, data)?;
    debug!("Wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

/// Create the bundle source tree under `dir`
///
/// Existing files are overwritten; anything else in `dir` is left alone.
pub fn scaffold(dir: &Path, config: &ReleaseConfig) -> Result<ScaffoldReport> {
    info!("🏗️ Scaffolding bundle sources in {}", dir.display());
    let app = &config.app;
    let record = config.bundle.variant.encode(&config.bundle.bundletool_version)?;

    let mut entries: Vec<(String, Vec<u8>)> = vec![
        (JAR_MANIFEST_ENTRY.to_string(), templates::jar_manifest(app).into_bytes()),
        (
            ANDROID_MANIFEST_ENTRY.to_string(),
            templates::android_manifest(app).into_bytes(),
        ),
        (STRINGS_ENTRY.to_string(), templates::strings_xml(app).into_bytes()),
        (
            STYLES_ENTRY.to_string(),
            templates::styles_xml(&config.icons).into_bytes(),
        ),
        (
            COLORS_ENTRY.to_string(),
            templates::colors_xml(&config.icons).into_bytes(),
        ),
        (DEX_ENTRY.to_string(), placeholder_dex()),
        (APP_ASSET_ENTRY.to_string(), templates::app_asset(app).into_bytes()),
        (
            APP_METADATA_ENTRY.to_string(),
            templates::app_metadata(app, &config.bundle.bundletool_version).into_bytes(),
        ),
        (BUNDLE_CONFIG_ENTRY.to_string(), record),
    ];

    let lib_name = templates::library_name(app);
    for abi in NATIVE_ABIS {
        entries.push((native_lib_entry(abi, &lib_name), Vec::new()));
    }

    let res_dir = &config.icons.android_res_dir;
    let (icons, missing_icons) = icon_entries(res_dir);
    for (name, path) in icons.into_iter().chain(round_icon_entries(res_dir)) {
        entries.push((name, fs::read(path)?));
    }

    let mut report = ScaffoldReport {
        missing_icons,
        ..ScaffoldReport::default()
    };
    for (name, data) in &entries {
        write_entry(dir, name, data)?;
        report.written.push(name.clone());
    }
    report.written.sort();
    Ok(report)
}

/// Write `BundleConfig-<variant>.pb` for every variant into `dir`
pub fn write_variants(dir: &Path, bundletool_version: &str) -> Result<Vec<(ConfigVariant, PathBuf, Vec<u8>)>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(ConfigVariant::ALL.len());
    for variant in ConfigVariant::ALL {
        let bytes = variant.encode(bundletool_version)?;
        let path = dir.join(variant.file_name());
        fs::write(&path, &bytes)?;
        debug!("Wrote {} variant to {}", variant, path.display());
        written.push((variant, path, bytes));
    }
    Ok(written)
}

/// Entries of the minimal bundle: manifests, strings, icons found in `res_dir`, placeholder dex
pub fn minimal_entries(config: &ReleaseConfig, res_dir: &Path) -> Result<Vec<(String, Vec<u8>)>> {
    let app = &config.app;
    let mut entries = vec![
        (JAR_MANIFEST_ENTRY.to_string(), templates::jar_manifest(app).into_bytes()),
        (
            ANDROID_MANIFEST_ENTRY.to_string(),
            templates::android_manifest(app).into_bytes(),
        ),
        (STRINGS_ENTRY.to_string(), templates::strings_xml(app).into_bytes()),
    ];
    let (icons, _) = icon_entries(res_dir);
    for (name, path) in icons {
        entries.push((name, fs::read(path)?));
    }
    entries.push((DEX_ENTRY.to_string(), placeholder_dex()));
    Ok(entries)
}
