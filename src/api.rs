//! High-level API for releasekit operations
//!
//! Each function is one CLI command. Paths left as `None` in the option
//! structs fall back to the loaded [`ReleaseConfig`].

use crate::bundle::assemble::{AssembleOptions, ConfigEntry, assemble};
use crate::bundle::layout::{self, ScaffoldReport};
use crate::bundle::record::ConfigVariant;
use crate::bundle::validate::{ValidationSummary, validate_many, validate_path};
use crate::bundle::writer::{BundleSummary, BundleWriter};
use crate::config::ReleaseConfig;
use crate::exceptions::{ReleaseError, Result};
use crate::icons::inspect::{IconCheck, check_android_set, check_ios_set};
use crate::icons::constants::REFERENCE_SIZE;
use crate::icons::{AppStoreStyle, IconFile, android, ios, logo, whistle};
use crate::utils::is_env_true;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

/// Environment variable that skips re-validating freshly built bundles
pub const SKIP_VERIFY_ENV: &str = "RELEASEKIT_SKIP_VERIFY";

/// Options for generating Android launcher icons
#[derive(Debug, Default)]
pub struct AndroidIconOptions {
    /// Android `res` directory (defaults to `icons.android_res_dir`)
    pub res_dir: Option<PathBuf>,
    /// Use the drawn whistle instead of the logo as source
    pub whistle: bool,
}

/// Options for writing configuration records
#[derive(Debug, Default)]
pub struct ConfigOptions {
    /// Directory receiving the records (defaults to `bundle.source_dir`)
    pub dir: Option<PathBuf>,
    /// Variant written as `BundleConfig.pb` (defaults to `bundle.variant`)
    pub variant: Option<ConfigVariant>,
    /// Also write `BundleConfig-<variant>.pb` for every variant
    pub all_variants: bool,
    pub bundletool_version: Option<String>,
}

/// Options for assembling a bundle from its source tree
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub source_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Record substituted for `BundleConfig.pb` (defaults to `bundle.variant`)
    pub variant: Option<ConfigVariant>,
    /// Archive the tree's own `BundleConfig.pb` instead of substituting one
    pub keep_config: bool,
    /// Leave `BundleConfig.pb` out entirely
    pub omit_config: bool,
    /// Skip re-reading the record from the finished archive
    pub skip_verification: bool,
}

/// Outcome of checking generated icons
#[derive(Debug)]
pub struct IconCheckResult {
    pub checks: Vec<IconCheck>,
}

impl IconCheckResult {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(IconCheck::passed)
    }

    pub fn failures(&self) -> usize {
        self.checks.iter().filter(|c| !c.passed()).count()
    }
}

/// Write the whistle AppIcon set
pub fn generate_ios_icons(config: &ReleaseConfig, dir: Option<&Path>) -> Result<Vec<IconFile>> {
    let dir = dir.unwrap_or(&config.icons.ios_dir);
    ios::write_icon_set(dir, &config.icons)
}

/// Write `Icon-1024.png` in the given style
pub fn generate_app_store_icon(
    config: &ReleaseConfig,
    style: AppStoreStyle,
    dir: Option<&Path>,
) -> Result<IconFile> {
    let dir = dir.unwrap_or(&config.icons.ios_dir);
    ios::write_app_store_icon(dir, style, &config.icons)
}

/// Write launcher, round and foreground icons for every density
pub fn generate_android_icons(
    config: &ReleaseConfig,
    options: AndroidIconOptions,
) -> Result<Vec<IconFile>> {
    let res_dir = options
        .res_dir
        .unwrap_or_else(|| config.icons.android_res_dir.clone());
    let source = if options.whistle {
        info!("🎨 Using the whistle design as Android icon source");
        let drawn = whistle::render(REFERENCE_SIZE, &config.icons, None)?;
        image::DynamicImage::ImageRgb8(drawn).to_rgba8()
    } else {
        logo::load_logo_or_placeholder(&config.icons.logo, &config.icons)?
    };
    android::write_android_icons(&res_dir, &source)
}

/// Check the iOS set and the Android launcher icons
pub fn check_icons(
    config: &ReleaseConfig,
    ios_dir: Option<&Path>,
    res_dir: Option<&Path>,
) -> IconCheckResult {
    let mut checks = check_ios_set(ios_dir.unwrap_or(&config.icons.ios_dir));
    let android_dir = res_dir.unwrap_or(&config.icons.android_res_dir);
    if android_dir.is_dir() {
        checks.extend(check_android_set(android_dir));
    } else {
        warn!(
            "⚠️ Android res directory {} not found, skipping Android icons",
            android_dir.display()
        );
    }
    IconCheckResult { checks }
}

/// Create the bundle source tree
pub fn scaffold_bundle(config: &ReleaseConfig, dir: Option<&Path>) -> Result<ScaffoldReport> {
    let dir = dir.unwrap_or(&config.bundle.source_dir);
    layout::scaffold(dir, config)
}

/// Write `BundleConfig.pb` (and optionally every variant file) into the source tree
pub fn write_config_records(
    config: &ReleaseConfig,
    options: ConfigOptions,
) -> Result<Vec<(ConfigVariant, PathBuf, Vec<u8>)>> {
    let dir = options
        .dir
        .unwrap_or_else(|| config.bundle.source_dir.clone());
    let version = options
        .bundletool_version
        .unwrap_or_else(|| config.bundle.bundletool_version.clone());
    let variant = options.variant.unwrap_or(config.bundle.variant);

    std::fs::create_dir_all(&dir)?;
    let bytes = variant.encode(&version)?;
    let path = dir.join(crate::bundle::constants::BUNDLE_CONFIG_ENTRY);
    std::fs::write(&path, &bytes)?;
    info!("🧾 Wrote {variant} record to {}", path.display());

    let mut written = vec![(variant, path, bytes)];
    if options.all_variants {
        written.extend(layout::write_variants(&dir, &version)?);
    }
    Ok(written)
}

fn verify_bundle(summary: &BundleSummary, skip: bool) -> Result<()> {
    if skip || is_env_true(SKIP_VERIFY_ENV) {
        debug!("Skipping verification of {}", summary.path.display());
        return Ok(());
    }
    if summary.config_hex.is_none() {
        debug!("{} carries no BundleConfig.pb, nothing to verify", summary.path.display());
        return Ok(());
    }
    let validation = validate_path(&summary.path)?;
    match validation.outcome {
        Ok(report) => {
            info!("🔍 Verified record: bundletool {}", report.version);
            Ok(())
        }
        Err(err) => Err(ReleaseError::Validation(format!(
            "{}: {err}",
            summary.path.display()
        ))),
    }
}

/// Zip the bundle source tree, substituting the chosen record
pub fn build_bundle(config: &ReleaseConfig, options: BuildOptions) -> Result<BundleSummary> {
    let source_dir = options
        .source_dir
        .unwrap_or_else(|| config.bundle.source_dir.clone());
    let output = options
        .output
        .unwrap_or_else(|| config.bundle.output.clone());
    let variant = options.variant.unwrap_or(config.bundle.variant);

    let entry = if options.omit_config {
        ConfigEntry::Omit
    } else if options.keep_config {
        ConfigEntry::Keep
    } else {
        ConfigEntry::Replace(variant.encode(&config.bundle.bundletool_version)?)
    };
    let assemble_options = AssembleOptions {
        exclude: config.bundle.exclude.clone(),
        config: entry,
    };

    let summary = assemble(&source_dir, &output, &assemble_options)?;
    verify_bundle(&summary, options.skip_verification)?;
    Ok(summary)
}

/// One bundle per record variant, written to `bundle.variant_output`
pub fn build_all_variants(
    config: &ReleaseConfig,
    source_dir: Option<&Path>,
    skip_verification: bool,
) -> Result<Vec<(ConfigVariant, BundleSummary)>> {
    let mut built = Vec::with_capacity(ConfigVariant::ALL.len());
    for variant in ConfigVariant::ALL {
        let options = BuildOptions {
            source_dir: source_dir.map(Path::to_path_buf),
            output: Some(config.bundle.variant_output_for(variant)),
            variant: Some(variant),
            skip_verification,
            ..BuildOptions::default()
        };
        info!("🧪 Building {variant} variant ({})", variant.description());
        built.push((variant, build_bundle(config, options)?));
    }
    Ok(built)
}

/// Bundle with only the manifests, strings, launcher icons and a placeholder dex
pub fn build_minimal(
    config: &ReleaseConfig,
    source_dir: Option<&Path>,
    output: Option<&Path>,
) -> Result<BundleSummary> {
    let source_dir = source_dir.unwrap_or(&config.bundle.source_dir);
    let output = output.unwrap_or(&config.bundle.minimal_output);
    info!("🚀 Creating minimal bundle {}", output.display());

    let res_dir = source_dir.join("base").join("res");
    let mut writer = BundleWriter::create(output)?;
    for (name, data) in layout::minimal_entries(config, &res_dir)? {
        writer.add_bytes(&name, &data)?;
    }
    writer.finish()
}

/// Validate the record of each path; an empty list checks `bundle.validate`
pub fn validate_bundles(config: &ReleaseConfig, paths: &[PathBuf]) -> ValidationSummary {
    if paths.is_empty() {
        validate_many(&config.bundle.validate)
    } else {
        validate_many(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::writer::{list_entries, read_entry};
    use std::fs;
    use tempfile::TempDir;

    fn config_in(temp: &TempDir) -> ReleaseConfig {
        let root = temp.path();
        let mut config = ReleaseConfig::default();
        config.icons.logo = root.join("logo.png");
        config.icons.font = root.join("font.ttf");
        config.icons.ios_dir = root.join("ios");
        config.icons.android_res_dir = root.join("res");
        config.bundle.source_dir = root.join("complete-aab");
        config.bundle.output = root.join("app.aab");
        config.bundle.minimal_output = root.join("minimal.aab");
        config.bundle.variant_output = root.join("app-{variant}.aab").display().to_string();
        config
    }

    #[test]
    fn test_icons_then_check() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);

        generate_ios_icons(&config, None).unwrap();
        generate_app_store_icon(&config, AppStoreStyle::Badge, None).unwrap();
        let android = generate_android_icons(&config, AndroidIconOptions::default()).unwrap();
        assert_eq!(android.len(), 15);

        let result = check_icons(&config, None, None);
        assert_eq!(result.checks.len(), 30);
        assert!(result.passed(), "{:?}", result.checks);
    }

    #[test]
    fn test_check_reports_missing_set() {
        let temp = TempDir::new().unwrap();
        let result = check_icons(&config_in(&temp), None, None);
        assert_eq!(result.failures(), 15);
    }

    #[test]
    fn test_scaffold_build_and_validate() {
        let temp = TempDir::new().unwrap();
        let mut config = config_in(&temp);
        config.bundle.variant = ConfigVariant::Proper;

        generate_android_icons(
            &config,
            AndroidIconOptions {
                whistle: true,
                ..AndroidIconOptions::default()
            },
        )
        .unwrap();
        scaffold_bundle(&config, None).unwrap();
        write_config_records(
            &config,
            ConfigOptions {
                all_variants: true,
                ..ConfigOptions::default()
            },
        )
        .unwrap();

        let summary = build_bundle(
            &config,
            BuildOptions {
                variant: Some(ConfigVariant::Unity),
                ..BuildOptions::default()
            },
        )
        .unwrap();
        assert_eq!(summary.config_hex.as_deref(), Some("0a06312e31352e34120408011001"));
        assert!(!summary.entries.iter().any(|e| e.starts_with("BundleConfig-")));
        assert!(summary
            .entries
            .contains(&"base/res/mipmap-xxxhdpi/ic_launcher.png".to_string()));

        // the tree keeps the scaffolded proper record
        let on_disk = fs::read(config.bundle.source_dir.join("BundleConfig.pb")).unwrap();
        assert_eq!(on_disk, ConfigVariant::Proper.encode("1.15.4").unwrap());

        let summary = validate_bundles(&config, &[config.bundle.output.clone()]);
        assert_eq!(summary.passed, 1);
    }

    #[test]
    fn test_build_all_and_minimal() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp);
        scaffold_bundle(&config, None).unwrap();

        let built = build_all_variants(&config, None, false).unwrap();
        assert_eq!(built.len(), ConfigVariant::ALL.len());
        for (variant, summary) in &built {
            let record = read_entry(&summary.path, "BundleConfig.pb").unwrap().unwrap();
            assert_eq!(record, variant.encode("1.15.4").unwrap());
        }
        let paths: Vec<PathBuf> = built.iter().map(|(_, s)| s.path.clone()).collect();
        assert!(validate_bundles(&config, &paths).all_passed());

        let minimal = build_minimal(&config, None, None).unwrap();
        assert_eq!(minimal.config_hex, None);
        assert_eq!(
            list_entries(&minimal.path).unwrap().last().map(String::as_str),
            Some("base/dex/classes.dex")
        );
    }

    #[test]
    fn test_build_without_source_tree() {
        let temp = TempDir::new().unwrap();
        let err = build_bundle(&config_in(&temp), BuildOptions::default()).unwrap_err();
        assert!(matches!(err, ReleaseError::Generic(_)));
    }
}
