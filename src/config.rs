//! Release configuration (`release.json`)
//!
//! Every section is optional. Missing values fall back to the paths and
//! versions the release process has always used, so both binaries run with
//! no arguments from the repository root.

use crate::bundle::record::ConfigVariant;
use crate::exceptions::{ReleaseError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a configuration file
pub const CONFIG_ENV: &str = "RELEASEKIT_CONFIG";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "release.json";

/// 8-bit RGB triple
pub type Rgb = [u8; 3];

/// Top-level release configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    pub app: AppInfo,
    pub icons: IconSettings,
    pub bundle: BundleSettings,
}

/// Application identity written into manifests and bundle metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub package: String,
    pub label: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub compile_sdk: u32,
    pub gradle_plugin_version: String,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            package: "africa.itshappening.ihacademy".to_string(),
            label: "IH Academy".to_string(),
            version_code: 1,
            version_name: "1.0.0".to_string(),
            min_sdk: 21,
            target_sdk: 34,
            compile_sdk: 34,
            gradle_plugin_version: "8.3.2".to_string(),
        }
    }
}

/// Icon sources, destinations and brand colors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSettings {
    pub logo: PathBuf,
    pub ios_dir: PathBuf,
    pub android_res_dir: PathBuf,
    pub font: PathBuf,
    pub label: String,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
}

impl Default for IconSettings {
    fn default() -> Self {
        Self {
            logo: PathBuf::from("attached_assets/IH Academy 6 (1).png"),
            ios_dir: PathBuf::from(
                "mobile/ios-xcode-project/IHAcademy/Assets.xcassets/AppIcon.appiconset",
            ),
            android_res_dir: PathBuf::from("mobile/android/app/src/main/res"),
            font: PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
            label: "IH ACADEMY".to_string(),
            primary: [32, 54, 107],
            secondary: [39, 141, 212],
            accent: [36, 211, 103],
        }
    }
}

/// Bundle source tree, outputs and record settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleSettings {
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub minimal_output: PathBuf,
    /// Output for `build-all`; `{variant}` is replaced by the variant name
    pub variant_output: String,
    pub bundletool_version: String,
    pub variant: ConfigVariant,
    /// Glob patterns matched against file names, skipped when archiving
    pub exclude: Vec<String>,
    /// Archives checked by `validate` when none are given
    pub validate: Vec<PathBuf>,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("mobile/complete-aab"),
            output: PathBuf::from("mobile/ih-academy-v1.0.0.aab"),
            minimal_output: PathBuf::from("mobile/ih-academy-minimal.aab"),
            variant_output: "mobile/ih-academy-{variant}.aab".to_string(),
            bundletool_version: "1.15.4".to_string(),
            variant: ConfigVariant::UltraMinimal,
            exclude: vec!["BundleConfig-*".to_string()],
            validate: vec![
                PathBuf::from("mobile/ih-academy-ultra-minimal.aab"),
                PathBuf::from("mobile/ih-academy-android-studio.aab"),
                PathBuf::from("mobile/ih-academy-unity.aab"),
                PathBuf::from("mobile/ih-academy-proper.aab"),
            ],
        }
    }
}

impl BundleSettings {
    /// Output path for one `build-all` variant
    pub fn variant_output_for(&self, variant: ConfigVariant) -> PathBuf {
        PathBuf::from(self.variant_output.replace("{variant}", variant.name()))
    }
}

impl ReleaseConfig {
    /// Load configuration: explicit path, then `RELEASEKIT_CONFIG`, then `./release.json`
    ///
    /// An explicitly named file must exist; the implicit `release.json` is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = env::var(CONFIG_ENV) {
            debug!("Using configuration from {CONFIG_ENV}");
            return Self::from_file(Path::new(&path));
        }
        let implicit = Path::new(DEFAULT_CONFIG_FILE);
        if implicit.is_file() {
            return Self::from_file(implicit);
        }
        debug!("No {DEFAULT_CONFIG_FILE} found, using built-in defaults");
        Ok(Self::default())
    }

    /// Parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ReleaseError::Config(format!(
                "configuration file not found: {}",
                path.display()
            )));
        }
        let data = fs::read_to_string(path)?;
        let config = Self::from_json(&data)
            .map_err(|e| ReleaseError::Config(format!("{}: {e}", path.display())))?;
        info!("📋 Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration JSON
    pub fn from_json(data: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_release_layout() {
        let config = ReleaseConfig::default();
        assert_eq!(config.bundle.bundletool_version, "1.15.4");
        assert_eq!(config.bundle.variant, ConfigVariant::UltraMinimal);
        assert_eq!(config.bundle.exclude, vec!["BundleConfig-*".to_string()]);
        assert_eq!(config.icons.primary, [32, 54, 107]);
        assert_eq!(config.app.min_sdk, 21);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{
            "app": { "version_name": "1.0.1", "version_code": 2, "target_sdk": 35 },
            "bundle": { "variant": "proper" }
        }"#;
        let config = ReleaseConfig::from_json(json).unwrap();
        assert_eq!(config.app.version_name, "1.0.1");
        assert_eq!(config.app.version_code, 2);
        assert_eq!(config.app.target_sdk, 35);
        assert_eq!(config.app.package, "africa.itshappening.ihacademy");
        assert_eq!(config.bundle.variant, ConfigVariant::Proper);
        assert_eq!(config.bundle.source_dir, PathBuf::from("mobile/complete-aab"));
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let json = r#"{ "bundle": { "variant": "android15" } }"#;
        assert!(ReleaseConfig::from_json(json).is_err());
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.json");
        let err = ReleaseConfig::load(Some(&missing)).unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("release.json");
        fs::write(&path, r#"{ "icons": { "label": "WHISTLE" } }"#).unwrap();
        let config = ReleaseConfig::load(Some(&path)).unwrap();
        assert_eq!(config.icons.label, "WHISTLE");

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            ReleaseConfig::from_file(&path),
            Err(ReleaseError::Config(_))
        ));
    }

    #[test]
    fn test_variant_output_for() {
        let settings = BundleSettings::default();
        assert_eq!(
            settings.variant_output_for(ConfigVariant::Unity),
            PathBuf::from("mobile/ih-academy-unity.aab")
        );
    }
}
