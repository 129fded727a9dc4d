// Fixed entry names and byte layouts of an Android App Bundle
// Paths are zip entry names and always use '/' separators

pub const BUNDLE_CONFIG_ENTRY: &str = "BundleConfig.pb";
pub const JAR_MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";
pub const ANDROID_MANIFEST_ENTRY: &str = "base/manifest/AndroidManifest.xml";
pub const STRINGS_ENTRY: &str = "base/res/values/strings.xml";
pub const STYLES_ENTRY: &str = "base/res/values/styles.xml";
pub const COLORS_ENTRY: &str = "base/res/values/colors.xml";
pub const APP_ASSET_ENTRY: &str = "base/assets/app.bundle";
pub const DEX_ENTRY: &str = "base/dex/classes.dex";
pub const APP_METADATA_ENTRY: &str =
    "BUNDLE-METADATA/com.android.tools.build.gradle/app-metadata.properties";

pub const LAUNCHER_ICON_FILE: &str = "ic_launcher.png";
pub const ROUND_ICON_FILE: &str = "ic_launcher_round.png";

// ABIs that get an empty native library placeholder
pub const NATIVE_ABIS: [&str; 4] = ["arm64-v8a", "armeabi-v7a", "x86", "x86_64"];

// Placeholder dex: a bare 0x70-byte header with no sections
pub const DEX_MAGIC: &[u8; 8] = b"dex\n035\0";
pub const PLACEHOLDER_DEX_SIZE: usize = 0x70;
pub const DEX_ENDIAN_TAG: u32 = 0x1234_5678;
pub const DEX_FILE_SIZE_OFFSET: usize = 32;
pub const DEX_HEADER_SIZE_OFFSET: usize = 36;
pub const DEX_ENDIAN_TAG_OFFSET: usize = 40;
pub const DEX_MAP_OFFSET_OFFSET: usize = 52;

// Number of entries shown when listing a freshly written bundle
pub const LISTING_PREVIEW: usize = 10;

/// classes.dex stand-in: magic, sizes, endian tag and map offset set, everything else zero
pub fn placeholder_dex() -> Vec<u8> {
    let mut dex = vec![0u8; PLACEHOLDER_DEX_SIZE];
    dex[..DEX_MAGIC.len()].copy_from_slice(DEX_MAGIC);
    let size = PLACEHOLDER_DEX_SIZE as u32;
    for (offset, value) in [
        (DEX_FILE_SIZE_OFFSET, size),
        (DEX_HEADER_SIZE_OFFSET, size),
        (DEX_ENDIAN_TAG_OFFSET, DEX_ENDIAN_TAG),
        (DEX_MAP_OFFSET_OFFSET, size),
    ] {
        dex[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }
    dex
}

/// Entry name of the launcher icon for one density (e.g. "xxhdpi")
pub fn mipmap_entry(density: &str) -> String {
    format!("base/res/mipmap-{density}/{LAUNCHER_ICON_FILE}")
}

/// Entry name of the round launcher icon for one density
pub fn round_mipmap_entry(density: &str) -> String {
    format!("base/res/mipmap-{density}/{ROUND_ICON_FILE}")
}

/// Entry name of a native library placeholder
pub fn native_lib_entry(abi: &str, lib_name: &str) -> String {
    format!("base/lib/{abi}/lib{lib_name}.so")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_dex() {
        let dex = placeholder_dex();
        assert_eq!(dex.len(), 112);
        assert!(dex.starts_with(b"dex\n035\0"));
        let word = |at: usize| u32::from_le_bytes(dex[at..at + 4].try_into().unwrap());
        assert_eq!(word(32), 0x70);
        assert_eq!(word(36), 0x70);
        assert_eq!(word(40), 0x1234_5678);
        assert_eq!(word(52), 0x70);
        assert!(dex[8..32].iter().all(|&b| b == 0));
        assert!(dex[56..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_entry_names() {
        assert_eq!(mipmap_entry("mdpi"), "base/res/mipmap-mdpi/ic_launcher.png");
        assert_eq!(
            round_mipmap_entry("xhdpi"),
            "base/res/mipmap-xhdpi/ic_launcher_round.png"
        );
        assert_eq!(
            native_lib_entry("x86_64", "ih-academy"),
            "base/lib/x86_64/libih-academy.so"
        );
    }
}
