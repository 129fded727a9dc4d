//! Static text entries of the bundle, filled from [`AppInfo`] and the brand colors

use crate::config::{AppInfo, IconSettings, Rgb};

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// META-INF/MANIFEST.MF (trailing blank line is part of the format)
pub fn jar_manifest(app: &AppInfo) -> String {
    format!(
        "Manifest-Version: 1.0\n\
         Created-By: Android Gradle Plugin {agp}\n\
         Implementation-Title: {label}\n\
         Implementation-Version: {version}\n\
         \n",
        agp = app.gradle_plugin_version,
        label = app.label,
        version = app.version_name,
    )
}

/// base/manifest/AndroidManifest.xml
pub fn android_manifest(app: &AppInfo) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="{package}"
    android:versionCode="{version_code}"
    android:versionName="{version_name}"
    android:compileSdkVersion="{compile_sdk}">

    <uses-sdk
        android:minSdkVersion="{min_sdk}"
        android:targetSdkVersion="{target_sdk}" />

    <uses-permission android:name="android.permission.INTERNET" />
    <uses-permission android:name="android.permission.ACCESS_NETWORK_STATE" />

    <application
        android:allowBackup="true"
        android:icon="@mipmap/ic_launcher"
        android:label="@string/app_name">
        <activity
            android:name=".MainActivity"
            android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN" />
                <category android:name="android.intent.category.LAUNCHER" />
            </intent-filter>
        </activity>
    </application>
</manifest>
"#,
        package = escape_xml(&app.package),
        version_code = app.version_code,
        version_name = escape_xml(&app.version_name),
        compile_sdk = app.compile_sdk,
        min_sdk = app.min_sdk,
        target_sdk = app.target_sdk,
    )
}

/// base/res/values/strings.xml
pub fn strings_xml(app: &AppInfo) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">{}</string>
</resources>
"#,
        escape_xml(&app.label)
    )
}

fn hex_color(color: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

/// base/res/values/styles.xml: app, splash and button themes in the primary color
pub fn styles_xml(icons: &IconSettings) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <style name="AppTheme" parent="Theme.AppCompat.Light.NoActionBar">
        <item name="colorPrimary">{primary}</item>
        <item name="colorPrimaryDark">{primary}</item>
        <item name="colorAccent">{accent}</item>
        <item name="android:statusBarColor">{primary}</item>
        <item name="android:navigationBarColor">{primary}</item>
        <item name="android:windowLightStatusBar">false</item>
        <item name="android:windowBackground">@color/background</item>
        <item name="android:textColorPrimary">@color/text_primary</item>
        <item name="android:textColorSecondary">@color/text_secondary</item>
    </style>

    <style name="SplashTheme" parent="Theme.AppCompat.Light.NoActionBar">
        <item name="android:windowBackground">@color/primary</item>
        <item name="android:statusBarColor">{primary}</item>
        <item name="android:navigationBarColor">{primary}</item>
        <item name="android:windowNoTitle">true</item>
        <item name="android:windowFullscreen">true</item>
    </style>

    <style name="ButtonStyle" parent="Widget.AppCompat.Button">
        <item name="android:background">{primary}</item>
        <item name="android:textColor">#FFFFFF</item>
        <item name="android:textSize">16sp</item>
        <item name="android:padding">12dp</item>
    </style>
</resources>
"#,
        primary = hex_color(icons.primary),
        accent = hex_color(icons.accent),
    )
}

/// base/res/values/colors.xml
pub fn colors_xml(icons: &IconSettings) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <color name="primary">{primary}</color>
    <color name="primary_dark">{primary}</color>
    <color name="secondary">{secondary}</color>
    <color name="accent">{accent}</color>
    <color name="background">#FFFFFF</color>
    <color name="surface">#F8FAFC</color>
    <color name="error">#EF4444</color>
    <color name="text_primary">#333333</color>
    <color name="text_secondary">#666666</color>
</resources>
"#,
        primary = hex_color(icons.primary),
        secondary = hex_color(icons.secondary),
        accent = hex_color(icons.accent),
    )
}

/// Native library base name: the label lowercased, non-alphanumeric runs as '-',
/// `app` when nothing is left
pub fn library_name(app: &AppInfo) -> String {
    let mut name = String::with_capacity(app.label.len());
    for ch in app.label.chars() {
        if ch.is_ascii_alphanumeric() {
            name.push(ch.to_ascii_lowercase());
        } else if !name.is_empty() && !name.ends_with('-') {
            name.push('-');
        }
    }
    match name.trim_end_matches('-') {
        "" => "app".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// base/assets/app.bundle placeholder content
pub fn app_asset(app: &AppInfo) -> String {
    format!("{} App Bundle", app.label)
}

/// BUNDLE-METADATA app-metadata.properties
pub fn app_metadata(app: &AppInfo, bundletool_version: &str) -> String {
    format!(
        "appMetadataVersion=1.1\n\
         androidGradlePluginVersion={agp}\n\
         appVersionCode={code}\n\
         appVersionName={name}\n\
         targetSdkVersion={target}\n\
         compileSdkVersion={compile}\n\
         bundletoolVersion={bundletool}\n",
        agp = app.gradle_plugin_version,
        code = app.version_code,
        name = app.version_name,
        target = app.target_sdk,
        compile = app.compile_sdk,
        bundletool = bundletool_version,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_manifest_uses_app_info() {
        let app = AppInfo {
            target_sdk: 35,
            compile_sdk: 35,
            ..AppInfo::default()
        };
        let xml = android_manifest(&app);
        assert!(xml.contains(r#"package="africa.itshappening.ihacademy""#));
        assert!(xml.contains(r#"android:targetSdkVersion="35""#));
        assert!(xml.contains(r#"android:minSdkVersion="21""#));
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn test_strings_are_escaped() {
        let app = AppInfo {
            label: "Coach & Player".to_string(),
            ..AppInfo::default()
        };
        assert!(strings_xml(&app).contains("Coach &amp; Player"));
    }

    #[test]
    fn test_jar_manifest_ends_with_blank_line() {
        let mf = jar_manifest(&AppInfo::default());
        assert!(mf.starts_with("Manifest-Version: 1.0\n"));
        assert!(mf.ends_with("\n\n"));
    }

    #[test]
    fn test_brand_colors() {
        let icons = IconSettings::default();
        let styles = styles_xml(&icons);
        assert!(styles.contains(r#"<item name="colorPrimary">#20366B</item>"#));
        assert!(styles.contains(r#"<item name="colorAccent">#24D367</item>"#));

        let colors = colors_xml(&IconSettings {
            secondary: [0, 15, 255],
            ..IconSettings::default()
        });
        assert!(colors.contains(r#"<color name="secondary">#000FFF</color>"#));
        assert!(colors.contains(r#"<color name="primary">#20366B</color>"#));
    }

    #[test]
    fn test_library_name() {
        assert_eq!(library_name(&AppInfo::default()), "ih-academy");
        let app = AppInfo {
            label: "  Coach & Player! ".to_string(),
            ..AppInfo::default()
        };
        assert_eq!(library_name(&app), "coach-player");
        let app = AppInfo {
            label: "!!".to_string(),
            ..AppInfo::default()
        };
        assert_eq!(library_name(&app), "app");
    }

    #[test]
    fn test_app_metadata() {
        let props = app_metadata(&AppInfo::default(), "1.15.6");
        assert!(props.contains("androidGradlePluginVersion=8.3.2\n"));
        assert!(props.contains("bundletoolVersion=1.15.6\n"));
    }
}
