//! iOS AppIcon set and App Store icon

use super::constants::{
    APP_STORE_FILENAME, APP_STORE_SIZE, IOS_ICONS, LOGO_FIT_SIZE, LOGO_SOLID_SIZE, WHITE,
};
use super::label::LabelFont;
use super::{IconFile, logo, save_png, whistle};
use crate::config::IconSettings;
use crate::exceptions::Result;
use image::RgbImage;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;

pub const CONTENTS_FILE: &str = "Contents.json";

/// Designs for the 1024 px App Store icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AppStoreStyle {
    /// Whistle drawing with the app label
    Whistle,
    /// Logo at 800 px on white
    Logo,
    /// Logo at 900 px on white
    Solid,
    /// Center of the logo inside brand-colored circles
    Badge,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentsImage {
    size: String,
    idiom: String,
    filename: String,
    scale: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentsInfo {
    version: u32,
    author: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Contents {
    images: Vec<ContentsImage>,
    info: ContentsInfo,
}

/// Contents.json describing every image of the set
pub fn contents_json() -> Result<String> {
    let contents = Contents {
        images: IOS_ICONS
            .iter()
            .map(|icon| ContentsImage {
                size: icon.points.to_string(),
                idiom: icon.idiom.to_string(),
                filename: icon.filename.to_string(),
                scale: icon.scale.to_string(),
            })
            .collect(),
        info: ContentsInfo {
            version: 1,
            author: "xcode".to_string(),
        },
    };
    Ok(serde_json::to_string_pretty(&contents)?)
}

/// Write all 15 whistle icons plus Contents.json into `dir`
pub fn write_icon_set(dir: &Path, settings: &IconSettings) -> Result<Vec<IconFile>> {
    info!("🎯 Generating {} iOS icons in {}", IOS_ICONS.len(), dir.display());
    fs::create_dir_all(dir)?;

    let mut rendered: BTreeMap<u32, RgbImage> = BTreeMap::new();
    let mut written = Vec::with_capacity(IOS_ICONS.len());
    for icon in IOS_ICONS {
        let image = match rendered.entry(icon.pixels) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!("Rendering whistle at {}px", icon.pixels);
                entry.insert(whistle::render(icon.pixels, settings, None)?)
            }
        };
        let path = dir.join(icon.filename);
        save_png(image, &path)?;
        written.push(IconFile {
            path,
            size: icon.pixels,
        });
    }

    fs::write(dir.join(CONTENTS_FILE), contents_json()?)?;
    debug!("Rendered {} distinct sizes", rendered.len());
    Ok(written)
}

/// Render the App Store icon in the chosen style
pub fn render_app_store(style: AppStoreStyle, settings: &IconSettings) -> Result<RgbImage> {
    match style {
        AppStoreStyle::Whistle => {
            let font = LabelFont::load_optional(&settings.font);
            whistle::render(APP_STORE_SIZE, settings, font.as_ref())
        }
        AppStoreStyle::Logo | AppStoreStyle::Solid => {
            let logo = logo::load_logo_or_placeholder(&settings.logo, settings)?;
            let logo_size = if style == AppStoreStyle::Logo {
                LOGO_FIT_SIZE
            } else {
                LOGO_SOLID_SIZE
            };
            Ok(logo::centered_on_background(
                &logo,
                APP_STORE_SIZE,
                logo_size,
                WHITE,
            ))
        }
        AppStoreStyle::Badge => {
            let logo = logo::load_logo_or_placeholder(&settings.logo, settings)?;
            logo::badge(&logo, APP_STORE_SIZE, settings)
        }
    }
}

/// Write `Icon-1024.png` into `dir`
pub fn write_app_store_icon(
    dir: &Path,
    style: AppStoreStyle,
    settings: &IconSettings,
) -> Result<IconFile> {
    fs::create_dir_all(dir)?;
    let image = render_app_store(style, settings)?;
    let path = dir.join(APP_STORE_FILENAME);
    save_png(&image, &path)?;
    info!("🏪 App Store icon ({style:?}) written to {}", path.display());
    Ok(IconFile {
        path,
        size: APP_STORE_SIZE,
    })
}
