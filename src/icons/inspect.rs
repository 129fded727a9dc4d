//! Post-generation checks of icon files

use super::constants::{
    ANDROID_DENSITIES, ANDROID_LAUNCHER, ANDROID_LAUNCHER_FOREGROUND, ANDROID_LAUNCHER_ROUND,
    IOS_ICONS,
};
use crate::exceptions::Result;
use image::ImageReader;
use log::debug;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct IconInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub color_type: String,
    pub has_alpha: bool,
}

pub fn inspect_icon(path: &Path) -> Result<IconInfo> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    let color = image.color();
    debug!("{}: {}x{} {color:?}", path.display(), image.width(), image.height());
    Ok(IconInfo {
        path: path.to_path_buf(),
        width: image.width(),
        height: image.height(),
        color_type: format!("{color:?}"),
        has_alpha: color.has_alpha(),
    })
}

/// One checked file and what is wrong with it, if anything
#[derive(Debug, Clone, Serialize)]
pub struct IconCheck {
    pub path: PathBuf,
    pub expected_size: u32,
    pub info: Option<IconInfo>,
    pub problems: Vec<String>,
}

impl IconCheck {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn print(&self) {
        match (&self.info, self.passed()) {
            (Some(info), true) => println!(
                "✅ {} ({}x{}, {})",
                self.path.display(),
                info.width,
                info.height,
                info.color_type
            ),
            _ => println!("❌ {}: {}", self.path.display(), self.problems.join("; ")),
        }
    }
}

fn check_file(path: PathBuf, expected_size: u32, allow_alpha: bool) -> IconCheck {
    let mut problems = Vec::new();
    let info = match inspect_icon(&path) {
        Ok(info) => {
            if info.width != expected_size || info.height != expected_size {
                problems.push(format!(
                    "expected {expected_size}x{expected_size}, found {}x{}",
                    info.width, info.height
                ));
            }
            if info.has_alpha && !allow_alpha {
                problems.push(format!("has an alpha channel ({})", info.color_type));
            }
            Some(info)
        }
        Err(e) => {
            problems.push(e.to_string());
            None
        }
    };
    IconCheck {
        path,
        expected_size,
        info,
        problems,
    }
}

/// Every image of the iOS set must exist at its size with no alpha channel
pub fn check_ios_set(dir: &Path) -> Vec<IconCheck> {
    IOS_ICONS
        .iter()
        .map(|icon| check_file(dir.join(icon.filename), icon.pixels, false))
        .collect()
}

/// Every Android launcher image must exist at its density size; only the square one must be opaque
pub fn check_android_set(res_dir: &Path) -> Vec<IconCheck> {
    let mut checks = Vec::new();
    for (density, size) in ANDROID_DENSITIES {
        let dir = res_dir.join(format!("mipmap-{density}"));
        checks.push(check_file(dir.join(ANDROID_LAUNCHER), size, false));
        checks.push(check_file(dir.join(ANDROID_LAUNCHER_ROUND), size, true));
        checks.push(check_file(dir.join(ANDROID_LAUNCHER_FOREGROUND), size, true));
    }
    checks
}
