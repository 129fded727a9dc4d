//! Android launcher icons per density

use super::canvas::{apply_mask, ellipse_mask};
use super::constants::{
    ANDROID_DENSITIES, ANDROID_LAUNCHER, ANDROID_LAUNCHER_FOREGROUND, ANDROID_LAUNCHER_ROUND,
    FOREGROUND_PADDING_DIVISOR, WHITE,
};
use super::logo::{flatten, resize};
use super::{IconFile, save_png};
use crate::exceptions::Result;
use image::imageops;
use image::{RgbImage, RgbaImage};
use log::info;
use std::fs;
use std::path::Path;

/// Square launcher icon, opaque
pub fn launcher(source: &RgbaImage, size: u32) -> RgbImage {
    flatten(&resize(source, size), WHITE)
}

/// Launcher icon clipped to the inscribed circle
pub fn round(source: &RgbaImage, size: u32) -> Result<RgbaImage> {
    let opaque = launcher(source, size);
    let mut icon = image::DynamicImage::ImageRgb8(opaque).to_rgba8();
    let mask = ellipse_mask(size, size, 0.0, 0.0, size as f32, size as f32)?;
    apply_mask(&mut icon, &mask);
    Ok(icon)
}

/// Adaptive-icon foreground: the source inset by a quarter of the size on every side
pub fn foreground(source: &RgbaImage, size: u32) -> RgbaImage {
    let padding = size / FOREGROUND_PADDING_DIVISOR;
    let inner = size.saturating_sub(padding * 2).max(1);
    let mut icon = RgbaImage::new(size, size);
    imageops::overlay(&mut icon, &resize(source, inner), padding as i64, padding as i64);
    icon
}

/// Write the three launcher images for every density under `res_dir/mipmap-<density>/`
pub fn write_android_icons(res_dir: &Path, source: &RgbaImage) -> Result<Vec<IconFile>> {
    let mut written = Vec::with_capacity(ANDROID_DENSITIES.len() * 3);
    for (density, size) in ANDROID_DENSITIES {
        let dir = res_dir.join(format!("mipmap-{density}"));
        fs::create_dir_all(&dir)?;

        let path = dir.join(ANDROID_LAUNCHER);
        save_png(&launcher(source, size), &path)?;
        written.push(IconFile { path, size });

        let path = dir.join(ANDROID_LAUNCHER_ROUND);
        save_png(&round(source, size)?, &path)?;
        written.push(IconFile { path, size });

        let path = dir.join(ANDROID_LAUNCHER_FOREGROUND);
        save_png(&foreground(source, size), &path)?;
        written.push(IconFile { path, size });

        info!("🤖 Created icons for mipmap-{density} ({size}x{size})");
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ColorType, Rgba};
    use tempfile::TempDir;

    fn solid_logo() -> RgbaImage {
        RgbaImage::from_pixel(64, 64, Rgba([20, 40, 60, 255]))
    }

    #[test]
    fn test_round_corners_transparent() {
        let icon = round(&solid_logo(), 48).unwrap();
        for (x, y) in [(0, 0), (47, 0), (0, 47), (47, 47)] {
            assert_eq!(icon.get_pixel(x, y).0[3], 0, "corner ({x}, {y})");
        }
        assert_eq!(icon.get_pixel(24, 24).0, [20, 40, 60, 255]);
    }

    #[test]
    fn test_foreground_padding() {
        let icon = foreground(&solid_logo(), 96);
        assert_eq!(icon.get_pixel(23, 48).0[3], 0);
        assert_eq!(icon.get_pixel(48, 23).0[3], 0);
        assert_eq!(icon.get_pixel(72, 48).0[3], 0);
        assert_eq!(icon.get_pixel(48, 48).0, [20, 40, 60, 255]);
    }

    #[test]
    fn test_launcher_is_opaque_over_transparent_source() {
        let icon = launcher(&RgbaImage::new(32, 32), 48);
        assert_eq!(icon.dimensions(), (48, 48));
        assert!(icon.pixels().all(|p| p.0 == WHITE));
    }

    #[test]
    fn test_write_all_densities() {
        let temp = TempDir::new().unwrap();
        let written = write_android_icons(temp.path(), &solid_logo()).unwrap();
        assert_eq!(written.len(), 15);

        for (density, size) in ANDROID_DENSITIES {
            let dir = temp.path().join(format!("mipmap-{density}"));
            let launcher = image::open(dir.join("ic_launcher.png")).unwrap();
            assert_eq!((launcher.width(), launcher.height()), (size, size));
            assert_eq!(launcher.color(), ColorType::Rgb8);

            let round = image::open(dir.join("ic_launcher_round.png")).unwrap();
            assert_eq!(round.color(), ColorType::Rgba8);
            assert_eq!(round.to_rgba8().get_pixel(0, 0).0[3], 0);

            let fg = image::open(dir.join("ic_launcher_foreground.png")).unwrap();
            assert_eq!((fg.width(), fg.height()), (size, size));
        }
    }
}
