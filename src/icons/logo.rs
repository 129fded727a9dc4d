//! Logo loading and logo-based icon compositions

use super::canvas::{Canvas, apply_mask, ellipse_mask, rgba_to_pixmap};
use super::constants::{
    BADGE_BORDER_SIZE, BADGE_BORDER_WIDTH, BADGE_CIRCLE_SIZE, BADGE_LOGO_SIZE, BADGE_MASK_SIZE,
    PLACEHOLDER_SIZE, REFERENCE_SIZE, WHITE,
};
use crate::config::{IconSettings, Rgb};
use crate::exceptions::Result;
use image::imageops::{self, FilterType};
use image::{Rgb as RgbPixel, RgbImage, RgbaImage};
use log::{info, warn};
use std::path::Path;

/// Transparent stand-in drawn when the logo cannot be read
pub fn placeholder(settings: &IconSettings) -> Result<RgbaImage> {
    let size = PLACEHOLDER_SIZE;
    let c = (size / 2) as f32;
    let r = (size / 3) as i32;
    let at = |v: i32| v as f32;

    let mut canvas = Canvas::transparent(size)?;
    canvas.fill_ellipse(c - at(r), c - at(r / 2), c + at(r), c + at(r / 2), settings.primary);
    canvas.fill_ellipse(
        c - at(r / 3),
        c - at(r / 4),
        c + at(r / 3),
        c + at(r / 4),
        settings.secondary,
    );
    canvas.fill_ellipse(
        c + at(r / 2),
        c - at(r / 6),
        c + at(r),
        c + at(r / 6),
        settings.accent,
    );
    Ok(canvas.into_rgba())
}

/// Open the configured logo; a missing or unreadable file yields the placeholder
pub fn load_logo_or_placeholder(path: &Path, settings: &IconSettings) -> Result<RgbaImage> {
    if !path.is_file() {
        warn!("⚠️ Logo not found at {}, using placeholder whistle", path.display());
        return placeholder(settings);
    }
    match image::open(path) {
        Ok(logo) => {
            info!(
                "🖼️ Loaded logo {} ({}x{})",
                path.display(),
                logo.width(),
                logo.height()
            );
            Ok(logo.to_rgba8())
        }
        Err(e) => {
            warn!("⚠️ Cannot decode logo {}: {e}, using placeholder whistle", path.display());
            placeholder(settings)
        }
    }
}

pub fn resize(image: &RgbaImage, size: u32) -> RgbaImage {
    imageops::resize(image, size, size, FilterType::Lanczos3)
}

/// Alpha-composite onto an opaque background
pub fn flatten(image: &RgbaImage, background: Rgb) -> RgbImage {
    let mut out = RgbImage::new(image.width(), image.height());
    for (dst, src) in out.pixels_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        let a = a as u16;
        let mix = |fg: u8, bg: u8| ((fg as u16 * a + bg as u16 * (255 - a) + 127) / 255) as u8;
        *dst = RgbPixel([
            mix(r, background[0]),
            mix(g, background[1]),
            mix(b, background[2]),
        ]);
    }
    out
}

/// The logo resized to `logo_size`, flattened and centered on an opaque square
pub fn centered_on_background(
    logo: &RgbaImage,
    canvas_size: u32,
    logo_size: u32,
    background: Rgb,
) -> RgbImage {
    let flat = flatten(&resize(logo, logo_size), background);
    let mut out = RgbImage::from_pixel(canvas_size, canvas_size, RgbPixel(background));
    let offset = (canvas_size as i64 - logo_size as i64) / 2;
    imageops::replace(&mut out, &flat, offset, offset);
    out
}

/// Brand badge: the center of the logo in a circle on the brand colors
pub fn badge(logo: &RgbaImage, size: u32, settings: &IconSettings) -> Result<RgbImage> {
    let scale = size as f64 / REFERENCE_SIZE as f64;
    let px = |v: u32| ((v as f64 * scale) as u32).max(1);
    let centered = |extent: u32| (size as f32 - extent as f32) / 2.0;

    let mut canvas = Canvas::new(size, settings.primary)?;

    let circle = px(BADGE_CIRCLE_SIZE);
    let at = centered(circle);
    canvas.fill_ellipse(at, at, at + circle as f32, at + circle as f32, settings.secondary);

    let logo_size = px(BADGE_LOGO_SIZE);
    let mask_size = px(BADGE_MASK_SIZE);
    let mut center = resize(logo, logo_size);
    let inset = (logo_size - mask_size) as f32 / 2.0;
    let mask = ellipse_mask(
        logo_size,
        logo_size,
        inset,
        inset,
        inset + mask_size as f32,
        inset + mask_size as f32,
    )?;
    apply_mask(&mut center, &mask);
    let offset = centered(logo_size) as i32;
    canvas.overlay(&rgba_to_pixmap(&center)?, offset, offset);

    let border = px(BADGE_BORDER_SIZE);
    let at = centered(border);
    let width = (BADGE_BORDER_WIDTH as f64 * scale).max(1.0) as f32;
    canvas.stroke_ellipse(at, at, at + border as f32, at + border as f32, width, WHITE);

    Ok(canvas.into_rgb())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_placeholder_shape() {
        let settings = IconSettings::default();
        let img = placeholder(&settings).unwrap();
        assert_eq!(img.dimensions(), (512, 512));
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        // center belongs to the mouthpiece
        assert_eq!(img.get_pixel(256, 256).0, [39, 141, 212, 255]);
        // left end of the body
        assert_eq!(img.get_pixel(120, 256).0, [32, 54, 107, 255]);
        // ring on the right
        assert_eq!(img.get_pixel(400, 256).0, [36, 211, 103, 255]);
    }

    #[test]
    fn test_missing_and_corrupt_logo_fall_back() {
        let temp = TempDir::new().unwrap();
        let settings = IconSettings::default();

        let missing = load_logo_or_placeholder(&temp.path().join("none.png"), &settings).unwrap();
        assert_eq!(missing.dimensions(), (512, 512));

        let corrupt = temp.path().join("logo.png");
        fs::write(&corrupt, b"not a png").unwrap();
        let fallback = load_logo_or_placeholder(&corrupt, &settings).unwrap();
        assert_eq!(fallback, missing);
    }

    #[test]
    fn test_loads_real_logo() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logo.png");
        RgbaImage::from_pixel(64, 32, Rgba([1, 2, 3, 255]))
            .save(&path)
            .unwrap();
        let logo = load_logo_or_placeholder(&path, &IconSettings::default()).unwrap();
        assert_eq!(logo.dimensions(), (64, 32));
    }

    #[test]
    fn test_flatten() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([100, 100, 100, 255]));
        let flat = flatten(&img, [255, 255, 255]);
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [100, 100, 100]);
    }

    #[test]
    fn test_centered_on_background() {
        let logo = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        let out = centered_on_background(&logo, 1024, 800, WHITE);
        assert_eq!(out.dimensions(), (1024, 1024));
        assert_eq!(out.get_pixel(111, 512).0, WHITE);
        assert_eq!(out.get_pixel(112, 512).0, [0, 0, 0]);
        assert_eq!(out.get_pixel(911, 512).0, [0, 0, 0]);
        assert_eq!(out.get_pixel(912, 512).0, WHITE);
    }

    #[test]
    fn test_badge_layers() {
        let settings = IconSettings::default();
        let logo = RgbaImage::from_pixel(16, 16, Rgba([250, 0, 0, 255]));
        let img = badge(&logo, 1024, &settings).unwrap();
        assert_eq!(img.dimensions(), (1024, 1024));
        assert_eq!(img.get_pixel(0, 0).0, settings.primary);
        // inside the 800 circle, outside the 300 logo window
        assert_eq!(img.get_pixel(512, 200).0, settings.secondary);
        assert_eq!(img.get_pixel(512, 512).0, [250, 0, 0]);
        // white border ring crosses the vertical center line near the top
        assert_eq!(img.get_pixel(512, 106).0, WHITE);
    }
}
