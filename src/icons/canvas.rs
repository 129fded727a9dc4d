//! Drawing surface for icons
//!
//! A thin layer over a `tiny_skia::Pixmap` with the handful of primitives the
//! icon designs need. Boxes are given as (left, top, right, bottom) edges in
//! pixels. Degenerate shapes are skipped, never reported.

use crate::config::Rgb;
use crate::exceptions::{ReleaseError, Result};
use image::{Rgb as RgbPixel, RgbImage, Rgba, RgbaImage};
use log::trace;
use std::fmt;
use tiny_skia::{
    ColorU8, FillRule, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8,
    Rect, Stroke, Transform,
};

// Cubic approximation of a quarter circle
const KAPPA: f32 = 0.552_284_8;

pub struct Canvas {
    pixmap: Pixmap,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color[0], color[1], color[2], 255);
    paint.anti_alias = true;
    paint
}

// Rect with positive width and height
fn solid_rect(l: f32, t: f32, r: f32, b: f32) -> Option<Rect> {
    if r - l <= 0.0 || b - t <= 0.0 {
        return None;
    }
    Rect::from_ltrb(l, t, r, b)
}

fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let r = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(rect));
    }
    let (l, t, rt, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    let c = r * KAPPA;

    let mut pb = PathBuilder::new();
    pb.move_to(l + r, t);
    pb.line_to(rt - r, t);
    pb.cubic_to(rt - r + c, t, rt, t + r - c, rt, t + r);
    pb.line_to(rt, b - r);
    pb.cubic_to(rt, b - r + c, rt - r + c, b, rt - r, b);
    pb.line_to(l + r, b);
    pb.cubic_to(l + r - c, b, l, b - r + c, l, b - r);
    pb.line_to(l, t + r);
    pb.cubic_to(l, t + r - c, l + r - c, t, l + r, t);
    pb.close();
    pb.finish()
}

impl Canvas {
    /// Square surface filled with an opaque background
    pub fn new(size: u32, background: Rgb) -> Result<Self> {
        let mut canvas = Self::transparent(size)?;
        canvas
            .pixmap
            .fill(tiny_skia::Color::from_rgba8(background[0], background[1], background[2], 255));
        Ok(canvas)
    }

    /// Square fully transparent surface
    pub fn transparent(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size)
            .ok_or_else(|| ReleaseError::Render(format!("cannot allocate a {size}x{size} canvas")))?;
        Ok(Self { pixmap })
    }

    pub fn size(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Fill each row with `top * (1 - r) + bottom * r`, `r = row / size`
    pub fn vertical_gradient(&mut self, top: Rgb, bottom: Rgb) {
        let size = self.size() as usize;
        let pixels = self.pixmap.pixels_mut();
        for row in 0..size {
            let ratio = row as f64 / size as f64;
            let channel = |i: usize| {
                (top[i] as f64 * (1.0 - ratio) + bottom[i] as f64 * ratio) as u8
            };
            let color = ColorU8::from_rgba(channel(0), channel(1), channel(2), 255).premultiply();
            pixels[row * size..(row + 1) * size].fill(color);
        }
    }

    pub fn fill_rounded_rect(&mut self, l: f32, t: f32, r: f32, b: f32, radius: f32, color: Rgb) {
        let Some(path) = solid_rect(l, t, r, b).and_then(|rect| rounded_rect_path(rect, radius))
        else {
            trace!("Skipping empty rounded rect ({l}, {t}, {r}, {b})");
            return;
        };
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
    }

    pub fn fill_ellipse(&mut self, l: f32, t: f32, r: f32, b: f32, color: Rgb) {
        let Some(path) = solid_rect(l, t, r, b).and_then(PathBuilder::from_oval) else {
            trace!("Skipping empty ellipse ({l}, {t}, {r}, {b})");
            return;
        };
        self.pixmap
            .fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
    }

    /// Ellipse outline drawn inside its bounding box
    pub fn stroke_ellipse(&mut self, l: f32, t: f32, r: f32, b: f32, width: f32, color: Rgb) {
        let inset = width / 2.0;
        let Some(path) = solid_rect(l + inset, t + inset, r - inset, b - inset)
            .and_then(PathBuilder::from_oval)
        else {
            trace!("Skipping empty ellipse outline ({l}, {t}, {r}, {b}) width {width}");
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    pub fn line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, width: f32, color: Rgb) {
        if (x0 == x1 && y0 == y1) || width <= 0.0 {
            trace!("Skipping degenerate line ({x0}, {y0}) -> ({x1}, {y1})");
            return;
        }
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        let Some(path) = pb.finish() else {
            trace!("Skipping degenerate line ({x0}, {y0}) -> ({x1}, {y1})");
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    /// Blend `color` into one pixel with the given coverage (0..=1)
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        let size = self.size() as i32;
        if x < 0 || y < 0 || x >= size || y >= size || coverage <= 0.0 {
            return;
        }
        let idx = (y * size + x) as usize;
        let cov = coverage.min(1.0);
        let dst = self.pixmap.pixels()[idx].demultiply();
        let mix = |src: u8, dst: u8| (src as f32 * cov + dst as f32 * (1.0 - cov)).round() as u8;
        let alpha = (255.0 * cov + dst.alpha() as f32 * (1.0 - cov)).round() as u8;
        let blended = ColorU8::from_rgba(
            mix(color[0], dst.red()),
            mix(color[1], dst.green()),
            mix(color[2], dst.blue()),
            alpha,
        );
        self.pixmap.pixels_mut()[idx] = blended.premultiply();
    }

    /// Source-over composite of `src` with its top-left corner at (x, y)
    pub fn overlay(&mut self, src: &Pixmap, x: i32, y: i32) {
        self.pixmap.draw_pixmap(
            x,
            y,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Drop alpha
    pub fn into_rgb(self) -> RgbImage {
        let size = self.size();
        let mut out = RgbImage::new(size, size);
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = RgbPixel([c.red(), c.green(), c.blue()]);
        }
        out
    }

    pub fn into_rgba(self) -> RgbaImage {
        pixmap_to_rgba(&self.pixmap)
    }
}

/// Straight-alpha copy of a pixmap
pub fn pixmap_to_rgba(pixmap: &Pixmap) -> RgbaImage {
    let mut out = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    out
}

/// Premultiplied copy of an RGBA image
pub fn rgba_to_pixmap(image: &RgbaImage) -> Result<Pixmap> {
    let mut pixmap = Pixmap::new(image.width(), image.height()).ok_or_else(|| {
        ReleaseError::Render(format!(
            "cannot allocate a {}x{} pixmap",
            image.width(),
            image.height()
        ))
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Anti-aliased coverage (0..=255 per pixel) of an ellipse inscribed in the given box
pub fn ellipse_mask(width: u32, height: u32, l: f32, t: f32, r: f32, b: f32) -> Result<Vec<u8>> {
    let mut mask = Mask::new(width, height)
        .ok_or_else(|| ReleaseError::Render(format!("cannot allocate a {width}x{height} mask")))?;
    if let Some(path) = solid_rect(l, t, r, b).and_then(PathBuilder::from_oval) {
        mask.fill_path(&path, FillRule::Winding, true, Transform::identity());
    }
    Ok(mask.data().to_vec())
}

/// Multiply the alpha channel by a coverage mask
pub fn apply_mask(image: &mut RgbaImage, mask: &[u8]) {
    for (pixel, &coverage) in image.pixels_mut().zip(mask) {
        pixel.0[3] = ((pixel.0[3] as u16 * coverage as u16 + 127) / 255) as u8;
    }
}

/// Pixel of a pixmap as straight RGBA
pub fn pixel_at(pixmap: &Pixmap, x: u32, y: u32) -> Option<[u8; 4]> {
    let p: PremultipliedColorU8 = pixmap.pixel(x, y)?;
    let c = p.demultiply();
    Some([c.red(), c.green(), c.blue(), c.alpha()])
}
