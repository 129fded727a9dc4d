//! Text labels rendered with `ab_glyph`

use super::canvas::Canvas;
use super::constants::FALLBACK_FONTS;
use crate::config::Rgb;
use ab_glyph::{Font, FontVec, PxScale, ScaleFont, point};
use anyhow::{Context, anyhow};
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::Path;

pub struct LabelFont {
    font: FontVec,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont")
            .field("glyphs", &self.font.glyph_count())
            .finish()
    }
}

impl LabelFont {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = fs::read(path).with_context(|| format!("read font {}", path.display()))?;
        let font = FontVec::try_from_vec(data)
            .map_err(|e| anyhow!("decode font {}: {e}", path.display()))?;
        debug!("Loaded label font {}", path.display());
        Ok(Self { font })
    }

    /// Load the font, else the first loadable system fallback, else warn and return `None`
    pub fn load_optional(path: &Path) -> Option<Self> {
        let fallbacks = FALLBACK_FONTS.iter().map(Path::new);
        Self::load_first(std::iter::once(path).chain(fallbacks))
    }

    /// First candidate that loads
    pub fn load_first<'a>(candidates: impl IntoIterator<Item = &'a Path>) -> Option<Self> {
        let mut first_error = None;
        for path in candidates {
            match Self::load(path) {
                Ok(font) => {
                    if first_error.is_some() {
                        warn!("⚠️ Using fallback label font {}", path.display());
                    }
                    return Some(font);
                }
                Err(e) => {
                    debug!("Font candidate rejected: {e:#}");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => warn!("⚠️ No label font available, drawing without text: {e:#}"),
            None => warn!("⚠️ No label font candidates, drawing without text"),
        }
        None
    }

    /// Advance width of `text` at `px` pixels, kerning included
    pub fn text_width(&self, text: &str, px: f32) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(px));
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        width
    }

    /// Draw `text` with its top-left corner at (x, y)
    pub fn draw(&self, canvas: &mut Canvas, text: &str, x: f32, y: f32, px: f32, color: Rgb) {
        let scale = PxScale::from(px);
        let scaled = self.font.as_scaled(scale);
        let baseline = y + scaled.ascent();
        let mut caret = x;
        let mut previous = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                canvas.blend_pixel(
                    bounds.min.x as i32 + gx as i32,
                    bounds.min.y as i32 + gy as i32,
                    color,
                    coverage,
                );
            });
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LabelStyle {
    pub px: f32,
    pub fill: Rgb,
    pub outline: Rgb,
    /// The outline is the text stamped at every offset within this radius
    pub outline_radius: i32,
}

/// Outlined label centered horizontally, top edge at `y`
pub fn draw_centered_label(canvas: &mut Canvas, font: &LabelFont, text: &str, y: f32, style: &LabelStyle) {
    let px = style.px;
    let x = ((canvas.size() as f32 - font.text_width(text, px)) / 2.0).floor();
    let radius = style.outline_radius;
    for dx in -radius..=radius {
        for dy in -radius..=radius {
            if dx != 0 || dy != 0 {
                font.draw(canvas, text, x + dx as f32, y + dy as f32, px, style.outline);
            }
        }
    }
    font.draw(canvas, text, x, y, px, style.fill);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IconSettings;
    use tempfile::TempDir;

    #[test]
    fn test_missing_font() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.ttf");
        assert!(LabelFont::load(&missing).is_err());
        assert!(LabelFont::load_first([missing.as_path()]).is_none());
    }

    #[test]
    fn test_fallback_skips_unusable_candidates() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.ttf");
        let garbage = temp.path().join("bad.ttf");
        fs::write(&garbage, b"not a font").unwrap();
        assert!(LabelFont::load_first([missing.as_path(), garbage.as_path()]).is_none());

        // Only checked where one of the system fonts is installed
        let system: Vec<&Path> = FALLBACK_FONTS.iter().map(Path::new).collect();
        if system.iter().any(|p| LabelFont::load(p).is_ok()) {
            assert!(LabelFont::load_first([missing.as_path()].into_iter().chain(system)).is_some());
            assert!(LabelFont::load_optional(&missing).is_some());
        }
    }

    #[test]
    fn test_garbage_font() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ttf");
        fs::write(&path, b"not a font").unwrap();
        let err = LabelFont::load(&path).err().unwrap();
        assert!(format!("{err:#}").contains("decode font"));
    }

    #[test]
    fn test_label_marks_canvas_when_font_present() {
        // Only runs where the default system font is installed
        let Some(font) = LabelFont::load_optional(&IconSettings::default().font) else {
            return;
        };
        assert!(font.text_width("IH", 60.0) > font.text_width("I", 60.0));

        let mut canvas = Canvas::new(200, [0, 0, 0]).unwrap();
        let style = LabelStyle {
            px: 60.0,
            fill: [255, 255, 255],
            outline: [0, 0, 255],
            outline_radius: 2,
        };
        draw_centered_label(&mut canvas, &font, "IH", 50.0, &style);
        let img = canvas.into_rgb();
        assert!(img.pixels().any(|p| p.0 == [255, 255, 255]));
        assert!(img.pixels().any(|p| p.0 == [0, 0, 255]));
    }
}
