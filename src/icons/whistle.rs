//! The whistle icon design
//!
//! Coordinates come from a 1024-unit reference design and are scaled by
//! `size / 1024` with integer truncation. Boxes are inclusive pixel ranges.
//! Small icons drop detail: no ring below 40 px, no sound lines or border
//! below 60 px, no sound holes below 64 px.

use super::canvas::Canvas;
use super::constants::{
    BORDER_MIN_SIZE, LABEL_FONT_PX, LABEL_OUTLINE_RADIUS, LABEL_Y, REFERENCE_SIZE, RING_MIN_SIZE,
    SOUND_HOLES_MIN_SIZE, SOUND_LINES_MIN_SIZE, WHITE,
};
use super::label::{LabelFont, LabelStyle, draw_centered_label};
use crate::config::IconSettings;
use crate::exceptions::Result;
use image::RgbImage;
use log::trace;

/// Which piece of the design a shape belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    Body,
    Mouthpiece,
    SoundHole,
    Ring,
    InnerRing,
    SoundLine,
    Border,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    RoundedRect { bounds: [i32; 4], radius: i32 },
    EllipseOutline { bounds: [i32; 4], width: i32 },
    Line { from: (i32, i32), to: (i32, i32), width: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Element {
    pub part: Part,
    pub shape: Shape,
}

struct Scale(f64);

impl Scale {
    fn new(size: u32) -> Self {
        Scale(size as f64 / REFERENCE_SIZE as f64)
    }

    fn at(&self, v: i32) -> i32 {
        (v as f64 * self.0) as i32
    }

    /// Widths and radii never vanish
    fn min1(&self, v: i32) -> i32 {
        self.at(v).max(1)
    }
}

/// Shapes of the design at `size`, in drawing order
pub fn layout(size: u32) -> Vec<Element> {
    let s = Scale::new(size);
    let mut out = Vec::new();
    let mut push = |part, shape| out.push(Element { part, shape });

    push(
        Part::Body,
        Shape::RoundedRect {
            bounds: [s.at(300), s.at(450), s.at(700), s.at(550)],
            radius: s.min1(50),
        },
    );
    push(
        Part::Mouthpiece,
        Shape::RoundedRect {
            bounds: [s.at(250), s.at(470), s.at(320), s.at(530)],
            radius: s.min1(20),
        },
    );

    if size >= SOUND_HOLES_MIN_SIZE {
        let width = s.min1(8);
        let spacing = s.at(60).max(1) as usize;
        let (top, bottom) = (s.at(420), s.at(440));
        for x in (s.at(350)..s.at(650)).step_by(spacing) {
            push(
                Part::SoundHole,
                Shape::Line {
                    from: (x, top),
                    to: (x, bottom),
                    width,
                },
            );
        }
    }

    if size >= RING_MIN_SIZE {
        let [l, t, r, b] = [s.at(680), s.at(430), s.at(750), s.at(500)];
        push(
            Part::Ring,
            Shape::EllipseOutline {
                bounds: [l, t, r, b],
                width: s.min1(12),
            },
        );
        let inset = s.at(10);
        push(
            Part::InnerRing,
            Shape::EllipseOutline {
                bounds: [l + inset, t + inset, r - inset, b - inset],
                width: s.min1(8),
            },
        );
    }

    if size >= SOUND_LINES_MIN_SIZE {
        let x = s.at(320);
        let y = s.at(480);
        let width = s.min1(6);
        for (i, length) in [40, 30, 20].into_iter().enumerate() {
            let offset = s.at(-15 + i as i32 * 15);
            push(
                Part::SoundLine,
                Shape::Line {
                    from: (x, y + offset),
                    to: (x + s.at(length), y + offset),
                    width,
                },
            );
        }
    }

    if size >= BORDER_MIN_SIZE {
        let width = s.min1(8);
        let far = size as i32 - width;
        push(
            Part::Border,
            Shape::EllipseOutline {
                bounds: [width, width, far, far],
                width,
            },
        );
    }

    out
}

fn draw(canvas: &mut Canvas, element: &Element) {
    trace!("Drawing {:?}", element.part);
    match element.shape {
        Shape::RoundedRect {
            bounds: [l, t, r, b],
            radius,
        } => canvas.fill_rounded_rect(
            l as f32,
            t as f32,
            (r + 1) as f32,
            (b + 1) as f32,
            radius as f32,
            WHITE,
        ),
        Shape::EllipseOutline {
            bounds: [l, t, r, b],
            width,
        } => canvas.stroke_ellipse(
            l as f32,
            t as f32,
            (r + 1) as f32,
            (b + 1) as f32,
            width as f32,
            WHITE,
        ),
        Shape::Line { from, to, width } => canvas.line(
            from.0 as f32 + 0.5,
            from.1 as f32 + 0.5,
            to.0 as f32 + 0.5,
            to.1 as f32 + 0.5,
            width as f32,
            WHITE,
        ),
    }
}

/// Render the whistle design; with a font, the App Store label is added
pub fn render(size: u32, settings: &IconSettings, font: Option<&LabelFont>) -> Result<RgbImage> {
    let mut canvas = Canvas::new(size, settings.primary)?;
    canvas.vertical_gradient(settings.primary, settings.secondary);

    let elements = layout(size);
    let (border, shapes): (Vec<Element>, Vec<Element>) =
        elements.into_iter().partition(|e| e.part == Part::Border);
    for element in &shapes {
        draw(&mut canvas, element);
    }

    if let Some(font) = font {
        let s = Scale::new(size);
        let style = LabelStyle {
            px: (LABEL_FONT_PX as f64 * s.0) as f32,
            fill: WHITE,
            outline: settings.primary,
            outline_radius: s.min1(LABEL_OUTLINE_RADIUS).min(LABEL_OUTLINE_RADIUS),
        };
        let y = s.at(LABEL_Y as i32) as f32;
        draw_centered_label(&mut canvas, font, &settings.label, y, &style);
    }

    for element in &border {
        draw(&mut canvas, element);
    }
    Ok(canvas.into_rgb())
}
