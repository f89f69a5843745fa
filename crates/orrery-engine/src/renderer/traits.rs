//! Drawing surface contract.
//!
//! The scene renderer issues draw calls against [`DrawSurface`]; it never
//! touches a concrete backend. All coordinates are device pixels with the
//! origin at the top-left of the viewport.

use glam::Vec2;
use serde::Serialize;

/// RGBA color, each channel in 0.0 - 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Color from u8 RGB channels and a float alpha, like a CSS `rgba()`.
    pub fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Full-viewport radial gradient painted behind everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Backdrop {
    pub inner_center: Vec2,
    pub inner_radius: f32,
    pub outer_center: Vec2,
    pub outer_radius: f32,
    pub inner_color: Color,
    pub outer_color: Color,
    pub size: Vec2,
}

/// A shaded body disc: radial-gradient fill plus a soft glow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vec2,
    pub radius: f32,
    pub fill: Color,
    pub glow: Color,
    pub glow_blur: f32,
}

/// A text label anchored at its baseline start.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub position: Vec2,
    pub font_px: f32,
    pub color: Color,
}

/// Backend-neutral 2D drawing target.
pub trait DrawSurface {
    /// Drop everything drawn for the previous frame.
    fn clear(&mut self);

    fn backdrop(&mut self, backdrop: &Backdrop);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color);

    /// Stroke a polyline; `closed` joins the last point back to the first.
    fn stroke_path(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color);

    fn disc(&mut self, disc: &Disc);

    fn label(&mut self, label: &Label);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Test double that records draw calls.

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Backdrop,
        FillCircle { center: Vec2, radius: f32 },
        StrokeCircle { center: Vec2, radius: f32 },
        StrokePath { points: Vec<Vec2>, closed: bool },
        Disc(Disc),
        Label(Label),
    }

    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingSurface {
        pub fn closed_paths(&self) -> usize {
            self.calls
                .iter()
                .filter(|c| matches!(c, DrawCall::StrokePath { closed: true, .. }))
                .count()
        }

        pub fn discs(&self) -> Vec<&Disc> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Disc(d) => Some(d),
                    _ => None,
                })
                .collect()
        }

        pub fn labels(&self) -> Vec<&str> {
            self.calls
                .iter()
                .filter_map(|c| match c {
                    DrawCall::Label(l) => Some(l.text.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl DrawSurface for RecordingSurface {
        fn clear(&mut self) {
            self.calls.clear();
            self.calls.push(DrawCall::Clear);
        }

        fn backdrop(&mut self, _backdrop: &Backdrop) {
            self.calls.push(DrawCall::Backdrop);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, _color: Color) {
            self.calls.push(DrawCall::FillCircle { center, radius });
        }

        fn stroke_circle(&mut self, center: Vec2, radius: f32, _width: f32, _color: Color) {
            self.calls.push(DrawCall::StrokeCircle { center, radius });
        }

        fn stroke_path(&mut self, points: &[Vec2], closed: bool, _width: f32, _color: Color) {
            self.calls.push(DrawCall::StrokePath {
                points: points.to_vec(),
                closed,
            });
        }

        fn disc(&mut self, disc: &Disc) {
            self.calls.push(DrawCall::Disc(*disc));
        }

        fn label(&mut self, label: &Label) {
            self.calls.push(DrawCall::Label(label.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_scales_channels() {
        let c = Color::rgba8(255, 0, 51, 0.5);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-6);
        assert_eq!(c.a, 0.5);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::WHITE.with_alpha(0.25);
        assert_eq!((c.r, c.g, c.b, c.a), (1.0, 1.0, 1.0, 0.25));
    }
}
