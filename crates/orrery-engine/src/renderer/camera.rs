use glam::DVec2;

use crate::api::config::ViewerConfig;
use crate::api::types::BodyId;
use crate::core::units::AU;

/// Top-down 2D camera mapping world meters to device pixels.
///
/// `screen = world * px_per_meter + offset`, where
/// `px_per_meter = au_pixels / AU * zoom`. The renderer, the picker's
/// footprints and manual centering all go through this one transform.
#[derive(Debug, Clone)]
pub struct Camera2D {
    /// Zoom factor, never below `min_zoom`.
    pub zoom: f64,
    /// Screen position of the world origin, in device pixels.
    pub offset: DVec2,
    /// Viewport size in device pixels.
    pub viewport: DVec2,
    /// Device pixel ratio of the drawing surface (≥ 1).
    pub dpr: f64,
    follow_id: Option<BodyId>,
    au_pixels: f64,
    default_zoom: f64,
    min_zoom: f64,
}

impl Camera2D {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            zoom: config.default_zoom,
            offset: DVec2::ZERO,
            viewport: DVec2::new(800.0, 600.0),
            dpr: 1.0,
            follow_id: None,
            au_pixels: config.au_pixels,
            default_zoom: config.default_zoom,
            min_zoom: config.min_zoom,
        }
    }

    /// Resize the viewport (device pixels). A ratio below 1 is treated as 1.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.viewport = DVec2::new(width.max(0.0), height.max(0.0));
        self.dpr = if dpr.is_finite() { dpr.max(1.0) } else { 1.0 };
    }

    /// Viewport center in device pixels.
    pub fn center(&self) -> DVec2 {
        self.viewport * 0.5
    }

    pub fn px_per_meter(&self) -> f64 {
        self.au_pixels / AU * self.zoom
    }

    /// World position scaled to pixels, before the offset is applied.
    pub fn world_pixels(&self, x_meters: f64, y_meters: f64) -> DVec2 {
        DVec2::new(x_meters, y_meters) * self.px_per_meter()
    }

    pub fn world_to_screen(&self, x_meters: f64, y_meters: f64) -> DVec2 {
        self.world_pixels(x_meters, y_meters) + self.offset
    }

    /// Inverse of [`Camera2D::world_to_screen`].
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        (screen - self.offset) / self.px_per_meter()
    }

    // -- Follow --

    pub fn follow_id(&self) -> Option<&BodyId> {
        self.follow_id.as_ref()
    }

    /// Choose the body to follow. The camera moves on the next render, via
    /// [`Camera2D::lock_follow_offset`].
    pub fn set_follow(&mut self, id: Option<BodyId>) {
        if self.follow_id != id {
            match &id {
                Some(id) => log::info!("camera: following {id}"),
                None => log::info!("camera: follow released"),
            }
        }
        self.follow_id = id;
    }

    /// Set the offset so that `world_px` lands on the viewport center.
    pub fn lock_follow_offset(&mut self, world_px: DVec2) {
        self.offset = self.center() - world_px;
    }

    // -- Manual navigation --

    /// Pan by a pixel delta. While following, the next follow lock
    /// overrides this; following always wins each frame.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset += DVec2::new(dx, dy);
    }

    /// Scale zoom by `factor`, keeping the world point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: DVec2, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.screen_to_world(screen);
        self.zoom = (self.zoom * factor).max(self.min_zoom);
        self.offset = screen - anchor * self.px_per_meter();
    }

    /// Default zoom and zero offset. Follow target is kept.
    pub fn reset(&mut self) {
        self.zoom = self.default_zoom;
        self.offset = DVec2::ZERO;
    }

    /// One-shot recentre on a world coordinate, independent of follow.
    pub fn center_on_world(&mut self, x_meters: f64, y_meters: f64, px_per_meter: f64) {
        self.offset = self.center() - DVec2::new(x_meters, y_meters) * px_per_meter;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera2D {
        let mut cam = Camera2D::new(&ViewerConfig::default());
        cam.resize(1600.0, 1000.0, 2.0);
        cam
    }

    #[test]
    fn one_au_is_au_pixels_at_unit_zoom() {
        let cam = camera();
        let p = cam.world_to_screen(AU, 0.0);
        assert!((p.x - 280.0).abs() < 1e-9);
        assert_eq!(p.y, 0.0);
    }

    #[test]
    fn world_screen_round_trip() {
        let mut cam = camera();
        cam.zoom = 3.7;
        cam.pan(-123.5, 48.25);
        for &(x, y) in &[(1.0e11, -2.5e10), (0.0, 0.0), (-4.2e12, 7.7e9)] {
            let back = cam.screen_to_world(cam.world_to_screen(x, y));
            assert!((back.x - x).abs() <= x.abs() * 1e-12 + 1e-3);
            assert!((back.y - y).abs() <= y.abs() * 1e-12 + 1e-3);
        }
    }

    #[test]
    fn follow_lock_centers_point() {
        let mut cam = camera();
        let world_px = cam.world_pixels(1.5e11, -3.0e10);
        cam.lock_follow_offset(world_px);
        let p = cam.world_to_screen(1.5e11, -3.0e10);
        assert!((p - cam.center()).length() < 1e-6);
    }

    #[test]
    fn zoom_at_keeps_anchor_fixed() {
        let mut cam = camera();
        cam.pan(200.0, 100.0);
        let anchor = DVec2::new(450.0, 320.0);
        let world = cam.screen_to_world(anchor);
        cam.zoom_at(anchor, 1.8);
        assert!((cam.zoom - 1.8).abs() < 1e-12);
        let p = cam.world_to_screen(world.x, world.y);
        assert!((p - anchor).length() < 1e-6);
    }

    #[test]
    fn zoom_is_floored() {
        let mut cam = camera();
        cam.zoom_at(DVec2::ZERO, 1e-6);
        assert_eq!(cam.zoom, ViewerConfig::default().min_zoom);
        cam.zoom_at(DVec2::ZERO, f64::NAN);
        assert_eq!(cam.zoom, ViewerConfig::default().min_zoom);
    }

    #[test]
    fn reset_keeps_follow() {
        let mut cam = camera();
        cam.set_follow(Some(BodyId::from("p1")));
        cam.zoom = 4.0;
        cam.pan(10.0, 10.0);
        cam.reset();
        assert_eq!(cam.zoom, 1.0);
        assert_eq!(cam.offset, DVec2::ZERO);
        assert_eq!(cam.follow_id(), Some(&BodyId::from("p1")));
    }

    #[test]
    fn center_on_world_ignores_follow() {
        let mut cam = camera();
        let ppm = cam.px_per_meter();
        cam.center_on_world(AU, AU, ppm);
        let p = cam.world_to_screen(AU, AU);
        assert!((p - cam.center()).length() < 1e-9);
        assert!(cam.follow_id().is_none());
    }
}
