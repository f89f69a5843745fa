//! Scene renderer: draws one snapshot through the camera and records the
//! screen footprint of every drawn body for picking.

use std::collections::HashMap;

use glam::{DVec2, Vec2};

use super::pick::Footprint;
use super::starfield::Starfield;
use crate::api::config::ViewerConfig;
use crate::api::types::{Body, BodyId, BodyKind, Snapshot};
use crate::core::orbit_cache::OrbitCache;
use crate::core::units::AU;
use crate::renderer::camera::Camera2D;
use crate::renderer::traits::{Backdrop, Color, Disc, DrawSurface, Label};

// ── Palette ──────────────────────────────────────────────────────────

const ORBIT_COLOR: Color = Color::new(220.0 / 255.0, 226.0 / 255.0, 1.0, 0.16);
const RIM_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.12);
const SELECT_RING_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.35);
const LABEL_COLOR: Color = Color::new(240.0 / 255.0, 243.0 / 255.0, 1.0, 0.92);
const RETICLE_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.08);
const BACKDROP_INNER: Color = Color::new(40.0 / 255.0, 54.0 / 255.0, 110.0 / 255.0, 0.55);
const BACKDROP_OUTER: Color = Color::new(8.0 / 255.0, 12.0 / 255.0, 24.0 / 255.0, 1.0);

/// Fill, glow color and glow blur (CSS px) per body kind.
fn body_style(kind: BodyKind) -> (Color, Color, f32) {
    match kind {
        BodyKind::Star => (
            Color::new(1.0, 236.0 / 255.0, 200.0 / 255.0, 0.92),
            Color::new(1.0, 238.0 / 255.0, 210.0 / 255.0, 0.65),
            26.0,
        ),
        BodyKind::Planet => (
            Color::new(190.0 / 255.0, 226.0 / 255.0, 1.0, 0.85),
            Color::new(200.0 / 255.0, 220.0 / 255.0, 1.0, 0.35),
            16.0,
        ),
        BodyKind::Moon => (
            Color::new(223.0 / 255.0, 205.0 / 255.0, 1.0, 0.85),
            Color::new(200.0 / 255.0, 220.0 / 255.0, 1.0, 0.35),
            16.0,
        ),
    }
}

const RETICLE_ARM_PX: f64 = 10.0;
const SELECT_RING_GAP_PX: f64 = 4.0;
const LABEL_GAP_PX: f64 = 6.0;

pub struct SceneRenderer {
    config: ViewerConfig,
    starfield: Starfield,
    footprints: Vec<Footprint>,
}

impl SceneRenderer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            config: config.clone(),
            starfield: Starfield::generate(config.star_count, config.starfield_seed),
            footprints: Vec::new(),
        }
    }

    /// Footprints of the most recently rendered frame.
    pub fn footprints(&self) -> &[Footprint] {
        &self.footprints
    }

    /// Disc radius in device pixels for `body` at the camera's zoom.
    pub fn disc_radius(&self, body: &Body, camera: &Camera2D) -> f64 {
        let (zoom, dpr) = (camera.zoom, camera.dpr);
        match body.kind {
            BodyKind::Star => (self.config.star_min_radius_px * dpr)
                .max(self.config.star_radius_px * zoom * dpr),
            BodyKind::Planet | BodyKind::Moon => {
                let radius_au = (body.radius / AU).max(1e-12);
                (self.config.planet_min_radius_px * dpr)
                    .max(radius_au.sqrt() * self.config.planet_radius_scale * zoom * dpr)
            }
        }
    }

    /// Draw `snapshot` onto `surface`.
    ///
    /// If the camera follows a body present in this snapshot, its offset is
    /// locked first so every screen position of the frame uses it. Bodies
    /// without a position and orbits without a resolvable parent are skipped.
    pub fn render(
        &mut self,
        snapshot: &Snapshot,
        camera: &mut Camera2D,
        orbits: &OrbitCache,
        selected: Option<&BodyId>,
        surface: &mut impl DrawSurface,
    ) {
        let index: HashMap<&BodyId, &Body> = snapshot.bodies.iter().map(|b| (&b.id, b)).collect();

        let follow_px = camera
            .follow_id()
            .and_then(|id| index.get(id))
            .and_then(|b| b.position)
            .map(|p| camera.world_pixels(p.x, p.y));
        if let Some(world_px) = follow_px {
            camera.lock_follow_offset(world_px);
        }
        let camera = &*camera;

        surface.clear();
        self.draw_background(camera, surface);
        self.draw_orbits(snapshot, &index, camera, orbits, selected, surface);
        self.draw_bodies(snapshot, camera, selected, surface);
        draw_reticle(camera, surface);
    }

    fn draw_background(&self, camera: &Camera2D, surface: &mut impl DrawSurface) {
        let size = camera.viewport.as_vec2();
        surface.backdrop(&Backdrop {
            inner_center: Vec2::new(size.x * 0.5, size.y * 0.45),
            inner_radius: size.min_element() * 0.05,
            outer_center: size * 0.5,
            outer_radius: size.max_element() * 0.75,
            inner_color: BACKDROP_INNER,
            outer_color: BACKDROP_OUTER,
            size,
        });
        self.starfield.draw(surface, size);
    }

    fn draw_orbits(
        &self,
        snapshot: &Snapshot,
        index: &HashMap<&BodyId, &Body>,
        camera: &Camera2D,
        orbits: &OrbitCache,
        selected: Option<&BodyId>,
        surface: &mut impl DrawSurface,
    ) {
        let width = (1.15 * camera.dpr).max(1.0) as f32;
        let hide_moon_orbits = camera.zoom < self.config.moon_orbit_min_zoom;

        for body in &snapshot.bodies {
            let Some(orbit) = &body.orbit else { continue };
            let Some(parent) = index.get(&orbit.parent_id) else {
                log::debug!("orbit of {} skipped: parent {} not in snapshot", body.id, orbit.parent_id);
                continue;
            };
            let Some(origin) = parent.position else { continue };

            if body.kind == BodyKind::Moon && hide_moon_orbits && selected != Some(&body.id) {
                continue;
            }

            let Some(local) = orbits.get(&body.id) else { continue };
            if local.len() < 2 {
                continue;
            }

            let path: Vec<Vec2> = local
                .iter()
                .map(|p| camera.world_to_screen(origin.x + p.x, origin.y + p.y).as_vec2())
                .collect();
            surface.stroke_path(&path, true, width, ORBIT_COLOR);
        }
    }

    fn draw_bodies(
        &mut self,
        snapshot: &Snapshot,
        camera: &Camera2D,
        selected: Option<&BodyId>,
        surface: &mut impl DrawSurface,
    ) {
        let dpr = camera.dpr;
        let follow = camera.follow_id();

        let mut order: Vec<&Body> = snapshot.bodies.iter().collect();
        order.sort_by_key(|b| b.kind != BodyKind::Star);

        self.footprints.clear();
        for body in order {
            let Some(position) = body.position else {
                log::warn!("body {} has no position; skipped this frame", body.id);
                continue;
            };
            let center = camera.world_to_screen(position.x, position.y);
            let radius = self.disc_radius(body, camera);
            if !center.is_finite() || !radius.is_finite() {
                log::warn!("body {} projects to a non-finite footprint; skipped", body.id);
                continue;
            }
            let is_selected = selected == Some(&body.id);

            let (fill, glow, blur) = body_style(body.kind);
            surface.disc(&Disc {
                center: center.as_vec2(),
                radius: radius as f32,
                fill,
                glow,
                glow_blur: blur * dpr as f32,
            });
            surface.stroke_circle(center.as_vec2(), radius as f32, dpr as f32, RIM_COLOR);

            if is_selected {
                surface.stroke_circle(
                    center.as_vec2(),
                    (radius + SELECT_RING_GAP_PX * dpr) as f32,
                    (2.0 * dpr) as f32,
                    SELECT_RING_COLOR,
                );
            }

            if self.shows_label(body, camera.zoom, is_selected, follow == Some(&body.id)) {
                let gap = radius + LABEL_GAP_PX * dpr;
                surface.label(&Label {
                    text: body.name.clone(),
                    position: (center + DVec2::new(gap, -gap)).as_vec2(),
                    font_px: (self.config.label_font_px * dpr) as f32,
                    color: LABEL_COLOR,
                });
            }

            self.footprints.push(Footprint {
                id: body.id.clone(),
                kind: body.kind,
                center,
                radius,
            });
        }
    }

    /// Stars and planets are always labeled. Moons only when zoomed in,
    /// or when the user has focused them.
    fn shows_label(&self, body: &Body, zoom: f64, selected: bool, followed: bool) -> bool {
        match body.kind {
            BodyKind::Star | BodyKind::Planet => true,
            BodyKind::Moon => zoom >= self.config.moon_label_min_zoom || selected || followed,
        }
    }
}

fn draw_reticle(camera: &Camera2D, surface: &mut impl DrawSurface) {
    let c = camera.center();
    let arm = RETICLE_ARM_PX * camera.dpr;
    let width = camera.dpr as f32;
    let horizontal = [(c - DVec2::new(arm, 0.0)).as_vec2(), (c + DVec2::new(arm, 0.0)).as_vec2()];
    let vertical = [(c - DVec2::new(0.0, arm)).as_vec2(), (c + DVec2::new(0.0, arm)).as_vec2()];
    surface.stroke_path(&horizontal, false, width, RETICLE_COLOR);
    surface.stroke_path(&vertical, false, width, RETICLE_COLOR);
}
