//! Lyon tessellation of the scene's strokes and small fills.
//!
//! Orbit paths, rings, background stars and the reticle end up here as a
//! flat triangle list the host uploads as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

use crate::renderer::traits::Color;

/// Per-vertex data: position plus straight RGBA.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn at(x: f32, y: f32, color: Color) -> Self {
        Self { x, y, r: color.r, g: color.g, b: color.b, a: color.a }
    }
}

struct Tint(Color);

impl FillVertexConstructor<VectorVertex> for Tint {
    fn new_vertex(&mut self, vertex: FillVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.0)
    }
}

impl StrokeVertexConstructor<VectorVertex> for Tint {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        let p = vertex.position();
        VectorVertex::at(p.x, p.y, self.0)
    }
}

/// Tessellators plus the de-indexed output triangles of one frame.
pub struct VectorLayer {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    vertices: Vec<VectorVertex>,
}

impl VectorLayer {
    pub fn new() -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(16384),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    fn flush_geometry(&mut self) {
        let VertexBuffers { vertices, indices } = &mut self.geometry;
        self.vertices
            .extend(indices.iter().map(|&i| vertices[i as usize]));
        vertices.clear();
        indices.clear();
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if !(radius > 0.0) {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();

        let result = self.fill_tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.25),
            &mut BuffersBuilder::new(&mut self.geometry, Tint(color)),
        );
        self.commit(result);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if !(radius > 0.0) {
            return;
        }
        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        self.stroke(&builder.build(), width, color);
    }

    /// Stroke a polyline. Fewer than two points draw nothing.
    pub fn stroke_path(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color) {
        if points.len() < 2 || points.iter().any(|p| !p.is_finite()) {
            return;
        }
        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(closed);
        self.stroke(&builder.build(), width, color);
    }

    fn stroke(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.25).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, Tint(color)),
        );
        self.commit(result);
    }

    /// Keep the staged triangles on success; drop them on failure so they
    /// never leak into the next shape.
    fn commit<E: std::fmt::Debug>(&mut self, result: Result<(), E>) {
        match result {
            Ok(()) => self.flush_geometry(),
            Err(e) => {
                log::debug!("vector: tessellation failed: {e:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(std::mem::size_of::<VectorVertex>(), VectorVertex::STRIDE_BYTES);
    }

    #[test]
    fn closed_orbit_stroke_produces_triangles() {
        let mut layer = VectorLayer::new();
        let ring: Vec<Vec2> = (0..32)
            .map(|i| {
                let a = i as f32 / 32.0 * std::f32::consts::TAU;
                Vec2::new(100.0 + 50.0 * a.cos(), 100.0 + 50.0 * a.sin())
            })
            .collect();
        layer.stroke_path(&ring, true, 1.5, Color::WHITE);
        assert!(layer.vertex_count() > 0);
        assert_eq!(layer.vertex_count() % 3, 0);
        assert_eq!(layer.as_floats().len(), layer.vertex_count() * VectorVertex::FLOATS);
    }

    #[test]
    fn degenerate_inputs_draw_nothing() {
        let mut layer = VectorLayer::new();
        layer.stroke_path(&[Vec2::ZERO], true, 1.0, Color::WHITE);
        layer.stroke_path(&[Vec2::ZERO, Vec2::new(f32::NAN, 1.0)], false, 1.0, Color::WHITE);
        layer.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        layer.stroke_circle(Vec2::ZERO, -1.0, 1.0, Color::WHITE);
        assert_eq!(layer.vertex_count(), 0);
    }

    #[test]
    fn fill_circle_carries_color() {
        let mut layer = VectorLayer::new();
        let tint = Color::new(0.2, 0.4, 0.6, 0.8);
        layer.fill_circle(Vec2::new(10.0, 10.0), 2.0, tint);
        assert!(layer.vertex_count() >= 3);
        let floats = layer.as_floats();
        assert_eq!(&floats[2..6], &[0.2, 0.4, 0.6, 0.8]);
    }

    #[test]
    fn failed_tessellation_discards_staged_geometry() {
        let mut layer = VectorLayer::new();
        layer.geometry.vertices.push(VectorVertex::at(1.0, 1.0, Color::WHITE));
        layer.geometry.indices.push(0);
        layer.commit(Err("tessellation failed"));
        assert!(layer.geometry.vertices.is_empty());
        assert!(layer.geometry.indices.is_empty());

        layer.fill_circle(Vec2::new(10.0, 10.0), 2.0, Color::WHITE);
        let floats = layer.as_floats();
        assert!(floats.chunks(VectorVertex::FLOATS).all(|v| v[0] > 7.0 && v[1] > 7.0));
    }

    #[test]
    fn clear_resets_buffer() {
        let mut layer = VectorLayer::new();
        layer.stroke_circle(Vec2::new(5.0, 5.0), 3.0, 1.0, Color::WHITE);
        assert!(layer.vertex_count() > 0);
        layer.clear();
        assert_eq!(layer.vertex_count(), 0);
    }
}
