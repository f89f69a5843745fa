use glam::Vec2;

use super::disc::{DiscBuffer, DiscInstance};
use super::traits::{Backdrop, Color, Disc, DrawSurface, Label};
use crate::systems::vector::VectorLayer;

/// CPU-side frame output for the host renderer.
///
/// Host draw order: `backdrop`, `under`, `discs`, `over`, `labels`.
/// Vector draws issued before the first disc of a frame land in `under`;
/// everything after it lands in `over`, which keeps rings above bodies.
pub struct FrameBuffer {
    pub backdrop: Option<Backdrop>,
    pub under: VectorLayer,
    pub discs: DiscBuffer,
    pub over: VectorLayer,
    pub labels: Vec<Label>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            backdrop: None,
            under: VectorLayer::new(),
            discs: DiscBuffer::new(),
            over: VectorLayer::new(),
            labels: Vec::new(),
        }
    }

    fn layer(&mut self) -> &mut VectorLayer {
        if self.discs.instance_count() == 0 {
            &mut self.under
        } else {
            &mut self.over
        }
    }

    /// Labels as JSON for the host's text pass.
    pub fn labels_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.labels)
    }

    pub fn backdrop_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.backdrop)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for FrameBuffer {
    fn clear(&mut self) {
        self.backdrop = None;
        self.under.clear();
        self.discs.clear();
        self.over.clear();
        self.labels.clear();
    }

    fn backdrop(&mut self, backdrop: &Backdrop) {
        self.backdrop = Some(*backdrop);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.layer().fill_circle(center, radius, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        self.layer().stroke_circle(center, radius, width, color);
    }

    fn stroke_path(&mut self, points: &[Vec2], closed: bool, width: f32, color: Color) {
        self.layer().stroke_path(points, closed, width, color);
    }

    fn disc(&mut self, disc: &Disc) {
        self.discs.push(DiscInstance::from(disc));
    }

    fn label(&mut self, label: &Label) {
        self.labels.push(label.clone());
    }
}
