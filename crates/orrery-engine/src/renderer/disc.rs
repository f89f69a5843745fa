use bytemuck::{Pod, Zeroable};

use super::traits::Disc;

/// Per-body disc data read by the host's disc shader.
/// 12 floats = 48 bytes per instance.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct DiscInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub glow_blur: f32,
    pub fill_r: f32,
    pub fill_g: f32,
    pub fill_b: f32,
    pub fill_a: f32,
    pub glow_r: f32,
    pub glow_g: f32,
    pub glow_b: f32,
    pub glow_a: f32,
}

impl DiscInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

impl From<&Disc> for DiscInstance {
    fn from(disc: &Disc) -> Self {
        Self {
            x: disc.center.x,
            y: disc.center.y,
            radius: disc.radius,
            glow_blur: disc.glow_blur,
            fill_r: disc.fill.r,
            fill_g: disc.fill.g,
            fill_b: disc.fill.b,
            fill_a: disc.fill.a,
            glow_r: disc.glow.r,
            glow_g: disc.glow.g,
            glow_b: disc.glow.b,
            glow_a: disc.glow.a,
        }
    }
}

/// Disc instances of one frame, in draw order.
pub struct DiscBuffer {
    instances: Vec<DiscInstance>,
}

impl DiscBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(max: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: DiscInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Flat float view for zero-copy reads from the host.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for DiscBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::traits::Color;
    use glam::Vec2;

    #[test]
    fn disc_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<DiscInstance>(), 48);
        assert_eq!(DiscInstance::STRIDE_BYTES, 48);
    }

    #[test]
    fn float_view_matches_field_order() {
        let mut buf = DiscBuffer::new();
        buf.push(DiscInstance::from(&Disc {
            center: Vec2::new(10.0, 20.0),
            radius: 5.0,
            fill: Color::new(0.1, 0.2, 0.3, 0.4),
            glow: Color::new(0.5, 0.6, 0.7, 0.8),
            glow_blur: 16.0,
        }));
        let floats = buf.as_floats();
        assert_eq!(floats.len(), DiscInstance::FLOATS);
        assert_eq!(&floats[..4], &[10.0, 20.0, 5.0, 16.0]);
        assert_eq!(floats[7], 0.4);
        assert_eq!(floats[11], 0.8);
    }
}
