use glam::Vec2;

use crate::renderer::traits::{Color, DrawSurface};

/// xorshift64 stream of uniform `f32`s. Same seed, same sky on every platform.
struct Sky(u64);

impl Sky {
    fn seeded(seed: u64) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in `[0, 1)` from the top 24 bits of the next state.
    fn unit(&mut self) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 40) as f32 / (1u32 << 24) as f32
    }

    fn between(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }
}

/// One decorative star, positioned as a fraction of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub at: Vec2,
    pub radius: f32,
    pub alpha: f32,
}

/// Fixed background starfield. Generated once from a constant seed and
/// unrelated to the simulation seed.
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(count: usize, seed: u64) -> Self {
        let mut sky = Sky::seeded(seed);
        let stars = (0..count)
            .map(|_| Star {
                at: Vec2::new(sky.unit(), sky.unit()),
                radius: sky.between(0.6, 1.8),
                alpha: sky.between(0.06, 0.16),
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn draw(&self, surface: &mut impl DrawSurface, size: Vec2) {
        for star in &self.stars {
            let tint = Color::rgba8(235, 240, 255, star.alpha);
            surface.fill_circle(star.at * size, star.radius, tint);
        }
    }
}
