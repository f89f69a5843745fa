use std::collections::HashMap;
use std::f64::consts::TAU;

use glam::DVec2;

use crate::api::types::{BodyId, Orbit, Snapshot};

/// Sample `samples` points of an orbit ellipse in the parent's local frame
/// (parent at the focus, no world offset).
///
/// Parameterised by eccentric anomaly over `[0, 2π)`. Inclination only
/// foreshortens the minor axis, which is what a top-down view of a tilted
/// ellipse looks like. Non-finite samples are dropped, so malformed
/// parameters yield short or empty paths instead of NaN geometry.
pub fn sample_orbit(orbit: &Orbit, samples: usize) -> Vec<DVec2> {
    let a = orbit.semi_major_axis;
    let e = orbit.eccentricity;
    let minor = a * (1.0 - e * e).max(0.0).sqrt() * orbit.inclination.cos();

    let mut points = Vec::with_capacity(samples);
    for i in 0..samples {
        let ea = (i as f64 / samples as f64) * TAU;
        let p = DVec2::new(a * (ea.cos() - e), minor * ea.sin());
        if p.is_finite() {
            points.push(p);
        }
    }
    points
}

/// Identity-keyed store of orbit polylines.
///
/// Entries are built lazily on the first sighting of a body with an orbit and
/// are never rebuilt or evicted: orbit parameters are stable per body, and
/// the store is bounded by the number of bodies the simulation ever emits.
pub struct OrbitCache {
    samples: usize,
    entries: HashMap<BodyId, Vec<DVec2>>,
    builds: usize,
}

impl OrbitCache {
    pub fn new(samples: usize) -> Self {
        Self {
            samples,
            entries: HashMap::new(),
            builds: 0,
        }
    }

    /// Cached polyline for `id`, building it from `orbit` on a miss.
    pub fn get_or_build(&mut self, id: &BodyId, orbit: &Orbit) -> &[DVec2] {
        if !self.entries.contains_key(id) {
            self.builds += 1;
            log::debug!("orbit cache: building {} samples for {}", self.samples, id);
            self.entries.insert(id.clone(), sample_orbit(orbit, self.samples));
        }
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Lookup without building.
    pub fn get(&self, id: &BodyId) -> Option<&[DVec2]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Build entries for every orbiting body of `snapshot` not seen before.
    pub fn ingest(&mut self, snapshot: &Snapshot) {
        for body in &snapshot.bodies {
            if let Some(orbit) = &body.orbit {
                self.get_or_build(&body.id, orbit);
            }
        }
    }

    /// Number of constructions performed so far (cache misses).
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
