use glam::DVec2;

use crate::api::types::{BodyId, BodyKind};

/// Screen-space circle of one body from the most recent frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub id: BodyId,
    pub kind: BodyKind,
    pub center: DVec2,
    pub radius: f64,
}

/// Raised when a pointer lands on a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickEvent {
    pub id: BodyId,
}

/// Hit-tests a pointer against the last frame's footprints.
#[derive(Debug, Clone, Copy)]
pub struct Picker {
    /// Minimum hit radius in CSS pixels.
    pub tolerance_px: f64,
}

impl Picker {
    pub fn new(tolerance_px: f64) -> Self {
        Self { tolerance_px }
    }

    /// Resolve the body under `point` (device pixels).
    ///
    /// A footprint qualifies when the point is within
    /// `max(radius, tolerance_px * dpr)` of its center. Among qualifiers the
    /// lowest pick priority wins (star, then planet, then moon), then the
    /// smallest distance. `None` means no hit; callers keep their selection.
    pub fn pick(&self, footprints: &[Footprint], point: DVec2, dpr: f64) -> Option<PickEvent> {
        let tolerance = self.tolerance_px * dpr.max(1.0);

        footprints
            .iter()
            .filter_map(|fp| {
                let d2 = fp.center.distance_squared(point);
                let reach = fp.radius.max(tolerance);
                (d2 <= reach * reach).then_some((fp, d2))
            })
            .min_by(|(a, da), (b, db)| {
                a.kind
                    .pick_priority()
                    .cmp(&b.kind.pick_priority())
                    .then(da.total_cmp(db))
            })
            .map(|(fp, _)| PickEvent { id: fp.id.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(id: &str, kind: BodyKind, x: f64, y: f64, radius: f64) -> Footprint {
        Footprint {
            id: BodyId::from(id),
            kind,
            center: DVec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn star_beats_closer_planet() {
        let footprints = vec![
            fp("p1", BodyKind::Planet, 102.0, 100.0, 6.0),
            fp("star-0", BodyKind::Star, 120.0, 100.0, 30.0),
        ];
        let hit = Picker::new(10.0).pick(&footprints, DVec2::new(101.0, 100.0), 1.0);
        assert_eq!(hit, Some(PickEvent { id: BodyId::from("star-0") }));
    }

    #[test]
    fn planet_beats_moon() {
        let footprints = vec![
            fp("m1", BodyKind::Moon, 100.0, 100.0, 3.0),
            fp("p1", BodyKind::Planet, 105.0, 100.0, 4.0),
        ];
        let hit = Picker::new(10.0).pick(&footprints, DVec2::new(100.0, 100.0), 1.0);
        assert_eq!(hit.map(|e| e.id), Some(BodyId::from("p1")));
    }

    #[test]
    fn same_kind_resolves_by_distance() {
        let footprints = vec![
            fp("m1", BodyKind::Moon, 100.0, 100.0, 3.0),
            fp("m2", BodyKind::Moon, 104.0, 100.0, 3.0),
        ];
        let hit = Picker::new(10.0).pick(&footprints, DVec2::new(103.0, 100.0), 1.0);
        assert_eq!(hit.map(|e| e.id), Some(BodyId::from("m2")));
    }

    #[test]
    fn tolerance_scales_with_pixel_ratio() {
        let footprints = vec![fp("m1", BodyKind::Moon, 0.0, 0.0, 2.0)];
        let picker = Picker::new(10.0);
        let point = DVec2::new(15.0, 0.0);
        assert_eq!(picker.pick(&footprints, point, 1.0), None);
        assert!(picker.pick(&footprints, point, 2.0).is_some());
    }

    #[test]
    fn large_discs_use_their_own_radius() {
        let footprints = vec![fp("star-0", BodyKind::Star, 0.0, 0.0, 40.0)];
        let hit = Picker::new(10.0).pick(&footprints, DVec2::new(0.0, 39.0), 1.0);
        assert!(hit.is_some());
    }

    #[test]
    fn miss_returns_none() {
        let footprints = vec![fp("p1", BodyKind::Planet, 0.0, 0.0, 5.0)];
        assert_eq!(Picker::new(10.0).pick(&footprints, DVec2::new(50.0, 50.0), 1.0), None);
        assert_eq!(Picker::new(10.0).pick(&[], DVec2::ZERO, 1.0), None);
    }
}
