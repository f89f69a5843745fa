use std::collections::HashMap;

use crate::api::types::{Body, BodyId, Snapshot};

/// Blend two snapshots at fraction `t`.
///
/// Every body of `b` is emitted. Bodies also present in `a` get a linearly
/// interpolated position; orbit parameters are discrete and come from `b`,
/// falling back to `a`. Bodies that are new in `b`, or whose position is
/// missing on either side, pass through unchanged. `seed`, `paused` and
/// `time_scale` follow `b`.
///
/// `t` is not clamped here; callers that sample wall-clock time clamp it.
pub fn interpolate(a: &Snapshot, b: &Snapshot, t: f64) -> Snapshot {
    let previous: HashMap<&BodyId, &Body> = a.bodies.iter().map(|body| (&body.id, body)).collect();

    let bodies = b
        .bodies
        .iter()
        .map(|next| match previous.get(&next.id) {
            Some(prev) => blend_body(prev, next, t),
            None => next.clone(),
        })
        .collect();

    Snapshot {
        seed: b.seed.clone(),
        time_seconds: mix(a.time_seconds, b.time_seconds, t),
        paused: b.paused,
        time_scale: b.time_scale,
        bodies,
    }
}

// Weighted form so that t = 0 and t = 1 reproduce the endpoints exactly.
fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

fn blend_body(prev: &Body, next: &Body, t: f64) -> Body {
    let position = match (prev.position, next.position) {
        (Some(pa), Some(pb)) => Some((pa.to_dvec3() * (1.0 - t) + pb.to_dvec3() * t).into()),
        (_, pb) => pb,
    };
    Body {
        position,
        orbit: next.orbit.clone().or_else(|| prev.orbit.clone()),
        ..next.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{BodyKind, Orbit, Vector3};

    fn body(id: &str, x: f64, y: f64) -> Body {
        Body {
            id: BodyId::from(id),
            kind: BodyKind::Planet,
            name: id.to_uppercase(),
            mass: 1.0e24,
            radius: 6.0e6,
            position: Some(Vector3::new(x, y, 0.0)),
            orbit: None,
            period_seconds: None,
        }
    }

    fn snapshot(time: f64, bodies: Vec<Body>) -> Snapshot {
        Snapshot {
            seed: serde_json::json!("s"),
            time_seconds: time,
            paused: false,
            time_scale: 1.0,
            bodies,
        }
    }

    #[test]
    fn endpoints_reproduce_inputs() {
        let a = snapshot(0.0, vec![body("p1", 1.0e11, -3.0e10)]);
        let b = snapshot(10.0, vec![body("p1", 1.2e11, 4.0e10)]);

        let at0 = interpolate(&a, &b, 0.0);
        let at1 = interpolate(&a, &b, 1.0);
        assert_eq!(at0.bodies[0].position, a.bodies[0].position);
        assert_eq!(at1.bodies[0].position, b.bodies[0].position);
        assert_eq!(at0.time_seconds, 0.0);
        assert_eq!(at1.time_seconds, 10.0);
    }

    #[test]
    fn midpoints_lie_on_the_segment() {
        let a = snapshot(0.0, vec![body("p1", 0.0, 0.0)]);
        let b = snapshot(10.0, vec![body("p1", 4.0, 8.0)]);
        for &t in &[0.1, 0.25, 0.5, 0.9] {
            let p = interpolate(&a, &b, t).bodies[0].position.unwrap();
            // On the line y = 2x, between the endpoints.
            assert!((p.y - 2.0 * p.x).abs() < 1e-12);
            assert!(p.x > 0.0 && p.x < 4.0);
            assert!((p.x - 4.0 * t).abs() < 1e-12);
        }
    }

    #[test]
    fn new_bodies_pass_through() {
        let a = snapshot(0.0, vec![body("p1", 0.0, 0.0)]);
        let b = snapshot(10.0, vec![body("p1", 1.0, 0.0), body("m9", 5.0, 5.0)]);
        let mid = interpolate(&a, &b, 0.3);
        assert_eq!(mid.bodies.len(), 2);
        assert_eq!(mid.bodies[1], b.bodies[1]);
    }

    #[test]
    fn flags_follow_the_leading_snapshot_and_orbit_falls_back() {
        let mut with_orbit = body("p1", 0.0, 0.0);
        with_orbit.orbit = Some(Orbit {
            parent_id: BodyId::from("star-0"),
            semi_major_axis: 1.0e11,
            eccentricity: 0.0,
            inclination: 0.0,
        });
        let a = snapshot(0.0, vec![with_orbit.clone()]);
        let mut b = snapshot(5.0, vec![body("p1", 1.0, 1.0)]);
        b.paused = true;
        b.time_scale = 1000.0;
        b.seed = serde_json::json!("leader");

        let mid = interpolate(&a, &b, 0.5);
        assert!(mid.paused);
        assert_eq!(mid.time_scale, 1000.0);
        assert_eq!(mid.seed_label(), "leader");
        assert_eq!(mid.bodies[0].orbit, with_orbit.orbit);
    }

    #[test]
    fn inputs_are_left_untouched_and_t_is_not_clamped() {
        let a = snapshot(0.0, vec![body("p1", 0.0, 0.0)]);
        let b = snapshot(10.0, vec![body("p1", 2.0, 0.0)]);
        let (a_before, b_before) = (a.clone(), b.clone());
        let past = interpolate(&a, &b, 1.5);
        assert_eq!(past.bodies[0].position.unwrap().x, 3.0);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }
}
