//! Text and list outputs for the host UI: status panel, body inspector and
//! the body selector grouping.

use serde::Serialize;

use crate::api::types::{Body, BodyId, BodyKind, Snapshot};
use crate::core::units::{surface_gravity, AU, DAYS_PER_YEAR, EARTH_MASS, EARTH_RADIUS, SECONDS_PER_DAY};
use crate::renderer::camera::Camera2D;

pub const NO_SELECTION: &str = "Click a planet, moon or star…";
pub const NO_DATA: &str = "No data (body not present in snapshot).";

fn fmt_time(seconds: f64) -> String {
    let days = seconds / SECONDS_PER_DAY;
    let years = days / DAYS_PER_YEAR;
    format!("{seconds:.1} s  (~{days:.2} d, ~{years:.3} y)")
}

/// Scientific notation with an explicit exponent sign: `5.972e+24`.
fn fmt_sci(value: f64) -> String {
    let text = format!("{value:.3e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

fn fmt_au(meters: f64) -> String {
    format!("{:.4} AU", meters / AU)
}

fn fmt_km(meters: f64) -> String {
    format!("{:.0} km", meters / 1000.0)
}

/// Multi-line status panel text.
pub fn status_text(snapshot: &Snapshot, camera: &Camera2D) -> String {
    let follow = match camera.follow_id() {
        Some(id) => format!("follow={id}"),
        None => "follow=(free)".to_owned(),
    };
    format!(
        "seed: {}\ntime: {}\npaused={}  timeScale={}  {}\nzoom={:.3}\nbodies: {}",
        snapshot.seed_label(),
        fmt_time(snapshot.time_seconds),
        snapshot.paused,
        snapshot.time_scale,
        follow,
        camera.zoom,
        snapshot.bodies.len(),
    )
}

/// Multi-line description of the selected body, or a placeholder.
pub fn inspector_text(snapshot: &Snapshot, selected: Option<&BodyId>) -> String {
    let Some(id) = selected else {
        return NO_SELECTION.to_owned();
    };
    let Some(body) = snapshot.body(id) else {
        return NO_DATA.to_owned();
    };
    let parent = snapshot.parent_of(body);

    let mut lines = Vec::with_capacity(12);
    lines.push(format!("{}  [{}]", body.name, body.kind.as_str()));
    if let Some(parent) = parent {
        lines.push(format!("parent: {}", parent.name));
    }
    lines.push(String::new());
    lines.push(format!(
        "mass: {} kg  ({:.3} M⊕)",
        fmt_sci(body.mass),
        body.mass / EARTH_MASS
    ));
    lines.push(format!(
        "radius: {}  ({:.3} R⊕)",
        fmt_km(body.radius),
        body.radius / EARTH_RADIUS
    ));
    lines.push(format!(
        "g(surface): {:.2} m/s²",
        surface_gravity(body.mass, body.radius)
    ));
    if let Some(d) = parent.and_then(|p| distance_between(body, p)) {
        lines.push(format!("distance to parent: {}  ({})", fmt_au(d), fmt_km(d)));
    }
    lines.push(String::new());
    lines.push("orbit:".to_owned());
    match &body.orbit {
        Some(orbit) => {
            let period = body
                .period_seconds
                .filter(|p| *p > 0.0)
                .map(|p| format!("{:.2} d", p / SECONDS_PER_DAY))
                .unwrap_or_else(|| "—".to_owned());
            lines.push(format!("a: {}", fmt_au(orbit.semi_major_axis)));
            lines.push(format!("e: {:.3}", orbit.eccentricity));
            lines.push(format!("i: {:.2}°", orbit.inclination.to_degrees()));
            lines.push(format!("period: {period}"));
        }
        None => lines.push("—".to_owned()),
    }
    lines.join("\n")
}

fn distance_between(a: &Body, b: &Body) -> Option<f64> {
    Some(a.position?.distance(b.position?))
}

/// One selector entry: id plus display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyEntry {
    pub id: BodyId,
    pub name: String,
}

/// Bodies grouped by kind for the host's selection control.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BodyGroups {
    pub stars: Vec<BodyEntry>,
    pub planets: Vec<BodyEntry>,
    pub moons: Vec<BodyEntry>,
    /// Entry the control should show as chosen; `None` is the empty choice.
    pub selected: Option<BodyId>,
}

impl BodyGroups {
    /// Regroup `snapshot`. The control's `current` choice is kept if that
    /// body still exists; otherwise it falls back to `selected`.
    pub fn build(snapshot: &Snapshot, current: Option<&BodyId>, selected: Option<&BodyId>) -> Self {
        let mut groups = Self::default();
        for body in &snapshot.bodies {
            let entry = BodyEntry {
                id: body.id.clone(),
                name: body.name.clone(),
            };
            match body.kind {
                BodyKind::Star => groups.stars.push(entry),
                BodyKind::Planet => groups.planets.push(entry),
                BodyKind::Moon => groups.moons.push(entry),
            }
        }
        groups.selected = current
            .filter(|id| groups.contains(id))
            .or(selected)
            .cloned();
        groups
    }

    pub fn contains(&self, id: &BodyId) -> bool {
        self.stars
            .iter()
            .chain(&self.planets)
            .chain(&self.moons)
            .any(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.stars.len() + self.planets.len() + self.moons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
