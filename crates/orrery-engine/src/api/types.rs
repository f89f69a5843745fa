use std::fmt;

use glam::DVec3;
use serde::{Deserialize, Deserializer, Serialize};

/// Stable identity of a simulated body, unique within a snapshot and
/// shared by every snapshot that describes the same body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(pub String);

impl BodyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BodyId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Body category. Ordering of variants is the pick priority:
/// a star beats a planet, a planet beats a moon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    /// Lower number wins when several footprints contain the pointer.
    pub fn pick_priority(self) -> u8 {
        match self {
            BodyKind::Star => 0,
            BodyKind::Planet => 1,
            BodyKind::Moon => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
            BodyKind::Moon => "moon",
        }
    }
}

/// Position in meters. Wire shape is `{ "x": .., "y": .., "z": .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn distance(self, other: Vector3) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }
}

impl From<DVec3> for Vector3 {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Keplerian parameters relative to a parent body. Stable for the lifetime
/// of the body that owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orbit {
    pub parent_id: BodyId,
    /// Meters.
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    /// Radians.
    #[serde(default)]
    pub inclination: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Body {
    pub id: BodyId,
    #[serde(rename = "type")]
    pub kind: BodyKind,
    #[serde(default)]
    pub name: String,
    /// Kilograms.
    pub mass: f64,
    /// Meters.
    pub radius: f64,
    /// Absent positions are tolerated on the wire; such bodies are skipped
    /// by the renderer rather than failing the whole frame.
    #[serde(default)]
    pub position: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orbit: Option<Orbit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_seconds: Option<f64>,
}

impl Body {
    /// Parent id, if this body orbits something.
    pub fn parent_id(&self) -> Option<&BodyId> {
        self.orbit.as_ref().map(|o| &o.parent_id)
    }
}

/// Complete timestamped description of every body at one simulated instant.
/// Never mutated once received; derived snapshots are freshly built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Provenance tag, opaque to the viewer.
    pub seed: serde_json::Value,
    pub time_seconds: f64,
    #[serde(default)]
    pub paused: bool,
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Entries that fail to parse are dropped with a warning; the rest of
    /// the snapshot still applies.
    #[serde(deserialize_with = "skip_broken_bodies")]
    pub bodies: Vec<Body>,
}

fn default_time_scale() -> f64 {
    1.0
}

fn skip_broken_bodies<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Body>, D::Error> {
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let bodies = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Body>(value) {
            Ok(body) => Some(body),
            Err(e) => {
                log::warn!("snapshot: skipping body #{index}: {e}");
                None
            }
        })
        .collect();
    Ok(bodies)
}

impl Snapshot {
    /// Parse a snapshot from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn body(&self, id: &BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| &b.id == id)
    }

    /// The body's parent, if its orbit reference resolves in this snapshot.
    pub fn parent_of(&self, body: &Body) -> Option<&Body> {
        body.parent_id().and_then(|pid| self.body(pid))
    }

    /// Seed rendered for display: strings without quotes, anything else as JSON.
    pub fn seed_label(&self) -> String {
        match &self.seed {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}
