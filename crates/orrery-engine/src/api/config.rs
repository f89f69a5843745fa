use serde::Deserialize;

/// Viewer configuration. Every field has a default, so a host may pass a
/// partial JSON object and override only what it needs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Screen pixels per AU at zoom 1.
    pub au_pixels: f64,
    /// Points per cached orbit polyline.
    pub orbit_samples: usize,
    /// Pick tolerance radius in CSS pixels (scaled by device pixel ratio).
    pub pick_radius_px: f64,
    /// Below this zoom, orbits of unselected moons are not drawn.
    pub moon_orbit_min_zoom: f64,
    /// Below this zoom, moons are unlabeled unless selected or followed.
    pub moon_label_min_zoom: f64,
    pub default_zoom: f64,
    pub min_zoom: f64,
    /// Decorative background stars.
    pub star_count: usize,
    pub starfield_seed: u64,
    /// Non-star disc radius: `sqrt(radius / AU) * scale * zoom`, in CSS pixels.
    pub planet_radius_scale: f64,
    pub planet_min_radius_px: f64,
    /// Star disc radius at zoom 1, in CSS pixels.
    pub star_radius_px: f64,
    pub star_min_radius_px: f64,
    pub label_font_px: f64,
    /// World-generation seed sent with `INIT`.
    pub default_seed: String,
    pub default_time_scale: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            au_pixels: 280.0,
            orbit_samples: 260,
            pick_radius_px: 10.0,
            moon_orbit_min_zoom: 0.35,
            moon_label_min_zoom: 0.55,
            default_zoom: 1.0,
            min_zoom: 0.02,
            star_count: 160,
            starfield_seed: 1337,
            planet_radius_scale: 90.0,
            planet_min_radius_px: 3.2,
            star_radius_px: 34.0,
            star_min_radius_px: 12.0,
            label_font_px: 12.0,
            default_seed: "demo-seed-001".to_owned(),
            default_time_scale: 1.0,
        }
    }
}

impl ViewerConfig {
    /// Parse a (possibly partial) configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json(r#"{ "auPixels": 400, "defaultSeed": "abc" }"#).unwrap();
        assert_eq!(config.au_pixels, 400.0);
        assert_eq!(config.default_seed, "abc");
        assert_eq!(config.orbit_samples, 260);
        assert_eq!(config.moon_orbit_min_zoom, 0.35);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(ViewerConfig::from_json("{}").unwrap(), ViewerConfig::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewerConfig::from_json("{ auPixels: }").is_err());
    }
}
