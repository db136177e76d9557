use serde::{Deserialize, Serialize};

/// Tuning parameters for a scene, provided by the scenario.
/// Every field has a default, so a partial JSON object is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Spin step granularity: one step is `10^-precision` degrees (default: 2).
    pub spin_precision: u32,
    /// Orbit step granularity (default: 2).
    pub orbit_precision: u32,
    /// Seconds of play time for one orbit of the reference body (default: 480).
    pub reference_delay: f64,
    /// Scale of the reference body; every other scale is relative to it (default: 1).
    pub reference_scale: f64,
    /// Multiplier applied to every spacing margin (default: 1).
    pub distance_scale: f64,
    /// Radius of the unit sphere model the renderer draws (default: 2).
    pub unit_sphere_radius: f64,
    /// Debounce window for the pause toggle, in seconds (default: 0.25).
    pub pause_debounce: f64,
    /// Maximum frames per second the runner will process (default: 60).
    pub frame_rate_cap: f64,
    /// Start paused; the first frame is still computed (default: true).
    pub start_paused: bool,
    /// Overage ratios at or above this are reported as 1.0 (default: 10).
    pub overage_ceiling: f64,
    /// Seed for randomized orbit placement (default: 42).
    pub seed: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            spin_precision: 2,
            orbit_precision: 2,
            reference_delay: 480.0,
            reference_scale: 1.0,
            distance_scale: 1.0,
            unit_sphere_radius: 2.0,
            pause_debounce: 0.25,
            frame_rate_cap: 60.0,
            start_paused: true,
            overage_ceiling: 10.0,
            seed: 42,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Minimum seconds between processed frames. Zero when uncapped.
    pub fn frame_interval(&self) -> f64 {
        if self.frame_rate_cap > 0.0 {
            1.0 / self.frame_rate_cap
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SceneConfig::from_json(r#"{ "reference_delay": 600.0, "start_paused": false }"#).unwrap();
        assert_eq!(config.reference_delay, 600.0);
        assert!(!config.start_paused);
        assert_eq!(config.spin_precision, 2);
        assert_eq!(config.unit_sphere_radius, 2.0);
    }

    #[test]
    fn frame_interval_from_cap() {
        let mut config = SceneConfig::default();
        assert!((config.frame_interval() - 1.0 / 60.0).abs() < 1e-12);
        config.frame_rate_cap = 0.0;
        assert_eq!(config.frame_interval(), 0.0);
    }
}
