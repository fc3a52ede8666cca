use serde::{Deserialize, Serialize};

use crate::core::particle::ParticleColor;
use crate::core::physics::GravityParams;
use crate::core::spawn::SpawnTable;
use crate::core::time::FixedTimestep;
use crate::input::interaction::KeyBindings;
use crate::input::viewport::Viewport;

/// Session configuration. Every field has a default, so a JSON document
/// only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Force pass constants (G, anchor mass threshold).
    pub gravity: GravityParams,
    /// Mass, radius and color per spawn kind, plus the launch divisor.
    pub spawn: SpawnTable,
    /// Window size in pixels (default: 500×500).
    pub viewport: Viewport,
    pub keys: KeyBindings,
    /// Seconds per simulation tick (default: 0.001).
    pub tick_dt: f32,
    /// Cap on ticks run for one frame (default: 32).
    pub max_ticks_per_frame: u32,
    /// Seed for random particle colors.
    pub seed: u64,
    /// Start the session with one anchor at the origin.
    pub seed_anchor: bool,
    pub seed_anchor_color: ParticleColor,
    /// Circle slots in the shared render buffer (default: 4096).
    pub max_circles: usize,
    /// Event slots per frame in the shared buffer (default: 16).
    pub max_events: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GravityParams::default(),
            spawn: SpawnTable::default(),
            viewport: Viewport::default(),
            keys: KeyBindings::default(),
            tick_dt: FixedTimestep::DEFAULT_DT,
            max_ticks_per_frame: FixedTimestep::DEFAULT_MAX_STEPS,
            seed: 42,
            seed_anchor: true,
            seed_anchor_color: ParticleColor::YELLOW,
            max_circles: 4096,
            max_events: 16,
        }
    }
}

impl SimConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = SimConfig::from_json("{}").unwrap();
        assert_eq!(config, SimConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "gravity": { "g": 0.01 },
            "viewport": { "width": 800.0, "height": 600.0 },
            "seed_anchor": false
        }"#;
        let config = SimConfig::from_json(json).unwrap();
        assert_eq!(config.gravity.g, 0.01);
        assert_eq!(config.gravity.anchor_mass, GravityParams::DEFAULT_ANCHOR_MASS);
        assert_eq!(config.viewport, Viewport::new(800.0, 600.0));
        assert!(!config.seed_anchor);
        assert_eq!(config.tick_dt, 0.001);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ \"seed\": ").is_err());
        assert!(SimConfig::from_json("{ \"seed\": \"many\" }").is_err());
    }
}
