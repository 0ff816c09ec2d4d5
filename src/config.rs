//! Engine tuning
//!
//! Loaded from JSON by the host; every field falls back to its default.

use serde::{Deserialize, Serialize};

use crate::consts::{FINISH_DELAY, MAX_TICK_DT};
use crate::error::Result;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for coin phases (same seed, same levels)
    pub seed: u64,
    /// Grace period (seconds) after a level is won or lost
    pub finish_delay: f32,
    /// Largest time delta a single tick may consume (seconds)
    pub max_tick_dt: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            finish_delay: FINISH_DELAY,
            max_tick_dt: MAX_TICK_DT,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        log::info!("Loaded engine config: {:?}", config);
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp a frame delta to what one tick may consume
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.min(self.max_tick_dt)
    }
}
