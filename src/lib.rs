//! Lava Run - a tile-based 2D platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, entities, tile field, level state, tick)
//! - `campaign`: Runs a sequence of levels, retrying lost ones
//! - `parser`: Turns text level plans into populated levels
//! - `levels`: Built-in level plans and JSON plan loading
//! - `config`: Data-driven engine tuning
//!
//! Rendering, input and the outer frame loop live with the consumer. They read
//! [`sim::Level`] state and feed time deltas into [`sim::tick()`].

pub mod campaign;
pub mod config;
pub mod error;
pub mod levels;
pub mod parser;
pub mod sim;

pub use campaign::{Campaign, CampaignEvent};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use parser::{LevelParser, Spawner, default_dictionary};

/// Game configuration constants
pub mod consts {
    /// Grace period (seconds) between a decided outcome and the level finishing
    pub const FINISH_DELAY: f32 = 1.0;
    /// Largest time delta a single tick may consume (seconds)
    pub const MAX_TICK_DT: f32 = 0.1;

    /// Hazard speeds (tiles/s)
    pub const HORIZONTAL_HAZARD_SPEED: f32 = 2.0;
    pub const VERTICAL_HAZARD_SPEED: f32 = 2.0;
    pub const RAIN_HAZARD_SPEED: f32 = 3.0;

    /// Coin bobbing: phase advance per second and vertical amplitude (tiles)
    pub const SPRING_RATE: f32 = 8.0;
    pub const SPRING_AMPLITUDE: f32 = 0.07;

    /// Coin box inside its cell
    pub const COIN_OFFSET: (f32, f32) = (0.2, 0.1);
    pub const COIN_SIZE: (f32, f32) = (0.6, 0.6);

    /// Player box relative to its cell (taller than one tile, so shifted up)
    pub const PLAYER_OFFSET: (f32, f32) = (0.0, -0.5);
    pub const PLAYER_SIZE: (f32, f32) = (0.8, 1.5);
}
