//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied time deltas only
//! - Stable iteration order (entity collection order)
//! - No rendering, input or platform dependencies

pub mod entity;
pub mod field;
pub mod level;
pub mod tick;
pub mod vector;

pub use entity::{Behavior, Entity, EntityId, EntityKind, HazardKind, Spring};
pub use field::{ObstacleKind, Tile, TileField};
pub use level::{Level, LevelStatus, TouchKind};
pub use tick::tick;
pub use vector::Vector;
