//! Per-tick simulation step
//!
//! The caller owns the level and the clock; each call advances the level by
//! one caller-supplied time delta.

use super::entity::validate_dt;
use super::level::{Level, LevelStatus};
use crate::error::Result;

/// Advance `level` by `dt` seconds and return its status afterwards.
///
/// A non-finite delta is `TypeMismatch` and a negative one is
/// `InvalidArgument`; either way the level is left untouched.
///
/// Order within a tick:
/// 1. If the outcome is already decided, run down the finish countdown.
/// 2. Every entity acts, in collection order.
/// 3. While still undecided, the player is checked against the tile field
///    and then against the first entity it overlaps.
pub fn tick(level: &mut Level, dt: f32) -> Result<LevelStatus> {
    let dt = validate_dt(dt)?;
    level.advance_countdown(dt);

    let (field, entities) = level.parts_mut();
    for entity in entities.iter_mut() {
        entity.act(dt, field)?;
    }

    if !level.status().is_decided() {
        resolve_player_touches(level)?;
    }

    Ok(level.status())
}

fn resolve_player_touches(level: &mut Level) -> Result<()> {
    // Snapshot keeps the player's id, so the overlap query still skips it
    let Some(player) = level.player().cloned() else {
        return Ok(());
    };

    if let Some(obstacle) = level.field().obstacle_at(player.pos, player.size)? {
        level.on_player_touch(obstacle, None);
    }

    let touched = level
        .entity_at(&player)?
        .map(|entity| (entity.kind(), entity.id()));
    if let Some((kind, id)) = touched {
        level.on_player_touch(kind, Some(id));
    }
    Ok(())
}
