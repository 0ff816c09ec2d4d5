//! Level state: tile field, live entities and the win/loss machine
//!
//! A level is built once from a plan, ticked until it finishes, then thrown
//! away. Entities are only ever removed (coins being collected); nothing
//! spawns mid-level.

use serde::Serialize;

use super::entity::{Entity, EntityId, EntityKind};
use super::field::{ObstacleKind, TileField};
use crate::consts::FINISH_DELAY;
use crate::error::{Error, Result};

/// Outcome of a level. One-way: once decided it never goes back to `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum LevelStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl LevelStatus {
    pub fn is_decided(&self) -> bool {
        *self != LevelStatus::Playing
    }
}

/// What the player touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TouchKind {
    Obstacle(ObstacleKind),
    Entity(EntityKind),
}

impl From<ObstacleKind> for TouchKind {
    fn from(kind: ObstacleKind) -> Self {
        TouchKind::Obstacle(kind)
    }
}

impl From<EntityKind> for TouchKind {
    fn from(kind: EntityKind) -> Self {
        TouchKind::Entity(kind)
    }
}

/// One playable level
#[derive(Debug, Clone, Serialize)]
pub struct Level {
    field: TileField,
    entities: Vec<Entity>,
    status: LevelStatus,
    /// Seconds left after the outcome is decided; finished once negative
    finish_delay: f32,
    player: Option<EntityId>,
}

impl Level {
    /// Build a level; the player is the first entity of kind `Player`
    pub fn new(field: TileField, entities: Vec<Entity>) -> Self {
        Self::with_finish_delay(field, entities, FINISH_DELAY)
    }

    pub fn with_finish_delay(field: TileField, entities: Vec<Entity>, finish_delay: f32) -> Self {
        let player = entities
            .iter()
            .find(|e| e.kind() == EntityKind::Player)
            .map(Entity::id);
        if player.is_none() {
            log::warn!("level has no player entity");
        }
        Self {
            field,
            entities,
            status: LevelStatus::Playing,
            finish_delay,
            player,
        }
    }

    pub fn field(&self) -> &TileField {
        &self.field
    }

    /// Live entities in update order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    pub fn finish_delay(&self) -> f32 {
        self.finish_delay
    }

    pub fn player(&self) -> Option<&Entity> {
        let id = self.player?;
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Mutable player access for whatever drives player movement
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let id = self.player?;
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Outcome decided and the grace period has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_decided() && self.finish_delay < 0.0
    }

    /// Run down the grace period; no effect while the level is undecided
    pub fn advance_countdown(&mut self, dt: f32) {
        if self.status.is_decided() {
            self.finish_delay -= dt;
        }
    }

    /// First entity (in collection order) overlapping `probe`
    pub fn entity_at(&self, probe: &Entity) -> Result<Option<&Entity>> {
        probe
            .validate()
            .map_err(|e| Error::InvalidArgument(format!("probe entity: {e}")))?;
        Ok(self.entities.iter().find(|e| e.intersects(probe)))
    }

    /// Drop an entity by identity; unknown ids are ignored
    pub fn remove_entity(&mut self, id: EntityId) {
        let before = self.entities.len();
        self.entities.retain(|e| e.id() != id);
        if self.entities.len() != before {
            log::debug!("removed entity {}", id.get());
        }
    }

    pub fn none_of_kind(&self, kind: EntityKind) -> bool {
        !self.entities.iter().any(|e| e.kind() == kind)
    }

    /// Resolve the player touching something.
    ///
    /// Lava and hazards lose the level. A coin is collected and the level is
    /// won once no coins remain. Anything else is ignored, as is every touch
    /// after the outcome is decided.
    pub fn on_player_touch(&mut self, touched: impl Into<TouchKind>, entity: Option<EntityId>) {
        if self.status.is_decided() {
            return;
        }
        match touched.into() {
            TouchKind::Obstacle(ObstacleKind::Lava) => self.set_status(LevelStatus::Lost),
            TouchKind::Entity(kind) if kind.is_hazard() => self.set_status(LevelStatus::Lost),
            TouchKind::Entity(EntityKind::Collectible) => {
                if let Some(id) = entity {
                    self.remove_entity(id);
                }
                if self.none_of_kind(EntityKind::Collectible) {
                    self.set_status(LevelStatus::Won);
                }
            }
            _ => {}
        }
    }

    fn set_status(&mut self, status: LevelStatus) {
        log::info!("level {:?}", status);
        self.status = status;
    }

    /// Mutable access for the tick: tile field shared, entities updated in place
    pub(crate) fn parts_mut(&mut self) -> (&TileField, &mut [Entity]) {
        (&self.field, &mut self.entities)
    }
}
