//! Moving entities: player, hazards and coins
//!
//! Every entity is an axis-aligned box (position + size) with a velocity and a
//! flat behavior tag. The tag selects how the entity moves each tick and how
//! it reacts when the tile field blocks it.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use super::field::TileField;
use super::vector::Vector;
use crate::consts::*;
use crate::error::{Error, Result};

static NEXT_ENTITY_ID: AtomicU32 = AtomicU32::new(1);

/// A time delta must be finite and non-negative
pub fn validate_dt(dt: f32) -> Result<f32> {
    if !dt.is_finite() {
        return Err(Error::TypeMismatch(format!(
            "time delta must be finite, got {dt}"
        )));
    }
    if dt < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "time delta must be non-negative, got {dt}"
        )));
    }
    Ok(dt)
}

/// Process-unique entity identity; clones keep the id of their source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(u32);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Hazard movement patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HazardKind {
    /// Patrols left/right, bouncing off obstacles
    Horizontal,
    /// Patrols up/down, bouncing off obstacles
    Vertical,
    /// Falls and restarts from its spawn point when blocked
    Rain,
}

impl HazardKind {
    /// Initial velocity for this pattern
    pub fn velocity(&self) -> Vector {
        match self {
            HazardKind::Horizontal => Vector::new(HORIZONTAL_HAZARD_SPEED, 0.0),
            HazardKind::Vertical => Vector::new(0.0, VERTICAL_HAZARD_SPEED),
            HazardKind::Rain => Vector::new(0.0, RAIN_HAZARD_SPEED),
        }
    }
}

/// Semantic role of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EntityKind {
    Generic,
    Player,
    Hazard(HazardKind),
    Collectible,
}

impl EntityKind {
    /// Stable name for display layers and logs
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Generic => "actor",
            EntityKind::Player => "player",
            EntityKind::Hazard(_) => "fireball",
            EntityKind::Collectible => "coin",
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, EntityKind::Hazard(_))
    }
}

/// Vertical bobbing of a coin around its spawn point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Spring {
    /// Current phase angle (radians)
    pub phase: f32,
    /// Phase advance per second
    pub rate: f32,
    /// Peak vertical offset (tiles)
    pub amplitude: f32,
    /// Rest position the coin bobs around
    pub spawn: Vector,
}

impl Spring {
    pub fn advance(&mut self, dt: f32) {
        self.phase += self.rate * dt;
    }

    /// Offset from the rest position at the current phase
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.amplitude)
    }

    pub fn position(&self) -> Vector {
        self.spawn.plus(self.offset())
    }
}

/// Per-kind state and movement rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Behavior {
    /// Never moves on its own
    Inert,
    /// Moved externally; only a touch target here
    Player,
    /// Ballistic movement with a kind-specific obstacle reaction
    Hazard { kind: HazardKind, spawn: Vector },
    Collectible(Spring),
}

/// An axis-aligned box in the level
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    id: EntityId,
    pub pos: Vector,
    pub size: Vector,
    pub vel: Vector,
    behavior: Behavior,
}

impl Entity {
    /// Generic inert entity
    pub fn new(pos: Vector, size: Vector, vel: Vector) -> Result<Self> {
        Self::with_behavior(pos, size, vel, Behavior::Inert)
    }

    fn with_behavior(pos: Vector, size: Vector, vel: Vector, behavior: Behavior) -> Result<Self> {
        let entity = Self {
            id: EntityId::next(),
            pos,
            size,
            vel,
            behavior,
        };
        entity.validate()?;
        Ok(entity)
    }

    /// Player marker for the tile at `cell`
    pub fn player(cell: Vector) -> Result<Self> {
        Self::with_behavior(
            cell.plus(PLAYER_OFFSET.into()),
            PLAYER_SIZE.into(),
            Vector::ZERO,
            Behavior::Player,
        )
    }

    /// Unit-sized hazard at `cell` moving with the kind's initial velocity
    pub fn hazard(kind: HazardKind, cell: Vector) -> Result<Self> {
        Self::with_behavior(
            cell,
            Vector::ONE,
            kind.velocity(),
            Behavior::Hazard { kind, spawn: cell },
        )
    }

    pub fn horizontal_hazard(cell: Vector) -> Result<Self> {
        Self::hazard(HazardKind::Horizontal, cell)
    }

    pub fn vertical_hazard(cell: Vector) -> Result<Self> {
        Self::hazard(HazardKind::Vertical, cell)
    }

    pub fn rain_hazard(cell: Vector) -> Result<Self> {
        Self::hazard(HazardKind::Rain, cell)
    }

    /// Coin in the tile at `cell`, starting its bob at `phase`
    pub fn collectible(cell: Vector, phase: f32) -> Result<Self> {
        let spawn = cell.plus(COIN_OFFSET.into());
        let spring = Spring {
            phase,
            rate: SPRING_RATE,
            amplitude: SPRING_AMPLITUDE,
            spawn,
        };
        Self::with_behavior(spawn, COIN_SIZE.into(), Vector::ZERO, Behavior::Collectible(spring))
    }

    /// Check the geometry is usable: finite vectors and a non-negative size
    pub fn validate(&self) -> Result<()> {
        self.pos.validate("entity position")?;
        self.size.validate("entity size")?;
        self.vel.validate("entity velocity")?;
        if self.size.x < 0.0 || self.size.y < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "entity size must be non-negative, got ({}, {})",
                self.size.x, self.size.y
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn kind(&self) -> EntityKind {
        match self.behavior {
            Behavior::Inert => EntityKind::Generic,
            Behavior::Player => EntityKind::Player,
            Behavior::Hazard { kind, .. } => EntityKind::Hazard(kind),
            Behavior::Collectible(_) => EntityKind::Collectible,
        }
    }

    /// Coin spring state, if this is a coin
    pub fn spring(&self) -> Option<&Spring> {
        match &self.behavior {
            Behavior::Collectible(spring) => Some(spring),
            _ => None,
        }
    }

    /// Where a hazard restarts from / a coin bobs around
    pub fn spawn_position(&self) -> Option<Vector> {
        match self.behavior {
            Behavior::Hazard { spawn, .. } => Some(spawn),
            Behavior::Collectible(spring) => Some(spring.spawn),
            _ => None,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict box overlap; boxes sharing only an edge do not intersect and an
    /// entity never intersects itself (or a clone of itself).
    pub fn intersects(&self, other: &Entity) -> bool {
        if self.id == other.id {
            return false;
        }
        self.right() > other.left()
            && self.left() < other.right()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Ballistic next position after `dt` seconds
    pub fn next_position(&self, dt: f32) -> Vector {
        self.pos.plus(self.vel.times(dt))
    }

    /// React to being blocked: patrolling hazards turn around, rain restarts
    /// from its spawn point. Other kinds ignore obstacles.
    pub fn handle_obstacle(&mut self) {
        match self.behavior {
            Behavior::Hazard {
                kind: HazardKind::Rain,
                spawn,
            } => self.pos = spawn,
            Behavior::Hazard { .. } => self.vel = self.vel.times(-1.0),
            _ => {}
        }
    }

    /// Advance this entity by `dt` seconds against the level's tiles
    pub fn act(&mut self, dt: f32, field: &TileField) -> Result<()> {
        validate_dt(dt)?;
        match self.behavior {
            Behavior::Inert | Behavior::Player => {}
            Behavior::Hazard { .. } => {
                let next = self.next_position(dt);
                if let Some(obstacle) = field.obstacle_at(next, self.size)? {
                    log::trace!("entity {} blocked by {}", self.id.get(), obstacle.name());
                    self.handle_obstacle();
                } else {
                    self.pos = next;
                }
            }
            Behavior::Collectible(ref mut spring) => {
                spring.advance(dt);
                self.pos = spring.position();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::field::ObstacleKind;
    use proptest::prelude::*;
    use std::f32::consts::TAU;

    fn unit_box(x: f32, y: f32) -> Entity {
        Entity::new(Vector::new(x, y), Vector::ONE, Vector::ZERO).unwrap()
    }

    fn open_field(width: usize, height: usize) -> TileField {
        TileField::new(vec![vec![None; width]; height])
    }

    #[test]
    fn test_edges() {
        let e = Entity::new(Vector::new(1.0, 2.0), Vector::new(3.0, 4.0), Vector::ZERO).unwrap();
        assert_eq!(e.left(), 1.0);
        assert_eq!(e.right(), 4.0);
        assert_eq!(e.top(), 2.0);
        assert_eq!(e.bottom(), 6.0);
        assert_eq!(e.kind(), EntityKind::Generic);
    }

    #[test]
    fn test_construction_validates_vectors() {
        let err = Entity::new(Vector::new(f32::NAN, 0.0), Vector::ONE, Vector::ZERO).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
        let err = Entity::new(Vector::ZERO, Vector::ONE, Vector::new(0.0, f32::INFINITY))
            .unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
        let err = Entity::new(Vector::ZERO, Vector::new(-1.0, 1.0), Vector::ZERO).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_edge_touching_boxes_do_not_intersect() {
        let a = unit_box(0.0, 0.0);
        let b = unit_box(1.0, 0.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = unit_box(0.0, 0.0);
        let b = unit_box(0.5, 0.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_identity_not_value_equality() {
        let a = unit_box(0.0, 0.0);
        let twin = unit_box(0.0, 0.0);
        assert!(!a.intersects(&a));
        assert!(!a.intersects(&a.clone()));
        assert!(a.intersects(&twin));
    }

    #[test]
    fn test_player_and_coin_boxes() {
        let player = Entity::player(Vector::new(2.0, 3.0)).unwrap();
        assert_eq!(player.pos, Vector::new(2.0, 2.5));
        assert_eq!(player.size, Vector::new(0.8, 1.5));
        assert_eq!(player.kind(), EntityKind::Player);

        let coin = Entity::collectible(Vector::new(2.0, 3.0), 0.0).unwrap();
        assert!((coin.pos.x - 2.2).abs() < 1e-6);
        assert!((coin.pos.y - 3.1).abs() < 1e-6);
        assert_eq!(coin.size, Vector::new(0.6, 0.6));
        assert_eq!(coin.kind().name(), "coin");
    }

    #[test]
    fn test_horizontal_hazard_bounces() {
        // Next box spans column 2 only, which holds a wall tile inside the field
        let wall = Some(ObstacleKind::Wall);
        let field = TileField::new(vec![vec![None, None, wall, None]]);
        let mut hazard = Entity::horizontal_hazard(Vector::ZERO).unwrap();
        assert_eq!(hazard.vel, Vector::new(2.0, 0.0));

        hazard.act(1.0, &field).unwrap();
        assert_eq!(hazard.vel, Vector::new(-2.0, 0.0));
        assert_eq!(hazard.pos, Vector::ZERO);

        // Same move through open tiles goes ahead
        let mut hazard = Entity::horizontal_hazard(Vector::ZERO).unwrap();
        hazard.act(1.0, &open_field(4, 1)).unwrap();
        assert_eq!(hazard.pos, Vector::new(2.0, 0.0));
    }

    #[test]
    fn test_coin_rejects_bad_dt_untouched() {
        let field = open_field(3, 3);
        let mut coin = Entity::collectible(Vector::new(1.0, 1.0), 0.5).unwrap();
        let before = coin.clone();
        assert!(matches!(
            coin.act(f32::NAN, &field),
            Err(Error::TypeMismatch(_))
        ));
        assert!(matches!(
            coin.act(-0.1, &field),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(coin.pos, before.pos);
        assert_eq!(coin.spring(), before.spring());
    }

    #[test]
    fn test_vertical_hazard_moves_then_bounces() {
        let field = open_field(1, 4);
        let mut hazard = Entity::vertical_hazard(Vector::ZERO).unwrap();
        hazard.act(1.0, &field).unwrap();
        assert_eq!(hazard.pos, Vector::new(0.0, 2.0));
        // Next step would leave through the bottom (lava)
        hazard.act(1.0, &field).unwrap();
        assert_eq!(hazard.pos, Vector::new(0.0, 2.0));
        assert_eq!(hazard.vel, Vector::new(0.0, -2.0));
    }

    #[test]
    fn test_rain_restarts_from_spawn() {
        let field = open_field(1, 5);
        let spawn = Vector::new(0.0, 1.0);
        let mut rain = Entity::rain_hazard(spawn).unwrap();
        rain.act(1.0, &field).unwrap();
        assert_eq!(rain.pos, Vector::new(0.0, 4.0));

        rain.act(1.0, &field).unwrap();
        assert_eq!(rain.pos, spawn);
        assert_eq!(rain.vel, Vector::new(0.0, 3.0));
        assert_eq!(rain.spawn_position(), Some(spawn));
    }

    #[test]
    fn test_act_rejects_non_finite_dt() {
        let field = open_field(3, 3);
        let mut hazard = Entity::horizontal_hazard(Vector::ZERO).unwrap();
        assert!(matches!(
            hazard.act(f32::NAN, &field),
            Err(Error::TypeMismatch(_))
        ));
    }

    #[test]
    fn test_player_and_generic_do_not_move() {
        let field = open_field(3, 3);
        let mut player = Entity::player(Vector::new(1.0, 1.0)).unwrap();
        let before = player.pos;
        player.act(0.5, &field).unwrap();
        assert_eq!(player.pos, before);

        let mut generic =
            Entity::new(Vector::ZERO, Vector::ONE, Vector::new(1.0, 0.0)).unwrap();
        generic.act(0.5, &field).unwrap();
        assert_eq!(generic.pos, Vector::ZERO);
    }

    #[test]
    fn test_coin_ignores_obstacles() {
        // Coin sits in a wall tile; it still bobs
        let field = TileField::new(vec![vec![Some(ObstacleKind::Wall)]]);
        let mut coin = Entity::collectible(Vector::ZERO, 0.0).unwrap();
        coin.act(0.1, &field).unwrap();
        let spring = coin.spring().unwrap();
        assert!((spring.phase - 0.8).abs() < 1e-6);
        assert_eq!(coin.pos, spring.spawn.plus(spring.offset()));
    }

    #[test]
    fn test_spring_is_periodic() {
        let mut spring = Spring {
            phase: 0.3,
            rate: SPRING_RATE,
            amplitude: SPRING_AMPLITUDE,
            spawn: Vector::ZERO,
        };
        let before = spring.offset();
        spring.advance(TAU / SPRING_RATE);
        assert!((spring.offset().y - before.y).abs() < 1e-5);
        assert_eq!(spring.offset().x, 0.0);
    }

    proptest! {
        #[test]
        fn never_intersects_itself(x in -50f32..50.0, y in -50f32..50.0, w in 0f32..5.0, h in 0f32..5.0) {
            let e = Entity::new(Vector::new(x, y), Vector::new(w, h), Vector::ZERO).unwrap();
            prop_assert!(!e.intersects(&e));
        }

        #[test]
        fn intersection_is_symmetric(ax in -5f32..5.0, ay in -5f32..5.0, bx in -5f32..5.0, by in -5f32..5.0) {
            let a = unit_box(ax, ay);
            let b = unit_box(bx, by);
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn coin_stays_on_its_spring(phase in 0f32..TAU, dt in 0f32..0.5) {
            let field = open_field(4, 4);
            let mut coin = Entity::collectible(Vector::new(1.0, 1.0), phase).unwrap();
            coin.act(dt, &field).unwrap();
            let spring = *coin.spring().unwrap();
            let expected = spring.spawn.plus(Vector::new(0.0, spring.amplitude * spring.phase.sin()));
            prop_assert_eq!(coin.pos, expected);
        }
    }
}
