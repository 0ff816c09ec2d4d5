//! Level plan parser
//!
//! A plan is a list of rows, one character per tile. `x` is a wall, `!` is
//! lava, and any character found in the parser's dictionary spawns an entity
//! in that cell. Everything else is open space.

use std::collections::HashMap;
use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::sim::{Entity, Level, ObstacleKind, Tile, TileField, Vector};

/// Builds an entity for the cell at the given position
pub type Spawner = fn(Vector, &mut Pcg32) -> Result<Entity>;

fn spawn_player(cell: Vector, _rng: &mut Pcg32) -> Result<Entity> {
    Entity::player(cell)
}

fn spawn_coin(cell: Vector, rng: &mut Pcg32) -> Result<Entity> {
    Entity::collectible(cell, rng.random_range(0.0..TAU))
}

fn spawn_horizontal(cell: Vector, _rng: &mut Pcg32) -> Result<Entity> {
    Entity::horizontal_hazard(cell)
}

fn spawn_vertical(cell: Vector, _rng: &mut Pcg32) -> Result<Entity> {
    Entity::vertical_hazard(cell)
}

fn spawn_rain(cell: Vector, _rng: &mut Pcg32) -> Result<Entity> {
    Entity::rain_hazard(cell)
}

/// Standard symbols: `@` player, `o` coin, `h`/`v` patrolling hazards, `f` rain
pub fn default_dictionary() -> HashMap<char, Spawner> {
    HashMap::from([
        ('@', spawn_player as Spawner),
        ('o', spawn_coin as Spawner),
        ('h', spawn_horizontal as Spawner),
        ('v', spawn_vertical as Spawner),
        ('f', spawn_rain as Spawner),
    ])
}

/// Turns plans into levels
#[derive(Debug, Clone)]
pub struct LevelParser {
    dictionary: HashMap<char, Spawner>,
    config: EngineConfig,
    rng: Pcg32,
}

impl LevelParser {
    pub fn new(dictionary: HashMap<char, Spawner>) -> Self {
        Self::with_config(dictionary, EngineConfig::default())
    }

    pub fn with_config(dictionary: HashMap<char, Spawner>, config: EngineConfig) -> Self {
        let rng = Pcg32::seed_from_u64(config.seed);
        Self {
            dictionary,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn entity_from_symbol(&self, symbol: char) -> Option<Spawner> {
        self.dictionary.get(&symbol).copied()
    }

    pub fn obstacle_from_symbol(symbol: char) -> Tile {
        match symbol {
            'x' => Some(ObstacleKind::Wall),
            '!' => Some(ObstacleKind::Lava),
            _ => None,
        }
    }

    /// Static obstacle grid of a plan; entity symbols become open tiles
    pub fn grid_from<S: AsRef<str>>(&self, plan: &[S]) -> TileField {
        TileField::new(
            plan.iter()
                .map(|row| row.as_ref().chars().map(Self::obstacle_from_symbol).collect())
                .collect(),
        )
    }

    /// Entities of a plan in row-major order. Cells whose spawner fails are
    /// skipped.
    pub fn entities_from<S: AsRef<str>>(&mut self, plan: &[S]) -> Vec<Entity> {
        let mut entities = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(spawn) = self.entity_from_symbol(symbol) else {
                    continue;
                };
                match spawn(Vector::new(x as f32, y as f32), &mut self.rng) {
                    Ok(entity) => entities.push(entity),
                    Err(e) => log::debug!("skipping '{}' at ({}, {}): {}", symbol, x, y, e),
                }
            }
        }
        entities
    }

    pub fn parse<S: AsRef<str>>(&mut self, plan: &[S]) -> Level {
        let field = self.grid_from(plan);
        let entities = self.entities_from(plan);
        log::debug!(
            "parsed {}x{} level with {} entities",
            field.width(),
            field.height(),
            entities.len()
        );
        Level::with_finish_delay(field, entities, self.config.finish_delay)
    }
}
