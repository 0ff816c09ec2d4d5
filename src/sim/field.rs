//! Static obstacle grid for one level
//!
//! Rows run top to bottom, columns left to right, one cell per tile. Rows may
//! have different lengths; the field is as wide as its longest row and cells
//! past the end of a short row are open.

use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::error::{Error, Result};

/// Static per-tile classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Blocks movement
    Wall,
    /// Kills the player on touch
    Lava,
}

impl ObstacleKind {
    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Wall => "wall",
            ObstacleKind::Lava => "lava",
        }
    }
}

/// One grid cell: an obstacle or open space
pub type Tile = Option<ObstacleKind>;

/// Immutable obstacle grid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileField {
    rows: Vec<Vec<Tile>>,
    width: usize,
    height: usize,
}

impl TileField {
    pub fn new(rows: Vec<Vec<Tile>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let height = rows.len();
        Self {
            rows,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Tile>] {
        &self.rows
    }

    /// Cell at column `x`, row `y`; open when outside the stored rows
    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    /// Classify what a box at `pos` with `size` would run into.
    ///
    /// The box is widened to whole tiles (floor for left/top, ceil for
    /// right/bottom). Leaving the field sideways or through the top is a
    /// wall; falling out of the bottom is lava. Inside the field the first
    /// non-open cell wins, scanning rows top to bottom then columns left to
    /// right.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Result<Option<ObstacleKind>> {
        pos.validate("obstacle position")?;
        size.validate("obstacle size")?;
        if size.x < 0.0 || size.y < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "obstacle size must be non-negative, got ({}, {})",
                size.x, size.y
            )));
        }

        let left = pos.x.floor();
        let right = (pos.x + size.x).ceil();
        let top = pos.y.floor();
        let bottom = (pos.y + size.y).ceil();

        if left < 0.0 || right > self.width as f32 || top < 0.0 {
            return Ok(Some(ObstacleKind::Wall));
        }
        if bottom > self.height as f32 {
            return Ok(Some(ObstacleKind::Lava));
        }

        // All four bounds are now inside [0, width] x [0, height]
        let (left, right) = (left as usize, right as usize);
        let (top, bottom) = (top as usize, bottom as usize);
        for y in top..bottom {
            for x in left..right {
                if let Some(kind) = self.tile(x, y) {
                    return Ok(Some(kind));
                }
            }
        }
        Ok(None)
    }
}
