//! 2D point/displacement value
//!
//! Positions, sizes and velocities are all `Vector`s measured in tiles.
//! Arithmetic goes through glam; the wrapper keeps the value immutable and
//! gives the simulation a validity check for its boundaries.

use std::ops::{Add, Mul};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Immutable 2D vector
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self::new(0.0, 0.0);
    pub const ONE: Self = Self::new(1.0, 1.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Component-wise sum
    #[inline]
    pub fn plus(self, other: Vector) -> Vector {
        (self.as_vec2() + other.as_vec2()).into()
    }

    /// Component-wise scalar product
    #[inline]
    pub fn times(self, factor: f32) -> Vector {
        (self.as_vec2() * factor).into()
    }

    #[inline]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_finite(self) -> bool {
        self.as_vec2().is_finite()
    }

    /// Fail with `TypeMismatch` unless both components are finite.
    /// `what` names the value in the error message.
    pub fn validate(self, what: &str) -> Result<Self> {
        if self.is_finite() {
            Ok(self)
        } else {
            Err(Error::TypeMismatch(format!(
                "{what} must be a finite vector, got ({}, {})",
                self.x, self.y
            )))
        }
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        v.as_vec2()
    }
}

impl From<(f32, f32)> for Vector {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        self.plus(rhs)
    }
}

impl Mul<f32> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f32) -> Vector {
        self.times(rhs)
    }
}
