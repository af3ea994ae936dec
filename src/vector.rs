#![warn(missing_docs)]
//! Two-dimensional vector algebra
//!
//! [`Vector2`] is used for points as well as directions in the plane of the simulation.
use std::fmt::Display;
use std::ops::{Add, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use crate::error::{TraceError, TraceResult};

/// A point or direction in the 2D plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    /// x component
    pub x: f64,
    /// y component
    pub y: f64,
}
impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new [`Vector2`].
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    /// Component-wise sum of two vectors.
    #[must_use]
    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
    /// Multiply both components by the given factor.
    #[must_use]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
    /// Scalar product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }
    /// z component of the 3D cross product of the two (z=0) vectors.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x.mul_add(other.y, -self.y * other.x)
    }
    /// Euclidean norm.
    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
    /// Returns the vector scaled to unit length.
    ///
    /// The vector must not have a zero length. Use [`Vector2::try_normalize`] where the input is not
    /// under control of the caller.
    #[must_use]
    pub fn normalize(self) -> Self {
        let length = self.length();
        debug_assert!(length > 0.0, "cannot normalize a zero-length vector");
        self.scale(1.0 / length)
    }
    /// Returns the vector scaled to unit length.
    ///
    /// # Errors
    ///
    /// This function returns an error if the vector has a zero length or is not finite.
    pub fn try_normalize(self) -> TraceResult<Self> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return Err(TraceError::Geometry(
                "cannot normalize a vector with zero or non-finite length".into(),
            ));
        }
        Ok(self.scale(1.0 / length))
    }
    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::add(self, rhs)
    }
}
impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::sub(self, rhs)
    }
}
impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}
impl Mul<Vector2> for f64 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Vector2 {
        rhs.scale(self)
    }
}
impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}
impl Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
impl AbsDiffEq for Vector2 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}
impl RelativeEq for Vector2 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
