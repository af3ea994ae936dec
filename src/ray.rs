#![warn(missing_docs)]
//! Module for handling optical rays and traced ray segments
use std::fmt::Display;

use serde::Serialize;

use crate::{
    error::{TraceError, TraceResult},
    vector::Vector2,
};

/// An unbounded ray `start + t * direction` with `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ray {
    start: Vector2,
    /// propagation direction. This vector is not necessarily normalized.
    direction: Vector2,
}
impl Ray {
    /// Creates a new [`Ray`].
    ///
    /// The direction is stored as given and is not normalized.
    ///
    /// # Errors
    /// This function returns an error if
    ///  - the start point is not finite
    ///  - the direction vector has a zero length or is not finite
    pub fn new(start: Vector2, direction: Vector2) -> TraceResult<Self> {
        if !start.is_finite() {
            return Err(TraceError::Geometry("ray start must be finite".into()));
        }
        if !direction.is_finite() || direction.length() == 0.0 {
            return Err(TraceError::Geometry(
                "length of ray direction must be >0 and finite".into(),
            ));
        }
        Ok(Self { start, direction })
    }
    /// Creates a ray without validation. The caller guarantees a finite start and a non-zero direction.
    pub(crate) const fn new_unchecked(start: Vector2, direction: Vector2) -> Self {
        Self { start, direction }
    }
    /// Returns the start point of this [`Ray`].
    #[must_use]
    pub const fn start(&self) -> Vector2 {
        self.start
    }
    /// Returns the direction of this [`Ray`].
    ///
    /// **Note**: This vector is not necessarily normalized.
    #[must_use]
    pub const fn direction(&self) -> Vector2 {
        self.direction
    }
    /// Returns the point `start + t * direction`.
    #[must_use]
    pub fn at(&self, t: f64) -> Vector2 {
        self.start + self.direction * t
    }
    /// Cut this [`Ray`] to a [`Segment`] of the given length along its normalized direction.
    ///
    /// This is used for displaying the final unbounded ray of a trace.
    #[must_use]
    pub fn truncated(&self, length: f64) -> Segment {
        Segment::new(self.start, self.direction.normalize(), length)
    }
}
impl Display for Ray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "start: {} ; dir: {}", self.start, self.direction)
    }
}

/// A bounded piece of a ray path between two events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    start: Vector2,
    direction: Vector2,
    length: f64,
}
impl Segment {
    pub(crate) const fn new(start: Vector2, direction: Vector2, length: f64) -> Self {
        Self {
            start,
            direction,
            length,
        }
    }
    /// Returns the start point of this [`Segment`].
    #[must_use]
    pub const fn start(&self) -> Vector2 {
        self.start
    }
    /// Returns the (unit) direction of this [`Segment`].
    #[must_use]
    pub const fn direction(&self) -> Vector2 {
        self.direction
    }
    /// Returns the length of this [`Segment`].
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }
    /// Returns the end point of this [`Segment`].
    #[must_use]
    pub fn end(&self) -> Vector2 {
        self.start + self.direction * self.length
    }
}
impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} (length {})", self.start, self.end(), self.length)
    }
}
