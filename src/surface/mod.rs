//! Module for handling optical surfaces
//!
//! A [`Surface`] is a finite straight interface between the ambient medium and a medium with a given refractive
//! index. Curved lens profiles are approximated by a [`SurfaceSet`] of such straight pieces.

mod surface_set;

pub use surface_set::SurfaceSet;

use crate::{
    error::{TraceError, TraceResult},
    vector::Vector2,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Side convention of a [`Surface`].
///
/// The implicit line value (see [`Surface::line_value`]) of a point on the ambient side of a surface has the same
/// sign as the orientation. Points on the other side are inside the medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// ambient side where the line value is positive
    Positive,
    /// ambient side where the line value is negative
    Negative,
}
impl Orientation {
    /// Returns `+1.0` or `-1.0`.
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }
    /// Returns the opposite orientation.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}
impl Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Positive => write!(f, "+1"),
            Self::Negative => write!(f, "-1"),
        }
    }
}

/// A finite, oriented, straight optical interface.
///
/// Serialized by its end points. Deserialization goes through [`Surface::new`] and fails on invalid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceEndPoints", into = "SurfaceEndPoints")]
pub struct Surface {
    start: Vector2,
    /// unit vector pointing from start to end
    direction: Vector2,
    length: f64,
    orientation: Orientation,
    refractive_index: f64,
}
impl Surface {
    /// Creates a new [`Surface`] between two end points.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the end points coincide or are not finite
    ///  - the refractive index is <= 0.0 or not finite
    pub fn new(
        start: Vector2,
        end: Vector2,
        orientation: Orientation,
        refractive_index: f64,
    ) -> TraceResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(TraceError::Geometry(
                "surface end points must be finite".into(),
            ));
        }
        if refractive_index <= 0.0 || !refractive_index.is_finite() {
            return Err(TraceError::Geometry(
                "refractive index must be >0.0 and finite".into(),
            ));
        }
        let diff = end - start;
        let direction = diff.try_normalize().map_err(|_| {
            TraceError::Geometry(format!("surface end points coincide at {start}"))
        })?;
        Ok(Self {
            start,
            direction,
            length: diff.length(),
            orientation,
            refractive_index,
        })
    }
    /// Returns the start point of this [`Surface`].
    #[must_use]
    pub const fn start(&self) -> Vector2 {
        self.start
    }
    /// Returns the end point of this [`Surface`].
    #[must_use]
    pub fn end(&self) -> Vector2 {
        self.start + self.direction * self.length
    }
    /// Returns the unit direction of this [`Surface`].
    #[must_use]
    pub const fn direction(&self) -> Vector2 {
        self.direction
    }
    /// Returns the length of this [`Surface`].
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }
    /// Returns the orientation of this [`Surface`].
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }
    /// Returns the refractive index of the medium behind this [`Surface`].
    #[must_use]
    pub const fn refractive_index(&self) -> f64 {
        self.refractive_index
    }
    /// Returns the point at the given distance from the start along the surface.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Vector2 {
        self.start + self.direction * u
    }
    /// Coefficients of the line equation `a*x - b*y = c` of the infinite line through this [`Surface`].
    #[must_use]
    pub fn cartesian(&self) -> (f64, f64, f64) {
        let d = self.direction;
        (
            d.y,
            d.x,
            d.y.mul_add(self.start.x, -d.x * self.start.y),
        )
    }
    /// Implicit line value `k - s` of a point.
    ///
    /// `k` is the line constant evaluated at the surface start, `s` the same expression evaluated at `point`. The
    /// value is zero on the line and changes sign across it.
    #[must_use]
    pub fn line_value(&self, point: Vector2) -> f64 {
        let (a, b, k) = self.cartesian();
        let s = a.mul_add(point.x, -b * point.y);
        k - s
    }
    /// Returns `true` if the given point lies on the ambient side of this [`Surface`].
    ///
    /// Points exactly on the line are counted as being inside the medium.
    #[must_use]
    pub fn is_ambient_side(&self, point: Vector2) -> bool {
        self.line_value(point) * self.orientation.sign() > 0.0
    }
}
impl Display for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} (orientation {}, n={})",
            self.start,
            self.end(),
            self.orientation,
            self.refractive_index
        )
    }
}

/// Serialized form of a [`Surface`].
#[derive(Serialize, Deserialize)]
struct SurfaceEndPoints {
    start: Vector2,
    end: Vector2,
    orientation: Orientation,
    refractive_index: f64,
}
impl TryFrom<SurfaceEndPoints> for Surface {
    type Error = TraceError;

    fn try_from(s: SurfaceEndPoints) -> TraceResult<Self> {
        Self::new(s.start, s.end, s.orientation, s.refractive_index)
    }
}
impl From<Surface> for SurfaceEndPoints {
    fn from(s: Surface) -> Self {
        Self {
            start: s.start,
            end: s.end(),
            orientation: s.orientation,
            refractive_index: s.refractive_index,
        }
    }
}

/// Returns `true` if the given point lies on the ambient side of the [`Surface`].
#[must_use]
pub fn is_ambient_side(point: Vector2, surface: &Surface) -> bool {
    surface.is_ambient_side(point)
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn horizontal(orientation: Orientation) -> Surface {
        Surface::new(
            Vector2::new(-10.0, 0.0),
            Vector2::new(10.0, 0.0),
            orientation,
            1.5,
        )
        .unwrap()
    }
    #[test]
    fn new() {
        let s = Surface::new(
            Vector2::new(1.0, 1.0),
            Vector2::new(4.0, 5.0),
            Orientation::Positive,
            1.5,
        )
        .unwrap();
        assert_eq!(s.start(), Vector2::new(1.0, 1.0));
        assert_abs_diff_eq!(s.direction(), Vector2::new(0.6, 0.8), epsilon = 1e-12);
        assert_relative_eq!(s.length(), 5.0);
        assert_abs_diff_eq!(s.end(), Vector2::new(4.0, 5.0), epsilon = 1e-12);
        assert_eq!(s.orientation(), Orientation::Positive);
        assert_eq!(s.refractive_index(), 1.5);
    }
    #[test]
    fn new_wrong_params() {
        let p = Vector2::new(1.0, 1.0);
        let q = Vector2::new(2.0, 1.0);
        assert!(Surface::new(p, p, Orientation::Positive, 1.5).is_err());
        assert!(Surface::new(p, q, Orientation::Positive, 0.0).is_err());
        assert!(Surface::new(p, q, Orientation::Positive, -1.0).is_err());
        assert!(Surface::new(p, q, Orientation::Positive, f64::NAN).is_err());
        assert!(Surface::new(p, q, Orientation::Positive, f64::INFINITY).is_err());
        assert!(Surface::new(p, Vector2::new(f64::NAN, 0.0), Orientation::Positive, 1.5).is_err());
        assert_eq!(
            Surface::new(p, p, Orientation::Negative, 1.5),
            Err(TraceError::Geometry(
                "surface end points coincide at [1, 1]".into()
            ))
        );
    }
    #[test]
    fn orientation() {
        assert_eq!(Orientation::Positive.sign(), 1.0);
        assert_eq!(Orientation::Negative.sign(), -1.0);
        assert_eq!(Orientation::Positive.flipped(), Orientation::Negative);
        assert_eq!(Orientation::Negative.flipped(), Orientation::Positive);
        assert_eq!(format!("{}", Orientation::Negative), "-1");
    }
    #[test]
    fn point_at() {
        let s = horizontal(Orientation::Positive);
        assert_eq!(s.point_at(0.0), Vector2::new(-10.0, 0.0));
        assert_eq!(s.point_at(12.5), Vector2::new(2.5, 0.0));
    }
    #[test]
    fn cartesian() {
        let s = Surface::new(
            Vector2::new(0.0, 1.0),
            Vector2::new(1.0, 2.0),
            Orientation::Positive,
            1.5,
        )
        .unwrap();
        let (a, b, c) = s.cartesian();
        // every point of the line satisfies a*x - b*y = c
        for u in [0.0, 0.5, 1.0, 3.0] {
            let p = s.point_at(u);
            assert_abs_diff_eq!(a * p.x - b * p.y, c, epsilon = 1e-12);
        }
    }
    #[test]
    fn line_value() {
        let s = horizontal(Orientation::Positive);
        assert_eq!(s.line_value(Vector2::new(3.0, 0.0)), 0.0);
        assert_eq!(s.line_value(Vector2::new(0.0, 2.0)), 2.0);
        assert_eq!(s.line_value(Vector2::new(0.0, -5.0)), -5.0);
        // reversed direction flips the sign
        let r = Surface::new(
            Vector2::new(10.0, 0.0),
            Vector2::new(-10.0, 0.0),
            Orientation::Positive,
            1.5,
        )
        .unwrap();
        assert_eq!(r.line_value(Vector2::new(0.0, 2.0)), -2.0);
    }
    #[test]
    fn ambient_side_horizontal() {
        // medium above the line (y>0)
        let s = horizontal(Orientation::Negative);
        assert!(s.is_ambient_side(Vector2::new(0.0, -5.0)));
        assert!(!s.is_ambient_side(Vector2::new(0.0, 5.0)));
        assert!(is_ambient_side(Vector2::new(100.0, -0.1), &s));
        // medium below the line (y<0)
        let s = horizontal(Orientation::Positive);
        assert!(!s.is_ambient_side(Vector2::new(0.0, -5.0)));
        assert!(s.is_ambient_side(Vector2::new(0.0, 5.0)));
        // points on the line belong to the medium
        assert!(!s.is_ambient_side(Vector2::new(3.0, 0.0)));
    }
    #[test]
    fn ambient_side_vertical() {
        // line along +y through x=2, medium on the right (x>2)
        let s = Surface::new(
            Vector2::new(2.0, -1.0),
            Vector2::new(2.0, 1.0),
            Orientation::Positive,
            1.5,
        )
        .unwrap();
        assert!(s.is_ambient_side(Vector2::new(0.0, 0.0)));
        assert!(!s.is_ambient_side(Vector2::new(3.0, 0.0)));
        let s = Surface::new(
            Vector2::new(2.0, -1.0),
            Vector2::new(2.0, 1.0),
            Orientation::Negative,
            1.5,
        )
        .unwrap();
        assert!(!s.is_ambient_side(Vector2::new(0.0, 0.0)));
        assert!(s.is_ambient_side(Vector2::new(3.0, 0.0)));
    }
    #[test]
    fn serde() {
        let s = horizontal(Orientation::Negative);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(
            json,
            r#"{"start":{"x":-10.0,"y":0.0},"end":{"x":10.0,"y":0.0},"orientation":"Negative","refractive_index":1.5}"#
        );
        let parsed: Surface = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, s);
    }
    #[test]
    fn deserialize_checks_params() {
        let coincident = r#"{"start":{"x":1.0,"y":1.0},"end":{"x":1.0,"y":1.0},"orientation":"Positive","refractive_index":1.5}"#;
        let err = serde_json::from_str::<Surface>(coincident).unwrap_err();
        assert!(err.to_string().contains("surface end points coincide"), "{err}");
        let wrong_index = r#"{"start":{"x":0.0,"y":0.0},"end":{"x":1.0,"y":0.0},"orientation":"Positive","refractive_index":0.0}"#;
        assert!(serde_json::from_str::<Surface>(wrong_index).is_err());
        // the unit direction is derived, not read
        let unnormalized = r#"{"start":{"x":0.0,"y":0.0},"direction":{"x":3.0,"y":0.0},"length":1.0,"orientation":"Positive","refractive_index":1.5}"#;
        assert!(serde_json::from_str::<Surface>(unnormalized).is_err());
    }
    #[test]
    fn display() {
        let s = horizontal(Orientation::Negative);
        assert_eq!(format!("{s}"), "[-10, 0] -> [10, 0] (orientation -1, n=1.5)");
    }
}
