#![warn(missing_docs)]
//! Refraction of a [`Ray`] on a [`Surface`] using Snell's law
//!
//! The incoming direction is expressed in a local frame spanned by the surface normal and the surface tangent.
//! In this frame, Snell's law only changes the ratio between the normal and the tangential component. If the
//! ratio cannot be satisfied (total internal reflection), the normal component is mirrored instead.
//!
//! Partial reflection (Fresnel coefficients) is not modelled: every ray is either fully transmitted or fully
//! reflected.
use crate::{
    intersect::intersect,
    ray::{Ray, Segment},
    surface::Surface,
    vector::Vector2,
};

/// Refractive index of the ambient medium (air).
pub const AIR_INDEX: f64 = 1.0;

/// Kind of interaction of a ray with a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// the ray crossed the surface and was refracted
    Transmitted,
    /// the ray was totally reflected back into the medium it came from
    TotalInternalReflection,
}

/// Outcome of a ray hitting a [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub struct Refraction {
    /// the ray path from its start up to the intersection point
    pub segment: Segment,
    /// the outgoing ray starting at the intersection point
    pub continuation: Ray,
    /// transmitted or totally reflected
    pub interaction: Interaction,
    /// refractive index of the medium the ray came from
    pub n1: f64,
    /// refractive index of the medium on the other side of the surface
    pub n2: f64,
}

/// Orthonormal frame spanned by the normal and the tangent of a surface.
///
/// The basis matrix is `[[-d_y, d_x], [d_x, d_y]]` for the unit surface direction `d`. It is a reflection and
/// thus its own inverse.
#[derive(Debug, Clone, Copy)]
struct LocalFrame {
    tangent: Vector2,
}
impl LocalFrame {
    const fn new(surface: &Surface) -> Self {
        Self {
            tangent: surface.direction(),
        }
    }
    /// Global to local: x = normal component, y = tangential component.
    fn to_local(self, v: Vector2) -> Vector2 {
        let d = self.tangent;
        Vector2::new((-d.y).mul_add(v.x, d.x * v.y), d.x.mul_add(v.x, d.y * v.y))
    }
    fn to_global(self, v: Vector2) -> Vector2 {
        // self-inverse basis
        self.to_local(v)
    }
}

/// Returns the refractive indices `(n1, n2)` for `ray` hitting `surface`.
///
/// If the ray start lies on the ambient side, the ray enters the medium of the surface. Otherwise it leaves it.
/// A start exactly on the line of the surface is assigned to the side the ray comes from.
#[must_use]
pub fn media(ray: &Ray, surface: &Surface, ambient_index: f64) -> (f64, f64) {
    let origin = if surface.line_value(ray.start()) == 0.0 {
        ray.start() - ray.direction()
    } else {
        ray.start()
    };
    if surface.is_ambient_side(origin) {
        (ambient_index, surface.refractive_index())
    } else {
        (surface.refractive_index(), ambient_index)
    }
}

/// Apply Snell's law to a direction given in the local surface frame.
///
/// Returns the outgoing local direction and the kind of interaction.
fn snell_local(incident: Vector2, n1: f64, n2: f64) -> (Vector2, Interaction) {
    let ratio = incident.y / incident.x;
    let x = (n1 / n2) * (ratio / ratio.mul_add(ratio, 1.0).sqrt());
    if !(-1.0..=1.0).contains(&x) {
        return (
            Vector2::new(-incident.x, incident.y),
            Interaction::TotalInternalReflection,
        );
    }
    let theta = x.asin().abs();
    (
        Vector2::new(
            theta.cos().copysign(incident.x),
            theta.sin().copysign(incident.y),
        ),
        Interaction::Transmitted,
    )
}

/// Refract a [`Ray`] on a [`Surface`].
///
/// The ambient medium has the refractive index `ambient_index`. Which side of the surface the ray comes from is
/// determined by [`media`], so the same surface may be crossed in both
/// directions.
///
/// This function returns `None` if the ray does not intersect the surface.
#[must_use]
pub fn refract(ray: &Ray, surface: &Surface, ambient_index: f64) -> Option<Refraction> {
    let intersection = intersect(ray, surface)?;
    let (n1, n2) = media(ray, surface, ambient_index);
    let frame = LocalFrame::new(surface);
    let (outgoing, interaction) = snell_local(frame.to_local(ray.direction()), n1, n2);
    Some(Refraction {
        segment: Segment::new(
            ray.start(),
            ray.direction().normalize(),
            intersection.distance,
        ),
        continuation: Ray::new_unchecked(intersection.point, frame.to_global(outgoing)),
        interaction,
        n1,
        n2,
    })
}

impl Ray {
    /// Refract this [`Ray`] on a [`Surface`]. See [`refract`].
    #[must_use]
    pub fn refract(&self, surface: &Surface, ambient_index: f64) -> Option<Refraction> {
        refract(self, surface, ambient_index)
    }
}
