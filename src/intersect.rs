//! Intersection of a [`Ray`] with a finite [`Surface`]
use crate::{ray::Ray, surface::Surface, vector::Vector2};

/// Result of a successful ray / surface intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// intersection point
    pub point: Vector2,
    /// Euclidean distance between the ray start and the intersection point
    pub distance: f64,
    /// ray parameter `t` of the point `ray.start + t * ray.direction`
    pub ray_param: f64,
    /// distance of the point from the surface start along the surface
    pub surface_param: f64,
}

/// Intersect a [`Ray`] with a [`Surface`].
///
/// The linear system `ray.start + t * ray.direction = surface.start + u * surface.direction` is solved in closed
/// form (Cramer's rule). The intersection is valid if `0 <= u <= surface.length` and `t >= 0`. A ray parallel to
/// the surface never intersects.
///
/// This function returns `None` if there is no valid intersection.
#[must_use]
pub fn intersect(ray: &Ray, surface: &Surface) -> Option<Intersection> {
    let r = ray.direction();
    let d = surface.direction();
    let denominator = r.cross(d);
    if denominator == 0.0 {
        return None;
    }
    let w = surface.start() - ray.start();
    let ray_param = w.cross(d) / denominator;
    let surface_param = w.cross(r) / denominator;
    if !ray_param.is_finite() || !surface_param.is_finite() {
        return None;
    }
    if surface_param < 0.0 || surface_param > surface.length() || ray_param < 0.0 {
        return None;
    }
    let point = surface.point_at(surface_param);
    Some(Intersection {
        point,
        distance: (point - ray.start()).length(),
        ray_param,
        surface_param,
    })
}

impl Ray {
    /// Intersect this [`Ray`] with a [`Surface`]. See [`intersect`].
    #[must_use]
    pub fn intersect(&self, surface: &Surface) -> Option<Intersection> {
        intersect(self, surface)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::surface::Orientation;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn surface(start: (f64, f64), end: (f64, f64)) -> Surface {
        Surface::new(start.into(), end.into(), Orientation::Positive, 1.5).unwrap()
    }
    fn ray(start: (f64, f64), direction: (f64, f64)) -> Ray {
        Ray::new(start.into(), direction.into()).unwrap()
    }
    #[test]
    fn interior_crossing() {
        let s = surface((-10.0, 0.0), (10.0, 0.0));
        let i = intersect(&ray((0.0, -5.0), (0.0, 1.0)), &s).unwrap();
        assert_abs_diff_eq!(i.point, Vector2::ZERO);
        assert_relative_eq!(i.distance, 5.0);
        assert_relative_eq!(i.ray_param, 5.0);
        assert_relative_eq!(i.surface_param, 10.0);
    }
    #[test]
    fn distance_is_euclidean() {
        // direction is not normalized: t and distance differ
        let s = surface((-10.0, 0.0), (10.0, 0.0));
        let i = intersect(&ray((-3.0, -4.0), (6.0, 8.0)), &s).unwrap();
        assert_relative_eq!(i.ray_param, 0.5);
        assert_relative_eq!(i.distance, 5.0);
        assert_abs_diff_eq!(i.point, Vector2::ZERO, epsilon = 1e-12);
    }
    #[test]
    fn oblique_crossing() {
        let s = surface((0.0, 0.0), (4.0, 4.0));
        let r = ray((3.0, 0.0), (-1.0, 1.0));
        let i = r.intersect(&s).unwrap();
        let expected = Vector2::new(1.5, 1.5);
        assert_abs_diff_eq!(i.point, expected, epsilon = 1e-12);
        assert_relative_eq!(i.distance, (expected - r.start()).length(), epsilon = 1e-12);
        assert_relative_eq!(i.surface_param, 1.5 * 2.0_f64.sqrt(), epsilon = 1e-12);
    }
    #[test]
    fn outside_surface() {
        let s = surface((0.0, 0.0), (2.0, 0.0));
        assert!(intersect(&ray((2.0 + 1e-9, -1.0), (0.0, 1.0)), &s).is_none());
        assert!(intersect(&ray((-1e-9, -1.0), (0.0, 1.0)), &s).is_none());
        assert!(intersect(&ray((5.0, -1.0), (0.0, 1.0)), &s).is_none());
    }
    #[test]
    fn end_points_included() {
        let s = surface((0.0, 0.0), (2.0, 0.0));
        let i = intersect(&ray((0.0, -1.0), (0.0, 1.0)), &s).unwrap();
        assert_eq!(i.surface_param, 0.0);
        let i = intersect(&ray((2.0, -1.0), (0.0, 1.0)), &s).unwrap();
        assert_relative_eq!(i.surface_param, 2.0);
    }
    #[test]
    fn behind_ray() {
        let s = surface((-10.0, 0.0), (10.0, 0.0));
        assert!(intersect(&ray((0.0, -5.0), (0.0, -1.0)), &s).is_none());
    }
    #[test]
    fn ray_starting_on_surface() {
        let s = surface((-10.0, 0.0), (10.0, 0.0));
        let i = intersect(&ray((1.0, 0.0), (0.0, 1.0)), &s).unwrap();
        assert_eq!(i.distance, 0.0);
    }
    #[test]
    fn parallel() {
        let s = surface((-10.0, 0.0), (10.0, 0.0));
        assert!(intersect(&ray((0.0, -5.0), (1.0, 0.0)), &s).is_none());
        assert!(intersect(&ray((0.0, 0.0), (-2.0, 0.0)), &s).is_none());
    }
}
