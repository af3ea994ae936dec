#![warn(missing_docs)]
//! Iterative projection of rays through a [`SurfaceSet`]
//!
//! A [`RayProjector`] repeatedly searches the nearest surface hit by the current ray, refracts the ray there and
//! continues with the outgoing ray until nothing is hit anymore or the maximum number of bounces is reached.
use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{
    error::{TraceError, TraceResult},
    intersect::intersect,
    ray::{Ray, Segment},
    refraction::AIR_INDEX,
    surface::SurfaceSet,
    vector::Vector2,
};

/// Hits of a continuation ray closer than this to its start are the point the ray just left.
const MIN_CONTINUATION_DISTANCE: f64 = 1e-9;

/// Strategy preventing a continuation ray from hitting the surface it just started on.
///
/// Independent of the strategy, a continuation ray never hits a surface within 1e-9 of its start, so a ray leaving a
/// vertex shared by two surfaces is not caught by the neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum SelfIntersectionGuard {
    /// ignore the surface hit in the previous iteration
    #[default]
    ExcludePrevious,
    /// search the next surface from a point moved by the given distance along the ray direction. The traced
    /// segments still start at the true hit points.
    Offset(f64),
}

/// The result of projecting a single [`Ray`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    segments: Vec<Segment>,
    final_ray: Ray,
}
impl Trace {
    /// Creates a new [`Trace`].
    #[must_use]
    pub const fn new(segments: Vec<Segment>, final_ray: Ray) -> Self {
        Self {
            segments,
            final_ray,
        }
    }
    /// Returns the bounded segments in the order they were travelled.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
    /// Returns the unbounded ray leaving the last surface.
    #[must_use]
    pub const fn final_ray(&self) -> Ray {
        self.final_ray
    }
    /// Returns the number of surface interactions.
    #[must_use]
    pub fn bounces(&self) -> usize {
        self.segments.len()
    }
    /// Returns the summed length of all segments.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(Segment::length).sum()
    }
    /// Returns the polyline of the trace: the ray origin followed by all hit points.
    #[must_use]
    pub fn points(&self) -> Vec<Vector2> {
        let origin = self
            .segments
            .first()
            .map_or_else(|| self.final_ray.start(), Segment::start);
        std::iter::once(origin)
            .chain(self.segments.iter().map(Segment::end))
            .collect()
    }
}

/// Projects rays through a [`SurfaceSet`].
#[derive(Debug, Clone, PartialEq)]
pub struct RayProjector {
    max_bounces: usize,
    guard: SelfIntersectionGuard,
    ambient_index: f64,
}
impl Default for RayProjector {
    fn default() -> Self {
        Self::new(32)
    }
}
impl RayProjector {
    /// Creates a new [`RayProjector`] with the given bounce limit.
    ///
    /// The ambient medium is air ([`AIR_INDEX`]) and the previously hit surface is excluded from the next search.
    #[must_use]
    pub const fn new(max_bounces: usize) -> Self {
        Self {
            max_bounces,
            guard: SelfIntersectionGuard::ExcludePrevious,
            ambient_index: AIR_INDEX,
        }
    }
    /// Sets the [`SelfIntersectionGuard`].
    ///
    /// # Errors
    ///
    /// This function returns an error if an offset is <= 0.0 or not finite.
    pub fn with_guard(mut self, guard: SelfIntersectionGuard) -> TraceResult<Self> {
        if let SelfIntersectionGuard::Offset(eps) = guard {
            if eps <= 0.0 || !eps.is_finite() {
                return Err(TraceError::Geometry(
                    "self intersection offset must be >0.0 and finite".into(),
                ));
            }
        }
        self.guard = guard;
        Ok(self)
    }
    /// Sets the refractive index of the ambient medium.
    ///
    /// # Errors
    ///
    /// This function returns an error if the index is <= 0.0 or not finite.
    pub fn with_ambient_index(mut self, ambient_index: f64) -> TraceResult<Self> {
        if ambient_index <= 0.0 || !ambient_index.is_finite() {
            return Err(TraceError::Geometry(
                "refractive index must be >0.0 and finite".into(),
            ));
        }
        self.ambient_index = ambient_index;
        Ok(self)
    }
    /// Returns the bounce limit of this [`RayProjector`].
    #[must_use]
    pub const fn max_bounces(&self) -> usize {
        self.max_bounces
    }
    /// Returns the [`SelfIntersectionGuard`] of this [`RayProjector`].
    #[must_use]
    pub const fn guard(&self) -> SelfIntersectionGuard {
        self.guard
    }
    /// Returns the refractive index of the ambient medium.
    #[must_use]
    pub const fn ambient_index(&self) -> f64 {
        self.ambient_index
    }
    /// Index of the nearest surface hit by `ray`. On equal distances the first surface wins.
    fn nearest_hit(
        ray: &Ray,
        surfaces: &SurfaceSet,
        excluded: Option<usize>,
        continuation: bool,
    ) -> Option<usize> {
        let mut nearest: Option<(usize, f64)> = None;
        for (index, surface) in surfaces.iter().enumerate() {
            if Some(index) == excluded {
                continue;
            }
            let Some(hit) = intersect(ray, surface) else {
                continue;
            };
            if continuation && hit.distance <= MIN_CONTINUATION_DISTANCE {
                continue;
            }
            if nearest.map_or(true, |(_, distance)| hit.distance < distance) {
                nearest = Some((index, hit.distance));
            }
        }
        nearest.map(|(index, _)| index)
    }
    /// Project a [`Ray`] through a [`SurfaceSet`].
    ///
    /// Reaching the bounce limit is a normal termination. In this case, the final ray of the [`Trace`] is the last
    /// continuation ray, even if it would hit further surfaces.
    #[must_use]
    pub fn project(&self, ray: &Ray, surfaces: &SurfaceSet) -> Trace {
        if surfaces.is_empty() {
            warn!("projecting ray onto an empty set of surfaces");
        }
        let mut current = *ray;
        let mut excluded = None;
        let mut segments = Vec::new();
        for bounce in 0..self.max_bounces {
            let search = match self.guard {
                SelfIntersectionGuard::Offset(eps) if bounce > 0 => Ray::new_unchecked(
                    current.start() + current.direction().normalize() * eps,
                    current.direction(),
                ),
                _ => current,
            };
            let Some(index) = Self::nearest_hit(&search, surfaces, excluded, bounce > 0) else {
                return Trace::new(segments, current);
            };
            // the hit point is the same for `search` and `current`, both lie on one line
            let Some(refraction) = surfaces
                .get(index)
                .and_then(|surface| current.refract(surface, self.ambient_index))
            else {
                return Trace::new(segments, current);
            };
            segments.push(refraction.segment);
            if self.guard == SelfIntersectionGuard::ExcludePrevious {
                excluded = Some(index);
            }
            current = refraction.continuation;
        }
        debug!(
            "ray {ray} reached the bounce limit of {}",
            self.max_bounces
        );
        Trace::new(segments, current)
    }
    /// Project a batch of rays in parallel.
    ///
    /// The returned traces have the same order as the given rays.
    #[must_use]
    pub fn project_all(&self, rays: &[Ray], surfaces: &SurfaceSet) -> Vec<Trace> {
        rays.par_iter()
            .map(|ray| self.project(ray, surfaces))
            .collect()
    }
}
