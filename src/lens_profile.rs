#![warn(missing_docs)]
//! Sampling of a rotationally symmetric conic lens profile into a [`SurfaceSet`]
//!
//! The half profile of the lens is given by its sag function. It is sampled with a fixed step and mirrored at both
//! axes, so that each pair of consecutive samples yields four straight [`Surface`]s: upper right, upper left, lower
//! right and lower left. The interior of the closed polyline is the medium of the lens.
use itertools::Itertools;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{TraceError, TraceResult},
    surface::{Orientation, Surface, SurfaceSet},
    vector::Vector2,
};

/// Maximum number of profile samples.
const MAX_SAMPLES: usize = 1_000_000;

/// Conic sag function `k + c r² / (1 + sqrt(1 - (K+1) c² r²))`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConicProfile {
    /// curvature `c` (inverse radius of curvature)
    pub curvature: f64,
    /// sag offset `k` at the center of the lens
    pub offset: f64,
    /// conic constant `K`
    pub conic_constant: f64,
}
impl ConicProfile {
    /// Creates a new [`ConicProfile`].
    #[must_use]
    pub const fn new(curvature: f64, offset: f64, conic_constant: f64) -> Self {
        Self {
            curvature,
            offset,
            conic_constant,
        }
    }
    /// Returns the sag at the radial distance `r`.
    ///
    /// Returns `None` beyond the edge of the conic, where the radicand becomes negative.
    #[must_use]
    pub fn sag(&self, r: f64) -> Option<f64> {
        let c = self.curvature;
        let c_r2 = c * r * r;
        let radicand = ((self.conic_constant + 1.0) * c).mul_add(-c_r2, 1.0);
        if radicand < 0.0 {
            return None;
        }
        Some(self.offset + c_r2 / (1.0 + radicand.sqrt()))
    }
}

/// Builder for a lens made of straight [`Surface`]s following a [`ConicProfile`].
#[derive(Debug, Clone, PartialEq)]
pub struct LensProfileBuilder {
    profile: ConicProfile,
    resolution: f64,
    scale: (f64, f64),
    translation: (f64, f64),
    refractive_index: f64,
}
impl LensProfileBuilder {
    /// Creates a new [`LensProfileBuilder`] for the given profile.
    ///
    /// Defaults: resolution 0.05, scale (1, 1), no translation, refractive index 1.5.
    #[must_use]
    pub const fn new(profile: ConicProfile) -> Self {
        Self {
            profile,
            resolution: 0.05,
            scale: (1.0, 1.0),
            translation: (0.0, 0.0),
            refractive_index: 1.5,
        }
    }
    /// Sets the radial sampling step.
    ///
    /// # Errors
    ///
    /// This function returns an error if the resolution is <= 0.0 or not finite.
    pub fn with_resolution(mut self, resolution: f64) -> TraceResult<Self> {
        if resolution <= 0.0 || !resolution.is_finite() {
            return Err(TraceError::Profile(
                "resolution must be >0.0 and finite".into(),
            ));
        }
        self.resolution = resolution;
        Ok(self)
    }
    /// Sets the scaling of the radial (`sx`) and sag (`sy`) coordinate.
    ///
    /// Negative factors mirror the lens. The orientations of the built surfaces are adjusted, so that the medium
    /// stays inside the lens.
    ///
    /// # Errors
    ///
    /// This function returns an error if one of the factors is zero or not finite.
    pub fn with_scale(mut self, sx: f64, sy: f64) -> TraceResult<Self> {
        if sx == 0.0 || sy == 0.0 || !sx.is_finite() || !sy.is_finite() {
            return Err(TraceError::Profile(
                "scale factors must be !=0.0 and finite".into(),
            ));
        }
        self.scale = (sx, sy);
        Ok(self)
    }
    /// Sets the translation applied after scaling.
    ///
    /// # Errors
    ///
    /// This function returns an error if the translation is not finite.
    pub fn with_translation(mut self, tx: f64, ty: f64) -> TraceResult<Self> {
        if !tx.is_finite() || !ty.is_finite() {
            return Err(TraceError::Profile("translation must be finite".into()));
        }
        self.translation = (tx, ty);
        Ok(self)
    }
    /// Sets the refractive index of the lens material.
    ///
    /// # Errors
    ///
    /// This function returns an error if the index is <= 0.0 or not finite.
    pub fn with_refractive_index(mut self, refractive_index: f64) -> TraceResult<Self> {
        if refractive_index <= 0.0 || !refractive_index.is_finite() {
            return Err(TraceError::Profile(
                "refractive index must be >0.0 and finite".into(),
            ));
        }
        self.refractive_index = refractive_index;
        Ok(self)
    }
    /// Returns the profile of this [`LensProfileBuilder`].
    #[must_use]
    pub const fn profile(&self) -> ConicProfile {
        self.profile
    }
    /// Samples the profile at `r_i = i * resolution` while the sag is defined and positive.
    fn samples(&self) -> TraceResult<Vec<(f64, f64)>> {
        let mut samples = Vec::new();
        for i in 0..=MAX_SAMPLES {
            #[allow(clippy::cast_precision_loss)]
            let r = i as f64 * self.resolution;
            match self.profile.sag(r) {
                Some(sag) if sag > 0.0 => samples.push((r, sag)),
                _ => return Ok(samples),
            }
        }
        Err(TraceError::Profile(format!(
            "profile sag still positive after {MAX_SAMPLES} samples"
        )))
    }
    /// Builds the lens.
    ///
    /// For each pair of consecutive samples `(r0, s0)`, `(r1, s1)` four surfaces are emitted in the order upper
    /// right, upper left, lower right, lower left of the unscaled profile. Each point `(±r, ±s)` is then scaled and
    /// translated. The orientations put the medium on the inside of the lens.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the profile does not leave its positive range within the maximum number of samples
    ///  - a surface cannot be constructed
    pub fn build(&self) -> TraceResult<SurfaceSet> {
        let samples = self.samples()?;
        let (sx, sy) = self.scale;
        let (tx, ty) = self.translation;
        let n = self.refractive_index;
        // a mirroring scale reverses the side of every line
        let mirrored = sx.is_sign_negative() != sy.is_sign_negative();
        let mut surfaces = SurfaceSet::new();
        for ((r0, s0), (r1, s1)) in samples.iter().copied().tuple_windows() {
            let pieces = [
                (r0, s0, r1, s1, Orientation::Positive),
                (-r0, s0, -r1, s1, Orientation::Negative),
                (r0, -s0, r1, -s1, Orientation::Negative),
                (-r0, -s0, -r1, -s1, Orientation::Positive),
            ];
            for (rs, ss, re, se, orientation) in pieces {
                surfaces.add_surface(Surface::new(
                    Vector2::new(rs.mul_add(sx, tx), ss.mul_add(sy, ty)),
                    Vector2::new(re.mul_add(sx, tx), se.mul_add(sy, ty)),
                    if mirrored {
                        orientation.flipped()
                    } else {
                        orientation
                    },
                    n,
                )?);
            }
        }
        if surfaces.is_empty() {
            warn!("lens profile produced no surfaces");
        } else if let Some((r, _)) = samples.last() {
            debug!(
                "lens profile sampled into {} surfaces, aperture radius {}",
                surfaces.len(),
                (r * sx).abs()
            );
        }
        Ok(surfaces)
    }
}
