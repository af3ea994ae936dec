#![warn(missing_docs)]
//! Scene description: lens, entry rays, tracing and rendering settings
//!
//! A [`SceneConfig`] can be read from and written to `.yaml` / `.yml` or `.json` files. Missing fields are taken
//! from the default scene, a meniscus-like lens hit by a fan of 13 parallel rays.
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    error::{TraceError, TraceResult},
    lens_profile::{ConicProfile, LensProfileBuilder},
    plot_sink::RenderOptions,
    projector::{RayProjector, SelfIntersectionGuard},
    ray::Ray,
    surface::SurfaceSet,
    vector::Vector2,
};

/// Lens parameters. See [`LensProfileBuilder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    /// radial sampling step
    pub resolution: f64,
    /// scaling of the radial (x) and the sag (y) coordinate
    pub scale: Vector2,
    /// translation applied after scaling
    pub translation: Vector2,
    /// refractive index of the lens material
    pub refractive_index: f64,
    /// curvature `c` of the conic
    pub curvature: f64,
    /// sag offset `k` at the lens center
    pub offset: f64,
    /// conic constant `K`
    pub conic_constant: f64,
}
impl Default for LensConfig {
    fn default() -> Self {
        Self {
            resolution: 0.05,
            scale: Vector2::new(4.0, 1.0),
            translation: Vector2::new(0.0, -40.0),
            refractive_index: 4.4,
            curvature: -0.04,
            offset: 8.2,
            conic_constant: 1.9,
        }
    }
}
impl LensConfig {
    /// Returns the [`ConicProfile`] of this lens.
    #[must_use]
    pub const fn profile(&self) -> ConicProfile {
        ConicProfile::new(self.curvature, self.offset, self.conic_constant)
    }
    /// Returns a [`LensProfileBuilder`] configured with these parameters.
    ///
    /// # Errors
    ///
    /// This function returns an error if one of the parameters is invalid.
    pub fn builder(&self) -> TraceResult<LensProfileBuilder> {
        LensProfileBuilder::new(self.profile())
            .with_resolution(self.resolution)?
            .with_scale(self.scale.x, self.scale.y)?
            .with_translation(self.translation.x, self.translation.y)?
            .with_refractive_index(self.refractive_index)
    }
}

/// Maximum number of rays of a [`RayFan`].
const MAX_FAN_RAYS: usize = 100_000;

/// A fan of parallel entry rays starting on a horizontal line.
///
/// Rays start at `(x, y)` for `x = start, start + step, ...` up to and including `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayFan {
    /// x coordinate of the first ray
    pub start: f64,
    /// x coordinate of the last ray
    pub end: f64,
    /// distance between two rays
    pub step: f64,
    /// y coordinate of all ray starts
    pub y: f64,
    /// common direction of all rays
    pub direction: Vector2,
}
impl Default for RayFan {
    fn default() -> Self {
        Self {
            start: -30.0,
            end: 30.0,
            step: 5.0,
            y: -100.0,
            direction: Vector2::new(0.0, 1.0),
        }
    }
}
impl RayFan {
    /// Returns the rays of this fan.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the step is <= 0.0 or not finite
    ///  - `end` is smaller than `start` or one of them is not finite
    ///  - the fan would contain more than 100 000 rays
    ///  - a ray cannot be constructed (e.g. zero direction)
    pub fn rays(&self) -> TraceResult<Vec<Ray>> {
        if self.step <= 0.0 || !self.step.is_finite() {
            return Err(TraceError::Scene(
                "ray fan step must be >0.0 and finite".into(),
            ));
        }
        if !self.start.is_finite() || !self.end.is_finite() || self.end < self.start {
            return Err(TraceError::Scene(
                "ray fan range must be finite and end >= start".into(),
            ));
        }
        let steps = ((self.end - self.start) / self.step + 1e-9).floor();
        #[allow(clippy::cast_precision_loss)]
        let max_steps = MAX_FAN_RAYS as f64;
        if steps >= max_steps {
            return Err(TraceError::Scene(format!(
                "ray fan exceeds {MAX_FAN_RAYS} rays"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = steps as usize;
        (0..=steps)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let x = (i as f64).mul_add(self.step, self.start);
                Ray::new(Vector2::new(x, self.y), self.direction)
            })
            .collect()
    }
}

/// Complete description of a scene to be traced and rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// lens parameters
    pub lens: LensConfig,
    /// entry rays
    pub rays: RayFan,
    /// maximum number of surface interactions per ray
    pub max_bounces: usize,
    /// self intersection strategy of the projector
    pub guard: SelfIntersectionGuard,
    /// length of the drawn final rays in world units
    pub display_length: f64,
    /// image settings
    pub render: RenderOptions,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            lens: LensConfig::default(),
            rays: RayFan::default(),
            max_bounces: 32,
            guard: SelfIntersectionGuard::default(),
            display_length: 500.0,
            render: RenderOptions::default(),
        }
    }
}

/// Supported scene file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SceneFormat {
    Yaml,
    Json,
}
impl SceneFormat {
    fn from_path(path: &Path) -> TraceResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(TraceError::Scene(format!(
                "unsupported scene file {}: choose \".yaml\", \".yml\" or \".json\"",
                path.display()
            ))),
        }
    }
}

impl SceneConfig {
    /// Read a [`SceneConfig`] from a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the file extension is not supported
    ///   - the given path is not found or readable
    ///   - the parsing / deserialization of the file failed
    ///   - the scene is invalid (see [`SceneConfig::validate`])
    pub fn from_file(path: &Path) -> TraceResult<Self> {
        let format = SceneFormat::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|e| {
            TraceError::Scene(format!("cannot read file {} : {}", path.display(), e))
        })?;
        let scene = match format {
            SceneFormat::Yaml => Self::from_yaml(&contents)?,
            SceneFormat::Json => Self::from_json(&contents)?,
        };
        info!("loaded scene from {}", path.display());
        Ok(scene)
    }
    /// Create a [`SceneConfig`] from a YAML string.
    ///
    /// # Errors
    ///
    /// This function will return an error if parsing fails or the scene is invalid.
    pub fn from_yaml(yaml: &str) -> TraceResult<Self> {
        let scene: Self = serde_yaml::from_str(yaml)
            .map_err(|e| TraceError::Scene(format!("parsing of scene failed: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }
    /// Create a [`SceneConfig`] from a JSON string.
    ///
    /// # Errors
    ///
    /// This function will return an error if parsing fails or the scene is invalid.
    pub fn from_json(json: &str) -> TraceResult<Self> {
        let scene: Self = serde_json::from_str(json)
            .map_err(|e| TraceError::Scene(format!("parsing of scene failed: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }
    /// Save this [`SceneConfig`] to a `.yaml`, `.yml` or `.json` file.
    ///
    /// # Errors
    ///
    /// This function will return an error if
    ///   - the file extension is not supported
    ///   - the serialization failed
    ///   - the file cannot be created or written
    pub fn save_to_file(&self, path: &Path) -> TraceResult<()> {
        let serialized = match SceneFormat::from_path(path)? {
            SceneFormat::Yaml => serde_yaml::to_string(self)
                .map_err(|e| TraceError::Scene(format!("serialization of scene failed: {e}")))?,
            SceneFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| TraceError::Scene(format!("serialization of scene failed: {e}")))?,
        };
        let mut output = File::create(path).map_err(|e| {
            TraceError::Scene(format!(
                "could not create file path: {}: {}",
                path.display(),
                e
            ))
        })?;
        write!(output, "{serialized}").map_err(|e| {
            TraceError::Scene(format!(
                "writing to file path {} failed: {}",
                path.display(),
                e
            ))
        })?;
        info!("scene saved to {}", path.display());
        Ok(())
    }
    /// Checks all scene parameters.
    ///
    /// # Errors
    ///
    /// This function returns an error if the lens, the ray fan, the projector or the render options are invalid or
    /// the display length is <= 0.0 or not finite.
    pub fn validate(&self) -> TraceResult<()> {
        self.lens.builder()?;
        self.rays.rays()?;
        self.projector()?;
        if self.display_length <= 0.0 || !self.display_length.is_finite() {
            return Err(TraceError::Scene(
                "display length must be >0.0 and finite".into(),
            ));
        }
        self.render.validate()
    }
    /// Samples the lens into a [`SurfaceSet`].
    ///
    /// # Errors
    ///
    /// This function returns an error if the lens parameters are invalid.
    pub fn build_lens(&self) -> TraceResult<SurfaceSet> {
        self.lens.builder()?.build()
    }
    /// Returns the entry rays of the scene.
    ///
    /// # Errors
    ///
    /// This function returns an error if the ray fan is invalid.
    pub fn entry_rays(&self) -> TraceResult<Vec<Ray>> {
        self.rays.rays()
    }
    /// Returns a [`RayProjector`] with the bounce limit and guard of this scene.
    ///
    /// # Errors
    ///
    /// This function returns an error if the guard is invalid.
    pub fn projector(&self) -> TraceResult<RayProjector> {
        RayProjector::new(self.max_bounces).with_guard(self.guard)
    }
}
