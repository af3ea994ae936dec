//! This is the documentation for the **lenstrace** package, a 2D geometric optics ray tracer.
//!
//! A lens is described by a conic profile, which is sampled into a set of straight, oriented [`Surface`]s. Rays
//! are projected through these surfaces: at each hit, the ray is refracted following Snell's law or totally
//! reflected. The result of each ray is a [`Trace`], the list of travelled segments plus the final unbounded ray.
//!
//! ```
//! use lenstrace::{RayProjector, SceneConfig};
//!
//! let scene = SceneConfig::default();
//! let surfaces = scene.build_lens().unwrap();
//! let traces = RayProjector::new(scene.max_bounces).project_all(&scene.entry_rays().unwrap(), &surfaces);
//! assert_eq!(traces.len(), 13);
//! ```
pub mod console;
pub mod drawing;
pub mod error;
pub mod intersect;
pub mod lens_profile;
pub mod plot_sink;
pub mod projector;
pub mod ray;
pub mod refraction;
pub mod scene;
pub mod surface;
mod utils;
pub mod vector;

pub use drawing::{draw_scene, DrawingSink};
pub use error::{TraceError, TraceResult};
pub use lens_profile::{ConicProfile, LensProfileBuilder};
pub use plot_sink::{render_to_file, PlotSink, RenderOptions};
pub use projector::{RayProjector, SelfIntersectionGuard, Trace};
pub use ray::{Ray, Segment};
pub use refraction::{refract, Interaction, Refraction, AIR_INDEX};
pub use scene::SceneConfig;
pub use surface::{Orientation, Surface, SurfaceSet};
pub use vector::Vector2;
