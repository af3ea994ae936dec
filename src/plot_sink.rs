#![warn(missing_docs)]
//! Rendering of traced scenes with `plotters`
//!
//! [`PlotSink`] implements [`DrawingSink`] on top of a plotters [`DrawingArea`]. World coordinates are mapped to
//! pixels with a fixed scale and the world origin in the center of the image, y pointing upwards.
use std::path::Path;

use plotters::{
    coord::Shift,
    element::{Circle, PathElement},
    prelude::{BitMapBackend, DrawingArea, DrawingBackend, IntoDrawingArea, SVGBackend},
    style::{Color, RGBColor, ShapeStyle, BLACK, RED, WHITE},
};
use serde::{Deserialize, Serialize};

use crate::{
    drawing::{draw_scene, DrawingSink},
    error::{TraceError, TraceResult},
    projector::Trace,
    ray::{Ray, Segment},
    surface::{Surface, SurfaceSet},
    vector::Vector2,
};

const GRID_COLOR: RGBColor = RGBColor(230, 204, 230);
/// radius of the end point markers of segments in pixels
const MARKER_RADIUS: i32 = 5;

/// Image settings of a rendered scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// image width in pixels
    pub width: u32,
    /// image height in pixels
    pub height: u32,
    /// pixels per world unit
    pub scale: f64,
    /// distance of the grid marks in world units
    pub grid_gap: f64,
    /// half size of a grid mark in pixels
    pub grid_size: u32,
}
impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 2048,
            scale: 16.0,
            grid_gap: 2.0,
            grid_size: 8,
        }
    }
}
impl RenderOptions {
    /// Checks the options for consistency.
    ///
    /// # Errors
    ///
    /// This function returns an error if
    ///  - the image is empty
    ///  - the scale or the grid gap is <= 0.0 or not finite
    pub fn validate(&self) -> TraceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TraceError::Render("image size must be >0".into()));
        }
        if self.scale <= 0.0 || !self.scale.is_finite() {
            return Err(TraceError::Render("scale must be >0.0 and finite".into()));
        }
        if self.grid_gap <= 0.0 || !self.grid_gap.is_finite() {
            return Err(TraceError::Render(
                "grid gap must be >0.0 and finite".into(),
            ));
        }
        Ok(())
    }
    /// Maps a world point to pixel coordinates.
    #[must_use]
    pub fn to_pixel(&self, point: Vector2) -> (i32, i32) {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let px = point.x.mul_add(self.scale, w / 2.0);
        let py = h - point.y.mul_add(self.scale, h / 2.0);
        #[allow(clippy::cast_possible_truncation)]
        (px.round() as i32, py.round() as i32)
    }
    /// Stroke width in pixels for the given fraction of the scale.
    fn stroke_width(&self, divisor: f64) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let width = (self.scale / divisor).round().max(1.0) as u32;
        width
    }
}

fn render_error<E: std::fmt::Display>(e: E) -> TraceError {
    TraceError::Render(e.to_string())
}

/// A [`DrawingSink`] drawing onto a plotters [`DrawingArea`].
pub struct PlotSink<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
    options: RenderOptions,
}
impl<'a, DB: DrawingBackend> PlotSink<'a, DB> {
    /// Creates a new [`PlotSink`].
    #[must_use]
    pub const fn new(area: &'a DrawingArea<DB, Shift>, options: RenderOptions) -> Self {
        Self { area, options }
    }
    /// Returns the [`RenderOptions`] of this [`PlotSink`].
    #[must_use]
    pub const fn options(&self) -> &RenderOptions {
        &self.options
    }
    /// Fills the area white and draws a grid of "+" marks.
    ///
    /// # Errors
    ///
    /// This function returns an error if the backend fails.
    pub fn draw_background(&self) -> TraceResult<()> {
        self.area.fill(&WHITE).map_err(render_error)?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let gap = (self.options.grid_gap * self.options.scale).round() as usize;
        if gap == 0 {
            return Ok(());
        }
        let style = GRID_COLOR.stroke_width(1);
        let size = i32::try_from(self.options.grid_size).map_err(render_error)?;
        let width = i32::try_from(self.options.width).map_err(render_error)?;
        let height = i32::try_from(self.options.height).map_err(render_error)?;
        for x in (0..width).step_by(gap).skip(1) {
            for y in (0..height).step_by(gap).skip(1) {
                self.area
                    .draw(&PathElement::new(vec![(x - size, y), (x + size, y)], style))
                    .map_err(render_error)?;
                self.area
                    .draw(&PathElement::new(vec![(x, y - size), (x, y + size)], style))
                    .map_err(render_error)?;
            }
        }
        Ok(())
    }
    fn draw_line(&self, from: Vector2, to: Vector2, style: ShapeStyle) -> TraceResult<()> {
        self.area
            .draw(&PathElement::new(
                vec![self.options.to_pixel(from), self.options.to_pixel(to)],
                style,
            ))
            .map_err(render_error)
    }
}
impl<DB: DrawingBackend> DrawingSink for PlotSink<'_, DB> {
    fn draw_surface(&mut self, surface: &Surface) -> TraceResult<()> {
        let style = BLACK.stroke_width(self.options.stroke_width(6.0));
        self.draw_line(surface.start(), surface.end(), style)
    }
    fn draw_segment(&mut self, segment: &Segment) -> TraceResult<()> {
        let style = RED.stroke_width(self.options.stroke_width(4.0));
        self.draw_line(segment.start(), segment.end(), style)?;
        for point in [segment.start(), segment.end()] {
            self.area
                .draw(&Circle::new(
                    self.options.to_pixel(point),
                    MARKER_RADIUS,
                    style,
                ))
                .map_err(render_error)?;
        }
        Ok(())
    }
    fn draw_unbounded_ray(&mut self, ray: &Ray, display_length: f64) -> TraceResult<()> {
        let style = RED.stroke_width(self.options.stroke_width(4.0));
        let shown = ray.truncated(display_length);
        self.draw_line(shown.start(), shown.end(), style)
    }
}

fn render<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    options: &RenderOptions,
    surfaces: &SurfaceSet,
    traces: &[Trace],
    display_length: f64,
) -> TraceResult<()> {
    let mut sink = PlotSink::new(area, options.clone());
    sink.draw_background()?;
    draw_scene(&mut sink, surfaces, traces, display_length)?;
    area.present().map_err(render_error)
}

/// Renders a traced scene into an image file.
///
/// The backend is chosen by the file extension: `png` uses a bitmap, `svg` a vector graphics backend.
///
/// # Errors
///
/// This function returns an error if
///  - the options are invalid
///  - the file extension is not supported
///  - drawing or writing the file fails
pub fn render_to_file(
    path: &Path,
    options: &RenderOptions,
    surfaces: &SurfaceSet,
    traces: &[Trace],
    display_length: f64,
) -> TraceResult<()> {
    options.validate()?;
    let size = (options.width, options.height);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => {
            let area = BitMapBackend::new(path, size).into_drawing_area();
            render(&area, options, surfaces, traces, display_length)
        }
        Some("svg") => {
            let area = SVGBackend::new(path, size).into_drawing_area();
            render(&area, options, surfaces, traces, display_length)
        }
        _ => Err(TraceError::Render(format!(
            "unsupported image file {}: choose \".png\" or \".svg\"",
            path.display()
        ))),
    }
}
