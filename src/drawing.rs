#![warn(missing_docs)]
//! Output interface for traced scenes
//!
//! The tracing core never draws anything itself. Instead, a traced scene is handed to a [`DrawingSink`], which
//! might render it into an image (see [`PlotSink`](crate::plot_sink::PlotSink)) or simply record it.
use crate::{
    error::TraceResult,
    projector::Trace,
    ray::{Ray, Segment},
    surface::{Surface, SurfaceSet},
};

/// Receiver of the geometric primitives of a traced scene.
pub trait DrawingSink {
    /// Draw an optical [`Surface`].
    ///
    /// # Errors
    ///
    /// This function returns an error if the sink fails to draw.
    fn draw_surface(&mut self, surface: &Surface) -> TraceResult<()>;
    /// Draw a bounded [`Segment`] of a ray path.
    ///
    /// # Errors
    ///
    /// This function returns an error if the sink fails to draw.
    fn draw_segment(&mut self, segment: &Segment) -> TraceResult<()>;
    /// Draw an unbounded [`Ray`] up to `display_length` along its direction.
    ///
    /// # Errors
    ///
    /// This function returns an error if the sink fails to draw.
    fn draw_unbounded_ray(&mut self, ray: &Ray, display_length: f64) -> TraceResult<()>;
}

/// Feed a complete traced scene into a [`DrawingSink`].
///
/// The segments and the final ray of each trace are drawn first, followed by all surfaces, so that the surfaces
/// end up on top.
///
/// # Errors
///
/// This function returns the first error reported by the sink.
pub fn draw_scene<S: DrawingSink + ?Sized>(
    sink: &mut S,
    surfaces: &SurfaceSet,
    traces: &[Trace],
    display_length: f64,
) -> TraceResult<()> {
    for trace in traces {
        for segment in trace.segments() {
            sink.draw_segment(segment)?;
        }
        sink.draw_unbounded_ray(&trace.final_ray(), display_length)?;
    }
    for surface in surfaces {
        sink.draw_surface(surface)?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        error::TraceError, projector::RayProjector, surface::Orientation, vector::Vector2,
    };
    use assert_matches::assert_matches;

    #[derive(Debug, PartialEq)]
    enum Primitive {
        Surface,
        Segment,
        Ray(f64),
    }
    #[derive(Default)]
    struct Recorder {
        primitives: Vec<Primitive>,
        fail_on_surface: bool,
    }
    impl DrawingSink for Recorder {
        fn draw_surface(&mut self, _surface: &Surface) -> TraceResult<()> {
            if self.fail_on_surface {
                return Err(TraceError::Render("surface".into()));
            }
            self.primitives.push(Primitive::Surface);
            Ok(())
        }
        fn draw_segment(&mut self, _segment: &Segment) -> TraceResult<()> {
            self.primitives.push(Primitive::Segment);
            Ok(())
        }
        fn draw_unbounded_ray(&mut self, _ray: &Ray, display_length: f64) -> TraceResult<()> {
            self.primitives.push(Primitive::Ray(display_length));
            Ok(())
        }
    }
    fn scene() -> (SurfaceSet, Vec<Trace>) {
        let surfaces = SurfaceSet::from(vec![Surface::new(
            Vector2::new(-10.0, 0.0),
            Vector2::new(10.0, 0.0),
            Orientation::Negative,
            1.5,
        )
        .unwrap()]);
        let rays = vec![
            Ray::new(Vector2::new(0.0, -1.0), Vector2::new(0.0, 1.0)).unwrap(),
            Ray::new(Vector2::new(20.0, -1.0), Vector2::new(0.0, 1.0)).unwrap(),
        ];
        let traces = RayProjector::default().project_all(&rays, &surfaces);
        (surfaces, traces)
    }
    #[test]
    fn draw_order() {
        let (surfaces, traces) = scene();
        let mut recorder = Recorder::default();
        draw_scene(&mut recorder, &surfaces, &traces, 500.0).unwrap();
        assert_eq!(
            recorder.primitives,
            vec![
                Primitive::Segment,
                Primitive::Ray(500.0),
                Primitive::Ray(500.0),
                Primitive::Surface
            ]
        );
    }
    #[test]
    fn sink_error() {
        let (surfaces, traces) = scene();
        let mut recorder = Recorder {
            fail_on_surface: true,
            ..Default::default()
        };
        assert_matches!(
            draw_scene(&mut recorder, &surfaces, &traces, 500.0),
            Err(TraceError::Render(_))
        );
    }
}
