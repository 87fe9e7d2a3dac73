//! Spacetime (x, t) diagrams of a simulation as seen from one frame.

use std::path::Path;

use nalgebra::Vector3;
use plotters::prelude::*;
use tracing::info;

use super::animation::rgb;
use super::scene::{FLASH_COLOUR, kind_colour};
use crate::config::RenderConfig;
use crate::error::{RelativityError, Result};
use crate::relativity::transforms::frame_change;
use crate::relativity::{Event, Frame};
use crate::simulation::{BodyKind, Simulation};

/// The visible part of one constituent worldline, as (x, t) endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldlinePath {
    pub label: String,
    pub kind: BodyKind,
    pub from: (f64, f64),
    pub to: (f64, f64),
}

/// Clips every worldline of `sim`, seen from `frame`, to `[t_start, t_end]`.
pub fn worldline_paths(sim: &Simulation, frame: Frame, t_start: f64, t_end: f64) -> Vec<WorldlinePath> {
    let mut paths = Vec::new();
    for body in sim.viewed_from(frame) {
        for line in body.worldlines() {
            let (born, dies) = line.time_span();
            let lo = born.map_or(t_start, |b| b.max(t_start));
            let hi = dies.map_or(t_end, |d| d.min(t_end));
            if lo > hi {
                continue;
            }
            let at = |t: f64| line.event_at(line.param_at_time(t));
            let (a, b) = (at(lo), at(hi));
            paths.push(WorldlinePath {
                label: body.label().to_string(),
                kind: body.kind(),
                from: (a.x, a.t),
                to: (b.x, b.t),
            });
        }
    }
    paths
}

/// Time and space axes of `other` drawn in `observer` coordinates, each as a
/// pair of (x, t) points `reach` units either side of the shared origin.
pub fn frame_axes(observer: Frame, other: Frame, reach: f64) -> [((f64, f64), (f64, f64)); 2] {
    let change = frame_change(other, observer);
    let point = |v: Vector3<f64>| {
        let e = Event::from_vector(change * v);
        (e.x, e.t)
    };
    let time_axis = (point(Vector3::new(-reach, 0.0, 0.0)), point(Vector3::new(reach, 0.0, 0.0)));
    let space_axis = (point(Vector3::new(0.0, -reach, 0.0)), point(Vector3::new(0.0, reach, 0.0)));
    [time_axis, space_axis]
}

/// A Minkowski diagram: x across, observer time up.
pub struct MinkowskiDiagram {
    title: String,
    frame: Frame,
    x_range: (f64, f64),
    t_range: (f64, f64),
    compare: Option<Frame>,
}

impl MinkowskiDiagram {
    pub fn new(
        title: impl Into<String>,
        frame: Frame,
        x_range: (f64, f64),
        t_range: (f64, f64),
    ) -> Result<Self> {
        if !(x_range.0 < x_range.1) || !(t_range.0 < t_range.1) {
            return Err(RelativityError::InvalidParameter(format!(
                "diagram ranges must be increasing, got x {x_range:?} t {t_range:?}"
            )));
        }
        Ok(Self {
            title: title.into(),
            frame,
            x_range,
            t_range,
            compare: None,
        })
    }

    /// Also draw the t' and x' axes of `other`.
    pub fn comparing_with(mut self, other: Frame) -> Self {
        self.compare = Some(other);
        self
    }

    pub fn save_png(&self, sim: &Simulation, path: &Path, config: &RenderConfig) -> anyhow::Result<()> {
        let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let (x0, x1) = self.x_range;
        let (t0, t1) = self.t_range;
        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", 22))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(x0..x1, t0..t1)?;
        chart.configure_mesh().x_desc("x").y_desc("t").draw()?;

        // Light cone through the origin.
        let reach = (x1 - x0).abs().max((t1 - t0).abs()) * 2.0;
        let cone = RGBColor(240, 200, 0).stroke_width(1);
        chart.draw_series(LineSeries::new(vec![(-reach, -reach), (reach, reach)], cone))?;
        chart.draw_series(LineSeries::new(vec![(reach, -reach), (-reach, reach)], cone))?;

        if let Some(other) = self.compare {
            let axis = RGBColor(90, 90, 90).stroke_width(1);
            for (a, b) in frame_axes(self.frame, other, reach) {
                chart.draw_series(LineSeries::new(vec![a, b], axis))?;
            }
        }

        for path in worldline_paths(sim, self.frame, t0, t1) {
            let style = rgb(kind_colour(path.kind)).stroke_width(2);
            chart.draw_series(LineSeries::new(vec![path.from, path.to], style))?;
        }

        let events = sim.events_in(self.frame)?;
        let marker = rgb(FLASH_COLOUR).filled();
        chart.draw_series(events.iter().map(|e| Circle::new((e.x, e.t), 5, marker)))?;

        root.present()?;
        info!(path = %path.display(), "minkowski diagram saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::BodySpec;

    #[test]
    fn paths_are_clipped_to_time_range() {
        let mut sim = Simulation::new();
        sim.add(BodySpec::point(0.0, 0.0).moving_x(0.5).starting_at(1.0)).unwrap();
        let paths = worldline_paths(&sim, Frame::LAB, 0.0, 5.0);
        assert_eq!(paths.len(), 1);
        assert!(paths[0].from.0.abs() < 1e-12);
        assert!((paths[0].from.1 - 1.0).abs() < 1e-12);
        assert!((paths[0].to.0 - 2.0).abs() < 1e-12);
        assert!((paths[0].to.1 - 5.0).abs() < 1e-12);
        assert!(worldline_paths(&sim, Frame::LAB, -3.0, 0.5).is_empty());
    }

    #[test]
    fn moving_frame_axes_tilt_symmetrically() {
        let v = 0.5;
        let [time_axis, space_axis] = frame_axes(Frame::LAB, Frame::moving_x(v).unwrap(), 1.0);
        let (a, b) = time_axis;
        assert!(((b.0 - a.0) / (b.1 - a.1) - v).abs() < 1e-12);
        let (a, b) = space_axis;
        assert!(((b.1 - a.1) / (b.0 - a.0) - v).abs() < 1e-12);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        assert!(MinkowskiDiagram::new("x", Frame::LAB, (1.0, 0.0), (0.0, 1.0)).is_err());
    }
}
