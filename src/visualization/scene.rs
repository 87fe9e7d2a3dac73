//! Mapping from snapshots to renderer-independent drawing primitives.

use serde::{Deserialize, Serialize};

use crate::error::{RelativityError, Result};
use crate::simulation::{BodyKind, Run, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour used for each kind of body.
pub fn kind_colour(kind: BodyKind) -> Rgb {
    match kind {
        BodyKind::Point => Rgb(0, 0, 0),
        BodyKind::Rod => Rgb(31, 119, 180),
        BodyKind::Person => Rgb(44, 160, 44),
        BodyKind::Train => Rgb(127, 127, 127),
        BodyKind::Pulse => Rgb(255, 127, 14),
        BodyKind::LightClock => Rgb(148, 103, 189),
        BodyKind::Signal => Rgb(214, 39, 40),
    }
}

pub const FLASH_COLOUR: Rgb = Rgb(214, 39, 40);

/// Visible window of the plot, in simulation units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotLimits {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self> {
        let limits = Self {
            x_min,
            x_max,
            y_min,
            y_max,
        };
        limits.validate()?;
        Ok(limits)
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.x_min >= self.x_max || self.y_min >= self.y_max {
            return Err(RelativityError::InvalidParameter(format!(
                "plot limits must be finite and increasing, got {self:?}"
            )));
        }
        Ok(())
    }

    /// Smallest window holding everything the run ever shows, padded by `margin`.
    pub fn fit(run: &Run, margin: f64) -> Option<Self> {
        let e = run
            .snapshots
            .iter()
            .filter_map(Snapshot::extent)
            .reduce(|a, b| crate::simulation::Extent {
                min_x: a.min_x.min(b.min_x),
                max_x: a.max_x.max(b.max_x),
                min_y: a.min_y.min(b.min_y),
                max_y: a.max_y.max(b.max_y),
            })?;
        // Keep a degenerate axis (a single point) drawable.
        let margin = margin.max(0.5);
        Some(Self {
            x_min: e.min_x - margin,
            x_max: e.max_x + margin,
            y_min: e.min_y - margin,
            y_max: e.max_y + margin,
        })
    }

    pub fn contains(&self, (x, y): (f64, f64)) -> bool {
        (self.x_min..=self.x_max).contains(&x) && (self.y_min..=self.y_max).contains(&y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Segment {
        from: (f64, f64),
        to: (f64, f64),
        colour: Rgb,
    },
    Marker {
        at: (f64, f64),
        colour: Rgb,
    },
    /// An event that just happened; `fade` runs from 0 (new) to 1 (gone).
    Flash {
        at: (f64, f64),
        label: String,
        fade: f64,
    },
}

/// Drawing primitives for one snapshot. Segments with a missing end are
/// skipped; points not joined to anything become markers.
pub fn primitives(snapshot: &Snapshot, flash_duration: f64) -> Vec<Primitive> {
    let mut out = Vec::new();
    for body in &snapshot.bodies {
        let colour = kind_colour(body.kind);
        out.extend(
            body.visible_segments()
                .map(|(from, to)| Primitive::Segment { from, to, colour }),
        );
        out.extend(body.loose_points().map(|at| Primitive::Marker { at, colour }));
    }
    out.extend(snapshot.flashes.iter().map(|f| Primitive::Flash {
        at: (f.x, f.y),
        label: f.label.clone(),
        fade: (f.age / flash_duration).clamp(0.0, 1.0),
    }));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relativity::{Event, Frame};
    use crate::simulation::{BodySpec, Orientation, Simulation};
    use crate::utils::always;

    #[test]
    fn rod_maps_to_one_segment_and_point_to_marker() {
        let mut sim = Simulation::new();
        sim.add(BodySpec::rod(0.0, 0.0, 2.0, Orientation::Horizontal)).unwrap();
        sim.add(BodySpec::point(1.0, 1.0)).unwrap();
        sim.add_event(Event::new(0.0, 3.0, 0.0), Frame::LAB, "e");
        let prims = primitives(&sim.snapshot(Frame::LAB, 0.25).unwrap(), 0.5);
        assert_eq!(prims.len(), 3);
        assert!(matches!(prims[0], Primitive::Segment { to: (x, _), .. } if x == 2.0));
        assert!(matches!(prims[1], Primitive::Marker { at, .. } if at == (1.0, 1.0)));
        assert!(matches!(prims[2], Primitive::Flash { fade, .. } if (fade - 0.5).abs() < 1e-12));
    }

    #[test]
    fn limits_fit_run_and_reject_inverted_windows() {
        let mut sim = Simulation::new();
        sim.add(BodySpec::point(0.0, 0.0).moving_x(0.5)).unwrap();
        let run = sim.run(Frame::LAB, 1.0, 0.0, 4.0, always).unwrap();
        let limits = PlotLimits::fit(&run, 1.0).unwrap();
        assert_eq!((limits.x_min, limits.x_max), (-1.0, 3.0));
        assert!(limits.contains((2.0, 0.0)));
        assert!(PlotLimits::new(1.0, 0.0, 0.0, 1.0).is_err());
    }
}
