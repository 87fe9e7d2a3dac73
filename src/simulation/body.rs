//! Extended objects built from constituent worldlines.
//!
//! A [`BodySpec`] describes a shape in its own rest frame (proper lengths) and
//! where and how it moves in the frame it is placed in. [`Simulation::add`]
//! turns it into a [`Body`] whose worldlines all share that rest frame, so a
//! later frame change hits every constituent with the same boost.
//!
//! [`Simulation::add`]: super::Simulation::add

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::worldline::Worldline;
use crate::error::{RelativityError, Result};
use crate::relativity::special::check_speed;
use crate::relativity::transforms::{Event, Frame, Velocity, add_velocities, frame_change};

pub type BodyId = usize;

const RING_RESOLUTION: usize = 24;

/// Most light rings one pulse may emit.
pub const MAX_PULSE_RINGS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Point,
    Rod,
    Person,
    Train,
    Pulse,
    LightClock,
    Signal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// One constituent in body-local rest coordinates.
#[derive(Debug, Clone, PartialEq)]
struct LocalPoint {
    offset: (f64, f64),
    /// Delay of this point's anchor after the body's reference time.
    delay: f64,
    velocity: Velocity,
    born: Option<f64>,
    dies: Option<f64>,
}

impl LocalPoint {
    fn fixed(x: f64, y: f64) -> Self {
        Self {
            offset: (x, y),
            delay: 0.0,
            velocity: Velocity::zeros(),
            born: None,
            dies: None,
        }
    }

    fn photon(x: f64, y: f64, delay: f64, direction: Velocity, lifetime: f64) -> Self {
        Self {
            offset: (x, y),
            delay,
            velocity: direction,
            born: Some(0.0),
            dies: Some(lifetime),
        }
    }
}

/// Builder for a body before it is placed in a simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    kind: BodyKind,
    label: Option<String>,
    position: (f64, f64),
    velocity: Velocity,
    frame: Frame,
    start: Option<f64>,
    end: Option<f64>,
    points: Vec<LocalPoint>,
    segments: Vec<(usize, usize)>,
}

impl BodySpec {
    fn new(kind: BodyKind, position: (f64, f64), points: Vec<LocalPoint>) -> Self {
        Self {
            kind,
            label: None,
            position,
            velocity: Velocity::zeros(),
            frame: Frame::LAB,
            start: None,
            end: None,
            points,
            segments: Vec::new(),
        }
    }

    fn joined(mut self, segments: Vec<(usize, usize)>) -> Self {
        self.segments = segments;
        self
    }

    /// Velocity of the body as measured in its placement frame.
    pub fn moving(mut self, velocity: Velocity) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn moving_x(self, vx: f64) -> Self {
        self.moving(Velocity::new(vx, 0.0))
    }

    /// Frame in which `position`, `velocity` and the start and end times are given.
    pub fn in_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// The body does not exist before `t`, and `position` is where it is at `t`.
    pub fn starting_at(mut self, t: f64) -> Self {
        self.start = Some(t);
        self
    }

    /// The body stops existing at time `t` of its placement frame.
    pub fn until(mut self, t: f64) -> Self {
        self.end = Some(t);
        self
    }

    pub fn labelled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// A single point.
    pub fn point(x: f64, y: f64) -> Self {
        Self::new(BodyKind::Point, (x, y), vec![LocalPoint::fixed(0.0, 0.0)])
    }

    /// A rigid rod with one end at `(x, y)`.
    pub fn rod(x: f64, y: f64, length: f64, orientation: Orientation) -> Self {
        let far = match orientation {
            Orientation::Horizontal => LocalPoint::fixed(length, 0.0),
            Orientation::Vertical => LocalPoint::fixed(0.0, length),
        };
        Self::new(BodyKind::Rod, (x, y), vec![LocalPoint::fixed(0.0, 0.0), far]).joined(vec![(0, 1)])
    }

    /// A stick figure of height `size` standing on `(x, y)`.
    pub fn person(x: f64, y: f64, size: f64) -> Self {
        let s = size;
        let mut points = vec![
            LocalPoint::fixed(0.0, 0.3 * s),   // hip
            LocalPoint::fixed(0.0, 0.7 * s),   // neck
            LocalPoint::fixed(-0.15 * s, 0.0), // feet
            LocalPoint::fixed(0.15 * s, 0.0),
            LocalPoint::fixed(-0.2 * s, 0.5 * s), // hands
            LocalPoint::fixed(0.2 * s, 0.5 * s),
        ];
        let mut segments = vec![(0, 1), (0, 2), (0, 3), (1, 4), (1, 5)];
        let head = points.len();
        let r = 0.15 * s;
        for k in 0..8 {
            let a = TAU * k as f64 / 8.0;
            points.push(LocalPoint::fixed(r * a.cos(), 0.85 * s + r * a.sin()));
            segments.push((head + k, head + (k + 1) % 8));
        }
        Self::new(BodyKind::Person, (x, y), points).joined(segments)
    }

    /// A rectangular carriage with its lower-left corner at `(x, y)`.
    pub fn train(x: f64, y: f64, length: f64, height: f64) -> Self {
        let points = vec![
            LocalPoint::fixed(0.0, 0.0),
            LocalPoint::fixed(length, 0.0),
            LocalPoint::fixed(length, height),
            LocalPoint::fixed(0.0, height),
        ];
        Self::new(BodyKind::Train, (x, y), points).joined(vec![(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    /// A light signal leaving `(x, y)` in `direction`, which is normalised.
    pub fn light_signal(x: f64, y: f64, direction: Velocity) -> Result<Self> {
        let norm = direction.norm();
        if !(norm > 0.0) || !norm.is_finite() {
            return Err(RelativityError::InvalidParameter(
                "light signal needs a non-zero direction".to_string(),
            ));
        }
        // Exists from emission onwards with no end of its own.
        let photon = LocalPoint {
            dies: None,
            ..LocalPoint::photon(0.0, 0.0, 0.0, direction / norm, 0.0)
        };
        Ok(Self::new(BodyKind::Signal, (x, y), vec![photon]))
    }

    /// A clock at `(x, y)` that emits an expanding light ring every `period`
    /// (on its own clock) up to `end`. Each ring grows to `max_radius` and
    /// then disappears.
    pub fn pulse(x: f64, y: f64, period: f64, max_radius: f64, end: f64) -> Result<Self> {
        if !(period > 0.0) || !(max_radius > 0.0) {
            return Err(RelativityError::InvalidParameter(format!(
                "pulse needs a positive period and radius, got {period} and {max_radius}"
            )));
        }
        let rings = (end / period + 1e-9).floor();
        if !rings.is_finite() || rings > MAX_PULSE_RINGS as f64 {
            return Err(RelativityError::InvalidParameter(format!(
                "pulse every {period} up to {end} emits more than {MAX_PULSE_RINGS} rings"
            )));
        }
        let mut points = vec![LocalPoint::fixed(0.0, 0.0)];
        let mut segments = Vec::new();
        for ring in 1..=rings.max(0.0) as usize {
            let emission = ring as f64 * period;
            let first = points.len();
            for k in 0..RING_RESOLUTION {
                let a = TAU * k as f64 / RING_RESOLUTION as f64;
                let dir = Velocity::new(a.cos(), a.sin());
                points.push(LocalPoint::photon(0.0, 0.0, emission, dir, max_radius));
                segments.push((first + k, first + (k + 1) % RING_RESOLUTION));
            }
        }
        Ok(Self::new(BodyKind::Pulse, (x, y), points).joined(segments))
    }

    /// Two mirrors `height` apart with a photon bouncing between them for
    /// `ticks` one-way trips. The lower mirror sits at `(x, y)`.
    pub fn light_clock(x: f64, y: f64, height: f64, ticks: usize) -> Result<Self> {
        if !(height > 0.0) {
            return Err(RelativityError::InvalidParameter(format!(
                "light clock height must be positive, got {height}"
            )));
        }
        let w = 0.25 * height;
        let mut points = vec![
            LocalPoint::fixed(-w, 0.0),
            LocalPoint::fixed(w, 0.0),
            LocalPoint::fixed(-w, height),
            LocalPoint::fixed(w, height),
        ];
        for k in 0..ticks {
            let (start_y, dir) = if k % 2 == 0 { (0.0, 1.0) } else { (height, -1.0) };
            points.push(LocalPoint::photon(
                0.0,
                start_y,
                k as f64 * height,
                Velocity::new(0.0, dir),
                height,
            ));
        }
        Ok(Self::new(BodyKind::LightClock, (x, y), points).joined(vec![(0, 1), (2, 3)]))
    }

    /// Places the body: its constituents become worldlines expressed in the
    /// body's rest frame.
    pub(super) fn build(self, id: BodyId) -> Result<Body> {
        check_speed(self.velocity.norm())?;
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err(RelativityError::InvalidParameter(format!(
                    "body ends at {end} before it starts at {start}"
                )));
            }
        }
        let lab_velocity = add_velocities(self.velocity, self.frame.velocity())?;
        let rest = Frame::with_velocity(lab_velocity)?;
        let to_placement = frame_change(rest, self.frame);

        let reference = Event::new(self.start.unwrap_or(0.0), self.position.0, self.position.1);
        let reference = Event::from_vector(frame_change(self.frame, rest) * reference.to_vector());

        let worldlines = self
            .points
            .iter()
            .map(|p| {
                let anchor = Event::new(
                    reference.t + p.delay,
                    reference.x + p.offset.0,
                    reference.y + p.offset.1,
                );
                let line = Worldline::new(anchor, p.velocity)?;
                // Start and end are placement-frame times; λ labels the same
                // events in every frame.
                let placed = line.transformed(&to_placement);
                let born = max_opt(p.born, self.start.map(|t| placed.param_at_time(t)));
                let dies = min_opt(p.dies, self.end.map(|t| placed.param_at_time(t)));
                Ok(line.with_bounds(born, dies))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Body {
            id,
            kind: self.kind,
            label: self.label.unwrap_or_else(|| format!("{:?} {id}", self.kind)),
            frame: rest,
            worldlines,
            segments: self.segments,
        })
    }
}

fn max_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (a, b) => a.or(b),
    }
}

fn min_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// A placed body. Its worldlines are expressed in the coordinates of `frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    kind: BodyKind,
    label: String,
    frame: Frame,
    worldlines: Vec<Worldline>,
    segments: Vec<(usize, usize)>,
}

impl Body {
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn worldlines(&self) -> &[Worldline] {
        &self.worldlines
    }

    pub fn segments(&self) -> &[(usize, usize)] {
        &self.segments
    }

    /// The same body described in `target` coordinates. Every constituent
    /// goes through one shared frame change; `self` is left untouched.
    pub fn viewed_from(&self, target: Frame) -> Body {
        let change = frame_change(self.frame, target);
        Body {
            frame: target,
            worldlines: self.worldlines.iter().map(|w| w.transformed(&change)).collect(),
            label: self.label.clone(),
            segments: self.segments.clone(),
            ..*self
        }
    }

    /// Constituent positions at coordinate time `t` of this body's frame.
    pub fn positions_at(&self, t: f64) -> Vec<Option<(f64, f64)>> {
        self.worldlines.iter().map(|w| w.position_at(t)).collect()
    }
}
