//! Events, bodies and observer-frame runs.

pub mod body;
pub mod snapshot;
pub mod worldline;

use tracing::debug;

pub use body::{Body, BodyId, BodyKind, BodySpec, Orientation};
pub use snapshot::{BodyView, Extent, FlashView, Snapshot};
pub use worldline::Worldline;

use crate::error::{RelativityError, Result};
use crate::relativity::{Event, Frame};

const DEFAULT_FLASH_DURATION: f64 = 0.5;

/// Most samples a single run may take.
pub const MAX_RUN_STEPS: usize = 1_000_000;

/// An instantaneous event to highlight, with the frame its coordinates are in.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkedEvent {
    pub event: Event,
    pub frame: Frame,
    pub label: String,
}

impl MarkedEvent {
    pub fn in_frame(&self, observer: Frame) -> Result<Event> {
        self.event.viewed_from(self.frame, observer)
    }
}

/// Output of [`Simulation::run`]: sampled observer times and what was visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub frame: Frame,
    pub times: Vec<f64>,
    pub snapshots: Vec<Snapshot>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

/// A collection of bodies and events that can be watched from any frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    bodies: Vec<Body>,
    events: Vec<MarkedEvent>,
    flash_duration: f64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            events: Vec::new(),
            flash_duration: DEFAULT_FLASH_DURATION,
        }
    }

    /// How long, in observer time, an event stays on screen after it happens.
    pub fn with_flash_duration(mut self, duration: f64) -> Result<Self> {
        if !(duration > 0.0) {
            return Err(RelativityError::InvalidParameter(format!(
                "flash duration must be positive, got {duration}"
            )));
        }
        self.flash_duration = duration;
        Ok(self)
    }

    pub fn add(&mut self, spec: BodySpec) -> Result<BodyId> {
        let id = self.bodies.len();
        let body = spec.build(id)?;
        debug!(id, kind = ?body.kind(), label = body.label(), "added body");
        self.bodies.push(body);
        Ok(id)
    }

    pub fn add_event(&mut self, event: Event, frame: Frame, label: impl Into<String>) -> usize {
        self.events.push(MarkedEvent {
            event,
            frame,
            label: label.into(),
        });
        self.events.len() - 1
    }

    /// How long a marked event stays on screen after it happens.
    pub fn flash_duration(&self) -> f64 {
        self.flash_duration
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    /// Time elapsed on a clock carried by the body's first constituent, for
    /// bodies with both a start and an end.
    pub fn proper_time(&self, id: BodyId) -> Option<f64> {
        self.body(id)?.worldlines().first()?.proper_time()
    }

    pub fn events(&self) -> &[MarkedEvent] {
        &self.events
    }

    /// Coordinates of every marked event in `observer`.
    pub fn events_in(&self, observer: Frame) -> Result<Vec<Event>> {
        self.events.iter().map(|e| e.in_frame(observer)).collect()
    }

    /// Every body re-expressed in `observer` coordinates.
    pub fn viewed_from(&self, observer: Frame) -> Vec<Body> {
        self.bodies.iter().map(|b| b.viewed_from(observer)).collect()
    }

    pub fn snapshot(&self, observer: Frame, t: f64) -> Result<Snapshot> {
        let bodies = self.viewed_from(observer);
        let events = self.events_in(observer)?;
        Ok(self.sample(&bodies, &events, observer, t))
    }

    fn sample(&self, bodies: &[Body], events: &[Event], observer: Frame, t: f64) -> Snapshot {
        let bodies = bodies
            .iter()
            .map(|b| BodyView {
                id: b.id(),
                kind: b.kind(),
                label: b.label().to_string(),
                points: b.positions_at(t),
                segments: b.segments().to_vec(),
            })
            .collect();
        let flashes = self
            .events
            .iter()
            .zip(events)
            .filter_map(|(marked, e)| {
                let age = t - e.t;
                (age >= -1e-9 && age < self.flash_duration).then(|| FlashView {
                    label: marked.label.clone(),
                    x: e.x,
                    y: e.y,
                    age: age.max(0.0),
                })
            })
            .collect();
        Snapshot {
            time: t,
            frame: observer,
            bodies,
            flashes,
        }
    }

    /// Samples the simulation from `observer` every `dt` over
    /// `[t_start, t_end]`. Stops early, after recording the snapshot, once
    /// `keep_going` returns false.
    pub fn run<F>(
        &self,
        observer: Frame,
        dt: f64,
        t_start: f64,
        t_end: f64,
        mut keep_going: F,
    ) -> Result<Run>
    where
        F: FnMut(&Snapshot) -> bool,
    {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(RelativityError::InvalidParameter(format!(
                "time step must be positive, got {dt}"
            )));
        }
        if !t_start.is_finite() || !t_end.is_finite() || t_end < t_start {
            return Err(RelativityError::InvalidParameter(format!(
                "empty time range [{t_start}, {t_end}]"
            )));
        }

        let bodies = self.viewed_from(observer);
        let events = self.events_in(observer)?;
        let intervals = ((t_end - t_start) / dt + 1e-9).floor();
        if !intervals.is_finite() || intervals >= MAX_RUN_STEPS as f64 {
            return Err(RelativityError::InvalidParameter(format!(
                "step {dt} over [{t_start}, {t_end}] needs more than {MAX_RUN_STEPS} samples"
            )));
        }
        let steps = intervals as usize + 1;
        debug!(steps, dt, t_start, t_end, velocity = ?observer.velocity(), "running simulation");

        let mut run = Run {
            frame: observer,
            times: Vec::with_capacity(steps),
            snapshots: Vec::with_capacity(steps),
        };
        for i in 0..steps {
            // Multiply instead of accumulating so long runs do not drift.
            let t = t_start + i as f64 * dt;
            let snapshot = self.sample(&bodies, &events, observer, t);
            let proceed = keep_going(&snapshot);
            run.times.push(t);
            run.snapshots.push(snapshot);
            if !proceed {
                break;
            }
        }
        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::always;

    #[test]
    fn run_samples_inclusive_range() {
        let mut sim = Simulation::new();
        sim.add(BodySpec::point(0.0, 1.0)).unwrap();
        let run = sim.run(Frame::LAB, 0.1, 0.0, 1.0, always).unwrap();
        assert_eq!(run.len(), 11);
        assert_eq!(run.times.len(), run.snapshots.len());
        assert!((run.times[10] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn run_rejects_bad_steps() {
        let sim = Simulation::new();
        assert!(sim.run(Frame::LAB, 0.0, 0.0, 1.0, always).is_err());
        assert!(sim.run(Frame::LAB, 0.1, 2.0, 1.0, always).is_err());
        assert!(sim.run(Frame::LAB, f64::NAN, 0.0, 1.0, always).is_err());
    }

    #[test]
    fn run_rejects_too_many_samples() {
        let sim = Simulation::new();
        for dt in [1e-300, 1e-9] {
            let result = sim.run(Frame::LAB, dt, 0.0, 100.0, always);
            assert!(matches!(result, Err(RelativityError::InvalidParameter(_))), "dt = {dt}");
        }
        let tight = 1.0 / (MAX_RUN_STEPS - 1) as f64;
        assert_eq!(sim.run(Frame::LAB, tight, 0.0, 1.0, always).unwrap().len(), MAX_RUN_STEPS);
    }

    #[test]
    fn condition_stops_run_early() {
        let mut sim = Simulation::new();
        let id = sim.add(BodySpec::point(0.0, 0.0).moving_x(0.5)).unwrap();
        let run = sim
            .run(Frame::LAB, 1.0, 0.0, 10.0, |s| {
                s.body(id).and_then(|b| b.points[0]).is_some_and(|(x, _)| x < 2.0)
            })
            .unwrap();
        assert_eq!(run.len(), 5);
    }

    #[test]
    fn event_flashes_in_window() {
        let mut sim = Simulation::new().with_flash_duration(1.0).unwrap();
        sim.add_event(Event::new(2.0, 3.0, 0.0), Frame::LAB, "bang");
        assert!(sim.snapshot(Frame::LAB, 1.5).unwrap().flashes.is_empty());
        let s = sim.snapshot(Frame::LAB, 2.5).unwrap();
        assert_eq!(s.flashes.len(), 1);
        assert_eq!(s.flashes[0].label, "bang");
        assert!((s.flashes[0].age - 0.5).abs() < 1e-12);
        assert!(sim.snapshot(Frame::LAB, 3.5).unwrap().flashes.is_empty());
    }
}
