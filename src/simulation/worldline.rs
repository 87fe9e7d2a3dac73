use nalgebra::{Matrix3, Vector3};

use crate::error::Result;
use crate::relativity::transforms::{Event, Velocity, check_object_velocity};

/// A straight worldline `X(λ) = anchor + λ·tangent`, alive for λ in `[born, dies]`.
///
/// In the frame the line is built in, the tangent is `(1, ux, uy)` so λ is the
/// elapsed coordinate time since the anchor. A boost is linear, so transforming
/// the anchor and the tangent moves the whole line while λ keeps labelling the
/// same events.
#[derive(Debug, Clone, PartialEq)]
pub struct Worldline {
    anchor: Vector3<f64>,
    tangent: Vector3<f64>,
    born: Option<f64>,
    dies: Option<f64>,
}

impl Worldline {
    pub fn new(anchor: Event, velocity: Velocity) -> Result<Self> {
        let u = check_object_velocity(velocity)?;
        Ok(Self {
            anchor: anchor.to_vector(),
            tangent: Vector3::new(1.0, u.x, u.y),
            born: None,
            dies: None,
        })
    }

    pub fn with_bounds(mut self, born: Option<f64>, dies: Option<f64>) -> Self {
        self.born = born;
        self.dies = dies;
        self
    }

    pub fn anchor(&self) -> Event {
        Event::from_vector(self.anchor)
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.tangent[1] / self.tangent[0], self.tangent[2] / self.tangent[0])
    }

    pub fn is_lightlike(&self) -> bool {
        (self.velocity().norm() - 1.0).abs() < 1e-9
    }

    /// Parameter at which the line reaches coordinate time `t`.
    pub fn param_at_time(&self, t: f64) -> f64 {
        (t - self.anchor[0]) / self.tangent[0]
    }

    pub fn event_at(&self, lambda: f64) -> Event {
        Event::from_vector(self.anchor + self.tangent * lambda)
    }

    pub fn birth(&self) -> Option<Event> {
        self.born.map(|l| self.event_at(l))
    }

    pub fn death(&self) -> Option<Event> {
        self.dies.map(|l| self.event_at(l))
    }

    fn alive(&self, lambda: f64) -> bool {
        let eps = 1e-9;
        self.born.is_none_or(|b| lambda >= b - eps) && self.dies.is_none_or(|d| lambda <= d + eps)
    }

    /// Spatial position at coordinate time `t`, or `None` when the line does
    /// not exist at that time.
    pub fn position_at(&self, t: f64) -> Option<(f64, f64)> {
        let lambda = self.param_at_time(t);
        if !self.alive(lambda) {
            return None;
        }
        let e = self.event_at(lambda);
        Some((e.x, e.y))
    }

    /// Coordinate-time range over which the line exists.
    pub fn time_span(&self) -> (Option<f64>, Option<f64>) {
        (self.birth().map(|e| e.t), self.death().map(|e| e.t))
    }

    /// Proper time between birth and death, when both exist.
    pub fn proper_time(&self) -> Option<f64> {
        let (born, dies) = (self.born?, self.dies?);
        let tangent = Event::from_vector(self.tangent);
        Some(tangent.interval().max(0.0).sqrt() * (dies - born).max(0.0))
    }

    pub fn transformed(&self, change: &Matrix3<f64>) -> Self {
        Self {
            anchor: change * self.anchor,
            tangent: change * self.tangent,
            born: self.born,
            dies: self.dies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relativity::Frame;

    #[test]
    fn bounded_line_only_exists_inside_window() {
        let line = Worldline::new(Event::new(2.0, 1.0, 0.0), Velocity::new(0.5, 0.0))
            .unwrap()
            .with_bounds(Some(0.0), Some(4.0));
        assert_eq!(line.position_at(1.0), None);
        assert_eq!(line.position_at(4.0), Some((2.0, 0.0)));
        assert_eq!(line.position_at(7.0), None);
    }

    #[test]
    fn moving_clock_ages_slower() {
        let line = Worldline::new(Event::ORIGIN, Velocity::new(0.6, 0.0))
            .unwrap()
            .with_bounds(Some(0.0), Some(10.0));
        assert!((line.proper_time().unwrap() - 8.0).abs() < 1e-9);

        // Proper time is a frame-independent quantity.
        let boosted = line.transformed(&Frame::moving_x(0.6).unwrap().from_lab());
        assert!((boosted.proper_time().unwrap() - 8.0).abs() < 1e-9);
        assert!(boosted.velocity().norm() < 1e-9);
    }

    #[test]
    fn superluminal_line_is_rejected() {
        assert!(Worldline::new(Event::ORIGIN, Velocity::new(1.1, 0.0)).is_err());
        let photon = Worldline::new(Event::ORIGIN, Velocity::new(0.0, 1.0)).unwrap();
        assert!(photon.is_lightlike());
    }
}
