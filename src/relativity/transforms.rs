//! Lorentz transformations of (t, x, y) events between inertial frames.
//!
//! A [`Frame`] is named by its velocity relative to the lab frame. Coordinates
//! in frame `F` are obtained from lab coordinates by the pure boost
//! `boost_matrix(F.velocity)`; going back uses the boost of the opposite
//! velocity.

use nalgebra::{Matrix3, Vector2, Vector3};

use super::special::{check_speed, lorentz_factor};
use crate::error::{RelativityError, Result};

/// Spatial velocity (vx, vy) in units of c.
pub type Velocity = Vector2<f64>;

/// An instantaneous point in spacetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    pub t: f64,
    pub x: f64,
    pub y: f64,
}

impl Event {
    pub const ORIGIN: Event = Event { t: 0.0, x: 0.0, y: 0.0 };

    pub const fn new(t: f64, x: f64, y: f64) -> Self {
        Self { t, x, y }
    }

    /// Builds an event from a `[t, x, y]` slice.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        match components {
            [t, x, y] => Ok(Self::new(*t, *x, *y)),
            _ => Err(RelativityError::MalformedVector {
                len: components.len(),
            }),
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.t, self.x, self.y]
    }

    pub fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.t, self.x, self.y)
    }

    pub fn from_vector(v: Vector3<f64>) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    /// Spacetime interval from the origin, s^2 = t^2 - x^2 - y^2.
    pub fn interval(&self) -> f64 {
        self.t * self.t - self.x * self.x - self.y * self.y
    }

    /// Interval between two events.
    pub fn interval_to(&self, other: &Event) -> f64 {
        let d = Event::new(other.t - self.t, other.x - self.x, other.y - self.y);
        d.interval()
    }

    /// Coordinates of this event, given in `from`, as measured in `to`.
    pub fn viewed_from(&self, from: Frame, to: Frame) -> Result<Event> {
        transform_between(self, from, to)
    }
}

/// An inertial frame, identified by its velocity relative to the lab frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    vx: f64,
    vy: f64,
}

impl Frame {
    pub const LAB: Frame = Frame { vx: 0.0, vy: 0.0 };

    pub fn new(vx: f64, vy: f64) -> Result<Self> {
        Self::with_velocity(Velocity::new(vx, vy))
    }

    /// Frame moving along x.
    pub fn moving_x(v: f64) -> Result<Self> {
        Self::new(v, 0.0)
    }

    pub fn with_velocity(velocity: Velocity) -> Result<Self> {
        check_speed(velocity.norm())?;
        Ok(Self {
            vx: velocity.x,
            vy: velocity.y,
        })
    }

    pub fn velocity(&self) -> Velocity {
        Velocity::new(self.vx, self.vy)
    }

    pub fn speed(&self) -> f64 {
        self.velocity().norm()
    }

    pub fn gamma(&self) -> f64 {
        1.0 / (1.0 - self.velocity().norm_squared()).sqrt()
    }

    /// Matrix taking lab coordinates into this frame.
    pub fn from_lab(&self) -> Matrix3<f64> {
        pure_boost(self.velocity(), self.gamma())
    }

    /// Matrix taking this frame's coordinates back into the lab.
    pub fn to_lab(&self) -> Matrix3<f64> {
        pure_boost(-self.velocity(), self.gamma())
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::LAB
    }
}

fn pure_boost(velocity: Velocity, gamma: f64) -> Matrix3<f64> {
    let speed = velocity.norm();
    if speed == 0.0 {
        return Matrix3::identity();
    }
    let n = velocity / speed;
    let k = gamma - 1.0;
    Matrix3::new(
        gamma,
        -gamma * velocity.x,
        -gamma * velocity.y,
        -gamma * velocity.x,
        1.0 + k * n.x * n.x,
        k * n.x * n.y,
        -gamma * velocity.y,
        k * n.x * n.y,
        1.0 + k * n.y * n.y,
    )
}

/// Pure Lorentz boost into a frame moving with `velocity`.
///
/// For a velocity along x this is
/// `t' = γ(t - v x)`, `x' = γ(x - v t)`, `y' = y`.
pub fn boost_matrix(velocity: Velocity) -> Result<Matrix3<f64>> {
    let gamma = lorentz_factor(velocity.norm())?;
    Ok(pure_boost(velocity, gamma))
}

/// One-dimensional boost along x, written out component by component.
pub fn boost_x(event: &Event, v: f64) -> Result<Event> {
    let gamma = lorentz_factor(v)?;
    Ok(Event::new(
        gamma * (event.t - v * event.x),
        gamma * (event.x - v * event.t),
        event.y,
    ))
}

/// Coordinates of `event` in a frame moving with `velocity` relative to the
/// frame the event is given in.
pub fn lorentz_transform(event: &Event, velocity: Velocity) -> Result<Event> {
    let boost = boost_matrix(velocity)?;
    Ok(Event::from_vector(boost * event.to_vector()))
}

/// Same as [`lorentz_transform`] for raw `[t, x, y]` input.
pub fn lorentz_transform_slice(components: &[f64], velocity: Velocity) -> Result<[f64; 3]> {
    let event = Event::from_slice(components)?;
    Ok(lorentz_transform(&event, velocity)?.to_array())
}

/// Matrix taking coordinates in `from` to coordinates in `to`.
///
/// Two non-collinear boosts do not compose into a pure boost, so this goes
/// through the lab frame rather than boosting by a relative velocity.
pub fn frame_change(from: Frame, to: Frame) -> Matrix3<f64> {
    if from == to {
        return Matrix3::identity();
    }
    to.from_lab() * from.to_lab()
}

pub fn transform_between(event: &Event, from: Frame, to: Frame) -> Result<Event> {
    Ok(Event::from_vector(frame_change(from, to) * event.to_vector()))
}

/// Rejects object velocities faster than light. Light itself (|u| = 1) is allowed.
pub fn check_object_velocity(u: Velocity) -> Result<Velocity> {
    let speed = u.norm();
    if speed <= 1.0 + 1e-12 {
        Ok(u)
    } else {
        Err(RelativityError::InvalidVelocity { speed })
    }
}

/// Lab velocity of something moving with `u` inside a frame that itself moves
/// with `frame_velocity` relative to the lab.
pub fn add_velocities(u: Velocity, frame_velocity: Velocity) -> Result<Velocity> {
    let u = check_object_velocity(u)?;
    let back = boost_matrix(-frame_velocity)?;
    let tangent = back * Vector3::new(1.0, u.x, u.y);
    Ok(Velocity::new(tangent[1] / tangent[0], tangent[2] / tangent[0]))
}
