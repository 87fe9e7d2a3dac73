//! Unit conversions, formatting and run conditions.

use crate::error::{RelativityError, Result};
use crate::relativity::{Event, Frame};
use crate::simulation::Snapshot;

/// Speed of light in m/s.
pub const C: f64 = 299_792_458.0;

/// Seconds in a Julian year, used for light-year conversions.
pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 3600.0;

/// Metres in one light-year.
pub const LIGHT_YEAR: f64 = C * SECONDS_PER_YEAR;

/// Run condition that never stops a simulation early.
pub fn always(_: &Snapshot) -> bool {
    true
}

/// Converts a speed in m/s to a fraction of c.
pub fn fraction_of_c(metres_per_second: f64) -> f64 {
    metres_per_second / C
}

/// Converts a fraction of c to m/s.
pub fn metres_per_second(fraction: f64) -> f64 {
    fraction * C
}

pub fn km_per_s_to_fraction(km_per_s: f64) -> f64 {
    fraction_of_c(km_per_s * 1000.0)
}

pub fn light_years_to_metres(ly: f64) -> f64 {
    ly * LIGHT_YEAR
}

pub fn metres_to_light_years(m: f64) -> f64 {
    m / LIGHT_YEAR
}

/// Parses `"0.5"` or `"0.5,0.2"` into a frame velocity.
pub fn parse_frame(s: &str) -> Result<Frame> {
    let parts = s
        .split(',')
        .map(|p| {
            p.trim()
                .parse::<f64>()
                .map_err(|_| RelativityError::InvalidParameter(format!("not a number: {p:?}")))
        })
        .collect::<Result<Vec<_>>>()?;
    match parts.as_slice() {
        [vx] => Frame::new(*vx, 0.0),
        [vx, vy] => Frame::new(*vx, *vy),
        _ => Err(RelativityError::InvalidParameter(format!(
            "frame velocity needs one or two components, got {s:?}"
        ))),
    }
}

pub fn format_speed(v: f64) -> String {
    format!("{v:.2}c")
}

pub fn format_frame(frame: &Frame) -> String {
    let v = frame.velocity();
    if v.y == 0.0 {
        format_speed(v.x)
    } else {
        format!("({:.2}c, {:.2}c)", v.x, v.y)
    }
}

pub fn format_event(e: &Event) -> String {
    format!("(t={:.3}, x={:.3}, y={:.3})", e.t, e.x, e.y)
}

/// Filesystem-friendly name for a frame, e.g. `v0.85` or `v0.50_0.50`.
pub fn frame_slug(frame: &Frame) -> String {
    let v = frame.velocity();
    if v.y == 0.0 {
        format!("v{:.2}", v.x)
    } else {
        format!("v{:.2}_{:.2}", v.x, v.y)
    }
}
