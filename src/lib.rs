//! Special-relativity toolkit: Lorentz transforms between inertial frames,
//! bodies made of worldlines that can be watched from any frame, the classic
//! paradoxes as ready-made scenarios, and plotting adapters.
//!
//! Natural units throughout (c = 1); events are `(t, x, y)`.

pub mod config;
pub mod error;
pub mod metrics;
pub mod relativity;
pub mod scenarios;
pub mod simulation;
pub mod tui;
pub mod utils;
pub mod visualization;

pub use error::{RelativityError, Result};
pub use relativity::special::lorentz_factor;
pub use relativity::transforms::{add_velocities, lorentz_transform, transform_between};
pub use relativity::{Event, Frame, Velocity};
pub use simulation::{BodySpec, Orientation, Simulation};
pub use utils::always;
