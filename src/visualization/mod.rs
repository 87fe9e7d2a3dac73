//! Plotting adapters. `scene` and the path helpers in `minkowski` are pure;
//! the rest hands off to `plotters`.

pub mod animation;
pub mod minkowski;
pub mod scene;

pub use animation::RelativisticAnimation;
pub use minkowski::MinkowskiDiagram;
pub use scene::{PlotLimits, Primitive};
