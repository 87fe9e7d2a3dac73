pub mod special;
pub mod transforms;

pub use transforms::{Event, Frame, Velocity};
