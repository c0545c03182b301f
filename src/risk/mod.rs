//! Capital-at-risk position sizing.

pub mod sizing;

pub use sizing::{position_size, MIN_LOTS};
