//! Screen-space primitives and the three row layouts.

pub mod point;
pub mod projection;

pub use point::{Path, Point, Segment};
pub use projection::{Canvas, Marker, SpiralWalk, parallel, perspective, spiral};
