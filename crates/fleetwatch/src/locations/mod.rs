//! Locations module — instance addressing and inventory resolution.

pub mod map;

pub use map::{resolve, Location, LocationMap};
