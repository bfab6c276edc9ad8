//! Travel path synthesis between storage slots.
//!
//! - [`access_path`] — 4- or 6-waypoint aisle path between two slots
//! - [`path_length`] — total length of a waypoint polyline

mod path;

pub use path::{access_path, path_length, AccessPath, Point};
