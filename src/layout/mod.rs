//! Warehouse topology: row levels, aisles, sections, and rack dimensions.

mod topology;

pub use topology::{ApproachSide, Layout, RackDims, RowBand, RowLevels};
