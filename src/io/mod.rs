//! Input-file loaders and positional-name normalization.

mod loaders;

pub use loaders::{normalize_name, read_locations, read_sku_locations};
