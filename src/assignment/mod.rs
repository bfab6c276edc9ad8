//! Greedy capacity-constrained batch assignment.

mod greedy;

pub use greedy::{assign_section, BatchConfig};
