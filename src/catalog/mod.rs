//! Pairwise distance catalog: sorted travel candidates per section.

mod pairs;

pub use pairs::{section_candidates, Candidate};
