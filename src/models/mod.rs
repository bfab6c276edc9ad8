//! Domain model types for warehouse pick batching.
//!
//! Provides the core abstractions: the location registry (arena + name
//! index), legs and capacity-bounded pick routes, and per-section plans
//! with aggregate travel distance.

mod location;
mod plan;
mod route;

pub use location::{Location, LocationRecord, Registry};
pub use plan::{PickPlan, SectionPlan};
pub use route::{Leg, PickRoute, RouteMember, SideTag};
