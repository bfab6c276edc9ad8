//! Section plans and the aggregate pick plan.

use serde::Serialize;

use super::PickRoute;

/// The routes produced for one section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionPlan {
    section: usize,
    routes: Vec<PickRoute>,
}

impl SectionPlan {
    /// Creates a plan for one section.
    pub fn new(section: usize, routes: Vec<PickRoute>) -> Self {
        Self { section, routes }
    }

    /// Section id.
    pub fn section(&self) -> usize {
        self.section
    }

    /// Routes of this section.
    pub fn routes(&self) -> &[PickRoute] {
        &self.routes
    }

    /// Number of routes in this section.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total travel distance of this section's routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }
}

/// The full plan: one [`SectionPlan`] per section, in ascending section
/// order.
///
/// # Examples
///
/// ```
/// use pick_routing::models::{PickPlan, PickRoute, SectionPlan};
///
/// let plan = PickPlan::new(vec![SectionPlan::new(
///     0,
///     vec![PickRoute::singleton(0, 5)],
/// )]);
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.total_distance(), 0.0);
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct PickPlan {
    sections: Vec<SectionPlan>,
}

impl PickPlan {
    /// Creates a plan from per-section results.
    pub fn new(sections: Vec<SectionPlan>) -> Self {
        Self { sections }
    }

    /// Per-section plans, ascending by section id.
    pub fn sections(&self) -> &[SectionPlan] {
        &self.sections
    }

    /// Total number of routes across all sections.
    pub fn num_routes(&self) -> usize {
        self.sections.iter().map(|s| s.num_routes()).sum()
    }

    /// Total forklift travel distance across every leg of every route.
    pub fn total_distance(&self) -> f64 {
        self.sections.iter().map(|s| s.total_distance()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Leg, SideTag};

    #[test]
    fn test_empty_plan() {
        let plan = PickPlan::default();
        assert_eq!(plan.num_routes(), 0);
        assert_eq!(plan.total_distance(), 0.0);
    }

    #[test]
    fn test_aggregate_distance() {
        let paired = PickRoute::seeded(
            Leg {
                from: 0,
                to: 1,
                tag: SideTag::Either,
                distance: 10.0,
            },
            3,
            2,
        );
        let plan = PickPlan::new(vec![
            SectionPlan::new(0, vec![paired, PickRoute::singleton(2, 5)]),
            SectionPlan::new(1, vec![PickRoute::singleton(3, 1)]),
        ]);
        assert_eq!(plan.num_routes(), 3);
        // Singletons contribute zero distance.
        assert!((plan.total_distance() - 10.0).abs() < 1e-10);
        assert!((plan.sections()[0].total_distance() - 10.0).abs() < 1e-10);
        assert_eq!(plan.sections()[1].total_distance(), 0.0);
    }
}
