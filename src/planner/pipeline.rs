//! The planning pipeline over all sections.

use tracing::{debug_span, info};

use crate::assignment::{assign_section, BatchConfig};
use crate::catalog::section_candidates;
use crate::error::Result;
use crate::layout::Layout;
use crate::models::{PickPlan, Registry, SectionPlan};

/// Plans pick routes for a registry against a layout.
///
/// Sections are mutually independent and are processed in ascending
/// section-id order; the registry's pending quantities are copied into a
/// working arena, so planning never mutates its inputs.
///
/// # Examples
///
/// ```
/// use pick_routing::layout::{Layout, RowLevels};
/// use pick_routing::models::{LocationRecord, Registry};
/// use pick_routing::planner::Planner;
///
/// let rows = RowLevels::new(0.0, Some(18.75), 37.5).unwrap();
/// let layout = Layout::new(vec![0.0, 25.0, 50.0], vec![], rows).unwrap();
/// let records = vec![
///     LocationRecord::new("L1", 10.0, 0.0),
///     LocationRecord::new("L2", 40.0, 0.0),
/// ];
/// let mut registry = Registry::from_records(&records, &layout).unwrap();
/// registry.set_pending("L1", 3).unwrap();
/// registry.set_pending("L2", 2).unwrap();
///
/// let plan = Planner::new(&layout, &registry).plan().unwrap();
/// assert_eq!(plan.num_routes(), 1);
/// assert!((plan.total_distance() - 42.0).abs() < 1e-10);
/// ```
pub struct Planner<'a> {
    layout: &'a Layout,
    registry: &'a Registry,
    config: BatchConfig,
}

impl<'a> Planner<'a> {
    /// Creates a planner over the given layout and registry with the
    /// default batch configuration.
    pub fn new(layout: &'a Layout, registry: &'a Registry) -> Self {
        Self {
            layout,
            registry,
            config: BatchConfig::default(),
        }
    }

    /// Replaces the batch configuration.
    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs catalog construction and batch assignment for every section
    /// and returns the aggregate plan.
    pub fn plan(&self) -> Result<PickPlan> {
        let mut pending = self.registry.pending();
        let mut sections = Vec::with_capacity(self.layout.num_sections());

        for section in 0..self.layout.num_sections() {
            let _span = debug_span!("section", id = section).entered();
            let members = self.registry.section_members(section);
            let candidates = section_candidates(self.layout, self.registry, &members)?;
            let routes = assign_section(&mut pending, &members, &candidates, &self.config);
            let plan = SectionPlan::new(section, routes);
            info!(
                section,
                routes = plan.num_routes(),
                distance = plan.total_distance(),
                "section planned"
            );
            sections.push(plan);
        }

        let plan = PickPlan::new(sections);
        info!(
            routes = plan.num_routes(),
            distance = plan.total_distance(),
            "pick plan complete"
        );
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickError;
    use crate::layout::{ApproachSide, RowLevels};
    use crate::models::{LocationRecord, SideTag};

    fn sample_layout(bounds: Vec<f64>) -> Layout {
        let rows = RowLevels::new(0.0, Some(18.75), 37.5).expect("valid");
        Layout::new(vec![0.0, 25.0, 50.0], bounds, rows).expect("valid")
    }

    fn registry_with(
        layout: &Layout,
        slots: &[(&str, f64, f64, i64)],
    ) -> Registry {
        let records: Vec<LocationRecord> = slots
            .iter()
            .map(|(name, x, y, _)| LocationRecord::new(*name, *x, *y))
            .collect();
        let mut registry = Registry::from_records(&records, layout).expect("valid");
        for (name, _, _, layers) in slots {
            registry.set_pending(name, *layers).expect("known name");
        }
        registry
    }

    #[test]
    fn test_single_section_end_to_end() {
        let layout = sample_layout(vec![]);
        let registry = registry_with(
            &layout,
            &[
                ("L1", 10.0, 0.0, 3),
                ("L2", 40.0, 0.0, 2),
                ("L3", 25.0, 37.5, 6),
            ],
        );
        let plan = Planner::new(&layout, &registry).plan().expect("plans");

        // L3 pre-splits one full singleton, L1+L2 pair (distance 42), and
        // L3's last layer closes as a leftover.
        assert_eq!(plan.sections().len(), 1);
        let routes = plan.sections()[0].routes();
        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].total_layers(), 5);
        assert!(routes[0].is_singleton());
        assert_eq!(routes[1].legs().len(), 1);
        assert_eq!(routes[2].total_layers(), 1);
        assert!((plan.total_distance() - 42.0).abs() < 1e-10);
    }

    #[test]
    fn test_sections_processed_independently() {
        let layout = sample_layout(vec![20.0]);
        let registry = registry_with(
            &layout,
            &[
                ("A1", 10.0, 0.0, 2),
                ("A2", 15.0, 0.0, 2),
                ("B1", 30.0, 0.0, 2),
                ("B2", 40.0, 0.0, 2),
            ],
        );
        let plan = Planner::new(&layout, &registry).plan().expect("plans");

        assert_eq!(plan.sections().len(), 2);
        assert_eq!(plan.sections()[0].section(), 0);
        assert_eq!(plan.sections()[1].section(), 1);
        // One pair per section; never across the boundary.
        for section in plan.sections() {
            assert_eq!(section.num_routes(), 1);
            let route = &section.routes()[0];
            assert_eq!(route.members().len(), 2);
        }
    }

    #[test]
    fn test_ambiguous_pair_takes_shorter_side() {
        let layout = sample_layout(vec![]);
        let registry = registry_with(
            &layout,
            &[("L1", 10.0, 0.0, 2), ("M1", 40.0, 18.75, 3)],
        );
        let plan = Planner::new(&layout, &registry).plan().expect("plans");

        let routes = plan.sections()[0].routes();
        assert_eq!(routes.len(), 1);
        assert_eq!(
            routes[0].legs()[0].tag,
            SideTag::Fixed(ApproachSide::Lower)
        );
        assert!((plan.total_distance() - 42.0).abs() < 1e-10);
    }

    #[test]
    fn test_conservation_against_registry() {
        let layout = sample_layout(vec![20.0]);
        let registry = registry_with(
            &layout,
            &[
                ("A1", 10.0, 0.0, 7),
                ("A2", 15.0, 18.75, 4),
                ("A3", 5.0, 37.5, 1),
                ("B1", 30.0, 0.0, 11),
                ("B2", 40.0, 37.5, 3),
            ],
        );
        let plan = Planner::new(&layout, &registry).plan().expect("plans");

        let mut consumed = vec![0u64; registry.len()];
        for section in plan.sections() {
            for route in section.routes() {
                for member in route.members() {
                    consumed[member.location()] += u64::from(member.layers());
                }
            }
        }
        for (idx, location) in registry.locations().iter().enumerate() {
            assert_eq!(consumed[idx], u64::from(location.layers()));
        }
    }

    #[test]
    fn test_empty_registry_plans_empty_sections() {
        let layout = sample_layout(vec![20.0]);
        let registry = Registry::from_records(&[], &layout).expect("valid");
        let plan = Planner::new(&layout, &registry).plan().expect("plans");
        assert_eq!(plan.sections().len(), 2);
        assert_eq!(plan.num_routes(), 0);
        assert_eq!(plan.total_distance(), 0.0);
    }

    #[test]
    fn test_off_row_location_fails() {
        let layout = sample_layout(vec![]);
        let registry = registry_with(
            &layout,
            &[("L1", 10.0, 5.0, 1), ("L2", 40.0, 0.0, 1)],
        );
        let err = Planner::new(&layout, &registry).plan();
        assert!(matches!(err, Err(PickError::DegenerateLayout(_))));
    }

    #[test]
    fn test_custom_capacity() {
        let layout = sample_layout(vec![]);
        let registry = registry_with(
            &layout,
            &[("L1", 10.0, 0.0, 3), ("L2", 40.0, 0.0, 2)],
        );
        let plan = Planner::new(&layout, &registry)
            .with_config(BatchConfig { capacity: 4 })
            .plan()
            .expect("plans");

        // 3 + 2 no longer fits one route.
        assert_eq!(plan.num_routes(), 2);
        assert_eq!(plan.total_distance(), 0.0);
    }
}
