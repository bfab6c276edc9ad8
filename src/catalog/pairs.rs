//! Candidate enumeration and ordering.
//!
//! # Algorithm
//!
//! For one section, every unordered location pair is evaluated through the
//! geometry engine. A pair is side-ambiguous iff exactly one endpoint lies
//! on the middle row: the forklift can then serve that endpoint from either
//! side, and the two routings differ physically. Ambiguous pairs are
//! evaluated twice (middle endpoint as the source, `Lower` and `Upper`) and
//! emit two candidates tagged [`SideTag::Fixed`]; all other pairs emit one
//! candidate tagged [`SideTag::Either`].
//!
//! The result is stably sorted ascending by distance — this ordering is the
//! sole search order the assignment engine uses.
//!
//! # Complexity
//!
//! O(n²) path evaluations and O(n² log n) for the sort, n = section size.

use serde::Serialize;

use crate::error::Result;
use crate::geometry::access_path;
use crate::layout::{ApproachSide, Layout};
use crate::models::{Registry, SideTag};

/// A candidate pairing of two locations, tagged with its approach side and
/// travel distance.
///
/// `a` and `b` are registry indices in enumeration order; the same
/// unordered pair appears twice (once per side) only when its routing is
/// ambiguous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candidate {
    /// Registry index of the first endpoint.
    pub a: usize,
    /// Registry index of the second endpoint.
    pub b: usize,
    /// Side tag of this routing.
    pub tag: SideTag,
    /// Travel distance of this routing.
    pub distance: f64,
}

/// Enumerates and sorts the travel candidates for one section.
///
/// `members` are the registry indices of the section's locations, in
/// registry order.
///
/// # Examples
///
/// ```
/// use pick_routing::catalog::section_candidates;
/// use pick_routing::layout::{Layout, RowLevels};
/// use pick_routing::models::{LocationRecord, Registry, SideTag};
///
/// let rows = RowLevels::new(0.0, Some(18.75), 37.5).unwrap();
/// let layout = Layout::new(vec![0.0, 25.0, 50.0], vec![], rows).unwrap();
/// let records = vec![
///     LocationRecord::new("A-01", 10.0, 0.0),
///     LocationRecord::new("A-02", 40.0, 18.75),
/// ];
/// let registry = Registry::from_records(&records, &layout).unwrap();
///
/// // One bottom-row slot, one middle-row slot: side-ambiguous pair.
/// let candidates = section_candidates(&layout, &registry, &[0, 1]).unwrap();
/// assert_eq!(candidates.len(), 2);
/// assert!(matches!(candidates[0].tag, SideTag::Fixed(_)));
/// assert!(candidates[0].distance <= candidates[1].distance);
/// ```
pub fn section_candidates(
    layout: &Layout,
    registry: &Registry,
    members: &[usize],
) -> Result<Vec<Candidate>> {
    let middle = layout.rows().middle();
    let mut candidates = Vec::new();

    for (pos, &ai) in members.iter().enumerate() {
        for &bi in &members[pos + 1..] {
            let pa = registry.location(ai).point();
            let pb = registry.location(bi).point();
            let a_mid = middle == Some(pa.y);
            let b_mid = middle == Some(pb.y);

            if a_mid != b_mid {
                // Evaluate with the middle endpoint as the source, once per
                // side.
                let (src, dst) = if a_mid { (pa, pb) } else { (pb, pa) };
                for side in [ApproachSide::Lower, ApproachSide::Upper] {
                    let path = access_path(layout, src, dst, side)?;
                    candidates.push(Candidate {
                        a: ai,
                        b: bi,
                        tag: SideTag::Fixed(side),
                        distance: path.length(),
                    });
                }
            } else {
                let path = access_path(layout, pa, pb, ApproachSide::Lower)?;
                candidates.push(Candidate {
                    a: ai,
                    b: bi,
                    tag: SideTag::Either,
                    distance: path.length(),
                });
            }
        }
    }

    candidates.sort_by(|x, y| x.distance.total_cmp(&y.distance));
    Ok(candidates)
}
