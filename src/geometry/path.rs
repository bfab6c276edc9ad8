//! Aisle-constrained path synthesis.
//!
//! # Algorithm
//!
//! A forklift leaves a slot perpendicularly into the travel lane adjacent to
//! the slot's row, moves horizontally along that lane, and re-enters the
//! destination slot perpendicularly. Three cases arise:
//!
//! - **Same row band**: both slots share one lane — exit, lane, lane, enter
//!   (4 waypoints). For the double-deep middle row the lane (below or above)
//!   is fixed by the approach side.
//! - **Different bands, coinciding lanes**: the exit lane of one slot is the
//!   entry lane of the other — still 4 waypoints.
//! - **Different bands, distinct lanes**: the path transfers vertically
//!   through the aisle nearest the mean x of the two slots, adding two
//!   intersection waypoints (6 total).
//!
//! A leg that ends at the middle row determines which side the *next* leg
//! must start from: entering from above forces `Upper`, from below `Lower`.
//! All travel is axis-aligned; no diagonal shortcuts.
//!
//! # Complexity
//!
//! O(k) per path for k aisles (nearest-aisle scan); O(1) waypoints.

use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};
use crate::layout::{ApproachSide, Layout, RowBand};

/// Lane y-coordinates computed from different expressions coincide only up
/// to rounding.
const LANE_EPS: f64 = 1e-9;

/// A waypoint on the warehouse floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// x-coordinate.
    pub x: f64,
    /// y-coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A synthesized path between two slots.
///
/// Carries the ordered waypoints, the precomputed length, and the approach
/// side the next leg of a chained route must start from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPath {
    waypoints: Vec<Point>,
    length: f64,
    next_side: ApproachSide,
}

impl AccessPath {
    fn new(waypoints: Vec<Point>, next_side: ApproachSide) -> Self {
        let length = path_length(&waypoints);
        Self {
            waypoints,
            length,
            next_side,
        }
    }

    /// Ordered waypoints, exit point first.
    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The approach side the next chained leg must start from.
    pub fn next_side(&self) -> ApproachSide {
        self.next_side
    }
}

/// Sums the lengths of consecutive segments of a waypoint polyline.
pub fn path_length(waypoints: &[Point]) -> f64 {
    waypoints
        .windows(2)
        .map(|w| w[0].distance_to(&w[1]))
        .sum()
}

/// Synthesizes the travel path from `from` to `to`.
///
/// `side` selects the middle-row lane when `from` lies on the middle row
/// (and the shared lane when both slots do); it is ignored for bottom- and
/// top-row sources.
///
/// Fails with [`PickError::DegenerateLayout`] when an endpoint's
/// y-coordinate matches no row level of the layout.
///
/// # Examples
///
/// ```
/// use pick_routing::geometry::{access_path, Point};
/// use pick_routing::layout::{ApproachSide, Layout, RowLevels};
///
/// let rows = RowLevels::new(0.0, Some(18.75), 37.5).unwrap();
/// let layout = Layout::new(vec![0.0, 25.0, 50.0], vec![], rows).unwrap();
///
/// // Two bottom-row slots share one lane: 4 waypoints.
/// let path = access_path(
///     &layout,
///     Point::new(10.0, 0.0),
///     Point::new(40.0, 0.0),
///     ApproachSide::Lower,
/// )
/// .unwrap();
/// assert_eq!(path.waypoints().len(), 4);
/// assert!((path.length() - 42.0).abs() < 1e-10);
/// ```
pub fn access_path(
    layout: &Layout,
    from: Point,
    to: Point,
    side: ApproachSide,
) -> Result<AccessPath> {
    let from_band = band_of(layout, from.y)?;
    let to_band = band_of(layout, to.y)?;
    let depth = layout.dims().slot_depth;
    let lane = layout.dims().lane_width;

    if from_band == to_band {
        // One shared lane; the middle row's is picked by `side`.
        let (exit_off, lane_off) = match from_band {
            RowBand::Bottom => (depth / 2.0, depth / 2.0 + lane / 2.0),
            RowBand::Top => (-depth / 2.0, -(depth / 2.0 + lane / 2.0)),
            RowBand::Middle => match side {
                ApproachSide::Lower => (-depth, -(depth + lane / 2.0)),
                ApproachSide::Upper => (depth, depth + lane / 2.0),
            },
        };
        let waypoints = vec![
            Point::new(from.x, from.y + exit_off),
            Point::new(from.x, from.y + lane_off),
            Point::new(to.x, to.y + lane_off),
            Point::new(to.x, to.y + exit_off),
        ];
        return Ok(AccessPath::new(waypoints, side));
    }

    let (exit, exit_lane, enter_lane, enter, next_side) = if from_band != RowBand::Middle {
        // Exit direction fixed by the band: toward the destination.
        let sign = if from.y < to.y { 1.0 } else { -1.0 };
        let exit = Point::new(from.x, from.y + sign * depth / 2.0);
        let exit_lane = Point::new(from.x, from.y + sign * (depth / 2.0 + lane / 2.0));
        let (enter_lane, enter, next_side) = if to_band != RowBand::Middle {
            (
                Point::new(to.x, to.y - sign * (depth / 2.0 + lane / 2.0)),
                Point::new(to.x, to.y - sign * depth / 2.0),
                ApproachSide::Lower,
            )
        } else {
            // The middle row is double-deep: full-depth entry offset.
            // Entering it from above forces the next leg to start Upper.
            let next_side = if from.y > to.y {
                ApproachSide::Upper
            } else {
                ApproachSide::Lower
            };
            (
                Point::new(to.x, to.y - sign * (depth + lane / 2.0)),
                Point::new(to.x, to.y - sign * depth),
                next_side,
            )
        };
        (exit, exit_lane, enter_lane, enter, next_side)
    } else {
        let (exit, exit_lane) = match side {
            ApproachSide::Lower => (
                Point::new(from.x, from.y - depth),
                Point::new(from.x, from.y - depth - lane / 2.0),
            ),
            ApproachSide::Upper => (
                Point::new(from.x, from.y + depth),
                Point::new(from.x, from.y + depth + lane / 2.0),
            ),
        };
        let (enter_lane, enter) = if to.y > from.y {
            (
                Point::new(to.x, to.y - depth / 2.0 - lane / 2.0),
                Point::new(to.x, to.y - depth / 2.0),
            )
        } else {
            (
                Point::new(to.x, to.y + depth / 2.0 + lane / 2.0),
                Point::new(to.x, to.y + depth / 2.0),
            )
        };
        (exit, exit_lane, enter_lane, enter, ApproachSide::Lower)
    };

    let waypoints = if (exit_lane.y - enter_lane.y).abs() < LANE_EPS {
        vec![exit, exit_lane, enter_lane, enter]
    } else {
        let ax = layout.nearest_aisle((from.x + to.x) / 2.0);
        vec![
            exit,
            exit_lane,
            Point::new(ax, exit_lane.y),
            Point::new(ax, enter_lane.y),
            enter_lane,
            enter,
        ]
    };
    Ok(AccessPath::new(waypoints, next_side))
}

fn band_of(layout: &Layout, y: f64) -> Result<RowBand> {
    layout.rows().band_of(y).ok_or_else(|| {
        PickError::DegenerateLayout(format!("slot y-coordinate {y} matches no row level"))
    })
}
