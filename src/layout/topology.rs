//! Layout types: row levels, approach sides, aisles, and sections.

use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};

/// Which physical side a forklift uses to access the shared middle row.
///
/// The middle storage row is double-deep and is served by the aisle lane
/// below it (`Lower`) or above it (`Upper`). Slots in the bottom and top
/// rows have only one accessible side, so the flag is meaningless for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApproachSide {
    /// Serve the middle row from the lane below it.
    Lower,
    /// Serve the middle row from the lane above it.
    Upper,
}

/// The row a storage slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowBand {
    /// Lowest row, accessed from above.
    Bottom,
    /// Shared double-deep row, accessed from either side.
    Middle,
    /// Highest row, accessed from below.
    Top,
}

/// The y-levels of the storage rows.
///
/// A layout always has a bottom and a top row; the shared middle row is
/// optional. Levels can be given explicitly or inferred from slot
/// coordinates.
///
/// # Examples
///
/// ```
/// use pick_routing::layout::{RowBand, RowLevels};
///
/// let rows = RowLevels::new(0.0, Some(18.75), 37.5).unwrap();
/// assert_eq!(rows.band_of(18.75), Some(RowBand::Middle));
/// assert_eq!(rows.band_of(5.0), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLevels {
    bottom: f64,
    middle: Option<f64>,
    top: f64,
}

impl RowLevels {
    /// Creates explicit row levels.
    ///
    /// Fails with [`PickError::DegenerateLayout`] unless
    /// `bottom < middle < top` (middle, when present) and all levels are
    /// finite.
    pub fn new(bottom: f64, middle: Option<f64>, top: f64) -> Result<Self> {
        if !bottom.is_finite() || !top.is_finite() || middle.is_some_and(|m| !m.is_finite()) {
            return Err(PickError::DegenerateLayout(
                "row y-levels must be finite".into(),
            ));
        }
        if bottom >= top {
            return Err(PickError::DegenerateLayout(format!(
                "fewer than 2 distinct row y-levels (bottom {bottom}, top {top})"
            )));
        }
        if let Some(m) = middle {
            if m <= bottom || m >= top {
                return Err(PickError::DegenerateLayout(format!(
                    "middle row y-level {m} is not strictly between bottom and top"
                )));
            }
        }
        Ok(Self {
            bottom,
            middle,
            top,
        })
    }

    /// Infers row levels from slot y-coordinates.
    ///
    /// The minimum level becomes the bottom row, the maximum the top row,
    /// and a single strictly-interior level the middle row. Fails with
    /// [`PickError::DegenerateLayout`] if fewer than 2 distinct levels
    /// exist or more than one interior level is present.
    pub fn infer<I>(ys: I) -> Result<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut levels: Vec<f64> = ys.into_iter().collect();
        levels.sort_by(f64::total_cmp);
        levels.dedup();

        match levels.len() {
            0 | 1 => Err(PickError::DegenerateLayout(format!(
                "fewer than 2 distinct row y-levels ({} found)",
                levels.len()
            ))),
            2 => Self::new(levels[0], None, levels[1]),
            3 => Self::new(levels[0], Some(levels[1]), levels[2]),
            n => Err(PickError::DegenerateLayout(format!(
                "more than one middle row y-level ({} interior levels)",
                n - 2
            ))),
        }
    }

    /// Bottom row y-level.
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    /// Middle row y-level, if the layout has a middle row.
    pub fn middle(&self) -> Option<f64> {
        self.middle
    }

    /// Top row y-level.
    pub fn top(&self) -> f64 {
        self.top
    }

    /// Classifies a y-coordinate into its row band.
    ///
    /// Returns `None` when the coordinate matches no row level.
    pub fn band_of(&self, y: f64) -> Option<RowBand> {
        if y == self.bottom {
            Some(RowBand::Bottom)
        } else if y == self.top {
            Some(RowBand::Top)
        } else if self.middle == Some(y) {
            Some(RowBand::Middle)
        } else {
            None
        }
    }
}

/// Physical rack dimensions used for path synthesis.
///
/// `slot_depth` is the depth of a single-deep slot (the middle row is twice
/// as deep); `lane_width` is the width of the travel lane between rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RackDims {
    /// Depth of a single-deep storage slot.
    pub slot_depth: f64,
    /// Width of an aisle travel lane.
    pub lane_width: f64,
}

impl Default for RackDims {
    fn default() -> Self {
        Self {
            slot_depth: 4.5,
            lane_width: 12.0,
        }
    }
}

/// Warehouse layout: rows, vertical aisles, section boundaries, and rack
/// dimensions.
///
/// # Examples
///
/// ```
/// use pick_routing::layout::{Layout, RowLevels};
///
/// let rows = RowLevels::new(0.0, Some(18.75), 37.5).unwrap();
/// let layout = Layout::new(vec![0.0, 25.0, 50.0], vec![30.0], rows).unwrap();
/// assert_eq!(layout.num_sections(), 2);
/// assert_eq!(layout.section_of(10.0), 0);
/// assert_eq!(layout.section_of(40.0), 1);
/// assert_eq!(layout.nearest_aisle(22.0), 25.0);
/// ```
#[derive(Debug, Clone)]
pub struct Layout {
    aisles_x: Vec<f64>,
    section_bounds_x: Vec<f64>,
    rows: RowLevels,
    dims: RackDims,
}

impl Layout {
    /// Creates a layout from vertical aisle x-coordinates, section boundary
    /// x-thresholds, and row levels.
    ///
    /// At least one aisle is required; cross-row paths whose lanes do not
    /// coincide must transfer through a vertical aisle.
    pub fn new(aisles_x: Vec<f64>, section_bounds_x: Vec<f64>, rows: RowLevels) -> Result<Self> {
        if aisles_x.is_empty() {
            return Err(PickError::DegenerateLayout(
                "at least one vertical aisle is required".into(),
            ));
        }
        Ok(Self {
            aisles_x,
            section_bounds_x,
            rows,
            dims: RackDims::default(),
        })
    }

    /// Replaces the default rack dimensions.
    pub fn with_dims(mut self, dims: RackDims) -> Self {
        self.dims = dims;
        self
    }

    /// Row levels of this layout.
    pub fn rows(&self) -> &RowLevels {
        &self.rows
    }

    /// Rack dimensions of this layout.
    pub fn dims(&self) -> &RackDims {
        &self.dims
    }

    /// Vertical aisle x-coordinates.
    pub fn aisles_x(&self) -> &[f64] {
        &self.aisles_x
    }

    /// Number of sections the boundaries partition the floor into.
    pub fn num_sections(&self) -> usize {
        self.section_bounds_x.len() + 1
    }

    /// Section id of an x-coordinate: the number of boundaries strictly
    /// below it.
    pub fn section_of(&self, x: f64) -> usize {
        self.section_bounds_x.iter().filter(|&&b| x > b).count()
    }

    /// The aisle x-coordinate closest to `x`; ties resolve toward the later
    /// aisle in the sequence.
    pub fn nearest_aisle(&self, x: f64) -> f64 {
        let mut best = self.aisles_x[0];
        let mut best_dist = f64::INFINITY;
        for &ax in &self.aisles_x {
            let d = (x - ax).abs();
            if d <= best_dist {
                best_dist = d;
                best = ax;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_levels_explicit() {
        let rows = RowLevels::new(0.0, Some(18.75), 37.5).expect("valid");
        assert_eq!(rows.bottom(), 0.0);
        assert_eq!(rows.middle(), Some(18.75));
        assert_eq!(rows.top(), 37.5);
    }

    #[test]
    fn test_row_levels_rejects_collapsed() {
        assert!(RowLevels::new(5.0, None, 5.0).is_err());
        assert!(RowLevels::new(5.0, None, 1.0).is_err());
        assert!(RowLevels::new(0.0, Some(0.0), 10.0).is_err());
        assert!(RowLevels::new(0.0, Some(10.0), 10.0).is_err());
        assert!(RowLevels::new(0.0, Some(f64::NAN), 10.0).is_err());
    }

    #[test]
    fn test_row_levels_infer_three() {
        let rows = RowLevels::infer([37.5, 0.0, 18.75, 0.0, 37.5]).expect("valid");
        assert_eq!(rows.bottom(), 0.0);
        assert_eq!(rows.middle(), Some(18.75));
        assert_eq!(rows.top(), 37.5);
    }

    #[test]
    fn test_row_levels_infer_two() {
        let rows = RowLevels::infer([10.0, 0.0]).expect("valid");
        assert_eq!(rows.middle(), None);
    }

    #[test]
    fn test_row_levels_infer_degenerate() {
        assert!(RowLevels::infer([]).is_err());
        assert!(RowLevels::infer([3.0, 3.0]).is_err());
        // Two interior levels: no single middle row.
        assert!(RowLevels::infer([0.0, 10.0, 20.0, 30.0]).is_err());
    }

    #[test]
    fn test_band_classification() {
        let rows = RowLevels::new(0.0, Some(18.75), 37.5).expect("valid");
        assert_eq!(rows.band_of(0.0), Some(RowBand::Bottom));
        assert_eq!(rows.band_of(18.75), Some(RowBand::Middle));
        assert_eq!(rows.band_of(37.5), Some(RowBand::Top));
        assert_eq!(rows.band_of(1.0), None);

        let two_rows = RowLevels::new(0.0, None, 37.5).expect("valid");
        assert_eq!(two_rows.band_of(18.75), None);
    }

    #[test]
    fn test_layout_requires_aisle() {
        let rows = RowLevels::new(0.0, None, 10.0).expect("valid");
        assert!(Layout::new(vec![], vec![], rows).is_err());
    }

    #[test]
    fn test_section_of_counts_thresholds() {
        let rows = RowLevels::new(0.0, None, 10.0).expect("valid");
        let layout = Layout::new(vec![0.0], vec![145.5, 265.5], rows).expect("valid");
        assert_eq!(layout.num_sections(), 3);
        assert_eq!(layout.section_of(100.0), 0);
        assert_eq!(layout.section_of(145.5), 0);
        assert_eq!(layout.section_of(200.0), 1);
        assert_eq!(layout.section_of(300.0), 2);
    }

    #[test]
    fn test_nearest_aisle_tie_takes_later() {
        let rows = RowLevels::new(0.0, None, 10.0).expect("valid");
        let layout = Layout::new(vec![10.0, 30.0], vec![], rows).expect("valid");
        assert_eq!(layout.nearest_aisle(12.0), 10.0);
        assert_eq!(layout.nearest_aisle(29.0), 30.0);
        // 20.0 is equidistant; the later aisle wins.
        assert_eq!(layout.nearest_aisle(20.0), 30.0);
    }

    #[test]
    fn test_default_rack_dims() {
        let dims = RackDims::default();
        assert_eq!(dims.slot_depth, 4.5);
        assert_eq!(dims.lane_width, 12.0);
    }
}
