//! Location registry: arena of storage slots with name lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PickError, Result};
use crate::geometry::Point;
use crate::layout::Layout;

/// A raw registry record, as loaded from a layout file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Canonical location name.
    pub name: String,
    /// x-coordinate of the slot center.
    pub x: f64,
    /// y-coordinate of the slot center.
    pub y: f64,
}

impl LocationRecord {
    /// Creates a record.
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }
}

/// A storage location with its section assignment and pending pick
/// quantity.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    name: String,
    x: f64,
    y: f64,
    section: usize,
    layers: u32,
}

impl Location {
    /// Location name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// x-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Slot center as a geometry point.
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Section id assigned from the layout's boundaries.
    pub fn section(&self) -> usize {
        self.section
    }

    /// Pending pick quantity.
    pub fn layers(&self) -> u32 {
        self.layers
    }
}

/// The location registry: an indexed arena of locations plus a name → index
/// map.
///
/// Indices are stable and follow record order, which makes downstream pair
/// enumeration and assignment deterministic.
///
/// # Examples
///
/// ```
/// use pick_routing::layout::{Layout, RowLevels};
/// use pick_routing::models::{LocationRecord, Registry};
///
/// let rows = RowLevels::new(0.0, None, 10.0).unwrap();
/// let layout = Layout::new(vec![0.0], vec![], rows).unwrap();
/// let records = vec![
///     LocationRecord::new("A-01", 5.0, 0.0),
///     LocationRecord::new("A-02", 15.0, 10.0),
/// ];
///
/// let mut registry = Registry::from_records(&records, &layout).unwrap();
/// registry.set_pending("A-01", 3).unwrap();
/// assert_eq!(registry.location(0).layers(), 3);
/// assert!(registry.set_pending("A-03", 1).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    locations: Vec<Location>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    /// Builds a registry from records, assigning each location its section
    /// id from the layout boundaries. Pending quantities start at zero.
    ///
    /// Fails with [`PickError::DuplicateLocation`] on repeated names.
    pub fn from_records(records: &[LocationRecord], layout: &Layout) -> Result<Self> {
        let mut locations = Vec::with_capacity(records.len());
        let mut by_name = HashMap::with_capacity(records.len());
        for record in records {
            if by_name
                .insert(record.name.clone(), locations.len())
                .is_some()
            {
                return Err(PickError::DuplicateLocation(record.name.clone()));
            }
            locations.push(Location {
                name: record.name.clone(),
                x: record.x,
                y: record.y,
                section: layout.section_of(record.x),
                layers: 0,
            });
        }
        Ok(Self { locations, by_name })
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if the registry holds no locations.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Returns the location at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn location(&self, index: usize) -> &Location {
        &self.locations[index]
    }

    /// All locations, in registry order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Index of a location by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Sets the pending quantity of a named location.
    ///
    /// Fails with [`PickError::MissingLocation`] for unknown names and
    /// [`PickError::InvalidQuantity`] for negative quantities.
    pub fn set_pending(&mut self, name: &str, layers: i64) -> Result<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| PickError::MissingLocation(name.to_string()))?;
        if layers < 0 {
            return Err(PickError::InvalidQuantity {
                name: name.to_string(),
                layers,
            });
        }
        self.locations[index].layers = layers as u32;
        Ok(())
    }

    /// Snapshot of all pending quantities, indexed like the arena.
    pub fn pending(&self) -> Vec<u32> {
        self.locations.iter().map(|l| l.layers).collect()
    }

    /// Indices of the locations in one section, in registry order.
    pub fn section_members(&self, section: usize) -> Vec<usize> {
        self.locations
            .iter()
            .enumerate()
            .filter(|(_, l)| l.section == section)
            .map(|(i, _)| i)
            .collect()
    }
}
