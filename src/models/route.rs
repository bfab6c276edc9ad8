//! Pick route types: side tags, legs, and capacity-bounded routes.

use serde::{Deserialize, Serialize};

use crate::layout::ApproachSide;

/// Which middle-row approach side a leg services, or that its routing is
/// unambiguous.
///
/// `Either` legs never touch the middle row from an ambiguous direction and
/// are compatible with any route; `Fixed` legs commit the route to one
/// physical side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideTag {
    /// Routing is unambiguous; always compatible.
    Either,
    /// The leg services the middle row from one fixed side.
    Fixed(ApproachSide),
}

/// A traversed edge between two locations within a route.
///
/// `from` and `to` are registry indices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Registry index of the first endpoint.
    pub from: usize,
    /// Registry index of the second endpoint.
    pub to: usize,
    /// Approach-side tag of the traversal.
    pub tag: SideTag,
    /// Travel distance of this leg.
    pub distance: f64,
}

/// A location's contribution to one route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RouteMember {
    location: usize,
    layers: u32,
    degree: u8,
}

impl RouteMember {
    /// Registry index of the member location.
    pub fn location(&self) -> usize {
        self.location
    }

    /// Quantity consumed from this location by the route.
    pub fn layers(&self) -> u32 {
        self.layers
    }

    /// Number of legs anchored at this location (at most 2 in a simple
    /// chain).
    pub fn degree(&self) -> u8 {
        self.degree
    }
}

/// One forklift trip: an ordered chain of legs, or a leg-less singleton for
/// pre-split and leftover quantity.
///
/// The route tracks, per member, the consumed quantity and the leg degree;
/// the degree counters are what enforce the simple-path shape. Once a
/// `Fixed` leg joins, the route is committed to that approach side.
///
/// # Examples
///
/// ```
/// use pick_routing::models::{Leg, PickRoute, SideTag};
///
/// let route = PickRoute::seeded(
///     Leg { from: 0, to: 1, tag: SideTag::Either, distance: 10.0 },
///     3,
///     2,
/// );
/// assert_eq!(route.total_layers(), 5);
/// assert!((route.total_distance() - 10.0).abs() < 1e-10);
/// assert_eq!(route.degree_of(0), 1);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PickRoute {
    members: Vec<RouteMember>,
    legs: Vec<Leg>,
    side: Option<ApproachSide>,
    total_layers: u32,
}

impl PickRoute {
    /// Creates a leg-less route consuming `layers` at a single location.
    pub fn singleton(location: usize, layers: u32) -> Self {
        Self {
            members: vec![RouteMember {
                location,
                layers,
                degree: 0,
            }],
            legs: Vec::new(),
            side: None,
            total_layers: layers,
        }
    }

    /// Creates a route from its first leg, consuming the given quantities
    /// at the leg's two endpoints.
    pub fn seeded(leg: Leg, from_layers: u32, to_layers: u32) -> Self {
        Self {
            members: vec![
                RouteMember {
                    location: leg.from,
                    layers: from_layers,
                    degree: 1,
                },
                RouteMember {
                    location: leg.to,
                    layers: to_layers,
                    degree: 1,
                },
            ],
            legs: vec![leg],
            side: Self::committed_side(None, leg.tag),
            total_layers: from_layers + to_layers,
        }
    }

    /// Appends a leg whose non-member endpoint joins the route, consuming
    /// `layers` there.
    ///
    /// The member endpoint's degree is incremented; the new member starts
    /// at degree 1.
    ///
    /// # Panics
    ///
    /// Panics unless exactly one of the leg's endpoints is already a
    /// member (callers check this before extending).
    pub fn extend(&mut self, leg: Leg, layers: u32) {
        let from_in = self.contains(leg.from);
        let to_in = self.contains(leg.to);
        assert!(
            from_in != to_in,
            "extension leg must share exactly one endpoint with the route"
        );
        let (anchor, joined) = if from_in {
            (leg.from, leg.to)
        } else {
            (leg.to, leg.from)
        };

        for member in &mut self.members {
            if member.location == anchor {
                member.degree += 1;
            }
        }
        self.members.push(RouteMember {
            location: joined,
            layers,
            degree: 1,
        });
        self.side = Self::committed_side(self.side, leg.tag);
        self.total_layers += layers;
        self.legs.push(leg);
    }

    /// Members in join order.
    pub fn members(&self) -> &[RouteMember] {
        &self.members
    }

    /// Legs in traversal order.
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// The approach side this route is committed to, if any `Fixed` leg has
    /// joined.
    pub fn side(&self) -> Option<ApproachSide> {
        self.side
    }

    /// Total quantity consumed by this route.
    pub fn total_layers(&self) -> u32 {
        self.total_layers
    }

    /// Sum of the leg distances. Leg-less singletons contribute zero.
    pub fn total_distance(&self) -> f64 {
        self.legs.iter().map(|l| l.distance).sum()
    }

    /// Returns `true` if this route has no legs.
    pub fn is_singleton(&self) -> bool {
        self.legs.is_empty()
    }

    /// Returns `true` if the location is a member of this route.
    pub fn contains(&self, location: usize) -> bool {
        self.members.iter().any(|m| m.location == location)
    }

    /// Leg degree of a location within this route (0 if absent).
    pub fn degree_of(&self, location: usize) -> u8 {
        self.members
            .iter()
            .find(|m| m.location == location)
            .map_or(0, |m| m.degree)
    }

    /// Returns `true` if a leg with the given tag may join without mixing
    /// approach sides.
    pub fn accepts(&self, tag: SideTag) -> bool {
        match tag {
            SideTag::Either => true,
            SideTag::Fixed(side) => self.side.map_or(true, |committed| committed == side),
        }
    }

    fn committed_side(current: Option<ApproachSide>, tag: SideTag) -> Option<ApproachSide> {
        match (current, tag) {
            (None, SideTag::Fixed(side)) => Some(side),
            (current, _) => current,
        }
    }
}
