//! Greedy batch assignment.
//!
//! # Algorithm
//!
//! Works through one section's pending quantities in four phases, driven
//! exclusively by the section's distance-sorted candidate list:
//!
//! 1. **Pre-split** — every location holding at least a full route's worth
//!    of layers sheds `quantity / capacity` leg-less singleton routes, each
//!    consuming exactly `capacity`.
//! 2. **Seed** — one pass over the candidates picks the first pair whose
//!    endpoints both have positive quantity summing to at most `capacity`;
//!    both are consumed to zero and open a new route.
//! 3. **Extend** — while the route is under capacity, one pass over the
//!    candidates looks for a leg sharing exactly one endpoint with the
//!    route (the shared endpoint under degree 2, the joining endpoint
//!    affordable, the side tag compatible). A fruitless full pass closes
//!    the route.
//! 4. **Leftover** — once at most one location retains quantity, anything
//!    left becomes its own singleton route.
//!
//! Finding no seed or extension is not an error; the leftover phase always
//! drains the section.
//!
//! # Termination
//!
//! Every successful seed or extension zeroes at least one location's
//! pending quantity, which never increases; each extension attempt is one
//! bounded pass, and attempts per route are capped at the candidate count.
//! The engine therefore halts within O(n²) candidate evaluations for n
//! locations.

use tracing::debug;

use crate::catalog::Candidate;
use crate::models::{Leg, PickRoute};

/// Assignment parameters.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum total layers combinable into a single route.
    pub capacity: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { capacity: 5 }
    }
}

/// Batches one section's pending quantities into routes.
///
/// `pending` is the whole-registry quantity arena; `members` are the
/// section's registry indices and `candidates` its distance-sorted
/// catalog. Consumes every member's quantity to zero and returns the
/// section's routes.
///
/// # Examples
///
/// ```
/// use pick_routing::assignment::{assign_section, BatchConfig};
/// use pick_routing::catalog::Candidate;
/// use pick_routing::models::SideTag;
///
/// let candidates = vec![
///     Candidate { a: 0, b: 1, tag: SideTag::Either, distance: 10.0 },
///     Candidate { a: 1, b: 2, tag: SideTag::Either, distance: 15.0 },
///     Candidate { a: 0, b: 2, tag: SideTag::Either, distance: 20.0 },
/// ];
/// let mut pending = vec![3, 2, 6];
///
/// let routes = assign_section(
///     &mut pending,
///     &[0, 1, 2],
///     &candidates,
///     &BatchConfig::default(),
/// );
/// // One full pre-split singleton, the 3+2 pair, one leftover singleton.
/// assert_eq!(routes.len(), 3);
/// assert_eq!(pending, vec![0, 0, 0]);
/// let total: f64 = routes.iter().map(|r| r.total_distance()).sum();
/// assert!((total - 10.0).abs() < 1e-10);
/// ```
pub fn assign_section(
    pending: &mut [u32],
    members: &[usize],
    candidates: &[Candidate],
    config: &BatchConfig,
) -> Vec<PickRoute> {
    let capacity = config.capacity;
    let mut routes = Vec::new();

    // Phase 1: full-capacity singletons.
    for &loc in members {
        let quantity = pending[loc];
        if quantity >= capacity {
            for _ in 0..quantity / capacity {
                routes.push(PickRoute::singleton(loc, capacity));
            }
            pending[loc] = quantity % capacity;
            debug!(
                location = loc,
                splits = quantity / capacity,
                remainder = pending[loc],
                "pre-split full-capacity singletons"
            );
        }
    }

    // Phases 2 and 3: pair, then chain, until at most one location holds
    // quantity.
    while members.iter().filter(|&&m| pending[m] > 0).count() > 1 {
        let Some(mut route) = seed(pending, candidates, capacity) else {
            break;
        };
        grow(&mut route, pending, candidates, capacity);
        routes.push(route);
    }

    // Phase 4: leftovers.
    for &loc in members {
        if pending[loc] > 0 {
            debug!(
                location = loc,
                layers = pending[loc],
                "no compatible candidate; closing leftover singleton"
            );
            routes.push(PickRoute::singleton(loc, pending[loc]));
            pending[loc] = 0;
        }
    }

    routes
}

/// One pass over the candidates for the first affordable pair.
fn seed(pending: &mut [u32], candidates: &[Candidate], capacity: u32) -> Option<PickRoute> {
    for candidate in candidates {
        let (qa, qb) = (pending[candidate.a], pending[candidate.b]);
        if qa > 0 && qb > 0 && qa + qb <= capacity {
            pending[candidate.a] = 0;
            pending[candidate.b] = 0;
            debug!(
                a = candidate.a,
                b = candidate.b,
                layers = qa + qb,
                distance = candidate.distance,
                "seeded route"
            );
            return Some(PickRoute::seeded(leg_of(candidate), qa, qb));
        }
    }
    None
}

/// Chains extensions onto the route until it is full or a full candidate
/// pass finds none.
fn grow(route: &mut PickRoute, pending: &mut [u32], candidates: &[Candidate], capacity: u32) {
    // Each successful extension zeroes one location, so no more than
    // `candidates.len()` attempts can ever succeed; a fruitless pass breaks
    // out. Together these bound the loop.
    let mut attempts = 0;
    while route.total_layers() < capacity && attempts < candidates.len() {
        attempts += 1;
        let Some((candidate, joined)) = find_extension(route, pending, candidates, capacity)
        else {
            break;
        };
        let layers = pending[joined];
        pending[joined] = 0;
        route.extend(leg_of(&candidate), layers);
        debug!(
            joined,
            layers,
            total = route.total_layers(),
            "extended route"
        );
    }
}

/// One pass over the candidates for a leg that legally extends the route.
fn find_extension(
    route: &PickRoute,
    pending: &[u32],
    candidates: &[Candidate],
    capacity: u32,
) -> Option<(Candidate, usize)> {
    for candidate in candidates {
        let a_in = route.contains(candidate.a);
        let b_in = route.contains(candidate.b);
        // Exactly one endpoint inside keeps the route a chain.
        if a_in == b_in {
            continue;
        }
        let (anchor, joined) = if a_in {
            (candidate.a, candidate.b)
        } else {
            (candidate.b, candidate.a)
        };
        if route.degree_of(anchor) >= 2 {
            continue;
        }
        if pending[joined] == 0 {
            continue;
        }
        if route.total_layers() + pending[joined] > capacity {
            continue;
        }
        if !route.accepts(candidate.tag) {
            continue;
        }
        return Some((*candidate, joined));
    }
    None
}

fn leg_of(candidate: &Candidate) -> Leg {
    Leg {
        from: candidate.a,
        to: candidate.b,
        tag: candidate.tag,
        distance: candidate.distance,
    }
}
