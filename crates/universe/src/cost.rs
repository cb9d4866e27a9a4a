//! Heuristic travel cost between locations.
//!
//! Costs are coarse tiers rather than distances: an interstellar jump always
//! outweighs any hop inside a system, and a hop between planets outweighs a
//! hop around one body. Every rule is symmetric in its two arguments.

use hauler_core::LocationKind;
use hauler_core::constants::{
    INTERPLANETARY_COST, INTERSTELLAR_COST, LOCAL_COST, UNKNOWN_LOCATION_COST,
};

use crate::graph::{LocationGraph, LocationId};

/// Which rule produced a cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostBasis {
    /// At least one endpoint is not in the graph.
    Unresolved,
    Identical,
    Interstellar,
    /// Weighted sector/orbit distance inside one system.
    Polar,
    /// Same moon or planet, no usable coordinates.
    Local,
    /// Different bodies of one system, no usable coordinates.
    Interplanetary,
}

/// A travel cost together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelCost {
    pub value: f64,
    pub basis: CostBasis,
}

impl LocationGraph {
    /// Cost between two optional handles; `None` stands for an unresolved name.
    pub fn travel_cost(&self, a: Option<LocationId>, b: Option<LocationId>) -> f64 {
        self.explain_cost(a, b).value
    }

    /// Cost between two free-text names, logging names that do not resolve.
    pub fn cost_by_name(&self, a: &str, b: &str) -> f64 {
        let id_a = self.resolve(a);
        let id_b = self.resolve(b);
        if id_a.is_none() {
            log::warn!("unknown location `{}`, using fallback travel cost", a.trim());
        }
        if id_b.is_none() {
            log::warn!("unknown location `{}`, using fallback travel cost", b.trim());
        }
        self.travel_cost(id_a, id_b)
    }

    /// Cost between two nodes together with the rule that produced it.
    ///
    /// Without coordinates the tiers order strictly: identical < local <
    /// interplanetary < interstellar. Polar costs are floored at
    /// [`LOCAL_COST`], so a short hop between different bodies can cost the
    /// same as a hop around one body.
    pub fn explain_cost(&self, a: Option<LocationId>, b: Option<LocationId>) -> TravelCost {
        let (Some(a), Some(b)) = (a, b) else {
            return TravelCost {
                value: UNKNOWN_LOCATION_COST,
                basis: CostBasis::Unresolved,
            };
        };
        if a == b {
            return TravelCost {
                value: 0.0,
                basis: CostBasis::Identical,
            };
        }
        if self.system_of(a) != self.system_of(b) {
            return TravelCost {
                value: INTERSTELLAR_COST,
                basis: CostBasis::Interstellar,
            };
        }

        if let (Some(pa), Some(pb)) = (self.coordinates_of(a), self.coordinates_of(b)) {
            // Inherited coordinates put every site of one moon at distance zero.
            return TravelCost {
                value: pa.distance(&pb).max(LOCAL_COST),
                basis: CostBasis::Polar,
            };
        }

        if self.shares_ancestor(a, b, LocationKind::Moon)
            || self.shares_ancestor(a, b, LocationKind::Planet)
        {
            TravelCost {
                value: LOCAL_COST,
                basis: CostBasis::Local,
            }
        } else {
            TravelCost {
                value: INTERPLANETARY_COST,
                basis: CostBasis::Interplanetary,
            }
        }
    }

    /// Whether both nodes sit under the same ancestor of `kind`.
    pub fn shares_ancestor(&self, a: LocationId, b: LocationId, kind: LocationKind) -> bool {
        match (self.ancestor_of_type(a, kind), self.ancestor_of_type(b, kind)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }
}
