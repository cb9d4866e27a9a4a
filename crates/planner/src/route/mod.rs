//! Route generation: extraction, greedy construction and 2-opt refinement.

pub mod actions;
mod greedy;
mod refine;

use std::collections::HashMap;
use std::fmt;

use hauler_config::{Mission, PlannerConfig};
use hauler_core::Scu;
use hauler_universe::LocationGraph;
use serde::Serialize;

use self::actions::{Site, extract_actions};

/// What happens at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Pickup,
    Delivery,
}

impl StopKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StopKind::Pickup => "pickup",
            StopKind::Delivery => "delivery",
        }
    }
}

impl fmt::Display for StopKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cargo handled at a stop for one commodity leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteItem {
    /// Id of the leg's pickup action, shared by its delivery.
    pub leg_id: String,
    /// Index of the leg's pickup action in extraction order.
    #[serde(skip)]
    pub pickup: usize,
    pub mission_id: String,
    pub commodity: String,
    pub quantity: Scu,
    pub max_box_size: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStop {
    pub id: String,
    pub kind: StopKind,
    pub location: String,
    #[serde(skip)]
    pub site: Site,
    pub items: Vec<RouteItem>,
}

impl RouteStop {
    pub fn scu(&self) -> Scu {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Whether construction visited every obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteCompletion {
    Complete,
    /// No candidate was left while these action ids were still pending.
    Incomplete {
        pending_pickups: Vec<String>,
        pending_deliveries: Vec<String>,
    },
}

impl fmt::Display for RouteCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteCompletion::Complete => f.write_str("complete"),
            RouteCompletion::Incomplete {
                pending_pickups,
                pending_deliveries,
            } => write!(
                f,
                "incomplete ({} pickups and {} deliveries pending)",
                pending_pickups.len(),
                pending_deliveries.len()
            ),
        }
    }
}

/// A delivery obligation in extraction order, for cargo grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedDelivery {
    pub id: String,
    pub location: String,
    pub item: RouteItem,
}

/// On-board cargo around one stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CargoLoad {
    pub before: Scu,
    pub after: Scu,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CargoProfile {
    pub loads: Vec<CargoLoad>,
    pub peak: Scu,
}

/// Result of one generation run. Rebuilt from scratch on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub stops: Vec<RouteStop>,
    pub completion: RouteCompletion,
    /// Location names that did not resolve, in first-seen order.
    pub unresolved_locations: Vec<String>,
    pub deliveries: Vec<PlannedDelivery>,
    /// Adjacent-edge cost before refinement.
    pub constructed_cost: f64,
    total_cost: f64,
    /// Delivery swaps accepted by refinement.
    pub refinement_swaps: usize,
}

impl RoutePlan {
    pub fn is_complete(&self) -> bool {
        self.completion == RouteCompletion::Complete
    }

    /// Sum of travel costs between consecutive stops.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn respects_precedence(&self) -> bool {
        respects_precedence(&self.stops)
    }

    /// SCU on board before and after every stop, plus the peak.
    pub fn cargo_profile(&self) -> CargoProfile {
        let mut on_board: Scu = 0;
        let mut peak: Scu = 0;
        let loads = self
            .stops
            .iter()
            .map(|stop| {
                let before = on_board;
                on_board = match stop.kind {
                    StopKind::Pickup => on_board.saturating_add(stop.scu()),
                    StopKind::Delivery => on_board.saturating_sub(stop.scu()),
                };
                peak = peak.max(on_board);
                CargoLoad {
                    before,
                    after: on_board,
                }
            })
            .collect();
        CargoProfile { loads, peak }
    }
}

/// Plan a route against the built-in location graph with default weights.
pub fn generate_route(missions: &[Mission]) -> RoutePlan {
    generate_route_with(LocationGraph::builtin(), &PlannerConfig::default(), missions)
}

/// Plan a route against `graph` using the given weights.
pub fn generate_route_with(
    graph: &LocationGraph,
    config: &PlannerConfig,
    missions: &[Mission],
) -> RoutePlan {
    let actions = extract_actions(graph, missions);
    log::debug!(
        "extracted {} pickups over {} sites",
        actions.pickups.len(),
        actions.sites.len()
    );

    let greedy::Construction {
        mut stops,
        completion,
    } = greedy::construct(graph, config, &actions);

    let constructed_cost = route_cost(graph, &stops);
    let refinement_swaps = refine::refine(graph, &mut stops, config.max_refine_passes);
    let total_cost = route_cost(graph, &stops);
    log::info!(
        "planned {} stops, cost {constructed_cost:.1} -> {total_cost:.1}",
        stops.len()
    );

    let deliveries = actions
        .deliveries
        .iter()
        .map(|delivery| PlannedDelivery {
            id: delivery.id.clone(),
            location: actions.sites.get(delivery.site).display.clone(),
            item: delivery.item.clone(),
        })
        .collect();

    RoutePlan {
        stops,
        completion,
        unresolved_locations: actions.sites.unresolved().to_vec(),
        deliveries,
        constructed_cost,
        total_cost,
        refinement_swaps,
    }
}

/// Travel cost between two stops.
pub fn stop_cost(graph: &LocationGraph, from: &RouteStop, to: &RouteStop) -> f64 {
    graph.travel_cost(from.site.location(), to.site.location())
}

/// Sum of travel costs between consecutive stops.
pub fn route_cost(graph: &LocationGraph, stops: &[RouteStop]) -> f64 {
    stops
        .windows(2)
        .map(|pair| stop_cost(graph, &pair[0], &pair[1]))
        .sum()
}

/// Every delivered leg was picked up at an earlier stop.
pub fn respects_precedence(stops: &[RouteStop]) -> bool {
    let mut picked_at: HashMap<usize, usize> = HashMap::new();
    for (index, stop) in stops.iter().enumerate() {
        if stop.kind == StopKind::Pickup {
            for item in &stop.items {
                picked_at.insert(item.pickup, index);
            }
        }
    }
    stops.iter().enumerate().all(|(index, stop)| {
        stop.kind == StopKind::Pickup
            || stop.items.iter().all(|item| {
                picked_at
                    .get(&item.pickup)
                    .is_some_and(|&pickup| pickup < index)
            })
    })
}
