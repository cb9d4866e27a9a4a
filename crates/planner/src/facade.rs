//! Re-exported APIs for consumers of the planner crate.

pub use crate::cargo::{
    BoxCount, CargoError, CargoGridLayout, CargoGroup, CargoLayout, box_breakdown,
    format_breakdown,
};
pub use crate::route::actions::{ActionSet, Site, extract_actions};
pub use crate::route::{
    CargoLoad, CargoProfile, PlannedDelivery, RouteCompletion, RouteItem, RoutePlan, RouteStop,
    StopKind, generate_route, generate_route_with,
};
pub use hauler_config::{CommodityLeg, Mission, PlannerConfig};
pub use hauler_universe::{LocationGraph, LocationId};
