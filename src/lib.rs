//! Cargo hauling route planner.
//!
//! The workspace crates are re-exported here so the binaries and the
//! integration tests share one entry point: locations and travel costs live in
//! [`universe`], mission files in [`config`], route construction and cargo
//! grouping in [`planner`], and CSV/JSON writers in [`export`].

pub use hauler_config as config;
pub use hauler_core as primitives;
pub use hauler_export as export;
pub use hauler_planner as planner;
pub use hauler_universe as universe;

pub use hauler_planner::{RoutePlan, generate_route, generate_route_with};

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
