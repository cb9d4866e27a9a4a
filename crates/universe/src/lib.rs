//! Hierarchical location graph and the travel cost model built on it.

pub mod builtin;
pub mod cost;
pub mod graph;

pub use cost::{CostBasis, TravelCost};
pub use graph::{GraphError, LocationGraph, LocationId, LocationNode};
