//! Route planner crate: turns a mission list into an ordered pickup and delivery plan.

pub mod cargo;
pub mod route;

pub use facade::*;

mod facade;
