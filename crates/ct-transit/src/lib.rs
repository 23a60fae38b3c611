//! `ct-transit` — demand data and greedy transit-improvement heuristics.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`demand`]       | `DemandMatrix`, `PopulationMap`, `BusRoute`              |
//! | [`loader`]       | CSV loaders for demand, population, and bus routes       |
//! | [`connections`]  | `recommend_connections`, `RecommendedConnection`         |
//! | [`augmentation`] | `analyse_bus_routes`, `RouteReport`, `SuggestedAddition` |
//! | [`error`]        | `TransitError`, `TransitResult<T>`                       |
//!
//! Both heuristics rank candidates independently; neither solves the joint
//! placement problem.

pub mod augmentation;
pub mod connections;
pub mod demand;
pub mod error;
pub mod loader;

#[cfg(test)]
mod tests;

pub use augmentation::{analyse_bus_routes, RouteReport, SuggestedAddition};
pub use connections::{recommend_connections, RecommendedConnection};
pub use demand::{BusRoute, DemandMatrix, PopulationMap};
pub use error::{TransitError, TransitResult};
pub use loader::{
    load_bus_routes_csv, load_bus_routes_reader, load_demand_csv, load_demand_reader,
    load_population_csv, load_population_reader,
};
