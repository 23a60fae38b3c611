//! `ct-core` — foundational types for the city transit routing workspace.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `LinkKey`                             |
//! | [`geo`]         | `Position` (projected metres)                             |
//! | [`transport`]   | `TransportMode`, `RoadCategory`, `ModeTable<T>`           |
//! | [`time`]        | `TimePeriod`                                              |
//! | [`config`]      | `RoutingConfig`                                           |
//! | [`error`]       | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;
pub mod transport;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RoutingConfig;
pub use error::{CoreError, CoreResult};
pub use geo::Position;
pub use ids::{EdgeId, LinkKey, NodeId};
pub use time::TimePeriod;
pub use transport::{ModeTable, RoadCategory, TransportMode};
