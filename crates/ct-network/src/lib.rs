//! `ct-network` — transit multigraph, spatial indexing, and traffic data.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`network`] | `TransitNetwork` (CSR multigraph + R-tree), builder, `LinkSpec`  |
//! | [`traffic`] | `TrafficTable`: flow per node pair and `TimePeriod`              |
//! | [`loader`]  | `load_traffic_csv`, `load_traffic_reader`                        |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `ct-core` types.        |

pub mod error;
pub mod loader;
pub mod network;
pub mod traffic;

#[cfg(test)]
mod tests;

pub use error::{NetworkError, NetworkResult};
pub use loader::{load_traffic_csv, load_traffic_reader};
pub use network::{LinkSpec, TransitNetwork, TransitNetworkBuilder};
pub use traffic::TrafficTable;
