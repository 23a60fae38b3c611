//! `ct-routing` — traffic-aware routing over a `TransitNetwork`.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`weight`]     | `WeightContext`, `edge_cost`, congestion model                |
//! | [`path`]       | `PathResult`, `MultiModalPath`                                |
//! | [`dijkstra`]   | `Router` trait, `TrafficDijkstra`, `shortest_distance_path`   |
//! | [`astar`]      | `AStarRouter`, emergency dispatch                             |
//! | [`emergency`]  | `simulate_emergency_delay`, `EmergencyDelay`                  |
//! | [`memo`]       | `MemoRouter` path cache around any `Router`                   |
//! | [`multimodal`] | `multimodal_route` over `(node, mode)` states                 |
//! | [`planner`]    | `plan_all_modes`, `route_batch`, `ModeComparison`             |
//! | [`error`]      | `RoutingError`, `RoutingResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Runs `plan_all_modes` and `route_batch` on Rayon's pool.   |

pub mod astar;
pub mod dijkstra;
pub mod emergency;
pub mod error;
pub mod memo;
pub mod multimodal;
pub mod path;
pub mod planner;
pub mod weight;


pub use astar::AStarRouter;
pub use dijkstra::{shortest_distance_path, Router, TrafficDijkstra};
pub use emergency::{path_length_m, simulate_emergency_delay, EmergencyDelay};
pub use error::{RoutingError, RoutingResult};
pub use memo::MemoRouter;
pub use multimodal::{candidate_modes, multimodal_route};
pub use path::{MultiModalPath, PathResult};
pub use planner::{plan_all_modes, route_batch, ModeComparison, ModePlan, PlanMode};
pub use weight::{edge_cost, EmergencyContext, WeightContext};
