//! Post-hoc delay imposed on a regular vehicle by an emergency corridor.
//!
//! The model is flat: if the car shares *any* edge with the
//! emergency vehicle's path, it is charged
//! `config.emergency_delay_fraction × car total distance` as extra distance.
//! Queuing and yielding near the corridor is not re-simulated through the
//! weight model.

use rustc_hash::FxHashSet;

use ct_core::{NodeId, RoutingConfig};
use ct_network::TransitNetwork;

/// Outcome of [`simulate_emergency_delay`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmergencyDelay {
    /// The car's path, unmodified.
    pub car_path: Vec<NodeId>,
    /// Car hops also traversed (in either direction) by the emergency vehicle.
    pub overlap_edges: Vec<(NodeId, NodeId)>,
    /// Physical length of the shared hops in metres.
    pub overlap_distance_m: f64,
    /// Extra distance charged to the car in metres; zero without overlap.
    pub delay_distance_m: f64,
}

impl EmergencyDelay {
    pub fn has_overlap(&self) -> bool {
        !self.overlap_edges.is_empty()
    }
}

#[inline]
fn unordered(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Shortest edge joining `a` and `b` in either stored direction, restricted
/// to categories accepted by `filter`.
fn pair_length<F>(network: &TransitNetwork, a: NodeId, b: NodeId, filter: F) -> Option<f64>
where
    F: Fn(ct_core::RoadCategory) -> bool + Copy,
{
    network
        .shortest_edge_between(a, b, filter)
        .or_else(|| network.shortest_edge_between(b, a, filter))
        .map(|e| network.edge_length_m[e.index()])
}

/// Total physical length of a node path, taking the shortest link per hop.
/// Hops with no link contribute nothing.
pub fn path_length_m(network: &TransitNetwork, path: &[NodeId]) -> f64 {
    path.windows(2)
        .filter_map(|w| pair_length(network, w[0], w[1], |_| true))
        .sum()
}

/// Compare a car path against an emergency path and compute the delay
/// surcharge.
///
/// Shared hops are matched as unordered node pairs.  Each shared hop's
/// representative length is its shortest physical link (existing, potential,
/// bus or metro).
pub fn simulate_emergency_delay(
    network:        &TransitNetwork,
    config:         &RoutingConfig,
    car_path:       &[NodeId],
    emergency_path: &[NodeId],
) -> EmergencyDelay {
    let corridor: FxHashSet<(NodeId, NodeId)> = emergency_path
        .windows(2)
        .map(|w| unordered(w[0], w[1]))
        .collect();

    let overlap_edges: Vec<(NodeId, NodeId)> = car_path
        .windows(2)
        .map(|w| (w[0], w[1]))
        .filter(|&(a, b)| corridor.contains(&unordered(a, b)))
        .collect();

    let overlap_distance_m: f64 = overlap_edges
        .iter()
        .filter_map(|&(a, b)| pair_length(network, a, b, |c| c.is_physical()))
        .sum();

    let delay_distance_m = if overlap_edges.is_empty() {
        0.0
    } else {
        config.emergency_delay_fraction * path_length_m(network, car_path)
    };

    if !overlap_edges.is_empty() {
        log::debug!(
            "emergency overlap: {} hops, {overlap_distance_m:.0} m shared, {delay_distance_m:.0} m delay",
            overlap_edges.len()
        );
    }

    EmergencyDelay {
        car_path: car_path.to_vec(),
        overlap_edges,
        overlap_distance_m,
        delay_distance_m,
    }
}
