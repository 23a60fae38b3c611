//! Bus-stop ↔ metro-station connection scoring.
//!
//! A greedy ranking: each candidate pair is scored on its own and the best
//! `config.max_recommendations` are returned.  Chosen connections are never
//! re-evaluated jointly.
//!
//! ```text
//! demand = connection_demand_share × Σ demand entries touching either endpoint
//! score  = demand / (max(distance_m, min_connection_distance_m) / 1000 × connection_score_scale)
//! ```

use rustc_hash::FxHashSet;

use ct_core::{NodeId, RoutingConfig};
use ct_network::TransitNetwork;

use crate::{DemandMatrix, PopulationMap, TransitResult};

/// A proposed new bus ↔ metro link.
#[derive(Clone, Debug, PartialEq)]
pub struct RecommendedConnection {
    pub bus_stop:      NodeId,
    pub metro_station: NodeId,
    /// Straight-line distance in metres.
    pub distance_m:    f64,
    /// Estimated daily passengers using the connection.
    pub demand:        f64,
    pub score:         f64,
    /// Residents at both endpoints.  Informational; does not affect `score`.
    pub population:    f64,
}

/// Rank candidate connections between `bus_stops` and `metro_stations`.
///
/// Pairs are skipped when they coincide, lack a position, are already
/// linked directly, or lie farther apart than
/// `config.max_connection_radius_m`.  Metro candidates for each stop come
/// from the network's R-tree.
///
/// # Errors
///
/// Returns `NetworkError::NodeNotFound` for ids outside the network.
pub fn recommend_connections(
    network:        &TransitNetwork,
    bus_stops:      &[NodeId],
    metro_stations: &[NodeId],
    demand:         &DemandMatrix,
    population:     &PopulationMap,
    config:         &RoutingConfig,
) -> TransitResult<Vec<RecommendedConnection>> {
    for &n in bus_stops.iter().chain(metro_stations) {
        network.check_node(n)?;
    }
    let metro: FxHashSet<NodeId> = metro_stations.iter().copied().collect();
    let mut seen_stops: FxHashSet<NodeId> = FxHashSet::default();
    let mut candidates: Vec<RecommendedConnection> = Vec::new();

    for &stop in bus_stops {
        if !seen_stops.insert(stop) {
            continue;
        }
        let Some(stop_pos) = network.position(stop) else { continue };
        let stop_label = network.label(stop);

        for station in network.nodes_within(stop_pos, config.max_connection_radius_m) {
            if station == stop || !metro.contains(&station) || network.has_link(stop, station) {
                continue;
            }
            let Some(station_pos) = network.position(station) else { continue };
            let station_label = network.label(station);

            let distance_m = stop_pos.distance_m(station_pos);
            let demand_est =
                config.connection_demand_share * demand.touching(&[stop_label, station_label]);
            let km = distance_m.max(config.min_connection_distance_m) / 1_000.0;
            let score = demand_est / (km * config.connection_score_scale);

            candidates.push(RecommendedConnection {
                bus_stop: stop,
                metro_station: station,
                distance_m,
                demand: demand_est,
                score,
                population: population.get(stop_label) + population.get(station_label),
            });
        }
    }

    let considered = candidates.len();
    candidates.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| network.label(a.bus_stop).cmp(network.label(b.bus_stop)))
            .then_with(|| network.label(a.metro_station).cmp(network.label(b.metro_station)))
    });
    candidates.truncate(config.max_recommendations);

    log::info!(
        "connection scoring: {considered} candidate pairs, {} recommended",
        candidates.len()
    );
    Ok(candidates)
}
