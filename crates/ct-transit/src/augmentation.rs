//! Per-route bus network analysis: current length, demand coverage, and
//! high-demand origin/destination pairs worth extending the route towards.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;

use ct_core::{NodeId, RoutingConfig};
use ct_network::TransitNetwork;
use ct_routing::shortest_distance_path;

use crate::{BusRoute, DemandMatrix, TransitResult};

/// A high-demand OD pair no route serves, near the analysed route.
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestedAddition {
    pub origin:      String,
    pub destination: String,
    pub passengers:  f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RouteReport {
    pub route_id:                String,
    pub stops:                   Vec<String>,
    pub buses_assigned:          u32,
    pub daily_passengers:        f64,
    /// Metres along the stop sequence.
    pub current_length_m:        f64,
    /// Daily passengers on OD pairs inside the route's catchment.
    pub current_demand_coverage: f64,
    /// Highest-demand first, at most `config.suggestions_per_route`.
    pub suggested_additions:     Vec<SuggestedAddition>,
}

/// Analyse every route in `routes`.
///
/// # Route length
///
/// Each consecutive stop pair contributes its shortest direct link if the
/// stops are adjacent, otherwise the length of the shortest physical path,
/// otherwise `config.missing_path_penalty_m`.  Pairs with a stop the network
/// does not contain contribute nothing.
///
/// # Demand coverage
///
/// The catchment is the route's stops plus the immediate neighbours of each
/// stop.  Coverage sums demand entries with both endpoints in the catchment.
///
/// # Suggestions
///
/// OD pairs above `config.high_demand_threshold` whose endpoints are both
/// off every route's stop list, and where either endpoint lies within
/// `config.reach_max_hops` hops of one of this route's stops.
pub fn analyse_bus_routes(
    network: &TransitNetwork,
    routes:  &[BusRoute],
    demand:  &DemandMatrix,
    config:  &RoutingConfig,
) -> TransitResult<Vec<RouteReport>> {
    let served = |label: &str| routes.iter().any(|r| r.serves(label));

    let mut unserved: Vec<(&str, &str, f64)> = demand
        .iter()
        .filter(|&(o, d, p)| p > config.high_demand_threshold && !served(o) && !served(d))
        .collect();
    unserved.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| (a.0, a.1).cmp(&(b.0, b.1))));

    let mut reports = Vec::with_capacity(routes.len());
    for route in routes {
        let stop_ids: Vec<Option<NodeId>> =
            route.stops.iter().map(|s| network.node_by_label(s)).collect();

        let current_length_m = route_length_m(network, &stop_ids, config)?;
        let current_demand_coverage = demand_coverage(network, route, &stop_ids, demand);

        let reach = within_hops(network, stop_ids.iter().flatten().copied(), config.reach_max_hops);
        let near = |label: &str| network.node_by_label(label).is_some_and(|n| reach.contains(&n));
        let suggested_additions: Vec<SuggestedAddition> = unserved
            .iter()
            .filter(|(o, d, _)| near(*o) || near(*d))
            .take(config.suggestions_per_route)
            .map(|&(o, d, p)| SuggestedAddition {
                origin: o.to_string(),
                destination: d.to_string(),
                passengers: p,
            })
            .collect();

        log::debug!(
            "route {}: {current_length_m:.0} m, coverage {current_demand_coverage:.0}, {} suggestions",
            route.route_id,
            suggested_additions.len()
        );

        reports.push(RouteReport {
            route_id: route.route_id.clone(),
            stops: route.stops.clone(),
            buses_assigned: route.buses_assigned,
            daily_passengers: route.daily_passengers,
            current_length_m,
            current_demand_coverage,
            suggested_additions,
        });
    }

    log::info!("analysed {} bus routes", reports.len());
    Ok(reports)
}

fn route_length_m(
    network:  &TransitNetwork,
    stop_ids: &[Option<NodeId>],
    config:   &RoutingConfig,
) -> TransitResult<f64> {
    let mut total = 0.0;
    for pair in stop_ids.windows(2) {
        let (Some(u), Some(v)) = (pair[0], pair[1]) else { continue };
        let direct = network
            .shortest_edge_between(u, v, |_| true)
            .or_else(|| network.shortest_edge_between(v, u, |_| true));
        total += match direct {
            Some(e) => network.edge_length_m[e.index()],
            None => match shortest_distance_path(network, u, v)? {
                Some((_, len)) => len,
                None => config.missing_path_penalty_m,
            },
        };
    }
    Ok(total)
}

fn demand_coverage(
    network:  &TransitNetwork,
    route:    &BusRoute,
    stop_ids: &[Option<NodeId>],
    demand:   &DemandMatrix,
) -> f64 {
    let mut catchment: FxHashSet<&str> = route.stops.iter().map(String::as_str).collect();
    for &stop in stop_ids.iter().flatten() {
        catchment.extend(network.neighbors(stop).into_iter().map(|n| network.label(n)));
    }
    demand
        .iter()
        .filter(|(o, d, _)| catchment.contains(o) && catchment.contains(d))
        .map(|(_, _, p)| p)
        .sum()
}

/// Nodes reachable from `sources` in at most `max_hops` edges, sources included.
fn within_hops(
    network:  &TransitNetwork,
    sources:  impl Iterator<Item = NodeId>,
    max_hops: usize,
) -> FxHashSet<NodeId> {
    let mut seen: FxHashSet<NodeId> = FxHashSet::default();
    let mut queue: VecDeque<(NodeId, usize)> = VecDeque::new();
    for s in sources {
        if seen.insert(s) {
            queue.push_back((s, 0));
        }
    }
    while let Some((node, depth)) = queue.pop_front() {
        if depth == max_hops {
            continue;
        }
        for next in network.neighbors(node) {
            if seen.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    seen
}
