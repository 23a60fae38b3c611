//! Plain data row types written by report backends.
//!
//! Rows carry node *labels*, not `NodeId`s, so reports stay meaningful
//! outside the process that built the network.

use ct_network::TransitNetwork;
use ct_routing::{ModePlan, PathResult};
use ct_transit::{RecommendedConnection, RouteReport};

/// Separator between nodes (and between hop modes) in a serialised path.
pub const PATH_SEP: &str = ">";

/// One routed query under one mode.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummaryRow {
    pub query:            u32,
    /// `car`, `bus`, `metro`, `emergency` or `mixed`.
    pub mode:             String,
    pub from:             String,
    pub to:               String,
    pub reachable:        bool,
    /// Node labels joined by [`PATH_SEP`]; empty when unreachable.
    pub path:             String,
    /// Per-hop modes joined by [`PATH_SEP`].
    pub hop_modes:        String,
    pub switches:         usize,
    pub distance_m:       f64,
    /// Minutes, switch penalties included.
    pub weight_min:       f64,
}

fn join_labels(network: &TransitNetwork, nodes: &[ct_core::NodeId]) -> String {
    nodes.iter().map(|&n| network.label(n)).collect::<Vec<_>>().join(PATH_SEP)
}

impl RouteSummaryRow {
    /// Summarise a single-mode search result.
    pub fn from_path(
        query:   u32,
        mode:    ct_core::TransportMode,
        from:    ct_core::NodeId,
        to:      ct_core::NodeId,
        path:    &PathResult,
        network: &TransitNetwork,
    ) -> Self {
        Self {
            query,
            mode: mode.to_string(),
            from: network.label(from).to_string(),
            to: network.label(to).to_string(),
            reachable: path.is_reachable(),
            path: join_labels(network, &path.nodes),
            hop_modes: vec![mode.as_str(); path.hop_count()].join(PATH_SEP),
            switches: 0,
            distance_m: path.total_distance_m,
            weight_min: path.total_time_min,
        }
    }

    /// Summarise one entry of a mode comparison.
    pub fn from_plan(
        query:   u32,
        from:    ct_core::NodeId,
        to:      ct_core::NodeId,
        plan:    &ModePlan,
        network: &TransitNetwork,
    ) -> Self {
        Self {
            query,
            mode: plan.mode.to_string(),
            from: network.label(from).to_string(),
            to: network.label(to).to_string(),
            reachable: plan.is_reachable(),
            path: join_labels(network, &plan.nodes),
            hop_modes: plan
                .hop_modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(PATH_SEP),
            switches: plan.switches,
            distance_m: plan.total_distance_m,
            weight_min: plan.total_weight_min,
        }
    }
}

/// One ranked connection recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionRow {
    /// 1-based rank.
    pub rank:          u32,
    pub bus_stop:      String,
    pub metro_station: String,
    pub distance_m:    f64,
    pub demand:        f64,
    pub score:         f64,
    pub population:    f64,
}

impl ConnectionRow {
    /// Rows for `connections` in rank order.
    pub fn from_connections(connections: &[RecommendedConnection], network: &TransitNetwork) -> Vec<Self> {
        connections
            .iter()
            .zip(1u32..)
            .map(|(c, rank)| Self {
                rank,
                bus_stop: network.label(c.bus_stop).to_string(),
                metro_station: network.label(c.metro_station).to_string(),
                distance_m: c.distance_m,
                demand: c.demand,
                score: c.score,
                population: c.population,
            })
            .collect()
    }
}

/// Per-route metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteReportRow {
    pub route_id:                String,
    /// Stop labels joined by [`PATH_SEP`].
    pub stops:                   String,
    pub buses_assigned:          u32,
    pub daily_passengers:        f64,
    pub current_length_m:        f64,
    pub current_demand_coverage: f64,
    pub suggestions:             usize,
}

/// One suggested addition to a bus route.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRow {
    pub route_id:    String,
    /// 1-based rank within the route.
    pub rank:        u32,
    pub origin:      String,
    pub destination: String,
    pub passengers:  f64,
}

impl RouteReportRow {
    pub fn from_report(report: &RouteReport) -> Self {
        Self {
            route_id: report.route_id.clone(),
            stops: report.stops.join(PATH_SEP),
            buses_assigned: report.buses_assigned,
            daily_passengers: report.daily_passengers,
            current_length_m: report.current_length_m,
            current_demand_coverage: report.current_demand_coverage,
            suggestions: report.suggested_additions.len(),
        }
    }
}

impl SuggestionRow {
    /// Flatten the suggestions of every report, keeping route order.
    pub fn from_reports(reports: &[RouteReport]) -> Vec<Self> {
        reports
            .iter()
            .flat_map(|r| {
                r.suggested_additions.iter().zip(1u32..).map(move |(s, rank)| Self {
                    route_id: r.route_id.clone(),
                    rank,
                    origin: s.origin.clone(),
                    destination: s.destination.clone(),
                    passengers: s.passengers,
                })
            })
            .collect()
    }
}
