//! Routing trait and the traffic-aware Dijkstra implementation.
//!
//! # Pluggability
//!
//! Callers route through the [`Router`] trait, so the planner and batch
//! helpers work unchanged with [`TrafficDijkstra`] or
//! [`AStarRouter`](crate::AStarRouter).
//!
//! # Multigraph handling
//!
//! Every directed edge is relaxed on its own, so parallel links between the
//! same pair (a road and a bus lane, say) compete through the weight model
//! and the cheaper one wins for the requested mode.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use ordered_float::OrderedFloat;

use ct_core::{EdgeId, NodeId, TransportMode};
use ct_network::TransitNetwork;

use crate::weight::{edge_cost, evaluate_edges, WeightContext};
use crate::{PathResult, RoutingError, RoutingResult};

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable single-mode routing engine.
///
/// Implementations must be `Send + Sync` so one router can serve many
/// concurrent queries; each call allocates its own search state.
pub trait Router: Send + Sync {
    /// Cheapest path from `from` to `to` for `mode` under `ctx`.
    ///
    /// An unreachable destination is `Ok` with an empty path.  Only ids
    /// outside the network produce an error.
    fn route(
        &self,
        ctx:  &WeightContext<'_>,
        from: NodeId,
        to:   NodeId,
        mode: TransportMode,
    ) -> RoutingResult<PathResult>;
}

// ── TrafficDijkstra ───────────────────────────────────────────────────────────

/// Lazy-deletion Dijkstra over the weight model, with early exit when the
/// destination is settled.
#[derive(Copy, Clone, Debug, Default)]
pub struct TrafficDijkstra;

impl Router for TrafficDijkstra {
    fn route(
        &self,
        ctx:  &WeightContext<'_>,
        from: NodeId,
        to:   NodeId,
        mode: TransportMode,
    ) -> RoutingResult<PathResult> {
        dijkstra(ctx, from, to, mode)
    }
}

pub(crate) fn check_nodes(network: &TransitNetwork, nodes: &[NodeId]) -> RoutingResult<()> {
    match nodes.iter().find(|n| !network.contains(**n)) {
        Some(&n) => Err(RoutingError::NodeNotFound(n)),
        None => Ok(()),
    }
}

fn dijkstra(
    ctx:  &WeightContext<'_>,
    from: NodeId,
    to:   NodeId,
    mode: TransportMode,
) -> RoutingResult<PathResult> {
    let t0 = Instant::now();
    let network = ctx.network;
    check_nodes(network, &[from, to])?;

    if from == to {
        return Ok(PathResult::trivial(from, t0.elapsed()));
    }

    let n = network.node_count();
    let mut dist      = vec![f64::INFINITY; n];
    let mut prev_edge = vec![EdgeId::INVALID; n];
    dist[from.index()] = 0.0;

    // Reverse turns the max-heap into a min-heap; NodeId breaks cost ties.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));
    let mut settled = 0usize;

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }
        if node == to {
            log::debug!("dijkstra {mode} {from}->{to}: {cost:.2} min, {settled} nodes settled");
            let path = reconstruct(ctx, &prev_edge, from, to, mode);
            return Ok(PathResult { elapsed: t0.elapsed(), ..path });
        }
        settled += 1;

        for edge in network.out_edges(node) {
            let w = edge_cost(ctx, edge, mode);
            if !w.is_finite() {
                continue;
            }
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + w;
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }

    log::debug!("dijkstra {mode} {from}->{to}: unreachable after {settled} nodes");
    Ok(PathResult::unreachable(t0.elapsed()))
}

/// Walk `prev_edge` back from `to`, then price the hops afresh under `ctx`.
fn reconstruct(
    ctx:       &WeightContext<'_>,
    prev_edge: &[EdgeId],
    from:      NodeId,
    to:        NodeId,
    mode:      TransportMode,
) -> PathResult {
    let network = ctx.network;
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert!(e.is_valid(), "settled node without predecessor");
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();

    let mut nodes = Vec::with_capacity(edges.len() + 1);
    nodes.push(from);
    nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));
    let keys = edges.iter().map(|e| network.edge_key[e.index()]).collect();

    let (total_distance_m, total_time_min) = evaluate_edges(ctx, &edges, mode);
    PathResult {
        nodes,
        edges,
        keys,
        total_distance_m,
        total_time_min,
        elapsed: Default::default(),
    }
}

// ── Physical-distance search ──────────────────────────────────────────────────

/// Shortest path by physical length over every edge regardless of mode.
///
/// Returns `(nodes, length_m)` or `None` if `to` is unreachable.  Used where
/// a route's geometric length matters rather than its travel time.
pub fn shortest_distance_path(
    network: &TransitNetwork,
    from:    NodeId,
    to:      NodeId,
) -> RoutingResult<Option<(Vec<NodeId>, f64)>> {
    check_nodes(network, &[from, to])?;
    if from == to {
        return Ok(Some((vec![from], 0.0)));
    }

    let n = network.node_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![NodeId::INVALID; n];
    dist[from.index()] = 0.0;

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), from)));

    while let Some(Reverse((OrderedFloat(cost), node))) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }
        if node == to {
            let mut nodes = vec![to];
            let mut cur = to;
            while cur != from {
                cur = prev[cur.index()];
                nodes.push(cur);
            }
            nodes.reverse();
            return Ok(Some((nodes, cost)));
        }
        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost + network.edge_length_m[edge.index()];
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev[neighbor.index()] = node;
                heap.push(Reverse((OrderedFloat(new_cost), neighbor)));
            }
        }
    }
    Ok(None)
}
