//! A* search with a straight-line time heuristic.
//!
//! The heuristic is the Euclidean distance between node positions covered at
//! the larger of the mode's base speed and the network's highest speed limit.
//! Congestion only ever slows a mode down, so the estimate is admissible as
//! long as link lengths are at least the straight line between their
//! endpoints.  Nodes without a position get a zero estimate, which degrades
//! gracefully to Dijkstra.
//!
//! The typical use is emergency dispatch: [`AStarRouter::emergency_route`]
//! routes the `Emergency` mode under an active [`EmergencyContext`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use ordered_float::OrderedFloat;

use ct_core::{EdgeId, NodeId, TimePeriod, TransportMode};

use crate::dijkstra::check_nodes;
use crate::weight::{edge_cost, evaluate_edges, travel_minutes, EmergencyContext, WeightContext};
use crate::{PathResult, Router, RoutingResult};

/// Goal-directed single-mode router.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarRouter;

impl AStarRouter {
    /// Route an emergency vehicle travelling during `period`.
    pub fn emergency_route(
        &self,
        ctx:    &WeightContext<'_>,
        from:   NodeId,
        to:     NodeId,
        period: TimePeriod,
    ) -> RoutingResult<PathResult> {
        let ctx = ctx.with_emergency(EmergencyContext { period, active: true });
        self.route(&ctx, from, to, TransportMode::Emergency)
    }
}

impl Router for AStarRouter {
    fn route(
        &self,
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

        let goal = network.position(to);
        // No edge is faster than the base speed or the highest speed limit,
        // so the straight-line time never overestimates.
        let base = ctx.config.base_speed_kmh[mode];
        let speed = network.max_speed_limit_kmh().map_or(base, |limit| base.max(limit));
        let heuristic = |n: NodeId| -> f64 {
            match (network.position(n), goal) {
                (Some(p), Some(g)) => travel_minutes(p.distance_m(g), speed),
                _ => 0.0,
            }
        };

        let n = network.node_count();
        let mut g_score   = vec![f64::INFINITY; n];
        let mut prev_edge = vec![EdgeId::INVALID; n];
        g_score[from.index()] = 0.0;

        // (f, g, node); g is carried so stale entries can be detected.
        let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, OrderedFloat<f64>, NodeId)>> =
            BinaryHeap::new();
        heap.push(Reverse((OrderedFloat(heuristic(from)), OrderedFloat(0.0), from)));
        let mut expanded = 0usize;

        while let Some(Reverse((_, OrderedFloat(g), node))) = heap.pop() {
            if g > g_score[node.index()] {
                continue;
            }
            if node == to {
                log::debug!("a* {mode} {from}->{to}: {g:.2} min, {expanded} nodes expanded");
                let mut edges = Vec::new();
                let mut cur = to;
                while cur != from {
                    let e = prev_edge[cur.index()];
                    edges.push(e);
                    cur = network.edge_from[e.index()];
                }
                edges.reverse();

                let mut nodes = vec![from];
                nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));
                let keys = edges.iter().map(|e| network.edge_key[e.index()]).collect();
                let (total_distance_m, total_time_min) = evaluate_edges(ctx, &edges, mode);

                return Ok(PathResult {
                    nodes,
                    edges,
                    keys,
                    total_distance_m,
                    total_time_min,
                    elapsed: t0.elapsed(),
                });
            }
            expanded += 1;

            for edge in network.out_edges(node) {
                let w = edge_cost(ctx, edge, mode);
                if !w.is_finite() {
                    continue;
                }
                let neighbor = network.edge_to[edge.index()];
                let tentative = g + w;
                if tentative < g_score[neighbor.index()] {
                    g_score[neighbor.index()] = tentative;
                    prev_edge[neighbor.index()] = edge;
                    let f = tentative + heuristic(neighbor);
                    heap.push(Reverse((OrderedFloat(f), OrderedFloat(tentative), neighbor)));
                }
            }
        }

        log::debug!("a* {mode} {from}->{to}: unreachable after {expanded} nodes");
        Ok(PathResult::unreachable(t0.elapsed()))
    }
}
