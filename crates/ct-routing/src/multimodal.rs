//! Mode-switching search over `(node, mode)` states.
//!
//! A traveller may change between car, bus and metro at any node, paying
//! `config.mode_switch_penalty_min` per change.  The search runs Dijkstra on
//! the expanded state space: one state per `(node, passenger mode)` plus a
//! single "no mode yet" state at the source, so the first hop is never
//! charged a switch.
//!
//! # Candidate modes per edge
//!
//! | Edge                                   | Candidates  |
//! |----------------------------------------|-------------|
//! | road category (existing/potential/virtual) | car, bus |
//! | metro category or `carries_metro`      | metro       |
//! | bus category or `carries_bus`          | bus         |
//!
//! Each candidate is still priced through [`edge_cost`], so the category gate
//! has the final word.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use ordered_float::OrderedFloat;

use ct_core::{EdgeId, NodeId, RoadCategory, TransportMode};
use ct_network::TransitNetwork;

use crate::dijkstra::check_nodes;
use crate::weight::{edge_cost, WeightContext};
use crate::{MultiModalPath, RoutingResult};

const MODES: usize = TransportMode::PASSENGER.len();

/// Dense state index; `node_count * MODES` is the start state.
type State = usize;

#[inline]
fn state(node: NodeId, mode: TransportMode) -> State {
    node.index() * MODES + mode.index()
}

/// Passenger modes that may be tried on `edge`, deduplicated, in
/// `TransportMode::PASSENGER` order.
pub fn candidate_modes(network: &TransitNetwork, edge: EdgeId) -> Vec<TransportMode> {
    let i = edge.index();
    let category = network.edge_category[i];
    let mut flags = [false; MODES];

    if category.is_road() {
        flags[TransportMode::Car.index()] = true;
        flags[TransportMode::Bus.index()] = true;
    }
    if category == RoadCategory::Metro || network.edge_metro[i] {
        flags[TransportMode::Metro.index()] = true;
    }
    if category == RoadCategory::Bus || network.edge_bus[i] {
        flags[TransportMode::Bus.index()] = true;
    }

    TransportMode::PASSENGER
        .into_iter()
        .filter(|m| flags[m.index()])
        .collect()
}

#[derive(Copy, Clone)]
struct Pred {
    state: State,
    edge:  EdgeId,
}

/// Cheapest mixed-mode journey from `from` to `to`, switch penalties included.
///
/// Unreachable destinations yield [`MultiModalPath::unreachable`].
pub fn multimodal_route(
    ctx:  &WeightContext<'_>,
    from: NodeId,
    to:   NodeId,
) -> RoutingResult<MultiModalPath> {
    let t0 = Instant::now();
    let network = ctx.network;
    check_nodes(network, &[from, to])?;

    if from == to {
        return Ok(MultiModalPath::trivial(from, t0.elapsed()));
    }

    let penalty = ctx.config.mode_switch_penalty_min;
    let start: State = network.node_count() * MODES;
    let n_states = start + 1;

    let mut dist = vec![f64::INFINITY; n_states];
    let mut pred: Vec<Option<Pred>> = vec![None; n_states];
    dist[start] = 0.0;

    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, State)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), start)));
    let mut settled = 0usize;

    while let Some(Reverse((OrderedFloat(cost), s))) = heap.pop() {
        if cost > dist[s] {
            continue;
        }
        let (node, current_mode) = if s == start {
            (from, None)
        } else {
            (NodeId((s / MODES) as u32), Some(TransportMode::PASSENGER[s % MODES]))
        };

        if node == to {
            log::debug!(
                "multimodal {from}->{to}: {cost:.2} min, {settled} states settled"
            );
            let mut path = reconstruct(ctx, &pred, start, s);
            path.elapsed = t0.elapsed();
            return Ok(path);
        }
        settled += 1;

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            for mode in candidate_modes(network, edge) {
                let mut w = edge_cost(ctx, edge, mode);
                if !w.is_finite() {
                    continue;
                }
                if current_mode.is_some_and(|m| m != mode) {
                    w += penalty;
                }
                let next = state(neighbor, mode);
                let new_cost = cost + w;
                if new_cost < dist[next] {
                    dist[next] = new_cost;
                    pred[next] = Some(Pred { state: s, edge });
                    heap.push(Reverse((OrderedFloat(new_cost), next)));
                }
            }
        }
    }

    log::debug!("multimodal {from}->{to}: unreachable after {settled} states");
    Ok(MultiModalPath::unreachable(t0.elapsed()))
}

fn reconstruct(
    ctx:   &WeightContext<'_>,
    pred:  &[Option<Pred>],
    start: State,
    goal:  State,
) -> MultiModalPath {
    let network = ctx.network;
    let mut hops: Vec<(EdgeId, TransportMode)> = Vec::new();
    let mut cur = goal;
    while cur != start {
        let Some(p) = pred[cur] else { break };
        hops.push((p.edge, TransportMode::PASSENGER[cur % MODES]));
        cur = p.state;
    }
    hops.reverse();

    let mut nodes = Vec::with_capacity(hops.len() + 1);
    if let Some(&(first, _)) = hops.first() {
        nodes.push(network.edge_from[first.index()]);
    }
    nodes.extend(hops.iter().map(|(e, _)| network.edge_to[e.index()]));

    let mut total_distance_m = 0.0;
    let mut total_weight_min = 0.0;
    let mut switches = 0;
    let mut last: Option<TransportMode> = None;
    for &(edge, mode) in &hops {
        total_distance_m += network.edge_length_m[edge.index()];
        total_weight_min += edge_cost(ctx, edge, mode);
        if last.is_some_and(|m| m != mode) {
            switches += 1;
            total_weight_min += ctx.config.mode_switch_penalty_min;
        }
        last = Some(mode);
    }

    MultiModalPath {
        nodes,
        edges: hops.iter().map(|&(e, _)| e).collect(),
        modes: hops.iter().map(|&(_, m)| m).collect(),
        total_distance_m,
        total_weight_min,
        switches,
        elapsed: Default::default(),
    }
}
