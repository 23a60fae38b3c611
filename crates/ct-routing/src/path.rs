//! Search result types.

use std::time::Duration;

use ct_core::{EdgeId, LinkKey, NodeId, TransportMode};

// ── PathResult ────────────────────────────────────────────────────────────────

/// The result of a single-mode search.
///
/// An unreachable destination yields an empty `nodes` list and infinite
/// totals; always check [`is_reachable`](Self::is_reachable) before using
/// the totals.
#[derive(Debug, Clone)]
pub struct PathResult {
    /// Nodes from source to destination inclusive.
    pub nodes: Vec<NodeId>,
    /// Edge taken for each hop; `edges.len() == nodes.len() - 1`.
    pub edges: Vec<EdgeId>,
    /// Parallel-link key of each hop.
    pub keys: Vec<LinkKey>,
    /// Sum of physical edge lengths in metres.
    pub total_distance_m: f64,
    /// Sum of edge costs in minutes.
    pub total_time_min: f64,
    /// Wall-clock search time.  Advisory only.
    pub elapsed: Duration,
}

impl PathResult {
    pub fn unreachable(elapsed: Duration) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            keys: Vec::new(),
            total_distance_m: f64::INFINITY,
            total_time_min: f64::INFINITY,
            elapsed,
        }
    }

    /// Source and destination coincide.
    pub fn trivial(node: NodeId, elapsed: Duration) -> Self {
        Self {
            nodes: vec![node],
            edges: Vec::new(),
            keys: Vec::new(),
            total_distance_m: 0.0,
            total_time_min: 0.0,
            elapsed,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    /// Same route and totals, ignoring `elapsed`.
    pub fn same_route(&self, other: &PathResult) -> bool {
        self.nodes == other.nodes
            && self.edges == other.edges
            && self.total_distance_m == other.total_distance_m
            && self.total_time_min == other.total_time_min
    }
}

// ── MultiModalPath ────────────────────────────────────────────────────────────

/// The result of a mode-switching search.
#[derive(Debug, Clone)]
pub struct MultiModalPath {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    /// Mode used on each hop; same length as `edges`.
    pub modes: Vec<TransportMode>,
    pub total_distance_m: f64,
    /// Travel minutes plus switch penalties.  `f64::INFINITY` if unreachable.
    pub total_weight_min: f64,
    /// Number of mode changes along the path.
    pub switches: usize,
    pub elapsed: Duration,
}

impl MultiModalPath {
    pub fn unreachable(elapsed: Duration) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            modes: Vec::new(),
            total_distance_m: f64::INFINITY,
            total_weight_min: f64::INFINITY,
            switches: 0,
            elapsed,
        }
    }

    pub fn trivial(node: NodeId, elapsed: Duration) -> Self {
        Self {
            nodes: vec![node],
            edges: Vec::new(),
            modes: Vec::new(),
            total_distance_m: 0.0,
            total_weight_min: 0.0,
            switches: 0,
            elapsed,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Consecutive runs of the same mode: `[(Car, 3), (Metro, 2)]`.
    pub fn legs(&self) -> Vec<(TransportMode, usize)> {
        let mut legs: Vec<(TransportMode, usize)> = Vec::new();
        for &m in &self.modes {
            match legs.last_mut() {
                Some((last, n)) if *last == m => *n += 1,
                _ => legs.push((m, 1)),
            }
        }
        legs
    }
}
