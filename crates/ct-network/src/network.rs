//! Multi-modal transit network and its builder.
//!
//! # Data layout
//!
//! The graph is a directed **multigraph** in Compressed Sparse Row (CSR)
//! format.  Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are indexed by `EdgeId` and sorted by source node; edges
//! with the same source keep their insertion order.  An undirected link is
//! stored as two directed edges that share one [`LinkKey`], so parallel links
//! between the same node pair are addressable as `(from, to, key)` from
//! either end.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) holds every node that has a [`Position`].  It
//! answers "which metro stations lie within 2 km of this bus stop" without a
//! quadratic scan.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use ct_core::{EdgeId, LinkKey, NodeId, Position, RoadCategory};

use crate::{NetworkError, NetworkResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── LinkSpec ──────────────────────────────────────────────────────────────────

/// Attributes of one link, passed to [`TransitNetworkBuilder::add_link`].
///
/// ```
/// use ct_core::RoadCategory;
/// use ct_network::LinkSpec;
///
/// let road = LinkSpec::road(1_200.0).capacity(3_000.0);
/// assert_eq!(road.category, RoadCategory::Existing);
/// assert!(LinkSpec::metro(900.0).carries_metro);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct LinkSpec {
    pub length_m:        f64,
    pub category:        RoadCategory,
    /// Vehicles/hour.  `None` falls back to the routing config's default.
    pub capacity:        Option<f64>,
    /// Overrides the mode's base speed on this link.
    pub speed_limit_kmh: Option<f64>,
    pub carries_bus:     bool,
    pub carries_metro:   bool,
}

impl LinkSpec {
    pub fn new(length_m: f64, category: RoadCategory) -> Self {
        Self {
            length_m,
            category,
            capacity:        None,
            speed_limit_kmh: None,
            carries_bus:     category == RoadCategory::Bus,
            carries_metro:   category == RoadCategory::Metro,
        }
    }

    /// An `existing` road.
    pub fn road(length_m: f64) -> Self {
        Self::new(length_m, RoadCategory::Existing)
    }

    pub fn bus(length_m: f64) -> Self {
        Self::new(length_m, RoadCategory::Bus)
    }

    pub fn metro(length_m: f64) -> Self {
        Self::new(length_m, RoadCategory::Metro)
    }

    pub fn capacity(mut self, vehicles_per_hour: f64) -> Self {
        self.capacity = Some(vehicles_per_hour);
        self
    }

    pub fn speed_limit(mut self, kmh: f64) -> Self {
        self.speed_limit_kmh = Some(kmh);
        self
    }

    /// Mark a road as also served by a bus line.
    pub fn with_bus_service(mut self) -> Self {
        self.carries_bus = true;
        self
    }
}

// ── TransitNetwork ────────────────────────────────────────────────────────────

/// Directed transit multigraph in CSR format plus a spatial index.
///
/// All per-edge fields are `pub` for direct indexed access on hot paths.  Do
/// not construct directly; use [`TransitNetworkBuilder`].
pub struct TransitNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// External identifier of each node.  Indexed by `NodeId`.
    pub node_label: Vec<String>,
    /// Projected position, if known.  Indexed by `NodeId`.
    pub node_pos: Vec<Option<Position>>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from:        Vec<NodeId>,
    pub edge_to:          Vec<NodeId>,
    pub edge_key:         Vec<LinkKey>,
    pub edge_length_m:    Vec<f64>,
    pub edge_category:    Vec<RoadCategory>,
    pub edge_capacity:    Vec<Option<f64>>,
    pub edge_speed_kmh:   Vec<Option<f64>>,
    pub edge_bus:         Vec<bool>,
    pub edge_metro:       Vec<bool>,

    label_index: FxHashMap<String, NodeId>,
    spatial_idx: RTree<NodeEntry>,
}

impl TransitNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        // An empty builder has nothing to validate.
        match TransitNetworkBuilder::new().build() {
            Ok(net) => net,
            Err(_) => unreachable!("empty network always builds"),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_label.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_label.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// `Err(NodeNotFound)` unless `node` belongs to this network.
    pub fn check_node(&self, node: NodeId) -> NetworkResult<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(NetworkError::NodeNotFound(node))
        }
    }

    // ── Labels & positions ────────────────────────────────────────────────

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    /// Like [`node_by_label`](Self::node_by_label) but errors on a miss.
    pub fn require_label(&self, label: &str) -> NetworkResult<NodeId> {
        self.node_by_label(label)
            .ok_or_else(|| NetworkError::UnknownLabel(label.to_string()))
    }

    pub fn label(&self, node: NodeId) -> &str {
        &self.node_label[node.index()]
    }

    pub fn position(&self, node: NodeId) -> Option<Position> {
        self.node_pos[node.index()]
    }

    /// All node ids, in index order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count()).map(|i| NodeId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`,
    /// parallel edges included.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Every directed edge `from → to`, one per parallel key.
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges(from).filter(move |e| self.edge_to[e.index()] == to)
    }

    /// The directed edge `from → to` carrying `key`, if any.
    pub fn edge(&self, from: NodeId, to: NodeId, key: LinkKey) -> Option<EdgeId> {
        self.edges_between(from, to).find(|e| self.edge_key[e.index()] == key)
    }

    /// `true` if any edge joins `a` and `b` in either direction.
    pub fn has_link(&self, a: NodeId, b: NodeId) -> bool {
        self.edges_between(a, b).next().is_some() || self.edges_between(b, a).next().is_some()
    }

    /// The shortest edge `from → to` accepted by `filter`.
    ///
    /// Ties go to the lowest key, so the result never depends on storage
    /// order.
    pub fn shortest_edge_between<F>(&self, from: NodeId, to: NodeId, filter: F) -> Option<EdgeId>
    where
        F: Fn(RoadCategory) -> bool,
    {
        self.edges_between(from, to)
            .filter(|e| filter(self.edge_category[e.index()]))
            .min_by(|a, b| {
                self.edge_length_m[a.index()]
                    .total_cmp(&self.edge_length_m[b.index()])
                    .then(self.edge_key[a.index()].cmp(&self.edge_key[b.index()]))
            })
    }

    /// Highest speed-limit override on any edge, if any edge has one.
    pub fn max_speed_limit_kmh(&self) -> Option<f64> {
        self.edge_speed_kmh.iter().flatten().copied().reduce(f64::max)
    }

    /// Distinct out-neighbours of `node`, in first-seen order.
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::with_capacity(self.out_degree(node));
        for e in self.out_edges(node) {
            let to = self.edge_to[e.index()];
            if !out.contains(&to) {
                out.push(to);
            }
        }
        out
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Positioned nodes within `radius_m` of `pos`, nearest first.  A
    /// negative or NaN radius matches nothing.
    pub fn nodes_within(&self, pos: Position, radius_m: f64) -> Vec<NodeId> {
        if radius_m.is_nan() || radius_m < 0.0 {
            return Vec::new();
        }
        let mut hits: Vec<(f64, NodeId)> = self
            .spatial_idx
            .locate_within_distance(pos.as_array(), radius_m * radius_m)
            .map(|e| (e.distance_2(&pos.as_array()), e.id))
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        hits.into_iter().map(|(_, id)| id).collect()
    }

    /// The positioned node nearest to `pos`, or `None` if no node has a
    /// position.
    pub fn nearest_node(&self, pos: Position) -> Option<NodeId> {
        self.spatial_idx.nearest_neighbor(&pos.as_array()).map(|e| e.id)
    }
}

// ── TransitNetworkBuilder ─────────────────────────────────────────────────────

/// Construct a [`TransitNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use ct_core::Position;
/// use ct_network::{LinkSpec, TransitNetworkBuilder};
///
/// let mut b = TransitNetworkBuilder::new();
/// let a = b.add_node("1", Some(Position::new(0.0, 0.0)));
/// let c = b.add_node("2", Some(Position::new(1_200.0, 0.0)));
/// b.add_link(a, c, LinkSpec::road(1_200.0));
/// b.add_link(a, c, LinkSpec::bus(1_250.0)); // parallel link, key 1
/// let net = b.build().unwrap();
/// assert_eq!(net.edge_count(), 4);
/// assert_eq!(net.edges_between(a, c).count(), 2);
/// ```
pub struct TransitNetworkBuilder {
    labels:      Vec<String>,
    positions:   Vec<Option<Position>>,
    label_index: FxHashMap<String, NodeId>,
    raw_edges:   Vec<RawEdge>,
    next_key:    FxHashMap<(NodeId, NodeId), usize>,
}

struct RawEdge {
    from: NodeId,
    to:   NodeId,
    key:  usize,
    spec: LinkSpec,
}

impl TransitNetworkBuilder {
    pub fn new() -> Self {
        Self {
            labels:      Vec::new(),
            positions:   Vec::new(),
            label_index: FxHashMap::default(),
            raw_edges:   Vec::new(),
            next_key:    FxHashMap::default(),
        }
    }

    /// Add a node, or return the existing id if `label` was added before.
    ///
    /// A later call with `Some(pos)` fills in a missing position.
    pub fn add_node(&mut self, label: impl Into<String>, pos: Option<Position>) -> NodeId {
        let label = label.into();
        if let Some(&id) = self.label_index.get(&label) {
            if pos.is_some() && self.positions[id.index()].is_none() {
                self.positions[id.index()] = pos;
            }
            return id;
        }
        let id = NodeId(self.labels.len() as u32);
        self.label_index.insert(label.clone(), id);
        self.labels.push(label);
        self.positions.push(pos);
        id
    }

    pub fn node_by_label(&self, label: &str) -> Option<NodeId> {
        self.label_index.get(label).copied()
    }

    pub fn node_pos(&self, id: NodeId) -> Option<Position> {
        self.positions.get(id.index()).copied().flatten()
    }

    fn take_key(&mut self, a: NodeId, b: NodeId) -> usize {
        let pair = if a <= b { (a, b) } else { (b, a) };
        let slot = self.next_key.entry(pair).or_insert(0);
        let key = *slot;
        *slot += 1;
        key
    }

    /// Add a **directed** edge and return its raw key.
    ///
    /// Keys are validated against `u16` range in [`build`](Self::build).
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, spec: LinkSpec) -> usize {
        let key = self.take_key(from, to);
        self.raw_edges.push(RawEdge { from, to, key, spec });
        key
    }

    /// Add an undirected link as two directed edges sharing one key.
    pub fn add_link(&mut self, a: NodeId, b: NodeId, spec: LinkSpec) -> usize {
        let key = self.take_key(a, b);
        if a != b {
            self.raw_edges.push(RawEdge { from: b, to: a, key, spec: spec.clone() });
        }
        self.raw_edges.push(RawEdge { from: a, to: b, key, spec });
        key
    }

    pub fn node_count(&self) -> usize { self.labels.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Validate and consume the builder.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::NodeNotFound`] if an edge references an unknown node.
    /// - [`NetworkError::InvalidLength`] for negative or non-finite lengths.
    /// - [`NetworkError::TooManyParallelLinks`] if a node pair exhausts the
    ///   `u16` key space.
    pub fn build(self) -> NetworkResult<TransitNetwork> {
        let node_count = self.labels.len();
        let edge_count = self.raw_edges.len();

        for e in &self.raw_edges {
            for n in [e.from, e.to] {
                if n.index() >= node_count {
                    return Err(NetworkError::NodeNotFound(n));
                }
            }
            if !(e.spec.length_m.is_finite() && e.spec.length_m >= 0.0) {
                return Err(NetworkError::InvalidLength {
                    from: e.from,
                    to: e.to,
                    length_m: e.spec.length_m,
                });
            }
            if LinkKey::try_from(e.key).map_or(true, |k| !k.is_valid()) {
                return Err(NetworkError::TooManyParallelLinks {
                    a: e.from,
                    b: e.to,
                    max: u16::MAX as usize,
                });
            }
        }

        // Stable sort keeps insertion order among a node's out-edges.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let entries: Vec<NodeEntry> = self
            .positions
            .iter()
            .enumerate()
            .filter_map(|(i, pos)| {
                pos.map(|p| NodeEntry { point: p.as_array(), id: NodeId(i as u32) })
            })
            .collect();

        Ok(TransitNetwork {
            node_label:     self.labels,
            node_pos:       self.positions,
            node_out_start,
            edge_from:      raw.iter().map(|e| e.from).collect(),
            edge_to:        raw.iter().map(|e| e.to).collect(),
            edge_key:       raw.iter().map(|e| LinkKey(e.key as u16)).collect(),
            edge_length_m:  raw.iter().map(|e| e.spec.length_m).collect(),
            edge_category:  raw.iter().map(|e| e.spec.category).collect(),
            edge_capacity:  raw.iter().map(|e| e.spec.capacity).collect(),
            edge_speed_kmh: raw.iter().map(|e| e.spec.speed_limit_kmh).collect(),
            edge_bus:       raw.iter().map(|e| e.spec.carries_bus).collect(),
            edge_metro:     raw.iter().map(|e| e.spec.carries_metro).collect(),
            label_index:    self.label_index,
            spatial_idx:    RTree::bulk_load(entries),
        })
    }
}

impl Default for TransitNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
