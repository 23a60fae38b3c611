//! Unit tests for ct-network.
//!
//! All tests use hand-crafted networks so they run without any data files.

#[cfg(test)]
mod helpers {
    use ct_core::{NodeId, Position};
    use crate::{LinkSpec, TransitNetwork, TransitNetworkBuilder};

    /// Nodes (x, y in metres):
    ///   A:(0,0)  B:(1000,0)  C:(2000,0)
    ///
    /// Links: A–B road (1000 m) and A–B bus lane (1100 m) in parallel,
    ///        B–C metro (1000 m), one-way C→A road (2500 m).
    pub fn small_network() -> (TransitNetwork, [NodeId; 3]) {
        let mut b = TransitNetworkBuilder::new();
        let a = b.add_node("A", Some(Position::new(0.0, 0.0)));
        let bb = b.add_node("B", Some(Position::new(1_000.0, 0.0)));
        let c = b.add_node("C", Some(Position::new(2_000.0, 0.0)));

        b.add_link(a, bb, LinkSpec::road(1_000.0).capacity(1_500.0));
        b.add_link(a, bb, LinkSpec::bus(1_100.0));
        b.add_link(bb, c, LinkSpec::metro(1_000.0));
        b.add_directed_edge(c, a, LinkSpec::road(2_500.0));

        (b.build().unwrap(), [a, bb, c])
    }
}

// ── Builder & structure ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use ct_core::{LinkKey, NodeId, Position, RoadCategory};
    use crate::{LinkSpec, NetworkError, TransitNetworkBuilder};

    #[test]
    fn empty_build() {
        let net = TransitNetworkBuilder::new().build().unwrap();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
    }

    #[test]
    fn duplicate_label_returns_same_id_and_fills_position() {
        let mut b = TransitNetworkBuilder::new();
        let first = b.add_node("7", None);
        let again = b.add_node("7", Some(Position::new(5.0, 5.0)));
        assert_eq!(first, again);
        assert_eq!(b.node_count(), 1);
        assert_eq!(b.node_pos(first), Some(Position::new(5.0, 5.0)));
    }

    #[test]
    fn link_adds_both_directions_with_shared_key() {
        let (net, [a, b, _]) = super::helpers::small_network();
        let fwd: Vec<_> = net.edges_between(a, b).map(|e| net.edge_key[e.index()]).collect();
        let rev: Vec<_> = net.edges_between(b, a).map(|e| net.edge_key[e.index()]).collect();
        assert_eq!(fwd, vec![LinkKey(0), LinkKey(1)]);
        assert_eq!(rev, vec![LinkKey(0), LinkKey(1)]);
    }

    #[test]
    fn parallel_edges_individually_addressable() {
        let (net, [a, b, _]) = super::helpers::small_network();
        let road = net.edge(a, b, LinkKey(0)).unwrap();
        let bus = net.edge(a, b, LinkKey(1)).unwrap();
        assert_eq!(net.edge_category[road.index()], RoadCategory::Existing);
        assert_eq!(net.edge_category[bus.index()], RoadCategory::Bus);
        assert!(net.edge_bus[bus.index()]);
        assert!(net.edge(a, b, LinkKey(2)).is_none());
    }

    #[test]
    fn directed_edge_has_no_reverse() {
        let (net, [a, _, c]) = super::helpers::small_network();
        assert_eq!(net.edges_between(c, a).count(), 1);
        assert_eq!(net.edges_between(a, c).count(), 0);
        assert!(net.has_link(a, c), "has_link is direction-agnostic");
    }

    #[test]
    fn out_edges_are_sourced_at_node() {
        let (net, [a, b, c]) = super::helpers::small_network();
        for n in [a, b, c] {
            for e in net.out_edges(n) {
                assert_eq!(net.edge_from[e.index()], n);
            }
        }
        assert_eq!(net.out_degree(a), 2);
        assert_eq!(net.out_degree(b), 3);
        assert_eq!(net.out_degree(c), 2);
    }

    #[test]
    fn negative_length_rejected() {
        let mut b = TransitNetworkBuilder::new();
        let x = b.add_node("x", None);
        let y = b.add_node("y", None);
        b.add_link(x, y, LinkSpec::road(-5.0));
        assert!(matches!(b.build(), Err(NetworkError::InvalidLength { .. })));
    }

    #[test]
    fn unknown_node_rejected() {
        let mut b = TransitNetworkBuilder::new();
        let x = b.add_node("x", None);
        b.add_directed_edge(x, NodeId(9), LinkSpec::road(5.0));
        assert!(matches!(b.build(), Err(NetworkError::NodeNotFound(NodeId(9)))));
    }

    #[test]
    fn labels_resolve() {
        let (net, [a, _, c]) = super::helpers::small_network();
        assert_eq!(net.node_by_label("A"), Some(a));
        assert_eq!(net.label(c), "C");
        assert!(net.require_label("Z").is_err());
    }

    #[test]
    fn shortest_edge_prefers_distance_then_key() {
        let (net, [a, b, _]) = super::helpers::small_network();
        let e = net.shortest_edge_between(a, b, |_| true).unwrap();
        assert_eq!(net.edge_length_m[e.index()], 1_000.0);

        let bus_only = net
            .shortest_edge_between(a, b, |c| c == RoadCategory::Bus)
            .unwrap();
        assert_eq!(net.edge_length_m[bus_only.index()], 1_100.0);

        let none = net.shortest_edge_between(a, b, |c| c == RoadCategory::Metro);
        assert!(none.is_none());
    }

    #[test]
    fn neighbors_are_distinct() {
        let (net, [a, b, _]) = super::helpers::small_network();
        assert_eq!(net.neighbors(a), vec![b]);
    }
}

// ── Spatial queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod spatial {
    use ct_core::Position;
    use crate::{TransitNetwork, TransitNetworkBuilder};

    #[test]
    fn within_radius_nearest_first() {
        let (net, [a, b, c]) = super::helpers::small_network();
        let hits = net.nodes_within(Position::new(900.0, 0.0), 1_200.0);
        assert_eq!(hits, vec![b, a, c]);

        let tight = net.nodes_within(Position::new(900.0, 0.0), 500.0);
        assert_eq!(tight, vec![b]);
    }

    #[test]
    fn negative_radius_matches_nothing() {
        let (net, _) = super::helpers::small_network();
        assert!(net.nodes_within(Position::new(900.0, 0.0), -1_200.0).is_empty());
        assert!(net.nodes_within(Position::new(900.0, 0.0), f64::NAN).is_empty());
    }

    #[test]
    fn nearest_node() {
        let (net, [a, ..]) = super::helpers::small_network();
        assert_eq!(net.nearest_node(Position::new(-50.0, 10.0)), Some(a));
    }

    #[test]
    fn unpositioned_nodes_are_not_indexed() {
        let mut b = TransitNetworkBuilder::new();
        b.add_node("ghost", None);
        let net = b.build().unwrap();
        assert!(net.nearest_node(Position::default()).is_none());
        assert!(TransitNetwork::empty().nodes_within(Position::default(), 1e9).is_empty());
    }
}

// ── Traffic ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traffic {
    use std::io::Cursor;

    use ct_core::TimePeriod;
    use crate::{load_traffic_reader, LinkSpec, NetworkError, TrafficTable, TransitNetworkBuilder};

    #[test]
    fn lookup_takes_max_of_both_directions() {
        let (_, [a, b, _]) = super::helpers::small_network();
        let mut t = TrafficTable::new();
        t.insert(a, b, TimePeriod::Morning, 800.0);
        t.insert(b, a, TimePeriod::Morning, 1_200.0);
        assert_eq!(t.flow(a, b, TimePeriod::Morning), Some(1_200.0));
        assert_eq!(t.flow(b, a, TimePeriod::Morning), Some(1_200.0));
        assert_eq!(t.flow(a, b, TimePeriod::Night), None);
    }

    #[test]
    fn one_direction_is_visible_from_the_other() {
        let (_, [a, b, _]) = super::helpers::small_network();
        let mut t = TrafficTable::new();
        t.insert(a, b, TimePeriod::Evening, 300.0);
        assert_eq!(t.flow(b, a, TimePeriod::Evening), Some(300.0));
    }

    const CSV: &str = "\
RoadID,MorningPeak(veh/h),Afternoon(veh/h),Evening Peak(veh/h),Night(veh/h)\n\
A-B,2800,1500,2600,800\n\
B-Z,100,100,100,100\n\
";

    #[test]
    fn csv_loader_resolves_labels_and_skips_unknown() {
        let (net, [a, b, _]) = super::helpers::small_network();
        let t = load_traffic_reader(Cursor::new(CSV), &net).unwrap();
        assert_eq!(t.len(), 4); // one row × four periods
        assert_eq!(t.flow(a, b, TimePeriod::Morning), Some(2_800.0));
        assert_eq!(t.flow(b, a, TimePeriod::Night), Some(800.0));
    }

    #[test]
    fn csv_loader_rejects_bad_road_id() {
        let (net, _) = super::helpers::small_network();
        let bad = "RoadID,MorningPeak(veh/h),Afternoon(veh/h),Evening Peak(veh/h),Night(veh/h)\nAB,1,1,1,1\n";
        let err = load_traffic_reader(Cursor::new(bad), &net).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }

    #[test]
    fn blank_period_cell_is_no_data() {
        let (net, [a, b, _]) = super::helpers::small_network();
        let csv = "RoadID,MorningPeak(veh/h),Afternoon(veh/h),Evening Peak(veh/h),Night(veh/h)\nA-B,2800,,2600,800\n";
        let t = load_traffic_reader(Cursor::new(csv), &net).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.flow(a, b, TimePeriod::Morning), Some(2_800.0));
        assert_eq!(t.flow(a, b, TimePeriod::Afternoon), None);
        assert_eq!(t.flow(a, b, TimePeriod::Evening), Some(2_600.0));
    }

    #[test]
    fn hyphenated_labels_resolve() {
        let mut bld = TransitNetworkBuilder::new();
        let east = bld.add_node("Nasr-City", None);
        let west = bld.add_node("6-October", None);
        bld.add_link(east, west, LinkSpec::road(30_000.0));
        let net = bld.build().unwrap();

        let csv = "RoadID,MorningPeak(veh/h),Afternoon(veh/h),Evening Peak(veh/h),Night(veh/h)\nNasr-City-6-October,1000,900,1100,300\n";
        let t = load_traffic_reader(Cursor::new(csv), &net).unwrap();
        assert_eq!(t.flow(east, west, TimePeriod::Morning), Some(1_000.0));
        assert_eq!(t.flow(west, east, TimePeriod::Night), Some(300.0));
    }
}
