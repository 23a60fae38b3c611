//! Unit tests for ct-transit.

#[cfg(test)]
mod connections {
    use ct_core::{NodeId, Position, RoutingConfig};
    use ct_network::{LinkSpec, NetworkError, TransitNetwork, TransitNetworkBuilder};

    use crate::{recommend_connections, DemandMatrix, PopulationMap, TransitError};

    /// Two bus stops and two metro stations on a line, plus an off-network
    /// destination X:
    ///
    /// ```text
    /// B1(0) M1(300) M2(1500) ......... B2(5000) ......... X(10000)
    /// ```
    fn stations() -> (TransitNetwork, [NodeId; 5]) {
        let mut b = TransitNetworkBuilder::new();
        let b1 = b.add_node("B1", Some(Position::new(0.0, 0.0)));
        let b2 = b.add_node("B2", Some(Position::new(5_000.0, 0.0)));
        let m1 = b.add_node("M1", Some(Position::new(300.0, 0.0)));
        let m2 = b.add_node("M2", Some(Position::new(1_500.0, 0.0)));
        let x = b.add_node("X", Some(Position::new(10_000.0, 0.0)));
        (b.build().unwrap(), [b1, b2, m1, m2, x])
    }

    fn demand() -> DemandMatrix {
        let mut d = DemandMatrix::new();
        d.insert("B1", "X", 10_000.0);
        d.insert("B2", "X", 500.0);
        d
    }

    #[test]
    fn high_demand_stop_pairs_with_nearer_metro() {
        let (net, [b1, b2, m1, m2, _]) = stations();
        let cfg = RoutingConfig::default();
        let recs = recommend_connections(&net, &[b1, b2], &[m1, m2], &demand(), &PopulationMap::new(), &cfg)
            .unwrap();

        assert_eq!(recs.len(), 2, "B2 has no metro within 2 km");
        assert_eq!((recs[0].bus_stop, recs[0].metro_station), (b1, m1));
        assert_eq!((recs[1].bus_stop, recs[1].metro_station), (b1, m2));

        assert_eq!(recs[0].distance_m, 300.0);
        assert!((recs[0].demand - 1_000.0).abs() < 1e-9);
        assert!((recs[0].score - 1_000.0 / 0.3).abs() < 1e-6);
        assert!((recs[1].score - 1_000.0 / 1.5).abs() < 1e-6);
    }

    #[test]
    fn directly_linked_pairs_are_skipped() {
        let mut b = TransitNetworkBuilder::new();
        let b1 = b.add_node("B1", Some(Position::new(0.0, 0.0)));
        let m1 = b.add_node("M1", Some(Position::new(300.0, 0.0)));
        let m2 = b.add_node("M2", Some(Position::new(1_500.0, 0.0)));
        b.add_link(b1, m1, LinkSpec::road(300.0));
        let net = b.build().unwrap();
        let cfg = RoutingConfig::default();

        let recs = recommend_connections(&net, &[b1], &[m1, m2], &demand(), &PopulationMap::new(), &cfg)
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metro_station, m2);
    }

    #[test]
    fn short_distances_are_floored() {
        let mut b = TransitNetworkBuilder::new();
        let s = b.add_node("S", Some(Position::new(0.0, 0.0)));
        let m = b.add_node("M", Some(Position::new(50.0, 0.0)));
        let net = b.build().unwrap();
        let mut d = DemandMatrix::new();
        d.insert("S", "elsewhere", 2_000.0);
        let cfg = RoutingConfig::default();

        let recs = recommend_connections(&net, &[s], &[m], &d, &PopulationMap::new(), &cfg).unwrap();
        assert_eq!(recs[0].distance_m, 50.0);
        // 0.1 × 2000 passengers over a 100 m floor
        assert!((recs[0].score - 200.0 / 0.1).abs() < 1e-6);
    }

    #[test]
    fn entry_touching_both_endpoints_counts_once() {
        let (net, [b1, _, m1, _, _]) = stations();
        let mut d = DemandMatrix::new();
        d.insert("B1", "M1", 100.0);
        let cfg = RoutingConfig::default();
        let recs = recommend_connections(&net, &[b1], &[m1], &d, &PopulationMap::new(), &cfg).unwrap();
        assert!((recs[0].demand - 10.0).abs() < 1e-9);
    }

    #[test]
    fn result_is_capped_and_carries_population() {
        let (net, [b1, b2, m1, m2, _]) = stations();
        let mut pop = PopulationMap::new();
        pop.insert("B1", 200.0);
        pop.insert("M1", 300.0);
        let cfg = RoutingConfig { max_recommendations: 1, ..RoutingConfig::default() };

        let recs = recommend_connections(&net, &[b1, b2, b1], &[m1, m2], &demand(), &pop, &cfg).unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].population, 500.0);
    }

    #[test]
    fn unpositioned_stops_are_ignored() {
        let mut b = TransitNetworkBuilder::new();
        let s = b.add_node("S", None);
        let m = b.add_node("M", Some(Position::new(10.0, 0.0)));
        let net = b.build().unwrap();
        let cfg = RoutingConfig::default();
        let recs = recommend_connections(&net, &[s], &[m], &demand(), &PopulationMap::new(), &cfg).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn unknown_node_is_an_error() {
        let (net, [b1, ..]) = stations();
        let cfg = RoutingConfig::default();
        let err = recommend_connections(&net, &[b1], &[NodeId(77)], &demand(), &PopulationMap::new(), &cfg)
            .unwrap_err();
        assert!(matches!(err, TransitError::Network(NetworkError::NodeNotFound(NodeId(77)))));
    }
}

#[cfg(test)]
mod augmentation {
    use ct_core::RoutingConfig;
    use ct_network::{LinkSpec, TransitNetwork, TransitNetworkBuilder};

    use crate::{analyse_bus_routes, BusRoute, DemandMatrix};

    /// ```text
    /// S1 ─1000─ S2 ─600─ J ─700─ S3        S4 (isolated)
    ///                    │
    ///                    P ─500─ Q
    /// ```
    /// J–P is 500 m.
    fn city() -> TransitNetwork {
        let mut b = TransitNetworkBuilder::new();
        let s1 = b.add_node("S1", None);
        let s2 = b.add_node("S2", None);
        let j = b.add_node("J", None);
        let s3 = b.add_node("S3", None);
        b.add_node("S4", None);
        let p = b.add_node("P", None);
        let q = b.add_node("Q", None);
        b.add_link(s1, s2, LinkSpec::road(1_000.0));
        b.add_link(s2, j, LinkSpec::road(600.0));
        b.add_link(j, s3, LinkSpec::road(700.0));
        b.add_link(j, p, LinkSpec::road(500.0));
        b.add_link(p, q, LinkSpec::road(500.0));
        b.build().unwrap()
    }

    fn route(id: &str, stops: &[&str]) -> BusRoute {
        BusRoute {
            route_id: id.to_string(),
            stops: stops.iter().map(|s| s.to_string()).collect(),
            buses_assigned: 10,
            daily_passengers: 20_000.0,
        }
    }

    fn demand() -> DemandMatrix {
        let mut d = DemandMatrix::new();
        d.insert("S1", "S3", 500.0);
        d.insert("J", "S2", 200.0);
        d.insert("S1", "FAR", 5_000.0);
        d.insert("P", "Z", 3_000.0);
        d.insert("Q", "Z", 4_000.0);
        d.insert("J", "Z", 2_000.0);
        d.insert("J", "W", 1_500.0);
        d.insert("P", "W", 1_200.0);
        d.insert("P", "Q", 900.0);
        d
    }

    #[test]
    fn length_uses_direct_link_then_path_then_penalty() {
        let net = city();
        let cfg = RoutingConfig::default();
        let routes = [route("R1", &["S1", "S2", "S3", "S4", "GHOST"])];
        let reports = analyse_bus_routes(&net, &routes, &demand(), &cfg).unwrap();
        // 1000 direct + 1300 via J + 1000 penalty; the GHOST hop is ignored.
        assert_eq!(reports[0].current_length_m, 3_300.0);
        assert_eq!(reports[0].stops.len(), 5);
        assert_eq!(reports[0].buses_assigned, 10);
    }

    #[test]
    fn coverage_counts_pairs_inside_catchment() {
        let net = city();
        let cfg = RoutingConfig::default();
        let routes = [route("R1", &["S1", "S2", "S3"])];
        let reports = analyse_bus_routes(&net, &routes, &demand(), &cfg).unwrap();
        // S1→S3 (500) and J→S2 (200); J is a neighbour of S2.
        assert_eq!(reports[0].current_demand_coverage, 700.0);
    }

    #[test]
    fn suggestions_are_nearby_unserved_high_demand_pairs() {
        let net = city();
        let cfg = RoutingConfig::default();
        let routes = [route("R1", &["S1", "S2", "S3"])];
        let reports = analyse_bus_routes(&net, &routes, &demand(), &cfg).unwrap();

        let got: Vec<(&str, &str, f64)> = reports[0]
            .suggested_additions
            .iter()
            .map(|s| (s.origin.as_str(), s.destination.as_str(), s.passengers))
            .collect();
        // Q is three hops away and Z is off-network; S1→FAR is already served.
        assert_eq!(got, vec![("P", "Z", 3_000.0), ("J", "Z", 2_000.0), ("J", "W", 1_500.0)]);
    }

    #[test]
    fn endpoints_served_by_another_route_are_excluded() {
        let net = city();
        let cfg = RoutingConfig::default();
        let routes = [route("R1", &["S1", "S2", "S3"]), route("R2", &["P"])];
        let reports = analyse_bus_routes(&net, &routes, &demand(), &cfg).unwrap();

        let r1: Vec<&str> = reports[0].suggested_additions.iter().map(|s| s.origin.as_str()).collect();
        assert_eq!(r1, vec!["J", "J"]);
        assert_eq!(reports[1].route_id, "R2");
    }

    #[test]
    fn suggestion_count_is_configurable() {
        let net = city();
        let cfg = RoutingConfig { suggestions_per_route: 1, ..RoutingConfig::default() };
        let routes = [route("R1", &["S1", "S2", "S3"])];
        let reports = analyse_bus_routes(&net, &routes, &demand(), &cfg).unwrap();
        assert_eq!(reports[0].suggested_additions.len(), 1);
    }
}

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use crate::{load_bus_routes_reader, load_demand_reader, load_population_reader, TransitError};

    #[test]
    fn demand_rows_are_trimmed() {
        let csv = "FromID,ToID,Daily Passengers\n 3 ,5,15000\n\"1\",\"7\",200\n";
        let d = load_demand_reader(Cursor::new(csv)).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("3", "5"), 15_000.0);
        assert_eq!(d.get("1", "7"), 200.0);
        assert_eq!(d.between("5", "3"), 15_000.0);
        assert_eq!(d.get("5", "3"), 0.0);
    }

    #[test]
    fn blank_passenger_cell_is_no_data() {
        let csv = "FromID,ToID,Daily Passengers\n3,5,\n1,7,200\n";
        let d = load_demand_reader(Cursor::new(csv)).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.get("3", "5"), 0.0);
        assert_eq!(d.get("1", "7"), 200.0);
    }

    #[test]
    fn population_rows() {
        let csv = "ID,Population\n1,250000\n2,500000\n";
        let p = load_population_reader(Cursor::new(csv)).unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.get("2"), 500_000.0);
        assert_eq!(p.get("9"), 0.0);
    }

    #[test]
    fn bus_route_stops_are_split() {
        let csv = "RouteID,Stops(comma-separated IDs),Buses Assigned,Daily Passengers\n\
                   B1,\"1, 3 ,6,9\",25,35000\n\
                   B2,\"7\",5,8000\n";
        let routes = load_bus_routes_reader(Cursor::new(csv)).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].route_id, "B1");
        assert_eq!(routes[0].stops, vec!["1", "3", "6", "9"]);
        assert_eq!(routes[0].buses_assigned, 25);
        assert!(routes[0].serves("6"));
        assert_eq!(routes[1].stops, vec!["7"]);
    }

    #[test]
    fn route_without_stops_is_rejected() {
        let csv = "RouteID,Stops(comma-separated IDs),Buses Assigned,Daily Passengers\nB1,\"\",2,100\n";
        let err = load_bus_routes_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, TransitError::Parse(_)));
    }

    #[test]
    fn malformed_number_is_a_parse_error() {
        let csv = "FromID,ToID,Daily Passengers\n1,2,lots\n";
        assert!(matches!(load_demand_reader(Cursor::new(csv)), Err(TransitError::Parse(_))));
    }
}
