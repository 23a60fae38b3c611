//! Synthetic Greater Cairo transit network.
//!
//! Ten districts and two facilities projected around a downtown origin,
//! connected by arterial roads, one planned road, a bus corridor and a
//! two-segment metro line.

use ct_core::{NodeId, Position, RoadCategory};
use ct_network::{LinkSpec, NetworkResult, TransitNetwork, TransitNetworkBuilder};

const ORIGIN_LON: f64 = 31.2357;
const ORIGIN_LAT: f64 = 30.0444;

/// `(label, lon, lat)`
const PLACES: [(&str, f64, f64); 12] = [
    ("1",  31.2357, 30.0444), // Downtown
    ("2",  31.2096, 30.0561), // Zamalek
    ("3",  31.2617, 30.0650), // Abbasiya
    ("4",  31.2170, 30.0300), // Garden City
    ("5",  31.2433, 30.0800), // Shubra
    ("6",  31.2787, 30.0870), // Heliopolis West
    ("7",  31.3200, 30.0600), // Nasr City
    ("8",  31.2050, 30.0170), // Giza North
    ("9",  31.1900, 30.0600), // Mohandessin
    ("10", 31.3450, 30.0950), // Heliopolis East
    ("F1", 31.4056, 30.1219), // Airport
    ("F2", 31.2400, 30.0520), // Ramses Station
];

pub struct CairoNetwork {
    pub network:        TransitNetwork,
    pub bus_stops:      Vec<NodeId>,
    pub metro_stations: Vec<NodeId>,
}

/// Project a WGS84 coordinate into the network's planar frame.
pub fn project(lon: f64, lat: f64) -> Position {
    Position::from_lon_lat(lon, lat, ORIGIN_LON, ORIGIN_LAT)
}

fn km(v: f64) -> f64 {
    v * 1_000.0
}

pub fn build_network() -> NetworkResult<CairoNetwork> {
    let mut b = TransitNetworkBuilder::new();
    for (label, lon, lat) in PLACES {
        b.add_node(label, Some(project(lon, lat)));
    }
    let id = |b: &TransitNetworkBuilder, l: &str| b.node_by_label(l).unwrap_or(NodeId::INVALID);

    // (from, to, km, capacity veh/h)
    let roads = [
        ("1", "2", 3.2, 3_000.0),
        ("1", "3", 4.1, 2_800.0),
        ("1", "4", 2.5, 2_500.0),
        ("1", "F2", 1.2, 3_500.0),
        ("2", "9", 2.2, 2_200.0),
        ("3", "5", 3.0, 2_600.0),
        ("3", "6", 3.6, 2_400.0),
        ("4", "8", 2.1, 2_300.0),
        ("5", "F2", 3.1, 2_000.0),
        ("6", "7", 4.9, 3_000.0),
        ("6", "10", 6.6, 2_800.0),
        ("7", "10", 4.3, 2_600.0),
        ("8", "9", 4.8, 2_000.0),
        ("10", "F1", 7.1, 3_200.0),
    ];
    for (from, to, dist, cap) in roads {
        b.add_link(id(&b, from), id(&b, to), LinkSpec::road(km(dist)).capacity(cap));
    }
    // Planned ring road segment.
    b.add_link(id(&b, "9"), id(&b, "5"), LinkSpec::new(km(5.4), RoadCategory::Potential).capacity(2_500.0));

    // Bus corridor 9 → 2 → 1 → 3 → 6 → 7 rides on the roads.
    let bus_line = ["9", "2", "1", "3", "6", "7"];
    for w in bus_line.windows(2) {
        let dist = roads
            .iter()
            .find(|(a, z, ..)| (*a, *z) == (w[0], w[1]) || (*a, *z) == (w[1], w[0]))
            .map_or(km(3.0), |r| km(r.2));
        b.add_link(id(&b, w[0]), id(&b, w[1]), LinkSpec::bus(dist));
    }

    // Metro: 8 → 4 → 1 → F2 → 5 → 6 → 10 → F1, faster than the roads in the east.
    let metro_line = [("8", "4", 2.0), ("4", "1", 2.3), ("1", "F2", 1.1), ("F2", "5", 2.9),
                      ("5", "6", 3.8), ("6", "10", 6.0), ("10", "F1", 6.8)];
    for (from, to, dist) in metro_line {
        b.add_link(id(&b, from), id(&b, to), LinkSpec::metro(km(dist)));
    }

    let bus_stops = bus_line.iter().map(|l| id(&b, l)).collect();
    let metro_stations = ["8", "4", "1", "F2", "5", "6", "10", "F1"]
        .iter()
        .map(|l| id(&b, l))
        .collect();

    Ok(CairoNetwork { network: b.build()?, bus_stops, metro_stations })
}
