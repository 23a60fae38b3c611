//! cairo: end-to-end run of the city transit workspace.
//!
//! Builds a small synthetic Greater Cairo network, loads embedded traffic,
//! demand, population and bus-route tables, then:
//!
//! 1. compares car / bus / metro / mixed journeys for a few trips through a
//!    path cache,
//! 2. dispatches an emergency vehicle with A* and measures the delay it
//!    imposes on an overlapping car trip,
//! 3. ranks new bus ↔ metro connections and analyses the bus routes,
//! 4. writes every result to `output/cairo/*.csv`.
//!
//! Usage: `cairo [config.json]`.  Fields missing from the JSON keep their
//! defaults.  Set `RUST_LOG=debug` for per-search statistics.

mod network;

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};

use ct_core::{NodeId, RoutingConfig, TimePeriod, TransportMode};
use ct_network::{load_traffic_reader, TransitNetwork};
use ct_output::{
    ConnectionRow, CsvReportWriter, ReportWriter, RouteReportRow, RouteSummaryRow, SuggestionRow,
};
use ct_routing::{
    multimodal_route, plan_all_modes, route_batch, simulate_emergency_delay, AStarRouter,
    MemoRouter, Router, TrafficDijkstra, WeightContext,
};
use ct_transit::{
    analyse_bus_routes, load_bus_routes_reader, load_demand_reader, load_population_reader,
    recommend_connections,
};

use network::{build_network, project};

// ── Embedded data ─────────────────────────────────────────────────────────────

const TRAFFIC_CSV: &str = "\
RoadID,MorningPeak(veh/h),Afternoon(veh/h),Evening Peak(veh/h),Night(veh/h)\n\
1-2,2800,1500,2600,800\n\
1-3,3200,1800,2900,900\n\
1-4,1900,1400,2100,600\n\
1-F2,3400,2600,3300,1200\n\
3-6,2600,1700,2500,700\n\
6-7,2900,2100,3000,900\n\
6-10,2200,1600,2400,600\n\
10-F1,2500,1900,2700,1100\n\
2-9,2100,1300,1900,500\n\
99-1,100,100,100,100\n\
";

const DEMAND_CSV: &str = "\
FromID,ToID,Daily Passengers\n\
9,7,15000\n\
8,F1,12000\n\
2,10,8000\n\
5,F1,6000\n\
4,7,4500\n\
3,F2,2500\n\
11,12,3000\n\
";

const POPULATION_CSV: &str = "\
ID,Population\n\
1,250000\n\
2,180000\n\
3,320000\n\
4,90000\n\
5,450000\n\
6,220000\n\
7,520000\n\
8,300000\n\
9,280000\n\
10,260000\n\
";

const BUS_ROUTES_CSV: &str = "\
RouteID,Stops(comma-separated IDs),Buses Assigned,Daily Passengers\n\
B1,\"9,2,1,3\",25,35000\n\
B2,\"3,6,7\",18,28000\n\
";

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config() -> Result<RoutingConfig> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?
        }
        None => RoutingConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn node(network: &TransitNetwork, label: &str) -> Result<NodeId> {
    Ok(network.require_label(label)?)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let config = load_config()?;
    log::info!(
        "switch penalty {:.1} min, emergency delay fraction {:.2}",
        config.mode_switch_penalty_min,
        config.emergency_delay_fraction
    );

    println!("=== cairo: city transit routing ===");
    println!();

    // 1. Network and data.
    let cairo = build_network()?;
    let network = &cairo.network;
    println!("Network: {} nodes, {} directed edges", network.node_count(), network.edge_count());

    let traffic = load_traffic_reader(Cursor::new(TRAFFIC_CSV), network)?;
    let demand = load_demand_reader(Cursor::new(DEMAND_CSV))?;
    let population = load_population_reader(Cursor::new(POPULATION_CSV))?;
    let routes = load_bus_routes_reader(Cursor::new(BUS_ROUTES_CSV))?;
    println!(
        "Data: {} traffic entries, {} OD pairs, {} districts, {} bus routes",
        traffic.len(),
        demand.len(),
        population.len(),
        routes.len()
    );
    println!();

    let period = TimePeriod::Morning;
    let ctx = WeightContext::new(network, &traffic, &config, period);
    let router = MemoRouter::new(TrafficDijkstra);

    // 2. Mode comparison.
    let trips = [("9", "7"), ("8", "F1"), ("2", "10")];
    let mut route_rows = Vec::new();
    println!("Mode comparison ({period} peak)");
    println!("{:<10} {:<7} {:>10} {:>10} {:>8}  path", "trip", "mode", "km", "min", "switch");
    println!("{}", "-".repeat(72));

    let t0 = Instant::now();
    for (query, (from_label, to_label)) in (0u32..).zip(trips) {
        let from = node(network, from_label)?;
        let to = node(network, to_label)?;
        let cmp = plan_all_modes(&router, &ctx, from, to)?;
        println!(
            "{:<10} OD demand {:.0} passengers/day",
            format!("{from_label}->{to_label}"),
            demand.between(from_label, to_label)
        );

        for plan in &cmp.plans {
            let row = RouteSummaryRow::from_plan(query, from, to, plan, network);
            if row.reachable {
                println!(
                    "{:<10} {:<7} {:>10.2} {:>10.2} {:>8}  {}",
                    format!("{from_label}->{to_label}"),
                    row.mode,
                    row.distance_m / 1_000.0,
                    row.weight_min,
                    row.switches,
                    row.path
                );
            } else {
                println!("{:<10} {:<7} {:>10}", format!("{from_label}->{to_label}"), row.mode, "unreachable");
            }
            route_rows.push(row);
        }
        if let Some(best) = cmp.best() {
            println!("{:<10} best: {} ({:.2} min)", "", best.mode, best.total_weight_min);
        }
    }
    println!("Planned {} trips in {:.3} ms", trips.len(), t0.elapsed().as_secs_f64() * 1e3);

    let (from, to) = (node(network, "9")?, node(network, "7")?);
    let mixed = multimodal_route(&ctx, from, to)?;
    let legs: Vec<String> = mixed.legs().iter().map(|(m, hops)| format!("{m} x{hops}")).collect();
    println!("Mixed 9->7 legs: {}", if legs.is_empty() { "none".to_string() } else { legs.join(", ") });
    println!();

    // 3. Emergency dispatch and the delay it causes.  The incident is
    // reported as a coordinate and snapped to the nearest node.
    let station = node(network, "F2")?;
    let incident = network
        .nearest_node(project(31.3150, 30.0580))
        .context("no positioned node to snap the incident to")?;
    let dispatch = AStarRouter.emergency_route(&ctx, station, incident, TimePeriod::Morning)?;
    let car_from = node(network, "1")?;
    let car = router.route(&ctx, car_from, incident, TransportMode::Car)?;
    let car_star = AStarRouter.route(&ctx, car_from, incident, TransportMode::Car)?;
    let delay = simulate_emergency_delay(network, &config, &car.nodes, &dispatch.nodes);

    println!(
        "Emergency F2 -> {}: {:.2} min over {} hops",
        network.label(incident),
        dispatch.total_time_min,
        dispatch.hop_count()
    );
    println!("Car route agrees between A* and Dijkstra: {}", car.same_route(&car_star));
    println!(
        "Car 1 -> incident shares {} hops ({:.0} m) with it; delay surcharge {:.0} m",
        delay.overlap_edges.len(),
        delay.overlap_distance_m,
        delay.delay_distance_m
    );
    route_rows.push(RouteSummaryRow::from_path(
        trips.len() as u32,
        TransportMode::Emergency,
        station,
        incident,
        &dispatch,
        network,
    ));
    println!();

    // 4. Batch of car queries from downtown.
    let origin = node(network, "1")?;
    let queries: Vec<(NodeId, NodeId)> = network.nodes().filter(|&n| n != origin).map(|n| (origin, n)).collect();
    let batch = route_batch(&router, &ctx, &queries, TransportMode::Car)?;
    let mean = batch.iter().filter(|p| p.is_reachable()).map(|p| p.total_time_min).sum::<f64>()
        / batch.iter().filter(|p| p.is_reachable()).count().max(1) as f64;
    println!("Car batch from downtown: {} destinations, mean {:.2} min", batch.len(), mean);
    println!("Path cache: {} hits, {} misses, {} paths", router.hits(), router.misses(), router.len());
    println!();

    // 5. Transit improvements.
    let connections = recommend_connections(
        network,
        &cairo.bus_stops,
        &cairo.metro_stations,
        &demand,
        &population,
        &config,
    )?;
    println!("Recommended bus <-> metro connections");
    for row in ConnectionRow::from_connections(&connections, network) {
        println!(
            "  #{:<2} {:>3} <-> {:<3} {:>7.0} m  demand {:>7.0}  score {:>9.1}",
            row.rank, row.bus_stop, row.metro_station, row.distance_m, row.demand, row.score
        );
    }
    println!();

    let reports = analyse_bus_routes(network, &routes, &demand, &config)?;
    println!("Bus route analysis");
    for r in &reports {
        println!(
            "  {}: {:.1} km, coverage {:.0}, {} suggestions",
            r.route_id,
            r.current_length_m / 1_000.0,
            r.current_demand_coverage,
            r.suggested_additions.len()
        );
        for s in &r.suggested_additions {
            println!("      add {} -> {} ({:.0} passengers/day)", s.origin, s.destination, s.passengers);
        }
    }
    println!();

    // 6. Output.
    let out_dir = Path::new("output/cairo");
    std::fs::create_dir_all(out_dir)?;
    let mut writer = CsvReportWriter::new(out_dir)?;
    writer.write_routes(&route_rows)?;
    writer.write_connections(&ConnectionRow::from_connections(&connections, network))?;
    writer.write_route_reports(&reports.iter().map(RouteReportRow::from_report).collect::<Vec<_>>())?;
    writer.write_suggestions(&SuggestionRow::from_reports(&reports))?;
    writer.finish()?;
    println!("Reports written to {}", out_dir.display());

    Ok(())
}
