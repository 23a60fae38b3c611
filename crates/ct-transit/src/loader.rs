//! CSV loaders for demand, population, and bus-route tables.
//!
//! # CSV formats
//!
//! ```csv
//! FromID,ToID,Daily Passengers
//! 3,5,15000
//! ```
//!
//! ```csv
//! ID,Population
//! 1,250000
//! ```
//!
//! ```csv
//! RouteID,Stops(comma-separated IDs),Buses Assigned,Daily Passengers
//! B1,"1,3,6,9",25,35000
//! ```
//!
//! A blank `Daily Passengers` cell means "no data": the pair is left out of
//! the matrix rather than failing the load.
//!
//! Labels are kept verbatim after trimming whitespace and stray quotes; no
//! network is needed to load any of these tables.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{BusRoute, DemandMatrix, PopulationMap, TransitError, TransitResult};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DemandRecord {
    #[serde(rename = "FromID")]
    from:       String,
    #[serde(rename = "ToID")]
    to:         String,
    #[serde(rename = "Daily Passengers")]
    passengers: Option<f64>,
}

#[derive(Deserialize)]
struct PopulationRecord {
    #[serde(rename = "ID")]
    id:         String,
    #[serde(rename = "Population")]
    population: f64,
}

#[derive(Deserialize)]
struct BusRouteRecord {
    #[serde(rename = "RouteID")]
    route_id:         String,
    #[serde(rename = "Stops(comma-separated IDs)")]
    stops:            String,
    #[serde(rename = "Buses Assigned")]
    buses_assigned:   u32,
    #[serde(rename = "Daily Passengers")]
    daily_passengers: f64,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader)
}

fn clean(label: &str) -> String {
    label.trim().trim_matches('"').trim().to_string()
}

fn parse_err(e: csv::Error) -> TransitError {
    TransitError::Parse(e.to_string())
}

// ── Demand ────────────────────────────────────────────────────────────────────

pub fn load_demand_csv(path: &Path) -> TransitResult<DemandMatrix> {
    let file = std::fs::File::open(path)?;
    load_demand_reader(file)
}

/// Like [`load_demand_csv`] but accepts any `Read` source.
pub fn load_demand_reader<R: Read>(reader: R) -> TransitResult<DemandMatrix> {
    let mut demand = DemandMatrix::new();
    let mut skipped = 0usize;
    for result in csv_reader(reader).deserialize::<DemandRecord>() {
        let row = result.map_err(parse_err)?;
        let Some(passengers) = row.passengers else {
            skipped += 1;
            continue;
        };
        demand.insert(clean(&row.from), clean(&row.to), passengers);
    }
    log::info!("loaded {} demand pairs ({skipped} blank rows skipped)", demand.len());
    Ok(demand)
}

// ── Population ────────────────────────────────────────────────────────────────

pub fn load_population_csv(path: &Path) -> TransitResult<PopulationMap> {
    let file = std::fs::File::open(path)?;
    load_population_reader(file)
}

pub fn load_population_reader<R: Read>(reader: R) -> TransitResult<PopulationMap> {
    let mut population = PopulationMap::new();
    for result in csv_reader(reader).deserialize::<PopulationRecord>() {
        let row = result.map_err(parse_err)?;
        population.insert(clean(&row.id), row.population);
    }
    log::info!("loaded population for {} areas", population.len());
    Ok(population)
}

// ── Bus routes ────────────────────────────────────────────────────────────────

pub fn load_bus_routes_csv(path: &Path) -> TransitResult<Vec<BusRoute>> {
    let file = std::fs::File::open(path)?;
    load_bus_routes_reader(file)
}

/// Like [`load_bus_routes_csv`] but accepts any `Read` source.
///
/// A route must list at least one stop.
pub fn load_bus_routes_reader<R: Read>(reader: R) -> TransitResult<Vec<BusRoute>> {
    let mut routes = Vec::new();
    for result in csv_reader(reader).deserialize::<BusRouteRecord>() {
        let row = result.map_err(parse_err)?;
        let stops: Vec<String> = row
            .stops
            .split(',')
            .map(clean)
            .filter(|s| !s.is_empty())
            .collect();
        if stops.is_empty() {
            return Err(TransitError::Parse(format!("route {:?} has no stops", row.route_id)));
        }
        routes.push(BusRoute {
            route_id: clean(&row.route_id),
            stops,
            buses_assigned: row.buses_assigned,
            daily_passengers: row.daily_passengers,
        });
    }
    log::info!("loaded {} bus routes", routes.len());
    Ok(routes)
}
