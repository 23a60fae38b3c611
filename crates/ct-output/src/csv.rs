//! CSV report backend.
//!
//! Creates four files in the configured output directory:
//! - `routes.csv`
//! - `connections.csv`
//! - `bus_routes.csv`
//! - `route_suggestions.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::ReportWriter;
use crate::{ConnectionRow, OutputResult, RouteReportRow, RouteSummaryRow, SuggestionRow};

/// Writes reports to four CSV files.
pub struct CsvReportWriter {
    routes:      Writer<File>,
    connections: Writer<File>,
    bus_routes:  Writer<File>,
    suggestions: Writer<File>,
    finished:    bool,
}

impl CsvReportWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record([
            "query", "mode", "from", "to", "reachable", "path", "hop_modes", "switches",
            "distance_m", "weight_min",
        ])?;

        let mut connections = Writer::from_path(dir.join("connections.csv"))?;
        connections.write_record([
            "rank", "bus_stop", "metro_station", "distance_m", "demand", "score", "population",
        ])?;

        let mut bus_routes = Writer::from_path(dir.join("bus_routes.csv"))?;
        bus_routes.write_record([
            "route_id", "stops", "buses_assigned", "daily_passengers", "current_length_m",
            "current_demand_coverage", "suggestions",
        ])?;

        let mut suggestions = Writer::from_path(dir.join("route_suggestions.csv"))?;
        suggestions.write_record(["route_id", "rank", "origin", "destination", "passengers"])?;

        Ok(Self {
            routes,
            connections,
            bus_routes,
            suggestions,
            finished: false,
        })
    }
}

impl ReportWriter for CsvReportWriter {
    fn write_routes(&mut self, rows: &[RouteSummaryRow]) -> OutputResult<()> {
        for row in rows {
            self.routes.write_record(&[
                row.query.to_string(),
                row.mode.clone(),
                row.from.clone(),
                row.to.clone(),
                (row.reachable as u8).to_string(),
                row.path.clone(),
                row.hop_modes.clone(),
                row.switches.to_string(),
                row.distance_m.to_string(),
                row.weight_min.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()> {
        for row in rows {
            self.connections.write_record(&[
                row.rank.to_string(),
                row.bus_stop.clone(),
                row.metro_station.clone(),
                row.distance_m.to_string(),
                row.demand.to_string(),
                row.score.to_string(),
                row.population.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_route_reports(&mut self, rows: &[RouteReportRow]) -> OutputResult<()> {
        for row in rows {
            self.bus_routes.write_record(&[
                row.route_id.clone(),
                row.stops.clone(),
                row.buses_assigned.to_string(),
                row.daily_passengers.to_string(),
                row.current_length_m.to_string(),
                row.current_demand_coverage.to_string(),
                row.suggestions.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_suggestions(&mut self, rows: &[SuggestionRow]) -> OutputResult<()> {
        for row in rows {
            self.suggestions.write_record(&[
                row.route_id.clone(),
                row.rank.to_string(),
                row.origin.clone(),
                row.destination.clone(),
                row.passengers.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.routes.flush()?;
        self.connections.flush()?;
        self.bus_routes.flush()?;
        self.suggestions.flush()?;
        Ok(())
    }
}
