//! `ct-output` — report writers for routing and transit-analysis results.
//!
//! | Backend | Files created                                                          |
//! |---------|------------------------------------------------------------------------|
//! | CSV     | `routes.csv`, `connections.csv`, `bus_routes.csv`, `route_suggestions.csv` |
//!
//! Backends implement [`ReportWriter`].  Results are converted to label-based
//! rows first (see [`row`]), so writers never need the network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ct_output::{CsvReportWriter, ReportWriter, RouteSummaryRow};
//!
//! let mut w = CsvReportWriter::new(Path::new("./output"))?;
//! let rows: Vec<_> = comparison.plans.iter()
//!     .map(|p| RouteSummaryRow::from_plan(0, from, to, p, &network))
//!     .collect();
//! w.write_routes(&rows)?;
//! w.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod writer;


pub use csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use row::{ConnectionRow, RouteReportRow, RouteSummaryRow, SuggestionRow, PATH_SEP};
pub use writer::ReportWriter;
