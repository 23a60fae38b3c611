//! The `ReportWriter` trait implemented by report backends.

use crate::{ConnectionRow, OutputResult, RouteReportRow, RouteSummaryRow, SuggestionRow};

/// Sink for routing and transit-analysis results.
pub trait ReportWriter {
    /// Write one row per routed query and mode.
    fn write_routes(&mut self, rows: &[RouteSummaryRow]) -> OutputResult<()>;

    /// Write ranked bus ↔ metro connection recommendations.
    fn write_connections(&mut self, rows: &[ConnectionRow]) -> OutputResult<()>;

    /// Write one row per analysed bus route.
    fn write_route_reports(&mut self, rows: &[RouteReportRow]) -> OutputResult<()>;

    /// Write the suggested additions of every analysed route.
    fn write_suggestions(&mut self, rows: &[SuggestionRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
