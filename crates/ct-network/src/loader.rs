//! Traffic CSV loader.
//!
//! # CSV format
//!
//! One row per road, one column per period (vehicles/hour):
//!
//! ```csv
//! RoadID,MorningPeak(veh/h),Afternoon(veh/h),Evening Peak(veh/h),Night(veh/h)
//! 1-3,2800,1500,2600,800
//! 3-5,3200,1800,2900,900
//! ```
//!
//! `RoadID` is `"<from label>-<to label>"`.  Labels may themselves contain
//! `-`: every split point is tried and the first one whose halves are both
//! known labels wins.  Rows naming a label the network does not contain are
//! skipped with a warning.  A blank period cell means "no data" for that
//! period and is left out of the table.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ct_core::{NodeId, TimePeriod};

use crate::{NetworkError, NetworkResult, TrafficTable, TransitNetwork};

#[derive(Deserialize)]
struct TrafficRecord {
    #[serde(rename = "RoadID")]
    road_id:   String,
    #[serde(rename = "MorningPeak(veh/h)")]
    morning:   Option<f64>,
    #[serde(rename = "Afternoon(veh/h)")]
    afternoon: Option<f64>,
    #[serde(rename = "Evening Peak(veh/h)")]
    evening:   Option<f64>,
    #[serde(rename = "Night(veh/h)")]
    night:     Option<f64>,
}

/// Load a [`TrafficTable`] from a CSV file, resolving labels via `network`.
pub fn load_traffic_csv(path: &Path, network: &TransitNetwork) -> NetworkResult<TrafficTable> {
    let file = std::fs::File::open(path)?;
    load_traffic_reader(file, network)
}

/// Like [`load_traffic_csv`] but accepts any `Read` source.
pub fn load_traffic_reader<R: Read>(reader: R, network: &TransitNetwork) -> NetworkResult<TrafficTable> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut table = TrafficTable::new();
    let mut skipped = 0usize;

    for result in csv_reader.deserialize::<TrafficRecord>() {
        let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
        let Some((from, to)) = resolve_road_id(&row.road_id, network)? else {
            log::warn!("traffic row {:?} references an unknown node; skipped", row.road_id);
            skipped += 1;
            continue;
        };

        let periods = [
            (TimePeriod::Morning,   row.morning),
            (TimePeriod::Afternoon, row.afternoon),
            (TimePeriod::Evening,   row.evening),
            (TimePeriod::Night,     row.night),
        ];
        for (period, flow) in periods {
            if let Some(flow) = flow {
                table.insert(from, to, period, flow);
            }
        }
    }

    log::info!("loaded {} traffic entries ({skipped} rows skipped)", table.len());
    Ok(table)
}

/// Resolve `"<from>-<to>"` to a node pair, or `None` if no split names two
/// known labels.
fn resolve_road_id(road_id: &str, network: &TransitNetwork) -> NetworkResult<Option<(NodeId, NodeId)>> {
    let trimmed = road_id.trim().trim_matches('"');
    let mut well_formed = false;

    for (i, _) in trimmed.match_indices('-') {
        let (a, b) = (trimmed[..i].trim(), trimmed[i + 1..].trim());
        if a.is_empty() || b.is_empty() {
            continue;
        }
        well_formed = true;
        if let (Some(from), Some(to)) = (network.node_by_label(a), network.node_by_label(b)) {
            return Ok(Some((from, to)));
        }
    }

    if well_formed {
        Ok(None)
    } else {
        Err(NetworkError::Parse(format!(
            "invalid RoadID {road_id:?}: expected \"<from>-<to>\""
        )))
    }
}
