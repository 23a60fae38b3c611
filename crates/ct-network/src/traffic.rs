//! Time-of-day traffic flow table.
//!
//! Flows are stored per directed node pair and period.  Lookups query both
//! directions and return the larger value, so a table loaded from one-way
//! counts (`"A-B"` only) still congests the reverse direction.  A missing
//! entry is "no data", never an error.

use rustc_hash::FxHashMap;

use ct_core::{NodeId, TimePeriod};

/// Traffic flow in vehicles/hour keyed by `(period, from, to)`.
#[derive(Clone, Debug, Default)]
pub struct TrafficTable {
    flows: FxHashMap<(TimePeriod, NodeId, NodeId), f64>,
}

impl TrafficTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the flow for `from → to` during `period`, replacing any
    /// previous value.
    pub fn insert(&mut self, from: NodeId, to: NodeId, period: TimePeriod, flow: f64) {
        self.flows.insert((period, from, to), flow);
    }

    /// Maximum flow recorded for the pair in either direction, or `None`.
    pub fn flow(&self, a: NodeId, b: NodeId, period: TimePeriod) -> Option<f64> {
        let fwd = self.flows.get(&(period, a, b)).copied();
        let rev = self.flows.get(&(period, b, a)).copied();
        match (fwd, rev) {
            (Some(f), Some(r)) => Some(f.max(r)),
            (f, r) => f.or(r),
        }
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}
