//! Origin-destination demand, neighbourhood population, and bus routes.
//!
//! All three are keyed by node *label* rather than `NodeId`: demand and
//! population tables routinely mention places the network does not model,
//! and those rows must survive loading so that label-level totals stay
//! correct.

use rustc_hash::FxHashMap;

// ── DemandMatrix ──────────────────────────────────────────────────────────────

/// Daily passengers per `(origin, destination)` label pair.
///
/// Stored as origin → destination → passengers so lookups can borrow `&str`.
#[derive(Clone, Debug, Default)]
pub struct DemandMatrix {
    entries: FxHashMap<String, FxHashMap<String, f64>>,
    len:     usize,
}

impl DemandMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record passengers for `origin → destination`, replacing any previous
    /// value for the pair.
    pub fn insert(&mut self, origin: impl Into<String>, destination: impl Into<String>, passengers: f64) {
        let row = self.entries.entry(origin.into()).or_default();
        if row.insert(destination.into(), passengers).is_none() {
            self.len += 1;
        }
    }

    /// Passengers for the ordered pair; `0.0` when absent.
    pub fn get(&self, origin: &str, destination: &str) -> f64 {
        self.entries
            .get(origin)
            .and_then(|row| row.get(destination))
            .copied()
            .unwrap_or(0.0)
    }

    /// Passengers in both directions between `a` and `b`.
    pub fn between(&self, a: &str, b: &str) -> f64 {
        if a == b {
            self.get(a, b)
        } else {
            self.get(a, b) + self.get(b, a)
        }
    }

    /// Sum of every entry with an endpoint in `labels`.  An entry touching
    /// several of them counts once.
    pub fn touching(&self, labels: &[&str]) -> f64 {
        self.iter()
            .filter(|(o, d, _)| labels.iter().any(|l| o == l || d == l))
            .map(|(_, _, p)| p)
            .sum()
    }

    /// `(origin, destination, passengers)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.entries.iter().flat_map(|(o, row)| {
            row.iter().map(move |(d, &p)| (o.as_str(), d.as_str(), p))
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// ── PopulationMap ─────────────────────────────────────────────────────────────

/// Residents per neighbourhood label.
#[derive(Clone, Debug, Default)]
pub struct PopulationMap {
    by_label: FxHashMap<String, f64>,
}

impl PopulationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: impl Into<String>, population: f64) {
        self.by_label.insert(label.into(), population);
    }

    /// Population of `label`; `0.0` when unknown.
    pub fn get(&self, label: &str) -> f64 {
        self.by_label.get(label).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

// ── BusRoute ──────────────────────────────────────────────────────────────────

/// An existing bus line.
#[derive(Clone, Debug, PartialEq)]
pub struct BusRoute {
    pub route_id:         String,
    /// Stop labels in travel order.
    pub stops:            Vec<String>,
    pub buses_assigned:   u32,
    pub daily_passengers: f64,
}

impl BusRoute {
    pub fn serves(&self, label: &str) -> bool {
        self.stops.iter().any(|s| s == label)
    }
}
