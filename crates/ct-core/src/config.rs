//! Tunable constants for the weight model, the searches, and the transit
//! heuristics.
//!
//! Every search and heuristic takes a `&RoutingConfig` rather than reading
//! module-level constants.  Applications typically load one from JSON or TOML
//! (enable the `serde` feature) and keep the defaults for any field they omit.

use crate::{CoreError, CoreResult, ModeTable};

/// Routing and heuristic parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoutingConfig {
    // ── Edge weight model ─────────────────────────────────────────────────
    /// Free-flow speed per mode in km/h.  Edges with a speed-limit override
    /// use that instead.
    pub base_speed_kmh: ModeTable<f64>,

    /// Lower clamp on `flow / capacity`.  Also the factor used when no
    /// traffic data exists for an edge.
    pub congestion_min_factor: f64,

    /// Upper clamp on `flow / capacity`.
    pub congestion_max_factor: f64,

    /// Fraction of free-flow speed lost at a congestion factor of 1.0.
    pub congestion_slowdown: f64,

    /// Capacity (vehicles/hour) assumed for edges that carry none.
    pub default_capacity: f64,

    // ── Multi-modal search ────────────────────────────────────────────────
    /// Minutes added whenever the active mode changes at a node.
    pub mode_switch_penalty_min: f64,

    // ── Emergency delay ───────────────────────────────────────────────────
    /// Delay surcharge, as a fraction of the car's total path distance,
    /// applied when the car shares at least one edge with an emergency
    /// vehicle.
    pub emergency_delay_fraction: f64,

    // ── Connection scoring ────────────────────────────────────────────────
    /// Bus stop / metro station pairs farther apart than this are ignored.
    pub max_connection_radius_m: f64,

    /// Distances below this are raised to it before scoring so adjacent
    /// pairs do not dominate through a near-zero denominator.
    pub min_connection_distance_m: f64,

    /// Divisor scale in `score = demand / (distance_km × scale)`.
    pub connection_score_scale: f64,

    /// Share of touching OD demand assumed to use a new connection.
    pub connection_demand_share: f64,

    /// How many recommendations to return.
    pub max_recommendations: usize,

    // ── Route augmentation ────────────────────────────────────────────────
    /// Distance charged for a stop pair with no path between them.
    pub missing_path_penalty_m: f64,

    /// OD pairs at or below this passenger count are not suggested.
    pub high_demand_threshold: f64,

    /// An OD endpoint counts as "near" a route within this many hops.
    pub reach_max_hops: usize,

    /// Suggestions kept per route.
    pub suggestions_per_route: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            base_speed_kmh: ModeTable {
                car:       120.0,
                bus:       100.0,
                metro:      90.0,
                emergency: 100.0,
            },
            congestion_min_factor:     0.25,
            congestion_max_factor:     1.0,
            congestion_slowdown:       0.5,
            default_capacity:          2_000.0,
            mode_switch_penalty_min:   2.0,
            emergency_delay_fraction:  0.03,
            max_connection_radius_m:   2_000.0,
            min_connection_distance_m: 100.0,
            connection_score_scale:    1.0,
            connection_demand_share:   0.1,
            max_recommendations:       10,
            missing_path_penalty_m:    1_000.0,
            high_demand_threshold:     1_000.0,
            reach_max_hops:            2,
            suggestions_per_route:     3,
        }
    }
}

impl RoutingConfig {
    /// Reject parameter combinations that would make the weight model return
    /// negative or NaN costs.
    pub fn validate(&self) -> CoreResult<()> {
        for mode in crate::TransportMode::ALL {
            let v = self.base_speed_kmh[mode];
            if !(v.is_finite() && v > 0.0) {
                return Err(CoreError::Config(format!(
                    "base speed for {mode} must be positive, got {v}"
                )));
            }
        }
        if !(0.0..=self.congestion_max_factor).contains(&self.congestion_min_factor) {
            return Err(CoreError::Config(format!(
                "congestion bounds must satisfy 0 <= min ({}) <= max ({})",
                self.congestion_min_factor, self.congestion_max_factor
            )));
        }
        // speed = base × (1 − slowdown × factor) must stay positive.
        if self.congestion_slowdown < 0.0
            || self.congestion_slowdown * self.congestion_max_factor >= 1.0
        {
            return Err(CoreError::Config(format!(
                "congestion_slowdown {} × max factor {} must lie in [0, 1)",
                self.congestion_slowdown, self.congestion_max_factor
            )));
        }
        if self.mode_switch_penalty_min < 0.0 {
            return Err(CoreError::Config("mode_switch_penalty_min must be >= 0".into()));
        }
        if self.connection_score_scale <= 0.0 {
            return Err(CoreError::Config("connection_score_scale must be > 0".into()));
        }
        if self.max_connection_radius_m.is_nan() || self.max_connection_radius_m < 0.0 {
            return Err(CoreError::Config(format!(
                "max_connection_radius_m must be >= 0, got {}",
                self.max_connection_radius_m
            )));
        }
        if self.min_connection_distance_m <= 0.0 {
            return Err(CoreError::Config("min_connection_distance_m must be > 0".into()));
        }
        Ok(())
    }
}
