//! Traffic- and mode-aware edge weight model.
//!
//! # Cost units
//!
//! All costs are **minutes** (`f64`).  A mode that may not use an edge's
//! category gets exactly `f64::INFINITY`, which every search treats as
//! "edge absent".
//!
//! # Formula
//!
//! ```text
//! base   = edge speed limit, else config.base_speed_kmh[mode]
//! factor = clamp(flow / capacity, min_factor, max_factor)     (no flow → min_factor)
//! speed  = base × (1 − slowdown × factor)                     (emergency: speed = base)
//! cost   = length_m / 1000 / speed × 60
//! ```

use ct_core::{EdgeId, NodeId, RoutingConfig, TimePeriod, TransportMode};
use ct_network::{TrafficTable, TransitNetwork};

// ── Context ───────────────────────────────────────────────────────────────────

/// An emergency vehicle active on the network.
///
/// While `active`, traffic is read for the emergency's `period` first and
/// falls back to the query period when that period has no data.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EmergencyContext {
    pub period: TimePeriod,
    pub active: bool,
}

/// Everything the weight model reads, bundled so searches can pass one
/// borrow around.  Cheap to copy.
#[derive(Copy, Clone)]
pub struct WeightContext<'a> {
    pub network:   &'a TransitNetwork,
    pub traffic:   &'a TrafficTable,
    pub config:    &'a RoutingConfig,
    pub period:    TimePeriod,
    pub emergency: Option<EmergencyContext>,
}

impl<'a> WeightContext<'a> {
    pub fn new(
        network: &'a TransitNetwork,
        traffic: &'a TrafficTable,
        config:  &'a RoutingConfig,
        period:  TimePeriod,
    ) -> Self {
        Self { network, traffic, config, period, emergency: None }
    }

    pub fn with_emergency(mut self, emergency: EmergencyContext) -> Self {
        self.emergency = Some(emergency);
        self
    }

    /// Flow on the `a`–`b` pair for this context's period(s).
    pub fn flow(&self, a: NodeId, b: NodeId) -> Option<f64> {
        match self.emergency {
            Some(em) if em.active => self
                .traffic
                .flow(a, b, em.period)
                .or_else(|| self.traffic.flow(a, b, self.period)),
            _ => self.traffic.flow(a, b, self.period),
        }
    }
}

// ── Weight functions ──────────────────────────────────────────────────────────

/// Clamped `flow / capacity` for `edge`.
pub fn congestion_factor(ctx: &WeightContext<'_>, edge: EdgeId) -> f64 {
    let cfg = ctx.config;
    let i = edge.index();
    let flow = ctx.flow(ctx.network.edge_from[i], ctx.network.edge_to[i]);

    match flow {
        Some(flow) if flow.is_finite() => {
            let capacity = ctx.network.edge_capacity[i].unwrap_or(cfg.default_capacity);
            if capacity <= 0.0 {
                cfg.congestion_max_factor
            } else {
                (flow / capacity).clamp(cfg.congestion_min_factor, cfg.congestion_max_factor)
            }
        }
        _ => cfg.congestion_min_factor,
    }
}

/// Effective speed in km/h of `mode` on `edge`, ignoring the category gate.
pub fn effective_speed_kmh(ctx: &WeightContext<'_>, edge: EdgeId, mode: TransportMode) -> f64 {
    let base = ctx.network.edge_speed_kmh[edge.index()]
        .unwrap_or(ctx.config.base_speed_kmh[mode]);
    if mode.feels_congestion() {
        base * (1.0 - ctx.config.congestion_slowdown * congestion_factor(ctx, edge))
    } else {
        base
    }
}

/// Minutes to cover `length_m` at `speed_kmh`; infinite for non-positive speeds.
#[inline]
pub fn travel_minutes(length_m: f64, speed_kmh: f64) -> f64 {
    if speed_kmh > 0.0 {
        (length_m / 1_000.0) / speed_kmh * 60.0
    } else {
        f64::INFINITY
    }
}

/// Travel time in minutes for `mode` over `edge`.
///
/// Returns `f64::INFINITY` when `mode` may not use the edge's category.
#[inline]
pub fn edge_cost(ctx: &WeightContext<'_>, edge: EdgeId, mode: TransportMode) -> f64 {
    let i = edge.index();
    if !mode.can_use(ctx.network.edge_category[i]) {
        return f64::INFINITY;
    }
    travel_minutes(ctx.network.edge_length_m[i], effective_speed_kmh(ctx, edge, mode))
}

/// Re-evaluate `(distance_m, minutes)` of an edge sequence under `ctx`.
///
/// Used by path reconstruction, and by callers who want to price a path
/// found under one context (e.g. no emergency) under another.
pub fn evaluate_edges(ctx: &WeightContext<'_>, edges: &[EdgeId], mode: TransportMode) -> (f64, f64) {
    edges.iter().fold((0.0, 0.0), |(dist, time), &e| {
        (dist + ctx.network.edge_length_m[e.index()], time + edge_cost(ctx, e, mode))
    })
}
