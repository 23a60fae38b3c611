//! Mode comparison and batch routing.
//!
//! With the `parallel` feature the independent searches fan out on Rayon's
//! thread pool; every search only reads the network, traffic table and
//! config, so the results are identical either way.

use std::fmt;
use std::time::Duration;

use ct_core::{EdgeId, NodeId, TransportMode};

use crate::multimodal::multimodal_route;
use crate::weight::WeightContext;
use crate::{MultiModalPath, PathResult, Router, RoutingResult};

// ── PlanMode ──────────────────────────────────────────────────────────────────

/// A row of the mode comparison: one of the pure passenger modes, or the
/// mode-switching search.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PlanMode {
    Car,
    Bus,
    Metro,
    Mixed,
}

impl PlanMode {
    pub const ALL: [PlanMode; 4] = [PlanMode::Car, PlanMode::Bus, PlanMode::Metro, PlanMode::Mixed];

    /// The single transport mode, or `None` for [`PlanMode::Mixed`].
    pub fn transport_mode(self) -> Option<TransportMode> {
        match self {
            PlanMode::Car   => Some(TransportMode::Car),
            PlanMode::Bus   => Some(TransportMode::Bus),
            PlanMode::Metro => Some(TransportMode::Metro),
            PlanMode::Mixed => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlanMode::Car   => "car",
            PlanMode::Bus   => "bus",
            PlanMode::Metro => "metro",
            PlanMode::Mixed => "mixed",
        }
    }
}

impl fmt::Display for PlanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ModePlan ──────────────────────────────────────────────────────────────────

/// One mode's journey, normalised so pure and mixed results compare directly.
#[derive(Debug, Clone)]
pub struct ModePlan {
    pub mode: PlanMode,
    pub nodes: Vec<NodeId>,
    pub edges: Vec<EdgeId>,
    /// Mode per hop.  Constant for the pure modes.
    pub hop_modes: Vec<TransportMode>,
    pub total_distance_m: f64,
    /// Minutes, switch penalties included.  Infinite when unreachable.
    pub total_weight_min: f64,
    pub switches: usize,
    pub elapsed: Duration,
}

impl ModePlan {
    fn from_single(mode: PlanMode, transport: TransportMode, path: PathResult) -> Self {
        Self {
            mode,
            hop_modes: vec![transport; path.edges.len()],
            nodes: path.nodes,
            edges: path.edges,
            total_distance_m: path.total_distance_m,
            total_weight_min: path.total_time_min,
            switches: 0,
            elapsed: path.elapsed,
        }
    }

    fn from_mixed(path: MultiModalPath) -> Self {
        Self {
            mode: PlanMode::Mixed,
            nodes: path.nodes,
            edges: path.edges,
            hop_modes: path.modes,
            total_distance_m: path.total_distance_m,
            total_weight_min: path.total_weight_min,
            switches: path.switches,
            elapsed: path.elapsed,
        }
    }

    #[inline]
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty()
    }
}

// ── ModeComparison ────────────────────────────────────────────────────────────

/// Plans for every [`PlanMode`], in [`PlanMode::ALL`] order.
#[derive(Debug, Clone)]
pub struct ModeComparison {
    pub from:  NodeId,
    pub to:    NodeId,
    pub plans: Vec<ModePlan>,
}

impl ModeComparison {
    pub fn get(&self, mode: PlanMode) -> Option<&ModePlan> {
        self.plans.iter().find(|p| p.mode == mode)
    }

    /// The reachable plan with the lowest total weight.  Ties go to the
    /// earlier entry in [`PlanMode::ALL`].
    pub fn best(&self) -> Option<&ModePlan> {
        self.plans
            .iter()
            .filter(|p| p.is_reachable())
            .fold(None, |best: Option<&ModePlan>, p| match best {
                Some(b) if b.total_weight_min <= p.total_weight_min => Some(b),
                _ => Some(p),
            })
    }
}

fn plan_one<R: Router>(
    router: &R,
    ctx:    &WeightContext<'_>,
    from:   NodeId,
    to:     NodeId,
    mode:   PlanMode,
) -> RoutingResult<ModePlan> {
    match mode.transport_mode() {
        Some(t) => Ok(ModePlan::from_single(mode, t, router.route(ctx, from, to, t)?)),
        None => Ok(ModePlan::from_mixed(multimodal_route(ctx, from, to)?)),
    }
}

/// Route `from → to` by car, bus, metro and mixed mode.
pub fn plan_all_modes<R: Router>(
    router: &R,
    ctx:    &WeightContext<'_>,
    from:   NodeId,
    to:     NodeId,
) -> RoutingResult<ModeComparison> {
    #[cfg(not(feature = "parallel"))]
    let plans = PlanMode::ALL
        .iter()
        .map(|&mode| plan_one(router, ctx, from, to, mode))
        .collect::<RoutingResult<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let plans = {
        use rayon::prelude::*;
        PlanMode::ALL
            .par_iter()
            .map(|&mode| plan_one(router, ctx, from, to, mode))
            .collect::<RoutingResult<Vec<_>>>()?
    };

    let comparison = ModeComparison { from, to, plans };
    match comparison.best() {
        Some(best) => log::info!(
            "{from}->{to}: best mode {} at {:.2} min",
            best.mode,
            best.total_weight_min
        ),
        None => log::info!("{from}->{to}: unreachable by every mode"),
    }
    Ok(comparison)
}

/// Run one single-mode query per `(from, to)` pair.  Output order matches
/// `queries`.
pub fn route_batch<R: Router>(
    router:  &R,
    ctx:     &WeightContext<'_>,
    queries: &[(NodeId, NodeId)],
    mode:    TransportMode,
) -> RoutingResult<Vec<PathResult>> {
    #[cfg(not(feature = "parallel"))]
    let results = queries
        .iter()
        .map(|&(from, to)| router.route(ctx, from, to, mode))
        .collect::<RoutingResult<Vec<_>>>()?;

    #[cfg(feature = "parallel")]
    let results = {
        use rayon::prelude::*;
        queries
            .par_iter()
            .map(|&(from, to)| router.route(ctx, from, to, mode))
            .collect::<RoutingResult<Vec<_>>>()?
    };

    let reachable = results.iter().filter(|p| p.is_reachable()).count();
    log::info!("batch {mode}: {reachable}/{} queries reachable", results.len());
    Ok(results)
}
