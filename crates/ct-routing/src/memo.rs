//! Within-run path cache.
//!
//! [`MemoRouter`] wraps any [`Router`] and remembers each result under
//! `(from, to, period, mode, emergency period)`.  A repeated query is answered
//! from the cache without searching again.
//!
//! The key does not identify the network, traffic table or config behind a
//! [`WeightContext`].  Keep one cache per such triple, or call
//! [`clear`](MemoRouter::clear) after swapping any of them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use rustc_hash::FxHashMap;

use ct_core::{NodeId, TimePeriod, TransportMode};

use crate::weight::WeightContext;
use crate::{PathResult, Router, RoutingResult};

/// Cache key: endpoints, query period, mode, and the active emergency
/// period if any.
type MemoKey = (NodeId, NodeId, TimePeriod, TransportMode, Option<TimePeriod>);

/// Caching decorator around a single-mode router.
///
/// Errors are never cached.  Unreachable results are `Ok` and are cached
/// like any other.  Cached results carry the lookup time in `elapsed`.
pub struct MemoRouter<R: Router> {
    inner:  R,
    cache:  Mutex<FxHashMap<MemoKey, PathResult>>,
    hits:   AtomicUsize,
    misses: AtomicUsize,
}

impl<R: Router> MemoRouter<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Mutex::new(FxHashMap::default()),
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Queries answered from the cache.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    /// Queries that ran the inner router.
    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    /// Number of cached paths.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop every cached path and reset the counters.
    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    // The map is never left half-written, so a poisoned lock is usable.
    fn lock(&self) -> MutexGuard<'_, FxHashMap<MemoKey, PathResult>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Router> Router for MemoRouter<R> {
    fn route(
        &self,
        ctx:  &WeightContext<'_>,
        from: NodeId,
        to:   NodeId,
        mode: TransportMode,
    ) -> RoutingResult<PathResult> {
        let t0 = Instant::now();
        let emergency = ctx.emergency.filter(|e| e.active).map(|e| e.period);
        let key: MemoKey = (from, to, ctx.period, mode, emergency);

        if let Some(hit) = self.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            log::debug!("memo {mode} {from}->{to}: cache hit");
            return Ok(PathResult { elapsed: t0.elapsed(), ..hit.clone() });
        }

        // Not holding the lock during the search.
        let path = self.inner.route(ctx, from, to, mode)?;
        self.misses.fetch_add(1, Ordering::Relaxed);
        self.lock().insert(key, path.clone());
        Ok(path)
    }
}
