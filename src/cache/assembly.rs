//! The compiled-assembly cache implementation.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Weak,
    },
    time::Instant,
};

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::{
    host::{EmitOutput, WorkspaceEvent},
    Error, Result,
};

/// Maximum number of error diagnostics quoted in a compile-failure excerpt.
pub const MAX_DIAGNOSTIC_EXCERPT: usize = 5;

/// Sizing policy for the assembly cache.
///
/// Defaults match the panel's intended footprint: a handful of projects, bounded
/// total memory, and a per-entry cutoff above which caching stops paying for itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of cached entries (default: 3).
    pub max_entries: usize,
    /// Maximum total cached bytes across all entries (default: 100 MB).
    pub max_total_bytes: usize,
    /// Single-entry cutoff; larger compile results are returned but never stored
    /// (default: 50 MB).
    pub max_entry_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 3,
            max_total_bytes: 100 * 1024 * 1024,
            max_entry_bytes: 50 * 1024 * 1024,
        }
    }
}

/// Aggregate counters describing cache behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Entries currently held.
    pub entries: usize,
    /// Total bytes currently held.
    pub total_bytes: usize,
    /// Reads served from an existing entry.
    pub hits: u64,
    /// Reads that required a compile.
    pub misses: u64,
    /// Entries removed by the insertion eviction policy.
    pub evictions: u64,
    /// Compile results rejected from storage for exceeding the single-entry cutoff.
    pub oversize_rejections: u64,
}

/// One cached compile result. Owned exclusively by the cache; callers only ever
/// see defensive copies of `bytes`.
struct CacheEntry {
    bytes: Vec<u8>,
    created_at: Instant,
    sequence: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    total_bytes: usize,
    next_sequence: u64,
    next_listener_id: u64,
    clear_listeners: Vec<(u64, Arc<dyn Fn() + Send + Sync>)>,
    hits: u64,
    misses: u64,
    evictions: u64,
    oversize_rejections: u64,
}

struct CacheInner {
    state: Mutex<CacheState>,
    config: CacheConfig,
    disposed: AtomicBool,
}

/// Bounded cache of compiled assembly bytes, keyed by project identity.
///
/// Cloning is cheap and shares the underlying state, so the cache can be handed to
/// the engine, event handlers and tests alike. See the [module docs](crate::cache)
/// for the caching discipline.
///
/// # Examples
///
/// ```rust
/// use cilview::cache::AssemblyCache;
/// use cilview::host::EmitOutput;
///
/// let cache = AssemblyCache::default();
/// let bytes = cache
///     .get_or_compile("proj", || EmitOutput::success(vec![1, 2, 3]))
///     .unwrap();
/// assert_eq!(bytes, vec![1, 2, 3]);
/// assert_eq!(cache.stats().entries, 1);
/// ```
#[derive(Clone)]
pub struct AssemblyCache {
    inner: Arc<CacheInner>,
}

impl Default for AssemblyCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl AssemblyCache {
    /// Creates a cache with the given sizing policy.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                state: Mutex::new(CacheState::default()),
                config,
                disposed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns cached bytes for the project, compiling on a miss.
    ///
    /// The compile closure runs outside the critical section. If a concurrent
    /// caller populated the key in the meantime, this caller's own result is
    /// discarded and a copy of the already-cached entry returned instead.
    /// The returned buffer is always an independent copy.
    ///
    /// # Errors
    ///
    /// [`Error::Disposed`] when the cache has been disposed,
    /// [`Error::CompilationFailed`] when the emit produced error diagnostics
    /// (carrying the first [`MAX_DIAGNOSTIC_EXCERPT`] of them plus the total count);
    /// failed compiles are never cached.
    pub fn get_or_compile<F>(&self, project_key: &str, compile: F) -> Result<Vec<u8>>
    where
        F: FnOnce() -> EmitOutput,
    {
        self.ensure_live()?;

        // Optimistic existence probe; the confirming re-check below happens under
        // the same lock acquisition that returns the buffer.
        {
            let mut state = self.inner.state.lock();
            if let Some(entry) = state.entries.get(project_key) {
                let bytes = entry.bytes.clone();
                state.hits += 1;
                debug!(project = project_key, size = bytes.len(), "assembly cache hit");
                return Ok(bytes);
            }
            state.misses += 1;
        }

        debug!(project = project_key, "assembly cache miss, compiling");
        let output = compile();
        let bytes = Self::accept_emit(output)?;

        self.ensure_live()?;
        let mut state = self.inner.state.lock();

        // Relaxed single-flight: a concurrent compile may have won the race while
        // we were outside the lock. Keep the cached result, drop ours.
        if let Some(existing) = state.entries.get(project_key) {
            debug!(project = project_key, "duplicate compile discarded");
            let cached = existing.bytes.clone();
            state.hits += 1;
            return Ok(cached);
        }

        if bytes.len() > self.inner.config.max_entry_bytes {
            state.oversize_rejections += 1;
            warn!(
                project = project_key,
                size = bytes.len(),
                limit = self.inner.config.max_entry_bytes,
                "compile result exceeds single-entry cutoff, not caching"
            );
            return Ok(bytes);
        }

        self.evict_for_insert(&mut state, bytes.len());

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.total_bytes += bytes.len();
        state.entries.insert(
            project_key.to_string(),
            CacheEntry {
                bytes: bytes.clone(),
                created_at: Instant::now(),
                sequence,
            },
        );

        Ok(bytes)
    }

    /// Converts an emit result into bytes, rejecting error diagnostics.
    fn accept_emit(output: EmitOutput) -> Result<Vec<u8>> {
        let errors: Vec<&str> = output.errors().map(|d| d.message.as_str()).collect();
        if !errors.is_empty() || output.bytes.is_none() {
            let total = errors.len();
            let excerpt = errors
                .iter()
                .take(MAX_DIAGNOSTIC_EXCERPT)
                .map(|m| (*m).to_string())
                .collect();
            return Err(Error::CompilationFailed { excerpt, total });
        }
        // Checked above.
        Ok(output.bytes.unwrap_or_default())
    }

    /// Evicts oldest entries until the new insert satisfies both bounds.
    fn evict_for_insert(&self, state: &mut CacheState, incoming: usize) {
        while !state.entries.is_empty()
            && (state.entries.len() >= self.inner.config.max_entries
                || state.total_bytes + incoming > self.inner.config.max_total_bytes)
        {
            let oldest = state
                .entries
                .iter()
                .min_by_key(|(_, entry)| (entry.created_at, entry.sequence))
                .map(|(key, _)| key.clone());

            let Some(key) = oldest else { break };
            if let Some(removed) = state.entries.remove(&key) {
                state.total_bytes -= removed.bytes.len();
                state.evictions += 1;
                debug!(project = %key, size = removed.bytes.len(), "evicted oldest cache entry");
            }
        }
    }

    /// Applies a workspace change notification.
    ///
    /// Project-scoped events remove exactly that project's entry; solution-level
    /// events clear the whole cache and notify clear subscribers.
    pub fn handle_event(&self, event: &WorkspaceEvent) {
        if self.inner.disposed.load(Ordering::Acquire) {
            return;
        }

        match event.project() {
            Some(project) => self.remove(project),
            None => self.clear(),
        }
    }

    /// Removes one project's entry, if present.
    pub fn remove(&self, project_key: &str) {
        let mut state = self.inner.state.lock();
        if let Some(removed) = state.entries.remove(project_key) {
            state.total_bytes -= removed.bytes.len();
            debug!(project = project_key, "invalidated cache entry");
        }
    }

    /// Clears all entries and notifies clear subscribers.
    pub fn clear(&self) {
        let listeners: Vec<Arc<dyn Fn() + Send + Sync>> = {
            let mut state = self.inner.state.lock();
            state.entries.clear();
            state.total_bytes = 0;
            state
                .clear_listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };

        // Listeners run outside the critical section; they may re-enter the cache.
        for listener in listeners {
            listener();
        }
    }

    /// Registers a clear subscriber.
    ///
    /// The listener fires after every [`AssemblyCache::clear`], including those
    /// triggered by solution-level workspace events. The returned handle
    /// deregisters on drop.
    #[must_use]
    pub fn on_cleared(&self, listener: impl Fn() + Send + Sync + 'static) -> ClearSubscription {
        let mut state = self.inner.state.lock();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        state.clear_listeners.push((id, Arc::new(listener)));

        ClearSubscription {
            cache: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Disposes the cache, dropping all entries and subscribers.
    ///
    /// Safe to call from any thread and idempotent; subsequent reads fail with
    /// [`Error::Disposed`].
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        let mut state = self.inner.state.lock();
        state.entries.clear();
        state.total_bytes = 0;
        state.clear_listeners.clear();
    }

    /// Current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let state = self.inner.state.lock();
        CacheStats {
            entries: state.entries.len(),
            total_bytes: state.total_bytes,
            hits: state.hits,
            misses: state.misses,
            evictions: state.evictions,
            oversize_rejections: state.oversize_rejections,
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.inner.disposed.load(Ordering::Acquire) {
            return Err(Error::Disposed);
        }
        Ok(())
    }
}

/// Scoped handle for a clear subscription; deregisters the listener on drop.
///
/// Ownership of deregistration is explicit rather than left to collection order:
/// whoever holds the handle owns the subscription lifetime.
pub struct ClearSubscription {
    cache: Weak<CacheInner>,
    id: u64,
}

impl Drop for ClearSubscription {
    fn drop(&mut self) {
        if let Some(inner) = self.cache.upgrade() {
            let mut state = inner.state.lock();
            state.clear_listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::host::Diagnostic;

    fn filled(cache: &AssemblyCache, key: &str, size: usize) -> Vec<u8> {
        cache
            .get_or_compile(key, || EmitOutput::success(vec![0xAB; size]))
            .unwrap()
    }

    #[test]
    fn test_hit_after_miss() {
        let cache = AssemblyCache::default();
        filled(&cache, "p1", 8);
        let bytes = cache
            .get_or_compile("p1", || panic!("must not recompile on hit"))
            .unwrap();
        assert_eq!(bytes.len(), 8);
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }

    #[test]
    fn test_entry_count_bound_holds() {
        let cache = AssemblyCache::default();
        for key in ["p1", "p2", "p3", "p4", "p5"] {
            filled(&cache, key, 16);
        }
        assert_eq!(cache.stats().entries, 3);
    }

    #[test]
    fn test_oldest_entry_evicted_first() {
        let cache = AssemblyCache::default();
        filled(&cache, "oldest", 16);
        filled(&cache, "middle", 16);
        filled(&cache, "newest", 16);
        filled(&cache, "extra", 16);

        // "oldest" is gone; the others still hit.
        let recompiled = AtomicUsize::new(0);
        let _ = cache.get_or_compile("middle", || {
            recompiled.fetch_add(1, Ordering::SeqCst);
            EmitOutput::success(vec![0; 1])
        });
        let _ = cache.get_or_compile("oldest", || {
            recompiled.fetch_add(1, Ordering::SeqCst);
            EmitOutput::success(vec![0; 1])
        });
        assert_eq!(recompiled.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_total_byte_bound_evicts() {
        let cache = AssemblyCache::new(CacheConfig {
            max_entries: 3,
            max_total_bytes: 100,
            max_entry_bytes: 90,
        });
        filled(&cache, "a", 40);
        filled(&cache, "b", 40);
        // 40 + 40 + 40 > 100, so "a" must go.
        filled(&cache, "c", 40);

        let stats = cache.stats();
        assert_eq!(stats.entries, 2);
        assert!(stats.total_bytes <= 100);
        assert_eq!(stats.evictions, 1);
    }

    #[test]
    fn test_oversized_entry_returned_but_never_stored() {
        let cache = AssemblyCache::new(CacheConfig {
            max_entries: 3,
            max_total_bytes: 1000,
            max_entry_bytes: 50,
        });
        let bytes = filled(&cache, "big", 51);
        assert_eq!(bytes.len(), 51);
        let stats = cache.stats();
        assert_eq!(stats.entries, 0);
        assert_eq!(stats.oversize_rejections, 1);

        // Recompiled on every request.
        let bytes = filled(&cache, "big", 51);
        assert_eq!(bytes.len(), 51);
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_copy_isolation() {
        let cache = AssemblyCache::default();
        let mut first = filled(&cache, "p", 4);
        first[0] = 0xFF;
        let second = cache
            .get_or_compile("p", || panic!("must hit"))
            .unwrap();
        assert_eq!(second[0], 0xAB);
    }

    #[test]
    fn test_compile_failure_excerpt_is_bounded() {
        let cache = AssemblyCache::default();
        let diagnostics: Vec<Diagnostic> =
            (1..=7).map(|i| Diagnostic::error(format!("CS{i:04}"))).collect();
        let err = cache
            .get_or_compile("p", || EmitOutput::failure(diagnostics))
            .unwrap_err();

        match err {
            Error::CompilationFailed { excerpt, total } => {
                assert_eq!(excerpt.len(), 5);
                assert_eq!(total, 7);
                assert_eq!(excerpt[0], "CS0001");
            }
            other => panic!("unexpected error: {other}"),
        }
        // Failures are never cached.
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_duplicate_compile_discards_its_own_result() {
        let cache = AssemblyCache::default();
        let racing = cache.clone();

        let bytes = cache
            .get_or_compile("p", || {
                // A concurrent caller wins the race while we are compiling.
                racing
                    .get_or_compile("p", || EmitOutput::success(vec![1, 1, 1]))
                    .unwrap();
                EmitOutput::success(vec![2, 2, 2])
            })
            .unwrap();

        // The loser's result is discarded in favor of the cached one.
        assert_eq!(bytes, vec![1, 1, 1]);
        assert_eq!(cache.stats().entries, 1);
    }

    #[test]
    fn test_document_change_invalidates_one_project() {
        let cache = AssemblyCache::default();
        filled(&cache, "p1", 8);
        filled(&cache, "p2", 8);

        cache.handle_event(&WorkspaceEvent::DocumentChanged { project: "p1".into() });
        assert_eq!(cache.stats().entries, 1);

        let recompiled = AtomicUsize::new(0);
        let _ = cache.get_or_compile("p2", || {
            recompiled.fetch_add(1, Ordering::SeqCst);
            EmitOutput::success(vec![0])
        });
        assert_eq!(recompiled.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_solution_event_clears_and_notifies() {
        let cache = AssemblyCache::default();
        filled(&cache, "p1", 8);

        let notified = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&notified);
        let _subscription = cache.on_cleared(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        cache.handle_event(&WorkspaceEvent::SolutionChanged);
        assert_eq!(cache.stats().entries, 0);
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_subscription_stops_firing() {
        let cache = AssemblyCache::default();
        let notified = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&notified);
        let subscription = cache.on_cleared(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        cache.clear();
        drop(subscription);
        cache.clear();
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispose_is_idempotent_and_blocks_reads() {
        let cache = AssemblyCache::default();
        filled(&cache, "p", 8);
        cache.dispose();
        cache.dispose();
        assert!(matches!(
            cache.get_or_compile("p", || EmitOutput::success(vec![0])),
            Err(Error::Disposed)
        ));
    }
}
