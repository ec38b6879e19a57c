//! Bounded in-memory cache of compiled assembly bytes.
//!
//! Compile-emit is by far the most expensive step of the pipeline, so the most recent
//! emitted binary is kept per project, bounded by an entry count and a total byte
//! budget. The cache is the one genuinely multi-writer resource in the crate; all
//! mutation (insert, evict, remove, clear) happens under a single critical section.
//!
//! # Discipline
//!
//! Population is *relaxed single-flight*: two callers racing on the same uncompiled
//! key may both compile, but the second to finish discovers the existing entry under
//! the critical section and discards its own result. Compile is idempotent and the
//! race window is narrow, so this costs less than stricter synchronization would.
//!
//! Every read hands out an independent copy of the cached buffer, never the shared
//! buffer itself, so consumers can seek or mutate without coordinating with other
//! readers or with eviction.
//!
//! # Bounds
//!
//! At most [`CacheConfig::max_entries`] entries and [`CacheConfig::max_total_bytes`]
//! total bytes hold at any time; insertion evicts oldest-first until both constraints
//! are satisfied. A single result larger than [`CacheConfig::max_entry_bytes`] is
//! handed back to the caller but never stored.
//!
//! # Invalidation
//!
//! [`crate::host::WorkspaceEvent`] values drive invalidation: a document or project
//! change removes exactly that project's entry; a solution-level event clears the
//! whole cache and notifies clear subscribers so in-flight UI state can reset.

mod assembly;

pub use assembly::{
    AssemblyCache, CacheConfig, CacheStats, ClearSubscription, MAX_DIAGNOSTIC_EXCERPT,
};
