//! One handle per logical path.
//!
//! The handle cache grows monotonically as paths are visited and is never
//! evicted by policy; entries leave only through the retry actions'
//! cache busting or [`clear`](HandleCache::clear). Lookup-then-insert is
//! a single atomic step per key, which is what keeps the "one handle per
//! path" invariant under concurrent resolution.

pub mod handle;

use dashmap::DashMap;

pub use handle::{HandleState, PageHandle};
pub(crate) use handle::ModuleFuture;

#[derive(Default)]
pub struct HandleCache {
    entries: DashMap<String, PageHandle>,
}

impl HandleCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn get(&self, path: &str) -> Option<PageHandle> {
        self.entries.get(path).map(|entry| entry.clone())
    }

    /// Return the cached handle for `path`, creating it with `make` if
    /// absent. The entry lock spans lookup and insert, so concurrent
    /// callers for one path all receive the same handle.
    pub fn get_or_insert_with<F>(&self, path: &str, make: F) -> PageHandle
    where
        F: FnOnce() -> PageHandle,
    {
        self.entries
            .entry(path.to_string())
            .or_insert_with(make)
            .clone()
    }

    /// Cache busting for a single path. Returns the evicted handle.
    pub fn remove(&self, path: &str) -> Option<PageHandle> {
        self.entries.remove(path).map(|(_, handle)| handle)
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
