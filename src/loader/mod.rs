//! The failure-recovery boundary around page loaders.
//!
//! Every loader future is wrapped here so that the handle the cache hands
//! out always settles to *some* module: the loaded page on success, a
//! retry page on transient failure, an error page otherwise. Nothing past
//! this boundary ever sees a rejected load.

pub mod fallback;

use std::fmt;
use std::sync::{Arc, Weak};

use futures_util::FutureExt;
use tracing::{error, warn};

use crate::cache::{HandleCache, ModuleFuture};
use crate::registry::ModuleLoader;

/// Error produced at the module-loading boundary.
///
/// Classification is structural: loaders report what went wrong through
/// the variant, and the recovery layer branches on [`is_transient`]
/// instead of matching message strings. [`from_message`] keeps a
/// best-effort heuristic for errors that arrive untyped.
///
/// [`is_transient`]: LoadError::is_transient
/// [`from_message`]: LoadError::from_message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A code chunk could not be fetched.
    ChunkUnavailable(String),
    Network(String),
    Timeout(String),
    /// The module was fetched but failed to evaluate.
    Evaluation(String),
    Other(String),
}

impl LoadError {
    pub fn kind_name(&self) -> &'static str {
        match self {
            LoadError::ChunkUnavailable(_) => "Chunk Unavailable",
            LoadError::Network(_) => "Network Error",
            LoadError::Timeout(_) => "Load Timeout",
            LoadError::Evaluation(_) => "Module Evaluation Error",
            LoadError::Other(_) => "Load Error",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            LoadError::ChunkUnavailable(msg) => msg,
            LoadError::Network(msg) => msg,
            LoadError::Timeout(msg) => msg,
            LoadError::Evaluation(msg) => msg,
            LoadError::Other(msg) => msg,
        }
    }

    /// Transient failures get the retry treatment; everything else is
    /// served the generic error page.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LoadError::ChunkUnavailable(_) | LoadError::Network(_) | LoadError::Timeout(_)
        )
    }

    /// Best-effort classification of an untyped error message.
    pub fn from_message<T: Into<String>>(msg: T) -> Self {
        let msg = msg.into();
        let lowered = msg.to_lowercase();
        if lowered.contains("chunk") {
            LoadError::ChunkUnavailable(msg)
        } else if lowered.contains("timed out") || lowered.contains("timeout") {
            LoadError::Timeout(msg)
        } else if lowered.contains("network")
            || lowered.contains("connection")
            || lowered.contains("failed to fetch")
            || lowered.contains("unavailable")
        {
            LoadError::Network(msg)
        } else {
            LoadError::Other(msg)
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind_name(), self.detail())
    }
}

impl std::error::Error for LoadError {}

// 便捷的构造函数
impl LoadError {
    pub fn chunk_unavailable<T: Into<String>>(msg: T) -> Self {
        LoadError::ChunkUnavailable(msg.into())
    }

    pub fn network<T: Into<String>>(msg: T) -> Self {
        LoadError::Network(msg.into())
    }

    pub fn timeout<T: Into<String>>(msg: T) -> Self {
        LoadError::Timeout(msg.into())
    }

    pub fn evaluation<T: Into<String>>(msg: T) -> Self {
        LoadError::Evaluation(msg.into())
    }

    pub fn other<T: Into<String>>(msg: T) -> Self {
        LoadError::Other(msg.into())
    }
}

/// Signal handed back to the router after a retry action: reconstruct
/// process-wide state from scratch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadRequest {
    FullReload,
}

/// Cache-busting actions carried by a retry page.
#[derive(Debug, Clone)]
pub struct RetryActions {
    path: String,
    cache: Weak<HandleCache>,
}

impl RetryActions {
    pub(crate) fn new(path: String, cache: Weak<HandleCache>) -> Self {
        Self { path, cache }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Primary retry: evict exactly this path's handle so the next
    /// resolution re-runs the loader, then ask for a full reload.
    pub fn retry_page(&self) -> ReloadRequest {
        if let Some(cache) = self.cache.upgrade() {
            cache.remove(&self.path);
        }
        ReloadRequest::FullReload
    }

    /// Broad retry: drop every cached handle before reloading.
    pub fn retry_all(&self) -> ReloadRequest {
        if let Some(cache) = self.cache.upgrade() {
            cache.clear();
        }
        ReloadRequest::FullReload
    }
}

/// Wrap a loader into the memoized module future a [`PageHandle`] holds.
///
/// The returned future is lazy (nothing runs until the handle is first
/// awaited) and infallible: both failure classes settle to a substitute
/// module instead of propagating.
///
/// [`PageHandle`]: crate::cache::PageHandle
pub(crate) fn recovering_module_future(
    path: String,
    loader: Arc<dyn ModuleLoader>,
    cache: Weak<HandleCache>,
) -> ModuleFuture {
    async move {
        match loader.load().await {
            Ok(module) => Arc::new(module),
            Err(err) if err.is_transient() => {
                warn!(path = %path, error = %err, "transient page load failure, serving retry page");
                Arc::new(fallback::retry_module(&path, &err, cache))
            }
            Err(err) => {
                error!(path = %path, error = %err, "page load failed, serving error page");
                Arc::new(fallback::failure_module(&err))
            }
        }
    }
    .boxed()
    .shared()
}
