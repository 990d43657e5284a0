//! The path registry: logical-path keys mapped to page loaders.
//!
//! Keys are file-like strings carrying the page suffix, e.g.
//! `/features/billing/pages/PlanListPage.page`. The registry is immutable
//! once built; resolution only reads it. Production wiring goes through
//! the process-wide declaration table fed by [`declare_page!`], tests
//! inject a fresh registry through [`LoaderRegistryBuilder`].
//!
//! [`declare_page!`]: crate::declare_page

pub mod macros;
pub mod register;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::errors::{PageloaderError, Result};
use crate::loader::LoadError;
use crate::page::PageModule;

pub use register::{debug_loader_registry, declared_loaders, register_page_loader};

/// A deferred factory for a page module.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self) -> std::result::Result<PageModule, LoadError>;
}

/// Adapts an async closure into a [`ModuleLoader`].
pub struct FnLoader<F> {
    load: F,
}

impl<F> FnLoader<F> {
    pub fn new(load: F) -> Self {
        Self { load }
    }
}

#[async_trait]
impl<F, Fut> ModuleLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<PageModule, LoadError>> + Send + 'static,
{
    async fn load(&self) -> std::result::Result<PageModule, LoadError> {
        (self.load)().await
    }
}

/// Immutable mapping from registration key to loader.
pub struct LoaderRegistry {
    entries: HashMap<String, Arc<dyn ModuleLoader>>,
}

impl LoaderRegistry {
    pub fn builder() -> LoaderRegistryBuilder {
        LoaderRegistryBuilder {
            entries: HashMap::new(),
        }
    }

    /// Snapshot of every loader declared through [`declare_page!`] so far.
    ///
    /// Declarations run before `main`, so calling this during startup sees
    /// the full set.
    ///
    /// [`declare_page!`]: crate::declare_page
    pub fn from_declarations() -> Self {
        Self {
            entries: register::declared_loaders(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn ModuleLoader>> {
        self.entries.get(key).cloned()
    }

    /// Like [`get`](Self::get) but an absent key is an error. Used by
    /// eager paths (preloading) where a miss means misconfiguration.
    pub fn get_required(&self, key: &str) -> Result<Arc<dyn ModuleLoader>> {
        self.get(key).ok_or_else(|| {
            PageloaderError::loader_not_found(format!("no page loader registered for {key}"))
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Developer aid: log every registered key. Informational only.
    pub fn log_known_paths(&self) {
        if self.entries.is_empty() {
            debug!("No page loaders registered.");
            return;
        }
        debug!("Registered page loaders:");
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        for key in keys {
            debug!(" - {}", key);
        }
    }
}

pub struct LoaderRegistryBuilder {
    entries: HashMap<String, Arc<dyn ModuleLoader>>,
}

impl LoaderRegistryBuilder {
    /// Register a loader under a key. Re-registering a key replaces the
    /// previous loader with a warning.
    pub fn register<K: Into<String>>(mut self, key: K, loader: Arc<dyn ModuleLoader>) -> Self {
        let key = key.into();
        if self.entries.insert(key.clone(), loader).is_some() {
            warn!(key = %key, "page loader re-registered, previous loader replaced");
        }
        self
    }

    /// Strict variant: a duplicate key is a build error.
    pub fn try_register<K: Into<String>>(
        mut self,
        key: K,
        loader: Arc<dyn ModuleLoader>,
    ) -> Result<Self> {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return Err(PageloaderError::registry_build(format!(
                "duplicate page loader key: {key}"
            )));
        }
        self.entries.insert(key, loader);
        Ok(self)
    }

    /// Register an async closure as a loader.
    pub fn register_fn<K, F, Fut>(self, key: K, load: F) -> Self
    where
        K: Into<String>,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<PageModule, LoadError>> + Send + 'static,
    {
        self.register(key, Arc::new(FnLoader::new(load)))
    }

    pub fn build(self) -> LoaderRegistry {
        LoaderRegistry {
            entries: self.entries,
        }
    }
}
