//! Turns logical paths into renderable handles.
//!
//! The resolver is the one owner of the handle cache: route matching
//! calls [`PageResolver::resolve`] synchronously and mounts whatever
//! comes back. Misses are answered with the static not-found module and
//! are never cached, so a path that gains a loader in a later build
//! resolves normally after reload.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{HandleCache, PageHandle};
use crate::config::ResolverConfig;
use crate::errors::{PageloaderError, Result};
use crate::loader::{fallback, recovering_module_future};
use crate::page::PageModule;
use crate::registry::{LoaderRegistry, ModuleLoader};

/// Outcome of resolving a logical path.
#[derive(Debug)]
pub enum Resolution {
    /// Empty input: nothing to render. Distinct from a lookup miss.
    None,
    Page(PageHandle),
    /// No loader matched either lookup convention. Carries the static
    /// not-found module; nothing is cached.
    NotFound(Arc<PageModule>),
}

/// Resolution context: registry, cache and lookup conventions.
pub struct PageResolver {
    registry: Arc<LoaderRegistry>,
    cache: Arc<HandleCache>,
    conventions: ResolverConfig,
    not_found: Arc<PageModule>,
}

impl PageResolver {
    /// Resolver over an injected registry with default conventions.
    pub fn new(registry: Arc<LoaderRegistry>) -> Self {
        Self::with_config(registry, ResolverConfig::default())
    }

    pub fn with_config(registry: Arc<LoaderRegistry>, conventions: ResolverConfig) -> Self {
        Self {
            registry,
            cache: Arc::new(HandleCache::new()),
            conventions,
            not_found: Arc::new(fallback::not_found_module()),
        }
    }

    /// Resolver over the global config. Call
    /// [`init_config`](crate::config::init_config) first.
    pub fn from_config(registry: Arc<LoaderRegistry>) -> Self {
        Self::with_config(registry, crate::config::get_config().resolver.clone())
    }

    /// Production wiring: global config plus every loader declared
    /// through [`declare_page!`](crate::declare_page).
    pub fn with_defaults() -> Self {
        crate::config::init_config();
        Self::from_config(Arc::new(LoaderRegistry::from_declarations()))
    }

    pub fn registry(&self) -> &Arc<LoaderRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<HandleCache> {
        &self.cache
    }

    /// Resolve a logical path to a renderable handle, synchronously.
    ///
    /// Lookup tries the exact key (`{path}{suffix}`) and then the
    /// directory-index convention (`{path}/{index}{suffix}`). A hit is
    /// cached under the logical path itself; repeated resolutions return
    /// the identical handle until the entry is busted.
    pub fn resolve(&self, path: &str) -> Resolution {
        if path.is_empty() {
            return Resolution::None;
        }

        let Some(loader) = self.lookup(path) else {
            warn!(path = %path, "no page registered for logical path");
            if self.conventions.list_on_miss {
                self.registry.log_known_paths();
            }
            return Resolution::NotFound(Arc::clone(&self.not_found));
        };

        let handle = self.cache.get_or_insert_with(path, || {
            debug!(path = %path, "creating lazy page handle");
            PageHandle::new(
                path.to_string(),
                recovering_module_future(path.to_string(), loader, Arc::downgrade(&self.cache)),
            )
        });
        Resolution::Page(handle)
    }

    /// Eagerly resolve a path and drive its load to completion.
    ///
    /// Meant for warm-up at startup; unlike [`resolve`](Self::resolve),
    /// an unresolvable path is an error here because preloading one is
    /// always a misconfiguration.
    pub async fn preload(&self, path: &str) -> Result<PageHandle> {
        match self.resolve(path) {
            Resolution::Page(handle) => {
                handle.module().await;
                Ok(handle)
            }
            Resolution::None => Err(PageloaderError::loader_not_found(
                "cannot preload an empty logical path",
            )),
            Resolution::NotFound(_) => Err(PageloaderError::loader_not_found(format!(
                "no page loader registered for {path}"
            ))),
        }
    }

    fn lookup(&self, path: &str) -> Option<Arc<dyn ModuleLoader>> {
        let exact = format!("{}{}", path, self.conventions.page_suffix);
        if let Some(loader) = self.registry.get(&exact) {
            return Some(loader);
        }
        let index = format!(
            "{}/{}{}",
            path, self.conventions.index_basename, self.conventions.page_suffix
        );
        self.registry.get(&index)
    }
}
