use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;

use crate::registry::ModuleLoader;

static PAGE_LOADER_REGISTRY: Lazy<RwLock<HashMap<String, Arc<dyn ModuleLoader>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Add a loader to the process-wide declaration table. Meant to run from
/// `declare_page!` constructors before `main`; later registrations under
/// the same key win.
pub fn register_page_loader<S: Into<String>>(key: S, loader: Arc<dyn ModuleLoader>) {
    let key = key.into();
    let mut registry = PAGE_LOADER_REGISTRY
        .write()
        .expect("Page loader registry RwLock poisoned - a thread panicked while holding the lock");
    registry.insert(key, loader);
}

/// Snapshot of the declaration table.
pub fn declared_loaders() -> HashMap<String, Arc<dyn ModuleLoader>> {
    PAGE_LOADER_REGISTRY
        .read()
        .expect("Page loader registry RwLock poisoned - a thread panicked while holding the lock")
        .clone()
}

pub fn debug_loader_registry() {
    let registry = PAGE_LOADER_REGISTRY
        .read()
        .expect("Page loader registry RwLock poisoned");
    if registry.is_empty() {
        tracing::debug!("No page loaders declared.");
    } else {
        tracing::debug!("Declared page loaders:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
