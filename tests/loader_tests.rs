use std::sync::Arc;

use pageloader::loader::{LoadError, ReloadRequest};
use pageloader::page::{ModuleKind, PageComponent, PageModule};
use pageloader::props::PropMap;
use pageloader::registry::LoaderRegistry;
use pageloader::resolver::{PageResolver, Resolution};

struct StaticPage(&'static str);

impl PageComponent for StaticPage {
    fn name(&self) -> &str {
        self.0
    }

    fn render(&self, _props: &PropMap) -> String {
        format!("<div>{}</div>", self.0)
    }
}

fn resolver_with_failures() -> PageResolver {
    let registry = LoaderRegistry::builder()
        .register_fn("/pages/Healthy.page", || async {
            Ok(PageModule::from_component(StaticPage("Healthy")))
        })
        .register_fn("/pages/Flaky.page", || async {
            Err(LoadError::network("connection reset while fetching chunk"))
        })
        .register_fn("/pages/Broken.page", || async {
            Err(LoadError::evaluation("default export is not a component"))
        })
        .build();
    PageResolver::new(Arc::new(registry))
}

async fn resolve_module(
    resolver: &PageResolver,
    path: &str,
) -> (pageloader::cache::PageHandle, Arc<PageModule>) {
    match resolver.resolve(path) {
        Resolution::Page(handle) => {
            let module = handle.module().await;
            (handle, module)
        }
        other => panic!("expected a page handle, got {:?}", other),
    }
}

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_transient_variants() {
        assert!(LoadError::chunk_unavailable("x").is_transient());
        assert!(LoadError::network("x").is_transient());
        assert!(LoadError::timeout("x").is_transient());
        assert!(!LoadError::evaluation("x").is_transient());
        assert!(!LoadError::other("x").is_transient());
    }

    #[test]
    fn test_from_message_heuristics() {
        assert!(matches!(
            LoadError::from_message("Loading chunk 42 failed"),
            LoadError::ChunkUnavailable(_)
        ));
        assert!(matches!(
            LoadError::from_message("Failed to fetch dynamically imported module"),
            LoadError::Network(_)
        ));
        assert!(matches!(
            LoadError::from_message("NetworkError when attempting to fetch resource"),
            LoadError::Network(_)
        ));
        assert!(matches!(
            LoadError::from_message("request timed out after 30s"),
            LoadError::Timeout(_)
        ));
        assert!(matches!(
            LoadError::from_message("TypeError: undefined is not a function"),
            LoadError::Other(_)
        ));
    }

    #[test]
    fn test_display_carries_kind_and_detail() {
        let err = LoadError::network("connection reset");
        assert!(err.to_string().contains("Network Error"));
        assert!(err.to_string().contains("connection reset"));
    }
}

#[cfg(test)]
mod recovery_tests {
    use super::*;

    #[tokio::test]
    async fn test_success_passes_the_module_through() {
        let resolver = resolver_with_failures();
        let (_, module) = resolve_module(&resolver, "/pages/Healthy").await;

        assert!(matches!(module.kind(), ModuleKind::Page));
        assert_eq!(module.default_export().name(), "Healthy");
    }

    #[tokio::test]
    async fn test_transient_failure_serves_the_retry_page() {
        let resolver = resolver_with_failures();
        let (_, module) = resolve_module(&resolver, "/pages/Flaky").await;

        assert!(matches!(module.kind(), ModuleKind::LoadRetry(_)));
        let markup = module.render(&PropMap::new());
        assert!(markup.contains("retry-page"));
        assert!(markup.contains("retry-all"));
    }

    #[tokio::test]
    async fn test_generic_failure_serves_the_error_page() {
        let resolver = resolver_with_failures();
        let (_, module) = resolve_module(&resolver, "/pages/Broken").await;

        assert!(matches!(module.kind(), ModuleKind::LoadFailed));
        let markup = module.render(&PropMap::new());
        assert!(markup.contains("reload"));
        assert!(!markup.contains("retry-page"));
    }

    #[tokio::test]
    async fn test_failed_load_still_keeps_handle_identity() {
        let resolver = resolver_with_failures();
        let (first, _) = resolve_module(&resolver, "/pages/Flaky").await;
        let second = match resolver.resolve("/pages/Flaky") {
            Resolution::Page(handle) => handle,
            other => panic!("expected a page handle, got {:?}", other),
        };

        // The failed module is cached with its handle until the retry
        // action busts the entry.
        assert!(first.ptr_eq(&second));
    }
}

#[cfg(test)]
mod retry_action_tests {
    use super::*;

    #[tokio::test]
    async fn test_retry_page_evicts_only_the_failing_path() {
        let resolver = resolver_with_failures();

        resolve_module(&resolver, "/pages/Healthy").await;
        let (_, module) = resolve_module(&resolver, "/pages/Flaky").await;
        assert_eq!(resolver.cache().len(), 2);

        let ModuleKind::LoadRetry(actions) = module.kind() else {
            panic!("expected a retry module");
        };
        assert_eq!(actions.path(), "/pages/Flaky");
        assert_eq!(actions.retry_page(), ReloadRequest::FullReload);

        assert!(!resolver.cache().contains("/pages/Flaky"));
        assert!(resolver.cache().contains("/pages/Healthy"));
    }

    #[tokio::test]
    async fn test_retry_all_clears_every_entry() {
        let resolver = resolver_with_failures();

        resolve_module(&resolver, "/pages/Healthy").await;
        let (_, module) = resolve_module(&resolver, "/pages/Flaky").await;

        let ModuleKind::LoadRetry(actions) = module.kind() else {
            panic!("expected a retry module");
        };
        assert_eq!(actions.retry_all(), ReloadRequest::FullReload);

        assert!(resolver.cache().is_empty());
    }

    #[tokio::test]
    async fn test_resolution_after_retry_runs_the_loader_again() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let registry = LoaderRegistry::builder()
            .register_fn("/pages/Flaky.page", move || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(LoadError::timeout("request timed out"))
                    } else {
                        Ok(PageModule::from_component(StaticPage("Recovered")))
                    }
                }
            })
            .build();
        let resolver = PageResolver::new(Arc::new(registry));

        let (_, module) = resolve_module(&resolver, "/pages/Flaky").await;
        let ModuleKind::LoadRetry(actions) = module.kind() else {
            panic!("expected a retry module");
        };
        actions.retry_page();

        let (_, module) = resolve_module(&resolver, "/pages/Flaky").await;
        assert!(matches!(module.kind(), ModuleKind::Page));
        assert_eq!(module.default_export().name(), "Recovered");
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }
}
