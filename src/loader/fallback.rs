//! Substitute pages served in place of a missing or failed load.

use std::sync::{Arc, Weak};

use crate::cache::HandleCache;
use crate::loader::{LoadError, RetryActions};
use crate::page::{ModuleKind, PageComponent, PageModule};
use crate::props::PropMap;

/// Rendered when no loader matches a logical path.
pub struct NotFoundPage;

impl PageComponent for NotFoundPage {
    fn name(&self) -> &str {
        "NotFoundPage"
    }

    fn render(&self, _props: &PropMap) -> String {
        concat!(
            "<section class=\"page-fallback page-not-found\">",
            "<h1>Page not found</h1>",
            "<p>The requested page is not part of this build.</p>",
            "</section>"
        )
        .to_string()
    }
}

/// Rendered after a transient load failure; offers the two cache-busting
/// retry actions.
pub struct RetryPage {
    path: String,
    detail: String,
}

impl PageComponent for RetryPage {
    fn name(&self) -> &str {
        "RetryPage"
    }

    fn render(&self, _props: &PropMap) -> String {
        format!(
            concat!(
                "<section class=\"page-fallback page-retry\">",
                "<h1>Page failed to load</h1>",
                "<p>{}</p>",
                "<button data-action=\"retry-page\" data-path=\"{}\">Retry</button>",
                "<button data-action=\"retry-all\">Clear caches and retry</button>",
                "</section>"
            ),
            self.detail, self.path
        )
    }
}

/// Rendered after a non-transient load failure; a plain reload is the
/// only action offered.
pub struct FailedPage {
    detail: String,
}

impl PageComponent for FailedPage {
    fn name(&self) -> &str {
        "FailedPage"
    }

    fn render(&self, _props: &PropMap) -> String {
        format!(
            concat!(
                "<section class=\"page-fallback page-error\">",
                "<h1>Something went wrong</h1>",
                "<p>{}</p>",
                "<button data-action=\"reload\">Reload</button>",
                "</section>"
            ),
            self.detail
        )
    }
}

pub fn not_found_module() -> PageModule {
    PageModule::with_kind(Arc::new(NotFoundPage), ModuleKind::NotFound)
}

pub(crate) fn retry_module(path: &str, err: &LoadError, cache: Weak<HandleCache>) -> PageModule {
    PageModule::with_kind(
        Arc::new(RetryPage {
            path: path.to_string(),
            detail: err.to_string(),
        }),
        ModuleKind::LoadRetry(RetryActions::new(path.to_string(), cache)),
    )
}

pub(crate) fn failure_module(err: &LoadError) -> PageModule {
    PageModule::with_kind(
        Arc::new(FailedPage {
            detail: err.to_string(),
        }),
        ModuleKind::LoadFailed,
    )
}
