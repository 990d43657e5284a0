//! Page modules and the component surface the router mounts.
//!
//! A [`PageModule`] is what a loader produces: a default export (the
//! renderable component) plus a [`ModuleKind`] tag telling the router
//! whether it is looking at a real page or one of the substitute pages
//! the recovery layer serves in place of a failed load.

use std::fmt;
use std::sync::Arc;

use crate::loader::RetryActions;
use crate::props::PropMap;

/// A renderable page component.
///
/// Rendering proper is owned by the external layer; `render` produces the
/// markup fragment the router mounts inside its loading boundary.
pub trait PageComponent: Send + Sync {
    fn name(&self) -> &str;
    fn render(&self, props: &PropMap) -> String;
}

/// Discriminates loaded pages from the substitute pages produced on
/// lookup or load failure.
#[derive(Debug, Clone)]
pub enum ModuleKind {
    /// A page component loaded normally.
    Page,
    /// Static substitute: no loader matched the logical path.
    NotFound,
    /// Substitute served after a transient load failure; carries the
    /// cache-busting retry actions.
    LoadRetry(RetryActions),
    /// Substitute served after a non-transient load failure.
    LoadFailed,
}

/// The module object a loader resolves to: a default export plus kind.
pub struct PageModule {
    default: Arc<dyn PageComponent>,
    kind: ModuleKind,
}

impl PageModule {
    pub fn new(component: Arc<dyn PageComponent>) -> Self {
        Self {
            default: component,
            kind: ModuleKind::Page,
        }
    }

    pub fn from_component<C: PageComponent + 'static>(component: C) -> Self {
        Self::new(Arc::new(component))
    }

    pub(crate) fn with_kind(component: Arc<dyn PageComponent>, kind: ModuleKind) -> Self {
        Self {
            default: component,
            kind,
        }
    }

    /// The module's default export.
    pub fn default_export(&self) -> Arc<dyn PageComponent> {
        Arc::clone(&self.default)
    }

    pub fn kind(&self) -> &ModuleKind {
        &self.kind
    }

    /// Shortcut for rendering the default export.
    pub fn render(&self, props: &PropMap) -> String {
        self.default.render(props)
    }

    /// Render the default export with caller-supplied props run through
    /// [`sanitize_props`](crate::props::sanitize_props) first.
    pub fn render_sanitized(&self, props: Option<&PropMap>) -> String {
        self.default.render(&crate::props::sanitize_props(props))
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModule")
            .field("component", &self.default.name())
            .field("kind", &self.kind)
            .finish()
    }
}
