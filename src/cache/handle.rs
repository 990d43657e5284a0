use std::fmt;
use std::sync::Arc;

use futures_util::future::{BoxFuture, Shared};

use crate::page::PageModule;

/// Memoized module future shared by every clone of a handle. The
/// recovery layer guarantees it always yields a module.
pub(crate) type ModuleFuture = Shared<BoxFuture<'static, Arc<PageModule>>>;

/// Peeked handle state: the suspense point for the rendering layer.
#[derive(Debug, Clone)]
pub enum HandleState {
    /// The underlying load has not settled; show the loading placeholder.
    Pending,
    Ready(Arc<PageModule>),
}

/// A renderable handle to a lazily loaded page.
///
/// Clones share one underlying load; the cache hands out clones of a
/// single handle per logical path, so the router sees a stable component
/// identity across repeated resolutions ([`ptr_eq`](Self::ptr_eq)).
#[derive(Clone)]
pub struct PageHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    path: String,
    module: ModuleFuture,
}

impl PageHandle {
    pub(crate) fn new(path: String, module: ModuleFuture) -> Self {
        Self {
            inner: Arc::new(HandleInner { path, module }),
        }
    }

    /// The logical path this handle was resolved for.
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    /// Drive the load to completion. Never fails: failures were already
    /// absorbed into a substitute module.
    pub async fn module(&self) -> Arc<PageModule> {
        self.inner.module.clone().await
    }

    /// Non-blocking peek at the load state.
    pub fn state(&self) -> HandleState {
        match self.inner.module.peek() {
            Some(module) => HandleState::Ready(Arc::clone(module)),
            None => HandleState::Pending,
        }
    }

    /// Whether two handles are the same cached instance.
    pub fn ptr_eq(&self, other: &PageHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.inner.module.peek() {
            Some(_) => "ready",
            None => "pending",
        };
        f.debug_struct("PageHandle")
            .field("path", &self.inner.path)
            .field("state", &state)
            .finish()
    }
}
