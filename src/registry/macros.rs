#[macro_export]
macro_rules! declare_page {
    ($key:expr, $ty:ty) => {
        #[ctor::ctor]
        fn __register_page_loader() {
            use std::sync::Arc;
            use $crate::registry::register::register_page_loader;
            register_page_loader($key, Arc::new(<$ty>::default()) as Arc<dyn $crate::registry::ModuleLoader>);
        }
    };
}
