mod app_router;
mod content_runtime;
mod favorites_store;
#[cfg(target_arch = "wasm32")]
mod loader_source;
mod persisted_store;
#[cfg(target_arch = "wasm32")]
mod yew_app;

#[cfg(target_arch = "wasm32")]
fn main() {
    use std::rc::Rc;
    use style_explorer_core::{Catalog, StyleLoader};

    match Catalog::bundled() {
        Ok(catalog) => {
            let catalog = Rc::new(catalog);
            let loader = Rc::new(StyleLoader::new(loader_source::HttpStyleSource::new()));
            yew_app::run_app(catalog, loader);
        }
        Err(err) => {
            gloo::console::error!("bundled style manifest unreadable:", err.to_string());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {}
