use style_explorer_core::{selection, Catalog, Selections};

use crate::persisted_store;

/// Selections for the first render. A URL carrying any recognized selection
/// parameter wins (shared links stay exact); otherwise the query string of the
/// previous session is restored from storage.
pub(crate) fn initial_selections(catalog: &Catalog) -> Selections {
    let query = current_query();
    let query = if selection::has_selection_params(&query) {
        query
    } else {
        persisted_store::load_string(persisted_store::LAST_URL_PARAMS_KEY).unwrap_or_default()
    };
    selection::decode_query(&query, catalog)
}

/// Write the current selections to the URL (replacing the history entry, so
/// back/forward navigation ignores selection changes) and mirror the encoded
/// query to storage for the next session.
///
/// This is the only place selection state leaves the process; deriving page
/// content never writes here.
pub(crate) fn sync_selections(selections: &Selections, catalog: &Catalog) {
    let query = selection::encode_query(selections, catalog);
    replace_url_query(&query);
    persisted_store::store_string(persisted_store::LAST_URL_PARAMS_KEY, &query);
}

fn current_query() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return String::new();
        };
        window
            .location()
            .search()
            .unwrap_or_default()
            .trim_start_matches('?')
            .to_string()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        String::new()
    }
}

fn replace_url_query(query: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        let new_url = if query.is_empty() {
            path
        } else {
            format!("{path}?{query}")
        };
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = query;
    }
}
