use serde::de::DeserializeOwned;
use serde::Serialize;

/// Raw query string of the last visit, restored when a plain URL is opened.
pub(crate) const LAST_URL_PARAMS_KEY: &str = "lastUrlParams";
/// Ordered favorite building paths, JSON string array.
pub(crate) const FAVORITES_KEY: &str = "favorites";
/// Whether searches stay within the selected styles.
pub(crate) const SEARCH_SELECTED_ONLY_KEY: &str = "searchSelectionsOnly";
/// Whether the favorites section is shown above the content.
pub(crate) const SHOW_FAVORITES_KEY: &str = "showFavorites";

pub(crate) fn load_string(key: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(key).ok()?
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = key;
        None
    }
}

pub(crate) fn store_string(key: &str, value: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(storage) = web_sys::window().and_then(|window| window.local_storage().ok().flatten())
        else {
            gloo::console::warn!("persisted store: storage unavailable");
            return;
        };
        if storage.set_item(key, value).is_err() {
            gloo::console::warn!("persisted store: set failed", key);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (key, value);
    }
}

pub(crate) fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = load_string(key)?;
    serde_json::from_str(&raw).ok()
}

pub(crate) fn store_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store_string(key, &raw),
        Err(_) => {
            #[cfg(target_arch = "wasm32")]
            {
                gloo::console::warn!("persisted store: encode failed", key);
            }
        }
    }
}
