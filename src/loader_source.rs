use futures::future::{FutureExt, LocalBoxFuture};
use gloo::net::http::Request;
use style_explorer_core::{StyleError, StyleSource};

/// Fetches per-style data files from the asset tree next to the page.
pub(crate) struct HttpStyleSource {
    base: String,
}

impl HttpStyleSource {
    pub(crate) fn new() -> Self {
        Self {
            base: "minecolonies".to_string(),
        }
    }
}

impl StyleSource for HttpStyleSource {
    fn fetch(&self, style_id: &str) -> LocalBoxFuture<'_, Result<String, StyleError>> {
        let url = format!("{}/{}/style.json", self.base, style_id);
        async move {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|err| StyleError::Network(format!("{url}: {err}")))?;
            if response.status() == 404 {
                return Err(StyleError::NotFound(url.clone()));
            }
            if !response.ok() {
                return Err(StyleError::Network(format!(
                    "{url}: status {}",
                    response.status()
                )));
            }
            response
                .text()
                .await
                .map_err(|err| StyleError::Network(format!("{url}: {err}")))
        }
        .boxed_local()
    }
}
