use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::error::StyleError;
use crate::theme::{Theme, ThemeJson, DEFAULT_CATEGORY_DEPTH};

/// Transport seam for per-style data. Returns the raw style.json body; the
/// loader owns parsing and tree construction.
pub trait StyleSource {
    fn fetch(&self, style_id: &str) -> LocalBoxFuture<'_, Result<String, StyleError>>;
}

enum Slot {
    Ready(Rc<Theme>),
    Pending(Vec<oneshot::Sender<Result<Rc<Theme>, StyleError>>>),
}

/// Removes the in-flight slot if the owning fetch is dropped before it
/// finishes. Dropping the slot drops its waiters' senders, so waiters fail
/// fast and the next request starts a fresh fetch instead of stranding on an
/// orphaned entry.
struct PendingGuard<'a> {
    cache: &'a RefCell<HashMap<String, Slot>>,
    style_id: &'a str,
    armed: bool,
}

impl<'a> PendingGuard<'a> {
    fn new(cache: &'a RefCell<HashMap<String, Slot>>, style_id: &'a str) -> Self {
        Self {
            cache,
            style_id,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.cache.borrow_mut().remove(self.style_id);
        }
    }
}

/// Session-scoped style cache. Themes are fetched on first reference, kept
/// forever and never refreshed. Concurrent requests for the same id are
/// coalesced onto one in-flight fetch; failures are broadcast to all waiters
/// but not cached, so a later request retries.
pub struct StyleLoader<S> {
    source: S,
    max_depth: usize,
    cache: RefCell<HashMap<String, Slot>>,
}

impl<S: StyleSource> StyleLoader<S> {
    pub fn new(source: S) -> Self {
        Self::with_depth(source, DEFAULT_CATEGORY_DEPTH)
    }

    pub fn with_depth(source: S, max_depth: usize) -> Self {
        Self {
            source,
            max_depth,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub async fn get_style(&self, style_id: &str) -> Result<Rc<Theme>, StyleError> {
        let waiter = {
            let mut cache = self.cache.borrow_mut();
            match cache.get_mut(style_id) {
                Some(Slot::Ready(theme)) => return Ok(theme.clone()),
                Some(Slot::Pending(waiters)) => {
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    Some(receiver)
                }
                None => {
                    cache.insert(style_id.to_string(), Slot::Pending(Vec::new()));
                    None
                }
            }
        };

        if let Some(receiver) = waiter {
            return match receiver.await {
                Ok(result) => result,
                // The owning fetch was dropped mid-flight.
                Err(_) => Err(StyleError::Network(format!(
                    "fetch of style {style_id} was abandoned"
                ))),
            };
        }

        let guard = PendingGuard::new(&self.cache, style_id);
        let result = self.download(style_id).await;
        guard.disarm();
        let waiters = {
            let mut cache = self.cache.borrow_mut();
            let previous = match &result {
                Ok(theme) => cache.insert(style_id.to_string(), Slot::Ready(theme.clone())),
                Err(_) => cache.remove(style_id),
            };
            match previous {
                Some(Slot::Pending(waiters)) => waiters,
                _ => Vec::new(),
            }
        };
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
        result
    }

    /// Cache lookup without triggering a fetch.
    pub fn cached(&self, style_id: &str) -> Option<Rc<Theme>> {
        match self.cache.borrow().get(style_id) {
            Some(Slot::Ready(theme)) => Some(theme.clone()),
            _ => None,
        }
    }

    async fn download(&self, style_id: &str) -> Result<Rc<Theme>, StyleError> {
        let raw = self.source.fetch(style_id).await?;
        let json: ThemeJson = serde_json::from_str(&raw)
            .map_err(|err| StyleError::Parse(format!("{style_id}: {err}")))?;
        Ok(Rc::new(Theme::from_json(style_id, json, self.max_depth)))
    }
}
