use crate::persisted_store;

/// Ordered list of favorited building paths, persisted across sessions.
///
/// Paths are the `>`-joined references produced by
/// `style_explorer_core::format_favorite_path`; resolution back to building
/// records goes through the style loader and tolerates paths that no longer
/// exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FavoritesStore {
    paths: Vec<String>,
}

impl FavoritesStore {
    pub(crate) fn load() -> Self {
        Self {
            paths: persisted_store::load_json(persisted_store::FAVORITES_KEY).unwrap_or_default(),
        }
    }

    pub(crate) fn list(&self) -> &[String] {
        &self.paths
    }

    pub(crate) fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|stored| stored == path)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Add or remove a path; returns whether it ended up favorited.
    pub(crate) fn toggle(&mut self, path: &str) -> bool {
        let favorited = match self.paths.iter().position(|stored| stored == path) {
            Some(index) => {
                self.paths.remove(index);
                false
            }
            None => {
                self.paths.push(path.to_string());
                true
            }
        };
        self.persist();
        favorited
    }

    fn persist(&self) {
        persisted_store::store_json(persisted_store::FAVORITES_KEY, &self.paths);
    }
}
