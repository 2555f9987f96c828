use std::rc::Rc;

use futures::future::join_all;

use crate::loader::{StyleLoader, StyleSource};
use crate::theme::BuildingData;

/// Separator inside a persisted favorite reference:
/// `style>category>...>building`.
pub const FAVORITE_PATH_SEPARATOR: char = '>';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FavoritePath {
    pub style_id: String,
    pub categories: Vec<String>,
    pub building: String,
}

pub fn format_favorite_path(building: &BuildingData) -> String {
    let mut parts: Vec<&str> = building.path.iter().map(String::as_str).collect();
    parts.push(&building.name);
    let mut joined = String::new();
    for part in parts {
        if !joined.is_empty() {
            joined.push(FAVORITE_PATH_SEPARATOR);
        }
        joined.push_str(part);
    }
    joined
}

pub fn parse_favorite_path(path: &str) -> Option<FavoritePath> {
    let mut parts: Vec<&str> = path.split(FAVORITE_PATH_SEPARATOR).collect();
    if parts.len() < 2 {
        return None;
    }
    let building = parts.pop()?.to_string();
    let style_id = parts.remove(0).to_string();
    if style_id.is_empty() || building.is_empty() {
        return None;
    }
    Some(FavoritePath {
        style_id,
        categories: parts.into_iter().map(str::to_string).collect(),
        building,
    })
}

/// Map stored favorite paths back to building records, preserving order.
///
/// A path that no longer resolves (style gone, category renamed, building
/// removed) contributes nothing; one broken favorite never hides the rest.
pub async fn resolve_favorites<S: StyleSource>(
    loader: &StyleLoader<S>,
    paths: &[String],
) -> Vec<Rc<BuildingData>> {
    let resolved = join_all(paths.iter().map(|path| resolve_one(loader, path))).await;
    resolved.into_iter().flatten().collect()
}

async fn resolve_one<S: StyleSource>(
    loader: &StyleLoader<S>,
    path: &str,
) -> Option<Rc<BuildingData>> {
    let parsed = parse_favorite_path(path)?;
    let theme = loader.get_style(&parsed.style_id).await.ok()?;
    let mut blueprints = &theme.blueprints;
    let mut categories = &theme.categories;
    for name in &parsed.categories {
        let category = categories.get(name)?;
        blueprints = &category.blueprints;
        categories = &category.categories;
    }
    blueprints.get(&parsed.building).cloned()
}
