use std::collections::BTreeSet;

use serde::Deserialize;

use crate::error::StyleError;

/// The bundled style manifest. Generated together with the per-style data
/// files and shipped inside the binary.
pub const STYLES_MANIFEST: &str = include_str!("../assets/styles.json");

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleInfo {
    pub name: String,
    pub display_name: String,
    pub authors: Vec<String>,
    pub categories: Vec<String>,
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub wip: bool,
}

/// Static list of known styles plus the universe of top-level category names.
///
/// Built once at boot and passed around by reference; the selection codec and
/// the aggregator both validate against it.
#[derive(Clone, Debug)]
pub struct Catalog {
    styles: Vec<StyleInfo>,
    category_names: BTreeSet<String>,
}

impl Catalog {
    pub fn bundled() -> Result<Self, StyleError> {
        Self::from_manifest(STYLES_MANIFEST)
    }

    pub fn from_manifest(raw: &str) -> Result<Self, StyleError> {
        let styles: Vec<StyleInfo> =
            serde_json::from_str(raw).map_err(|err| StyleError::Parse(err.to_string()))?;
        let category_names = styles
            .iter()
            .flat_map(|style| style.categories.iter().cloned())
            .collect();
        Ok(Self {
            styles,
            category_names,
        })
    }

    /// Styles in manifest order.
    pub fn styles(&self) -> &[StyleInfo] {
        &self.styles
    }

    pub fn style(&self, name: &str) -> Option<&StyleInfo> {
        self.styles.iter().find(|style| style.name == name)
    }

    pub fn contains_style(&self, name: &str) -> bool {
        self.style(name).is_some()
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn style_ids(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(|style| style.name.as_str())
    }

    /// Every distinct top-level category name across the manifest. Names are
    /// guaranteed distinct in their first four characters; the URL codec
    /// relies on that.
    pub fn category_names(&self) -> &BTreeSet<String> {
        &self.category_names
    }

    pub fn has_every_style(&self, selected: &BTreeSet<String>) -> bool {
        selected.len() == self.styles.len()
    }

    pub fn has_every_category(&self, selected: &BTreeSet<String>) -> bool {
        selected.len() == self.category_names.len()
    }
}
