use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Deserializer};

use crate::hut_blocks;

/// How many category levels below a style's root are materialized. Source
/// trees deeper than this are truncated.
pub const DEFAULT_CATEGORY_DEPTH: usize = 5;

/// Raw building record as found in a style.json file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingJson {
    /// Building level count, or `None` for unleveled builds (`false` in the
    /// source data). Feeds into the image file name.
    #[serde(default, deserialize_with = "levels_or_false")]
    pub levels: Option<u32>,
    /// Hut blocks placed in the building, used to infer a display name.
    #[serde(default)]
    pub hut_blocks: Option<Vec<String>>,
    /// Present when a back-view image exists.
    #[serde(default)]
    pub back: Option<bool>,
    /// Blur placeholder hashes for the front and (optionally) back images.
    #[serde(default)]
    pub blur: Vec<String>,
    /// Hand-written display name; overrides the hut-block derived one.
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub size: Option<BuildingSize>,
}

/// Footprint, either `[w, h, d]` or an object with named fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum BuildingSize {
    Tuple([u32; 3]),
    Object { width: u32, height: u32, depth: u32 },
}

fn levels_or_false<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Count(u32),
        Flag(bool),
    }
    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Count(levels)) => Some(levels),
        Some(Raw::Flag(_)) | None => None,
    })
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CategoryJson {
    #[serde(default)]
    pub blueprints: BTreeMap<String, BuildingJson>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryJson>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeJson {
    pub display_name: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub blueprints: BTreeMap<String, BuildingJson>,
    #[serde(default)]
    pub categories: BTreeMap<String, CategoryJson>,
}

/// A single placeable building, immutable once constructed.
///
/// `path` holds the ancestor names from the style root down to the building's
/// direct parent; `path[0]` is always the owning theme's identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingData {
    pub name: String,
    pub path: Vec<String>,
    pub display_name: Option<String>,
    pub style_display_name: String,
    pub json: BuildingJson,
    /// Lowercase concatenation of name, display names, hut blocks and path
    /// segments; the search matcher runs against this.
    pub search_string: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageView {
    Front,
    Back,
}

impl ImageView {
    pub fn suffix(self) -> &'static str {
        match self {
            ImageView::Front => "front",
            ImageView::Back => "back",
        }
    }
}

impl BuildingData {
    fn new(name: String, json: BuildingJson, path: Vec<String>, style_display_name: &str) -> Self {
        let derived = json.hut_blocks.as_deref().and_then(hut_blocks::display_name_for);
        let display_name = json
            .display_name
            .clone()
            .or_else(|| derived.map(str::to_string));
        // Both names are searchable even though only one is displayed.
        let mut parts: Vec<&str> = vec![&name];
        if let Some(derived) = derived {
            parts.push(derived);
        }
        if let Some(override_name) = &json.display_name {
            parts.push(override_name);
        }
        if let Some(blocks) = &json.hut_blocks {
            parts.extend(blocks.iter().map(String::as_str));
        }
        parts.extend(path.iter().skip(2).map(String::as_str));
        let search_string = parts.join(" ").to_lowercase();
        Self {
            name,
            path,
            display_name,
            style_display_name: style_display_name.to_string(),
            json,
            search_string,
        }
    }

    /// Name shown on cards and used for in-section ordering.
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn has_back_view(&self) -> bool {
        self.json.back.unwrap_or(false)
    }

    pub fn blur_hash(&self, view: ImageView) -> Option<&str> {
        let index = match view {
            ImageView::Front => 0,
            ImageView::Back => 1,
        };
        self.json.blur.get(index).map(String::as_str)
    }

    /// Deterministic asset path for a building image. The rendering layer
    /// fetches it; nothing here does.
    pub fn image_path(&self, view: ImageView) -> String {
        let level = self
            .json
            .levels
            .map(|levels| levels.to_string())
            .unwrap_or_default();
        format!(
            "minecolonies/{}/{}/{}{}.jpg",
            self.path.join("/"),
            self.name,
            level,
            view.suffix()
        )
    }
}

/// A named grouping node in a style's building tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Category {
    pub name: String,
    pub blueprints: BTreeMap<String, Rc<BuildingData>>,
    pub categories: BTreeMap<String, Category>,
}

/// A fully loaded style: root buildings plus the category tree. Owned by the
/// loader's cache; consumers share it through `Rc`.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    pub display_name: String,
    pub authors: Vec<String>,
    pub blueprints: BTreeMap<String, Rc<BuildingData>>,
    pub categories: BTreeMap<String, Category>,
}

impl Theme {
    /// Build the typed tree from raw JSON. `max_depth` bounds category
    /// recursion below the root; deeper levels are dropped.
    pub fn from_json(style_id: &str, json: ThemeJson, max_depth: usize) -> Self {
        let root_path = vec![style_id.to_string()];
        let blueprints = build_blueprints(json.blueprints, &root_path, &json.display_name);
        let mut categories = BTreeMap::new();
        build_categories(
            &root_path,
            json.categories,
            &mut categories,
            max_depth,
            &json.display_name,
        );
        Self {
            name: style_id.to_string(),
            display_name: json.display_name,
            authors: json.authors,
            blueprints,
            categories,
        }
    }
}

fn build_blueprints(
    raw: BTreeMap<String, BuildingJson>,
    path: &[String],
    style_display_name: &str,
) -> BTreeMap<String, Rc<BuildingData>> {
    raw.into_iter()
        .map(|(name, data)| {
            let building = BuildingData::new(name.clone(), data, path.to_vec(), style_display_name);
            (name, Rc::new(building))
        })
        .collect()
}

fn build_categories(
    path: &[String],
    raw: BTreeMap<String, CategoryJson>,
    parent: &mut BTreeMap<String, Category>,
    remaining_depth: usize,
    style_display_name: &str,
) {
    for (name, category_json) in raw {
        let mut category_path = path.to_vec();
        category_path.push(name.clone());
        let mut category = Category {
            name: name.clone(),
            blueprints: build_blueprints(
                category_json.blueprints,
                &category_path,
                style_display_name,
            ),
            categories: BTreeMap::new(),
        };
        if remaining_depth > 0 {
            build_categories(
                &category_path,
                category_json.categories,
                &mut category.categories,
                remaining_depth - 1,
                style_display_name,
            );
        }
        parent.insert(name, category);
    }
}
