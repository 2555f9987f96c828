use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use futures::future::try_join_all;

use crate::catalog::Catalog;
use crate::error::StyleError;
use crate::loader::{StyleLoader, StyleSource};
use crate::search::SearchMatcher;
use crate::selection::Selections;
use crate::theme::{BuildingData, Category, Theme};

/// Fixed ordering of well-known top-level categories. Sections whose first
/// path segment is not listed sort after all of these.
pub const SECTION_SORT_ORDER: &[&str] = &[
    "fundamentals",
    "education",
    "mystic",
    "craftsmanship",
    "agriculture",
    "military",
    "decoration",
];

pub const SECTION_PATH_SEPARATOR: &str = " > ";

/// One rendering-time group of matched buildings. The title is the category
/// path below the style root; root-level buildings share the empty title.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    pub title: String,
    pub buildings: Vec<Rc<BuildingData>>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageContent {
    pub total: usize,
    pub sections: Vec<Section>,
}

/// The styles a derivation needs loaded: every selected style, plus the whole
/// catalog when a search term is present and not restricted to the selection.
pub fn required_styles(
    catalog: &Catalog,
    selections: &Selections,
    search_selected_only: bool,
) -> BTreeSet<String> {
    let mut wanted = selections.styles.clone();
    if !selections.search_term.is_empty() && !search_selected_only {
        wanted.extend(catalog.style_ids().map(str::to_string));
    }
    wanted
}

/// Derive the page content for the current selections.
///
/// Fetches the working set concurrently; one failed style fails the whole
/// derivation (no partial results). Once the themes are cached the rest is
/// pure; this never writes selection state anywhere.
pub async fn aggregate<S: StyleSource>(
    loader: &StyleLoader<S>,
    catalog: &Catalog,
    selections: &Selections,
    search_selected_only: bool,
) -> Result<PageContent, StyleError> {
    if selections.is_trivial() {
        return Ok(PageContent::default());
    }
    let wanted = required_styles(catalog, selections, search_selected_only);
    let themes = try_join_all(wanted.iter().map(|style_id| loader.get_style(style_id))).await?;
    Ok(collect_content(&themes, selections, search_selected_only))
}

/// Pure core of the aggregator: filter, group and sort loaded themes.
pub fn collect_content(
    themes: &[Rc<Theme>],
    selections: &Selections,
    search_selected_only: bool,
) -> PageContent {
    if selections.is_trivial() {
        return PageContent::default();
    }
    let matcher = SearchMatcher::new(&selections.search_term);
    let searching = !selections.search_term.is_empty();

    let mut groups: BTreeMap<String, Vec<Rc<BuildingData>>> = BTreeMap::new();
    let mut total = 0usize;

    for theme in themes {
        if searching {
            if search_selected_only && !selections.styles.contains(&theme.name) {
                continue;
            }
        } else if !selections.styles.contains(&theme.name) {
            continue;
        }
        collect_blueprints(theme.blueprints.values(), &matcher, &mut groups, &mut total);
        for category in theme.categories.values() {
            // Category selection only narrows browsing; searches cut across
            // it, and an empty selection means unfiltered.
            if !searching
                && !selections.categories.is_empty()
                && !selections.categories.contains(&category.name)
            {
                continue;
            }
            collect_category(category, &matcher, &mut groups, &mut total);
        }
    }

    let mut sections: Vec<Section> = groups
        .into_iter()
        .map(|(title, mut buildings)| {
            buildings.sort_by(|a, b| compare_buildings(a, b));
            Section { title, buildings }
        })
        .collect();
    sections.sort_by(|a, b| compare_sections(&a.title, &b.title));

    PageContent { total, sections }
}

fn collect_blueprints<'a>(
    blueprints: impl Iterator<Item = &'a Rc<BuildingData>>,
    matcher: &SearchMatcher,
    groups: &mut BTreeMap<String, Vec<Rc<BuildingData>>>,
    total: &mut usize,
) {
    for building in blueprints {
        if !matcher.matches(building) {
            continue;
        }
        let title = building.path[1..].join(SECTION_PATH_SEPARATOR);
        groups.entry(title).or_default().push(building.clone());
        *total += 1;
    }
}

fn collect_category(
    category: &Category,
    matcher: &SearchMatcher,
    groups: &mut BTreeMap<String, Vec<Rc<BuildingData>>>,
    total: &mut usize,
) {
    collect_blueprints(category.blueprints.values(), matcher, groups, total);
    for child in category.categories.values() {
        collect_category(child, matcher, groups, total);
    }
}

fn section_rank(title: &str) -> usize {
    let head = title
        .split(SECTION_PATH_SEPARATOR)
        .next()
        .unwrap_or("")
        .to_lowercase();
    SECTION_SORT_ORDER
        .iter()
        .position(|known| *known == head)
        .unwrap_or(SECTION_SORT_ORDER.len())
}

fn compare_sections(a: &str, b: &str) -> Ordering {
    section_rank(a)
        .cmp(&section_rank(b))
        .then_with(|| a.cmp(b))
}

/// In-section ordering: category path segments below the style first, then
/// display name, with the `alt` marker stripped so variants sort together.
fn compare_buildings(a: &BuildingData, b: &BuildingData) -> Ordering {
    let limit = (a.path.len() - 1).min(b.path.len() - 1);
    for index in 1..limit {
        if a.path[index] != b.path[index] {
            return a.path[index].cmp(&b.path[index]);
        }
    }
    sort_title(a).cmp(&sort_title(b))
}

fn sort_title(building: &BuildingData) -> String {
    building
        .display_name
        .clone()
        .unwrap_or_else(|| building.name.replacen("alt", "", 1))
}
