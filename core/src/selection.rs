use std::collections::BTreeSet;

use crate::catalog::Catalog;

/// Query parameter names recognized as selection state. A URL carrying any of
/// these wins over the session-restore copy in local storage.
pub const PARAM_SEARCH: &str = "search";
pub const PARAM_THEME: &str = "theme";
pub const PARAM_CATEGORY: &str = "category";

/// Joins multiple style ids or category prefixes inside one parameter value.
pub const SELECTION_SEPARATOR: char = '-';
/// Encodes "every style selected" without listing them.
pub const ALL_STYLES_TOKEN: &str = "all";
/// Category names are unique in this many leading characters.
pub const CATEGORY_PREFIX_LEN: usize = 4;

/// User selection state: which styles, which categories, and the search term.
///
/// Categories are plain names filtered within each selected style's tree, not
/// a cross-style join. The "search everywhere" flag lives outside because it
/// is a persisted preference, not part of the shareable URL.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections {
    pub styles: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub search_term: String,
}

impl Selections {
    /// Nothing selected and nothing searched: the page shows no content.
    pub fn is_trivial(&self) -> bool {
        self.styles.is_empty() && self.search_term.is_empty()
    }
}

/// Does the query string carry any of the recognized selection parameters?
pub fn has_selection_params(query: &str) -> bool {
    form_urlencoded::parse(strip_query_prefix(query).as_bytes()).any(|(key, _)| {
        matches!(key.as_ref(), PARAM_SEARCH | PARAM_THEME | PARAM_CATEGORY)
    })
}

/// Decode selections from a URL query string.
///
/// Unknown style ids are dropped. Category values are 4-char prefixes and
/// expand to every catalog category starting with them. The `theme` parameter
/// being absent means no styles; the `category` parameter being absent means
/// all categories (encoded as the empty set, which the aggregator treats as
/// unfiltered). That asymmetry is load-bearing for old URLs.
pub fn decode_query(query: &str, catalog: &Catalog) -> Selections {
    let mut selections = Selections::default();
    for (key, value) in form_urlencoded::parse(strip_query_prefix(query).as_bytes()) {
        match key.as_ref() {
            PARAM_THEME => {
                if value == ALL_STYLES_TOKEN {
                    selections.styles = catalog.style_ids().map(str::to_string).collect();
                } else {
                    for part in value.split(SELECTION_SEPARATOR) {
                        if catalog.contains_style(part) {
                            selections.styles.insert(part.to_string());
                        }
                    }
                }
            }
            PARAM_CATEGORY => {
                for part in value.split(SELECTION_SEPARATOR) {
                    if part.is_empty() {
                        continue;
                    }
                    for name in catalog.category_names() {
                        if name.starts_with(part) {
                            selections.categories.insert(name.clone());
                        }
                    }
                }
            }
            PARAM_SEARCH => {
                selections.search_term = value.into_owned();
            }
            _ => {}
        }
    }
    selections
}

/// Encode selections into a URL query string (no leading `?`).
///
/// Styles: the full catalog encodes as the literal `all`; an empty set omits
/// the parameter (and the category parameter with it). Categories: the full
/// universe and the empty set both omit the parameter; anything else encodes
/// as 4-char prefixes.
pub fn encode_query(selections: &Selections, catalog: &Catalog) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    if !selections.search_term.is_empty() {
        serializer.append_pair(PARAM_SEARCH, &selections.search_term);
    }
    if !selections.styles.is_empty() {
        let theme_value = if catalog.has_every_style(&selections.styles) {
            ALL_STYLES_TOKEN.to_string()
        } else {
            join_separated(selections.styles.iter().map(String::as_str))
        };
        serializer.append_pair(PARAM_THEME, &theme_value);

        if !selections.categories.is_empty() && !catalog.has_every_category(&selections.categories)
        {
            let category_value = join_separated(
                selections
                    .categories
                    .iter()
                    .map(|name| name.chars().take(CATEGORY_PREFIX_LEN).collect::<String>()),
            );
            serializer.append_pair(PARAM_CATEGORY, &category_value);
        }
    }
    serializer.finish()
}

fn join_separated<S: AsRef<str>>(parts: impl Iterator<Item = S>) -> String {
    let mut joined = String::new();
    for part in parts {
        if !joined.is_empty() {
            joined.push(SELECTION_SEPARATOR);
        }
        joined.push_str(part.as_ref());
    }
    joined
}

fn strip_query_prefix(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}
