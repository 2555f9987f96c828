use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::{FutureExt, LocalBoxFuture};
use style_explorer_core::{
    aggregate, collect_content, required_styles, Catalog, Selections, StyleError, StyleLoader,
    StyleSource, Theme, DEFAULT_CATEGORY_DEPTH,
};

const OAK_JSON: &str = r#"{
    "displayName": "Oak",
    "authors": ["a"],
    "blueprints": {
        "well": { "levels": false, "blur": ["x"] }
    },
    "categories": {
        "fundamentals": {
            "blueprints": {
                "bakery": { "levels": 3, "blur": ["x"], "hutBlocks": ["blockhutbaker"] },
                "cottagealt": { "levels": 2, "blur": ["x"], "hutBlocks": ["blockhutcitizen"] }
            },
            "categories": {
                "houses": {
                    "blueprints": {
                        "manor": { "levels": 1, "blur": ["x"] }
                    },
                    "categories": {}
                }
            }
        },
        "military": {
            "blueprints": {
                "barracks": { "levels": 4, "blur": ["x"], "hutBlocks": ["blockhutbarracks"] }
            },
            "categories": {}
        },
        "misc": {
            "blueprints": {
                "fountain": { "levels": false, "blur": ["x"] }
            },
            "categories": {}
        }
    }
}"#;

const STONE_JSON: &str = r#"{
    "displayName": "Stone",
    "authors": ["b"],
    "blueprints": {},
    "categories": {
        "fundamentals": {
            "blueprints": {
                "bakerystone": { "levels": 2, "blur": ["x"], "hutBlocks": ["blockhutbaker"] }
            },
            "categories": {}
        },
        "agriculture": {
            "blueprints": {
                "farm": { "levels": 1, "blur": ["x"], "hutBlocks": ["blockhutfarmer"] }
            },
            "categories": {}
        }
    }
}"#;

fn catalog() -> Catalog {
    Catalog::from_manifest(
        r#"[
            {
                "name": "oak",
                "displayName": "Oak",
                "authors": ["a"],
                "categories": ["fundamentals", "military", "misc"]
            },
            {
                "name": "stone",
                "displayName": "Stone",
                "authors": ["b"],
                "categories": ["fundamentals", "agriculture"]
            }
        ]"#,
    )
    .expect("test catalog")
}

struct FixtureSource {
    bodies: RefCell<HashMap<String, String>>,
    hits: Rc<Cell<usize>>,
    fail: BTreeSet<String>,
}

impl FixtureSource {
    fn new() -> Self {
        let mut bodies = HashMap::new();
        bodies.insert("oak".to_string(), OAK_JSON.to_string());
        bodies.insert("stone".to_string(), STONE_JSON.to_string());
        Self {
            bodies: RefCell::new(bodies),
            hits: Rc::new(Cell::new(0)),
            fail: BTreeSet::new(),
        }
    }

    fn failing(style_id: &str) -> Self {
        let mut source = Self::new();
        source.fail.insert(style_id.to_string());
        source
    }
}

impl StyleSource for FixtureSource {
    fn fetch(&self, style_id: &str) -> LocalBoxFuture<'_, Result<String, StyleError>> {
        self.hits.set(self.hits.get() + 1);
        let result = if self.fail.contains(style_id) {
            Err(StyleError::Network(format!("{style_id} unreachable")))
        } else {
            self.bodies
                .borrow()
                .get(style_id)
                .cloned()
                .ok_or_else(|| StyleError::Network(format!("{style_id} missing")))
        };
        async move { result }.boxed_local()
    }
}

fn themes() -> Vec<Rc<Theme>> {
    vec![
        Rc::new(Theme::from_json(
            "oak",
            serde_json::from_str(OAK_JSON).unwrap(),
            DEFAULT_CATEGORY_DEPTH,
        )),
        Rc::new(Theme::from_json(
            "stone",
            serde_json::from_str(STONE_JSON).unwrap(),
            DEFAULT_CATEGORY_DEPTH,
        )),
    ]
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn selections(styles: &[&str], categories: &[&str], term: &str) -> Selections {
    Selections {
        styles: set(styles),
        categories: set(categories),
        search_term: term.to_string(),
    }
}

#[test]
fn nothing_selected_yields_empty_content() {
    let content = collect_content(&themes(), &selections(&[], &[], ""), false);
    assert_eq!(content.total, 0);
    assert!(content.sections.is_empty());
}

#[test]
fn selecting_one_style_returns_only_its_buildings() {
    let content = collect_content(&themes(), &selections(&["oak"], &[], ""), false);
    assert_eq!(content.total, 6);
    let titles: Vec<&str> = content
        .sections
        .iter()
        .map(|section| section.title.as_str())
        .collect();
    // Known categories in priority order, unknown ("misc") after, root last.
    assert_eq!(
        titles,
        vec![
            "fundamentals",
            "fundamentals > houses",
            "military",
            "",
            "misc"
        ]
    );
    for section in &content.sections {
        for building in &section.buildings {
            assert_eq!(building.path[0], "oak");
        }
    }
}

#[test]
fn buildings_inside_a_section_sort_by_title_with_alt_stripped() {
    let content = collect_content(&themes(), &selections(&["oak"], &[], ""), false);
    let fundamentals = &content.sections[0];
    let names: Vec<&str> = fundamentals
        .buildings
        .iter()
        .map(|building| building.name.as_str())
        .collect();
    // "bakery" renders as Bakery, "cottagealt" as Residence.
    assert_eq!(names, vec!["bakery", "cottagealt"]);
}

#[test]
fn category_selection_filters_top_level_categories() {
    let content = collect_content(
        &themes(),
        &selections(&["oak"], &["military"], ""),
        false,
    );
    let titles: Vec<&str> = content
        .sections
        .iter()
        .map(|section| section.title.as_str())
        .collect();
    // Root buildings are never category-filtered.
    assert_eq!(titles, vec!["military", ""]);
    assert_eq!(content.total, 2);
}

#[test]
fn empty_category_selection_means_unfiltered() {
    let filtered = collect_content(&themes(), &selections(&["oak"], &["military"], ""), false);
    let unfiltered = collect_content(&themes(), &selections(&["oak"], &[], ""), false);
    assert!(unfiltered.total > filtered.total);
}

#[test]
fn search_ignores_category_selection() {
    let content = collect_content(
        &themes(),
        &selections(&["oak"], &["military"], "bakery"),
        true,
    );
    assert_eq!(content.total, 1);
    assert_eq!(content.sections[0].title, "fundamentals");
}

#[test]
fn search_everywhere_crosses_unselected_styles() {
    let content = collect_content(&themes(), &selections(&[], &[], "bakery"), false);
    assert_eq!(content.total, 2);
    for section in &content.sections {
        for building in &section.buildings {
            assert!(building.search_string.contains("bakery"));
        }
    }
}

#[test]
fn search_selected_only_restricts_to_selection() {
    let content = collect_content(&themes(), &selections(&["stone"], &[], "bakery"), true);
    assert_eq!(content.total, 1);
    assert_eq!(content.sections[0].buildings[0].name, "bakerystone");
}

#[test]
fn required_styles_expands_for_global_search() {
    let catalog = catalog();
    let wanted = required_styles(&catalog, &selections(&["oak"], &[], ""), false);
    assert_eq!(wanted, set(&["oak"]));

    let wanted = required_styles(&catalog, &selections(&["oak"], &[], "bakery"), false);
    assert_eq!(wanted, set(&["oak", "stone"]));

    let wanted = required_styles(&catalog, &selections(&["oak"], &[], "bakery"), true);
    assert_eq!(wanted, set(&["oak"]));
}

#[test]
fn aggregate_fetches_and_groups() {
    let source = FixtureSource::new();
    let hits = source.hits.clone();
    let loader = StyleLoader::new(source);
    let catalog = catalog();

    let content = block_on(aggregate(
        &loader,
        &catalog,
        &selections(&["oak"], &[], ""),
        false,
    ))
    .expect("aggregation succeeds");
    assert_eq!(content.total, 6);
    assert_eq!(hits.get(), 1);
}

#[test]
fn aggregate_skips_fetching_when_trivial() {
    let source = FixtureSource::new();
    let hits = source.hits.clone();
    let loader = StyleLoader::new(source);
    let catalog = catalog();

    let content = block_on(aggregate(&loader, &catalog, &Selections::default(), false))
        .expect("trivial aggregation");
    assert_eq!(content.total, 0);
    assert!(content.sections.is_empty());
    assert_eq!(hits.get(), 0);
}

#[test]
fn one_unreachable_style_fails_the_whole_derivation() {
    let source = FixtureSource::failing("stone");
    let loader = StyleLoader::new(source);
    let catalog = catalog();

    // Searching everywhere pulls in stone even though only oak is selected.
    let result = block_on(aggregate(
        &loader,
        &catalog,
        &selections(&["oak"], &[], "bakery"),
        false,
    ));
    assert_eq!(
        result,
        Err(StyleError::Network("stone unreachable".to_string()))
    );
}

#[test]
fn search_matches_unselected_styles_only_when_searching_everywhere() {
    let source = FixtureSource::new();
    let loader = StyleLoader::new(source);
    let catalog = catalog();

    let everywhere = block_on(aggregate(
        &loader,
        &catalog,
        &selections(&["oak"], &[], "farm"),
        false,
    ))
    .expect("aggregation succeeds");
    assert_eq!(everywhere.total, 1);
    assert_eq!(everywhere.sections[0].buildings[0].path[0], "stone");

    let selected_only = block_on(aggregate(
        &loader,
        &catalog,
        &selections(&["oak"], &[], "farm"),
        true,
    ))
    .expect("aggregation succeeds");
    assert_eq!(selected_only.total, 0);
}
