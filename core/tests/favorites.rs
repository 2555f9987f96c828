use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::{FutureExt, LocalBoxFuture};
use style_explorer_core::{resolve_favorites, StyleError, StyleLoader, StyleSource};

struct FixtureSource {
    bodies: RefCell<HashMap<String, String>>,
}

impl FixtureSource {
    fn new() -> Self {
        let mut bodies = HashMap::new();
        bodies.insert(
            "oak".to_string(),
            r#"{
                "displayName": "Oak",
                "authors": ["a"],
                "blueprints": {
                    "townhall": { "levels": 5, "blur": ["x"], "hutBlocks": ["blockhuttownhall"] }
                },
                "categories": {
                    "fundamentals": {
                        "blueprints": {
                            "bakery": { "levels": 3, "blur": ["x"], "hutBlocks": ["blockhutbaker"] }
                        },
                        "categories": {
                            "houses": {
                                "blueprints": {
                                    "manor": { "levels": 1, "blur": ["x"] }
                                },
                                "categories": {}
                            }
                        }
                    }
                }
            }"#
            .to_string(),
        );
        Self {
            bodies: RefCell::new(bodies),
        }
    }
}

impl StyleSource for FixtureSource {
    fn fetch(&self, style_id: &str) -> LocalBoxFuture<'_, Result<String, StyleError>> {
        let result = self
            .bodies
            .borrow()
            .get(style_id)
            .cloned()
            .ok_or_else(|| StyleError::Network(format!("{style_id} missing")));
        async move { result }.boxed_local()
    }
}

fn paths(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|path| path.to_string()).collect()
}

#[test]
fn resolves_paths_in_stored_order() {
    let loader = StyleLoader::new(FixtureSource::new());
    let resolved = block_on(resolve_favorites(
        &loader,
        &paths(&[
            "oak>fundamentals>houses>manor",
            "oak>townhall",
            "oak>fundamentals>bakery",
        ]),
    ));
    let names: Vec<&str> = resolved
        .iter()
        .map(|building| building.name.as_str())
        .collect();
    assert_eq!(names, vec!["manor", "townhall", "bakery"]);
}

#[test]
fn broken_paths_are_dropped_silently() {
    let loader = StyleLoader::new(FixtureSource::new());
    let resolved = block_on(resolve_favorites(
        &loader,
        &paths(&[
            "oak>fundamentals>bakery",
            "oak>fundamentals>removedbuilding",
            "oak>renamedcategory>bakery",
            "deletedstyle>fundamentals>bakery",
            "not-a-path",
            "oak>fundamentals>houses>manor",
        ]),
    ));
    let names: Vec<&str> = resolved
        .iter()
        .map(|building| building.name.as_str())
        .collect();
    assert_eq!(names, vec!["bakery", "manor"]);
}

#[test]
fn empty_favorite_list_resolves_to_nothing() {
    let loader = StyleLoader::new(FixtureSource::new());
    let resolved = block_on(resolve_favorites(&loader, &[]));
    assert!(resolved.is_empty());
}
