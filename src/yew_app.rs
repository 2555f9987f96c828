use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, HtmlInputElement, InputEvent, MouseEvent};
use yew::prelude::*;

use crate::app_router;
use crate::content_runtime::{self, AggregationSeq, ContentPhase};
use crate::favorites_store::FavoritesStore;
use crate::loader_source::HttpStyleSource;
use crate::persisted_store;
use style_explorer_core::{
    format_favorite_path, resolve_favorites, BuildingData, Catalog, ImageView, PageContent,
    Section, StyleLoader,
};

/// Longest accepted search term; extra input is cut off, not rejected.
const SEARCH_TERM_MAX_CHARS: usize = 30;

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) catalog: Rc<Catalog>,
    pub(crate) loader: Rc<StyleLoader<HttpStyleSource>>,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.catalog, &other.catalog) && Rc::ptr_eq(&self.loader, &other.loader)
    }
}

fn category_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn building_card(
    building: &Rc<BuildingData>,
    favorited: bool,
    on_favorite: Callback<MouseEvent>,
) -> Html {
    let star_class = if favorited {
        "card-star card-star-on"
    } else {
        "card-star"
    };
    let star_title = if favorited {
        "Remove from favorites"
    } else {
        "Add to favorites"
    };
    let levels_label = building
        .json
        .levels
        .map(|levels| format!("{levels} levels"))
        .unwrap_or_else(|| "unleveled".to_string());
    html! {
        <div class="building-card">
            <img
                class="card-image"
                src={building.image_path(ImageView::Front)}
                alt={building.title().to_string()}
                loading="lazy"
            />
            <div class="card-body">
                <span class="card-title">{ building.title().to_string() }</span>
                <span class="card-style">{ building.style_display_name.clone() }</span>
                <span class="card-levels">{ levels_label }</span>
            </div>
            <button class={star_class} title={star_title} onclick={on_favorite}>
                { if favorited { "\u{2605}" } else { "\u{2606}" } }
            </button>
        </div>
    }
}

fn section_view(
    section: &Section,
    favorites: &FavoritesStore,
    on_favorite_path: &Callback<String>,
) -> Html {
    let heading = if section.title.is_empty() {
        html! {}
    } else {
        html! { <h3 class="section-title">{ section.title.clone() }</h3> }
    };
    let cards: Html = section
        .buildings
        .iter()
        .map(|building| {
            let path = format_favorite_path(building);
            let favorited = favorites.contains(&path);
            let on_favorite = {
                let on_favorite_path = on_favorite_path.clone();
                Callback::from(move |_: MouseEvent| on_favorite_path.emit(path.clone()))
            };
            building_card(building, favorited, on_favorite)
        })
        .collect();
    html! {
        <section class="building-section">
            {heading}
            <div class="card-grid">{cards}</div>
        </section>
    }
}

fn content_view(
    content: &PageContent,
    favorites: &FavoritesStore,
    on_favorite_path: &Callback<String>,
) -> Html {
    if content.total == 0 {
        return html! {
            <p class="content-empty">{ "Nothing matches the current selection." }</p>
        };
    }
    let sections: Html = content
        .sections
        .iter()
        .map(|section| section_view(section, favorites, on_favorite_path))
        .collect();
    html! {
        <>
            <p class="content-total">{ format!("{} buildings", content.total) }</p>
            {sections}
        </>
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let catalog = props.catalog.clone();
    let loader = props.loader.clone();
    let selections = {
        let catalog = catalog.clone();
        use_state(move || app_router::initial_selections(&catalog))
    };
    let selections_value = (*selections).clone();
    let search_selected_only = use_state(|| {
        persisted_store::load_json(persisted_store::SEARCH_SELECTED_ONLY_KEY).unwrap_or(false)
    });
    let search_selected_only_value = *search_selected_only;
    let show_favorites = use_state(|| {
        persisted_store::load_json(persisted_store::SHOW_FAVORITES_KEY).unwrap_or(false)
    });
    let show_favorites_value = *show_favorites;
    let favorites = use_state(FavoritesStore::load);
    let favorites_value = (*favorites).clone();
    let favorite_buildings = use_state(Vec::<Rc<BuildingData>>::new);
    let phase = use_state(|| ContentPhase::Loading);
    let phase_value = (*phase).clone();
    let seq = use_memo((), |_| AggregationSeq::default());

    {
        let catalog = catalog.clone();
        let loader = loader.clone();
        let seq = seq.clone();
        let phase = phase.clone();
        use_effect_with(
            (selections_value.clone(), search_selected_only_value),
            move |(selections, selected_only)| {
                app_router::sync_selections(selections, &catalog);
                content_runtime::spawn_aggregation(
                    seq,
                    loader,
                    catalog.clone(),
                    selections.clone(),
                    *selected_only,
                    phase,
                );
                || ()
            },
        );
    }

    {
        let loader = loader.clone();
        let favorite_buildings = favorite_buildings.clone();
        let paths: Vec<String> = favorites_value.list().to_vec();
        use_effect_with((paths, show_favorites_value), move |(paths, show)| {
            if !show {
                favorite_buildings.set(Vec::new());
                return;
            }
            let paths = paths.clone();
            spawn_local(async move {
                let resolved = resolve_favorites(&loader, &paths).await;
                let skipped = paths.len() - resolved.len();
                if skipped > 0 {
                    gloo::console::warn!("favorites: skipped unresolvable entries", skipped);
                }
                favorite_buildings.set(resolved);
            });
        });
    }

    let on_style_toggle = {
        let selections = selections.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let name = input.value();
            let mut next = (*selections).clone();
            if input.checked() {
                next.styles.insert(name);
            } else {
                next.styles.remove(&name);
            }
            selections.set(next);
        })
    };
    let on_all_styles = {
        let selections = selections.clone();
        let catalog = catalog.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selections).clone();
            next.styles = catalog.style_ids().map(str::to_string).collect();
            selections.set(next);
        })
    };
    let on_no_styles = {
        let selections = selections.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selections).clone();
            next.styles.clear();
            selections.set(next);
        })
    };
    let on_category_toggle = {
        let selections = selections.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let name = input.value();
            let mut next = (*selections).clone();
            if input.checked() {
                next.categories.insert(name);
            } else {
                next.categories.remove(&name);
            }
            selections.set(next);
        })
    };
    let on_search_input = {
        let selections = selections.clone();
        Callback::from(move |event: InputEvent| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let term: String = input.value().chars().take(SEARCH_TERM_MAX_CHARS).collect();
            if term.chars().count() < input.value().chars().count() {
                input.set_value(&term);
            }
            let mut next = (*selections).clone();
            next.search_term = term;
            selections.set(next);
        })
    };
    let on_search_clear = {
        let selections = selections.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*selections).clone();
            next.search_term.clear();
            selections.set(next);
        })
    };
    let on_search_scope_toggle = {
        let search_selected_only = search_selected_only.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let selected_only = input.checked();
            search_selected_only.set(selected_only);
            persisted_store::store_json(persisted_store::SEARCH_SELECTED_ONLY_KEY, &selected_only);
        })
    };
    let on_show_favorites_toggle = {
        let show_favorites = show_favorites.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let show = input.checked();
            show_favorites.set(show);
            persisted_store::store_json(persisted_store::SHOW_FAVORITES_KEY, &show);
        })
    };
    let on_favorite_path = {
        let favorites = favorites.clone();
        Callback::from(move |path: String| {
            let mut next = (*favorites).clone();
            next.toggle(&path);
            favorites.set(next);
        })
    };

    let style_rows: Html = catalog
        .styles()
        .iter()
        .map(|style| {
            let checked = selections_value.styles.contains(&style.name);
            let wip_tag = if style.wip {
                html! { <span class="style-wip">{ "WIP" }</span> }
            } else {
                html! {}
            };
            html! {
                <label class="style-row">
                    <input
                        type="checkbox"
                        value={style.name.clone()}
                        checked={checked}
                        onchange={on_style_toggle.clone()}
                    />
                    <span class="style-name">{ style.display_name.clone() }</span>
                    {wip_tag}
                    <span class="style-authors">{ style.authors.join(", ") }</span>
                </label>
            }
        })
        .collect();

    let category_rows: Html = catalog
        .category_names()
        .iter()
        .map(|name| {
            let checked = selections_value.categories.contains(name);
            html! {
                <label class="category-row">
                    <input
                        type="checkbox"
                        value={name.clone()}
                        checked={checked}
                        onchange={on_category_toggle.clone()}
                    />
                    <span>{ category_label(name) }</span>
                </label>
            }
        })
        .collect();

    let favorites_panel = if show_favorites_value {
        let cards: Html = favorite_buildings
            .iter()
            .map(|building| {
                let path = format_favorite_path(building);
                let on_favorite = {
                    let on_favorite_path = on_favorite_path.clone();
                    Callback::from(move |_: MouseEvent| on_favorite_path.emit(path.clone()))
                };
                building_card(building, true, on_favorite)
            })
            .collect();
        let body = if favorites_value.is_empty() {
            html! { <p class="content-empty">{ "No favorites yet." }</p> }
        } else {
            html! { <div class="card-grid">{cards}</div> }
        };
        html! {
            <section class="favorites-section">
                <h3 class="section-title">{ "Favorites" }</h3>
                {body}
            </section>
        }
    } else {
        html! {}
    };

    let content = match &phase_value {
        ContentPhase::Loading => html! { <p class="content-loading">{ "Loading..." }</p> },
        ContentPhase::Failed(message) => html! {
            <div class="content-error">
                <p>{ "Could not load the selected styles. Try a different selection." }</p>
                <p class="content-error-detail">{ message.clone() }</p>
            </div>
        },
        ContentPhase::Ready(content) => content_view(content, &favorites_value, &on_favorite_path),
    };

    html! {
        <div class="explorer">
            <aside class="sidebar">
                <h2>{ "Styles" }</h2>
                <div class="style-bulk">
                    <button onclick={on_all_styles}>{ "All" }</button>
                    <button onclick={on_no_styles}>{ "None" }</button>
                </div>
                <div class="style-list">{style_rows}</div>
                <h2>{ "Categories" }</h2>
                <div class="category-list">{category_rows}</div>
                <h2>{ "Search" }</h2>
                <div class="search-box">
                    <input
                        type="text"
                        placeholder="Search buildings"
                        maxlength={SEARCH_TERM_MAX_CHARS.to_string()}
                        value={selections_value.search_term.clone()}
                        oninput={on_search_input}
                    />
                    <button onclick={on_search_clear}>{ "Clear" }</button>
                </div>
                <label class="search-scope">
                    <input
                        type="checkbox"
                        checked={search_selected_only_value}
                        onchange={on_search_scope_toggle}
                    />
                    <span>{ "Search selected styles only" }</span>
                </label>
                <label class="favorites-toggle">
                    <input
                        type="checkbox"
                        checked={show_favorites_value}
                        onchange={on_show_favorites_toggle}
                    />
                    <span>{ "Show favorites" }</span>
                </label>
            </aside>
            <main class="content">
                {favorites_panel}
                {content}
            </main>
        </div>
    }
}

pub(crate) fn run_app(catalog: Rc<Catalog>, loader: Rc<StyleLoader<HttpStyleSource>>) {
    yew::Renderer::<App>::with_props(AppProps { catalog, loader }).render();
}
