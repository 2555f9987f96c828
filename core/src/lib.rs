pub mod catalog;
pub mod content;
pub mod error;
pub mod favorites;
pub mod hut_blocks;
pub mod loader;
pub mod search;
pub mod selection;
pub mod theme;

pub use catalog::{Catalog, StyleInfo};
pub use content::{aggregate, collect_content, required_styles, PageContent, Section};
pub use error::StyleError;
pub use favorites::{format_favorite_path, parse_favorite_path, resolve_favorites, FavoritePath};
pub use loader::{StyleLoader, StyleSource};
pub use search::SearchMatcher;
pub use selection::{decode_query, encode_query, has_selection_params, Selections};
pub use theme::{BuildingData, Category, ImageView, Theme, DEFAULT_CATEGORY_DEPTH};
