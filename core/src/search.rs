use regex::{Regex, RegexBuilder};

use crate::theme::BuildingData;

/// Compiled search term, matched against a building's precomputed search
/// string.
///
/// Plain terms (alphanumeric and spaces, Unicode-aware so accented letters
/// count) stay literal substring tests. Anything else is compiled as a
/// case-insensitive regular expression; a term that fails to compile falls
/// back to the literal test.
pub enum SearchMatcher {
    All,
    Literal(String),
    Pattern(Regex),
}

impl SearchMatcher {
    pub fn new(term: &str) -> Self {
        if term.is_empty() {
            return SearchMatcher::All;
        }
        if term.chars().all(is_plain_char) {
            return SearchMatcher::Literal(term.to_lowercase());
        }
        match RegexBuilder::new(term).case_insensitive(true).build() {
            Ok(pattern) => SearchMatcher::Pattern(pattern),
            Err(_) => SearchMatcher::Literal(term.to_lowercase()),
        }
    }

    pub fn matches(&self, building: &BuildingData) -> bool {
        match self {
            SearchMatcher::All => true,
            SearchMatcher::Literal(term) => building.search_string.contains(term.as_str()),
            SearchMatcher::Pattern(pattern) => pattern.is_match(&building.search_string),
        }
    }
}

fn is_plain_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == ' '
}
