use thiserror::Error;

/// Failure modes of the style data pipeline.
///
/// `Clone` matters here: the loader broadcasts a single failed fetch to every
/// caller that was coalesced onto it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("style data unreachable: {0}")]
    Network(String),
    #[error("style data malformed: {0}")]
    Parse(String),
    #[error("not found: {0}")]
    NotFound(String),
}
