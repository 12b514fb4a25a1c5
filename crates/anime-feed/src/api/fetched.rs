//! Tagged result of a fetch accessor.
//!
//! Accessors never fail: when the upstream call or the mapping goes wrong
//! they substitute a placeholder of the same shape. `Fetched` keeps track of
//! which of the two happened so callers can tell them apart when they care.

use super::error::FetchError;

#[derive(Debug)]
pub enum Fetched<T> {
    /// Value normalized from a successful upstream response
    Live(T),
    /// Placeholder served because the request or mapping failed
    Fallback { value: T, error: FetchError },
}

impl<T> Fetched<T> {
    /// Build from a mapping result, substituting `fallback` on error
    pub fn or_fallback(result: Result<T, FetchError>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => Fetched::Live(value),
            Err(error) => Fetched::Fallback {
                value: fallback(),
                error,
            },
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(value) | Fetched::Fallback { value, .. } => value,
        }
    }

    /// Discard the tag, as the rendering layer does
    pub fn into_inner(self) -> T {
        match self {
            Fetched::Live(value) | Fetched::Fallback { value, .. } => value,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Fetched::Fallback { .. })
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Fetched::Live(_) => None,
            Fetched::Fallback { error, .. } => Some(error),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Live(value) => Fetched::Live(f(value)),
            Fetched::Fallback { value, error } => Fetched::Fallback {
                value: f(value),
                error,
            },
        }
    }
}
