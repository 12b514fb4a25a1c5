//! Mapping of upstream JSON onto the records in [`shared::models`].
//!
//! Mappers are pure functions over an already parsed body. Optional upstream
//! fields default individually; only the nodes a resource cannot exist
//! without (the top-level `data` node, and a few required lists) produce a
//! [`FetchError::Shape`], which the client turns into a fallback.

pub mod catalog;
pub mod detail;
pub mod episode;
pub mod listing;

use crate::api::FetchError;
use serde_json::Value;
use shared::de::{leading_u32, scalar_to_string};
use shared::{AnimeItem, Genre, Pagination};

/// The `data` node every upstream envelope carries
pub(crate) fn data_node(body: &Value) -> Result<&Value, FetchError> {
    match body.get("data") {
        Some(Value::Null) | None => Err(FetchError::missing("data")),
        Some(data) => Ok(data),
    }
}

/// Upstream `creator` attribution, empty when absent
pub(crate) fn creator(body: &Value) -> String {
    text(body, "creator")
}

/// Scalar field as a string, `""` when absent
pub(crate) fn text(node: &Value, key: &str) -> String {
    opt_text(node, key).unwrap_or_default()
}

/// Scalar field as a string, `None` when absent or null
pub(crate) fn opt_text(node: &Value, key: &str) -> Option<String> {
    node.get(key).and_then(scalar_to_string)
}

/// Scalar field where an empty value also counts as absent
pub(crate) fn text_or(node: &Value, key: &str, default: &str) -> String {
    opt_text(node, key)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Positive integer field; zero and non-numeric values count as absent
pub(crate) fn count(node: &Value, key: &str) -> Option<u32> {
    node.get(key).and_then(leading_u32).filter(|n| *n > 0)
}

pub(crate) fn flag(node: &Value, key: &str) -> bool {
    node.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Array field, empty when absent or not an array
pub(crate) fn list<'a>(node: &'a Value, key: &str) -> &'a [Value] {
    node.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Top-level list of a resource
///
/// Absent or `null` reads as empty, any other non-array value is a shape
/// error. `path` names the node in the error.
pub(crate) fn items<'a>(node: &'a Value, key: &str, path: &str) -> Result<&'a [Value], FetchError> {
    match node.get(key) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(FetchError::not_a_list(path)),
    }
}

/// Genre entry as sent by the upstream API
pub(crate) fn genre(node: &Value) -> Genre {
    Genre::from_slug(
        text(node, "name"),
        &text(node, "slug"),
        text(node, "otakudesu_url"),
    )
}

pub(crate) fn genres(node: &Value, key: &str) -> Vec<Genre> {
    list(node, key).iter().map(genre).collect()
}

/// Card fields shared by every upstream listing entry
pub(crate) fn anime_card(item: &Value) -> AnimeItem {
    let slug = text(item, "slug");
    AnimeItem {
        id: slug.clone(),
        anime_id: slug.clone(),
        title: text(item, "title"),
        poster: text(item, "poster"),
        href: format!("/anime/{}", slug),
        samehadaku_url: text(item, "otakudesu_url"),
        ..Default::default()
    }
}

/// Upstream pagination block, defaulting to a single page
pub(crate) fn pagination(node: Option<&Value>) -> Pagination {
    let Some(node) = node.filter(|n| n.is_object()) else {
        return Pagination::default();
    };

    Pagination {
        current_page: count(node, "current_page").unwrap_or(1),
        total_pages: count(node, "last_visible_page").unwrap_or(1),
        has_next_page: flag(node, "has_next_page"),
        has_prev_page: flag(node, "has_previous_page"),
        next_page: count(node, "next_page"),
        prev_page: count(node, "previous_page"),
    }
}
