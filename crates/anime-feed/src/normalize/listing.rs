//! Paginated anime listings: ongoing, completed, movies, batches, genre
//! filtered listings and search.

use super::{anime_card, creator, data_node, genres, items, opt_text, pagination, text};
use crate::api::FetchError;
use serde::Deserialize;
use serde_json::Value;
use shared::{
    AnimeItem, AnimeListData, ApiResponse, BatchItem, BatchListData, PaginatedResponse,
};

fn envelope<T>(body: &Value, data: T, pagination_node: Option<&Value>) -> ApiResponse<T> {
    ApiResponse {
        creator: creator(body),
        message: String::new(),
        data,
        pagination: Some(super::pagination(pagination_node)),
    }
}

/// Entry of the completed listing, tagged with the given status and type
fn completed_card(item: &Value, status: &str, anime_type: &str) -> AnimeItem {
    AnimeItem {
        episodes: opt_text(item, "episode_count"),
        score: opt_text(item, "rating"),
        status: Some(status.to_string()),
        anime_type: Some(anime_type.to_string()),
        released_on: opt_text(item, "last_release_date"),
        ..anime_card(item)
    }
}

/// `/anime/ongoing-anime`; the `ongoingAnimeData` list is required
pub fn map_ongoing(body: &Value) -> Result<ApiResponse<AnimeListData>, FetchError> {
    let data = data_node(body)?;
    let entries = data
        .get("ongoingAnimeData")
        .and_then(Value::as_array)
        .ok_or_else(|| FetchError::missing("data.ongoingAnimeData"))?;

    let anime_list = entries
        .iter()
        .map(|item| AnimeItem {
            episodes: opt_text(item, "current_episode"),
            status: Some("Ongoing".to_string()),
            anime_type: Some("TV".to_string()),
            released_on: opt_text(item, "newest_release_date"),
            ..anime_card(item)
        })
        .collect();

    Ok(envelope(
        body,
        AnimeListData { anime_list },
        data.get("paginationData"),
    ))
}

/// `/anime/complete-anime?page=N` as a flat paginated list
pub fn map_completed(body: &Value) -> Result<PaginatedResponse<AnimeItem>, FetchError> {
    let data = data_node(body)?;
    let anime = items(data, "completeAnimeData", "data.completeAnimeData")?
        .iter()
        .map(|item| completed_card(item, "Completed", "TV"))
        .collect();

    Ok(PaginatedResponse {
        data: anime,
        pagination: pagination(data.get("paginationData")).into(),
    })
}

/// `/anime/complete-anime/N` presented as movies
pub fn map_movies(body: &Value) -> Result<ApiResponse<AnimeListData>, FetchError> {
    let data = data_node(body)?;
    let anime_list = items(data, "completeAnimeData", "data.completeAnimeData")?
        .iter()
        .map(|item| completed_card(item, "Completed", "Movie"))
        .collect();

    Ok(envelope(
        body,
        AnimeListData { anime_list },
        data.get("paginationData"),
    ))
}

/// `/anime/complete-anime/N` presented as batch downloads
pub fn map_batches(body: &Value) -> Result<ApiResponse<BatchListData>, FetchError> {
    let data = data_node(body)?;
    let batch_list = items(data, "completeAnimeData", "data.completeAnimeData")?
        .iter()
        .map(|item| {
            let slug = text(item, "slug");
            BatchItem {
                title: text(item, "title"),
                poster: text(item, "poster"),
                anime_type: "TV".to_string(),
                score: text(item, "rating"),
                status: "Completed".to_string(),
                href: format!("/batch/{}", slug),
                batch_id: slug,
                samehadaku_url: text(item, "otakudesu_url"),
                genre_list: Vec::new(),
            }
        })
        .collect();

    Ok(envelope(
        body,
        BatchListData { batch_list },
        data.get("paginationData"),
    ))
}

/// `/anime/genre/{slug}?page=N`
pub fn map_genre_anime(body: &Value) -> Result<ApiResponse<AnimeListData>, FetchError> {
    let data = data_node(body)?;
    let anime_list = items(data, "anime", "data.anime")?
        .iter()
        .map(|item| AnimeItem {
            episodes: opt_text(item, "episode_count"),
            score: opt_text(item, "rating"),
            status: Some("Unknown".to_string()),
            anime_type: Some("TV".to_string()),
            released_on: opt_text(item, "season"),
            genre_list: genres(item, "genres"),
            ..anime_card(item)
        })
        .collect();

    Ok(envelope(
        body,
        AnimeListData { anime_list },
        data.get("pagination"),
    ))
}

/// Search results are already in the produced schema and pass through
pub fn map_search(body: &Value) -> Result<ApiResponse<AnimeListData>, FetchError> {
    data_node(body)?;
    Ok(ApiResponse::deserialize(body)?)
}
