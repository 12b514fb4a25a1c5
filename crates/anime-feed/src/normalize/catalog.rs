//! Site-wide resources: home feed, release schedule and genre index.

use super::{anime_card, data_node, genre, items, list, opt_text, text};
use crate::api::FetchError;
use serde::Deserialize;
use serde_json::Value;
use shared::{AnimeItem, Genre, HomeData, ScheduleDay};

/// Home sections are forwarded in the produced schema
pub fn map_home(body: &Value) -> Result<HomeData, FetchError> {
    let data = data_node(body)?;
    Ok(HomeData::deserialize(data)?)
}

/// `/anime/schedule`: one entry per weekday
pub fn map_schedule(body: &Value) -> Result<Vec<ScheduleDay>, FetchError> {
    let data = data_node(body)?;
    let days = data
        .as_array()
        .ok_or_else(|| FetchError::missing("data[]"))?;

    Ok(days
        .iter()
        .map(|day| ScheduleDay {
            day: text(day, "day"),
            anime_list: list(day, "anime_list")
                .iter()
                .map(|entry| {
                    let card = anime_card(entry);
                    AnimeItem {
                        title: opt_text(entry, "anime_name").unwrap_or_else(|| card.title.clone()),
                        samehadaku_url: opt_text(entry, "url").unwrap_or_else(|| card.samehadaku_url.clone()),
                        ..card
                    }
                })
                .collect(),
        })
        .collect())
}

/// `/anime/genre`: an absent payload yields no genres, a non-list one is
/// a shape error
pub fn map_genres(body: &Value) -> Result<Vec<Genre>, FetchError> {
    Ok(items(body, "data", "data")?.iter().map(genre).collect())
}
