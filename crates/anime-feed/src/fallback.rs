//! Placeholder values served when a resource cannot be fetched.
//!
//! Each value has exactly the shape of the live result for the same
//! resource, so the rendering layer never has to special-case failures.

use crate::normalize::detail::generated_episode_slug;
use crate::normalize::episode;
use shared::{
    AnimeDetail, AnimeItem, AnimeListData, ApiResponse, BatchDetail, BatchListData, EpisodeDetail,
    EpisodeLink, EpisodeSummary, Genre, HomeData, PageInfo, PaginatedResponse, Pagination,
    ScheduleDay, Score, ServerLink, Synopsis,
};

pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x400";

/// Number of episodes synthesized for an unreachable episode list
pub const FALLBACK_EPISODE_COUNT: u32 = 12;

const SAMPLE_SYNOPSIS: &str = "This is a sample anime description for testing purposes.";

fn placeholder_genre(title: &str, slug: &str) -> Genre {
    Genre::from_slug(title, slug, "#")
}

/// Empty first page in the `ApiResponse` envelope
fn empty_page<T: Default>() -> ApiResponse<T> {
    ApiResponse {
        creator: String::new(),
        message: String::new(),
        data: T::default(),
        pagination: Some(Pagination::default()),
    }
}

/// Detail envelope with no attribution
fn detail<T>(data: T) -> ApiResponse<T> {
    ApiResponse {
        creator: String::new(),
        message: String::new(),
        data,
        pagination: None,
    }
}

pub fn home() -> HomeData {
    HomeData::default()
}

pub fn schedule() -> Vec<ScheduleDay> {
    Vec::new()
}

pub fn anime_list() -> ApiResponse<AnimeListData> {
    empty_page()
}

pub fn batch_list() -> ApiResponse<BatchListData> {
    empty_page()
}

/// Single well-known title so the completed grid is never blank
pub fn completed() -> PaginatedResponse<AnimeItem> {
    PaginatedResponse {
        data: vec![AnimeItem {
            id: "popular-1".to_string(),
            anime_id: "attack-on-titan".to_string(),
            title: "Attack on Titan".to_string(),
            poster: PLACEHOLDER_POSTER.to_string(),
            episodes: None,
            score: Some("9.0".to_string()),
            status: Some("Completed".to_string()),
            anime_type: Some("TV".to_string()),
            release_date: None,
            released_on: Some("2 years ago".to_string()),
            total_episodes: Some(87),
            genre_list: vec![
                placeholder_genre("Action", "action"),
                placeholder_genre("Drama", "drama"),
            ],
            href: "/anime/attack-on-titan".to_string(),
            samehadaku_url: "#".to_string(),
        }],
        pagination: PageInfo::default(),
    }
}

pub fn genres() -> Vec<Genre> {
    [
        ("Action", "action"),
        ("Adventure", "adventure"),
        ("Comedy", "comedy"),
        ("Drama", "drama"),
        ("Fantasy", "fantasy"),
        ("Romance", "romance"),
        ("Sci-Fi", "sci-fi"),
        ("Slice of Life", "slice-of-life"),
    ]
    .into_iter()
    .map(|(title, slug)| placeholder_genre(title, slug))
    .collect()
}

pub fn anime_detail() -> ApiResponse<AnimeDetail> {
    detail(AnimeDetail {
        title: "Sample Anime Title".to_string(),
        poster: PLACEHOLDER_POSTER.to_string(),
        score: Score {
            value: "8.5".to_string(),
            users: "1000".to_string(),
        },
        japanese: "サンプルアニメ".to_string(),
        synonyms: String::new(),
        english: "Sample Anime".to_string(),
        status: "Ongoing".to_string(),
        anime_type: "TV".to_string(),
        source: "Manga".to_string(),
        duration: "24 min per ep".to_string(),
        episodes: Some(12),
        season: "Fall 2024".to_string(),
        studios: "Sample Studio".to_string(),
        producers: "Sample Producer".to_string(),
        aired: "Oct 2024".to_string(),
        trailer: String::new(),
        synopsis: Synopsis::single(SAMPLE_SYNOPSIS),
        genre_list: vec![
            placeholder_genre("Action", "action"),
            placeholder_genre("Adventure", "adventure"),
        ],
        batch_list: Vec::new(),
        episode_list: (1..=2)
            .map(|n| EpisodeLink {
                title: n.to_string(),
                episode_id: format!("ep{}", n),
                href: format!("/episode/ep{}", n),
                samehadaku_url: "#".to_string(),
            })
            .collect(),
    })
}

/// Sample batch page carrying the requested id
pub fn batch_detail(batch_id: &str) -> ApiResponse<BatchDetail> {
    detail(BatchDetail {
        title: "Sample Anime Title".to_string(),
        anime_id: batch_id.to_string(),
        poster: PLACEHOLDER_POSTER.to_string(),
        japanese: "サンプルアニメ".to_string(),
        synonyms: String::new(),
        english: "Sample Anime".to_string(),
        status: "Ongoing".to_string(),
        anime_type: "TV".to_string(),
        source: "Manga".to_string(),
        score: "8.5".to_string(),
        duration: "24 min per ep".to_string(),
        episodes: Some(12),
        season: "Fall 2024".to_string(),
        studios: "Sample Studio".to_string(),
        producers: "Sample Producer".to_string(),
        aired: "Oct 2024".to_string(),
        released_on: "1 month ago".to_string(),
        synopsis: Synopsis::single(SAMPLE_SYNOPSIS),
        genre_list: vec![
            placeholder_genre("Action", "action"),
            placeholder_genre("Adventure", "adventure"),
        ],
        download_url: Default::default(),
        recommended_anime_list: Vec::new(),
    })
}

/// Conventionally named episodes for an anime
pub fn anime_episodes(anime_slug: &str) -> Vec<EpisodeSummary> {
    (1..=FALLBACK_EPISODE_COUNT)
        .map(|number| EpisodeSummary {
            slug: generated_episode_slug(anime_slug, number),
            title: format!("Episode {}", number),
            number,
            download_url: None,
        })
        .collect()
}

pub fn episode_detail(episode_slug: &str) -> EpisodeDetail {
    episode::episode_from_slug(episode_slug)
}

pub fn server_link(server_id: &str) -> ApiResponse<ServerLink> {
    detail(ServerLink {
        server_id: server_id.to_string(),
        server_name: "Sample Server".to_string(),
        embed_url: "https://example.com/embed/sample".to_string(),
        direct_url: episode::SAMPLE_STREAM_URL.to_string(),
        quality: "1080p".to_string(),
        size: "500MB".to_string(),
    })
}
