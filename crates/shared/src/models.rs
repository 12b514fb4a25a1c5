//! Records handed to the rendering layer.
//!
//! Every record serializes all of its fields, including the ones the upstream
//! API omitted: absent strings become `""`, absent lists `[]` and absent
//! optional scalars `null`. All records also deserialize leniently so upstream
//! payloads that already use this schema can be passed straight through: a
//! missing key or an explicit `null` takes the field's default, and scalars
//! are accepted whether they arrive as numbers or as strings.

use crate::de;
use serde::{Deserialize, Serialize};

/// Anime card as shown in listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimeItem {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub anime_id: String,
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub poster: String,
    #[serde(deserialize_with = "de::opt_string")]
    pub episodes: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub score: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(rename = "type", deserialize_with = "de::opt_string")]
    pub anime_type: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub release_date: Option<String>,
    #[serde(deserialize_with = "de::opt_string")]
    pub released_on: Option<String>,
    #[serde(deserialize_with = "de::opt_u32")]
    pub total_episodes: Option<u32>,
    #[serde(deserialize_with = "de::or_default")]
    pub genre_list: Vec<Genre>,
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
}

/// Listing entry with its chart position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopAnimeItem {
    #[serde(flatten)]
    pub anime: AnimeItem,
    #[serde(default, deserialize_with = "de::count")]
    pub rank: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Genre {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub genre_id: String,
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
}

impl Genre {
    /// Genre link with the site-local href derived from its slug
    pub fn from_slug(title: impl Into<String>, slug: &str, samehadaku_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genre_id: slug.to_string(),
            href: format!("/genres/{}", slug),
            samehadaku_url: samehadaku_url.into(),
        }
    }
}

/// Batch (full season download) card
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchItem {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub poster: String,
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub anime_type: String,
    #[serde(deserialize_with = "de::string")]
    pub score: String,
    #[serde(deserialize_with = "de::string")]
    pub status: String,
    #[serde(deserialize_with = "de::string")]
    pub batch_id: String,
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
    #[serde(deserialize_with = "de::or_default")]
    pub genre_list: Vec<Genre>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    #[serde(deserialize_with = "de::string")]
    pub value: String,
    #[serde(deserialize_with = "de::string")]
    pub users: String,
}

/// Related title referenced from a synopsis
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Connection {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub anime_id: String,
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Synopsis {
    #[serde(deserialize_with = "de::or_default")]
    pub paragraphs: Vec<String>,
    #[serde(deserialize_with = "de::or_default")]
    pub connections: Vec<Connection>,
}

impl Synopsis {
    pub fn single(paragraph: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![paragraph.into()],
            connections: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchLink {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub batch_id: String,
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeLink {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub episode_id: String,
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
}

/// Full anime page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimeDetail {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub poster: String,
    #[serde(deserialize_with = "de::or_default")]
    pub score: Score,
    #[serde(deserialize_with = "de::string")]
    pub japanese: String,
    #[serde(deserialize_with = "de::string")]
    pub synonyms: String,
    #[serde(deserialize_with = "de::string")]
    pub english: String,
    #[serde(deserialize_with = "de::string")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub anime_type: String,
    #[serde(deserialize_with = "de::string")]
    pub source: String,
    #[serde(deserialize_with = "de::string")]
    pub duration: String,
    #[serde(deserialize_with = "de::opt_u32")]
    pub episodes: Option<u32>,
    #[serde(deserialize_with = "de::string")]
    pub season: String,
    #[serde(deserialize_with = "de::string")]
    pub studios: String,
    #[serde(deserialize_with = "de::string")]
    pub producers: String,
    #[serde(deserialize_with = "de::string")]
    pub aired: String,
    #[serde(deserialize_with = "de::string")]
    pub trailer: String,
    #[serde(deserialize_with = "de::or_default")]
    pub synopsis: Synopsis,
    #[serde(deserialize_with = "de::or_default")]
    pub genre_list: Vec<Genre>,
    #[serde(deserialize_with = "de::or_default")]
    pub batch_list: Vec<BatchLink>,
    #[serde(deserialize_with = "de::or_default")]
    pub episode_list: Vec<EpisodeLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadLink {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadQuality {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::or_default")]
    pub urls: Vec<DownloadLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadFormat {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::or_default")]
    pub qualities: Vec<DownloadQuality>,
}

/// Download manifest: format -> quality -> named URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadManifest {
    #[serde(deserialize_with = "de::or_default")]
    pub formats: Vec<DownloadFormat>,
}

impl DownloadManifest {
    /// Number of individual download URLs across all formats and qualities
    pub fn link_count(&self) -> usize {
        self.formats
            .iter()
            .flat_map(|format| &format.qualities)
            .map(|quality| quality.urls.len())
            .sum()
    }
}

/// Batch download page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchDetail {
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub anime_id: String,
    #[serde(deserialize_with = "de::string")]
    pub poster: String,
    #[serde(deserialize_with = "de::string")]
    pub japanese: String,
    #[serde(deserialize_with = "de::string")]
    pub synonyms: String,
    #[serde(deserialize_with = "de::string")]
    pub english: String,
    #[serde(deserialize_with = "de::string")]
    pub status: String,
    #[serde(rename = "type", deserialize_with = "de::string")]
    pub anime_type: String,
    #[serde(deserialize_with = "de::string")]
    pub source: String,
    #[serde(deserialize_with = "de::string")]
    pub score: String,
    #[serde(deserialize_with = "de::string")]
    pub duration: String,
    #[serde(deserialize_with = "de::opt_u32")]
    pub episodes: Option<u32>,
    #[serde(deserialize_with = "de::string")]
    pub season: String,
    #[serde(deserialize_with = "de::string")]
    pub studios: String,
    #[serde(deserialize_with = "de::string")]
    pub producers: String,
    #[serde(deserialize_with = "de::string")]
    pub aired: String,
    #[serde(deserialize_with = "de::string")]
    pub released_on: String,
    #[serde(deserialize_with = "de::or_default")]
    pub synopsis: Synopsis,
    #[serde(deserialize_with = "de::or_default")]
    pub genre_list: Vec<Genre>,
    #[serde(deserialize_with = "de::or_default")]
    pub download_url: DownloadManifest,
    #[serde(deserialize_with = "de::or_default")]
    pub recommended_anime_list: Vec<AnimeItem>,
}

/// Entry of an anime's episode list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeSummary {
    #[serde(deserialize_with = "de::string")]
    pub slug: String,
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::count")]
    pub number: u32,
    #[serde(deserialize_with = "de::opt_string")]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamServer {
    #[serde(deserialize_with = "de::string")]
    pub name: String,
    #[serde(deserialize_with = "de::string")]
    pub url: String,
    #[serde(deserialize_with = "de::string")]
    pub quality: String,
}

/// Episode watch page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EpisodeDetail {
    #[serde(deserialize_with = "de::string")]
    pub id: String,
    #[serde(deserialize_with = "de::string")]
    pub title: String,
    #[serde(deserialize_with = "de::string")]
    pub anime_title: String,
    #[serde(deserialize_with = "de::string")]
    pub anime_slug: String,
    #[serde(deserialize_with = "de::count")]
    pub number: u32,
    #[serde(deserialize_with = "de::opt_string")]
    pub download_url: Option<String>,
    #[serde(deserialize_with = "de::or_default")]
    pub servers: Vec<StreamServer>,
}

/// Resolved stream server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerLink {
    #[serde(deserialize_with = "de::string")]
    pub server_id: String,
    #[serde(deserialize_with = "de::string")]
    pub server_name: String,
    #[serde(deserialize_with = "de::string")]
    pub embed_url: String,
    #[serde(deserialize_with = "de::string")]
    pub direct_url: String,
    #[serde(deserialize_with = "de::string")]
    pub quality: String,
    #[serde(deserialize_with = "de::string")]
    pub size: String,
}

/// Pagination block of the `ApiResponse` envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    #[serde(deserialize_with = "de::page_number")]
    pub current_page: u32,
    #[serde(deserialize_with = "de::page_number")]
    pub total_pages: u32,
    #[serde(deserialize_with = "de::flag")]
    pub has_next_page: bool,
    #[serde(deserialize_with = "de::flag")]
    pub has_prev_page: bool,
    #[serde(deserialize_with = "de::opt_u32")]
    pub next_page: Option<u32>,
    #[serde(deserialize_with = "de::opt_u32")]
    pub prev_page: Option<u32>,
}

impl Default for Pagination {
    /// A single page with no neighbours
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            has_next_page: false,
            has_prev_page: false,
            next_page: None,
            prev_page: None,
        }
    }
}

/// Pagination block of the `PaginatedResponse` envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(deserialize_with = "de::page_number")]
    pub current_page: u32,
    #[serde(deserialize_with = "de::page_number")]
    pub total_pages: u32,
    #[serde(deserialize_with = "de::flag")]
    pub has_next: bool,
    #[serde(deserialize_with = "de::flag")]
    pub has_prev: bool,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            has_next: false,
            has_prev: false,
        }
    }
}

impl From<Pagination> for PageInfo {
    fn from(p: Pagination) -> Self {
        Self {
            current_page: p.current_page,
            total_pages: p.total_pages,
            has_next: p.has_next_page,
            has_prev: p.has_prev_page,
        }
    }
}

/// Standard response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiResponse<T> {
    #[serde(deserialize_with = "de::string")]
    pub creator: String,
    #[serde(deserialize_with = "de::string")]
    pub message: String,
    pub data: T,
    pub pagination: Option<Pagination>,
}

/// Flat paginated list envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct PaginatedResponse<T> {
    #[serde(deserialize_with = "de::or_default")]
    pub data: Vec<T>,
    #[serde(deserialize_with = "de::or_default")]
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimeListData {
    #[serde(deserialize_with = "de::or_default")]
    pub anime_list: Vec<AnimeItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchListData {
    #[serde(deserialize_with = "de::or_default")]
    pub batch_list: Vec<BatchItem>,
}

/// Home page section holding a list of anime
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    default,
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct HomeSection<T> {
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
    #[serde(deserialize_with = "de::or_default")]
    pub anime_list: Vec<T>,
}

/// Home page batch section; entries are forwarded untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchSection {
    #[serde(deserialize_with = "de::string")]
    pub href: String,
    #[serde(deserialize_with = "de::string")]
    pub samehadaku_url: String,
    #[serde(deserialize_with = "de::or_default")]
    pub batch_list: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeData {
    #[serde(deserialize_with = "de::or_default")]
    pub recent: HomeSection<AnimeItem>,
    #[serde(deserialize_with = "de::or_default")]
    pub batch: BatchSection,
    #[serde(deserialize_with = "de::or_default")]
    pub movie: HomeSection<AnimeItem>,
    #[serde(deserialize_with = "de::or_default")]
    pub top10: HomeSection<TopAnimeItem>,
}

/// Release schedule for one weekday
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleDay {
    #[serde(deserialize_with = "de::string")]
    pub day: String,
    #[serde(deserialize_with = "de::or_default")]
    pub anime_list: Vec<AnimeItem>,
}
