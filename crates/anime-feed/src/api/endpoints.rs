//! Request paths of the upstream listing API.

use std::fmt;

/// Logical upstream resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Home,
    Schedule,
    Ongoing { page: u32 },
    Completed { page: u32 },
    /// Completed listing addressed by path segment, used for movies and batches
    CompletedPage { page: u32 },
    Genres,
    GenreAnime { slug: &'a str, page: u32 },
    Search { query: &'a str, page: u32 },
    AnimeDetail { slug: &'a str },
    EpisodeDetail { slug: &'a str },
    BatchDetail { slug: &'a str },
    Server { id: &'a str },
}

impl Endpoint<'_> {
    /// Path relative to the API base URL
    ///
    /// Slugs are inserted as given; only search queries are percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Home => "/anime/home".to_string(),
            Endpoint::Schedule => "/anime/schedule".to_string(),
            Endpoint::Ongoing { page } => format!("/anime/ongoing-anime?page={}", page),
            Endpoint::Completed { page } => format!("/anime/complete-anime?page={}", page),
            Endpoint::CompletedPage { page } => format!("/anime/complete-anime/{}", page),
            Endpoint::Genres => "/anime/genre".to_string(),
            Endpoint::GenreAnime { slug, page } => format!("/anime/genre/{}?page={}", slug, page),
            Endpoint::Search { query, page } => {
                format!("/anime/search/{}?page={}", urlencoding::encode(query), page)
            }
            Endpoint::AnimeDetail { slug } => format!("/anime/anime/{}", slug),
            Endpoint::EpisodeDetail { slug } => format!("/anime/episode/{}", slug),
            Endpoint::BatchDetail { slug } => format!("/anime/batch/{}", slug),
            Endpoint::Server { id } => format!("/anime/server/{}", id),
        }
    }

    /// Resource name used in log fields
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Home => "home",
            Endpoint::Schedule => "schedule",
            Endpoint::Ongoing { .. } => "ongoing",
            Endpoint::Completed { .. } => "completed",
            Endpoint::CompletedPage { .. } => "completed_page",
            Endpoint::Genres => "genres",
            Endpoint::GenreAnime { .. } => "genre_anime",
            Endpoint::Search { .. } => "search",
            Endpoint::AnimeDetail { .. } => "anime_detail",
            Endpoint::EpisodeDetail { .. } => "episode_detail",
            Endpoint::BatchDetail { .. } => "batch_detail",
            Endpoint::Server { .. } => "server",
        }
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
