//! Client for the anime listing API.
//!
//! Every accessor issues a single GET, normalizes the body and, when either
//! step fails, logs the failure and serves the resource's placeholder value.

use super::endpoints::Endpoint;
use super::error::FetchError;
use super::fetched::Fetched;
use crate::fallback;
use crate::normalize::{catalog, detail, episode, listing};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use shared::{
    AnimeDetail, AnimeItem, AnimeListData, ApiConfig, ApiResponse, BatchDetail, BatchListData,
    EpisodeDetail, EpisodeSummary, Genre, HomeData, PaginatedResponse, ScheduleDay, ServerLink,
};
use tracing::{debug, error, warn};

/// Anime listing API client
///
/// Construct one per upstream and pass it to whatever needs data; it holds
/// no state besides the connection pool.
#[derive(Debug, Clone)]
pub struct AnimeApiClient {
    /// HTTP client
    client: Client,
    /// Base URL, without trailing slash
    base_url: String,
}

impl AnimeApiClient {
    /// Create a new client from the `[api]` config section
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET an endpoint and parse the body as JSON
    async fn get_json(&self, endpoint: &Endpoint<'_>) -> Result<Value, FetchError> {
        let path = endpoint.path();
        let url = format!("{}{}", self.base_url, path);

        debug!(url = %url, resource = endpoint.name(), "Making API request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            warn!(
                url = %url,
                status = %status,
                error = %error_text,
                "Request failed"
            );

            return Err(FetchError::Status { status, path });
        }

        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes)?;

        debug!(url = %url, "Request successful");
        Ok(body)
    }

    /// Request, normalize and fall back on any failure
    async fn fetch<T>(
        &self,
        endpoint: Endpoint<'_>,
        map: impl FnOnce(&Value) -> Result<T, FetchError>,
        fallback: impl FnOnce() -> T,
    ) -> Fetched<T> {
        let result = self.get_json(&endpoint).await.and_then(|body| map(&body));

        if let Err(e) = &result {
            error!(
                resource = endpoint.name(),
                path = %endpoint,
                kind = e.kind(),
                error = %e,
                "Failed to fetch resource, serving fallback"
            );
        }

        Fetched::or_fallback(result, fallback)
    }

    /// Fetch the home page sections
    pub async fn home(&self) -> Fetched<HomeData> {
        self.fetch(Endpoint::Home, catalog::map_home, fallback::home)
            .await
    }

    /// Fetch the weekly release schedule
    pub async fn schedule(&self) -> Fetched<Vec<ScheduleDay>> {
        self.fetch(Endpoint::Schedule, catalog::map_schedule, fallback::schedule)
            .await
    }

    /// Fetch a page of currently airing anime
    pub async fn ongoing(&self, page: u32) -> Fetched<ApiResponse<AnimeListData>> {
        self.fetch(
            Endpoint::Ongoing { page },
            listing::map_ongoing,
            fallback::anime_list,
        )
        .await
    }

    /// Latest releases; same listing as [`Self::ongoing`]
    pub async fn latest(&self, page: u32) -> Fetched<ApiResponse<AnimeListData>> {
        self.ongoing(page).await
    }

    /// Fetch a page of finished anime
    pub async fn completed(&self, page: u32) -> Fetched<PaginatedResponse<AnimeItem>> {
        self.fetch(
            Endpoint::Completed { page },
            listing::map_completed,
            fallback::completed,
        )
        .await
    }

    /// Fetch a page of the movie listing
    pub async fn movies(&self, page: u32) -> Fetched<ApiResponse<AnimeListData>> {
        self.fetch(
            Endpoint::CompletedPage { page },
            listing::map_movies,
            fallback::anime_list,
        )
        .await
    }

    /// Fetch a page of batch downloads
    pub async fn batches(&self, page: u32) -> Fetched<ApiResponse<BatchListData>> {
        self.fetch(
            Endpoint::CompletedPage { page },
            listing::map_batches,
            fallback::batch_list,
        )
        .await
    }

    /// Search anime by title
    pub async fn search(&self, query: &str, page: u32) -> Fetched<ApiResponse<AnimeListData>> {
        self.fetch(
            Endpoint::Search { query, page },
            listing::map_search,
            fallback::anime_list,
        )
        .await
    }

    /// Fetch the genre index
    pub async fn genres(&self) -> Fetched<Vec<Genre>> {
        self.fetch(Endpoint::Genres, catalog::map_genres, fallback::genres)
            .await
    }

    /// Fetch a page of anime in one genre
    pub async fn anime_by_genre(&self, genre: &str, page: u32) -> Fetched<ApiResponse<AnimeListData>> {
        self.fetch(
            Endpoint::GenreAnime { slug: genre, page },
            listing::map_genre_anime,
            fallback::anime_list,
        )
        .await
    }

    /// Fetch an anime page
    pub async fn anime_detail(&self, slug: &str) -> Fetched<ApiResponse<AnimeDetail>> {
        self.fetch(
            Endpoint::AnimeDetail { slug },
            |body| detail::map_anime_detail(body, slug),
            fallback::anime_detail,
        )
        .await
    }

    /// Fetch the episode list of an anime
    pub async fn anime_episodes(&self, slug: &str) -> Fetched<Vec<EpisodeSummary>> {
        self.fetch(
            Endpoint::AnimeDetail { slug },
            |body| detail::map_episode_list(body, slug),
            || fallback::anime_episodes(slug),
        )
        .await
    }

    /// Fetch an episode watch page
    pub async fn episode_detail(&self, slug: &str) -> Fetched<EpisodeDetail> {
        self.fetch(
            Endpoint::EpisodeDetail { slug },
            |body| episode::map_episode_detail(body, slug),
            || fallback::episode_detail(slug),
        )
        .await
    }

    /// Fetch a batch download page
    pub async fn batch_detail(&self, slug: &str) -> Fetched<ApiResponse<BatchDetail>> {
        self.fetch(
            Endpoint::BatchDetail { slug },
            detail::map_batch_detail,
            || fallback::batch_detail(slug),
        )
        .await
    }

    /// Resolve a stream server
    pub async fn server_link(&self, server_id: &str) -> Fetched<ApiResponse<ServerLink>> {
        self.fetch(
            Endpoint::Server { id: server_id },
            |body| detail::map_server_link(body, server_id),
            || fallback::server_link(server_id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    type RequestLog = Arc<Mutex<Vec<String>>>;

    /// Serve one canned response to every connection, recording request lines
    async fn stub_upstream(status: u16, body: &'static str) -> (String, RequestLog) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let seen: RequestLog = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let request = String::from_utf8_lossy(&buf[..n]).to_string();
                if let Some(line) = request.lines().next() {
                    log.lock().unwrap().push(line.to_string());
                }

                let response = format!(
                    "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}", addr), seen)
    }

    fn client_for(base_url: &str) -> AnimeApiClient {
        AnimeApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_client_creation() {
        let client = AnimeApiClient::new(&ApiConfig {
            base_url: "https://www.sankavollerei.com/".to_string(),
            ..Default::default()
        });
        assert!(client.is_ok());
        assert_eq!(client.unwrap().base_url(), "https://www.sankavollerei.com");
    }

    #[tokio::test]
    async fn test_ongoing_live() {
        let (base, seen) = stub_upstream(
            200,
            r#"{"creator":"Sanka Vollerei","data":{"ongoingAnimeData":[{"slug":"frieren","title":"Frieren","current_episode":"Episode 12"}],"paginationData":{"current_page":2,"has_next_page":true,"next_page":3}}}"#,
        )
        .await;

        let fetched = client_for(&base).ongoing(2).await;
        assert!(!fetched.is_fallback());

        let response = fetched.into_inner();
        assert_eq!(response.data.anime_list[0].href, "/anime/frieren");
        let pagination = response.pagination.unwrap();
        assert_eq!(pagination.current_page, 2);
        assert!(pagination.has_next_page);
        assert_eq!(pagination.next_page, Some(3));

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["GET /anime/ongoing-anime?page=2 HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn test_server_error_serves_fallback() {
        let (base, _) = stub_upstream(500, r#"{"message":"boom"}"#).await;
        let client = client_for(&base);

        let fetched = client.ongoing(1).await;
        assert!(fetched.is_fallback());
        assert!(matches!(
            fetched.error(),
            Some(FetchError::Status { status, .. }) if status.as_u16() == 500
        ));
        assert_eq!(fetched.into_inner(), fallback::anime_list());

        assert_eq!(client.home().await.into_inner(), fallback::home());
        assert_eq!(client.schedule().await.into_inner(), fallback::schedule());
        assert_eq!(client.latest(1).await.into_inner(), fallback::anime_list());
        assert_eq!(client.completed(1).await.into_inner(), fallback::completed());
        assert_eq!(client.movies(1).await.into_inner(), fallback::anime_list());
        assert_eq!(client.batches(1).await.into_inner(), fallback::batch_list());
        assert_eq!(client.search("frieren", 1).await.into_inner(), fallback::anime_list());
        assert_eq!(client.genres().await.into_inner(), fallback::genres());
        assert_eq!(client.anime_by_genre("action", 1).await.into_inner(), fallback::anime_list());
        assert_eq!(client.anime_detail("x").await.into_inner(), fallback::anime_detail());
        assert_eq!(client.anime_episodes("x").await.into_inner(), fallback::anime_episodes("x"));
        assert_eq!(
            client.episode_detail("x-episode-3-sub-indo").await.into_inner(),
            fallback::episode_detail("x-episode-3-sub-indo")
        );
        assert_eq!(client.batch_detail("b").await.into_inner(), fallback::batch_detail("b"));
        assert_eq!(client.server_link("srv-2").await.into_inner(), fallback::server_link("srv-2"));
    }

    #[tokio::test]
    async fn test_non_list_genres_serve_fallback() {
        let (base, _) = stub_upstream(200, r#"{"data":{"genres":[]}}"#).await;
        let fetched = client_for(&base).genres().await;

        assert_eq!(fetched.error().map(FetchError::kind), Some("shape"));
        assert_eq!(fetched.into_inner(), fallback::genres());
    }

    #[tokio::test]
    async fn test_null_fields_keep_live_search() {
        let (base, _) = stub_upstream(
            200,
            r#"{"data":{"animeList":[{"animeId":"x","title":null}]},"pagination":{"currentPage":"2"}}"#,
        )
        .await;
        let fetched = client_for(&base).search("x", 2).await;

        assert!(!fetched.is_fallback());
        let response = fetched.into_inner();
        assert_eq!(response.data.anime_list[0].anime_id, "x");
        assert_eq!(response.pagination.unwrap().current_page, 2);
    }

    #[tokio::test]
    async fn test_malformed_json_serves_fallback() {
        let (base, _) = stub_upstream(200, "<html>maintenance</html>").await;
        let fetched = client_for(&base).genres().await;

        assert_eq!(fetched.error().map(FetchError::kind), Some("decode"));
        assert_eq!(fetched.value().len(), 8);
    }

    #[tokio::test]
    async fn test_missing_data_serves_fallback() {
        let (base, _) = stub_upstream(200, r#"{"data":null}"#).await;
        let fetched = client_for(&base).server_link("srv-1").await;

        assert_eq!(fetched.error().map(FetchError::kind), Some("shape"));
        assert_eq!(fetched.into_inner(), fallback::server_link("srv-1"));
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(&format!("http://{}", addr));
        let fetched = client.episode_detail("one-piece-episode-1089-sub-indo").await;

        assert_eq!(fetched.error().map(FetchError::kind), Some("transport"));
        let detail = fetched.into_inner();
        assert_eq!(detail.number, 1089);
        assert_eq!(detail.anime_slug, "one-piece");
        assert_eq!(detail.anime_title, "One Piece");
        assert_eq!(detail.servers.len(), 3);

        let episodes = client.anime_episodes("frieren").await;
        assert!(episodes.is_fallback());
        assert_eq!(episodes.value().len(), 12);
    }

    #[tokio::test]
    async fn test_search_path_is_encoded() {
        let (base, seen) = stub_upstream(200, r#"{"data":{"animeList":[]}}"#).await;
        let fetched = client_for(&base).search("spy x family", 2).await;

        assert!(!fetched.is_fallback());
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["GET /anime/search/spy%20x%20family?page=2 HTTP/1.1"]
        );
    }

    #[tokio::test]
    async fn test_movies_and_batches_share_listing() {
        let (base, seen) = stub_upstream(
            200,
            r#"{"data":{"completeAnimeData":[{"slug":"suzume","title":"Suzume","rating":"8.7"}]}}"#,
        )
        .await;
        let client = client_for(&base);

        let movies = client.movies(3).await.into_inner();
        assert_eq!(movies.data.anime_list[0].anime_type.as_deref(), Some("Movie"));

        let batches = client.batches(3).await.into_inner();
        assert_eq!(batches.data.batch_list[0].href, "/batch/suzume");

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["GET /anime/complete-anime/3 HTTP/1.1", "GET /anime/complete-anime/3 HTTP/1.1"]
        );
    }
}
