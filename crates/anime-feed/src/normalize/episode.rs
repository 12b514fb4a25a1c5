//! Episode watch page.

use super::{data_node, list, opt_text, text};
use crate::api::FetchError;
use crate::slug;
use serde_json::Value;
use shared::{EpisodeDetail, StreamServer};

/// Sample stream used when a server entry carries no URL at all
pub const SAMPLE_STREAM_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// Servers offered when the upstream page lists none
pub fn default_servers() -> Vec<StreamServer> {
    [
        ("Streamtape", SAMPLE_STREAM_URL, "1080p"),
        (
            "Mixdrop",
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4",
            "720p",
        ),
        (
            "Upstream",
            "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4",
            "480p",
        ),
    ]
    .into_iter()
    .map(|(name, url, quality)| StreamServer {
        name: name.to_string(),
        url: url.to_string(),
        quality: quality.to_string(),
    })
    .collect()
}

/// Episode page reconstructed from its slug alone
pub fn episode_from_slug(episode_slug: &str) -> EpisodeDetail {
    let number = slug::episode_number(episode_slug, None);
    let anime_slug = slug::anime_slug(episode_slug);

    EpisodeDetail {
        id: episode_slug.to_string(),
        title: format!("Episode {}", number),
        anime_title: slug::anime_title(&anime_slug, None),
        anime_slug,
        number,
        download_url: None,
        servers: default_servers(),
    }
}

/// Flatten `stream_servers.qualities[].serverList[]`
///
/// Returns `None` when the page has no qualities list, so the caller can
/// substitute the defaults; an empty list stays empty.
fn stream_servers(data: &Value) -> Option<Vec<StreamServer>> {
    let qualities = data.get("stream_servers")?.get("qualities")?.as_array()?;
    let stream_url = opt_text(data, "stream_url").filter(|s| !s.is_empty());

    Some(
        qualities
            .iter()
            .flat_map(|quality| {
                let quality_title = text(quality, "title");
                let stream_url = stream_url.clone();
                list(quality, "serverList").iter().map(move |server| StreamServer {
                    name: text(server, "title"),
                    url: opt_text(server, "url")
                        .filter(|s| !s.is_empty())
                        .or_else(|| stream_url.clone())
                        .unwrap_or_else(|| SAMPLE_STREAM_URL.to_string()),
                    quality: quality_title.clone(),
                })
            })
            .collect(),
    )
}

/// `/anime/episode/{slug}`
pub fn map_episode_detail(body: &Value, episode_slug: &str) -> Result<EpisodeDetail, FetchError> {
    let data = data_node(body)?;
    let upstream_title = opt_text(data, "episode").filter(|s| !s.is_empty());
    let anime_name = data.get("anime").and_then(|anime| opt_text(anime, "title"));

    let number = slug::episode_number(episode_slug, upstream_title.as_deref());
    let anime_slug = slug::anime_slug(episode_slug);

    Ok(EpisodeDetail {
        id: episode_slug.to_string(),
        title: upstream_title.unwrap_or_else(|| format!("Episode {}", number)),
        anime_title: slug::anime_title(&anime_slug, anime_name.as_deref()),
        anime_slug,
        number,
        download_url: opt_text(data, "download_url"),
        servers: stream_servers(data).unwrap_or_else(default_servers),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_episode_detail_populated() {
        let body = json!({
            "data": {
                "episode": "One Piece Episode 1089 Subtitle Indonesia",
                "anime": { "title": "One Piece", "slug": "one-piece" },
                "download_url": "https://dl/op-1089",
                "stream_url": "https://stream/default",
                "stream_servers": {
                    "qualities": [
                        { "title": "720p", "serverList": [
                            { "title": "Vidhide", "url": "https://vid/720" },
                            { "title": "Filedon" }
                        ] },
                        { "title": "1080p", "serverList": [{ "title": "Pixeldrain", "url": "https://pd/1080" }] }
                    ]
                }
            }
        });
        let detail = map_episode_detail(&body, "one-piece-episode-1089-sub-indo").unwrap();
        assert_eq!(detail.id, "one-piece-episode-1089-sub-indo");
        assert_eq!(detail.number, 1089);
        assert_eq!(detail.title, "One Piece Episode 1089 Subtitle Indonesia");
        assert_eq!(detail.anime_title, "One Piece");
        assert_eq!(detail.anime_slug, "one-piece");
        assert_eq!(detail.download_url.as_deref(), Some("https://dl/op-1089"));

        assert_eq!(detail.servers.len(), 3);
        assert_eq!(detail.servers[0].name, "Vidhide");
        assert_eq!(detail.servers[0].quality, "720p");
        assert_eq!(detail.servers[1].url, "https://stream/default");
        assert_eq!(detail.servers[2].quality, "1080p");
    }

    #[test]
    fn test_episode_detail_absent_fields() {
        let detail = map_episode_detail(&json!({ "data": {} }), "bnha-episode-3-sub-indo").unwrap();
        assert_eq!(detail.number, 3);
        assert_eq!(detail.title, "Episode 3");
        assert_eq!(detail.anime_title, "Boku no Hero Academia");
        assert_eq!(detail.anime_slug, "bnha");
        assert_eq!(detail.download_url, None);
        assert_eq!(detail.servers, default_servers());
    }

    #[test]
    fn test_number_from_upstream_title() {
        let body = json!({ "data": { "episode": "Episode 7 Special" } });
        let detail = map_episode_detail(&body, "special-ova").unwrap();
        assert_eq!(detail.number, 7);
        assert_eq!(detail.anime_title, "Special Ova");
    }

    #[test]
    fn test_empty_qualities_stay_empty() {
        let body = json!({ "data": { "stream_servers": { "qualities": [] } } });
        let detail = map_episode_detail(&body, "my-new-show-episode-2").unwrap();
        assert!(detail.servers.is_empty());
        assert_eq!(detail.anime_title, "My New Show");
    }

    #[test]
    fn test_server_without_url_uses_sample() {
        let body = json!({ "data": { "stream_servers": { "qualities": [
            { "title": "480p", "serverList": [{ "title": "Mega" }] },
            { "title": "360p" }
        ] } } });
        let detail = map_episode_detail(&body, "jjk-episode-1-sub-indo").unwrap();
        assert_eq!(detail.servers.len(), 1);
        assert_eq!(detail.servers[0].url, SAMPLE_STREAM_URL);
    }

    #[test]
    fn test_episode_from_slug() {
        let detail = episode_from_slug("my-new-show-episode-2");
        assert_eq!(detail.number, 2);
        assert_eq!(detail.title, "Episode 2");
        assert_eq!(detail.anime_title, "My New Show");
        assert_eq!(detail.servers.len(), 3);
    }
}
