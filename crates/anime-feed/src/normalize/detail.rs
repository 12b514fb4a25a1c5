//! Anime, batch and server detail pages, plus the per-anime episode list.

use super::{creator, data_node, genres, list, opt_text, text, text_or};
use crate::api::FetchError;
use serde::Deserialize;
use serde_json::Value;
use shared::de::leading_u32;
use shared::{
    AnimeDetail, ApiResponse, BatchDetail, BatchLink, EpisodeLink, EpisodeSummary, Score,
    ServerLink, Synopsis,
};

/// Detail resources carry no pagination
fn detail_envelope<T>(body: &Value, data: T) -> ApiResponse<T> {
    ApiResponse {
        creator: creator(body),
        message: String::new(),
        data,
        pagination: None,
    }
}

/// `/anime/anime/{slug}`
pub fn map_anime_detail(body: &Value, anime_slug: &str) -> Result<ApiResponse<AnimeDetail>, FetchError> {
    let data = data_node(body)?;
    let release_date = text_or(data, "release_date", "Unknown");

    let synopsis = opt_text(data, "synopsis")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "No synopsis available".to_string());

    let batch_list = match data.get("batch") {
        Some(batch) if !batch.is_null() => vec![BatchLink {
            title: text_or(batch, "title", "Batch Download"),
            batch_id: format!("{}-batch", anime_slug),
            href: format!("/batch/{}", anime_slug),
            samehadaku_url: "#".to_string(),
        }],
        _ => Vec::new(),
    };

    let episode_list = list(data, "episode_lists")
        .iter()
        .map(|ep| {
            let slug = text(ep, "slug");
            EpisodeLink {
                title: text(ep, "episode_number"),
                href: format!("/episode/{}", slug),
                episode_id: slug,
                samehadaku_url: text(ep, "otakudesu_url"),
            }
        })
        .collect();

    let detail = AnimeDetail {
        title: text(data, "title"),
        poster: text(data, "poster"),
        score: Score {
            value: text_or(data, "rating", "0"),
            users: "0".to_string(),
        },
        japanese: text(data, "japanese_title"),
        synonyms: String::new(),
        english: text(data, "title"),
        status: text_or(data, "status", "Unknown"),
        anime_type: text_or(data, "type", "TV"),
        source: "Unknown".to_string(),
        duration: text_or(data, "duration", "24 min"),
        episodes: Some(data.get("episode_count").and_then(leading_u32).unwrap_or(0)),
        season: release_date.clone(),
        studios: text_or(data, "studio", "Unknown"),
        producers: text_or(data, "produser", "Unknown"),
        aired: release_date,
        trailer: String::new(),
        synopsis: Synopsis::single(synopsis),
        genre_list: genres(data, "genres"),
        batch_list,
        episode_list,
    };

    Ok(detail_envelope(body, detail))
}

/// `/anime/batch/{slug}`: the payload already uses the produced schema
pub fn map_batch_detail(body: &Value) -> Result<ApiResponse<BatchDetail>, FetchError> {
    let data = data_node(body)?;
    let detail = BatchDetail::deserialize(data)?;
    Ok(ApiResponse {
        message: text(body, "message"),
        ..detail_envelope(body, detail)
    })
}

/// Episode list of an anime, numbered from 1 in upstream order
///
/// Missing slugs and titles are synthesized from the anime slug and the
/// position in the list.
pub fn map_episode_list(body: &Value, anime_slug: &str) -> Result<Vec<EpisodeSummary>, FetchError> {
    let data = data_node(body)?;
    let entries = match list(data, "episode_list") {
        [] => list(data, "episode_lists"),
        entries => entries,
    };

    Ok(entries
        .iter()
        .zip(1u32..)
        .map(|(ep, number)| EpisodeSummary {
            slug: opt_text(ep, "slug")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| generated_episode_slug(anime_slug, number)),
            title: opt_text(ep, "title")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("Episode {}", number)),
            number,
            download_url: opt_text(ep, "download_url"),
        })
        .collect())
}

/// Conventional slug of an episode page
pub fn generated_episode_slug(anime_slug: &str, number: u32) -> String {
    format!("{}-episode-{}-sub-indo", anime_slug, number)
}

/// `/anime/server/{id}`
pub fn map_server_link(body: &Value, server_id: &str) -> Result<ApiResponse<ServerLink>, FetchError> {
    let data = data_node(body)?;
    let pick = |keys: &[&str]| {
        keys.iter()
            .find_map(|key| opt_text(data, key).filter(|s| !s.is_empty()))
            .unwrap_or_default()
    };

    let link = ServerLink {
        server_id: opt_text(data, "serverId")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| server_id.to_string()),
        server_name: pick(&["serverName", "title"]),
        embed_url: pick(&["embedUrl", "url"]),
        direct_url: pick(&["directUrl"]),
        quality: pick(&["quality"]),
        size: pick(&["size"]),
    };

    Ok(detail_envelope(body, link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn detail_body() -> Value {
        json!({
            "creator": "Sanka Vollerei",
            "data": {
                "title": "Sousou no Frieren",
                "japanese_title": "葬送のフリーレン",
                "poster": "f.jpg",
                "rating": "9.3",
                "produser": "Aniplex",
                "type": "TV",
                "status": "Completed",
                "episode_count": "28",
                "duration": "24 Menit",
                "release_date": "Sep 29, 2023",
                "studio": "Madhouse",
                "genres": [{ "name": "Fantasy", "slug": "fantasy", "otakudesu_url": "g" }],
                "synopsis": "An elf mage outlives her party.",
                "batch": { "title": "Frieren Batch", "slug": "frieren-batch" },
                "episode_lists": [
                    { "episode": "Frieren Episode 1", "episode_number": 1, "slug": "frieren-episode-1-sub-indo", "otakudesu_url": "e1" }
                ]
            }
        })
    }

    #[test]
    fn test_anime_detail_populated() {
        let response = map_anime_detail(&detail_body(), "frieren").unwrap();
        assert_eq!(response.creator, "Sanka Vollerei");
        assert!(response.pagination.is_none());

        let detail = response.data;
        assert_eq!(detail.title, "Sousou no Frieren");
        assert_eq!(detail.english, "Sousou no Frieren");
        assert_eq!(detail.japanese, "葬送のフリーレン");
        assert_eq!(detail.score, Score { value: "9.3".into(), users: "0".into() });
        assert_eq!(detail.status, "Completed");
        assert_eq!(detail.duration, "24 Menit");
        assert_eq!(detail.episodes, Some(28));
        assert_eq!(detail.season, "Sep 29, 2023");
        assert_eq!(detail.aired, "Sep 29, 2023");
        assert_eq!(detail.studios, "Madhouse");
        assert_eq!(detail.producers, "Aniplex");
        assert_eq!(detail.synopsis.paragraphs, vec!["An elf mage outlives her party."]);
        assert_eq!(detail.genre_list[0].href, "/genres/fantasy");

        assert_eq!(detail.batch_list.len(), 1);
        assert_eq!(detail.batch_list[0].title, "Frieren Batch");
        assert_eq!(detail.batch_list[0].batch_id, "frieren-batch");
        assert_eq!(detail.batch_list[0].href, "/batch/frieren");

        let ep = &detail.episode_list[0];
        assert_eq!(ep.title, "1");
        assert_eq!(ep.episode_id, "frieren-episode-1-sub-indo");
        assert_eq!(ep.href, "/episode/frieren-episode-1-sub-indo");
        assert_eq!(ep.samehadaku_url, "e1");
    }

    #[test]
    fn test_anime_detail_defaults() {
        let detail = map_anime_detail(&json!({ "data": {} }), "x").unwrap().data;
        assert_eq!(detail.title, "");
        assert_eq!(detail.score.value, "0");
        assert_eq!(detail.japanese, "");
        assert_eq!(detail.status, "Unknown");
        assert_eq!(detail.anime_type, "TV");
        assert_eq!(detail.source, "Unknown");
        assert_eq!(detail.duration, "24 min");
        assert_eq!(detail.episodes, Some(0));
        assert_eq!(detail.season, "Unknown");
        assert_eq!(detail.studios, "Unknown");
        assert_eq!(detail.synopsis.paragraphs, vec!["No synopsis available"]);
        assert!(detail.genre_list.is_empty());
        assert!(detail.batch_list.is_empty());
        assert!(detail.episode_list.is_empty());
    }

    #[test]
    fn test_anime_detail_requires_data() {
        assert!(map_anime_detail(&json!({ "data": null }), "x").is_err());
    }

    #[test]
    fn test_batch_detail_passthrough() {
        let body = json!({
            "creator": "Sanka Vollerei",
            "message": "",
            "data": {
                "title": "Bocchi the Rock!",
                "animeId": "bocchi",
                "score": 8.8,
                "episodes": "12",
                "downloadUrl": {
                    "formats": [{
                        "title": "MKV",
                        "qualities": [{ "title": "1080p", "urls": [{ "title": "Pixeldrain", "url": "https://pd/b" }] }]
                    }]
                }
            }
        });
        let detail = map_batch_detail(&body).unwrap().data;
        assert_eq!(detail.anime_id, "bocchi");
        assert_eq!(detail.score, "8.8");
        assert_eq!(detail.episodes, Some(12));
        assert_eq!(detail.download_url.link_count(), 1);
        assert_eq!(detail.download_url.formats[0].qualities[0].urls[0].url, "https://pd/b");
        assert!(detail.recommended_anime_list.is_empty());
        assert_eq!(detail.synopsis, Synopsis::default());
    }

    #[test]
    fn test_batch_detail_tolerates_nulls() {
        let body = json!({
            "creator": null,
            "data": {
                "title": "Bocchi the Rock!",
                "genreList": null,
                "synopsis": { "paragraphs": null, "connections": [{ "title": null }] },
                "downloadUrl": null,
                "recommendedAnimeList": [{ "animeId": "kon", "score": null, "totalEpisodes": "13" }]
            }
        });
        let response = map_batch_detail(&body).unwrap();
        assert_eq!(response.creator, "");

        let detail = response.data;
        assert_eq!(detail.title, "Bocchi the Rock!");
        assert!(detail.genre_list.is_empty());
        assert!(detail.synopsis.paragraphs.is_empty());
        assert_eq!(detail.synopsis.connections[0].title, "");
        assert_eq!(detail.download_url.link_count(), 0);
        assert_eq!(detail.recommended_anime_list[0].score, None);
        assert_eq!(detail.recommended_anime_list[0].total_episodes, Some(13));
    }

    #[test]
    fn test_episode_list() {
        let body = json!({
            "data": {
                "episode_list": [
                    { "slug": "jjk-episode-1-sub-indo", "title": "Ryomen Sukuna", "download_url": "d1" },
                    {}
                ]
            }
        });
        let episodes = map_episode_list(&body, "jjk").unwrap();
        assert_eq!(episodes[0].number, 1);
        assert_eq!(episodes[0].title, "Ryomen Sukuna");
        assert_eq!(episodes[0].download_url.as_deref(), Some("d1"));
        assert_eq!(episodes[1].slug, "jjk-episode-2-sub-indo");
        assert_eq!(episodes[1].title, "Episode 2");
        assert_eq!(episodes[1].download_url, None);
    }

    #[test]
    fn test_episode_list_reads_detail_key() {
        let episodes = map_episode_list(&detail_body(), "frieren").unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].slug, "frieren-episode-1-sub-indo");
    }

    #[test]
    fn test_server_link() {
        let body = json!({ "data": { "title": "Pixeldrain", "url": "https://embed/1", "quality": "720p" } });
        let link = map_server_link(&body, "srv-1").unwrap().data;
        assert_eq!(link.server_id, "srv-1");
        assert_eq!(link.server_name, "Pixeldrain");
        assert_eq!(link.embed_url, "https://embed/1");
        assert_eq!(link.direct_url, "");
        assert_eq!(link.quality, "720p");
        assert_eq!(link.size, "");
    }
}
