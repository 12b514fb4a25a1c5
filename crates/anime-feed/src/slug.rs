//! Best-effort heuristics over episode slugs.
//!
//! Episode slugs look like `one-piece-episode-1089-sub-indo`. When the
//! upstream payload lacks an explicit episode number or anime title, both are
//! recovered from the slug.
//!
//! Anime title precedence:
//! 1. title supplied by the upstream payload
//! 2. known short slugs ([`SLUG_TITLES`])
//! 3. the slug itself, hyphens replaced by spaces and words capitalized
//! 4. [`PLACEHOLDER_TITLE`]

use once_cell::sync::Lazy;
use regex::Regex;

/// Title used when nothing can be recovered
pub const PLACEHOLDER_TITLE: &str = "Anime Title";

/// Abbreviated slugs used by the upstream site
pub const SLUG_TITLES: &[(&str, &str)] = &[
    ("khwrs", "Kaoru Hana wa Rin to Saku"),
    ("bnha", "Boku no Hero Academia"),
    ("op", "One Piece"),
    ("aot", "Attack on Titan"),
    ("ds", "Demon Slayer"),
    ("jjk", "Jujutsu Kaisen"),
];

static EPISODE_IN_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-episode-(\d+)(?:-|$)").expect("valid episode regex"));
static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid number regex"));
static EPISODE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-episode-\d+.*$").expect("valid suffix regex"));

/// Episode number from the slug, else from an upstream title, else 1
pub fn episode_number(episode_slug: &str, upstream_title: Option<&str>) -> u32 {
    EPISODE_IN_SLUG
        .captures(episode_slug)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .or_else(|| {
            upstream_title
                .and_then(|title| FIRST_NUMBER.find(title))
                .and_then(|m| m.as_str().parse().ok())
        })
        .unwrap_or(1)
}

/// Strip the `-episode-N...` suffix, leaving the anime part of the slug
pub fn anime_slug(episode_slug: &str) -> String {
    EPISODE_SUFFIX.replace(episode_slug, "").into_owned()
}

pub fn known_title(anime_slug: &str) -> Option<&'static str> {
    SLUG_TITLES
        .iter()
        .find(|(slug, _)| *slug == anime_slug)
        .map(|(_, title)| *title)
}

/// `my-new-show` -> `My New Show`
pub fn title_from_slug(anime_slug: &str) -> String {
    let spaced = anime_slug.replace('-', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut in_word = false;

    for c in spaced.chars() {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !in_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        in_word = is_word;
    }

    out
}

/// Resolve a display title for the anime an episode belongs to
pub fn anime_title(anime_slug: &str, upstream_title: Option<&str>) -> String {
    if let Some(title) = upstream_title.filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    if let Some(title) = known_title(anime_slug) {
        return title.to_string();
    }

    let derived = title_from_slug(anime_slug);
    if derived.is_empty() {
        PLACEHOLDER_TITLE.to_string()
    } else {
        derived
    }
}
