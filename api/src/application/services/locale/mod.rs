//! Language negotiation for the web client.
//!
//! Resolution order is the cached user preference first, then the browser's
//! language list. Regional variants collapse to their base language
//! (`es-ES` becomes `es`) and anything unsupported falls back to English.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Key the client uses for the cached language preference.
pub const LANGUAGE_STORAGE_KEY: &str = "choirapp-language";

static LANGUAGE_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(-[a-z0-9]{1,8})*$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    pub const SUPPORTED: [Language; 2] = [Language::En, Language::Es];
    pub const FALLBACK: Language = Language::En;

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
        }
    }

    /// Accepts full tags (`es-MX`, `EN_us`); only the base language matters.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match normalize_language_code(tag)?.as_str() {
            "en" => Some(Language::En),
            "es" => Some(Language::Es),
            _ => None,
        }
    }
}

/// Lowercases, accepts `_` separators and strips the region. `None` for
/// strings that are not language tags at all.
pub fn normalize_language_code(tag: &str) -> Option<String> {
    let cleaned = tag.trim().replace('_', "-").to_lowercase();
    if !LANGUAGE_TAG_RE.is_match(&cleaned) {
        return None;
    }
    cleaned.split('-').next().map(str::to_string)
}

/// Storage for the user's chosen language (browser local storage on the client).
pub trait LanguagePreferenceCache: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str);
}

#[derive(Default)]
pub struct InMemoryPreferenceCache {
    entries: Mutex<HashMap<String, String>>,
}

impl LanguagePreferenceCache for InMemoryPreferenceCache {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

/// Picks the active language and caches the result for the next visit.
pub fn detect_language<C: LanguagePreferenceCache + ?Sized>(
    cache: &C,
    navigator_languages: &[String],
) -> Language {
    let cached = cache.read(LANGUAGE_STORAGE_KEY);
    let language = cached
        .iter()
        .chain(navigator_languages.iter())
        .find_map(|tag| Language::from_tag(tag))
        .unwrap_or(Language::FALLBACK);
    if cached.as_deref() != Some(language.code()) {
        cache.write(LANGUAGE_STORAGE_KEY, language.code());
    }
    tracing::debug!(language = language.code(), "language_detected");
    language
}

/// Turns an `Accept-Language` header into a preference-ordered tag list.
/// Ties keep header order and `q=0` entries are dropped.
pub fn parse_accept_language(header: &str) -> Vec<String> {
    let mut weighted: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() || tag == "*" {
                return None;
            }
            let q = pieces
                .filter_map(|p| p.trim().strip_prefix("q="))
                .find_map(|v| v.trim().parse::<f32>().ok())
                .unwrap_or(1.0);
            (q > 0.0).then(|| (tag.to_string(), q))
        })
        .collect();
    // sort_by is stable
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().map(|(tag, _)| tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn langs(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn regional_spanish_resolves_to_es() {
        let cache = InMemoryPreferenceCache::default();
        assert_eq!(detect_language(&cache, &langs(&["es-ES"])), Language::Es);
        assert_eq!(cache.read(LANGUAGE_STORAGE_KEY).as_deref(), Some("es"));
    }

    #[test]
    fn unsupported_languages_fall_back_to_english() {
        let cache = InMemoryPreferenceCache::default();
        assert_eq!(detect_language(&cache, &langs(&["fr-FR", "de"])), Language::En);
        assert_eq!(detect_language(&cache, &[]), Language::En);
    }

    #[test]
    fn cached_preference_wins_over_navigator() {
        let cache = InMemoryPreferenceCache::default();
        cache.write(LANGUAGE_STORAGE_KEY, "es");
        assert_eq!(detect_language(&cache, &langs(&["en-US"])), Language::Es);
    }

    #[test]
    fn garbage_cache_entry_is_ignored_and_replaced() {
        let cache = InMemoryPreferenceCache::default();
        cache.write(LANGUAGE_STORAGE_KEY, "klingon!!");
        assert_eq!(detect_language(&cache, &langs(&["fr", "es-419"])), Language::Es);
        assert_eq!(cache.read(LANGUAGE_STORAGE_KEY).as_deref(), Some("es"));
    }

    #[test]
    fn normalizes_codes() {
        assert_eq!(normalize_language_code("es-ES").as_deref(), Some("es"));
        assert_eq!(normalize_language_code(" EN_us ").as_deref(), Some("en"));
        assert_eq!(normalize_language_code("pt").as_deref(), Some("pt"));
        assert_eq!(normalize_language_code(""), None);
        assert_eq!(Language::from_tag("ES"), Some(Language::Es));
        assert_eq!(Language::from_tag("fr"), None);
    }

    #[test]
    fn accept_language_orders_by_quality() {
        assert_eq!(
            parse_accept_language("fr;q=0.4, es-ES, en;q=0.8, de;q=0, pt;q=0.8"),
            langs(&["es-ES", "en", "pt", "fr"])
        );
        assert!(parse_accept_language("").is_empty());
        assert_eq!(parse_accept_language("*, en"), langs(&["en"]));
    }

    #[test]
    fn header_feeds_detection() {
        let cache = InMemoryPreferenceCache::default();
        let navigator = parse_accept_language("de-DE, es;q=0.9, en;q=0.8");
        assert_eq!(detect_language(&cache, &navigator), Language::Es);
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Es).unwrap(), "\"es\"");
        assert_eq!(Language::SUPPORTED.map(|l| l.code()), ["en", "es"]);
    }
}
