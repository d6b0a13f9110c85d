//! Language cache: the key + locale -> template store the codec reads from.
//!
//! The cache is owned by the hosting application. The codec only calls
//! [`LanguageCache::lookup`]; population, refresh and eviction are the
//! backend's business. `MemoryLanguageCache` is an in-process backend for
//! hosts without a store of their own, and for tests.

use crate::i18n::error::CacheError;
use crate::i18n::{Locale, TranslationKey};
use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

/// Lookup interface the codec depends on.
///
/// Implementations must be safe to call from many threads at once. A lookup
/// that cannot reach its backing store (including timeouts) returns
/// `Err(CacheError)`; a key with no text for the locale returns `Ok(None)`.
pub trait LanguageCache: Send + Sync {
    fn lookup(&self, key: &TranslationKey, locale: &Locale) -> Result<Option<String>, CacheError>;
}

/// Thread-safe in-memory language cache.
#[derive(Debug, Default)]
pub struct MemoryLanguageCache {
    entries: RwLock<HashMap<Locale, HashMap<String, String>>>,
}

impl MemoryLanguageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from JSON text.
    ///
    /// Expected shape: `{"<locale>": {"<key>": "<template>", ...}, ...}`.
    /// Two sections whose tags normalize to the same locale (`en_us` and
    /// `en-US`) are rejected.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let catalog: BTreeMap<String, BTreeMap<String, String>> =
            serde_json::from_str(json).context("Failed to parse translation catalog")?;

        let cache = Self::new();
        let mut sections: HashMap<Locale, String> = HashMap::new();
        for (tag, messages) in catalog {
            let locale = Locale::parse(&tag)
                .with_context(|| format!("Invalid locale '{}' in translation catalog", tag))?;
            if let Some(previous) = sections.insert(locale.clone(), tag.clone()) {
                bail!(
                    "Catalog sections '{}' and '{}' are both locale '{}'",
                    previous,
                    tag,
                    locale
                );
            }
            for (key, text) in messages {
                let key = TranslationKey::new(key)
                    .with_context(|| format!("Invalid key in catalog for locale '{}'", tag))?;
                cache.insert(locale.clone(), key, text)?;
            }
        }

        debug!("Loaded translation catalog with {} entries", cache.len());
        Ok(cache)
    }

    /// Load a catalog from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read translation catalog {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load translation catalog {}", path.display()))
    }

    /// Insert or replace the template for a key in a locale.
    pub fn insert(
        &self,
        locale: Locale,
        key: TranslationKey,
        text: impl Into<String>,
    ) -> Result<(), CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries
            .entry(locale)
            .or_default()
            .insert(key.as_str().to_string(), text.into());
        Ok(())
    }

    /// Remove a key from a locale, returning the old template if present.
    pub fn remove(
        &self,
        locale: &Locale,
        key: &TranslationKey,
    ) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let Some(messages) = entries.get_mut(locale) else {
            return Ok(None);
        };
        let removed = messages.remove(key.as_str());
        if messages.is_empty() {
            entries.remove(locale);
        }
        Ok(removed)
    }

    /// Number of (locale, key) entries. A poisoned cache reports zero.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|e| e.values().map(HashMap::len).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> CacheError {
    CacheError::Unavailable("cache lock poisoned".to_string())
}

impl LanguageCache for MemoryLanguageCache {
    fn lookup(&self, key: &TranslationKey, locale: &Locale) -> Result<Option<String>, CacheError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .get(locale)
            .and_then(|messages| messages.get(key.as_str()))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Arc;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn key(s: &str) -> TranslationKey {
        TranslationKey::new(s).unwrap()
    }

    #[test]
    fn test_insert_and_lookup() {
        let cache = MemoryLanguageCache::new();
        cache.insert(locale("en"), key("a"), "A").unwrap();

        assert_eq!(
            cache.lookup(&key("a"), &locale("en")).unwrap(),
            Some("A".to_string())
        );
        assert_eq!(cache.lookup(&key("a"), &locale("fr")).unwrap(), None);
        assert_eq!(cache.lookup(&key("b"), &locale("en")).unwrap(), None);
    }

    #[test]
    fn test_insert_replaces() {
        let cache = MemoryLanguageCache::new();
        cache.insert(locale("en"), key("a"), "old").unwrap();
        cache.insert(locale("en"), key("a"), "new").unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.lookup(&key("a"), &locale("en")).unwrap().as_deref(),
            Some("new")
        );
    }

    #[test]
    fn test_remove() {
        let cache = MemoryLanguageCache::new();
        cache.insert(locale("en"), key("a"), "A").unwrap();

        assert_eq!(
            cache.remove(&locale("en"), &key("a")).unwrap(),
            Some("A".to_string())
        );
        assert!(cache.is_empty());
        assert_eq!(cache.remove(&locale("en"), &key("a")).unwrap(), None);
    }

    #[test]
    fn test_lookup_uses_normalized_locale() {
        let cache = MemoryLanguageCache::new();
        cache.insert(locale("en_us"), key("a"), "A").unwrap();
        assert!(cache.lookup(&key("a"), &locale("EN-US")).unwrap().is_some());
    }

    #[test]
    fn test_from_json_str() {
        let cache = MemoryLanguageCache::from_json_str(
            r#"{"en": {"greeting.hello": "Hello, {name}!"}, "es": {"greeting.hello": "¡Hola, {name}!"}}"#,
        )
        .unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(
            cache
                .lookup(&key("greeting.hello"), &locale("es"))
                .unwrap()
                .as_deref(),
            Some("¡Hola, {name}!")
        );
    }

    #[test]
    fn test_from_json_str_rejects_bad_locale() {
        let err = MemoryLanguageCache::from_json_str(r#"{"english": {"a": "A"}}"#).unwrap_err();
        assert!(err.to_string().contains("english"));
    }

    #[test]
    fn test_from_json_str_rejects_merged_locale_sections() {
        let err = MemoryLanguageCache::from_json_str(
            r#"{"en-US": {"a": "first"}, "en_us": {"a": "second"}}"#,
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("en-US"));
        assert!(message.contains("en_us"));
    }

    #[test]
    fn test_remove_last_key_empties_locale() {
        let cache = MemoryLanguageCache::new();
        cache.insert(locale("en"), key("a"), "A").unwrap();
        cache.insert(locale("es"), key("a"), "Á").unwrap();

        cache.remove(&locale("en"), &key("a")).unwrap();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.remove(&locale("fr"), &key("a")).unwrap(), None);
        assert_eq!(
            cache.lookup(&key("a"), &locale("es")).unwrap().as_deref(),
            Some("Á")
        );
    }

    #[test]
    fn test_from_json_str_rejects_empty_key() {
        assert!(MemoryLanguageCache::from_json_str(r#"{"en": {"": "A"}}"#).is_err());
    }

    #[test]
    fn test_from_json_str_rejects_malformed() {
        assert!(MemoryLanguageCache::from_json_str(r#"{"en": ["a"]}"#).is_err());
        assert!(MemoryLanguageCache::from_json_str("not json").is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"fr": {{"a": "Bonjour"}}}}"#).unwrap();

        let cache = MemoryLanguageCache::from_json_file(file.path()).unwrap();
        assert_eq!(
            cache.lookup(&key("a"), &locale("fr")).unwrap().as_deref(),
            Some("Bonjour")
        );
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = MemoryLanguageCache::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn test_poisoned_lock_reports_unavailable() {
        let cache = Arc::new(MemoryLanguageCache::new());
        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        let err = cache.lookup(&key("a"), &locale("en")).unwrap_err();
        assert!(matches!(err, CacheError::Unavailable(_)));
    }
}
