//! Error types for decoding and resolving translatable values.

use std::time::Duration;
use thiserror::Error;

/// Failure reported by a [`LanguageCache`](crate::i18n::LanguageCache) backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The backing store could not be reached or is in a broken state.
    #[error("language cache unavailable: {0}")]
    Unavailable(String),

    /// The lookup did not complete in time.
    #[error("language cache lookup timed out after {0:?}")]
    Timeout(Duration),
}

/// A locale tag could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid locale tag '{tag}': {reason}")]
pub struct LocaleError {
    pub tag: String,
    pub reason: String,
}

impl LocaleError {
    pub(crate) fn new(tag: &str, reason: impl Into<String>) -> Self {
        Self {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors produced by the localized value codec.
///
/// None of these are fatal to the process: each one concerns a single field,
/// and the caller decides whether to abort, retry, or display a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The source document does not hold a usable translatable value.
    #[error("malformed translatable at '{path}': {reason}")]
    MalformedInput { path: String, reason: String },

    /// Neither the requested locale nor the fallback has text for the key.
    #[error("no translation for '{key}' in locale '{locale}'")]
    TranslationNotFound { key: String, locale: String },

    /// The language cache failed while looking up the key.
    #[error("language cache unavailable while resolving '{key}' for '{locale}'")]
    CacheUnavailable {
        key: String,
        locale: String,
        #[source]
        source: CacheError,
    },

    /// The template references a placeholder with no parameter and the codec
    /// is configured to fail on that.
    #[error("translation '{key}' references missing parameter '{name}'")]
    MissingParameter { key: String, name: String },
}

impl CodecError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        CodecError::MalformedInput {
            path: if path.is_empty() {
                "$".to_string()
            } else {
                path.to_string()
            },
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_uses_root_marker_for_empty_path() {
        let err = CodecError::malformed("", "key must not be empty");
        assert_eq!(
            err,
            CodecError::MalformedInput {
                path: "$".to_string(),
                reason: "key must not be empty".to_string()
            }
        );
    }

    #[test]
    fn test_malformed_display_names_path() {
        let err = CodecError::malformed("title.key", "key must not be empty");
        assert!(err.to_string().contains("title.key"));
    }

    #[test]
    fn test_cache_unavailable_keeps_source() {
        use std::error::Error as _;

        let err = CodecError::CacheUnavailable {
            key: "a".to_string(),
            locale: "en".to_string(),
            source: CacheError::Timeout(Duration::from_millis(250)),
        };
        let source = err.source().expect("source should be set");
        assert!(source.to_string().contains("timed out"));
    }
}
