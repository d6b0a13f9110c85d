//! Localized value codec: decode, encode and resolve translatable values.
//!
//! Decoding and encoding are pure and never touch the cache. Resolution is a
//! read-time operation: it looks the key up under the requested locale, tries
//! the configured fallback once, and interpolates parameters into the result.

use crate::i18n::error::{CacheError, CodecError, Result};
use crate::i18n::template::{interpolate, MissingParams, TemplateValidator};
use crate::i18n::{LanguageCache, Locale, ResolutionMetrics, Translatable, TranslationKey};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Where to look when the requested locale has no text for a key.
///
/// Only one fallback step is ever taken.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Fallback {
    /// Query the requested locale only
    #[default]
    Disabled,
    /// Query the language without its region/script (`en-US` -> `en`)
    BaseLanguage,
    /// Query a fixed default locale
    Locale(Locale),
}

impl Fallback {
    /// The locale to query after `requested` misses, if any.
    pub fn target(&self, requested: &Locale) -> Option<Locale> {
        match self {
            Fallback::Disabled => None,
            Fallback::BaseLanguage => requested.base(),
            Fallback::Locale(default) if default != requested => Some(default.clone()),
            Fallback::Locale(_) => None,
        }
    }
}

/// Configuration points of the codec.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodecOptions {
    pub fallback: Fallback,
    pub missing_params: MissingParams,
}

impl CodecOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback policy
    pub fn with_fallback(mut self, fallback: Fallback) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the policy for placeholders without a parameter
    pub fn with_missing_params(mut self, policy: MissingParams) -> Self {
        self.missing_params = policy;
        self
    }
}

/// Decodes document fields into `Translatable` handles and resolves handles
/// to text through a language cache.
///
/// Cheap to clone; clones share the cache and the metrics counters. The codec
/// holds no mutable state of its own and can be shared across threads.
#[derive(Clone)]
pub struct LocalizedValueCodec {
    cache: Arc<dyn LanguageCache>,
    options: CodecOptions,
    metrics: Arc<ResolutionMetrics>,
}

impl fmt::Debug for LocalizedValueCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizedValueCodec")
            .field("options", &self.options)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl LocalizedValueCodec {
    /// Create a codec over a host-owned language cache.
    pub fn new(cache: Arc<dyn LanguageCache>, options: CodecOptions) -> Self {
        Self {
            cache,
            options,
            metrics: Arc::new(ResolutionMetrics::new()),
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn metrics(&self) -> &ResolutionMetrics {
        &self.metrics
    }

    /// Decode a value found at the document root.
    pub fn decode(&self, value: &Value) -> Result<Translatable> {
        self.decode_at(value, "")
    }

    /// Decode a value found at `path` in the surrounding document.
    ///
    /// Fails with `MalformedInput` naming the offending field. The cache is not
    /// consulted.
    pub fn decode_at(&self, value: &Value, path: &str) -> Result<Translatable> {
        Translatable::from_value(value, path).inspect_err(|e| debug!("Decode failed: {}", e))
    }

    /// Encode a handle into its document form (key and params, never text).
    pub fn encode(&self, value: &Translatable) -> Value {
        value.to_value()
    }

    /// Resolve a handle to text in `locale`.
    ///
    /// Looks up the exact locale first, then the fallback locale if one is
    /// configured. Placeholders are filled from the handle's parameters.
    ///
    /// # Errors
    /// * `TranslationNotFound` when neither lookup has text
    /// * `CacheUnavailable` when the cache fails; no retry is attempted
    /// * `MissingParameter` when a placeholder has no parameter and the codec
    ///   is configured with [`MissingParams::Fail`]
    pub fn resolve(&self, value: &Translatable, locale: &Locale) -> Result<String> {
        let key = value.key();

        let template = match self.lookup(key, locale)? {
            Some(text) => {
                self.metrics.record_exact_hit();
                text
            }
            None => match self.options.fallback.target(locale) {
                Some(fallback) => match self.lookup(key, &fallback)? {
                    Some(text) => {
                        debug!("'{}' missing in {}, using {}", key, locale, fallback);
                        self.metrics.record_fallback_hit();
                        text
                    }
                    None => return Err(self.not_found(key, locale)),
                },
                None => return Err(self.not_found(key, locale)),
            },
        };

        let report = TemplateValidator::validate(&template, value.params());
        if !report.is_clean() {
            debug!(
                "Template for '{}' ({}): errors {:?}, warnings {:?}",
                key, locale, report.errors, report.warnings
            );
        }

        interpolate(&template, value.params(), self.options.missing_params).map_err(|name| {
            CodecError::MissingParameter {
                key: key.to_string(),
                name,
            }
        })
    }

    /// Resolve a handle, falling back to its raw key on any error.
    ///
    /// For display paths that prefer showing the key over failing.
    pub fn resolve_or_key(&self, value: &Translatable, locale: &Locale) -> String {
        self.resolve(value, locale).unwrap_or_else(|e| {
            warn!("Displaying raw key: {}", e);
            value.key().to_string()
        })
    }

    /// View of a handle that serializes as its text in `locale`.
    ///
    /// Resolution happens when the view is serialized; resolve errors surface
    /// as serializer errors.
    pub fn localized<'a>(&'a self, value: &'a Translatable, locale: &'a Locale) -> Localized<'a> {
        Localized {
            codec: self,
            value,
            locale,
        }
    }

    fn lookup(&self, key: &TranslationKey, locale: &Locale) -> Result<Option<String>> {
        self.cache.lookup(key, locale).map_err(|source: CacheError| {
            warn!("Language cache lookup of '{}' ({}) failed: {}", key, locale, source);
            self.metrics.record_cache_failure();
            CodecError::CacheUnavailable {
                key: key.to_string(),
                locale: locale.to_string(),
                source,
            }
        })
    }

    fn not_found(&self, key: &TranslationKey, locale: &Locale) -> CodecError {
        self.metrics.record_miss();
        CodecError::TranslationNotFound {
            key: key.to_string(),
            locale: locale.to_string(),
        }
    }
}

/// A translatable bound to an output locale; serializes as resolved text.
#[derive(Debug, Clone, Copy)]
pub struct Localized<'a> {
    codec: &'a LocalizedValueCodec,
    value: &'a Translatable,
    locale: &'a Locale,
}

impl Localized<'_> {
    pub fn resolve(&self) -> Result<String> {
        self.codec.resolve(self.value, self.locale)
    }
}

impl Serialize for Localized<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.resolve() {
            Ok(text) => serializer.serialize_str(&text),
            Err(e) => Err(serde::ser::Error::custom(e)),
        }
    }
}
