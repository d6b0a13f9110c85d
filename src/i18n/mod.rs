//! Internationalization (i18n) module: translatable values and their codec.
//!
//! Document fields that hold localizable text decode into `Translatable`
//! handles instead of plain strings. A handle is locale-agnostic; the
//! `LocalizedValueCodec` turns it into text for a given `Locale` by reading a
//! host-owned `LanguageCache`.
//!
//! # Architecture
//!
//! - `translatable`: `TranslationKey` / `Translatable` and their document form
//! - `locale`: validated, normalized locale tags
//! - `cache`: the `LanguageCache` lookup interface and an in-memory backend
//! - `codec`: decode/encode/resolve, fallback and interpolation policies
//! - `template`: placeholder interpolation and validation
//! - `metrics`: resolution counters
//! - `error`: typed errors
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use translatable_codec::i18n::{
//!     CodecOptions, Locale, LocalizedValueCodec, MemoryLanguageCache, Translatable,
//! };
//!
//! let cache = MemoryLanguageCache::from_json_str(
//!     r#"{"en": {"greeting.hello": "Hello, {name}!"}}"#,
//! ).unwrap();
//! let codec = LocalizedValueCodec::new(Arc::new(cache), CodecOptions::default());
//!
//! let title: Translatable = serde_json::from_str(
//!     r#"{"key": "greeting.hello", "params": {"name": "Ana"}}"#,
//! ).unwrap();
//! let en = Locale::parse("en").unwrap();
//! assert_eq!(codec.resolve(&title, &en).unwrap(), "Hello, Ana!");
//! ```

mod cache;
mod codec;
mod error;
mod locale;
mod metrics;
mod template;
mod translatable;

pub use cache::{LanguageCache, MemoryLanguageCache};
pub use codec::{CodecOptions, Fallback, Localized, LocalizedValueCodec};
pub use error::{CacheError, CodecError, LocaleError};
pub use locale::Locale;
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use template::{interpolate, MissingParams, TemplateValidator, ValidationReport};
pub use translatable::{Translatable, TranslationKey};
