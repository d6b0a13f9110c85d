//! Resolve a translatable value from the command line.
//!
//! Usage:
//!   cargo run --bin localize -- <locale> <translatable>
//!
//! `<translatable>` is either a bare key (`greeting.hello`) or its JSON form
//! (`'{"key": "greeting.hello", "params": {"name": "Ana"}}'`).
//!
//! Optional environment variables:
//! - LANGUAGE_CACHE_FILE (defaults to data/translations.json)
//! - DEFAULT_LOCALE (defaults to en; used when <locale> is `-`)
//! - LOCALE_FALLBACK (none | base | <locale>, defaults to base)
//! - MISSING_PARAMS (literal | fail, defaults to literal)

use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use translatable_codec::config::Config;
use translatable_codec::i18n::{Locale, LocalizedValueCodec, MemoryLanguageCache};

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translatable_codec=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (locale_arg, raw) = match args.as_slice() {
        [locale, raw] => (locale.as_str(), raw.as_str()),
        _ => bail!("Usage: localize <locale> <translatable>"),
    };

    let config = Config::from_env()?;

    let locale = if locale_arg == "-" {
        config.default_locale.clone()
    } else {
        Locale::parse(locale_arg).context("Invalid locale argument")?
    };

    info!("Loading translation catalog from {}", config.language_cache_file);
    let cache = MemoryLanguageCache::from_json_file(&config.language_cache_file)?;
    let codec = LocalizedValueCodec::new(Arc::new(cache), config.codec_options());

    let value = argument_value(raw);
    let translatable = codec.decode_at(&value, "argument")?;

    let text = codec
        .resolve(&translatable, &locale)
        .with_context(|| format!("Failed to resolve '{}' for {}", translatable.key(), locale))?;
    println!("{}", text);

    debug!("Resolution metrics: {:?}", codec.metrics().report());
    Ok(())
}

/// Document value for a command-line translatable.
///
/// Only arguments that look like a JSON object or string are parsed as JSON;
/// everything else (including `404`, `true` or `null`) is a bare key.
fn argument_value(raw: &str) -> Value {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('"') {
        if let Ok(value) = serde_json::from_str(raw) {
            return value;
        }
    }
    Value::String(raw.to_string())
}
