use crate::i18n::{CodecOptions, Fallback, Locale, MissingParams};
use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    // Catalog
    pub language_cache_file: String,

    // Resolution
    pub default_locale: Locale,
    pub fallback: Fallback,
    pub missing_params: MissingParams,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale = std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string());
        let default_locale = Locale::parse(&default_locale).context("Invalid DEFAULT_LOCALE")?;

        Ok(Self {
            // Catalog
            language_cache_file: std::env::var("LANGUAGE_CACHE_FILE")
                .unwrap_or_else(|_| "data/translations.json".to_string()),

            // Resolution
            fallback: parse_fallback(
                &std::env::var("LOCALE_FALLBACK").unwrap_or_else(|_| "base".to_string()),
            )
            .context("Invalid LOCALE_FALLBACK")?,
            missing_params: parse_missing_params(
                &std::env::var("MISSING_PARAMS").unwrap_or_else(|_| "literal".to_string()),
            )
            .context("Invalid MISSING_PARAMS")?,
            default_locale,
        })
    }

    /// Codec options derived from this configuration.
    pub fn codec_options(&self) -> CodecOptions {
        CodecOptions::new()
            .with_fallback(self.fallback.clone())
            .with_missing_params(self.missing_params)
    }
}

/// `none`, `base`, or a locale tag used as the fixed fallback.
fn parse_fallback(value: &str) -> Result<Fallback> {
    match value.trim().to_ascii_lowercase().as_str() {
        "none" | "off" | "" => Ok(Fallback::Disabled),
        "base" => Ok(Fallback::BaseLanguage),
        _ => Ok(Fallback::Locale(Locale::parse(value)?)),
    }
}

fn parse_missing_params(value: &str) -> Result<MissingParams> {
    match value.trim().to_ascii_lowercase().as_str() {
        "literal" => Ok(MissingParams::LeaveLiteral),
        "fail" => Ok(MissingParams::Fail),
        other => bail!("expected 'literal' or 'fail', got '{}'", other),
    }
}
