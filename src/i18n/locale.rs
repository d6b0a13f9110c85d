//! Locale type: validated, normalized language tag.
//!
//! A `Locale` selects which translation variant to resolve. It is supplied by
//! the caller at resolution time (for example the current request's locale)
//! and is never stored on a `Translatable`.

use crate::i18n::error::LocaleError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated language tag such as `en`, `en-US` or `zh-Hant-TW`.
///
/// Tags are normalized on construction so that `en_us`, `EN-us` and `en-US`
/// all compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    /// Normalized tag, subtags joined by `-`
    tag: String,
}

impl Locale {
    /// Parse and normalize a locale tag.
    ///
    /// # Arguments
    /// * `tag` - A tag like `en`, `en-US` or `pt_br`
    ///
    /// # Returns
    /// * `Ok(Locale)` with the normalized tag
    /// * `Err(LocaleError)` if the tag is empty or a subtag is malformed
    ///
    /// # Example
    /// ```
    /// use translatable_codec::i18n::Locale;
    ///
    /// let locale = Locale::parse("pt_br").unwrap();
    /// assert_eq!(locale.as_str(), "pt-BR");
    /// ```
    pub fn parse(tag: &str) -> Result<Locale, LocaleError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(LocaleError::new(tag, "tag is empty"));
        }

        let mut subtags = Vec::new();
        for (index, part) in trimmed.split(['-', '_']).enumerate() {
            if part.is_empty() {
                return Err(LocaleError::new(tag, "empty subtag"));
            }
            subtags.push(normalize_subtag(tag, index, part)?);
        }

        Ok(Locale {
            tag: subtags.join("-"),
        })
    }

    /// The full normalized tag.
    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag (e.g. `en` for `en-US`).
    pub fn language(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }

    /// The language-only locale, if this tag carries more than a language.
    ///
    /// Returns `None` for a bare language such as `en`.
    pub fn base(&self) -> Option<Locale> {
        if self.tag.contains('-') {
            Some(Locale {
                tag: self.language().to_string(),
            })
        } else {
            None
        }
    }
}

fn normalize_subtag(tag: &str, index: usize, part: &str) -> Result<String, LocaleError> {
    let alpha = part.chars().all(|c| c.is_ascii_alphabetic());

    if index == 0 {
        if (2..=3).contains(&part.len()) && alpha {
            return Ok(part.to_ascii_lowercase());
        }
        return Err(LocaleError::new(
            tag,
            format!("language subtag '{}' must be 2-3 letters", part),
        ));
    }

    // Script, e.g. Hant
    if index == 1 && part.len() == 4 && alpha {
        let mut chars = part.chars();
        let first = chars.next().map(|c| c.to_ascii_uppercase());
        return Ok(first
            .into_iter()
            .chain(chars.map(|c| c.to_ascii_lowercase()))
            .collect());
    }

    let digits = part.chars().all(|c| c.is_ascii_digit());
    if (part.len() == 2 && alpha) || (part.len() == 3 && digits) {
        return Ok(part.to_ascii_uppercase());
    }

    if (1..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(part.to_ascii_lowercase());
    }

    Err(LocaleError::new(
        tag,
        format!("subtag '{}' is not 1-8 alphanumerics", part),
    ))
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::parse(s)
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.tag)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Locale::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== parse Tests ====================

    #[test]
    fn test_parse_language_only() {
        let locale = Locale::parse("en").unwrap();
        assert_eq!(locale.as_str(), "en");
        assert_eq!(locale.language(), "en");
    }

    #[test]
    fn test_parse_normalizes_case_and_separator() {
        assert_eq!(Locale::parse("en_us").unwrap().as_str(), "en-US");
        assert_eq!(Locale::parse("EN-us").unwrap().as_str(), "en-US");
        assert_eq!(Locale::parse(" pt-br ").unwrap().as_str(), "pt-BR");
    }

    #[test]
    fn test_parse_script_and_region() {
        let locale = Locale::parse("zh-hant-tw").unwrap();
        assert_eq!(locale.as_str(), "zh-Hant-TW");
        assert_eq!(locale.language(), "zh");
    }

    #[test]
    fn test_parse_numeric_region() {
        assert_eq!(Locale::parse("es-419").unwrap().as_str(), "es-419");
    }

    #[test]
    fn test_parse_variant_is_lowercased() {
        assert_eq!(
            Locale::parse("de-DE-1996").unwrap().as_str(),
            "de-DE-1996"
        );
        assert_eq!(
            Locale::parse("sl-ROZAJ").unwrap().as_str(),
            "sl-rozaj"
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(Locale::parse("").is_err());
        assert!(Locale::parse("   ").is_err());
    }

    #[test]
    fn test_parse_invalid_language() {
        let err = Locale::parse("english").unwrap_err();
        assert!(err.reason.contains("2-3 letters"));
        assert!(Locale::parse("e1").is_err());
    }

    #[test]
    fn test_parse_empty_subtag() {
        assert!(Locale::parse("en--US").is_err());
        assert!(Locale::parse("en-").is_err());
    }

    #[test]
    fn test_parse_overlong_subtag() {
        assert!(Locale::parse("en-abcdefghi").is_err());
    }

    // ==================== base Tests ====================

    #[test]
    fn test_base_of_regional_locale() {
        let locale = Locale::parse("en-GB").unwrap();
        assert_eq!(locale.base(), Some(Locale::parse("en").unwrap()));
    }

    #[test]
    fn test_base_of_language_only_is_none() {
        assert_eq!(Locale::parse("fr").unwrap().base(), None);
    }

    // ==================== Trait Tests ====================

    #[test]
    fn test_from_str_and_display() {
        let locale: Locale = "fr_ca".parse().unwrap();
        assert_eq!(locale.to_string(), "fr-CA");
    }

    #[test]
    fn test_serde_as_string() {
        let locale = Locale::parse("en-US").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"en-US\"");

        let restored: Locale = serde_json::from_str("\"en_us\"").unwrap();
        assert_eq!(restored, locale);
    }

    #[test]
    fn test_deserialize_invalid_tag_fails() {
        let result: Result<Locale, _> = serde_json::from_str("\"not a locale\"");
        assert!(result.is_err());
    }
}
