//! Template interpolation and validation.
//!
//! Templates carry named placeholders written as `{name}`. Interpolation
//! substitutes each placeholder with the matching parameter of a
//! `Translatable`; validation compares the placeholders a template declares
//! against the parameters supplied for it.

use regex::{Captures, Regex};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// What to do when a template references a placeholder with no parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingParams {
    /// Leave `{name}` in the output as written
    #[default]
    LeaveLiteral,
    /// Fail resolution with `MissingParameter`
    Fail,
}

/// Validation report for a template and its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Placeholders with no parameter to fill them
    pub errors: Vec<String>,

    /// Parameters that no placeholder uses
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for template/parameter agreement.
pub struct TemplateValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_.\-]*)\}").unwrap()
    })
}

impl TemplateValidator {
    /// Validate that every placeholder in `template` has a parameter and every
    /// parameter is used.
    ///
    /// # Arguments
    /// * `template` - Template text as stored in the language cache
    /// * `params` - Parameters of the translatable being resolved
    ///
    /// # Returns
    /// A `ValidationReport`: missing parameters are errors, unused ones warnings.
    pub fn validate(template: &str, params: &BTreeMap<String, String>) -> ValidationReport {
        let mut report = ValidationReport::new();
        let placeholders = Self::extract_placeholders(template);

        for name in &placeholders {
            if !params.contains_key(name) {
                report
                    .errors
                    .push(format!("Placeholder {{{}}} has no parameter", name));
            }
        }

        for name in params.keys() {
            if !placeholders.contains(name) {
                report
                    .warnings
                    .push(format!("Parameter '{}' is not used by the template", name));
            }
        }

        report
    }

    /// Extract the distinct placeholder names in a template.
    pub fn extract_placeholders(template: &str) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(template)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

/// Substitute `{name}` placeholders with parameter values.
///
/// Returns `Err(name)` with the first unfilled placeholder when `policy` is
/// [`MissingParams::Fail`]. Text that does not look like a placeholder
/// (`{}`, `{ name }`, `{1st}`) is copied through untouched, and substituted
/// values are never scanned again.
pub fn interpolate(
    template: &str,
    params: &BTreeMap<String, String>,
    policy: MissingParams,
) -> Result<String, String> {
    let regex = placeholder_regex();

    if policy == MissingParams::Fail {
        if let Some(missing) = regex
            .captures_iter(template)
            .filter_map(|caps| caps.get(1))
            .find(|name| !params.contains_key(name.as_str()))
        {
            return Err(missing.as_str().to_string());
        }
    }

    let rendered = regex.replace_all(template, |caps: &Captures<'_>| {
        let name = caps.get(1).map_or("", |m| m.as_str());
        match params.get(name) {
            Some(value) => value.clone(),
            None => caps.get(0).map_or("", |m| m.as_str()).to_string(),
        }
    });

    Ok(rendered.into_owned())
}
