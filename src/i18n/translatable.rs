//! Translatable handles and their document representation.
//!
//! A `Translatable` is what a document field decodes to: a translation key plus
//! interpolation parameters. It is locale-agnostic; turning it into text is the
//! job of [`LocalizedValueCodec::resolve`](crate::i18n::LocalizedValueCodec::resolve).
//!
//! Accepted document shapes:
//!
//! ```json
//! "greeting.hello"
//! {"key": "greeting.hello", "params": {"name": "Ana"}}
//! ```

use crate::i18n::error::{CodecError, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

const KEY_FIELD: &str = "key";
const PARAMS_FIELD: &str = "params";

/// Opaque, non-empty identifier of a piece of localizable text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranslationKey(String);

impl TranslationKey {
    /// Create a key, rejecting empty or whitespace-only input.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        Self::at(key.into(), "")
    }

    fn at(key: String, path: &str) -> Result<Self> {
        if key.trim().is_empty() {
            return Err(CodecError::malformed(path, "translation key must not be empty"));
        }
        Ok(TranslationKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TranslationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deferred-resolution handle for localized text.
///
/// Immutable once built. Parameters are kept sorted by name so equality and
/// encoding do not depend on the order they were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Translatable {
    key: TranslationKey,
    params: BTreeMap<String, String>,
}

impl Translatable {
    /// Handle with no parameters.
    pub fn new(key: TranslationKey) -> Self {
        Self {
            key,
            params: BTreeMap::new(),
        }
    }

    /// Handle with interpolation parameters.
    pub fn with_params<I, K, V>(key: TranslationKey, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            key,
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn key(&self) -> &TranslationKey {
        &self.key
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Look up a single parameter value by name.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Decode a document value into a handle.
    ///
    /// `path` is the location of the value in the surrounding document and is
    /// used to name the offending field in `MalformedInput` errors. Pass `""`
    /// for a value at the document root.
    ///
    /// Decoding is pure: no cache is consulted.
    pub fn from_value(value: &Value, path: &str) -> Result<Self> {
        match value {
            Value::String(key) => Ok(Self::new(TranslationKey::at(key.clone(), path)?)),
            Value::Object(fields) => Self::from_object(fields, path),
            other => Err(CodecError::malformed(
                path,
                format!(
                    "expected a string key or an object, found {}",
                    kind_of(other)
                ),
            )),
        }
    }

    fn from_object(fields: &Map<String, Value>, path: &str) -> Result<Self> {
        if let Some(unknown) = fields
            .keys()
            .find(|name| *name != KEY_FIELD && *name != PARAMS_FIELD)
        {
            return Err(CodecError::malformed(
                &join_path(path, unknown),
                "unknown field",
            ));
        }

        let key_path = join_path(path, KEY_FIELD);
        let key = match fields.get(KEY_FIELD) {
            Some(Value::String(key)) => TranslationKey::at(key.clone(), &key_path)?,
            Some(other) => {
                return Err(CodecError::malformed(
                    &key_path,
                    format!("expected a string, found {}", kind_of(other)),
                ))
            }
            None => return Err(CodecError::malformed(&key_path, "missing translation key")),
        };

        let params_path = join_path(path, PARAMS_FIELD);
        let params = match fields.get(PARAMS_FIELD) {
            None | Some(Value::Null) => BTreeMap::new(),
            Some(Value::Object(raw)) => decode_params(raw, &params_path)?,
            Some(other) => {
                return Err(CodecError::malformed(
                    &params_path,
                    format!("expected an object, found {}", kind_of(other)),
                ))
            }
        };

        Ok(Self { key, params })
    }

    /// Encode the handle into its document form.
    ///
    /// A handle without parameters becomes a bare string; otherwise an object
    /// with `key` and `params`. Resolved text is never encoded.
    pub fn to_value(&self) -> Value {
        if self.params.is_empty() {
            return Value::String(self.key.0.clone());
        }

        let params = self
            .params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect::<Map<_, _>>();

        let mut object = Map::new();
        object.insert(KEY_FIELD.to_string(), Value::String(self.key.0.clone()));
        object.insert(PARAMS_FIELD.to_string(), Value::Object(params));
        Value::Object(object)
    }
}

fn decode_params(raw: &Map<String, Value>, path: &str) -> Result<BTreeMap<String, String>> {
    raw.iter()
        .map(|(name, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(CodecError::malformed(
                        &join_path(path, name),
                        format!(
                            "parameter values must be strings, numbers or booleans, found {}",
                            kind_of(other)
                        ),
                    ))
                }
            };
            Ok((name.clone(), text))
        })
        .collect()
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Translatable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.params.is_empty() {
            return serializer.serialize_str(self.key.as_str());
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry(KEY_FIELD, self.key.as_str())?;
        map.serialize_entry(PARAMS_FIELD, &self.params)?;
        map.end()
    }
}

/// Decodes through [`Translatable::from_value`] rooted at the value itself.
///
/// The deserializer does not know where the value sits in the host document,
/// so `MalformedInput` paths are relative to the field (`key`,
/// `params.<name>`). Hosts that need the full document path get it from the
/// deserializer stack, e.g. by wrapping it with `serde_path_to_error`, or call
/// `from_value` with the path themselves.
impl<'de> Deserialize<'de> for Translatable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Translatable::from_value(&value, "").map_err(serde::de::Error::custom)
    }
}
