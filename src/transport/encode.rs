use serde_json::Value;

use crate::domain::{Encoding, KeyTransform, Params};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("parameter `{key}` is a nested object, which form encoding cannot express")]
    NestedObject { key: String },

    #[error("parameter `{key}` is an array containing non-scalar values")]
    NestedArray { key: String },

    #[error("parameter `{key}` is null")]
    Null { key: String },

    #[error("parameters must serialize to a JSON object, got {kind}")]
    NotAnObject { kind: &'static str },

    #[error("failed to serialize parameters: {0}")]
    Serialize(String),
}

/// Turn any serializable value into request parameters.
///
/// `null` (and `()`) become an empty map so parameterless calls need no special case.
pub fn to_params<P: serde::Serialize + ?Sized>(params: &P) -> Result<Params, EncodingError> {
    match serde_json::to_value(params).map_err(|err| EncodingError::Serialize(err.to_string()))? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Params::new()),
        other => Err(EncodingError::NotAnObject {
            kind: value_kind(&other),
        }),
    }
}

/// Rewrite top-level keys. The input map is left untouched.
pub fn transform_keys(params: &Params, transform: KeyTransform) -> Params {
    params
        .iter()
        .map(|(key, value)| (transform_key(key, transform), value.clone()))
        .collect()
}

fn transform_key(key: &str, transform: KeyTransform) -> String {
    match transform {
        KeyTransform::Identity => key.to_owned(),
        KeyTransform::UnderscoreToHyphen => key.replace('_', "-"),
        KeyTransform::UnderscoreToCamel => {
            let mut out = String::with_capacity(key.len());
            let mut upper_next = false;
            for c in key.chars() {
                if c == '_' && !out.is_empty() {
                    upper_next = true;
                } else if upper_next {
                    out.extend(c.to_uppercase());
                    upper_next = false;
                } else {
                    out.push(c);
                }
            }
            out
        }
    }
}

/// Flatten parameters into ordered `(key, value)` pairs for a query string or
/// form body. Arrays of scalars repeat the key once per element.
pub fn form_pairs(
    params: &Params,
    transform: KeyTransform,
) -> Result<Vec<(String, String)>, EncodingError> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        let key = transform_key(key, transform);
        match value {
            Value::Array(items) => {
                for item in items {
                    let text = scalar_text(item).ok_or_else(|| EncodingError::NestedArray {
                        key: key.clone(),
                    })?;
                    pairs.push((key.clone(), text));
                }
            }
            Value::Object(_) => return Err(EncodingError::NestedObject { key }),
            Value::Null => return Err(EncodingError::Null { key }),
            scalar => {
                if let Some(text) = scalar_text(scalar) {
                    pairs.push((key, text));
                }
            }
        }
    }
    Ok(pairs)
}

/// Encode parameters as an `application/x-www-form-urlencoded` string or a JSON
/// object, depending on `encoding`.
pub fn encode(
    params: &Params,
    encoding: Encoding,
    transform: KeyTransform,
) -> Result<String, EncodingError> {
    match encoding {
        Encoding::FormUrlEncoded => {
            let pairs = form_pairs(params, transform)?;
            Ok(url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs)
                .finish())
        }
        Encoding::Json => {
            let transformed = transform_keys(params, transform);
            serde_json::to_string(&transformed)
                .map_err(|err| EncodingError::Serialize(err.to_string()))
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
