use std::fmt;

use phonenumber::country;
use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Nexmo API key.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// Parameter name used by the key/secret authenticated endpoints (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Nexmo API secret.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
/// The `Debug` representation never prints the value.
pub struct ApiSecret(String);

impl ApiSecret {
    /// Parameter name used by the key/secret authenticated endpoints (`api_secret`).
    pub const FIELD: &'static str = "api_secret";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiSecret(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token (usually a JWT) for the Calls and Conversations APIs.
///
/// Invariant: non-empty after trimming and free of control characters, so it can
/// always be placed in an `Authorization` header.
pub struct BearerToken(String);

impl BearerToken {
    pub const FIELD: &'static str = "token";

    /// Create a validated [`BearerToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ValidationError::InvalidHeaderValue { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
/// Phone number in the international format Nexmo expects (`447700900000`).
///
/// This is the E.164 form without the leading `+`.
pub struct Msisdn(String);

impl Msisdn {
    /// Parameter name used by the Numbers API (`msisdn`).
    pub const FIELD: &'static str = "msisdn";

    /// Parse and normalize a phone number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, raw).map_err(|_| {
            ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            }
        })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self(e164.trim_start_matches('+').to_owned()))
    }

    /// Digits as sent on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Msisdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monetary amount returned by the account endpoints.
///
/// The API sends it as either a JSON number or a JSON string; both are kept as
/// their textual form so no precision is lost in conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money(String);

impl Money {
    /// Borrow the amount as text (`"12.5"`).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the amount to a float, if it is numeric.
    pub fn to_f64(&self) -> Option<f64> {
        self.0.trim().parse().ok()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireMoney {
    String(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match WireMoney::deserialize(deserializer)? {
            WireMoney::String(value) => Self(value),
            WireMoney::Number(value) => Self(value.to_string()),
        })
    }
}
