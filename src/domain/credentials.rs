use crate::domain::validation::ValidationError;
use crate::domain::value::{ApiKey, ApiSecret, BearerToken};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Authentication material for Nexmo API calls.
///
/// The REST endpoints (SMS, Numbers, Verify, 2FA, balance) authenticate with an
/// API key/secret pair, while the Calls and Conversations APIs expect a bearer
/// token. A client may carry either or both; each request picks what it needs.
pub struct Credentials {
    key_secret: Option<(ApiKey, ApiSecret)>,
    token: Option<BearerToken>,
}

impl Credentials {
    /// Key/secret credentials for the REST endpoints.
    pub fn key_secret(
        key: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            key_secret: Some((ApiKey::new(key)?, ApiSecret::new(secret)?)),
            token: None,
        })
    }

    /// Bearer-token credentials for the Calls and Conversations APIs.
    pub fn token(token: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            key_secret: None,
            token: Some(BearerToken::new(token)?),
        })
    }

    /// Add (or replace) the bearer token on an existing set of credentials.
    pub fn with_token(self, token: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            token: Some(BearerToken::new(token)?),
            ..self
        })
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.key_secret.as_ref().map(|(key, _)| key)
    }

    pub fn api_secret(&self) -> Option<&ApiSecret> {
        self.key_secret.as_ref().map(|(_, secret)| secret)
    }

    pub fn bearer_token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }
}
