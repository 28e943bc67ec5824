use serde_json::Value;

use crate::domain::{AuthScheme, Credentials, RequestSpec};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("endpoint requires an API key and secret, but the client has none")]
    MissingKeySecret,

    #[error("endpoint requires a bearer token, but the client has none")]
    MissingToken,
}

/// Return a copy of `spec` with credentials attached according to its [`AuthScheme`].
///
/// Key/secret parameters overwrite caller-supplied values with the same name.
pub fn inject(
    spec: &RequestSpec,
    credentials: &Credentials,
) -> Result<RequestSpec, CredentialsError> {
    let mut spec = spec.clone();

    match spec.auth {
        AuthScheme::KeySecret(fields) => {
            let (key, secret) = key_secret(credentials)?;
            let (key_field, secret_field) = fields.names();
            spec.params.insert(key_field.to_owned(), Value::String(key.to_owned()));
            spec.params.insert(secret_field.to_owned(), Value::String(secret.to_owned()));
        }
        AuthScheme::KeySecretPath => {
            let (key, secret) = key_secret(credentials)?;
            spec.path_segments.push(key.to_owned());
            spec.path_segments.push(secret.to_owned());
        }
        AuthScheme::Bearer => {
            let token = credentials
                .bearer_token()
                .ok_or(CredentialsError::MissingToken)?;
            spec.headers
                .retain(|(name, _)| !name.eq_ignore_ascii_case("authorization"));
            spec.headers.push((
                "Authorization".to_owned(),
                format!("Bearer {}", token.as_str()),
            ));
        }
        AuthScheme::None => {}
    }

    Ok(spec)
}

fn key_secret(credentials: &Credentials) -> Result<(&str, &str), CredentialsError> {
    match (credentials.api_key(), credentials.api_secret()) {
        (Some(key), Some(secret)) => Ok((key.as_str(), secret.as_str())),
        _ => Err(CredentialsError::MissingKeySecret),
    }
}
