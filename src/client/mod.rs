//! Client layer: turns [`RequestSpec`]s into HTTP calls and hands the raw
//! responses to the transport layer for classification.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{Account, Calls, Legs, Members, Numbers, Sms, Tfa, Verify};
use crate::domain::{
    ApiResult, Credentials, Host, KeyTransform, Method, RawResponse, RequestSpec, ValidationError,
};
use crate::transport::{self, CredentialsError, EncodingError, ListCursor};

#[cfg(test)]
pub(crate) mod fake;

const DEFAULT_REST_HOST: &str = "https://rest.nexmo.com";
const DEFAULT_API_HOST: &str = "https://api.nexmo.com";

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A fully built HTTP request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// Sends HTTP requests on behalf of [`Client`].
///
/// Implementations must return every HTTP status (including 4xx/5xx) as a
/// [`RawResponse`] and only fail for network-level problems (DNS, connection, TLS).
pub trait HttpTransport: Send + Sync {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<RawResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<RawResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let method = match request.method {
                Method::Get => reqwest::Method::GET,
                Method::Post => reqwest::Method::POST,
                Method::Put => reqwest::Method::PUT,
                Method::Delete => reqwest::Method::DELETE,
            };

            let mut builder = self.client.request(method, request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|value| (name.as_str().to_owned(), value.to_owned()))
                })
                .collect();
            let body = response.bytes().await?.to_vec();
            Ok(RawResponse {
                status,
                headers,
                body,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Client`].
///
/// Failures reported by the API itself are not errors: they come back as
/// [`ApiResult::Failure`]. This type covers problems that prevent a request from
/// being sent or a response from being received.
pub enum NexmoError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Request parameters cannot be encoded for the endpoint.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// The endpoint needs credentials the client was not given.
    #[error("credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// A configured host or a pagination link is not a usable URL.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Clone)]
/// Builder for [`Client`].
///
/// Use this when you need to customize the hosts, timeout, user-agent, or the
/// HTTP transport itself.
pub struct ClientBuilder {
    credentials: Credentials,
    rest_host: String,
    api_host: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ClientBuilder {
    /// Create a builder with the default hosts and no timeout/user-agent override.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            rest_host: DEFAULT_REST_HOST.to_owned(),
            api_host: DEFAULT_API_HOST.to_owned(),
            timeout: None,
            user_agent: None,
            transport: None,
        }
    }

    /// Override the host used for SMS, account, numbers and 2FA calls.
    pub fn rest_host(mut self, host: impl Into<String>) -> Self {
        self.rest_host = host.into();
        self
    }

    /// Override the host used for Verify, Calls and Conversations calls.
    pub fn api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    ///
    /// Ignored when a custom transport is supplied.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send requests through `transport` instead of the built-in `reqwest` client.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`Client`].
    pub fn build(self) -> Result<Client, NexmoError> {
        for host in [&self.rest_host, &self.api_host] {
            Url::parse(host).map_err(|err| NexmoError::InvalidUrl {
                url: host.clone(),
                reason: err.to_string(),
            })?;
        }

        let http = match self.transport {
            Some(transport) => transport,
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                if let Some(user_agent) = self.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                let client = builder
                    .build()
                    .map_err(|err| NexmoError::Transport(Box::new(err)))?;
                Arc::new(ReqwestTransport { client })
            }
        };

        Ok(Client {
            credentials: self.credentials,
            rest_host: self.rest_host,
            api_host: self.api_host,
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Nexmo client.
///
/// Every API call goes through the same steps: key transform, credential
/// injection, parameter encoding, the HTTP round trip, and classification of the
/// response into an [`ApiResult`]. The per-API namespaces ([`Client::sms`],
/// [`Client::verify`], ...) only describe the request shape.
pub struct Client {
    credentials: Credentials,
    rest_host: String,
    api_host: String,
    http: Arc<dyn HttpTransport>,
}

impl Client {
    /// Create a client using the default hosts.
    ///
    /// For more customization, use [`Client::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            rest_host: DEFAULT_REST_HOST.to_owned(),
            api_host: DEFAULT_API_HOST.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> ClientBuilder {
        ClientBuilder::new(credentials)
    }

    pub fn sms(&self) -> Sms<'_> {
        Sms::new(self)
    }

    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    pub fn tfa(&self) -> Tfa<'_> {
        Tfa::new(self)
    }

    pub fn numbers(&self) -> Numbers<'_> {
        Numbers::new(self)
    }

    pub fn verify(&self) -> Verify<'_> {
        Verify::new(self)
    }

    pub fn calls(&self) -> Calls<'_> {
        Calls::new(self)
    }

    pub fn legs(&self) -> Legs<'_> {
        Legs::new(self)
    }

    pub fn members(&self) -> Members<'_> {
        Members::new(self)
    }

    /// Send `spec` and decode the classified response into `T`.
    ///
    /// Errors:
    /// - [`NexmoError::Encoding`] / [`NexmoError::Credentials`] before anything is sent,
    /// - [`NexmoError::Transport`] when no HTTP response was received.
    ///
    /// Everything the API reports, including non-2xx statuses and malformed bodies,
    /// is returned as `Ok(ApiResult::Failure(_))`.
    pub async fn build_and_send<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
    ) -> Result<ApiResult<T>, NexmoError> {
        let raw = self.execute(&spec).await?;
        let result = transport::parse(&raw, spec.shape);
        log_failure(&result);
        Ok(transport::project(result))
    }

    /// Send `spec` and expose the `embedded_key` collection of the response as a
    /// [`ListCursor`].
    pub async fn build_list_cursor<T: DeserializeOwned>(
        &self,
        spec: RequestSpec,
        embedded_key: &str,
    ) -> Result<ApiResult<ListCursor<T>>, NexmoError> {
        let raw = self.execute(&spec).await?;
        let result = transport::parse(&raw, spec.shape);
        log_failure(&result);
        Ok(result.and_then(
            |body| match transport::decode_page(body, embedded_key) {
                Ok((page, next)) => {
                    ApiResult::Success(ListCursor::new(page, spec, embedded_key, next))
                }
                Err(error) => ApiResult::Failure(error),
            },
        ))
    }

    /// Fetch the page following `cursor`, if the API advertised one.
    pub async fn next_page<T: DeserializeOwned>(
        &self,
        cursor: &ListCursor<T>,
    ) -> Result<Option<ApiResult<ListCursor<T>>>, NexmoError> {
        let host = self.host(cursor.spec().host);
        let base = Url::parse(host).map_err(|err| NexmoError::InvalidUrl {
            url: host.to_owned(),
            reason: err.to_string(),
        })?;
        let next = cursor
            .next_spec(&base)
            .map_err(|err| NexmoError::InvalidUrl {
                url: host.to_owned(),
                reason: err.to_string(),
            })?;

        match next {
            Some(spec) => Ok(Some(
                self.build_list_cursor(spec, cursor.embedded_key()).await?,
            )),
            None => Ok(None),
        }
    }

    #[tracing::instrument(
        name = "nexmo.request",
        skip_all,
        fields(method = spec.method.as_str(), path = %spec.path)
    )]
    async fn execute(&self, spec: &RequestSpec) -> Result<RawResponse, NexmoError> {
        let request = self.prepare(spec)?;
        tracing::debug!(host = ?request.url.host_str(), "sending request");

        let response = self
            .http
            .send(request)
            .await
            .map_err(NexmoError::Transport)?;

        tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
        Ok(response)
    }

    fn prepare(&self, spec: &RequestSpec) -> Result<HttpRequest, NexmoError> {
        // Keys are rewritten before credentials are merged so `api_key` and friends
        // keep their wire names.
        let mut spec = spec.clone();
        spec.params = transport::transform_keys(&spec.params, spec.key_transform);
        spec.key_transform = KeyTransform::Identity;
        let spec = transport::inject(&spec, &self.credentials)?;

        let mut url = self.endpoint(spec.host, &spec.path)?;
        if !spec.path_segments.is_empty() {
            url.path_segments_mut()
                .map_err(|()| NexmoError::InvalidUrl {
                    url: self.host(spec.host).to_owned(),
                    reason: "URL cannot have path segments".to_owned(),
                })?
                .pop_if_empty()
                .extend(&spec.path_segments);
        }

        let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
        let body = if spec.method.uses_query() {
            let pairs = transport::form_pairs(&spec.params, KeyTransform::Identity)?;
            if !pairs.is_empty() {
                url.query_pairs_mut().extend_pairs(pairs);
            }
            None
        } else {
            headers.push((
                "Content-Type".to_owned(),
                spec.encoding.content_type().to_owned(),
            ));
            let body = transport::encode(&spec.params, spec.encoding, KeyTransform::Identity)?;
            Some(body.into_bytes())
        };
        headers.extend(spec.headers);

        Ok(HttpRequest {
            method: spec.method,
            url,
            headers,
            body,
        })
    }

    fn host(&self, host: Host) -> &str {
        match host {
            Host::Rest => &self.rest_host,
            Host::Api => &self.api_host,
        }
    }

    fn endpoint(&self, host: Host, path: &str) -> Result<Url, NexmoError> {
        let url = format!(
            "{}/{}",
            self.host(host).trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Url::parse(&url).map_err(|err| NexmoError::InvalidUrl {
            url,
            reason: err.to_string(),
        })
    }
}

fn log_failure<T>(result: &ApiResult<T>) {
    if let ApiResult::Failure(error) = result {
        tracing::debug!(
            status_code = ?error.status_code,
            raw_status = ?error.raw_status,
            message = %error.message,
            "API reported failure"
        );
    }
}
