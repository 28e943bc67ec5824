use serde_json::{Map, Value};

/// Request parameters as a JSON object.
///
/// Form-encoded endpoints accept only scalar values (and arrays of scalars);
/// JSON endpoints accept any nesting.
pub type Params = Map<String, Value>;

/// Which Nexmo host a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Host {
    /// `rest.nexmo.com`: SMS, account, numbers, 2FA.
    Rest,
    /// `api.nexmo.com`: Verify, Calls, Conversations.
    Api,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the query string rather than the body.
    pub fn uses_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    FormUrlEncoded,
    Json,
}

impl Encoding {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::Json => "application/json",
        }
    }
}

/// Rewrite applied to top-level parameter keys before encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTransform {
    #[default]
    Identity,
    /// `client_ref` → `client-ref`.
    UnderscoreToHyphen,
    /// `mo_http_url` → `moHttpUrl`.
    UnderscoreToCamel,
}

/// Names of the key/secret parameters for scheme-A endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFields {
    /// `api_key` / `api_secret`.
    ApiKeySecret,
    /// `username` / `password` (legacy SMS endpoint).
    UsernamePassword,
}

impl CredentialFields {
    pub fn names(self) -> (&'static str, &'static str) {
        match self {
            Self::ApiKeySecret => ("api_key", "api_secret"),
            Self::UsernamePassword => ("username", "password"),
        }
    }
}

/// How credentials are attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Key and secret merged into the parameters (query or body).
    KeySecret(CredentialFields),
    /// Key and secret appended as trailing path segments.
    KeySecretPath,
    /// `Authorization: Bearer <token>` header.
    Bearer,
    None,
}

/// Status convention used to classify a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Numeric `status` field where `0` means success. When `collection` is set the
    /// status is read from the first element of that array (`messages[0]`),
    /// otherwise from the top-level object.
    LegacyStatusField { collection: Option<&'static str> },
    /// 2xx is success; error details come from the body.
    HttpStatusWithBody,
    /// A single named field extracted from a flat object.
    SingleField(&'static str),
}

/// Everything needed to issue one API call.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub host: Host,
    pub method: Method,
    pub path: String,
    /// Extra segments appended to `path`, percent-encoded individually.
    pub path_segments: Vec<String>,
    pub params: Params,
    pub encoding: Encoding,
    pub key_transform: KeyTransform,
    pub auth: AuthScheme,
    pub shape: ResponseShape,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Start a form-encoded, unauthenticated request classified by HTTP status.
    pub fn new(host: Host, method: Method, path: impl Into<String>) -> Self {
        Self {
            host,
            method,
            path: path.into(),
            path_segments: Vec::new(),
            params: Params::new(),
            encoding: Encoding::default(),
            key_transform: KeyTransform::default(),
            auth: AuthScheme::None,
            shape: ResponseShape::HttpStatusWithBody,
            headers: Vec::new(),
        }
    }

    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn key_transform(mut self, key_transform: KeyTransform) -> Self {
        self.key_transform = key_transform;
        self
    }

    pub fn auth(mut self, auth: AuthScheme) -> Self {
        self.auth = auth;
        self
    }

    pub fn shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }

    /// Append one path segment; it is percent-encoded when the URL is built.
    pub fn path_segment(mut self, segment: impl Into<String>) -> Self {
        self.path_segments.push(segment.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
