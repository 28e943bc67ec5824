//! Domain layer: strong types with validation and invariants (no I/O).

mod credentials;
mod gsm7;
mod request;
mod response;
mod validation;
mod value;

pub use credentials::Credentials;
pub use gsm7::is_gsm7;
pub use request::{
    AuthScheme, CredentialFields, Encoding, Host, KeyTransform, Method, Params, RequestSpec,
    ResponseShape,
};
pub use response::{ApiResult, ErrorInfo, ListPage, RawResponse, SentMessage};
pub use validation::ValidationError;
pub use value::{ApiKey, ApiSecret, BearerToken, Money, Msisdn};
