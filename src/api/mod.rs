//! Per-API namespaces.
//!
//! Each namespace only declares the shape of its requests (host, credentials,
//! encoding, response convention, paths); [`Client`] does the rest.

mod account;
mod calls;
mod conversations;
mod numbers;
mod sms;
mod tfa;
mod verify;

pub use account::Account;
pub use calls::Calls;
pub use conversations::{Legs, Members};
pub use numbers::{Number, Numbers, NumbersResponse};
pub use sms::Sms;
pub use tfa::Tfa;
pub use verify::{Verify, VerifyCheck, VerifyStarted};

use crate::client::Client;
use crate::domain::{AuthScheme, Encoding, Host, Method, RequestSpec, ResponseShape};

/// A group of related API calls sharing one request convention.
pub trait ApiNamespace {
    const HOST: Host;
    const AUTH: AuthScheme;
    const ENCODING: Encoding;
    const SHAPE: ResponseShape;

    fn client(&self) -> &Client;

    /// Request skeleton for `path` following this namespace's convention.
    fn spec(&self, method: Method, path: &str) -> RequestSpec {
        RequestSpec::new(Self::HOST, method, path)
            .auth(Self::AUTH)
            .encoding(Self::ENCODING)
            .shape(Self::SHAPE)
    }
}

#[cfg(test)]
mod tests {
    use super::ApiNamespace;
    use crate::client::fake::{FakeTransport, client_with};

    #[test]
    fn namespaces_share_the_parent_client() {
        let client = client_with(&FakeTransport::new(200, "{}"));
        assert!(std::ptr::eq(client.sms().client(), &client));
        assert!(std::ptr::eq(client.verify().client(), &client));
        assert!(std::ptr::eq(client.members().client(), &client));
    }

    #[test]
    fn spec_applies_the_namespace_convention() {
        let client = client_with(&FakeTransport::new(200, "{}"));
        let spec = client.tfa().spec(crate::domain::Method::Post, "/sc/us/2fa/json");
        assert_eq!(spec.host, crate::domain::Host::Rest);
        assert_eq!(
            spec.auth,
            crate::domain::AuthScheme::KeySecret(crate::domain::CredentialFields::ApiKeySecret)
        );
        assert_eq!(spec.encoding, crate::domain::Encoding::FormUrlEncoded);
    }
}
