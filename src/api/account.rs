use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{ApiResult, AuthScheme, Encoding, Host, Method, Money, ResponseShape};

/// Account API.
#[derive(Clone, Copy)]
pub struct Account<'a> {
    client: &'a Client,
}

impl<'a> Account<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Current account balance (`value` of `/account/get-balance/{key}/{secret}`).
    pub async fn balance(&self) -> Result<ApiResult<Money>, NexmoError> {
        let spec = self.spec(Method::Get, "/account/get-balance");
        self.client().build_and_send(spec).await
    }
}

impl ApiNamespace for Account<'_> {
    const HOST: Host = Host::Rest;
    const AUTH: AuthScheme = AuthScheme::KeySecretPath;
    const ENCODING: Encoding = Encoding::FormUrlEncoded;
    const SHAPE: ResponseShape = ResponseShape::SingleField("value");

    fn client(&self) -> &Client {
        self.client
    }
}

#[cfg(test)]
mod tests {
    use crate::client::fake::{FakeTransport, client_with};

    #[tokio::test]
    async fn balance_extracts_value() {
        let transport = FakeTransport::new(200, r#"{"value": 12.5, "autoReload": false}"#);
        let client = client_with(&transport);

        let balance = client.account().balance().await.unwrap().into_result().unwrap();
        assert_eq!(balance.as_str(), "12.5");
        assert_eq!(balance.to_f64(), Some(12.5));

        let request = transport.last_request().unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://rest.nexmo.com/account/get-balance/key/secret"
        );
        assert_eq!(request.body, None);
    }

    #[tokio::test]
    async fn bad_credentials_are_a_failure() {
        let transport = FakeTransport::new(401, "");
        let client = client_with(&transport);

        let result = client.account().balance().await.unwrap();
        assert_eq!(
            result.failure().and_then(|error| error.status_code),
            Some(401)
        );
    }
}
