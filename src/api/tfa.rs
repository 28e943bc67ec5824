use serde::Serialize;

use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{
    ApiResult, AuthScheme, CredentialFields, Encoding, Host, KeyTransform, Method, ResponseShape,
    SentMessage,
};
use crate::transport::to_params;

/// US short code two-factor authentication API (`/sc/us/2fa/json`).
///
/// Parameter keys are sent hyphenated: `client_ref` goes out as `client-ref`.
#[derive(Clone, Copy)]
pub struct Tfa<'a> {
    client: &'a Client,
}

impl<'a> Tfa<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Send a PIN through the pre-approved 2FA short code.
    pub async fn send<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<SentMessage>, NexmoError> {
        let spec = self
            .spec(Method::Post, "/sc/us/2fa/json")
            .params(to_params(params)?)
            .key_transform(KeyTransform::UnderscoreToHyphen);
        self.client().build_and_send(spec).await
    }
}

impl ApiNamespace for Tfa<'_> {
    const HOST: Host = Host::Rest;
    const AUTH: AuthScheme = AuthScheme::KeySecret(CredentialFields::ApiKeySecret);
    const ENCODING: Encoding = Encoding::FormUrlEncoded;
    const SHAPE: ResponseShape = ResponseShape::LegacyStatusField {
        collection: Some("messages"),
    };

    fn client(&self) -> &Client {
        self.client
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::fake::{FakeTransport, client_with, form_body};

    const OK: &str = r#"{"message-count":"1","messages":[{"status":"0","message-id":"tfa-1"}]}"#;

    #[tokio::test]
    async fn send_posts_pin_with_api_key() {
        let transport = FakeTransport::new(200, OK);
        let client = client_with(&transport);

        let result = client
            .tfa()
            .send(&json!({"to": "447700900000", "pin": "12345"}))
            .await
            .unwrap();
        assert_eq!(
            result.success().map(|message| message.message_id.as_str()),
            Some("tfa-1")
        );

        let request = transport.last_request().unwrap();
        assert_eq!(request.url.as_str(), "https://rest.nexmo.com/sc/us/2fa/json");
        let mut body = form_body(&request);
        body.sort();
        assert_eq!(
            body,
            vec![
                ("api_key".to_owned(), "key".to_owned()),
                ("api_secret".to_owned(), "secret".to_owned()),
                ("pin".to_owned(), "12345".to_owned()),
                ("to".to_owned(), "447700900000".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn underscored_keys_are_sent_hyphenated() {
        let transport = FakeTransport::new(200, OK);
        let client = client_with(&transport);

        let _ = client
            .tfa()
            .send(&json!({"client_ref": "12345"}))
            .await
            .unwrap();

        let body = form_body(&transport.last_request().unwrap());
        assert!(body.contains(&("client-ref".to_owned(), "12345".to_owned())));
        assert!(!body.iter().any(|(key, _)| key == "client_ref"));
        assert!(body.contains(&("api_key".to_owned(), "key".to_owned())));
    }
}
