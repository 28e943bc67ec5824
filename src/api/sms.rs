use serde::Serialize;
use serde_json::Value;

use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{
    ApiResult, AuthScheme, CredentialFields, Encoding, Host, Method, Params, ResponseShape,
    SentMessage, is_gsm7,
};
use crate::transport::to_params;

/// Legacy SMS API (`/sms/json`).
#[derive(Clone, Copy)]
pub struct Sms<'a> {
    client: &'a Client,
}

impl<'a> Sms<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Send an SMS.
    ///
    /// `params` must serialize to a flat object such as
    /// `{"from": "Acme", "to": "447700900000", "text": "Hello"}`.
    ///
    /// Text outside the GSM-7 alphabet should be sent with `"type": "unicode"`;
    /// a warning is logged otherwise because the message would arrive garbled.
    pub async fn send<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<SentMessage>, NexmoError> {
        let params = to_params(params)?;
        warn_on_unflagged_unicode(&params);

        let spec = self.spec(Method::Post, "/sms/json").params(params);
        self.client().build_and_send(spec).await
    }
}

impl ApiNamespace for Sms<'_> {
    const HOST: Host = Host::Rest;
    const AUTH: AuthScheme = AuthScheme::KeySecret(CredentialFields::UsernamePassword);
    const ENCODING: Encoding = Encoding::FormUrlEncoded;
    const SHAPE: ResponseShape = ResponseShape::LegacyStatusField {
        collection: Some("messages"),
    };

    fn client(&self) -> &Client {
        self.client
    }
}

fn warn_on_unflagged_unicode(params: &Params) {
    if is_unflagged_unicode(params) {
        tracing::warn!(
            "sending unicode text SMS without setting the type parameter to \"unicode\""
        );
    }
}

/// `text` needs characters outside GSM-7 but `type` is not `unicode`.
fn is_unflagged_unicode(params: &Params) -> bool {
    let Some(text) = params.get("text").and_then(Value::as_str) else {
        return false;
    };
    let unicode = params.get("type").and_then(Value::as_str) == Some("unicode");
    !unicode && !is_gsm7(text)
}
