use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{
    ApiResult, AuthScheme, CredentialFields, Encoding, ErrorInfo, Host, Method, Money,
    ResponseShape,
};
use crate::transport::to_params;

/// Accepted verification request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyStarted {
    pub request_id: String,
}

/// Successful code check.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VerifyCheck {
    #[serde(default)]
    pub request_id: Option<String>,
    pub event_id: String,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Verify API.
///
/// Requests are JSON bodies carrying `api_key`/`api_secret`; responses use a
/// top-level `status` where `"0"` means success.
#[derive(Clone, Copy)]
pub struct Verify<'a> {
    client: &'a Client,
}

impl<'a> Verify<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generate and send a PIN (`number` and `brand` are required).
    pub async fn request<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<VerifyStarted>, NexmoError> {
        let spec = self
            .spec(Method::Post, "/verify/json")
            .params(to_params(params)?);
        self.client().build_and_send(spec).await
    }

    /// Confirm the code entered by the user (`request_id` and `code` are required).
    pub async fn check<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<VerifyCheck>, NexmoError> {
        let spec = self
            .spec(Method::Post, "/verify/check/json")
            .params(to_params(params)?);
        self.client().build_and_send(spec).await
    }

    /// Look up one (`request_id`) or several (`request_ids`) verification requests.
    ///
    /// The `status` of a found request describes the verification state
    /// (`"IN PROGRESS"`, `"SUCCESS"`, ...), so failures are recognized by the
    /// presence of `error_text` instead.
    pub async fn search<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self
            .spec(Method::Get, "/verify/search/json")
            .params(to_params(params)?)
            .shape(ResponseShape::HttpStatusWithBody);
        let result = self.client().build_and_send::<Value>(spec).await?;
        Ok(result.and_then(classify_search))
    }

    /// Run a control command (`cancel`, `trigger_next_event`) on a request.
    pub async fn control<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self
            .spec(Method::Post, "/verify/control/json")
            .params(to_params(params)?);
        self.client().build_and_send(spec).await
    }

    /// Cancel an existing verification request.
    pub async fn cancel(&self, request_id: &str) -> Result<ApiResult<Value>, NexmoError> {
        self.control(&json!({"request_id": request_id, "cmd": "cancel"}))
            .await
    }

    /// Skip to the next delivery attempt of an existing verification request.
    pub async fn trigger_next_event(
        &self,
        request_id: &str,
    ) -> Result<ApiResult<Value>, NexmoError> {
        self.control(&json!({"request_id": request_id, "cmd": "trigger_next_event"}))
            .await
    }
}

impl ApiNamespace for Verify<'_> {
    const HOST: Host = Host::Api;
    const AUTH: AuthScheme = AuthScheme::KeySecret(CredentialFields::ApiKeySecret);
    const ENCODING: Encoding = Encoding::Json;
    const SHAPE: ResponseShape = ResponseShape::LegacyStatusField { collection: None };

    fn client(&self) -> &Client {
        self.client
    }
}

fn classify_search(body: Value) -> ApiResult<Value> {
    let Some(text) = body.get("error_text").and_then(Value::as_str) else {
        return ApiResult::Success(body);
    };
    let status = match body.get("status") {
        Some(Value::String(status)) => status.clone(),
        Some(other) => other.to_string(),
        None => "unknown".to_owned(),
    };
    ApiResult::Failure(ErrorInfo {
        message: format!("{text} (status={status})"),
        status_code: None,
        raw_status: Some(status),
        error_type: None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::fake::{FakeTransport, client_with, json_body, query};
    use crate::domain::Method;

    #[tokio::test]
    async fn request_posts_json_with_credentials_to_api_host() {
        let transport = FakeTransport::new(200, r#"{"request_id":"req-1","status":"0"}"#);
        let client = client_with(&transport);

        let result = client
            .verify()
            .request(&json!({"number": "447700900000", "brand": "Acme Inc"}))
            .await
            .unwrap();
        assert_eq!(
            result.success().map(|started| started.request_id.as_str()),
            Some("req-1")
        );

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url.as_str(), "https://api.nexmo.com/verify/json");
        assert!(request.headers.contains(&(
            "Content-Type".to_owned(),
            "application/json".to_owned()
        )));
        assert_eq!(
            json_body(&request),
            json!({
                "number": "447700900000",
                "brand": "Acme Inc",
                "api_key": "key",
                "api_secret": "secret",
            })
        );
    }

    #[tokio::test]
    async fn wrong_code_is_a_failure() {
        let transport = FakeTransport::new(
            200,
            r#"{"request_id":"req-1","status":"16","error_text":"The code provided does not match the expected value"}"#,
        );
        let client = client_with(&transport);

        let result = client
            .verify()
            .check(&json!({"request_id": "req-1", "code": "0000"}))
            .await
            .unwrap();
        assert_eq!(
            result.failure().map(|error| error.message.as_str()),
            Some("The code provided does not match the expected value (status=16)")
        );
        assert_eq!(
            transport.last_request().unwrap().url.path(),
            "/verify/check/json"
        );
    }

    #[tokio::test]
    async fn successful_check_reads_event_and_price() {
        let transport = FakeTransport::new(
            200,
            r#"{"request_id":"req-1","event_id":"evt-1","status":"0","price":"0.10000000","currency":"EUR"}"#,
        );
        let client = client_with(&transport);

        let check = client
            .verify()
            .check(&json!({"request_id": "req-1", "code": "1234"}))
            .await
            .unwrap()
            .into_result()
            .unwrap();
        assert_eq!(check.event_id, "evt-1");
        assert_eq!(check.price.as_ref().map(|p| p.as_str()), Some("0.10000000"));
        assert_eq!(check.currency.as_deref(), Some("EUR"));
    }

    #[tokio::test]
    async fn search_uses_query_and_treats_state_as_payload() {
        let transport = FakeTransport::new(
            200,
            r#"{"request_id":"req-1","status":"IN PROGRESS"}"#,
        );
        let client = client_with(&transport);

        let result = client
            .verify()
            .search(&json!({"request_ids": ["req-1", "req-2"]}))
            .await
            .unwrap();
        assert_eq!(
            result.success().and_then(|body| body["status"].as_str()),
            Some("IN PROGRESS")
        );

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.body, None);
        let query = query(&request);
        assert_eq!(
            query
                .iter()
                .filter(|(key, _)| key == "request_ids")
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>(),
            vec!["req-1", "req-2"]
        );
    }

    #[tokio::test]
    async fn search_error_text_is_a_failure() {
        let transport = FakeTransport::new(
            200,
            r#"{"status":"101","error_text":"No response found"}"#,
        );
        let client = client_with(&transport);

        let result = client
            .verify()
            .search(&json!({"request_id": "missing"}))
            .await
            .unwrap();
        let error = result.into_result().unwrap_err();
        assert_eq!(error.message, "No response found (status=101)");
        assert_eq!(error.raw_status.as_deref(), Some("101"));
    }

    #[tokio::test]
    async fn cancel_and_trigger_next_event_use_control() {
        let transport = FakeTransport::new(200, r#"{"status":"0","command":"cancel"}"#);
        let client = client_with(&transport);

        let result = client.verify().cancel("req-1").await.unwrap();
        assert!(result.is_success());
        let request = transport.last_request().unwrap();
        assert_eq!(request.url.path(), "/verify/control/json");
        let body = json_body(&request);
        assert_eq!(body["request_id"], json!("req-1"));
        assert_eq!(body["cmd"], json!("cancel"));

        let _ = client.verify().trigger_next_event("req-1").await.unwrap();
        let body = json_body(&transport.last_request().unwrap());
        assert_eq!(body["cmd"], json!("trigger_next_event"));
    }
}
