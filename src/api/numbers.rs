use serde::{Deserialize, Serialize};

use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{
    ApiResult, AuthScheme, CredentialFields, Encoding, Host, KeyTransform, Method, Money,
    ResponseShape,
};
use crate::transport::{ListCursor, to_params};

const NUMBERS: &str = "numbers";

/// A number owned by the account or offered by `number/search`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Number {
    pub country: String,
    pub msisdn: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub cost: Option<Money>,
    #[serde(default)]
    pub mo_http_url: Option<String>,
    #[serde(default)]
    pub voice_callback_type: Option<String>,
    #[serde(default)]
    pub voice_callback_value: Option<String>,
}

/// Acknowledgement returned by `number/buy`, `number/cancel` and `number/update`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NumbersResponse {
    #[serde(rename = "error-code")]
    pub error_code: String,
    #[serde(rename = "error-code-label")]
    pub error_code_label: String,
}

/// Numbers API.
#[derive(Clone, Copy)]
pub struct Numbers<'a> {
    client: &'a Client,
}

impl<'a> Numbers<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Numbers owned by the account. Pass `&()` for no filters.
    pub async fn list<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<ListCursor<Number>>, NexmoError> {
        let spec = self
            .spec(Method::Get, "/account/numbers")
            .params(to_params(params)?);
        self.client().build_list_cursor(spec, NUMBERS).await
    }

    /// Numbers available for purchase (`country` is required).
    pub async fn search<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<ListCursor<Number>>, NexmoError> {
        let spec = self
            .spec(Method::Get, "/number/search")
            .params(to_params(params)?);
        self.client().build_list_cursor(spec, NUMBERS).await
    }

    /// Buy a number (`country` and `msisdn` are required).
    pub async fn buy<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<NumbersResponse>, NexmoError> {
        self.post("/number/buy", params, KeyTransform::Identity).await
    }

    /// Cancel a number (`country` and `msisdn` are required).
    pub async fn cancel<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<NumbersResponse>, NexmoError> {
        self.post("/number/cancel", params, KeyTransform::Identity).await
    }

    /// Change a number's callbacks. Keys are sent in camelCase, so
    /// `mo_http_url` goes out as `moHttpUrl`.
    pub async fn update<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<NumbersResponse>, NexmoError> {
        self.post("/number/update", params, KeyTransform::UnderscoreToCamel).await
    }

    async fn post<P: Serialize + ?Sized>(
        &self,
        path: &str,
        params: &P,
        key_transform: KeyTransform,
    ) -> Result<ApiResult<NumbersResponse>, NexmoError> {
        let spec = self
            .spec(Method::Post, path)
            .params(to_params(params)?)
            .key_transform(key_transform);
        self.client().build_and_send(spec).await
    }
}

impl ApiNamespace for Numbers<'_> {
    const HOST: Host = Host::Rest;
    const AUTH: AuthScheme = AuthScheme::KeySecret(CredentialFields::ApiKeySecret);
    const ENCODING: Encoding = Encoding::FormUrlEncoded;
    const SHAPE: ResponseShape = ResponseShape::HttpStatusWithBody;

    fn client(&self) -> &Client {
        self.client
    }
}
