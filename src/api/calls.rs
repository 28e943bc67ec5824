use serde::Serialize;
use serde_json::Value;

use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{ApiResult, AuthScheme, Encoding, Host, Method, ResponseShape};
use crate::transport::{ListCursor, to_params};

const PATH: &str = "/v1/calls";

/// Voice calls API (bearer authenticated).
#[derive(Clone, Copy)]
pub struct Calls<'a> {
    client: &'a Client,
}

impl<'a> Calls<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Calls matching the given filters (`status`, `date_start`, `page_size`, ...).
    ///
    /// Items come from `_embedded.calls`; follow further pages with
    /// [`Client::next_page`].
    pub async fn list<P: Serialize + ?Sized>(
        &self,
        params: &P,
    ) -> Result<ApiResult<ListCursor<Value>>, NexmoError> {
        let spec = self.spec(Method::Get, PATH).params(to_params(params)?);
        self.client().build_list_cursor(spec, "calls").await
    }

    pub async fn get(&self, uuid: &str) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self.spec(Method::Get, PATH).path_segment(uuid);
        self.client().build_and_send(spec).await
    }
}

impl ApiNamespace for Calls<'_> {
    const HOST: Host = Host::Api;
    const AUTH: AuthScheme = AuthScheme::Bearer;
    const ENCODING: Encoding = Encoding::Json;
    const SHAPE: ResponseShape = ResponseShape::HttpStatusWithBody;

    fn client(&self) -> &Client {
        self.client
    }
}
