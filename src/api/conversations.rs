//! Conversation legs and members (beta, bearer authenticated, JSON bodies).

use serde::Serialize;
use serde_json::Value;

use super::ApiNamespace;
use crate::client::{Client, NexmoError};
use crate::domain::{ApiResult, AuthScheme, Encoding, Host, Method, RequestSpec, ResponseShape};
use crate::transport::{ListCursor, to_params};

const LEGS: &str = "/beta/legs";
const CONVERSATIONS: &str = "/beta/conversations";

#[derive(Clone, Copy)]
pub struct Legs<'a> {
    client: &'a Client,
}

impl<'a> Legs<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// All legs, read from `_embedded.legs`.
    pub async fn list(&self) -> Result<ApiResult<ListCursor<Value>>, NexmoError> {
        let spec = self.spec(Method::Get, LEGS);
        self.client().build_list_cursor(spec, "legs").await
    }

    pub async fn delete(&self, leg_id: &str) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self.spec(Method::Delete, LEGS).path_segment(leg_id);
        self.client().build_and_send(spec).await
    }
}

impl ApiNamespace for Legs<'_> {
    const HOST: Host = Host::Api;
    const AUTH: AuthScheme = AuthScheme::Bearer;
    const ENCODING: Encoding = Encoding::Json;
    const SHAPE: ResponseShape = ResponseShape::HttpStatusWithBody;

    fn client(&self) -> &Client {
        self.client
    }
}

/// Members of a conversation (`/beta/conversations/{id}/members`).
///
/// Bodies are JSON, so nested parameters such as `channel.to` are sent as-is.
#[derive(Clone, Copy)]
pub struct Members<'a> {
    client: &'a Client,
}

impl<'a> Members<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn create<P: Serialize + ?Sized>(
        &self,
        conversation_id: &str,
        params: &P,
    ) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self
            .collection(Method::Post, conversation_id)
            .params(to_params(params)?);
        self.client().build_and_send(spec).await
    }

    pub async fn list(
        &self,
        conversation_id: &str,
    ) -> Result<ApiResult<ListCursor<Value>>, NexmoError> {
        let spec = self.collection(Method::Get, conversation_id);
        self.client().build_list_cursor(spec, "members").await
    }

    pub async fn get(
        &self,
        conversation_id: &str,
        member_id: &str,
    ) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self.member(Method::Get, conversation_id, member_id);
        self.client().build_and_send(spec).await
    }

    pub async fn update<P: Serialize + ?Sized>(
        &self,
        conversation_id: &str,
        member_id: &str,
        params: &P,
    ) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self
            .member(Method::Put, conversation_id, member_id)
            .params(to_params(params)?);
        self.client().build_and_send(spec).await
    }

    pub async fn delete(
        &self,
        conversation_id: &str,
        member_id: &str,
    ) -> Result<ApiResult<Value>, NexmoError> {
        let spec = self.member(Method::Delete, conversation_id, member_id);
        self.client().build_and_send(spec).await
    }

    fn collection(&self, method: Method, conversation_id: &str) -> RequestSpec {
        self.spec(method, CONVERSATIONS)
            .path_segment(conversation_id)
            .path_segment("members")
    }

    fn member(&self, method: Method, conversation_id: &str, member_id: &str) -> RequestSpec {
        self.collection(method, conversation_id).path_segment(member_id)
    }
}

impl ApiNamespace for Members<'_> {
    const HOST: Host = Host::Api;
    const AUTH: AuthScheme = AuthScheme::Bearer;
    const ENCODING: Encoding = Encoding::Json;
    const SHAPE: ResponseShape = ResponseShape::HttpStatusWithBody;

    fn client(&self) -> &Client {
        self.client
    }
}
