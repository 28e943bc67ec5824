use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{BoxFuture, Client, HttpRequest, HttpTransport};
use crate::domain::{Credentials, RawResponse};

/// Transport double that records requests and replays canned responses.
///
/// Responses are served in order; the last one repeats once the queue is drained.
#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<HttpRequest>,
    responses: VecDeque<(u16, String)>,
    failure: Option<String>,
}

impl FakeTransport {
    pub(crate) fn new(status: u16, body: impl Into<String>) -> Self {
        Self::sequence(vec![(status, body.into())])
    }

    pub(crate) fn sequence<S: Into<String>>(responses: Vec<(u16, S)>) -> Self {
        Self::with_state(
            responses
                .into_iter()
                .map(|(status, body)| (status, body.into()))
                .collect(),
            None,
        )
    }

    pub(crate) fn failing(message: impl Into<String>) -> Self {
        Self::with_state(VecDeque::new(), Some(message.into()))
    }

    fn with_state(responses: VecDeque<(u16, String)>, failure: Option<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                responses,
                failure,
            })),
        }
    }

    pub(crate) fn last_request(&self) -> Option<HttpRequest> {
        self.state.lock().unwrap().requests.last().cloned()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<RawResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let (status, body) = {
                let mut state = self.state.lock().unwrap();
                state.requests.push(request);
                if let Some(message) = state.failure.clone() {
                    return Err(Box::<dyn StdError + Send + Sync>::from(message));
                }
                if state.responses.len() > 1 {
                    state.responses.pop_front().unwrap()
                } else {
                    state.responses.front().cloned().unwrap()
                }
            };
            Ok(RawResponse {
                status,
                headers: vec![("content-type".to_owned(), "application/json".to_owned())],
                body: body.into_bytes(),
            })
        })
    }
}

pub(crate) fn form_body(request: &HttpRequest) -> Vec<(String, String)> {
    let body = request.body.as_deref().unwrap_or_default();
    url::form_urlencoded::parse(body).into_owned().collect()
}

pub(crate) fn json_body(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().unwrap_or_default()).unwrap()
}

pub(crate) fn query(request: &HttpRequest) -> Vec<(String, String)> {
    request.url.query_pairs().into_owned().collect()
}

/// Client with key/secret and token credentials that talks to `transport`.
pub(crate) fn client_with(transport: &FakeTransport) -> Client {
    let credentials = Credentials::key_secret("key", "secret")
        .unwrap()
        .with_token("jwt")
        .unwrap();
    Client::builder(credentials)
        .transport(Arc::new(transport.clone()))
        .build()
        .unwrap()
}
