//! Scripted transport and client builders shared by the net tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::state::credentials::{CredentialRecord, CredentialStore};
use crate::util::storage::MemoryStorage;

pub const BASE: &str = "http://gw.test";

/// Replays queued responses and records every request it sees.
/// With nothing queued it answers `200 {}`.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, ApiError>>>>,
    seen: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse { status, body: body.to_string() }));
        self
    }

    pub fn reply_raw(&self, status: u16, body: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(ApiResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(&self, err: ApiError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.seen.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ApiResponse { status: 200, body: "{}".to_owned() }))
    }
}

pub type TestClient = ApiClient<FakeTransport, MemoryStorage>;

/// Client with no stored credentials.
pub fn anonymous_client() -> (TestClient, FakeTransport) {
    let transport = FakeTransport::default();
    let client = ApiClient::new(BASE, transport.clone(), CredentialStore::new(MemoryStorage::new()));
    (client, transport)
}

/// Client whose store holds a token for user 7.
pub fn signed_in_client() -> (TestClient, FakeTransport) {
    let (client, transport) = anonymous_client();
    client.credentials().write(&CredentialRecord {
        token: "tok-7".to_owned(),
        user_id: 7,
        email: "grace@example.com".to_owned(),
        username: "grace".to_owned(),
        is_admin: false,
    });
    (client, transport)
}

pub fn json_body(request: &ApiRequest) -> Value {
    match &request.body {
        super::transport::Body::Json(v) => v.clone(),
        other => panic!("expected JSON body, got {other:?}"),
    }
}
