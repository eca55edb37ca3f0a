//! Shared HTTP client for every backend service.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>` and logs failures at `warn`.
//! Envelope unwrapping is left to the per-service modules.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use serde::Serialize;
use serde_json::Value;

use super::envelope::server_message;
use super::error::ApiError;
use super::transport::{ApiRequest, Body, Method, Transport};
use crate::state::credentials::CredentialStore;
use crate::util::storage::KeyValueStore;

/// Backend services reachable through the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Service {
    Users,
    VmHost,
    VmOffers,
    Clusters,
    SystemImages,
}

impl Service {
    /// Gateway path prefix for this service, without slashes at either end.
    pub fn base_segment(self) -> &'static str {
        match self {
            Self::Users => "USER-SERVICE/api/auth",
            Self::VmHost => "SERVICE-VM-HOST/api/service-vm-host",
            Self::VmOffers => "SERVICE-VM-OFFER/api/vm-offers",
            Self::Clusters => "SERVICE-CLUSTER/api/service-clusters",
            Self::SystemImages => "SERVICE-SYSTEM-IMAGE/api/service-system-image",
        }
    }
}

/// Gateway client that signs requests with the stored bearer token.
#[derive(Clone, Debug)]
pub struct ApiClient<T, S> {
    base_url: String,
    transport: T,
    credentials: CredentialStore<S>,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(base_url: impl Into<String>, transport: T, credentials: CredentialStore<S>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, transport, credentials }
    }

    pub fn credentials(&self) -> &CredentialStore<S> {
        &self.credentials
    }

    /// Absolute URL for `path` under `service`. `path` starts with `/`.
    pub fn url(&self, service: Service, path: &str) -> String {
        format!("{}/{}{}", self.base_url, service.base_segment(), path)
    }

    /// Issue a request and return the parsed JSON body of a 2xx response.
    ///
    /// `Authorization: Bearer <token>` is attached whenever a token is stored.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Network`] when no response arrived
    /// - [`ApiError::Unauthorized`] on 401
    /// - [`ApiError::UnexpectedStatus`] on any other non-2xx status
    /// - [`ApiError::MalformedEnvelope`] when a 2xx body is not JSON
    pub async fn call(&self, service: Service, method: Method, path: &str, body: Body) -> Result<Value, ApiError> {
        let url = self.url(service, path);
        let mut headers = Vec::new();
        if let Some(token) = self.credentials.read_token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        log::debug!("{} {url}", method.as_str());

        let request = ApiRequest { method, url, headers, body };
        let result = match self.transport.send(request).await {
            Ok(resp) => interpret(resp.status, &resp.body),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::warn!("{} {}{path} failed: {e}", method.as_str(), service.base_segment());
        }
        result
    }

    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn get(&self, service: Service, path: &str) -> Result<Value, ApiError> {
        self.call(service, Method::Get, path, Body::Empty).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::call`]; also [`ApiError::Encode`] if `body` cannot be serialized.
    pub async fn post<B: Serialize + ?Sized>(&self, service: Service, path: &str, body: &B) -> Result<Value, ApiError> {
        self.call(service, Method::Post, path, json_body(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::post`].
    pub async fn put<B: Serialize + ?Sized>(&self, service: Service, path: &str, body: &B) -> Result<Value, ApiError> {
        self.call(service, Method::Put, path, json_body(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::post`].
    pub async fn patch<B: Serialize + ?Sized>(&self, service: Service, path: &str, body: &B) -> Result<Value, ApiError> {
        self.call(service, Method::Patch, path, json_body(body)?).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::call`].
    pub async fn delete(&self, service: Service, path: &str) -> Result<Value, ApiError> {
        self.call(service, Method::Delete, path, Body::Empty).await
    }
}

/// Percent-encode one user-supplied path segment. Everything outside the
/// unreserved set (`A-Z a-z 0-9 - _ . ~`) is escaped.
pub fn encode_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<Body, ApiError> {
    serde_json::to_value(body)
        .map(Body::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

/// Map a raw status and body onto the client's result contract.
fn interpret(status: u16, body: &str) -> Result<Value, ApiError> {
    match status {
        200..=299 => {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(body).map_err(|e| ApiError::MalformedEnvelope(format!("body is not JSON: {e}")))
        }
        401 => Err(ApiError::Unauthorized),
        _ => {
            let message = serde_json::from_str::<Value>(body).ok().and_then(|v| server_message(&v));
            Err(ApiError::UnexpectedStatus { status, message })
        }
    }
}
