//! VM host service: per-user machines and their lifecycle.
//!
//! The host wraps its own `{statusCode, message, data}` envelope inside the
//! gateway's, so list and status payloads sit two `data` layers deep. The
//! inner `statusCode` can disagree with the HTTP status: a user with no
//! machines gets HTTP 200 carrying an inner 404.

#[cfg(test)]
#[path = "vm_host_test.rs"]
mod vm_host_test;

use serde_json::Value;

use super::client::{ApiClient, Service, encode_segment};
use super::envelope::{descend, extract, server_message};
use super::error::ApiError;
use super::transport::Transport;
use super::types::{CreateVmRequest, VirtualMachine, VmAction, VmStatusReport};
use crate::util::storage::KeyValueStore;

const INNER_ENVELOPE: &[&str] = &["data"];
const VM_LIST_PAYLOAD: &[&str] = &["data", "vms"];
const VM_STATUS_PAYLOAD: &[&str] = &["data", "data"];

/// Machines owned by `user_id`. An inner 404 reads as "no machines".
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn list_vms<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    user_id: i64,
) -> Result<Vec<VirtualMachine>, ApiError> {
    let body = client.get(Service::VmHost, &format!("/user/{user_id}")).await?;
    let inner = descend(body, INNER_ENVELOPE)?;
    if inner_status(&inner) == Some(404) {
        return Ok(Vec::new());
    }
    extract(inner, VM_LIST_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn create_vm<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &CreateVmRequest,
) -> Result<Value, ApiError> {
    client.post(Service::VmHost, "/vm/create", request).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn start_vm<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    action: &VmAction,
) -> Result<Value, ApiError> {
    client.post(Service::VmHost, "/vm/start", action).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn stop_vm<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    action: &VmAction,
) -> Result<Value, ApiError> {
    client.post(Service::VmHost, "/vm/stop", action).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn delete_vm<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    action: &VmAction,
) -> Result<Value, ApiError> {
    client.post(Service::VmHost, "/vm/delete", action).await
}

/// Live status of one machine.
///
/// # Errors
///
/// [`ApiError::UnexpectedStatus`] carrying the inner code and message when
/// the host reports a failure inside a 2xx; otherwise see [`ApiClient::call`].
pub async fn vm_status<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    action: &VmAction,
) -> Result<VmStatusReport, ApiError> {
    let body = client.post(Service::VmHost, "/vm/status", action).await?;
    if let Some(inner) = body.get("data") {
        if let Some(status) = inner_status(inner).filter(|s| !(200..300).contains(s)) {
            return Err(ApiError::UnexpectedStatus {
                status,
                message: server_message(inner),
            });
        }
    }
    extract(body, VM_STATUS_PAYLOAD)
}

/// Raw metrics for the machine `vm_name` of `user_id`.
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn vm_metrics<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    user_id: i64,
    vm_name: &str,
) -> Result<Value, ApiError> {
    client.get(Service::VmHost, &format!("/vm/{user_id}/{}/metrics", encode_segment(vm_name))).await
}

fn inner_status(envelope: &Value) -> Option<u16> {
    envelope
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
}
