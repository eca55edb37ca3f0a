//! Cluster service: physical hosts and VM placement.

#[cfg(test)]
#[path = "clusters_test.rs"]
mod clusters_test;

use serde_json::Value;

use super::client::{ApiClient, Service};
use super::envelope::extract;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{Cluster, ClusterInput, HostRequirements, ServiceHealth, ServiceInfo};
use crate::util::storage::KeyValueStore;

const CLUSTER_LIST_PAYLOAD: &[&str] = &["data", "data", "clusters"];
const SERVICE_STATUS_PAYLOAD: &[&str] = &[];

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn list_clusters<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> Result<Vec<Cluster>, ApiError> {
    let body = client.get(Service::Clusters, "/").await?;
    extract(body, CLUSTER_LIST_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn get_cluster<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<Value, ApiError> {
    client.get(Service::Clusters, &format!("/{id}")).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn create_cluster<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    input: &ClusterInput,
) -> Result<Value, ApiError> {
    client.post(Service::Clusters, "/", input).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn update_cluster<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    id: i64,
    input: &ClusterInput,
) -> Result<Value, ApiError> {
    client.patch(Service::Clusters, &format!("/{id}"), input).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn delete_cluster<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<Value, ApiError> {
    client.delete(Service::Clusters, &format!("/{id}")).await
}

/// Ask the cluster service to pick a host with enough free capacity and
/// forward the create request to it.
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn find_suitable_host<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    requirements: &HostRequirements,
) -> Result<Value, ApiError> {
    client.post(Service::Clusters, "/find-suitable-host", requirements).await
}

/// Liveness of the cluster service. The body is not enveloped.
///
/// # Errors
///
/// [`ApiError::MalformedEnvelope`] when the body is not a status object;
/// otherwise see [`ApiClient::call`].
pub async fn cluster_health<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
) -> Result<ServiceHealth, ApiError> {
    let body = client.get(Service::Clusters, "/health").await?;
    extract(body, SERVICE_STATUS_PAYLOAD)
}

/// Application name and version of the cluster service. Not enveloped.
///
/// # Errors
///
/// As [`cluster_health`].
pub async fn cluster_info<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> Result<ServiceInfo, ApiError> {
    let body = client.get(Service::Clusters, "/info").await?;
    extract(body, SERVICE_STATUS_PAYLOAD)
}
