//! VM offer catalogue.

#[cfg(test)]
#[path = "vm_offers_test.rs"]
mod vm_offers_test;

use serde_json::Value;

use super::client::{ApiClient, Service};
use super::envelope::extract;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{VmOffer, VmOfferInput};
use crate::util::storage::KeyValueStore;

const OFFER_LIST_PAYLOAD: &[&str] = &["data", "data", "vm_offers"];
const ACTIVE_OFFERS_PAYLOAD: &[&str] = &["data", "data", "offers"];

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn list_offers<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> Result<Vec<VmOffer>, ApiError> {
    let body = client.get(Service::VmOffers, "/").await?;
    extract(body, OFFER_LIST_PAYLOAD)
}

/// Offers currently open for new machines.
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn active_offers<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
) -> Result<Vec<VmOffer>, ApiError> {
    let body = client.get(Service::VmOffers, "/active").await?;
    extract(body, ACTIVE_OFFERS_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn get_offer<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<Value, ApiError> {
    client.get(Service::VmOffers, &format!("/{id}")).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn create_offer<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    input: &VmOfferInput,
) -> Result<Value, ApiError> {
    client.post(Service::VmOffers, "/", input).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn update_offer<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    id: i64,
    input: &VmOfferInput,
) -> Result<Value, ApiError> {
    client.put(Service::VmOffers, &format!("/{id}"), input).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn delete_offer<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<Value, ApiError> {
    client.delete(Service::VmOffers, &format!("/{id}")).await
}
