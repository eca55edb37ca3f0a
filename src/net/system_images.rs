//! System image catalogue. Creation is a multipart upload; everything else
//! is JSON.

#[cfg(test)]
#[path = "system_images_test.rs"]
mod system_images_test;

use serde_json::Value;

use super::client::{ApiClient, Service, encode_segment};
use super::envelope::extract;
use super::error::ApiError;
use super::transport::{Body, FormField, Method, Transport};
use super::types::{SystemImage, SystemImageUpdate, SystemImageUpload};
use crate::util::storage::KeyValueStore;

const IMAGE_LIST_PAYLOAD: &[&str] = &["data", "data", "system_images"];
const IMAGE_PAYLOAD: &[&str] = &["data", "data"];
// Search endpoints answer one layer shallower than the list.
const IMAGE_SEARCH_PAYLOAD: &[&str] = &["data", "system_images"];

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn list_images<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
) -> Result<Vec<SystemImage>, ApiError> {
    let body = client.get(Service::SystemImages, "/").await?;
    extract(body, IMAGE_LIST_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn get_image<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    id: i64,
) -> Result<SystemImage, ApiError> {
    let body = client.get(Service::SystemImages, &format!("/{id}")).await?;
    extract(body, IMAGE_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn create_image<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    upload: &SystemImageUpload,
) -> Result<Value, ApiError> {
    client
        .call(Service::SystemImages, Method::Post, "/", Body::Multipart(upload_fields(upload)))
        .await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn update_image<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    id: i64,
    update: &SystemImageUpdate,
) -> Result<Value, ApiError> {
    client.put(Service::SystemImages, &format!("/{id}"), update).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn delete_image<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<Value, ApiError> {
    client.delete(Service::SystemImages, &format!("/{id}")).await
}

/// Images whose name matches `name`.
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn search_images<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    name: &str,
) -> Result<Vec<SystemImage>, ApiError> {
    let body = client.get(Service::SystemImages, &format!("/search/{}", encode_segment(name))).await?;
    extract(body, IMAGE_SEARCH_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn images_by_os_type<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    os_type: &str,
) -> Result<Vec<SystemImage>, ApiError> {
    let body = client.get(Service::SystemImages, &format!("/os-type/{}", encode_segment(os_type))).await?;
    extract(body, IMAGE_SEARCH_PAYLOAD)
}

fn upload_fields(upload: &SystemImageUpload) -> Vec<FormField> {
    let text = |name: &str, value: &str| FormField::Text { name: name.to_owned(), value: value.to_owned() };
    let mut fields = vec![
        text("name", &upload.name),
        text("os_type", &upload.os_type),
        text("version", &upload.version),
    ];
    if let Some(description) = upload.description.as_deref().filter(|d| !d.is_empty()) {
        fields.push(text("description", description));
    }
    fields.push(FormField::File {
        name: "image".to_owned(),
        file_name: upload.file_name.clone(),
        bytes: upload.bytes.clone(),
    });
    fields
}
