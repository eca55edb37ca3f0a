//! User/auth service: login, registration, accounts and password reset.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use serde_json::Value;

use super::client::{ApiClient, Service};
use super::envelope::{descend, extract};
use super::error::ApiError;
use super::transport::Transport;
use super::types::{
    ChangePassword, LoginPayload, LoginRequest, ProfileUpdate, RegisterRequest, ResetCodeRequest,
    ResetPasswordRequest, User, UserUpdate, VerifyCodeRequest,
};
use crate::util::storage::KeyValueStore;

const LOGIN_PAYLOAD: &[&str] = &["data"];
const USER_PAYLOAD: &[&str] = &["data"];
const USER_LIST_PAYLOAD: &[&str] = &["data"];

/// # Errors
///
/// [`ApiError::Unauthorized`] for bad credentials, otherwise see [`ApiClient::call`].
pub async fn login<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &LoginRequest,
) -> Result<LoginPayload, ApiError> {
    let body = client.post(Service::Users, "/login/", request).await?;
    extract(body, LOGIN_PAYLOAD)
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn register<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &RegisterRequest,
) -> Result<Value, ApiError> {
    client.post(Service::Users, "/register/", request).await
}

/// Create another administrator account.
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn create_admin<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &RegisterRequest,
) -> Result<Value, ApiError> {
    client.post(Service::Users, "/admins/", request).await
}

/// All accounts. The payload is either a bare list or `{ "users": [...] }`.
///
/// # Errors
///
/// See [`ApiClient::call`].
pub async fn list_users<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> Result<Vec<User>, ApiError> {
    let body = client.get(Service::Users, "/users/").await?;
    let payload = descend(body, USER_LIST_PAYLOAD)?;
    if payload.is_array() {
        extract(payload, &[])
    } else {
        extract(payload, &["users"])
    }
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn get_user<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<User, ApiError> {
    let body = client.get(Service::Users, &format!("/users/{id}/")).await?;
    extract(body, USER_PAYLOAD)
}

/// The account whose id is in the credential store.
///
/// # Errors
///
/// [`ApiError::Unauthorized`] without sending anything when no user id is
/// stored; otherwise see [`ApiClient::call`].
pub async fn logged_in_user<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> Result<User, ApiError> {
    let id = client.credentials().read_user_id().ok_or(ApiError::Unauthorized)?;
    get_user(client, id).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn update_user<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    id: i64,
    update: &UserUpdate,
) -> Result<Value, ApiError> {
    client.patch(Service::Users, &format!("/users/{id}/"), update).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn delete_user<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>, id: i64) -> Result<Value, ApiError> {
    client.delete(Service::Users, &format!("/users/{id}/")).await
}

/// Update the signed-in account's username and email.
///
/// Only sends the request. Writing the new values back into the credential
/// store is the caller's job (see `state::auth::apply_profile_update`).
///
/// # Errors
///
/// [`ApiError::Unauthorized`] when no user id is stored; otherwise see
/// [`ApiClient::call`].
pub async fn update_profile<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    update: &ProfileUpdate,
) -> Result<Value, ApiError> {
    let id = client.credentials().read_user_id().ok_or(ApiError::Unauthorized)?;
    client.patch(Service::Users, &format!("/users/{id}/"), update).await
}

/// Delete the signed-in account.
///
/// # Errors
///
/// [`ApiError::Unauthorized`] when no user id is stored; otherwise see
/// [`ApiClient::call`].
pub async fn delete_profile<T: Transport, S: KeyValueStore>(client: &ApiClient<T, S>) -> Result<Value, ApiError> {
    let id = client.credentials().read_user_id().ok_or(ApiError::Unauthorized)?;
    delete_user(client, id).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn change_password<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &ChangePassword,
) -> Result<Value, ApiError> {
    client.patch(Service::Users, "/users/change-password/", request).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn send_reset_code<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &ResetCodeRequest,
) -> Result<Value, ApiError> {
    client.post(Service::Users, "/users/send-reset-code", request).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn verify_reset_code<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &VerifyCodeRequest,
) -> Result<Value, ApiError> {
    client.post(Service::Users, "/users/verify-code", request).await
}

/// # Errors
///
/// See [`ApiClient::call`].
pub async fn reset_password<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    request: &ResetPasswordRequest,
) -> Result<Value, ApiError> {
    client.post(Service::Users, "/users/reset-password", request).await
}
