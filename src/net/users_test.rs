use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::test_support::{BASE, anonymous_client, json_body, signed_in_client};
use crate::net::transport::Method;
use crate::net::types::Role;

fn user_json(id: i64, role: &str) -> Value {
    json!({ "id": id, "username": "ada", "email": "ada@example.com", "first_name": "", "last_name": "", "role": role })
}

// =============================================================
// Login and registration
// =============================================================

#[test]
fn login_unwraps_one_data_layer() {
    let (client, transport) = anonymous_client();
    transport.reply(
        200,
        json!({ "statusCode": 200, "message": "ok", "data": { "access": "jwt", "refresh": "r", "user": user_json(1, "ADMIN") } }),
    );
    let req = LoginRequest { email: "ada@example.com".into(), password: "pw".into() };
    let payload = block_on(login(&client, &req)).unwrap();

    assert_eq!(payload.access, "jwt");
    assert_eq!(payload.user.role, Role::Admin);
    let sent = transport.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.url, format!("{BASE}/USER-SERVICE/api/auth/login/"));
    assert_eq!(json_body(&sent), json!({ "email": "ada@example.com", "password": "pw" }));
}

#[test]
fn login_rejected_is_unauthorized() {
    let (client, transport) = anonymous_client();
    transport.reply(401, json!({ "detail": "No active account found with the given credentials" }));
    let req = LoginRequest { email: "ada@example.com".into(), password: "bad".into() };
    assert_eq!(block_on(login(&client, &req)).unwrap_err(), ApiError::Unauthorized);
}

#[test]
fn login_without_data_is_malformed() {
    let (client, transport) = anonymous_client();
    transport.reply(200, json!({ "access": "jwt" }));
    let req = LoginRequest { email: "a@b.c".into(), password: "pw".into() };
    assert!(matches!(block_on(login(&client, &req)).unwrap_err(), ApiError::MalformedEnvelope(_)));
}

#[test]
fn register_and_create_admin_hit_their_paths() {
    let (client, transport) = signed_in_client();
    let req = RegisterRequest {
        username: "bob".into(),
        email: "bob@example.com".into(),
        password: "password1".into(),
        confirm_password: "password1".into(),
    };
    block_on(register(&client, &req)).unwrap();
    block_on(create_admin(&client, &req)).unwrap();

    let seen = transport.requests();
    assert!(seen[0].url.ends_with("/api/auth/register/"));
    assert!(seen[1].url.ends_with("/api/auth/admins/"));
    assert_eq!(json_body(&seen[1])["confirm_password"], "password1");
}

// =============================================================
// Accounts
// =============================================================

#[test]
fn list_users_accepts_bare_list() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": [user_json(1, "USER"), user_json(2, "ADMIN")] }));
    let users = block_on(list_users(&client)).unwrap();
    assert_eq!(users.len(), 2);
}

#[test]
fn list_users_accepts_wrapped_list() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": { "users": [user_json(3, "USER")] } }));
    let users = block_on(list_users(&client)).unwrap();
    assert_eq!(users[0].id, 3);
}

#[test]
fn logged_in_user_reads_id_from_store() {
    let (client, transport) = signed_in_client();
    transport.reply(200, json!({ "data": user_json(7, "USER") }));
    let user = block_on(logged_in_user(&client)).unwrap();
    assert_eq!(user.id, 7);
    assert!(transport.last().url.ends_with("/users/7/"));
}

#[test]
fn logged_in_user_without_id_sends_nothing() {
    let (client, transport) = anonymous_client();
    assert_eq!(block_on(logged_in_user(&client)).unwrap_err(), ApiError::Unauthorized);
    assert!(transport.requests().is_empty());
}

#[test]
fn update_and_delete_user() {
    let (client, transport) = signed_in_client();
    let update = UserUpdate { status: Some("inactive".into()), ..UserUpdate::default() };
    block_on(update_user(&client, 4, &update)).unwrap();
    block_on(delete_user(&client, 4)).unwrap();

    let seen = transport.requests();
    assert_eq!(seen[0].method, Method::Patch);
    assert_eq!(json_body(&seen[0]), json!({ "status": "inactive" }));
    assert_eq!(seen[1].method, Method::Delete);
    assert!(seen[1].url.ends_with("/users/4/"));
}

// =============================================================
// Profile
// =============================================================

#[test]
fn update_profile_targets_own_id() {
    let (client, transport) = signed_in_client();
    let update = ProfileUpdate { username: "grace2".into(), email: "g2@example.com".into() };
    block_on(update_profile(&client, &update)).unwrap();
    let sent = transport.last();
    assert!(sent.url.ends_with("/users/7/"));
    assert_eq!(sent.header("Authorization"), Some("Bearer tok-7"));
    // The request alone never touches stored credentials.
    assert_eq!(client.credentials().read_username().as_deref(), Some("grace"));
}

#[test]
fn delete_profile_without_session_is_unauthorized() {
    let (client, transport) = anonymous_client();
    assert_eq!(block_on(delete_profile(&client)).unwrap_err(), ApiError::Unauthorized);
    assert!(transport.requests().is_empty());
}

#[test]
fn change_password_body() {
    let (client, transport) = signed_in_client();
    let req = ChangePassword { password: "old".into(), new_password: "newpassword".into() };
    block_on(change_password(&client, &req)).unwrap();
    let sent = transport.last();
    assert!(sent.url.ends_with("/users/change-password/"));
    assert_eq!(json_body(&sent), json!({ "password": "old", "new_password": "newpassword" }));
}

// =============================================================
// Password reset
// =============================================================

#[test]
fn reset_flow_paths() {
    let (client, transport) = anonymous_client();
    let email = "ada@example.com".to_owned();
    block_on(send_reset_code(&client, &ResetCodeRequest { email: email.clone() })).unwrap();
    block_on(verify_reset_code(&client, &VerifyCodeRequest { email: email.clone(), code: "123456".into() })).unwrap();
    block_on(reset_password(
        &client,
        &ResetPasswordRequest { email, code: "123456".into(), new_password: "longenough".into() },
    ))
    .unwrap();

    let urls: Vec<_> = transport.requests().into_iter().map(|r| r.url).collect();
    assert!(urls[0].ends_with("/users/send-reset-code"));
    assert!(urls[1].ends_with("/users/verify-code"));
    assert!(urls[2].ends_with("/users/reset-password"));
}

#[test]
fn reset_with_bad_code_carries_message() {
    let (client, transport) = anonymous_client();
    transport.reply(400, json!({ "error": "Invalid code" }));
    let err = block_on(verify_reset_code(
        &client,
        &VerifyCodeRequest { email: "a@b.c".into(), code: "000000".into() },
    ))
    .unwrap_err();
    assert_eq!(err, ApiError::UnexpectedStatus { status: 400, message: Some("Invalid code".into()) });
}
