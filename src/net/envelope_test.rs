use super::*;
use serde_json::json;

#[test]
fn descend_empty_path_returns_body() {
    let body = json!({ "a": 1 });
    assert_eq!(descend(body.clone(), &[]).unwrap(), body);
}

#[test]
fn descend_two_data_layers() {
    let body = json!({ "statusCode": 200, "data": { "data": { "vms": [1, 2] } } });
    assert_eq!(descend(body, &["data", "data", "vms"]).unwrap(), json!([1, 2]));
}

#[test]
fn descend_reports_first_missing_key() {
    let body = json!({ "data": { "vms": [] } });
    let err = descend(body, &["data", "data", "vms"]).unwrap_err();
    assert_eq!(err, ApiError::MalformedEnvelope("missing `data.data`".to_owned()));
}

#[test]
fn descend_through_non_object_is_malformed() {
    let body = json!({ "data": [1, 2, 3] });
    let err = descend(body, &["data", "items"]).unwrap_err();
    assert_eq!(err, ApiError::MalformedEnvelope("missing `data.items`".to_owned()));
}

#[test]
fn descend_null_body_is_malformed() {
    let err = descend(Value::Null, &["data"]).unwrap_err();
    assert!(matches!(err, ApiError::MalformedEnvelope(_)));
}

#[test]
fn extract_deserializes_payload() {
    let body = json!({ "data": { "ids": [3, 4] } });
    let ids: Vec<u32> = extract(body, &["data", "ids"]).unwrap();
    assert_eq!(ids, vec![3, 4]);
}

#[test]
fn extract_type_mismatch_is_malformed() {
    let body = json!({ "data": { "ids": "nope" } });
    let err = extract::<Vec<u32>>(body, &["data", "ids"]).unwrap_err();
    match err {
        ApiError::MalformedEnvelope(msg) => assert!(msg.starts_with("payload at `data.ids`")),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn server_message_prefers_message_then_detail_then_error() {
    assert_eq!(server_message(&json!({ "message": "m", "detail": "d" })).as_deref(), Some("m"));
    assert_eq!(server_message(&json!({ "detail": "Missing authentication token" })).as_deref(), Some("Missing authentication token"));
    assert_eq!(server_message(&json!({ "error": "Email requis" })).as_deref(), Some("Email requis"));
    assert_eq!(server_message(&json!({ "statusCode": 500 })), None);
}
