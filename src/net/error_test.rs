use super::*;

#[test]
fn unexpected_status_display_includes_message() {
    let err = ApiError::UnexpectedStatus { status: 404, message: Some("VM not found".to_owned()) };
    assert_eq!(err.to_string(), "request failed (404): VM not found");
}

#[test]
fn unexpected_status_display_without_message() {
    let err = ApiError::UnexpectedStatus { status: 500, message: None };
    assert_eq!(err.to_string(), "request failed (500)");
    let blank = ApiError::UnexpectedStatus { status: 502, message: Some(String::new()) };
    assert_eq!(blank.to_string(), "request failed (502)");
}

#[test]
fn only_unauthorized_is_unauthorized() {
    assert!(ApiError::Unauthorized.is_unauthorized());
    assert!(!ApiError::Network("down".to_owned()).is_unauthorized());
    assert!(!ApiError::MalformedEnvelope("x".to_owned()).is_unauthorized());
    assert!(!ApiError::UnexpectedStatus { status: 403, message: None }.is_unauthorized());
}

#[test]
fn network_display_names_cause() {
    assert_eq!(ApiError::Network("timeout".to_owned()).to_string(), "service unreachable: timeout");
}
