use super::*;

#[test]
fn from_response_maps_401_to_unauthenticated() {
    let err = GatewayError::from_response(401, "/v1/category/all", "{}");
    assert_eq!(err, GatewayError::Unauthenticated { path: "/v1/category/all".to_owned() });
    assert_eq!(err.http_status(), 401);
}

#[test]
fn from_response_keeps_status_and_message() {
    let err = GatewayError::from_response(422, "/v1/workout/create", r#"{"message":"title taken"}"#);
    assert_eq!(err, GatewayError::Status { status: 422, message: "title taken".to_owned() });
    assert_eq!(err.message(), "title taken");
}

#[test]
fn message_from_body_falls_back_to_msg_then_unknown() {
    assert_eq!(message_from_body(r#"{"msg":"bad id"}"#), "bad id");
    assert_eq!(message_from_body(r#"{"message":"  "}"#), UNKNOWN_ERROR_MESSAGE);
    assert_eq!(message_from_body("<html>oops</html>"), UNKNOWN_ERROR_MESSAGE);
    assert_eq!(message_from_body(""), UNKNOWN_ERROR_MESSAGE);
}

#[test]
fn transport_errors_relay_as_bad_gateway() {
    let err = GatewayError::Transport("connection refused".into());
    assert_eq!(err.http_status(), 502);
    assert_eq!(err.message(), "request failed: connection refused");
}
