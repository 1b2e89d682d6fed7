//! 错误处理单元测试
//!
//! 测试应用错误类型的状态码、类别与响应体

use axum::{http::StatusCode, response::IntoResponse};
use blog_service::error::AppError;
use http_body_util::BodyExt;

// ==================== 错误状态码测试 ====================

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::invalid_input("bad").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::authentication("bad").status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::forbidden("no").status_code(), StatusCode::FORBIDDEN);
    assert_eq!(AppError::not_found("user").status_code(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::PayloadTooLarge.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        AppError::internal_error("boom").status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_database_error_status_code() {
    let app_error = AppError::Database(sqlx::Error::RowNotFound);
    assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app_error.kind(), "INTERNAL");
}

#[test]
fn test_config_error_status_code() {
    let app_error = AppError::Config("Invalid config".to_string());
    assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}

// ==================== 错误类别测试 ====================

#[test]
fn test_error_kinds() {
    assert_eq!(AppError::invalid_input("x").kind(), "INVALID_INPUT");
    assert_eq!(AppError::authentication("x").kind(), "AUTHENTICATION_FAILURE");
    assert_eq!(AppError::forbidden("x").kind(), "FORBIDDEN_ACCESS");
    assert_eq!(AppError::not_found("x").kind(), "NOT_FOUND");
    assert_eq!(AppError::PayloadTooLarge.kind(), "PAYLOAD_TOO_LARGE");
}

// ==================== 用户消息测试 ====================

#[test]
fn test_user_message_hides_internals() {
    let io = AppError::Io(std::io::Error::new(
        std::io::ErrorKind::PermissionDenied,
        "/var/secret/path",
    ));
    assert_eq!(io.user_message(), "Storage error occurred");

    let internal = AppError::internal_error("stack trace here");
    assert_eq!(internal.user_message(), "Internal server error");
}

#[test]
fn test_user_message_keeps_client_errors() {
    assert_eq!(
        AppError::authentication("Invalid credentials").user_message(),
        "Invalid credentials"
    );
    assert_eq!(
        AppError::forbidden("Authentication required").user_message(),
        "Authentication required"
    );
}

#[test]
fn test_validation_errors_become_invalid_input() {
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(email)]
        email: String,
    }

    let err: AppError = Sample {
        email: "nope".to_string(),
    }
    .validate()
    .unwrap_err()
    .into();

    assert!(matches!(err, AppError::InvalidInput(_)));
}

// ==================== 响应体测试 ====================

#[tokio::test]
async fn test_error_response_body() {
    let response = AppError::forbidden("Authentication required").into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"]["code"], 403);
    assert_eq!(json["error"]["kind"], "FORBIDDEN_ACCESS");
    assert_eq!(json["error"]["message"], "Authentication required");
    assert!(json["error"]["request_id"].as_str().is_some());
}

#[tokio::test]
async fn test_server_error_response_is_generic() {
    let response = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["error"]["message"], "Database error occurred");
}
