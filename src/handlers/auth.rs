//! 认证相关的 HTTP 处理器

use crate::{
    auth::{guard::require_authenticated, middleware::AuthContext},
    error::AppError,
    extract::AppJson,
    middleware::AppState,
    models::{auth::*, user::*},
};
use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

/// 注册（成功后自动登录）
pub async fn register(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state
        .auth_service
        .register(req, &auth_context.tokens)
        .await?;

    Ok(Json(response))
}

/// 登录
pub async fn login(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state
        .auth_service
        .login(req, &auth_context.tokens)
        .await?;

    Ok(Json(response))
}

/// 获取当前用户信息
pub async fn get_current_user(auth_context: AuthContext) -> Result<impl IntoResponse, AppError> {
    let user = require_authenticated(&auth_context)?;
    Ok(Json(UserResponse::from(user.clone())))
}
