//! 用户查询的 HTTP 处理器

use crate::{
    auth::{guard::require_authenticated, middleware::AuthContext},
    error::AppError,
    middleware::AppState,
    models::{pagination::*, user::*},
};
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

/// 分页列出用户（需要登录）
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    require_authenticated(&auth_context)?;

    let (_, limit) = query.resolve();
    let users = state.users.list(limit, query.offset()).await?;
    let total = state.users.count().await?;

    Ok(Json(UserPage {
        users: users.into_iter().map(UserResponse::from).collect(),
        paginate: Paginate::new(total, &query),
    }))
}

/// 获取用户详情及其文章
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("user"))?;

    let articles = state.articles.list_by_user(user.id).await?;

    Ok(Json(UserWithArticles {
        user: UserResponse::from(user),
        articles,
    }))
}
