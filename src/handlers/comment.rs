//! 评论的 HTTP 处理器

use crate::{
    auth::{
        guard::{require_admin, require_authenticated},
        middleware::AuthContext,
    },
    error::AppError,
    extract::AppJson,
    middleware::AppState,
    models::{comment::*, user::UserResponse},
    repository::UserStore,
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use futures::future::try_join_all;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 为评论填充作者
pub(crate) async fn with_authors(
    users: &dyn UserStore,
    comments: Vec<Comment>,
) -> Result<Vec<CommentWithUser>, AppError> {
    try_join_all(comments.into_iter().map(|comment| async move {
        let user = users
            .find_by_id(&comment.user_id)
            .await?
            .map(UserResponse::from);
        Ok::<_, AppError>(CommentWithUser { comment, user })
    }))
    .await
}

/// 列出文章下已审核的评论
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(article_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comments = state.comments.list_approved_by_article(article_id).await?;

    Ok(Json(with_authors(state.users.as_ref(), comments).await?))
}

/// 发表评论（需要登录，待审核）
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(article_id): Path<Uuid>,
    payload: Result<AppJson<CreateCommentRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    let user = require_authenticated(&auth_context)?;
    let AppJson(req) = payload?;
    let req = req.normalized();
    req.validate()?;

    state
        .articles
        .find_by_id(article_id)
        .await?
        .ok_or_else(|| AppError::not_found("article"))?;

    let comment = state
        .comments
        .create(article_id, user.id, &req.comment)
        .await?;

    tracing::info!(comment_id = %comment.id, %article_id, "Comment submitted for approval");

    Ok(Json(comment))
}

/// 审核评论（需要管理员）
pub async fn approve_comment(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let admin = require_admin(&auth_context)?;

    let comment = state
        .comments
        .approve(id)
        .await?
        .ok_or_else(|| AppError::not_found("comment"))?;

    tracing::info!(comment_id = %comment.id, approved_by = %admin.id, "Comment approved");

    Ok(Json(comment))
}
