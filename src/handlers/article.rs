//! 文章的 HTTP 处理器

use crate::{
    auth::{
        guard::{require_authenticated, require_owner_or_admin},
        middleware::AuthContext,
    },
    error::AppError,
    extract::AppJson,
    handlers::comment::with_authors,
    middleware::AppState,
    models::{article::*, user::UserResponse},
};
use axum::{
    extract::{Multipart, Path, State},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// 列出全部文章
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let articles = state.articles.list_all().await?;
    Ok(Json(articles))
}

/// 获取文章详情：作者与已审核评论
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let article = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("article"))?;

    let (author, comments) = tokio::try_join!(
        state.users.find_by_id(&article.user_id),
        state.comments.list_approved_by_article(article.id),
    )?;

    let comments = with_authors(state.users.as_ref(), comments).await?;

    Ok(Json(ArticleDetail {
        article,
        user: author.map(UserResponse::from),
        comments,
    }))
}

/// 发表文章（multipart：title, body, photo）
///
/// 作者取自当前登录用户。
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let user = require_authenticated(&auth_context)?;

    let mut title: Option<String> = None;
    let mut body: Option<String> = None;
    let mut photo: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(field.text().await?),
            "body" => body = Some(field.text().await?),
            "photo" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                photo = Some((filename, data));
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let title = title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::invalid_input("title is required"))?;
    if title.chars().count() > 255 {
        return Err(AppError::invalid_input("title must be 1-255 characters"));
    }

    let (filename, data) = photo.ok_or_else(|| AppError::invalid_input("photo is required"))?;
    if data.is_empty() {
        return Err(AppError::invalid_input("photo is empty"));
    }

    let photo_path = state.storage_service.save(&filename, &data).await?;

    let created = state
        .articles
        .create(&NewArticle {
            user_id: user.id,
            title,
            body,
            photo: Some(photo_path.clone()),
        })
        .await;

    let article = match created {
        Ok(article) => article,
        Err(e) => {
            // 写库失败，回滚已保存的图片
            state.storage_service.remove(&photo_path).await;
            return Err(e);
        }
    };

    tracing::info!(article_id = %article.id, user_id = %user.id, "Article created");

    Ok(Json(article))
}

/// 更新文章（作者或管理员）
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
    payload: Result<AppJson<UpdateArticleRequest>, AppError>,
) -> Result<impl IntoResponse, AppError> {
    require_authenticated(&auth_context)?;
    let AppJson(req) = payload?;
    let req = req.normalized();
    req.validate()?;

    let existing = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("article"))?;
    require_owner_or_admin(&auth_context, existing.user_id)?;

    let article = state
        .articles
        .update(id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("article"))?;

    Ok(Json(article))
}

/// 删除文章（作者或管理员）
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    require_authenticated(&auth_context)?;

    let existing = state
        .articles
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("article"))?;
    require_owner_or_admin(&auth_context, existing.user_id)?;

    if !state.articles.delete(id).await? {
        return Err(AppError::not_found("article"));
    }

    tracing::info!(article_id = %id, "Article deleted");

    Ok(Json(true))
}
