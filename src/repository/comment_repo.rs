//! Comment repository

use crate::{error::AppError, models::comment::*};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// 评论存储接口
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// 列出文章下已审核的评论，按时间正序
    async fn list_approved_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, AppError>;

    /// 创建评论（默认未审核）
    async fn create(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        comment: &str,
    ) -> Result<Comment, AppError>;

    /// 审核通过；评论不存在时返回 `None`
    async fn approve(&self, id: Uuid) -> Result<Option<Comment>, AppError>;
}

pub struct CommentRepository {
    db: PgPool,
}

impl CommentRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn list_approved_by_article(&self, article_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT * FROM comments WHERE article_id = $1 AND approved = TRUE ORDER BY created_at ASC",
        )
        .bind(article_id)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }

    async fn create(
        &self,
        article_id: Uuid,
        user_id: Uuid,
        comment: &str,
    ) -> Result<Comment, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, user_id, comment)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(article_id)
        .bind(user_id)
        .bind(comment)
        .fetch_one(&self.db)
        .await?;

        Ok(comment)
    }

    async fn approve(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        let comment = sqlx::query_as::<_, Comment>(
            "UPDATE comments SET approved = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(comment)
    }
}
