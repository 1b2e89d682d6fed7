//! Article repository

use crate::{error::AppError, models::article::*};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// 文章存储接口
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, AppError>;

    /// 全部文章，最新的在前
    async fn list_all(&self) -> Result<Vec<Article>, AppError>;

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Article>, AppError>;

    async fn create(&self, new_article: &NewArticle) -> Result<Article, AppError>;

    /// 部分更新；`None` 字段保持不变。文章不存在时返回 `None`
    async fn update(
        &self,
        id: Uuid,
        req: &UpdateArticleRequest,
    ) -> Result<Option<Article>, AppError>;

    /// 删除文章，返回是否删除了一行
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

pub struct ArticleRepository {
    db: PgPool,
}

impl ArticleRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleStore for ArticleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>("SELECT * FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(article)
    }

    async fn list_all(&self) -> Result<Vec<Article>, AppError> {
        let articles =
            sqlx::query_as::<_, Article>("SELECT * FROM articles ORDER BY created_at DESC")
                .fetch_all(&self.db)
                .await?;

        Ok(articles)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Article>, AppError> {
        let articles = sqlx::query_as::<_, Article>(
            "SELECT * FROM articles WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(articles)
    }

    async fn create(&self, new_article: &NewArticle) -> Result<Article, AppError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (user_id, title, body, photo)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new_article.user_id)
        .bind(&new_article.title)
        .bind(&new_article.body)
        .bind(&new_article.photo)
        .fetch_one(&self.db)
        .await?;

        Ok(article)
    }

    async fn update(
        &self,
        id: Uuid,
        req: &UpdateArticleRequest,
    ) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(&req.body)
        .fetch_optional(&self.db)
        .await?;

        Ok(article)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
