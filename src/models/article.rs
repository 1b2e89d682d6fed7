//! Article domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Article row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Article {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    /// Path relative to the public dir, e.g. `upload/2024/05/cat.png`
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new article row
#[derive(Debug, Clone)]
pub struct NewArticle {
    pub user_id: Uuid,
    pub title: String,
    pub body: Option<String>,
    pub photo: Option<String>,
}

/// Update article request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    pub body: Option<String>,
}

impl UpdateArticleRequest {
    /// 去掉首尾空白，空白标题在校验时被拒绝
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|t| t.trim().to_string()),
            body: self.body,
        }
    }
}

pub type ArticleResponse = Article;

/// Article with its author and approved comments
#[derive(Debug, Serialize)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub user: Option<super::user::UserResponse>,
    pub comments: Vec<super::comment::CommentWithUser>,
}
