//! Comment domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Comment row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub article_id: Uuid,
    pub comment: String,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "comment must be 1-2000 characters"))]
    pub comment: String,
}

impl CreateCommentRequest {
    pub fn normalized(self) -> Self {
        Self {
            comment: self.comment.trim().to_string(),
        }
    }
}

/// Comment with its author
#[derive(Debug, Serialize)]
pub struct CommentWithUser {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<super::user::UserResponse>,
}
