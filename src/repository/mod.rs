//! Database repository layer

pub mod article_repo;
pub mod comment_repo;
pub mod user_repo;

pub use article_repo::*;
pub use comment_repo::*;
pub use user_repo::*;

use sqlx::PgPool;
use std::sync::Arc;

/// 应用使用的全部存储
///
/// 生产环境由 [`Stores::postgres`] 构建；测试可替换为内存实现。
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub articles: Arc<dyn ArticleStore>,
    pub comments: Arc<dyn CommentStore>,
}

impl Stores {
    pub fn postgres(db: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(db.clone())),
            articles: Arc::new(ArticleRepository::new(db.clone())),
            comments: Arc::new(CommentRepository::new(db)),
        }
    }
}
