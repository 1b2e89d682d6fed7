//! User repository (数据库访问层)

use crate::{error::AppError, models::user::*};
use async_trait::async_trait;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// PostgreSQL 唯一约束冲突
const UNIQUE_VIOLATION: &str = "23505";

/// 认证核心依赖的用户存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError>;

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 创建用户；邮箱重复时返回 `InvalidInput`
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError>;

    /// 分页列出用户
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError>;

    /// 统计用户数量
    async fn count(&self) -> Result<i64, AppError>;
}

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.db)
            .await?;

        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, age, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.age)
        .bind(&new_user.address)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                AppError::invalid_input("Email already registered")
            }
            _ => AppError::Database(e),
        })
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await?
            .get(0);

        Ok(count)
    }
}
