//! 认证服务：注册、登录

use crate::{
    auth::{jwt::JwtService, password::PasswordHasher},
    config::SecurityConfig,
    error::AppError,
    models::{auth::*, user::*},
    repository::UserStore,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    policy: SecurityConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: PasswordHasher, policy: SecurityConfig) -> Self {
        Self {
            users,
            hasher,
            policy,
        }
    }

    /// 注册新用户：校验 → 哈希 → 持久化 → 立即签发令牌
    pub async fn register(
        &self,
        req: RegisterRequest,
        tokens: &JwtService,
    ) -> Result<AuthResponse, AppError> {
        // 先归一化再校验，登录与注册使用同一种邮箱形式
        let req = req.normalized();
        req.validate()?;
        PasswordHasher::validate_password_policy(&req.password, &self.policy)?;

        let password_hash = self.hasher.hash_blocking(req.password).await?;

        let user = self
            .users
            .create(&NewUser {
                name: req.name,
                email: req.email,
                password_hash,
                age: req.age,
                address: req.address,
            })
            .await?;

        let token = tokens.issue(&user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }

    /// 用户登录
    pub async fn login(
        &self,
        req: LoginRequest,
        tokens: &JwtService,
    ) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&req.email);

        // 获取用户
        let user = self.users.find_by_email(&email).await?.ok_or_else(|| {
            tracing::debug!("Login for unknown email");
            AppError::invalid_input("No user found")
        })?;

        // 验证密码
        let is_valid = self
            .hasher
            .verify_blocking(req.password, user.password_hash.clone())
            .await?;
        if !is_valid {
            tracing::warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::authentication("Invalid credentials"));
        }

        let token = tokens.issue(&user.id, &user.email)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthResponse {
            token,
            user: UserResponse::from(user),
        })
    }
}

/// 邮箱按小写比较
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
