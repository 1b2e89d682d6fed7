//! 请求级认证上下文
//!
//! 每个请求在进入 handler 之前构建一次 [`AuthContext`]：
//! - 没有 `token` 头：匿名上下文
//! - 有 `token` 头但校验失败：直接以 401 结束请求，handler 不会执行
//! - 有效令牌：上下文携带解析出的用户

use crate::{
    auth::jwt::{JwtService, TokenVerification},
    error::AppError,
    models::user::User,
    repository::UserStore,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::{fmt, sync::Arc};

/// 携带令牌的请求头
pub const TOKEN_HEADER: &str = "token";

/// 认证上下文（附加到请求扩展）
#[derive(Clone)]
pub struct AuthContext {
    /// 已认证的用户；匿名请求为 `None`
    pub identity: Option<User>,
    /// 持有签名密钥，供需要重新签发令牌的 handler 使用
    pub tokens: Arc<JwtService>,
}

impl AuthContext {
    pub fn anonymous(tokens: Arc<JwtService>) -> Self {
        Self {
            identity: None,
            tokens,
        }
    }

    pub fn authenticated(user: User, tokens: Arc<JwtService>) -> Self {
        Self {
            identity: Some(user),
            tokens,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// 当前用户；匿名时为 `Forbidden`（没有凭证，而不是凭证错误）
    pub fn require_identity(&self) -> Result<&User, AppError> {
        self.identity
            .as_ref()
            .ok_or_else(|| AppError::forbidden("Authentication required"))
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("identity", &self.identity.as_ref().map(|u| u.id))
            .finish_non_exhaustive()
    }
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| {
                AppError::internal_error("AuthContext not found - auth middleware not configured")
            })
    }
}

/// 从 `token` 头提取令牌
///
/// 头不存在返回 `Ok(None)`；存在但不是合法的可见字符串视为认证失败。
pub fn extract_token(headers: &HeaderMap) -> Result<Option<&str>, AppError> {
    match headers.get(TOKEN_HEADER) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|s| Some(s.trim()))
            .map_err(|_| AppError::authentication("Malformed token header")),
    }
}

/// 认证上下文构建器
#[derive(Clone)]
pub struct AuthContextBuilder {
    tokens: Arc<JwtService>,
    users: Arc<dyn UserStore>,
}

impl AuthContextBuilder {
    pub fn new(tokens: Arc<JwtService>, users: Arc<dyn UserStore>) -> Self {
        Self { tokens, users }
    }

    /// 根据请求头构建上下文
    pub async fn build(&self, headers: &HeaderMap) -> Result<AuthContext, AppError> {
        let token = extract_token(headers)?;

        match self.tokens.verify(token)? {
            TokenVerification::Absent => Ok(AuthContext::anonymous(self.tokens.clone())),
            TokenVerification::Verified(claims) => {
                let user_id = claims.user_id()?;
                let user = self.users.find_by_id(&user_id).await?.ok_or_else(|| {
                    tracing::debug!(%user_id, "Token subject no longer exists");
                    AppError::authentication("Invalid token")
                })?;

                Ok(AuthContext::authenticated(user, self.tokens.clone()))
            }
        }
    }
}

/// 认证上下文中间件 - 无令牌放行为匿名，坏令牌直接拒绝
pub async fn auth_context_middleware(
    State(builder): State<AuthContextBuilder>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_context = builder.build(req.headers()).await?;

    tracing::debug!(
        authenticated = auth_context.is_authenticated(),
        "Auth context built"
    );

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_token_present() {
        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, "abc.def.ghi".parse().unwrap());

        assert_eq!(extract_token(&headers).unwrap(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_token_missing() {
        let headers = HeaderMap::new();
        assert_eq!(extract_token(&headers).unwrap(), None);
    }

    #[test]
    fn test_extract_token_ignores_authorization_header() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc".parse().unwrap());

        assert_eq!(extract_token(&headers).unwrap(), None);
    }

    #[test]
    fn test_extract_token_non_visible_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            TOKEN_HEADER,
            axum::http::HeaderValue::from_bytes(&[0xfa, 0xfb]).unwrap(),
        );

        assert!(matches!(
            extract_token(&headers),
            Err(AppError::Authentication(_))
        ));
    }
}
