//! 请求提取器
//!
//! axum 自带的 `Json` 在解析失败时返回纯文本 415/422，
//! 这里统一转换为 `AppError::InvalidInput`，响应体与其他错误一致。

use crate::error::AppError;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON 请求体
///
/// 需要先执行守卫的 handler 以 `Result<AppJson<T>, AppError>` 接收，
/// 守卫通过后再用 `?` 取出请求体。
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
