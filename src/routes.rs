//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, services::ServeDir};

use crate::{auth::middleware::auth_context_middleware, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 公开端点（健康检查）
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    // API 路由：全部经过认证上下文中间件，守卫在各 handler 内判断
    let api_routes = Router::new()
        // 认证
        .route("/api/v1/auth/register", post(handlers::auth::register))
        .route("/api/v1/auth/login", post(handlers::auth::login))
        .route("/api/v1/auth/me", get(handlers::auth::get_current_user))
        // 用户
        .route("/api/v1/users", get(handlers::user::list_users))
        .route("/api/v1/users/{id}", get(handlers::user::get_user))
        // 文章
        .route(
            "/api/v1/articles",
            get(handlers::article::list_articles).post(handlers::article::create_article).layer(
                DefaultBodyLimit::max(state.config.storage.max_upload_bytes),
            ),
        )
        .route(
            "/api/v1/articles/{id}",
            get(handlers::article::get_article)
                .put(handlers::article::update_article)
                .delete(handlers::article::delete_article),
        )
        // 评论
        .route(
            "/api/v1/articles/{id}/comments",
            get(handlers::comment::list_comments).post(handlers::comment::create_comment),
        )
        .route(
            "/api/v1/comments/{id}/approve",
            post(handlers::comment::approve_comment),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.auth_context.clone(),
            auth_context_middleware,
        ));

    // 上传文件静态服务
    let uploads = ServeDir::new(state.storage_service.upload_root());

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .nest_service("/upload", uploads)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
