//! 博客服务库
//! 用户、文章、评论的 HTTP API，以及令牌认证与请求级授权

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod telemetry;
