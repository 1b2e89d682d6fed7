//! HTTP 处理器模块

pub mod article;
pub mod auth;
pub mod comment;
pub mod health;
pub mod user;
