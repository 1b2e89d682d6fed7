//! 数据模型模块

pub mod article;
pub mod auth;
pub mod comment;
pub mod pagination;
pub mod user;
