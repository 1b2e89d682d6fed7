//! Business logic services layer

pub mod auth_service;
pub mod storage_service;

pub use auth_service::AuthService;
pub use storage_service::StorageService;
