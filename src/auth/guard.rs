//! Per-operation guards over [`AuthContext`]

use crate::{auth::middleware::AuthContext, error::AppError, models::user::User};
use uuid::Uuid;

/// The caller must be logged in; anonymous callers get `Forbidden`.
pub fn require_authenticated(ctx: &AuthContext) -> Result<&User, AppError> {
    ctx.require_identity()
}

/// The caller must be logged in and carry the admin flag
pub fn require_admin(ctx: &AuthContext) -> Result<&User, AppError> {
    let user = require_authenticated(ctx)?;
    if !user.admin {
        return Err(AppError::forbidden("Administrator privileges required"));
    }
    Ok(user)
}

/// The caller must own the resource, or be an admin
pub fn require_owner_or_admin(ctx: &AuthContext, owner_id: Uuid) -> Result<&User, AppError> {
    let user = require_authenticated(ctx)?;
    if user.id != owner_id && !user.admin {
        return Err(AppError::forbidden("Only the owner can modify this resource"));
    }
    Ok(user)
}
