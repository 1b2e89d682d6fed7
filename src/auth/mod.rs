//! Authentication and authorization module

pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use guard::{require_admin, require_authenticated, require_owner_or_admin};
pub use jwt::{Claims, JwtService, TokenVerification};
pub use middleware::{
    auth_context_middleware, extract_token, AuthContext, AuthContextBuilder, TOKEN_HEADER,
};
pub use password::PasswordHasher;
