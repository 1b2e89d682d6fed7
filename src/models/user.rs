//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub age: i32,
    pub address: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new user row; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i32,
    pub address: String,
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "email is not a valid address"))]
    pub email: String,
    pub password: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    #[validate(length(min = 1, max = 255, message = "address must be 1-255 characters"))]
    pub address: String,
}

impl RegisterRequest {
    /// Trim text fields and lowercase the email; run before `validate()`
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            address: self.address.trim().to_string(),
            ..self
        }
    }
}

/// User response (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub address: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            age: user.age,
            address: user.address,
            admin: user.admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// User with the articles they wrote
#[derive(Debug, Serialize)]
pub struct UserWithArticles {
    #[serde(flatten)]
    pub user: UserResponse,
    pub articles: Vec<super::article::ArticleResponse>,
}

/// Paginated user listing
#[derive(Debug, Serialize)]
pub struct UserPage {
    pub users: Vec<UserResponse>,
    pub paginate: super::pagination::Paginate,
}
