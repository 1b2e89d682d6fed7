//! JWT token issuance and verification
//! Stateless HS256 bearer tokens; a token dies only by expiry.

use crate::{config::SecurityConfig, error::AppError};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User email
    pub email: String,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::authentication("Invalid token subject"))
    }
}

/// Outcome of verifying an optional bearer token.
///
/// A token that is present but bad never lands here; it is an
/// [`AppError::Authentication`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    /// No token was presented
    Absent,
    /// Signature and expiry both check out
    Verified(Claims),
}

/// JWT service: owns the process-wide signing key
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl JwtService {
    /// Create JWT service from a signing key and a default TTL
    pub fn new(secret: &str, token_ttl: Duration) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl,
        })
    }

    /// Create JWT service from config
    pub fn from_config(config: &SecurityConfig) -> Result<Self, AppError> {
        Self::new(
            config.jwt_secret.expose_secret(),
            Duration::seconds(config.token_ttl_secs as i64),
        )
    }

    /// Issue a token with the configured TTL
    pub fn issue(&self, user_id: &Uuid, email: &str) -> Result<String, AppError> {
        self.issue_with_ttl(user_id, email, self.token_ttl)
    }

    /// Issue a token that expires `ttl` from now
    pub fn issue_with_ttl(
        &self,
        user_id: &Uuid,
        email: &str,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let expiration = now + ttl;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Validate and decode a token that is known to be present
    pub fn validate_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AppError::authentication("Token expired"),
                    _ => AppError::authentication("Invalid token"),
                }
            })
    }

    /// Verify an optional token: absence is not a failure, a bad token is
    pub fn verify(&self, token: Option<&str>) -> Result<TokenVerification, AppError> {
        match token {
            None => Ok(TokenVerification::Absent),
            Some(token) => self.validate_token(token).map(TokenVerification::Verified),
        }
    }
}
