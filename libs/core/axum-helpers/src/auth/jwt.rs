use super::config::JwtConfig;
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime: 15 minutes
pub const ACCESS_TOKEN_TTL: i64 = 900;

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,        // Username
    pub roles: Vec<String>, // Role names held at login time
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtAuth {
    encoding: EncodingKey,
    decoding: DecodingKey,
    access_ttl_secs: i64,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_secs = config.access_ttl_secs, "JWT auth initialized");
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            access_ttl_secs: config.access_ttl_secs,
        }
    }

    pub fn access_ttl_secs(&self) -> i64 {
        self.access_ttl_secs
    }

    /// Sign an access token for `username`.
    pub fn create_access_token(&self, username: &str, roles: &[String]) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: username.to_string(),
            roles: roles.to_vec(),
            exp: (now + Duration::seconds(self.access_ttl_secs)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify signature and expiry, returning the decoded claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data =
            decode::<JwtClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        Ok(token_data.claims)
    }
}

/// Handlers behind [`jwt_auth_middleware`](super::jwt_auth_middleware) can take
/// `claims: JwtClaims` directly.
impl<S> FromRequestParts<S> for JwtClaims
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("test-secret-that-is-long-enough-for-hs256").unwrap())
    }

    #[test]
    fn test_token_round_trip_keeps_subject_and_roles() {
        let auth = auth();
        let token = auth
            .create_access_token("aragorn", &["player".to_string()])
            .unwrap();

        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "aragorn");
        assert_eq!(claims.roles, vec!["player".to_string()]);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other =
            JwtAuth::new(&JwtConfig::new("another-secret-that-is-long-enough-too!").unwrap());
        let token = other.create_access_token("aragorn", &[]).unwrap();

        assert!(auth().verify_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = JwtConfig::new("test-secret-that-is-long-enough-for-hs256")
            .unwrap()
            .with_access_ttl(-3600);
        let auth = JwtAuth::new(&config);
        let token = auth.create_access_token("aragorn", &[]).unwrap();

        assert!(auth.verify_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(auth().verify_token("not.a.jwt").is_err());
    }
}
