use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::AuthConfig;
use crate::utils::generate_random_code;

/// Bearer token claims; `sub` is the opaque owner id
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

/// JWT Service for issuing and validating bearer tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_minutes: u64,
}

impl JwtService {
    pub fn new(secret: &str, token_minutes: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_minutes,
        }
    }

    /// Create JwtService from the `[auth]` section
    pub fn from_config(config: &AuthConfig) -> Self {
        let secret = if config.jwt_secret.is_empty() {
            // 进程内随机密钥，重启后旧 token 全部失效
            warn!("auth.jwt_secret is empty, generating a random secret for this process");
            generate_random_code(48)
        } else {
            config.jwt_secret.clone()
        };

        Self::new(&secret, config.token_ttl_minutes)
    }

    /// Issue a token for `user_id`
    pub fn issue_token(&self, user_id: &str) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = i64::try_from(self.token_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                jsonwebtoken::errors::Error::from(ErrorKind::InvalidClaimFormat(format!(
                    "exp: token lifetime of {} minutes is out of range",
                    self.token_minutes
                )))
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.sub.is_empty() {
            return Err(jsonwebtoken::errors::Error::from(ErrorKind::InvalidSubject));
        }

        Ok(token_data.claims)
    }
}
