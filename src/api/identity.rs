//! Caller identity
//!
//! Resolves the acting user from an `Authorization: Bearer <jwt>` header.
//! No header means an anonymous caller; a header that does not carry a valid
//! token is rejected with 401.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::errors::SnaplinkError;

use super::jwt::JwtService;

/// The resolved caller: `Some(owner id)` or anonymous
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub Option<String>);

impl Caller {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_none()
    }

    fn resolve(req: &HttpRequest) -> Result<Self, SnaplinkError> {
        let Some(header) = req.headers().get(AUTHORIZATION) else {
            return Ok(Caller(None));
        };

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SnaplinkError::unauthorized("Expected a Bearer token"))?;

        let jwt = req
            .app_data::<web::Data<JwtService>>()
            .ok_or_else(|| SnaplinkError::unauthorized("Authentication is not configured"))?;

        let claims = jwt.validate_token(token).map_err(|e| {
            debug!("Bearer token rejected: {}", e);
            SnaplinkError::unauthorized("Invalid or expired token")
        })?;

        Ok(Caller(Some(claims.sub)))
    }
}

impl FromRequest for Caller {
    type Error = SnaplinkError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::resolve(req))
    }
}
