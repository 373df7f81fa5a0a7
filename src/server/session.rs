use super::response::ApiError;
use super::state::ServerState;
use crate::user::auth::AuthTokenValue;
use crate::user::{Caller, Permission, UserRole};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Session {
    pub user_no: usize,
    pub token: String,
    pub role: UserRole,
}

impl Session {
    pub fn caller(&self) -> Caller {
        Caller {
            user_no: self.user_no,
            role: self.role,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.has_permission(permission)
    }

    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            debug!(
                "User {} lacks permission {:?}",
                self.user_no, permission
            );
            Err(ApiError::Forbidden(
                "administrator privileges required".to_string(),
            ))
        }
    }
}

pub const COOKIE_SESSION_TOKEN_KEY: &str = "session_token";
pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";

async fn extract_session_token_from_cookies(
    parts: &mut Parts,
    ctx: &ServerState,
) -> Option<String> {
    CookieJar::from_request_parts(parts, ctx)
        .await
        .ok()?
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(Cookie::value)
        .map(|s| s.to_string())
}

/// Accepts `Authorization: Bearer <token>` as well as a bare token.
fn extract_session_token_from_headers(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(HEADER_SESSION_TOKEN_KEY)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

async fn extract_session_from_request_parts(
    parts: &mut Parts,
    ctx: &ServerState,
) -> Result<Session, ApiError> {
    let token = match extract_session_token_from_headers(parts) {
        Some(token) => token,
        None => extract_session_token_from_cookies(parts, ctx)
            .await
            .ok_or_else(|| {
                debug!("No token in headers nor cookies.");
                ApiError::Unauthorized("authentication required".to_string())
            })?,
    };

    let user = ctx
        .user_manager
        .authenticate(&AuthTokenValue(token.clone()))
        .map_err(ApiError::from)?
        .ok_or_else(|| {
            debug!("Unknown or revoked auth token");
            ApiError::Unauthorized("invalid or expired token".to_string())
        })?;

    Ok(Session {
        user_no: user.user_no,
        token,
        role: user.role(),
    })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        extract_session_from_request_parts(parts, ctx).await
    }
}
