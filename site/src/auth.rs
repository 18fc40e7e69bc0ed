//! Session extraction and the admin gate.
//!
//! The product never manages sessions itself; it consumes the platform's
//! bearer tokens. `SessionUser` resolves the token to a user through the
//! platform, and `RequireAdmin` layers the single role lookup on top: the
//! canonical role source is `profiles.role`, with the legacy `users` relation
//! consulted only when no profile row exists.

use crate::server::AppState;
use crate::types::UserId;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;
use uuid::Uuid;
use wayfare_platform::{PlatformApi, PlatformError};
use wayfare_web::AppError;

/// Bearer token from the `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| {
                AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
            })?
            .to_string();

        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token))
    }
}

/// Authenticated platform user. Use as a handler parameter to require a
/// session; rejection is 401.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The authenticated user id
    pub user_id: UserId,
    /// The user's email
    pub email: String,
}

#[async_trait]
impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let bearer = BearerToken::from_request_parts(parts, state).await?;

        let Some(platform) = state.platform.clone() else {
            return Err(AppError::unavailable("Platform not configured"));
        };

        let user = platform.get_user(&bearer.0).await.map_err(|err| match err {
            PlatformError::Unauthorized => AppError::unauthorized("Invalid or expired session"),
            other => AppError::internal(format!("Session lookup failed: {other}")),
        })?;

        Ok(Self {
            user_id: UserId::from_uuid(user.id),
            email: user.email,
        })
    }
}

/// The single role lookup behind every admin gate.
///
/// # Errors
///
/// Returns `PlatformError` when either read fails.
pub async fn fetch_role(
    platform: &Arc<dyn PlatformApi>,
    user_id: Uuid,
) -> Result<Option<String>, PlatformError> {
    // A profile row is authoritative even when its role is empty; the legacy
    // relation is only consulted when no profile exists at all.
    match platform.get_profile(user_id).await? {
        Some(profile) => Ok(profile.role),
        None => platform.get_legacy_role(user_id).await,
    }
}

/// Authenticated admin. Rejection is 401 without a session, 403 without the
/// admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin {
    /// The authenticated admin
    pub user: SessionUser,
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = SessionUser::from_request_parts(parts, state).await?;

        let Some(platform) = state.platform.clone() else {
            return Err(AppError::unavailable("Platform not configured"));
        };

        let role = fetch_role(&platform, *user.user_id.as_uuid())
            .await
            .map_err(|err| AppError::internal(format!("Role lookup failed: {err}")))?;

        if role.as_deref() != Some("admin") {
            return Err(AppError::forbidden("Admin role required"));
        }

        Ok(Self { user })
    }
}
