//! User profile endpoints.

use crate::auth::SessionUser;
use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use wayfare_platform::ProfileRow;
use wayfare_web::AppError;

/// A profile as the API returns it.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Display name
    pub full_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// WhatsApp contact number
    pub whatsapp_number: Option<String>,
}

impl From<ProfileRow> for ProfileResponse {
    fn from(row: ProfileRow) -> Self {
        Self {
            full_name: row.full_name,
            avatar_url: row.avatar_url,
            whatsapp_number: row.whatsapp_number,
        }
    }
}

/// `GET /api/user/profile`
///
/// # Errors
///
/// 401 without a session. A missing row or a degraded platform yields an
/// empty profile.
pub async fn get_profile(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<ProfileResponse>, AppError> {
    let empty = ProfileResponse {
        full_name: None,
        avatar_url: None,
        whatsapp_number: None,
    };

    let Some(platform) = state.platform else {
        return Ok(Json(empty));
    };

    match platform.get_profile(*session.user_id.as_uuid()).await {
        Ok(Some(row)) => Ok(Json(row.into())),
        Ok(None) => Ok(Json(empty)),
        Err(err) => {
            tracing::error!(error = %err, "Profile fetch failed, returning empty");
            Ok(Json(empty))
        }
    }
}

/// `PATCH /api/user/profile` body. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    /// Display name
    pub full_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// WhatsApp contact number
    pub whatsapp_number: Option<String>,
}

/// `PATCH /api/user/profile`
///
/// # Errors
///
/// 401 without a session, 503 without a platform, 500 on a write failure.
pub async fn update_profile(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let Some(platform) = state.platform else {
        return Err(AppError::unavailable("Platform not configured"));
    };

    let user_id = *session.user_id.as_uuid();

    // Merge over the existing row so an omitted field is not erased.
    let existing = platform
        .get_profile(user_id)
        .await
        .map_err(|err| AppError::internal(format!("Profile fetch failed: {err}")))?
        .unwrap_or(ProfileRow {
            user_id,
            ..ProfileRow::default()
        });

    let merged = ProfileRow {
        user_id,
        full_name: request.full_name.or(existing.full_name),
        avatar_url: request.avatar_url.or(existing.avatar_url),
        whatsapp_number: request.whatsapp_number.or(existing.whatsapp_number),
        role: existing.role,
    };

    let stored = platform
        .upsert_profile(merged)
        .await
        .map_err(|err| AppError::internal(format!("Profile update failed: {err}")))?;

    Ok(Json(stored.into()))
}
