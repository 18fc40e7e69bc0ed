//! Lead endpoints.
//!
//! Creation is public but requires at least one of phone or email. The lead's
//! source is tagged by comparing the request's bearer token against the
//! internal API token: a match means the submission came from the product's
//! own surfaces (`website`), anything else is `external`.

use crate::auth::RequireAdmin;
use crate::server::AppState;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_platform::NewLead;
use wayfare_web::{AppError, ClientIp, CorrelationId, UserAgent};

/// `POST /api/leads` body.
#[derive(Debug, Deserialize)]
pub struct CreateLeadRequest {
    /// Lead name
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Free-text message
    pub message: Option<String>,
}

/// A lead as the API returns it.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    /// Lead id
    pub id: Uuid,
    /// Lead name
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Free-text message
    pub message: Option<String>,
    /// `website` or `external`
    pub source: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn lead_source(state: &AppState, headers: &HeaderMap) -> String {
    let is_internal = matches!(
        (bearer_token(headers), state.internal_api_token.as_deref()),
        (Some(token), Some(internal)) if token == internal
    );
    if is_internal {
        "website".to_string()
    } else {
        "external".to_string()
    }
}

fn has_contact(request: &CreateLeadRequest) -> bool {
    let filled = |field: &Option<String>| {
        field
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    };
    filled(&request.phone) || filled(&request.email)
}

/// `POST /api/leads`
///
/// # Errors
///
/// 400 without phone or email, 503 without a platform, 500 on a write
/// failure.
pub async fn create_lead(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    client_ip: ClientIp,
    user_agent: UserAgent,
    headers: HeaderMap,
    Json(request): Json<CreateLeadRequest>,
) -> Result<(StatusCode, Json<LeadResponse>), AppError> {
    if !has_contact(&request) {
        return Err(AppError::validation("Either phone or email is required"));
    }

    let Some(platform) = state.platform.clone() else {
        return Err(AppError::unavailable("Platform not configured"));
    };

    let source = lead_source(&state, &headers);
    tracing::info!(
        correlation_id = %correlation_id.0,
        client_ip = %client_ip.0,
        user_agent = %user_agent.0,
        source = %source,
        "Lead received"
    );
    let row = platform
        .insert_lead(NewLead {
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
            source,
        })
        .await
        .map_err(|err| AppError::internal(format!("Lead insert failed: {err}")))?;

    Ok((
        StatusCode::CREATED,
        Json(LeadResponse {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            source: row.source,
            created_at: row.created_at,
        }),
    ))
}

/// `GET /api/leads` — admin only.
///
/// # Errors
///
/// 401 without a session, 403 without the admin role, 500 on a read failure.
pub async fn list_leads(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<LeadResponse>>, AppError> {
    let Some(platform) = state.platform else {
        return Err(AppError::unavailable("Platform not configured"));
    };

    let rows = platform
        .list_leads()
        .await
        .map_err(|err| AppError::internal(format!("Leads fetch failed: {err}")))?;

    let leads = rows
        .into_iter()
        .map(|row| LeadResponse {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            source: row.source,
            created_at: row.created_at,
        })
        .collect();
    Ok(Json(leads))
}
