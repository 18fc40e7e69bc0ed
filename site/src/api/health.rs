//! Unauthenticated probes.

use crate::server::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the process answers
    pub status: &'static str,
}

/// `GET /api/health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Store-connectivity response.
#[derive(Debug, Serialize)]
pub struct CheckDbResponse {
    /// Whether the trivial count succeeded
    pub connected: bool,
    /// Count of `trips` rows, when connected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trips: Option<u64>,
}

/// `GET /api/check-db` — a trivial count against `trips`.
pub async fn check_db(State(state): State<AppState>) -> Json<CheckDbResponse> {
    let Some(platform) = state.platform else {
        return Json(CheckDbResponse {
            connected: false,
            trips: None,
        });
    };

    match platform.count_trips().await {
        Ok(count) => Json(CheckDbResponse {
            connected: true,
            trips: Some(count),
        }),
        Err(err) => {
            tracing::error!(error = %err, "Store connectivity check failed");
            Json(CheckDbResponse {
                connected: false,
                trips: None,
            })
        }
    }
}
