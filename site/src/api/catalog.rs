//! Published catalog endpoints.
//!
//! Lists accept the mood query (`q`) and the facet dropdown values as query
//! parameters, evaluated server-side by the search kernel against the
//! normalized catalog. Read failures and a missing platform handle degrade to
//! an empty list with a logged error; single-entry lookups return 404.

use crate::catalog::{self, StayEntry, TripEntry};
use crate::search::{self, DurationBucket, FacetFilters};
use crate::server::AppState;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use wayfare_platform::PlatformError;
use wayfare_web::AppError;

/// Query parameters shared by both catalog lists.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Free-text mood query
    pub q: Option<String>,
    /// Region dropdown
    pub region: Option<String>,
    /// Terrain dropdown
    pub terrain: Option<String>,
    /// Duration dropdown (`short` / `long`)
    pub duration: Option<String>,
}

impl CatalogQuery {
    fn filters(&self) -> FacetFilters {
        FacetFilters {
            region: self
                .region
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(str::to_lowercase),
            terrain: self
                .terrain
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase),
            duration: self.duration.as_deref().and_then(DurationBucket::parse),
        }
    }

    fn query_text(&self) -> &str {
        self.q.as_deref().unwrap_or("")
    }
}

/// `GET /api/trips`
pub async fn list_trips(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Json<Vec<TripEntry>> {
    let Some(platform) = state.platform else {
        return Json(Vec::new());
    };

    let rows = match platform.list_trips().await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "Trip list fetch failed, returning empty");
            return Json(Vec::new());
        }
    };

    let filters = params.filters();
    let trips = rows
        .into_iter()
        .filter_map(catalog::normalize_trip)
        .filter(|trip| search::matches(&trip.facets(), &filters, params.query_text()))
        .collect();
    Json(trips)
}

/// `GET /api/stays`
pub async fn list_stays(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Json<Vec<StayEntry>> {
    let Some(platform) = state.platform else {
        return Json(Vec::new());
    };

    let rows = match platform.list_stays().await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "Stay list fetch failed, returning empty");
            return Json(Vec::new());
        }
    };

    let filters = params.filters();
    let stays = rows
        .into_iter()
        .filter_map(catalog::normalize_stay)
        .filter(|stay| search::matches(&stay.facets(), &filters, params.query_text()))
        .collect();
    Json(stays)
}

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("Invalid id"))
}

/// `GET /api/trips/:id`
///
/// # Errors
///
/// 400 on a malformed id; 404 on an unknown or unpublished trip.
pub async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TripEntry>, AppError> {
    let uuid = parse_id(&id)?;
    let Some(platform) = state.platform else {
        return Err(AppError::not_found("trip", &id));
    };

    let row = platform.get_trip(uuid).await.map_err(|err| match err {
        PlatformError::NotFound => AppError::not_found("trip", &id),
        other => AppError::internal(format!("Trip fetch failed: {other}")),
    })?;

    catalog::normalize_trip(row)
        .map(Json)
        .ok_or_else(|| AppError::not_found("trip", &id))
}

/// `GET /api/stays/:id`
///
/// # Errors
///
/// 400 on a malformed id; 404 on an unknown or unpublished stay.
pub async fn get_stay(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StayEntry>, AppError> {
    let uuid = parse_id(&id)?;
    let Some(platform) = state.platform else {
        return Err(AppError::not_found("stay", &id));
    };

    let row = platform.get_stay(uuid).await.map_err(|err| match err {
        PlatformError::NotFound => AppError::not_found("stay", &id),
        other => AppError::internal(format!("Stay fetch failed: {other}")),
    })?;

    catalog::normalize_stay(row)
        .map(Json)
        .ok_or_else(|| AppError::not_found("stay", &id))
}
