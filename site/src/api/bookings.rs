//! Booking endpoints.
//!
//! Creation rides the store-hosted pipeline: the handler sends a `Submit`
//! action and awaits the matching outcome action with the configured handoff
//! bound. The platform insert itself carries no timeout; only the internal
//! handoff is bounded.

use crate::auth::SessionUser;
use crate::features::booking_desk::BookingDeskAction;
use crate::server::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wayfare_platform::PlatformError;
use wayfare_runtime::StoreError;
use wayfare_web::AppError;

/// `POST /api/bookings` body.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// Trip being booked
    pub trip_id: Uuid,
    /// Total charge in whole rupees
    pub total_amount: u64,
}

/// A booking as the API returns it.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// Booking id
    pub id: Uuid,
    /// Trip being booked
    pub trip_id: Uuid,
    /// Total charge in whole rupees
    pub total_amount: u64,
    /// Lifecycle status
    pub status: String,
    /// Payment status
    pub payment_status: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Trip name, when joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_name: Option<String>,
    /// Trip duration in days, when joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_duration_days: Option<u32>,
    /// Trip region, when joined
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_region: Option<String>,
}

/// `POST /api/bookings`
///
/// # Errors
///
/// 401 without a session, 400 on validation, 404 on an unknown trip, 503
/// without a platform, 500/504 on store failure or handoff timeout.
pub async fn create_booking(
    State(state): State<AppState>,
    session: SessionUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    if request.total_amount == 0 {
        return Err(AppError::validation("total_amount must be positive"));
    }

    let Some(platform) = state.platform.clone() else {
        return Err(AppError::unavailable("Platform not configured"));
    };

    // Resolve the trip up front: validates the id and supplies the name for
    // the confirmation email.
    let trip = platform
        .get_trip(request.trip_id)
        .await
        .map_err(|err| match err {
            PlatformError::NotFound => AppError::not_found("trip", request.trip_id),
            other => AppError::internal(format!("Trip fetch failed: {other}")),
        })?;
    let trip_name = trip
        .name
        .or(trip.title)
        .unwrap_or_else(|| "your trip".to_string());

    let request_id = Uuid::new_v4();
    let outcome = state
        .booking_desk
        .send_and_wait_for(
            BookingDeskAction::Submit {
                request_id,
                user_id: *session.user_id.as_uuid(),
                user_email: session.email,
                trip_id: request.trip_id,
                trip_name,
                total_amount: request.total_amount,
            },
            move |action| match action {
                BookingDeskAction::Stored {
                    request_id: rid, ..
                }
                | BookingDeskAction::StoreFailed {
                    request_id: rid, ..
                } => *rid == request_id,
                BookingDeskAction::Submit { .. } => false,
            },
            state.store_timeout,
        )
        .await
        .map_err(|err| match err {
            StoreError::Timeout => AppError::timeout("Booking pipeline timed out"),
            other => AppError::internal(format!("Booking pipeline failed: {other}")),
        })?;

    match outcome {
        BookingDeskAction::Stored { booking, .. } => Ok((
            StatusCode::CREATED,
            Json(BookingResponse {
                id: booking.id,
                trip_id: booking.trip_id,
                total_amount: booking.total_amount,
                status: booking.status,
                payment_status: booking.payment_status,
                created_at: booking.created_at,
                trip_name: None,
                trip_duration_days: None,
                trip_region: None,
            }),
        )),
        BookingDeskAction::StoreFailed { message, .. } => {
            Err(AppError::internal(format!("Booking failed: {message}")))
        }
        BookingDeskAction::Submit { .. } => {
            Err(AppError::internal("Unexpected pipeline action"))
        }
    }
}

/// `GET /api/bookings` — the caller's bookings joined with trip fields.
///
/// # Errors
///
/// 401 without a session. Read failures degrade to an empty list.
pub async fn list_bookings(
    State(state): State<AppState>,
    session: SessionUser,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let Some(platform) = state.platform else {
        return Ok(Json(Vec::new()));
    };

    let rows = match platform.list_bookings(*session.user_id.as_uuid()).await {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!(error = %err, "Bookings fetch failed, returning empty");
            return Ok(Json(Vec::new()));
        }
    };

    let bookings = rows
        .into_iter()
        .map(|row| BookingResponse {
            id: row.id,
            trip_id: row.trip_id,
            total_amount: row.total_amount,
            status: row.status,
            payment_status: row.payment_status,
            created_at: row.created_at,
            trip_name: row.trip_name,
            trip_duration_days: row.trip_duration_days,
            trip_region: row.trip_region,
        })
        .collect();
    Ok(Json(bookings))
}
