//! Axum integration for Wayfare.
//!
//! The HTTP layer is a thin imperative shell over the reducers: handlers
//! extract data, build actions, dispatch them through a `Store`, and map the
//! outcome into a response. This crate holds the pieces of that shell which
//! every handler shares:
//!
//! - [`AppError`]: the one error type handlers return, with the HTTP status
//!   taxonomy (400/401/403/404/409/422/500/503) and a JSON error body
//! - [`middleware::correlation_id_layer`]: per-request correlation IDs,
//!   propagated through a tracing span and echoed on the response
//! - [`extractors`]: `CorrelationId`, `ClientIp`, `UserAgent`
//!
//! # Example
//!
//! ```ignore
//! use wayfare_web::{AppError, correlation_id_layer};
//! use axum::{Router, routing::post, Json};
//!
//! async fn create_booking(
//!     session: SessionUser,
//!     State(state): State<AppState>,
//!     Json(request): Json<CreateBookingRequest>,
//! ) -> Result<Json<BookingResponse>, AppError> {
//!     let booking = state.submit_booking(session.user_id, request).await?;
//!     Ok(Json(booking))
//! }
//!
//! let app = Router::new()
//!     .route("/api/bookings", post(create_booking))
//!     .layer(correlation_id_layer());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod middleware;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ClientIp, CorrelationId, UserAgent};
pub use middleware::{CORRELATION_ID_HEADER, CorrelationIdExt, correlation_id_layer};

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
