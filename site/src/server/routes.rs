//! Router assembly.

use crate::api;
use crate::server::AppState;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use wayfare_web::correlation_id_layer;

/// Build the full API router.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(api::health::health))
        .route("/api/check-db", get(api::health::check_db))
        .route("/api/trips", get(api::catalog::list_trips))
        .route("/api/trips/:id", get(api::catalog::get_trip))
        .route("/api/stays", get(api::catalog::list_stays))
        .route("/api/stays/:id", get(api::catalog::get_stay))
        .route(
            "/api/bookings",
            post(api::bookings::create_booking).get(api::bookings::list_bookings),
        )
        .route(
            "/api/user/profile",
            get(api::profile::get_profile).patch(api::profile::update_profile),
        )
        .route(
            "/api/leads",
            post(api::leads::create_lead).get(api::leads::list_leads),
        )
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
