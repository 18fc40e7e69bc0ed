//! HTTP server: shared state and router assembly.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::{AppState, BookingDeskStore};
