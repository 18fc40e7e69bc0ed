//! # Wayfare
//!
//! A travel booking product: trip/stay browsing with mood search, a
//! three-step booking wizard with a simulated payment step, and optimistic
//! like/comment social features, layered on a hosted
//! backend-as-a-service.
//!
//! The interactive flows are reducers on `wayfare-core`; the HTTP surface
//! hosts the server-side booking pipeline on a `wayfare-runtime` store and
//! talks to the platform through the `wayfare-platform` trait seam.
//!
//! ## Module map
//!
//! - [`types`] — ids, `Money` in whole rupees, contact details
//! - [`catalog`] — raw platform rows normalized into canonical entries
//! - [`availability`] / [`pricing`] / [`search`] — the pure kernels
//! - [`features`] — the reducers (booking flow, explore, social, booking
//!   desk, payment)
//! - [`gateway`] / [`email`] — simulated payment and best-effort mail
//! - [`auth`] — session and admin extractors over platform bearer tokens
//! - [`api`] / [`server`] — HTTP handlers, router, and shared state
//! - [`config`] — environment configuration

pub mod api;
pub mod auth;
pub mod availability;
pub mod catalog;
pub mod config;
pub mod email;
pub mod features;
pub mod gateway;
pub mod pricing;
pub mod search;
pub mod server;
pub mod types;

pub use config::Config;
pub use server::{build_router, AppState};
