//! HTTP API handlers.

pub mod bookings;
pub mod catalog;
pub mod health;
pub mod leads;
pub mod profile;
