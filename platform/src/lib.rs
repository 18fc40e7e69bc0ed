//! # Wayfare Platform
//!
//! Typed client for the hosted backend platform Wayfare is built on. The
//! platform is treated as a black box exposing three surfaces:
//!
//! - **Auth**: password and OAuth sign-in, current-user lookup, sign-out
//! - **Relational store**: CRUD over named relations (`trips`, `stays`,
//!   `bookings`, `leads`, `profiles`, `users`, `memories`, and the per-kind
//!   like/comment relations) with equality filters and ordering
//! - **Object storage**: upload to a bucket/path, public URL retrieval
//!
//! [`PlatformClient`] is the production implementation over the platform's
//! REST surface. Everything the product consumes goes through the
//! [`PlatformApi`] trait so reducers and handlers can take a fake in tests.
//!
//! There is deliberately no retry and no per-call timeout here: a failed call
//! surfaces once, and a hung call hangs — the callers own their degradation
//! (reads fall back to empty, optimistic writes roll back).
//!
//! ## Example
//!
//! ```ignore
//! use wayfare_platform::{PlatformClient, PlatformApi};
//!
//! let client = PlatformClient::new(platform_url, anon_key);
//! let trips = client.list_trips().await?;
//! let user = client.get_user(bearer_token).await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::PlatformApi;
pub use client::PlatformClient;
pub use error::PlatformError;
pub use types::{
    AuthSession, AuthUser, BookingRow, BookingWithTrip, CommentRow, DateBatchRow, LeadRow,
    LikeSummary, NewBooking, NewComment, NewLead, ProfileRow, RoomTypeRow, SocialEntityKind,
    StayRow, TripRow,
};

/// Result type for platform operations.
pub type PlatformResult<T> = Result<T, PlatformError>;
