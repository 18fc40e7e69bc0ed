//! The trait seam between the product and the hosted platform.
//!
//! Reducers and HTTP handlers hold an `Arc<dyn PlatformApi>`, injected from
//! `main`. Tests substitute a fake through the same seam; nothing in the
//! product reaches for an ambient global handle.

use crate::error::PlatformError;
use crate::types::{
    AuthSession, AuthUser, BookingRow, BookingWithTrip, CommentRow, LeadRow, LikeSummary,
    NewBooking, NewComment, NewLead, ProfileRow, SocialEntityKind, StayRow, TripRow,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Operations the product consumes from the hosted platform.
///
/// Every method maps to one platform call; none retries, none carries a
/// timeout. Errors are returned to the caller, which decides whether to
/// degrade (reads), roll back (optimistic writes), or surface (forms).
#[async_trait]
pub trait PlatformApi: Send + Sync {
    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// Resolve a bearer token to the user it belongs to.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the token is rejected.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, PlatformError>;

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// `Unauthorized` on bad credentials.
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, PlatformError>;

    /// Invalidate the session behind a bearer token.
    ///
    /// # Errors
    ///
    /// Returns platform errors; an already-dead session is not an error.
    async fn sign_out(&self, access_token: &str) -> Result<(), PlatformError>;

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    /// All trip rows, raw.
    ///
    /// # Errors
    ///
    /// Returns platform errors; callers degrade reads to empty results.
    async fn list_trips(&self) -> Result<Vec<TripRow>, PlatformError>;

    /// All stay rows, raw.
    ///
    /// # Errors
    ///
    /// Returns platform errors; callers degrade reads to empty results.
    async fn list_stays(&self) -> Result<Vec<StayRow>, PlatformError>;

    /// One trip row by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row matches.
    async fn get_trip(&self, id: Uuid) -> Result<TripRow, PlatformError>;

    /// One stay row by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row matches.
    async fn get_stay(&self, id: Uuid) -> Result<StayRow, PlatformError>;

    /// Count of `trips` rows; the store-connectivity probe.
    ///
    /// # Errors
    ///
    /// Returns platform errors when the store is unreachable.
    async fn count_trips(&self) -> Result<u64, PlatformError>;

    // ------------------------------------------------------------------
    // Bookings
    // ------------------------------------------------------------------

    /// Insert a pending booking row.
    ///
    /// # Errors
    ///
    /// Returns platform errors on insert failure.
    async fn insert_booking(&self, booking: NewBooking) -> Result<BookingRow, PlatformError>;

    /// The caller's bookings joined with trip display fields.
    ///
    /// # Errors
    ///
    /// Returns platform errors on read failure.
    async fn list_bookings(&self, user_id: Uuid) -> Result<Vec<BookingWithTrip>, PlatformError>;

    // ------------------------------------------------------------------
    // Leads
    // ------------------------------------------------------------------

    /// Insert a lead.
    ///
    /// # Errors
    ///
    /// Returns platform errors on insert failure.
    async fn insert_lead(&self, lead: NewLead) -> Result<LeadRow, PlatformError>;

    /// All leads (admin surface).
    ///
    /// # Errors
    ///
    /// Returns platform errors on read failure.
    async fn list_leads(&self) -> Result<Vec<LeadRow>, PlatformError>;

    // ------------------------------------------------------------------
    // Profiles & roles
    // ------------------------------------------------------------------

    /// One profile row by user id, if present.
    ///
    /// # Errors
    ///
    /// Returns platform errors on read failure.
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, PlatformError>;

    /// Insert-or-update a profile row keyed by user id.
    ///
    /// # Errors
    ///
    /// Returns platform errors on write failure.
    async fn upsert_profile(&self, profile: ProfileRow) -> Result<ProfileRow, PlatformError>;

    /// Role from the legacy `users` relation.
    ///
    /// Consulted only when no `profiles` row exists for the user; the
    /// canonical role source is `profiles.role`.
    ///
    /// # Errors
    ///
    /// Returns platform errors on read failure.
    async fn get_legacy_role(&self, user_id: Uuid) -> Result<Option<String>, PlatformError>;

    // ------------------------------------------------------------------
    // Social
    // ------------------------------------------------------------------

    /// Insert a `(entity, user)` pair into the like relation.
    ///
    /// # Errors
    ///
    /// `UniqueViolation` when the pair already exists (the caller swallows
    /// it); other platform errors on failure.
    async fn insert_like(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), PlatformError>;

    /// Delete a `(entity, user)` pair from the like relation.
    ///
    /// # Errors
    ///
    /// Returns platform errors on delete failure.
    async fn delete_like(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), PlatformError>;

    /// Like count and membership for one entity as seen by one user.
    ///
    /// # Errors
    ///
    /// Returns platform errors on read failure.
    async fn like_summary(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<LikeSummary, PlatformError>;

    /// Insert a comment; returns the stored row with server-assigned id and
    /// timestamp.
    ///
    /// # Errors
    ///
    /// Returns platform errors on insert failure.
    async fn insert_comment(
        &self,
        kind: SocialEntityKind,
        comment: NewComment,
    ) -> Result<CommentRow, PlatformError>;

    /// Delete a comment, scoped to its author.
    ///
    /// # Errors
    ///
    /// Returns platform errors on delete failure.
    async fn delete_comment(
        &self,
        kind: SocialEntityKind,
        comment_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), PlatformError>;

    /// Comments for one entity in ascending creation-time order.
    ///
    /// # Errors
    ///
    /// Returns platform errors on read failure.
    async fn list_comments(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
    ) -> Result<Vec<CommentRow>, PlatformError>;

    // ------------------------------------------------------------------
    // Object storage
    // ------------------------------------------------------------------

    /// Upload bytes to a bucket path.
    ///
    /// # Errors
    ///
    /// Returns platform errors on upload failure.
    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), PlatformError>;

    /// Public URL for an object.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
