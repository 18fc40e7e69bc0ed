//! Row and payload types for the platform's relations.
//!
//! The catalog relations carry two coexisting naming conventions (`name` vs
//! `title`, `price` vs `cost`), so the raw rows model every variant as
//! optional and the product normalizes them once at its ingestion boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Auth
// ============================================================================

/// The authenticated platform user behind a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Platform-assigned user id
    pub id: Uuid,
    /// Email address
    pub email: String,
}

/// Session returned by a password sign-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent calls
    pub access_token: String,
    /// Refresh token, when the platform issues one
    pub refresh_token: Option<String>,
    /// The signed-in user
    pub user: AuthUser,
}

// ============================================================================
// Catalog rows (raw, drifted field names)
// ============================================================================

/// A dated departure of a trip with its own capacity counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateBatchRow {
    /// Departure label, e.g. "12 Dec"
    pub start_label: String,
    /// Return label, e.g. "18 Dec"
    pub end_label: String,
    /// Fixed spot counter for this batch
    pub spots_remaining: u32,
}

/// A room category of a stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeRow {
    /// Room name
    pub name: String,
    /// Price per night in whole rupees
    pub price_per_night: u64,
    /// Marketing copy
    #[serde(default)]
    pub description: Option<String>,
}

/// Raw `trips` row as the store returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripRow {
    /// Row id
    pub id: Uuid,
    /// Canonical name field
    #[serde(default)]
    pub name: Option<String>,
    /// Legacy name field
    #[serde(default)]
    pub title: Option<String>,
    /// Tagline
    #[serde(default)]
    pub tagline: Option<String>,
    /// Region facet
    #[serde(default)]
    pub region: Option<String>,
    /// Terrain facet
    #[serde(default)]
    pub terrain: Option<String>,
    /// Duration in days
    #[serde(default)]
    pub duration_days: Option<u32>,
    /// Canonical flat price in whole rupees
    #[serde(default)]
    pub price: Option<u64>,
    /// Legacy price field
    #[serde(default)]
    pub cost: Option<u64>,
    /// Maximum group size
    #[serde(default)]
    pub group_size: Option<u32>,
    /// draft / published / archived
    #[serde(default)]
    pub status: Option<String>,
    /// Visibility flag
    #[serde(default)]
    pub is_visible: Option<bool>,
    /// Dated departures
    #[serde(default)]
    pub batches: Vec<DateBatchRow>,
}

/// Raw `stays` row as the store returns it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StayRow {
    /// Row id
    pub id: Uuid,
    /// Canonical name field
    #[serde(default)]
    pub name: Option<String>,
    /// Legacy name field
    #[serde(default)]
    pub title: Option<String>,
    /// Tagline
    #[serde(default)]
    pub tagline: Option<String>,
    /// Region facet
    #[serde(default)]
    pub region: Option<String>,
    /// Terrain facet
    #[serde(default)]
    pub terrain: Option<String>,
    /// Canonical nightly base price in whole rupees
    #[serde(default)]
    pub price: Option<u64>,
    /// Legacy price field
    #[serde(default)]
    pub cost: Option<u64>,
    /// draft / published / archived
    #[serde(default)]
    pub status: Option<String>,
    /// Visibility flag
    #[serde(default)]
    pub is_visible: Option<bool>,
    /// Room categories
    #[serde(default)]
    pub rooms: Vec<RoomTypeRow>,
}

// ============================================================================
// Bookings
// ============================================================================

/// Payload for inserting a booking row.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    /// Trip being booked
    pub trip_id: Uuid,
    /// Booking owner
    pub user_id: Uuid,
    /// Total charge in whole rupees
    pub total_amount: u64,
    /// Lifecycle status (`pending` on creation)
    pub status: String,
    /// Payment status (`unpaid` on creation)
    pub payment_status: String,
}

/// A stored booking row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRow {
    /// Row id
    pub id: Uuid,
    /// Trip being booked
    pub trip_id: Uuid,
    /// Booking owner
    pub user_id: Uuid,
    /// Total charge in whole rupees
    pub total_amount: u64,
    /// Lifecycle status
    pub status: String,
    /// Payment status
    pub payment_status: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// A booking joined with the trip fields the bookings list displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWithTrip {
    /// Row id
    pub id: Uuid,
    /// Trip being booked
    pub trip_id: Uuid,
    /// Total charge in whole rupees
    pub total_amount: u64,
    /// Lifecycle status
    pub status: String,
    /// Payment status
    pub payment_status: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
    /// Trip name from the embedded select
    #[serde(default)]
    pub trip_name: Option<String>,
    /// Trip duration in days
    #[serde(default)]
    pub trip_duration_days: Option<u32>,
    /// Trip region
    #[serde(default)]
    pub trip_region: Option<String>,
}

// ============================================================================
// Leads
// ============================================================================

/// Payload for inserting a lead.
#[derive(Debug, Clone, Serialize)]
pub struct NewLead {
    /// Lead name
    pub name: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Contact phone
    pub phone: Option<String>,
    /// Free-text message
    pub message: Option<String>,
    /// Source tag (`website` or `external`)
    pub source: String,
}

/// A stored lead row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRow {
    /// Row id
    pub id: Uuid,
    /// Lead name
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text message
    #[serde(default)]
    pub message: Option<String>,
    /// Source tag
    pub source: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Profiles
// ============================================================================

/// A `profiles` row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileRow {
    /// Owning user id
    pub user_id: Uuid,
    /// Display name
    #[serde(default)]
    pub full_name: Option<String>,
    /// Avatar URL in object storage
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// WhatsApp contact number
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    /// Authorization role (`admin` grants the admin surface)
    #[serde(default)]
    pub role: Option<String>,
}

// ============================================================================
// Social relations
// ============================================================================

/// Which social entity a like/comment targets.
///
/// Memories and stories have parallel like/comment relations; the kind picks
/// the relation pair and the foreign-key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialEntityKind {
    /// A traveller memory card
    Memory,
    /// A story post
    Story,
}

impl SocialEntityKind {
    /// The like relation for this kind.
    #[must_use]
    pub const fn like_relation(self) -> &'static str {
        match self {
            Self::Memory => "memory_likes",
            Self::Story => "story_likes",
        }
    }

    /// The comment relation for this kind.
    #[must_use]
    pub const fn comment_relation(self) -> &'static str {
        match self {
            Self::Memory => "memory_comments",
            Self::Story => "story_comments",
        }
    }

    /// The foreign-key column naming the liked/commented entity.
    #[must_use]
    pub const fn entity_column(self) -> &'static str {
        match self {
            Self::Memory => "memory_id",
            Self::Story => "story_id",
        }
    }
}

/// Payload for inserting a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Target entity
    pub entity_id: Uuid,
    /// Comment author
    pub user_id: Uuid,
    /// Trimmed comment text
    pub text: String,
}

/// A stored comment row with server-assigned id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRow {
    /// Server-assigned id
    pub id: Uuid,
    /// Target entity (`memory_id` or `story_id` column)
    #[serde(alias = "memory_id", alias = "story_id")]
    pub entity_id: Uuid,
    /// Comment author
    pub user_id: Uuid,
    /// Comment text
    #[serde(alias = "content")]
    pub text: String,
    /// Server-assigned creation time
    pub created_at: DateTime<Utc>,
}

/// Like count and membership for one entity as seen by one user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct LikeSummary {
    /// Total likes on the entity
    pub likes_count: u64,
    /// Whether the querying user's id is in the like-set
    pub liked_by_me: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code can use unwrap
mod tests {
    use super::*;

    #[test]
    fn social_kind_picks_relations() {
        assert_eq!(SocialEntityKind::Memory.like_relation(), "memory_likes");
        assert_eq!(SocialEntityKind::Story.like_relation(), "story_likes");
        assert_eq!(
            SocialEntityKind::Memory.comment_relation(),
            "memory_comments"
        );
        assert_eq!(SocialEntityKind::Story.entity_column(), "story_id");
    }

    #[test]
    fn comment_row_accepts_either_fk_column() {
        let json = serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "memory_id": "550e8400-e29b-41d4-a716-446655440001",
            "user_id": "550e8400-e29b-41d4-a716-446655440002",
            "content": "what a view",
            "created_at": "2025-06-01T12:00:00Z",
        });
        let row: CommentRow = serde_json::from_value(json).unwrap();
        assert_eq!(row.text, "what a view");
    }

    #[test]
    fn trip_row_tolerates_drifted_fields() {
        let json = serde_json::json!({
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "title": "Spiti Valley Circuit",
            "cost": 28999,
            "status": "published",
        });
        let row: TripRow = serde_json::from_value(json).unwrap();
        assert!(row.name.is_none());
        assert_eq!(row.title.as_deref(), Some("Spiti Valley Circuit"));
        assert_eq!(row.cost, Some(28999));
        assert!(row.batches.is_empty());
    }
}
