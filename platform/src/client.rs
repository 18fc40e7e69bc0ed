//! Production platform client over the hosted platform's REST surface.

use crate::api::PlatformApi;
use crate::error::PlatformError;
use crate::types::{
    AuthSession, AuthUser, BookingRow, BookingWithTrip, CommentRow, LeadRow, LikeSummary,
    NewBooking, NewComment, NewLead, ProfileRow, SocialEntityKind, StayRow, TripRow,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, header};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Client for the hosted platform.
///
/// Holds the platform base URL and the anonymous API key. Row-level security
/// on the platform side decides what the key may touch; user-scoped calls
/// additionally carry the caller's bearer token.
#[derive(Clone)]
pub struct PlatformClient {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl PlatformClient {
    /// Create a client for the given platform URL and anonymous key.
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
            anon_key: anon_key.into(),
        }
    }

    fn rest_url(&self, relation: &str) -> String {
        format!("{}/rest/v1/{relation}", self.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// Map a non-success response into a `PlatformError`.
    async fn error_from(response: reqwest::Response) -> PlatformError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED => PlatformError::Unauthorized,
            StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => PlatformError::NotFound,
            StatusCode::CONFLICT => PlatformError::UniqueViolation { message: body },
            _ => PlatformError::ApiError {
                status: status.as_u16(),
                message: body,
            },
        }
    }

    /// GET rows from a relation with the given query pairs.
    async fn select<T: DeserializeOwned>(
        &self,
        relation: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, PlatformError> {
        let response = self
            .client
            .get(self.rest_url(relation))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(query)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| PlatformError::ResponseParseFailed(e.to_string()))
    }

    /// POST one row into a relation and return the stored representation.
    async fn insert<T: DeserializeOwned>(
        &self,
        relation: &str,
        body: &serde_json::Value,
    ) -> Result<T, PlatformError> {
        let response = self
            .client
            .post(self.rest_url(relation))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        // The store answers inserts with a one-element array
        let mut rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| PlatformError::ResponseParseFailed(e.to_string()))?;

        rows.pop().ok_or(PlatformError::NotFound)
    }

    /// DELETE rows matching the given equality filters.
    async fn delete(
        &self,
        relation: &str,
        filters: &[(&str, String)],
    ) -> Result<(), PlatformError> {
        let response = self
            .client
            .delete(self.rest_url(relation))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(filters)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(())
    }

    fn eq(value: impl std::fmt::Display) -> String {
        format!("eq.{value}")
    }
}

#[async_trait]
impl PlatformApi for PlatformClient {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, PlatformError> {
        let response = self
            .client
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<AuthUser>()
                .await
                .map_err(|e| PlatformError::ResponseParseFailed(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(PlatformError::Unauthorized),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, PlatformError> {
        let response = self
            .client
            .post(self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<AuthSession>()
                .await
                .map_err(|e| PlatformError::ResponseParseFailed(e.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(PlatformError::Unauthorized),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), PlatformError> {
        let response = self
            .client
            .post(self.auth_url("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        // A token that is already dead signs out fine
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn list_trips(&self) -> Result<Vec<TripRow>, PlatformError> {
        self.select("trips", &[("select", "*".to_string())]).await
    }

    async fn list_stays(&self) -> Result<Vec<StayRow>, PlatformError> {
        self.select("stays", &[("select", "*".to_string())]).await
    }

    async fn get_trip(&self, id: Uuid) -> Result<TripRow, PlatformError> {
        let mut rows: Vec<TripRow> = self
            .select(
                "trips",
                &[
                    ("select", "*".to_string()),
                    ("id", Self::eq(id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        rows.pop().ok_or(PlatformError::NotFound)
    }

    async fn get_stay(&self, id: Uuid) -> Result<StayRow, PlatformError> {
        let mut rows: Vec<StayRow> = self
            .select(
                "stays",
                &[
                    ("select", "*".to_string()),
                    ("id", Self::eq(id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        rows.pop().ok_or(PlatformError::NotFound)
    }

    async fn count_trips(&self) -> Result<u64, PlatformError> {
        let response = self
            .client
            .get(self.rest_url("trips"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "count=exact")
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        // Total arrives as the range denominator: `content-range: 0-0/42`
        let total = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.rsplit('/').next())
            .and_then(|v| v.parse::<u64>().ok())
            .ok_or_else(|| {
                PlatformError::ResponseParseFailed("missing content-range total".to_string())
            })?;

        Ok(total)
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<BookingRow, PlatformError> {
        let body = serde_json::to_value(&booking)
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;
        self.insert("bookings", &body).await
    }

    async fn list_bookings(&self, user_id: Uuid) -> Result<Vec<BookingWithTrip>, PlatformError> {
        // Embedded select pulls the trip display fields in one query
        #[derive(serde::Deserialize)]
        struct TripEmbed {
            #[serde(default)]
            name: Option<String>,
            #[serde(default)]
            title: Option<String>,
            #[serde(default)]
            duration_days: Option<u32>,
            #[serde(default)]
            region: Option<String>,
        }

        #[derive(serde::Deserialize)]
        struct Row {
            id: Uuid,
            trip_id: Uuid,
            total_amount: u64,
            status: String,
            payment_status: String,
            created_at: chrono::DateTime<chrono::Utc>,
            #[serde(default)]
            trips: Option<TripEmbed>,
        }

        let rows: Vec<Row> = self
            .select(
                "bookings",
                &[
                    (
                        "select",
                        "id,trip_id,total_amount,status,payment_status,created_at,\
                         trips(name,title,duration_days,region)"
                            .to_string(),
                    ),
                    ("user_id", Self::eq(user_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let trip = row.trips;
                BookingWithTrip {
                    id: row.id,
                    trip_id: row.trip_id,
                    total_amount: row.total_amount,
                    status: row.status,
                    payment_status: row.payment_status,
                    created_at: row.created_at,
                    trip_name: trip
                        .as_ref()
                        .and_then(|t| t.name.clone().or_else(|| t.title.clone())),
                    trip_duration_days: trip.as_ref().and_then(|t| t.duration_days),
                    trip_region: trip.and_then(|t| t.region),
                }
            })
            .collect())
    }

    async fn insert_lead(&self, lead: NewLead) -> Result<LeadRow, PlatformError> {
        let body = serde_json::to_value(&lead)
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;
        self.insert("leads", &body).await
    }

    async fn list_leads(&self) -> Result<Vec<LeadRow>, PlatformError> {
        self.select(
            "leads",
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, PlatformError> {
        let mut rows: Vec<ProfileRow> = self
            .select(
                "profiles",
                &[
                    ("select", "*".to_string()),
                    ("user_id", Self::eq(user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.pop())
    }

    async fn upsert_profile(&self, profile: ProfileRow) -> Result<ProfileRow, PlatformError> {
        let body = serde_json::to_value(&profile)
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        let response = self
            .client
            .post(self.rest_url("profiles"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .query(&[("on_conflict", "user_id")])
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let mut rows = response
            .json::<Vec<ProfileRow>>()
            .await
            .map_err(|e| PlatformError::ResponseParseFailed(e.to_string()))?;

        rows.pop().ok_or(PlatformError::NotFound)
    }

    async fn get_legacy_role(&self, user_id: Uuid) -> Result<Option<String>, PlatformError> {
        #[derive(serde::Deserialize)]
        struct RoleRow {
            #[serde(default)]
            role: Option<String>,
        }

        let mut rows: Vec<RoleRow> = self
            .select(
                "users",
                &[
                    ("select", "role".to_string()),
                    ("id", Self::eq(user_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.pop().and_then(|r| r.role))
    }

    async fn insert_like(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), PlatformError> {
        let body = serde_json::json!({
            kind.entity_column(): entity_id,
            "user_id": user_id,
        });

        let response = self
            .client
            .post(self.rest_url(kind.like_relation()))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn delete_like(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), PlatformError> {
        self.delete(
            kind.like_relation(),
            &[
                (kind.entity_column(), Self::eq(entity_id)),
                ("user_id", Self::eq(user_id)),
            ],
        )
        .await
    }

    async fn like_summary(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<LikeSummary, PlatformError> {
        #[derive(serde::Deserialize)]
        struct LikeRow {
            user_id: Uuid,
        }

        let rows: Vec<LikeRow> = self
            .select(
                kind.like_relation(),
                &[
                    ("select", "user_id".to_string()),
                    (kind.entity_column(), Self::eq(entity_id)),
                ],
            )
            .await?;

        Ok(LikeSummary {
            likes_count: rows.len() as u64,
            liked_by_me: user_id.is_some_and(|me| rows.iter().any(|row| row.user_id == me)),
        })
    }

    async fn insert_comment(
        &self,
        kind: SocialEntityKind,
        comment: NewComment,
    ) -> Result<CommentRow, PlatformError> {
        let body = serde_json::json!({
            kind.entity_column(): comment.entity_id,
            "user_id": comment.user_id,
            "text": comment.text,
        });
        self.insert(kind.comment_relation(), &body).await
    }

    async fn delete_comment(
        &self,
        kind: SocialEntityKind,
        comment_id: Uuid,
        author_id: Uuid,
    ) -> Result<(), PlatformError> {
        self.delete(
            kind.comment_relation(),
            &[
                ("id", Self::eq(comment_id)),
                ("user_id", Self::eq(author_id)),
            ],
        )
        .await
    }

    async fn list_comments(
        &self,
        kind: SocialEntityKind,
        entity_id: Uuid,
    ) -> Result<Vec<CommentRow>, PlatformError> {
        self.select(
            kind.comment_relation(),
            &[
                ("select", "*".to_string()),
                (kind.entity_column(), Self::eq(entity_id)),
                ("order", "created_at.asc".to_string()),
            ],
        )
        .await
    }

    async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), PlatformError> {
        let url = format!("{}/storage/v1/object/{bucket}/{path}", self.base_url);

        let response = self
            .client
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| PlatformError::RequestFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from(response).await)
        }
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{bucket}/{path}", self.base_url)
    }
}
