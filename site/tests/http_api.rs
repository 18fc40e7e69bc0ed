//! HTTP surface integration tests against an in-memory platform fake.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;
use wayfare_platform::{
    AuthSession, AuthUser, BookingRow, BookingWithTrip, CommentRow, LeadRow, LikeSummary,
    NewBooking, NewComment, NewLead, PlatformApi, PlatformError, ProfileRow, SocialEntityKind,
    StayRow, TripRow,
};
use wayfare_site::config::{Config, ServerConfig};
use wayfare_site::email::LogMailer;
use wayfare_site::server::{build_router, AppState};

const USER_TOKEN: &str = "user-token";
const ADMIN_TOKEN: &str = "admin-token";
const INTERNAL_TOKEN: &str = "internal-api-token";

/// In-memory platform good enough for the HTTP surface.
struct FakePlatform {
    trips: Vec<TripRow>,
    users: HashMap<String, AuthUser>,
    admin_id: Uuid,
    bookings: Mutex<Vec<BookingRow>>,
    leads: Mutex<Vec<LeadRow>>,
    profiles: Mutex<HashMap<Uuid, ProfileRow>>,
}

impl FakePlatform {
    fn new() -> (Self, Uuid, Uuid) {
        let user_id = Uuid::new_v4();
        let admin_id = Uuid::new_v4();
        let mut users = HashMap::new();
        users.insert(
            USER_TOKEN.to_string(),
            AuthUser {
                id: user_id,
                email: "asha@example.com".to_string(),
            },
        );
        users.insert(
            ADMIN_TOKEN.to_string(),
            AuthUser {
                id: admin_id,
                email: "admin@example.com".to_string(),
            },
        );

        let fake = Self {
            trips: Vec::new(),
            users,
            admin_id,
            bookings: Mutex::new(Vec::new()),
            leads: Mutex::new(Vec::new()),
            profiles: Mutex::new(HashMap::new()),
        };
        (fake, user_id, admin_id)
    }

    fn with_trips(mut self, trips: Vec<TripRow>) -> Self {
        self.trips = trips;
        self
    }
}

#[async_trait::async_trait]
impl PlatformApi for FakePlatform {
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, PlatformError> {
        self.users
            .get(access_token)
            .cloned()
            .ok_or(PlatformError::Unauthorized)
    }

    async fn sign_in_with_password(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<AuthSession, PlatformError> {
        Err(PlatformError::Unauthorized)
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), PlatformError> {
        Ok(())
    }

    async fn list_trips(&self) -> Result<Vec<TripRow>, PlatformError> {
        Ok(self.trips.clone())
    }

    async fn list_stays(&self) -> Result<Vec<StayRow>, PlatformError> {
        Ok(Vec::new())
    }

    async fn get_trip(&self, id: Uuid) -> Result<TripRow, PlatformError> {
        self.trips
            .iter()
            .find(|trip| trip.id == id)
            .cloned()
            .ok_or(PlatformError::NotFound)
    }

    async fn get_stay(&self, _id: Uuid) -> Result<StayRow, PlatformError> {
        Err(PlatformError::NotFound)
    }

    async fn count_trips(&self) -> Result<u64, PlatformError> {
        Ok(self.trips.len() as u64)
    }

    async fn insert_booking(&self, booking: NewBooking) -> Result<BookingRow, PlatformError> {
        let row = BookingRow {
            id: Uuid::new_v4(),
            trip_id: booking.trip_id,
            user_id: booking.user_id,
            total_amount: booking.total_amount,
            status: booking.status,
            payment_status: booking.payment_status,
            created_at: Utc::now(),
        };
        self.bookings.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_bookings(&self, user_id: Uuid) -> Result<Vec<BookingWithTrip>, PlatformError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| BookingWithTrip {
                id: row.id,
                trip_id: row.trip_id,
                total_amount: row.total_amount,
                status: row.status.clone(),
                payment_status: row.payment_status.clone(),
                created_at: row.created_at,
                trip_name: Some("Spiti Valley Circuit".to_string()),
                trip_duration_days: Some(8),
                trip_region: Some("himachal".to_string()),
            })
            .collect())
    }

    async fn insert_lead(&self, lead: NewLead) -> Result<LeadRow, PlatformError> {
        let row = LeadRow {
            id: Uuid::new_v4(),
            name: lead.name,
            email: lead.email,
            phone: lead.phone,
            message: lead.message,
            source: lead.source,
            created_at: Utc::now(),
        };
        self.leads.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn list_leads(&self) -> Result<Vec<LeadRow>, PlatformError> {
        Ok(self.leads.lock().unwrap().clone())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, PlatformError> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: ProfileRow) -> Result<ProfileRow, PlatformError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn get_legacy_role(&self, user_id: Uuid) -> Result<Option<String>, PlatformError> {
        if user_id == self.admin_id {
            Ok(Some("admin".to_string()))
        } else {
            Ok(None)
        }
    }

    async fn insert_like(
        &self,
        _kind: SocialEntityKind,
        _entity_id: Uuid,
        _user_id: Uuid,
    ) -> Result<(), PlatformError> {
        Ok(())
    }

    async fn delete_like(
        &self,
        _kind: SocialEntityKind,
        _entity_id: Uuid,
        _user_id: Uuid,
    ) -> Result<(), PlatformError> {
        Ok(())
    }

    async fn like_summary(
        &self,
        _kind: SocialEntityKind,
        _entity_id: Uuid,
        _user_id: Option<Uuid>,
    ) -> Result<LikeSummary, PlatformError> {
        Ok(LikeSummary::default())
    }

    async fn insert_comment(
        &self,
        _kind: SocialEntityKind,
        comment: NewComment,
    ) -> Result<CommentRow, PlatformError> {
        Ok(CommentRow {
            id: Uuid::new_v4(),
            entity_id: comment.entity_id,
            user_id: comment.user_id,
            text: comment.text,
            created_at: Utc::now(),
        })
    }

    async fn delete_comment(
        &self,
        _kind: SocialEntityKind,
        _comment_id: Uuid,
        _author_id: Uuid,
    ) -> Result<(), PlatformError> {
        Ok(())
    }

    async fn list_comments(
        &self,
        _kind: SocialEntityKind,
        _entity_id: Uuid,
    ) -> Result<Vec<CommentRow>, PlatformError> {
        Ok(Vec::new())
    }

    async fn upload_object(
        &self,
        _bucket: &str,
        _path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), PlatformError> {
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://fake.test/storage/v1/object/public/{bucket}/{path}")
    }
}

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        platform: None,
        internal_api_token: Some(INTERNAL_TOKEN.to_string()),
        payment_delay_ms: 1,
        store_timeout_secs: 2,
    }
}

fn published_trip(name: &str, terrain: &str, group_size: u32) -> TripRow {
    TripRow {
        id: Uuid::new_v4(),
        name: Some(name.to_string()),
        terrain: Some(terrain.to_string()),
        duration_days: Some(6),
        price: Some(28999),
        group_size: Some(group_size),
        status: Some("published".to_string()),
        ..TripRow::default()
    }
}

fn server_with(platform: FakePlatform) -> TestServer {
    let state = AppState::new(&test_config(), Some(Arc::new(platform)), LogMailer::shared());
    TestServer::new(build_router(state)).expect("test server")
}

fn server_without_platform() -> TestServer {
    let state = AppState::new(&test_config(), None, LogMailer::shared());
    TestServer::new(build_router(state)).expect("test server")
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

#[tokio::test]
async fn health_always_answers() {
    let server = server_without_platform();
    let response = server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn check_db_reports_missing_platform() {
    let server = server_without_platform();
    let response = server.get("/api/check-db").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "connected": false }));
}

#[tokio::test]
async fn check_db_counts_trips() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake.with_trips(vec![
        published_trip("Spiti", "mountains", 10),
        published_trip("Gokarna", "coast", 8),
    ]));

    let response = server.get("/api/check-db").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "connected": true, "trips": 2 }));
}

#[tokio::test]
async fn trips_list_degrades_to_empty_without_platform() {
    let server = server_without_platform();
    let response = server.get("/api/trips").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn trips_list_filters_by_mood_query() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake.with_trips(vec![
        published_trip("Quiet Peaks", "mountains", 6),
        published_trip("Beach Camp", "coast", 6),
        published_trip("Big Summit", "mountains", 14),
    ]));

    let response = server.get("/api/trips?q=quiet%20mountains").await;
    response.assert_status_ok();
    let trips: Vec<Value> = response.json();
    assert_eq!(trips.len(), 1);
    assert_eq!(trips[0]["name"], "Quiet Peaks");
}

#[tokio::test]
async fn unpublished_trips_never_appear() {
    let (fake, _, _) = FakePlatform::new();
    let mut draft = published_trip("Draft Trek", "mountains", 6);
    draft.status = Some("draft".to_string());
    let server = server_with(fake.with_trips(vec![draft]));

    let response = server.get("/api/trips").await;
    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn unknown_trip_is_404() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);
    let response = server.get(&format!("/api/trips/{}", Uuid::new_v4())).await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn malformed_trip_id_is_400() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);
    let response = server.get("/api/trips/not-a-uuid").await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn booking_requires_a_session() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);
    let response = server
        .post("/api/bookings")
        .json(&json!({ "trip_id": Uuid::new_v4(), "total_amount": 86997 }))
        .await;
    response.assert_status_unauthorized();
}

#[tokio::test]
async fn booking_round_trips_through_the_pipeline() {
    let (fake, _, _) = FakePlatform::new();
    let trip = published_trip("Spiti Valley Circuit", "mountains", 10);
    let trip_id = trip.id;
    let server = server_with(fake.with_trips(vec![trip]));

    let (name, value) = bearer(USER_TOKEN);
    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&json!({ "trip_id": trip_id, "total_amount": 86997 }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["trip_id"], trip_id.to_string());
    assert_eq!(body["total_amount"], 86997);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment_status"], "unpaid");

    // And it shows up in the caller's bookings list, joined with trip fields.
    let (name, value) = bearer(USER_TOKEN);
    let list = server.get("/api/bookings").add_header(name, value).await;
    list.assert_status_ok();
    let bookings: Vec<Value> = list.json();
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0]["trip_name"], "Spiti Valley Circuit");
}

#[tokio::test]
async fn zero_total_booking_is_rejected() {
    let (fake, _, _) = FakePlatform::new();
    let trip = published_trip("Spiti", "mountains", 10);
    let trip_id = trip.id;
    let server = server_with(fake.with_trips(vec![trip]));

    let (name, value) = bearer(USER_TOKEN);
    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&json!({ "trip_id": trip_id, "total_amount": 0 }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn booking_an_unknown_trip_is_404() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);

    let (name, value) = bearer(USER_TOKEN);
    let response = server
        .post("/api/bookings")
        .add_header(name, value)
        .json(&json!({ "trip_id": Uuid::new_v4(), "total_amount": 100 }))
        .await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn lead_requires_phone_or_email() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);
    let response = server
        .post("/api/leads")
        .json(&json!({ "name": "Asha", "message": "call me" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn lead_source_is_tagged_by_internal_token() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);

    let external = server
        .post("/api/leads")
        .json(&json!({ "email": "asha@example.com" }))
        .await;
    external.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = external.json();
    assert_eq!(body["source"], "external");

    let (name, value) = bearer(INTERNAL_TOKEN);
    let internal = server
        .post("/api/leads")
        .add_header(name, value)
        .json(&json!({ "phone": "9999999999" }))
        .await;
    internal.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = internal.json();
    assert_eq!(body["source"], "website");
}

#[tokio::test]
async fn leads_list_is_admin_only() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);

    let anonymous = server.get("/api/leads").await;
    anonymous.assert_status_unauthorized();

    let (name, value) = bearer(USER_TOKEN);
    let non_admin = server.get("/api/leads").add_header(name, value).await;
    non_admin.assert_status_forbidden();

    let (name, value) = bearer(ADMIN_TOKEN);
    let admin = server.get("/api/leads").add_header(name, value).await;
    admin.assert_status_ok();
}

#[tokio::test]
async fn profile_role_prefers_the_profiles_row() {
    // The admin's legacy role says admin, but an existing profile row with no
    // role is authoritative and must NOT fall back.
    let (fake, _, admin_id) = FakePlatform::new();
    fake.profiles.lock().unwrap().insert(
        admin_id,
        ProfileRow {
            user_id: admin_id,
            ..ProfileRow::default()
        },
    );
    let server = server_with(fake);

    let (name, value) = bearer(ADMIN_TOKEN);
    let response = server.get("/api/leads").add_header(name, value).await;
    response.assert_status_forbidden();
}

#[tokio::test]
async fn profile_patch_merges_fields() {
    let (fake, _, _) = FakePlatform::new();
    let server = server_with(fake);

    let (name, value) = bearer(USER_TOKEN);
    let first = server
        .patch("/api/user/profile")
        .add_header(name, value)
        .json(&json!({ "full_name": "Asha", "whatsapp_number": "9999999999" }))
        .await;
    first.assert_status_ok();

    let (name, value) = bearer(USER_TOKEN);
    let second = server
        .patch("/api/user/profile")
        .add_header(name, value)
        .json(&json!({ "whatsapp_number": "8888888888" }))
        .await;
    second.assert_status_ok();
    let body: Value = second.json();
    assert_eq!(body["full_name"], "Asha");
    assert_eq!(body["whatsapp_number"], "8888888888");

    let (name, value) = bearer(USER_TOKEN);
    let fetched = server.get("/api/user/profile").add_header(name, value).await;
    fetched.assert_status_ok();
    let body: Value = fetched.json();
    assert_eq!(body["full_name"], "Asha");
}

#[tokio::test]
async fn profile_write_without_platform_is_503() {
    let server = server_without_platform();
    let (name, value) = bearer(USER_TOKEN);
    let response = server
        .patch("/api/user/profile")
        .add_header(name, value)
        .json(&json!({ "full_name": "Asha" }))
        .await;
    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}
