#![allow(dead_code)]

use actix_web::{web, App};
use chrono::{Duration, NaiveDate, Utc};
use std::collections::HashMap;

use ecoease_api::config::AppConfig;
use ecoease_api::db::{BookingStore, InMemoryBookingStore, StoreError};
use ecoease_api::middleware::auth::issue_token;
use ecoease_api::models::booking::{
    BookingDraft, BookingRecord, BookingStatus, BookingSubmission,
};
use ecoease_api::models::user::CurrentUser;
use ecoease_api::routes;
use ecoease_api::services::session_store::WizardSessions;

pub const TEST_JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub store: web::Data<InMemoryBookingStore>,
    pub sessions: web::Data<WizardSessions>,
    pub config: web::Data<AppConfig>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_env(&[], Vec::new())
    }

    pub fn with_records(records: Vec<BookingRecord>) -> Self {
        Self::with_env(&[], records)
    }

    pub fn with_env(vars: &[(&str, &str)], records: Vec<BookingRecord>) -> Self {
        let mut vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.insert("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string());

        let config = AppConfig::from_lookup(|name| vars.get(name).cloned())
            .expect("test configuration is valid");

        Self {
            store: web::Data::new(InMemoryBookingStore::with_records(records)),
            sessions: web::Data::new(WizardSessions::new(Duration::minutes(
                config.session_ttl_minutes,
            ))),
            config: web::Data::new(config),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        self.create_app_with(self.store.clone())
    }

    /// Same app over a different booking store.
    pub fn create_app_with<S: BookingStore + 'static>(
        &self,
        store: web::Data<S>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(store)
            .app_data(self.sessions.clone())
            .app_data(self.config.clone())
            .configure(routes::configure::<S>)
    }
}

/// In-memory store whose inserts yield to the runtime a few times before
/// saving, so concurrent requests interleave around the write.
#[derive(Default)]
pub struct SlowBookingStore {
    pub inner: InMemoryBookingStore,
}

impl BookingStore for SlowBookingStore {
    async fn insert(&self, submission: BookingSubmission) -> Result<BookingRecord, StoreError> {
        for _ in 0..5 {
            actix_rt::task::yield_now().await;
        }
        self.inner.insert(submission).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>, StoreError> {
        self.inner.list_by_user(user_id).await
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingRecord, StoreError> {
        self.inner.update_status(id, status).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

pub fn get_test_user() -> CurrentUser {
    CurrentUser {
        id: "test_user_123".to_string(),
        email: "test@example.com".to_string(),
        display_name: "Test User".to_string(),
    }
}

pub fn get_other_user() -> CurrentUser {
    CurrentUser {
        id: "test_user_456".to_string(),
        email: "other@example.com".to_string(),
        display_name: "Other User".to_string(),
    }
}

pub fn bearer_token(user: &CurrentUser) -> String {
    let token = issue_token(user, TEST_JWT_SECRET, Duration::hours(1)).unwrap();
    format!("Bearer {}", token)
}

pub fn days_from_today(days: i64) -> NaiveDate {
    Utc::now().date_naive() + Duration::days(days)
}

pub fn make_record(
    id: &str,
    user: &CurrentUser,
    date: NaiveDate,
    status: BookingStatus,
) -> BookingRecord {
    BookingRecord {
        id: id.to_string(),
        user_id: user.id.clone(),
        details: BookingDraft {
            date: Some(date),
            ..BookingDraft::default()
        },
        total_price: 155,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
