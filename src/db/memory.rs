use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::db::{BookingStore, StoreError};
use crate::models::booking::{BookingRecord, BookingStatus, BookingSubmission};

/// Process-local booking store for running without MongoDB.
///
/// `set_failing(true)` makes every call fail with `StoreError::Unavailable`,
/// which is how outages are simulated in tests.
#[derive(Default)]
pub struct InMemoryBookingStore {
    records: Mutex<Vec<BookingRecord>>,
    failing: AtomicBool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<BookingRecord>) -> Self {
        InMemoryBookingStore {
            records: Mutex::new(records),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }
}

impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, submission: BookingSubmission) -> Result<BookingRecord, StoreError> {
        self.check_available()?;

        let record =
            BookingRecord::from_submission(Uuid::new_v4().simple().to_string(), submission, Utc::now());
        self.records.lock().await.push(record.clone());

        Ok(record)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>, StoreError> {
        self.check_available()?;

        let mut records: Vec<BookingRecord> = self
            .records
            .lock()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.scheduled_date());

        Ok(records)
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingRecord, StoreError> {
        self.check_available()?;

        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        record.status = status;
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
