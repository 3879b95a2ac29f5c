use thiserror::Error;

use crate::models::booking::{BookingRecord, BookingStatus, BookingSubmission};

pub mod memory;
pub mod mongo;

pub use memory::InMemoryBookingStore;
pub use mongo::MongoBookingStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),
    #[error("Failed to encode booking: {0}")]
    Encode(#[from] bson::ser::Error),
    #[error("Booking {0} not found")]
    NotFound(String),
    #[error("Booking store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for booking records.
///
/// Every call is a single request/response; implementations do not retry.
#[allow(async_fn_in_trait)]
pub trait BookingStore {
    async fn insert(&self, submission: BookingSubmission) -> Result<BookingRecord, StoreError>;

    /// All records owned by `user_id`, ordered by scheduled date ascending.
    /// Records without a date come first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>, StoreError>;

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingRecord, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}
