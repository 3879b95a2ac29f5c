use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{BookingStore, StoreError};
use crate::errors::BookingError;
use crate::models::booking::{BookingRecord, BookingStatus};
use crate::models::notice::Notice;

/// Upcoming bookings are dated today or later and still open; everything
/// else is past, including bookings that were never given a date.
pub fn is_upcoming(record: &BookingRecord, today: NaiveDate) -> bool {
    match record.scheduled_date() {
        Some(date) => date >= today && !record.status.is_closed(),
        None => false,
    }
}

pub fn partition(
    records: &[BookingRecord],
    today: NaiveDate,
) -> (Vec<BookingRecord>, Vec<BookingRecord>) {
    records
        .iter()
        .cloned()
        .partition(|record| is_upcoming(record, today))
}

const MAX_RECORD_ID_LEN: usize = 64;

/// Record ids are store-generated hex strings; anything outside
/// `[A-Za-z0-9_-]{1,64}` cannot name a booking.
pub fn validate_record_id(id: &str) -> Result<&str, BookingError> {
    let well_formed = !id.is_empty()
        && id.len() <= MAX_RECORD_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if well_formed {
        Ok(id)
    } else {
        Err(BookingError::InvalidId(id.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PartitionedBookings {
    pub upcoming: Vec<BookingRecord>,
    pub past: Vec<BookingRecord>,
}

/// A signed-in customer's bookings as loaded from the store.
///
/// Failed store calls leave the loaded list exactly as it was and record an
/// error notice for the view.
#[derive(Debug, Default)]
pub struct BookingRecordsView {
    records: Vec<BookingRecord>,
    notice: Option<Notice>,
}

impl BookingRecordsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[BookingRecord] {
        &self.records
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub async fn fetch<S: BookingStore>(
        &mut self,
        store: &S,
        user_id: &str,
    ) -> Result<&[BookingRecord], BookingError> {
        match store.list_by_user(user_id).await {
            Ok(records) => {
                self.records = records;
                Ok(&self.records)
            }
            Err(err) => {
                log::warn!("Failed to fetch bookings for user {}: {}", user_id, err);
                self.notice = Some(Notice::error("Failed to load your bookings"));
                Err(BookingError::Fetch(err))
            }
        }
    }

    pub fn partitioned(&self, today: NaiveDate) -> PartitionedBookings {
        let (upcoming, past) = partition(&self.records, today);
        PartitionedBookings { upcoming, past }
    }

    /// Cancels one of the loaded bookings. Cancelling a booking that is
    /// already cancelled succeeds without calling the store.
    pub async fn cancel<S: BookingStore>(
        &mut self,
        store: &S,
        record_id: &str,
    ) -> Result<BookingRecord, BookingError> {
        let record_id = validate_record_id(record_id)?;
        let index = self
            .records
            .iter()
            .position(|record| record.id == record_id)
            .ok_or_else(|| BookingError::NotFound("Booking".to_string()))?;

        if self.records[index].status == BookingStatus::Cancelled {
            return Ok(self.records[index].clone());
        }

        match store.update_status(record_id, BookingStatus::Cancelled).await {
            Ok(updated) => {
                log::info!("Cancelled booking {}", record_id);
                self.records[index] = updated.clone();
                self.notice = Some(Notice::success("Booking cancelled successfully"));
                Ok(updated)
            }
            Err(StoreError::NotFound(_)) => {
                self.notice = Some(Notice::error("Booking no longer exists"));
                Err(BookingError::NotFound("Booking".to_string()))
            }
            Err(err) => {
                log::warn!("Failed to cancel booking {}: {}", record_id, err);
                self.notice = Some(Notice::error("Failed to cancel booking"));
                Err(BookingError::Submission(err))
            }
        }
    }
}
