use actix_web::{web, HttpResponse, ResponseError};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::db::BookingStore;
use crate::errors::BookingError;
use crate::models::booking::BookingRecord;
use crate::models::notice::Notice;
use crate::models::user::CurrentUser;
use crate::services::records_service::{BookingRecordsView, PartitionedBookings};

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub booking: BookingRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    pub bookings: PartitionedBookings,
}

/// Error body carrying the notice the records view raised for the failure.
fn failure(err: BookingError, notice: Option<Notice>) -> HttpResponse {
    HttpResponse::build(err.status_code()).json(json!({
        "error": err.to_string(),
        "notice": notice,
    }))
}

/*
    GET /api/bookings (protected)
*/
pub async fn get_all<S: BookingStore + 'static>(
    store: web::Data<S>,
    user: CurrentUser,
) -> Result<HttpResponse, BookingError> {
    let mut view = BookingRecordsView::new();
    let fetched = view.fetch(store.get_ref(), &user.id).await.map(|_| ());
    if let Err(err) = fetched {
        return Ok(failure(err, view.take_notice()));
    }

    Ok(HttpResponse::Ok().json(view.partitioned(Utc::now().date_naive())))
}

/*
    PUT /api/bookings/{id}/cancel (protected)
*/
pub async fn cancel<S: BookingStore + 'static>(
    store: web::Data<S>,
    path: web::Path<String>,
    user: CurrentUser,
) -> Result<HttpResponse, BookingError> {
    let booking_id = path.into_inner();

    // Loading the user's bookings first limits cancellation to their own.
    let mut view = BookingRecordsView::new();
    let fetched = view.fetch(store.get_ref(), &user.id).await.map(|_| ());
    if let Err(err) = fetched {
        return Ok(failure(err, view.take_notice()));
    }
    let booking = match view.cancel(store.get_ref(), &booking_id).await {
        Ok(booking) => booking,
        Err(err) => return Ok(failure(err, view.take_notice())),
    };

    Ok(HttpResponse::Ok().json(CancelResponse {
        booking,
        notice: view.take_notice(),
        bookings: view.partitioned(Utc::now().date_naive()),
    }))
}
