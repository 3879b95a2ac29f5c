use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

/// Where unauthenticated users are sent to sign in.
pub const SIGN_IN_PATH: &str = "/signin";

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Failed to load bookings: {0}")]
    Fetch(StoreError),
    #[error("Failed to save booking: {0}")]
    Submission(StoreError),
    #[error("{0} not found")]
    NotFound(String),
    #[error("Booking can only be confirmed from the review step")]
    NotAtReview,
    #[error("This booking is already being confirmed")]
    SubmissionInProgress,
    #[error("Invalid booking id: {0}")]
    InvalidId(String),
    #[error("Sign in required")]
    Unauthenticated,
}

impl ResponseError for BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::Fetch(_) | BookingError::Submission(_) => StatusCode::BAD_GATEWAY,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::NotAtReview | BookingError::SubmissionInProgress => {
                StatusCode::CONFLICT
            }
            BookingError::InvalidId(_) => StatusCode::BAD_REQUEST,
            BookingError::Unauthenticated => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            BookingError::Unauthenticated => json!({
                "error": self.to_string(),
                "redirect": SIGN_IN_PATH,
            }),
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
