use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::collections::HashMap;
use std::env;

use crate::db::BookingStore;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check<S: BookingStore + 'static>(store: web::Data<S>) -> HttpResponse {
    let booking_store = match store.ping().await {
        Ok(()) => ServiceStatus {
            status: "ok".to_string(),
            details: None,
        },
        Err(err) => {
            log::warn!("Booking store health check failed: {}", err);
            ServiceStatus {
                status: "error".to_string(),
                details: Some(err.to_string()),
            }
        }
    };

    let status = if booking_store.status == "ok" {
        "ok"
    } else {
        "degraded"
    };

    let mut services = HashMap::new();
    services.insert("booking_store".to_string(), booking_store);

    HttpResponse::Ok().json(HealthStatus {
        status: status.to_string(),
        services,
        environment: env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
