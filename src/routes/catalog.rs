use actix_web::{web, HttpResponse};

use crate::config::AppConfig;
use crate::models::booking::BookingDraft;
use crate::models::catalog::Catalog;
use crate::services::pricing_service::PricingService;

/*
    GET /api/catalog
*/
pub async fn get_catalog() -> HttpResponse {
    HttpResponse::Ok().json(Catalog::load())
}

/*
    POST /api/quote
*/
pub async fn quote(config: web::Data<AppConfig>, input: web::Json<BookingDraft>) -> HttpResponse {
    let draft = input.into_inner().normalized();
    HttpResponse::Ok().json(PricingService::quote(&draft, config.pricing))
}
