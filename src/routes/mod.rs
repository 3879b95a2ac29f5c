use actix_web::web;

use crate::db::BookingStore;
use crate::middleware::auth::AuthMiddleware;

pub mod bookings;
pub mod catalog;
pub mod health;
pub mod wizard;

/// Registers every route. Expects `web::Data<S>`, `web::Data<AppConfig>`
/// and `web::Data<WizardSessions>` in the app data.
pub fn configure<S: BookingStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check::<S>))
        .service(
            web::scope("/api")
                .route("/catalog", web::get().to(catalog::get_catalog))
                .route("/quote", web::post().to(catalog::quote))
                .service(
                    web::scope("/booking/wizard")
                        .route("", web::post().to(wizard::start))
                        .route("/{id}", web::get().to(wizard::get_view))
                        .route("/{id}", web::delete().to(wizard::discard))
                        .route("/{id}/draft", web::patch().to(wizard::update_draft))
                        .route(
                            "/{id}/add-ons/{add_on_id}",
                            web::post().to(wizard::toggle_add_on),
                        )
                        .route("/{id}/next", web::post().to(wizard::next))
                        .route("/{id}/back", web::post().to(wizard::back))
                        // Protected routes
                        .service(
                            web::scope("/{id}/confirm")
                                .wrap(AuthMiddleware)
                                .route("", web::post().to(wizard::confirm::<S>)),
                        ),
                )
                .service(
                    web::scope("/bookings")
                        .wrap(AuthMiddleware)
                        .route("", web::get().to(bookings::get_all::<S>))
                        .route("/{id}/cancel", web::put().to(bookings::cancel::<S>)),
                ),
        );
}
