use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use chrono::Duration;
use env_logger::Env;

use ecoease_api::config::{AppConfig, StoreBackend};
use ecoease_api::db::{mongo, BookingStore, InMemoryBookingStore, MongoBookingStore};
use ecoease_api::routes;
use ecoease_api::services::session_store::WizardSessions;

fn cors(config: &AppConfig) -> Cors {
    let cors = match &config.cors_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allow_any_method().allow_any_header().max_age(3600)
}

async fn serve<S>(config: AppConfig, store: S) -> std::io::Result<()>
where
    S: BookingStore + Send + Sync + 'static,
{
    let host = config.host.clone();
    let port = config.port;

    let store = web::Data::new(store);
    let sessions = web::Data::new(WizardSessions::new(Duration::minutes(
        config.session_ttl_minutes,
    )));
    let config = web::Data::new(config);

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&config))
            .app_data(store.clone())
            .app_data(sessions.clone())
            .app_data(config.clone())
            .configure(routes::configure::<S>)
    })
    .bind((host, port))?
    .run()
    .await
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    log::info!(
        "Booking wizard preset {:?}, pricing policy {:?}",
        config.wizard_preset,
        config.pricing
    );

    match config.store.clone() {
        StoreBackend::Mongo { uri, database } => {
            let client = mongo::create_mongo_client(&uri, &database)
                .await
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            serve(config, MongoBookingStore::new(client, &database)).await
        }
        StoreBackend::Memory => {
            log::warn!("MONGODB_URI not set, bookings are kept in memory only");
            serve(config, InMemoryBookingStore::new()).await
        }
    }
}
