use bson::{doc, oid::ObjectId, Document};
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    options::{ClientOptions, ReturnDocument, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::sync::Arc;
use std::time::Duration;

use crate::db::{BookingStore, StoreError};
use crate::models::booking::{BookingRecord, BookingStatus, BookingSubmission};

const BOOKINGS_COLLECTION: &str = "Bookings";

pub async fn create_mongo_client(uri: &str, database: &str) -> Result<Arc<Client>, StoreError> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    let client = Client::with_options(client_options)?;

    // A failed ping is not fatal: the driver reconnects on the next operation.
    match client.database(database).run_command(doc! {"ping": 1}).await {
        Ok(_) => log::info!("Connected to MongoDB, ping succeeded"),
        Err(e) => log::warn!("Connected to MongoDB but ping failed: {}", e),
    }

    Ok(Arc::new(client))
}

/// `updated_at` goes through the same serde path as inserted records so
/// every timestamp in the collection has one string format.
fn status_update(status: BookingStatus, now: DateTime<Utc>) -> Result<Document, StoreError> {
    let updated_at = bson::to_bson(&now)?;
    Ok(doc! {
        "$set": {
            "status": status.as_str(),
            "updated_at": updated_at,
        }
    })
}

pub struct MongoBookingStore {
    client: Arc<Client>,
    database: String,
}

impl MongoBookingStore {
    pub fn new(client: Arc<Client>, database: &str) -> Self {
        MongoBookingStore {
            client,
            database: database.to_string(),
        }
    }

    fn collection(&self) -> Collection<BookingRecord> {
        self.client
            .database(&self.database)
            .collection(BOOKINGS_COLLECTION)
    }
}

impl BookingStore for MongoBookingStore {
    async fn insert(&self, submission: BookingSubmission) -> Result<BookingRecord, StoreError> {
        let record =
            BookingRecord::from_submission(ObjectId::new().to_hex(), submission, Utc::now());

        self.collection().insert_one(&record).await?;
        log::info!("Created booking {} for user {}", record.id, record.user_id);

        Ok(record)
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<BookingRecord>, StoreError> {
        let cursor = self
            .collection()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "date": 1, "created_at": 1 })
            .await?;

        Ok(cursor.try_collect::<Vec<BookingRecord>>().await?)
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
    ) -> Result<BookingRecord, StoreError> {
        let update = status_update(status, Utc::now())?;

        self.collection()
            .find_one_and_update(doc! { "_id": id }, update)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! {"ping": 1})
            .await?;
        Ok(())
    }
}
