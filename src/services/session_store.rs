use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use crate::db::BookingStore;
use crate::errors::BookingError;
use crate::models::booking::BookingRecord;
use crate::services::wizard_service::{StepView, Wizard, WizardConfig};

struct Session {
    wizard: Wizard,
    last_seen: DateTime<Utc>,
}

/// Outcome of a confirmed wizard. `view` is absent when the session ended
/// while the booking was being saved.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedBooking {
    pub booking: BookingRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<StepView>,
}

/// In-progress booking wizards, one per browser session.
///
/// The lock is only held for synchronous wizard operations; callers must
/// never await while inside [`WizardSessions::with_wizard`].
pub struct WizardSessions {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
}

impl WizardSessions {
    pub fn new(ttl: Duration) -> Self {
        WizardSessions {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn create(&self, config: WizardConfig) -> Uuid {
        self.create_at(config, Utc::now())
    }

    fn create_at(&self, config: WizardConfig, now: DateTime<Utc>) -> Uuid {
        let mut sessions = self.lock();

        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen <= self.ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            log::info!("Pruned {} idle wizard sessions", pruned);
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            Session {
                wizard: Wizard::new(config),
                last_seen: now,
            },
        );
        id
    }

    pub fn with_wizard<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Wizard) -> R,
    ) -> Result<R, BookingError> {
        let mut sessions = self.lock();
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| BookingError::NotFound("Wizard session".to_string()))?;

        session.last_seen = Utc::now();
        Ok(f(&mut session.wizard))
    }

    /// Saves the session's booking. The wizard is marked as submitting
    /// before the lock is released for the store call, so a concurrent
    /// confirm for the same session fails with `SubmissionInProgress`.
    pub async fn submit<S: BookingStore>(
        &self,
        id: Uuid,
        store: &S,
        user_id: &str,
    ) -> Result<SubmittedBooking, BookingError> {
        let submission = self.with_wizard(id, |wizard| wizard.begin_submission(user_id))??;

        let saved = store.insert(submission).await;

        let mut sessions = self.lock();
        match (saved, sessions.get_mut(&id)) {
            (Ok(booking), Some(session)) => {
                session.last_seen = Utc::now();
                session.wizard.finish_submission(true);
                Ok(SubmittedBooking {
                    booking,
                    view: Some(session.wizard.view()),
                })
            }
            (Ok(booking), None) => {
                log::warn!("Wizard session {} ended while booking {} was saved", id, booking.id);
                Ok(SubmittedBooking {
                    booking,
                    view: None,
                })
            }
            (Err(err), session) => {
                if let Some(session) = session {
                    session.wizard.finish_submission(false);
                }
                log::error!("Failed to save booking for user {}: {}", user_id, err);
                Err(BookingError::Submission(err))
            }
        }
    }

    pub fn remove(&self, id: Uuid) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
