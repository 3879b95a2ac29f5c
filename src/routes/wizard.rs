use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::db::BookingStore;
use crate::errors::BookingError;
use crate::models::booking::{BookingRecord, DraftUpdate};
use crate::models::notice::Notice;
use crate::models::user::CurrentUser;
use crate::services::session_store::{SubmittedBooking, WizardSessions};
use crate::services::wizard_service::{StepChange, StepView, Wizard, WizardPreset};

#[derive(Debug, Default, Deserialize)]
pub struct StartWizard {
    pub preset: Option<WizardPreset>,
}

#[derive(Debug, Serialize)]
pub struct WizardResponse {
    pub session_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_change: Option<StepChange>,
    pub view: StepView,
}

#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub booking: BookingRecord,
    pub notice: Notice,
    /// Absent when the wizard session ended before the booking was saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<StepView>,
}

fn respond(
    sessions: &WizardSessions,
    session_id: Uuid,
    action: impl FnOnce(&mut Wizard) -> Option<StepChange>,
) -> Result<HttpResponse, BookingError> {
    let (step_change, view) = sessions.with_wizard(session_id, |wizard| {
        let change = action(wizard);
        (change, wizard.view())
    })?;

    Ok(HttpResponse::Ok().json(WizardResponse {
        session_id,
        step_change,
        view,
    }))
}

/*
    POST /api/booking/wizard
*/
pub async fn start(
    config: web::Data<AppConfig>,
    sessions: web::Data<WizardSessions>,
    input: Option<web::Json<StartWizard>>,
) -> Result<HttpResponse, BookingError> {
    let preset = input
        .and_then(|input| input.into_inner().preset)
        .unwrap_or(config.wizard_preset);

    let session_id = sessions.create(config.wizard_config_for(preset));
    log::info!("Started {:?} booking wizard {}", preset, session_id);

    let view = sessions.with_wizard(session_id, |wizard| wizard.view())?;
    Ok(HttpResponse::Created().json(WizardResponse {
        session_id,
        step_change: None,
        view,
    }))
}

/*
    GET /api/booking/wizard/{id}
*/
pub async fn get_view(
    sessions: web::Data<WizardSessions>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    respond(&sessions, path.into_inner(), |_| None)
}

/*
    PATCH /api/booking/wizard/{id}/draft
*/
pub async fn update_draft(
    sessions: web::Data<WizardSessions>,
    path: web::Path<Uuid>,
    input: web::Json<DraftUpdate>,
) -> Result<HttpResponse, BookingError> {
    let update = input.into_inner();
    respond(&sessions, path.into_inner(), move |wizard| {
        wizard.update(update);
        None
    })
}

/*
    POST /api/booking/wizard/{id}/add-ons/{add_on_id}
*/
pub async fn toggle_add_on(
    sessions: web::Data<WizardSessions>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, BookingError> {
    let (session_id, add_on_id) = path.into_inner();
    respond(&sessions, session_id, |wizard| {
        wizard.toggle_add_on(&add_on_id);
        None
    })
}

/*
    POST /api/booking/wizard/{id}/next
*/
pub async fn next(
    sessions: web::Data<WizardSessions>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    respond(&sessions, path.into_inner(), |wizard| Some(wizard.next()))
}

/*
    POST /api/booking/wizard/{id}/back
*/
pub async fn back(
    sessions: web::Data<WizardSessions>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    respond(&sessions, path.into_inner(), |wizard| Some(wizard.back()))
}

/*
    POST /api/booking/wizard/{id}/confirm (protected)
*/
pub async fn confirm<S: BookingStore + 'static>(
    store: web::Data<S>,
    sessions: web::Data<WizardSessions>,
    path: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<HttpResponse, BookingError> {
    let SubmittedBooking { booking, view } = sessions
        .submit(path.into_inner(), store.get_ref(), &user.id)
        .await?;
    log::info!("User {} booked {} for ${}", user.id, booking.id, booking.total_price);

    Ok(HttpResponse::Created().json(ConfirmResponse {
        booking,
        notice: Notice::success("Booking confirmed! We'll be in touch shortly."),
        view,
    }))
}

/*
    DELETE /api/booking/wizard/{id}
*/
pub async fn discard(
    sessions: web::Data<WizardSessions>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, BookingError> {
    if sessions.remove(path.into_inner()) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(BookingError::NotFound("Wizard session".to_string()))
    }
}
