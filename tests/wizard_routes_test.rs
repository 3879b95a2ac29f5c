mod common;

use actix_web::{http::header, test, web};
use serde_json::{json, Value};

use common::{bearer_token, get_test_user, SlowBookingStore, TestApp};
use ecoease_api::db::BookingStore;

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = if status == 204 {
            Value::Null
        } else {
            test::read_body_json(resp).await
        };
        (status, body)
    }};
}

macro_rules! start_wizard {
    ($app:expr, $preset:expr) => {{
        let (status, body) = send!(
            $app,
            test::TestRequest::post()
                .uri("/api/booking/wizard")
                .set_json(json!({ "preset": $preset }))
        );
        assert_eq!(status, 201);
        body["session_id"].as_str().unwrap().to_string()
    }};
}

fn patch(session: &str, field: &str, value: Value) -> test::TestRequest {
    test::TestRequest::patch()
        .uri(&format!("/api/booking/wizard/{}/draft", session))
        .set_json(json!({ "field": field, "value": value }))
}

fn post(session: &str, action: &str) -> test::TestRequest {
    test::TestRequest::post().uri(&format!("/api/booking/wizard/{}/{}", session, action))
}

#[actix_rt::test]
async fn test_start_full_wizard() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/booking/wizard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["session_id"].is_string());
    assert_eq!(body["view"]["step"], 1);
    assert_eq!(body["view"]["total_steps"], 7);
    assert_eq!(body["view"]["kind"], "category");
    assert_eq!(body["view"]["can_go_back"], false);
    assert_eq!(body["view"]["can_go_next"], false);
    assert_eq!(body["view"]["quote"]["estimated_total"], 155);
    assert_eq!(body["view"]["draft"]["service_tier"], "standard-plus");
}

#[actix_rt::test]
async fn test_start_basic_wizard() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let session = start_wizard!(app, "basic");
    let (status, body) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/booking/wizard/{}", session))
    );
    assert_eq!(status, 200);
    assert_eq!(body["view"]["total_steps"], 5);
    assert_eq!(body["view"]["kind"], "space");
    assert_eq!(body["view"]["features"]["time_slots"], false);
}

#[actix_rt::test]
async fn test_next_blocked_until_category_selected() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let session = start_wizard!(app, "full");

    let (status, body) = send!(app, post(&session, "next"));
    assert_eq!(status, 200);
    assert_eq!(body["step_change"]["kind"], "unchanged");
    assert_eq!(body["view"]["step"], 1);

    send!(app, patch(&session, "service_category", json!("residential")));
    let (_, body) = send!(app, post(&session, "next"));
    assert_eq!(body["step_change"]["kind"], "moved");
    assert_eq!(body["step_change"]["from"], 1);
    assert_eq!(body["step_change"]["to"], 2);
    assert_eq!(body["view"]["kind"], "space");
}

#[actix_rt::test]
async fn test_full_booking_round_trip() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let session = start_wizard!(app, "full");
    let user = get_test_user();

    send!(app, patch(&session, "service_category", json!("residential")));
    send!(app, post(&session, "next"));

    send!(app, patch(&session, "bedrooms", json!(2)));
    send!(app, patch(&session, "bathrooms", json!(1)));
    send!(app, patch(&session, "square_footage", json!("1500-1999")));
    send!(app, post(&session, "next"));

    send!(app, post(&session, "add-ons/inside-fridge"));
    let (_, body) = send!(app, post(&session, "add-ons/laundry"));
    assert_eq!(body["view"]["summary"]["add_on_count"], 2);
    assert_eq!(body["view"]["quote"]["add_on_total"], 60);
    send!(app, post(&session, "next"));

    send!(app, patch(&session, "frequency", json!("weekly")));
    let (_, body) = send!(app, post(&session, "next"));
    assert_eq!(body["view"]["kind"], "schedule");

    // Date alone does not unlock the schedule step.
    send!(app, patch(&session, "date", json!("2099-01-15")));
    let (_, body) = send!(app, post(&session, "next"));
    assert_eq!(body["step_change"]["kind"], "unchanged");

    send!(app, patch(&session, "time", json!("10:00 AM")));
    let (_, body) = send!(app, post(&session, "next"));
    assert_eq!(body["view"]["kind"], "location");

    send!(app, patch(&session, "address", json!("12 Elm St")));
    send!(app, patch(&session, "zip_code", json!("9021045")));
    send!(app, patch(&session, "contact.name", json!("Test User")));
    send!(app, patch(&session, "contact.email", json!("test@example.com")));
    let (_, body) = send!(app, post(&session, "next"));
    assert_eq!(body["view"]["kind"], "review");
    assert_eq!(body["view"]["show_discount_teaser"], false);
    assert_eq!(body["view"]["draft"]["zip_code"], "90210");
    assert_eq!(body["view"]["summary"]["space"], "2 Bedrooms, 1 Bathroom");
    assert_eq!(body["view"]["summary"]["frequency"], "weekly");
    // The weekly discount is shown but not charged.
    assert_eq!(body["view"]["quote"]["discount_percent"], -20);
    assert_eq!(body["view"]["quote"]["estimated_total"], 235);
    assert_eq!(body["view"]["quote"]["charged_total"], 235);

    let (status, body) = send!(
        app,
        post(&session, "confirm").insert_header((header::AUTHORIZATION, bearer_token(&user)))
    );
    assert_eq!(status, 201);
    assert_eq!(body["booking"]["total_price"], 235);
    assert_eq!(body["booking"]["status"], "pending");
    assert_eq!(body["booking"]["user_id"], "test_user_123");
    assert_eq!(body["booking"]["date"], "2099-01-15");
    assert_eq!(body["notice"]["level"], "success");
    assert_eq!(body["view"]["step"], 1);
    assert_eq!(body["view"]["draft"]["add_ons"], json!([]));

    let (status, body) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/bookings")
            .insert_header((header::AUTHORIZATION, bearer_token(&user)))
    );
    assert_eq!(status, 200);
    assert_eq!(body["upcoming"].as_array().unwrap().len(), 1);
    assert_eq!(body["upcoming"][0]["add_ons"], json!(["inside-fridge", "laundry"]));
    assert!(body["past"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_confirm_requires_sign_in() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let session = start_wizard!(app, "standard");

    let (status, body) = send!(app, post(&session, "confirm"));
    assert_eq!(status, 401);
    assert_eq!(body["redirect"], "/signin");

    let (status, _) = send!(
        app,
        post(&session, "confirm").insert_header((header::AUTHORIZATION, "Bearer not-a-jwt"))
    );
    assert_eq!(status, 401);
}

#[actix_rt::test]
async fn test_confirm_before_review_is_rejected() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let session = start_wizard!(app, "standard");

    let (status, body) = send!(
        app,
        post(&session, "confirm")
            .insert_header((header::AUTHORIZATION, bearer_token(&get_test_user())))
    );
    assert_eq!(status, 409);
    assert!(body["error"].is_string());
}

#[actix_rt::test]
async fn test_failed_confirm_keeps_draft() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let session = start_wizard!(app, "standard");

    send!(app, patch(&session, "address", json!("12 Elm St")));
    for _ in 0..5 {
        send!(app, post(&session, "next"));
    }

    test_app.store.set_failing(true);
    let (status, _) = send!(
        app,
        post(&session, "confirm")
            .insert_header((header::AUTHORIZATION, bearer_token(&get_test_user())))
    );
    assert_eq!(status, 502);

    let (_, body) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/booking/wizard/{}", session))
    );
    assert_eq!(body["view"]["kind"], "review");
    assert_eq!(body["view"]["draft"]["address"], "12 Elm St");

    test_app.store.set_failing(false);
    let (status, _) = send!(
        app,
        post(&session, "confirm")
            .insert_header((header::AUTHORIZATION, bearer_token(&get_test_user())))
    );
    assert_eq!(status, 201);
}

#[actix_rt::test]
async fn test_back_and_invalid_updates() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;
    let session = start_wizard!(app, "standard");

    let (_, body) = send!(app, post(&session, "back"));
    assert_eq!(body["step_change"]["kind"], "unchanged");

    let (_, body) = send!(app, patch(&session, "bedrooms", json!(9)));
    assert_eq!(body["view"]["draft"]["bedrooms"], 1);

    let (_, body) = send!(app, post(&session, "add-ons/garage-sweep"));
    assert_eq!(body["view"]["draft"]["add_ons"], json!([]));

    send!(app, post(&session, "next"));
    let (_, body) = send!(app, post(&session, "back"));
    assert_eq!(body["step_change"]["from"], 2);
    assert_eq!(body["view"]["step"], 1);
}

#[actix_rt::test]
async fn test_unknown_and_discarded_sessions() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let (status, _) = send!(
        app,
        test::TestRequest::get()
            .uri("/api/booking/wizard/6f1c1c3e-8d7a-4c55-9a53-2f0c1d7e9b10")
    );
    assert_eq!(status, 404);

    let session = start_wizard!(app, "full");
    let (status, _) = send!(
        app,
        test::TestRequest::delete().uri(&format!("/api/booking/wizard/{}", session))
    );
    assert_eq!(status, 204);

    let (status, _) = send!(app, post(&session, "next"));
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_concurrent_confirms_save_one_booking() {
    let test_app = TestApp::new();
    let store = web::Data::new(SlowBookingStore::default());
    let app = test::init_service(test_app.create_app_with(store.clone())).await;
    let session = start_wizard!(app, "basic");
    for _ in 0..4 {
        send!(app, post(&session, "next"));
    }

    let token = bearer_token(&get_test_user());
    let first = post(&session, "confirm")
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let second = post(&session, "confirm")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let (first, second) = futures::join!(
        test::call_service(&app, first),
        test::call_service(&app, second)
    );

    let mut statuses = vec![first.status().as_u16(), second.status().as_u16()];
    statuses.sort();
    assert_eq!(statuses, vec![201, 409]);

    let saved = store.inner.list_by_user("test_user_123").await.unwrap();
    assert_eq!(saved.len(), 1);

    let (_, body) = send!(
        app,
        test::TestRequest::get().uri(&format!("/api/booking/wizard/{}", session))
    );
    assert_eq!(body["view"]["step"], 1);
    assert_eq!(body["view"]["submitting"], false);
}

#[actix_rt::test]
async fn test_confirm_succeeds_when_session_discarded_mid_save() {
    let test_app = TestApp::new();
    let store = web::Data::new(SlowBookingStore::default());
    let app = test::init_service(test_app.create_app_with(store.clone())).await;
    let session = start_wizard!(app, "basic");
    for _ in 0..4 {
        send!(app, post(&session, "next"));
    }

    let confirm = post(&session, "confirm")
        .insert_header((header::AUTHORIZATION, bearer_token(&get_test_user())))
        .to_request();
    let discard = test::TestRequest::delete()
        .uri(&format!("/api/booking/wizard/{}", session))
        .to_request();
    let (confirm, discard) = futures::join!(
        test::call_service(&app, confirm),
        test::call_service(&app, discard)
    );

    assert_eq!(discard.status(), 204);
    assert_eq!(confirm.status(), 201);
    let body: Value = test::read_body_json(confirm).await;
    assert_eq!(body["booking"]["status"], "pending");
    assert!(body.get("view").is_none());

    let saved = store.inner.list_by_user("test_user_123").await.unwrap();
    assert_eq!(saved.len(), 1);
}
