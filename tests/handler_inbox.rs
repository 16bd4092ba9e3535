mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

async fn make_server() -> (TestServer, String) {
    let state = common::create_test_state(Vec::new());
    common::create_admin(&state).await;
    let server = common::make_server(state);
    let token = common::login(&server).await;
    (server, token)
}

fn booking() -> Value {
    json!({
        "fullName": "Dana Smith",
        "phone": "+1 555 010 2030",
        "email": "dana@example.com",
        "vehicleInfo": "2019 Honda Civic",
        "serviceType": "Oil Change",
        "preferredDate": "2026-11-03",
        "preferredTime": "10:00"
    })
}

// ─── Bookings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_booking_is_created_pending() {
    let (server, _) = make_server().await;

    let response = server.post("/api/service-bookings").json(&booking()).await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "pending");
    assert_eq!(json["fullName"], "Dana Smith");
}

#[tokio::test]
async fn test_booking_validation() {
    let (server, _) = make_server().await;

    let mut body = booking();
    body["phone"] = json!("call me maybe");
    body["preferredDate"] = json!("03/11/2026");

    let response = server.post("/api/service-bookings").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let fields = &response.json::<Value>()["error"]["details"]["fields"];
    assert!(fields.get("phone").is_some());
    assert!(fields.get("preferred_date").is_some());
}

#[tokio::test]
async fn test_booking_listing_requires_session() {
    let (server, token) = make_server().await;
    server.post("/api/service-bookings").json(&booking()).await;

    server
        .get("/api/service-bookings")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let json = server
        .get("/api/service-bookings?status=pending")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert_eq!(json.as_array().unwrap().len(), 1);

    let json = server
        .get("/api/service-bookings?status=confirmed")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_booking_lifecycle() {
    let (server, token) = make_server().await;
    let id = server
        .post("/api/service-bookings")
        .json(&booking())
        .await
        .json::<Value>()["id"]
        .as_i64()
        .unwrap();
    let path = format!("/api/service-bookings/{id}");

    server
        .patch(&path)
        .authorization_bearer(&token)
        .json(&json!({ "status": "completed" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    let response = server
        .patch(&path)
        .authorization_bearer(&token)
        .json(&json!({ "status": "confirmed" }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "confirmed");

    server
        .patch(&path)
        .authorization_bearer(&token)
        .json(&json!({ "status": "cancelled" }))
        .await
        .assert_status_ok();

    server
        .patch(&path)
        .authorization_bearer(&token)
        .json(&json!({ "status": "pending" }))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_unknown_booking() {
    let (server, token) = make_server().await;

    server
        .patch("/api/service-bookings/42")
        .authorization_bearer(&token)
        .json(&json!({ "status": "confirmed" }))
        .await
        .assert_status_not_found();
}

// ─── Contact ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_contact_message_flow() {
    let (server, token) = make_server().await;

    let response = server
        .post("/api/contact")
        .json(&json!({
            "firstName": "Ana", "lastName": "Lopez", "email": "Ana@Example.com",
            "interest": "financing", "message": "Do you offer leases?"
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let json = response.json::<Value>();
    assert_eq!(json["status"], "unread");
    assert_eq!(json["email"], "ana@example.com");
    let id = json["id"].as_i64().unwrap();

    let response = server
        .patch(&format!("/api/contact/{id}"))
        .authorization_bearer(&token)
        .json(&json!({ "status": "responded" }))
        .await;
    response.assert_status_ok();

    let unread = server
        .get("/api/contact?status=unread")
        .authorization_bearer(&token)
        .await
        .json::<Value>();
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_contact_requires_valid_email() {
    let (server, _) = make_server().await;

    server
        .post("/api/contact")
        .json(&json!({
            "firstName": "Ana", "lastName": "Lopez", "email": "nope",
            "interest": "financing", "message": "Hi"
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
