mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

fn make_server() -> TestServer {
    common::make_server(common::create_test_state(Vec::new()))
}

#[tokio::test]
async fn test_payment_breakdown() {
    let server = make_server();

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 20000,
            "downPayment": 2000,
            "interestRate": 6,
            "loanTermMonths": 60
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["loanAmount"], 18000.0);
    assert_eq!(json["tradeInValue"], 0.0);
    assert_eq!(json["monthlyPayment"], 347.99);
    assert_eq!(json["totalPayments"], 20879.43);
    assert_eq!(json["totalInterest"], 2879.43);
    assert_eq!(json["downPaymentPercent"], "10.0");
    assert_eq!(json["loanTermMonths"], 60);
    assert!(json.get("schedule").is_none());
}

#[tokio::test]
async fn test_down_payment_covering_price_yields_zero() {
    let server = make_server();

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 15000,
            "downPayment": 10000,
            "tradeInValue": 8000,
            "interestRate": 5.5,
            "loanTermMonths": 36
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["loanAmount"], 0.0);
    assert_eq!(json["monthlyPayment"], 0.0);
    assert_eq!(json["totalInterest"], 0.0);
}

#[tokio::test]
async fn test_schedule_on_request() {
    let server = make_server();

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 12000,
            "interestRate": 0,
            "loanTermMonths": 12,
            "includeSchedule": true
        }))
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    let schedule = json["schedule"].as_array().unwrap();
    assert_eq!(schedule.len(), 12);
    assert_eq!(schedule[0]["payment"], 1000.0);
    assert_eq!(schedule[11]["balance"], 0.0);
}

#[tokio::test]
async fn test_fractional_term_is_invalid_input() {
    let server = make_server();

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 20000,
            "interestRate": 6,
            "loanTermMonths": 60.5
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["details"]["kind"], "InvalidInput");
    assert_eq!(json["error"]["details"]["field"], "loanTermMonths");
}

#[tokio::test]
async fn test_negative_amount_is_invalid_input() {
    let server = make_server();

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 20000,
            "downPayment": -1,
            "interestRate": 6,
            "loanTermMonths": 60
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "downPayment"
    );
}

#[tokio::test]
async fn test_extreme_inputs_never_yield_null_money() {
    let server = make_server();

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 20000,
            "interestRate": 100000,
            "loanTermMonths": 600
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "interestRate"
    );

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 1e307,
            "interestRate": 6,
            "loanTermMonths": 60
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["error"]["details"]["field"],
        "vehiclePrice"
    );

    let response = server
        .post("/api/calculate-payment")
        .json(&json!({
            "vehiclePrice": 1e12,
            "interestRate": 100,
            "loanTermMonths": 600
        }))
        .await;
    response.assert_status_ok();
    let json = response.json::<Value>();
    assert!(json["monthlyPayment"].is_f64());
    assert!(json["totalPayments"].is_f64());
    assert!(json["totalInterest"].as_f64().unwrap() > 0.0);
}
