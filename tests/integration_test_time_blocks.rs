mod common;

use axum::http::StatusCode;
use chrono::Weekday;
use common::{parse_body, upcoming_date, TestApp};
use serde_json::{json, Value};

async fn create_block(app: &TestApp, date: &str, start: &str, end: &str, block_type: &str) -> Value {
    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Corporate contract visit",
        "description": "Quarterly service for Altamar Offices",
        "date": date,
        "start_time": start,
        "end_time": end,
        "block_type": block_type,
        "created_by": "ops-admin",
        "notes": "Bring lift access badge"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["data"].clone()
}

#[tokio::test]
async fn test_time_block_crud_roundtrip() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Mon);

    let block = create_block(&app, &date, "09:00", "12:00", "corporate-contract").await;
    let id = block["id"].as_str().unwrap();
    assert_eq!(block["block_type"], json!("corporate-contract"));
    assert_eq!(block["start_time"], json!("09:00"));

    let fetched = parse_body(app.get(&format!("/api/time-blocks/{}", id)).await).await;
    assert_eq!(fetched["data"]["title"], json!("Corporate contract visit"));

    let listed = parse_body(app.get(&format!("/api/time-blocks?date={}", date)).await).await;
    assert_eq!(listed["count"], json!(1));

    let filtered = parse_body(app.get(&format!("/api/time-blocks?date={}&block_type=internal", date)).await).await;
    assert_eq!(filtered["count"], json!(0));

    let res = app.delete(&format!("/api/time-blocks/{}", id)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.get(&format!("/api/time-blocks/{}", id)).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_block_over_existing_block_is_rejected() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Tue);
    create_block(&app, &date, "09:00", "12:00", "corporate-contract").await;

    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Overlapping hold",
        "date": date,
        "start_time": "11:00",
        "end_time": "13:00",
        "block_type": "personal-deal"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["conflict_type"], json!("time-block"));
}

#[tokio::test]
async fn test_block_over_existing_appointment_is_rejected() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Wed);

    let res = app.send_json("POST", "/api/appointments", &json!({
        "service_type": "repair",
        "date": date,
        "start_time": "10:00",
        "customer_name": "Iris Meyer",
        "customer_email": "iris@example.com",
        "customer_phone": "555-0161",
        "customer_address": "40 Poplar St"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Walk-in hold",
        "date": date,
        "start_time": "11:00",
        "end_time": "12:30",
        "block_type": "other"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["conflict_type"], json!("appointment"));
    assert!(body["message"].as_str().unwrap().contains("Iris Meyer"));
}

#[tokio::test]
async fn test_moving_block_excludes_itself_from_the_check() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Thu);
    let block = create_block(&app, &date, "09:00", "10:00", "internal").await;
    let id = block["id"].as_str().unwrap();

    // Shifting within its own original window must not self-collide.
    let res = app.send_json("PUT", &format!("/api/time-blocks/{}", id), &json!({
        "start_time": "09:30",
        "end_time": "10:30"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["start_time"], json!("09:30"));
    assert_eq!(body["data"]["end_time"], json!("10:30"));
}

#[tokio::test]
async fn test_moving_block_onto_another_block_is_rejected() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Fri);
    create_block(&app, &date, "09:00", "10:00", "internal").await;
    let second = create_block(&app, &date, "13:00", "14:00", "internal").await;
    let id = second["id"].as_str().unwrap();

    let res = app.send_json("PUT", &format!("/api/time-blocks/{}", id), &json!({
        "start_time": "09:30",
        "end_time": "10:30"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["conflict_type"], json!("time-block"));
}

#[tokio::test]
async fn test_invalid_block_type_is_rejected() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Mon);

    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Bad type",
        "date": date,
        "start_time": "09:00",
        "end_time": "10:00",
        "block_type": "vacation"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_inverted_block_times_are_rejected() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Mon);

    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Backwards",
        "date": date,
        "start_time": "12:00",
        "end_time": "09:00",
        "block_type": "other"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
