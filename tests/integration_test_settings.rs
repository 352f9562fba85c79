mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_defaults_are_seeded_at_bootstrap() {
    let app = TestApp::new().await;

    let res = app.get("/api/appointment-settings").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let settings = &body["data"];

    assert_eq!(settings["slot_interval_min"], json!(30));
    assert_eq!(settings["buffer_min"], json!(15));
    assert_eq!(settings["max_appointments_per_day"], json!(20));
    assert_eq!(settings["service_types"].as_object().unwrap().len(), 7);
    assert_eq!(settings["service_types"]["installation"]["duration_min"], json!(240));
    assert_eq!(settings["business_hours"]["monday"], json!({"start": "08:00", "end": "20:00", "enabled": true}));
    assert!(settings["blackout_dates"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_settings_persists() {
    let app = TestApp::new().await;

    let res = app.send_json("PUT", "/api/appointment-settings", &json!({
        "slot_interval_min": 60,
        "buffer_min": 0
    })).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(app.get("/api/appointment-settings").await).await;
    assert_eq!(body["data"]["slot_interval_min"], json!(60));
    assert_eq!(body["data"]["buffer_min"], json!(0));
}

#[tokio::test]
async fn test_update_rejects_invalid_configuration() {
    let app = TestApp::new().await;

    let res = app.send_json("PUT", "/api/appointment-settings", &json!({"slot_interval_min": 20})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send_json("PUT", "/api/appointment-settings", &json!({"buffer_min": -5})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.send_json("PUT", "/api/appointment-settings", &json!({
        "business_hours": {
            "monday":    {"start": "18:00", "end": "08:00", "enabled": true},
            "tuesday":   {"start": "08:00", "end": "20:00", "enabled": true},
            "wednesday": {"start": "08:00", "end": "20:00", "enabled": true},
            "thursday":  {"start": "08:00", "end": "20:00", "enabled": true},
            "friday":    {"start": "08:00", "end": "20:00", "enabled": true},
            "saturday":  {"start": "08:00", "end": "20:00", "enabled": true},
            "sunday":    {"start": "08:00", "end": "20:00", "enabled": true}
        }
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // A rejected update must not partially apply.
    let body = parse_body(app.get("/api/appointment-settings").await).await;
    assert_eq!(body["data"]["slot_interval_min"], json!(30));
    assert_eq!(body["data"]["buffer_min"], json!(15));
}

#[tokio::test]
async fn test_blackout_date_roundtrip() {
    let app = TestApp::new().await;

    let res = app.send_json("POST", "/api/appointment-settings/blackout-dates", &json!({"date": "2025-12-24"})).await;
    assert_eq!(res.status(), StatusCode::OK);

    // Adding twice keeps a single entry.
    let res = app.send_json("POST", "/api/appointment-settings/blackout-dates", &json!({"date": "2025-12-24"})).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"]["blackout_dates"], json!(["2025-12-24"]));

    let res = app.delete("/api/appointment-settings/blackout-dates/2025-12-24").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["data"]["blackout_dates"].as_array().unwrap().is_empty());

    let res = app.delete("/api/appointment-settings/blackout-dates/2025-12-24").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.send_json("POST", "/api/appointment-settings/blackout-dates", &json!({"date": "christmas"})).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
