mod common;

use axum::http::StatusCode;
use chrono::Weekday;
use common::{parse_body, upcoming_date, TestApp};
use serde_json::{json, Value};

async fn create_appointment(app: &TestApp, date: &str, start: &str, end: &str, status: &str) -> Value {
    let res = app.send_json("POST", "/api/appointments", &json!({
        "service_type": "maintenance",
        "date": date,
        "start_time": start,
        "end_time": end,
        "customer_name": "Priya Natarajan",
        "customer_email": "priya@example.com",
        "customer_phone": "555-0177",
        "customer_address": "18 Cedar Ct",
        "status": status,
        "created_by": "admin"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["data"].clone()
}

#[tokio::test]
async fn test_overlapping_appointment_is_rejected() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Mon);
    create_appointment(&app, &date, "10:00", "11:30", "confirmed").await;

    let res = app.send_json("POST", "/api/appointments", &json!({
        "service_type": "gas-refill",
        "date": date,
        "start_time": "11:00",
        "end_time": "12:00",
        "customer_name": "Marta Kovacs",
        "customer_email": "marta@example.com",
        "customer_phone": "555-0190",
        "customer_address": "77 Fir St"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["conflict_type"], json!("appointment"));
    // The colliding record is described for the caller.
    assert!(body["message"].as_str().unwrap().contains("Priya Natarajan"));
    assert!(body["message"].as_str().unwrap().contains("10:00 - 11:30"));
}

#[tokio::test]
async fn test_cancelled_appointment_frees_its_slot() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Tue);
    create_appointment(&app, &date, "10:00", "11:30", "cancelled").await;

    let res = app.send_json("POST", "/api/time-blocks/check-conflict", &json!({
        "date": date,
        "start_time": "11:00",
        "end_time": "12:00"
    })).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["has_conflict"], json!(false));

    let res = app.send_json("POST", "/api/appointments", &json!({
        "service_type": "gas-refill",
        "date": date,
        "start_time": "11:00",
        "customer_name": "Marta Kovacs",
        "customer_email": "marta@example.com",
        "customer_phone": "555-0190",
        "customer_address": "77 Fir St"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_no_show_appointment_frees_its_slot() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Tue);
    create_appointment(&app, &date, "10:00", "11:30", "no-show").await;

    let res = app.send_json("POST", "/api/time-blocks/check-conflict", &json!({
        "date": date,
        "start_time": "10:30",
        "end_time": "11:00"
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["has_conflict"], json!(false));
}

#[tokio::test]
async fn test_time_block_rejects_overlapping_appointment() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Wed);

    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Compressor overhaul",
        "date": date,
        "start_time": "14:00",
        "end_time": "16:00",
        "block_type": "maintenance"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.send_json("POST", "/api/appointments", &json!({
        "service_type": "quotation",
        "date": date,
        "start_time": "15:00",
        "customer_name": "Omar Haddad",
        "customer_email": "omar@example.com",
        "customer_phone": "555-0123",
        "customer_address": "5 Willow Way"
    })).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["conflict_type"], json!("time-block"));
    assert!(body["message"].as_str().unwrap().contains("Compressor overhaul"));
}

#[tokio::test]
async fn test_appointment_conflict_reported_over_block_conflict() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Thu);

    create_appointment(&app, &date, "08:00", "09:00", "confirmed").await;
    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Inventory count",
        "date": date,
        "start_time": "09:00",
        "end_time": "12:00",
        "block_type": "internal"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // Overlaps both; the appointment wins the reported type.
    let res = app.send_json("POST", "/api/time-blocks/check-conflict", &json!({
        "date": date,
        "start_time": "08:30",
        "end_time": "09:30"
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["has_conflict"], json!(true));
    assert_eq!(body["conflict_type"], json!("appointment"));
}

#[tokio::test]
async fn test_windows_touching_at_boundary_do_not_conflict() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Fri);
    create_appointment(&app, &date, "10:00", "11:00", "confirmed").await;

    let res = app.send_json("POST", "/api/appointments", &json!({
        "service_type": "gas-refill",
        "date": date,
        "start_time": "11:00",
        "end_time": "12:00",
        "customer_name": "Noel Tran",
        "customer_email": "noel@example.com",
        "customer_phone": "555-0155",
        "customer_address": "21 Aspen Rd"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_check_conflict_honours_exclude_id() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Mon);

    let res = app.send_json("POST", "/api/time-blocks", &json!({
        "title": "Fleet service",
        "date": date,
        "start_time": "09:00",
        "end_time": "10:00",
        "block_type": "internal"
    })).await;
    let block = parse_body(res).await["data"].clone();
    let block_id = block["id"].as_str().unwrap();

    let probe = json!({
        "date": date,
        "start_time": "09:30",
        "end_time": "10:30"
    });
    let body = parse_body(app.send_json("POST", "/api/time-blocks/check-conflict", &probe).await).await;
    assert_eq!(body["has_conflict"], json!(true));
    assert_eq!(body["conflict_type"], json!("time-block"));

    let probe_excluding = json!({
        "date": date,
        "start_time": "09:30",
        "end_time": "10:30",
        "exclude_id": block_id
    });
    let body = parse_body(app.send_json("POST", "/api/time-blocks/check-conflict", &probe_excluding).await).await;
    assert_eq!(body["has_conflict"], json!(false));
}

#[tokio::test]
async fn test_malformed_times_rejected_before_any_check() {
    let app = TestApp::new().await;
    let date = upcoming_date(Weekday::Mon);

    for (start, end) in [("25:00", "26:00"), ("oops", "10:00"), ("11:00", "10:00"), ("10:00", "10:00")] {
        let res = app.send_json("POST", "/api/time-blocks/check-conflict", &json!({
            "date": date,
            "start_time": start,
            "end_time": end
        })).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "expected 400 for {start}-{end}");
        let body = parse_body(res).await;
        assert_eq!(body["success"], json!(false));
    }
}

#[tokio::test]
async fn test_conflicts_are_scoped_to_their_date() {
    let app = TestApp::new().await;
    let monday = upcoming_date(Weekday::Mon);
    let tuesday = upcoming_date(Weekday::Tue);
    create_appointment(&app, &monday, "10:00", "11:30", "confirmed").await;

    let res = app.send_json("POST", "/api/time-blocks/check-conflict", &json!({
        "date": tuesday,
        "start_time": "10:00",
        "end_time": "11:30"
    })).await;
    let body = parse_body(res).await;
    assert_eq!(body["has_conflict"], json!(false));
}
