use axum::{
    body::Body,
    extract::Request,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::api::handlers::{appointment, health, settings, technician, time_block};
use crate::state::AppState;
use tower_http::{
    classify::ServerErrorsFailureClass,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Appointments
        .route("/api/appointments", get(appointment::list_appointments).post(appointment::create_appointment))
        .route("/api/appointments/available-slots", get(appointment::available_slots))
        .route("/api/appointments/{id}", get(appointment::get_appointment).put(appointment::update_appointment).delete(appointment::delete_appointment))
        .route("/api/appointments/{id}/status", patch(appointment::update_status))

        // Time blocks
        .route("/api/time-blocks", get(time_block::list_time_blocks).post(time_block::create_time_block))
        .route("/api/time-blocks/check-conflict", post(time_block::check_conflict))
        .route("/api/time-blocks/{id}", get(time_block::get_time_block).put(time_block::update_time_block).delete(time_block::delete_time_block))

        // Scheduling configuration
        .route("/api/appointment-settings", get(settings::get_settings).put(settings::update_settings))
        .route("/api/appointment-settings/blackout-dates", post(settings::add_blackout_date))
        .route("/api/appointment-settings/blackout-dates/{date}", delete(settings::remove_blackout_date))

        // Technicians
        .route("/api/technicians", get(technician::list_technicians).post(technician::create_technician))
        .route("/api/technicians/{id}", get(technician::get_technician).put(technician::update_technician).delete(technician::delete_technician))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
