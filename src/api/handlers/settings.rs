use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{AddBlackoutDateRequest, UpdateSettingsRequest};
use crate::api::dtos::responses::DataResponse;
use crate::api::handlers::{load_settings, parse_date};
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let settings = load_settings(&state).await?;
    Ok(Json(DataResponse::new(settings)))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut settings = load_settings(&state).await?;

    if let Some(business_hours) = payload.business_hours { settings.business_hours = business_hours; }
    if let Some(service_types) = payload.service_types { settings.service_types = service_types; }
    if let Some(interval) = payload.slot_interval_min { settings.slot_interval_min = interval; }
    if let Some(buffer) = payload.buffer_min { settings.buffer_min = buffer; }
    if let Some(max) = payload.max_appointments_per_day { settings.max_appointments_per_day = max; }
    if let Some(blackout_dates) = payload.blackout_dates { settings.blackout_dates = blackout_dates; }
    if let Some(notifications) = payload.notifications { settings.notifications = notifications; }

    settings.validate()?;
    settings.updated_at = Utc::now();

    let saved = state.settings_repo.save(&settings).await?;
    info!("Appointment settings updated");
    Ok(Json(DataResponse::new(saved)))
}

pub async fn add_blackout_date(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AddBlackoutDateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let mut settings = load_settings(&state).await?;

    if !settings.blackout_dates.contains(&date) {
        settings.blackout_dates.push(date);
        settings.blackout_dates.sort();
        settings.updated_at = Utc::now();
        settings = state.settings_repo.save(&settings).await?;
        info!("Blackout date added: {}", date);
    }

    Ok(Json(DataResponse::new(settings)))
}

pub async fn remove_blackout_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date)?;
    let mut settings = load_settings(&state).await?;

    let before = settings.blackout_dates.len();
    settings.blackout_dates.retain(|d| *d != date);
    if settings.blackout_dates.len() == before {
        return Err(AppError::NotFound("Blackout date not found".into()));
    }

    settings.updated_at = Utc::now();
    let saved = state.settings_repo.save(&settings).await?;
    info!("Blackout date removed: {}", date);
    Ok(Json(DataResponse::new(saved)))
}
