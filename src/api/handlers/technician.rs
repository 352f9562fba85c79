use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateTechnicianRequest, UpdateTechnicianRequest};
use crate::api::dtos::responses::{DataResponse, ListResponse, MessageResponse};
use crate::domain::models::technician::{Specialties, Technician};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_technicians(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let technicians = state.technician_repo.list().await?;
    Ok(Json(ListResponse::new(technicians)))
}

pub async fn get_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let technician = state.technician_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Technician not found".into()))?;
    Ok(Json(DataResponse::new(technician)))
}

pub async fn create_technician(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTechnicianRequest>,
) -> Result<impl IntoResponse, AppError> {
    let technician = Technician::new(
        payload.name,
        payload.email,
        payload.phone,
        payload.specialties.unwrap_or_default(),
    );

    let created = state.technician_repo.create(&technician).await?;
    info!("Technician created: {}", created.id);
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn update_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTechnicianRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut technician = state.technician_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Technician not found".into()))?;

    if let Some(name) = payload.name { technician.name = name; }
    if let Some(email) = payload.email { technician.email = email; }
    if let Some(phone) = payload.phone { technician.phone = phone; }
    if let Some(specialties) = payload.specialties { technician.specialties = Specialties(specialties); }
    if let Some(active) = payload.active { technician.active = active; }

    let updated = state.technician_repo.update(&technician).await?;
    info!("Technician updated: {}", updated.id);
    Ok(Json(DataResponse::new(updated)))
}

pub async fn delete_technician(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.technician_repo.delete(&id).await?;
    info!("Technician deleted: {}", id);
    Ok(Json(MessageResponse::new("Technician deleted")))
}
