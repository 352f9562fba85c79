use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    CheckConflictRequest, CreateTimeBlockRequest, TimeBlockListQuery, UpdateTimeBlockRequest,
};
use crate::api::dtos::responses::{ConflictCheckResponse, DataResponse, ListResponse, MessageResponse};
use crate::api::handlers::parse_date;
use crate::domain::models::time_block::{BlockType, NewTimeBlockParams, TimeBlock};
use crate::domain::ports::TimeBlockListFilter;
use crate::domain::services::scheduling::parse_window;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_time_blocks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TimeBlockListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = TimeBlockListFilter {
        date: query.date.as_deref().map(parse_date).transpose()?,
        start_date: query.start_date.as_deref().map(parse_date).transpose()?,
        end_date: query.end_date.as_deref().map(parse_date).transpose()?,
        block_type: query.block_type.map(BlockType::try_from).transpose()?,
    };

    let blocks = state.time_block_repo.list(&filter).await?;
    Ok(Json(ListResponse::new(blocks)))
}

pub async fn get_time_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let block = state.time_block_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Time block not found".into()))?;
    Ok(Json(DataResponse::new(block)))
}

pub async fn create_time_block(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTimeBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let window = parse_window(&payload.start_time, &payload.end_time)?;
    let block_type = BlockType::try_from(payload.block_type)?;

    let block = TimeBlock::new(NewTimeBlockParams {
        title: payload.title,
        description: payload.description,
        scheduled_date: date,
        start_time: window.start,
        end_time: window.end,
        block_type,
        created_by: payload.created_by.unwrap_or_else(|| "admin".to_string()),
        notes: payload.notes,
        color: payload.color,
    });

    let created = state.scheduling.create_time_block(block).await?;
    info!("Time block created: {} ({})", created.id, created.title);
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn update_time_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTimeBlockRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut block = state.time_block_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Time block not found".into()))?;

    if let Some(title) = payload.title { block.title = title; }
    if let Some(description) = payload.description { block.description = Some(description); }
    if let Some(notes) = payload.notes { block.notes = Some(notes); }
    if let Some(color) = payload.color { block.color = Some(color); }
    if let Some(block_type) = payload.block_type { block.block_type = BlockType::try_from(block_type)?; }
    if let Some(date_str) = payload.date { block.scheduled_date = parse_date(&date_str)?; }
    if let Some(start_raw) = payload.start_time { block.start_time = start_raw.parse().map_err(AppError::from)?; }
    if let Some(end_raw) = payload.end_time { block.end_time = end_raw.parse().map_err(AppError::from)?; }

    let updated = state.scheduling.update_time_block(block).await?;
    info!("Time block updated: {}", updated.id);
    Ok(Json(DataResponse::new(updated)))
}

pub async fn delete_time_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.time_block_repo.delete(&id).await?;
    info!("Time block deleted: {}", id);
    Ok(Json(MessageResponse::new("Time block deleted")))
}

/// Dry-run conflict probe for the admin calendar UI; persists nothing.
pub async fn check_conflict(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckConflictRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let window = parse_window(&payload.start_time, &payload.end_time)?;

    let conflict = state
        .scheduling
        .check_conflict(date, &window, payload.exclude_id.as_deref())
        .await?;

    Ok(Json(ConflictCheckResponse {
        success: true,
        has_conflict: conflict.is_some(),
        conflict_type: conflict.as_ref().map(|c| c.kind),
        conflict,
    }))
}
