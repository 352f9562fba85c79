use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    AppointmentListQuery, AvailableSlotsQuery, CreateAppointmentRequest,
    UpdateAppointmentRequest, UpdateAppointmentStatusRequest,
};
use crate::api::dtos::responses::{DataResponse, ListResponse, MessageResponse};
use crate::api::handlers::{load_settings, parse_date};
use crate::domain::models::appointment::{
    Appointment, AppointmentStatus, CreatedBy, NewAppointmentParams,
};
use crate::domain::models::time::TimeOfDay;
use crate::domain::ports::AppointmentListFilter;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AppointmentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = AppointmentListFilter {
        date: query.date.as_deref().map(parse_date).transpose()?,
        start_date: query.start_date.as_deref().map(parse_date).transpose()?,
        end_date: query.end_date.as_deref().map(parse_date).transpose()?,
        status: query.status.map(AppointmentStatus::try_from).transpose()?,
        service_type: query.service_type,
        technician_id: query.technician,
        customer: query.customer,
    };

    let appointments = state.appointment_repo.list(&filter).await?;
    Ok(Json(ListResponse::new(appointments)))
}

pub async fn available_slots(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&query.date)?;
    let settings = load_settings(&state).await?;

    let slots = state
        .scheduling
        .available_slots(date, &query.service_type, &settings)
        .await?;
    Ok(Json(ListResponse::new(slots)))
}

pub async fn get_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = state.appointment_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;
    Ok(Json(DataResponse::new(appointment)))
}

pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let settings = load_settings(&state).await?;
    let service = settings.service_type(&payload.service_type)?;

    let start_time: TimeOfDay = payload.start_time.parse().map_err(AppError::from)?;
    let end_time: TimeOfDay = match payload.end_time {
        Some(raw) => raw.parse().map_err(AppError::from)?,
        None => start_time
            .plus_minutes(service.duration_min as u16)
            .ok_or_else(|| {
                AppError::MalformedTime(format!(
                    "service starting at {} would run past midnight",
                    start_time
                ))
            })?,
    };

    let status = payload.status
        .map(AppointmentStatus::try_from)
        .transpose()?
        .unwrap_or(AppointmentStatus::Pending);
    let created_by = payload.created_by
        .map(CreatedBy::try_from)
        .transpose()?
        .unwrap_or(CreatedBy::Customer);

    let technician_name = match &payload.technician_id {
        Some(id) => Some(
            state.technician_repo.find_by_id(id).await?
                .ok_or(AppError::NotFound("Technician not found".into()))?
                .name,
        ),
        None => None,
    };

    let appointment = Appointment::new(NewAppointmentParams {
        service_type: payload.service_type,
        status,
        customer_name: payload.customer_name,
        customer_email: payload.customer_email,
        customer_phone: payload.customer_phone,
        customer_address: payload.customer_address,
        customer_notes: payload.customer_notes,
        scheduled_date: date,
        start_time,
        end_time,
        technician_id: payload.technician_id,
        technician_name,
        equipment_type: payload.equipment_type,
        equipment_brand: payload.equipment_brand,
        issue_description: payload.issue_description,
        estimated_cost: payload.estimated_cost,
        created_by,
    });

    let created = state.scheduling.create_appointment(appointment).await?;
    info!("Appointment created: {} ({})", created.id, created.service_type);

    // A lost e-mail never rolls back the reservation.
    state.notifications.notify_created(&settings, &created).await;

    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut appointment = state.appointment_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;
    let settings = load_settings(&state).await?;

    if let Some(service_type) = payload.service_type {
        settings.service_type(&service_type)?;
        appointment.service_type = service_type;
    }
    if let Some(name) = payload.customer_name { appointment.customer_name = name; }
    if let Some(email) = payload.customer_email { appointment.customer_email = email; }
    if let Some(phone) = payload.customer_phone { appointment.customer_phone = phone; }
    if let Some(address) = payload.customer_address { appointment.customer_address = address; }
    if let Some(notes) = payload.customer_notes { appointment.customer_notes = Some(notes); }
    if let Some(equipment_type) = payload.equipment_type { appointment.equipment_type = Some(equipment_type); }
    if let Some(equipment_brand) = payload.equipment_brand { appointment.equipment_brand = Some(equipment_brand); }
    if let Some(issue) = payload.issue_description { appointment.issue_description = Some(issue); }
    if let Some(cost) = payload.estimated_cost { appointment.estimated_cost = Some(cost); }

    if let Some(technician_id) = payload.technician_id {
        if technician_id.is_empty() {
            appointment.technician_id = None;
            appointment.technician_name = None;
        } else {
            let technician = state.technician_repo.find_by_id(&technician_id).await?
                .ok_or(AppError::NotFound("Technician not found".into()))?;
            appointment.technician_id = Some(technician.id);
            appointment.technician_name = Some(technician.name);
        }
    }

    if payload.date.is_some() || payload.start_time.is_some() || payload.end_time.is_some() {
        if let Some(date_str) = payload.date {
            appointment.scheduled_date = parse_date(&date_str)?;
        }
        if let Some(start_raw) = payload.start_time {
            appointment.start_time = start_raw.parse().map_err(AppError::from)?;
        }
        appointment.end_time = match payload.end_time {
            Some(end_raw) => end_raw.parse().map_err(AppError::from)?,
            // Keep the booked duration when only the start moves.
            None => appointment
                .start_time
                .plus_minutes(appointment.duration_min as u16)
                .ok_or_else(|| {
                    AppError::MalformedTime(format!(
                        "appointment starting at {} would run past midnight",
                        appointment.start_time
                    ))
                })?,
        };
        appointment.duration_min =
            i32::from(appointment.end_time.minutes().saturating_sub(appointment.start_time.minutes()));
    }

    let updated = state.scheduling.update_appointment(appointment).await?;
    info!("Appointment updated: {}", updated.id);
    Ok(Json(DataResponse::new(updated)))
}

pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAppointmentStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut appointment = state.appointment_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Appointment not found".into()))?;

    let next = AppointmentStatus::try_from(payload.status)?;
    if !appointment.status.can_transition_to(next) {
        return Err(AppError::Validation(format!(
            "invalid status transition {} -> {}",
            appointment.status, next
        )));
    }

    let previous = appointment.status;
    appointment.status = next;
    // A status change can only free calendar space, so the gate is not needed.
    let updated = state.appointment_repo.update(&appointment).await?;
    info!("Appointment {} status: {} -> {}", updated.id, previous, next);

    if next == AppointmentStatus::Cancelled && previous != AppointmentStatus::Cancelled {
        let settings = load_settings(&state).await?;
        state.notifications.notify_cancelled(&settings, &updated).await;
    }

    Ok(Json(DataResponse::new(updated)))
}

pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.appointment_repo.delete(&id).await?;
    info!("Appointment deleted: {}", id);
    Ok(Json(MessageResponse::new("Appointment deleted")))
}
