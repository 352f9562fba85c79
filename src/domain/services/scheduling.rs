use crate::domain::models::appointment::Appointment;
use crate::domain::models::reservation::{Conflict, Reservation};
use crate::domain::models::settings::AppointmentSettings;
use crate::domain::models::time::{TimeOfDay, TimeWindow};
use crate::domain::models::time_block::TimeBlock;
use crate::domain::ports::{AppointmentRepository, TimeBlockRepository};
use crate::error::AppError;
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::slots::generate_slots;

/// Keeps every candidate that overlaps no obstructing reservation.
pub fn filter_available(candidates: Vec<TimeWindow>, reservations: &[Reservation]) -> Vec<TimeWindow> {
    candidates
        .into_iter()
        .filter(|slot| {
            !reservations
                .iter()
                .any(|r| r.is_obstructing() && slot.overlaps(&r.window()))
        })
        .collect()
}

/// Slot generation and conflict detection over the shared calendar.
///
/// Every reservation-creating or time-moving operation goes through the
/// gated methods here: the conflict check and the insert/update run under
/// one async mutex, so two concurrent requests for overlapping windows
/// cannot both pass the check before either persists.
pub struct SchedulingService {
    appointments: Arc<dyn AppointmentRepository>,
    time_blocks: Arc<dyn TimeBlockRepository>,
    write_gate: Mutex<()>,
}

impl SchedulingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        time_blocks: Arc<dyn TimeBlockRepository>,
    ) -> Self {
        Self {
            appointments,
            time_blocks,
            write_gate: Mutex::new(()),
        }
    }

    /// Rejects windows that are empty or inverted before any query is issued.
    pub fn validate_window(window: &TimeWindow) -> Result<(), AppError> {
        if window.start >= window.end {
            return Err(AppError::MalformedTime(format!(
                "start time {} must be before end time {}",
                window.start, window.end
            )));
        }
        Ok(())
    }

    /// Bookable windows for a date and service type: business hours minus
    /// blackouts, walked at the configured interval, minus everything the
    /// reservation directory already occupies.
    pub async fn available_slots(
        &self,
        date: NaiveDate,
        service_type: &str,
        settings: &AppointmentSettings,
    ) -> Result<Vec<TimeWindow>, AppError> {
        let hours = settings.business_hours.for_weekday(date.weekday());
        if !hours.enabled {
            return Ok(Vec::new());
        }
        if settings.is_blackout(date) {
            debug!("date {} is blacked out", date);
            return Ok(Vec::new());
        }

        let service = settings.service_type(service_type)?;

        let candidates = generate_slots(
            hours.start,
            hours.end,
            settings.slot_interval_min as u16,
            service.duration_min as u16,
            settings.buffer_min as u16,
        );

        let reservations = self.load_reservations(date).await?;
        Ok(filter_available(candidates, &reservations))
    }

    /// First conflict between the proposed window and the reservation
    /// directory for that date, or `None`. Appointments are reported over
    /// time blocks when both collide. `exclude_id` skips the record being
    /// edited, whichever class it belongs to.
    pub async fn check_conflict(
        &self,
        date: NaiveDate,
        window: &TimeWindow,
        exclude_id: Option<&str>,
    ) -> Result<Option<Conflict>, AppError> {
        let reservations = self.load_reservations(date).await?;
        let hit = reservations
            .iter()
            .filter(|r| exclude_id.is_none_or(|id| r.id() != id))
            .find(|r| r.is_obstructing() && window.overlaps(&r.window()));
        Ok(hit.map(Conflict::from_reservation))
    }

    pub async fn create_appointment(&self, appointment: Appointment) -> Result<Appointment, AppError> {
        Self::validate_window(&appointment.window())?;
        let _guard = self.write_gate.lock().await;
        self.ensure_free(appointment.scheduled_date, &appointment.window(), None)
            .await?;
        self.appointments.create(&appointment).await
    }

    /// Re-validates the (possibly moved) window against everything except the
    /// appointment itself, then persists.
    pub async fn update_appointment(&self, appointment: Appointment) -> Result<Appointment, AppError> {
        Self::validate_window(&appointment.window())?;
        let _guard = self.write_gate.lock().await;
        self.ensure_free(
            appointment.scheduled_date,
            &appointment.window(),
            Some(&appointment.id),
        )
        .await?;
        self.appointments.update(&appointment).await
    }

    pub async fn create_time_block(&self, block: TimeBlock) -> Result<TimeBlock, AppError> {
        Self::validate_window(&block.window())?;
        let _guard = self.write_gate.lock().await;
        self.ensure_free(block.scheduled_date, &block.window(), None).await?;
        self.time_blocks.create(&block).await
    }

    pub async fn update_time_block(&self, block: TimeBlock) -> Result<TimeBlock, AppError> {
        Self::validate_window(&block.window())?;
        let _guard = self.write_gate.lock().await;
        self.ensure_free(block.scheduled_date, &block.window(), Some(&block.id))
            .await?;
        self.time_blocks.update(&block).await
    }

    async fn ensure_free(
        &self,
        date: NaiveDate,
        window: &TimeWindow,
        exclude_id: Option<&str>,
    ) -> Result<(), AppError> {
        match self.check_conflict(date, window, exclude_id).await? {
            Some(conflict) => Err(conflict_error(conflict)),
            None => Ok(()),
        }
    }

    /// Loads both reservation classes for the date. Appointments come first
    /// so an appointment collision wins the reported conflict type.
    async fn load_reservations(&self, date: NaiveDate) -> Result<Vec<Reservation>, AppError> {
        let appointments = self.appointments.list_obstructing_by_date(date).await?;
        let blocks = self.time_blocks.list_by_date(date).await?;

        let mut reservations: Vec<Reservation> =
            appointments.into_iter().map(Reservation::Appointment).collect();
        reservations.extend(blocks.into_iter().map(Reservation::TimeBlock));
        Ok(reservations)
    }
}

fn conflict_error(conflict: Conflict) -> AppError {
    use crate::domain::models::reservation::ConflictKind;
    let detail = match conflict.kind {
        ConflictKind::Appointment => {
            format!("An appointment already occupies this time: {}", conflict.description)
        }
        ConflictKind::TimeBlock => {
            format!("This time is blocked: {}", conflict.description)
        }
    };
    AppError::SchedulingConflict { kind: conflict.kind, detail }
}

/// Convenience used by handlers to parse and validate a proposed window in
/// one step, before any repository call.
pub fn parse_window(start: &str, end: &str) -> Result<TimeWindow, AppError> {
    let start: TimeOfDay = start.parse().map_err(AppError::from)?;
    let end: TimeOfDay = end.parse().map_err(AppError::from)?;
    let window = TimeWindow::new(start, end);
    SchedulingService::validate_window(&window)?;
    Ok(window)
}
