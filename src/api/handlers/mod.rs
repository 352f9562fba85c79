pub mod appointment;
pub mod health;
pub mod settings;
pub mod technician;
pub mod time_block;

use crate::domain::models::settings::AppointmentSettings;
use crate::error::AppError;
use crate::state::AppState;
use chrono::NaiveDate;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s)))
}

/// The settings row is seeded at startup; a missing row here is a deployment
/// fault, not a request error.
pub(crate) async fn load_settings(state: &AppState) -> Result<AppointmentSettings, AppError> {
    state
        .settings_repo
        .load()
        .await?
        .ok_or_else(|| AppError::InternalWithMsg("appointment settings not initialized".into()))
}
