use crate::domain::models::{
    appointment::{Appointment, AppointmentStatus},
    settings::AppointmentSettings,
    technician::Technician,
    time_block::{BlockType, TimeBlock},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Debug, Default, Clone)]
pub struct AppointmentListFilter {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AppointmentStatus>,
    pub service_type: Option<String>,
    pub technician_id: Option<String>,
    /// Matches customer email or phone.
    pub customer: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct TimeBlockListFilter {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub block_type: Option<BlockType>,
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<Option<AppointmentSettings>, AppError>;
    async fn save(&self, settings: &AppointmentSettings) -> Result<AppointmentSettings, AppError>;
}

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError>;
    async fn list(&self, filter: &AppointmentListFilter) -> Result<Vec<Appointment>, AppError>;
    /// Appointments on `date` whose status still obstructs the calendar
    /// (cancelled and no-show excluded).
    async fn list_obstructing_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn update(&self, appointment: &Appointment) -> Result<Appointment, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    /// Pending/confirmed appointments between the two dates that have not
    /// been sent a reminder yet.
    async fn list_due_reminders(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Appointment>, AppError>;
    async fn mark_reminder_sent(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TimeBlockRepository: Send + Sync {
    async fn create(&self, block: &TimeBlock) -> Result<TimeBlock, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<TimeBlock>, AppError>;
    async fn list(&self, filter: &TimeBlockListFilter) -> Result<Vec<TimeBlock>, AppError>;
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<TimeBlock>, AppError>;
    async fn update(&self, block: &TimeBlock) -> Result<TimeBlock, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    async fn create(&self, technician: &Technician) -> Result<Technician, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Technician>, AppError>;
    async fn list(&self) -> Result<Vec<Technician>, AppError>;
    async fn update(&self, technician: &Technician) -> Result<Technician, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmailService: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), AppError>;
}
