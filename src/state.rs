use std::sync::Arc;
use crate::config::Config;
use crate::domain::ports::{
    AppointmentRepository, EmailService, SettingsRepository, TechnicianRepository,
    TimeBlockRepository,
};
use crate::domain::services::notifications::NotificationService;
use crate::domain::services::scheduling::SchedulingService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub appointment_repo: Arc<dyn AppointmentRepository>,
    pub time_block_repo: Arc<dyn TimeBlockRepository>,
    pub technician_repo: Arc<dyn TechnicianRepository>,
    pub email_service: Arc<dyn EmailService>,
    pub scheduling: Arc<SchedulingService>,
    pub notifications: Arc<NotificationService>,
}
