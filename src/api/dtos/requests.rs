use crate::domain::models::settings::{BusinessHours, NotificationSettings, ServiceTypeConfig};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;

// Dates arrive as "YYYY-MM-DD" and times as "HH:MM" strings; handlers parse
// them so malformed input is rejected with a 400 before any query runs.

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub service_type: String,
    pub date: String,
    pub start_time: String,
    /// Derived from the service type's duration when omitted.
    pub end_time: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_notes: Option<String>,
    pub technician_id: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_brand: Option<String>,
    pub issue_description: Option<String>,
    pub estimated_cost: Option<f64>,
    pub status: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentRequest {
    pub service_type: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_address: Option<String>,
    pub customer_notes: Option<String>,
    pub technician_id: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_brand: Option<String>,
    pub issue_description: Option<String>,
    pub estimated_cost: Option<f64>,
}

#[derive(Deserialize)]
pub struct UpdateAppointmentStatusRequest {
    pub status: String,
}

#[derive(Deserialize)]
pub struct AppointmentListQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub service_type: Option<String>,
    pub technician: Option<String>,
    pub customer: Option<String>,
}

#[derive(Deserialize)]
pub struct AvailableSlotsQuery {
    pub date: String,
    pub service_type: String,
}

#[derive(Deserialize)]
pub struct CreateTimeBlockRequest {
    pub title: String,
    pub description: Option<String>,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub block_type: String,
    pub created_by: Option<String>,
    pub notes: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTimeBlockRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub block_type: Option<String>,
    pub notes: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize)]
pub struct TimeBlockListQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub block_type: Option<String>,
}

#[derive(Deserialize)]
pub struct CheckConflictRequest {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    /// Excludes the record being edited from the comparison set.
    pub exclude_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSettingsRequest {
    pub business_hours: Option<BusinessHours>,
    pub service_types: Option<BTreeMap<String, ServiceTypeConfig>>,
    pub slot_interval_min: Option<i32>,
    pub buffer_min: Option<i32>,
    pub max_appointments_per_day: Option<i32>,
    pub blackout_dates: Option<Vec<NaiveDate>>,
    pub notifications: Option<NotificationSettings>,
}

#[derive(Deserialize)]
pub struct AddBlackoutDateRequest {
    pub date: String,
}

#[derive(Deserialize)]
pub struct CreateTechnicianRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub specialties: Option<Vec<String>>,
}

#[derive(Deserialize)]
pub struct UpdateTechnicianRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub active: Option<bool>,
}
