use crate::domain::models::time::{TimeOfDay, TimeWindow};
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no-show",
        }
    }

    /// Cancelled and no-show appointments free their slot; everything else
    /// obstructs the calendar.
    pub fn obstructs(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }

    /// Allowed-transition table. The lifecycle runs
    /// pending -> confirmed -> in-progress -> completed, with cancelled and
    /// no-show reachable from pending or confirmed. Re-assigning the current
    /// status is a no-op.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Pending, Self::NoShow)
                | (Self::Confirmed, Self::InProgress)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::NoShow)
                | (Self::InProgress, Self::Completed)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AppointmentStatus {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no-show" => Ok(Self::NoShow),
            _ => Err(AppError::Validation(format!("unknown appointment status '{}'", s))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatedBy {
    Customer,
    Admin,
}

impl CreatedBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<String> for CreatedBy {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!("unknown creator '{}'", s))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Appointment {
    pub id: String,
    pub service_type: String,
    #[sqlx(try_from = "String")]
    pub status: AppointmentStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_notes: Option<String>,
    pub scheduled_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub start_time: TimeOfDay,
    #[sqlx(try_from = "String")]
    pub end_time: TimeOfDay,
    pub duration_min: i32,
    pub technician_id: Option<String>,
    pub technician_name: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_brand: Option<String>,
    pub issue_description: Option<String>,
    pub estimated_cost: Option<f64>,
    #[sqlx(try_from = "String")]
    pub created_by: CreatedBy,
    pub reminder_sent: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewAppointmentParams {
    pub service_type: String,
    pub status: AppointmentStatus,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_notes: Option<String>,
    pub scheduled_date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub technician_id: Option<String>,
    pub technician_name: Option<String>,
    pub equipment_type: Option<String>,
    pub equipment_brand: Option<String>,
    pub issue_description: Option<String>,
    pub estimated_cost: Option<f64>,
    pub created_by: CreatedBy,
}

impl Appointment {
    pub fn new(params: NewAppointmentParams) -> Self {
        let duration_min =
            i32::from(params.end_time.minutes().saturating_sub(params.start_time.minutes()));
        Self {
            id: Uuid::new_v4().to_string(),
            service_type: params.service_type,
            status: params.status,
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            customer_address: params.customer_address,
            customer_notes: params.customer_notes,
            scheduled_date: params.scheduled_date,
            start_time: params.start_time,
            end_time: params.end_time,
            duration_min,
            technician_id: params.technician_id,
            technician_name: params.technician_name,
            equipment_type: params.equipment_type,
            equipment_brand: params.equipment_brand,
            issue_description: params.issue_description,
            estimated_cost: params.estimated_cost,
            created_by: params.created_by,
            reminder_sent: false,
            created_at: Utc::now(),
        }
    }

    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start_time, self.end_time)
    }
}
