use crate::domain::models::time::TimeOfDay;
use crate::error::AppError;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SETTINGS_ID: &str = "default";

pub const ALLOWED_SLOT_INTERVALS: [i32; 3] = [15, 30, 60];

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayHours {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub enabled: bool,
}

impl DayHours {
    fn default_open() -> Self {
        Self {
            start: "08:00".parse().unwrap(),
            end: "20:00".parse().unwrap(),
            enabled: true,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BusinessHours {
    pub monday: DayHours,
    pub tuesday: DayHours,
    pub wednesday: DayHours,
    pub thursday: DayHours,
    pub friday: DayHours,
    pub saturday: DayHours,
    pub sunday: DayHours,
}

impl BusinessHours {
    pub fn for_weekday(&self, weekday: Weekday) -> &DayHours {
        match weekday {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }

    fn days(&self) -> [(&'static str, &DayHours); 7] {
        [
            ("monday", &self.monday),
            ("tuesday", &self.tuesday),
            ("wednesday", &self.wednesday),
            ("thursday", &self.thursday),
            ("friday", &self.friday),
            ("saturday", &self.saturday),
            ("sunday", &self.sunday),
        ]
    }
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            monday: DayHours::default_open(),
            tuesday: DayHours::default_open(),
            wednesday: DayHours::default_open(),
            thursday: DayHours::default_open(),
            friday: DayHours::default_open(),
            saturday: DayHours::default_open(),
            sunday: DayHours::default_open(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServiceTypeConfig {
    pub duration_min: i32,
    pub enabled: bool,
    pub color: String,
    #[serde(default)]
    pub price: Option<f64>,
}

impl ServiceTypeConfig {
    fn new(duration_min: i32, color: &str) -> Self {
        Self {
            duration_min,
            enabled: true,
            color: color.to_string(),
            price: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EmailTemplates {
    pub confirmation: String,
    pub reminder: String,
    pub cancellation: String,
    pub admin_notification: String,
}

impl Default for EmailTemplates {
    fn default() -> Self {
        Self {
            confirmation: "Dear {{customer_name}},\n\nYour appointment is confirmed:\n\nService: {{service_type}}\nDate: {{date}}\nTime: {{time}}\nAddress: {{address}}\n\nThank you for choosing us.".to_string(),
            reminder: "Dear {{customer_name}},\n\nA reminder of your upcoming appointment:\n\nService: {{service_type}}\nDate: {{date}}\nTime: {{time}}\n\nSee you soon!".to_string(),
            cancellation: "Dear {{customer_name}},\n\nYour appointment has been cancelled:\n\nDate: {{date}}\nTime: {{time}}\n\nContact us if you would like to reschedule.".to_string(),
            admin_notification: "New appointment booked:\n\nCustomer: {{customer_name}}\nPhone: {{customer_phone}}\nEmail: {{customer_email}}\nService: {{service_type}}\nDate: {{date}}\nTime: {{time}}\nAddress: {{address}}\nNotes: {{notes}}".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NotificationSettings {
    pub email_enabled: bool,
    pub admin_email: String,
    pub reminder_hours_before: i64,
    #[serde(default)]
    pub templates: EmailTemplates,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_enabled: true,
            admin_email: "admin@example.com".to_string(),
            reminder_hours_before: 24,
            templates: EmailTemplates::default(),
        }
    }
}

/// Singleton scheduling configuration. One row per deployment, seeded by the
/// bootstrap step in `infra::factory` and mutated only through the admin
/// settings endpoints.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppointmentSettings {
    pub id: String,
    pub business_hours: BusinessHours,
    pub service_types: BTreeMap<String, ServiceTypeConfig>,
    pub slot_interval_min: i32,
    pub buffer_min: i32,
    pub max_appointments_per_day: i32,
    pub blackout_dates: Vec<NaiveDate>,
    pub notifications: NotificationSettings,
    pub updated_at: DateTime<Utc>,
}

impl Default for AppointmentSettings {
    fn default() -> Self {
        let mut service_types = BTreeMap::new();
        service_types.insert("maintenance".to_string(), ServiceTypeConfig::new(90, "#0EA5E9"));
        service_types.insert("installation".to_string(), ServiceTypeConfig::new(240, "#8B5CF6"));
        service_types.insert("repair".to_string(), ServiceTypeConfig::new(120, "#F59E0B"));
        service_types.insert("quotation".to_string(), ServiceTypeConfig::new(45, "#10B981"));
        service_types.insert("emergency".to_string(), ServiceTypeConfig::new(90, "#EF4444"));
        service_types.insert("deep-clean".to_string(), ServiceTypeConfig::new(150, "#06B6D4"));
        service_types.insert("gas-refill".to_string(), ServiceTypeConfig::new(60, "#EC4899"));

        Self {
            id: SETTINGS_ID.to_string(),
            business_hours: BusinessHours::default(),
            service_types,
            slot_interval_min: 30,
            buffer_min: 15,
            max_appointments_per_day: 20,
            blackout_dates: Vec::new(),
            notifications: NotificationSettings::default(),
            updated_at: Utc::now(),
        }
    }
}

impl AppointmentSettings {
    pub fn is_blackout(&self, date: NaiveDate) -> bool {
        self.blackout_dates.contains(&date)
    }

    /// Looks up an enabled service type, or fails with `InvalidServiceType`.
    pub fn service_type(&self, key: &str) -> Result<&ServiceTypeConfig, AppError> {
        match self.service_types.get(key) {
            Some(cfg) if cfg.enabled => Ok(cfg),
            _ => Err(AppError::InvalidServiceType(key.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !ALLOWED_SLOT_INTERVALS.contains(&self.slot_interval_min) {
            return Err(AppError::Validation(format!(
                "slot_interval_min must be one of {:?}",
                ALLOWED_SLOT_INTERVALS
            )));
        }
        if self.buffer_min < 0 {
            return Err(AppError::Validation("buffer_min must not be negative".into()));
        }
        if self.max_appointments_per_day < 1 {
            return Err(AppError::Validation("max_appointments_per_day must be at least 1".into()));
        }
        for (day, hours) in self.business_hours.days() {
            if hours.enabled && hours.start >= hours.end {
                return Err(AppError::Validation(format!(
                    "business hours for {} must start before they end",
                    day
                )));
            }
        }
        for (key, cfg) in &self.service_types {
            if cfg.duration_min <= 0 {
                return Err(AppError::Validation(format!(
                    "service type '{}' must have a positive duration",
                    key
                )));
            }
        }
        Ok(())
    }
}
