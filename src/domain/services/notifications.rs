use crate::domain::models::appointment::Appointment;
use crate::domain::models::settings::AppointmentSettings;
use crate::domain::ports::EmailService;
use crate::error::AppError;
use std::sync::Arc;
use tracing::warn;

const CONFIRMATION_SUBJECT: &str = "Your appointment is confirmed";
const CANCELLATION_SUBJECT: &str = "Your appointment has been cancelled";
const REMINDER_SUBJECT: &str = "Appointment reminder";
const ADMIN_SUBJECT: &str = "New appointment booked";

/// Renders the placeholder templates stored in the scheduling settings and
/// hands them to the e-mail port. Delivery failures are the caller's problem
/// only for reminders (the worker must not mark unsent reminders as sent);
/// the create/cancel paths log and move on - a lost e-mail never rolls back
/// a reservation.
pub struct NotificationService {
    email: Arc<dyn EmailService>,
}

impl NotificationService {
    pub fn new(email: Arc<dyn EmailService>) -> Self {
        Self { email }
    }

    pub async fn notify_created(&self, settings: &AppointmentSettings, appointment: &Appointment) {
        if !settings.notifications.email_enabled {
            return;
        }
        let templates = &settings.notifications.templates;

        if let Err(e) = self
            .render_and_send(
                &appointment.customer_email,
                CONFIRMATION_SUBJECT,
                &templates.confirmation,
                appointment,
            )
            .await
        {
            warn!("failed to send confirmation for appointment {}: {}", appointment.id, e);
        }

        if let Err(e) = self
            .render_and_send(
                &settings.notifications.admin_email,
                ADMIN_SUBJECT,
                &templates.admin_notification,
                appointment,
            )
            .await
        {
            warn!("failed to notify admin about appointment {}: {}", appointment.id, e);
        }
    }

    pub async fn notify_cancelled(&self, settings: &AppointmentSettings, appointment: &Appointment) {
        if !settings.notifications.email_enabled {
            return;
        }
        if let Err(e) = self
            .render_and_send(
                &appointment.customer_email,
                CANCELLATION_SUBJECT,
                &settings.notifications.templates.cancellation,
                appointment,
            )
            .await
        {
            warn!("failed to send cancellation for appointment {}: {}", appointment.id, e);
        }
    }

    pub async fn send_reminder(
        &self,
        settings: &AppointmentSettings,
        appointment: &Appointment,
    ) -> Result<(), AppError> {
        self.render_and_send(
            &appointment.customer_email,
            REMINDER_SUBJECT,
            &settings.notifications.templates.reminder,
            appointment,
        )
        .await
    }

    async fn render_and_send(
        &self,
        recipient: &str,
        subject: &str,
        template: &str,
        appointment: &Appointment,
    ) -> Result<(), AppError> {
        let body = render_template(template, appointment)?;
        self.email.send(recipient, subject, &body).await
    }
}

fn render_template(template: &str, appointment: &Appointment) -> Result<String, AppError> {
    let mut tera = tera::Tera::default();
    tera.add_raw_template("message", template)
        .map_err(|e| AppError::InternalWithMsg(format!("template parse error: {:?}", e)))?;

    let mut context = tera::Context::new();
    context.insert("customer_name", &appointment.customer_name);
    context.insert("customer_email", &appointment.customer_email);
    context.insert("customer_phone", &appointment.customer_phone);
    context.insert("service_type", &appointment.service_type);
    context.insert("date", &appointment.scheduled_date.format("%Y-%m-%d").to_string());
    context.insert(
        "time",
        &format!("{} - {}", appointment.start_time, appointment.end_time),
    );
    context.insert("address", &appointment.customer_address);
    context.insert("notes", appointment.customer_notes.as_deref().unwrap_or(""));

    tera.render("message", &context)
        .map_err(|e| AppError::InternalWithMsg(format!("template render error: {:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::appointment::{AppointmentStatus, CreatedBy, NewAppointmentParams};
    use chrono::NaiveDate;

    #[test]
    fn test_render_fills_placeholders() {
        let appointment = Appointment::new(NewAppointmentParams {
            service_type: "maintenance".into(),
            status: AppointmentStatus::Pending,
            customer_name: "Sam Ortiz".into(),
            customer_email: "sam@example.com".into(),
            customer_phone: "555-0142".into(),
            customer_address: "4 Pine Rd".into(),
            customer_notes: None,
            scheduled_date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            start_time: "09:00".parse().unwrap(),
            end_time: "10:30".parse().unwrap(),
            technician_id: None,
            technician_name: None,
            equipment_type: None,
            equipment_brand: None,
            issue_description: None,
            estimated_cost: None,
            created_by: CreatedBy::Customer,
        });

        let body = render_template(
            "{{customer_name}}: {{service_type}} on {{date}} at {{time}}",
            &appointment,
        )
        .unwrap();
        assert_eq!(body, "Sam Ortiz: maintenance on 2025-06-02 at 09:00 - 10:30");
    }
}
