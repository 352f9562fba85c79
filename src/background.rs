use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};
use crate::error::AppError;
use crate::state::AppState;

const POLL_INTERVAL: Duration = Duration::from_secs(3600);

/// Periodically scans for pending/confirmed appointments entering the
/// reminder window and sends each customer one reminder. The `reminder_sent`
/// flag is only set after a successful send, so a failed delivery is retried
/// on the next pass.
pub async fn start_reminder_worker(state: Arc<AppState>) {
    info!("Starting appointment reminder worker...");

    loop {
        if let Err(e) = run_reminder_pass(&state).await {
            error!("Reminder pass failed: {:?}", e);
        }
        sleep(POLL_INTERVAL).await;
    }
}

async fn run_reminder_pass(state: &Arc<AppState>) -> Result<(), AppError> {
    let settings = state.settings_repo.load().await?
        .ok_or_else(|| AppError::InternalWithMsg("appointment settings not initialized".into()))?;

    if !settings.notifications.email_enabled {
        return Ok(());
    }

    let now = Utc::now();
    let horizon = now + chrono::Duration::hours(settings.notifications.reminder_hours_before);
    let due = state
        .appointment_repo
        .list_due_reminders(now.date_naive(), horizon.date_naive())
        .await?;

    if due.is_empty() {
        return Ok(());
    }
    info!("Found {} appointment(s) due a reminder", due.len());

    for appointment in due {
        let span = info_span!(
            "appointment_reminder",
            appointment_id = %appointment.id,
            scheduled_date = %appointment.scheduled_date,
        );

        async {
            match state.notifications.send_reminder(&settings, &appointment).await {
                Ok(()) => {
                    if let Err(e) = state.appointment_repo.mark_reminder_sent(&appointment.id).await {
                        error!("Failed to mark reminder as sent: {:?}", e);
                    } else {
                        info!("Reminder sent to {}", appointment.customer_email);
                    }
                }
                Err(e) => error!("Failed to send reminder: {:?}", e),
            }
        }
        .instrument(span)
        .await;
    }

    Ok(())
}
