use hvac_booking_backend::{
    api::router::create_router,
    config::Config,
    domain::ports::EmailService,
    domain::services::notifications::NotificationService,
    domain::services::scheduling::SchedulingService,
    error::AppError,
    infra::factory::seed_default_settings,
    infra::repositories::{
        sqlite_appointment_repo::SqliteAppointmentRepo,
        sqlite_settings_repo::SqliteSettingsRepo,
        sqlite_technician_repo::SqliteTechnicianRepo,
        sqlite_time_block_repo::SqliteTimeBlockRepo,
    },
    state::AppState,
};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Datelike, Duration, Utc, Weekday};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// Records every outgoing mail instead of delivering it.
#[derive(Default)]
pub struct MockEmailService {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(&self, recipient: &str, subject: &str, _body: &str) -> Result<(), AppError> {
        self.sent.lock().unwrap().push((recipient.to_string(), subject.to_string()));
        Ok(())
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub emails: Arc<MockEmailService>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
        };

        let settings_repo = Arc::new(SqliteSettingsRepo::new(pool.clone()));
        seed_default_settings(settings_repo.as_ref()).await;

        let appointment_repo: Arc<dyn hvac_booking_backend::domain::ports::AppointmentRepository> =
            Arc::new(SqliteAppointmentRepo::new(pool.clone()));
        let time_block_repo: Arc<dyn hvac_booking_backend::domain::ports::TimeBlockRepository> =
            Arc::new(SqliteTimeBlockRepo::new(pool.clone()));
        let emails = Arc::new(MockEmailService::default());

        let state = Arc::new(AppState {
            config,
            settings_repo,
            appointment_repo: appointment_repo.clone(),
            time_block_repo: time_block_repo.clone(),
            technician_repo: Arc::new(SqliteTechnicianRepo::new(pool.clone())),
            email_service: emails.clone(),
            scheduling: Arc::new(SchedulingService::new(appointment_repo, time_block_repo)),
            notifications: Arc::new(NotificationService::new(emails.clone())),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            emails,
        }
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("GET").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }

    pub async fn send_json(&self, method: &str, uri: &str, payload: &Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method(method).uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())).unwrap()
        ).await.unwrap()
    }

    pub async fn delete(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder().method("DELETE").uri(uri)
                .body(Body::empty()).unwrap()
        ).await.unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A weekday at least one week out, so bookings never land in the past.
pub fn upcoming_date(weekday: Weekday) -> String {
    let mut date = Utc::now().date_naive() + Duration::days(7);
    while date.weekday() != weekday {
        date += Duration::days(1);
    }
    date.format("%Y-%m-%d").to_string()
}
