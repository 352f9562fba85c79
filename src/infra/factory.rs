use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::models::settings::AppointmentSettings;
use crate::domain::ports::SettingsRepository;
use crate::domain::services::notifications::NotificationService;
use crate::domain::services::scheduling::SchedulingService;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_appointment_repo::PostgresAppointmentRepo,
    postgres_settings_repo::PostgresSettingsRepo,
    postgres_technician_repo::PostgresTechnicianRepo,
    postgres_time_block_repo::PostgresTimeBlockRepo,
    sqlite_appointment_repo::SqliteAppointmentRepo,
    sqlite_settings_repo::SqliteSettingsRepo,
    sqlite_technician_repo::SqliteTechnicianRepo,
    sqlite_time_block_repo::SqliteTimeBlockRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let settings_repo: Arc<dyn SettingsRepository> = Arc::new(PostgresSettingsRepo::new(pool.clone()));
        seed_default_settings(settings_repo.as_ref()).await;

        let appointment_repo: Arc<dyn crate::domain::ports::AppointmentRepository> =
            Arc::new(PostgresAppointmentRepo::new(pool.clone()));
        let time_block_repo: Arc<dyn crate::domain::ports::TimeBlockRepository> =
            Arc::new(PostgresTimeBlockRepo::new(pool.clone()));
        let scheduling = Arc::new(SchedulingService::new(appointment_repo.clone(), time_block_repo.clone()));
        let notifications = Arc::new(NotificationService::new(email_service.clone()));

        AppState {
            config: config.clone(),
            settings_repo,
            appointment_repo,
            time_block_repo,
            technician_repo: Arc::new(PostgresTechnicianRepo::new(pool.clone())),
            email_service,
            scheduling,
            notifications,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let settings_repo: Arc<dyn SettingsRepository> = Arc::new(SqliteSettingsRepo::new(pool.clone()));
        seed_default_settings(settings_repo.as_ref()).await;

        let appointment_repo: Arc<dyn crate::domain::ports::AppointmentRepository> =
            Arc::new(SqliteAppointmentRepo::new(pool.clone()));
        let time_block_repo: Arc<dyn crate::domain::ports::TimeBlockRepository> =
            Arc::new(SqliteTimeBlockRepo::new(pool.clone()));
        let scheduling = Arc::new(SchedulingService::new(appointment_repo.clone(), time_block_repo.clone()));
        let notifications = Arc::new(NotificationService::new(email_service.clone()));

        AppState {
            config: config.clone(),
            settings_repo,
            appointment_repo,
            time_block_repo,
            technician_repo: Arc::new(SqliteTechnicianRepo::new(pool.clone())),
            email_service,
            scheduling,
            notifications,
        }
    }
}

/// Explicit bootstrap of the settings singleton: seeded once at startup with
/// defaults, never lazily created on a read path.
pub async fn seed_default_settings(repo: &dyn SettingsRepository) {
    match repo.load().await.expect("Failed to load appointment settings") {
        Some(_) => info!("Appointment settings already present"),
        None => {
            repo.save(&AppointmentSettings::default())
                .await
                .expect("Failed to seed default appointment settings");
            info!("Seeded default appointment settings");
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
