use crate::domain::{models::settings::{AppointmentSettings, SETTINGS_ID}, ports::SettingsRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{PgPool, Row};

pub struct PostgresSettingsRepo {
    pool: PgPool,
}

impl PostgresSettingsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for PostgresSettingsRepo {
    async fn load(&self) -> Result<Option<AppointmentSettings>, AppError> {
        let row = sqlx::query("SELECT data FROM appointment_settings WHERE id = $1")
            .bind(SETTINGS_ID)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match row {
            Some(row) => {
                let data: String = row.get("data");
                let settings = serde_json::from_str(&data)
                    .map_err(|e| AppError::InternalWithMsg(format!("corrupt settings document: {}", e)))?;
                Ok(Some(settings))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, settings: &AppointmentSettings) -> Result<AppointmentSettings, AppError> {
        let data = serde_json::to_string(settings)
            .map_err(|e| AppError::InternalWithMsg(format!("settings serialization error: {}", e)))?;

        sqlx::query(
            "INSERT INTO appointment_settings (id, data, updated_at) VALUES ($1, $2, $3)
             ON CONFLICT(id) DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at"
        )
            .bind(&settings.id)
            .bind(data)
            .bind(settings.updated_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(settings.clone())
    }
}
