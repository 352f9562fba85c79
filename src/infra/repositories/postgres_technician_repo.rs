use crate::domain::{models::technician::Technician, ports::TechnicianRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresTechnicianRepo {
    pool: PgPool,
}

impl PostgresTechnicianRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TechnicianRepository for PostgresTechnicianRepo {
    async fn create(&self, t: &Technician) -> Result<Technician, AppError> {
        sqlx::query_as::<_, Technician>(
            "INSERT INTO technicians (id, name, email, phone, specialties, active, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *"
        )
            .bind(&t.id).bind(&t.name).bind(&t.email).bind(&t.phone)
            .bind(t.specialties.to_storage()).bind(t.active).bind(t.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Technician>, AppError> {
        sqlx::query_as::<_, Technician>("SELECT * FROM technicians WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Technician>, AppError> {
        sqlx::query_as::<_, Technician>("SELECT * FROM technicians ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, t: &Technician) -> Result<Technician, AppError> {
        sqlx::query_as::<_, Technician>(
            "UPDATE technicians SET name=$1, email=$2, phone=$3, specialties=$4, active=$5 WHERE id=$6 RETURNING *"
        )
            .bind(&t.name).bind(&t.email).bind(&t.phone).bind(t.specialties.to_storage()).bind(t.active)
            .bind(&t.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM technicians WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Technician not found".into())); }
        Ok(())
    }
}
