use crate::domain::{models::time_block::TimeBlock, ports::{TimeBlockListFilter, TimeBlockRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

pub struct PostgresTimeBlockRepo {
    pool: PgPool,
}

impl PostgresTimeBlockRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeBlockRepository for PostgresTimeBlockRepo {
    async fn create(&self, b: &TimeBlock) -> Result<TimeBlock, AppError> {
        sqlx::query_as::<_, TimeBlock>(
            "INSERT INTO time_blocks (id, title, description, scheduled_date, start_time, end_time, block_type, created_by, notes, color, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *"
        )
            .bind(&b.id).bind(&b.title).bind(&b.description).bind(b.scheduled_date)
            .bind(b.start_time.to_string()).bind(b.end_time.to_string()).bind(b.block_type.as_str())
            .bind(&b.created_by).bind(&b.notes).bind(&b.color).bind(b.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeBlock>, AppError> {
        sqlx::query_as::<_, TimeBlock>("SELECT * FROM time_blocks WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &TimeBlockListFilter) -> Result<Vec<TimeBlock>, AppError> {
        let mut sql = String::from("SELECT * FROM time_blocks WHERE 1=1");
        let mut idx = 0;
        let mut next = move || { idx += 1; idx };
        if filter.date.is_some() { sql.push_str(&format!(" AND scheduled_date = ${}", next())); }
        if filter.start_date.is_some() { sql.push_str(&format!(" AND scheduled_date >= ${}", next())); }
        if filter.end_date.is_some() { sql.push_str(&format!(" AND scheduled_date <= ${}", next())); }
        if filter.block_type.is_some() { sql.push_str(&format!(" AND block_type = ${}", next())); }
        sql.push_str(" ORDER BY scheduled_date ASC, start_time ASC");

        let mut query = sqlx::query_as::<_, TimeBlock>(&sql);
        if let Some(date) = filter.date { query = query.bind(date); }
        if let Some(start) = filter.start_date { query = query.bind(start); }
        if let Some(end) = filter.end_date { query = query.bind(end); }
        if let Some(block_type) = filter.block_type { query = query.bind(block_type.as_str()); }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<TimeBlock>, AppError> {
        sqlx::query_as::<_, TimeBlock>("SELECT * FROM time_blocks WHERE scheduled_date = $1 ORDER BY start_time ASC").bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, b: &TimeBlock) -> Result<TimeBlock, AppError> {
        sqlx::query_as::<_, TimeBlock>(
            "UPDATE time_blocks SET title=$1, description=$2, scheduled_date=$3, start_time=$4, end_time=$5, block_type=$6, notes=$7, color=$8
             WHERE id=$9
             RETURNING *"
        )
            .bind(&b.title).bind(&b.description).bind(b.scheduled_date)
            .bind(b.start_time.to_string()).bind(b.end_time.to_string()).bind(b.block_type.as_str())
            .bind(&b.notes).bind(&b.color)
            .bind(&b.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM time_blocks WHERE id = $1").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Time block not found".into())); }
        Ok(())
    }
}
