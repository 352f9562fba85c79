use crate::domain::{models::time_block::TimeBlock, ports::{TimeBlockListFilter, TimeBlockRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteTimeBlockRepo {
    pool: SqlitePool,
}

impl SqliteTimeBlockRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimeBlockRepository for SqliteTimeBlockRepo {
    async fn create(&self, b: &TimeBlock) -> Result<TimeBlock, AppError> {
        sqlx::query_as::<_, TimeBlock>(
            "INSERT INTO time_blocks (id, title, description, scheduled_date, start_time, end_time, block_type, created_by, notes, color, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&b.id).bind(&b.title).bind(&b.description).bind(b.scheduled_date)
            .bind(b.start_time.to_string()).bind(b.end_time.to_string()).bind(b.block_type.as_str())
            .bind(&b.created_by).bind(&b.notes).bind(&b.color).bind(b.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TimeBlock>, AppError> {
        sqlx::query_as::<_, TimeBlock>("SELECT * FROM time_blocks WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &TimeBlockListFilter) -> Result<Vec<TimeBlock>, AppError> {
        let mut sql = String::from("SELECT * FROM time_blocks WHERE 1=1");
        if filter.date.is_some() { sql.push_str(" AND scheduled_date = ?"); }
        if filter.start_date.is_some() { sql.push_str(" AND scheduled_date >= ?"); }
        if filter.end_date.is_some() { sql.push_str(" AND scheduled_date <= ?"); }
        if filter.block_type.is_some() { sql.push_str(" AND block_type = ?"); }
        sql.push_str(" ORDER BY scheduled_date ASC, start_time ASC");

        let mut query = sqlx::query_as::<_, TimeBlock>(&sql);
        if let Some(date) = filter.date { query = query.bind(date); }
        if let Some(start) = filter.start_date { query = query.bind(start); }
        if let Some(end) = filter.end_date { query = query.bind(end); }
        if let Some(block_type) = filter.block_type { query = query.bind(block_type.as_str()); }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<TimeBlock>, AppError> {
        sqlx::query_as::<_, TimeBlock>("SELECT * FROM time_blocks WHERE scheduled_date = ? ORDER BY start_time ASC").bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, b: &TimeBlock) -> Result<TimeBlock, AppError> {
        sqlx::query_as::<_, TimeBlock>(
            "UPDATE time_blocks SET title=?, description=?, scheduled_date=?, start_time=?, end_time=?, block_type=?, notes=?, color=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&b.title).bind(&b.description).bind(b.scheduled_date)
            .bind(b.start_time.to_string()).bind(b.end_time.to_string()).bind(b.block_type.as_str())
            .bind(&b.notes).bind(&b.color)
            .bind(&b.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM time_blocks WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Time block not found".into())); }
        Ok(())
    }
}
