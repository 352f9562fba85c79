use crate::domain::{models::appointment::Appointment, ports::{AppointmentListFilter, AppointmentRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

pub struct SqliteAppointmentRepo {
    pool: SqlitePool,
}

impl SqliteAppointmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepo {
    async fn create(&self, a: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "INSERT INTO appointments (id, service_type, status, customer_name, customer_email, customer_phone, customer_address, customer_notes, scheduled_date, start_time, end_time, duration_min, technician_id, technician_name, equipment_type, equipment_brand, issue_description, estimated_cost, created_by, reminder_sent, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&a.id).bind(&a.service_type).bind(a.status.as_str()).bind(&a.customer_name)
            .bind(&a.customer_email).bind(&a.customer_phone).bind(&a.customer_address).bind(&a.customer_notes)
            .bind(a.scheduled_date).bind(a.start_time.to_string()).bind(a.end_time.to_string()).bind(a.duration_min)
            .bind(&a.technician_id).bind(&a.technician_name).bind(&a.equipment_type).bind(&a.equipment_brand)
            .bind(&a.issue_description).bind(a.estimated_cost).bind(a.created_by.as_str()).bind(a.reminder_sent)
            .bind(a.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>("SELECT * FROM appointments WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, filter: &AppointmentListFilter) -> Result<Vec<Appointment>, AppError> {
        let mut sql = String::from("SELECT * FROM appointments WHERE 1=1");
        if filter.date.is_some() { sql.push_str(" AND scheduled_date = ?"); }
        if filter.start_date.is_some() { sql.push_str(" AND scheduled_date >= ?"); }
        if filter.end_date.is_some() { sql.push_str(" AND scheduled_date <= ?"); }
        if filter.status.is_some() { sql.push_str(" AND status = ?"); }
        if filter.service_type.is_some() { sql.push_str(" AND service_type = ?"); }
        if filter.technician_id.is_some() { sql.push_str(" AND technician_id = ?"); }
        if filter.customer.is_some() { sql.push_str(" AND (customer_email = ? OR customer_phone = ?)"); }
        sql.push_str(" ORDER BY scheduled_date ASC, start_time ASC");

        let mut query = sqlx::query_as::<_, Appointment>(&sql);
        if let Some(date) = filter.date { query = query.bind(date); }
        if let Some(start) = filter.start_date { query = query.bind(start); }
        if let Some(end) = filter.end_date { query = query.bind(end); }
        if let Some(status) = filter.status { query = query.bind(status.as_str()); }
        if let Some(service_type) = &filter.service_type { query = query.bind(service_type); }
        if let Some(technician_id) = &filter.technician_id { query = query.bind(technician_id); }
        if let Some(customer) = &filter.customer { query = query.bind(customer).bind(customer); }

        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_obstructing_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE scheduled_date = ? AND status NOT IN ('cancelled', 'no-show') ORDER BY start_time ASC"
        ).bind(date).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, a: &Appointment) -> Result<Appointment, AppError> {
        sqlx::query_as::<_, Appointment>(
            "UPDATE appointments SET service_type=?, status=?, customer_name=?, customer_email=?, customer_phone=?, customer_address=?, customer_notes=?, scheduled_date=?, start_time=?, end_time=?, duration_min=?, technician_id=?, technician_name=?, equipment_type=?, equipment_brand=?, issue_description=?, estimated_cost=?, reminder_sent=?
             WHERE id=?
             RETURNING *"
        )
            .bind(&a.service_type).bind(a.status.as_str()).bind(&a.customer_name).bind(&a.customer_email)
            .bind(&a.customer_phone).bind(&a.customer_address).bind(&a.customer_notes).bind(a.scheduled_date)
            .bind(a.start_time.to_string()).bind(a.end_time.to_string()).bind(a.duration_min)
            .bind(&a.technician_id).bind(&a.technician_name).bind(&a.equipment_type).bind(&a.equipment_brand)
            .bind(&a.issue_description).bind(a.estimated_cost).bind(a.reminder_sent)
            .bind(&a.id)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM appointments WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Appointment not found".into())); }
        Ok(())
    }

    async fn list_due_reminders(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        sqlx::query_as::<_, Appointment>(
            "SELECT * FROM appointments WHERE status IN ('pending', 'confirmed') AND reminder_sent = 0 AND scheduled_date >= ? AND scheduled_date <= ?"
        ).bind(from).bind(to).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn mark_reminder_sent(&self, id: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE appointments SET reminder_sent = 1 WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        Ok(())
    }
}
